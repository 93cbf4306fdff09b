/**
* filename : mod
* author : HAMA
* date: 2025. 5. 11.
* description: 
**/

pub mod signal_types;
pub mod signal_classifier;
pub mod change_gate;

pub use signal_types::*;
pub use signal_classifier::*;
pub use change_gate::*;
