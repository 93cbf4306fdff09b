pub mod market_data;
pub mod response;

pub use market_data::PriceObservation;
pub use response::{CandleCount, EarlyWaitRecord, IngestOutcome, StatusReport};
