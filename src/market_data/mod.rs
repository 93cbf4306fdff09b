pub mod series_store;
pub mod kline_feed;

pub use series_store::TimeSeriesStore;
pub use kline_feed::{BinanceKlineFeed, ClosedCandle};
