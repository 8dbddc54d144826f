//! Business logic services.

pub mod bridge;
pub mod fetcher;

pub use bridge::{Bridge, BridgeObserver, TracingObserver};
pub use fetcher::{FileFetcher, LocalFetcher, S3Fetcher};
