pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod feed;
pub mod session;
pub mod utils;

// Re-export the pieces most callers touch.
pub use catalog::{PriceCatalog, PriceEntry, RawPriceEntry};
pub use convert::{convert, display_rate, ConversionRequest, ConversionResult};
pub use error::SwapError;
pub use session::{derive_outputs, reduce, ConversionState, Session, SessionEvent, SessionPhase};
