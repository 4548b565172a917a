pub mod enrich;
pub mod http;
pub mod logging;
pub mod static_source;

pub use enrich::{FlagEnricher, FlagPolicy};
pub use http::{HttpSource, DEFAULT_ENDPOINT};
pub use logging::{init_logging, Logger};
pub use static_source::StaticSource;
