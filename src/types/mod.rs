pub mod identifiers;
pub mod report;

pub use identifiers::{CategoryKey, RegistryVersion, Timestamp, TimestampError};
pub use report::{ConsumedItem, ReportStatus, SelectionError, SelectionReport};
