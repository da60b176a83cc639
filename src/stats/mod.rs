pub mod detail;
pub mod summary;

pub use detail::{detail, Detail, DetailMode, DetailRow};
pub use summary::{CategoryBreakdown, Summary};
