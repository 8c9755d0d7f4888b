pub mod domain;
pub mod record;
pub mod summary;

pub use domain::ScaleDomain;
pub use record::RawRecord;
pub use summary::{GridKey, MonthlyAccumulator, MonthlySummary};
