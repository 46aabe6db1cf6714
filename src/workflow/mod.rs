pub mod daily_report;
pub mod types;

pub use daily_report::{run_daily_report, RunOptions};
pub use types::{Delivery, RunSummary};
