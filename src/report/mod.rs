//! Sampling, ranking and rendering of the snapshot report.
//!
//! Nothing here talks to the operating system directly; every read goes
//! through [`MetricsProvider`](crate::system::provider::MetricsProvider).

pub mod driver;
pub mod rank;
pub mod render;
pub mod sampler;

pub use driver::{Report, ReportOptions};
pub use rank::{RankMode, order_by_name, rank_by};
