//! Stats module - join and per-region aggregation

mod aggregator;

pub use aggregator::{merge_and_aggregate, round_one_decimal, MergedSubRegion, RegionSummary};
