//! Link extraction from report text

mod scanner;

pub use scanner::{derive_domain, find_candidates, plan_insertions, ExtractionSummary, LinkPlan};
