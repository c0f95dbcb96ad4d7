//! In-process store for development and tests

mod store;

pub use store::MemoryReportStore;
