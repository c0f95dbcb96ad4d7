//! Report search filters and pagination

mod filter;

pub use filter::{
    escape_like, total_pages, AdminPage, AdminSearch, PublicSearch, ReportCounters, ReportFilter,
    StatusFilter, ADMIN_PAGE_SIZE, PUBLIC_SEARCH_LIMIT,
};
