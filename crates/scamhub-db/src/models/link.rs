//! Report link database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for report_links table
#[derive(Debug, Clone, FromRow)]
pub struct LinkModel {
    pub id: i64,
    pub report_id: i64,
    pub url: String,
    pub domain: String,
    pub safety: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
}
