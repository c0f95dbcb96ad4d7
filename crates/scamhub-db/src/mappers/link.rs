//! Link entity <-> model mapper

use scamhub_core::entities::Link;
use scamhub_core::value_objects::{LinkId, ReportId};

use crate::models::LinkModel;

/// Convert LinkModel to Link entity
impl From<LinkModel> for Link {
    fn from(model: LinkModel) -> Self {
        Link {
            id: LinkId::new(model.id),
            report_id: ReportId::new(model.report_id),
            url: model.url,
            domain: model.domain,
            safety: model.safety,
            created_at: model.created_at,
            deleted: model.deleted,
        }
    }
}
