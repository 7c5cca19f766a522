//! Paginated listing of a patient's completed triage sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    outcome::{RecommendedAction, TriageScore, UrgencyLevel},
    session::{SessionId, TriageSession},
};

/// Summary of one completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub session_id: SessionId,
    pub triage_score: TriageScore,
    pub urgency_level: UrgencyLevel,
    pub recommended_action: RecommendedAction,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_emergency: bool,
}

impl From<&TriageSession> for HistoryEntry {
    fn from(session: &TriageSession) -> Self {
        Self {
            session_id: session.session_id,
            triage_score: session.triage_score,
            urgency_level: session.urgency_level,
            recommended_action: session.recommended_action,
            completed_at: session.completed_at,
            is_emergency: session.is_emergency,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_triages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Compute pagination for a 1-based `page` of `limit` entries over
    /// `total` items, given how many entries the page actually holds.
    pub fn new(page: usize, limit: usize, total: usize, on_page: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let skip = (page - 1).saturating_mul(limit);
        Self {
            current_page: page,
            total_pages: total.div_ceil(limit),
            total_triages: total,
            has_next_page: skip.saturating_add(on_page) < total,
            has_prev_page: page > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    pub triages: Vec<HistoryEntry>,
    pub pagination: Pagination,
}
