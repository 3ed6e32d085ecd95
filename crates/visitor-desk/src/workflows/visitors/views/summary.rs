use chrono::{DateTime, Utc};
use serde::Serialize;

use super::super::domain::{FilterCriteria, VisitorId, VisitorRecord, VisitorStatus};
use super::super::notification::VisitorNotification;
use super::VisitorStats;

const NOT_AVAILABLE: &str = "N/A";
const AWAITING_DECISION: &str = "Awaiting decision";

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

/// One row of the visitor log or receptionist dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisitorLogEntryView {
    pub id: VisitorId,
    pub full_name: String,
    pub identity_label: &'static str,
    pub company: String,
    pub phone: String,
    pub status: VisitorStatus,
    pub status_label: &'static str,
    pub time_in: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_decided: Option<DateTime<Utc>>,
    pub decision_summary: String,
}

impl VisitorLogEntryView {
    pub fn from_record(record: &VisitorRecord) -> Self {
        let decision_summary = if record.time_decided.is_some() {
            record.decided_by.clone()
        } else {
            AWAITING_DECISION.to_string()
        };

        Self {
            id: record.id.clone(),
            full_name: record.full_name.clone(),
            identity_label: record.identity_label(),
            company: or_not_available(&record.company),
            phone: or_not_available(&record.phone),
            status: record.status,
            status_label: record.status.label(),
            time_in: record.time_in,
            time_decided: record.time_decided,
            decision_summary,
        }
    }
}

/// Entry shown in the decision-maker's approval console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingRequestView {
    pub id: VisitorId,
    pub full_name: String,
    pub identity_label: &'static str,
    pub company: String,
    pub phone: String,
    pub purpose: String,
    pub time_in: DateTime<Utc>,
}

impl PendingRequestView {
    pub fn from_record(record: &VisitorRecord) -> Self {
        let purpose = if record.purpose.is_empty() {
            "Not provided".to_string()
        } else {
            record.purpose.clone()
        };

        Self {
            id: record.id.clone(),
            full_name: record.full_name.clone(),
            identity_label: record.identity_label(),
            company: or_not_available(&record.company),
            phone: or_not_available(&record.phone),
            purpose,
            time_in: record.time_in,
        }
    }
}

/// Everything the presentation layer renders, derived from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DeskDashboard {
    pub decision_maker: String,
    pub stats: VisitorStats,
    pub pending: Vec<PendingRequestView>,
    pub criteria: FilterCriteria,
    pub log: Vec<VisitorLogEntryView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_notification: Option<VisitorNotification>,
}
