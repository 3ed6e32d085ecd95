use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{VisitorId, VisitorRecord};

/// Human-readable alert announcing a visitor to the decision-maker.
pub fn compose(record: &VisitorRecord) -> String {
    let identity = if record.is_staff {
        "staff member"
    } else {
        "visitor"
    };

    let mut message = format!("Sir, {}, a {identity}", record.full_name);
    if !record.company.is_empty() {
        message.push_str(" from ");
        message.push_str(&record.company);
    }
    message.push_str(", wishes");
    if !record.purpose.is_empty() {
        message.push_str(" to ");
        message.push_str(&record.purpose);
    }
    message.push('.');
    message
}

/// Notification event emitted once per successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorNotification {
    pub visitor_id: VisitorId,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl VisitorNotification {
    pub fn for_record(record: &VisitorRecord) -> Self {
        Self {
            visitor_id: record.id.clone(),
            message: compose(record),
            timestamp: record.time_in,
        }
    }
}

/// Outbound delivery hook (e-mail, popup, chat adapters).
pub trait NotificationSink: Send + Sync {
    fn publish(&self, notification: VisitorNotification) -> Result<(), NotificationError>;
}

/// Notification dispatch error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotificationError {
    #[error("notification channel unavailable: {0}")]
    Channel(String),
}

/// Sink that keeps every published notification in memory.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotificationSink {
    events: Arc<Mutex<Vec<VisitorNotification>>>,
}

impl MemoryNotificationSink {
    pub fn events(&self) -> Vec<VisitorNotification> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl NotificationSink for MemoryNotificationSink {
    fn publish(&self, notification: VisitorNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .map_err(|_| NotificationError::Channel("memory sink poisoned".to_string()))?
            .push(notification);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::visitors::domain::VisitorStatus;
    use chrono::TimeZone;

    fn record(is_staff: bool, company: &str, purpose: &str) -> VisitorRecord {
        VisitorRecord {
            id: VisitorId("VMS-1001".to_string()),
            full_name: "Jane Roe".to_string(),
            is_staff,
            company: company.to_string(),
            phone: "555-1".to_string(),
            purpose: purpose.to_string(),
            time_in: Utc
                .with_ymd_and_hms(2025, 3, 4, 9, 30, 0)
                .single()
                .expect("valid instant"),
            status: VisitorStatus::Pending,
            time_decided: None,
            decided_by: String::new(),
        }
    }

    #[test]
    fn compose_includes_company_and_purpose() {
        assert_eq!(
            compose(&record(false, "Acme", "deliver parts")),
            "Sir, Jane Roe, a visitor from Acme, wishes to deliver parts."
        );
    }

    #[test]
    fn compose_omits_empty_optional_phrases() {
        assert_eq!(
            compose(&record(true, "", "")),
            "Sir, Jane Roe, a staff member, wishes."
        );
        assert_eq!(
            compose(&record(true, "", "collect a badge")),
            "Sir, Jane Roe, a staff member, wishes to collect a badge."
        );
        assert_eq!(
            compose(&record(false, "Acme", "")),
            "Sir, Jane Roe, a visitor from Acme, wishes."
        );
    }

    #[test]
    fn notification_carries_registration_timestamp() {
        let record = record(false, "Acme", "deliver parts");
        let notification = VisitorNotification::for_record(&record);
        assert_eq!(notification.timestamp, record.time_in);
        assert_eq!(notification.visitor_id, record.id);
    }

    #[test]
    fn memory_sink_collects_published_notifications() {
        let sink = MemoryNotificationSink::default();
        let notification = VisitorNotification::for_record(&record(false, "", ""));
        sink.publish(notification.clone()).expect("publish succeeds");
        assert_eq!(sink.events(), vec![notification]);
    }
}
