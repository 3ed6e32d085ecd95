use std::sync::Arc;

use chrono::{FixedOffset, Offset, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Decision, FilterCriteria, RegistrationInput, VisitorId, VisitorRecord};
use super::notification::{NotificationError, NotificationSink, VisitorNotification};
use super::registry::{RegistryError, VisitorRegistry};
use super::views::{self, DeskDashboard, PendingRequestView, VisitorLogEntryView, VisitorStats};

/// Who decides, and which timezone the desk displays dates in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskSettings {
    pub decision_maker: String,
    pub display_offset: FixedOffset,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            decision_maker: "Mr. Adeyemi".to_string(),
            display_offset: Utc.fix(),
        }
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub record: VisitorRecord,
    pub notification: VisitorNotification,
}

/// Front desk facade composing the registry, filter criteria, and notification sink.
///
/// Commands take `&mut self`, so concurrent writers must go through a single owner
/// (or a lock around the desk). Queries derive fresh views from the current snapshot
/// on every call.
pub struct FrontDesk<N> {
    registry: VisitorRegistry,
    criteria: FilterCriteria,
    settings: DeskSettings,
    notifications: Arc<N>,
    latest_notification: Option<VisitorNotification>,
}

impl<N> FrontDesk<N>
where
    N: NotificationSink + 'static,
{
    pub fn new(registry: VisitorRegistry, settings: DeskSettings, notifications: Arc<N>) -> Self {
        Self {
            registry,
            criteria: FilterCriteria::default(),
            settings,
            notifications,
            latest_notification: None,
        }
    }

    pub fn settings(&self) -> &DeskSettings {
        &self.settings
    }

    /// Register a visitor, compose the alert for the decision-maker, and hand it to the sink.
    ///
    /// A sink failure is reported as [`DeskError::Notification`]; the visitor stays registered.
    pub fn register(&mut self, input: RegistrationInput) -> Result<Registration, DeskError> {
        let record = self.registry.register(input).map_err(|err| {
            warn!(error = %err, "visitor registration rejected");
            err
        })?;

        let notification = VisitorNotification::for_record(&record);
        self.latest_notification = Some(notification.clone());
        info!(
            visitor_id = %record.id,
            staff = record.is_staff,
            total = self.registry.len(),
            "visitor registered"
        );

        if let Err(source) = self.notifications.publish(notification.clone()) {
            warn!(visitor_id = %record.id, error = %source, "notification delivery failed");
            return Err(DeskError::Notification {
                id: record.id,
                source,
            });
        }

        Ok(Registration {
            record,
            notification,
        })
    }

    /// Record the configured decision-maker's outcome for a visitor.
    pub fn decide(
        &mut self,
        id: &VisitorId,
        decision: Decision,
    ) -> Result<VisitorRecord, DeskError> {
        let decided_by = self.settings.decision_maker.clone();
        let record = self
            .registry
            .decide(id, decision, &decided_by)
            .map_err(|err| {
                warn!(visitor_id = %id, error = %err, "visitor decision rejected");
                err
            })?;

        info!(
            visitor_id = %record.id,
            status = record.status.label(),
            decided_by = %record.decided_by,
            "visitor decided"
        );
        Ok(record)
    }

    /// Replace the log filter wholesale.
    pub fn set_filter_criteria(&mut self, criteria: FilterCriteria) {
        debug!(?criteria, "visitor log filter updated");
        self.criteria = criteria;
    }

    pub fn filter_criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn records(&self) -> &[VisitorRecord] {
        self.registry.records()
    }

    pub fn get(&self, id: &VisitorId) -> Option<&VisitorRecord> {
        self.registry.get(id)
    }

    pub fn stats(&self) -> VisitorStats {
        views::stats(self.registry.records())
    }

    pub fn pending_queue(&self) -> Vec<&VisitorRecord> {
        views::pending_queue(self.registry.records())
    }

    pub fn filtered_log(&self) -> Vec<&VisitorRecord> {
        views::filtered_log(
            self.registry.records(),
            &self.criteria,
            self.settings.display_offset,
        )
    }

    pub fn latest_notification(&self) -> Option<&VisitorNotification> {
        self.latest_notification.as_ref()
    }

    pub fn log_entries(&self) -> Vec<VisitorLogEntryView> {
        self.filtered_log()
            .into_iter()
            .map(VisitorLogEntryView::from_record)
            .collect()
    }

    pub fn dashboard(&self) -> DeskDashboard {
        DeskDashboard {
            decision_maker: self.settings.decision_maker.clone(),
            stats: self.stats(),
            pending: self
                .pending_queue()
                .into_iter()
                .map(PendingRequestView::from_record)
                .collect(),
            criteria: self.criteria.clone(),
            log: self.log_entries(),
            latest_notification: self.latest_notification.clone(),
        }
    }
}

/// Error raised by front desk commands.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("visitor {id} registered but the notification was not delivered: {source}")]
    Notification {
        id: VisitorId,
        source: NotificationError,
    },
}
