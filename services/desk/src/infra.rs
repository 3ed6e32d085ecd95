use chrono::{DateTime, FixedOffset, Utc};
use std::sync::{Arc, Mutex};
use tracing::info;
use visitor_desk::config::DeskConfig;
use visitor_desk::error::AppError;
use visitor_desk::workflows::visitors::{
    seed_demo_visitors, DeskError, FrontDesk, NotificationError, NotificationSink, SystemClock,
    VisitorNotification,
};

/// Delivery channel for the terminal desk: logs each alert and keeps a copy for display.
#[derive(Default, Clone)]
pub(crate) struct ConsoleNotificationSink {
    events: Arc<Mutex<Vec<VisitorNotification>>>,
}

impl NotificationSink for ConsoleNotificationSink {
    fn publish(&self, notification: VisitorNotification) -> Result<(), NotificationError> {
        info!(
            visitor_id = %notification.visitor_id,
            alert = %notification.message,
            "notification dispatched to decision-maker"
        );
        let mut guard = self
            .events
            .lock()
            .map_err(|_| NotificationError::Channel("console sink poisoned".to_string()))?;
        guard.push(notification);
        Ok(())
    }
}

impl ConsoleNotificationSink {
    pub(crate) fn events(&self) -> Vec<VisitorNotification> {
        match self.events.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

pub(crate) type ConsoleDesk = FrontDesk<ConsoleNotificationSink>;

/// Build a desk on the system clock, optionally pre-populated with the reference visitors.
pub(crate) fn build_desk(
    config: &DeskConfig,
    seed: bool,
) -> Result<(ConsoleDesk, Arc<ConsoleNotificationSink>), AppError> {
    let mut registry = config.registry(Arc::new(SystemClock));
    if seed {
        seed_demo_visitors(&mut registry, Utc::now(), &config.decision_maker)
            .map_err(DeskError::from)?;
    }

    let sink = Arc::new(ConsoleNotificationSink::default());
    let desk = FrontDesk::new(registry, config.settings()?, sink.clone());
    Ok((desk, sink))
}

pub(crate) fn format_time(instant: DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format("%-d %b %Y, %H:%M")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use visitor_desk::workflows::visitors::VisitorId;

    #[test]
    fn format_time_renders_in_display_offset() {
        let instant = Utc
            .with_ymd_and_hms(2025, 3, 4, 23, 30, 0)
            .single()
            .expect("valid instant");
        let lagos = FixedOffset::east_opt(3600).expect("utc+1");
        assert_eq!(format_time(instant, lagos), "5 Mar 2025, 00:30");
    }

    #[test]
    fn console_sink_keeps_published_notifications() {
        let sink = ConsoleNotificationSink::default();
        let notification = VisitorNotification {
            visitor_id: VisitorId("VMS-1001".to_string()),
            message: "Sir, John Doe, a visitor, wishes.".to_string(),
            timestamp: Utc::now(),
        };
        sink.publish(notification.clone()).expect("publish");
        assert_eq!(sink.events(), vec![notification]);
    }
}
