use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use crate::workflows::visitors::clock::ManualClock;
use crate::workflows::visitors::desk::{DeskSettings, FrontDesk};
use crate::workflows::visitors::domain::RegistrationInput;
use crate::workflows::visitors::notification::{
    MemoryNotificationSink, NotificationError, NotificationSink, VisitorNotification,
};
use crate::workflows::visitors::registry::{DecisionPolicy, IdSequence, VisitorRegistry};

pub(super) fn opening_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 4, 8, 30, 0)
        .single()
        .expect("valid opening time")
}

pub(super) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(opening_time()))
}

pub(super) fn registry(clock: &Arc<ManualClock>) -> VisitorRegistry {
    VisitorRegistry::new(clock.clone())
}

pub(super) fn registry_with_policy(
    clock: &Arc<ManualClock>,
    policy: DecisionPolicy,
) -> VisitorRegistry {
    VisitorRegistry::with_settings(clock.clone(), IdSequence::default(), policy)
}

pub(super) fn jane_roe() -> RegistrationInput {
    RegistrationInput::new("Jane Roe")
        .company("Acme")
        .phone("555-1")
        .purpose("deliver parts")
}

pub(super) fn build_desk() -> (
    FrontDesk<MemoryNotificationSink>,
    Arc<ManualClock>,
    Arc<MemoryNotificationSink>,
) {
    let clock = clock();
    let sink = Arc::new(MemoryNotificationSink::default());
    let desk = FrontDesk::new(registry(&clock), DeskSettings::default(), sink.clone());
    (desk, clock, sink)
}

pub(super) struct FailingSink;

impl NotificationSink for FailingSink {
    fn publish(&self, _notification: VisitorNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Channel("smtp offline".to_string()))
    }
}
