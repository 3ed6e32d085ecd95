//! Visitor registration, approval decisions, and the views derived from them.
//!
//! [`VisitorRegistry`] owns the only mutable copy of the visitor collection. Everything in
//! [`views`] is a pure function of a snapshot, and [`FrontDesk`] ties both to the
//! decision-maker and the notification sink.

pub mod clock;
pub mod desk;
pub mod domain;
pub mod notification;
pub mod registry;
mod seed;
pub mod views;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use desk::{DeskError, DeskSettings, FrontDesk, Registration};
pub use domain::{
    Decision, FilterCriteria, RegistrationInput, StatusFilter, ValidationError, VisitorId,
    VisitorRecord, VisitorStatus,
};
pub use notification::{
    compose, MemoryNotificationSink, NotificationError, NotificationSink, VisitorNotification,
};
pub use registry::{DecisionPolicy, IdSequence, RegistryError, VisitorRegistry};
pub use seed::seed_demo_visitors;
pub use views::{
    filtered_log, pending_queue, stats, DeskDashboard, PendingRequestView, VisitorLogEntryView,
    VisitorStats,
};
