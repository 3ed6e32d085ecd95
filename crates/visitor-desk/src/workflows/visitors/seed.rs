use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::clock::ManualClock;
use super::domain::{Decision, RegistrationInput, VisitorId};
use super::registry::{RegistryError, VisitorRegistry};

/// Populate a registry with the two reference visitors shown on a fresh desk.
///
/// John Doe arrives at `now` and is still pending. Mary Johnson arrived 24 minutes before
/// `now` and was approved 10 minutes before `now`. John takes the first id and Mary the
/// second, while the collection stays newest-first. Returns ids in collection order.
pub fn seed_demo_visitors(
    registry: &mut VisitorRegistry,
    now: DateTime<Utc>,
    decided_by: &str,
) -> Result<Vec<VisitorId>, RegistryError> {
    let clock = Arc::new(ManualClock::new(now));
    let previous = registry.replace_clock(clock.clone());

    let result = seed_with(registry, &clock, now, decided_by);

    registry.replace_clock(previous);
    result
}

fn seed_with(
    registry: &mut VisitorRegistry,
    clock: &ManualClock,
    now: DateTime<Utc>,
    decided_by: &str,
) -> Result<Vec<VisitorId>, RegistryError> {
    let john = registry.register(
        RegistrationInput::new("John Doe")
            .company("XYZ Ltd")
            .phone("555-0182")
            .purpose("discuss project timeline"),
    )?;

    clock.set(now - Duration::minutes(24));
    let mary = registry.register_oldest(
        RegistrationInput::new("Mary Johnson")
            .staff(true)
            .company("Able Health Clinic")
            .phone("555-0144")
            .purpose("meet HR about onboarding"),
    )?;

    clock.set(now - Duration::minutes(10));
    registry.decide(&mary.id, Decision::Approved, decided_by)?;

    Ok(vec![john.id, mary.id])
}
