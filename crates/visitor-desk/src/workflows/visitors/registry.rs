use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::domain::{
    Decision, RegistrationInput, ValidationError, VisitorId, VisitorRecord, VisitorStatus,
};

/// Whether `decide` may overwrite a decision that was already made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecisionPolicy {
    /// Only pending records can be decided.
    #[default]
    PendingOnly,
    /// Any record can be decided again; the latest decision wins.
    AllowRedecide,
}

/// Id generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdSequence {
    pub prefix: String,
    pub start: u64,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self {
            prefix: "VMS".to_string(),
            start: 1001,
        }
    }
}

/// Error raised by registry commands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("visitor {0} not found")]
    NotFound(VisitorId),
    #[error("visitor {id} was already {}", .status.label())]
    AlreadyDecided { id: VisitorId, status: VisitorStatus },
    #[error("no visitor ids left after {prefix}-{}", u64::MAX)]
    IdSpaceExhausted { prefix: String },
}

/// Owner of the canonical, newest-first collection of visitor records.
pub struct VisitorRegistry {
    records: Vec<VisitorRecord>,
    clock: Arc<dyn Clock>,
    ids: IdSequence,
    /// `None` once `u64::MAX` has been issued.
    next_sequence: Option<u64>,
    policy: DecisionPolicy,
}

impl Default for VisitorRegistry {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for VisitorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitorRegistry")
            .field("records", &self.records.len())
            .field("ids", &self.ids)
            .field("next_sequence", &self.next_sequence)
            .field("policy", &self.policy)
            .finish()
    }
}

impl VisitorRegistry {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_settings(clock, IdSequence::default(), DecisionPolicy::default())
    }

    pub fn with_settings(clock: Arc<dyn Clock>, ids: IdSequence, policy: DecisionPolicy) -> Self {
        let next_sequence = Some(ids.start);
        Self {
            records: Vec::new(),
            clock,
            ids,
            next_sequence,
            policy,
        }
    }

    /// Swap the time source, returning the previous one.
    pub fn replace_clock(&mut self, clock: Arc<dyn Clock>) -> Arc<dyn Clock> {
        std::mem::replace(&mut self.clock, clock)
    }

    pub fn policy(&self) -> DecisionPolicy {
        self.policy
    }

    /// Records in canonical order, most recently registered first.
    pub fn records(&self) -> &[VisitorRecord] {
        &self.records
    }

    pub fn get(&self, id: &VisitorId) -> Option<&VisitorRecord> {
        self.records.iter().find(|record| &record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Register a new visitor and place it at the head of the collection.
    pub fn register(&mut self, input: RegistrationInput) -> Result<VisitorRecord, RegistryError> {
        let record = self.build_record(input)?;
        self.records.insert(0, record.clone());
        Ok(record)
    }

    /// Register a visitor behind every existing record, as if they arrived earliest.
    pub(crate) fn register_oldest(
        &mut self,
        input: RegistrationInput,
    ) -> Result<VisitorRecord, RegistryError> {
        let record = self.build_record(input)?;
        self.records.push(record.clone());
        Ok(record)
    }

    fn build_record(&mut self, input: RegistrationInput) -> Result<VisitorRecord, RegistryError> {
        let full_name = input.full_name.trim();
        if full_name.is_empty() {
            return Err(ValidationError::MissingFullName.into());
        }

        Ok(VisitorRecord {
            id: self.next_id()?,
            full_name: full_name.to_string(),
            is_staff: input.is_staff,
            company: input.company.trim().to_string(),
            phone: input.phone.trim().to_string(),
            purpose: input.purpose.trim().to_string(),
            time_in: self.clock.now(),
            status: VisitorStatus::Pending,
            time_decided: None,
            decided_by: String::new(),
        })
    }

    /// Apply a decision to an existing record, returning the updated copy.
    pub fn decide(
        &mut self,
        id: &VisitorId,
        decision: Decision,
        decided_by: &str,
    ) -> Result<VisitorRecord, RegistryError> {
        let policy = self.policy;
        let now = self.clock.now();
        let record = self
            .records
            .iter_mut()
            .find(|record| &record.id == id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;

        if policy == DecisionPolicy::PendingOnly && !record.is_pending() {
            return Err(RegistryError::AlreadyDecided {
                id: id.clone(),
                status: record.status,
            });
        }

        record.status = decision.status();
        record.time_decided = Some(now);
        record.decided_by = decided_by.to_string();
        Ok(record.clone())
    }

    fn next_id(&mut self) -> Result<VisitorId, RegistryError> {
        let sequence = self
            .next_sequence
            .ok_or_else(|| RegistryError::IdSpaceExhausted {
                prefix: self.ids.prefix.clone(),
            })?;
        self.next_sequence = sequence.checked_add(1);
        Ok(VisitorId(format!("{}-{}", self.ids.prefix, sequence)))
    }
}
