use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for registered visitors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitorId(pub String);

impl fmt::Display for VisitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Approval state tracked for every visitor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitorStatus {
    Pending,
    Approved,
    Rejected,
}

impl VisitorStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VisitorStatus::Pending => "Pending",
            VisitorStatus::Approved => "Approved",
            VisitorStatus::Rejected => "Rejected",
        }
    }

    pub const fn ordered() -> [VisitorStatus; 3] {
        [
            VisitorStatus::Pending,
            VisitorStatus::Approved,
            VisitorStatus::Rejected,
        ]
    }
}

/// Outcome a decision-maker may apply to a visitor request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    pub const fn status(self) -> VisitorStatus {
        match self {
            Decision::Approved => VisitorStatus::Approved,
            Decision::Rejected => VisitorStatus::Rejected,
        }
    }
}

impl From<Decision> for VisitorStatus {
    fn from(value: Decision) -> Self {
        value.status()
    }
}

/// One visitor's registration entry and its current approval state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitorRecord {
    pub id: VisitorId,
    pub full_name: String,
    pub is_staff: bool,
    pub company: String,
    pub phone: String,
    pub purpose: String,
    pub time_in: DateTime<Utc>,
    pub status: VisitorStatus,
    pub time_decided: Option<DateTime<Utc>>,
    pub decided_by: String,
}

impl VisitorRecord {
    pub fn is_pending(&self) -> bool {
        self.status == VisitorStatus::Pending
    }

    pub const fn identity_label(&self) -> &'static str {
        if self.is_staff {
            "Staff"
        } else {
            "Visitor"
        }
    }
}

/// Field values captured by the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationInput {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub purpose: String,
}

impl RegistrationInput {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Self::default()
        }
    }

    pub fn staff(mut self, is_staff: bool) -> Self {
        self.is_staff = is_staff;
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }
}

/// Status selector used by the visitor log filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
}

impl StatusFilter {
    pub fn matches(self, status: VisitorStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == VisitorStatus::Pending,
            StatusFilter::Approved => status == VisitorStatus::Approved,
            StatusFilter::Rejected => status == VisitorStatus::Rejected,
        }
    }
}

impl From<VisitorStatus> for StatusFilter {
    fn from(value: VisitorStatus) -> Self {
        match value {
            VisitorStatus::Pending => StatusFilter::Pending,
            VisitorStatus::Approved => StatusFilter::Approved,
            VisitorStatus::Rejected => StatusFilter::Rejected,
        }
    }
}

/// Query applied to the visitor log. Holds no visitor data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub status_filter: StatusFilter,
    #[serde(default)]
    pub date_filter: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn status(mut self, filter: StatusFilter) -> Self {
        self.status_filter = filter;
        self
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date_filter = Some(date);
        self
    }
}

/// Validation failures raised before a record is created.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("visitor full name is required")]
    MissingFullName,
}
