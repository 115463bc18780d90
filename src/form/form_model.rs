use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    connectivity::monitor::ConnectivityStatus, submission::pipeline::SubmissionState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetAudience {
    #[serde(rename = "B2C")]
    B2C,
    #[serde(rename = "B2B")]
    B2B,
    #[serde(rename = "teenagers")]
    Teenagers,
    #[serde(rename = "professionals")]
    Professionals,
    #[serde(rename = "families")]
    Families,
    #[default]
    #[serde(rename = "")]
    Unspecified,
}

impl TargetAudience {
    pub const ALL: [TargetAudience; 6] = [
        TargetAudience::Unspecified,
        TargetAudience::B2C,
        TargetAudience::B2B,
        TargetAudience::Teenagers,
        TargetAudience::Professionals,
        TargetAudience::Families,
    ];

    /// Wire value sent to the service.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetAudience::B2C => "B2C",
            TargetAudience::B2B => "B2B",
            TargetAudience::Teenagers => "teenagers",
            TargetAudience::Professionals => "professionals",
            TargetAudience::Families => "families",
            TargetAudience::Unspecified => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetAudience::B2C => "B2C Consumers",
            TargetAudience::B2B => "B2B Businesses",
            TargetAudience::Teenagers => "Teenagers",
            TargetAudience::Professionals => "Professionals",
            TargetAudience::Families => "Families",
            TargetAudience::Unspecified => "Select Audience",
        }
    }
}

impl FromStr for TargetAudience {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetAudience::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnknownAudience(s.to_string()))
    }
}

/// The user-editable, unsubmitted product description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    /// Numeric text, may be empty. Not range-checked.
    pub price: String,
    pub target_audience: TargetAudience,
}

impl FormDraft {
    /// Name, category and description are all present.
    pub fn has_required_fields(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn missing_fields(&self) -> Vec<FormField> {
        [
            (FormField::Name, &self.name),
            (FormField::Category, &self.category),
            (FormField::Description, &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Category,
    Description,
    Price,
    TargetAudience,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Category => "category",
            FormField::Description => "description",
            FormField::Price => "price",
            FormField::TargetAudience => "target_audience",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    UnknownAudience(String),
    /// The form is not accepting input (startup not finished, or results shown)
    NotEditable,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::UnknownAudience(value) => write!(
                f,
                "unknown target audience '{}' (expected one of: B2C, B2B, teenagers, professionals, families)",
                value
            ),
            FormError::NotEditable => write!(f, "the form is not editable right now"),
        }
    }
}

impl std::error::Error for FormError {}

/// Why the submit trigger is disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocker {
    MissingField(FormField),
    NotConnected(ConnectivityStatus),
    InFlight,
}

impl fmt::Display for SubmitBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitBlocker::MissingField(field) => write!(f, "{} is required", field),
            SubmitBlocker::NotConnected(status) => {
                write!(f, "service is not connected (status: {})", status)
            }
            SubmitBlocker::InFlight => write!(f, "an analysis is already running"),
        }
    }
}

/// Everything that currently prevents submission. Empty means eligible.
pub fn submit_blockers(
    draft: &FormDraft,
    connectivity: ConnectivityStatus,
    submission: &SubmissionState,
) -> Vec<SubmitBlocker> {
    let mut blockers: Vec<SubmitBlocker> = draft
        .missing_fields()
        .into_iter()
        .map(SubmitBlocker::MissingField)
        .collect();

    if connectivity != ConnectivityStatus::Connected {
        blockers.push(SubmitBlocker::NotConnected(connectivity));
    }
    if submission.is_in_flight() {
        blockers.push(SubmitBlocker::InFlight);
    }
    blockers
}

pub fn can_submit(
    draft: &FormDraft,
    connectivity: ConnectivityStatus,
    submission: &SubmissionState,
) -> bool {
    submit_blockers(draft, connectivity, submission).is_empty()
}

/// Holds the draft and applies field edits.
#[derive(Debug, Clone, Default)]
pub struct FormModel {
    draft: FormDraft,
}

impl FormModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: FormDraft) -> Self {
        Self { draft }
    }

    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), FormError> {
        match field {
            FormField::Name => self.draft.name = value.to_string(),
            FormField::Category => self.draft.category = value.to_string(),
            FormField::Description => self.draft.description = value.to_string(),
            FormField::Price => self.draft.price = value.to_string(),
            FormField::TargetAudience => self.draft.target_audience = value.parse()?,
        }
        Ok(())
    }
}
