use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Sentinel stored in `due` when the submitted value is blank.
pub const DUE_SENTINEL: &str = "TBD";

/// Placeholder id shown in a blank form.
pub const DRAFT_ID_PLACEHOLDER: &str = "FM-23XX";

/// The four lifecycle states of a locate ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(alias = "open")]
    Open,
    #[serde(rename = "In Review", alias = "in-review", alias = "in_review", alias = "in review")]
    InReview,
    #[serde(
        rename = "Field Check",
        alias = "field-check",
        alias = "field_check",
        alias = "field check"
    )]
    FieldCheck,
    #[serde(alias = "resolved")]
    Resolved,
}

impl Status {
    /// Every status in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Open, Self::InReview, Self::FieldCheck, Self::Resolved];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InReview => "In Review",
            Self::FieldCheck => "Field Check",
            Self::Resolved => "Resolved",
        }
    }

    /// `Resolved` is the only terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }

    const fn stage(self) -> u8 {
        match self {
            Self::Open => 0,
            Self::InReview => 1,
            Self::FieldCheck => 2,
            Self::Resolved => 3,
        }
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Open => Tone::Amber,
            Self::InReview => Tone::Blue,
            Self::FieldCheck => Tone::Cyan,
            Self::Resolved => Tone::Green,
        }
    }

    /// Validate a move from self to `target` under the linear workflow.
    ///
    /// Allowed:
    /// - staying put (`open -> open`)
    /// - any forward move (`open -> field check`, `in review -> resolved`)
    /// - reopening (`* -> open`)
    ///
    /// Every other backward move is rejected. Only enforced when the store
    /// runs with strict transitions.
    pub fn can_transition_to(self, target: Self) -> Result<(), InvalidTransition> {
        if self == target || target == Self::Open || target.stage() > self.stage() {
            return Ok(());
        }

        Err(InvalidTransition {
            from: self,
            to: target,
            reason: "backward moves other than reopen are not allowed",
        })
    }
}

/// Ticket priority tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "standard")]
    Standard,
    #[serde(alias = "urgent")]
    Urgent,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Standard, Self::Urgent];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Standard => "Standard",
            Self::Urgent => "Urgent",
        }
    }

    #[must_use]
    pub const fn is_top_tier(self) -> bool {
        matches!(self, Self::Urgent)
    }

    #[must_use]
    pub const fn tone(self) -> Tone {
        match self {
            Self::Low => Tone::Gray,
            Self::Standard => Tone::Indigo,
            Self::Urgent => Tone::Red,
        }
    }
}

/// Visual classification for status and priority badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Amber,
    Blue,
    Cyan,
    Green,
    Gray,
    Indigo,
    Red,
}

impl Tone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Amber => "amber",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Gray => "gray",
            Self::Indigo => "indigo",
            Self::Red => "red",
        }
    }

    /// CSS class used by the web renderer, e.g. `tone-amber`.
    #[must_use]
    pub fn css_class(self) -> String {
        format!("tone-{}", self.as_str())
    }
}

/// Fields a draft can be rejected for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Id,
    Location,
    Description,
    Owner,
    RequestedBy,
    Utility,
}

impl Field {
    /// Always required.
    pub const CORE: [Self; 3] = [Self::Id, Self::Location, Self::Description];

    /// Required only when the store demands contact details.
    pub const CONTACTS: [Self; 3] = [Self::Owner, Self::RequestedBy, Self::Utility];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Location => "location",
            Self::Description => "description",
            Self::Owner => "owner",
            Self::RequestedBy => "requestedBy",
            Self::Utility => "utility",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored locate ticket. Only ever produced by [`Draft::normalize`] or by
/// deserializing a previously normalized collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub location: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub requested_by: String,
    pub due: String,
    #[serde(default, alias = "type")]
    pub utility: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Unvalidated field values destined to become or replace a [`Record`].
///
/// Missing fields deserialize as empty, so a body without an `id` is
/// rejected by validation rather than silently given a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Draft {
    pub id: String,
    pub location: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub owner: String,
    pub requested_by: String,
    pub due: String,
    #[serde(alias = "type")]
    pub utility: String,
    pub notes: Option<String>,
}

impl From<&Record> for Draft {
    fn from(record: &Record) -> Self {
        Self {
            id: record.id.clone(),
            location: record.location.clone(),
            description: record.description.clone(),
            status: record.status,
            priority: record.priority,
            owner: record.owner.clone(),
            requested_by: record.requested_by.clone(),
            due: record.due.clone(),
            utility: record.utility.clone(),
            notes: record.notes.clone(),
        }
    }
}

impl Draft {
    /// The draft behind a freshly reset form.
    #[must_use]
    pub fn blank_form() -> Self {
        Self {
            id: DRAFT_ID_PLACEHOLDER.to_string(),
            ..Self::default()
        }
    }

    /// Trim every field, apply defaults, and check the `required` fields.
    ///
    /// Blank `due` becomes [`DUE_SENTINEL`], blank notes become `None`.
    /// The error lists every required field that came up empty.
    pub fn normalize(&self, required: &[Field]) -> Result<Record, ValidationError> {
        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        let due = match self.due.trim() {
            "" => DUE_SENTINEL.to_string(),
            due => due.to_string(),
        };

        let record = Record {
            id: self.id.trim().to_string(),
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            priority: self.priority,
            owner: self.owner.trim().to_string(),
            requested_by: self.requested_by.trim().to_string(),
            due,
            utility: self.utility.trim().to_string(),
            notes,
        };

        let missing: Vec<Field> = required
            .iter()
            .copied()
            .filter(|field| record.field(*field).is_empty())
            .collect();

        if missing.is_empty() {
            Ok(record)
        } else {
            Err(ValidationError { missing })
        }
    }
}

impl Record {
    /// Text value of a validatable field.
    #[must_use]
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Location => &self.location,
            Field::Description => &self.description,
            Field::Owner => &self.owner,
            Field::RequestedBy => &self.requested_by,
            Field::Utility => &self.utility,
        }
    }
}

/// Error returned when a status move is rejected by the strict workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: Status,
    pub to: Status,
    pub reason: &'static str,
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Lowercase with separators dropped, so "In Review", "in-review" and
// "in_review" all compare equal.
fn normalize(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect::<String>()
        .to_ascii_lowercase()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "open" => Ok(Self::Open),
            "inreview" => Ok(Self::InReview),
            "fieldcheck" => Ok(Self::FieldCheck),
            "resolved" => Ok(Self::Resolved),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Self::Low),
            "standard" => Ok(Self::Standard),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParseEnumError {
                expected: "priority",
                got: s.to_string(),
            }),
        }
    }
}
