//! Wire models for the student API
//!
//! Mirrors the JSON shapes the backend sends and accepts. The backend signals
//! "nothing found" and "nothing to analyze" with a bare `{"message": ...}`
//! object instead of an error status, so those responses decode into explicit
//! outcome enums here.

use crate::error::FormError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Letter grade, restricted to the fixed A-F set
///
/// The backend stores grades as free text, so decoding accepts lowercase
/// letters and maps anything else to `Unknown` instead of failing the whole
/// response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Grade {
    /// Top grade, and the form default
    #[default]
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
    #[serde(alias = "d")]
    D,
    #[serde(alias = "e")]
    E,
    #[serde(alias = "f")]
    F,
    /// A stored grade outside A-F; never offered by the forms
    #[serde(other)]
    Unknown,
}

impl Grade {
    /// Every grade in display order
    pub const ALL: [Grade; 6] = [Grade::A, Grade::B, Grade::C, Grade::D, Grade::E, Grade::F];

    /// The single-letter wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
            Grade::Unknown => "?",
        }
    }

    /// Parse user input: one letter A-F, case-insensitive
    pub fn parse(raw: &str) -> Result<Grade, FormError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(FormError::Missing("Grade"));
        }
        Grade::ALL
            .into_iter()
            .find(|grade| grade.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| FormError::InvalidGrade(trimmed.to_string()))
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single student record as stored by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Caller-assigned identifier; the backend rejects duplicates
    pub id: i64,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: i64,
    /// Letter grade
    pub grade: Grade,
    /// Marks out of 100
    pub marks: i64,
}

/// Body of `GET /students`
#[derive(Debug, Deserialize)]
pub(crate) struct StudentList {
    #[serde(default)]
    pub students: Vec<Student>,
}

/// How `GET /students/search` should interpret its `value` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchCriterion {
    /// Match against the student's name
    #[default]
    Name,
    /// Match against the student's id
    Id,
}

impl SearchCriterion {
    /// Value of the `by` query parameter
    pub fn as_query(self) -> &'static str {
        match self {
            SearchCriterion::Name => "name",
            SearchCriterion::Id => "id",
        }
    }

    /// Label for the criterion picker
    pub fn label(self) -> &'static str {
        match self {
            SearchCriterion::Name => "Search by Name",
            SearchCriterion::Id => "Search by ID",
        }
    }
}

/// Result of a search request
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The backend returned a matching record
    Found(Student),
    /// The backend reported no match; this is informational, not a failure
    NotFound(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SearchResponse {
    Missing { message: String },
    Found(Student),
}

impl From<SearchResponse> for SearchOutcome {
    fn from(response: SearchResponse) -> Self {
        match response {
            SearchResponse::Missing { message } => SearchOutcome::NotFound(message),
            SearchResponse::Found(student) => SearchOutcome::Found(student),
        }
    }
}

/// Highest-scoring student in an analytics summary
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TopPerformer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub marks: i64,
}

/// Aggregate statistics computed by the backend
///
/// Every field is optional on the wire. The accessors below apply the display
/// fallbacks (`0`, `N/A`) so a partial payload never renders as garbage.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AnalyticsSummary {
    pub top_performer: Option<TopPerformer>,
    pub average_marks: Option<f64>,
    pub highest_marks: Option<i64>,
    pub lowest_marks: Option<i64>,
    pub below_average_count: Option<i64>,
}

impl AnalyticsSummary {
    /// Top performer's name, or `N/A`
    pub fn top_performer_name(&self) -> &str {
        self.top_performer
            .as_ref()
            .map(|top| top.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("N/A")
    }

    /// Top performer's marks, or 0
    pub fn top_performer_marks(&self) -> i64 {
        self.top_performer.as_ref().map_or(0, |top| top.marks)
    }

    /// Average formatted to one decimal place; missing or non-finite shows `0`
    pub fn average_label(&self) -> String {
        match self.average_marks {
            Some(avg) if avg.is_finite() => format!("{avg:.1}"),
            _ => "0".to_string(),
        }
    }

    pub fn highest(&self) -> i64 {
        self.highest_marks.unwrap_or(0)
    }

    pub fn lowest(&self) -> i64 {
        self.lowest_marks.unwrap_or(0)
    }

    pub fn below_average(&self) -> i64 {
        self.below_average_count.unwrap_or(0)
    }

    /// `lowest - highest`, as shown on the score range card
    pub fn score_range_label(&self) -> String {
        format!("{} - {}", self.lowest(), self.highest())
    }
}

/// Result of an analytics request
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticsOutcome {
    /// The backend has no records to analyze
    NoData(String),
    /// Statistics over the current records
    Summary(AnalyticsSummary),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum AnalyticsResponse {
    NoData { message: String },
    Summary(AnalyticsSummary),
}

impl From<AnalyticsResponse> for AnalyticsOutcome {
    fn from(response: AnalyticsResponse) -> Self {
        match response {
            AnalyticsResponse::NoData { message } => AnalyticsOutcome::NoData(message),
            AnalyticsResponse::Summary(summary) => AnalyticsOutcome::Summary(summary),
        }
    }
}

/// A single editable attribute of a student record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudentField {
    Id,
    Name,
    Age,
    Grade,
    Marks,
}

impl StudentField {
    /// Every field, in form order
    pub const ALL: [StudentField; 5] = [
        StudentField::Id,
        StudentField::Name,
        StudentField::Age,
        StudentField::Grade,
        StudentField::Marks,
    ];

    /// JSON key used in update payloads
    pub fn as_str(self) -> &'static str {
        match self {
            StudentField::Id => "id",
            StudentField::Name => "name",
            StudentField::Age => "age",
            StudentField::Grade => "grade",
            StudentField::Marks => "marks",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            StudentField::Id => "ID",
            StudentField::Name => "Name",
            StudentField::Age => "Age",
            StudentField::Grade => "Grade",
            StudentField::Marks => "Marks",
        }
    }

    /// Whether the backend expects this field as an integer
    pub fn is_integer(self) -> bool {
        matches!(self, StudentField::Id | StudentField::Age | StudentField::Marks)
    }

    /// Convert raw user input into the typed value sent to the backend
    ///
    /// `id`, `age` and `marks` must parse as integers. `grade` is sent as text
    /// but must be a letter A-F, normalised to uppercase. `name` passes through
    /// untouched.
    pub fn coerce(self, raw: &str) -> Result<FieldValue, FormError> {
        match self {
            StudentField::Id | StudentField::Age | StudentField::Marks => {
                parse_integer(self.label(), raw).map(FieldValue::Integer)
            }
            StudentField::Grade => {
                Grade::parse(raw).map(|grade| FieldValue::Text(grade.as_str().to_string()))
            }
            StudentField::Name => Ok(FieldValue::Text(raw.to_string())),
        }
    }
}

pub(crate) fn parse_integer(field: &'static str, raw: &str) -> Result<i64, FormError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing(field));
    }
    trimmed.parse().map_err(|_| FormError::NotAnInteger {
        field,
        value: trimmed.to_string(),
    })
}

/// A typed field value in an update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

/// Partial update body: a single `{field: value}` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentPatch {
    pub field: StudentField,
    pub value: FieldValue,
}

impl Serialize for StudentPatch {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.field.as_str(), &self.value)?;
        map.end()
    }
}
