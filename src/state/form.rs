// Add-student form buffers
// Text inputs as typed by the user, validated into a Student on submit

use crate::api::models::{parse_integer, Grade, Student};
use crate::error::FormError;

/// Allowed age range, inclusive
pub const AGE_RANGE: (i64, i64) = (1, 150);
/// Allowed marks range, inclusive
pub const MARKS_RANGE: (i64, i64) = (0, 100);

/// Raw contents of the add-student form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StudentForm {
    pub id: String,
    pub name: String,
    pub age: String,
    pub grade: Grade,
    pub marks: String,
}

impl StudentForm {
    /// Reset every field to its default (blank, grade A)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every field and build the record to submit
    ///
    /// Errors are reported in form order, first failure wins.
    pub fn validate(&self) -> Result<Student, FormError> {
        let id = parse_integer("ID", &self.id)?;

        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::Missing("Name"));
        }
        if name.chars().all(|c| c.is_ascii_digit()) {
            return Err(FormError::NumericName);
        }

        let age = parse_in_range("Age", &self.age, AGE_RANGE)?;
        let marks = parse_in_range("Marks", &self.marks, MARKS_RANGE)?;

        Ok(Student {
            id,
            name: name.to_string(),
            age,
            grade: self.grade,
            marks,
        })
    }
}

fn parse_in_range(
    field: &'static str,
    raw: &str,
    (min, max): (i64, i64),
) -> Result<i64, FormError> {
    let value = parse_integer(field, raw)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(FormError::OutOfRange { field, min, max })
    }
}
