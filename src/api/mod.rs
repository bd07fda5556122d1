//! Student API
//!
//! Wire models and the HTTP client for the remote student backend.

pub mod client;
pub mod models;

pub use client::{HttpStudentApi, StudentApi};
pub use models::{
    AnalyticsOutcome, AnalyticsSummary, FieldValue, Grade, SearchCriterion, SearchOutcome,
    Student, StudentField, StudentPatch, TopPerformer,
};
