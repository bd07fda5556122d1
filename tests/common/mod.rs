//! In-memory student backend for end-to-end tests
//!
//! Serves the same routes and JSON shapes as the real API: "not found" and
//! "no data" come back as `{"message": ...}` with status 200, while bad ids
//! get error statuses. Grades are stored as whatever text the client sent.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::{Arc, Mutex};

type HandlerError = (StatusCode, Json<Value>);

/// A stored student, with the grade kept as raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub grade: String,
    pub marks: i64,
}

/// Shared store behind the fake server
#[derive(Clone, Default)]
pub struct FakeBackend {
    students: Arc<Mutex<Vec<Record>>>,
}

impl FakeBackend {
    pub fn students(&self) -> Vec<Record> {
        self.students.lock().unwrap().clone()
    }

    /// Store a record directly, bypassing the routes
    pub fn insert(&self, id: i64, name: &str, grade: &str, marks: i64) {
        self.students.lock().unwrap().push(Record {
            id,
            name: name.to_string(),
            age: 20,
            grade: grade.to_string(),
            marks,
        });
    }
}

/// Start the fake backend on an ephemeral port, returning its base URL
pub async fn spawn_backend() -> (String, FakeBackend) {
    let backend = FakeBackend::default();
    let app = Router::new()
        .route("/students", get(list_students).post(create_student))
        .route("/students/search", get(search_students))
        .route("/students/analyze", get(analyze))
        .route("/students/:id", put(update_student).delete(delete_student))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), backend)
}

fn not_found() -> HandlerError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Student not found"})),
    )
}

async fn list_students(State(backend): State<FakeBackend>) -> Json<Value> {
    Json(json!({ "students": backend.students() }))
}

async fn create_student(
    State(backend): State<FakeBackend>,
    Json(student): Json<Record>,
) -> Result<Json<Value>, HandlerError> {
    let mut students = backend.students.lock().unwrap();
    if students.iter().any(|s| s.id == student.id) {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "ID already exists"})),
        ));
    }
    students.push(student.clone());
    Ok(Json(json!(student)))
}

async fn update_student(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
    Json(patch): Json<Map<String, Value>>,
) -> Result<Json<Value>, HandlerError> {
    let mut students = backend.students.lock().unwrap();
    let student = students
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or_else(not_found)?;

    let invalid = |key: &str| {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": format!("invalid value for {}", key)})),
        )
    };
    for (key, value) in patch {
        match key.as_str() {
            "id" => student.id = value.as_i64().ok_or_else(|| invalid("id"))?,
            "name" => {
                student.name = value.as_str().ok_or_else(|| invalid("name"))?.to_string()
            }
            "age" => student.age = value.as_i64().ok_or_else(|| invalid("age"))?,
            "marks" => student.marks = value.as_i64().ok_or_else(|| invalid("marks"))?,
            "grade" => {
                student.grade = value.as_str().ok_or_else(|| invalid("grade"))?.to_string()
            }
            _ => return Err(invalid(&key)),
        }
    }
    Ok(Json(json!(student)))
}

async fn delete_student(
    State(backend): State<FakeBackend>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, HandlerError> {
    let mut students = backend.students.lock().unwrap();
    let before = students.len();
    students.retain(|s| s.id != id);
    if students.len() == before {
        return Err(not_found());
    }
    Ok(Json(json!({"message": "Student deleted"})))
}

#[derive(Deserialize)]
struct SearchParams {
    by: String,
    value: String,
}

async fn search_students(
    State(backend): State<FakeBackend>,
    Query(params): Query<SearchParams>,
) -> Json<Value> {
    let students = backend.students();
    let needle = params.value.trim().to_lowercase();
    let found = students.into_iter().find(|s| match params.by.as_str() {
        "id" => s.id.to_string() == needle,
        _ => s.name.to_lowercase().contains(&needle),
    });

    match found {
        Some(student) => Json(json!(student)),
        None => Json(json!({"message": "Student not found"})),
    }
}

async fn analyze(State(backend): State<FakeBackend>) -> Json<Value> {
    let students = backend.students();
    if students.is_empty() {
        return Json(json!({"message": "No data to analyze"}));
    }

    let marks: Vec<i64> = students.iter().map(|s| s.marks).collect();
    let average = marks.iter().sum::<i64>() as f64 / marks.len() as f64;
    // first student with the highest marks wins ties
    let top = students
        .iter()
        .fold(&students[0], |best, s| if s.marks > best.marks { s } else { best });

    Json(json!({
        "top_performer": {"name": top.name, "marks": top.marks},
        "average_marks": average,
        "highest_marks": marks.iter().max(),
        "lowest_marks": marks.iter().min(),
        "below_average_count": marks.iter().filter(|m| (**m as f64) < average).count(),
    }))
}
