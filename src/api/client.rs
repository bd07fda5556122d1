//! Student API client
//!
//! `StudentApi` is the seam between the console state and the network. The
//! console only ever talks to the trait, which keeps it testable without a
//! server; `HttpStudentApi` is the real reqwest-backed implementation.

use crate::api::models::{
    AnalyticsOutcome, AnalyticsResponse, SearchCriterion, SearchOutcome, SearchResponse,
    Student, StudentList, StudentPatch,
};
use crate::config::ApiConfig;
use crate::error::ApiError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Operations the backend exposes for student records
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// `GET /students`
    async fn list_students(&self) -> Result<Vec<Student>, ApiError>;

    /// `POST /students`
    async fn create_student(&self, student: &Student) -> Result<(), ApiError>;

    /// `PUT /students/{id}` with a single-field body
    async fn update_student(&self, id: i64, patch: &StudentPatch) -> Result<(), ApiError>;

    /// `DELETE /students/{id}`
    async fn delete_student(&self, id: i64) -> Result<(), ApiError>;

    /// `GET /students/search?by=..&value=..`
    async fn search_students(
        &self,
        criterion: SearchCriterion,
        value: &str,
    ) -> Result<SearchOutcome, ApiError>;

    /// `GET /students/analyze`
    async fn analyze(&self) -> Result<AnalyticsOutcome, ApiError>;
}

/// reqwest-backed implementation of [`StudentApi`]
#[derive(Debug, Clone)]
pub struct HttpStudentApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStudentApi {
    /// Create a client for the configured backend
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing connection pool
    pub fn with_client(client: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and turn non-2xx statuses into errors
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;

        let status = response.status();
        let url = response.url().to_string();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                url = %url,
                status_code = status.as_u16(),
                error_body = %body,
                "Student API returned error status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(url = %url, response_len = body.len(), "Student API call succeeded");
        Ok(body)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("{} - Response body: {}", e, body)))
    }
}

#[async_trait]
impl StudentApi for HttpStudentApi {
    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        let url = self.url("/students");
        tracing::debug!(url = %url, "Listing students");

        let list: StudentList = self.send_json(self.client.get(&url)).await?;
        Ok(list.students)
    }

    async fn create_student(&self, student: &Student) -> Result<(), ApiError> {
        let url = self.url("/students");
        tracing::debug!(url = %url, id = student.id, "Creating student");

        self.send(self.client.post(&url).json(student)).await?;
        Ok(())
    }

    async fn update_student(&self, id: i64, patch: &StudentPatch) -> Result<(), ApiError> {
        let url = self.url(&format!("/students/{}", id));
        tracing::debug!(url = %url, field = patch.field.as_str(), "Updating student");

        self.send(self.client.put(&url).json(patch)).await?;
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/students/{}", id));
        tracing::debug!(url = %url, "Deleting student");

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }

    async fn search_students(
        &self,
        criterion: SearchCriterion,
        value: &str,
    ) -> Result<SearchOutcome, ApiError> {
        let url = self.url("/students/search");
        tracing::debug!(
            url = %url,
            by = criterion.as_query(),
            value = %value,
            "Searching students"
        );

        let request = self
            .client
            .get(&url)
            .query(&[("by", criterion.as_query()), ("value", value)]);
        let response: SearchResponse = self.send_json(request).await?;
        Ok(response.into())
    }

    async fn analyze(&self) -> Result<AnalyticsOutcome, ApiError> {
        let url = self.url("/students/analyze");
        tracing::debug!(url = %url, "Fetching analytics");

        let response: AnalyticsResponse = self.send_json(self.client.get(&url)).await?;
        Ok(response.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{FieldValue, Grade, StudentField};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn api_for(server: &Server) -> HttpStudentApi {
        HttpStudentApi::new(&ApiConfig::new(&server.url())).unwrap()
    }

    fn ada() -> Student {
        Student {
            id: 1,
            name: "Ada".to_string(),
            age: 30,
            grade: Grade::A,
            marks: 95,
        }
    }

    #[tokio::test]
    async fn test_list_students_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"students": [
                    {"id": 2, "name": "Bob", "age": 21, "grade": "C", "marks": 55},
                    {"id": 1, "name": "Ada", "age": 30, "grade": "A", "marks": 95}
                ]}"#,
            )
            .create_async()
            .await;

        let students = api_for(&server).list_students().await.unwrap();

        mock.assert_async().await;
        // server order is preserved
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name, "Bob");
        assert_eq!(students[1], ada());
    }

    #[tokio::test]
    async fn test_list_students_with_irregular_grades() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students")
            .with_status(200)
            .with_body(
                r#"{"students": [
                    {"id": 1, "name": "Ada", "age": 30, "grade": "b", "marks": 95},
                    {"id": 2, "name": "Bob", "age": 21, "grade": "Z", "marks": 55}
                ]}"#,
            )
            .create_async()
            .await;

        let students = api_for(&server).list_students().await.unwrap();

        mock.assert_async().await;
        assert_eq!(students[0].grade, Grade::B);
        assert_eq!(students[1].grade, Grade::Unknown);
    }

    #[tokio::test]
    async fn test_list_students_missing_key_is_empty() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students")
            .with_status(200)
            .with_body(r#"{"message": "no students yet"}"#)
            .create_async()
            .await;

        let students = api_for(&server).list_students().await.unwrap();

        mock.assert_async().await;
        assert!(students.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_carries_code_and_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students")
            .with_status(500)
            .with_body("database on fire")
            .create_async()
            .await;

        let result = api_for(&server).list_students().await;

        mock.assert_async().await;
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("500"), "got: {}", error_msg);
        assert!(error_msg.contains("database on fire"), "got: {}", error_msg);
    }

    #[tokio::test]
    async fn test_invalid_json_is_decode_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students/analyze")
            .with_status(200)
            .with_body("This is not JSON")
            .create_async()
            .await;

        let result = api_for(&server).analyze().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_create_student_sends_full_record() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/students")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "id": 1, "name": "Ada", "age": 30, "grade": "A", "marks": 95
            })))
            .with_status(200)
            .with_body(r#"{"message": "Student added"}"#)
            .create_async()
            .await;

        api_for(&server).create_student(&ada()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_update_student_sends_single_field() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/students/1")
            .match_body(Matcher::Json(json!({"marks": 60})))
            .with_status(200)
            .with_body(r#"{"message": "Student updated"}"#)
            .create_async()
            .await;

        let patch = StudentPatch {
            field: StudentField::Marks,
            value: FieldValue::Integer(60),
        };
        api_for(&server).update_student(1, &patch).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_student_not_found() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/students/99")
            .with_status(404)
            .with_body(r#"{"detail": "Student not found"}"#)
            .create_async()
            .await;

        let result = api_for(&server).delete_student(99).await;

        mock.assert_async().await;
        assert!(matches!(result, Err(ApiError::Status { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_search_sends_query_params() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("by".into(), "name".into()),
                Matcher::UrlEncoded("value".into(), "Ada Lovelace".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"id": 1, "name": "Ada", "age": 30, "grade": "A", "marks": 95}"#)
            .create_async()
            .await;

        let outcome = api_for(&server)
            .search_students(SearchCriterion::Name, "Ada Lovelace")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome, SearchOutcome::Found(ada()));
    }

    #[tokio::test]
    async fn test_search_no_match_is_not_an_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("by".into(), "id".into()),
                Matcher::UrlEncoded("value".into(), "42".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"message": "Student not found"}"#)
            .create_async()
            .await;

        let outcome = api_for(&server)
            .search_students(SearchCriterion::Id, "42")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            outcome,
            SearchOutcome::NotFound("Student not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_analyze_no_data() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/students/analyze")
            .with_status(200)
            .with_body(r#"{"message": "No data to analyze"}"#)
            .create_async()
            .await;

        let outcome = api_for(&server).analyze().await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            outcome,
            AnalyticsOutcome::NoData("No data to analyze".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Port 1 is reserved and never listening
        let api = HttpStudentApi::new(&ApiConfig::new("http://127.0.0.1:1")).unwrap();
        let result = api.list_students().await;
        assert!(matches!(result, Err(ApiError::Transport(_))));
    }
}
