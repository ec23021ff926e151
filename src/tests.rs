//! Integration tests for the employee records backend.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Local};
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use crate::db::{init_database, Repository};
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.sqlite");

        let pool = init_database(&db_path).await.expect("Failed to init DB");
        let state = AppState {
            repo: Arc::new(Repository::new(pool)),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn submit(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url("/submit-form"))
            .json(body)
            .send()
            .await
            .unwrap()
    }

    async fn list(&self) -> Vec<Value> {
        let resp = self
            .client
            .get(self.url("/api/employees"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        body.as_array().unwrap().clone()
    }
}

fn employee_body(employee_id: &str, email: &str) -> Value {
    json!({
        "firstname": "Katherine",
        "lastname": "Johnson",
        "employeeId": employee_id,
        "email": email,
        "phoneNumber": "5550001111",
        "department": "Engineering",
        "dateOfJoining": "2019-11-04",
        "role": "Mathematician"
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_router_without_server() {
    let temp_dir = TempDir::new().unwrap();
    let pool = init_database(&temp_dir.path().join("test.sqlite"))
        .await
        .unwrap();
    let app = create_router(AppState {
        repo: Arc::new(Repository::new(pool)),
    });

    let resp = app
        .clone()
        .oneshot(Request::get("/api/employees").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(Request::get("/api/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let fixture = TestFixture::new().await;
    let input = employee_body("KJ001", "kj@example.com");

    let resp = fixture.submit(&input).await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Employee added successfully!");
    let id = body["data"]["id"].as_i64().unwrap();

    let employees = fixture.list().await;
    assert_eq!(employees.len(), 1);

    let mut expected = input.clone();
    expected["id"] = json!(id);
    assert_eq!(employees[0], expected);
    assert_eq!(employees[0]["dateOfJoining"], "2019-11-04");
}

#[tokio::test]
async fn test_create_via_api_alias() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/employees"))
        .json(&employee_body("KJ001", "kj@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(fixture.list().await.len(), 1);
}

#[tokio::test]
async fn test_create_duplicate_employee_id_conflicts() {
    let fixture = TestFixture::new().await;
    fixture
        .submit(&employee_body("KJ001", "kj@example.com"))
        .await;

    let resp = fixture
        .submit(&employee_body("KJ001", "someone-else@example.com"))
        .await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Employee ID or Email already exists.");
    assert_eq!(body["code"], "CONFLICT");

    let employees = fixture.list().await;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["email"], "kj@example.com");
}

#[tokio::test]
async fn test_create_duplicate_email_conflicts() {
    let fixture = TestFixture::new().await;
    fixture
        .submit(&employee_body("KJ001", "kj@example.com"))
        .await;

    let resp = fixture
        .submit(&employee_body("KJ002", "KJ@Example.com"))
        .await;
    assert_eq!(resp.status(), 400);
    assert_eq!(fixture.list().await.len(), 1);
}

#[tokio::test]
async fn test_validation_errors() {
    let fixture = TestFixture::new().await;

    let mut input = employee_body("12345678901", "bad-email");
    input["phoneNumber"] = json!("12345");
    input["department"] = json!("Legal");

    let resp = fixture.submit(&input).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(
        body["errors"]["employeeId"],
        "Employee ID must be 10 characters or less."
    );
    assert_eq!(body["errors"]["email"], "Invalid email format.");
    assert_eq!(
        body["errors"]["phoneNumber"],
        "Phone number must be a 10-digit number."
    );
    assert!(body["errors"]["department"].is_string());
    assert!(body["errors"].get("firstname").is_none());

    // Missing fields are reported, not rejected as malformed JSON.
    let resp = fixture.submit(&json!({ "firstname": "Only" })).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["errors"]["role"], "Role is required.");

    assert!(fixture.list().await.is_empty());
}

#[tokio::test]
async fn test_date_of_joining_relative_to_today() {
    let fixture = TestFixture::new().await;
    let today = Local::now().date_naive();
    let tomorrow = today + Duration::days(1);

    let mut input = employee_body("KJ001", "kj@example.com");
    input["dateOfJoining"] = json!(tomorrow.format("%Y-%m-%d").to_string());
    let resp = fixture.submit(&input).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["errors"]["dateOfJoining"],
        "Date of Joining cannot be a future date."
    );

    input["dateOfJoining"] = json!(today.format("%Y-%m-%d").to_string());
    let resp = fixture.submit(&input).await;
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/submit-form"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_get_employee() {
    let fixture = TestFixture::new().await;
    let body: Value = fixture
        .submit(&employee_body("KJ001", "kj@example.com"))
        .await
        .json()
        .await
        .unwrap();
    let id = body["data"]["id"].as_i64().unwrap();

    let resp = fixture
        .client
        .get(fixture.url(&format!("/api/employees/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let employee: Value = resp.json().await.unwrap();
    assert_eq!(employee["employeeId"], "KJ001");

    let resp = fixture
        .client
        .get(fixture.url("/api/employees/9999"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_update_employee() {
    let fixture = TestFixture::new().await;
    let a: Value = fixture
        .submit(&employee_body("A001", "a@example.com"))
        .await
        .json()
        .await
        .unwrap();
    let a_id = a["data"]["id"].as_i64().unwrap();
    fixture
        .submit(&employee_body("B001", "b@example.com"))
        .await;

    // Taking B's email conflicts.
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/employees/{}", a_id)))
        .json(&employee_body("A001", "b@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "CONFLICT");

    // Keeping its own email and echoing its id back is fine.
    let mut changes = employee_body("A001", "a@example.com");
    changes["id"] = json!(a_id);
    changes["role"] = json!("Lead Mathematician");
    changes["department"] = json!("Finance");
    let resp = fixture
        .client
        .put(fixture.url(&format!("/api/employees/{}", a_id)))
        .json(&changes)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Employee updated successfully!");
    assert_eq!(body["data"]["role"], "Lead Mathematician");

    let employees = fixture.list().await;
    let stored = employees.iter().find(|e| e["id"] == json!(a_id)).unwrap();
    assert_eq!(stored["department"], "Finance");
    assert_eq!(stored["email"], "a@example.com");
}

#[tokio::test]
async fn test_update_validates_and_reports_missing() {
    let fixture = TestFixture::new().await;

    let mut invalid = employee_body("A001", "a@example.com");
    invalid["phoneNumber"] = json!("");
    let resp = fixture
        .client
        .put(fixture.url("/api/employees/1"))
        .json(&invalid)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .client
        .put(fixture.url("/api/employees/9999"))
        .json(&employee_body("A001", "a@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_delete_employee() {
    let fixture = TestFixture::new().await;
    let body: Value = fixture
        .submit(&employee_body("KJ001", "kj@example.com"))
        .await
        .json()
        .await
        .unwrap();
    let id = body["data"]["id"].as_i64().unwrap();
    fixture
        .submit(&employee_body("KJ002", "kj2@example.com"))
        .await;

    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/employees/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Employee deleted successfully!");
    assert!(body.get("data").is_none());

    let employees = fixture.list().await;
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["employeeId"], "KJ002");

    // A second delete finds nothing.
    let resp = fixture
        .client
        .delete(fixture.url(&format!("/api/employees/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn test_freed_identifiers_can_be_reused() {
    let fixture = TestFixture::new().await;
    let body: Value = fixture
        .submit(&employee_body("KJ001", "kj@example.com"))
        .await
        .json()
        .await
        .unwrap();
    let id = body["data"]["id"].as_i64().unwrap();

    fixture
        .client
        .delete(fixture.url(&format!("/api/employees/{}", id)))
        .send()
        .await
        .unwrap();

    let resp = fixture
        .submit(&employee_body("KJ001", "kj@example.com"))
        .await;
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_ne!(body["data"]["id"].as_i64().unwrap(), id);
}

#[tokio::test]
async fn test_values_stored_as_submitted() {
    let fixture = TestFixture::new().await;

    let mut padded_phone = employee_body("KJ001", "kj@example.com");
    padded_phone["phoneNumber"] = json!(" 5550001111 ");
    let resp = fixture.submit(&padded_phone).await;
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(
        body["errors"]["phoneNumber"],
        "Phone number must be a 10-digit number."
    );

    let mut input = employee_body("KJ001", "kj@example.com");
    input["firstname"] = json!(" Ann ");
    input["role"] = json!("   ");
    let resp = fixture.submit(&input).await;
    assert_eq!(resp.status(), 200);
    let id = resp.json::<Value>().await.unwrap()["data"]["id"].clone();

    let mut expected = input.clone();
    expected["id"] = id;
    assert_eq!(fixture.list().await, vec![expected]);
}

#[tokio::test]
async fn test_non_numeric_id_is_bad_request() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/employees/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
    assert!(body["message"].is_string());

    let resp = fixture
        .client
        .put(fixture.url("/api/employees/abc"))
        .json(&employee_body("KJ001", "kj@example.com"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = fixture
        .client
        .delete(fixture.url("/api/employees/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["code"], "BAD_REQUEST");
}
