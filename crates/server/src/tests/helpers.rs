// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode},
};
use permit_portal_persistence::Persistence;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::live::LiveEventBroadcaster;
use crate::uploads::UploadStore;
use crate::{AppState, build_router};

const BOUNDARY: &str = "permit-portal-test-boundary";

/// A router over a fresh in-memory database and a private upload root.
pub struct TestServer {
    pub app_state: AppState,
    pub upload_root: PathBuf,
}

impl TestServer {
    pub fn new() -> Self {
        let upload_root: PathBuf = std::env::temp_dir().join(format!(
            "permit-portal-server-test-{}",
            rand::random::<u64>()
        ));
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        Self {
            app_state: AppState {
                persistence: Arc::new(Mutex::new(persistence)),
                uploads: Arc::new(UploadStore::new(&upload_root)),
                live_events: Arc::new(LiveEventBroadcaster::new()),
            },
            upload_root,
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.app_state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        account_id: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = account_id {
            builder = builder.header("X-Account-Id", id.to_string());
        }
        let request: Request<Body> = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response: Response<Body> = self.send(request).await;
        into_json(response).await
    }

    pub async fn send_multipart(
        &self,
        uri: &str,
        account_id: i64,
        fields: &[(&str, &str)],
        files: &[(&str, &str, &str, &[u8])],
    ) -> (StatusCode, Value) {
        let request: Request<Body> = Request::builder()
            .method("POST")
            .uri(uri)
            .header("X-Account-Id", account_id.to_string())
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields, files)))
            .unwrap();
        let response: Response<Body> = self.send(request).await;
        into_json(response).await
    }

    /// Number of files stored under an upload subdirectory.
    pub fn stored_files(&self, directory: &str) -> usize {
        std::fs::read_dir(self.upload_root.join(directory))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Creates the MEO admin (id 1) and the applicant `juan` (id 2).
    pub async fn with_accounts(self) -> Self {
        let (status, _) = self
            .send_json("POST", "/api/accounts/bootstrap", None, Some(registration("meo")))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = self
            .send_json("POST", "/api/accounts", None, Some(registration("juan")))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        self
    }

    /// Submits a building application as `juan` and returns its id and
    /// reference number.
    pub async fn submit_building(&self) -> (i64, String) {
        let (status, body) = self
            .send_json(
                "POST",
                "/api/applications/building",
                Some(APPLICANT),
                Some(building_form()),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (
            body["applicationId"].as_i64().unwrap(),
            body["referenceNo"].as_str().unwrap().to_string(),
        )
    }

    pub async fn set_status(&self, application_id: i64, status: &str) -> (StatusCode, Value) {
        self.send_json(
            "PUT",
            &format!("/api/applications/{application_id}/status"),
            Some(MEO),
            Some(json!({ "status": status })),
        )
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.upload_root);
    }
}

pub const MEO: i64 = 1;
pub const APPLICANT: i64 = 2;

pub async fn into_json(response: Response<Body>) -> (StatusCode, Value) {
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn registration(username: &str) -> Value {
    json!({
        "username": username,
        "firstName": "Juan",
        "lastName": "Dela Cruz",
        "email": format!("{username}@example.gov.ph"),
        "phoneNumber": "0917 555 0100"
    })
}

pub fn building_form() -> Value {
    json!({
        "box1": {
            "owner": { "lastName": "Dela Cruz", "firstName": "Juan" },
            "enterprise": { "formOfOwnership": "Individual" },
            "location": {
                "lotNo": "12",
                "tctNo": 558_812,
                "taxDecNo": "TD-2291",
                "street": "Rizal St.",
                "barangay": "Poblacion",
                "city": "San Isidro"
            },
            "occupancy": { "group": "Group A" },
            "projectDetails": { "totalEstimatedCost": 2_500_000.0 }
        },
        "box2": { "name": "Engr. Maria Santos", "prcNo": 112_233, "ptrNo": "PTR-9981" },
        "box3": { "name": "Juan Dela Cruz" },
        "box4": {}
    })
}

fn multipart_body(fields: &[(&str, &str)], files: &[(&str, &str, &str, &[u8])]) -> Vec<u8> {
    let mut body: Vec<u8> = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    for (name, file_name, content_type, bytes) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
