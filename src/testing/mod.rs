use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use crate::app::{app, AppState};
use crate::config::AppConfig;
use crate::database::manager::DatabaseError;
use crate::database::models::{Drone, DroneFilter, DroneInput};
use crate::database::store::{DroneStore, SharedStore};
use crate::database::MemoryDroneStore;

/// In-process router over a fresh store, driven with `oneshot`.
pub struct TestApp {
    router: Router,
    store: SharedStore,
}

impl TestApp {
    /// Router backed by an empty in-memory store
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryDroneStore::new()))
    }

    /// Router whose store fails every call as if the database were down
    pub fn failing() -> Self {
        Self::with_store(Arc::new(UnreachableStore))
    }

    pub fn with_store(store: SharedStore) -> Self {
        let state = AppState::new(AppConfig::in_memory(), store.clone());
        Self { router: app(state), store }
    }

    /// Insert a drone directly through the store and return its id
    pub async fn seed(&self, name: &str, drone_type: &str, brand: &str) -> i64 {
        let input = DroneInput {
            name: name.to_string(),
            drone_type: drone_type.to_string(),
            brand: brand.to_string(),
            description: String::new(),
            price: Decimal::from_str("100.00").unwrap(),
            stock: 1,
            image: String::new(),
        };
        self.store.create(&input).await.expect("seed drone")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// POST `fields` as a `multipart/form-data` body, the way a browser
    /// submits `new FormData(form)`.
    pub async fn post_multipart(&self, uri: &str, fields: &[(&str, &str)]) -> (StatusCode, Value) {
        const BOUNDARY: &str = "skysail-test-boundary";
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));

        let request = Request::post(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Send a raw request and return the response untouched
    pub async fn request(&self, request: Request<Body>) -> axum::response::Response {
        self.router.clone().oneshot(request).await.expect("router is infallible")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.request(request).await;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }
}

/// Store that behaves like an unreachable database.
struct UnreachableStore;

#[async_trait]
impl DroneStore for UnreachableStore {
    async fn list(&self, _filter: &DroneFilter) -> Result<Vec<Drone>, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn types(&self) -> Result<Vec<String>, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn create(&self, _input: &DroneInput) -> Result<i64, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn update(&self, _id_drone: i64, _input: &DroneInput) -> Result<u64, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn delete(&self, _id_drone: i64) -> Result<u64, DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(sqlx::Error::PoolTimedOut.into())
    }
}
