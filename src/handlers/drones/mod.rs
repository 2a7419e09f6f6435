// handlers/drones/mod.rs - Drones catalog endpoint
//
// One endpoint, selected by (HTTP method, action):
//   GET  list (default)  search?, type?
//   POST create          name, type, price, stock, brand?, description?, image?
//   POST update          id_drone + create fields
//   POST delete          id_drone
// Anything else is a 400.

use axum::{
    extract::{RawQuery, Request, State},
    http::Method,
};
use tracing::{debug, warn};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::ApiResult;

pub mod create;
pub mod delete;
pub mod list;
pub mod params;
pub mod update;

pub use params::DroneParams;

/// The closed set of catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "list" => Some(Action::List),
            "create" => Some(Action::Create),
            "update" => Some(Action::Update),
            "delete" => Some(Action::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    /// The only method each action is served on.
    pub fn method(&self) -> Method {
        match self {
            Action::List => Method::GET,
            Action::Create | Action::Update | Action::Delete => Method::POST,
        }
    }

    /// Resolve a request to an action. A missing action means `list`; an
    /// empty or unknown one, or the wrong method, resolves to nothing.
    pub fn resolve(method: &Method, action: Option<&str>) -> Option<Self> {
        let action = Self::parse(action.unwrap_or("list"))?;
        (action.method() == *method).then_some(action)
    }
}

/// Catalog entry point. The action comes from the query string, then the
/// form body. List reads its criteria from the query string; writes read the
/// form body (urlencoded or multipart).
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    RawQuery(raw_query): RawQuery,
    request: Request,
) -> ApiResult {
    let query = DroneParams::from_urlencoded(raw_query.unwrap_or_default().as_bytes());
    let form = if method == Method::POST {
        DroneParams::from_body(request).await
    } else {
        DroneParams::default()
    };
    let requested = query.action.as_deref().or(form.action.as_deref());

    let Some(action) = Action::resolve(&method, requested) else {
        warn!(%method, action = ?requested, "Unknown drones action");
        return Err(ApiError::unknown_action());
    };

    debug!(action = action.as_str(), "Dispatching drones action");
    let store = state.store.as_ref();
    let result = match action {
        Action::List => list::list(store, &query).await,
        Action::Create => create::create(store, &form).await,
        Action::Update => update::update(store, &form).await,
        Action::Delete => delete::delete(store, &form).await,
    };

    if let Err(ApiError::UnprocessableEntity(message)) = &result {
        warn!(action = action.as_str(), %message, "Rejected drones request");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestApp;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[test]
    fn resolves_method_action_pairs() {
        assert_eq!(Action::resolve(&Method::GET, None), Some(Action::List));
        assert_eq!(Action::resolve(&Method::GET, Some("list")), Some(Action::List));
        assert_eq!(Action::resolve(&Method::POST, Some("create")), Some(Action::Create));
        assert_eq!(Action::resolve(&Method::POST, Some("update")), Some(Action::Update));
        assert_eq!(Action::resolve(&Method::POST, Some("delete")), Some(Action::Delete));

        assert_eq!(Action::resolve(&Method::POST, None), None);
        assert_eq!(Action::resolve(&Method::GET, Some("create")), None);
        assert_eq!(Action::resolve(&Method::GET, Some("")), None);
        assert_eq!(Action::resolve(&Method::POST, Some("Create")), None);
        assert_eq!(Action::resolve(&Method::PUT, Some("update")), None);
    }

    fn drones(body: &Value) -> &Vec<Value> {
        body["drones"].as_array().expect("drones array")
    }

    #[tokio::test]
    async fn created_drone_appears_in_list() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form(
                "/api/drones?action=create",
                "name=Zeus+X1&type=racing&brand=Skysail&description=Fast&price=1299.90&stock=4&image=%2Fimg%2Fzeus.png",
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Drone created successfully.");
        let id = body["id_drone"].as_i64().expect("id_drone");

        let (status, body) = app.get("/api/drones").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            drones(&body)[0],
            json!({
                "id_drone": id,
                "name": "Zeus X1",
                "type": "racing",
                "image": "/img/zeus.png",
                "description": "Fast",
                "price": "1299.90",
                "brand": "Skysail",
                "stock": 4
            })
        );
        assert_eq!(body["types"], json!(["racing"]));
    }

    #[tokio::test]
    async fn action_may_come_from_the_form_body() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form("/api/drones", "action=create&name=Lens&type=camera&price=10&stock=1")
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert!(body["id_drone"].is_i64());
    }

    #[tokio::test]
    async fn list_filters_by_search_and_type() {
        let app = TestApp::new();
        app.seed("Zeus X1", "racing", "Skysail").await;
        app.seed("Falcon", "camera", "ZEUSWORKS").await;
        app.seed("Hawk", "camera", "Acme").await;
        app.seed("Owl", "zeus-class", "Acme").await;

        let (_, body) = app.get("/api/drones?search=zeus").await;
        let names: Vec<&str> = drones(&body).iter().filter_map(|d| d["name"].as_str()).collect();
        assert_eq!(names, vec!["Owl", "Falcon", "Zeus X1"]);

        let (_, body) = app.get("/api/drones?action=list&type=camera").await;
        let names: Vec<&str> = drones(&body).iter().filter_map(|d| d["name"].as_str()).collect();
        assert_eq!(names, vec!["Hawk", "Falcon"]);

        let (_, body) = app.get("/api/drones?search=zeus&type=camera").await;
        assert_eq!(drones(&body).len(), 1);
        assert_eq!(body["types"], json!(["camera", "racing", "zeus-class"]));
    }

    #[tokio::test]
    async fn repeated_query_keys_keep_the_last_value() {
        let app = TestApp::new();
        app.seed("Alpha", "racing", "Acme").await;
        app.seed("Bravo", "racing", "Acme").await;

        let (status, body) = app.get("/api/drones?search=alpha&search=bravo").await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let names: Vec<&str> = drones(&body).iter().filter_map(|d| d["name"].as_str()).collect();
        assert_eq!(names, vec!["Bravo"]);

        let (status, body) = app.get("/api/drones?action=create&action=list").await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn multipart_create_is_accepted() {
        let app = TestApp::new();
        let (status, body) = app
            .post_multipart(
                "/api/drones?action=create",
                &[("name", "Zeus X1"), ("type", "racing"), ("price", "1299.90"), ("stock", "4")],
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let id = body["id_drone"].as_i64().expect("id_drone");

        let (_, body) = app
            .post_multipart("/api/drones", &[("action", "delete"), ("id_drone", id.to_string().as_str())])
            .await;
        assert_eq!(body["message"], "Drone deleted successfully.");
    }

    #[tokio::test]
    async fn numeric_fields_are_coerced() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form("/api/drones?action=create", "name=Lens&type=camera&price=abc&stock=2.5")
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let id = body["id_drone"].as_i64().expect("id_drone");

        let (_, listing) = app.get("/api/drones").await;
        assert_eq!(drones(&listing)[0]["stock"], 2);
        assert_eq!(drones(&listing)[0]["price"], "0");

        let (status, body) = app
            .post_form("/api/drones?action=delete", &format!("id_drone={}.0", id))
            .await;
        assert_eq!(status, StatusCode::OK, "{}", body);
        let (_, listing) = app.get("/api/drones").await;
        assert!(drones(&listing).is_empty());
    }

    #[tokio::test]
    async fn missing_required_fields_are_rejected_without_writing() {
        let app = TestApp::new();
        let (status, body) = app
            .post_form("/api/drones?action=create", "name=Lens&type=camera&price=10")
            .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Name, type, price and stock are required." })
        );

        let (_, body) = app.get("/api/drones").await;
        assert!(drones(&body).is_empty());
    }

    #[tokio::test]
    async fn update_overwrites_and_tolerates_unknown_ids() {
        let app = TestApp::new();
        let id = app.seed("Scout", "racing", "Skysail").await;
        let other = app.seed("Lens", "camera", "Acme").await;

        let (status, body) = app
            .post_form(
                "/api/drones?action=update",
                &format!("id_drone={}&name=Scout+II&type=racing&price=5&stock=0", id),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Drone updated successfully.");

        let (_, before) = app.get("/api/drones").await;
        let (status, _) = app
            .post_form(
                "/api/drones?action=update",
                "id_drone=9999&name=Ghost&type=racing&price=5&stock=0",
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        let (_, after) = app.get("/api/drones").await;
        assert_eq!(before, after);

        let updated = drones(&after).iter().find(|d| d["id_drone"] == id).unwrap();
        assert_eq!(updated["name"], "Scout II");
        assert_eq!(updated["brand"], "");
        let untouched = drones(&after).iter().find(|d| d["id_drone"] == other).unwrap();
        assert_eq!(untouched["name"], "Lens");
    }

    #[tokio::test]
    async fn update_validates_id_before_fields() {
        let app = TestApp::new();
        let (status, body) = app.post_form("/api/drones?action=update", "id_drone=abc").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Invalid drone ID.");

        let (status, body) = app.post_form("/api/drones?action=update", "id_drone=3&name=Scout").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Name, type, price and stock are required.");
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let app = TestApp::new();
        let id = app.seed("Scout", "racing", "Skysail").await;
        let body = format!("id_drone={}", id);

        for _ in 0..2 {
            let (status, response) = app.post_form("/api/drones?action=delete", &body).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(response["message"], "Drone deleted successfully.");
        }

        let (_, listing) = app.get("/api/drones").await;
        assert!(drones(&listing).is_empty());

        let (status, _) = app.post_form("/api/drones?action=delete", "id_drone=0").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn unmatched_pairs_are_bad_requests() {
        let app = TestApp::new();
        for (status, body) in [
            app.get("/api/drones?action=create").await,
            app.get("/api/drones?action=purge").await,
            app.post_form("/api/drones", "name=Scout").await,
        ] {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "success": false, "message": "Unknown action or method." }));
        }
    }

    #[tokio::test]
    async fn legacy_path_is_served() {
        let app = TestApp::new();
        let (status, body) = app.get("/api-drones.php?action=list").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn store_failures_become_500_with_message() {
        let app = TestApp::failing();
        let (status, body) = app.get("/api/drones").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(
            body["message"].as_str().unwrap().starts_with("Database connection failed: "),
            "{}",
            body
        );

        // Validation still runs before the store is touched.
        let (status, _) = app.post_form("/api/drones?action=delete", "id_drone=-1").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
