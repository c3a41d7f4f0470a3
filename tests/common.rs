#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use u3devlab_admin::{AdminConfig, ApiClient};

pub const TEST_TOKEN: &str = "test-admin-token";

/// One request as seen by the fake API.
#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub request_id: Option<String>,
    pub authorization: Option<String>,
}

/// In-memory stand-in for the agency API.
#[derive(Debug, Default)]
pub struct FakeDb {
    pub blog: Vec<Value>,
    pub portfolio: Vec<Value>,
    pub products: Vec<Value>,
    pub messages: Vec<Value>,
    pub reviews: Vec<Value>,
    /// Keys whose DELETE answers 500.
    pub failing_deletes: HashSet<String>,
    /// Collection GETs answer 500 while set.
    pub fail_lists: bool,
    pub seen: Vec<Seen>,
    next_id: u64,
}

impl FakeDb {
    fn collection(&mut self, resource: &str) -> Option<&mut Vec<Value>> {
        match resource {
            "blog" => Some(&mut self.blog),
            "portfolio" => Some(&mut self.portfolio),
            "products" => Some(&mut self.products),
            "messages" => Some(&mut self.messages),
            _ => None,
        }
    }

    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}{}", prefix, self.next_id)
    }
}

pub type SharedDb = Arc<Mutex<FakeDb>>;

pub struct TestApi {
    pub base: String,
    pub db: SharedDb,
    pub client: ApiClient,
    handle: JoinHandle<()>,
}

impl Drop for TestApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestApi {
    pub fn seed(&self, resource: &str, items: Vec<Value>) {
        let mut db = self.db.lock().unwrap();
        db.collection(resource)
            .expect("unknown resource")
            .extend(items);
    }

    /// Requests received so far as "METHOD /path".
    pub fn requests(&self) -> Vec<String> {
        self.db
            .lock()
            .unwrap()
            .seen
            .iter()
            .map(|s| format!("{} {}", s.method, s.path))
            .collect()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.db.lock().unwrap().seen.clone()
    }

    pub fn stored(&self, resource: &str) -> Vec<Value> {
        let mut db = self.db.lock().unwrap();
        db.collection(resource).map(|c| c.clone()).unwrap_or_default()
    }

    pub fn fail_delete(&self, key: &str, fail: bool) {
        let mut db = self.db.lock().unwrap();
        if fail {
            db.failing_deletes.insert(key.to_string());
        } else {
            db.failing_deletes.remove(key);
        }
    }

    pub fn fail_lists(&self, fail: bool) {
        self.db.lock().unwrap().fail_lists = fail;
    }
}

/// A document the way Mongoose serialises it with virtuals and timestamps on:
/// `_id` and `id` both present, `createdAt`/`updatedAt`, and `__v`.
pub fn mongo_doc(id: &str, mut fields: Value) -> Value {
    fields["_id"] = json!(id);
    fields["id"] = json!(id);
    fields["createdAt"] = json!("2024-05-01T09:00:00.000Z");
    fields["updatedAt"] = json!("2024-05-02T09:00:00.000Z");
    fields["__v"] = json!(0);
    fields
}

pub async fn spawn_api() -> anyhow::Result<TestApi> {
    let db: SharedDb = Arc::new(Mutex::new(FakeDb::default()));
    let app = router(db.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    let base = format!("http://{}", addr);
    let config = AdminConfig {
        admin_token: Some(TEST_TOKEN.to_string()),
        ..AdminConfig::for_base_url(base.clone())
    };
    let client = ApiClient::new(&config)?;

    Ok(TestApi {
        base,
        db,
        client,
        handle,
    })
}

fn router(db: SharedDb) -> Router {
    Router::new()
        .route("/api/upload", post(upload))
        .route("/api/products/reviews", get(list_reviews).post(create_review))
        .route("/api/{resource}", get(list).post(create))
        .route(
            "/api/{resource}/{key}",
            get(fetch_one)
                .put(update)
                .patch(set_status)
                .delete(remove),
        )
        .layer(middleware::from_fn_with_state(db.clone(), record))
        .with_state(db)
}

async fn record(State(db): State<SharedDb>, req: Request, next: Next) -> Response {
    let seen = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        Seen {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            request_id: header("x-request-id"),
            authorization: header("authorization"),
        }
    };
    db.lock().unwrap().seen.push(seen);
    next.run(req).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "error": message }))).into_response()
}

fn key_field(resource: &str) -> &'static str {
    if resource == "messages" {
        "_id"
    } else {
        "slug"
    }
}

fn key_of<'a>(item: &'a Value, resource: &str) -> Option<&'a str> {
    item.get(key_field(resource)).and_then(Value::as_str)
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ============================================================================
// Collections
// ============================================================================

async fn list(
    State(db): State<SharedDb>,
    Path(resource): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut db = db.lock().unwrap();
    if db.fail_lists {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Failed to fetch {}", resource),
        );
    }
    let Some(items) = db.collection(&resource) else {
        return error(StatusCode::NOT_FOUND, "Not found");
    };

    let mut items: Vec<Value> = items.clone();
    if let Some(kind) = params.get("productType") {
        items.retain(|p| p.get("productType").and_then(Value::as_str).unwrap_or("product") == kind);
    }
    if let Some(category) = params.get("category") {
        items.retain(|p| p.get("category").and_then(Value::as_str) == Some(category.as_str()));
    }
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        items.truncate(limit);
    }

    // each resource uses a different list shape
    let body = match resource.as_str() {
        "blog" => json!(items),
        "portfolio" => json!({ "success": true, "projects": items }),
        "products" => json!({ "success": true, "products": items }),
        _ => json!({ "success": true, "data": items }),
    };
    Json(body).into_response()
}

async fn create(
    State(db): State<SharedDb>,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();
    let id = db.next_id(&resource[..1]);
    let Some(items) = db.collection(&resource) else {
        return error(StatusCode::NOT_FOUND, "Not found");
    };

    if resource == "messages" {
        body["_id"] = json!(id);
        body["status"] = json!("unread");
        body["date"] = json!(now());
        body["isEmailSent"] = json!(false);
    } else {
        let slug = key_of(&body, &resource).unwrap_or_default().to_string();
        if slug.is_empty() {
            return error(StatusCode::BAD_REQUEST, "Slug is required");
        }
        if items.iter().any(|i| key_of(i, &resource) == Some(slug.as_str())) {
            return error(StatusCode::CONFLICT, "Slug already exists");
        }
        body["_id"] = json!(id);
        body["createdAt"] = json!(now());
    }

    items.push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": body })),
    )
        .into_response()
}

// ============================================================================
// Single items
// ============================================================================

async fn fetch_one(
    State(db): State<SharedDb>,
    Path((resource, key)): Path<(String, String)>,
) -> Response {
    let mut db = db.lock().unwrap();
    let Some(items) = db.collection(&resource) else {
        return error(StatusCode::NOT_FOUND, "Not found");
    };
    match items.iter().find(|i| key_of(i, &resource) == Some(key.as_str())) {
        // blog answers bare, the rest wrapped
        Some(item) if resource == "blog" => Json(item.clone()).into_response(),
        Some(item) => Json(json!({ "success": true, "data": item })).into_response(),
        None => error(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn update(
    State(db): State<SharedDb>,
    Path((resource, key)): Path<(String, String)>,
    Json(mut body): Json<Value>,
) -> Response {
    let mut db = db.lock().unwrap();
    let Some(items) = db.collection(&resource) else {
        return error(StatusCode::NOT_FOUND, "Not found");
    };
    let Some(index) = items
        .iter()
        .position(|i| key_of(i, &resource) == Some(key.as_str()))
    else {
        return error(StatusCode::NOT_FOUND, "Not found");
    };

    let new_key = key_of(&body, &resource).unwrap_or(&key).to_string();
    let taken = items
        .iter()
        .enumerate()
        .any(|(i, item)| i != index && key_of(item, &resource) == Some(new_key.as_str()));
    if taken {
        return error(StatusCode::CONFLICT, "Slug already exists");
    }

    body["_id"] = items[index]["_id"].clone();
    body["createdAt"] = items[index]["createdAt"].clone();
    body["updatedAt"] = json!(now());
    items[index] = body.clone();
    Json(json!({ "success": true, "data": body })).into_response()
}

async fn set_status(
    State(db): State<SharedDb>,
    Path((resource, key)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    if resource != "messages" {
        return error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }
    let status = body.get("status").and_then(Value::as_str).unwrap_or_default();
    if !matches!(status, "unread" | "read" | "replied") {
        return error(StatusCode::BAD_REQUEST, "Invalid status");
    }

    let mut db = db.lock().unwrap();
    let items = &mut db.messages;
    match items
        .iter_mut()
        .find(|i| key_of(i, &resource) == Some(key.as_str()))
    {
        Some(message) => {
            message["status"] = json!(status);
            Json(json!({ "success": true, "data": message.clone() })).into_response()
        }
        None => error(StatusCode::NOT_FOUND, "Not found"),
    }
}

async fn remove(
    State(db): State<SharedDb>,
    Path((resource, key)): Path<(String, String)>,
) -> Response {
    let mut db = db.lock().unwrap();
    if db.failing_deletes.contains(&key) {
        return error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &format!("Failed to delete {}", resource),
        );
    }
    let Some(items) = db.collection(&resource) else {
        return error(StatusCode::NOT_FOUND, "Not found");
    };
    let before = items.len();
    items.retain(|i| key_of(i, &resource) != Some(key.as_str()));
    if items.len() == before {
        return error(StatusCode::NOT_FOUND, "Not found");
    }
    Json(json!({ "success": true })).into_response()
}

// ============================================================================
// Reviews / upload
// ============================================================================

async fn list_reviews(
    State(db): State<SharedDb>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let db = db.lock().unwrap();
    let product_id = params.get("productId").cloned().unwrap_or_default();
    let reviews: Vec<Value> = db
        .reviews
        .iter()
        .filter(|r| r.get("productId").and_then(Value::as_str) == Some(product_id.as_str()))
        .cloned()
        .collect();
    Json(json!({ "success": true, "reviews": reviews })).into_response()
}

async fn create_review(State(db): State<SharedDb>, Json(mut body): Json<Value>) -> Response {
    let rating = body.get("rating").and_then(Value::as_u64).unwrap_or(0);
    if !(1..=5).contains(&rating) {
        return error(StatusCode::BAD_REQUEST, "Rating must be between 1 and 5");
    }
    let mut db = db.lock().unwrap();
    let id = db.next_id("r");
    body["_id"] = json!(id);
    body["createdAt"] = json!(now());
    body["isVerified"] = json!(false);
    db.reviews.push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": body })),
    )
        .into_response()
}

async fn upload(Json(body): Json<Value>) -> Response {
    let image = body.get("image").and_then(Value::as_str).unwrap_or_default();
    let file_name = body
        .get("fileName")
        .and_then(Value::as_str)
        .unwrap_or("upload");
    if !image.starts_with("data:image/") || !image.contains(";base64,") {
        return error(StatusCode::BAD_REQUEST, "Invalid image data");
    }
    Json(json!({
        "success": true,
        "url": format!("https://cdn.u3devlab.test/uploads/{}", file_name),
    }))
    .into_response()
}
