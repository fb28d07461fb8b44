//! Shared helpers for in-process API tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use mongodb::bson::{oid::ObjectId, Bson, Document};
use serde_json::Value;
use tower::ServiceExt;

use library_catalog_server::{
    api::create_router,
    config::AppConfig,
    error::{AppError, AppResult},
    models::{document::bson_to_json, DeleteAck, InsertAck, UpdateAck},
    repository::{CollectionName, CollectionStore, Repository},
    services::Services,
    AppState,
};

/// In-memory collection store with exact-match filters
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<CollectionName, Vec<Document>>>,
    offline: AtomicBool,
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(key, value)| document.get(key) == Some(value))
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert documents directly, bypassing the API
    pub fn seed(&self, collection: CollectionName, documents: Vec<Document>) {
        let mut collections = self.collections.lock().unwrap();
        let entries = collections.entry(collection).or_default();
        for mut document in documents {
            if !document.contains_key("_id") {
                document.insert("_id", ObjectId::new());
            }
            entries.push(document);
        }
    }

    pub fn get(&self, collection: CollectionName, id: ObjectId) -> Option<Document> {
        let collections = self.collections.lock().unwrap();
        collections
            .get(&collection)?
            .iter()
            .find(|d| d.get_object_id("_id").ok() == Some(id))
            .cloned()
    }

    /// Simulate losing the connection to the database
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn check_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(AppError::StoreUnavailable(
                "server selection timeout".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CollectionStore for MemoryStore {
    async fn find(&self, collection: CollectionName, filter: Document) -> AppResult<Vec<Document>> {
        self.check_online()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| matches(d, &filter)).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_one(
        &self,
        collection: CollectionName,
        filter: Document,
    ) -> AppResult<Option<Document>> {
        self.check_online()?;
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| matches(d, &filter)).cloned()))
    }

    async fn insert_one(&self, collection: CollectionName, mut document: Document) -> AppResult<InsertAck> {
        self.check_online()?;
        if !document.contains_key("_id") {
            document.insert("_id", ObjectId::new());
        }
        let id = document.get("_id").cloned().unwrap_or(Bson::Null);

        let mut collections = self.collections.lock().unwrap();
        collections.entry(collection).or_default().push(document);
        Ok(InsertAck::new(bson_to_json(id)))
    }

    async fn upsert_one(
        &self,
        collection: CollectionName,
        filter: Document,
        fields: Document,
    ) -> AppResult<UpdateAck> {
        self.check_online()?;
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection).or_default();

        if let Some(existing) = documents.iter_mut().find(|d| matches(d, &filter)) {
            let mut replacement = Document::new();
            if let Some(id) = existing.get("_id") {
                replacement.insert("_id", id.clone());
            }
            replacement.extend(fields);
            let modified = u64::from(*existing != replacement);
            *existing = replacement;
            return Ok(UpdateAck::new(1, modified, None));
        }

        let id = filter
            .get("_id")
            .cloned()
            .unwrap_or_else(|| ObjectId::new().into());
        let mut document = Document::new();
        document.insert("_id", id.clone());
        document.extend(fields);
        documents.push(document);
        Ok(UpdateAck::new(0, 0, Some(bson_to_json(id))))
    }

    async fn delete_one(&self, collection: CollectionName, filter: Document) -> AppResult<DeleteAck> {
        self.check_online()?;
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection).or_default();
        match documents.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                documents.remove(index);
                Ok(DeleteAck::new(1))
            }
            None => Ok(DeleteAck::new(0)),
        }
    }

    async fn ping(&self) -> AppResult<()> {
        self.check_online()
    }
}

pub fn app_with_config(store: Arc<MemoryStore>, config: AppConfig) -> Router {
    let repository = Repository::new(store);
    let services = Services::new(repository, &config);
    create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    })
}

pub fn app(store: Arc<MemoryStore>) -> Router {
    app_with_config(store, AppConfig::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    pub body: Value,
}

impl TestResponse {
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8_lossy(&bytes).to_string();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(text.clone()))
    };

    TestResponse {
        status,
        headers,
        text,
        body,
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn get(uri: &str) -> Request<Body> {
    request(Method::GET, uri, None, None)
}

/// Obtain a session and return the `token=...` pair to send back as a cookie
pub async fn login(app: &Router, email: &str) -> String {
    let response = send(
        app,
        request(
            Method::POST,
            "/jwt",
            Some(serde_json::json!({ "email": email })),
            None,
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    response
        .set_cookie()
        .and_then(|c| c.split(';').next())
        .expect("token cookie")
        .to_string()
}
