// HTTP tests against the in-memory store

use actix_web::{http::StatusCode, test, App};
use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use skillmatch::auth::{AuthConfig, Claims};
use skillmatch::core::{CandidateQuery, Recommender};
use skillmatch::models::{
    NewOpportunity, Opportunity, OpportunityPatch, Role, UserProfile, PROFILE_INCOMPLETE_MESSAGE,
};
use skillmatch::routes::{configure_app, AppState};
use skillmatch::services::{InMemoryStore, OpportunityStore, StoreError};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

const SECRET: &str = "test-secret";

fn create_user(role: Role, skills: &[&str], interests: &[&str]) -> UserProfile {
    UserProfile {
        id: Uuid::new_v4(),
        username: format!("{}_user", role),
        role,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
    }
}

fn create_opportunity(title: &str, required_skills: &[&str], tags: &[&str]) -> Opportunity {
    Opportunity {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: format!("{} description", title),
        company: "Acme".to_string(),
        required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
        tags: tags.iter().map(|s| s.to_string()).collect(),
        level: Default::default(),
        kind: Default::default(),
        salary: 0.0,
        created_by: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
    }
}

fn token_for(user: &UserProfile) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        id: user.id,
        iat: now,
        exp: now + 3600,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap()
}

fn bearer(user: &UserProfile) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token_for(user)))
}

fn app_state(store: Arc<InMemoryStore>) -> AppState {
    AppState {
        opportunities: store.clone(),
        users: store.clone(),
        recommender: Recommender::with_default_timeout(store),
        auth: AuthConfig::new(SECRET),
    }
}

/// Candidate source that either stalls past any deadline or fails outright
struct BrokenStore {
    stall: bool,
}

#[async_trait]
impl OpportunityStore for BrokenStore {
    async fn find_candidates(&self, _query: &CandidateQuery) -> Result<Vec<Opportunity>, StoreError> {
        if self.stall {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn list(&self) -> Result<Vec<Opportunity>, StoreError> {
        Ok(Vec::new())
    }

    async fn get(&self, _id: Uuid) -> Result<Option<Opportunity>, StoreError> {
        Ok(None)
    }

    async fn create(&self, _opportunity: NewOpportunity) -> Result<Opportunity, StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }

    async fn update(&self, _id: Uuid, _patch: OpportunityPatch) -> Result<Option<Opportunity>, StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, StoreError> {
        Err(StoreError::Unavailable("read-only".to_string()))
    }
}

#[actix_web::test]
async fn test_recommended_ranks_by_overlap() {
    let user = create_user(Role::User, &["React", "node.js"], &["ui/ux"]);
    let store = Arc::new(InMemoryStore::new());
    store.upsert_user(user.clone()).unwrap();
    for opportunity in [
        create_opportunity("A", &["React", "GraphQL"], &["remote"]),
        create_opportunity("B", &["node.js", "react"], &["UI/UX"]),
        create_opportunity("C", &["java"], &[]),
    ] {
        store.insert_opportunity(opportunity).unwrap();
    }
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::get()
        .uri("/api/opportunities/recommended")
        .insert_header(bearer(&user))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "success");
    assert_eq!(body["results"], 2);
    assert!(body.get("message").is_none());
    let recommended = body["data"]["recommendedOpportunities"].as_array().unwrap();
    assert_eq!(recommended[0]["title"], "B");
    assert_eq!(recommended[1]["title"], "A");
    assert!(recommended[0].get("score").is_none());
}

#[actix_web::test]
async fn test_recommended_incomplete_profile() {
    let user = create_user(Role::User, &[], &["  "]);
    let store = Arc::new(InMemoryStore::with_records(
        vec![create_opportunity("A", &["react"], &[])],
        vec![user.clone()],
    ));
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::get()
        .uri("/api/opportunities/recommended")
        .insert_header(bearer(&user))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["results"], 0);
    assert_eq!(body["message"], PROFILE_INCOMPLETE_MESSAGE);
    assert_eq!(body["data"]["recommendedOpportunities"], json!([]));
}

#[actix_web::test]
async fn test_recommended_requires_token() {
    let store = Arc::new(InMemoryStore::new());
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::get()
        .uri("/api/opportunities/recommended")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/opportunities/recommended")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_unknown_user_rejected() {
    let ghost = create_user(Role::User, &["rust"], &[]);
    let store = Arc::new(InMemoryStore::new());
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::get()
        .uri("/api/opportunities/recommended")
        .insert_header(bearer(&ghost))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_manager_creates_normalized_opportunity() {
    let manager = create_user(Role::Manager, &[], &[]);
    let store = Arc::new(InMemoryStore::with_records(vec![], vec![manager.clone()]));
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::post()
        .uri("/api/opportunities")
        .insert_header(bearer(&manager))
        .set_json(json!({
            "title": "Rust Developer",
            "description": "Systems work",
            "company": "Acme",
            "requiredSkills": ["Rust", " rust ", "Tokio"],
            "tags": ["Remote", ""],
            "level": "senior",
            "type": "contract",
            "salary": 120000
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let opportunity = &body["data"]["opportunity"];
    assert_eq!(opportunity["requiredSkills"], json!(["rust", "tokio"]));
    assert_eq!(opportunity["tags"], json!(["remote"]));
    assert_eq!(opportunity["level"], "senior");
    assert_eq!(opportunity["type"], "contract");
    assert_eq!(opportunity["createdBy"], json!(manager.id));
}

#[actix_web::test]
async fn test_plain_user_cannot_create() {
    let user = create_user(Role::User, &["rust"], &[]);
    let store = Arc::new(InMemoryStore::with_records(vec![], vec![user.clone()]));
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::post()
        .uri("/api/opportunities")
        .insert_header(bearer(&user))
        .set_json(json!({
            "title": "Nope",
            "description": "d",
            "company": "c",
            "requiredSkills": ["rust"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_create_validation_error() {
    let admin = create_user(Role::Admin, &[], &[]);
    let store = Arc::new(InMemoryStore::with_records(vec![], vec![admin.clone()]));
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::post()
        .uri("/api/opportunities")
        .insert_header(bearer(&admin))
        .set_json(json!({
            "title": "",
            "description": "d",
            "company": "c",
            "requiredSkills": []
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "validation_failed");
    assert_eq!(body["status_code"], 400);
}

#[actix_web::test]
async fn test_create_rejects_blank_values() {
    let admin = create_user(Role::Admin, &[], &[]);
    let store = Arc::new(InMemoryStore::with_records(vec![], vec![admin.clone()]));
    let app = test::init_service(App::new().configure(configure_app(app_state(store.clone())))).await;

    for body in [
        json!({ "title": "   ", "description": "d", "company": "Acme", "requiredSkills": ["rust"] }),
        json!({ "title": "Dev", "description": "d", "company": "  ", "requiredSkills": ["rust"] }),
        json!({ "title": "Dev", "description": "d", "company": "Acme", "requiredSkills": ["  ", ""] }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/opportunities")
            .insert_header(bearer(&admin))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    assert!(store.list().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_patch_rejects_blank_title() {
    let admin = create_user(Role::Admin, &[], &[]);
    let existing = create_opportunity("kept", &["rust"], &[]);
    let store = Arc::new(InMemoryStore::with_records(vec![existing.clone()], vec![admin.clone()]));
    let app = test::init_service(App::new().configure(configure_app(app_state(store.clone())))).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/api/opportunities/{}", existing.id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "title": " " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let stored = store.get(existing.id).await.unwrap().unwrap();
    assert_eq!(stored.title, "kept");
}

#[actix_web::test]
async fn test_recommended_timeout_is_service_unavailable() {
    let user = create_user(Role::User, &["rust"], &[]);
    let store = Arc::new(InMemoryStore::with_records(vec![], vec![user.clone()]));
    let state = AppState {
        recommender: Recommender::new(Arc::new(BrokenStore { stall: true }), Duration::from_millis(50)),
        ..app_state(store)
    };
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/opportunities/recommended")
        .insert_header(bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "timeout");
    assert_eq!(body["status_code"], 503);
}

#[actix_web::test]
async fn test_recommended_storage_failure() {
    let user = create_user(Role::User, &["rust"], &[]);
    let store = Arc::new(InMemoryStore::with_records(vec![], vec![user.clone()]));
    let state = AppState {
        recommender: Recommender::with_default_timeout(Arc::new(BrokenStore { stall: false })),
        ..app_state(store)
    };
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let req = test::TestRequest::get()
        .uri("/api/opportunities/recommended")
        .insert_header(bearer(&user))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "storage_error");
}

#[actix_web::test]
async fn test_catalogue_crud() {
    let admin = create_user(Role::Admin, &[], &[]);
    let older = create_opportunity("older", &["rust"], &[]);
    let mut newer = create_opportunity("newer", &["go"], &[]);
    newer.created_at = older.created_at + chrono::Duration::seconds(10);
    let store = Arc::new(InMemoryStore::with_records(
        vec![older.clone(), newer.clone()],
        vec![admin.clone()],
    ));
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    // list is public and newest first
    let req = test::TestRequest::get().uri("/api/opportunities").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["results"], 2);
    assert_eq!(body["data"]["opportunities"][0]["title"], "newer");

    // get by id
    let req = test::TestRequest::get()
        .uri(&format!("/api/opportunities/{}", older.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["opportunity"]["title"], "older");

    // patch normalizes tags
    let req = test::TestRequest::patch()
        .uri(&format!("/api/opportunities/{}", older.id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "tags": ["Remote", "REMOTE"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["opportunity"]["tags"], json!(["remote"]));

    // delete, then 404
    let req = test::TestRequest::delete()
        .uri(&format!("/api/opportunities/{}", older.id))
        .insert_header(bearer(&admin))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/opportunities/{}", older.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_malformed_id_is_bad_request() {
    let store = Arc::new(InMemoryStore::new());
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::get().uri("/api/opportunities/not-a-uuid").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_health() {
    let store = Arc::new(InMemoryStore::new());
    let app = test::init_service(App::new().configure(configure_app(app_state(store)))).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["status"], "healthy");
}
