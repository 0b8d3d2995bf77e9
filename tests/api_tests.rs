//! HTTP tests against the in-memory backend
//!
//! Every test builds its own server, so state never leaks between tests.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;
use troca_comigo::config::AppConfig;
use troca_comigo::core::service::DataService;
use troca_comigo::entities::MarketplaceModule;
use troca_comigo::server::ServerBuilder;
use troca_comigo::storage::Stores;

const API: &str = "/api/v1";
const PASSWORD: &str = "segredo123";

// =============================================================================
// Helpers
// =============================================================================

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_config(AppConfig::default())
        .with_stores(Stores::in_memory())
        .register_module(MarketplaceModule)
        .expect("Failed to register module")
        .build()
        .expect("Failed to build app");

    TestServer::new(app)
}

fn url(path: &str) -> String {
    format!("{}{}", API, path)
}

async fn create_user(server: &TestServer, name: &str, email: &str, role: &str) -> i64 {
    let response = server
        .post(&url("/users"))
        .json(&json!({
            "full_name": name,
            "email": email,
            "password": PASSWORD,
            "role": role
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}

async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post(&url("/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()["token"].as_str().unwrap().to_string()
}

async fn create_skill(server: &TestServer, user_id: i64, name: &str) -> i64 {
    let response = server
        .post(&url("/skills"))
        .json(&json!({
            "name": name,
            "category": "TECHNOLOGY",
            "level": "ADVANCED",
            "user_id": user_id
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}

async fn create_exchange(server: &TestServer, mentor: i64, student: i64, skill: i64) -> i64 {
    let response = server
        .post(&url("/exchanges"))
        .json(&json!({
            "mentor_id": mentor,
            "student_id": student,
            "skill_id": skill,
            "scheduled_date": "2026-11-10T18:00:00Z",
            "duration_hours": 2.0,
            "credits_value": 2.0
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"]["id"].as_i64().unwrap()
}

fn rels(links: &Value) -> Vec<String> {
    links
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["rel"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_and_liveness() {
        let server = create_test_server();

        for path in ["/health", "/health/live"] {
            let response = server.get(path).await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["status"], "ok");
            assert_eq!(body["service"], "troca-comigo");
        }
    }

    #[tokio::test]
    async fn test_readiness_reports_storage() {
        let server = create_test_server();

        let response = server.get("/health/ready").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["checks"]["storage"], "ok");
        assert_eq!(body["checks"]["backend"], "memory");
    }
}

// =============================================================================
// Users
// =============================================================================

mod user_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_user_returns_resource() {
        let server = create_test_server();

        let response = server
            .post(&url("/users"))
            .json(&json!({
                "full_name": "Ana Souza",
                "email": "Ana@Example.com",
                "password": PASSWORD,
                "timezone": "America/Sao_Paulo"
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.header("location"), "/api/v1/users/1");

        let body: Value = response.json();
        assert_eq!(body["data"]["id"], 1);
        assert_eq!(body["data"]["email"], "ana@example.com");
        assert_eq!(body["data"]["role"], "USER");
        assert_eq!(body["data"]["time_credits"], 10.0);
        assert!(body["data"].get("password_hash").is_none());
        assert!(body["data"].get("password").is_none());
        assert_eq!(rels(&body["links"]), vec!["self", "update", "delete"]);
        assert_eq!(body["links"][0]["href"], "/api/v1/users/1");
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let server = create_test_server();
        create_user(&server, "Ana", "ana@example.com", "USER").await;

        let response = server
            .post(&url("/users"))
            .json(&json!({
                "full_name": "Outra Ana",
                "email": "ANA@example.com",
                "password": PASSWORD
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_invalid_fields_are_listed() {
        let server = create_test_server();

        let response = server
            .post(&url("/users"))
            .json(&json!({
                "full_name": "",
                "email": "nope",
                "password": "123"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        let fields: Vec<&str> = body["details"]["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"full_name"));
        assert!(fields.contains(&"email"));
        assert!(fields.contains(&"password"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let server = create_test_server();

        let response = server
            .post(&url("/users"))
            .text("{ not json")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], "INVALID_PAYLOAD");
    }

    #[tokio::test]
    async fn test_unknown_and_invalid_ids() {
        let server = create_test_server();

        let missing = server.get(&url("/users/99")).await;
        missing.assert_status(StatusCode::NOT_FOUND);
        let body: Value = missing.json();
        assert_eq!(body["code"], "ENTITY_NOT_FOUND");
        assert_eq!(body["details"]["entity_type"], "user");
        assert_eq!(body["details"]["id"], 99);

        let invalid = server.get(&url("/users/abc")).await;
        invalid.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(invalid.json::<Value>()["code"], "INVALID_ENTITY_ID");
    }

    #[tokio::test]
    async fn test_update_user_and_password() {
        let server = create_test_server();
        let id = create_user(&server, "Ana", "ana@example.com", "USER").await;

        let response = server
            .put(&url(&format!("/users/{}", id)))
            .json(&json!({
                "full_name": "Ana Lima",
                "email": "ana.lima@example.com",
                "password": "nova-senha",
                "bio": "Rust mentor"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["full_name"], "Ana Lima");
        assert_eq!(body["data"]["email"], "ana.lima@example.com");
        assert_eq!(body["data"]["bio"], "Rust mentor");
        assert_eq!(body["data"]["time_credits"], 10.0);

        login(&server, "ana.lima@example.com", "nova-senha").await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_with_same_email() {
        let stores = Stores::in_memory();
        let app = ServerBuilder::new()
            .with_config(AppConfig::default())
            .with_stores(stores.clone())
            .register_module(MarketplaceModule)
            .unwrap()
            .build()
            .unwrap();

        let mut handles = vec![];
        for i in 0..8 {
            let app = app.clone();
            handles.push(tokio::spawn(async move {
                let body = json!({
                    "full_name": format!("Ana {}", i),
                    "email": "ana@example.com",
                    "password": PASSWORD
                });
                let request = Request::builder()
                    .method("POST")
                    .uri(url("/users"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap();
                app.oneshot(request).await.unwrap().status()
            }));
        }

        let mut statuses = vec![];
        for handle in handles {
            statuses.push(handle.await.unwrap());
        }
        let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
        assert_eq!(created, 1, "statuses: {:?}", statuses);
        assert!(
            statuses
                .iter()
                .all(|s| *s == StatusCode::CREATED || *s == StatusCode::CONFLICT)
        );

        let same = stores.users.search("email", "ana@example.com").await.unwrap();
        assert_eq!(same.len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let server = create_test_server();
        create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;

        let response = server
            .put(&url(&format!("/users/{}", bruno)))
            .json(&json!({ "full_name": "Bruno", "email": "ana@example.com" }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }
}

// =============================================================================
// Auth
// =============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_issues_bearer_token() {
        let server = create_test_server();
        create_user(&server, "Ana", "ana@example.com", "USER").await;

        let response = server
            .post(&url("/auth/login"))
            .json(&json!({ "email": "ana@example.com", "password": PASSWORD }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["type"], "Bearer");
        assert_eq!(body["expires_in"], 7200);
        assert!(!body["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password_and_unknown_user() {
        let server = create_test_server();
        create_user(&server, "Ana", "ana@example.com", "USER").await;

        for (email, password) in [
            ("ana@example.com", "errada"),
            ("ghost@example.com", PASSWORD),
        ] {
            let response = server
                .post(&url("/auth/login"))
                .json(&json!({ "email": email, "password": password }))
                .await;
            response.assert_status(StatusCode::UNAUTHORIZED);
            assert_eq!(response.json::<Value>()["code"], "INVALID_CREDENTIALS");
        }
    }

    #[tokio::test]
    async fn test_delete_requires_admin() {
        let server = create_test_server();
        create_user(&server, "Admin", "admin@example.com", "ADMIN").await;
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let path = url(&format!("/users/{}", ana));

        let anonymous = server.delete(&path).await;
        anonymous.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(anonymous.json::<Value>()["code"], "UNAUTHORIZED");

        let user_token = login(&server, "ana@example.com", PASSWORD).await;
        let forbidden = server.delete(&path).authorization_bearer(&user_token).await;
        forbidden.assert_status(StatusCode::FORBIDDEN);

        let admin_token = login(&server, "admin@example.com", PASSWORD).await;
        server
            .delete(&path)
            .authorization_bearer(&admin_token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
        server
            .delete(&path)
            .authorization_bearer(&admin_token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let server = create_test_server();

        let response = server
            .delete(&url("/skills/1"))
            .authorization_bearer("not.a.jwt")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["code"], "INVALID_TOKEN");
    }
}

// =============================================================================
// Skills and pagination
// =============================================================================

mod skill_tests {
    use super::*;

    #[tokio::test]
    async fn test_skill_requires_existing_user() {
        let server = create_test_server();

        let response = server
            .post(&url("/skills"))
            .json(&json!({ "name": "Rust", "user_id": 42 }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["code"], "REFERENCE_NOT_FOUND");
        assert_eq!(body["details"]["field"], "user_id");
        assert_eq!(body["details"]["id"], 42);
    }

    #[tokio::test]
    async fn test_skill_defaults_and_update() {
        let server = create_test_server();
        let user = create_user(&server, "Ana", "ana@example.com", "USER").await;

        let created = server
            .post(&url("/skills"))
            .json(&json!({ "name": "Inglês", "user_id": user }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        assert_eq!(body["data"]["category"], "OTHER");
        assert_eq!(body["data"]["level"], "BEGINNER");
        assert_eq!(body["data"]["is_offering"], true);
        assert_eq!(body["data"]["is_seeking"], false);

        let id = body["data"]["id"].as_i64().unwrap();
        let updated = server
            .put(&url(&format!("/skills/{}", id)))
            .json(&json!({
                "name": "Inglês avançado",
                "category": "LANGUAGES",
                "level": "EXPERT",
                "hourly_rate": 1.5,
                "user_id": user
            }))
            .await;
        updated.assert_status_ok();
        let body: Value = updated.json();
        assert_eq!(body["data"]["category"], "LANGUAGES");
        assert_eq!(body["data"]["hourly_rate"], 1.5);
    }

    #[tokio::test]
    async fn test_listing_pages_and_links() {
        let server = create_test_server();
        let user = create_user(&server, "Ana", "ana@example.com", "USER").await;
        for name in ["Rust", "Go", "SQL"] {
            create_skill(&server, user, name).await;
        }

        let first = server
            .get(&url("/skills"))
            .add_query_param("page", 1)
            .add_query_param("limit", 2)
            .await;
        first.assert_status_ok();
        let body: Value = first.json();
        assert_eq!(body["total"], 3);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
        assert_eq!(body["items"][0]["data"]["name"], "Rust");
        assert_eq!(rels(&body["items"][0]["links"]), vec!["self"]);
        assert_eq!(rels(&body["_links"]), vec!["self", "next"]);
        assert_eq!(body["_links"][1]["href"], "/api/v1/skills?page=2&limit=2");

        let second = server.get(&url("/skills?page=2&tamanho=2")).await;
        let body: Value = second.json();
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(rels(&body["_links"]), vec!["self", "prev"]);
    }

    #[tokio::test]
    async fn test_limit_is_clamped_and_bad_query_rejected() {
        let server = create_test_server();

        let body: Value = server.get(&url("/skills?limit=1000&page=0")).await.json();
        assert_eq!(body["limit"], 100);
        assert_eq!(body["page"], 1);
        assert_eq!(body["total_pages"], 0);

        let bad = server.get(&url("/skills?page=abc")).await;
        bad.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(bad.json::<Value>()["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_negative_paging_values_are_clamped() {
        let server = create_test_server();
        let user = create_user(&server, "Ana", "ana@example.com", "USER").await;
        create_skill(&server, user, "Rust").await;

        for query in ["page=-2", "limit=-5", "tamanho=-5"] {
            let response = server.get(&url(&format!("/skills?{}", query))).await;
            response.assert_status_ok();
            let body: Value = response.json();
            assert_eq!(body["page"], 1);
            assert_eq!(body["items"].as_array().unwrap().len(), 1);
        }

        let body: Value = server.get(&url("/skills?limit=-5")).await.json();
        assert_eq!(body["limit"], 1);
    }

    #[tokio::test]
    async fn test_page_beyond_u64_is_empty_not_an_error() {
        let server = create_test_server();
        let user = create_user(&server, "Ana", "ana@example.com", "USER").await;
        create_skill(&server, user, "Rust").await;

        let response = server
            .get(&url("/skills?page=18446744073709551615"))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 1);
        assert!(body["items"].as_array().unwrap().is_empty());
        assert_eq!(rels(&body["_links"]), vec!["self", "prev"]);

        server
            .get(&url(&format!("/skills/user/{}?page=99999999999999999999&limit=100", user)))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_skills_by_user() {
        let server = create_test_server();
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        create_skill(&server, ana, "Rust").await;
        create_skill(&server, bruno, "Go").await;
        create_skill(&server, ana, "SQL").await;

        let response = server.get(&url(&format!("/skills/user/{}", ana))).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["total"], 2);
        assert_eq!(
            body["_links"][0]["href"],
            format!("/api/v1/skills/user/{}?page=1&limit=10", ana)
        );

        server
            .get(&url("/skills/user/abc"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

// =============================================================================
// Exchanges
// =============================================================================

mod exchange_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_exchange_fills_skill_name() {
        let server = create_test_server();
        let mentor = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let student = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let skill = create_skill(&server, mentor, "Rust").await;

        let id = create_exchange(&server, mentor, student, skill).await;
        let body: Value = server.get(&url(&format!("/exchanges/{}", id))).await.json();
        assert_eq!(body["data"]["skill_name"], "Rust");
        assert_eq!(body["data"]["status"], "SCHEDULED");
        assert!(rels(&body["links"]).contains(&"update-status".to_string()));
    }

    #[tokio::test]
    async fn test_exchange_references_are_checked() {
        let server = create_test_server();
        let mentor = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let skill = create_skill(&server, mentor, "Rust").await;

        let response = server
            .post(&url("/exchanges"))
            .json(&json!({
                "mentor_id": mentor,
                "student_id": 77,
                "skill_id": skill,
                "scheduled_date": "2026-11-10T18:00:00Z"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["details"]["field"], "student_id");
    }

    #[tokio::test]
    async fn test_status_patch_accepts_both_shapes() {
        let server = create_test_server();
        let mentor = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let student = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let skill = create_skill(&server, mentor, "Rust").await;
        let id = create_exchange(&server, mentor, student, skill).await;
        let path = url(&format!("/exchanges/{}/status", id));

        let bare = server.patch(&path).json(&json!("CONFIRMED")).await;
        bare.assert_status_ok();
        assert_eq!(bare.json::<Value>()["data"]["status"], "CONFIRMED");

        let wrapped = server.patch(&path).json(&json!({ "status": "COMPLETED" })).await;
        wrapped.assert_status_ok();
        assert_eq!(wrapped.json::<Value>()["data"]["status"], "COMPLETED");

        server
            .patch(&path)
            .json(&json!("FINISHED"))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .patch(&url("/exchanges/999/status"))
            .json(&json!("CONFIRMED"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_put_keeps_status_when_omitted() {
        let server = create_test_server();
        let mentor = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let student = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let skill = create_skill(&server, mentor, "Rust").await;
        let id = create_exchange(&server, mentor, student, skill).await;

        server
            .patch(&url(&format!("/exchanges/{}/status", id)))
            .json(&json!("IN_PROGRESS"))
            .await
            .assert_status_ok();

        let response = server
            .put(&url(&format!("/exchanges/{}", id)))
            .json(&json!({
                "mentor_id": mentor,
                "student_id": student,
                "skill_id": skill,
                "skill_name": "Rust async",
                "scheduled_date": "2026-11-12T18:00:00Z",
                "notes": "bring a laptop"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "IN_PROGRESS");
        assert_eq!(body["data"]["skill_name"], "Rust async");
        assert_eq!(body["data"]["duration_hours"], 1.0);
    }

    #[tokio::test]
    async fn test_mentor_and_student_listings() {
        let server = create_test_server();
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let skill = create_skill(&server, ana, "Rust").await;
        create_exchange(&server, ana, bruno, skill).await;
        create_exchange(&server, ana, bruno, skill).await;

        let mentor: Value = server
            .get(&url(&format!("/exchanges/mentor/{}", ana)))
            .await
            .json();
        assert_eq!(mentor["total"], 2);

        let student: Value = server
            .get(&url(&format!("/exchanges/student/{}", ana)))
            .await
            .json();
        assert_eq!(student["total"], 0);
    }
}

// =============================================================================
// Evaluations
// =============================================================================

mod evaluation_tests {
    use super::*;

    #[tokio::test]
    async fn test_evaluation_lifecycle() {
        let server = create_test_server();
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let skill = create_skill(&server, ana, "Rust").await;
        let exchange = create_exchange(&server, ana, bruno, skill).await;

        let created = server
            .post(&url("/evaluations"))
            .json(&json!({
                "exchange_id": exchange,
                "evaluator_id": bruno,
                "evaluated_id": ana,
                "rating": 5,
                "comment": "Excelente"
            }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let id = created.json::<Value>()["data"]["id"].as_i64().unwrap();

        let updated = server
            .put(&url(&format!("/evaluations/{}", id)))
            .json(&json!({ "rating": 4, "evaluated_id": bruno }))
            .await;
        updated.assert_status_ok();
        let body: Value = updated.json();
        assert_eq!(body["data"]["rating"], 4);
        assert_eq!(body["data"]["evaluated_id"], ana);
        assert!(body["data"]["comment"].is_null());

        let about_ana: Value = server
            .get(&url(&format!("/evaluations/evaluated/{}", ana)))
            .await
            .json();
        assert_eq!(about_ana["total"], 1);

        let for_exchange: Value = server
            .get(&url(&format!("/evaluations/exchange/{}", exchange)))
            .await
            .json();
        assert_eq!(for_exchange["total"], 1);
    }

    #[tokio::test]
    async fn test_rating_out_of_range() {
        let server = create_test_server();

        let response = server
            .post(&url("/evaluations"))
            .json(&json!({
                "exchange_id": 1,
                "evaluator_id": 1,
                "evaluated_id": 2,
                "rating": 6
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["code"], "VALIDATION_ERROR");
    }
}

// =============================================================================
// Transactions
// =============================================================================

mod transaction_tests {
    use super::*;

    async fn create_transaction(server: &TestServer, sender: i64, recipient: i64) -> Value {
        let response = server
            .post(&url("/transactions"))
            .json(&json!({
                "sender_id": sender,
                "recipient_id": recipient,
                "credits": 2.0,
                "type": "ADJUSTMENT",
                "description": "manual"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json()
    }

    #[tokio::test]
    async fn test_create_and_settle() {
        let server = create_test_server();
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;

        let body = create_transaction(&server, ana, bruno).await;
        assert_eq!(body["data"]["type"], "ADJUSTMENT");
        assert_eq!(body["data"]["status"], "PENDING");
        assert!(body["data"]["exchange_id"].is_null());
        assert_eq!(
            rels(&body["links"]),
            vec!["self", "update", "delete", "complete", "refund"]
        );

        let id = body["data"]["id"].as_i64().unwrap();
        let completed = server
            .patch(&url(&format!("/transactions/{}/complete", id)))
            .await;
        completed.assert_status_ok();
        assert_eq!(completed.json::<Value>()["data"]["status"], "COMPLETED");

        let refunded = server
            .patch(&url(&format!("/transactions/{}/refund", id)))
            .await;
        refunded.assert_status_ok();
        assert_eq!(refunded.json::<Value>()["data"]["status"], "REFUNDED");

        server
            .patch(&url("/transactions/999/complete"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_transactions_by_user_match_either_side() {
        let server = create_test_server();
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let carla = create_user(&server, "Carla", "carla@example.com", "USER").await;

        create_transaction(&server, ana, bruno).await;
        create_transaction(&server, bruno, ana).await;
        create_transaction(&server, bruno, carla).await;

        let body: Value = server
            .get(&url(&format!("/transactions/user/{}", ana)))
            .await
            .json();
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_unknown_exchange_reference() {
        let server = create_test_server();
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;

        let response = server
            .post(&url("/transactions"))
            .json(&json!({
                "exchange_id": 5,
                "sender_id": ana,
                "recipient_id": bruno,
                "credits": 1.0
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["details"]["field"], "exchange_id");
    }
}

// =============================================================================
// Delete rules
// =============================================================================

mod delete_rule_tests {
    use super::*;

    async fn admin_token(server: &TestServer) -> String {
        create_user(server, "Admin", "admin@example.com", "ADMIN").await;
        login(server, "admin@example.com", PASSWORD).await
    }

    #[tokio::test]
    async fn test_user_in_an_exchange_cannot_be_deleted() {
        let server = create_test_server();
        let token = admin_token(&server).await;
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let skill = create_skill(&server, ana, "Rust").await;
        let exchange = create_exchange(&server, ana, bruno, skill).await;

        for user in [ana, bruno] {
            let response = server
                .delete(&url(&format!("/users/{}", user)))
                .authorization_bearer(&token)
                .await;
            response.assert_status(StatusCode::CONFLICT);
            let body: Value = response.json();
            assert_eq!(body["code"], "CONFLICT");
            assert_eq!(body["details"]["constraint"], "fk_exchanges_user");
        }

        server
            .get(&url(&format!("/users/{}", ana)))
            .await
            .assert_status_ok();
        server
            .get(&url(&format!("/skills/{}", skill)))
            .await
            .assert_status_ok();
        server
            .get(&url(&format!("/exchanges/{}", exchange)))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_user_in_a_transaction_cannot_be_deleted() {
        let server = create_test_server();
        let token = admin_token(&server).await;
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        server
            .post(&url("/transactions"))
            .json(&json!({ "sender_id": ana, "recipient_id": bruno, "credits": 1.0 }))
            .await
            .assert_status(StatusCode::CREATED);

        server
            .delete(&url(&format!("/users/{}", bruno)))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_deleting_user_removes_their_skills() {
        let server = create_test_server();
        let token = admin_token(&server).await;
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let skill = create_skill(&server, ana, "Rust").await;

        server
            .delete(&url(&format!("/users/{}", ana)))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&url(&format!("/skills/{}", skill)))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deleting_skill_cascades_through_exchanges() {
        let server = create_test_server();
        let token = admin_token(&server).await;
        let ana = create_user(&server, "Ana", "ana@example.com", "USER").await;
        let bruno = create_user(&server, "Bruno", "bruno@example.com", "USER").await;
        let skill = create_skill(&server, ana, "Rust").await;
        let exchange = create_exchange(&server, ana, bruno, skill).await;

        let evaluation = server
            .post(&url("/evaluations"))
            .json(&json!({
                "exchange_id": exchange,
                "evaluator_id": bruno,
                "evaluated_id": ana,
                "rating": 5
            }))
            .await;
        evaluation.assert_status(StatusCode::CREATED);
        let evaluation = evaluation.json::<Value>()["data"]["id"].as_i64().unwrap();

        let transaction = server
            .post(&url("/transactions"))
            .json(&json!({
                "exchange_id": exchange,
                "sender_id": bruno,
                "recipient_id": ana,
                "credits": 2.0
            }))
            .await;
        transaction.assert_status(StatusCode::CREATED);
        let transaction = transaction.json::<Value>()["data"]["id"].as_i64().unwrap();

        server
            .delete(&url(&format!("/skills/{}", skill)))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&url(&format!("/exchanges/{}", exchange)))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&url(&format!("/evaluations/{}", evaluation)))
            .await
            .assert_status(StatusCode::NOT_FOUND);

        let detached = server
            .get(&url(&format!("/transactions/{}", transaction)))
            .await;
        detached.assert_status_ok();
        assert!(detached.json::<Value>()["data"]["exchange_id"].is_null());
    }

    #[tokio::test]
    async fn test_deleting_missing_record_is_not_found() {
        let server = create_test_server();
        let token = admin_token(&server).await;

        server
            .delete(&url("/users/999"))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
