use actix_web::{test, web, App};
use blog_server::handlers::{posts, users};
use blog_server::{AppState, DbOperations, Settings};
use chrono::DateTime;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

// Builds app state around a lazy pool: nothing here dials the database, so
// these tests run without a Postgres instance.
fn lazy_state() -> web::Data<AppState> {
    let config = Settings::new().expect("Failed to load config");
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database.url)
        .expect("Failed to create lazy pool");

    web::Data::new(AppState {
        config: Arc::new(config),
        db: DbOperations::new(Arc::new(pool)),
    })
}

#[actix_web::test]
async fn test_health_check() {
    let app = test::init_service(
        App::new().route("/health", web::get().to(blog_server::health_check)),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());

    let body = test::read_body(resp).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "healthy");
    assert!(DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
}

#[actix_web::test]
async fn test_non_numeric_user_id_is_a_client_error() {
    let app = test::init_service(
        App::new()
            .app_data(lazy_state())
            .route("/users/{user_id}", web::get().to(users::get_user)),
    )
    .await;

    // Path extraction fails before the handler runs, so the pool is never hit
    let req = test::TestRequest::get().uri("/users/abc").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_client_error());
}

#[actix_web::test]
async fn test_malformed_post_body_is_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(lazy_state())
            .route("/posts", web::post().to(posts::create_post)),
    )
    .await;

    // Missing content and user_id
    let req = test::TestRequest::post()
        .uri("/posts")
        .set_json(serde_json::json!({ "title": "only a title" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}
