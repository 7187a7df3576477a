use actix_web::{web, App, HttpServer};
use blog_server::handlers::{posts, users};
use blog_server::{health_check, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[actix_web::main]
async fn main() -> blog_server::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    // Initialize application state
    let state = AppState::new(config.clone()).await?;

    // Create the tables before accepting traffic
    state.db.init_schema().await?;
    info!("Database schema ready");

    // Create and bind TCP listener
    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;

    info!(
        "Starting server at {}:{}",
        config.server.host, config.server.port
    );

    let state = web::Data::new(state);

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/health", web::get().to(health_check))
            .route("/users", web::post().to(users::create_user))
            .route("/users/{user_id}", web::get().to(users::get_user))
            .route("/posts", web::post().to(posts::create_post))
            .route("/posts/{post_id}", web::get().to(posts::get_post))
            .route("/posts/{post_id}", web::delete().to(posts::delete_post))
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .map_err(|e| AppError::InternalError(e.to_string()))?;

    Ok(())
}
