use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::{found_or, AppError};
use crate::AppState;

pub const POST_NOT_FOUND: &str = "This post is invalid🥱";
pub const DELETED_POST_NOT_FOUND: &str = "Post was not found🫠";

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

// user_id is taken as-is; nothing checks that the referenced user exists.
pub async fn create_post(
    req: web::Json<CreatePostRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received create post request with title: {}", req.title);
    match state
        .db
        .create_post(&req.title, &req.content, req.user_id)
        .await
    {
        Ok(post) => {
            info!("Created post {}", post.id);
            Ok(HttpResponse::Created().finish())
        }
        Err(e) => {
            error!("Failed to create post {}: {}", req.title, e);
            Err(e)
        }
    }
}

pub async fn get_post(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let post = found_or(state.db.get_post_by_id(post_id).await?, POST_NOT_FOUND)?;
    Ok(HttpResponse::Ok().json(post))
}

pub async fn delete_post(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();
    let post = found_or(state.db.delete_post(post_id).await?, DELETED_POST_NOT_FOUND)?;
    info!("Deleted post {}", post.id);
    Ok(HttpResponse::Ok().finish())
}
