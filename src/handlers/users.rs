use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{error, info};

use crate::error::{found_or, AppError};
use crate::AppState;

pub const USER_NOT_FOUND: &str = "User don't found🥰";

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

pub async fn create_user(
    req: web::Json<CreateUserRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received create user request for username: {}", req.username);
    match state.db.create_user(&req.username).await {
        Ok(user) => {
            info!("Created user {}", user.id);
            Ok(HttpResponse::Created().finish())
        }
        Err(e) => {
            error!("Failed to create user {}: {}", req.username, e);
            Err(e)
        }
    }
}

pub async fn get_user(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    let user = found_or(state.db.get_user_by_id(user_id).await?, USER_NOT_FOUND)?;
    Ok(HttpResponse::Ok().json(user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_request_requires_username() {
        assert!(serde_json::from_str::<CreateUserRequest>("{}").is_err());

        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username": "alice"}"#).expect("valid body");
        assert_eq!(req.username, "alice");
    }
}
