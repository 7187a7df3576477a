use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool, Postgres, Transaction};

use crate::db::models::{Post, User};
use crate::error::AppError;

// posts.user_id carries no FOREIGN KEY constraint; a post may reference an
// absent user and reads/deletes still behave normally.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS posts (
    id BIGSERIAL PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    user_id BIGINT NOT NULL
);
"#;

#[derive(Clone)]
pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Creates both tables if they do not exist yet. Run once at startup,
    /// before the listener starts accepting requests.
    pub async fn init_schema(&self) -> Result<(), AppError> {
        self.pool.as_ref().execute(SCHEMA).await?;
        Ok(())
    }

    pub async fn begin_transaction(&self) -> Result<Transaction<'_, Postgres>, AppError> {
        Ok(self.pool.as_ref().begin().await?)
    }

    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let mut transaction = self.begin_transaction().await?;

        let result = sqlx::query_as::<_, User>(
            "INSERT INTO users (username) VALUES ($1) RETURNING id, username",
        )
        .bind(username)
        .fetch_one(&mut *transaction)
        .await;

        match result {
            Ok(user) => {
                transaction.commit().await?;
                Ok(user)
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e.into())
            }
        }
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(user)
    }

    pub async fn create_post(
        &self,
        title: &str,
        content: &str,
        user_id: i64,
    ) -> Result<Post, AppError> {
        let mut transaction = self.begin_transaction().await?;

        let result = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, user_id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(user_id)
        .fetch_one(&mut *transaction)
        .await;

        match result {
            Ok(post) => {
                transaction.commit().await?;
                Ok(post)
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e.into())
            }
        }
    }

    pub async fn get_post_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, user_id FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(post)
    }

    /// Looks the post up and deletes it in one transaction. Returns the
    /// deleted row, or `None` when no row matched the id.
    pub async fn delete_post(&self, id: i64) -> Result<Option<Post>, AppError> {
        let mut transaction = self.begin_transaction().await?;

        let found = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, user_id FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *transaction)
        .await;

        let post = match found {
            Ok(Some(post)) => post,
            Ok(None) => {
                transaction.rollback().await?;
                return Ok(None);
            }
            Err(e) => {
                transaction.rollback().await?;
                return Err(e.into());
            }
        };

        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post.id)
            .execute(&mut *transaction)
            .await;

        match deleted {
            Ok(_) => {
                transaction.commit().await?;
                Ok(Some(post))
            }
            Err(e) => {
                transaction.rollback().await?;
                Err(e.into())
            }
        }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}
