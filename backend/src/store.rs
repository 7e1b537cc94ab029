// src/store.rs

//! Local key/value storage backed by SQLite.

use sqlx::SqlitePool;

use crate::{error::AppError, models::user::UserProfile};

/// Key under which learner records are cached.
pub const USERS_KEY: &str = "gd_all_users";

#[derive(Clone)]
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, sqlx::Error> {
        let row = sqlx::query_as::<_, (String,)>("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    pub async fn put(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Cached learner records; an absent key means no learners yet.
    pub async fn load_users(&self) -> Result<Vec<UserProfile>, AppError> {
        let Some(raw) = self.get(USERS_KEY).await? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&raw).map_err(|e| {
            tracing::error!("Corrupt learner records under '{}': {:?}", USERS_KEY, e);
            AppError::InternalServerError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> LocalStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = LocalStore::new(pool);
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    async fn missing_users_key_is_empty() {
        assert!(store().await.load_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn users_are_read_leniently() {
        let store = store().await;
        store
            .put(
                USERS_KEY,
                r#"[{"name":"Sita","email":"sita@example.com","accuracy":72.5,"timeSpent":95},{"name":"Ram"}]"#,
            )
            .await
            .unwrap();

        let users = store.load_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].time_spent, 95);
        assert_eq!(users[1].name, "Ram");
        assert_eq!(users[1].last_active, None);
    }

    #[tokio::test]
    async fn put_overwrites_existing_value() {
        let store = store().await;
        store.put("k", "one").await.unwrap();
        store.put("k", "two").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("two"));
    }

    #[tokio::test]
    async fn corrupt_users_value_is_an_error() {
        let store = store().await;
        store.put(USERS_KEY, "not json").await.unwrap();
        assert!(store.load_users().await.is_err());
    }
}
