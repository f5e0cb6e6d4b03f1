use axum::async_trait;
use sqlx::PgPool;

use crate::users::repo_types::{NewUser, User};

/// Persistence for user rows. Every id-addressed call returns `None` when
/// the row does not exist; each write commits on its own.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self, id: i64) -> Result<Option<User>, sqlx::Error>;
    async fn list(&self) -> Result<Vec<User>, sqlx::Error>;
    async fn insert(&self, new: NewUser) -> Result<User, sqlx::Error>;
    async fn update(&self, id: i64, new: NewUser) -> Result<Option<User>, sqlx::Error>;
    async fn delete(&self, id: i64) -> Result<Option<User>, sqlx::Error>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn get(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }

    async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await
    }

    async fn insert(&self, new: NewUser) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash
            "#,
        )
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .fetch_one(&self.db)
        .await
    }

    async fn update(&self, id: i64, new: NewUser) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
               SET name = $2, email = $3, password_hash = $4
             WHERE id = $1
            RETURNING id, name, email, password_hash
            "#,
        )
        .bind(id)
        .bind(new.name)
        .bind(new.email)
        .bind(new.password_hash)
        .fetch_optional(&self.db)
        .await
    }

    async fn delete(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            DELETE FROM users
             WHERE id = $1
            RETURNING id, name, email, password_hash
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
    }
}

#[cfg(test)]
pub use memory::MemoryUserStore;

#[cfg(test)]
mod memory {
    use std::collections::BTreeMap;

    use axum::async_trait;
    use tokio::sync::Mutex;

    use super::UserStore;
    use crate::users::repo_types::{NewUser, User};

    /// Process-local store with BIGSERIAL-like id assignment.
    #[derive(Default)]
    pub struct MemoryUserStore {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        last_id: i64,
        rows: BTreeMap<i64, User>,
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn get(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
            Ok(self.inner.lock().await.rows.get(&id).cloned())
        }

        async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
            Ok(self.inner.lock().await.rows.values().cloned().collect())
        }

        async fn insert(&self, new: NewUser) -> Result<User, sqlx::Error> {
            let mut inner = self.inner.lock().await;
            inner.last_id += 1;
            let user = User {
                id: inner.last_id,
                name: new.name,
                email: new.email,
                password_hash: new.password_hash,
            };
            inner.rows.insert(user.id, user.clone());
            Ok(user)
        }

        async fn update(&self, id: i64, new: NewUser) -> Result<Option<User>, sqlx::Error> {
            let mut inner = self.inner.lock().await;
            Ok(inner.rows.get_mut(&id).map(|row| {
                row.name = new.name;
                row.email = new.email;
                row.password_hash = new.password_hash;
                row.clone()
            }))
        }

        async fn delete(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
            Ok(self.inner.lock().await.rows.remove(&id))
        }
    }
}
