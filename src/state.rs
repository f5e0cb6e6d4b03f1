use crate::users::repo::{PgUserStore, UserStore};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn init(db: PgPool) -> Self {
        let users = Arc::new(PgUserStore::new(db)) as Arc<dyn UserStore>;
        Self::from_parts(users)
    }

    pub fn from_parts(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::users::repo::MemoryUserStore;

        Self::from_parts(Arc::new(MemoryUserStore::default()))
    }
}
