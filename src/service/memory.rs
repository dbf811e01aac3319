//! In-process `UserStore`. Ids start at 1 and are never reused, like a SERIAL column.

use super::UserStore;
use crate::error::AppError;
use crate::models::{User, UserInput};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    last_id: i32,
    rows: BTreeMap<i32, User>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.inner.read().await.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, input: &UserInput) -> Result<User, AppError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let user = input.clone().into_user(inner.last_id);
        inner.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, input: &UserInput) -> Result<u64, AppError> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(row) => {
                row.name = input.name.clone();
                row.email = input.email.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> Result<u64, AppError> {
        Ok(self.inner.write().await.rows.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
