//! Database service layer
//!
//! This module provides a high-level interface to database operations

use sqlx::{Postgres, Transaction};
use crate::database::{DatabasePool, GroupRepository, EventRepository};
use crate::utils::errors::SignMeUpError;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub groups: GroupRepository,
    pub events: EventRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            groups: GroupRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction for a multi-statement write
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, SignMeUpError> {
        Ok(self.pool.begin().await?)
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), SignMeUpError> {
        crate::database::health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::{create_lazy_pool, DatabaseConfig};

    #[tokio::test]
    async fn test_database_service_creation() {
        let pool = create_lazy_pool(&DatabaseConfig::default()).unwrap();
        let service = DatabaseService::new(pool);
        assert!(!service.pool().is_closed());
    }
}
