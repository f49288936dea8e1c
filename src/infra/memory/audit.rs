use async_trait::async_trait;
use time::OffsetDateTime;

use crate::application::repos::{AuditRepo, RepoError};
use crate::domain::entities::AuditRecord;

use super::MemoryRepositories;

#[async_trait]
impl AuditRepo for MemoryRepositories {
    async fn append_log(&self, record: AuditRecord) -> Result<(), RepoError> {
        self.audit.write().await.push(record);
        Ok(())
    }

    async fn list_since(&self, since: OffsetDateTime) -> Result<Vec<AuditRecord>, RepoError> {
        let records = self.audit.read().await;
        Ok(records
            .iter()
            .filter(|record| record.created_at >= since)
            .cloned()
            .collect())
    }
}
