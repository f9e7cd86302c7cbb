//! Drug service: deadline handling and partial-update merging over the drug
//! repository.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{map_repository_error, with_deadline};
use crate::domain::{DrugRepository, DrugService, ServiceError};
use crate::models::{Drug, DrugForm, NewDrug};

pub struct DrugServiceImpl {
    repository: Arc<dyn DrugRepository>,
    timeout: Duration,
}

impl DrugServiceImpl {
    pub fn new(repository: Arc<dyn DrugRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }
}

#[async_trait]
impl DrugService for DrugServiceImpl {
    async fn list_drugs(&self) -> Result<Vec<Drug>, ServiceError> {
        with_deadline(self.timeout, self.repository.list()).await
    }

    async fn create_drug(&self, new_drug: NewDrug) -> Result<(), ServiceError> {
        with_deadline(self.timeout, self.repository.create(&new_drug)).await
    }

    async fn update_drug(&self, id: i32, form: DrugForm) -> Result<(), ServiceError> {
        // One deadline covers the whole fetch-merge-write flow.
        let result = tokio::time::timeout(self.timeout, async {
            let mut drug = self
                .repository
                .find_by_id(id)
                .await
                .map_err(map_repository_error)?;
            form.apply_to(&mut drug).map_err(ServiceError::Validation)?;
            self.repository
                .update(id, &drug)
                .await
                .map_err(map_repository_error)
        })
        .await;

        match result {
            Err(_) => {
                tracing::warn!("drug update {} exceeded deadline", id);
                Err(ServiceError::Timeout)
            }
            Ok(outcome) => outcome,
        }
    }

    async fn delete_drug(&self, id: i32) -> Result<(), ServiceError> {
        let result = tokio::time::timeout(self.timeout, async {
            self.repository
                .find_by_id(id)
                .await
                .map_err(map_repository_error)?;
            self.repository
                .delete(id)
                .await
                .map_err(map_repository_error)
        })
        .await;

        match result {
            Err(_) => {
                tracing::warn!("drug delete {} exceeded deadline", id);
                Err(ServiceError::Timeout)
            }
            Ok(outcome) => outcome,
        }
    }
}
