//! Vaccination service; mirrors the drug service over the vaccination
//! repository.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{map_repository_error, with_deadline};
use crate::domain::{ServiceError, VaccinationRepository, VaccinationService};
use crate::models::{NewVaccination, Vaccination, VaccinationForm};

pub struct VaccinationServiceImpl {
    repository: Arc<dyn VaccinationRepository>,
    timeout: Duration,
}

impl VaccinationServiceImpl {
    pub fn new(repository: Arc<dyn VaccinationRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }
}

#[async_trait]
impl VaccinationService for VaccinationServiceImpl {
    async fn list_vaccinations(&self) -> Result<Vec<Vaccination>, ServiceError> {
        with_deadline(self.timeout, self.repository.list()).await
    }

    async fn create_vaccination(
        &self,
        new_vaccination: NewVaccination,
    ) -> Result<(), ServiceError> {
        with_deadline(self.timeout, self.repository.create(&new_vaccination)).await
    }

    async fn update_vaccination(
        &self,
        id: i32,
        form: VaccinationForm,
    ) -> Result<(), ServiceError> {
        let result = tokio::time::timeout(self.timeout, async {
            let mut vaccination = self
                .repository
                .find_by_id(id)
                .await
                .map_err(map_repository_error)?;
            form.apply_to(&mut vaccination)
                .map_err(ServiceError::Validation)?;
            self.repository
                .update(id, &vaccination)
                .await
                .map_err(map_repository_error)
        })
        .await;

        match result {
            Err(_) => {
                tracing::warn!("vaccination update {} exceeded deadline", id);
                Err(ServiceError::Timeout)
            }
            Ok(outcome) => outcome,
        }
    }

    async fn delete_vaccination(&self, id: i32) -> Result<(), ServiceError> {
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
                tracing::warn!("vaccination delete {} exceeded deadline", id);
                Err(ServiceError::Timeout)
            }
            Ok(outcome) => outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RepositoryError;
    use crate::models::parse_timestamp;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakeVaccinationRepository {
        delay: Duration,
        list_result: Result<Vec<Vaccination>, RepositoryError>,
        find_result: Result<Vaccination, RepositoryError>,
        update_calls: AtomicUsize,
        updated_with: Mutex<Option<Vaccination>>,
    }

    impl Default for FakeVaccinationRepository {
        fn default() -> Self {
            Self {
                delay: Duration::ZERO,
                list_result: Ok(Vec::new()),
                find_result: Ok(influenza()),
                update_calls: AtomicUsize::new(0),
                updated_with: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl VaccinationRepository for FakeVaccinationRepository {
        async fn list(&self) -> Result<Vec<Vaccination>, RepositoryError> {
            tokio::time::sleep(self.delay).await;
            self.list_result.clone()
        }

        async fn find_by_id(&self, _id: i32) -> Result<Vaccination, RepositoryError> {
            tokio::time::sleep(self.delay).await;
            self.find_result.clone()
        }

        async fn create(&self, _new: &NewVaccination) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn update(&self, _id: i32, vaccination: &Vaccination) -> Result<(), RepositoryError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            *self.updated_with.lock().unwrap() = Some(vaccination.clone());
            Ok(())
        }

        async fn delete(&self, _id: i32) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn influenza() -> Vaccination {
        Vaccination {
            id: 7,
            name: "Influenza 2024".to_string(),
            drug: "Aspirina".to_string(),
            drug_id: 1,
            dose: 2,
            applied_at: Some(parse_timestamp("2024-06-01 10:30:00").unwrap()),
        }
    }

    #[tokio::test]
    async fn slow_repository_reports_timeout() {
        let repo = Arc::new(FakeVaccinationRepository {
            delay: Duration::from_millis(100),
            ..Default::default()
        });
        let svc = VaccinationServiceImpl::new(repo, Duration::from_millis(5));
        assert_eq!(svc.list_vaccinations().await, Err(ServiceError::Timeout));
    }

    #[tokio::test]
    async fn update_writes_the_merged_record() {
        let repo = Arc::new(FakeVaccinationRepository::default());
        let svc = VaccinationServiceImpl::new(repo.clone(), Duration::from_secs(1));
        let form = VaccinationForm {
            dose: Some(3),
            ..Default::default()
        };
        svc.update_vaccination(7, form).await.unwrap();

        let written = repo.updated_with.lock().unwrap().clone().unwrap();
        assert_eq!(written.dose, 3);
        assert_eq!(written.name, "Influenza 2024");
        assert_eq!(written.drug_id, 1);
    }

    #[tokio::test]
    async fn update_of_missing_record_short_circuits() {
        let repo = Arc::new(FakeVaccinationRepository {
            find_result: Err(RepositoryError::NotFound),
            ..Default::default()
        });
        let svc = VaccinationServiceImpl::new(repo.clone(), Duration::from_secs(1));
        let outcome = svc
            .update_vaccination(999, VaccinationForm::default())
            .await;
        assert_eq!(outcome, Err(ServiceError::NotFound));
        assert_eq!(repo.update_calls.load(Ordering::SeqCst), 0);
    }
}
