#[cfg(test)]
mod tests {
    use crate::error::RegistrationError;
    use crate::models::{NewRegistration, Registration};
    use crate::service::RegistrationService;
    use crate::store::{RegistrationSession, RegistrationStore};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use summit_db::DbError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Failure {
        None,
        Unconfigured,
        Unreachable,
        Schema,
        Find,
        Insert,
        /// The pre-check misses the row; the constraint still rejects it
        LostRace,
    }

    #[derive(Debug, Default)]
    struct Counters {
        opened: AtomicUsize,
        live: AtomicUsize,
    }

    #[derive(Debug, Clone)]
    struct FakeStore {
        rows: Arc<Mutex<Vec<Registration>>>,
        counters: Arc<Counters>,
        failure: Failure,
    }

    impl FakeStore {
        fn new(failure: Failure) -> Self {
            Self {
                rows: Arc::default(),
                counters: Arc::default(),
                failure,
            }
        }

        fn opened(&self) -> usize {
            self.counters.opened.load(Ordering::SeqCst)
        }

        fn live(&self) -> usize {
            self.counters.live.load(Ordering::SeqCst)
        }
    }

    struct FakeSession {
        rows: Arc<Mutex<Vec<Registration>>>,
        counters: Arc<Counters>,
        failure: Failure,
    }

    impl Drop for FakeSession {
        fn drop(&mut self) {
            self.counters.live.fetch_sub(1, Ordering::SeqCst);
        }
    }

    impl RegistrationStore for FakeStore {
        type Session = FakeSession;

        async fn open(&self) -> Result<FakeSession, DbError> {
            match self.failure {
                Failure::Unconfigured => {
                    return Err(DbError::ConfigError("no database configured".into()))
                }
                Failure::Unreachable => {
                    return Err(DbError::ConnectionError("connection refused".into()))
                }
                _ => {}
            }
            self.counters.opened.fetch_add(1, Ordering::SeqCst);
            self.counters.live.fetch_add(1, Ordering::SeqCst);
            Ok(FakeSession {
                rows: Arc::clone(&self.rows),
                counters: Arc::clone(&self.counters),
                failure: self.failure,
            })
        }
    }

    impl RegistrationSession for FakeSession {
        async fn ensure_schema(&mut self) -> Result<(), DbError> {
            if self.failure == Failure::Schema {
                return Err(DbError::QueryError("CREATE command denied".into()));
            }
            Ok(())
        }

        async fn find_by_email(&mut self, email: &str) -> Result<Option<Registration>, DbError> {
            match self.failure {
                Failure::Find => Err(DbError::QueryError("lost connection".into())),
                Failure::LostRace => Ok(None),
                _ => Ok(self
                    .rows
                    .lock()
                    .unwrap()
                    .iter()
                    .find(|r| r.email == email)
                    .cloned()),
            }
        }

        async fn insert(&mut self, registration: &NewRegistration) -> Result<Registration, DbError> {
            match self.failure {
                Failure::Insert => return Err(DbError::QueryError("disk full".into())),
                Failure::LostRace => {
                    return Err(DbError::UniqueViolation("uq_registrations_email".into()))
                }
                _ => {}
            }
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|r| r.email == registration.email()) {
                return Err(DbError::UniqueViolation("uq_registrations_email".into()));
            }
            let stored = Registration {
                id: rows.len() as i64 + 1,
                name: registration.name().to_string(),
                email: registration.email().to_string(),
                message: registration.message().to_string(),
                created_at: None,
            };
            rows.push(stored.clone());
            Ok(stored)
        }

        async fn list_all(&mut self) -> Result<Vec<Registration>, DbError> {
            let mut rows = self.rows.lock().unwrap().clone();
            rows.reverse();
            Ok(rows)
        }
    }

    #[tokio::test]
    async fn test_register_then_repeat() {
        let store = FakeStore::new(Failure::None);
        let service = RegistrationService::new(store.clone());

        let created = service
            .register("Ana Ruiz", "ana@example.com", "")
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.email, "ana@example.com");

        let repeat = service.register("Ana Ruiz", "ana@example.com", "").await;
        assert_eq!(repeat, Err(RegistrationError::AlreadyRegistered));

        assert_eq!(store.opened(), 2);
        assert_eq!(store.live(), 0);
    }

    #[tokio::test]
    async fn test_validation_never_opens_a_session() {
        let store = FakeStore::new(Failure::None);
        let service = RegistrationService::new(store.clone());

        assert_eq!(
            service.register("", "ana@example.com", "").await,
            Err(RegistrationError::MissingFields)
        );
        assert_eq!(
            service.register("Ana", "", "").await,
            Err(RegistrationError::MissingFields)
        );
        assert_eq!(
            service.register("Bob", "not-an-email", "hi").await,
            Err(RegistrationError::InvalidEmail)
        );
        assert_eq!(store.opened(), 0);
    }

    #[tokio::test]
    async fn test_open_failures_are_classified() {
        let unconfigured = RegistrationService::new(FakeStore::new(Failure::Unconfigured));
        assert!(matches!(
            unconfigured.register("Ana", "ana@example.com", "").await,
            Err(RegistrationError::Configuration(_))
        ));

        let unreachable = RegistrationService::new(FakeStore::new(Failure::Unreachable));
        assert!(matches!(
            unreachable.register("Ana", "ana@example.com", "").await,
            Err(RegistrationError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_storage_failures_release_the_session() {
        let cases = [
            (Failure::Schema, "database_unavailable"),
            (Failure::Find, "verification_failed"),
            (Failure::Insert, "insert_failed"),
        ];
        for (failure, reason) in cases {
            let store = FakeStore::new(failure);
            let service = RegistrationService::new(store.clone());

            let err = service
                .register("Ana", "ana@example.com", "")
                .await
                .unwrap_err();
            assert_eq!(err.reason(), reason, "{failure:?}");
            assert_eq!(store.opened(), 1);
            assert_eq!(store.live(), 0, "{failure:?} leaked a session");
        }
    }

    #[tokio::test]
    async fn test_unique_violation_on_insert_is_a_conflict() {
        let store = FakeStore::new(Failure::LostRace);
        let service = RegistrationService::new(store.clone());

        assert_eq!(
            service.register("Ana", "ana@example.com", "").await,
            Err(RegistrationError::AlreadyRegistered)
        );
        assert_eq!(store.live(), 0);
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let store = FakeStore::new(Failure::None);
        let service = RegistrationService::new(store.clone());
        service.register("Ana", "ana@example.com", "").await.unwrap();
        service.register("Bob", "bob@example.com", "hi").await.unwrap();

        let listed = service.list().await.unwrap();
        let emails: Vec<_> = listed.iter().map(|r| r.email.as_str()).collect();
        assert_eq!(emails, ["bob@example.com", "ana@example.com"]);
        assert_eq!(store.live(), 0);
    }
}
