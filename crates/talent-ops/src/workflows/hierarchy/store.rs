use std::sync::{Arc, Mutex};

use super::domain::PersonRecord;

/// Source of profile rows. Implementations are hit once per refresh and are
/// not retried by the caller.
pub trait ProfileStore: Send + Sync {
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("profile store unavailable: {0}")]
    Unavailable(String),
}

impl<T: ProfileStore + ?Sized> ProfileStore for Arc<T> {
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError> {
        (**self).list_people()
    }
}

/// Mutable in-process profile list.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProfileStore {
    people: Arc<Mutex<Vec<PersonRecord>>>,
}

impl InMemoryProfileStore {
    pub fn new(people: Vec<PersonRecord>) -> Self {
        Self {
            people: Arc::new(Mutex::new(people)),
        }
    }

    pub fn replace(&self, people: Vec<PersonRecord>) -> Result<(), StoreError> {
        let mut guard = self.people.lock().map_err(|_| poisoned())?;
        *guard = people;
        Ok(())
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn list_people(&self) -> Result<Vec<PersonRecord>, StoreError> {
        let guard = self
            .people
            .lock()
            .map_err(|_| poisoned())?;
        Ok(guard.clone())
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("profile mutex poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::people::{PersonId, Role};

    fn person(id: &str) -> PersonRecord {
        PersonRecord {
            id: PersonId(id.to_string()),
            display_name: Some(id.to_string()),
            email: None,
            role: Role::Employee,
            avatar_url: None,
        }
    }

    #[test]
    fn replace_swaps_the_listed_people() {
        let store = InMemoryProfileStore::new(vec![person("a")]);
        store.replace(vec![person("b"), person("c")]).expect("replace");

        let ids: Vec<_> = store
            .list_people()
            .expect("list")
            .into_iter()
            .map(|record| record.id.0)
            .collect();
        assert_eq!(ids, vec!["b".to_string(), "c".to_string()]);
    }

    #[test]
    fn poisoned_store_reports_unavailable_instead_of_panicking() {
        let store = InMemoryProfileStore::new(vec![person("a")]);
        let shared = store.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.people.lock().expect("lock");
            panic!("writer died while holding the lock");
        })
        .join();

        let err = store.replace(vec![person("b")]).expect_err("poisoned");
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(matches!(store.list_people(), Err(StoreError::Unavailable(_))));
    }
}
