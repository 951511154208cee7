use menagerie_core::{
    AnimalDraft, AnimalError, AnimalKind, AnimalPatch, AnimalRecord, AnimalService, AnimalStore,
    CoreConfig, HandlerRegistry, SqliteAnimalStore, StoreError, StoreResult,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

fn fast_config() -> CoreConfig {
    CoreConfig {
        cat_create_delay_ms: 0,
        ..CoreConfig::default()
    }
}

fn service() -> AnimalService {
    let store = Arc::new(SqliteAnimalStore::open_in_memory().unwrap());
    AnimalService::with_store(store, &fast_config())
}

/// Store double that fails every call and counts attempts.
#[derive(Default)]
struct UnreachableStore {
    calls: AtomicUsize,
}

impl UnreachableStore {
    fn fail<T>(&self) -> StoreResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

impl AnimalStore for UnreachableStore {
    fn save(&self, _kind: AnimalKind, _draft: &AnimalDraft) -> StoreResult<AnimalRecord> {
        self.fail()
    }

    fn find_one(&self, _id: &str, _kind: AnimalKind) -> StoreResult<Option<AnimalRecord>> {
        self.fail()
    }

    fn find_many(&self, _kind: AnimalKind) -> StoreResult<Vec<AnimalRecord>> {
        self.fail()
    }

    fn update_where(&self, _id: &str, _kind: AnimalKind, _patch: &AnimalPatch) -> StoreResult<()> {
        self.fail()
    }

    fn delete_where(&self, _id: &str, _kind: AnimalKind) -> StoreResult<usize> {
        self.fail()
    }
}

#[test]
fn create_then_read_roundtrips_for_every_kind() {
    let service = service();

    for kind in AnimalKind::ALL {
        let created = service.create(kind, AnimalDraft::new("Buddy", 3)).unwrap();
        assert_eq!(created.kind, kind);
        assert_eq!(created.name, "Buddy");
        assert_eq!(created.age, 3);

        let loaded = service.read(kind, &created.id).unwrap();
        assert_eq!(loaded, Some(created));
    }
}

#[test]
fn records_are_invisible_to_other_kinds() {
    let service = service();

    for owner in AnimalKind::ALL {
        let created = service
            .create(owner, AnimalDraft::new("Solo", 1))
            .unwrap();

        for other in AnimalKind::ALL.into_iter().filter(|kind| *kind != owner) {
            assert!(service.read(other, &created.id).unwrap().is_none());
            assert!(service
                .update(other, &created.id, &AnimalPatch::age(7))
                .unwrap()
                .is_none());
            assert!(!service.delete(other, &created.id).unwrap());
        }

        assert_eq!(service.read(owner, &created.id).unwrap(), Some(created));
    }
}

#[test]
fn delete_reports_whether_a_record_was_removed() {
    let service = service();
    assert!(!service.delete(AnimalKind::Fish, "missing").unwrap());

    let created = service
        .create(AnimalKind::Fish, AnimalDraft::new("Goldie", 1))
        .unwrap();
    assert!(service.delete(AnimalKind::Fish, &created.id).unwrap());
    assert!(service.read(AnimalKind::Fish, &created.id).unwrap().is_none());
    assert!(!service.delete(AnimalKind::Fish, &created.id).unwrap());
}

#[test]
fn update_changes_only_patched_fields() {
    let service = service();
    let created = service
        .create(AnimalKind::Dog, AnimalDraft::new("Rex", 3))
        .unwrap();

    let updated = service
        .update(AnimalKind::Dog, &created.id, &AnimalPatch::age(5))
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Rex");
    assert_eq!(updated.age, 5);
    assert_eq!(updated.kind, AnimalKind::Dog);

    let missing = service
        .update(AnimalKind::Dog, "missing", &AnimalPatch::age(5))
        .unwrap();
    assert!(missing.is_none());
}

#[test]
fn list_returns_exactly_the_records_of_one_kind() {
    let service = service();
    let mut dog_ids = HashSet::new();
    for name in ["Rex", "Fido"] {
        dog_ids.insert(service.create(AnimalKind::Dog, AnimalDraft::new(name, 2)).unwrap().id);
    }
    for name in ["Mia", "Tom", "Kit"] {
        service.create(AnimalKind::Cat, AnimalDraft::new(name, 2)).unwrap();
    }

    let listed: HashSet<_> = service
        .list(AnimalKind::Dog)
        .unwrap()
        .into_iter()
        .map(|animal| {
            assert_eq!(animal.kind, AnimalKind::Dog);
            animal.id
        })
        .collect();
    assert_eq!(listed, dog_ids);
    assert_eq!(service.list(AnimalKind::Cat).unwrap().len(), 3);
    assert!(service.list(AnimalKind::Fish).unwrap().is_empty());
}

#[test]
fn dog_and_cat_walkthrough() {
    let service = service();

    let rex = service
        .create(AnimalKind::Dog, AnimalDraft::new("Rex", 3).with_id("d1"))
        .unwrap();
    assert_eq!(rex, AnimalRecord::new("d1", AnimalKind::Dog, "Rex", 3));
    service
        .create(AnimalKind::Cat, AnimalDraft::new("Mia", 2).with_id("c1"))
        .unwrap();

    assert!(service.read(AnimalKind::Dog, "c1").unwrap().is_none());
    assert_eq!(
        service.list(AnimalKind::Dog).unwrap(),
        vec![AnimalRecord::new("d1", AnimalKind::Dog, "Rex", 3)]
    );
    assert_eq!(
        service
            .update(AnimalKind::Cat, "c1", &AnimalPatch::age(3))
            .unwrap(),
        Some(AnimalRecord::new("c1", AnimalKind::Cat, "Mia", 3))
    );
    assert!(service.delete(AnimalKind::Dog, "d1").unwrap());
    assert!(!service.delete(AnimalKind::Dog, "d1").unwrap());
}

#[test]
fn create_ignores_conflicting_kind_in_payload() {
    let service = service();
    let draft = AnimalDraft::new("Nemo", 1).tagged(AnimalKind::Dog);

    let created = service.create(AnimalKind::Fish, draft).unwrap();

    assert_eq!(created.kind, AnimalKind::Fish);
    assert!(service.read(AnimalKind::Dog, &created.id).unwrap().is_none());
}

#[test]
fn duplicate_id_is_rejected() {
    let service = service();
    service
        .create(AnimalKind::Dog, AnimalDraft::new("Rex", 3).with_id("d1"))
        .unwrap();

    let err = service
        .create(AnimalKind::Dog, AnimalDraft::new("Max", 1).with_id("d1"))
        .unwrap_err();
    assert!(matches!(err, AnimalError::DuplicateId(id) if id == "d1"));
}

#[test]
fn unknown_subtype_fails_before_touching_the_store() {
    let store = Arc::new(UnreachableStore::default());
    let registry = HandlerRegistry::with_config(store.clone(), &fast_config());

    let err = registry.resolve_name("Bird").err().unwrap();
    assert!(matches!(err, AnimalError::UnknownSubtype(ref value) if value == "Bird"));
    assert!(err.to_string().contains("Bird"));

    let err = AnimalError::from("hamster".parse::<AnimalKind>().unwrap_err());
    assert!(matches!(err, AnimalError::UnknownSubtype(_)));
    assert_eq!(store.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn store_failures_surface_as_persistence_unavailable() {
    let store = Arc::new(UnreachableStore::default());
    let service = AnimalService::with_store(store.clone(), &fast_config());

    let results = [
        service.create(AnimalKind::Cat, AnimalDraft::new("Mia", 2)).err(),
        service.read(AnimalKind::Cat, "c1").err(),
        service
            .update(AnimalKind::Cat, "c1", &AnimalPatch::age(3))
            .err(),
        service.delete(AnimalKind::Cat, "c1").err(),
        service.list(AnimalKind::Cat).err(),
    ];

    for err in results {
        let err = err.expect("every operation should fail");
        assert!(matches!(err, AnimalError::PersistenceUnavailable(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
    // No retries: one store call per operation.
    assert_eq!(store.calls.load(Ordering::SeqCst), 5);
}

#[test]
fn concurrent_creates_through_shared_service_all_persist() {
    let service = service();

    let handles: Vec<_> = (0..8u32)
        .map(|index| {
            let service = service.clone();
            thread::spawn(move || {
                let kind = AnimalKind::ALL[(index % 3) as usize];
                service
                    .create(kind, AnimalDraft::new(format!("pet-{index}"), index))
                    .unwrap()
            })
        })
        .collect();
    let created: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let total: usize = AnimalKind::ALL
        .into_iter()
        .map(|kind| service.list(kind).unwrap().len())
        .sum();
    assert_eq!(total, created.len());
    for record in created {
        assert_eq!(service.read(record.kind, &record.id).unwrap(), Some(record));
    }
}

#[test]
fn payloads_use_external_type_field() {
    let draft: AnimalDraft = serde_json::from_str(r#"{"name": "Rex", "age": 3}"#).unwrap();
    assert_eq!(draft, AnimalDraft::new("Rex", 3));

    let record = AnimalRecord::new("d1", AnimalKind::Dog, "Rex", 3);
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(
        value,
        serde_json::json!({"id": "d1", "type": "Dog", "name": "Rex", "age": 3})
    );

    let bad_patch = serde_json::from_str::<AnimalPatch>(r#"{"type": "Cat"}"#);
    assert!(bad_patch.is_err());
}
