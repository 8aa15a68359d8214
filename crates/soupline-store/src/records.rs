use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info};

use soupline_types::{Donation, Donor, Employee, EntityKind, InventoryItem, RecordId};

use crate::error::{StoreError, StoreResult};
use crate::traits::Backend;

/// The four ordered record collections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Collections {
    pub donors: Vec<Donor>,
    pub donations: Vec<Donation>,
    pub inventory: Vec<InventoryItem>,
    pub employees: Vec<Employee>,
}

impl Collections {
    pub fn len_of(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Donors => self.donors.len(),
            EntityKind::Donations => self.donations.len(),
            EntityKind::Inventory => self.inventory.len(),
            EntityKind::Employees => self.employees.len(),
        }
    }
}

/// Authoritative in-memory collections mirrored to a [`Backend`].
///
/// Every mutation goes through [`RecordStore::mutate`], which saves the
/// touched collections before returning. There is no dirty tracking and no
/// batching: a successful mutation is always durable in the backend.
pub struct RecordStore {
    backend: Box<dyn Backend>,
    data: Collections,
}

impl RecordStore {
    /// Create an empty store over `backend` without reading from it.
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            data: Collections::default(),
        }
    }

    /// Create a store and restore its collections from `backend`.
    pub fn open(backend: impl Backend + 'static) -> StoreResult<Self> {
        let mut store = Self::new(backend);
        store.load()?;
        Ok(store)
    }

    /// Restore all four collections from the backend.
    ///
    /// A missing key yields an empty collection. A blob that cannot be parsed
    /// fails the whole load and leaves the in-memory state untouched.
    pub fn load(&mut self) -> StoreResult<()> {
        let loaded = Collections {
            donors: self.load_collection(EntityKind::Donors)?,
            donations: self.load_collection(EntityKind::Donations)?,
            inventory: self.load_collection(EntityKind::Inventory)?,
            employees: self.load_collection(EntityKind::Employees)?,
        };
        info!(
            donors = loaded.donors.len(),
            donations = loaded.donations.len(),
            inventory = loaded.inventory.len(),
            employees = loaded.employees.len(),
            "record store loaded"
        );
        self.data = loaded;
        Ok(())
    }

    fn load_collection<T: DeserializeOwned>(&self, kind: EntityKind) -> StoreResult<Vec<T>> {
        let key = kind.key();
        match self.backend.get(key)? {
            None => Ok(Vec::new()),
            Some(blob) => serde_json::from_str(&blob).map_err(|e| StoreError::Corrupt {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    /// Serialize one collection and write it to the backend.
    pub fn save(&self, kind: EntityKind) -> StoreResult<()> {
        let blob = match kind {
            EntityKind::Donors => encode(&self.data.donors),
            EntityKind::Donations => encode(&self.data.donations),
            EntityKind::Inventory => encode(&self.data.inventory),
            EntityKind::Employees => encode(&self.data.employees),
        }?;
        if let Err(e) = self.backend.put(kind.key(), &blob) {
            error!(collection = %kind, error = %e, "failed to persist collection");
            return Err(e);
        }
        debug!(collection = %kind, records = self.data.len_of(kind), "collection saved");
        Ok(())
    }

    /// Write every collection.
    pub fn save_all(&self) -> StoreResult<()> {
        EntityKind::ALL.iter().try_for_each(|kind| self.save(*kind))
    }

    /// Apply `f` to the collections, then save each kind in `touched`.
    ///
    /// If a save fails the in-memory collections are rolled back. Kinds
    /// saved before the failure stay written in the backend.
    pub fn mutate<T>(
        &mut self,
        touched: &[EntityKind],
        f: impl FnOnce(&mut Collections) -> T,
    ) -> StoreResult<T> {
        let before = self.data.clone();
        let out = f(&mut self.data);
        for kind in touched {
            if let Err(e) = self.save(*kind) {
                self.data = before;
                return Err(e);
            }
        }
        Ok(out)
    }

    pub fn collections(&self) -> &Collections {
        &self.data
    }

    pub fn donors(&self) -> &[Donor] {
        &self.data.donors
    }

    pub fn donations(&self) -> &[Donation] {
        &self.data.donations
    }

    pub fn inventory(&self) -> &[InventoryItem] {
        &self.data.inventory
    }

    pub fn employees(&self) -> &[Employee] {
        &self.data.employees
    }

    pub fn find_donor(&self, id: &RecordId) -> Option<&Donor> {
        self.data.donors.iter().find(|d| &d.id == id)
    }

    pub fn find_donation(&self, id: &RecordId) -> Option<&Donation> {
        self.data.donations.iter().find(|d| &d.id == id)
    }

    pub fn find_item(&self, id: &RecordId) -> Option<&InventoryItem> {
        self.data.inventory.iter().find(|i| &i.id == id)
    }

    pub fn find_employee(&self, id: &RecordId) -> Option<&Employee> {
        self.data.employees.iter().find(|e| &e.id == id)
    }

    /// The inventory item produced by the given donation, if any.
    pub fn find_linked_item(&self, donation_id: &RecordId) -> Option<&InventoryItem> {
        self.data
            .inventory
            .iter()
            .find(|i| i.donation_id.as_ref() == Some(donation_id))
    }
}

fn encode<T: Serialize>(records: &[T]) -> StoreResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| StoreError::Serialization(e.to_string()))
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore")
            .field("donors", &self.data.donors.len())
            .field("donations", &self.data.donations.len())
            .field("inventory", &self.data.inventory.len())
            .field("employees", &self.data.employees.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, Utc};
    use soupline_types::{DonationKind, EmploymentStatus, ItemCondition, NewDonor};

    use super::*;
    use crate::file::FileBackend;
    use crate::memory::MemoryBackend;

    fn donor(name: &str) -> Donor {
        NewDonor {
            full_name: name.into(),
            email: format!("{name}@example.org"),
            ..Default::default()
        }
        .into_donor(RecordId::new(), Utc::now())
    }

    fn employee(active: bool) -> Employee {
        Employee {
            id: RecordId::new(),
            full_name: "Marta".into(),
            position: "Server".into(),
            shift: "evening".into(),
            emergency_contact: String::new(),
            salary: 900.0,
            status: if active { EmploymentStatus::Active } else { EmploymentStatus::Inactive },
            hire_date: NaiveDate::from_ymd_opt(2022, 1, 10).unwrap(),
        }
    }

    struct FailingBackend;

    impl Backend for FailingBackend {
        fn get(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }
        fn put(&self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Backend("disk full".into()))
        }
        fn remove(&self, _key: &str) -> StoreResult<bool> {
            Ok(false)
        }
    }

    // -----------------------------------------------------------------------
    // Load
    // -----------------------------------------------------------------------

    #[test]
    fn load_tolerates_empty_backend() {
        let store = RecordStore::open(MemoryBackend::new()).unwrap();
        assert!(store.donors().is_empty());
        assert!(store.donations().is_empty());
        assert!(store.inventory().is_empty());
        assert!(store.employees().is_empty());
    }

    #[test]
    fn load_fails_loudly_on_corrupt_blob() {
        let backend = MemoryBackend::with_blobs([("donations", "{not json")]);
        let err = RecordStore::open(backend).unwrap_err();
        match err {
            StoreError::Corrupt { key, .. } => assert_eq!(key, "donations"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn failed_reload_keeps_previous_state() {
        let backend = Arc::new(MemoryBackend::new());
        let mut store = RecordStore::open(Arc::clone(&backend)).unwrap();
        store
            .mutate(&[EntityKind::Donors], |c| c.donors.push(donor("ana")))
            .unwrap();

        backend.put("employees", "[{\"broken\":").unwrap();
        assert!(store.load().is_err());
        assert_eq!(store.donors().len(), 1);
    }

    // -----------------------------------------------------------------------
    // Mutate / save
    // -----------------------------------------------------------------------

    #[test]
    fn mutate_saves_only_touched_kinds() {
        let backend = Arc::new(MemoryBackend::new());
        let mut store = RecordStore::open(Arc::clone(&backend)).unwrap();
        store
            .mutate(&[EntityKind::Donors], |c| c.donors.push(donor("ana")))
            .unwrap();
        assert_eq!(backend.keys(), vec!["donors".to_string()]);
        assert_eq!(backend.write_count(), 1);
    }

    #[test]
    fn mutation_survives_restart() {
        let backend = Arc::new(MemoryBackend::new());
        let ana = donor("ana");
        {
            let mut store = RecordStore::open(Arc::clone(&backend)).unwrap();
            store
                .mutate(&[EntityKind::Donors, EntityKind::Employees], |c| {
                    c.donors.push(ana.clone());
                    c.employees.push(employee(true));
                })
                .unwrap();
        }
        let reopened = RecordStore::open(Arc::clone(&backend)).unwrap();
        assert_eq!(reopened.donors(), &[ana]);
        assert_eq!(reopened.employees().len(), 1);
    }

    #[test]
    fn mutate_returns_closure_value() {
        let mut store = RecordStore::new(MemoryBackend::new());
        let count = store
            .mutate(&[EntityKind::Employees], |c| {
                c.employees.push(employee(false));
                c.employees.len()
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn save_error_is_propagated() {
        let mut store = RecordStore::new(FailingBackend);
        let err = store
            .mutate(&[EntityKind::Donors], |c| c.donors.push(donor("ana")))
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(store.donors().is_empty());
    }

    #[test]
    fn save_all_writes_four_keys() {
        let backend = Arc::new(MemoryBackend::new());
        let store = RecordStore::new(Arc::clone(&backend));
        store.save_all().unwrap();
        assert_eq!(backend.len(), 4);
        assert_eq!(backend.get("inventory").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_backend_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let donation_id = RecordId::new();
        {
            let mut store = RecordStore::open(FileBackend::open(dir.path()).unwrap()).unwrap();
            store
                .mutate(&[EntityKind::Inventory], |c| {
                    c.inventory.push(InventoryItem {
                        id: RecordId::new(),
                        name: "Beans".into(),
                        category: "food".into(),
                        quantity: 12,
                        intake_date: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
                        condition: ItemCondition::New,
                        description: None,
                        donation_id: Some(donation_id),
                    })
                })
                .unwrap();
        }
        let store = RecordStore::open(FileBackend::open(dir.path()).unwrap()).unwrap();
        let item = store.find_linked_item(&donation_id).expect("linked item");
        assert_eq!(item.quantity, 12);
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    #[test]
    fn find_by_id() {
        let mut store = RecordStore::new(MemoryBackend::new());
        let ana = donor("ana");
        let donation = Donation {
            id: RecordId::new(),
            donor_id: ana.id,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            kind: DonationKind::Monetary,
            amount: 20.0,
            product_category: None,
            method: Default::default(),
            status: Default::default(),
            description: None,
        };
        store
            .mutate(&[EntityKind::Donors, EntityKind::Donations], |c| {
                c.donors.push(ana.clone());
                c.donations.push(donation.clone());
            })
            .unwrap();
        assert_eq!(store.find_donor(&ana.id), Some(&ana));
        assert_eq!(store.find_donation(&donation.id), Some(&donation));
        assert!(store.find_employee(&ana.id).is_none());
        assert!(store.find_item(&ana.id).is_none());
    }

    #[test]
    fn debug_shows_counts() {
        let store = RecordStore::new(MemoryBackend::new());
        let debug = format!("{store:?}");
        assert!(debug.contains("RecordStore"));
        assert!(debug.contains("donations"));
    }
}
