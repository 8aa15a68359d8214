use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use soupline_store::{Backend, MemoryBackend, RecordStore};
use soupline_types::{
    replace_record, take_record, DashboardStats, Donation, Donor, Employee, EntityKind,
    InventoryItem, NewDonation, NewDonor, NewEmployee, NewInventoryItem, Record, RecordId,
    Validate, ValidationError,
};

use crate::error::{SdkError, SdkResult};
use crate::stats;
use crate::sync::{self, SyncReport};

/// A donation together with the derived effects of the mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Synced {
    pub donation: Donation,
    pub report: SyncReport,
}

/// High-level kitchen API: CRUD over all four record kinds.
///
/// Donor, inventory and employee operations touch only their own collection.
/// Donation operations go through [`crate::sync`] so inventory stays linked.
/// Every successful mutation has been persisted by the time it returns.
pub struct Kitchen {
    store: RecordStore,
}

impl Kitchen {
    /// Open a kitchen over `backend`, restoring any persisted records.
    pub fn open(backend: impl Backend + 'static) -> SdkResult<Self> {
        Ok(Self {
            store: RecordStore::open(backend)?,
        })
    }

    /// A fresh kitchen backed by memory only.
    pub fn in_memory() -> Self {
        Self {
            store: RecordStore::new(MemoryBackend::new()),
        }
    }

    pub fn from_store(store: RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Discard in-memory state and reload from the backend.
    pub fn reload(&mut self) -> SdkResult<()> {
        self.store.load()?;
        Ok(())
    }

    /// Dashboard figures, recomputed on every call.
    pub fn stats(&self) -> DashboardStats {
        stats::compute(self.store.collections())
    }

    // ---- Donors ----

    pub fn donors(&self) -> &[Donor] {
        self.store.donors()
    }

    pub fn get_donor(&self, id: &RecordId) -> SdkResult<&Donor> {
        self.store
            .find_donor(id)
            .ok_or_else(|| SdkError::not_found(EntityKind::Donors, *id))
    }

    pub fn add_donor(&mut self, input: NewDonor) -> SdkResult<Donor> {
        input.validate()?;
        let donor = input.into_donor(RecordId::new(), Utc::now());
        let stored = donor.clone();
        self.store
            .mutate(&[EntityKind::Donors], |c| c.donors.push(stored))?;
        info!(id = %donor.id, "donor added");
        Ok(donor)
    }

    /// Replace a donor in full. The registration timestamp is kept.
    pub fn update_donor(&mut self, mut donor: Donor) -> SdkResult<Donor> {
        donor.validate()?;
        let existing = self.get_donor(&donor.id)?;
        donor.registered_at = existing.registered_at;
        let stored = donor.clone();
        self.store
            .mutate(&[EntityKind::Donors], |c| replace_record(&mut c.donors, stored))?;
        info!(id = %donor.id, "donor updated");
        Ok(donor)
    }

    /// Remove a donor. Their donations are left in place.
    pub fn remove_donor(&mut self, id: &RecordId) -> SdkResult<Donor> {
        self.remove_simple(id, |c| &mut c.donors)
    }

    /// Donations whose `donor_id` is `id`, in the order they were recorded.
    pub fn donor_history(&self, id: &RecordId) -> SdkResult<Vec<&Donation>> {
        self.get_donor(id)?;
        Ok(sync::history(self.store.collections(), id))
    }

    // ---- Donations ----

    pub fn donations(&self) -> &[Donation] {
        self.store.donations()
    }

    pub fn get_donation(&self, id: &RecordId) -> SdkResult<&Donation> {
        self.store
            .find_donation(id)
            .ok_or_else(|| SdkError::not_found(EntityKind::Donations, *id))
    }

    pub fn add_donation(&mut self, input: NewDonation) -> SdkResult<Synced> {
        input.validate()?;
        let donation = input.into_donation(RecordId::new());
        let stored = donation.clone();
        let report = self.store.mutate(
            &[EntityKind::Donations, EntityKind::Inventory],
            |c| sync::create(c, stored),
        )?;
        log_report("donation added", &report);
        Ok(Synced { donation, report })
    }

    /// Replace a donation in full and reconcile its linked inventory item.
    pub fn update_donation(&mut self, donation: Donation) -> SdkResult<Synced> {
        donation.validate()?;
        self.get_donation(&donation.id)?;
        let stored = donation.clone();
        let report = self
            .store
            .mutate(&[EntityKind::Donations, EntityKind::Inventory], |c| {
                sync::update(c, stored)
            })?
            .ok_or_else(|| SdkError::not_found(EntityKind::Donations, donation.id))?;
        log_report("donation updated", &report);
        Ok(Synced { donation, report })
    }

    /// Remove a donation and the inventory item it produced.
    pub fn remove_donation(&mut self, id: &RecordId) -> SdkResult<Synced> {
        self.get_donation(id)?;
        let (donation, report) = self
            .store
            .mutate(&[EntityKind::Donations, EntityKind::Inventory], |c| {
                sync::delete(c, id)
            })?
            .ok_or_else(|| SdkError::not_found(EntityKind::Donations, *id))?;
        log_report("donation removed", &report);
        Ok(Synced { donation, report })
    }

    // ---- Inventory ----

    pub fn inventory(&self) -> &[InventoryItem] {
        self.store.inventory()
    }

    pub fn get_item(&self, id: &RecordId) -> SdkResult<&InventoryItem> {
        self.store
            .find_item(id)
            .ok_or_else(|| SdkError::not_found(EntityKind::Inventory, *id))
    }

    /// Add an item by hand. It may claim a donation link only if that
    /// donation has no linked item yet.
    pub fn add_item(&mut self, input: NewInventoryItem) -> SdkResult<InventoryItem> {
        input.validate()?;
        if let Some(donation_id) = &input.donation_id {
            if self.store.find_linked_item(donation_id).is_some() {
                return Err(ValidationError::InvalidValue {
                    field: "donation_id",
                    reason: format!("donation {donation_id} already has a linked inventory item"),
                }
                .into());
            }
        }
        let item = input.into_item(RecordId::new());
        let stored = item.clone();
        self.store
            .mutate(&[EntityKind::Inventory], |c| c.inventory.push(stored))?;
        info!(id = %item.id, quantity = item.quantity, "inventory item added");
        Ok(item)
    }

    /// Replace an item in full. The donation link is kept from the stored item.
    pub fn update_item(&mut self, mut item: InventoryItem) -> SdkResult<InventoryItem> {
        item.validate()?;
        item.donation_id = self.get_item(&item.id)?.donation_id;
        self.update_simple(item, |c| &mut c.inventory)
    }

    pub fn remove_item(&mut self, id: &RecordId) -> SdkResult<InventoryItem> {
        self.remove_simple(id, |c| &mut c.inventory)
    }

    // ---- Employees ----

    pub fn employees(&self) -> &[Employee] {
        self.store.employees()
    }

    pub fn get_employee(&self, id: &RecordId) -> SdkResult<&Employee> {
        self.store
            .find_employee(id)
            .ok_or_else(|| SdkError::not_found(EntityKind::Employees, *id))
    }

    pub fn add_employee(&mut self, input: NewEmployee) -> SdkResult<Employee> {
        input.validate()?;
        let employee = input.into_employee(RecordId::new());
        let stored = employee.clone();
        self.store
            .mutate(&[EntityKind::Employees], |c| c.employees.push(stored))?;
        info!(id = %employee.id, "employee added");
        Ok(employee)
    }

    pub fn update_employee(&mut self, employee: Employee) -> SdkResult<Employee> {
        employee.validate()?;
        self.update_simple(employee, |c| &mut c.employees)
    }

    pub fn remove_employee(&mut self, id: &RecordId) -> SdkResult<Employee> {
        self.remove_simple(id, |c| &mut c.employees)
    }

    // ---- Shared plumbing ----

    fn update_simple<T, F>(&mut self, record: T, field: F) -> SdkResult<T>
    where
        T: Record + Clone,
        F: FnOnce(&mut soupline_store::Collections) -> &mut Vec<T>,
    {
        let id = *record.id();
        let kind = T::KIND;
        let stored = record.clone();
        self.store
            .mutate(&[kind], |c| replace_record(field(c), stored))?
            .ok_or_else(|| SdkError::not_found(kind, id))?;
        info!(%id, collection = %kind, "record updated");
        Ok(record)
    }

    fn remove_simple<T, F>(&mut self, id: &RecordId, field: F) -> SdkResult<T>
    where
        T: Record,
        F: FnOnce(&mut soupline_store::Collections) -> &mut Vec<T>,
    {
        let kind = T::KIND;
        let removed = self
            .store
            .mutate(&[kind], |c| take_record(field(c), id))?
            .ok_or_else(|| SdkError::not_found(kind, *id))?;
        info!(%id, collection = %kind, "record removed");
        Ok(removed)
    }
}

fn log_report(action: &str, report: &SyncReport) {
    info!(
        id = %report.donation_id,
        applied = report.applied().count(),
        "{action}"
    );
    for reason in report.skipped() {
        warn!(id = %report.donation_id, ?reason, "derived effect skipped");
    }
}

impl std::fmt::Debug for Kitchen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kitchen").field("store", &self.store).finish()
    }
}
