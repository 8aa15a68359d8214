use crate::donation::Donation;
use crate::donor::Donor;
use crate::employee::Employee;
use crate::id::RecordId;
use crate::inventory::InventoryItem;
use crate::kind::EntityKind;

/// A stored record: identified by id and belonging to one collection.
pub trait Record {
    const KIND: EntityKind;

    fn id(&self) -> &RecordId;
}

impl Record for Donor {
    const KIND: EntityKind = EntityKind::Donors;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Donation {
    const KIND: EntityKind = EntityKind::Donations;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for InventoryItem {
    const KIND: EntityKind = EntityKind::Inventory;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Employee {
    const KIND: EntityKind = EntityKind::Employees;

    fn id(&self) -> &RecordId {
        &self.id
    }
}

/// Replace the record with the same id in place, returning the old value.
pub fn replace_record<T: Record>(records: &mut [T], record: T) -> Option<T> {
    let slot = records.iter_mut().find(|r| r.id() == record.id())?;
    Some(std::mem::replace(slot, record))
}

/// Remove the record with `id`, keeping the order of the rest.
pub fn take_record<T: Record>(records: &mut Vec<T>, id: &RecordId) -> Option<T> {
    let pos = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(pos))
}
