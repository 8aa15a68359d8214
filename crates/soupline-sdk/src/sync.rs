//! Cross-entity synchronization for donation mutations.
//!
//! A donation is the only record whose mutations ripple into other
//! collections:
//!
//! - An in-kind donation with a product category owns exactly one inventory
//!   item whose `donation_id` points back at it. The item is created with the
//!   donation, reconciled on every update and removed with the donation.
//! - A donor's history is never stored. [`history`] derives it from the
//!   donation collection, so it cannot drift from the donations themselves.
//!
//! Lookups that miss (unknown donor, missing linked item) do not abort the
//! mutation. They are recorded as [`Effect::Skipped`] in the returned
//! [`SyncReport`] so callers can see exactly what was and was not applied.

use serde::{Deserialize, Serialize};

use soupline_store::Collections;
use soupline_types::{
    replace_record, take_record, Donation, InventoryItem, ItemCondition, RecordId,
};

/// A derived mutation that was carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum Change {
    ItemCreated { item_id: RecordId, quantity: u64 },
    ItemUpdated { item_id: RecordId, quantity: u64 },
    ItemRemoved { item_id: RecordId },
    HistoryAppended { donor_id: RecordId },
    HistoryUpdated { donor_id: RecordId },
    HistoryRemoved { donor_id: RecordId },
}

/// Why a derived mutation could not be carried out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// The donation references a donor that does not exist.
    DonorNotFound { donor_id: RecordId },
    /// An in-kind donation has no linked inventory item and none was created.
    NoLinkedItem,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Effect {
    Applied(Change),
    Skipped(SkipReason),
}

/// Every derived effect of one donation mutation, in the order applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub donation_id: RecordId,
    pub effects: Vec<Effect>,
}

impl SyncReport {
    pub fn new(donation_id: RecordId) -> Self {
        Self {
            donation_id,
            effects: Vec::new(),
        }
    }

    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn applied(&self) -> impl Iterator<Item = &Change> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Applied(c) => Some(c),
            Effect::Skipped(_) => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = &SkipReason> {
        self.effects.iter().filter_map(|e| match e {
            Effect::Skipped(r) => Some(r),
            Effect::Applied(_) => None,
        })
    }

    /// `true` when nothing was skipped.
    pub fn is_complete(&self) -> bool {
        self.skipped().next().is_none()
    }
}

/// Insert a new donation and its derived effects.
///
/// The donation is stored even when its donor does not exist.
pub fn create(collections: &mut Collections, donation: Donation) -> SyncReport {
    let mut report = SyncReport::new(donation.id);

    if donation.is_in_kind() {
        match donation.category() {
            Some(category) => {
                let item = linked_item(&donation, category);
                report.push(Effect::Applied(Change::ItemCreated {
                    item_id: item.id,
                    quantity: item.quantity,
                }));
                collections.inventory.push(item);
            }
            None => report.push(Effect::Skipped(SkipReason::NoLinkedItem)),
        }
    }

    report.push(history_effect(collections, donation.donor_id, |donor_id| {
        Change::HistoryAppended { donor_id }
    }));
    collections.donations.push(donation);
    report
}

/// Replace a stored donation in full and reconcile its linked item.
///
/// Returns `None` if no donation with that id exists; nothing is changed.
pub fn update(collections: &mut Collections, donation: Donation) -> Option<SyncReport> {
    let previous = replace_record(&mut collections.donations, donation.clone())?;
    let mut report = SyncReport::new(donation.id);

    reconcile_item(collections, &donation, &mut report);

    if previous.donor_id != donation.donor_id && donor_exists(collections, &previous.donor_id) {
        report.push(Effect::Applied(Change::HistoryRemoved {
            donor_id: previous.donor_id,
        }));
    }
    let moved = previous.donor_id != donation.donor_id;
    report.push(history_effect(collections, donation.donor_id, |donor_id| {
        if moved {
            Change::HistoryAppended { donor_id }
        } else {
            Change::HistoryUpdated { donor_id }
        }
    }));
    Some(report)
}

/// Remove a donation together with its linked item.
///
/// Returns `None` if no donation with that id exists.
pub fn delete(collections: &mut Collections, id: &RecordId) -> Option<(Donation, SyncReport)> {
    let donation = take_record(&mut collections.donations, id)?;
    let mut report = SyncReport::new(donation.id);

    match linked_position(collections, &donation.id) {
        Some(pos) => {
            let item = collections.inventory.remove(pos);
            report.push(Effect::Applied(Change::ItemRemoved { item_id: item.id }));
        }
        None if donation.is_in_kind() => report.push(Effect::Skipped(SkipReason::NoLinkedItem)),
        None => {}
    }

    report.push(history_effect(collections, donation.donor_id, |donor_id| {
        Change::HistoryRemoved { donor_id }
    }));
    Some((donation, report))
}

/// A donor's donation history, in insertion order.
pub fn history<'a>(collections: &'a Collections, donor_id: &RecordId) -> Vec<&'a Donation> {
    collections
        .donations
        .iter()
        .filter(|d| &d.donor_id == donor_id)
        .collect()
}

/// Keep exactly one linked item iff the donation is in-kind with a category.
fn reconcile_item(collections: &mut Collections, donation: &Donation, report: &mut SyncReport) {
    let pos = linked_position(collections, &donation.id);
    let category = donation.category().filter(|_| donation.is_in_kind());

    match (category, pos) {
        (Some(category), Some(pos)) => {
            let item = &mut collections.inventory[pos];
            item.name = category.to_string();
            item.category = category.to_string();
            if let Some(description) = donation.description_text() {
                item.description = Some(description.to_string());
            }
            item.quantity = donation.unit_count();
            report.push(Effect::Applied(Change::ItemUpdated {
                item_id: item.id,
                quantity: item.quantity,
            }));
        }
        // Upsert: an in-kind donation that lost its item gets a new one.
        (Some(category), None) => {
            let item = linked_item(donation, category);
            report.push(Effect::Applied(Change::ItemCreated {
                item_id: item.id,
                quantity: item.quantity,
            }));
            collections.inventory.push(item);
        }
        (None, Some(pos)) => {
            let item = collections.inventory.remove(pos);
            report.push(Effect::Applied(Change::ItemRemoved { item_id: item.id }));
        }
        (None, None) if donation.is_in_kind() => {
            report.push(Effect::Skipped(SkipReason::NoLinkedItem));
        }
        (None, None) => {}
    }
}

fn linked_item(donation: &Donation, category: &str) -> InventoryItem {
    InventoryItem {
        id: RecordId::new(),
        name: category.to_string(),
        category: category.to_string(),
        quantity: donation.unit_count(),
        intake_date: donation.date,
        condition: ItemCondition::New,
        description: donation.description_text().map(String::from),
        donation_id: Some(donation.id),
    }
}

fn linked_position(collections: &Collections, donation_id: &RecordId) -> Option<usize> {
    collections
        .inventory
        .iter()
        .position(|i| i.donation_id.as_ref() == Some(donation_id))
}

fn donor_exists(collections: &Collections, donor_id: &RecordId) -> bool {
    collections.donors.iter().any(|d| &d.id == donor_id)
}

fn history_effect(
    collections: &Collections,
    donor_id: RecordId,
    change: impl FnOnce(RecordId) -> Change,
) -> Effect {
    if donor_exists(collections, &donor_id) {
        Effect::Applied(change(donor_id))
    } else {
        Effect::Skipped(SkipReason::DonorNotFound { donor_id })
    }
}
