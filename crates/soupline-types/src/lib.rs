//! Record types for the Soupline kitchen dashboard.
//!
//! Every other Soupline crate depends on `soupline-types`.
//!
//! # Key Types
//!
//! - [`RecordId`] -- time-ordered opaque identifier shared by all records
//! - [`Donor`], [`Donation`], [`InventoryItem`], [`Employee`] -- stored records
//! - [`NewDonor`], [`NewDonation`], [`NewInventoryItem`], [`NewEmployee`] -- creation payloads
//! - [`EntityKind`] -- the four persisted collections
//! - [`Record`] -- id and collection of every stored record
//! - [`DashboardStats`] -- derived aggregate figures
//! - [`Validate`] -- required-field checks run before any mutation

pub mod donation;
pub mod donor;
pub mod employee;
pub mod error;
pub mod id;
pub mod inventory;
pub mod kind;
pub mod record;
pub mod stats;
pub mod validate;

pub use donation::{
    Donation, DonationKind, DonationStatus, NewDonation, PaymentMethod, MAX_UNIT_COUNT,
};
pub use donor::{Donor, NewDonor};
pub use employee::{Employee, EmploymentStatus, NewEmployee};
pub use error::{ValidationError, ValidationResult};
pub use id::RecordId;
pub use inventory::{InventoryItem, ItemCondition, NewInventoryItem};
pub use kind::EntityKind;
pub use record::{replace_record, take_record, Record};
pub use stats::DashboardStats;
pub use validate::Validate;
