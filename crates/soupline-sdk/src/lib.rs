//! High-level API for the Soupline kitchen dashboard.
//!
//! [`Kitchen`] is the entry point for applications: it validates input,
//! applies create/update/remove operations to the record store, keeps
//! donations and inventory linked through [`sync`], and derives dashboard
//! statistics on demand.

pub mod error;
pub mod kitchen;
pub mod stats;
pub mod sync;

pub use error::{SdkError, SdkResult};
pub use kitchen::{Kitchen, Synced};
pub use sync::{Change, Effect, SkipReason, SyncReport};

// Re-export key types
pub use soupline_store::{Backend, FileBackend, MemoryBackend, RecordStore, StoreError};
pub use soupline_types::{
    DashboardStats, Donation, DonationKind, DonationStatus, Donor, Employee, EmploymentStatus,
    EntityKind, InventoryItem, ItemCondition, NewDonation, NewDonor, NewEmployee,
    NewInventoryItem, PaymentMethod, RecordId, Validate, ValidationError,
};
