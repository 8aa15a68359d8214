//! Record store for the Soupline kitchen dashboard.
//!
//! Holds the four record collections in memory and mirrors each one to a
//! key-value [`Backend`] as a JSON blob after every mutation.
//!
//! # Backends
//!
//! All backends implement the [`Backend`] trait:
//!
//! - [`MemoryBackend`] -- `HashMap`-based backend for tests and embedding
//! - [`FileBackend`] -- one JSON file per collection in a data directory
//!
//! # Design Rules
//!
//! 1. Collections are persisted under the keys `donors`, `donations`,
//!    `inventory` and `employees`.
//! 2. A missing key loads as an empty collection; an unparseable one fails.
//! 3. Every mutation saves the collections it touched before returning.
//! 4. Backend errors are propagated to the caller.

pub mod error;
pub mod file;
pub mod memory;
pub mod records;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileBackend;
pub use memory::MemoryBackend;
pub use records::{Collections, RecordStore};
pub use traits::Backend;
