use thiserror::Error;

use soupline_types::{EntityKind, RecordId};

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("rejected submission: {0}")]
    Validation(#[from] soupline_types::ValidationError),

    #[error("{} not found: {id}", kind.noun())]
    NotFound { kind: EntityKind, id: RecordId },

    #[error("store error: {0}")]
    Store(#[from] soupline_store::StoreError),
}

impl SdkError {
    pub fn not_found(kind: EntityKind, id: RecordId) -> Self {
        Self::NotFound { kind, id }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
