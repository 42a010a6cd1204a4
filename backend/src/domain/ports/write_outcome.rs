//! Acknowledgements returned by repository writes.
//!
//! These are also the JSON bodies clients receive, so field names follow the
//! response contract (`insertedId`, `deletedCount`, ...).

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Acknowledgement for a successful insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertOutcome {
    /// Identifier assigned to the new record.
    pub inserted_id: Uuid,
}

impl InsertOutcome {
    pub fn new(inserted_id: Uuid) -> Self {
        Self { inserted_id }
    }
}

/// Acknowledgement for a delete by id.
///
/// Deleting a missing id is not an error; it reports `deletedCount: 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    /// Number of removed records, `0` or `1`.
    pub deleted_count: u64,
}

impl DeleteOutcome {
    /// Build an outcome from the number of affected rows.
    pub fn from_rows(rows: usize) -> Self {
        Self {
            deleted_count: u64::try_from(rows).unwrap_or(u64::MAX),
        }
    }
}

/// Acknowledgement for a replace-or-insert by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    /// `1` when a record with the id already existed.
    pub matched_count: u64,
    /// `1` when the existing record differed from the replacement.
    pub modified_count: u64,
    /// Set when no record matched and a new one was inserted.
    pub upserted_id: Option<Uuid>,
}

impl UpsertOutcome {
    /// An existing record was found; `changed` tells whether it differed.
    pub fn matched(changed: bool) -> Self {
        Self {
            matched_count: 1,
            modified_count: u64::from(changed),
            upserted_id: None,
        }
    }

    /// Nothing matched and the record was inserted under `id`.
    pub fn inserted(id: Uuid) -> Self {
        Self {
            matched_count: 0,
            modified_count: 0,
            upserted_id: Some(id),
        }
    }
}
