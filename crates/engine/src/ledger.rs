//! The module contains the compensation ledger a submission accumulates.
//!
//! Every backend resource a submission creates is appended here right
//! after the creating call returns. If a later step fails, [`unwind`]
//! deletes everything in reverse creation order. The ledger is an
//! explicit value handed through the submission path, so what would be
//! rolled back is inspectable at any point.
//!
//! [`unwind`]: CompensationLedger::unwind

use tracing::{error, info};
use uuid::Uuid;

use crate::backend::Backend;

/// One resource a submission created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatedResource {
    Asset(Uuid),
    Record(Uuid),
}

/// Creation-ordered list of resources to delete if the submission fails.
#[derive(Debug, Default)]
pub struct CompensationLedger {
    entries: Vec<CreatedResource>,
}

impl CompensationLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_asset(&mut self, id: Uuid) {
        self.entries.push(CreatedResource::Asset(id));
    }

    pub fn record_record(&mut self, id: Uuid) {
        self.entries.push(CreatedResource::Record(id));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entries(&self) -> &[CreatedResource] {
        &self.entries
    }

    /// Deletes every tracked resource, newest first, records before
    /// assets. Records must go first: a record can reference an asset
    /// created in the same submission, and the backend refuses to delete
    /// a still-referenced asset.
    ///
    /// A delete that fails is logged and skipped; the remaining entries
    /// are still attempted. Returns how many deletes succeeded. The
    /// original submission error stays the caller's error either way.
    pub async fn unwind<B: Backend>(self, backend: &B) -> usize {
        let mut deleted = 0;

        let records = self
            .entries
            .iter()
            .rev()
            .filter_map(|entry| match entry {
                CreatedResource::Record(id) => Some(*id),
                CreatedResource::Asset(_) => None,
            });
        for id in records {
            match backend.delete_record(id).await {
                Ok(()) => deleted += 1,
                Err(err) => {
                    error!(record_id = %id, error = %err, "compensation delete failed");
                }
            }
        }

        let assets = self
            .entries
            .iter()
            .rev()
            .filter_map(|entry| match entry {
                CreatedResource::Asset(id) => Some(*id),
                CreatedResource::Record(_) => None,
            });
        for id in assets {
            match backend.delete_asset(id).await {
                Ok(()) => deleted += 1,
                Err(err) => {
                    error!(asset_id = %id, error = %err, "compensation delete failed");
                }
            }
        }

        info!(deleted, "submission unwound");
        deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_keep_creation_order() {
        let mut ledger = CompensationLedger::new();
        let asset = Uuid::new_v4();
        let record = Uuid::new_v4();
        ledger.record_asset(asset);
        ledger.record_record(record);

        assert_eq!(ledger.len(), 2);
        assert_eq!(
            ledger.entries(),
            &[
                CreatedResource::Asset(asset),
                CreatedResource::Record(record)
            ]
        );
    }

    #[test]
    fn new_ledger_is_empty() {
        assert!(CompensationLedger::new().is_empty());
    }
}
