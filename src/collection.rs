// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::{ApiError, RecordsApi};
use crate::models::{Record, RecordInput, RecordKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared flag a view flips when it goes away; results arriving afterwards are dropped.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Cancelled,
}

/// The in-memory copy of one record kind that a view works against.
///
/// Authoritative only until the next full fetch.
#[derive(Debug, Clone)]
pub struct RecordCollection {
    kind: RecordKind,
    records: Vec<Record>,
}

impl RecordCollection {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn load(
        &mut self,
        api: &dyn RecordsApi,
        token: &CancelToken,
    ) -> Result<LoadOutcome, ApiError> {
        let fetched = api.list(self.kind)?;
        if token.is_cancelled() {
            tracing::debug!(kind = %self.kind, "view gone, discarding fetched records");
            return Ok(LoadOutcome::Cancelled);
        }
        self.records = fetched;
        Ok(LoadOutcome::Loaded(self.records.len()))
    }

    /// Create then refetch, so the collection mirrors the server.
    pub fn create(
        &mut self,
        api: &dyn RecordsApi,
        input: &RecordInput,
        token: &CancelToken,
    ) -> Result<Record, ApiError> {
        let created = api.create(self.kind, input)?;
        self.load(api, token)?;
        Ok(created)
    }

    pub fn update(
        &mut self,
        api: &dyn RecordsApi,
        id: i64,
        input: &RecordInput,
        token: &CancelToken,
    ) -> Result<Record, ApiError> {
        let updated = api.update(self.kind, id, input)?;
        self.load(api, token)?;
        Ok(updated)
    }

    /// Delete remotely, then splice the record out locally without a refetch.
    pub fn delete(
        &mut self,
        api: &dyn RecordsApi,
        id: i64,
        token: &CancelToken,
    ) -> Result<bool, ApiError> {
        api.delete(self.kind, id)?;
        if token.is_cancelled() {
            return Ok(false);
        }
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        Ok(self.records.len() != before)
    }
}
