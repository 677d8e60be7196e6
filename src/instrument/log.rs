// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Per-instance append-only trace log.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Serialize, Serializer};

use crate::types::{TraceEvent, TraceStatus};

/// Ordered, append-only sequence of [`TraceEvent`]s owned by one instance.
///
/// Cloning yields another handle to the same log; every interceptor of an
/// instance holds one. Readers only ever get snapshots. There is no eviction.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Arc<Mutex<Vec<TraceEvent>>>,
}

impl TraceLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&self, event: TraceEvent) {
        self.lock().push(event);
    }

    /// Copy of all events in insertion order.
    pub fn snapshot(&self) -> Vec<TraceEvent> {
        self.lock().clone()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Events recorded for one method, in order.
    pub fn events_for(&self, method: &str) -> Vec<TraceEvent> {
        self.lock()
            .iter()
            .filter(|event| event.method == method)
            .cloned()
            .collect()
    }

    /// Count events with the given method and status.
    pub fn count(&self, method: &str, status: TraceStatus) -> usize {
        self.lock()
            .iter()
            .filter(|event| event.method == method && event.status == status)
            .count()
    }

    /// Whether both handles point at the same log.
    pub fn same_log(&self, other: &TraceLog) -> bool {
        Arc::ptr_eq(&self.events, &other.events)
    }

    /// Render as pretty-printed JSON (two-space indent).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&*self.lock())
    }

    /// Render as compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TraceEvent>> {
        // A panic while holding the lock cannot leave a half-written event.
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Serialize for TraceLog {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.lock().serialize(serializer)
    }
}
