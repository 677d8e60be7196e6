// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Query parameters accepted by the data readers.

use serde::{Deserialize, Serialize};

/// Parameters of a data-package query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPackageQuery {
    /// What to select (e.g. `concepts`).
    pub select: String,

    /// Filled in by the reader while loading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_data: Option<i64>,
}

impl DataPackageQuery {
    pub fn select(select: impl Into<String>) -> Self {
        Self {
            select: select.into(),
            additional_data: None,
        }
    }

    /// Pretty JSON with two-space indentation.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
