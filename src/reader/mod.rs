// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Instrumented data readers.
//!
//! Only a fake reader exists; it stands in for a real DDF CSV reader so the
//! instrumentation engine has something to trace.
//!
//! # Example
//!
//! ```rust,ignore
//! use verbosity::reader::{DataPackageQuery, FakeDdfCsvReader};
//! use verbosity::types::CallOptions;
//!
//! let reader = FakeDdfCsvReader::new(false)?;
//! let result = reader
//!     .query(DataPackageQuery::select("concepts"), false, CallOptions::default())
//!     .await?;
//! println!("{}", serde_json::to_string_pretty(&reader.verbosity_data())?);
//! ```

mod fake;
mod query;

pub use fake::FakeDdfCsvReader;
pub use query::DataPackageQuery;
