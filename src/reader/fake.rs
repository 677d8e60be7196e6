// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! A fake DDF CSV reader with traced methods.
//!
//! There is no real loading here. `load_data_package` either rejects with
//! `wrong query` or resolves with the parameters plus `additionalData`.
//! Instrumentation is declared once for the type:
//!
//! | method              | arity | async | traced params |
//! |---------------------|-------|-------|---------------|
//! | `load_data_package` | 1     | yes   | -             |
//! | `query`             | 3     | yes   | 0             |
//! | `sum`               | 2     | no    | -             |

use std::future::{self, Future};
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::Lazy;

use crate::call_args;
use crate::error::{InstrumentError, ReaderError};
use crate::instrument::{
    wrap_with_tracing, InstrumentationRegistry, Interceptor, MethodIdentity, TraceLog,
};
use crate::types::{CallOptions, TraceEvent};

use super::query::DataPackageQuery;

static INSTRUMENTATION: Lazy<Result<InstrumentationRegistry, InstrumentError>> =
    Lazy::new(declare_instrumentation);

fn declare_instrumentation() -> Result<InstrumentationRegistry, InstrumentError> {
    let mut registry = InstrumentationRegistry::new();

    registry
        .declare(FakeDdfCsvReader::method("load_data_package"), 1)
        .asynchronous()
        .register()?;
    registry
        .declare(FakeDdfCsvReader::method("query"), 3)
        .asynchronous()
        .trace_param(0)
        .register()?;
    registry
        .declare(FakeDdfCsvReader::method("sum"), 2)
        .register()?;

    Ok(registry)
}

/// Reader whose every method call lands in its trace log.
#[derive(Debug)]
pub struct FakeDdfCsvReader {
    is_rejection_needed: AtomicBool,
    log: TraceLog,
    load_tracer: Interceptor,
    query_tracer: Interceptor,
    sum_tracer: Interceptor,
}

impl FakeDdfCsvReader {
    /// Create a reader. Fails only if the type's instrumentation is invalid.
    pub fn new(is_rejection_needed: bool) -> Result<Self, InstrumentError> {
        let registry = Self::instrumentation()?;
        let log = registry.initialize_trace_log();

        Ok(Self {
            is_rejection_needed: AtomicBool::new(is_rejection_needed),
            load_tracer: Self::tracer(registry, &log, "load_data_package")?,
            query_tracer: Self::tracer(registry, &log, "query")?,
            sum_tracer: Self::tracer(registry, &log, "sum")?,
            log,
        })
    }

    fn tracer(
        registry: &InstrumentationRegistry,
        log: &TraceLog,
        name: &'static str,
    ) -> Result<Interceptor, InstrumentError> {
        let method = Self::method(name);
        let config = registry.try_method_config(&method)?;
        Ok(wrap_with_tracing(method, config, log.clone()))
    }

    /// The instrumentation declared for this type.
    pub fn instrumentation() -> Result<&'static InstrumentationRegistry, InstrumentError> {
        INSTRUMENTATION.as_ref().map_err(Clone::clone)
    }

    pub fn method(name: &'static str) -> MethodIdentity {
        MethodIdentity::of::<Self>(name)
    }

    pub fn is_rejection_needed(&self) -> bool {
        self.is_rejection_needed.load(Ordering::SeqCst)
    }

    /// Load a data package for `par`.
    ///
    /// The outcome is decided at call time; the returned future only hands
    /// it over.
    pub fn load_data_package(
        &self,
        mut par: DataPackageQuery,
    ) -> impl Future<Output = Result<String, ReaderError>> {
        let call = self.load_tracer.start(&call_args![par], CallOptions::default());
        let outcome = self.resolve_package(&mut par);
        call.complete_async(future::ready(outcome))
    }

    /// Run a query. `options.verbose` suppresses this call's own
    /// `started`/`ok` events; the nested load is traced on its own terms.
    pub fn query(
        &self,
        par: DataPackageQuery,
        is_rejection_needed: bool,
        options: CallOptions,
    ) -> impl Future<Output = Result<String, ReaderError>> {
        let call = self
            .query_tracer
            .start(&call_args![par, is_rejection_needed, options], options);

        self.is_rejection_needed
            .store(is_rejection_needed, Ordering::SeqCst);
        let package = self.load_data_package(par);

        call.complete_async(package)
    }

    pub fn sum(&self, a: i64, b: i64) -> i64 {
        self.sum_tracer
            .call(&call_args![a, b], CallOptions::default(), || a + b)
    }

    /// Snapshot of everything traced on this instance so far.
    pub fn verbosity_data(&self) -> Vec<TraceEvent> {
        self.log.snapshot()
    }

    /// Read-only handle to the trace log.
    pub fn trace_log(&self) -> &TraceLog {
        &self.log
    }

    fn resolve_package(&self, par: &mut DataPackageQuery) -> Result<String, ReaderError> {
        if self.is_rejection_needed() {
            return Err(ReaderError::WrongQuery(par.to_pretty_json()?));
        }

        par.additional_data = Some(self.sum(2, 2));
        Ok(format!("my result {}", par.to_pretty_json()?))
    }
}
