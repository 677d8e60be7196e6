// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Interceptor and registry behavior through the public API.

use serde_json::json;

use verbosity::call_args;
use verbosity::instrument::{InstrumentationRegistry, MethodConfig, MethodIdentity};
use verbosity::{wrap_with_tracing, CallOptions, InstrumentError, TraceLog, TraceStatus};

mod catalog {
    pub struct Store;
}

mod archive {
    pub struct Store;
}

/// A small instrumented type built the same way a real one would be.
struct Vault {
    log: TraceLog,
    open: verbosity::Interceptor,
    fetch: verbosity::Interceptor,
}

impl Vault {
    fn registry() -> InstrumentationRegistry {
        let mut registry = InstrumentationRegistry::new();
        registry
            .declare(MethodIdentity::of::<Vault>("open"), 2)
            .trace_param(0)
            .register()
            .unwrap();
        registry
            .declare(MethodIdentity::of::<Vault>("fetch"), 2)
            .asynchronous()
            .trace_param(1)
            .register()
            .unwrap();
        registry
    }

    fn new(registry: &InstrumentationRegistry) -> Self {
        let log = registry.initialize_trace_log();
        let open = MethodIdentity::of::<Vault>("open");
        let fetch = MethodIdentity::of::<Vault>("fetch");
        Self {
            open: wrap_with_tracing(open, registry.try_method_config(&open).unwrap(), log.clone()),
            fetch: wrap_with_tracing(fetch, registry.try_method_config(&fetch).unwrap(), log.clone()),
            log,
        }
    }

    fn open(&self, user: &str, password: &str) -> Result<String, String> {
        self.open.try_call(&call_args![user, password], CallOptions::default(), || {
            if password.is_empty() {
                Err(format!("no password for {user}"))
            } else {
                Ok(format!("session-{user}"))
            }
        })
    }

    async fn fetch(&self, key: u32, label: &str, options: CallOptions) -> Result<String, String> {
        let owned = label.to_string();
        self.fetch
            .call_async(&call_args![key, label], options, async move {
                if key == 0 {
                    Err("missing key".to_string())
                } else {
                    Ok(format!("{owned}:{key}"))
                }
            })
            .await
    }
}

#[test]
fn test_untraced_parameter_never_recorded() {
    let vault = Vault::new(&Vault::registry());
    vault.open("alice", "hunter2").unwrap();

    let started = &vault.log.snapshot()[0];
    assert_eq!(started.captured(0), Some(&json!("alice")));
    assert_eq!(started.captured(1), None);
    assert!(!vault.log.to_json().unwrap().contains("hunter2"));
}

#[test]
fn test_sync_failure_recorded() {
    let vault = Vault::new(&Vault::registry());
    let err = vault.open("bob", "").unwrap_err();

    let events = vault.log.snapshot();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].status, TraceStatus::Failed);
    assert_eq!(events[1].error, Some(json!(err)));
}

#[tokio::test]
async fn test_async_success_and_failure() {
    let vault = Vault::new(&Vault::registry());

    assert_eq!(vault.fetch(7, "doc", CallOptions::default()).await, Ok("doc:7".to_string()));
    assert!(vault.fetch(0, "doc", CallOptions::verbose()).await.is_err());

    let events = vault.log.snapshot();
    let summary: Vec<_> = events.iter().map(|e| (e.status, e.is_async())).collect();
    assert_eq!(
        summary,
        vec![
            (TraceStatus::Started, false),
            (TraceStatus::Ok, true),
            (TraceStatus::Failed, false),
        ]
    );
    assert_eq!(events[0].captured(1), Some(&json!("doc")));
    assert_eq!(events[0].captured(0), None);
}

#[test]
fn test_registration_idempotent_through_declare() {
    let mut registry = Vault::registry();
    registry
        .declare(MethodIdentity::of::<Vault>("fetch"), 2)
        .asynchronous()
        .trace_param(1)
        .register()
        .unwrap();

    assert_eq!(
        registry.method_config(&MethodIdentity::of::<Vault>("fetch")),
        MethodConfig::new().asynchronous().trace_param(1)
    );
}

#[test]
fn test_same_type_name_in_different_modules_stays_separate() {
    let mut registry = InstrumentationRegistry::new();
    registry
        .declare(MethodIdentity::of::<catalog::Store>("get"), 1)
        .asynchronous()
        .trace_param(0)
        .register()
        .unwrap();

    let other = MethodIdentity::of::<archive::Store>("get");
    assert_eq!(other.to_string(), "get@Store");
    assert!(!registry.is_async_method(&other));
    assert!(!registry.is_traced_parameter(&other.param(0)));
    assert_eq!(registry.method_config(&other), MethodConfig::new());
}

#[test]
fn test_invalid_declaration_fails_fast() {
    let mut registry = InstrumentationRegistry::new();
    let result = registry
        .declare(MethodIdentity::of::<Vault>("open"), 1)
        .trace_param(3)
        .register();

    assert!(matches!(
        result,
        Err(InstrumentError::InvalidDeclaration { position: 3, arity: 1, .. })
    ));
}

#[test]
fn test_separate_instances_separate_logs() {
    let registry = Vault::registry();
    let a = Vault::new(&registry);
    let b = Vault::new(&registry);

    a.open("x", "y").unwrap();
    assert_eq!(a.log.len(), 2);
    assert!(b.log.is_empty());
}

#[test]
fn test_undeclared_method_is_not_instrumented() {
    let registry = Vault::registry();
    let typo = MethodIdentity::of::<Vault>("opne");

    assert_eq!(
        registry.try_method_config(&typo),
        Err(InstrumentError::NotInstrumented("opne@Vault".to_string()))
    );
    // The infallible lookup still falls back to a plain synchronous config.
    assert_eq!(registry.method_config(&typo), MethodConfig::new());
}
