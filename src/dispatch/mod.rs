//! # Dispatcher
//!
//! Drives one capability invocation through its states:
//! `RECEIVED → SANITIZED_IN → HANDLED → SANITIZED_OUT/AUDITED`, with an
//! `ERROR` terminal reachable from any state. An unknown name short-circuits
//! before sanitization or handler code runs (nothing to leak); sanitization
//! failures fail closed; handler failures are reported generically with the
//! detail kept in server-side logs.
//!
//! Each invocation is an independent unit of work. The dispatcher holds only
//! shared read-only state (registry, boundary policy), so invocations may
//! run concurrently without observing each other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use uuid::Uuid;

use crate::audit::AuditRecorder;
use crate::errors::DispatchError;
use crate::protocol::{CapabilityRequest, CapabilityResponse, CapabilitySummary};
use crate::registry::CapabilityRegistry;
use crate::sanitize::ZeroRetentionBoundary;

/// Dispatches capability invocations through the zero-retention boundary.
#[derive(Debug)]
pub struct Dispatcher {
    registry: Arc<CapabilityRegistry>,
    boundary: ZeroRetentionBoundary,
    audit: AuditRecorder,
    execution_timeout: Duration,
    /// Monotonic counters an external rate limiter can poll. Rate limiting
    /// itself is not enforced here.
    invocations: AtomicU64,
    failures: AtomicU64,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        boundary: ZeroRetentionBoundary,
        audit: AuditRecorder,
        execution_timeout: Duration,
    ) -> Self {
        Self {
            registry,
            boundary,
            audit,
            execution_timeout,
            invocations: AtomicU64::new(0),
            failures: AtomicU64::new(0),
        }
    }

    /// Total invocations dispatched since startup.
    pub fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    /// Invocations that terminated in the error state.
    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    /// Discovery summaries of every enabled capability.
    pub fn list_capabilities(&self) -> Vec<CapabilitySummary> {
        self.registry.summaries()
    }

    /// Run one invocation to completion.
    pub async fn dispatch(&self, request: &CapabilityRequest) -> CapabilityResponse {
        self.invocations.fetch_add(1, Ordering::Relaxed);
        let invocation_id = Uuid::new_v4();
        let name = request.capability_name.as_str();

        // RECEIVED: resolve the capability before touching the arguments.
        let Some(descriptor) = self.registry.get(name) else {
            log::warn!("[{invocation_id}] unknown capability '{name}'");
            return self.fail(
                name,
                &empty_fields(),
                DispatchError::UnknownCapability {
                    name: name.to_string(),
                },
            );
        };

        // SANITIZED_IN
        let raw_arguments = Value::Object(request.arguments.clone());
        let sanitized_args = match self.boundary.sanitize_inbound(&raw_arguments) {
            Ok(args) => args,
            Err(e) => {
                log::error!("[{invocation_id}] inbound sanitization failed for '{name}': {e}");
                return self.fail(name, &empty_fields(), DispatchError::SanitizationFailed);
            }
        };

        // The handler only ever sees sanitized arguments, so the input
        // contract is enforced on those.
        for required in descriptor.required_arguments() {
            if sanitized_args.get(required).map_or(true, Value::is_null) {
                return self.fail(
                    name,
                    &sanitized_args,
                    DispatchError::MissingRequiredArgument {
                        argument: required.to_string(),
                    },
                );
            }
        }

        // HANDLED: bounded wait; suspension is awaited without holding locks.
        log::debug!("[{invocation_id}] invoking '{name}'");
        let outcome = tokio::time::timeout(
            self.execution_timeout,
            descriptor.handler.handle(sanitized_args.clone()),
        )
        .await;

        let result = match outcome {
            Err(_elapsed) => {
                log::error!(
                    "[{invocation_id}] '{name}' exceeded {:?}",
                    self.execution_timeout
                );
                return self.fail(
                    name,
                    &sanitized_args,
                    DispatchError::ExecutionTimeout {
                        capability: name.to_string(),
                    },
                );
            }
            Ok(Err(e)) => {
                // Server-side detail only; the client gets a generic message.
                log::error!("[{invocation_id}] '{name}' failed: {e}");
                return self.fail(
                    name,
                    &sanitized_args,
                    DispatchError::ExecutionFailed {
                        capability: name.to_string(),
                    },
                );
            }
            Ok(Ok(result)) => result,
        };

        // SANITIZED_OUT/AUDITED: fail closed if the outbound pass errors.
        let sanitized_result = match self.boundary.sanitize_outbound(&result) {
            Ok(payload) => payload,
            Err(e) => {
                log::error!("[{invocation_id}] outbound sanitization failed for '{name}': {e}");
                return self.fail(name, &sanitized_args, DispatchError::SanitizationFailed);
            }
        };

        self.audit.record(name, &sanitized_args, true);
        CapabilityResponse::success(sanitized_result)
    }

    /// ERROR terminal: record a failed invocation and build the response.
    fn fail(&self, name: &str, sanitized: &Value, err: DispatchError) -> CapabilityResponse {
        self.failures.fetch_add(1, Ordering::Relaxed);
        self.audit.record(name, sanitized, false);
        CapabilityResponse::from_error(&err)
    }
}

fn empty_fields() -> Value {
    Value::Object(serde_json::Map::new())
}
