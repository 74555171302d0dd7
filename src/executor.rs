// Netprofile - Application Executor
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Runs a plan against the configuration provider.
//!
//! Operations run strictly in order, one at a time. A failed address step
//! aborts the plan: DNS changes on a misaddressed interface are meaningless.
//! A failed DNS step is recorded and the remaining DNS steps still run.
//! A missing configuration tool ends the whole session and is returned as an
//! error instead of a step outcome.

use std::time::Instant;
use tracing::{debug, error, info, warn};

use crate::backend::{DnsSource, NetworkConfigProvider, ProviderError, ProviderResult};
use crate::models::{ApplicationResult, Error, FailureReason, Operation, OperationOutcome, Result};

/// Executes plans built by the planner.
pub struct ApplicationExecutor<'a, P: NetworkConfigProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: NetworkConfigProvider + ?Sized> ApplicationExecutor<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Execute `operations` in order.
    pub fn execute(&self, operations: &[Operation]) -> Result<ApplicationResult> {
        let adapter = operations
            .first()
            .map(|op| op.adapter())
            .unwrap_or_default();
        let mut result = ApplicationResult::new(adapter);

        for (index, operation) in operations.iter().enumerate() {
            debug!("Step {}/{}: {}", index + 1, operations.len(), operation);
            let started = Instant::now();
            let outcome = self.dispatch(operation);
            let duration_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(()) => {
                    info!("{}", operation);
                    result.record(operation.clone(), OperationOutcome::Success, duration_ms);
                }
                Err(ProviderError::CommandNotFound(program)) => {
                    error!(
                        "Configuration tool not found while running {}",
                        operation.name()
                    );
                    let reason = FailureReason::Unavailable {
                        diagnostic: format!("command not found: {}", program),
                    };
                    result.record(
                        operation.clone(),
                        OperationOutcome::Failed(reason),
                        duration_ms,
                    );
                    result.abort_at(index);
                    result.finalize();
                    let detail = unavailable_detail(&program, &result);
                    return Err(Error::ProviderUnavailable(detail));
                }
                Err(e) => {
                    let reason = failure_reason(e);
                    result.record(
                        operation.clone(),
                        OperationOutcome::Failed(reason.clone()),
                        duration_ms,
                    );
                    if operation.is_address_stage() {
                        error!(
                            "{} failed on '{}', aborting plan: {}",
                            operation.name(),
                            operation.adapter(),
                            reason
                        );
                        result.abort_at(index);
                        break;
                    }
                    warn!(
                        "{} failed on '{}', continuing: {}",
                        operation.name(),
                        operation.adapter(),
                        reason
                    );
                }
            }
        }

        result.finalize();
        Ok(result)
    }

    fn dispatch(&self, operation: &Operation) -> ProviderResult<()> {
        match operation {
            Operation::SetStaticAddress {
                adapter,
                ip,
                subnet,
                gateway,
            } => {
                let gateway = Some(gateway.as_str()).filter(|g| !g.is_empty());
                self.provider.set_static_address(adapter, ip, subnet, gateway)
            }
            Operation::SetDhcpAddress { adapter } => self.provider.set_dhcp_address(adapter),
            Operation::ClearDnsToDhcp { adapter } | Operation::SetDnsDhcp { adapter } => {
                self.provider.set_dns_source(adapter, DnsSource::Dhcp)
            }
            Operation::SetPrimaryDns { adapter, dns } => {
                self.provider.set_primary_dns(adapter, dns)
            }
            Operation::AddSecondaryDns {
                adapter,
                dns,
                index,
            } => self.provider.add_secondary_dns(adapter, dns, *index),
        }
    }
}

/// Name the missing program and whatever had already been applied.
fn unavailable_detail(program: &str, result: &ApplicationResult) -> String {
    let applied: Vec<&str> = result
        .steps
        .iter()
        .filter(|s| s.outcome.is_success())
        .map(|s| s.operation.name())
        .collect();
    if applied.is_empty() {
        return program.to_string();
    }
    let count = applied.len();
    let applied = applied.join(", ");
    error!(
        "Partially applied to '{}' before the tool went missing: {}",
        result.adapter, applied
    );
    format!(
        "{} (after {} completed operation(s) on '{}': {})",
        program, count, result.adapter, applied
    )
}

fn failure_reason(error: ProviderError) -> FailureReason {
    match error {
        ProviderError::Timeout { .. } => FailureReason::Timeout,
        ProviderError::CommandFailed {
            code, diagnostic, ..
        } => FailureReason::Rejected { code, diagnostic },
        ProviderError::CommandNotFound(program) => FailureReason::Unavailable {
            diagnostic: format!("command not found: {}", program),
        },
        ProviderError::Io(diagnostic) => FailureReason::Unavailable { diagnostic },
    }
}
