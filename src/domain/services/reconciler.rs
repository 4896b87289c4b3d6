//! Environment Reconciler
//!
//! Create-or-update state machine for a named stack:
//!
//! ```text
//! ABSENT  --create--> CREATE_IN_PROGRESS --> STABLE | CREATE_FAILED
//! PRESENT --update--> UPDATE_IN_PROGRESS --> STABLE | UPDATE_FAILED
//! PRESENT --update ("No updates are to be performed.")--> STABLE
//! ```
//!
//! Nothing is cached between runs. Existence is always re-derived from the
//! control plane, so a run interrupted at any point can simply be repeated.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Convergence, DeploymentOutcome, TargetEnvironment};
use crate::domain::ports::{
    Capability, Clock, ControlPlaneError, ControlPlaneResult, DeployEvent, DeployEventSink,
    StackService,
};
use crate::domain::value_objects::EnvironmentState;
use crate::error::{DeployError, DeployResult, Phase};

/// Provider message returned when an update would change nothing
pub const NO_UPDATES_MESSAGE: &str = "No updates are to be performed.";

/// How often and how long to poll for a terminal state
#[derive(Debug, Clone, PartialEq)]
pub struct PollPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub multiplier: f64,
    pub max_attempts: u32,
    /// Failed polls tolerated in a row before the wait gives up
    pub max_consecutive_errors: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(5),
            max_interval: Duration::from_secs(30),
            multiplier: 1.5,
            max_attempts: 720,
            max_consecutive_errors: 5,
        }
    }
}

impl PollPolicy {
    /// Interval to wait after `current`, capped at `max_interval`
    pub fn next_interval(&self, current: Duration) -> Duration {
        let millis = (current.as_millis() as f64 * self.multiplier.max(1.0)).round() as u64;
        Duration::from_millis(millis).min(self.max_interval)
    }
}

/// Whether an update rejection means "already converged"
pub fn is_no_op_update(err: &ControlPlaneError) -> bool {
    err.message()
        .map(|m| m.trim() == NO_UPDATES_MESSAGE)
        .unwrap_or(false)
}

fn is_missing_stack(err: &ControlPlaneError) -> bool {
    match err {
        ControlPlaneError::NotFound => true,
        ControlPlaneError::Rejected { message, .. } => message.contains("does not exist"),
        _ => false,
    }
}

/// Converges a named stack to a rendered template
pub struct EnvironmentReconciler<'a, S: StackService, C: Clock> {
    stacks: &'a S,
    clock: &'a C,
    policy: PollPolicy,
    capabilities: Vec<Capability>,
    events: Arc<dyn DeployEventSink>,
}

impl<'a, S: StackService, C: Clock> EnvironmentReconciler<'a, S, C> {
    pub fn new(stacks: &'a S, clock: &'a C, events: Arc<dyn DeployEventSink>) -> Self {
        Self {
            stacks,
            clock,
            policy: PollPolicy::default(),
            capabilities: vec![Capability::Iam],
            events,
        }
    }

    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Look up a stack by exact name
    ///
    /// Lists every stack and filters client-side. A "does not exist"
    /// answer from the provider is absorbed as `None`.
    pub fn find_environment_by_name(&self, name: &str) -> DeployResult<Option<TargetEnvironment>> {
        self.lookup(name)
            .map_err(|e| DeployError::control_plane("describe-stacks", e))
    }

    fn lookup(&self, name: &str) -> ControlPlaneResult<Option<TargetEnvironment>> {
        match self.stacks.list_environments() {
            Ok(all) => Ok(all.into_iter().find(|env| env.name == name)),
            Err(e) if is_missing_stack(&e) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Observed state of `name` before any mutation
    pub fn current_state(&self, name: &str) -> DeployResult<EnvironmentState> {
        Ok(match self.find_environment_by_name(name)? {
            Some(_) => EnvironmentState::Present,
            None => EnvironmentState::Absent,
        })
    }

    /// Create or update `name` from `body` and wait until it is stable
    pub fn reconcile(&self, name: &str, body: &str) -> DeployResult<DeploymentOutcome> {
        match self.current_state(name)? {
            EnvironmentState::Absent => self.create(name, body),
            _ => self.update(name, body),
        }
    }

    fn create(&self, name: &str, body: &str) -> DeployResult<DeploymentOutcome> {
        self.events.on_event(DeployEvent::EnvironmentCreating {
            name: name.to_string(),
        });
        self.stacks
            .create_stack(name, body, &self.capabilities)
            .map_err(|e| DeployError::reconciliation(Phase::Create, name, e.to_string()))?;

        let env = self.await_terminal(name, Phase::Create)?;
        Ok(outcome(env, Convergence::Created))
    }

    fn update(&self, name: &str, body: &str) -> DeployResult<DeploymentOutcome> {
        self.events.on_event(DeployEvent::EnvironmentUpdating {
            name: name.to_string(),
        });
        match self.stacks.update_stack(name, body, &self.capabilities) {
            Ok(()) => {
                let env = self.await_terminal(name, Phase::Update)?;
                Ok(outcome(env, Convergence::Updated))
            }
            Err(e) if is_no_op_update(&e) => {
                self.events.on_event(DeployEvent::NoUpdates {
                    name: name.to_string(),
                });
                let env = self.find_environment_by_name(name)?.ok_or_else(|| {
                    DeployError::reconciliation(Phase::Update, name, "stack no longer exists")
                })?;
                Ok(outcome(env, Convergence::Unchanged))
            }
            Err(e) => Err(DeployError::reconciliation(Phase::Update, name, e.to_string())),
        }
    }

    /// Block until the stack reaches a terminal state for `phase`
    ///
    /// Returns the final description on success. Transient polling errors
    /// (including the stack not being visible yet) are tolerated up to
    /// `max_consecutive_errors` in a row.
    pub fn await_terminal(&self, name: &str, phase: Phase) -> DeployResult<TargetEnvironment> {
        let mut interval = self.policy.initial_interval;
        let mut consecutive_errors = 0u32;
        let detailed = self.events.wants_detailed_events();

        for attempt in 1..=self.policy.max_attempts {
            let observed = self.lookup(name).and_then(|found| {
                found.ok_or_else(|| {
                    ControlPlaneError::Transport(format!("stack '{}' is not visible yet", name))
                })
            });

            match observed {
                Ok(env) => {
                    consecutive_errors = 0;
                    let state = EnvironmentState::classify(phase, &env.status);
                    if state == EnvironmentState::Stable {
                        return Ok(env);
                    }
                    if state.is_failure() {
                        return Err(DeployError::reconciliation(
                            phase,
                            name,
                            env.describe_status(),
                        ));
                    }
                    if detailed {
                        self.events.on_event(DeployEvent::Waiting {
                            name: name.to_string(),
                            status: env.status.clone(),
                            attempt,
                        });
                    }
                }
                Err(e) => {
                    consecutive_errors += 1;
                    if consecutive_errors > self.policy.max_consecutive_errors {
                        return Err(DeployError::reconciliation(
                            phase,
                            name,
                            format!("status polling failed: {}", e),
                        ));
                    }
                    if detailed {
                        self.events.on_event(DeployEvent::PollFailed {
                            name: name.to_string(),
                            error: e.to_string(),
                            attempt,
                        });
                    }
                }
            }

            if attempt < self.policy.max_attempts {
                self.clock.sleep(interval);
                interval = self.policy.next_interval(interval);
            }
        }

        Err(DeployError::reconciliation(
            phase,
            name,
            format!(
                "timed out after {} status checks",
                self.policy.max_attempts
            ),
        ))
    }
}

fn outcome(env: TargetEnvironment, convergence: Convergence) -> DeploymentOutcome {
    DeploymentOutcome {
        stack_name: env.name,
        state: EnvironmentState::Stable,
        convergence,
        outputs: env.outputs,
    }
}
