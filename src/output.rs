// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Supports normal, quiet (CI), and JSON output modes plus outcome records.

use serde::Serialize;
use std::net::IpAddr;
use std::time::Instant;

use crate::error::Error;
use crate::fleet::{AssignOutcome, ReconcileError};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (only final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print a warning (suppressed in json mode; records carry failures there).
    pub fn warning(&self, message: &str) {
        if self.mode != OutputMode::Json {
            eprintln!("Warning: {message}");
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                if elapsed > 0.0 {
                    println!("{message} ({:.1}s)", elapsed);
                } else {
                    println!("{message}");
                }
            }
            OutputMode::Quiet => {
                println!("{message}");
            }
            OutputMode::Json => {}
        }
    }

    /// Report a successful reconciliation: prose in normal/quiet mode,
    /// the structured record on stdout in json mode.
    pub fn outcome(&self, outcome: &AssignOutcome) {
        let record = AssignRecord::from_outcome(outcome);
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                self.success(&describe_outcome(outcome));
            }
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(&record) {
                    println!("{json}");
                }
            }
        }
    }

    /// Report a failure: prose on stderr, or the structured error record
    /// in json mode when the error has one.
    pub fn failure(&self, error: &Error) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {error}");
            }
            OutputMode::Json => {
                let record = match error {
                    Error::Reconcile(e) => FailureRecord::from_reconcile(e),
                    _ => None,
                };
                let record = record.unwrap_or_else(|| FailureRecord::generic(&error.to_string()));
                if let Ok(json) = serde_json::to_string(&record) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print an arbitrary serializable value in json mode, or the given
    /// prose lines otherwise.
    pub fn listing<T: Serialize>(&self, value: &T, lines: &[String]) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                for line in lines {
                    println!("{line}");
                }
            }
            OutputMode::Json => {
                if let Ok(json) = serde_json::to_string(value) {
                    println!("{json}");
                }
            }
        }
    }
}

fn describe_outcome(outcome: &AssignOutcome) -> String {
    match outcome {
        AssignOutcome::Created { ip, target } => {
            format!("Created floating IP {ip} for instance {target}")
        }
        AssignOutcome::AlreadyAssigned { ip, instance } => {
            format!("Floating IP {ip} already assigned to instance {instance}")
        }
        AssignOutcome::Reassigned { ip, source, target } => {
            format!("Re-assigned floating IP {ip} from instance {source} to {target}")
        }
    }
}

/// Structured success record.
#[derive(Debug, Serialize)]
pub struct AssignRecord {
    pub outcome: &'static str,
    pub ip: IpAddr,
    #[serde(rename = "source-instance")]
    pub source_instance: Option<u64>,
    #[serde(rename = "target-instance")]
    pub target_instance: u64,
}

impl AssignRecord {
    pub fn from_outcome(outcome: &AssignOutcome) -> Self {
        match *outcome {
            AssignOutcome::Created { ip, target } => Self {
                outcome: "created",
                ip,
                source_instance: None,
                target_instance: target.value(),
            },
            AssignOutcome::AlreadyAssigned { ip, instance } => Self {
                outcome: "already-assigned",
                ip,
                source_instance: Some(instance.value()),
                target_instance: instance.value(),
            },
            AssignOutcome::Reassigned { ip, source, target } => Self {
                outcome: "re-assigned",
                ip,
                source_instance: Some(source.value()),
                target_instance: target.value(),
            },
        }
    }
}

/// Structured failure record. Optional fields are omitted entirely when
/// a code carries no context; `source-instance` is serialized as an
/// explicit null on the create-timeout record.
#[derive(Debug, Serialize)]
pub struct FailureRecord {
    #[serde(rename = "error-code")]
    pub error_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,

    #[serde(rename = "source-instance", skip_serializing_if = "Option::is_none")]
    pub source_instance: Option<Option<u64>>,

    #[serde(rename = "target-instance", skip_serializing_if = "Option::is_none")]
    pub target_instance: Option<u64>,

    #[serde(rename = "timeout-in-seconds", skip_serializing_if = "Option::is_none")]
    pub timeout_in_seconds: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FailureRecord {
    fn bare(error_code: &str) -> Self {
        Self {
            error_code: error_code.to_string(),
            ip: None,
            source_instance: None,
            target_instance: None,
            timeout_in_seconds: None,
            message: None,
        }
    }

    pub fn generic(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::bare("error")
        }
    }

    /// The structured record for a reconcile error, if it has one.
    /// Provider errors have no record shape and render as prose.
    pub fn from_reconcile(error: &ReconcileError) -> Option<Self> {
        match *error {
            ReconcileError::NoInstance => Some(Self::bare("no-instance")),
            ReconcileError::NoFloatingIp => Some(Self::bare("no-ip")),
            ReconcileError::AlreadyHasIp { ip } => Some(Self {
                ip: Some(ip),
                ..Self::bare("has-ip")
            }),
            ReconcileError::CreateTimedOut {
                ip,
                target,
                timeout,
            } => Some(Self {
                ip: Some(ip),
                source_instance: Some(None),
                target_instance: Some(target.value()),
                timeout_in_seconds: Some(timeout.as_secs()),
                ..Self::bare("create-timed-out")
            }),
            ReconcileError::ReassignTimedOut {
                ip,
                source_instance: source,
                target,
                timeout,
            } => Some(Self {
                ip: Some(ip),
                source_instance: Some(Some(source.value())),
                target_instance: Some(target.value()),
                timeout_in_seconds: Some(timeout.as_secs()),
                ..Self::bare("reassign-timed-out")
            }),
            ReconcileError::Provider(_) => None,
        }
    }
}
