//! External program browser delegate
//!
//! Runs the configured automation program once per domain, in order, with the
//! domain appended as the final argument. Exit code 0 means the toggle went
//! through.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use autorenew_core::error::{CoreError, CoreResult};
use autorenew_core::types::{ToggleFailure, ToggleOutcome};
use autorenew_core::AutoRenewToggler;
use autorenew_provider::log_sanitizer::truncate_for_log;
use tokio::process::Command;
use tokio::time::timeout;

pub struct CommandToggler {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandToggler {
    /// `command` is the program followed by its leading arguments.
    pub fn new(command: &[String], timeout: Duration) -> CoreResult<Self> {
        let Some((program, args)) = command.split_first() else {
            return Err(CoreError::ValidationError(
                "toggle command is empty".to_string(),
            ));
        };

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
            timeout,
        })
    }

    async fn toggle_one(&self, domain: &str) -> CoreResult<()> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(domain)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(CoreError::AutomationFailure(format!(
                    "failed to start '{}': {e}",
                    self.program
                )));
            }
            Err(_) => {
                return Err(CoreError::AutomationFailure(format!(
                    "timed out after {}s toggling {domain}",
                    self.timeout.as_secs_f32()
                )));
            }
        };

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(CoreError::AutomationFailure(format!(
            "'{}' {} for {domain}: {}",
            self.program,
            output.status,
            truncate_for_log(stderr.trim())
        )))
    }
}

#[async_trait]
impl AutoRenewToggler for CommandToggler {
    async fn run_auto_renew_toggle(&self, domains: &[String]) -> CoreResult<ToggleOutcome> {
        let total = domains.len();
        let mut outcome = ToggleOutcome {
            attempted: total,
            failures: Vec::new(),
            simulated: false,
        };

        for (index, domain) in domains.iter().enumerate() {
            log::info!("Enabling auto-renew for {domain} ({} of {total})", index + 1);

            if let Err(e) = self.toggle_one(domain).await {
                log::error!("Auto-renew toggle failed: {e}");
                outcome.failures.push(ToggleFailure {
                    domain: domain.clone(),
                    reason: e.to_string(),
                });
            }
        }

        log::info!(
            "Auto-renew toggle finished: {} succeeded, {} failed",
            outcome.succeeded(),
            outcome.failures.len()
        );
        Ok(outcome)
    }
}
