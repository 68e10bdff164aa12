use serde_json::Value;
use std::{path::PathBuf, process::Stdio, time::Duration};
use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::StatsConfig;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Failed to start statistics script: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("Statistics script timed out after {0:?}")]
    Timeout(Duration),
    #[error("Statistics script exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("Statistics script returned invalid JSON: {0}")]
    InvalidOutput(#[from] serde_json::Error),
    /// The script ran but reported a problem, e.g. an unknown team name.
    #[error("{0}")]
    Script(String),
}

/// Runs the team-vs-team statistics script and hands back its JSON verbatim.
#[derive(Debug, Clone)]
pub struct StatsClient {
    python: String,
    script: PathBuf,
    timeout: Duration,
}

impl StatsClient {
    pub fn new(config: &StatsConfig) -> Self {
        Self {
            python: config.python.clone(),
            script: config.script.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub async fn game_stats(&self, team1: &str, team2: &str) -> Result<Value, StatsError> {
        info!("Generating game stats for {} vs {}", team1, team2);

        let child = Command::new(&self.python)
            .arg(&self.script)
            .arg("generate_game_stats")
            .arg(team1)
            .arg(team2)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| StatsError::Timeout(self.timeout))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Statistics script failed ({}): {}", output.status, stderr);
            return Err(StatsError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let stats: Value = serde_json::from_slice(&output.stdout)?;
        if let Some(message) = stats.get("error").and_then(Value::as_str) {
            debug!("Statistics script reported: {}", message);
            return Err(StatsError::Script(message.to_string()));
        }

        Ok(stats)
    }
}
