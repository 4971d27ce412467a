//! Runs progress-page tasks through the system shell.

use std::process::Command;

use waymark_core::{Task, TaskError, TaskRunner, Variables, expand_placeholders};

/// Runs each task's command with `sh -c` (`cmd /C` on Windows) after
/// expanding `{{name}}` placeholders.
#[derive(Debug, Clone, Default)]
pub struct ShellTaskRunner {
    /// Commands that ran, in order, after expansion.
    pub history: Vec<String>,
}

impl ShellTaskRunner {
    pub fn new() -> Self {
        Self::default()
    }
}

fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

impl TaskRunner for ShellTaskRunner {
    fn run(&mut self, task: &Task, variables: &Variables) -> Result<(), TaskError> {
        let command = expand_placeholders(&task.command, variables);
        if command.trim().is_empty() {
            tracing::debug!(task = %task.id, "no command, nothing to run");
            return Ok(());
        }

        tracing::info!(task = %task.id, command = %command, "running task");
        let output = shell(&command)
            .output()
            .map_err(|e| TaskError::new(format!("cannot start shell: {e}")))?;
        self.history.push(command);

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = match stderr.trim() {
            "" => output.status.to_string(),
            text => format!("{}: {text}", output.status),
        };
        Err(TaskError::new(detail))
    }
}
