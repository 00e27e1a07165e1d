//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::tool_settings::{SIGNAL_EXIT_BASE, SPAWN_FAILURE_STATUS};
use crate::resources::sys_paths::K_SHELL_PATH;
use crate::utils::strings;

use std::io::Read;
use std::os::unix::process::ExitStatusExt;
use std::process::{Command, ExitStatus, Stdio};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: i32,
    pub output: String,
}

impl CommandResult {
    fn spawn_failure() -> Self {
        Self {
            status: SPAWN_FAILURE_STATUS,
            output: String::new(),
        }
    }
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signo)) => SIGNAL_EXIT_BASE + signo,
        (None, None) => SPAWN_FAILURE_STATUS,
    }
}

fn shell_command(command: &str) -> Command {
    let mut cmd = Command::new(K_SHELL_PATH);
    cmd.arg("-c").arg(command);
    cmd
}

pub fn run(command: &str) -> i32 {
    log::debug!("Shell: {command}");
    match shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
    {
        Ok(status) => exit_code(status),
        Err(e) => {
            log::error!("Shell: Failed to spawn '{command}': {e}");
            SPAWN_FAILURE_STATUS
        }
    }
}

pub fn run_captured(command: &str) -> CommandResult {
    log::debug!("Shell (captured): {command}");
    let mut child = match shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            log::error!("Shell: Failed to spawn '{command}': {e}");
            return CommandResult::spawn_failure();
        }
    };
    let mut raw = Vec::with_capacity(4096);
    if let Some(mut stdout) = child.stdout.take()
        && let Err(e) = stdout.read_to_end(&mut raw)
    {
        log::warn!("Shell: Output of '{command}' truncated: {e}");
    }
    let status = match child.wait() {
        Ok(status) => exit_code(status),
        Err(e) => {
            log::error!("Shell: Failed to wait for '{command}': {e}");
            SPAWN_FAILURE_STATUS
        }
    };
    let output = strings::strip_trailing_newline(String::from_utf8_lossy(&raw).into_owned());
    CommandResult { status, output }
}

/// Runs `program` directly with `args`, without a shell in between.
pub fn exec(program: &str, args: &[&str]) -> i32 {
    log::debug!("Exec: {program} {}", args.join(" "));
    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .status()
    {
        Ok(status) => exit_code(status),
        Err(e) => {
            log::error!("Exec: Failed to spawn '{program}': {e}");
            SPAWN_FAILURE_STATUS
        }
    }
}

/// Runs every command in order and returns how many exited with status 0.
pub fn run_batch<S: AsRef<str>>(commands: &[S]) -> usize {
    commands
        .iter()
        .filter(|command| run(command.as_ref()) == 0)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_reports_exit_code() {
        assert_eq!(run("true"), 0);
        assert_eq!(run("exit 3"), 3);
    }

    #[test]
    fn signal_termination_maps_to_shell_convention() {
        assert_eq!(run("kill -9 $$"), 128 + libc::SIGKILL);
    }

    #[test]
    fn captured_output_loses_one_trailing_newline() {
        let result = run_captured("printf 'a\\nb\\n'");
        assert!(result.success());
        assert_eq!(result.output, "a\nb");
        let result = run_captured("printf 'x\\n\\n'");
        assert_eq!(result.output, "x\n");
    }

    #[test]
    fn captured_output_is_not_truncated() {
        let result = run_captured("i=0; while [ $i -lt 2000 ]; do echo 0123456789; i=$((i+1)); done");
        assert_eq!(result.output.lines().count(), 2000);
        assert_eq!(result.output.len(), 2000 * 11 - 1);
    }

    #[test]
    fn captured_keeps_status_of_failing_command() {
        let result = run_captured("echo partial; exit 2");
        assert_eq!(result.status, 2);
        assert_eq!(result.output, "partial");
    }

    #[test]
    fn exec_missing_program_is_spawn_failure() {
        assert_eq!(exec("/nonexistent/droid-utils-bin", &[]), SPAWN_FAILURE_STATUS);
        assert_eq!(exec("sh", &["-c", "exit 5"]), 5);
    }

    #[test]
    fn batch_counts_successes_without_stopping() {
        assert_eq!(run_batch(&["true", "false", "exit 0", "exit 9"]), 2);
    }
}
