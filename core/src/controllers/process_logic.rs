//! Author: [Seclususs](https://github.com/seclususs)

use crate::hal::procfs::ThreadEntry;
use crate::resources::sys_paths::K_PS_LISTING_CMD;
use crate::utils::{convert, strings};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    Process,
    Thread,
}

/// A resolved lookup: what was asked for and the id it mapped to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub kind: TaskKind,
    pub name: String,
    pub id: libc::pid_t,
}

impl Task {
    pub fn process(name: &str, id: libc::pid_t) -> Self {
        Self {
            kind: TaskKind::Process,
            name: name.to_string(),
            id,
        }
    }
    pub fn thread(name: &str, id: libc::pid_t) -> Self {
        Self {
            kind: TaskKind::Thread,
            name: name.to_string(),
            id,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TaskKind::Process => write!(f, "process {} (PID: {})", self.name, self.id),
            TaskKind::Thread => write!(f, "thread {} (TID: {})", self.name, self.id),
        }
    }
}

/// Pids from `ps -Ao pid,args` output whose command line contains `name`,
/// ignoring case. The header row and the listing command itself are skipped.
pub fn parse_ps_listing(output: &str, name: &str) -> Vec<libc::pid_t> {
    output
        .lines()
        .filter_map(|line| {
            let (pid_str, args) = line.trim_start().split_once(char::is_whitespace)?;
            let pid = convert::parse_scalar::<libc::pid_t>(pid_str).ok()?;
            let args = args.trim();
            if args.contains(K_PS_LISTING_CMD) || !strings::contains_ignore_case(args, name) {
                return None;
            }
            Some(pid)
        })
        .collect()
}

pub fn matching_threads<'a>(
    threads: &'a [ThreadEntry],
    thread_name: &'a str,
) -> impl Iterator<Item = libc::pid_t> + 'a {
    threads
        .iter()
        .filter(move |t| t.comm.contains(thread_name))
        .map(|t| t.tid)
}
