//! Author: [Seclususs](https://github.com/seclususs)
//!
//! Name based process and thread control. Every call looks the target up
//! again; nothing is cached between calls because a name can map to a
//! different id at any time. A lookup miss yields `INVALID_ID`, which the
//! syscall layer rejects, so the operation fails with a logged error.

use crate::common::error::UtilError;
use crate::config::tool_settings::INVALID_ID;
use crate::controllers::process_logic::{self, Task};
use crate::hal::sched::{self, CpuRange, SchedDescriptor, SchedPolicy};
use crate::hal::{procfs, shell};
use crate::resources::sys_paths::{K_PROC_ROOT, K_PS_LISTING_CMD};

use std::path;

fn describe<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

fn report(action: &str, task: &Task, result: Result<(), UtilError>) -> Result<(), UtilError> {
    if let Err(ref e) = result {
        log::error!("Failure {action} for {task}: {e}");
    }
    result
}

pub fn find_all_process_ids(name: &str) -> Vec<libc::pid_t> {
    let result = shell::run_captured(K_PS_LISTING_CMD);
    if !result.success() {
        log::warn!("Process listing exited with status {}", result.status);
    }
    process_logic::parse_ps_listing(&result.output, name)
}

pub fn find_process_id(name: &str) -> libc::pid_t {
    find_all_process_ids(name)
        .first()
        .copied()
        .unwrap_or(INVALID_ID)
}

/// Thread ids of `pid` whose `comm` contains `thread_name`, read from the
/// proc tree rooted at `proc_root`.
pub fn find_thread_ids_in(
    proc_root: &path::Path,
    pid: libc::pid_t,
    thread_name: &str,
) -> Vec<libc::pid_t> {
    if pid <= 0 {
        return Vec::new();
    }
    match procfs::list_threads(proc_root, pid) {
        Ok(threads) => process_logic::matching_threads(&threads, thread_name).collect(),
        Err(e) => {
            log::debug!("Thread scan of PID {pid} failed: {e}");
            Vec::new()
        }
    }
}

pub fn find_all_thread_ids(process_name: &str, thread_name: &str) -> Vec<libc::pid_t> {
    let pid = find_process_id(process_name);
    find_thread_ids_in(path::Path::new(K_PROC_ROOT), pid, thread_name)
}

pub fn find_thread_id(process_name: &str, thread_name: &str) -> libc::pid_t {
    find_all_thread_ids(process_name, thread_name)
        .first()
        .copied()
        .unwrap_or(INVALID_ID)
}

pub(crate) fn resolve_process(name: &str) -> Task {
    Task::process(name, find_process_id(name))
}

pub(crate) fn resolve_thread(process_name: &str, thread_name: &str) -> Task {
    Task::thread(thread_name, find_thread_id(process_name, thread_name))
}

pub fn renice(task: &Task, priority: i32) -> Result<(), UtilError> {
    let old = sched::get_priority(task.id).ok();
    report(
        "setting priority",
        task,
        sched::set_priority(task.id, priority),
    )?;
    log::info!(
        "Changed priority of {task} from {} to {priority}",
        describe(old)
    );
    Ok(())
}

pub fn renice_process(name: &str, priority: i32) -> Result<(), UtilError> {
    renice(&resolve_process(name), priority)
}

pub fn renice_thread(process_name: &str, thread_name: &str, priority: i32) -> Result<(), UtilError> {
    renice(&resolve_thread(process_name, thread_name), priority)
}

pub fn set_affinity(task: &Task, range: CpuRange) -> Result<(), UtilError> {
    report(
        "setting CPU affinity",
        task,
        sched::set_affinity(task.id, range),
    )?;
    log::info!("Changed CPU affinity of {task} to CPU {range}");
    Ok(())
}

fn set_affinity_signed(task: &Task, start: i32, end: i32) -> Result<(), UtilError> {
    match CpuRange::from_signed(start, end) {
        Ok(range) => set_affinity(task, range),
        Err(e) => {
            log::error!("Failure setting CPU affinity for {task}: {e}");
            Err(e)
        }
    }
}

pub fn set_process_affinity(name: &str, start: i32, end: i32) -> Result<(), UtilError> {
    set_affinity_signed(&resolve_process(name), start, end)
}

pub fn set_thread_affinity(
    process_name: &str,
    thread_name: &str,
    start: i32,
    end: i32,
) -> Result<(), UtilError> {
    set_affinity_signed(&resolve_thread(process_name, thread_name), start, end)
}

pub fn set_scheduler(task: &Task, descriptor: SchedDescriptor) -> Result<(), UtilError> {
    let old = sched::get_scheduler(task.id).ok();
    report(
        "changing scheduler",
        task,
        sched::set_scheduler(task.id, descriptor),
    )?;
    log::info!(
        "Changed scheduling policy of {task} from {} to {descriptor}",
        describe(old)
    );
    Ok(())
}

pub fn set_process_scheduler(
    name: &str,
    policy: SchedPolicy,
    priority: i32,
) -> Result<(), UtilError> {
    set_scheduler(&resolve_process(name), SchedDescriptor::new(policy, priority))
}

pub fn set_thread_scheduler(
    process_name: &str,
    thread_name: &str,
    policy: SchedPolicy,
    priority: i32,
) -> Result<(), UtilError> {
    set_scheduler(
        &resolve_thread(process_name, thread_name),
        SchedDescriptor::new(policy, priority),
    )
}

pub fn kill(task: &Task) -> Result<(), UtilError> {
    log::info!("Killing {task}...");
    report("killing", task, sched::send_kill(task.id))
}

/// Sends `SIGKILL` to every process matching `name`. Returns how many
/// signals were delivered.
pub fn kill_process(name: &str) -> usize {
    find_all_process_ids(name)
        .into_iter()
        .filter(|&pid| kill(&Task::process(name, pid)).is_ok())
        .count()
}

pub fn kill_thread(process_name: &str, thread_name: &str) -> usize {
    find_all_thread_ids(process_name, thread_name)
        .into_iter()
        .filter(|&tid| kill(&Task::thread(thread_name, tid)).is_ok())
        .count()
}
