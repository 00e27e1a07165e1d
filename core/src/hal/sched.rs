//! Author: [Seclususs](https://github.com/seclususs)
//!
//! Thin wrappers over the priority, affinity, scheduler and signal syscalls.
//! Every wrapper refuses non-positive ids: 0 addresses the caller and
//! negative values address process groups (or everything, for `kill`).

use crate::common::error::UtilError;

use std::{fmt, io, mem};

use rustix::process::Pid;

#[inline]
fn checked_pid(id: libc::pid_t) -> Result<Pid, UtilError> {
    Pid::from_raw(id).ok_or(UtilError::InvalidTarget(id))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedPolicy {
    Other,
    Fifo,
    RoundRobin,
    Batch,
    Idle,
    Unknown(i32),
}

impl SchedPolicy {
    pub fn from_raw(raw: i32) -> Self {
        match raw & !libc::SCHED_RESET_ON_FORK {
            libc::SCHED_OTHER => SchedPolicy::Other,
            libc::SCHED_FIFO => SchedPolicy::Fifo,
            libc::SCHED_RR => SchedPolicy::RoundRobin,
            libc::SCHED_BATCH => SchedPolicy::Batch,
            libc::SCHED_IDLE => SchedPolicy::Idle,
            other => SchedPolicy::Unknown(other),
        }
    }
    pub fn as_raw(self) -> i32 {
        match self {
            SchedPolicy::Other => libc::SCHED_OTHER,
            SchedPolicy::Fifo => libc::SCHED_FIFO,
            SchedPolicy::RoundRobin => libc::SCHED_RR,
            SchedPolicy::Batch => libc::SCHED_BATCH,
            SchedPolicy::Idle => libc::SCHED_IDLE,
            SchedPolicy::Unknown(raw) => raw,
        }
    }
    pub fn is_realtime(self) -> bool {
        matches!(self, SchedPolicy::Fifo | SchedPolicy::RoundRobin)
    }
}

impl fmt::Display for SchedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_raw())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedDescriptor {
    pub policy: SchedPolicy,
    pub priority: i32,
    pub reset_on_fork: bool,
}

impl SchedDescriptor {
    pub fn new(policy: SchedPolicy, priority: i32) -> Self {
        Self {
            policy,
            priority,
            reset_on_fork: false,
        }
    }
    /// Splits a raw `sched_getscheduler` style value into policy and the
    /// `SCHED_RESET_ON_FORK` flag.
    pub fn from_raw(raw_policy: i32, priority: i32) -> Self {
        Self {
            policy: SchedPolicy::from_raw(raw_policy),
            priority,
            reset_on_fork: raw_policy & libc::SCHED_RESET_ON_FORK != 0,
        }
    }
    pub fn raw_policy(&self) -> i32 {
        if self.reset_on_fork {
            self.policy.as_raw() | libc::SCHED_RESET_ON_FORK
        } else {
            self.policy.as_raw()
        }
    }
}

impl fmt::Display for SchedDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Policy: {}, Priority: {}", self.raw_policy(), self.priority)
    }
}

/// Inclusive range of CPU indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuRange {
    start: usize,
    end: usize,
}

impl CpuRange {
    pub const MAX_CPUS: usize = 8 * mem::size_of::<libc::cpu_set_t>();

    pub fn new(start: usize, end: usize) -> Result<Self, UtilError> {
        if start > end {
            return Err(UtilError::InvalidInput(format!(
                "CPU range {start}-{end} is inverted"
            )));
        }
        if end >= Self::MAX_CPUS {
            return Err(UtilError::InvalidInput(format!(
                "CPU {end} exceeds mask capacity of {}",
                Self::MAX_CPUS
            )));
        }
        Ok(Self { start, end })
    }
    pub fn from_signed(start: i32, end: i32) -> Result<Self, UtilError> {
        let to_index = |v: i32| {
            usize::try_from(v)
                .map_err(|_| UtilError::InvalidInput(format!("Negative CPU index {v}")))
        };
        Self::new(to_index(start)?, to_index(end)?)
    }
    pub fn start(&self) -> usize {
        self.start
    }
    pub fn end(&self) -> usize {
        self.end
    }
    pub fn cpus(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }
    fn to_cpu_set(self) -> libc::cpu_set_t {
        let mut set: libc::cpu_set_t = unsafe { mem::zeroed() };
        for cpu in self.cpus() {
            unsafe { libc::CPU_SET(cpu, &mut set) };
        }
        set
    }
}

impl fmt::Display for CpuRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

pub fn get_priority(id: libc::pid_t) -> Result<i32, UtilError> {
    let pid = checked_pid(id)?;
    Ok(rustix::process::getpriority_process(Some(pid))?)
}

pub fn set_priority(id: libc::pid_t, priority: i32) -> Result<(), UtilError> {
    let pid = checked_pid(id)?;
    Ok(rustix::process::setpriority_process(Some(pid), priority)?)
}

pub fn set_affinity(id: libc::pid_t, range: CpuRange) -> Result<(), UtilError> {
    checked_pid(id)?;
    let set = range.to_cpu_set();
    let res = unsafe { libc::sched_setaffinity(id, mem::size_of::<libc::cpu_set_t>(), &set) };
    if res < 0 {
        Err(UtilError::IoError(io::Error::last_os_error()))
    } else {
        Ok(())
    }
}

pub fn get_affinity(id: libc::pid_t) -> Result<Vec<usize>, UtilError> {
    checked_pid(id)?;
    let mut set: libc::cpu_set_t = unsafe { mem::zeroed() };
    let res = unsafe { libc::sched_getaffinity(id, mem::size_of::<libc::cpu_set_t>(), &mut set) };
    if res < 0 {
        return Err(UtilError::IoError(io::Error::last_os_error()));
    }
    Ok((0..CpuRange::MAX_CPUS)
        .filter(|&cpu| unsafe { libc::CPU_ISSET(cpu, &set) })
        .collect())
}

pub fn get_scheduler(id: libc::pid_t) -> Result<SchedDescriptor, UtilError> {
    checked_pid(id)?;
    let raw_policy = unsafe { libc::sched_getscheduler(id) };
    if raw_policy < 0 {
        return Err(UtilError::IoError(io::Error::last_os_error()));
    }
    let mut param: libc::sched_param = unsafe { mem::zeroed() };
    if unsafe { libc::sched_getparam(id, &mut param) } < 0 {
        return Err(UtilError::IoError(io::Error::last_os_error()));
    }
    Ok(SchedDescriptor::from_raw(raw_policy, param.sched_priority))
}

pub fn set_scheduler(id: libc::pid_t, descriptor: SchedDescriptor) -> Result<(), UtilError> {
    checked_pid(id)?;
    let mut param: libc::sched_param = unsafe { mem::zeroed() };
    param.sched_priority = descriptor.priority;
    let res = unsafe { libc::sched_setscheduler(id, descriptor.raw_policy(), &param) };
    if res < 0 {
        Err(UtilError::IoError(io::Error::last_os_error()))
    } else {
        Ok(())
    }
}

pub fn send_kill(id: libc::pid_t) -> Result<(), UtilError> {
    checked_pid(id)?;
    if unsafe { libc::kill(id, libc::SIGKILL) } < 0 {
        Err(UtilError::IoError(io::Error::last_os_error()))
    } else {
        Ok(())
    }
}
