//! Author: [Seclususs](https://github.com/seclususs)

pub const SPAWN_FAILURE_STATUS: i32 = -1;
pub const SIGNAL_EXIT_BASE: i32 = 128;
pub const INVALID_ID: libc::pid_t = -1;
pub const FOLDER_MODE: u32 = 0o777;
pub const VMTOUCH_PARTIAL_FLAG: &str = "-dl";
pub const VMTOUCH_FULL_FLAG: &str = "-dL";
pub const WILDCARD_MARKER: char = '*';
