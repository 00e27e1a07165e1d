pub mod filesystem;
pub mod procfs;
pub mod sched;
pub mod shell;
