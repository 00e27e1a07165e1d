//! This file is part of droid-utils.
//! Licensed under the GNU GPL v3 or later.
//!
//! Helpers for scripting Android device administration: process and thread
//! tuning, shell execution, file manipulation, page cache preloading and
//! timestamped logging. Every helper is synchronous and logs its outcome
//! through the `log` facade.

#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod bindings;
pub mod common;
pub mod config;
pub mod controllers;
pub mod hal;
pub mod resources;
pub mod utils;

pub use common::error::UtilError;
pub use controllers::process_logic::{Task, TaskKind};
pub use hal::sched::{CpuRange, SchedDescriptor, SchedPolicy};
pub use hal::shell::CommandResult;
