//! Author: [Seclususs](https://github.com/seclususs)
//!
//! Page cache preloading through `vmtouch`.

use crate::config::tool_settings::{VMTOUCH_FULL_FLAG, VMTOUCH_PARTIAL_FLAG};
use crate::controllers::android_impl;
use crate::hal::{filesystem, shell};
use crate::resources::sys_paths;

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadKind {
    Object,
    Application,
}

impl FromStr for PreloadKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "obj" | "object" => Ok(PreloadKind::Object),
            "app" | "application" => Ok(PreloadKind::Application),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadMode {
    Partial,
    Full,
}

impl PreloadMode {
    pub fn flag(self) -> &'static str {
        match self {
            PreloadMode::Partial => VMTOUCH_PARTIAL_FLAG,
            PreloadMode::Full => VMTOUCH_FULL_FLAG,
        }
    }
}

fn resolve_target(kind: PreloadKind, item: &str) -> Option<String> {
    match kind {
        PreloadKind::Object => {
            if filesystem::path_exists(item) {
                Some(item.to_string())
            } else {
                log::debug!("Preload: {item} does not exist, skipping");
                None
            }
        }
        PreloadKind::Application => match android_impl::get_app_install_dir(item) {
            Ok(dir) => Some(dir),
            Err(e) => {
                log::warn!("Failed to preload {item} into memory: {e}");
                None
            }
        },
    }
}

pub fn preload_item(kind: PreloadKind, item: &str, mode: PreloadMode) -> bool {
    let Some(target) = resolve_target(kind, item) else {
        return false;
    };
    let status = shell::exec(sys_paths::get_vmtouch_path(), &[mode.flag(), &target]);
    if status == 0 {
        log::info!("Preloaded {item} into memory.");
        true
    } else {
        log::warn!("Failed to preload {item} into memory (status {status}).");
        false
    }
}

/// `kind` is `obj`/`object` for a path or `app`/`application` for an
/// installed package. Unknown kinds do nothing.
pub fn preload(kind: &str, item: &str, full: bool) -> bool {
    let Ok(kind) = kind.parse::<PreloadKind>() else {
        log::debug!("Preload: unsupported item type '{kind}'");
        return false;
    };
    let mode = if full {
        PreloadMode::Full
    } else {
        PreloadMode::Partial
    };
    preload_item(kind, item, mode)
}
