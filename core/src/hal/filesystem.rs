//! Author: [Seclususs](https://github.com/seclususs)

use crate::config::tool_settings::{FOLDER_MODE, WILDCARD_MARKER};
use crate::hal::shell;
use crate::utils::convert;

use std::fs;
use std::io::Write;

use rustix::fs::{AtFlags, CWD, Mode};
use rustix::io::Errno;

pub fn read_file(path: &str) -> String {
    match fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let mut content = String::with_capacity(text.len() + 1);
            for line in convert::line_segments(&text) {
                content.push_str(line);
                content.push('\n');
            }
            content
        }
        Err(e) => {
            log::error!("Unable to open file {path}: {e}");
            String::new()
        }
    }
}

pub fn write_file(path: &str, content: &str) -> bool {
    match fs::write(path, content) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Unable to write to file {path}: {e}");
            false
        }
    }
}

pub fn append_file(path: &str, content: &str) -> bool {
    let result = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| file.write_all(content.as_bytes()));
    match result {
        Ok(()) => true,
        Err(e) => {
            log::error!("Unable to append to file {path}: {e}");
            false
        }
    }
}

/// Overwrites an existing file. Never creates one.
pub fn mutate_file(path: &str, value: &str) -> bool {
    if !path_exists(path) {
        log::error!("{path} does not exist.");
        return false;
    }
    let mut file = match fs::OpenOptions::new().write(true).truncate(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            log::error!("Failed to open {path} for writing: {e}");
            return false;
        }
    };
    if let Err(e) = file.write_all(value.as_bytes()) {
        log::error!("Failed to write '{value}' to {path}: {e}");
        return false;
    }
    log::info!("{path} -> {value}");
    true
}

pub fn create_folder(path: &str) -> bool {
    match rustix::fs::mkdirat(CWD, path, Mode::from_bits_truncate(FOLDER_MODE as _)) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Unable to create folder {path}: {e}");
            false
        }
    }
}

pub fn delete_folder(path: &str) -> bool {
    match rustix::fs::unlinkat(CWD, path, AtFlags::REMOVEDIR) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Unable to delete folder {path}: {e}");
            false
        }
    }
}

pub fn path_exists(path: &str) -> bool {
    rustix::fs::statat(CWD, path, AtFlags::empty()).is_ok()
}

/// Like [`path_exists`] but does not follow a trailing symlink, so a dangling
/// link still counts as an entry.
fn entry_exists(path: &str) -> bool {
    rustix::fs::statat(CWD, path, AtFlags::SYMLINK_NOFOLLOW).is_ok()
}

pub fn expand_wildcard(pattern: &str) -> Vec<String> {
    let result = shell::run_captured(&format!("for i in {pattern}; do echo \"$i\"; done"));
    convert::split_lines(&result.output)
        .into_iter()
        .filter(|p| !p.is_empty() && entry_exists(p))
        .collect()
}

fn remove_entry(path: &str) -> bool {
    let result = match rustix::fs::unlinkat(CWD, path, AtFlags::empty()) {
        Err(Errno::ISDIR | Errno::PERM) => rustix::fs::unlinkat(CWD, path, AtFlags::REMOVEDIR),
        other => other,
    };
    match result {
        Ok(()) => true,
        Err(e) => {
            log::debug!("Remove failed for {path}: {e}");
            false
        }
    }
}

/// Removes a file or empty folder. Paths containing `*` are expanded by the
/// shell first and every match is removed. Returns how many entries went away.
pub fn remove_path(path: &str) -> usize {
    if path.contains(WILDCARD_MARKER) {
        expand_wildcard(path)
            .iter()
            .filter(|p| remove_entry(p))
            .count()
    } else {
        usize::from(remove_entry(path))
    }
}
