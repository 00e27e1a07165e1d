//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::UtilError;

use std::{fs, path};

pub struct ThreadEntry {
    pub tid: libc::pid_t,
    pub comm: String,
}

fn task_dir(proc_root: &path::Path, pid: libc::pid_t) -> path::PathBuf {
    let mut buf = itoa::Buffer::new();
    proc_root.join(buf.format(pid)).join("task")
}

/// Lists the threads of `pid` under `proc_root` in ascending tid order.
/// Threads whose `comm` cannot be read (they may exit mid-scan) are skipped.
pub fn list_threads(
    proc_root: &path::Path,
    pid: libc::pid_t,
) -> Result<Vec<ThreadEntry>, UtilError> {
    let dir = task_dir(proc_root, pid);
    let entries = fs::read_dir(&dir).map_err(|e| {
        UtilError::NotFound(format!("Thread directory {}: {e}", dir.display()))
    })?;
    let mut tids: Vec<libc::pid_t> = entries
        .flatten()
        .filter_map(|entry| entry.file_name().to_str()?.parse().ok())
        .collect();
    tids.sort_unstable();
    let threads = tids
        .into_iter()
        .filter_map(|tid| {
            let mut buf = itoa::Buffer::new();
            let comm = fs::read_to_string(dir.join(buf.format(tid)).join("comm")).ok()?;
            Some(ThreadEntry {
                tid,
                comm: comm.trim_end_matches('\n').to_string(),
            })
        })
        .collect();
    Ok(threads)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_own_threads() {
        let own = std::process::id() as libc::pid_t;
        let threads = list_threads(path::Path::new("/proc"), own).unwrap();
        assert!(threads.iter().any(|t| t.tid == own));
    }

    #[test]
    fn missing_process_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            list_threads(dir.path(), 1234),
            Err(UtilError::NotFound(_))
        ));
    }

    #[test]
    fn sorts_numerically_and_skips_junk() {
        let dir = tempfile::tempdir().unwrap();
        for (tid, comm) in [("100", "main\n"), ("20", "RenderThread\n"), ("3", "binder:1_1\n")] {
            let t = dir.path().join("7/task").join(tid);
            fs::create_dir_all(&t).unwrap();
            fs::write(t.join("comm"), comm).unwrap();
        }
        fs::create_dir_all(dir.path().join("7/task/self")).unwrap();
        fs::create_dir_all(dir.path().join("7/task/55")).unwrap();
        let threads = list_threads(dir.path(), 7).unwrap();
        let tids: Vec<_> = threads.iter().map(|t| t.tid).collect();
        assert_eq!(tids, vec![3, 20, 100]);
        assert_eq!(threads[1].comm, "RenderThread");
    }
}
