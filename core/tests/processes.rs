use droid_utils::config::tool_settings::INVALID_ID;
use droid_utils::controllers::process_impl;
use droid_utils::hal::shell;

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

#[test]
fn unknown_name_resolves_to_sentinel() {
    let name = "droid-utils-integration-ghost";
    assert_eq!(process_impl::find_process_id(name), INVALID_ID);
    assert!(process_impl::find_all_process_ids(name).is_empty());
}

#[test]
fn spawned_child_is_found_and_killed() {
    let mut child = Command::new("sleep")
        .arg("31.4159")
        .stdout(Stdio::null())
        .spawn()
        .unwrap();
    let pid = child.id() as i32;

    let found = process_impl::find_all_process_ids("SLEEP 31.4159");
    assert!(found.contains(&pid), "{found:?} lacks {pid}");

    assert!(process_impl::kill_process("sleep 31.4159") >= 1);
    let status = child.wait().unwrap();
    assert!(!status.success());
}

#[test]
fn thread_lookup_against_fake_proc_tree() {
    let dir = tempfile::tempdir().unwrap();
    for (tid, comm) in [("4100", "surfaceflinger"), ("4108", "RenderEngine"), ("4112", "RenderEngine")] {
        let t = dir.path().join("4100/task").join(tid);
        fs::create_dir_all(&t).unwrap();
        fs::write(t.join("comm"), format!("{comm}\n")).unwrap();
    }
    let tids = process_impl::find_thread_ids_in(dir.path(), 4100, "RenderEngine");
    assert_eq!(tids, vec![4108, 4112]);
    assert!(process_impl::find_thread_ids_in(dir.path(), 4100, "binder").is_empty());
    assert!(process_impl::find_thread_ids_in(Path::new("/proc"), INVALID_ID, "main").is_empty());
}

#[test]
fn shell_statuses() {
    assert_eq!(shell::run("exit 0"), 0);
    assert_eq!(shell::run("exit 42"), 42);
    let result = shell::run_captured("echo hello");
    assert_eq!(result.output, "hello");
    assert!(result.success());
}
