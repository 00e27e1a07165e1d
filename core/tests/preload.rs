use droid_utils::controllers::preload_impl::{self, PreloadKind, PreloadMode};

use std::fs;
use std::os::unix::fs::PermissionsExt;

// The vmtouch path is resolved once per process, so everything that needs the
// stand-in binary lives in this single test.
#[test]
fn vmtouch_receives_mode_flag_and_target() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap().to_string();
    let record = format!("{root}/args");
    let script = format!("{root}/vmtouch");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\necho \"$@\" >> {record}\ncase \"$2\" in *refuse*) exit 3;; esac\n"
        ),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    unsafe { std::env::set_var("VMTOUCH_BIN", &script) };

    let target = format!("{root}/lib.so");
    let refused = format!("{root}/refuse.so");
    fs::write(&target, "x").unwrap();
    fs::write(&refused, "x").unwrap();

    assert!(preload_impl::preload("obj", &target, false));
    assert!(preload_impl::preload_item(
        PreloadKind::Object,
        &target,
        PreloadMode::Full
    ));
    assert!(!preload_impl::preload("object", &refused, true));

    let lines: Vec<String> = fs::read_to_string(&record)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect();
    assert_eq!(
        lines,
        vec![
            format!("-dl {target}"),
            format!("-dL {target}"),
            format!("-dL {refused}"),
        ]
    );
}
