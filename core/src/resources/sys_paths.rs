//! Author: [Seclususs](https://github.com/seclususs)

use std::{env, sync};

static VMTOUCH_PATH: sync::OnceLock<String> = sync::OnceLock::new();

pub const K_SHELL_PATH: &str = "sh";
pub const K_PROC_ROOT: &str = "/proc";
pub const K_VMTOUCH_DEFAULT_PATH: &str = "/data/local/tmp/vmtouch";
pub const K_VMTOUCH_ENV: &str = "VMTOUCH_BIN";

pub const K_PS_LISTING_CMD: &str = "ps -Ao pid,args";
pub const K_HOME_RESOLVE_CMD: &str =
    "pm resolve-activity -a android.intent.action.MAIN -c android.intent.category.HOME";
pub const K_IME_LIST_CMD: &str = "ime list";
pub const K_PM_PATH_CMD: &str = "pm path";
pub const K_SERVICE_STOP_CMD: &str = "stop";
pub const K_SERVICE_START_CMD: &str = "start";

pub fn get_vmtouch_path() -> &'static str {
    VMTOUCH_PATH.get_or_init(|| match env::var(K_VMTOUCH_ENV) {
        Ok(path) if !path.trim().is_empty() => {
            log::debug!("Using vmtouch from {K_VMTOUCH_ENV}: {path}");
            path
        }
        _ => K_VMTOUCH_DEFAULT_PATH.to_string(),
    })
}
