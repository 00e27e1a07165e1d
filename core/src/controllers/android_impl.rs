//! Author: [Seclususs](https://github.com/seclususs)

use crate::common::error::UtilError;
use crate::controllers::android_logic;
use crate::hal::shell;
use crate::resources::sys_paths::{
    K_HOME_RESOLVE_CMD, K_IME_LIST_CMD, K_PM_PATH_CMD, K_SERVICE_START_CMD, K_SERVICE_STOP_CMD,
};
use crate::utils::strings;

fn checked_name<'a>(kind: &str, name: &'a str) -> Result<&'a str, UtilError> {
    if strings::validate_name(name) {
        Ok(name)
    } else {
        log::error!("Security Violation: Invalid {kind} name: '{name}'");
        Err(UtilError::InvalidInput(format!("{kind} name '{name}'")))
    }
}

fn query_package_name(command: &str) -> Option<String> {
    let result = shell::run_captured(command);
    if !result.success() {
        log::warn!("'{command}' exited with status {}", result.status);
    }
    android_logic::extract_package_name(&result.output)
}

pub fn get_home_package_name() -> Option<String> {
    query_package_name(K_HOME_RESOLVE_CMD)
}

pub fn get_ime_package_name() -> Option<String> {
    query_package_name(K_IME_LIST_CMD)
}

pub fn app_exists(package: &str) -> bool {
    match checked_name("package", package) {
        Ok(package) => shell::run(&format!("{K_PM_PATH_CMD} {package}")) == 0,
        Err(_) => false,
    }
}

pub fn get_app_install_dir(package: &str) -> Result<String, UtilError> {
    let package = checked_name("package", package)?;
    let command = format!("{K_PM_PATH_CMD} {package}");
    let result = shell::run_captured(&command);
    if !result.success() {
        return Err(UtilError::CommandFailed {
            command,
            status: result.status,
        });
    }
    android_logic::parse_install_dir(&result.output)
        .ok_or_else(|| UtilError::NotFound(format!("Install directory of {package}")))
}

fn control_service(verb: &str, label: &str, name: &str) -> Result<(), UtilError> {
    let name = checked_name("service", name)?;
    log::info!("{label} system service {name}...");
    let command = format!("{verb} {name}");
    match shell::run(&command) {
        0 => Ok(()),
        status => {
            log::debug!("'{command}' exited with status {status}");
            Err(UtilError::CommandFailed { command, status })
        }
    }
}

/// Issues `stop <name>`. The service state is not checked afterwards.
pub fn stop_system_service(name: &str) -> Result<(), UtilError> {
    control_service(K_SERVICE_STOP_CMD, "Stopping", name)
}

pub fn start_system_service(name: &str) -> Result<(), UtilError> {
    control_service(K_SERVICE_START_CMD, "Starting", name)
}
