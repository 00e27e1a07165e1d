//! Author: [Seclususs](https://github.com/seclususs)

use std::path;

const PACKAGE_NAME_KEY: &str = "packageName=";
const PM_PATH_PREFIX: &str = "package:";

/// Value after `packageName=` on the first line carrying that key, up to the
/// next whitespace.
pub fn extract_package_name(output: &str) -> Option<String> {
    let line = output.lines().find(|l| l.contains(PACKAGE_NAME_KEY))?;
    let (_, rest) = line.split_once(PACKAGE_NAME_KEY)?;
    let value = rest.split_whitespace().next()?;
    Some(value.to_string())
}

/// Directory holding the first apk listed by `pm path`.
pub fn parse_install_dir(output: &str) -> Option<String> {
    let apk = output
        .lines()
        .find_map(|l| l.trim().strip_prefix(PM_PATH_PREFIX))?
        .trim();
    let dir = path::Path::new(apk).parent()?;
    let dir = dir.to_str()?;
    if dir.is_empty() {
        None
    } else {
        Some(dir.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_activity_package() {
        let out = "priority=0 preferredOrder=0 match=0x100000 specificIndex=-1 isDefault=true
  ActivityInfo:
    name=com.android.launcher3.uioverrides.QuickstepLauncher
    packageName=com.android.launcher3
    enabled=true exported=true directBootAware=true";
        assert_eq!(extract_package_name(out).as_deref(), Some("com.android.launcher3"));
    }

    #[test]
    fn ime_package_stops_at_whitespace() {
        let out = "com.google.android.inputmethod.latin/com.android.inputmethod.latin.LatinIME:
  mId=com.google.android.inputmethod.latin/com.android.inputmethod.latin.LatinIME
  Service:
    ServiceInfo:
      name=com.android.inputmethod.latin.LatinIME
      packageName=com.google.android.inputmethod.latin permission=android.permission.BIND_INPUT_METHOD
  packageName=com.other.ime";
        assert_eq!(
            extract_package_name(out).as_deref(),
            Some("com.google.android.inputmethod.latin")
        );
    }

    #[test]
    fn missing_key_is_none() {
        assert_eq!(extract_package_name("No activity found"), None);
        assert_eq!(extract_package_name(""), None);
        assert_eq!(extract_package_name("packageName="), None);
    }

    #[test]
    fn install_dir_from_first_apk() {
        let out = "package:/data/app/~~Xy0Zg==/com.example.app-Ab1Cd==/base.apk
package:/data/app/~~Xy0Zg==/com.example.app-Ab1Cd==/split_config.arm64_v8a.apk";
        assert_eq!(
            parse_install_dir(out).as_deref(),
            Some("/data/app/~~Xy0Zg==/com.example.app-Ab1Cd==")
        );
        assert_eq!(
            parse_install_dir("package:/system/app/Stk/Stk.apk").as_deref(),
            Some("/system/app/Stk")
        );
    }

    #[test]
    fn install_dir_needs_a_package_line() {
        assert_eq!(parse_install_dir(""), None);
        assert_eq!(parse_install_dir("Error: unknown package"), None);
        assert_eq!(parse_install_dir("package:base.apk"), None);
    }
}
