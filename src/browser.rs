//! Browser locator: find an installed Chrome/Edge/Chromium executable.
//!
//! A pure function of the environment and the filesystem — no side effects,
//! no launched processes. The probe order mirrors how deployments actually
//! differ:
//!
//! 1. `BROWSER_EXECUTABLE_PATH` — trusted override, returned without an
//!    existence check. Container hosts (Render, Railway) bake the path in
//!    and the filesystem may not be probeable at resolve time.
//! 2. Well-known Linux binary paths, first one that exists.
//! 3. `BROWSER_PATH` — local-development override, honoured only if the
//!    file exists.
//! 4. Well-known Windows install paths built from `LOCALAPPDATA`,
//!    `PROGRAMFILES` and `ProgramFiles(x86)`, first one that exists.
//!
//! The lists are probed flat rather than behind `cfg(target_os)` gates:
//! `Path::exists` on a foreign-OS path is just `false`, and keeping every
//! rung reachable lets the priority order be unit-tested on any host.

use std::path::PathBuf;
use tracing::debug;

/// Trusted override; returned verbatim, not existence-checked.
pub const EXECUTABLE_OVERRIDE_VAR: &str = "BROWSER_EXECUTABLE_PATH";

/// Local-development override; honoured only if the path exists.
pub const LOCAL_OVERRIDE_VAR: &str = "BROWSER_PATH";

const LINUX_CANDIDATES: &[&str] = &[
    "/usr/bin/chromium-browser",
    "/usr/bin/chromium",
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
];

/// Resolve the browser executable to use for PDF rendering.
///
/// Returns `None` when no override is set and none of the well-known
/// installation paths exist. Existence checks never raise: an unreadable or
/// invalid path is treated as absent.
pub fn resolve_executable() -> Option<PathBuf> {
    if let Some(path) = env_nonempty(EXECUTABLE_OVERRIDE_VAR) {
        debug!("Browser from {}: {}", EXECUTABLE_OVERRIDE_VAR, path);
        return Some(PathBuf::from(path));
    }

    for candidate in LINUX_CANDIDATES {
        let path = PathBuf::from(candidate);
        if path.exists() {
            debug!("Browser found at {}", path.display());
            return Some(path);
        }
    }

    if let Some(path) = env_nonempty(LOCAL_OVERRIDE_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            debug!("Browser from {}: {}", LOCAL_OVERRIDE_VAR, path.display());
            return Some(path);
        }
    }

    for path in windows_candidates() {
        if path.exists() {
            debug!("Browser found at {}", path.display());
            return Some(path);
        }
    }

    debug!("No browser executable found");
    None
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Windows install locations, per-user first, then machine-wide, Edge last.
fn windows_candidates() -> Vec<PathBuf> {
    let pf = env_nonempty("PROGRAMFILES").unwrap_or_else(|| r"C:\Program Files".to_string());
    let pf_x86 =
        env_nonempty("ProgramFiles(x86)").unwrap_or_else(|| r"C:\Program Files (x86)".to_string());

    let mut candidates = Vec::new();
    if let Some(local) = env_nonempty("LOCALAPPDATA") {
        candidates.push(PathBuf::from(format!(
            r"{local}\Google\Chrome\Application\chrome.exe"
        )));
    }
    candidates.push(PathBuf::from(format!(
        r"{pf}\Google\Chrome\Application\chrome.exe"
    )));
    candidates.push(PathBuf::from(format!(
        r"{pf_x86}\Google\Chrome\Application\chrome.exe"
    )));
    candidates.push(PathBuf::from(format!(
        r"{pf}\Microsoft\Edge\Application\msedge.exe"
    )));
    candidates.push(PathBuf::from(format!(
        r"{pf_x86}\Microsoft\Edge\Application\msedge.exe"
    )));
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // These tests mutate process-global env vars; serialise them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct EnvGuard {
        saved: Vec<(&'static str, Option<String>)>,
    }

    impl EnvGuard {
        fn clear(vars: &[&'static str]) -> Self {
            let saved = vars
                .iter()
                .map(|&k| {
                    let old = std::env::var(k).ok();
                    std::env::remove_var(k);
                    (k, old)
                })
                .collect();
            Self { saved }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (k, v) in self.saved.drain(..) {
                match v {
                    Some(v) => std::env::set_var(k, v),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn override_is_returned_without_existence_check() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvGuard::clear(&[EXECUTABLE_OVERRIDE_VAR, LOCAL_OVERRIDE_VAR]);
        std::env::set_var(EXECUTABLE_OVERRIDE_VAR, "/definitely/not/real/chrome");

        assert_eq!(
            resolve_executable(),
            Some(PathBuf::from("/definitely/not/real/chrome"))
        );
    }

    #[test]
    fn local_override_requires_existing_file() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvGuard::clear(&[EXECUTABLE_OVERRIDE_VAR, LOCAL_OVERRIDE_VAR]);
        std::env::set_var(LOCAL_OVERRIDE_VAR, "/definitely/not/real/chrome");

        // The nonexistent local override must be skipped; the result is then
        // whatever the well-known lists find on this host (possibly nothing),
        // but never the bogus override path.
        assert_ne!(
            resolve_executable(),
            Some(PathBuf::from("/definitely/not/real/chrome"))
        );
    }

    #[test]
    fn local_override_honoured_when_file_exists() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvGuard::clear(&[EXECUTABLE_OVERRIDE_VAR, LOCAL_OVERRIDE_VAR]);
        if LINUX_CANDIDATES.iter().any(|p| PathBuf::from(p).exists()) {
            // A system browser outranks the local override; nothing to assert.
            return;
        }

        let file = tempfile::NamedTempFile::new().unwrap();
        std::env::set_var(LOCAL_OVERRIDE_VAR, file.path());

        assert_eq!(resolve_executable(), Some(file.path().to_path_buf()));
    }

    #[test]
    fn trusted_override_outranks_everything() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvGuard::clear(&[EXECUTABLE_OVERRIDE_VAR, LOCAL_OVERRIDE_VAR]);
        let file = tempfile::NamedTempFile::new().unwrap();
        std::env::set_var(LOCAL_OVERRIDE_VAR, file.path());
        std::env::set_var(EXECUTABLE_OVERRIDE_VAR, "/container/chrome");

        assert_eq!(resolve_executable(), Some(PathBuf::from("/container/chrome")));
    }

    #[test]
    fn windows_candidates_use_program_files_fallbacks() {
        let _guard = ENV_LOCK.lock().unwrap();
        let _env = EnvGuard::clear(&["PROGRAMFILES", "ProgramFiles(x86)", "LOCALAPPDATA"]);

        let candidates = windows_candidates();
        assert!(candidates
            .iter()
            .any(|p| p.to_string_lossy().starts_with(r"C:\Program Files\Google")));
        assert!(candidates
            .iter()
            .any(|p| p.to_string_lossy().contains(r"msedge.exe")));
        // No LOCALAPPDATA → no per-user candidate.
        assert_eq!(candidates.len(), 4);
    }
}
