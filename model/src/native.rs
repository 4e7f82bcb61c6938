use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Library directories searched after the ones named by the environment.
const SYSTEM_DIRS: &[&str] = &[
    "/lib",
    "/lib64",
    "/usr/lib",
    "/usr/lib64",
    "/usr/local/lib",
    "/usr/lib/x86_64-linux-gnu",
    "/usr/lib/aarch64-linux-gnu",
    "/opt/homebrew/lib",
    "/opt/homebrew/opt/libomp/lib",
    "/usr/local/opt/libomp/lib",
];

const PATH_VARS: &[&str] = &[
    "LD_LIBRARY_PATH",
    "DYLD_LIBRARY_PATH",
    "DYLD_FALLBACK_LIBRARY_PATH",
    "CONDA_PREFIX",
];

/// Returns the directories the dynamic loader would look into for a shared library.
pub fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    for var in PATH_VARS {
        let Some(value) = env::var_os(var) else {
            continue;
        };

        if *var == "CONDA_PREFIX" {
            dirs.push(PathBuf::from(value).join("lib"));
        } else {
            dirs.extend(env::split_paths(&value));
        }
    }

    if cfg!(windows) {
        if let Some(value) = env::var_os("PATH") {
            dirs.extend(env::split_paths(&value));
        }
    }

    dirs.extend(SYSTEM_DIRS.iter().map(PathBuf::from));
    dirs
}

/// Looks for the shared library `name` (without its `lib` prefix) in `dirs`.
///
/// Versioned sonames such as `libomp.so.5` count as a match.
///
/// # Returns
/// The path of the first match, if any.
pub fn find_library(name: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let exact = [
        format!("lib{name}.so"),
        format!("lib{name}.dylib"),
        format!("{name}.dll"),
    ];
    let versioned = format!("lib{name}.so.");

    dirs.iter()
        .filter(|dir| dir.is_dir())
        .find_map(|dir| scan_dir(dir, &exact, &versioned))
}

fn scan_dir(dir: &Path, exact: &[String], versioned: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;

    entries.filter_map(|entry| entry.ok()).find_map(|entry| {
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        let hit = exact.iter().any(|e| *e == file_name) || file_name.starts_with(versioned);
        hit.then(|| entry.path())
    })
}
