//! Instruction file discovery.
//!
//! When no files are named on the command line, instruction files are taken
//! from the instructions directory (`*.txt`) followed by the working
//! directory (`*_instructions.txt`), each group sorted by path.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;

/// Suffix that marks instruction files in the working directory.
const WORKING_DIR_SUFFIX: &str = "_instructions.txt";

/// Finds instruction files in `instructions_dir` and `working_dir`.
///
/// Missing or unreadable directories contribute no files. A file found by
/// both searches is only listed once.
pub fn discover_files(instructions_dir: &Path, working_dir: &Path) -> Vec<PathBuf> {
    let mut files = collect_files(instructions_dir, |name| name.ends_with(".txt"));

    for path in collect_files(working_dir, |name| name.ends_with(WORKING_DIR_SUFFIX)) {
        if !files.iter().any(|known| same_file(known, &path)) {
            files.push(path);
        }
    }

    files
}

fn collect_files(dir: &Path, accept: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(dir = dir.display().to_string(); "Skipping directory: {err}");
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(&accept)
        })
        .collect();

    files.sort();
    files
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
