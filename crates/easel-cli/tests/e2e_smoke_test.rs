use std::{fs, path::PathBuf};

use tempfile::{TempDir, tempdir};

use easel::EaselError;
use easel_cli::{Args, run};

/// Collects all .txt files from a directory
fn collect_txt_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("txt")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn demo_files() -> Vec<PathBuf> {
    // Demos are at workspace root, relative to workspace not the crate
    let demos_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("demos");
    let files = collect_txt_files(demos_path);
    assert!(!files.is_empty(), "No instruction files found in demos/");
    files
}

/// Writes a config without the pause between files.
fn fast_config() -> (TempDir, String) {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[run]\nfile_delay_ms = 0\n").unwrap();
    (dir, path.to_string_lossy().to_string())
}

fn args(files: Vec<PathBuf>, config: &str) -> Args {
    Args {
        files: files
            .iter()
            .map(|path| path.to_string_lossy().to_string())
            .collect(),
        token: None,
        board: None,
        config: Some(config.to_string()),
        instructions_dir: "instructions".to_string(),
        dry_run: false,
        check: false,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_demos_dry_run() {
    let (_dir, config) = fast_config();
    let files = demo_files();
    let args = Args {
        dry_run: true,
        ..args(files.clone(), &config)
    };

    let summary = run(&args).expect("dry run over demos failed");

    assert_eq!(summary.files(), files.as_slice());
    assert_eq!(summary.reports().len(), files.len());

    let mut failed = Vec::new();
    for report in summary.reports() {
        if report.failed() > 0 || !report.rejected().is_empty() || report.total() == 0 {
            failed.push(report.path().display().to_string());
        }
    }
    assert!(failed.is_empty(), "demo files with failures: {failed:?}");
    assert!(summary.stats().total() > 0);
}

#[test]
fn e2e_smoke_test_demos_check() {
    let (_dir, config) = fast_config();
    let args = Args {
        check: true,
        ..args(demo_files(), &config)
    };

    let summary = run(&args).expect("demo files should parse cleanly");

    assert!(summary.reports().is_empty());
    assert_eq!(summary.stats().total(), 0);
}

#[test]
fn e2e_check_reports_rejected_lines() {
    let (dir, config) = fast_config();
    let broken = dir.path().join("broken.txt");
    fs::write(&broken, "SHAPE|A|0|0|10|10\nSHAPE|B|0|0|wide|10\nCIRCLE|1\n").unwrap();
    let args = Args {
        check: true,
        ..args(vec![broken.clone()], &config)
    };

    let err = run(&args).unwrap_err();

    let failures = match err {
        EaselError::Parse(failures) => failures,
        other => panic!("expected a parse error, got {other:?}"),
    };
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].path(), broken.as_path());
    let lines: Vec<_> = failures[0]
        .err()
        .rejected()
        .iter()
        .map(|line| line.line())
        .collect();
    assert_eq!(lines, vec![2, 3]);
}

#[test]
fn e2e_missing_credentials_is_fatal() {
    let (_dir, config) = fast_config();
    let args = Args {
        board: Some("uXjVK123=".to_string()),
        ..args(demo_files(), &config)
    };

    let err = run(&args).unwrap_err();

    assert!(matches!(err, EaselError::MissingCredentials(_)));
}

#[test]
fn e2e_blank_board_is_missing() {
    let (_dir, config) = fast_config();
    let args = Args {
        token: Some("token".to_string()),
        board: Some("   ".to_string()),
        ..args(demo_files(), &config)
    };

    let err = run(&args).unwrap_err();

    assert!(matches!(err, EaselError::MissingCredentials(_)));
}

#[test]
fn e2e_no_instruction_files_is_fatal() {
    let (dir, config) = fast_config();
    let empty = dir.path().join("instructions");
    fs::create_dir(&empty).unwrap();
    let args = Args {
        dry_run: true,
        instructions_dir: empty.to_string_lossy().to_string(),
        ..args(Vec::new(), &config)
    };

    let err = run(&args).unwrap_err();

    assert!(matches!(err, EaselError::NoInstructionFiles(ref path) if *path == empty));
}

#[test]
fn e2e_discovers_files_in_instructions_dir() {
    let (dir, config) = fast_config();
    let instructions = dir.path().join("instructions");
    fs::create_dir(&instructions).unwrap();
    fs::write(instructions.join("02_links.txt"), "LINK|A|B\n").unwrap();
    fs::write(
        instructions.join("01_shapes.txt"),
        "SHAPE|A|0|0|10|10\nSHAPE|B|50|0|10|10\n",
    )
    .unwrap();
    let args = Args {
        dry_run: true,
        instructions_dir: instructions.to_string_lossy().to_string(),
        ..args(Vec::new(), &config)
    };

    let summary = run(&args).unwrap();

    let names: Vec<_> = summary
        .files()
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["01_shapes.txt", "02_links.txt"]);
    assert_eq!(summary.stats().total(), 3);
}

#[test]
fn e2e_missing_config_file_is_fatal() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    let args = Args {
        dry_run: true,
        ..args(demo_files(), &missing.to_string_lossy())
    };

    let err = run(&args).unwrap_err();

    assert!(matches!(err, EaselError::Config(_)));
}
