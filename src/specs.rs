//! Host specification collection: the plain-text `Label: Value` dump
//! consumed by the benchmark metadata tooling.
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use sysinfo::System;

/// File name the report is saved under.
pub const SPECS_FILE_NAME: &str = "computer_specs.txt";

/// Collect host specifications as ordered label/value pairs.
pub fn collect() -> Vec<(String, String)> {
    let sys = System::new_all();
    let not_available = || "N/A".to_string();

    let mut specs = vec![
        (
            "System".to_string(),
            System::name().unwrap_or_else(not_available),
        ),
        (
            "Release".to_string(),
            System::os_version().unwrap_or_else(not_available),
        ),
        (
            "Version".to_string(),
            System::kernel_version().unwrap_or_else(not_available),
        ),
        (
            "Machine".to_string(),
            System::cpu_arch().unwrap_or_else(|| std::env::consts::ARCH.to_string()),
        ),
        (
            "RAM".to_string(),
            format!("{:.2} GB", sys.total_memory() as f64 / f64::from(1 << 30)),
        ),
    ];

    let cpus = sys.cpus();
    if let Some(cpu) = cpus.first() {
        specs.push(("CPU".to_string(), cpu.brand().trim().to_string()));
        specs.push(("CPU MHz".to_string(), cpu.frequency().to_string()));
    }
    specs.push(("Numbers of CPU".to_string(), cpus.len().to_string()));

    specs
}

/// Render the report: a `Computer Specs:` header followed by one
/// colon-separated `Label: Value` line per entry.
pub fn render(specs: &[(String, String)]) -> String {
    let mut report = String::from("Computer Specs:\n");
    for (label, value) in specs {
        report.push_str(label);
        report.push_str(": ");
        report.push_str(value);
        report.push('\n');
    }
    report
}

/// Save the report to `<folder>/computer_specs.txt`, creating the folder if
/// needed. Returns the written path.
pub fn save_to(folder: &Path, report: &str) -> Result<PathBuf> {
    fs::create_dir_all(folder)
        .with_context(|| format!("failed to create {}", folder.display()))?;
    let path = folder.join(SPECS_FILE_NAME);
    fs::write(&path, report).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_reports_core_labels() {
        let specs = collect();
        let labels: Vec<&str> = specs.iter().map(|(label, _)| label.as_str()).collect();
        for expected in ["System", "RAM", "Numbers of CPU"] {
            assert!(labels.contains(&expected), "missing label {expected}");
        }
    }

    #[test]
    fn render_is_colon_separated() {
        let specs = vec![
            ("System".to_string(), "Linux".to_string()),
            ("RAM".to_string(), "15.33 GB".to_string()),
        ];
        let report = render(&specs);
        let mut lines = report.lines();
        assert_eq!(lines.next(), Some("Computer Specs:"));
        // Downstream tooling splits each line on the first ": ".
        for line in lines {
            let (label, value) = line.split_once(": ").expect("colon-separated line");
            assert!(!label.is_empty());
            assert!(!value.is_empty());
        }
    }

    #[test]
    fn save_creates_folder_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("results");
        let path = save_to(&folder, "Computer Specs:\nSystem: Linux\n").unwrap();
        assert_eq!(path.file_name().unwrap(), SPECS_FILE_NAME);
        assert!(fs::read_to_string(&path).unwrap().starts_with("Computer Specs:"));
    }
}
