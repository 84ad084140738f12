// Tue Jan 13 2026 - Alex

use crate::scanner::{total_directory_matches, total_matches, DirectoryResults, ScanResults};
use colored::{Color, Colorize};
use itertools::Itertools;
use serde_json::{json, Map, Value};
use std::path::Path;
use std::time::Duration;

/// Results of one command line run, already sorted.
#[derive(Debug, Clone)]
pub enum ScanReport {
    File(ScanResults),
    Directory(DirectoryResults),
}

impl ScanReport {
    pub fn total_matches(&self) -> usize {
        match self {
            ScanReport::File(results) => total_matches(results),
            ScanReport::Directory(results) => total_directory_matches(results),
        }
    }

    pub fn matched_files(&self) -> usize {
        match self {
            ScanReport::File(results) => usize::from(results.values().any(|o| !o.is_empty())),
            ScanReport::Directory(results) => results
                .values()
                .flat_map(|files| files.keys())
                .unique()
                .count(),
        }
    }

    /// Orders every offset list descending.
    pub fn reverse(&mut self) {
        match self {
            ScanReport::File(results) => results.values_mut().for_each(|o| o.reverse()),
            ScanReport::Directory(results) => results
                .values_mut()
                .flat_map(|files| files.values_mut())
                .for_each(|o| o.reverse()),
        }
    }
}

pub struct DisplayRenderer {
    use_color: bool,
}

impl DisplayRenderer {
    pub fn new() -> Self {
        Self { use_color: true }
    }

    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_offset(offset: u64) -> String {
        format!("0x{:X}", offset)
    }

    fn format_offsets(offsets: &[u64]) -> String {
        offsets.iter().map(|&o| Self::format_offset(o)).join(", ")
    }

    pub fn render(&self, target: &Path, report: &ScanReport) -> String {
        match report {
            ScanReport::File(results) => self.render_file(target, results),
            ScanReport::Directory(results) => self.render_directory(results),
        }
    }

    pub fn render_file(&self, path: &Path, results: &ScanResults) -> String {
        let mut out = String::new();
        for (signature, offsets) in results.iter().sorted_by_key(|(s, _)| s.to_string()) {
            if offsets.is_empty() {
                out.push_str(&format!("{} {}  no matches\n", self.paint("[-]", Color::Yellow), signature));
                continue;
            }
            out.push_str(&format!(
                "{} {}  ({} in {})\n",
                self.paint("[+]", Color::Green),
                self.bold(&signature.to_string()),
                offsets.len(),
                path.display()
            ));
            out.push_str(&format!("    {}\n", self.paint(&Self::format_offsets(offsets), Color::Cyan)));
        }
        out
    }

    pub fn render_directory(&self, results: &DirectoryResults) -> String {
        let mut out = String::new();
        for (signature, files) in results.iter().sorted_by_key(|(s, _)| s.to_string()) {
            if files.is_empty() {
                out.push_str(&format!("{} {}  no matches\n", self.paint("[-]", Color::Yellow), signature));
                continue;
            }
            let matches: usize = files.values().map(Vec::len).sum();
            out.push_str(&format!(
                "{} {}  ({} in {} files)\n",
                self.paint("[+]", Color::Green),
                self.bold(&signature.to_string()),
                matches,
                files.len()
            ));
            for (path, offsets) in files.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
                out.push_str(&format!("    {}\n", self.paint(&path.display().to_string(), Color::Blue)));
                out.push_str(&format!("        {}\n", Self::format_offsets(offsets)));
            }
        }
        out
    }

    pub fn render_summary(&self, report: &ScanReport, elapsed: Duration) -> String {
        let total = report.total_matches();
        let line = format!(
            "Found {} matches in {} files ({:.2}s)",
            total,
            report.matched_files(),
            elapsed.as_secs_f64()
        );
        if total == 0 {
            self.paint(&line, Color::Yellow)
        } else {
            self.paint(&line, Color::Green)
        }
    }

    pub fn render_json(&self, target: &Path, report: &ScanReport) -> Value {
        let results: Vec<Value> = match report {
            ScanReport::File(results) => results
                .iter()
                .sorted_by_key(|(s, _)| s.to_string())
                .map(|(signature, offsets)| {
                    json!({
                        "signature": signature.to_string(),
                        "offsets": offsets_json(offsets),
                    })
                })
                .collect(),
            ScanReport::Directory(results) => results
                .iter()
                .sorted_by_key(|(s, _)| s.to_string())
                .map(|(signature, files)| {
                    let files: Map<String, Value> = files
                        .iter()
                        .map(|(path, offsets)| (path.display().to_string(), offsets_json(offsets)))
                        .collect();
                    json!({
                        "signature": signature.to_string(),
                        "files": files,
                    })
                })
                .collect(),
        };

        json!({
            "target": target.display().to_string(),
            "total_matches": report.total_matches(),
            "results": results,
        })
    }
}

fn offsets_json(offsets: &[u64]) -> Value {
    offsets
        .iter()
        .map(|&o| Value::String(DisplayRenderer::format_offset(o)))
        .collect()
}

impl Default for DisplayRenderer {
    fn default() -> Self {
        Self::new()
    }
}
