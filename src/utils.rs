//! Formatting and console helpers shared by the pipeline and the CLI.

use crate::constants::PROGRESS_SPINNER_TEMPLATE;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Transient "working" indicator. Hidden entirely in quiet mode.
pub fn create_progress_spinner(message: &str) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(PROGRESS_SPINNER_TEMPLATE) {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Runs `work` under a spinner and clears it afterwards, whatever `work` returned.
pub fn with_spinner<T>(message: &str, work: impl FnOnce() -> T) -> T {
    let spinner = create_progress_spinner(message);
    finish_after(&spinner, work)
}

fn finish_after<T>(spinner: &ProgressBar, work: impl FnOnce() -> T) -> T {
    let result = work();
    spinner.finish_and_clear();
    result
}

/// Human-readable size in binary units, e.g. "512 B", "1.5 KB".
pub fn format_file_size(bytes: u64) -> String {
    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        scaled /= 1024.0;
        unit += 1;
    }

    match unit {
        0 => format!("{} B", bytes),
        _ => format!("{:.1} {}", scaled, SIZE_UNITS[unit]),
    }
}

/// Percentage saved; negative when the output grew.
pub fn calculate_compression_ratio(bytes_in: u64, bytes_out: u64) -> f64 {
    if bytes_in == 0 {
        return 0.0;
    }
    (1.0 - bytes_out as f64 / bytes_in as f64) * 100.0
}

/// "1.5 MB -> 300.0 KB (80.0% saved)", or "... grew" when the batch got larger.
pub fn describe_savings(bytes_in: u64, bytes_out: u64) -> String {
    let ratio = calculate_compression_ratio(bytes_in, bytes_out);
    let verdict = if ratio >= 0.0 {
        format!("{:.1}% saved", ratio)
    } else {
        format!("{:.1}% grew", -ratio)
    };

    format!(
        "{} -> {} ({})",
        format_file_size(bytes_in),
        format_file_size(bytes_out),
        verdict
    )
}
