use std::time::Duration;

use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "mdscribe".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Convert rich-text articles to Markdown\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a labelled detail line under a step
pub fn print_detail(label: &str, value: &str) {
    eprintln!("  {} {}", format!("{}:", label).dimmed(), value.bright_white());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print one timing line, rated against the time budget for a single page
pub fn print_timing(label: &str, duration: Duration) {
    let ms = duration.as_secs_f64() * 1000.0;
    let rating = match ms {
        ms if ms < 10.0 => "fast".dimmed().to_string(),
        ms if ms < 100.0 => "moderate".bright_yellow().to_string(),
        _ => "slow".bright_red().to_string(),
    };

    eprintln!("  {:<10} {:>8.2}ms ({})", format!("{}:", label).dimmed(), ms, rating);
}

/// Print per-step timings followed by the total
pub fn print_timing_summary(total: Duration, timings: &[(&str, Duration)]) {
    let rule = "─".repeat(40);
    eprintln!("{}\n{}", rule.dimmed(), "Timing Summary".bold().cyan());

    for &(label, duration) in timings {
        print_timing(label, duration);
    }

    eprintln!("  {:<10} {:>8.2}ms\n", "Total:".bold(), total.as_secs_f64() * 1000.0);
}

/// Format file size for display
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
