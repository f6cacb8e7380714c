use std::path::Path;

use colored::*;
use knockr_core::engine::ScanSummary;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;

/// All decorated output funnels through tracing so it interleaves
/// cleanly with probe result lines and the progress bar.
fn print(msg: &str) {
    info!(target: "knockr::print", "{msg}");
}

pub fn banner(q_level: u8) {
    if q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ KNOCKR v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .bright_black();

    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

fn fat_separator() {
    print(&format!("{}", "═".repeat(TOTAL_WIDTH).bright_black()));
}

pub fn summary(summary: &ScanSummary, results_path: &Path, q_level: u8) {
    if q_level >= 2 {
        return;
    }

    let open: ColoredString = format!("{} open", summary.open).green().bold();
    let closed: ColoredString = format!("{} closed", summary.closed).yellow();
    let errors: ColoredString = format!("{} errors", summary.errors).red();
    let took: ColoredString =
        format!("{:.2}s", summary.elapsed.as_secs_f64()).bold();

    if q_level == 0 {
        fat_separator();
    }
    print(&format!(
        "Scan complete: {} / {} / {} across {} ports in {}",
        open,
        closed,
        errors,
        summary.probed(),
        took
    ));

    if summary.open > 0 {
        print(&format!(
            "Open ports appended to {}",
            results_path.display().to_string().bold()
        ));
    }
}
