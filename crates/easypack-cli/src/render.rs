use std::path::Path;

use colored::{Color, Colorize};

use easypack_core::dispatch::RenderedScript;
use easypack_core::{GenerationReport, LaunchConfig, Platform};

/// Width (in characters) of the separator line drawn around script content.
const SEPARATOR_WIDTH: usize = 60;

fn platform_color(platform: Platform) -> Color {
    match platform {
        Platform::Linux => Color::Cyan,
        Platform::Windows => Color::Blue,
    }
}

/// Show `path` relative to `cwd` when that is shorter to read.
pub fn display_path(path: &Path, cwd: &Path) -> String {
    match pathdiff::diff_paths(path, cwd) {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) if !rel.starts_with("..") => rel.display().to_string(),
        _ => path.display().to_string(),
    }
}

/// Build a separator line: `─── start.sh (linux) ──────────`
fn separator_line(label: &str, color: Color) -> String {
    let label = format!(" {} ", label);
    let prefix_dashes = 3;
    let suffix_dashes = SEPARATOR_WIDTH.saturating_sub(prefix_dashes + label.chars().count());
    format!(
        "{}{}{}",
        "─".repeat(prefix_dashes).color(color),
        label.color(color).bold(),
        "─".repeat(suffix_dashes).color(color),
    )
}

fn closing_separator(color: Color) -> String {
    format!("{}", "─".repeat(SEPARATOR_WIDTH).color(color))
}

pub fn print_header(config: &LaunchConfig, cwd: &Path) {
    println!(
        "{} Generating scripts for {} ({}) into {}\n",
        "$".cyan(),
        config.process_name.bold(),
        config.platforms,
        display_path(&config.output_dir, cwd).dimmed()
    );
}

/// One line per written file, then a count.
pub fn print_report(report: &GenerationReport, cwd: &Path) {
    for file in &report.files {
        println!(
            "  {} {} {}",
            "CREATED".green(),
            display_path(&file.path, cwd),
            format!("({}, {} bytes)", file.platform, file.bytes).dimmed()
        );
    }
    println!(
        "\n{} script(s) written to {}",
        report.files.len(),
        display_path(&report.output_dir, cwd).bold()
    );
}

/// Print every script that would be written, framed per file.
///
/// Content is shown with `\n` line breaks whatever the platform's line
/// ending, so CRLF scripts read cleanly on any terminal.
pub fn print_plan(config: &LaunchConfig, scripts: &[RenderedScript], cwd: &Path) {
    println!(
        "{} Would generate {} script(s) for {} into {}\n",
        "$".cyan(),
        scripts.len(),
        config.process_name.bold(),
        display_path(&config.output_dir, cwd).dimmed()
    );

    for script in scripts {
        let color = platform_color(script.platform);
        let label = format!("{} ({})", script.file_name, script.platform);
        println!("{}", separator_line(&label, color));
        for line in script.content.lines() {
            println!("{}", line);
        }
        println!("{}", closing_separator(color));
    }
}
