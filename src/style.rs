//! Coloured terminal output for the command layer.
//!
//! Diagnostics (errors, warnings, hints) go to stderr so piping stdout stays
//! clean; progress and summaries go to stdout.

use crate::model::{Cycle, Priority, ScanWarning};
use colored::{ColoredString, Colorize};
use std::io::{self, IsTerminal, Write};
use std::path::Path;

pub fn error(msg: &str) {
    eprintln!("{} {}", "error:".red().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), msg);
}

/// A per-file problem, with the path shown relative to the scanned root.
pub fn scan_warning(w: &ScanWarning, root: &Path) {
    let shown = w.path.strip_prefix(root).unwrap_or(&w.path);
    let shown = if shown.as_os_str().is_empty() {
        w.path.as_path()
    } else {
        shown
    };
    eprintln!(
        "{} {}: {}",
        "warning:".yellow().bold(),
        shown.display().to_string().bright_white(),
        w.message
    );
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

/// Dimmed follow-up advice, on stderr.
pub fn hint(msg: &str) {
    eprintln!("{} {}", "hint:".dimmed(), msg.dimmed());
}

pub fn status(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

pub fn path(p: &Path) -> String {
    p.display().to_string().bright_white().to_string()
}

/// Indented `label: value` line for the summary block.
pub fn metric(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {}: {}", label.dimmed(), value.to_string().cyan())
}

pub fn section(title: &str) {
    println!("\n{}", title.bold());
}

/// Recommendation priority, coloured by urgency.
pub fn priority(p: Priority) -> ColoredString {
    let label = p.to_string();
    match p {
        Priority::High => label.red().bold(),
        Priority::Medium => label.yellow(),
        Priority::Low => label.dimmed(),
    }
}

/// `a.ts → b.ts → a.ts`, with the closing node highlighted.
pub fn cycle(c: &Cycle) -> String {
    let members = c.members();
    let mut out = members.join(&format!(" {} ", "→".red()));
    if let Some(first) = members.first() {
        out.push_str(&format!(" {} {}", "→".red(), first.red().bold()));
    }
    out
}

pub fn is_terminal() -> bool {
    io::stdout().is_terminal()
}

/// Render the Markdown summary with the terminal skin. The caller checks
/// whether the destination is a terminal.
pub fn render_markdown(markdown: &str, output: &mut dyn Write) -> io::Result<()> {
    write!(output, "{}", summary_skin().term_text(markdown))
}

fn summary_skin() -> termimad::MadSkin {
    use crossterm::style::Color;
    use termimad::{MadSkin, StyledChar};

    let mut skin = MadSkin::default();
    skin.set_headers_fg(Color::Cyan);
    skin.bold.set_fg(Color::White);
    skin.bullet = StyledChar::from_fg_char(Color::Blue, '•');
    // file paths and specifiers
    skin.inline_code.set_fg(Color::Yellow);
    skin.italic.set_fg(Color::Magenta);
    skin.horizontal_rule = StyledChar::from_fg_char(Color::DarkGrey, '─');
    skin
}
