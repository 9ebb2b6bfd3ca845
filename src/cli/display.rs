// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the sastep CLI.
//!
//! Pretty terminal output that respects your color scheme. OneDark for dark
//! terminals, One Light for light ones. The detection tries `SASTEP_THEME` first
//! (for explicit control), then `COLORFGBG` (set by some terminals), then macOS
//! system appearance, then defaults to dark.
//!
//! Each snapshot renders as a box: a phase badge and description on top, then
//! one row per suffix with its index, text, rank and pair. Sorted phases list
//! rows in sorted order so the tie groups line up. Respects `NO_COLOR` and
//! non-TTY detection for pipelines.
//!
//! # Theme detection order
//!
//! 1. `SASTEP_THEME` env var ("dark" or "light")
//! 2. `COLORFGBG` env var (terminal background hint)
//! 3. macOS appearance (via defaults read)
//! 4. Default to dark theme

use std::sync::OnceLock;

use sastep::{Phase, RankPair, Step, Trace, VerificationReport, SENTINEL};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 80;

/// Widest suffix shown before truncating with an ellipsis
const SUFFIX_WIDTH: usize = 36;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

/// Terminal color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Cached theme detection result
static THEME: OnceLock<Theme> = OnceLock::new();

/// Detect terminal theme from environment
fn detect_theme() -> Theme {
    // 1. Explicit override via SASTEP_THEME
    if let Ok(theme) = std::env::var("SASTEP_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // 2. COLORFGBG (format: "fg;bg" where bg > 6 typically means light)
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    // 3. macOS: Check system appearance
    #[cfg(target_os = "macos")]
    {
        if let Ok(output) = std::process::Command::new("defaults")
            .args(["read", "-g", "AppleInterfaceStyle"])
            .output()
        {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if !stdout.contains("Dark") && output.status.success() {
                return Theme::Light;
            }
        }
    }

    Theme::Dark
}

/// Get the current theme (cached)
pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// ONEDARK / ONE LIGHT COLOR PALETTES (True Color)
// ═══════════════════════════════════════════════════════════════════════════

/// True color escape sequence helper
fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

/// OneDark palette
mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117);
    pub const GREEN: (u8, u8, u8) = (152, 195, 121);
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123);
    pub const BLUE: (u8, u8, u8) = (97, 175, 239);
    pub const MAGENTA: (u8, u8, u8) = (198, 120, 221);
    pub const CYAN: (u8, u8, u8) = (86, 182, 194);
    pub const GRAY: (u8, u8, u8) = (92, 99, 112);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (102, 217, 239);
}

/// One Light palette
mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73);
    pub const GREEN: (u8, u8, u8) = (80, 161, 79);
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1);
    pub const BLUE: (u8, u8, u8) = (64, 120, 242);
    pub const MAGENTA: (u8, u8, u8) = (166, 38, 164);
    pub const CYAN: (u8, u8, u8) = (1, 132, 188);
    pub const GRAY: (u8, u8, u8) = (160, 161, 167);
    pub const BRIGHT_CYAN: (u8, u8, u8) = (1, 112, 158);
}

// ═══════════════════════════════════════════════════════════════════════════
// THEME-AWARE COLOR ACCESSORS
// ═══════════════════════════════════════════════════════════════════════════

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(BLUE);
theme_color!(MAGENTA);
theme_color!(CYAN);
theme_color!(GRAY);
theme_color!(BRIGHT_CYAN);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    // Respect NO_COLOR standard
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply theme color with optional modifiers
pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Calculate visible length (excluding ANSI codes)
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Right-pad a styled string to a fixed visible width
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visible))
    }
}

/// Left-pad a styled string to a fixed visible width
pub fn pad_left(s: &str, width: usize) -> String {
    let visible = visible_len(s);
    if visible >= width {
        s.to_string()
    } else {
        format!("{}{}", " ".repeat(width - visible), s)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// Print a content line: │ content          │
pub fn row(content: &str) {
    let border = GRAY();
    let len = visible_len(content);
    let pad = BOX_WIDTH.saturating_sub(len);
    println!(
        "{}│{}{}{}{}│{}",
        border,
        RESET,
        content,
        " ".repeat(pad),
        border,
        RESET
    );
}

/// Print section header: ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    let border = GRAY();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}┌{}{}{}{}┐{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section divider: ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    let border = GRAY();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}├{}{}{}{}┤{}",
        border,
        RESET,
        label_part,
        border,
        "─".repeat(remaining),
        RESET
    );
}

/// Print section footer: └──────────────────┘
pub fn section_bot() {
    let border = GRAY();
    println!("{}└{}┘{}", border, "─".repeat(BOX_WIDTH), RESET);
}

/// Print double-line header: ╔══════════════════╗
pub fn double_header() {
    let border = BLUE();
    println!("{}╔{}╗{}", border, "═".repeat(BOX_WIDTH), RESET);
}

/// Print double-line footer: ╚══════════════════╝
pub fn double_footer() {
    let border = BLUE();
    println!("{}╚{}╝{}", border, "═".repeat(BOX_WIDTH), RESET);
}

/// Print centered title with bold
pub fn title(text: &str) {
    let border = BLUE();
    let colored = themed(BRIGHT_CYAN, &[BOLD], text);
    let len = visible_len(&colored);
    let total_pad = BOX_WIDTH.saturating_sub(len);
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    println!(
        "{}║{}{}{}{}{}║{}",
        border,
        RESET,
        " ".repeat(left_pad),
        colored,
        " ".repeat(right_pad),
        border,
        RESET
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

/// Color-coded phase badge
pub fn phase_badge(phase: Phase) -> String {
    let label = format!("[{}]", phase.as_str());
    if !use_colors() {
        return label;
    }
    let color = match phase {
        Phase::Initialization => BLUE(),
        Phase::PairsGenerated => YELLOW(),
        Phase::PairsSorted => MAGENTA(),
        Phase::RanksUpdated => GREEN(),
    };
    format!("{}{}{}", color, label, RESET)
}

/// Rank pair with the sentinel half dimmed
pub fn pair_label(pair: RankPair) -> String {
    let second = if pair.second() == SENTINEL {
        themed(GRAY, &[DIM], "-1")
    } else {
        pair.second().to_string()
    };
    format!("({}, {})", pair.first(), second)
}

/// Suffix text cut to `SUFFIX_WIDTH` characters
pub fn suffix_cell(suffix: &str) -> String {
    if suffix.chars().count() <= SUFFIX_WIDTH {
        suffix.to_string()
    } else {
        let head: String = suffix.chars().take(SUFFIX_WIDTH - 1).collect();
        format!("{}…", head)
    }
}

/// One table line: index, suffix, rank, optional pair
pub fn table_line(index: usize, suffix: &str, rank: i32, pair: Option<RankPair>) -> String {
    let pair_text = pair.map(pair_label).unwrap_or_default();
    format!(
        "  {}  {}  {}  {}",
        pad_left(&index.to_string(), 5),
        pad_right(&suffix_cell(suffix), SUFFIX_WIDTH),
        pad_left(&rank.to_string(), 8),
        pair_text
    )
}

/// Table rows for one step, in display order.
///
/// Sorted phases list rows by sorted position; earlier phases by index.
pub fn step_rows(step: &Step, input: &str) -> Vec<String> {
    let ranks = step.ranks();
    match (step.sorted_pairs(), step.pairs()) {
        (Some(sorted), _) => sorted
            .iter()
            .map(|r| table_line(r.index, &r.suffix, ranks[r.index], Some(r.pair)))
            .collect(),
        (None, Some(pairs)) => pairs
            .iter()
            .map(|r| table_line(r.index, &r.suffix, ranks[r.index], Some(r.pair)))
            .collect(),
        (None, None) => input
            .char_indices()
            .enumerate()
            .map(|(i, (offset, _))| table_line(i, &input[offset..], ranks[i], None))
            .collect(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RENDERERS
// ═══════════════════════════════════════════════════════════════════════════

/// Print one snapshot as a box. `position` is 1-based.
pub fn render_step(step: &Step, position: usize, total: usize, input: &str) {
    section_top(&format!("STEP {}/{}", position, total));
    row("");
    row(&format!(
        "  {}  k={}  {}",
        phase_badge(step.phase()),
        step.k(),
        step.description()
    ));
    row("");
    let header = format!(
        "  {}  {}  {}  {}",
        pad_left("INDEX", 5),
        pad_right("SUFFIX", SUFFIX_WIDTH),
        pad_left("RANK", 8),
        if step.pairs().is_some() { "PAIR" } else { "" }
    );
    row(&themed(GRAY, &[BOLD], &header));
    for line in step_rows(step, input) {
        row(&line);
    }
    row("");
    section_bot();
}

/// Print the whole trace followed by the resulting suffix array.
pub fn render_trace(trace: &Trace) {
    double_header();
    title(&format!("PREFIX DOUBLING: \"{}\"", suffix_cell(trace.input())));
    double_footer();
    println!();

    let total = trace.len();
    for (i, step) in trace.steps().iter().enumerate() {
        render_step(step, i + 1, total, trace.input());
        println!();
    }

    render_suffix_array(trace);
}

/// Print the final suffix array box
pub fn render_suffix_array(trace: &Trace) {
    let input = trace.input();
    let offsets: Vec<usize> = input.char_indices().map(|(offset, _)| offset).collect();
    section_top("SUFFIX ARRAY");
    row("");
    for (position, &start) in trace.suffix_array().iter().enumerate() {
        row(&format!(
            "  {}  {}  {}",
            pad_left(&position.to_string(), 5),
            pad_left(&themed(CYAN, &[], &start.to_string()), 5),
            suffix_cell(&input[offsets[start]..])
        ));
    }
    row("");
    section_mid("TERMINATION");
    row(&format!("  {:?}", trace.termination()));
    section_bot();
}

/// Print a verification report box
pub fn render_report(report: &VerificationReport) {
    section_top("VERIFIED");
    row("");
    row(&format!("  {}", themed(GREEN, &[BOLD], "✓ all trace invariants hold")));
    row(&format!("  n = {}   steps = {}", report.n, report.steps));
    row(&format!("  k = {:?}", report.k_values));
    row(&format!("  termination = {:?}", report.termination));
    row(&format!("  suffix array = {:?}", report.suffix_array));
    row("");
    section_bot();
}

/// Format an error line for stderr
pub fn error_line(message: &str) -> String {
    format!("{} {}", themed(RED, &[BOLD], "❌"), message)
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════
