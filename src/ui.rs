use crate::charset::CharClass;
use crate::strength::{MAX_SCORE, Strength, StrengthReport};
use anyhow::{Context, Result};
use console::Style;
use rpassword::read_password;
use std::io::{self, Write};
use zeroize::Zeroizing;

pub const METER_WIDTH: usize = 20;

pub struct DisplayOptions {
    pub unicode_support: bool,
    pub color_support: bool,
    pub quiet: bool,
}

pub fn detect_unicode_support() -> bool {
    supports_unicode::on(supports_unicode::Stream::Stdout)
}

pub fn detect_color_support() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

pub fn get_status_symbols(unicode_support: bool) -> (&'static str, &'static str) {
    if unicode_support {
        ("✓", "!")
    } else {
        ("+", "!")
    }
}

fn meter_glyphs(unicode_support: bool) -> (char, char) {
    if unicode_support {
        ('█', '░')
    } else {
        ('#', '-')
    }
}

/// Renders `percent` as a bar of [`METER_WIDTH`] cells.
pub fn meter(percent: u8, unicode_support: bool) -> String {
    let (full, empty) = meter_glyphs(unicode_support);
    let filled = (usize::from(percent.min(100)) * METER_WIDTH + 50) / 100;

    std::iter::repeat_n(full, filled)
        .chain(std::iter::repeat_n(empty, METER_WIDTH - filled))
        .collect()
}

fn strength_style(label: Strength, color_support: bool) -> Style {
    if !color_support {
        return Style::new();
    }

    match label {
        Strength::Undefined => Style::new().dim(),
        Strength::Weak => Style::new().red(),
        Strength::Medium => Style::new().yellow(),
        Strength::Strong | Strength::VeryStrong => Style::new().green(),
    }
}

pub fn prompt_password() -> Result<Zeroizing<String>> {
    print!("Password: ");
    io::stdout().flush()?;

    let password = read_password().context("Failed to read password")?;

    Ok(Zeroizing::new(password))
}

pub fn display_password(password: &str, report: &StrengthReport, options: &DisplayOptions) {
    if options.quiet {
        println!("{}", password);
        return;
    }

    println!("{}\n", password);
    display_composition(password, options);
    display_report(report, options);
}

fn tree_prefix(last: bool, unicode_support: bool) -> &'static str {
    match (unicode_support, last) {
        (false, _) => "-",
        (true, true) => "└─",
        (true, false) => "├─",
    }
}

fn display_composition(password: &str, options: &DisplayOptions) {
    let length = password.chars().count();

    println!("Composition:");
    println!(
        "  {} Length     {} {}",
        tree_prefix(false, options.unicode_support),
        length,
        if length == 1 { "char" } else { "chars" }
    );

    for (i, class) in CharClass::FILL_ORDER.into_iter().enumerate() {
        let last = i == CharClass::FILL_ORDER.len() - 1;
        println!(
            "  {} {:<10} {}",
            tree_prefix(last, options.unicode_support),
            class.name(),
            class.count_in(password)
        );
    }

    println!();
}

pub fn display_report(report: &StrengthReport, options: &DisplayOptions) {
    let (check_ok, check_warn) = get_status_symbols(options.unicode_support);
    let style = strength_style(report.label, options.color_support);
    let status = if report.label >= Strength::Strong {
        check_ok
    } else {
        check_warn
    };

    println!("Strength:");
    println!(
        "  {} {}",
        style.apply_to(meter(report.percent, options.unicode_support)),
        style.apply_to(format!("{}%", report.percent))
    );
    println!("  Score {}/{}", report.score, MAX_SCORE);
    println!(
        "\n{} Strength: {} ({})",
        style.apply_to(format!("[{}]", status)),
        style.apply_to(report.label),
        report.label.english()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_status_symbols_unicode() {
        let (ok, warn) = get_status_symbols(true);
        assert_eq!(ok, "✓");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_get_status_symbols_ascii() {
        let (ok, warn) = get_status_symbols(false);
        assert_eq!(ok, "+");
        assert_eq!(warn, "!");
    }

    #[test]
    fn test_meter_bounds() {
        assert_eq!(meter(0, false), "-".repeat(METER_WIDTH));
        assert_eq!(meter(100, false), "#".repeat(METER_WIDTH));
        assert_eq!(meter(250, false), "#".repeat(METER_WIDTH));
    }

    #[test]
    fn test_meter_proportional() {
        let bar = meter(50, false);
        assert_eq!(bar.chars().count(), METER_WIDTH);
        assert_eq!(bar.chars().filter(|&c| c == '#').count(), 10);

        let bar = meter(83, true);
        assert_eq!(bar.chars().count(), METER_WIDTH);
        assert_eq!(bar.chars().filter(|&c| c == '█').count(), 17);
    }

    #[test]
    fn test_tree_prefix_falls_back_to_ascii() {
        assert_eq!(tree_prefix(false, true), "├─");
        assert_eq!(tree_prefix(true, true), "└─");
        assert_eq!(tree_prefix(false, false), "-");
        assert_eq!(tree_prefix(true, false), "-");
    }

    #[test]
    fn test_plain_style_without_color() {
        let styled = strength_style(Strength::Weak, false).apply_to("x").to_string();
        assert_eq!(styled, "x");
    }
}
