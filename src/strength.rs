//! Heuristic password strength.
//!
//! One point each for length >= 8, length >= 12, and the presence of an
//! uppercase letter, a digit and a symbol. A run of three identical characters
//! costs a point. The score is normalized against [`MAX_SCORE`].

use crate::charset::CharClass;
use std::fmt;

pub const MAX_SCORE: u8 = 6;

const SHORT_LENGTH: usize = 8;
const LONG_LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    Undefined,
    Weak,
    Medium,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            90.. => Strength::VeryStrong,
            66.. => Strength::Strong,
            33.. => Strength::Medium,
            _ => Strength::Weak,
        }
    }

    /// Display label shown to end users.
    pub fn label(self) -> &'static str {
        match self {
            Strength::Undefined => "—",
            Strength::Weak => "Fraca",
            Strength::Medium => "Média",
            Strength::Strong => "Forte",
            Strength::VeryStrong => "Muito forte",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            Strength::Undefined => "undefined",
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
            Strength::VeryStrong => "very strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrengthReport {
    pub percent: u8,
    pub label: Strength,
    pub score: u8,
}

impl StrengthReport {
    pub const EMPTY: Self = Self {
        percent: 0,
        label: Strength::Undefined,
        score: 0,
    };
}

/// Scores `password`. Absent or empty input yields [`StrengthReport::EMPTY`].
pub fn evaluate<'a>(password: impl Into<Option<&'a str>>) -> StrengthReport {
    let password = match password.into() {
        Some(p) if !p.is_empty() => p,
        _ => return StrengthReport::EMPTY,
    };

    // Length and repetition work on UTF-16 code units.
    let units: Vec<u16> = password.encode_utf16().collect();
    let length = units.len();

    let checks = [
        length >= SHORT_LENGTH,
        length >= LONG_LENGTH,
        has_class(password, CharClass::Upper),
        has_class(password, CharClass::Digit),
        has_class(password, CharClass::Symbol),
    ];
    let mut score = checks.iter().filter(|&&passed| passed).count() as u8;

    if has_triple_run(&units) {
        score = score.saturating_sub(1);
    }

    let percent = ((f64::from(score) / f64::from(MAX_SCORE)) * 100.0)
        .round()
        .min(100.0) as u8;

    StrengthReport {
        percent,
        label: Strength::from_percent(percent),
        score,
    }
}

fn has_class(password: &str, class: CharClass) -> bool {
    password.chars().any(|ch| class.contains(ch))
}

fn is_line_terminator(unit: u16) -> bool {
    matches!(unit, 0x000A | 0x000D | 0x2028 | 0x2029)
}

/// True if some unit other than a line terminator appears three times in a row.
fn has_triple_run(units: &[u16]) -> bool {
    units
        .windows(3)
        .any(|w| !is_line_terminator(w[0]) && w[0] == w[1] && w[1] == w[2])
}
