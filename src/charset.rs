//! The four fixed character classes used for both generation and evaluation.

use rand::Rng;
use std::fmt;

pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGIT: &str = "0123456789";
pub const SYMBOL: &str = "!@#$%^&*()_-+=<>?{}[]|:;.,";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lower,
    Upper,
    Digit,
    Symbol,
}

impl CharClass {
    /// Pool order used when filling slots beyond the requested minimums.
    pub const ALL: [CharClass; 4] = [
        CharClass::Lower,
        CharClass::Upper,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    /// Order in which minimum counts are satisfied.
    pub const FILL_ORDER: [CharClass; 4] = [
        CharClass::Digit,
        CharClass::Symbol,
        CharClass::Upper,
        CharClass::Lower,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharClass::Lower => LOWER,
            CharClass::Upper => UPPER,
            CharClass::Digit => DIGIT,
            CharClass::Symbol => SYMBOL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CharClass::Lower => "lower",
            CharClass::Upper => "upper",
            CharClass::Digit => "digit",
            CharClass::Symbol => "symbol",
        }
    }

    pub fn contains(self, ch: char) -> bool {
        self.alphabet().contains(ch)
    }

    /// Returns the class whose alphabet holds `ch`, if any.
    pub fn of(ch: char) -> Option<CharClass> {
        Self::ALL.into_iter().find(|class| class.contains(ch))
    }

    pub fn count_in(self, s: &str) -> usize {
        s.chars().filter(|&ch| self.contains(ch)).count()
    }

    /// Draws one character uniformly from this class's alphabet.
    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> char {
        let alphabet = self.alphabet().as_bytes();
        alphabet[rng.random_range(0..alphabet.len())] as char
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::KeystreamRng;
    use std::collections::HashSet;

    #[test]
    fn test_alphabet_sizes() {
        assert_eq!(LOWER.len(), 26);
        assert_eq!(UPPER.len(), 26);
        assert_eq!(DIGIT.len(), 10);
        assert_eq!(SYMBOL.len(), 26);
    }

    #[test]
    fn test_alphabets_are_disjoint_and_duplicate_free() {
        let mut seen = HashSet::new();
        for class in CharClass::ALL {
            for ch in class.alphabet().chars() {
                assert!(seen.insert(ch), "Character {:?} appears twice", ch);
            }
        }
        assert_eq!(seen.len(), 88);
    }

    #[test]
    fn test_symbol_order_is_exact() {
        assert_eq!(SYMBOL, "!@#$%^&*()_-+=<>?{}[]|:;.,");
    }

    #[test]
    fn test_classify() {
        assert_eq!(CharClass::of('q'), Some(CharClass::Lower));
        assert_eq!(CharClass::of('Q'), Some(CharClass::Upper));
        assert_eq!(CharClass::of('7'), Some(CharClass::Digit));
        assert_eq!(CharClass::of('|'), Some(CharClass::Symbol));
        assert_eq!(CharClass::of('/'), None);
        assert_eq!(CharClass::of('~'), None);
        assert_eq!(CharClass::of(' '), None);
        assert_eq!(CharClass::of('é'), None);
    }

    #[test]
    fn test_count_in() {
        assert_eq!(CharClass::Digit.count_in("a1b2c3"), 3);
        assert_eq!(CharClass::Symbol.count_in("a!b@c/"), 2);
        assert_eq!(CharClass::Upper.count_in(""), 0);
    }

    #[test]
    fn test_pick_stays_in_class() {
        let mut rng = KeystreamRng::from_key(&[7u8; 32]);
        for class in CharClass::ALL {
            for _ in 0..500 {
                let ch = class.pick(&mut rng);
                assert!(class.contains(ch), "{} drew {:?}", class, ch);
            }
        }
    }
}
