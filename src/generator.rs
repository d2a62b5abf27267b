use crate::charset::CharClass;
use crate::shuffle::shuffle;
use log::debug;
use rand::Rng;
use thiserror::Error;
use zeroize::Zeroizing;

pub const MIN_TOTAL: usize = 4;

const TOTAL_MESSAGE: &str = "total must be an integer >= 4";
const COUNT_MESSAGE: &str = "counts must be non-negative integers";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("sum of minimum counts ({sum}) cannot exceed total ({total})")]
    ConstraintViolation { sum: usize, total: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ConstraintViolation,
}

impl GenerateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerateError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            GenerateError::ConstraintViolation { .. } => ErrorKind::ConstraintViolation,
        }
    }

    fn total() -> Self {
        GenerateError::InvalidArgument(TOTAL_MESSAGE.to_string())
    }

    fn count() -> Self {
        GenerateError::InvalidArgument(COUNT_MESSAGE.to_string())
    }
}

/// A validated generation request. Construct with [`GenerationRequest::new`]
/// or [`GenerationRequest::parse`]; the fields are only readable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    total: usize,
    min_digits: usize,
    min_symbols: usize,
    min_upper: usize,
    min_lower: usize,
}

impl GenerationRequest {
    /// Validates in order: total, each count (digits, symbols, upper, lower),
    /// then the sum of counts against total. The first failure is returned.
    pub fn new(
        total: i64,
        min_digits: i64,
        min_symbols: i64,
        min_upper: i64,
        min_lower: i64,
    ) -> Result<Self, GenerateError> {
        let total = usize::try_from(total)
            .ok()
            .filter(|&t| t >= MIN_TOTAL)
            .ok_or_else(GenerateError::total)?;

        let mut counts = [0usize; 4];
        for (slot, value) in counts
            .iter_mut()
            .zip([min_digits, min_symbols, min_upper, min_lower])
        {
            *slot = usize::try_from(value).map_err(|_| GenerateError::count())?;
        }

        let sum = counts
            .iter()
            .try_fold(0usize, |acc, &c| acc.checked_add(c))
            .unwrap_or(usize::MAX);
        if sum > total {
            return Err(GenerateError::ConstraintViolation { sum, total });
        }

        let [min_digits, min_symbols, min_upper, min_lower] = counts;
        Ok(Self {
            total,
            min_digits,
            min_symbols,
            min_upper,
            min_lower,
        })
    }

    /// Builds a request from raw text, as typed by a user.
    pub fn parse(
        total: &str,
        min_digits: &str,
        min_symbols: &str,
        min_upper: &str,
        min_lower: &str,
    ) -> Result<Self, GenerateError> {
        let total = parse_integer(total).ok_or_else(GenerateError::total)?;

        let mut counts = [0i64; 4];
        for (slot, text) in counts
            .iter_mut()
            .zip([min_digits, min_symbols, min_upper, min_lower])
        {
            *slot = parse_integer(text).ok_or_else(GenerateError::count)?;
        }

        let [digits, symbols, upper, lower] = counts;
        Self::new(total, digits, symbols, upper, lower)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn minimum(&self, class: CharClass) -> usize {
        match class {
            CharClass::Digit => self.min_digits,
            CharClass::Symbol => self.min_symbols,
            CharClass::Upper => self.min_upper,
            CharClass::Lower => self.min_lower,
        }
    }

    pub fn minimum_sum(&self) -> usize {
        self.min_digits + self.min_symbols + self.min_upper + self.min_lower
    }
}

/// Parses a count the way a lenient numeric field would: surrounding
/// whitespace is ignored, blank text reads as zero, unsigned `0x`/`0o`/`0b`
/// literals are read in their radix, and a float literal is accepted only
/// when it has no fractional part.
pub fn parse_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0);
    }

    if let Some((radix, digits)) = split_radix_prefix(trimmed) {
        if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
            return None;
        }
        return i64::from_str_radix(digits, radix).ok();
    }

    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    let value = trimmed.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

fn split_radix_prefix(text: &str) -> Option<(u32, &str)> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    Some((radix, &text[2..]))
}

/// Produces a password of exactly `request.total()` characters.
///
/// Minimums are met first (digits, symbols, upper, lower). Remaining slots pick
/// a class uniformly and then a character uniformly within it, so smaller
/// alphabets are overrepresented per character. The result is shuffled.
pub fn generate_password<R: Rng + ?Sized>(
    request: &GenerationRequest,
    rng: &mut R,
) -> Zeroizing<String> {
    let mut chars: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(request.total));

    for class in CharClass::FILL_ORDER {
        for _ in 0..request.minimum(class) {
            chars.push(class.pick(rng));
        }
    }

    let required = chars.len();

    while chars.len() < request.total {
        let class = CharClass::ALL[rng.random_range(0..CharClass::ALL.len())];
        chars.push(class.pick(rng));
    }

    debug!(
        "filled {} required and {} free slots",
        required,
        request.total - required
    );

    let shuffled = Zeroizing::new(shuffle(chars.as_slice(), rng));

    Zeroizing::new(shuffled.iter().collect())
}

/// Validates the counts and generates with the supplied random source.
pub fn generate_with<R: Rng + ?Sized>(
    total: i64,
    min_digits: i64,
    min_symbols: i64,
    min_upper: i64,
    min_lower: i64,
    rng: &mut R,
) -> Result<Zeroizing<String>, GenerateError> {
    let request = GenerationRequest::new(total, min_digits, min_symbols, min_upper, min_lower)?;
    Ok(generate_password(&request, rng))
}

/// Validates the counts and generates with the thread-local default source.
pub fn generate(
    total: i64,
    min_digits: i64,
    min_symbols: i64,
    min_upper: i64,
    min_lower: i64,
) -> Result<Zeroizing<String>, GenerateError> {
    generate_with(
        total,
        min_digits,
        min_symbols,
        min_upper,
        min_lower,
        &mut rand::rng(),
    )
}
