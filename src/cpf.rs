//! CPF (Cadastro de Pessoas Físicas) validation and formatting.
//!
//! A CPF is the Brazilian individual taxpayer number: eleven digits where the
//! last two are check digits computed from the first nine. [Cpf] wraps a
//! string that has passed validation and stores it in the canonical
//! `XXX.XXX.XXX-XX` form.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Check whether `candidate` is a valid CPF number.
///
/// Formatting characters (dots, dashes, spaces) are ignored, so both
/// `"529.982.247-25"` and `"52998224725"` are accepted. A candidate is valid
/// when it has exactly eleven digits, is not a single repeated digit, and both
/// check digits match the mod-11 checksum of the preceding digits.
pub fn validate_cpf(candidate: &str) -> bool {
    let digits: Vec<u32> = candidate.chars().filter_map(|c| c.to_digit(10)).collect();

    if digits.len() != 11 {
        return false;
    }

    // Sequences like 111.111.111-11 pass the checksum but are not issued.
    if digits.iter().all(|&digit| digit == digits[0]) {
        return false;
    }

    digits[9] == check_digit(&digits[..9]) && digits[10] == check_digit(&digits[..10])
}

/// Compute the check digit for a prefix of nine or ten CPF digits.
///
/// Each digit is weighted by a descending factor starting at `len + 1`, the
/// weighted sum is reduced mod 11, and remainders of 0 or 1 produce a zero
/// check digit.
fn check_digit(digits: &[u32]) -> u32 {
    let weighted_sum: u32 = digits
        .iter()
        .zip((2..=digits.len() as u32 + 1).rev())
        .map(|(&digit, weight)| digit * weight)
        .sum();

    match 11 - weighted_sum % 11 {
        10 | 11 => 0,
        check_digit => check_digit,
    }
}

/// Format eleven CPF digits as `XXX.XXX.XXX-XX`.
///
/// # Panics
///
/// This function will panic if `digits` does not contain exactly eleven ASCII
/// digits after stripping formatting characters. Use [validate_cpf] first for
/// untrusted input.
pub fn format_cpf(digits: &str) -> String {
    let digits: String = digits.chars().filter(|c| c.is_ascii_digit()).collect();

    assert_eq!(
        digits.len(),
        11,
        "a CPF must have exactly eleven digits, got {:?}",
        digits
    );

    format!(
        "{}.{}.{}-{}",
        &digits[..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..]
    )
}

/// A CPF number that has passed checksum validation.
///
/// The inner string is always in the canonical `XXX.XXX.XXX-XX` form,
/// regardless of how the input was formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cpf(String);

impl Cpf {
    /// Create and validate a CPF from a string.
    ///
    /// # Errors
    ///
    /// This function will return an error if `candidate` does not pass
    /// [validate_cpf].
    pub fn new(candidate: &str) -> Result<Self, Error> {
        if validate_cpf(candidate) {
            Ok(Self(format_cpf(candidate)))
        } else {
            Err(Error::InvalidCpf)
        }
    }

    /// Create a `Cpf` without validating the check digits.
    ///
    /// The caller should ensure that `cpf` is a valid CPF in the canonical
    /// format, e.g., a value previously stored by [Cpf::new].
    pub fn new_unchecked(cpf: &str) -> Self {
        Self(cpf.to_string())
    }

    /// The CPF in its canonical `XXX.XXX.XXX-XX` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}


#[cfg(test)]
mod format_cpf_tests {
    use super::format_cpf;

    #[test]
    fn formats_bare_digits() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
    }

    #[test]
    fn preserves_already_formatted_cpf() {
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
    }

    #[test]
    #[should_panic]
    fn panics_on_wrong_length() {
        format_cpf("12345");
    }
}

#[cfg(test)]
mod cpf_tests {
    use crate::{Error, cpf::Cpf};

    #[test]
    fn new_stores_canonical_form() {
        let cpf = Cpf::new("52998224725").unwrap();

        assert_eq!(cpf.as_str(), "529.982.247-25");
    }

    #[test]
    fn new_accepts_formatted_input() {
        let cpf = Cpf::new("529.982.247-25").unwrap();

        assert_eq!(cpf.as_str(), "529.982.247-25");
    }

    #[test]
    fn new_fails_on_invalid_checksum() {
        let result = Cpf::new("12345678900");

        assert_eq!(result, Err(Error::InvalidCpf));
    }

    #[test]
    fn new_fails_on_repeated_digits() {
        let result = Cpf::new("11111111111");

        assert_eq!(result, Err(Error::InvalidCpf));
    }
}
