//! Composable Validation Rules
//!
//! Pure rule constructors for single text fields. Each constructor captures
//! the field it guards and the message to surface, and returns a closure that
//! can be chained into a [`Validator`](crate::functional::validation_engine::Validator).
//! Rules other than [`required`] treat an empty value as "nothing to check".

use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{constants, models::registration::Field};

pub static NAME_REGEX: Lazy<Regex> = Lazy::new(|| compile(constants::PATTERN_NAME));
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| compile(constants::PATTERN_EMAIL));
pub static CEP_REGEX: Lazy<Regex> = Lazy::new(|| compile(constants::PATTERN_CEP));
pub static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| compile(constants::PATTERN_DIGITS));
pub static UF_REGEX: Lazy<Regex> = Lazy::new(|| compile(constants::PATTERN_UF));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

/// Validation result type for composable validation chains
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Which constraint a value violated.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    #[display(fmt = "REQUIRED")]
    Required,
    #[display(fmt = "TOO_SHORT")]
    MinLength,
    #[display(fmt = "INVALID_FORMAT")]
    Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: Field,
    pub code: RuleKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, code: RuleKind, message: &str) -> Self {
        Self {
            field,
            code,
            message: message.to_string(),
        }
    }
}

/// Fails when the value is empty or whitespace only.
pub fn required(field: Field, message: &'static str) -> impl Fn(&str) -> ValidationResult<()> {
    move |value: &str| {
        if value.trim().is_empty() {
            Err(ValidationError::new(field, RuleKind::Required, message))
        } else {
            Ok(())
        }
    }
}

/// Fails when a non-empty value has fewer than `min` characters.
pub fn min_length(
    field: Field,
    min: usize,
    message: &'static str,
) -> impl Fn(&str) -> ValidationResult<()> {
    move |value: &str| {
        if !value.is_empty() && value.chars().count() < min {
            Err(ValidationError::new(field, RuleKind::MinLength, message))
        } else {
            Ok(())
        }
    }
}

/// Fails when a non-empty value does not match `regex`.
pub fn pattern(
    field: Field,
    regex: &'static Lazy<Regex>,
    message: &'static str,
) -> impl Fn(&str) -> ValidationResult<()> {
    move |value: &str| {
        if !value.is_empty() && !regex.is_match(value) {
            Err(ValidationError::new(field, RuleKind::Pattern, message))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_patterns_compile() {
        for regex in [&NAME_REGEX, &EMAIL_REGEX, &CEP_REGEX, &DIGITS_REGEX, &UF_REGEX] {
            Lazy::force(regex);
        }
    }

    #[test]
    fn required_rejects_blank_values() {
        let rule = required(Field::FirstName, "obrigatório");
        assert!(rule("Ana").is_ok());

        let err = rule("   ").unwrap_err();
        assert_eq!(err.code, RuleKind::Required);
        assert_eq!(err.field, Field::FirstName);
        assert_eq!(err.message, "obrigatório");
    }

    #[test]
    fn min_length_counts_characters_not_bytes() {
        let rule = min_length(Field::FirstName, 3, "curto");
        // "Zé" is 3 bytes but 2 characters
        assert_eq!(rule("Zé").unwrap_err().code, RuleKind::MinLength);
        assert!(rule("Zéa").is_ok());
        assert!(rule("").is_ok());
    }

    #[test]
    fn pattern_skips_empty_values() {
        let rule = pattern(Field::Number, &DIGITS_REGEX, "dígitos");
        assert!(rule("").is_ok());
        assert!(rule("123").is_ok());
        assert_eq!(rule("12a").unwrap_err().code, RuleKind::Pattern);
    }

    #[test]
    fn name_pattern_accepts_accented_letters_and_spaces() {
        assert!(NAME_REGEX.is_match("João da Conceição"));
        assert!(NAME_REGEX.is_match("ÂNGELA"));
        assert!(!NAME_REGEX.is_match("R2D2"));
        assert!(!NAME_REGEX.is_match("Anne-Marie"));
    }

    #[test]
    fn email_shape() {
        let rule = pattern(Field::Email, &EMAIL_REGEX, "inválido");
        assert!(rule("maria@example.com.br").is_ok());
        assert!(rule("maria@example").is_err());
        assert!(rule("maria silva@example.com").is_err());
        assert!(rule("@example.com").is_err());
    }

    #[test]
    fn cep_and_uf_patterns() {
        assert!(CEP_REGEX.is_match("01001-000"));
        assert!(CEP_REGEX.is_match("01001000"));
        assert!(!CEP_REGEX.is_match("0100-1000"));
        assert!(!CEP_REGEX.is_match("01001-0000"));
        assert!(UF_REGEX.is_match("SP"));
        assert!(!UF_REGEX.is_match("sp"));
        assert!(!UF_REGEX.is_match("SPA"));
    }

    #[test]
    fn digit_pattern_is_ascii_only() {
        assert!(!DIGITS_REGEX.is_match("١٢٣"));
    }
}
