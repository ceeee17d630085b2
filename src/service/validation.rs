//! Password strength rules and structural checks on request bodies.

use crate::error::AppError;
use crate::models::StudentInput;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const AGE_RANGE: std::ops::RangeInclusive<i32> = 18..=30;
pub const SEMESTER_RANGE: std::ops::RangeInclusive<i32> = 1..=8;

static DIGIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").expect("digit pattern"));
static UPPER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").expect("upper pattern"));
static LOWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-z]").expect("lower pattern"));
static SPECIAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\W_]").expect("special pattern"));
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[^@\s]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern")
});

/// A violated password rule. Rules are checked in declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordRule {
    TooShort,
    MissingDigit,
    MissingUppercase,
    MissingLowercase,
    MissingSpecial,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PasswordRule::TooShort => "Password must be at least 8 characters long.",
            PasswordRule::MissingDigit => "Password must contain at least one digit.",
            PasswordRule::MissingUppercase => "Password must contain at least one uppercase letter.",
            PasswordRule::MissingLowercase => "Password must contain at least one lowercase letter.",
            PasswordRule::MissingSpecial => "Password must contain at least one special character.",
        };
        f.write_str(msg)
    }
}

/// Returns the first rule `password` violates, if any.
pub fn validate_password(password: &str) -> Result<(), PasswordRule> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(PasswordRule::TooShort);
    }
    if !DIGIT.is_match(password) {
        return Err(PasswordRule::MissingDigit);
    }
    if !UPPER.is_match(password) {
        return Err(PasswordRule::MissingUppercase);
    }
    if !LOWER.is_match(password) {
        return Err(PasswordRule::MissingLowercase);
    }
    if !SPECIAL.is_match(password) {
        return Err(PasswordRule::MissingSpecial);
    }
    Ok(())
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

/// Trim surrounding whitespace and lowercase the domain part. The local part is kept as given.
pub fn normalize_email(s: &str) -> String {
    let trimmed = s.trim();
    match trimmed.split_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => trimmed.to_string(),
    }
}

/// Structural constraints checked at the request boundary, before any handler logic.
pub trait Validate {
    /// Canonicalize fields in place. Runs before `validate`.
    fn normalize(&mut self) {}

    fn validate(&self) -> Result<(), AppError>;
}

impl Validate for StudentInput {
    fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
    }

    fn validate(&self) -> Result<(), AppError> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(AppError::Validation(format!(
                "age must be between {} and {}",
                AGE_RANGE.start(),
                AGE_RANGE.end()
            )));
        }
        if !SEMESTER_RANGE.contains(&self.semester) {
            return Err(AppError::Validation(format!(
                "semester must be between {} and {}",
                SEMESTER_RANGE.start(),
                SEMESTER_RANGE.end()
            )));
        }
        if !is_valid_email(&self.email) {
            return Err(AppError::Validation("email must be a valid email address".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn student(age: i32, semester: i32, email: &str) -> StudentInput {
        StudentInput {
            name: "Ada".into(),
            age,
            address: "1 Main St".into(),
            email: email.into(),
            subject: "Maths".into(),
            semester,
        }
    }

    #[rstest]
    #[case("Abcdef1!", Ok(()))]
    #[case("Ab1!", Err(PasswordRule::TooShort))]
    #[case("", Err(PasswordRule::TooShort))]
    #[case("Abcdefgh!", Err(PasswordRule::MissingDigit))]
    #[case("abcdef1!", Err(PasswordRule::MissingUppercase))]
    #[case("ABCDEF1!", Err(PasswordRule::MissingLowercase))]
    #[case("Abcdefg1", Err(PasswordRule::MissingSpecial))]
    #[case("Abcdef1_", Ok(()))]
    #[case("Abc def1", Ok(()))]
    fn password_rules(#[case] password: &str, #[case] expected: Result<(), PasswordRule>) {
        assert_eq!(validate_password(password), expected);
    }

    #[test]
    fn short_password_reports_length_first() {
        // Compliant with every other rule but still too short.
        assert_eq!(validate_password("Ab1!xyz"), Err(PasswordRule::TooShort));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Seven characters, nine bytes.
        assert_eq!(validate_password("ÄBc1!Üx"), Err(PasswordRule::TooShort));
        assert_eq!(validate_password("ÄBcdef1!"), Ok(()));
    }

    #[test]
    fn rule_messages() {
        assert_eq!(
            PasswordRule::TooShort.to_string(),
            "Password must be at least 8 characters long."
        );
        assert_eq!(
            PasswordRule::MissingSpecial.to_string(),
            "Password must contain at least one special character."
        );
    }

    #[rstest]
    #[case("ada@example.com", true)]
    #[case("first.last+tag@mail.example.co.uk", true)]
    #[case("ada@localhost", false)]
    #[case("ada.example.com", false)]
    #[case("@example.com", false)]
    #[case("ada@@example.com", false)]
    #[case("ada @example.com", false)]
    #[case("ada@-example.com", false)]
    #[case("ada@example..com", false)]
    fn email_shape(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(is_valid_email(email), valid);
    }

    #[rstest]
    #[case("ada@Example.COM", "ada@example.com")]
    #[case("  bob@example.com\t", "bob@example.com")]
    #[case("Ada.Lovelace@MAIL.Example.org", "Ada.Lovelace@mail.example.org")]
    #[case(" no-at-sign ", "no-at-sign")]
    fn email_normalization(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_email(raw), expected);
    }

    #[test]
    fn normalized_padded_email_passes_validation() {
        let mut input = student(20, 2, " bob@Example.com ");
        assert!(input.validate().is_err());
        input.normalize();
        assert_eq!(input.email, "bob@example.com");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn patterns_compile() {
        for re in [&*DIGIT, &*UPPER, &*LOWER, &*SPECIAL, &*EMAIL] {
            assert!(!re.as_str().is_empty());
        }
    }

    #[rstest]
    #[case(18, 1)]
    #[case(30, 8)]
    #[case(24, 4)]
    fn accepts_bounds(#[case] age: i32, #[case] semester: i32) {
        assert!(student(age, semester, "ada@example.com").validate().is_ok());
    }

    #[rstest]
    #[case(17, 1, "age")]
    #[case(31, 1, "age")]
    #[case(20, 0, "semester")]
    #[case(20, 9, "semester")]
    fn rejects_out_of_range(#[case] age: i32, #[case] semester: i32, #[case] field: &str) {
        match student(age, semester, "ada@example.com").validate() {
            Err(AppError::Validation(msg)) => assert!(msg.starts_with(field), "{msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(matches!(
            student(20, 2, "not-an-email").validate(),
            Err(AppError::Validation(_))
        ));
    }
}
