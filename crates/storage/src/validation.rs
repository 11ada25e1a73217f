//! Input rules shared by request DTOs and the seeding tool.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

/// Minimum length, in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;
/// Maximum length, in bytes: bcrypt ignores everything past 72.
pub const PASSWORD_MAX_LENGTH: usize = 72;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref NICKNAME_RE: Regex = Regex::new(r"^[a-zA-Z0-9]+$").unwrap();
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Scores a password from 0 to 5: length, upper, lower, digit, symbol.
pub fn password_strength(password: &str) -> u8 {
    let checks = [
        password.chars().count() >= PASSWORD_MIN_LENGTH,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];

    checks.iter().filter(|passed| **passed).count() as u8
}

pub fn password_strength_label(score: u8) -> &'static str {
    match score {
        0..=2 => "Débil",
        3 => "Media",
        4 => "Fuerte",
        _ => "Muy Fuerte",
    }
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if is_valid_email(email.trim()) {
        Ok(())
    } else {
        Err(error_with_message("invalid_email", "Formato de email inválido"))
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(error_with_message(
            "password_short",
            "La contraseña debe tener al menos 8 caracteres",
        ));
    }
    if password.len() > PASSWORD_MAX_LENGTH {
        return Err(error_with_message(
            "password_long",
            "La contraseña no puede superar 72 caracteres",
        ));
    }
    Ok(())
}

/// Alphanumeric only. Blank is accepted and later stored as no nickname.
pub fn validate_nickname(nickname: &str) -> Result<(), ValidationError> {
    let nickname = nickname.trim();
    if nickname.is_empty() || NICKNAME_RE.is_match(nickname) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_nickname"))
    }
}

pub fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    const VALID_GENDERS: &[&str] = &["M", "F"];

    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_gender"))
    }
}

pub fn validate_country_code(code: &str) -> Result<(), ValidationError> {
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_country_code"))
    }
}

pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let digits = color.strip_prefix('#').unwrap_or_default();
    if digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_color"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_format() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("ana.maria@deporty.co"));
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("a b@example.com"));
        assert!(!is_valid_email("user@domain"));
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }

    #[test]
    fn test_password_strength_scores() {
        assert_eq!(password_strength(""), 0);
        assert_eq!(password_strength("abc"), 1);
        assert_eq!(password_strength("abcdefgh"), 2);
        assert_eq!(password_strength("Abcdefgh"), 3);
        assert_eq!(password_strength("Abcdefg1"), 4);
        assert_eq!(password_strength("Abcdef1!"), 5);
    }

    #[test]
    fn test_password_strength_labels() {
        assert_eq!(password_strength_label(0), "Débil");
        assert_eq!(password_strength_label(2), "Débil");
        assert_eq!(password_strength_label(3), "Media");
        assert_eq!(password_strength_label(4), "Fuerte");
        assert_eq!(password_strength_label(5), "Muy Fuerte");
    }

    #[test]
    fn test_password_length_bounds() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("password123").is_ok());
        assert!(validate_password(&"x".repeat(73)).is_err());
    }

    #[test]
    fn test_password_minimum_counts_characters() {
        // Four characters, eight bytes.
        assert!(validate_password("ññññ").is_err());
        assert!(validate_password("contraseña").is_ok());
        // 36 two-byte characters hit the bcrypt byte cap exactly.
        assert!(validate_password(&"ñ".repeat(36)).is_ok());
        assert!(validate_password(&"ñ".repeat(37)).is_err());
    }

    #[test]
    fn test_nickname_and_color() {
        assert!(validate_nickname("nadador22").is_ok());
        assert!(validate_nickname("nada dor").is_err());
        assert!(validate_nickname("  ").is_ok());
        assert!(validate_hex_color("#3B82F6").is_ok());
        assert!(validate_hex_color("3B82F6").is_err());
        assert!(validate_hex_color("#3B82FZ").is_err());
    }

    #[test]
    fn test_country_code() {
        assert!(validate_country_code("CO").is_ok());
        assert!(validate_country_code("co").is_err());
        assert!(validate_country_code("COL").is_err());
    }
}
