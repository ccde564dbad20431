//! Password strength rules used by credential-change operations.

/// Minimum password length in characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Symbols that satisfy the "one symbol" requirement.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&#^_-";

/// Check password strength
///
/// Rules:
/// - At least 8 characters
/// - At least one lowercase letter, one uppercase letter and one digit
/// - At least one symbol from [`PASSWORD_SYMBOLS`]
pub fn is_strong_password(password: &str) -> bool {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return false;
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    has_lower && has_upper && has_digit && has_symbol
}
