// SPDX-FileCopyrightText: 2026 Trustline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Phone number normalization.
//!
//! All phone equality checks in the order store compare normalized values:
//! digits only, with the Jordan country code `962` folded into the local
//! leading-zero form. `"+962 79 123 4567"` and `"0791234567"` normalize to
//! the same string.

/// Returns only the decimal digits of `text`, in order.
pub fn extract_digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalizes a phone number for matching: strip non-digits, then replace a
/// leading `962` country code with a local leading `0`.
pub fn normalize_phone(phone: &str) -> String {
    let digits = extract_digits(phone);
    match digits.strip_prefix("962") {
        Some(rest) => format!("0{rest}"),
        None => digits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_formatting_characters() {
        assert_eq!(normalize_phone("079-123 4567"), "0791234567");
        assert_eq!(extract_digits("a1b2c3"), "123");
    }

    #[test]
    fn country_code_folds_to_local_form() {
        assert_eq!(normalize_phone("+962791234567"), "0791234567");
        assert_eq!(normalize_phone("962791234567"), "0791234567");
        assert_eq!(normalize_phone("0791234567"), "0791234567");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("   "), "");
    }

    #[test]
    fn non_jordan_prefix_is_untouched() {
        assert_eq!(normalize_phone("15551234567"), "15551234567");
    }
}
