//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Product identifiers: an IMEI or a generated/printed serial
pub static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9\-_]{2,63}$").expect("valid identifier regex"));

/// Vietnamese phone numbers, local (0xxxxxxxxx) or international (+84xxxxxxxxx)
pub static VN_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+84|0)[0-9]{9,10}$").expect("valid phone regex"));

/// Trim and uppercase a product identifier
pub fn normalize_identifier(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Check an already-normalized product identifier
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER_REGEX.is_match(value)
}

/// Strip spaces, dots and dashes that staff commonly type into phone numbers
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-'))
        .collect()
}

pub fn is_valid_phone(value: &str) -> bool {
    VN_PHONE_REGEX.is_match(&normalize_phone(value))
}

/// Luhn checksum used by 15-digit IMEIs
pub fn imei_checksum_ok(imei: &str) -> bool {
    if imei.len() != 15 || !imei.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let sum: u32 = imei
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rules() {
        assert!(is_valid_identifier("356938035643809"));
        assert!(is_valid_identifier("LO20240301-001"));
        assert!(!is_valid_identifier("ab"));
        assert!(!is_valid_identifier("-LEADING"));
        assert_eq!(normalize_identifier("  lo-1a "), "LO-1A");
    }

    #[test]
    fn test_phone_rules() {
        assert!(is_valid_phone("0912 345 678"));
        assert!(is_valid_phone("+84912345678"));
        assert!(!is_valid_phone("12345"));
    }

    #[test]
    fn test_imei_checksum() {
        assert!(imei_checksum_ok("490154203237518"));
        assert!(!imei_checksum_ok("490154203237517"));
        assert!(!imei_checksum_ok("49015420323751"));
    }
}
