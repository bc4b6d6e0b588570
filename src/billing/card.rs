// ABOUTME: Payment card helpers for the checkout form (type detection, formatting, validation)
// ABOUTME: Every check strips non-digit characters before looking at the input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PlateIt Contributors

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length of a formatted non-amex card number ("1234 5678 9012 3456")
const MAX_FORMATTED_LEN: usize = 19;
/// Amex digit groups
const AMEX_GROUPS: [usize; 3] = [4, 6, 5];
/// Luhn check refuses anything shorter
const MIN_CARD_DIGITS: usize = 13;

/// Card network inferred from the number prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Starts with 4
    Visa,
    /// Starts with 51-55
    Mastercard,
    /// Starts with 34 or 37
    Amex,
    /// Starts with 6011 or 65
    Discover,
    /// Anything else
    Unknown,
}

impl CardType {
    /// Detect the network from a (possibly formatted) card number
    #[must_use]
    pub fn detect(number: &str) -> Self {
        let digits = digits_only(number);
        let bytes = digits.as_bytes();
        match bytes {
            [b'4', ..] => Self::Visa,
            [b'5', b'1'..=b'5', ..] => Self::Mastercard,
            [b'3', b'4' | b'7', ..] => Self::Amex,
            [b'6', b'0', b'1', b'1', ..] | [b'6', b'5', ..] => Self::Discover,
            _ => Self::Unknown,
        }
    }

    /// Digits expected in the security code
    #[must_use]
    pub const fn cvc_len(self) -> usize {
        match self {
            Self::Amex => 4,
            _ => 3,
        }
    }

    /// Lowercase network name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Discover => "discover",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}

/// Format a card number for display
///
/// Amex numbers are grouped 4-6-5 with any extra digits kept after the last
/// group; everything else in groups of four, truncated to 19 characters.
#[must_use]
pub fn format_card_number(value: &str) -> String {
    let digits = digits_only(value);

    if CardType::detect(&digits) == CardType::Amex {
        let mut groups = Vec::with_capacity(AMEX_GROUPS.len());
        let mut rest = digits.as_str();
        for size in AMEX_GROUPS {
            if rest.is_empty() {
                break;
            }
            let (head, tail) = rest.split_at(size.min(rest.len()));
            groups.push(head);
            rest = tail;
        }
        let mut formatted = groups.join(" ");
        formatted.push_str(rest);
        return formatted;
    }

    let grouped = digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    grouped.chars().take(MAX_FORMATTED_LEN).collect()
}

/// Format expiry input as `MM/YY` once at least two digits are present
#[must_use]
pub fn format_expiry(value: &str) -> String {
    let digits = digits_only(value);
    if digits.len() < 2 {
        return digits;
    }
    let (month, rest) = digits.split_at(2);
    let year: String = rest.chars().take(2).collect();
    format!("{month}/{year}")
}

/// Luhn checksum over the digits of `number`
///
/// Numbers with fewer than 13 digits never pass.
#[must_use]
pub fn validate_luhn(number: &str) -> bool {
    let digits = digits_only(number);
    if digits.len() < MIN_CARD_DIGITS {
        return false;
    }

    let sum: u32 = digits
        .bytes()
        .rev()
        .map(|b| u32::from(b - b'0'))
        .enumerate()
        .map(|(i, digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// Validate an `MM/YY` expiry against `today`
///
/// The card is valid through the end of its expiry month. Two-digit years
/// are read as `20YY`.
#[must_use]
pub fn validate_expiry(expiry: &str, today: NaiveDate) -> bool {
    let Some((month, year)) = expiry.split_once('/') else {
        return false;
    };
    let (Ok(month), Ok(year)) = (month.trim().parse::<u32>(), year.trim().parse::<i32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) || !(0..100).contains(&year) {
        return false;
    }

    let year = 2000 + year;
    (year, month) >= (today.year(), today.month())
}

/// Security code has the right number of digits for the network
#[must_use]
pub fn validate_cvc(cvc: &str, card_type: CardType) -> bool {
    digits_only(cvc).len() == card_type.cvc_len()
}

/// Checkout form fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Card number, any formatting
    pub number: String,
    /// Expiry as typed
    pub expiry: String,
    /// Security code
    pub cvc: String,
}

/// Outcome of checking every field of the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardValidation {
    /// Detected network
    pub card_type: CardType,
    /// Number formatted for display
    pub formatted_number: String,
    /// Expiry formatted for display
    pub formatted_expiry: String,
    /// Luhn check passed
    pub number_valid: bool,
    /// Expiry is well formed and not in the past
    pub expiry_valid: bool,
    /// CVC length matches the network
    pub cvc_valid: bool,
    /// All of the above
    pub valid: bool,
}

/// Run every check on a checkout form
#[must_use]
pub fn validate_card(details: &CardDetails, today: NaiveDate) -> CardValidation {
    let card_type = CardType::detect(&details.number);
    let formatted_expiry = format_expiry(&details.expiry);
    let number_valid = validate_luhn(&details.number);
    let expiry_valid = validate_expiry(&formatted_expiry, today);
    let cvc_valid = validate_cvc(&details.cvc, card_type);

    CardValidation {
        card_type,
        formatted_number: format_card_number(&details.number),
        formatted_expiry,
        number_valid,
        expiry_valid,
        cvc_valid,
        valid: number_valid && expiry_valid && cvc_valid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 15).unwrap()
    }

    #[test]
    fn test_detect_card_type() {
        assert_eq!(CardType::detect("4242 4242 4242 4242"), CardType::Visa);
        assert_eq!(CardType::detect("5500000000000004"), CardType::Mastercard);
        assert_eq!(CardType::detect("5600000000000000"), CardType::Unknown);
        assert_eq!(CardType::detect("378282246310005"), CardType::Amex);
        assert_eq!(CardType::detect("6011111111111117"), CardType::Discover);
        assert_eq!(CardType::detect("6500000000000002"), CardType::Discover);
        assert_eq!(CardType::detect(""), CardType::Unknown);
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("4242-4242-42"), "4242 4242 42");
        assert_eq!(format_card_number("42424242424242424242"), "4242 4242 4242 4242");
        assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
        assert_eq!(format_card_number("37828"), "3782 8");
        assert_eq!(
            format_card_number("378282246310005999"),
            "3782 822463 10005999"
        );
    }

    #[test]
    fn test_format_expiry() {
        assert_eq!(format_expiry("1"), "1");
        assert_eq!(format_expiry("12"), "12/");
        assert_eq!(format_expiry("1228"), "12/28");
        assert_eq!(format_expiry("12/2899"), "12/28");
    }

    #[test]
    fn test_luhn() {
        assert!(validate_luhn("4242 4242 4242 4242"));
        assert!(validate_luhn("378282246310005"));
        assert!(!validate_luhn("4242 4242 4242 4241"));
        assert!(!validate_luhn("424242424242"));
    }

    #[test]
    fn test_expiry_validation() {
        let today = date(2026, 10);
        assert!(validate_expiry("10/26", today));
        assert!(validate_expiry("01/27", today));
        assert!(!validate_expiry("09/26", today));
        assert!(!validate_expiry("13/27", today));
        assert!(!validate_expiry("00/27", today));
        assert!(!validate_expiry("1027", today));
        assert!(!validate_expiry("ab/27", today));
    }

    #[test]
    fn test_cvc_length_depends_on_network() {
        assert!(validate_cvc("123", CardType::Visa));
        assert!(!validate_cvc("1234", CardType::Visa));
        assert!(validate_cvc("1234", CardType::Amex));
        assert!(!validate_cvc("123", CardType::Amex));
    }

    #[test]
    fn test_validate_card_aggregates_checks() {
        let details = CardDetails {
            number: "4242424242424242".to_owned(),
            expiry: "1230".to_owned(),
            cvc: "123".to_owned(),
        };
        let result = validate_card(&details, date(2026, 10));
        assert!(result.valid);
        assert_eq!(result.formatted_expiry, "12/30");

        let bad = CardDetails {
            cvc: "12".to_owned(),
            ..details
        };
        let result = validate_card(&bad, date(2026, 10));
        assert!(!result.valid);
        assert!(result.number_valid);
        assert!(!result.cvc_valid);
    }
}
