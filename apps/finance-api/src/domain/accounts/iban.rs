//! IBAN normalization and ISO 7064 mod-97 validation.

use super::errors::AccountError;

/// Strip whitespace, uppercase, and verify the check digits.
///
/// Returns `None` for an empty input, which clears the IBAN.
///
/// # Errors
///
/// Returns a validation error on the `iban` field when the value is not a
/// well-formed IBAN.
pub fn normalize_iban(raw: &str) -> Result<Option<String>, AccountError> {
    let iban: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if iban.is_empty() {
        return Ok(None);
    }
    if is_valid_iban(&iban) {
        Ok(Some(iban))
    } else {
        Err(AccountError::validation(
            "iban",
            format!("'{raw}' is not a valid IBAN"),
        ))
    }
}

/// Check an already normalized IBAN.
#[must_use]
pub fn is_valid_iban(iban: &str) -> bool {
    let bytes = iban.as_bytes();
    if !(15..=34).contains(&bytes.len())
        || !bytes[..2].iter().all(u8::is_ascii_uppercase)
        || !bytes[2..4].iter().all(u8::is_ascii_digit)
        || !bytes.iter().all(u8::is_ascii_alphanumeric)
    {
        return false;
    }
    // Country code and check digits move to the end; letters become 10..=35.
    let rearranged = bytes[4..].iter().chain(&bytes[..4]);
    let mut remainder: u32 = 0;
    for &b in rearranged {
        let value = if b.is_ascii_digit() {
            u32::from(b - b'0')
        } else {
            u32::from(b - b'A') + 10
        };
        remainder = if value >= 10 {
            (remainder * 100 + value) % 97
        } else {
            (remainder * 10 + value) % 97
        };
    }
    remainder == 1
}
