//! Server-side validation of the three required contact fields.
//!
//! Each rule is checked independently so a visitor sees every problem at
//! once. The browser form mirrors these rules, but only this module is
//! authoritative.

use std::sync::LazyLock;

use regex::Regex;

pub const NAME_REQUIRED: &str = "Full name is required.";
pub const NAME_INVALID: &str = "Full name can only contain letters and spaces.";
pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Email format is invalid.";
pub const PHONE_REQUIRED: &str = "Phone number is required.";
pub const PHONE_INVALID: &str = "Phone number must be exactly 10 digits.";

const PHONE_DIGITS: usize = 10;
const EMAIL_MAX_LEN: usize = 254;
const LOCAL_PART_MAX_LEN: usize = 64;

// ASCII whitespace only; `\s` alone would admit e.g. U+3000.
static NAME_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^(?:[A-Za-z]|(?-u:\s))+$").expect("name pattern compiles"));

// Dot-atom local part, then two or more hostname labels.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$",
  )
  .expect("email pattern compiles")
});

/// Validate a submission's required fields.
///
/// Returns every applicable error message; an empty vector means the input
/// is valid.
pub fn validate(full_name: &str, email: &str, phone: &str) -> Vec<String> {
  let mut errors = Vec::new();

  if full_name.is_empty() {
    errors.push(NAME_REQUIRED.to_owned());
  } else if !is_valid_name(full_name) {
    errors.push(NAME_INVALID.to_owned());
  }

  if email.is_empty() {
    errors.push(EMAIL_REQUIRED.to_owned());
  } else if !is_valid_email(email) {
    errors.push(EMAIL_INVALID.to_owned());
  }

  if phone.is_empty() {
    errors.push(PHONE_REQUIRED.to_owned());
  } else if !is_valid_phone(phone) {
    errors.push(PHONE_INVALID.to_owned());
  }

  errors
}

/// Letters and whitespace only.
pub fn is_valid_name(name: &str) -> bool { NAME_RE.is_match(name) }

pub fn is_valid_email(email: &str) -> bool {
  if email.len() > EMAIL_MAX_LEN {
    return false;
  }
  match email.split_once('@') {
    Some((local, _)) if local.len() > LOCAL_PART_MAX_LEN => false,
    Some(_) => EMAIL_RE.is_match(email),
    None => false,
  }
}

/// Exactly ten ASCII digits with no separators.
///
/// Stripping non-digits must leave ten characters *and* the original must
/// already be all digits, so `555-123-4567` is rejected.
pub fn is_valid_phone(phone: &str) -> bool {
  let digits = phone.chars().filter(char::is_ascii_digit).count();
  digits == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_letters_and_spaces() {
    for name in ["Jane Doe", "a", "Mary Ann Smith", "Jane\tDoe", "ALLCAPS"] {
      assert!(is_valid_name(name), "{name:?} should be accepted");
    }
  }

  #[test]
  fn rejects_digits_and_punctuation_in_name() {
    for name in ["J4ne", "Jane-Doe", "O'Brien", "Jane.", "Jane_Doe", "Zoë", "Jane\u{3000}Doe", "Jane\u{a0}Doe"] {
      assert!(!is_valid_name(name), "{name:?} should be rejected");
    }
  }

  #[test]
  fn accepts_ten_plain_digits() {
    for phone in ["5551234567", "0000000000", "9876543210"] {
      assert!(is_valid_phone(phone), "{phone:?} should be accepted");
    }
  }

  #[test]
  fn rejects_wrong_length_and_separators() {
    for phone in [
      "123",
      "555123456",
      "55512345678",
      "555-123-4567",
      "555 123 4567",
      "(555)1234567",
      "+15551234567",
      "555123456a",
      "５５５１２３４５６７",
    ] {
      assert!(!is_valid_phone(phone), "{phone:?} should be rejected");
    }
  }

  #[test]
  fn email_shapes() {
    for ok in ["jane@example.com", "j.doe+tag@mail.example.co.uk", "a_b@x-y.io"] {
      assert!(is_valid_email(ok), "{ok:?} should be accepted");
    }
    for bad in [
      "bad",
      "jane@",
      "@example.com",
      "jane@localhost",
      "jane@@example.com",
      ".jane@example.com",
      "jane.@example.com",
      "ja..ne@example.com",
      "jane@-example.com",
      "jane doe@example.com",
    ] {
      assert!(!is_valid_email(bad), "{bad:?} should be rejected");
    }
  }

  #[test]
  fn valid_submission_has_no_errors() {
    assert!(validate("Jane Doe", "jane@example.com", "5551234567").is_empty());
  }

  #[test]
  fn every_field_reports_independently() {
    let errors = validate("J4ne", "bad", "123");
    assert_eq!(errors, vec![NAME_INVALID, EMAIL_INVALID, PHONE_INVALID]);
  }

  #[test]
  fn ideographic_space_in_name_is_rejected() {
    let errors = validate("Jane\u{3000}Doe", "jane@example.com", "5551234567");
    assert_eq!(errors, vec![NAME_INVALID]);
  }

  #[test]
  fn empty_fields_report_required() {
    let errors = validate("", "", "");
    assert_eq!(errors, vec![NAME_REQUIRED, EMAIL_REQUIRED, PHONE_REQUIRED]);
  }

  #[test]
  fn overlong_local_part_is_rejected() {
    let email = format!("{}@example.com", "a".repeat(65));
    assert!(!is_valid_email(&email));
  }
}
