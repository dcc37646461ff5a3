//! Brazilian document helpers (CPF / CNPJ) and contact field checks
//!
//! Validation matches the backend's checksum rules so forms can reject bad
//! input before a round trip. Formatting is display-only and never fails:
//! anything that is not a well-sized document comes back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const CPF_LEN: usize = 11;
const CNPJ_LEN: usize = 14;

const CNPJ_WEIGHTS_1: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const CNPJ_WEIGHTS_2: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Invalid CPF/CNPJ format")]
    InvalidDocument,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid phone format")]
    InvalidPhone,
}

/// Kind of taxpayer document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DocumentKind {
    /// Individual (11 digits)
    Cpf,
    /// Company (14 digits)
    Cnpj,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpf => f.write_str("CPF"),
            Self::Cnpj => f.write_str("CNPJ"),
        }
    }
}

/// Strip everything that is not an ASCII digit.
pub fn digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

fn digit_values(cleaned: &str) -> Vec<u32> {
    cleaned.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(values: &[u32]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Mod-11 check digit as used by both CPF and CNPJ.
fn check_digit(sum: u32) -> u32 {
    let digit = 11 - (sum % 11);
    if digit >= 10 { 0 } else { digit }
}

pub fn validate_cpf(cpf: &str) -> bool {
    let values = digit_values(&digits(cpf));
    if values.len() != CPF_LEN || all_same(&values) {
        return false;
    }

    let sum1: u32 = (0..9).map(|i| values[i] * (10 - i as u32)).sum();
    let sum2: u32 = (0..10).map(|i| values[i] * (11 - i as u32)).sum();

    values[9] == check_digit(sum1) && values[10] == check_digit(sum2)
}

pub fn validate_cnpj(cnpj: &str) -> bool {
    let values = digit_values(&digits(cnpj));
    if values.len() != CNPJ_LEN || all_same(&values) {
        return false;
    }

    let sum1: u32 = CNPJ_WEIGHTS_1.iter().zip(&values).map(|(w, v)| w * v).sum();
    let sum2: u32 = CNPJ_WEIGHTS_2.iter().zip(&values).map(|(w, v)| w * v).sum();

    values[12] == check_digit(sum1) && values[13] == check_digit(sum2)
}

/// Kind inferred from the digit count, if it is one of the two valid sizes.
pub fn document_kind(document: &str) -> Option<DocumentKind> {
    match digits(document).len() {
        CPF_LEN => Some(DocumentKind::Cpf),
        CNPJ_LEN => Some(DocumentKind::Cnpj),
        _ => None,
    }
}

pub fn validate_document(document: &str) -> bool {
    match document_kind(document) {
        Some(DocumentKind::Cpf) => validate_cpf(document),
        Some(DocumentKind::Cnpj) => validate_cnpj(document),
        None => false,
    }
}

/// Validate and return the digits-only form the backend stores.
pub fn normalize_document(document: &str) -> Result<String, DocumentError> {
    if validate_document(document) {
        Ok(digits(document))
    } else {
        Err(DocumentError::InvalidDocument)
    }
}

/// `000.000.000-00` for CPF, `00.000.000/0000-00` for CNPJ.
pub fn format_document(document: &str) -> String {
    let d = digits(document);
    match d.len() {
        CPF_LEN => format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]),
        CNPJ_LEN => format!(
            "{}.{}.{}/{}-{}",
            &d[..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..]
        ),
        _ => document.to_string(),
    }
}

/// Landline (10 digits) or mobile (11 digits), area code included.
pub fn validate_phone(phone: &str) -> bool {
    matches!(digits(phone).len(), 10 | 11)
}

pub fn format_phone(phone: &str) -> String {
    let d = digits(phone);
    match d.len() {
        10 => format!("({}) {}-{}", &d[..2], &d[2..6], &d[6..]),
        11 => format!("({}) {}-{}", &d[..2], &d[2..7], &d[7..]),
        _ => phone.to_string(),
    }
}

/// Same shape check as the backend: `local@domain.tld` with a 2+ letter TLD.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());

    local_ok && host_ok && tld_ok
}

/// Check the optional contact fields of a customer/supplier form.
pub fn validate_contact(email: Option<&str>, phone: Option<&str>) -> Result<(), DocumentError> {
    if let Some(email) = email.filter(|e| !e.is_empty()) {
        if !validate_email(email) {
            return Err(DocumentError::InvalidEmail);
        }
    }
    if let Some(phone) = phone.filter(|p| !p.is_empty()) {
        if !validate_phone(phone) {
            return Err(DocumentError::InvalidPhone);
        }
    }
    Ok(())
}
