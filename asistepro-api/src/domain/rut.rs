use heapless::String as HeaplessString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

use crate::error::ApiError;

/// Longest canonical RUT: `99999999-K`.
pub const RUT_MAX_LEN: usize = 12;

/// # Documentation
/// Chilean national identifier (RUT): numeric body plus a modulo-11 check digit.
///
/// Accepted input forms: `12345678-5`, `12.345.678-5`, lowercase `k` for the check digit.
/// The canonical form is the body without separators, a dash and the uppercase check digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rut {
    body: u32,
    check_digit: char,
}

impl Rut {
    pub fn new(body: u32) -> Result<Self, ApiError> {
        if body == 0 || body > 99_999_999 {
            return Err(ApiError::validation(format!("RUT body out of range: {body}")));
        }
        Ok(Self {
            body,
            check_digit: Self::compute_check_digit(body),
        })
    }

    pub fn parse(input: &str) -> Result<Self, ApiError> {
        let cleaned: String = input
            .trim()
            .chars()
            .filter(|c| *c != '.')
            .collect::<String>()
            .to_uppercase();

        let (body, dv) = cleaned
            .split_once('-')
            .ok_or_else(|| ApiError::validation(format!("RUT '{input}' must have the form 12345678-9")))?;

        if body.is_empty() || body.len() > 8 || !body.chars().all(|c| c.is_ascii_digit()) {
            return Err(ApiError::validation(format!("RUT '{input}' has an invalid body")));
        }

        let mut dv_chars = dv.chars();
        let check_digit = match (dv_chars.next(), dv_chars.next()) {
            (Some(c), None) if c.is_ascii_digit() || c == 'K' => c,
            _ => {
                return Err(ApiError::validation(format!(
                    "RUT '{input}' has an invalid check digit"
                )))
            }
        };

        let body: u32 = body
            .parse()
            .map_err(|_| ApiError::validation(format!("RUT '{input}' has an invalid body")))?;
        let rut = Self::new(body)?;

        if rut.check_digit != check_digit {
            return Err(ApiError::validation(format!(
                "RUT '{input}' check digit does not match"
            )));
        }
        Ok(rut)
    }

    pub fn body(&self) -> u32 {
        self.body
    }

    pub fn check_digit(&self) -> char {
        self.check_digit
    }

    pub fn compute_check_digit(body: u32) -> char {
        let mut remaining = body;
        let mut factor = 2;
        let mut sum = 0;
        while remaining > 0 {
            sum += (remaining % 10) * factor;
            remaining /= 10;
            factor = if factor == 7 { 2 } else { factor + 1 };
        }
        match 11 - (sum % 11) {
            11 => '0',
            10 => 'K',
            d => char::from_digit(d, 10).unwrap_or('0'),
        }
    }

    pub fn to_heapless(&self) -> HeaplessString<RUT_MAX_LEN> {
        let mut out = HeaplessString::new();
        // Canonical form never exceeds RUT_MAX_LEN.
        let _ = out.push_str(&self.to_string());
        out
    }
}

impl std::fmt::Display for Rut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.body, self.check_digit)
    }
}

impl FromStr for Rut {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rut::parse(s)
    }
}

impl Serialize for Rut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Rut::parse(&value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_check_digit() {
        assert_eq!(Rut::compute_check_digit(12_345_678), '5');
        assert_eq!(Rut::compute_check_digit(11_111_111), '1');
        assert_eq!(Rut::compute_check_digit(6), 'K');
        assert_eq!(Rut::compute_check_digit(14), '0');
    }

    #[test]
    fn test_parse_accepts_common_forms() {
        let plain = Rut::parse("12345678-5").unwrap();
        let dotted = Rut::parse(" 12.345.678-5 ").unwrap();
        assert_eq!(plain, dotted);
        assert_eq!(plain.to_string(), "12345678-5");

        let with_k = Rut::parse("6-k").unwrap();
        assert_eq!(with_k.check_digit(), 'K');
        assert_eq!(with_k.to_string(), "6-K");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["", "12345678", "12345678-", "12345678-55", "abc-5", "123456789-0", "0-0", "12345678-4"] {
            assert!(Rut::parse(input).is_err(), "{input} should be rejected");
        }
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let rut = Rut::parse("12.345.678-5").unwrap();
        let json = serde_json::to_string(&rut).unwrap();
        assert_eq!(json, "\"12345678-5\"");
        let back: Rut = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rut);
        assert_eq!(rut.to_heapless().as_str(), "12345678-5");
    }
}
