use heapless::String as HeaplessString;
use std::str::FromStr;

use crate::error::ApiError;

/// Copies `value` into a fixed-capacity string, rejecting values over `N` bytes.
pub fn bounded<const N: usize>(field: &str, value: &str) -> Result<HeaplessString<N>, ApiError> {
    HeaplessString::from_str(value).map_err(|_| {
        ApiError::validation(format!("Field '{field}' is too long (max {N} bytes)"))
    })
}

pub fn bounded_opt<const N: usize>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<HeaplessString<N>>, ApiError> {
    value.map(|v| bounded(field, v)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_rejects_overflow() {
        let ok: HeaplessString<4> = bounded("code", "abcd").unwrap();
        assert_eq!(ok.as_str(), "abcd");
        assert!(bounded::<4>("code", "abcde").is_err());
        // Capacity counts bytes, not characters.
        assert!(bounded::<4>("code", "ñañ").is_err());
    }

    #[test]
    fn test_bounded_opt() {
        assert_eq!(bounded_opt::<8>("x", None).unwrap(), None);
        assert_eq!(bounded_opt::<8>("x", Some("hi")).unwrap().unwrap().as_str(), "hi");
    }
}
