use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // First run of digits with at most one decimal point
    static ref LEADING_NUMBER: Regex = Regex::new(r"\d+(?:\.\d*)?|\.\d+").unwrap();
}

/// Pull the first number out of a Lighthouse display value such as `"3.4 s"`.
///
/// Thousands separators are not understood: `"1,230 ms"` yields `1.0`.
/// Returns `None` when the string holds no digits at all.
pub fn extract_number(display: &str) -> Option<f64> {
    LEADING_NUMBER
        .find(display)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_seconds() {
        assert_eq!(extract_number("3.4 s"), Some(3.4));
    }

    #[test]
    fn test_extract_zero_millis() {
        assert_eq!(extract_number("0 ms"), Some(0.0));
    }

    #[test]
    fn test_extract_empty_is_none() {
        assert_eq!(extract_number(""), None);
        assert_eq!(extract_number("n/a"), None);
    }

    #[test]
    fn test_extract_embedded_number() {
        assert_eq!(extract_number("Root document took 120 ms"), Some(120.0));
        assert_eq!(extract_number("0.052"), Some(0.052));
    }

    #[test]
    fn test_extract_single_decimal_point() {
        assert_eq!(extract_number("1.2.3"), Some(1.2));
        assert_eq!(extract_number("12. s"), Some(12.0));
    }
}
