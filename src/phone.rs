//! Phone number normalization to `+<country>-<3>-<3>-<4>[x<ext>]`.

use regex::Regex;
use std::sync::OnceLock;

const DEFAULT_COUNTRY_CODE: &str = "1";

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\D").expect("static pattern"))
}

fn digits_only(s: &str) -> String {
    non_digits().replace_all(s, "").into_owned()
}

fn group(digits: &str, from: usize, to: usize) -> &str {
    let end = to.min(digits.len());
    let start = from.min(end);
    &digits[start..end]
}

/// Normalize a free-form phone number.
///
/// The country code is the run of digits right after a `+` (default `1`), the
/// extension is whatever follows the first `x`. The remaining digits are cut
/// into 3/3/4 groups; short or long inputs are sliced as-is, never rejected.
pub fn normalize_phone(raw: &str) -> String {
    let (country, rest) = match raw.split_once('+') {
        Some((_, after_plus)) => {
            let trimmed = after_plus.trim_start();
            let code_len = trimmed.bytes().take_while(u8::is_ascii_digit).count();
            if code_len == 0 {
                (DEFAULT_COUNTRY_CODE.to_string(), trimmed)
            } else {
                (trimmed[..code_len].to_string(), &trimmed[code_len..])
            }
        }
        None => (DEFAULT_COUNTRY_CODE.to_string(), raw),
    };

    let (main, extension) = match rest.split_once('x') {
        Some((main, ext)) => {
            let ext = ext.split('x').next().unwrap_or("");
            (main, digits_only(ext))
        }
        None => (rest, String::new()),
    };

    let digits = digits_only(main);
    let mut out = format!(
        "+{}-{}-{}-{}",
        country,
        group(&digits, 0, 3),
        group(&digits, 3, 6),
        group(&digits, 6, 10)
    );
    if !extension.is_empty() {
        out.push('x');
        out.push_str(&extension);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_international_number() {
        assert_eq!(normalize_phone("+44 7911 123456"), "+44-791-112-3456");
    }

    #[test]
    fn defaults_country_code_to_one() {
        assert_eq!(normalize_phone("(555) 123-4567"), "+1-555-123-4567");
        assert_eq!(normalize_phone("555.123.4567"), "+1-555-123-4567");
    }

    #[test]
    fn keeps_extension() {
        assert_eq!(normalize_phone("+1-(932)644-4237x7731"), "+1-932-644-4237x7731");
        assert_eq!(normalize_phone("932.644.4237 x 12"), "+1-932-644-4237x12");
    }

    #[test]
    fn idempotent_on_canonical_output() {
        for raw in [
            "+44 7911 123456",
            "(555) 123-4567",
            "+1-(932)644-4237x7731",
            "+86 10 6552 9988",
            "12345",
        ] {
            let once = normalize_phone(raw);
            assert_eq!(normalize_phone(&once), once, "input {raw}");
        }
    }

    #[test]
    fn tolerates_short_and_long_numbers() {
        assert_eq!(normalize_phone("12345"), "+1-123-45-");
        assert_eq!(normalize_phone("555 123 4567 890"), "+1-555-123-4567");
        assert_eq!(normalize_phone(""), "+1---");
    }

    #[test]
    fn country_code_may_follow_whitespace() {
        assert_eq!(normalize_phone("+ 555 123 4567"), "+555-123-456-7");
    }

    #[test]
    fn plus_without_digits_falls_back_to_default_code() {
        assert_eq!(normalize_phone("+-555"), "+1-555--");
        assert_eq!(normalize_phone("+(555) 123-4567"), "+1-555-123-4567");
    }
}
