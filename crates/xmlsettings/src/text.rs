//! Scalar text conversion
//!
//! Parsing is lenient: leading whitespace is skipped, the longest numeric
//! prefix is used and anything unparsable reads as the zero value.

/// Scalar kinds stored as a single text slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    UInt,
    Float,
    Double,
    Bool,
    String,
}

/// A value that converts to and from attribute or element text
pub trait TextValue: Clone + Default {
    const KIND: ScalarKind;

    fn parse_text(text: &str) -> Self;

    fn to_text(&self) -> String;
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl TextValue for $ty {
            const KIND: ScalarKind = ScalarKind::Int;

            fn parse_text(text: &str) -> Self {
                let (negative, magnitude) = parse_integer(text);
                let value = if negative {
                    0i128.saturating_sub(i128::from(magnitude))
                } else {
                    i128::from(magnitude)
                };
                Self::try_from(value).unwrap_or(if negative { Self::MIN } else { Self::MAX })
            }

            fn to_text(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl TextValue for $ty {
            const KIND: ScalarKind = ScalarKind::UInt;

            fn parse_text(text: &str) -> Self {
                match parse_integer(text) {
                    (true, _) => 0,
                    (false, magnitude) => Self::try_from(magnitude).unwrap_or(Self::MAX),
                }
            }

            fn to_text(&self) -> String {
                self.to_string()
            }
        }
    )*};
}

impl_signed!(i32, i64);
impl_unsigned!(u32, u64);

impl TextValue for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn parse_text(text: &str) -> Self {
        parse_float_prefix(text).unwrap_or_default()
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl TextValue for f64 {
    const KIND: ScalarKind = ScalarKind::Double;

    fn parse_text(text: &str) -> Self {
        parse_float_prefix(text).unwrap_or_default()
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl TextValue for bool {
    const KIND: ScalarKind = ScalarKind::Bool;

    /// `1`, `t`, `T`, `y` and `Y` as the first character mean true
    fn parse_text(text: &str) -> Self {
        matches!(
            text.trim_start().as_bytes().first(),
            Some(b'1' | b't' | b'T' | b'y' | b'Y')
        )
    }

    fn to_text(&self) -> String {
        self.to_string()
    }
}

impl TextValue for String {
    const KIND: ScalarKind = ScalarKind::String;

    fn parse_text(text: &str) -> Self {
        text.to_string()
    }

    fn to_text(&self) -> String {
        self.clone()
    }
}

/// Sign and saturated magnitude of the leading integer in `text`
///
/// Accepts an optional sign followed by decimal digits or a `0x` hex prefix.
fn parse_integer(text: &str) -> (bool, u64) {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, text.get(1..).unwrap_or_default()),
        Some(b'+') => (false, text.get(1..).unwrap_or_default()),
        _ => (false, text),
    };

    let (radix, digits) = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, digits),
    };

    let magnitude = digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0u64, |acc, d| {
            acc.saturating_mul(u64::from(radix))
                .saturating_add(u64::from(d))
        });
    (negative, magnitude)
}

fn parse_float_prefix<T: std::str::FromStr>(text: &str) -> Option<T> {
    let text = text.trim();
    if let Ok(value) = text.parse::<T>() {
        return Some(value);
    }

    let candidate_len = text
        .char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | '+' | '-' | '.' | 'e' | 'E'))
        .map_or(text.len(), |(i, _)| i);
    (1..=candidate_len)
        .rev()
        .find_map(|len| text.get(..len).and_then(|prefix| prefix.parse::<T>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_parsing() {
        assert_eq!(i32::parse_text("42"), 42);
        assert_eq!(i32::parse_text("  -17"), -17);
        assert_eq!(i32::parse_text("+8"), 8);
        assert_eq!(i32::parse_text("12abc"), 12);
        assert_eq!(i32::parse_text("0x1F"), 31);
        assert_eq!(i32::parse_text("abc"), 0);
        assert_eq!(i32::parse_text(""), 0);
        assert_eq!(i32::parse_text("99999999999"), i32::MAX);
        assert_eq!(i32::parse_text("-99999999999"), i32::MIN);
        assert_eq!(i64::parse_text("-9000000000"), -9_000_000_000);
    }

    #[test]
    fn test_uint_parsing() {
        assert_eq!(u32::parse_text("7"), 7);
        assert_eq!(u32::parse_text("-7"), 0);
        assert_eq!(u32::parse_text("5000000000"), u32::MAX);
        assert_eq!(u64::parse_text("5000000000"), 5_000_000_000);
    }

    #[test]
    fn test_float_parsing() {
        assert_eq!(f64::parse_text("2.5"), 2.5);
        assert_eq!(f64::parse_text(" 1e3 "), 1000.0);
        assert_eq!(f64::parse_text("3.25px"), 3.25);
        assert_eq!(f64::parse_text("1.5e"), 1.5);
        assert_eq!(f32::parse_text("nope"), 0.0);
        assert!(f64::parse_text("inf").is_infinite());
    }

    #[test]
    fn test_bool_parsing() {
        for text in ["1", "true", "True", "yes", "Y", " t"] {
            assert!(bool::parse_text(text), "{text}");
        }
        for text in ["0", "false", "no", "", "x"] {
            assert!(!bool::parse_text(text), "{text}");
        }
    }

    #[test]
    fn test_formatting() {
        assert_eq!(1.0f32.to_text(), "1");
        assert_eq!(0.5f64.to_text(), "0.5");
        assert_eq!((-3i32).to_text(), "-3");
        assert_eq!(true.to_text(), "true");
        assert_eq!("a b".to_string().to_text(), "a b");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(<i32 as TextValue>::KIND, ScalarKind::Int);
        assert_eq!(<f32 as TextValue>::KIND, ScalarKind::Float);
        assert_eq!(<f64 as TextValue>::KIND, ScalarKind::Double);
        assert_eq!(<String as TextValue>::KIND, ScalarKind::String);
    }
}
