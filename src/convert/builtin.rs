//! Built-in converters for primitive, text and temporal types

use std::path::PathBuf;
use std::str::FromStr;

use super::temporal;
use super::ConverterRegistry;
use crate::profile::TextComparison;

const TRUE_WORDS: &[&str] = &["true", "yes", "on", "1"];
const FALSE_WORDS: &[&str] = &["false", "no", "off", "0"];

fn from_str<T>(text: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    text.trim().parse::<T>().map_err(|e| e.to_string())
}

fn parse_bool(text: &str, comparison: TextComparison) -> Result<bool, String> {
    let text = text.trim();
    if TRUE_WORDS.iter().any(|w| comparison.equals(w, text)) {
        Ok(true)
    } else if FALSE_WORDS.iter().any(|w| comparison.equals(w, text)) {
        Ok(false)
    } else {
        Err("expected true/false, yes/no, on/off or 1/0".to_string())
    }
}

fn parse_char(text: &str) -> Result<char, String> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err("expected exactly one character".to_string()),
    }
}

macro_rules! register_from_str {
    ($registry:expr, $($t:ty),+ $(,)?) => {
        $( $registry.register_builtin::<$t, _>(from_str::<$t>); )+
    };
}

/// Install every built-in converter into `registry`
pub(crate) fn install(registry: &mut ConverterRegistry) {
    let comparison = registry.comparison();

    register_from_str!(
        registry, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
    );

    registry.register_builtin::<bool, _>(move |text: &str| parse_bool(text, comparison));
    registry.register_builtin::<char, _>(parse_char);
    registry.register_builtin::<String, _>(|text: &str| Ok(text.to_string()));
    registry.register_builtin::<PathBuf, _>(|text: &str| Ok(PathBuf::from(text)));

    registry.register_builtin::<chrono::NaiveDate, _>(temporal::parse_naive_date);
    registry.register_builtin::<chrono::NaiveTime, _>(temporal::parse_naive_time);
    registry.register_builtin::<chrono::NaiveDateTime, _>(temporal::parse_naive_datetime);
    registry.register_builtin::<chrono::DateTime<chrono::Utc>, _>(temporal::parse_datetime);
    registry.register_builtin::<chrono::DateTime<chrono::FixedOffset>, _>(
        temporal::parse_fixed_offset,
    );
    registry.register_builtin::<chrono::Duration, _>(temporal::parse_duration);
    registry.register_builtin::<std::time::Duration, _>(temporal::parse_std_duration);
}
