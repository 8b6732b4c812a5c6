//! Validators over converted option values
//!
//! A validator is any `Fn(&T) -> Result<(), String>`; the helpers here cover
//! the common checks.

use regex::Regex;
use std::fmt::Display;

/// Predicate over a converted value
pub trait Validator<T> {
    fn validate(&self, value: &T) -> Result<(), String>;
}

impl<T, F> Validator<T> for F
where
    F: Fn(&T) -> Result<(), String>,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        self(value)
    }
}

/// Value must lie within `min..=max`
pub fn in_range<T>(min: T, max: T) -> impl Fn(&T) -> Result<(), String>
where
    T: PartialOrd + Display,
{
    move |value: &T| {
        if *value < min || *value > max {
            Err(format!("{} is outside the range {}..={}", value, min, max))
        } else {
            Ok(())
        }
    }
}

/// Text must contain something other than whitespace
pub fn non_empty<T: AsRef<str>>() -> impl Fn(&T) -> Result<(), String> {
    |value: &T| {
        if value.as_ref().trim().is_empty() {
            Err("value cannot be empty".to_string())
        } else {
            Ok(())
        }
    }
}

/// Text must match a regular expression
pub fn matches<T: AsRef<str>>(
    pattern: &str,
) -> Result<impl Fn(&T) -> Result<(), String>, regex::Error> {
    let regex = Regex::new(pattern)?;
    Ok(move |value: &T| {
        if regex.is_match(value.as_ref()) {
            Ok(())
        } else {
            Err(format!("'{}' does not match {}", value.as_ref(), regex.as_str()))
        }
    })
}

/// Value must be one of `allowed`
pub fn one_of<T>(allowed: Vec<T>) -> impl Fn(&T) -> Result<(), String>
where
    T: PartialEq + Display,
{
    move |value: &T| {
        if allowed.contains(value) {
            Ok(())
        } else {
            let names: Vec<String> = allowed.iter().map(|a| a.to_string()).collect();
            Err(format!("'{}' is not one of: {}", value, names.join(", ")))
        }
    }
}

/// Apply an element check to every member of a list
pub fn each<E, V>(element: V) -> impl Fn(&Vec<E>) -> Result<(), String>
where
    V: Validator<E>,
{
    move |values: &Vec<E>| {
        for (index, value) in values.iter().enumerate() {
            element
                .validate(value)
                .map_err(|e| format!("element {}: {}", index, e))?;
        }
        Ok(())
    }
}
