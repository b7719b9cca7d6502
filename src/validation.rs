//! Form validation and sanitization
//!
//! Checks are declared on the form structs with `#[derive(Validate)]`.
//! [`validate_form`] wraps them with the sanitizers: fields are trimmed
//! before the checks run and HTML-escaped afterwards, so a form that fails
//! still carries its cleaned values back to the page. Failed checks are
//! reported as [`FieldError`]s in form field order.

use chrono::NaiveDate;
use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors};

const DEFAULT_MESSAGE: &str = "Invalid value";

/// Longest accepted author name part
pub const NAME_MAX_CHARS: usize = 100;

/// A failed check, scoped to the form field it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub msg: String,
    pub param: String,
    pub value: String,
    pub location: &'static str,
}

/// A submitted form with declared checks and sanitizers
pub trait FormInput: Validate {
    /// Field names in the order they appear on the form
    const FIELDS: &'static [&'static str];
    /// Fields trimmed before the checks run
    const TRIMMED: &'static [&'static str];
    /// Fields HTML-escaped after the checks ran
    const ESCAPED: &'static [&'static str];

    fn field_mut(&mut self, name: &str) -> Option<&mut String>;
}

/// Sanitized form and collected errors of one submission
#[derive(Debug, Clone)]
pub struct Validated<F> {
    form: F,
    errors: Vec<FieldError>,
}

impl<F> Validated<F> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The sanitized values
    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn into_form(self) -> F {
        self.form
    }
}

pub fn validate_form<F: FormInput>(mut form: F) -> Validated<F> {
    for name in F::TRIMMED {
        if let Some(value) = form.field_mut(name) {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
    }

    let errors = match form.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => field_errors(&mut form, &errors),
    };

    for name in F::ESCAPED {
        if let Some(value) = form.field_mut(name) {
            *value = escape_html(value);
        }
    }

    Validated { form, errors }
}

fn field_errors<F: FormInput>(form: &mut F, errors: &ValidationErrors) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();

    for name in F::FIELDS {
        let Some(failed) = by_field.get(*name) else {
            continue;
        };
        let value = form.field_mut(name).map(|v| v.clone()).unwrap_or_default();
        out.extend(failed.iter().map(|error| FieldError {
            msg: error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
            param: name.to_string(),
            value: value.clone(),
            location: "body",
        }));
    }
    out
}

/// ASCII letters and digits only; empty values fail.
pub fn alphanumeric(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric"))
    }
}

pub fn name_length(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() <= NAME_MAX_CHARS {
        Ok(())
    } else {
        Err(ValidationError::new("length"))
    }
}

/// Empty, or an ISO-8601 date / date-time.
pub fn optional_iso8601_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_iso8601_date(value).is_some() {
        Ok(())
    } else {
        Err(ValidationError::new("iso8601"))
    }
}

/// Calendar date of an optional ISO-8601 field, `None` when empty or invalid.
pub fn optional_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    parse_iso8601_date(value)
}

/// Replace characters with special meaning in HTML by their entities.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

fn digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Two-digit field no greater than `max`
fn two_digits(s: &str, max: u32) -> Option<u32> {
    if !digits(s, 2) {
        return None;
    }
    s.parse().ok().filter(|v| *v <= max)
}

/// Calendar date of an ISO-8601 string.
///
/// Shape: `YYYY[-MM[-DD[(T| )HH[:MM[:SS[(.|,)f+]]][Z|±HH[:MM]]]]]`.
/// The date is taken as written, the zone does not shift it.
pub fn parse_iso8601_date(input: &str) -> Option<NaiveDate> {
    let (date, time) = match input.find(|c| c == 'T' || c == ' ') {
        Some(i) => (&input[..i], Some(&input[i + 1..])),
        None => (input, None),
    };

    let parts: Vec<&str> = date.split('-').collect();
    let (year, month, day) = match parts.as_slice() {
        [y] if digits(y, 4) => (*y, None, None),
        [y, m] if digits(y, 4) => (*y, Some(*m), None),
        [y, m, d] if digits(y, 4) => (*y, Some(*m), Some(*d)),
        _ => return None,
    };
    let month = match month {
        Some(m) => two_digits(m, 12)?,
        None => 1,
    };
    let day = match day {
        Some(d) => two_digits(d, 31)?,
        None => 1,
    };
    if time.is_some() && parts.len() != 3 {
        return None;
    }
    if let Some(time) = time {
        check_time(time)?;
    }

    NaiveDate::from_ymd_opt(year.parse().ok()?, month, day)
}

/// `HH[:MM[:SS[(.|,)f+]]]` followed by an optional zone.
fn check_time(time: &str) -> Option<()> {
    let clock = if let Some(clock) = time.strip_suffix(['Z', 'z']) {
        clock
    } else if let Some(i) = time.rfind(['+', '-']) {
        check_offset(&time[i + 1..])?;
        &time[..i]
    } else {
        time
    };

    let (clock, fraction) = match clock.split_once(['.', ',']) {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (clock, None),
    };
    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }

    let fields: Vec<&str> = clock.split(':').collect();
    match fields.as_slice() {
        [h] if fraction.is_none() => {
            two_digits(h, 23)?;
        }
        [h, m] if fraction.is_none() => {
            two_digits(h, 23)?;
            two_digits(m, 59)?;
        }
        [h, m, s] => {
            two_digits(h, 23)?;
            two_digits(m, 59)?;
            two_digits(s, 59)?;
        }
        _ => return None,
    }
    Some(())
}

/// `HH` or `HH:MM`
fn check_offset(offset: &str) -> Option<()> {
    match offset.split_once(':') {
        Some((h, m)) => {
            two_digits(h, 23)?;
            two_digits(m, 59)?;
        }
        None => {
            two_digits(offset, 23)?;
        }
    }
    Some(())
}
