use indexmap::IndexMap;
use rust_decimal::Decimal;
use rustc_hash::FxBuildHasher;
use std::fmt::Display;
use validator::ValidateEmail as _;

/// The flattened key/value pairs of a submitted form.
///
/// Both url-encoded and multipart bodies are reduced to this shape before
/// validation. A repeated key keeps its last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData(IndexMap<String, String, FxBuildHasher>);

impl FormData {
    /// Set the value of a field, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// The raw value of a field, if it was submitted.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The trimmed value of a field, treating blank values as absent.
    pub fn non_empty(&self, key: &str) -> Option<&str> {
        non_blank(self.get(key))
    }

    /// Whether a field was submitted at all.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Trim a submitted value; a blank value counts as not submitted.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Validation messages keyed by the offending field, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct FieldErrors(
    #[cfg_attr(
        feature = "schemars",
        schemars(with = "std::collections::BTreeMap<String, Vec<String>>")
    )]
    IndexMap<String, Vec<String>, FxBuildHasher>,
);

impl FieldErrors {
    /// Record a message against a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// The messages recorded against a field.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// True if no field failed validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const BLANK: &str = "This field may not be blank.";
pub(crate) const NOT_INTEGER: &str = "A valid integer is required.";
pub(crate) const NOT_NUMBER: &str = "A valid number is required.";
pub(crate) const NEGATIVE: &str = "Ensure this value is greater than or equal to 0.";
pub(crate) const NOT_EMAIL: &str = "Enter a valid email address.";
pub(crate) const NOT_BOOLEAN: &str = "Must be a valid boolean.";

/// The largest value a positive integer column accepts.
pub(crate) const MAX_COUNT: u32 = i32::MAX as u32;

/// Reads typed values out of a [`FormData`], collecting every failure.
///
/// In partial mode, absent fields are skipped instead of reported, which is
/// how updates only touch the fields a client supplied.
pub(crate) struct Fields<'a> {
    form: &'a FormData,
    partial: bool,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    pub fn new(form: &'a FormData) -> Self {
        Self {
            form,
            partial: false,
            errors: FieldErrors::default(),
        }
    }

    pub fn partial(form: &'a FormData) -> Self {
        Self {
            form,
            partial: true,
            errors: FieldErrors::default(),
        }
    }

    pub fn error(&mut self, key: &str, message: impl Into<String>) {
        self.errors.push(key, message);
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    pub fn finish(self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }

    /// The trimmed, non-blank value of a field, or `None` after recording why not.
    fn present(&mut self, key: &str) -> Option<&'a str> {
        match self.form.get(key) {
            None => {
                if !self.partial {
                    self.errors.push(key, REQUIRED);
                }
                None
            }
            Some(value) if value.trim().is_empty() => {
                self.errors.push(key, BLANK);
                None
            }
            Some(value) => Some(value.trim()),
        }
    }

    /// A required, non-blank string of at most `max_len` characters.
    pub fn text(&mut self, key: &str, max_len: Option<usize>) -> Option<String> {
        let value = self.present(key)?;
        if let Some(max_len) = max_len {
            if value.chars().count() > max_len {
                self.errors.push(
                    key,
                    format!("Ensure this field has no more than {max_len} characters."),
                );
                return None;
            }
        }
        Some(value.to_owned())
    }

    /// A string that may be absent or blank, in which case it is `None`.
    ///
    /// In partial mode the outer option distinguishes "not supplied" from
    /// "supplied as blank".
    pub fn optional_text(&mut self, key: &str, max_len: Option<usize>) -> Option<Option<String>> {
        let value = match self.form.get(key) {
            None => return if self.partial { None } else { Some(None) },
            Some(value) => value.trim(),
        };
        if value.is_empty() {
            return Some(None);
        }
        if let Some(max_len) = max_len {
            if value.chars().count() > max_len {
                self.errors.push(
                    key,
                    format!("Ensure this field has no more than {max_len} characters."),
                );
                return None;
            }
        }
        Some(Some(value.to_owned()))
    }

    /// A non-negative integer that fits a positive integer column.
    pub fn count(&mut self, key: &str) -> Option<u32> {
        let value = self.present(key)?;
        let Ok(value) = value.parse::<i64>() else {
            self.errors.push(key, NOT_INTEGER);
            return None;
        };
        if value < 0 {
            self.errors.push(key, NEGATIVE);
            return None;
        }
        match u32::try_from(value) {
            Ok(value) if value <= MAX_COUNT => Some(value),
            _ => {
                self.errors.push(
                    key,
                    format!("Ensure this value is less than or equal to {MAX_COUNT}."),
                );
                None
            }
        }
    }

    /// A non-negative decimal with bounded precision.
    ///
    /// At most `max_digits` digits in total, `decimal_places` of them after
    /// the decimal point.
    pub fn decimal(&mut self, key: &str, max_digits: u32, decimal_places: u32) -> Option<Decimal> {
        let value = self.present(key)?;
        // The decimal parser silently skips digit separators
        let Some(value) = value
            .parse::<Decimal>()
            .ok()
            .filter(|_| !value.contains('_'))
        else {
            self.errors.push(key, NOT_NUMBER);
            return None;
        };
        let value = value.normalize();
        if value.is_sign_negative() && !value.is_zero() {
            self.errors.push(key, NEGATIVE);
            return None;
        }

        let scale = value.scale();
        let digits = (value.mantissa().unsigned_abs().checked_ilog10().unwrap_or(0) + 1).max(scale);
        let whole_digits = digits - scale;
        let max_whole_digits = max_digits.saturating_sub(decimal_places);
        let message = if digits > max_digits {
            format!("Ensure that there are no more than {max_digits} digits in total.")
        } else if scale > decimal_places {
            format!("Ensure that there are no more than {decimal_places} decimal places.")
        } else if whole_digits > max_whole_digits {
            format!(
                "Ensure that there are no more than {max_whole_digits} digits before the decimal point."
            )
        } else {
            return Some(value);
        };
        self.errors.push(key, message);
        None
    }

    /// A syntactically valid email address.
    pub fn email(&mut self, key: &str, max_len: usize) -> Option<String> {
        let value = self.text(key, Some(max_len))?;
        if value.validate_email() {
            Some(value)
        } else {
            self.errors.push(key, NOT_EMAIL);
            None
        }
    }

    /// An optional boolean, accepting the usual html form spellings.
    pub fn flag(&mut self, key: &str) -> Option<bool> {
        let value = self.form.non_empty(key)?;
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "on" | "yes" => Some(true),
            "false" | "0" | "off" | "no" => Some(false),
            _ => {
                self.errors.push(key, NOT_BOOLEAN);
                None
            }
        }
    }
}
