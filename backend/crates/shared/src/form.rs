//! Form errors
//!
//! Submitted forms are validated field by field. A rejected submission is
//! not an error response: the form is rendered again with the submitted
//! values and the messages collected here, keyed by field name.

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Message shown for a required field left empty
pub const REQUIRED: &str = "This field is required.";

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    fields: BTreeMap<&'static str, Vec<Cow<'static, str>>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`
    pub fn add(&mut self, field: &'static str, message: impl Into<Cow<'static, str>>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Messages for one field, empty when the field is clean
    pub fn get(&self, field: &str) -> &[Cow<'static, str>] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields carrying at least one message
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.keys().copied()
    }

    /// `Ok(value)` when no field was rejected
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// Unwrap a field check, recording its message on failure.
///
/// Lets a form run every check before reporting, instead of stopping at
/// the first bad field.
pub fn collect<T, M>(
    errors: &mut FieldErrors,
    field: &'static str,
    result: Result<T, M>,
) -> Option<T>
where
    M: Into<Cow<'static, str>>,
{
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.add(field, message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_by_default() {
        let errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert!(errors.get("name").is_empty());
        assert_eq!(errors.clone().into_result(7), Ok(7));
    }

    #[test]
    fn test_add_and_get() {
        let mut errors = FieldErrors::new();
        errors.add("name", REQUIRED);
        errors.add("name", "Second problem.");
        errors.add("url", "Enter a valid URL.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name").len(), 2);
        assert!(errors.has("url"));
        assert!(!errors.has("title"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["name", "url"]);
    }

    #[test]
    fn test_collect_keeps_going() {
        let mut errors = FieldErrors::new();
        let a = collect(&mut errors, "a", Ok::<_, &'static str>(1));
        let b = collect(&mut errors, "b", Err::<i32, _>("bad b"));
        let c = collect(&mut errors, "c", Err::<i32, _>(String::from("bad c")));

        assert_eq!(a, Some(1));
        assert!(b.is_none() && c.is_none());
        assert_eq!(errors.get("c")[0], "bad c");
        assert!(errors.into_result(()).is_err());
    }
}
