//! Sparse patch fields.
//!
//! A JSON patch body has three states per field: the key is missing, the key
//! is present with `null`, or the key carries a value. `Option<T>` collapses
//! the first two, so patch payloads use [`Patch`] instead, together with
//! `#[serde(default)]` on the containing struct.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Patch<T> {
    /// The field was not provided; leave the target untouched.
    Absent,

    /// The field was provided as an explicit `null`.
    Null,

    /// The field was provided with a value.
    Value(T),
}

impl<T> Patch<T> {
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the provided value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    /// Overwrite `target` when a value was provided.
    ///
    /// `Null` is treated like `Absent` here; callers reject nulls for
    /// non-nullable fields during validation, before anything is applied.
    pub fn apply_to(self, target: &mut T) {
        if let Self::Value(value) = self {
            *target = value;
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(|value| value.map_or(Self::Null, Self::Value))
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Example {
        name: Patch<String>,
        count: Patch<i64>,
    }

    #[test]
    fn missing_key_is_absent() -> TestResult {
        let example: Example = serde_json::from_str(r#"{"count": 3}"#)?;

        assert!(example.name.is_absent());
        assert_eq!(example.count, Patch::Value(3));

        Ok(())
    }

    #[test]
    fn explicit_null_is_distinct_from_absent() -> TestResult {
        let example: Example = serde_json::from_str(r#"{"name": null}"#)?;

        assert!(example.name.is_null());
        assert!(example.count.is_absent());

        Ok(())
    }

    #[test]
    fn wrong_type_is_rejected() {
        let result = serde_json::from_str::<Example>(r#"{"count": "three"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn apply_to_only_overwrites_values() {
        let mut target = 5;

        Patch::Absent.apply_to(&mut target);
        assert_eq!(target, 5);

        Patch::Null.apply_to(&mut target);
        assert_eq!(target, 5);

        Patch::Value(9).apply_to(&mut target);
        assert_eq!(target, 9);
    }
}
