//! Tri-state field patch for partial update payloads.
//!
//! Update endpoints only apply the keys that are present in the request body,
//! and a present-but-null key clears the field. A plain `Option` cannot
//! distinguish "absent" from "null", so update DTOs use [`Patch`] with
//! `#[serde(default)]`: an absent key deserializes to [`Patch::Keep`], an
//! explicit `null` to [`Patch::Clear`], and a value to [`Patch::Set`].

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Patch<T> {
    /// The key was absent; leave the stored value unchanged.
    Keep,
    /// The key was explicitly `null`; clear the stored value.
    Clear,
    /// The key carried a value; store it.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Keep
    }
}

impl<T> Patch<T> {
    pub fn is_keep(&self) -> bool {
        matches!(self, Patch::Keep)
    }

    /// Apply the patch to an optional stored value.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Patch::Keep => {}
            Patch::Clear => *target = None,
            Patch::Set(value) => *target = Some(value),
        }
    }

    /// Map the carried value, preserving `Keep`/`Clear`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Clear => Patch::Clear,
            Patch::Set(value) => Patch::Set(f(value)),
        }
    }

    /// Map the carried value through a fallible projection, turning a failed
    /// projection into `Keep`. Used for leniently parsed fields (dates,
    /// percentages) where malformed input leaves the stored value unchanged.
    pub fn and_then_or_keep<U>(self, f: impl FnOnce(T) -> Option<U>) -> Patch<U> {
        match self {
            Patch::Keep => Patch::Keep,
            Patch::Clear => Patch::Clear,
            Patch::Set(value) => match f(value) {
                Some(mapped) => Patch::Set(mapped),
                None => Patch::Keep,
            },
        }
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
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => Patch::Clear,
            Some(value) => Patch::Set(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        name: Patch<String>,
    }

    #[test]
    fn absent_key_keeps() {
        let body: Body = serde_json::from_str("{}").unwrap();
        assert_eq!(body.name, Patch::Keep);
    }

    #[test]
    fn null_clears() {
        let body: Body = serde_json::from_str(r#"{"name": null}"#).unwrap();
        assert_eq!(body.name, Patch::Clear);
    }

    #[test]
    fn value_sets() {
        let body: Body = serde_json::from_str(r#"{"name": "core switch"}"#).unwrap();
        assert_eq!(body.name, Patch::Set("core switch".to_string()));
    }

    #[test]
    fn apply_to_covers_all_states() {
        let mut value = Some("old".to_string());
        Patch::Keep.apply_to(&mut value);
        assert_eq!(value.as_deref(), Some("old"));
        Patch::Set("new".to_string()).apply_to(&mut value);
        assert_eq!(value.as_deref(), Some("new"));
        Patch::<String>::Clear.apply_to(&mut value);
        assert_eq!(value, None);
    }

    #[test]
    fn and_then_or_keep_turns_failure_into_keep() {
        let parsed = Patch::Set("nonsense".to_string())
            .and_then_or_keep(|s| s.parse::<i64>().ok());
        assert_eq!(parsed, Patch::Keep);
        let parsed = Patch::Set("42".to_string()).and_then_or_keep(|s| s.parse::<i64>().ok());
        assert_eq!(parsed, Patch::Set(42));
    }
}
