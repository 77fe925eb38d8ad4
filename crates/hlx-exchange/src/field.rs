//! Tri-state optional wire fields.
//!
//! `Option<T>` collapses "key omitted" and "key present with null" into one
//! state. The exchange distinguishes them, so envelope fields that can take
//! either form use [`WireField`] together with
//! `#[serde(skip_serializing_if = "WireField::is_absent")]`.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireField<T> {
    /// Key omitted from the object.
    Absent,
    /// Key present with a JSON `null` value.
    Null,
    /// Key present with a value.
    Present(T),
}

impl<T> WireField<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_present(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> Default for WireField<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T: Serialize> Serialize for WireField<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => value.serialize(serializer),
            // Absent is skipped by the containing struct; if it is not, null
            // is the only representation left.
            Self::Null | Self::Absent => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Holder {
        #[serde(skip_serializing_if = "WireField::is_absent")]
        field: WireField<String>,
    }

    #[test]
    fn test_absent_omits_key() {
        let value = serde_json::to_value(Holder {
            field: WireField::Absent,
        })
        .unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_null_keeps_key() {
        let value = serde_json::to_value(Holder {
            field: WireField::Null,
        })
        .unwrap();
        assert_eq!(value, json!({"field": null}));
        assert!(value.as_object().unwrap().contains_key("field"));
    }

    #[test]
    fn test_present_value() {
        let value = serde_json::to_value(Holder {
            field: WireField::Present("x".to_string()),
        })
        .unwrap();
        assert_eq!(value, json!({"field": "x"}));
    }

    #[test]
    fn test_accessors() {
        let field: WireField<u8> = WireField::default();
        assert!(field.is_absent());
        assert!(WireField::<u8>::Null.is_null());
        assert_eq!(WireField::Present(3u8).as_present(), Some(&3));
        assert_eq!(WireField::<u8>::Null.as_present(), None);
    }
}
