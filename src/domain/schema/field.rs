//! Tri-state optional field

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Optional field without a declared default.
///
/// Keeps "key not sent" (`Absent`) apart from "key sent as null" (`Null`).
/// Entity structs pair it with `#[serde(default, skip_serializing_if =
/// "Field::is_absent")]` so an absent key stays absent on re-encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    /// Borrow the value when present; `Absent` and `Null` both yield `None`
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Present(value),
            None => Self::Null,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Only reached when the key exists; a missing key goes through Default.
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

impl<T: Serialize> Serialize for Field<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Present(value) => value.serialize(serializer),
            Self::Absent | Self::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize, PartialEq)]
    struct Holder {
        #[serde(default, skip_serializing_if = "Field::is_absent")]
        value: Field<String>,
    }

    #[test]
    fn test_missing_key_is_absent() {
        let holder: Holder = serde_json::from_value(json!({})).unwrap();
        assert!(holder.value.is_absent());
    }

    #[test]
    fn test_null_key_is_null() {
        let holder: Holder = serde_json::from_value(json!({"value": null})).unwrap();
        assert!(holder.value.is_null());
        assert_eq!(holder.value.as_option(), None);
    }

    #[test]
    fn test_present_value() {
        let holder: Holder = serde_json::from_value(json!({"value": "x"})).unwrap();
        assert_eq!(holder.value, Field::Present("x".to_string()));
    }

    #[test]
    fn test_serialization_keeps_states_apart() {
        let absent = Holder { value: Field::Absent };
        let null = Holder { value: Field::Null };

        assert_eq!(serde_json::to_value(&absent).unwrap(), json!({}));
        assert_eq!(serde_json::to_value(&null).unwrap(), json!({"value": null}));
    }
}
