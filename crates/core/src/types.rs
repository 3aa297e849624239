use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier assigned to an expert by the API.
///
/// The backend may emit ids as JSON strings or numbers; both deserialize into
/// the same opaque string form. Serialization always produces a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ExpertId(String);

impl ExpertId {
    /// Create a new id from a string value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the inner string as a str slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ExpertId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExpertId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl AsRef<str> for ExpertId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ExpertId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(s) => Self(s),
            Raw::Unsigned(n) => Self(n.to_string()),
            Raw::Signed(n) => Self(n.to_string()),
        })
    }
}

/// The editable fields of an expert record, in form order.
///
/// `id` is not listed here. It travels alongside a payload and is never
/// validated or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Phone,
    Linkedin,
    Email,
    Company,
    Designation,
    YearsInIndustry,
    ProfilePicture,
}

impl Field {
    /// Every field, in the order they are rendered and serialized.
    pub const ALL: [Field; 8] = [
        Field::Name,
        Field::Phone,
        Field::Linkedin,
        Field::Email,
        Field::Company,
        Field::Designation,
        Field::YearsInIndustry,
        Field::ProfilePicture,
    ];

    /// The key used for this field on the wire (multipart part name).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Linkedin => "linkedin",
            Self::Email => "email",
            Self::Company => "company",
            Self::Designation => "designation",
            Self::YearsInIndustry => "years_in_industry",
            Self::ProfilePicture => "profile_picture",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Phone => "Phone",
            Self::Linkedin => "LinkedIn URL",
            Self::Email => "Email",
            Self::Company => "Company",
            Self::Designation => "Designation",
            Self::YearsInIndustry => "Years in Shipping Industry",
            Self::ProfilePicture => "Profile Picture",
        }
    }

    /// Look up a field by its wire key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == key)
    }
}

impl Serialize for Field {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expert_id_from_string_and_number() {
        let from_str: ExpertId = serde_json::from_str(r#""abc-1""#).unwrap();
        assert_eq!(from_str.as_str(), "abc-1");

        let from_num: ExpertId = serde_json::from_str("42").unwrap();
        assert_eq!(from_num.as_str(), "42");

        let from_neg: ExpertId = serde_json::from_str("-7").unwrap();
        assert_eq!(from_neg.as_str(), "-7");
    }

    #[test]
    fn expert_id_serializes_as_string() {
        let id = ExpertId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""42""#);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.as_str()), Some(field));
        }
        assert_eq!(Field::from_key("id"), None);
    }

    #[test]
    fn field_order_matches_form_order() {
        let keys: Vec<&str> = Field::ALL.iter().map(|f| f.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "name",
                "phone",
                "linkedin",
                "email",
                "company",
                "designation",
                "years_in_industry",
                "profile_picture",
            ]
        );
    }
}
