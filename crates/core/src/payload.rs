//! Transport payload for create and update submissions.
//!
//! A payload is an ordered list of named parts, one per field that carries a
//! value, which the client encodes as `multipart/form-data`.

use crate::image::ImageBlob;
use crate::record::{ProfilePicture, ValidatedRecord};
use crate::types::{ExpertId, Field};

/// Part name that carries the record id on updates.
pub const ID_PART: &str = "id";

/// Value of a single payload part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    /// Plain text form field.
    Text(String),
    /// File upload.
    File(ImageBlob),
}

impl PartValue {
    /// The text value, if this is a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::File(_) => None,
        }
    }

    /// The file value, if this is a file part.
    #[must_use]
    pub fn as_file(&self) -> Option<&ImageBlob> {
        match self {
            Self::File(blob) => Some(blob),
            Self::Text(_) => None,
        }
    }
}

/// A named part of a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPart {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart body for a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportPayload {
    parts: Vec<PayloadPart>,
}

impl TransportPayload {
    fn push(&mut self, name: &str, value: PartValue) {
        self.parts.push(PayloadPart {
            name: name.to_owned(),
            value,
        });
    }

    /// All parts, in order.
    #[must_use]
    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    /// Consume the payload, yielding its parts.
    #[must_use]
    pub fn into_parts(self) -> Vec<PayloadPart> {
        self.parts
    }

    /// The value of the first part with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PartValue> {
        self.parts.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Whether a part with the given name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Part names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the payload has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

/// A field value as seen by the omission rule.
enum Candidate<'a> {
    Text(&'a str),
    Number(u32),
    Picture(Option<&'a ProfilePicture>),
}

/// Empty strings, zero and absent values never become parts.
///
/// This keeps update requests sparse. A field cleared to empty (or years set
/// to zero) therefore cannot be sent as a change.
fn is_omitted(value: &Candidate<'_>) -> bool {
    match value {
        Candidate::Text(s) => s.is_empty(),
        Candidate::Number(n) => *n == 0,
        Candidate::Picture(p) => match p {
            None => true,
            Some(ProfilePicture::Existing(r)) => r.is_empty(),
            Some(ProfilePicture::Upload(_)) => false,
        },
    }
}

fn field_value(record: &ValidatedRecord, field: Field) -> Candidate<'_> {
    match field {
        Field::Name => Candidate::Text(&record.name),
        Field::Phone => Candidate::Text(&record.phone),
        Field::Linkedin => Candidate::Text(&record.linkedin),
        Field::Email => Candidate::Text(&record.email),
        Field::Company => Candidate::Text(&record.company),
        Field::Designation => Candidate::Text(&record.designation),
        Field::YearsInIndustry => Candidate::Number(record.years_in_industry),
        Field::ProfilePicture => Candidate::Picture(record.profile_picture.as_ref()),
    }
}

/// Build the transport payload for a validated record.
///
/// Fields appear in form order and are skipped when empty. Passing
/// `existing_id` appends a trailing `id` part, which marks the submission as
/// an update.
#[must_use]
pub fn serialize(record: &ValidatedRecord, existing_id: Option<&ExpertId>) -> TransportPayload {
    let mut payload = TransportPayload::default();

    for field in Field::ALL {
        let value = field_value(record, field);
        if is_omitted(&value) {
            continue;
        }
        let part = match value {
            Candidate::Text(s) => PartValue::Text(s.to_owned()),
            Candidate::Number(n) => PartValue::Text(n.to_string()),
            Candidate::Picture(Some(ProfilePicture::Upload(blob))) => PartValue::File(blob.clone()),
            Candidate::Picture(Some(ProfilePicture::Existing(r))) => PartValue::Text(r.clone()),
            Candidate::Picture(None) => continue,
        };
        payload.push(field.as_str(), part);
    }

    if let Some(id) = existing_id.filter(|id| !id.as_str().is_empty()) {
        payload.push(ID_PART, PartValue::Text(id.to_string()));
    }

    payload
}
