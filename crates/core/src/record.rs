use serde::{Deserialize, Deserializer, Serialize};

use crate::image::ImageBlob;
use crate::types::{ExpertId, Field};

/// An expert profile as stored by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpertRecord {
    /// Identifier assigned by the API.
    pub id: ExpertId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub designation: String,
    /// Accepts either a JSON number or a numeric string.
    #[serde(default, deserialize_with = "loose_years")]
    pub years_in_industry: u32,
    /// Reference to the stored picture, relative to the API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

fn loose_years<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Float(f64),
        Text(String),
        Null(()),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(n) => u32::try_from(n).unwrap_or(u32::MAX),
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Raw::Float(f) if f.is_finite() && f >= 0.0 => f.min(f64::from(u32::MAX)) as u32,
        Raw::Text(s) => coerce_years(&s)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        Raw::Float(_) | Raw::Null(()) => 0,
    })
}

/// Years as typed: any finite number, truncated toward zero.
pub(crate) fn coerce_years(text: &str) -> Option<i64> {
    let n = text.trim().parse::<f64>().ok().filter(|n| n.is_finite())?;
    #[allow(clippy::cast_possible_truncation)]
    let years = n.trunc() as i64;
    Some(years)
}

/// Raw profile picture input: either a freshly selected file or the
/// reference string of an image the API already stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureInput {
    /// A file chosen for upload.
    File(ImageBlob),
    /// A reference (path or URL) to an existing image.
    Reference(String),
}

/// A not-yet-validated draft of an expert record.
///
/// Every field is raw user input. `years_in_industry` is kept as text and
/// only coerced during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub designation: Option<String>,
    pub years_in_industry: Option<String>,
    pub profile_picture: Option<PictureInput>,
}

impl CandidateRecord {
    /// An empty draft for the create flow.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A draft hydrated from a fetched record for the update flow.
    ///
    /// The picture starts out as a reference to the stored image; replacing it
    /// with a file is up to the caller.
    #[must_use]
    pub fn from_record(record: &ExpertRecord) -> Self {
        Self {
            name: Some(record.name.clone()),
            phone: Some(record.phone.clone()),
            linkedin: Some(record.linkedin.clone()),
            email: Some(record.email.clone()),
            company: Some(record.company.clone()),
            designation: Some(record.designation.clone()),
            years_in_industry: Some(record.years_in_industry.to_string()),
            profile_picture: record
                .profile_picture
                .clone()
                .filter(|r| !r.is_empty())
                .map(PictureInput::Reference),
        }
    }

    /// Set a field from text input.
    ///
    /// For [`Field::ProfilePicture`] the text is taken as a reference string;
    /// use [`CandidateRecord::set_picture_file`] to attach an upload.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = Some(value),
            Field::Phone => self.phone = Some(value),
            Field::Linkedin => self.linkedin = Some(value),
            Field::Email => self.email = Some(value),
            Field::Company => self.company = Some(value),
            Field::Designation => self.designation = Some(value),
            Field::YearsInIndustry => self.years_in_industry = Some(value),
            Field::ProfilePicture => self.profile_picture = Some(PictureInput::Reference(value)),
        }
    }

    /// Replace the picture with a file upload.
    pub fn set_picture_file(&mut self, blob: ImageBlob) {
        self.profile_picture = Some(PictureInput::File(blob));
    }

    /// Raw text of a text-like field, if set.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Linkedin => self.linkedin.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Company => self.company.as_deref(),
            Field::Designation => self.designation.as_deref(),
            Field::YearsInIndustry => self.years_in_industry.as_deref(),
            Field::ProfilePicture => match &self.profile_picture {
                Some(PictureInput::Reference(r)) => Some(r.as_str()),
                _ => None,
            },
        }
    }
}

/// A normalized profile picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfilePicture {
    /// New image to upload as a file part.
    Upload(ImageBlob),
    /// Reference to an image the API already stores.
    Existing(String),
}

/// A candidate record that passed validation, with canonical types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub name: String,
    pub phone: String,
    pub linkedin: String,
    pub email: String,
    pub company: String,
    pub designation: String,
    pub years_in_industry: u32,
    /// `None` on update means "keep the stored picture".
    pub profile_picture: Option<ProfilePicture>,
}
