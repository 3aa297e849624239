//! Field rules for expert records.
//!
//! Each field has an ordered list of rules; validation stops at the first rule
//! a field violates and reports that rule's message. Fields are independent,
//! so a whole-record validation reports every invalid field at once.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::{ValidateEmail, ValidateUrl};

use crate::record::{CandidateRecord, PictureInput, ProfilePicture, ValidatedRecord, coerce_years};
use crate::types::{ExpertId, Field};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex is valid"));

const REQUIRED: &str = "Required";
const NAME_TOO_SHORT: &str = "Name must be at least 2 characters";
const PHONE_INVALID: &str = "Phone number must be 10 digits";
const LINKEDIN_INVALID: &str = "Must be a valid LinkedIn URL";
const EMAIL_INVALID: &str = "Invalid email address";
const COMPANY_REQUIRED: &str = "Company name is required";
const DESIGNATION_REQUIRED: &str = "Designation is required";
const YEARS_REQUIRED: &str = "Years in industry is required";
const PICTURE_REQUIRED: &str = "Profile picture is required";

const MIN_NAME_CHARS: usize = 2;
const MIN_YEARS: i64 = 1;

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    /// New record; the profile picture is required.
    Create,
    /// Existing record; an absent picture keeps the stored one.
    Update(ExpertId),
}

impl FormMode {
    /// The id of the record being edited, if any.
    #[must_use]
    pub fn existing_id(&self) -> Option<&ExpertId> {
        match self {
            Self::Create => None,
            Self::Update(id) => Some(id),
        }
    }

    /// Whether a profile picture must be supplied.
    #[must_use]
    pub fn requires_picture(&self) -> bool {
        matches!(self, Self::Create)
    }
}

/// Per-field validation failures, one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field. The first message recorded wins.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether a field failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Iterate failures in form order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Number of failed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("validation failed: ")?;
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validate a single field of a candidate.
///
/// Used for inline feedback when one field changes; [`validate`] applies the
/// same rules to every field.
pub fn validate_field(
    field: Field,
    candidate: &CandidateRecord,
    mode: &FormMode,
) -> Result<(), String> {
    let result = match field {
        Field::Name => check_name(candidate.name.as_deref()).map(drop),
        Field::Phone => check_phone(candidate.phone.as_deref()).map(drop),
        Field::Linkedin => check_linkedin(candidate.linkedin.as_deref()).map(drop),
        Field::Email => check_email(candidate.email.as_deref()).map(drop),
        Field::Company => check_non_empty(candidate.company.as_deref(), COMPANY_REQUIRED).map(drop),
        Field::Designation => {
            check_non_empty(candidate.designation.as_deref(), DESIGNATION_REQUIRED).map(drop)
        }
        Field::YearsInIndustry => check_years(candidate.years_in_industry.as_deref()).map(drop),
        Field::ProfilePicture => check_picture(candidate.profile_picture.as_ref(), mode).map(drop),
    };
    result.map_err(str::to_owned)
}

/// Validate a whole candidate and normalize it.
///
/// Every field is checked; the error map holds the first violated rule of
/// each invalid field.
pub fn validate(
    candidate: &CandidateRecord,
    mode: &FormMode,
) -> Result<ValidatedRecord, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = collect(&mut errors, Field::Name, check_name(candidate.name.as_deref()));
    let phone = collect(&mut errors, Field::Phone, check_phone(candidate.phone.as_deref()));
    let linkedin = collect(
        &mut errors,
        Field::Linkedin,
        check_linkedin(candidate.linkedin.as_deref()),
    );
    let email = collect(&mut errors, Field::Email, check_email(candidate.email.as_deref()));
    let company = collect(
        &mut errors,
        Field::Company,
        check_non_empty(candidate.company.as_deref(), COMPANY_REQUIRED),
    );
    let designation = collect(
        &mut errors,
        Field::Designation,
        check_non_empty(candidate.designation.as_deref(), DESIGNATION_REQUIRED),
    );
    let years = collect(
        &mut errors,
        Field::YearsInIndustry,
        check_years(candidate.years_in_industry.as_deref()),
    );
    let picture = collect(
        &mut errors,
        Field::ProfilePicture,
        check_picture(candidate.profile_picture.as_ref(), mode),
    );

    match (name, phone, linkedin, email, company, designation, years, picture) {
        (
            Some(name),
            Some(phone),
            Some(linkedin),
            Some(email),
            Some(company),
            Some(designation),
            Some(years_in_industry),
            Some(profile_picture),
        ) if errors.is_empty() => Ok(ValidatedRecord {
            name,
            phone,
            linkedin,
            email,
            company,
            designation,
            years_in_industry,
            profile_picture,
        }),
        _ => Err(errors),
    }
}

fn collect<T>(errors: &mut FieldErrors, field: Field, result: Result<T, &str>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(field, message);
            None
        }
    }
}

fn required(value: Option<&str>) -> Result<&str, &'static str> {
    value.ok_or(REQUIRED)
}

fn check_name(value: Option<&str>) -> Result<String, &'static str> {
    let value = required(value)?;
    if value.chars().count() < MIN_NAME_CHARS {
        return Err(NAME_TOO_SHORT);
    }
    Ok(value.to_owned())
}

fn check_phone(value: Option<&str>) -> Result<String, &'static str> {
    let value = required(value)?;
    if !PHONE_RE.is_match(value) {
        return Err(PHONE_INVALID);
    }
    Ok(value.to_owned())
}

fn check_linkedin(value: Option<&str>) -> Result<String, &'static str> {
    let value = required(value)?.to_owned();
    if !value.validate_url() {
        return Err(LINKEDIN_INVALID);
    }
    Ok(value)
}

fn check_email(value: Option<&str>) -> Result<String, &'static str> {
    let value = required(value)?.to_owned();
    if !value.validate_email() {
        return Err(EMAIL_INVALID);
    }
    Ok(value)
}

fn check_non_empty(value: Option<&str>, message: &'static str) -> Result<String, &'static str> {
    let value = required(value)?;
    if value.is_empty() {
        return Err(message);
    }
    Ok(value.to_owned())
}

/// Unparsable input counts as absent, which fails the minimum.
fn check_years(value: Option<&str>) -> Result<u32, &'static str> {
    let years = value.and_then(coerce_years);
    match years {
        Some(n) if n >= MIN_YEARS => u32::try_from(n).map_err(|_| YEARS_REQUIRED),
        _ => Err(YEARS_REQUIRED),
    }
}

fn check_picture(
    value: Option<&PictureInput>,
    mode: &FormMode,
) -> Result<Option<ProfilePicture>, &'static str> {
    let picture = match value {
        Some(PictureInput::File(blob)) => Some(ProfilePicture::Upload(blob.clone())),
        Some(PictureInput::Reference(r)) if !r.is_empty() => {
            Some(ProfilePicture::Existing(r.clone()))
        }
        Some(PictureInput::Reference(_)) | None => None,
    };
    if picture.is_none() && mode.requires_picture() {
        return Err(PICTURE_REQUIRED);
    }
    Ok(picture)
}
