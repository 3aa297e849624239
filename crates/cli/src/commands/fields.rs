use std::path::PathBuf;

use clap::Args;
use shiptalk_client::SubmitError;
use shiptalk_core::{CandidateRecord, ExpertRecord, Field, FieldErrors, ImageBlob};

use crate::OutputFormat;

/// Editable expert fields. Omitted flags leave the draft unchanged.
#[derive(Args, Debug, Default)]
pub struct FieldArgs {
    /// Full name (at least 2 characters).
    #[arg(long)]
    pub name: Option<String>,
    /// 10-digit phone number.
    #[arg(long)]
    pub phone: Option<String>,
    /// LinkedIn profile URL.
    #[arg(long)]
    pub linkedin: Option<String>,
    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
    /// Company name.
    #[arg(long)]
    pub company: Option<String>,
    /// Job title or designation.
    #[arg(long)]
    pub designation: Option<String>,
    /// Years in the shipping industry.
    #[arg(long = "years")]
    pub years_in_industry: Option<String>,
    /// Image file to upload as the profile picture.
    #[arg(long, conflicts_with = "picture_ref")]
    pub picture: Option<PathBuf>,
    /// Reference to an image the API already stores.
    #[arg(long)]
    pub picture_ref: Option<String>,
}

impl FieldArgs {
    /// Apply the given flags on top of a draft.
    pub fn apply(&self, draft: &mut CandidateRecord) -> anyhow::Result<()> {
        let text_fields = [
            (Field::Name, &self.name),
            (Field::Phone, &self.phone),
            (Field::Linkedin, &self.linkedin),
            (Field::Email, &self.email),
            (Field::Company, &self.company),
            (Field::Designation, &self.designation),
            (Field::YearsInIndustry, &self.years_in_industry),
            (Field::ProfilePicture, &self.picture_ref),
        ];
        for (field, value) in text_fields {
            if let Some(value) = value {
                draft.set(field, value.clone());
            }
        }
        if let Some(path) = &self.picture {
            draft.set_picture_file(ImageBlob::from_path(path)?);
        }
        Ok(())
    }
}

/// Print per-field errors, one line each.
pub fn print_field_errors(errors: &FieldErrors, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({ "success": false, "errors": errors });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            for (field, message) in errors.iter() {
                eprintln!("  {}: {message}", field.label());
            }
        }
    }
    Ok(())
}

/// Turn a failed submission into the command's error.
///
/// Field errors are listed inline; anything else becomes a single message.
pub fn submit_failure(err: SubmitError, format: &OutputFormat) -> anyhow::Error {
    match err {
        SubmitError::Invalid(errors) => {
            if let Err(e) = print_field_errors(&errors, format) {
                return e;
            }
            anyhow::anyhow!("{} field(s) failed validation", errors.len())
        }
        SubmitError::Operation(e) => anyhow::anyhow!(e.user_message()),
        SubmitError::Busy => anyhow::anyhow!(SubmitError::Busy),
    }
}

/// Print one record in text form.
pub fn print_record(record: &ExpertRecord, picture_url: Option<&str>) {
    println!("ID:          {}", record.id);
    println!("Name:        {}", record.name);
    println!("Phone:       {}", record.phone);
    println!("LinkedIn:    {}", record.linkedin);
    println!("Email:       {}", record.email);
    println!("Company:     {}", record.company);
    println!("Designation: {}", record.designation);
    println!("Years:       {}", record.years_in_industry);
    println!("Picture:     {}", picture_url.unwrap_or("-"));
}
