use clap::Args;
use shiptalk_core::{CandidateRecord, ExpertId, FormMode, serialize, validate};

use super::fields::{FieldArgs, print_field_errors};
use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub fields: FieldArgs,
    /// Validate as an update of this expert ID (picture becomes optional).
    #[arg(long, value_name = "ID")]
    pub update: Option<String>,
}

/// Validate flags locally and show what would be sent. Nothing is submitted.
pub fn run(args: &ValidateArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let mode = match &args.update {
        Some(id) => FormMode::Update(ExpertId::new(id.as_str())),
        None => FormMode::Create,
    };
    let mut draft = CandidateRecord::new();
    args.fields.apply(&mut draft)?;

    match validate(&draft, &mode) {
        Ok(record) => {
            let payload = serialize(&record, mode.existing_id());
            let parts: Vec<&str> = payload.names().collect();
            match format {
                OutputFormat::Json => {
                    let body = serde_json::json!({ "success": true, "parts": parts });
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                OutputFormat::Text => println!("Valid. Parts: {}", parts.join(", ")),
            }
            Ok(())
        }
        Err(errors) => {
            print_field_errors(&errors, format)?;
            anyhow::bail!("{} field(s) failed validation", errors.len())
        }
    }
}
