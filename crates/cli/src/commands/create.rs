use shiptalk_client::{ExpertClient, FormSession};

use super::fields::{FieldArgs, submit_failure};
use crate::OutputFormat;

pub async fn run(
    client: &ExpertClient,
    args: &FieldArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let session = FormSession::create(client);
    let mut draft = session.draft();
    args.apply(&mut draft)?;

    session
        .submit(&draft)
        .await
        .map_err(|e| submit_failure(e, format))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "success": true })),
        OutputFormat::Text => println!("Expert registered successfully"),
    }
    Ok(())
}
