use shiptalk_client::{ExpertClient, FormSession};
use shiptalk_core::ExpertId;

use super::fields::{FieldArgs, submit_failure};
use crate::OutputFormat;

pub async fn run(
    client: &ExpertClient,
    id: &str,
    args: &FieldArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let record = client.get_expert(&ExpertId::new(id)).await?;

    let session = FormSession::update(client, &record);
    let mut draft = session.draft();
    args.apply(&mut draft)?;

    session
        .submit(&draft)
        .await
        .map_err(|e| submit_failure(e, format))?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "success": true })),
        OutputFormat::Text => println!("Expert updated successfully"),
    }
    Ok(())
}
