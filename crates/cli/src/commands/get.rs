use shiptalk_client::ExpertClient;
use shiptalk_core::ExpertId;

use super::fields::print_record;
use crate::OutputFormat;

pub async fn run(client: &ExpertClient, id: &str, format: &OutputFormat) -> anyhow::Result<()> {
    let record = client.get_expert(&ExpertId::new(id)).await?;
    let picture_url = client.profile_picture_url(&record);
    match format {
        OutputFormat::Json => {
            let mut body = serde_json::to_value(&record)?;
            if let Some(url) = picture_url {
                body["profile_picture_url"] = serde_json::Value::String(url);
            }
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => print_record(&record, picture_url.as_deref()),
    }
    Ok(())
}
