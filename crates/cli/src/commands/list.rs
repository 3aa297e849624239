use shiptalk_client::ExpertClient;

use crate::OutputFormat;

pub async fn run(client: &ExpertClient, format: &OutputFormat) -> anyhow::Result<()> {
    let experts = client.list_experts().await?;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&experts)?);
        }
        OutputFormat::Text => {
            println!("{} experts:", experts.len());
            for e in &experts {
                println!(
                    "  {id} | {name} | {designation} @ {company} | {years} yrs",
                    id = e.id,
                    name = e.name,
                    designation = e.designation,
                    company = e.company,
                    years = e.years_in_industry,
                );
            }
        }
    }
    Ok(())
}
