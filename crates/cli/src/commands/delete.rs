use std::io::{BufRead, Write};

use clap::Args;
use shiptalk_client::{AssumeYes, Confirm, DeleteOutcome, ExpertClient};
use shiptalk_core::ExpertId;

use crate::OutputFormat;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Expert ID.
    pub id: String,
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Asks on the terminal; anything but `y`/`yes` declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        eprint!("{prompt} [y/N] ");
        if std::io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        is_yes(&answer)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

pub async fn run(client: &ExpertClient, args: &DeleteArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let id = ExpertId::new(args.id.as_str());
    let outcome = if args.yes {
        client.delete_expert_confirmed(&id, &AssumeYes).await?
    } else {
        client.delete_expert_confirmed(&id, &StdinConfirm).await?
    };

    match (outcome, format) {
        (DeleteOutcome::Deleted, OutputFormat::Json) => {
            println!("{}", serde_json::json!({ "success": true, "deleted": true }));
        }
        (DeleteOutcome::Deleted, OutputFormat::Text) => println!("Expert deleted successfully"),
        (DeleteOutcome::Cancelled, OutputFormat::Json) => {
            println!("{}", serde_json::json!({ "success": true, "deleted": false }));
        }
        (DeleteOutcome::Cancelled, OutputFormat::Text) => println!("Delete cancelled"),
    }
    Ok(())
}
