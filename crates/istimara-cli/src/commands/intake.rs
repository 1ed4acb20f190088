//! Fixed intake form submissions

use std::fs;
use std::path::Path;

use anyhow::Context;

use istimara_client::{FormsApi, HttpFormsApi};
use istimara_forms::{CitizenFeedback, EntityRegistration};

use crate::output::success;
use crate::IntakeCommands;

pub async fn handle(action: IntakeCommands, api: &HttpFormsApi) -> anyhow::Result<()> {
    match action {
        IntakeCommands::Entity { file } => {
            let registration: EntityRegistration = read_json(&file)?;
            let payload = registration.payload()?;
            let receipt = api.submit_entity_registration(&payload).await?;
            success(&receipt_line("registration", receipt.reference_number));
        }
        IntakeCommands::Feedback { file } => {
            let feedback: CitizenFeedback = read_json(&file)?;
            let payload = feedback.payload()?;
            let receipt = api.submit_citizen_feedback(&payload).await?;
            success(&receipt_line("feedback", receipt.reference_number));
        }
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(file: &Path) -> anyhow::Result<T> {
    let content =
        fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", file.display()))
}

fn receipt_line(kind: &str, reference: Option<String>) -> String {
    match reference {
        Some(reference) => format!("{} submitted, reference {}", kind, reference),
        None => format!("{} submitted", kind),
    }
}
