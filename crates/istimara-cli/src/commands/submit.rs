//! Submit answers to a published form

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};

use istimara_client::{FormsApi, HttpFormsApi};
use istimara_forms::{FormSession, Submitter};

/// Answers file: a JSON object mapping a field id or field label to either a
/// string (scalar fields) or an array of strings (checkbox fields).
pub async fn handle(
    api: &HttpFormsApi,
    form_id: u64,
    answers_file: &Path,
    name: Option<String>,
    email: Option<String>,
) -> anyhow::Result<()> {
    let content = fs::read_to_string(answers_file)
        .with_context(|| format!("reading {}", answers_file.display()))?;
    let answers: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", answers_file.display()))?;

    let forms = api.list_public_forms().await?;
    let form = forms
        .into_iter()
        .find(|form| form.id == form_id)
        .with_context(|| format!("form {} is not available", form_id))?;

    let mut session = FormSession::new(form.definition());
    let fields = session.form().fields.clone();

    for (key, value) in &answers {
        let field = fields
            .iter()
            .find(|field| field.id.as_str() == key || &field.label == key)
            .with_context(|| format!("form has no field \"{}\"", key))?;
        let id = field.id.as_str().to_string();

        match value {
            serde_json::Value::String(scalar) => session.set_value(&id, scalar.as_str())?,
            serde_json::Value::Array(options) => {
                for option in options {
                    let option = option
                        .as_str()
                        .with_context(|| format!("options for \"{}\" must be strings", key))?;
                    session.toggle_option(&id, option)?;
                }
            }
            other => bail!("unsupported answer for \"{}\": {}", key, other),
        }
    }

    session.validate()?;

    let submitter = match name {
        Some(name) => Submitter::new(name, email.unwrap_or_default()),
        None => Submitter::anonymous(),
    };
    let submission = session.submission(form_id, &submitter);
    api.submit_response(&submission).await?;

    crate::output::success("response submitted");
    Ok(())
}
