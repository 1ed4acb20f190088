//! Forms management commands

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::ValueEnum;
use tabled::Tabled;

use istimara_client::{
    CreateFormRequest, ExportFormat, FormResponse, FormSummary, FormsApi, HttpFormsApi,
};
use istimara_forms::{response_table, FormDefinition};

use crate::output::{success, OutputFormat};
use crate::FormCommands;

/// Export formats; `csv` is shaped locally, the rest are server-rendered.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportArg {
    Excel,
    Pdf,
    Csv,
}

#[derive(Tabled)]
struct FormRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: &'static str,
    #[tabled(rename = "Public")]
    public: bool,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Responses")]
    responses: u64,
}

impl From<&FormSummary> for FormRow {
    fn from(form: &FormSummary) -> Self {
        Self {
            id: form.id,
            title: form.title.clone(),
            category: form.category.display_name(),
            public: form.is_public,
            active: form.is_active,
            responses: form.responses_count,
        }
    }
}

#[derive(Tabled)]
struct ResponseRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Submitter")]
    submitter: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Submitted at")]
    submitted_at: String,
}

impl From<&FormResponse> for ResponseRow {
    fn from(response: &FormResponse) -> Self {
        Self {
            id: response.id,
            submitter: response.submitter_name.clone(),
            email: response.submitter_email.clone().unwrap_or_default(),
            submitted_at: response.submitted_at.to_rfc3339(),
        }
    }
}

pub async fn handle(
    action: FormCommands,
    api: &HttpFormsApi,
    format: OutputFormat,
) -> anyhow::Result<()> {
    match action {
        FormCommands::List { managed, category } => {
            let mut forms = if managed {
                api.list_managed_forms().await?
            } else {
                api.list_public_forms().await?
            };
            if let Some(category) = category {
                forms.retain(|form| {
                    format!("{:?}", form.category).eq_ignore_ascii_case(&category)
                        || form.category.display_name() == category
                });
            }
            let rows: Vec<FormRow> = forms.iter().map(FormRow::from).collect();
            format.print(&forms, &rows);
        }
        FormCommands::Create { file } => {
            let content = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let definition: FormDefinition = serde_json::from_str(&content)
                .with_context(|| format!("parsing {}", file.display()))?;
            let created = api.create_form(&CreateFormRequest::from(&definition)).await?;
            success(&format!("form {} created: {}", created.id, created.title));
        }
        FormCommands::Activate { id } => {
            api.set_form_active(id, true).await?;
            success(&format!("form {} now accepts responses", id));
        }
        FormCommands::Deactivate { id } => {
            api.set_form_active(id, false).await?;
            success(&format!("form {} no longer accepts responses", id));
        }
        FormCommands::Delete { id } => {
            api.delete_form(id).await?;
            success(&format!("form {} deleted", id));
        }
        FormCommands::Duplicate { id } => {
            let copy = api.duplicate_form(id).await?;
            success(&format!("form {} duplicated as {} ({})", id, copy.id, copy.title));
        }
        FormCommands::Responses { id } => {
            let responses = api.list_responses(id).await?;
            let rows: Vec<ResponseRow> = responses.iter().map(ResponseRow::from).collect();
            format.print(&responses, &rows);
        }
        FormCommands::Export { id, format: arg, out } => {
            export(api, id, arg, out).await?;
        }
    }
    Ok(())
}

async fn export(
    api: &HttpFormsApi,
    id: u64,
    arg: ExportArg,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let (bytes, extension) = match arg {
        ExportArg::Excel => (
            api.export_responses(id, ExportFormat::Excel).await?,
            ExportFormat::Excel.file_extension(),
        ),
        ExportArg::Pdf => (
            api.export_responses(id, ExportFormat::Pdf).await?,
            ExportFormat::Pdf.file_extension(),
        ),
        ExportArg::Csv => {
            // Local shaping: field labels as headers, one row per response.
            let forms = api.list_managed_forms().await?;
            let form = forms
                .into_iter()
                .find(|form| form.id == id)
                .with_context(|| format!("form {} not found", id))?;
            let responses = api.list_responses(id).await?;
            let records: Vec<_> = responses.iter().map(FormResponse::record).collect();
            let table = response_table(&form.definition(), &records);
            (table.to_csv().into_bytes(), "csv")
        }
    };

    let path = out.unwrap_or_else(|| PathBuf::from(format!("form_responses_{}.{}", id, extension)));
    fs::write(&path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    success(&format!("exported to {}", path.display()));
    Ok(())
}
