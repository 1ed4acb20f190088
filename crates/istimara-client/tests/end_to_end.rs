//! End-to-end flow: build a form, persist it, fill it in a collector
//! session, submit, and tabulate the stored responses.

use istimara_client::{CreateFormRequest, FormsApi, InMemoryFormsApi};
use istimara_forms::{
    response_table, BuilderError, FieldType, FormBuilder, FormSession, Submitter,
};

fn build_sample() -> FormBuilder {
    let mut builder = FormBuilder::new();
    builder.set_title("Visitor survey");

    builder.begin_field(FieldType::Text);
    builder.set_draft_label("Full Name").unwrap();
    builder.set_draft_required(true).unwrap();
    builder.apply_field().unwrap();

    builder.begin_field(FieldType::Checkbox);
    builder.set_draft_label("Interests").unwrap();
    builder
        .set_draft_options(vec!["Sports".into(), "Reading".into()])
        .unwrap();
    builder.apply_field().unwrap();

    builder
}

#[tokio::test]
async fn save_precondition_failure_makes_no_call() {
    let api = InMemoryFormsApi::new();
    let mut builder = FormBuilder::new();
    builder.set_title("Visitor survey");

    // Zero fields: rejected before any transport is involved.
    assert!(matches!(builder.save(), Err(BuilderError::NoFields)));
    assert_eq!(api.form_count(), 0);
}

#[tokio::test]
async fn build_fill_submit_roundtrip() {
    let api = InMemoryFormsApi::new();
    let builder = build_sample();

    // Exactly one save call for a valid form.
    let form = builder.save().unwrap();
    let saved = api.create_form(&CreateFormRequest::from(form)).await.unwrap();
    assert_eq!(api.form_count(), 1);

    // A respondent loads the published form and fills it.
    let published = api.list_public_forms().await.unwrap().remove(0);
    let mut session = FormSession::new(published.definition());

    let fields = session.form().fields.clone();
    let name_id = fields[0].id.as_str().to_string();
    let interests_id = fields[1].id.as_str().to_string();

    // Required field still empty: validation fails naming its label.
    let err = session.validate().unwrap_err();
    assert!(err.to_string().contains("Full Name"));

    session.set_value(&name_id, "Ali").unwrap();
    session.toggle_option(&interests_id, "Sports").unwrap();
    session.validate().unwrap();

    let submission = session.submission(saved.id, &Submitter::new("Ali", "ali@example.com"));
    assert_eq!(submission.response_data[&name_id], "Ali");
    assert_eq!(
        submission.response_data[&interests_id],
        serde_json::json!(["Sports"])
    );
    api.submit_response(&submission).await.unwrap();

    // The refreshed listing reflects the stored response.
    let refreshed = api.list_managed_forms().await.unwrap().remove(0);
    assert_eq!(refreshed.responses_count, 1);

    // Tabulate for export.
    let responses = api.list_responses(saved.id).await.unwrap();
    let records: Vec<_> = responses.iter().map(|r| r.record()).collect();
    let table = response_table(session.form(), &records);
    assert_eq!(table.headers[3], "Full Name");
    assert_eq!(table.rows[0][3], "Ali");
    assert_eq!(table.rows[0][4], "Sports");
}
