//! Form Renderer / Answer Collector
//!
//! A [`FormSession`] binds one form definition to one respondent's answer
//! map for the duration of a fill-in session. It maps every field to a
//! control descriptor, routes writes back into the answer map, enforces
//! required-field completeness and produces the submission payload.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::domain::{FieldDefinition, FieldType, FormDefinition};

/// Value collected for one field: a scalar string for every type except
/// checkbox, which collects a set of selected option strings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    Scalar(String),
    Choices(BTreeSet<String>),
}

impl Answer {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(value) => value.is_empty(),
            Self::Choices(values) => values.is_empty(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Self::Scalar(value) => Value::String(value.clone()),
            Self::Choices(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// What control to render for a field and the state it is bound to.
///
/// Writes route back through [`FormSession::set_value`] for every scalar
/// control and through [`FormSession::toggle_option`] for checkbox groups.
#[derive(Clone, Debug, PartialEq)]
pub enum Control<'a> {
    TextInput {
        value: &'a str,
        placeholder: Option<&'a str>,
    },
    EmailInput {
        value: &'a str,
        placeholder: Option<&'a str>,
    },
    PhoneInput {
        value: &'a str,
        placeholder: Option<&'a str>,
    },
    NumberInput {
        value: &'a str,
        placeholder: Option<&'a str>,
    },
    DateInput {
        value: &'a str,
    },
    TextArea {
        value: &'a str,
        placeholder: Option<&'a str>,
    },
    SelectMenu {
        options: &'a [String],
        selected: &'a str,
    },
    RadioGroup {
        options: &'a [String],
        selected: &'a str,
    },
    CheckboxGroup {
        options: &'a [String],
        selected: &'a BTreeSet<String>,
    },
}

/// Who is submitting the answers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Submitter {
    pub name: String,
    pub email: String,
}

impl Submitter {
    pub const ANONYMOUS: &'static str = "Anonymous";

    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Self::ANONYMOUS, "")
    }
}

/// Submission payload handed to the transport layer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ResponseSubmission {
    pub form_id: u64,
    pub response_data: Map<String, Value>,
    pub submitter_name: String,
    pub submitter_email: String,
}

/// One respondent's in-progress answers for one form.
#[derive(Clone, Debug)]
pub struct FormSession {
    form: FormDefinition,
    answers: HashMap<String, Answer>,
}

impl FormSession {
    /// Start a session, seeding every field with an empty answer of the
    /// right shape. Runs once per fill-in session.
    pub fn new(form: FormDefinition) -> Self {
        let answers = form
            .fields
            .iter()
            .map(|field| {
                let empty = if field.field_type.collects_many() {
                    Answer::Choices(BTreeSet::new())
                } else {
                    Answer::Scalar(String::new())
                };
                (field.id.as_str().to_string(), empty)
            })
            .collect();
        Self { form, answers }
    }

    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    pub fn answer(&self, field_id: &str) -> Option<&Answer> {
        self.answers.get(field_id)
    }

    /// Map a field to its control descriptor. Exhaustive over [`FieldType`]
    /// so a new field type cannot ship without a rendering rule.
    pub fn control<'a>(&'a self, field: &'a FieldDefinition) -> Result<Control<'a>, SessionError> {
        let answer = self
            .answers
            .get(field.id.as_str())
            .ok_or_else(|| SessionError::UnknownField(field.id.as_str().to_string()))?;
        let placeholder = field.placeholder.as_deref();

        let scalar = |answer: &'a Answer| -> &'a str {
            match answer {
                Answer::Scalar(value) => value.as_str(),
                Answer::Choices(_) => "",
            }
        };

        Ok(match field.field_type {
            FieldType::Text => Control::TextInput {
                value: scalar(answer),
                placeholder,
            },
            FieldType::Email => Control::EmailInput {
                value: scalar(answer),
                placeholder,
            },
            FieldType::Phone => Control::PhoneInput {
                value: scalar(answer),
                placeholder,
            },
            FieldType::Number => Control::NumberInput {
                value: scalar(answer),
                placeholder,
            },
            FieldType::Date => Control::DateInput {
                value: scalar(answer),
            },
            FieldType::Textarea => Control::TextArea {
                value: scalar(answer),
                placeholder,
            },
            FieldType::Select => Control::SelectMenu {
                options: field.options(),
                selected: scalar(answer),
            },
            FieldType::Radio => Control::RadioGroup {
                options: field.options(),
                selected: scalar(answer),
            },
            FieldType::Checkbox => match answer {
                Answer::Choices(selected) => Control::CheckboxGroup {
                    options: field.options(),
                    selected,
                },
                Answer::Scalar(_) => {
                    return Err(SessionError::NotACheckbox(field.label.clone()))
                }
            },
        })
    }

    /// Replace the scalar value of a non-checkbox field.
    pub fn set_value(
        &mut self,
        field_id: &str,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let label = self.field_label(field_id);
        match self.answers.get_mut(field_id) {
            Some(Answer::Scalar(current)) => {
                *current = value.into();
                Ok(())
            }
            Some(Answer::Choices(_)) => Err(SessionError::NotAScalar(label)),
            None => Err(SessionError::UnknownField(field_id.to_string())),
        }
    }

    /// Toggle one option's membership on a checkbox field: added when
    /// absent, removed when present, so toggling twice is the identity.
    pub fn toggle_option(
        &mut self,
        field_id: &str,
        option: impl Into<String>,
    ) -> Result<(), SessionError> {
        let label = self.field_label(field_id);
        match self.answers.get_mut(field_id) {
            Some(Answer::Choices(selected)) => {
                let option = option.into();
                if !selected.remove(&option) {
                    selected.insert(option);
                }
                Ok(())
            }
            Some(Answer::Scalar(_)) => Err(SessionError::NotACheckbox(label)),
            None => Err(SessionError::UnknownField(field_id.to_string())),
        }
    }

    /// Enforce required-field completeness, failing fast on the first
    /// incomplete field in display order.
    pub fn validate(&self) -> Result<(), SessionError> {
        for field in &self.form.fields {
            if !field.required {
                continue;
            }
            let missing = self
                .answers
                .get(field.id.as_str())
                .map(Answer::is_empty)
                .unwrap_or(true);
            if missing {
                return Err(SessionError::RequiredField {
                    label: field.label.clone(),
                });
            }
        }
        Ok(())
    }

    /// Package the collected answers for transport. Callers validate first;
    /// scalars become JSON strings and checkbox sets become JSON arrays.
    pub fn submission(&self, form_id: u64, submitter: &Submitter) -> ResponseSubmission {
        let response_data: Map<String, Value> = self
            .form
            .fields
            .iter()
            .filter_map(|field| {
                self.answers
                    .get(field.id.as_str())
                    .map(|answer| (field.id.as_str().to_string(), answer.to_json()))
            })
            .collect();
        debug!(form_id, fields = response_data.len(), "submission packaged");
        ResponseSubmission {
            form_id,
            response_data,
            submitter_name: submitter.name.clone(),
            submitter_email: submitter.email.clone(),
        }
    }

    fn field_label(&self, field_id: &str) -> String {
        self.form
            .fields
            .iter()
            .find(|field| field.id.as_str() == field_id)
            .map(|field| field.label.clone())
            .unwrap_or_else(|| field_id.to_string())
    }
}

/// Collector-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// A required field has no answer yet.
    #[error("field \"{label}\" is required")]
    RequiredField { label: String },

    /// The field id does not belong to this form.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Scalar write attempted on a checkbox field.
    #[error("field \"{0}\" collects multiple values")]
    NotAScalar(String),

    /// Toggle attempted on a non-checkbox field.
    #[error("field \"{0}\" does not collect multiple values")]
    NotACheckbox(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FieldCandidate, FormDefinition};

    fn sample_form() -> (FormDefinition, String, String) {
        let mut form = FormDefinition::new("Visitor survey");

        let mut name = FieldCandidate::new(FieldType::Text);
        name.label = "Full Name".into();
        name.required = true;
        name.placeholder = Some("Your name".into());
        let name_id = form.add_field(&name).unwrap();

        let mut interests = FieldCandidate::new(FieldType::Checkbox);
        interests.label = "Interests".into();
        interests.options = vec!["Sports".into(), "Reading".into()];
        let interests_id = form.add_field(&interests).unwrap();

        (
            form,
            name_id.as_str().to_string(),
            interests_id.as_str().to_string(),
        )
    }

    #[test]
    fn test_initialize_answers() {
        let (form, name_id, interests_id) = sample_form();
        let session = FormSession::new(form);
        assert_eq!(
            session.answer(&name_id),
            Some(&Answer::Scalar(String::new()))
        );
        assert_eq!(
            session.answer(&interests_id),
            Some(&Answer::Choices(BTreeSet::new()))
        );
    }

    #[test]
    fn test_control_mapping() {
        let (form, _, _) = sample_form();
        let session = FormSession::new(form);
        let fields = &session.form().fields;

        match session.control(&fields[0]).unwrap() {
            Control::TextInput { value, placeholder } => {
                assert_eq!(value, "");
                assert_eq!(placeholder, Some("Your name"));
            }
            other => panic!("expected text input, got {:?}", other),
        }

        match session.control(&fields[1]).unwrap() {
            Control::CheckboxGroup { options, selected } => {
                assert_eq!(options, ["Sports", "Reading"]);
                assert!(selected.is_empty());
            }
            other => panic!("expected checkbox group, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_write_replaces() {
        let (form, name_id, _) = sample_form();
        let mut session = FormSession::new(form);
        session.set_value(&name_id, "Ali").unwrap();
        session.set_value(&name_id, "Sara").unwrap();
        assert_eq!(session.answer(&name_id), Some(&Answer::Scalar("Sara".into())));
    }

    #[test]
    fn test_checkbox_toggle_is_idempotent_pairwise() {
        let (form, _, interests_id) = sample_form();
        let mut session = FormSession::new(form);

        session.toggle_option(&interests_id, "Sports").unwrap();
        assert!(!session.answer(&interests_id).unwrap().is_empty());

        // Toggling the same option again restores the original state.
        session.toggle_option(&interests_id, "Sports").unwrap();
        assert_eq!(
            session.answer(&interests_id),
            Some(&Answer::Choices(BTreeSet::new()))
        );
    }

    #[test]
    fn test_write_shape_mismatch() {
        let (form, name_id, interests_id) = sample_form();
        let mut session = FormSession::new(form);
        assert!(matches!(
            session.set_value(&interests_id, "Sports"),
            Err(SessionError::NotAScalar(_))
        ));
        assert!(matches!(
            session.toggle_option(&name_id, "x"),
            Err(SessionError::NotACheckbox(_))
        ));
    }

    #[test]
    fn test_validate_names_failing_label() {
        let (form, name_id, _) = sample_form();
        let mut session = FormSession::new(form);
        let err = session.validate().unwrap_err();
        assert_eq!(
            err,
            SessionError::RequiredField {
                label: "Full Name".into()
            }
        );

        session.set_value(&name_id, "Ali").unwrap();
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_required_checkbox_needs_nonempty_set() {
        let mut form = FormDefinition::new("Survey");
        let mut field = FieldCandidate::new(FieldType::Checkbox);
        field.label = "Topics".into();
        field.required = true;
        field.options = vec!["a".into(), "b".into()];
        let id = form.add_field(&field).unwrap();

        let mut session = FormSession::new(form);
        assert!(session.validate().is_err());
        session.toggle_option(id.as_str(), "a").unwrap();
        assert!(session.validate().is_ok());
    }

    #[test]
    fn test_submission_payload() {
        let (form, name_id, interests_id) = sample_form();
        let mut session = FormSession::new(form);
        session.set_value(&name_id, "Ali").unwrap();
        session.toggle_option(&interests_id, "Sports").unwrap();
        session.validate().unwrap();

        let submission = session.submission(7, &Submitter::new("Ali", "ali@example.gov"));
        assert_eq!(submission.form_id, 7);
        assert_eq!(submission.submitter_name, "Ali");
        assert_eq!(submission.response_data[&name_id], "Ali");
        assert_eq!(
            submission.response_data[&interests_id],
            serde_json::json!(["Sports"])
        );
    }
}
