//! Citizen feedback collector
//!
//! Four-step intake for complaints, suggestions, inquiries, compliments and
//! reports. The personal-information block is only required for named
//! submissions; the anonymous toggle relaxes it and the payload is scrubbed
//! accordingly before transport.

use serde::{Deserialize, Serialize};

use super::IntakeError;
use crate::domain::{Email, Phone};
use crate::session::Submitter;
use crate::wizard::Wizard;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackType {
    Complaint,
    Suggestion,
    Inquiry,
    Compliment,
    Report,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Primary,
    Intermediate,
    Secondary,
    Diploma,
    Bachelor,
    Master,
    Phd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Phone,
    Sms,
    Mail,
}

/// Processing state assigned by reviewers, surfaced in admin listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    InProgress,
    Resolved,
    Closed,
}

/// The feedback form as the citizen edits it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CitizenFeedback {
    // The message
    pub feedback_type: Option<FeedbackType>,
    pub priority: Option<Priority>,
    pub related_entity: String,
    pub subject: String,
    pub description: String,
    pub is_anonymous: bool,

    // Personal information (relaxed when anonymous)
    pub full_name: String,
    pub national_id: String,
    pub phone_number: String,
    pub email: String,
    pub governorate: String,
    pub city: String,
    pub address: String,
    pub age: Option<u32>,
    pub gender: Option<Gender>,
    pub education_level: Option<EducationLevel>,
    pub occupation: String,

    // Follow-up
    pub preferred_contact_method: Option<ContactMethod>,
    pub previous_attempts: bool,
    pub previous_attempts_description: String,

    // Consents
    pub consent_data_processing: bool,
    pub consent_contact: bool,
}

impl CitizenFeedback {
    pub const STEPS: u32 = 4;

    pub fn wizard() -> Wizard {
        Wizard::new(Self::STEPS)
    }

    pub fn step_title(step: u32) -> &'static str {
        match step {
            1 => "Your message",
            2 => "Personal information",
            3 => "Follow-up",
            4 => "Consent and review",
            _ => "Review",
        }
    }

    /// Validate the whole form at submission time.
    pub fn validate(&self) -> Result<(), IntakeError> {
        if self.feedback_type.is_none() {
            return Err(IntakeError::Missing("message type"));
        }
        if self.priority.is_none() {
            return Err(IntakeError::Missing("priority"));
        }
        require(&self.related_entity, "related entity")?;
        require(&self.subject, "subject")?;
        require(&self.description, "description")?;

        if !self.is_anonymous {
            require(&self.full_name, "full name")?;
            require(&self.phone_number, "phone number")?;
            Phone::parse(&self.phone_number).map_err(|e| IntakeError::Invalid {
                field: "phone number",
                reason: e.to_string(),
            })?;
            require(&self.email, "email")?;
            Email::new(&self.email).map_err(|e| IntakeError::Invalid {
                field: "email",
                reason: e.to_string(),
            })?;
            require(&self.governorate, "governorate")?;
            require(&self.city, "city")?;
            require(&self.address, "address")?;
            if self.age.is_none() {
                return Err(IntakeError::Missing("age"));
            }
            if self.gender.is_none() {
                return Err(IntakeError::Missing("gender"));
            }
            if self.education_level.is_none() {
                return Err(IntakeError::Missing("education level"));
            }
            require(&self.occupation, "occupation")?;
        }

        // Declaring previous attempts makes their description mandatory.
        if self.previous_attempts {
            require(
                &self.previous_attempts_description,
                "previous attempts description",
            )?;
        }

        if !self.consent_data_processing {
            return Err(IntakeError::ConsentRequired);
        }

        Ok(())
    }

    /// Validated wire payload. Anonymous submissions are scrubbed: the name
    /// becomes the anonymous marker and all identifying fields are blanked.
    pub fn payload(&self) -> Result<FeedbackPayload, IntakeError> {
        self.validate()?;
        let feedback_type = self
            .feedback_type
            .ok_or(IntakeError::Missing("message type"))?;
        let priority = self.priority.ok_or(IntakeError::Missing("priority"))?;

        let (name, national_id, phone, email, address) = if self.is_anonymous {
            (
                Submitter::ANONYMOUS.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            )
        } else {
            (
                self.full_name.clone(),
                self.national_id.clone(),
                self.phone_number.clone(),
                self.email.clone(),
                self.address.clone(),
            )
        };

        Ok(FeedbackPayload {
            feedback_type,
            title: self.subject.clone(),
            description: self.description.clone(),
            related_entity: self.related_entity.clone(),
            priority,
            citizen_name: name,
            citizen_id: national_id,
            citizen_phone: phone,
            citizen_email: email,
            citizen_address: address,
            governorate: self.governorate.clone(),
            city: self.city.clone(),
            age: self.age,
            gender: self.gender,
            education_level: self.education_level,
            occupation: self.occupation.clone(),
            preferred_contact_method: self.preferred_contact_method,
            previous_attempts: self.previous_attempts,
            previous_attempts_description: self.previous_attempts_description.clone(),
            consent_data_processing: self.consent_data_processing,
            consent_contact: self.consent_contact,
            is_anonymous: self.is_anonymous,
        })
    }
}

/// Wire payload with the registry's field names (`citizen_*`, `title`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    pub feedback_type: FeedbackType,
    pub title: String,
    pub description: String,
    pub related_entity: String,
    pub priority: Priority,
    pub citizen_name: String,
    pub citizen_id: String,
    pub citizen_phone: String,
    pub citizen_email: String,
    pub citizen_address: String,
    pub governorate: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education_level: Option<EducationLevel>,
    pub occupation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_contact_method: Option<ContactMethod>,
    pub previous_attempts: bool,
    pub previous_attempts_description: String,
    pub consent_data_processing: bool,
    pub consent_contact: bool,
    pub is_anonymous: bool,
}

fn require(value: &str, field: &'static str) -> Result<(), IntakeError> {
    if value.trim().is_empty() {
        Err(IntakeError::Missing(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named() -> CitizenFeedback {
        CitizenFeedback {
            feedback_type: Some(FeedbackType::Complaint),
            priority: Some(Priority::High),
            related_entity: "Directorate of Water".into(),
            subject: "Water outage".into(),
            description: "No water for three days".into(),
            is_anonymous: false,
            full_name: "Ali Kareem".into(),
            national_id: "199012345678".into(),
            phone_number: "07712345678".into(),
            email: "ali@example.com".into(),
            governorate: "Baghdad".into(),
            city: "Karrada".into(),
            address: "District 905".into(),
            age: Some(34),
            gender: Some(Gender::Male),
            education_level: Some(EducationLevel::Bachelor),
            occupation: "Teacher".into(),
            preferred_contact_method: Some(ContactMethod::Phone),
            previous_attempts: false,
            previous_attempts_description: String::new(),
            consent_data_processing: true,
            consent_contact: true,
        }
    }

    #[test]
    fn test_named_submission_validates() {
        assert!(named().validate().is_ok());
    }

    #[test]
    fn test_message_block_always_required() {
        let mut form = named();
        form.is_anonymous = true;
        form.subject.clear();
        assert_eq!(form.validate(), Err(IntakeError::Missing("subject")));
    }

    #[test]
    fn test_anonymous_relaxes_personal_block() {
        let mut form = named();
        form.is_anonymous = true;
        form.full_name.clear();
        form.phone_number.clear();
        form.email.clear();
        form.age = None;
        form.gender = None;
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_named_submission_requires_personal_block() {
        let mut form = named();
        form.full_name.clear();
        assert_eq!(form.validate(), Err(IntakeError::Missing("full name")));
    }

    #[test]
    fn test_previous_attempts_makes_description_required() {
        let mut form = named();
        form.previous_attempts = true;
        assert_eq!(
            form.validate(),
            Err(IntakeError::Missing("previous attempts description"))
        );
        form.previous_attempts_description = "Called the hotline twice".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_processing_consent_is_mandatory() {
        let mut form = named();
        form.consent_data_processing = false;
        assert_eq!(form.validate(), Err(IntakeError::ConsentRequired));
    }

    #[test]
    fn test_anonymous_payload_is_scrubbed() {
        let mut form = named();
        form.is_anonymous = true;
        let payload = form.payload().unwrap();
        assert_eq!(payload.citizen_name, Submitter::ANONYMOUS);
        assert!(payload.citizen_id.is_empty());
        assert!(payload.citizen_phone.is_empty());
        assert!(payload.citizen_email.is_empty());
        assert!(payload.citizen_address.is_empty());
        // The message itself is untouched.
        assert_eq!(payload.title, "Water outage");
    }

    #[test]
    fn test_payload_uses_backend_field_names() {
        let json = serde_json::to_value(named().payload().unwrap()).unwrap();
        assert_eq!(json["citizen_name"], "Ali Kareem");
        assert_eq!(json["title"], "Water outage");
        assert_eq!(json["feedback_type"], "complaint");
        assert_eq!(json["priority"], "high");
        assert_eq!(json["education_level"], "bachelor");
        assert!(json.get("subject").is_none());
        assert!(json.get("full_name").is_none());
    }

    #[test]
    fn test_wizard_has_four_steps() {
        assert_eq!(CitizenFeedback::wizard().total(), 4);
    }
}
