//! Government-entity registration collector
//!
//! Seven-step intake for registering a government entity with the registry:
//! basic identity, contact details, management, operations, systems and
//! quality, projects and partnerships, and an assessment block.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::IntakeError;
use crate::domain::{Email, Phone};
use crate::wizard::Wizard;

/// Legal form of the registering entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Ministry,
    Authority,
    Commission,
    Department,
    Directorate,
    Municipality,
    Governorate,
    Other,
}

/// Governorates the registry covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Governorate {
    Baghdad,
    Basra,
    Nineveh,
    Erbil,
    Najaf,
    Karbala,
    Wasit,
    Maysan,
    Babylon,
    DhiQar,
    Anbar,
    Diyala,
    Kirkuk,
    SalahAlDin,
    Sulaymaniyah,
    Duhok,
    Muthanna,
    Qadisiyyah,
}

/// The full registration form. Optional selects stay `None` until chosen so
/// validation can tell "never answered" from a real value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityRegistration {
    // Basic identity
    pub entity_name: String,
    pub entity_type: Option<EntityType>,
    pub governorate: Option<Governorate>,
    pub address: String,

    // Contact
    pub phone_number: String,
    pub email: String,
    pub website: Option<String>,

    // Management
    pub manager_name: String,
    pub manager_position: String,
    pub manager_phone: String,
    pub manager_email: String,

    // Operations
    pub establishment_date: Option<NaiveDate>,
    pub employee_count: Option<u32>,
    pub annual_budget: Option<Decimal>,
    pub services_provided: String,
    pub target_audience: String,

    // Systems and transparency
    pub has_electronic_system: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_description: Option<String>,
    pub publishes_reports: bool,
    pub has_complaints_system: bool,

    // Quality
    pub has_quality_certificate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_certificate_type: Option<String>,

    // Projects and partnerships
    pub current_projects: String,
    pub future_plans: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partnerships: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub international_cooperation: Option<String>,

    // Assessment
    pub performance_indicators: String,
    pub challenges: String,
    pub needs: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

impl EntityRegistration {
    pub const STEPS: u32 = 7;

    pub fn wizard() -> Wizard {
        Wizard::new(Self::STEPS)
    }

    pub fn step_title(step: u32) -> &'static str {
        match step {
            1 => "Basic information",
            2 => "Contact details",
            3 => "Management",
            4 => "Operations",
            5 => "Systems and quality",
            6 => "Projects and partnerships",
            7 => "Assessment and needs",
            _ => "Review",
        }
    }

    /// Validate the whole form. Runs only at submission; step navigation is
    /// unguarded.
    pub fn validate(&self) -> Result<(), IntakeError> {
        require(&self.entity_name, "entity name")?;
        if self.entity_type.is_none() {
            return Err(IntakeError::Missing("entity type"));
        }
        if self.governorate.is_none() {
            return Err(IntakeError::Missing("governorate"));
        }
        require(&self.address, "address")?;

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

        require(&self.manager_name, "manager name")?;
        require(&self.manager_position, "manager position")?;
        require(&self.manager_phone, "manager phone")?;
        Phone::parse(&self.manager_phone).map_err(|e| IntakeError::Invalid {
            field: "manager phone",
            reason: e.to_string(),
        })?;
        require(&self.manager_email, "manager email")?;
        Email::new(&self.manager_email).map_err(|e| IntakeError::Invalid {
            field: "manager email",
            reason: e.to_string(),
        })?;

        if self.establishment_date.is_none() {
            return Err(IntakeError::Missing("establishment date"));
        }
        if self.employee_count.is_none() {
            return Err(IntakeError::Missing("employee count"));
        }
        if self.annual_budget.is_none() {
            return Err(IntakeError::Missing("annual budget"));
        }
        require(&self.services_provided, "services provided")?;
        require(&self.target_audience, "target audience")?;

        // Boolean-gated requiredness: the description blocks only become
        // required once their toggle is on.
        if self.has_electronic_system {
            require_opt(&self.system_description, "system description")?;
        }
        if self.has_quality_certificate {
            require_opt(&self.quality_certificate_type, "quality certificate type")?;
        }

        require(&self.current_projects, "current projects")?;
        require(&self.future_plans, "future plans")?;
        require(&self.performance_indicators, "performance indicators")?;
        require(&self.challenges, "challenges")?;
        require(&self.needs, "needs")?;

        Ok(())
    }

    /// Produce the wire payload: validated, with the website normalized to
    /// an absolute https URL (or absent when blank).
    pub fn payload(&self) -> Result<EntityRegistration, IntakeError> {
        self.validate()?;
        let mut payload = self.clone();
        payload.website = normalize_website(self.website.as_deref());
        Ok(payload)
    }
}

fn require(value: &str, field: &'static str) -> Result<(), IntakeError> {
    if value.trim().is_empty() {
        Err(IntakeError::Missing(field))
    } else {
        Ok(())
    }
}

fn require_opt(value: &Option<String>, field: &'static str) -> Result<(), IntakeError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(IntakeError::Missing(field)),
    }
}

/// Blank websites become absent; bare domains get an https prefix.
fn normalize_website(website: Option<&str>) -> Option<String> {
    let trimmed = website?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{}", trimmed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> EntityRegistration {
        EntityRegistration {
            entity_name: "Directorate of Water".into(),
            entity_type: Some(EntityType::Directorate),
            governorate: Some(Governorate::Baghdad),
            address: "Karrada, Baghdad".into(),
            phone_number: "+9647712345678".into(),
            email: "info@water.gov.iq".into(),
            website: Some("water.gov.iq".into()),
            manager_name: "Ahmed Hassan".into(),
            manager_position: "Director General".into(),
            manager_phone: "07712345678".into(),
            manager_email: "dg@water.gov.iq".into(),
            establishment_date: NaiveDate::from_ymd_opt(1988, 4, 2),
            employee_count: Some(1200),
            annual_budget: Some(Decimal::new(5_000_000_000, 0)),
            services_provided: "Water distribution".into(),
            target_audience: "Residents of Baghdad".into(),
            has_electronic_system: false,
            system_description: None,
            publishes_reports: true,
            has_complaints_system: true,
            has_quality_certificate: false,
            quality_certificate_type: None,
            current_projects: "Network renewal".into(),
            future_plans: "Smart metering".into(),
            partnerships: None,
            international_cooperation: None,
            performance_indicators: "Coverage ratio".into(),
            challenges: "Aging network".into(),
            needs: "Funding".into(),
            additional_notes: None,
        }
    }

    #[test]
    fn test_complete_form_validates() {
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_missing_entity_name() {
        let mut form = complete();
        form.entity_name.clear();
        assert_eq!(form.validate(), Err(IntakeError::Missing("entity name")));
    }

    #[test]
    fn test_invalid_email_reported_with_field() {
        let mut form = complete();
        form.email = "not-an-email".into();
        assert!(matches!(
            form.validate(),
            Err(IntakeError::Invalid { field: "email", .. })
        ));
    }

    #[test]
    fn test_system_description_gated_by_flag() {
        let mut form = complete();
        form.has_electronic_system = true;
        assert_eq!(
            form.validate(),
            Err(IntakeError::Missing("system description"))
        );
        form.system_description = Some("In-house ERP".into());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_certificate_type_gated_by_flag() {
        let mut form = complete();
        form.has_quality_certificate = true;
        form.quality_certificate_type = Some(" ".into());
        assert_eq!(
            form.validate(),
            Err(IntakeError::Missing("quality certificate type"))
        );
    }

    #[test]
    fn test_website_normalization() {
        let payload = complete().payload().unwrap();
        assert_eq!(payload.website.as_deref(), Some("https://water.gov.iq"));

        let mut form = complete();
        form.website = Some("http://water.gov.iq".into());
        assert_eq!(
            form.payload().unwrap().website.as_deref(),
            Some("http://water.gov.iq")
        );

        form.website = Some("   ".into());
        assert_eq!(form.payload().unwrap().website, None);
    }

    #[test]
    fn test_payload_serialization_uses_backend_names() {
        let json = serde_json::to_value(complete().payload().unwrap()).unwrap();
        assert_eq!(json["entity_type"], "directorate");
        assert_eq!(json["governorate"], "baghdad");
        assert_eq!(json["establishment_date"], "1988-04-02");
        assert_eq!(json["has_complaints_system"], true);
    }

    #[test]
    fn test_wizard_has_seven_steps() {
        let wizard = EntityRegistration::wizard();
        assert_eq!(wizard.total(), 7);
        assert_eq!(EntityRegistration::step_title(1), "Basic information");
    }
}
