use super::schema::{FieldKind, FieldSpec, FormSection};
use super::Steps;
use crate::api::ApiClient;
use crate::error::{ApiError, AppError};
use crate::models::InvestorProfile;
use serde_json::Value;
use tracing::{info, warn};

pub const TOTAL_STEPS: u8 = 3;
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create profile";
pub const DEFAULT_VISIBILITY: &str = "Public";
pub const DEFAULT_CONTACT_PERMISSIONS: &str = "Open to all";

pub const STEP_TITLES: [&str; TOTAL_STEPS as usize] = [
    "About You",
    "Investment Preferences",
    "Track Record & Visibility",
];

pub const INVESTMENT_STAGES: &[&str] = &[
    "Pre-seed", "Seed", "Series A", "Series B", "Series C", "Series D+", "Growth", "Late Stage",
];

pub static PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("full_name", "Full Name", FieldKind::Text, 1).required(),
    FieldSpec::new("email", "Email", FieldKind::Text, 1).required(),
    FieldSpec::new("phone_number", "Phone Number", FieldKind::Text, 1),
    FieldSpec::new("country", "Country", FieldKind::Text, 1).required(),
    FieldSpec::new("state", "State", FieldKind::Text, 1).required(),
    FieldSpec::new("district", "District", FieldKind::Text, 1).required(),
    FieldSpec::new("linkedin_profile", "LinkedIn Profile", FieldKind::Text, 1).required(),
    FieldSpec::new("investor_type", "Investor Type", FieldKind::Text, 1)
        .required()
        .options(&[
            "Angel Investor",
            "Venture Capitalist",
            "Private Equity",
            "Corporate Investor",
            "Family Office",
            "Other",
        ]),
    FieldSpec::new("firm_name", "Firm Name", FieldKind::Text, 1),
    FieldSpec::new("investment_experience", "Investment Experience", FieldKind::Text, 2).required(),
    FieldSpec::new("years_of_investment_experience", "Years of Experience", FieldKind::Text, 2).required(),
    FieldSpec::new("professional_background", "Professional Background", FieldKind::MultiSelect, 2)
        .options(&[
            "Technology", "Finance", "Healthcare", "Education", "Consulting",
            "Entrepreneurship", "Marketing", "Sales", "Operations", "Legal",
        ]),
    FieldSpec::new("previous_experience", "Previous Experience", FieldKind::Text, 2),
    FieldSpec::new("investment_stages", "Investment Stages", FieldKind::MultiSelect, 2)
        .options(INVESTMENT_STAGES),
    FieldSpec::new("check_size_range", "Check Size Range", FieldKind::Text, 2).required(),
    FieldSpec::new("geographic_focus", "Geographic Focus", FieldKind::MultiSelect, 2)
        .options(&[
            "North America", "Europe", "Asia", "Latin America", "Africa", "Middle East", "Global",
        ]),
    FieldSpec::new("industry_focus", "Industry Focus", FieldKind::MultiSelect, 2)
        .options(&[
            "Technology", "Healthcare", "Finance", "Education", "E-commerce",
            "Manufacturing", "Real Estate", "Transportation", "Energy", "Other",
        ]),
    FieldSpec::new("investment_philosophy", "Investment Philosophy", FieldKind::Text, 2).required(),
    FieldSpec::new("decision_timeline", "Decision Timeline", FieldKind::Text, 2).required(),
    FieldSpec::new("number_of_portfolio_companies", "Portfolio Companies", FieldKind::Text, 3),
    FieldSpec::new("notable_investments", "Notable Investments", FieldKind::Text, 3),
    FieldSpec::new("successful_exits", "Successful Exits", FieldKind::Text, 3),
    FieldSpec::new("post_investment_involvement", "Post-investment Involvement", FieldKind::Text, 3).required(),
    FieldSpec::new("areas_of_expertise", "Areas of Expertise", FieldKind::MultiSelect, 3)
        .options(&[
            "Product Development", "Marketing", "Sales", "Operations", "Finance",
            "Legal", "HR", "Technology", "Strategy", "International Expansion",
        ]),
    FieldSpec::new("investment_thesis", "Investment Thesis", FieldKind::Text, 3),
    FieldSpec::new("additional_info", "Additional Info", FieldKind::Text, 3),
    FieldSpec::new("profile_visibility", "Profile Visibility", FieldKind::Text, 3)
        .required()
        .options(&["Public", "Private", "Verified startups only"]),
    FieldSpec::new("contact_permissions", "Contact Permissions", FieldKind::Text, 3)
        .required()
        .options(&["Open to all", "Warm intros only", "No contact"]),
];

/// Three-step investor profile form, submitted as one JSON body.
#[derive(Debug, Clone)]
pub struct InvestorWizard {
    steps: Steps,
    profile: FormSection,
}

impl Default for InvestorWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl InvestorWizard {
    pub fn new() -> Self {
        let mut profile = FormSection::new(PROFILE_FIELDS);
        profile.set("profile_visibility", DEFAULT_VISIBILITY);
        profile.set("contact_permissions", DEFAULT_CONTACT_PERMISSIONS);
        Self {
            steps: Steps::new(TOTAL_STEPS),
            profile,
        }
    }

    pub fn step(&self) -> u8 {
        self.steps.current()
    }

    pub fn total_steps(&self) -> u8 {
        self.steps.total()
    }

    pub fn step_title(&self) -> &'static str {
        STEP_TITLES[usize::from(self.step() - 1)]
    }

    pub fn next(&mut self) -> u8 {
        self.steps.next()
    }

    pub fn previous(&mut self) -> u8 {
        self.steps.previous()
    }

    pub fn is_final_step(&self) -> bool {
        self.steps.is_last()
    }

    pub fn fields_for_step(&self, step: u8) -> Vec<&'static FieldSpec> {
        PROFILE_FIELDS.iter().filter(|spec| spec.step == step).collect()
    }

    /// Sets a text field, or replaces a multi-select with a
    /// comma-separated list.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        if self.profile.set(name, value) {
            Ok(())
        } else {
            Err(AppError::UnknownField(name.to_string()))
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.profile.get(name)
    }

    pub fn selection(&self, name: &str) -> &[String] {
        self.profile.selection(name)
    }

    /// Checks or unchecks one option of a multi-select field.
    pub fn toggle(&mut self, name: &str, option: &str, checked: bool) -> Result<(), AppError> {
        if self.profile.toggle(name, option, checked) {
            Ok(())
        } else {
            Err(AppError::UnknownField(name.to_string()))
        }
    }

    pub fn missing_required(&self) -> Vec<&'static str> {
        self.profile.missing_required()
    }

    pub fn build_payload(&self) -> Value {
        Value::Object(self.profile.to_json())
    }

    pub async fn submit(&self, client: &ApiClient) -> Result<InvestorProfile, ApiError> {
        match client.create_investor_profile(&self.build_payload()).await {
            Ok(profile) => {
                info!(user_id = profile.user_id, "Investor profile created");
                Ok(profile)
            }
            Err(e) => {
                warn!("Investor profile creation failed: {}", e);
                Err(e)
            }
        }
    }
}
