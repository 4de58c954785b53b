use super::schema::{FieldKind, FieldSpec, Fallback, FormSection};
use super::Steps;
use crate::api::ApiClient;
use crate::error::{ApiError, AppError};
use crate::models::{Attachment, StartupProfile};
use serde_json::{Map, Value};
use tracing::{info, warn};

pub const TOTAL_STEPS: u8 = 5;
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create profile";

pub const STEP_TITLES: [&str; TOTAL_STEPS as usize] = [
    "Basic Information",
    "Business Model",
    "Funding Information",
    "Founders & Revenue Metrics",
    "Fund Usage & Pitch Deck",
];

const INT_OR_ZERO: FieldKind = FieldKind::Integer(Fallback::Zero);
const INT_OR_NULL: FieldKind = FieldKind::Integer(Fallback::Null);
const FLOAT_OR_ZERO: FieldKind = FieldKind::Float(Fallback::Zero);
const FLOAT_OR_NULL: FieldKind = FieldKind::Float(Fallback::Null);

pub static PROFILE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("company_name", "Company Name", FieldKind::Text, 1).required(),
    FieldSpec::new("website_link", "Website", FieldKind::Text, 1),
    FieldSpec::new("industry", "Industry", FieldKind::Text, 1).required(),
    FieldSpec::new("company_description", "Company Description", FieldKind::Text, 1).required(),
    FieldSpec::new("founding_date", "Founding Date (YYYY-MM-DD)", FieldKind::Date, 1).required(),
    FieldSpec::new("team_size", "Team Size", INT_OR_ZERO, 1).required(),
    FieldSpec::new("district", "District", FieldKind::Text, 1).required(),
    FieldSpec::new("state", "State", FieldKind::Text, 1).required(),
    FieldSpec::new("social_media_1", "Social Media Link 1", FieldKind::Text, 1),
    FieldSpec::new("social_media_2", "Social Media Link 2", FieldKind::Text, 1),
    FieldSpec::new("business_model_description", "Business Model", FieldKind::Text, 2).required(),
    FieldSpec::new("total_paying_customers", "Total Paying Customers", INT_OR_ZERO, 2).required(),
    FieldSpec::new("monthly_customer_growth_rate", "Monthly Customer Growth Rate (%)", FLOAT_OR_NULL, 2),
    FieldSpec::new("customer_acquisition_cost", "Customer Acquisition Cost", FLOAT_OR_NULL, 2),
    FieldSpec::new("customer_lifetime_value", "Customer Lifetime Value", FLOAT_OR_NULL, 2),
    FieldSpec::new("competitive_advantage", "Competitive Advantage", FieldKind::Text, 2).required(),
    FieldSpec::new("product_demo_video_link", "Product Demo Video", FieldKind::Text, 2).required(),
    FieldSpec::new("pre_money_valuation", "Pre-money Valuation", INT_OR_ZERO, 3).required(),
    FieldSpec::new("amount_seeking", "Amount Seeking", INT_OR_ZERO, 3).required(),
    FieldSpec::new("investment_type", "Investment Type", FieldKind::Text, 3)
        .required()
        .options(&["Equity", "Convertible Note", "SAFE", "Debt", "Other"]),
    FieldSpec::new("max_equity_percentage", "Max Equity Offered (%)", FLOAT_OR_ZERO, 3).required(),
    FieldSpec::new("funding_stage", "Funding Stage", FieldKind::Text, 3)
        .required()
        .options(&["Pre-seed", "Seed", "Series A", "Series B", "Series C", "Series D+"]),
    FieldSpec::new("total_funding_raised", "Total Funding Raised", INT_OR_ZERO, 3).required(),
    FieldSpec::new("last_round_amount", "Last Round Amount", INT_OR_ZERO, 3).required(),
    FieldSpec::new("last_round_date", "Last Round Date (YYYY-MM-DD)", FieldKind::Date, 3).required(),
    FieldSpec::new("key_previous_investors", "Key Previous Investors", FieldKind::Text, 3).required(),
];

pub static FOUNDER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Founder Name", FieldKind::Text, 4).required(),
    FieldSpec::new("educational_qualification", "Education", FieldKind::Text, 4),
    FieldSpec::new("previous_work_experience", "Previous Work Experience", FieldKind::Text, 4),
    FieldSpec::new("linkedin_profile", "LinkedIn Profile", FieldKind::Text, 4),
    FieldSpec::new("photo_url", "Photo URL", FieldKind::Text, 4),
];

pub static REVENUE_METRICS_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("monthly_recurring_revenue", "Monthly Recurring Revenue", INT_OR_ZERO, 4),
    FieldSpec::new("annual_recurring_revenue", "Annual Recurring Revenue", INT_OR_ZERO, 4),
    FieldSpec::new("revenue_growth_rate", "Revenue Growth Rate (%)", FLOAT_OR_NULL, 4),
    FieldSpec::new("monthly_burn_rate", "Monthly Burn Rate", INT_OR_NULL, 4),
    FieldSpec::new("current_cash_runway", "Cash Runway (months)", INT_OR_NULL, 4),
    FieldSpec::new("projected_revenue_12_months", "Projected Revenue (12 months)", INT_OR_NULL, 4),
    FieldSpec::new("profitability_timeline", "Profitability Timeline", FieldKind::Text, 4),
    FieldSpec::new("investment_timeline", "Investment Timeline", FieldKind::Text, 4),
];

pub static FUND_USAGE_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("product_development_percentage", "Product Development (%)", FLOAT_OR_ZERO, 5),
    FieldSpec::new("marketing_percentage", "Marketing (%)", FLOAT_OR_ZERO, 5),
    FieldSpec::new("team_expansion_percentage", "Team Expansion (%)", FLOAT_OR_ZERO, 5),
    FieldSpec::new("operations_percentage", "Operations (%)", FLOAT_OR_ZERO, 5),
];

pub const REVENUE_METRICS: &str = "revenue_metrics";
pub const FUND_USAGE: &str = "fund_usage";
pub const FOUNDERS: &str = "founders";

/// Five-step startup profile form.
///
/// Field names are flat (`team_size`), dotted into a nested section
/// (`revenue_metrics.monthly_burn_rate`), or indexed into the founders list
/// (`founders.0.name`).
#[derive(Debug, Clone)]
pub struct StartupWizard {
    steps: Steps,
    profile: FormSection,
    founders: Vec<FormSection>,
    revenue_metrics: FormSection,
    fund_usage: FormSection,
    pitch_deck: Option<Attachment>,
}

impl Default for StartupWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl StartupWizard {
    /// Starts on step 1 with one blank founder.
    pub fn new() -> Self {
        Self {
            steps: Steps::new(TOTAL_STEPS),
            profile: FormSection::new(PROFILE_FIELDS),
            founders: vec![FormSection::new(FOUNDER_FIELDS)],
            revenue_metrics: FormSection::new(REVENUE_METRICS_FIELDS),
            fund_usage: FormSection::new(FUND_USAGE_FIELDS),
            pitch_deck: None,
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

    /// Qualified names and specs for the fields shown on `step`, in order.
    /// Founder fields are listed once per founder.
    pub fn fields_for_step(&self, step: u8) -> Vec<(String, &'static FieldSpec)> {
        let mut out: Vec<(String, &'static FieldSpec)> = PROFILE_FIELDS
            .iter()
            .filter(|spec| spec.step == step)
            .map(|spec| (spec.name.to_string(), spec))
            .collect();

        for (index, _) in self.founders.iter().enumerate() {
            out.extend(
                FOUNDER_FIELDS
                    .iter()
                    .filter(|spec| spec.step == step)
                    .map(|spec| (format!("{}.{}.{}", FOUNDERS, index, spec.name), spec)),
            );
        }
        for (prefix, fields) in [
            (REVENUE_METRICS, REVENUE_METRICS_FIELDS),
            (FUND_USAGE, FUND_USAGE_FIELDS),
        ] {
            out.extend(
                fields
                    .iter()
                    .filter(|spec| spec.step == step)
                    .map(|spec| (format!("{}.{}", prefix, spec.name), spec)),
            );
        }
        out
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<(), AppError> {
        let accepted = match name.split_once('.') {
            None => self.profile.set(name, value),
            Some((REVENUE_METRICS, field)) => self.revenue_metrics.set(field, value),
            Some((FUND_USAGE, field)) => self.fund_usage.set(field, value),
            Some((FOUNDERS, rest)) => {
                let (index, field) = parse_founder_path(name, rest)?;
                return self.update_founder(index, field, value);
            }
            Some(_) => false,
        };

        if accepted {
            Ok(())
        } else {
            Err(AppError::UnknownField(name.to_string()))
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        match name.split_once('.') {
            None => self.profile.get(name),
            Some((REVENUE_METRICS, field)) => self.revenue_metrics.get(field),
            Some((FUND_USAGE, field)) => self.fund_usage.get(field),
            Some((FOUNDERS, rest)) => {
                let (index, field) = parse_founder_path(name, rest).ok()?;
                self.founders.get(index)?.get(field)
            }
            Some(_) => None,
        }
    }

    pub fn founder_count(&self) -> usize {
        self.founders.len()
    }

    /// Appends a blank founder and returns its index.
    pub fn add_founder(&mut self) -> usize {
        self.founders.push(FormSection::new(FOUNDER_FIELDS));
        self.founders.len() - 1
    }

    /// Removes the founder at `index`; `false` when out of range.
    pub fn remove_founder(&mut self, index: usize) -> bool {
        if index < self.founders.len() {
            self.founders.remove(index);
            true
        } else {
            false
        }
    }

    pub fn update_founder(&mut self, index: usize, field: &str, value: &str) -> Result<(), AppError> {
        let qualified = || format!("{}.{}.{}", FOUNDERS, index, field);
        let founder = self
            .founders
            .get_mut(index)
            .ok_or_else(|| AppError::UnknownField(qualified()))?;
        if founder.set(field, value) {
            Ok(())
        } else {
            Err(AppError::UnknownField(qualified()))
        }
    }

    pub fn set_pitch_deck(&mut self, deck: Option<Attachment>) {
        self.pitch_deck = deck;
    }

    pub fn pitch_deck(&self) -> Option<&Attachment> {
        self.pitch_deck.as_ref()
    }

    /// Required fields still blank, as qualified names.
    pub fn missing_required(&self) -> Vec<String> {
        let mut missing: Vec<String> = self
            .profile
            .missing_required()
            .into_iter()
            .map(str::to_string)
            .collect();
        for (index, founder) in self.founders.iter().enumerate() {
            missing.extend(
                founder
                    .missing_required()
                    .into_iter()
                    .map(|field| format!("{}.{}.{}", FOUNDERS, index, field)),
            );
        }
        missing
    }

    /// The `profile_data` document: every field coerced per its schema kind.
    pub fn build_payload(&self) -> Value {
        let mut payload: Map<String, Value> = self.profile.to_json();
        payload.insert(
            FOUNDERS.to_string(),
            Value::Array(
                self.founders
                    .iter()
                    .map(|founder| Value::Object(founder.to_json()))
                    .collect(),
            ),
        );
        payload.insert(
            REVENUE_METRICS.to_string(),
            Value::Object(self.revenue_metrics.to_json()),
        );
        payload.insert(FUND_USAGE.to_string(), Value::Object(self.fund_usage.to_json()));
        Value::Object(payload)
    }

    /// Posts the whole profile plus the optional deck in one request.
    pub async fn submit(&self, client: &ApiClient) -> Result<StartupProfile, ApiError> {
        let payload = self.build_payload();
        match client
            .create_startup_profile(&payload, self.pitch_deck.as_ref())
            .await
        {
            Ok(profile) => {
                info!(profile_id = profile.id, "Startup profile created");
                Ok(profile)
            }
            Err(e) => {
                warn!("Startup profile creation failed: {}", e);
                Err(e)
            }
        }
    }
}

fn parse_founder_path<'a>(name: &str, rest: &'a str) -> Result<(usize, &'a str), AppError> {
    rest.split_once('.')
        .and_then(|(index, field)| index.parse::<usize>().ok().map(|i| (i, field)))
        .ok_or_else(|| AppError::UnknownField(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn navigation_is_clamped() {
        let mut wizard = StartupWizard::new();
        assert_eq!(wizard.previous(), 1);
        for _ in 0..10 {
            wizard.next();
        }
        assert_eq!(wizard.step(), TOTAL_STEPS);
        assert!(wizard.is_final_step());
        assert_eq!(wizard.step_title(), "Fund Usage & Pitch Deck");
    }

    #[test]
    fn blank_form_serializes_with_fallbacks() {
        let payload = StartupWizard::new().build_payload();

        assert_eq!(payload["team_size"], json!(0));
        assert_eq!(payload["monthly_customer_growth_rate"], Value::Null);
        assert_eq!(payload["max_equity_percentage"], json!(0));
        assert_eq!(payload["founding_date"], Value::Null);
        assert_eq!(payload["company_name"], json!(""));
        assert_eq!(payload["revenue_metrics"]["monthly_recurring_revenue"], json!(0));
        assert_eq!(payload["revenue_metrics"]["monthly_burn_rate"], Value::Null);
        assert_eq!(payload["fund_usage"]["marketing_percentage"], json!(0));
        assert_eq!(payload["founders"].as_array().map(Vec::len), Some(1));

        assert!(serde_json::to_string(&payload).is_ok());
    }

    #[test]
    fn nested_and_founder_fields() {
        let mut wizard = StartupWizard::new();
        wizard.set_field("company_name", "Acme").unwrap();
        wizard.set_field("team_size", "12 people").unwrap();
        wizard.set_field("revenue_metrics.monthly_burn_rate", "5000").unwrap();
        wizard.set_field("fund_usage.marketing_percentage", "25.5").unwrap();
        wizard.set_field("founders.0.name", "Ada").unwrap();

        let second = wizard.add_founder();
        wizard.update_founder(second, "name", "Grace").unwrap();

        let payload = wizard.build_payload();
        assert_eq!(payload["team_size"], json!(12));
        assert_eq!(payload["revenue_metrics"]["monthly_burn_rate"], json!(5000));
        assert_eq!(payload["fund_usage"]["marketing_percentage"], json!(25.5));
        assert_eq!(payload["founders"][1]["name"], json!("Grace"));
        assert_eq!(wizard.field("founders.0.name"), Some("Ada"));

        assert!(wizard.remove_founder(0));
        assert!(!wizard.remove_founder(5));
        assert_eq!(wizard.field("founders.0.name"), Some("Grace"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut wizard = StartupWizard::new();
        for name in ["nope", "revenue_metrics.nope", "founders.3.name", "founders.x", "other.field"] {
            assert!(
                matches!(wizard.set_field(name, "1"), Err(AppError::UnknownField(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn step_fields_cover_every_founder() {
        let mut wizard = StartupWizard::new();
        wizard.add_founder();
        let names: Vec<String> = wizard
            .fields_for_step(4)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert!(names.contains(&"founders.1.photo_url".to_string()));
        assert!(names.contains(&"revenue_metrics.investment_timeline".to_string()));
        assert!(wizard.fields_for_step(1).iter().all(|(_, spec)| spec.step == 1));
    }

    #[test]
    fn missing_required_lists_founders() {
        let wizard = StartupWizard::new();
        let missing = wizard.missing_required();
        assert!(missing.contains(&"company_name".to_string()));
        assert!(missing.contains(&"founders.0.name".to_string()));
    }
}
