use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Founder {
    pub id: Option<i64>,
    pub startup_profile_id: Option<i64>,
    pub name: String,
    pub educational_qualification: String,
    pub previous_work_experience: String,
    pub linkedin_profile: String,
    pub photo_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenueMetrics {
    pub monthly_recurring_revenue: i64,
    pub annual_recurring_revenue: i64,
    pub revenue_growth_rate: Option<f64>,
    pub monthly_burn_rate: Option<i64>,
    pub current_cash_runway: Option<i64>,
    pub projected_revenue_12_months: Option<i64>,
    pub profitability_timeline: String,
    pub investment_timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FundUsage {
    pub product_development_percentage: f64,
    pub marketing_percentage: f64,
    pub team_expansion_percentage: f64,
    pub operations_percentage: f64,
}

/// Startup profile as served by `/startup-profile/*`.
///
/// Decoding is lenient: the listing endpoint omits nested sections for some
/// rows, and older rows carry nulls in required columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupProfile {
    pub id: i64,
    pub user_id: i64,
    pub company_name: String,
    pub website_link: Option<String>,
    pub industry: Option<String>,
    pub company_description: Option<String>,
    pub founding_date: Option<String>,
    pub team_size: Option<i64>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub social_media_1: Option<String>,
    pub social_media_2: Option<String>,
    pub business_model_description: Option<String>,
    pub total_paying_customers: Option<i64>,
    pub monthly_customer_growth_rate: Option<f64>,
    pub customer_acquisition_cost: Option<f64>,
    pub customer_lifetime_value: Option<f64>,
    pub competitive_advantage: Option<String>,
    pub product_demo_video_link: Option<String>,
    pub pre_money_valuation: Option<i64>,
    pub amount_seeking: Option<i64>,
    pub investment_type: Option<String>,
    pub max_equity_percentage: Option<f64>,
    pub funding_stage: Option<String>,
    pub total_funding_raised: Option<i64>,
    pub last_round_amount: Option<i64>,
    pub last_round_date: Option<String>,
    pub key_previous_investors: Option<String>,
    pub pitch_deck_filename: Option<String>,
    pub pitch_deck_file_size: Option<i64>,
    pub pitch_deck_content_type: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub founders: Vec<Founder>,
    pub revenue_metrics: Option<RevenueMetrics>,
    pub fund_usage: Option<FundUsage>,
}

impl StartupProfile {
    pub fn has_pitch_deck(&self) -> bool {
        self.pitch_deck_filename
            .as_deref()
            .is_some_and(|name| !name.is_empty())
    }
}
