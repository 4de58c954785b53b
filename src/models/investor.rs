use serde::{Deserialize, Deserializer, Serialize};

/// Investor profile as served by `/investor-profile/*`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestorProfile {
    pub id: Option<i64>,
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub linkedin_profile: Option<String>,
    pub investor_type: Option<String>,
    pub firm_name: Option<String>,
    pub investment_experience: Option<String>,
    pub years_of_investment_experience: Option<String>,
    #[serde(deserialize_with = "string_list")]
    pub professional_background: Vec<String>,
    pub previous_experience: Option<String>,
    #[serde(deserialize_with = "string_list")]
    pub investment_stages: Vec<String>,
    pub check_size_range: Option<String>,
    #[serde(deserialize_with = "string_list")]
    pub geographic_focus: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub industry_focus: Vec<String>,
    pub investment_philosophy: Option<String>,
    pub decision_timeline: Option<String>,
    pub number_of_portfolio_companies: Option<String>,
    pub notable_investments: Option<String>,
    pub successful_exits: Option<String>,
    pub post_investment_involvement: Option<String>,
    #[serde(deserialize_with = "string_list")]
    pub areas_of_expertise: Vec<String>,
    pub investment_thesis: Option<String>,
    pub additional_info: Option<String>,
    pub profile_visibility: Option<String>,
    pub contact_permissions: Option<String>,
    pub profile_photo_filename: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Multi-select columns arrive as arrays, JSON-encoded strings, a bare
/// string, or null depending on how the row was written.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(serde_json::Value::String(s)) if s.is_empty() => Vec::new(),
        Some(serde_json::Value::String(s)) => {
            serde_json::from_str::<Vec<String>>(&s).unwrap_or_else(|_| vec![s])
        }
        _ => Vec::new(),
    })
}
