pub mod test_helpers {
    use crate::api::ApiClient;
    use crate::config::ClientConfig;
    use crate::models::{Role, Session};
    use crate::session::{MemoryStore, SessionContext};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use serde_json::{json, Value};
    use std::sync::Arc;

    /// Unsigned `header.payload.signature` token carrying `claims`.
    pub fn token_with_claims(claims: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{}.{}.signature", header, payload)
    }

    /// Token expiring at `exp` (seconds since the epoch).
    pub fn token_with_exp(exp: i64) -> String {
        token_with_claims(json!({ "sub": "1", "exp": exp }))
    }

    /// Token valid for the next hour.
    pub fn fresh_token() -> String {
        token_with_exp(chrono::Utc::now().timestamp() + 3600)
    }

    /// Session context over an empty in-memory store.
    pub fn memory_session() -> SessionContext {
        SessionContext::new(Arc::new(MemoryStore::new()))
    }

    /// In-memory session already signed in as `role`.
    pub fn signed_in(role: Role, user_id: i64) -> SessionContext {
        let session = memory_session();
        if let Err(e) = session.begin(&Session {
            token: fresh_token(),
            user_id,
            role,
        }) {
            panic!("Failed to seed session: {}", e);
        }
        session
    }

    /// Client pointed at `base_url` (typically a mock server).
    pub fn client_for(base_url: &str, session: SessionContext) -> ApiClient {
        let config = ClientConfig::default().with_api_url(base_url);
        ApiClient::new(&config, session)
    }

    pub fn sample_startup(id: i64, user_id: i64, company_name: &str) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "company_name": company_name,
            "website_link": "https://example.com",
            "industry": "Technology",
            "company_description": "Robots for warehouses",
            "founding_date": "2021-05-01",
            "team_size": 12,
            "district": "Pune",
            "state": "Maharashtra",
            "funding_stage": "Seed",
            "amount_seeking": 500000,
            "pitch_deck_filename": "deck.pdf",
            "created_at": "2024-01-01T00:00:00",
            "updated_at": "2024-01-01T00:00:00",
            "founders": [{ "id": 1, "startup_profile_id": id, "name": "Ada" }],
            "revenue_metrics": null,
            "fund_usage": null
        })
    }

    pub fn sample_investor(id: i64, user_id: i64, full_name: &str) -> Value {
        json!({
            "id": id,
            "user_id": user_id,
            "full_name": full_name,
            "email": "investor@example.com",
            "investor_type": "Angel Investor",
            "firm_name": "Northwind Capital",
            "investment_stages": ["Seed", "Series A"],
            "industry_focus": "[\"Technology\"]",
            "check_size_range": "$50k-$250k",
            "profile_visibility": "Public",
            "contact_permissions": "Open to all"
        })
    }

    pub fn sample_application_log(id: i64, startup_id: i64, investor_id: i64) -> Value {
        json!({
            "id": id,
            "startup_id": startup_id,
            "investor_id": investor_id,
            "pitch_deck_filename": "deck.pdf",
            "status": "sent",
            "log": "Pitch deck sent",
            "sent_at": "2024-02-01T10:00:00"
        })
    }

    pub fn sample_interest(id: i64, startup_id: i64, investor_id: i64, status: &str) -> Value {
        json!({
            "id": id,
            "startup_id": startup_id,
            "investor_id": investor_id,
            "status": status,
            "created_at": "2024-02-02T10:00:00"
        })
    }
}
