use fundbridge::error::ApiError;
use fundbridge::models::{Attachment, Role};
use fundbridge::test_utils::test_helpers::{client_for, sample_investor, sample_startup, signed_in};
use fundbridge::wizard::{startup, InvestorWizard, ProfileEditor, StartupWizard};
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_startup_wizard_submits_multipart_with_coerced_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/startup-profile/create-with-files"))
        .and(body_string_contains("name=\"profile_data\""))
        .and(body_string_contains("\"team_size\":0"))
        .and(body_string_contains("\"monthly_customer_growth_rate\":null"))
        .and(body_string_contains("\"amount_seeking\":250000"))
        .and(body_string_contains("\"monthly_burn_rate\":null"))
        .and(body_string_contains("\"founding_date\":null"))
        .and(body_string_contains("name=\"pitch_deck\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_startup(1, 42, "Acme")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), signed_in(Role::Startup, 42));
    let mut wizard = StartupWizard::new();
    wizard.set_field("company_name", "Acme").unwrap();
    wizard.set_field("amount_seeking", "250000 INR").unwrap();
    wizard.set_field("revenue_metrics.monthly_burn_rate", "").unwrap();
    wizard.set_pitch_deck(Some(Attachment::new("deck.pdf", b"%PDF-1.4".to_vec())));

    let profile = wizard.submit(&client).await.unwrap();
    assert_eq!(profile.company_name, "Acme");
    assert!(profile.has_pitch_deck());
}

#[tokio::test]
async fn test_startup_wizard_without_deck_omits_file_part() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/startup-profile/create-with-files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_startup(1, 42, "Acme")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), signed_in(Role::Startup, 42));
    StartupWizard::new().submit(&client).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"profile_data\""));
    assert!(!body.contains("name=\"pitch_deck\""));
}

#[tokio::test]
async fn test_create_failure_without_detail_uses_fallback() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/startup-profile/create-with-files"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), signed_in(Role::Startup, 42));
    let err = StartupWizard::new().submit(&client).await.unwrap_err();
    assert_eq!(
        err.display_message(startup::CREATE_FAILED_MESSAGE),
        "Failed to create profile"
    );
}

#[tokio::test]
async fn test_investor_wizard_posts_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/investor-profile/"))
        .and(body_partial_json(json!({
            "full_name": "Jo Park",
            "investment_stages": ["Seed", "Series A"],
            "profile_visibility": "Public",
            "contact_permissions": "Open to all"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_investor(1, 7, "Jo Park")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), signed_in(Role::Investor, 7));
    let mut wizard = InvestorWizard::new();
    wizard.set_field("full_name", "Jo Park").unwrap();
    wizard.toggle("investment_stages", "Seed", true).unwrap();
    wizard.toggle("investment_stages", "Series A", true).unwrap();

    let profile = wizard.submit(&client).await.unwrap();
    assert_eq!(profile.industry_focus, vec!["Technology"]);
}

#[tokio::test]
async fn test_investor_duplicate_profile_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/investor-profile/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "detail": "Investor profile already exists for this user" })),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), signed_in(Role::Investor, 7));
    let err = InvestorWizard::new().submit(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    assert_eq!(
        err.display_message("Failed to create profile"),
        "Investor profile already exists for this user"
    );
}

#[tokio::test]
async fn test_profile_editor_saves_and_rebases() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/startup-profile/user/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_startup(1, 42, "Acme")))
        .mount(&mock_server)
        .await;

    let mut updated = sample_startup(1, 42, "Acme Robotics");
    updated["team_size"] = json!(20);
    Mock::given(method("PUT"))
        .and(path("/startup-profile/42"))
        .and(body_partial_json(json!({
            "company_name": "Acme Robotics",
            "team_size": 20,
            "last_round_date": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(updated))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), signed_in(Role::Startup, 42));
    let mut editor = ProfileEditor::load(&client, Role::Startup, 42).await.unwrap();
    assert_eq!(editor.display("company_name"), "Acme");

    editor.set_field("company_name", "Acme Robotics").unwrap();
    editor.set_field("team_size", "20").unwrap();
    editor.set_field("last_round_date", "  ").unwrap();
    editor.save(&client).await.unwrap();

    assert!(!editor.is_dirty());
    assert_eq!(editor.display("team_size"), "20");
}

#[tokio::test]
async fn test_profile_editor_cancel_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/investor-profile/user/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_investor(1, 7, "Jo Park")))
        .mount(&mock_server)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server.uri(), signed_in(Role::Investor, 7));
    let mut editor = ProfileEditor::load(&client, Role::Investor, 7).await.unwrap();
    editor.set_field("full_name", "Someone Else").unwrap();
    editor.cancel();

    assert!(!editor.is_dirty());
    assert_eq!(editor.display("full_name"), "Jo Park");
    assert_eq!(editor.display("industry_focus"), "Technology");
}
