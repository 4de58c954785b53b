use fundbridge::dashboard::{
    pitch_deck_alert, InvestorDashboard, ListState, StartupDashboard, NO_INVESTORS_MESSAGE,
    NO_STARTUPS_MESSAGE,
};
use fundbridge::models::{Attachment, InterestLevel, Role};
use fundbridge::test_utils::test_helpers::{
    client_for, sample_application_log, sample_interest, sample_investor, sample_startup,
    signed_in,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INVESTOR_ID: i64 = 7;
const STARTUP_ID: i64 = 42;

async fn mount_json(server: &MockServer, verb: &str, route: &str, body: serde_json::Value) {
    Mock::given(method(verb))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn investor_dashboard(server: &MockServer) -> InvestorDashboard {
    let client = client_for(&server.uri(), signed_in(Role::Investor, INVESTOR_ID));
    InvestorDashboard::new(client, INVESTOR_ID)
}

async fn startup_dashboard(server: &MockServer) -> StartupDashboard {
    let client = client_for(&server.uri(), signed_in(Role::Startup, STARTUP_ID));
    StartupDashboard::new(client, STARTUP_ID)
}

#[tokio::test]
async fn test_empty_startup_list_shows_empty_state() {
    let mock_server = MockServer::start().await;
    mount_json(&mock_server, "GET", "/startup-profile/all", json!([])).await;
    mount_json(
        &mock_server,
        "GET",
        "/applications/investor/7/received-pitch-decks",
        json!([]),
    )
    .await;
    mount_json(&mock_server, "GET", "/applications/interest-status/investor/7", json!([])).await;

    let mut dashboard = investor_dashboard(&mock_server).await;
    assert_eq!(dashboard.state(), ListState::Loading);

    dashboard.load().await;
    assert_eq!(dashboard.state(), ListState::Empty(NO_STARTUPS_MESSAGE));
    assert_eq!(NO_STARTUPS_MESSAGE, "No startups found");
}

#[tokio::test]
async fn test_failed_listing_is_distinct_from_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/startup-profile/all"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let mut dashboard = investor_dashboard(&mock_server).await;
    dashboard.load().await;

    assert_eq!(
        dashboard.state(),
        ListState::Failed("Failed to fetch startups".to_string())
    );
    assert_eq!(
        dashboard.received_pitch_decks().unwrap_err(),
        "Unable to fetch received pitch decks"
    );
}

#[tokio::test]
async fn test_startups_with_interest_are_hidden() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "GET",
        "/startup-profile/all",
        json!([
            sample_startup(1, 100, "Acme Robotics"),
            sample_startup(2, 200, "GreenLeaf")
        ]),
    )
    .await;
    mount_json(
        &mock_server,
        "GET",
        "/applications/investor/7/received-pitch-decks",
        json!([sample_application_log(9, 100, INVESTOR_ID)]),
    )
    .await;
    mount_json(
        &mock_server,
        "GET",
        "/applications/interest-status/investor/7",
        json!([sample_interest(1, 200, INVESTOR_ID, "not_interested")]),
    )
    .await;

    let mut dashboard = investor_dashboard(&mock_server).await;
    dashboard.load().await;

    let names: Vec<String> = dashboard
        .state()
        .items()
        .iter()
        .map(|s| s.company_name.clone())
        .collect();
    assert_eq!(names, vec!["Acme Robotics"]);
    assert_eq!(dashboard.received_pitch_decks().unwrap().len(), 1);
    assert_eq!(dashboard.industry_options(), vec!["Technology"]);
    assert_eq!(dashboard.interested().count(), 0);
}

#[tokio::test]
async fn test_express_interest_posts_account_id_and_refetches() {
    let mock_server = MockServer::start().await;
    mount_json(
        &mock_server,
        "GET",
        "/startup-profile/all",
        json!([sample_startup(1, 100, "Acme Robotics")]),
    )
    .await;
    mount_json(
        &mock_server,
        "GET",
        "/applications/investor/7/received-pitch-decks",
        json!([]),
    )
    .await;
    mount_json(
        &mock_server,
        "GET",
        "/applications/interest-status/investor/7",
        json!([sample_interest(1, 100, INVESTOR_ID, "interested")]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/applications/update-interest"))
        .and(body_json(json!({ "startup_id": 100, "status": "interested" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_interest(1, 100, INVESTOR_ID, "interested")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut dashboard = investor_dashboard(&mock_server).await;
    let status = dashboard
        .express_interest(100, InterestLevel::Interested)
        .await
        .unwrap();

    assert_eq!(status.status, InterestLevel::Interested);
    assert_eq!(dashboard.state(), ListState::Empty(NO_STARTUPS_MESSAGE));
    assert_eq!(dashboard.interested().count(), 1);
}

#[tokio::test]
async fn test_pitch_deck_view_failure_alerts_with_reason() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/download-pitch-deck/5"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Pitch deck file not found"))
        .mount(&mock_server)
        .await;

    let dashboard = investor_dashboard(&mock_server).await;
    let err = dashboard.view_pitch_deck(5).await.unwrap_err();

    let alert = pitch_deck_alert(&err);
    assert!(alert.starts_with("Failed to view pitch deck: "));
    assert!(alert.contains("404"));
    assert!(alert.contains("Pitch deck file not found"));
}

#[tokio::test]
async fn test_pitch_deck_view_returns_blob() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/applications/download-pitch-deck/5"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .insert_header("content-disposition", "attachment; filename=\"acme.pdf\"")
                .set_body_bytes(b"%PDF-1.4".to_vec()),
        )
        .mount(&mock_server)
        .await;

    let dashboard = investor_dashboard(&mock_server).await;
    let deck = dashboard.view_pitch_deck(5).await.unwrap();

    assert_eq!(deck.filename.as_deref(), Some("acme.pdf"));
    assert_eq!(deck.bytes, b"%PDF-1.4");
    assert!(deck.is_previewable());
}

async fn mount_startup_side(server: &MockServer) {
    mount_json(
        server,
        "GET",
        "/investor-profile/all",
        json!([
            sample_investor(1, 7, "Jo Park"),
            sample_investor(2, 8, "Sam Lee"),
            sample_investor(3, 9, "Kim Ray")
        ]),
    )
    .await;
    mount_json(
        server,
        "GET",
        "/applications/startup/42/sent-pitch-decks",
        json!([sample_application_log(3, STARTUP_ID, 9)]),
    )
    .await;
    mount_json(
        server,
        "GET",
        "/applications/interest-status/startup/42",
        json!([sample_interest(1, STARTUP_ID, 8, "interested")]),
    )
    .await;
}

#[tokio::test]
async fn test_investors_already_pitched_are_hidden() {
    let mock_server = MockServer::start().await;
    mount_startup_side(&mock_server).await;

    let mut dashboard = startup_dashboard(&mock_server).await;
    dashboard.load().await;

    let ids: Vec<i64> = dashboard.state().items().iter().map(|i| i.user_id).collect();
    assert_eq!(ids, vec![7, 8]);
    assert_eq!(dashboard.interest_from(8), Some(InterestLevel::Interested));
    assert_eq!(dashboard.interest_from(7), None);
    assert_eq!(dashboard.industry_options(), vec!["Technology"]);

    dashboard.filter.search = "nobody".into();
    assert_eq!(dashboard.state(), ListState::Empty(NO_INVESTORS_MESSAGE));
}

#[tokio::test]
async fn test_send_pitch_decks_to_all_selected() {
    let mock_server = MockServer::start().await;
    mount_startup_side(&mock_server).await;
    for investor_id in [7, 8] {
        Mock::given(method("POST"))
            .and(path("/applications/send-pitch-deck"))
            .and(body_json(json!({ "investor_id": investor_id })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_application_log(investor_id, STARTUP_ID, investor_id)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let mut dashboard = startup_dashboard(&mock_server).await;
    assert!(dashboard.toggle_selection(7));
    assert!(dashboard.toggle_selection(8));

    let sent = dashboard.send_pitch_decks().await.unwrap();
    assert_eq!(sent.len(), 2);
    assert!(dashboard.selected().is_empty());
    assert!(dashboard.state().is_ready());
}

#[tokio::test]
async fn test_partial_send_failure_keeps_selection() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/applications/send-pitch-deck"))
        .and(body_json(json!({ "investor_id": 7 })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(sample_application_log(1, STARTUP_ID, 7)),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/applications/send-pitch-deck"))
        .and(body_json(json!({ "investor_id": 8 })))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "detail": "No pitch deck uploaded" })),
        )
        .mount(&mock_server)
        .await;

    let mut dashboard = startup_dashboard(&mock_server).await;
    dashboard.toggle_selection(7);
    dashboard.toggle_selection(8);

    let err = dashboard.send_pitch_decks().await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to send some pitch decks");
    assert_eq!(err.sent.len(), 1);
    assert_eq!(err.failures.len(), 1);
    assert_eq!(err.failures[0].0, 8);
    assert_eq!(dashboard.selected().len(), 2);
}

#[tokio::test]
async fn test_replace_pitch_deck_uploads_multipart() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/startup-profile/update-pitch-deck"))
        .and(body_string_contains("name=\"pitch_deck\""))
        .and(body_string_contains("filename=\"new-deck.pdf\""))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": "Pitch deck updated", "filename": "new-deck.pdf" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let dashboard = startup_dashboard(&mock_server).await;
    let deck = Attachment::new("new-deck.pdf", b"%PDF-1.7".to_vec());
    let response = dashboard.replace_pitch_deck(&deck).await.unwrap();
    assert_eq!(response["filename"], "new-deck.pdf");
}

#[tokio::test]
async fn test_current_pitch_deck_downloads_own_deck() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/startup-profile/download-pitch-deck/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=deck.pptx")
                .set_body_bytes(vec![1, 2, 3]),
        )
        .mount(&mock_server)
        .await;

    let dashboard = startup_dashboard(&mock_server).await;
    let deck = dashboard.current_pitch_deck().await.unwrap();
    assert_eq!(deck.extension().as_deref(), Some("pptx"));
    assert!(!deck.is_previewable());
}
