use super::{admit, fail, InvestorCommands, StartupCommands};
use fundbridge::dashboard::{pitch_deck_alert, InvestorDashboard, ListState, StartupDashboard};
use fundbridge::models::{ApplicationLog, Attachment, InterestLevel, PitchDeck};
use fundbridge::routes::Route;
use fundbridge::App;
use std::path::{Path, PathBuf};

fn print_logs(logs: &[ApplicationLog], counterpart: impl Fn(&ApplicationLog) -> String) {
    if logs.is_empty() {
        println!("No pitch decks yet.");
        return;
    }
    println!("{:<6} {:<30} {:<25} {:<20}", "ID", "With", "File", "Sent");
    println!("{}", "-".repeat(83));
    for log in logs {
        println!(
            "{:<6} {:<30} {:<25} {:<20}",
            log.id,
            counterpart(log),
            log.pitch_deck_filename.as_deref().unwrap_or("N/A"),
            log.sent_at.as_deref().unwrap_or("N/A")
        );
    }
}

async fn save_deck(deck: PitchDeck, application_id: i64, out: &Path) -> anyhow::Result<PathBuf> {
    tokio::fs::create_dir_all(out).await?;
    let path = out.join(deck.file_name(application_id));
    tokio::fs::write(&path, &deck.bytes).await?;
    Ok(path)
}

async fn view(
    result: Result<PitchDeck, fundbridge::error::ApiError>,
    application_id: i64,
    out: &Path,
) -> anyhow::Result<()> {
    match result {
        Ok(deck) => {
            let previewable = deck.is_previewable();
            let path = save_deck(deck, application_id, out).await?;
            println!("✅ Saved pitch deck to {}", path.display());
            if !previewable {
                println!("  Not a PDF; open it with a presentation viewer.");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {}", pitch_deck_alert(&err));
            std::process::exit(1);
        }
    }
}

pub async fn startups(app: &App, command: StartupCommands) -> anyhow::Result<()> {
    let (user_id, _) = admit(app, Route::InvestorDashboard);
    let mut dashboard = InvestorDashboard::new(app.client.clone(), user_id);

    match command {
        StartupCommands::List {
            search,
            industry,
            stage,
        } => {
            dashboard.load().await;
            dashboard.filter.search = search;
            dashboard.filter.industry = industry;
            dashboard.filter.funding_stage = stage;

            match dashboard.state() {
                ListState::Loading => println!("Loading..."),
                ListState::Failed(message) => fail("Failed to fetch startups", message),
                ListState::Empty(message) => println!("{}", message),
                ListState::Ready(startups) => {
                    println!(
                        "{:<6} {:<30} {:<18} {:<12} {:<14}",
                        "ID", "Company", "Industry", "Stage", "Seeking"
                    );
                    println!("{}", "-".repeat(84));
                    for startup in &startups {
                        println!(
                            "{:<6} {:<30} {:<18} {:<12} {:<14}",
                            startup.user_id,
                            startup.company_name,
                            startup.industry.as_deref().unwrap_or("N/A"),
                            startup.funding_stage.as_deref().unwrap_or("N/A"),
                            startup
                                .amount_seeking
                                .map(|a| a.to_string())
                                .unwrap_or_else(|| "Not specified".to_string())
                        );
                    }
                    println!("{} startups", startups.len());
                }
            }

            let industries = dashboard.industry_options();
            if !industries.is_empty() {
                println!("  Industries: {}", industries.join(", "));
            }
            let stages = dashboard.funding_stage_options();
            if !stages.is_empty() {
                println!("  Stages: {}", stages.join(", "));
            }
        }

        StartupCommands::Interest {
            startup_id,
            not_interested,
        } => {
            let level = if not_interested {
                InterestLevel::NotInterested
            } else {
                InterestLevel::Interested
            };
            match dashboard.express_interest(startup_id, level).await {
                Ok(_) => println!("✅ Marked startup {} as {}", startup_id, level.as_str()),
                Err(err) => fail(
                    "Failed to update interest status",
                    err.display_message("Failed to update interest status"),
                ),
            }
        }

        StartupCommands::Decks => {
            dashboard.load().await;
            match dashboard.received_pitch_decks() {
                Ok(logs) => print_logs(logs, |log| {
                    log.startup_name
                        .clone()
                        .unwrap_or_else(|| format!("Startup {}", log.startup_id))
                }),
                Err(message) => fail("Received pitch decks", message),
            }
        }

        StartupCommands::Interested => {
            dashboard.load().await;
            let mut any = false;
            for status in dashboard.interested() {
                any = true;
                let name = dashboard
                    .find_startup(status.startup_id)
                    .map(|s| s.company_name.clone())
                    .or_else(|| status.startup_name.clone())
                    .unwrap_or_else(|| format!("Startup {}", status.startup_id));
                println!("  ✓ {}", name);
            }
            if !any {
                println!("No interested startups yet.");
            }
        }

        StartupCommands::View {
            application_id,
            out,
        } => view(dashboard.view_pitch_deck(application_id).await, application_id, &out).await?,
    }
    Ok(())
}

pub async fn investors(app: &App, command: InvestorCommands) -> anyhow::Result<()> {
    let (user_id, _) = admit(app, Route::StartupDashboard);
    let mut dashboard = StartupDashboard::new(app.client.clone(), user_id);

    match command {
        InvestorCommands::List {
            search,
            stage,
            industry,
            check_size,
        } => {
            dashboard.load().await;
            dashboard.filter.search = search;
            dashboard.filter.stage = stage;
            dashboard.filter.industry = industry;
            dashboard.filter.check_size = check_size;

            match dashboard.state() {
                ListState::Loading => println!("Loading..."),
                ListState::Failed(message) => fail("Failed to fetch investors", message),
                ListState::Empty(message) => println!("{}", message),
                ListState::Ready(investors) => {
                    println!(
                        "{:<6} {:<24} {:<24} {:<20} {:<16} {:<10}",
                        "ID", "Name", "Firm", "Type", "Check Size", "Interest"
                    );
                    println!("{}", "-".repeat(104));
                    for investor in &investors {
                        let interest = match dashboard.interest_from(investor.user_id) {
                            Some(InterestLevel::Interested) => "✓",
                            Some(InterestLevel::NotInterested) => "✗",
                            _ => "",
                        };
                        println!(
                            "{:<6} {:<24} {:<24} {:<20} {:<16} {:<10}",
                            investor.user_id,
                            investor.full_name,
                            investor.firm_name.as_deref().unwrap_or("N/A"),
                            investor.investor_type.as_deref().unwrap_or("N/A"),
                            investor.check_size_range.as_deref().unwrap_or("N/A"),
                            interest
                        );
                    }
                    println!("{} investors", investors.len());
                }
            }

            for (label, options) in [
                ("Stages", dashboard.stage_options()),
                ("Industries", dashboard.industry_options()),
                ("Check sizes", dashboard.check_size_options()),
            ] {
                if !options.is_empty() {
                    println!("  {}: {}", label, options.join(", "));
                }
            }
        }

        InvestorCommands::Send { investor_ids } => {
            for id in investor_ids {
                dashboard.toggle_selection(id);
            }
            match dashboard.send_pitch_decks().await {
                Ok(sent) => println!("✅ Pitch deck sent to {} investor(s)", sent.len()),
                Err(err) => {
                    eprintln!("❌ {}", err);
                    for (investor_id, cause) in &err.failures {
                        eprintln!("  Investor {}: {}", investor_id, cause.display_message("Send failed"));
                    }
                    std::process::exit(1);
                }
            }
        }

        InvestorCommands::Sent => {
            dashboard.load().await;
            match dashboard.sent_pitch_decks() {
                Ok(logs) => print_logs(logs, |log| {
                    log.investor_name
                        .clone()
                        .unwrap_or_else(|| format!("Investor {}", log.investor_id))
                }),
                Err(message) => fail("Sent pitch decks", message),
            }
        }

        InvestorCommands::Interest => {
            dashboard.load().await;
            let mut any = false;
            for status in dashboard.interested_investors() {
                any = true;
                let name = dashboard
                    .investors()
                    .iter()
                    .find(|i| i.user_id == status.investor_id)
                    .map(|i| i.full_name.clone())
                    .or_else(|| status.investor_name.clone())
                    .unwrap_or_else(|| format!("Investor {}", status.investor_id));
                println!("  ✓ {}", name);
            }
            if !any {
                println!("No interested investors yet.");
            }
        }

        InvestorCommands::View {
            application_id,
            out,
        } => view(dashboard.view_pitch_deck(application_id).await, application_id, &out).await?,

        InvestorCommands::ReplaceDeck { path } => {
            let deck = match Attachment::from_path(&path).await {
                Ok(deck) => deck,
                Err(err) => fail(&format!("Cannot read {}", path.display()), err),
            };
            match dashboard.replace_pitch_deck(&deck).await {
                Ok(_) => println!("✅ Pitch deck replaced with {}", deck.filename),
                Err(err) => fail(
                    "Failed to update pitch deck",
                    err.display_message("Failed to update pitch deck"),
                ),
            }
        }
    }
    Ok(())
}
