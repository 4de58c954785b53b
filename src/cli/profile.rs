use super::{admit, ensure_session, fail, prompt, ProfileCommands};
use fundbridge::auth::SharedNavigator;
use fundbridge::models::{Attachment, Role};
use fundbridge::routes::Route;
use fundbridge::wizard::edit::UPDATE_FAILED_MESSAGE;
use fundbridge::wizard::startup::FOUNDERS;
use fundbridge::wizard::{investor, startup, FieldKind, FieldSpec, InvestorWizard, ProfileEditor, StartupWizard};
use fundbridge::App;
use std::path::{Path, PathBuf};

/// Prompts for one field until a required field gets a value.
fn ask_field(spec: &FieldSpec, current: &str) -> anyhow::Result<String> {
    let label = if spec.required {
        format!("{} *", spec.label)
    } else {
        spec.label.to_string()
    };

    loop {
        let answer = match (spec.kind, spec.options.is_empty()) {
            (FieldKind::MultiSelect, false) => {
                for (i, option) in spec.options.iter().enumerate() {
                    println!("  {}) {}", i + 1, option);
                }
                let raw = prompt::ask_with_default(&format!("{} (comma-separated)", label), current)?;
                prompt::pick_many(&raw, spec.options).join(", ")
            }
            (_, false) => prompt::choose(&label, spec.options)?
                .unwrap_or_else(|| current.to_string()),
            _ => prompt::ask_with_default(&label, current)?,
        };

        if spec.required && answer.trim().is_empty() {
            println!("  {} is required", spec.label);
            continue;
        }
        return Ok(answer);
    }
}

pub async fn run(app: &App, command: ProfileCommands, navigator: &SharedNavigator) -> anyhow::Result<()> {
    let Some(role) = app.session.role()? else {
        eprintln!("❌ Please log in first (fundbridge login)");
        std::process::exit(1);
    };

    match command {
        ProfileCommands::Create { pitch_deck } => {
            let (_, role) = admit(app, Route::profile_create_for(role));
            match role {
                Role::Startup => create_startup(app, pitch_deck, navigator).await,
                Role::Investor => create_investor(app, navigator).await,
            }
        }
        ProfileCommands::Show => {
            let (user_id, role) = admit(app, Route::profile_edit_for(role));
            let editor = match ProfileEditor::load(&app.client, role, user_id).await {
                Ok(editor) => editor,
                Err(err) => fail("Failed to load profile", err.display_message("Profile not found")),
            };
            for spec in editor.fields() {
                println!("  {}: {}", spec.label, editor.display(spec.name));
            }
            if role == Role::Startup {
                let deck = editor.display("pitch_deck_filename");
                println!("  Pitch Deck: {}", if deck.is_empty() { "None" } else { deck.as_str() });
            }
            Ok(())
        }
        ProfileCommands::Edit { set } => {
            let (user_id, role) = admit(app, Route::profile_edit_for(role));
            edit(app, role, user_id, set, navigator).await
        }
    }
}

async fn create_startup(
    app: &App,
    pitch_deck: Option<PathBuf>,
    navigator: &SharedNavigator,
) -> anyhow::Result<()> {
    let mut wizard = StartupWizard::new();
    if let Some(path) = pitch_deck {
        match Attachment::from_path(&path).await {
            Ok(deck) => wizard.set_pitch_deck(Some(deck)),
            Err(err) => fail(&format!("Cannot read {}", path.display()), err),
        }
    }

    loop {
        ensure_session(navigator);
        println!();
        println!("Step {}/{}: {}", wizard.step(), wizard.total_steps(), wizard.step_title());
        for (name, spec) in wizard.fields_for_step(wizard.step()) {
            let current = wizard.field(&name).unwrap_or("").to_string();
            let value = ask_field(spec, &current)?;
            wizard.set_field(&name, &value)?;
        }

        if wizard.step() == 4 {
            while prompt::confirm("Add another founder?")? {
                let index = wizard.add_founder();
                for spec in startup::FOUNDER_FIELDS {
                    let value = ask_field(spec, "")?;
                    wizard.set_field(&format!("{}.{}.{}", FOUNDERS, index, spec.name), &value)?;
                }
            }
        }

        if wizard.is_final_step() {
            break;
        }
        wizard.next();
    }

    if wizard.pitch_deck().is_none() {
        let path = prompt::ask("Pitch deck file (.pdf, .ppt, .pptx; blank to skip)")?;
        if !path.is_empty() {
            match Attachment::from_path(Path::new(&path)).await {
                Ok(deck) => wizard.set_pitch_deck(Some(deck)),
                Err(err) => fail(&format!("Cannot read {}", path), err),
            }
        }
    }

    let missing = wizard.missing_required();
    if !missing.is_empty() {
        fail("Missing required fields", missing.join(", "));
    }
    if !prompt::confirm("Submit profile?")? {
        println!("Profile not submitted.");
        return Ok(());
    }

    ensure_session(navigator);
    match wizard.submit(&app.client).await {
        Ok(profile) => {
            println!("✅ Startup profile created!");
            println!("  Company: {}", profile.company_name);
            println!("  Dashboard: {}", Route::dashboard_for(Role::Startup));
            Ok(())
        }
        Err(err) => fail(
            startup::CREATE_FAILED_MESSAGE,
            err.display_message(startup::CREATE_FAILED_MESSAGE),
        ),
    }
}

async fn create_investor(app: &App, navigator: &SharedNavigator) -> anyhow::Result<()> {
    let mut wizard = InvestorWizard::new();

    loop {
        ensure_session(navigator);
        println!();
        println!("Step {}/{}: {}", wizard.step(), wizard.total_steps(), wizard.step_title());
        for spec in wizard.fields_for_step(wizard.step()) {
            let current = match spec.kind {
                FieldKind::MultiSelect => wizard.selection(spec.name).join(", "),
                _ => wizard.field(spec.name).unwrap_or("").to_string(),
            };
            let value = ask_field(spec, &current)?;
            wizard.set_field(spec.name, &value)?;
        }

        if wizard.is_final_step() {
            break;
        }
        wizard.next();
    }

    let missing = wizard.missing_required();
    if !missing.is_empty() {
        fail("Missing required fields", missing.join(", "));
    }
    if !prompt::confirm("Submit profile?")? {
        println!("Profile not submitted.");
        return Ok(());
    }

    ensure_session(navigator);
    match wizard.submit(&app.client).await {
        Ok(profile) => {
            println!("✅ Investor profile created!");
            println!("  Name: {}", profile.full_name);
            println!("  Dashboard: {}", Route::dashboard_for(Role::Investor));
            Ok(())
        }
        Err(err) => fail(
            investor::CREATE_FAILED_MESSAGE,
            err.display_message(investor::CREATE_FAILED_MESSAGE),
        ),
    }
}

async fn edit(
    app: &App,
    role: Role,
    user_id: i64,
    assignments: Vec<String>,
    navigator: &SharedNavigator,
) -> anyhow::Result<()> {
    let mut editor = match ProfileEditor::load(&app.client, role, user_id).await {
        Ok(editor) => editor,
        Err(err) => fail("Failed to load profile", err.display_message("Profile not found")),
    };

    let interactive = assignments.is_empty();
    if interactive {
        for spec in editor.fields() {
            let current = editor.display(spec.name);
            let value = ask_field(spec, &current)?;
            if value != current {
                editor.set_field(spec.name, &value)?;
            }
        }
    } else {
        for assignment in &assignments {
            let Some((field, value)) = assignment.split_once('=') else {
                fail("Expected FIELD=VALUE", assignment);
            };
            editor.set_field(field.trim(), value)?;
        }
    }

    if !editor.is_dirty() {
        println!("No changes.");
        return Ok(());
    }
    if interactive && !prompt::confirm("Save changes?")? {
        editor.cancel();
        println!("Changes discarded.");
        return Ok(());
    }

    ensure_session(navigator);
    match editor.save(&app.client).await {
        Ok(()) => {
            println!("✅ Profile updated!");
            Ok(())
        }
        Err(err) => fail(UPDATE_FAILED_MESSAGE, err.display_message(UPDATE_FAILED_MESSAGE)),
    }
}
