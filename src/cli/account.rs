use super::{fail, prompt};
use fundbridge::error::NETWORK_ERROR_MESSAGE;
use fundbridge::models::Role;
use fundbridge::routes::Route;
use fundbridge::App;

const SIGNUP_FAILED: &str = "Signup failed";
const LOGIN_FAILED: &str = "Login failed";

fn redirect_if_signed_in(app: &App, page: Route) {
    if app.resolve(page.path()) != page {
        println!("✅ Already signed in. Run `fundbridge logout` to switch accounts.");
        std::process::exit(0);
    }
}

pub async fn signup(
    app: &App,
    email: &str,
    role: Role,
    password: Option<String>,
) -> anyhow::Result<()> {
    redirect_if_signed_in(app, Route::Signup);

    match app.client.send_otp(email).await {
        Ok(sent) => {
            println!("✅ {}", sent.message);
            if let Some(warning) = sent.warning {
                println!("⚠️  {}", warning);
            }
        }
        Err(err) => fail("Failed to send OTP", err.display_message("Failed to send OTP")),
    }

    let otp = prompt::ask("One-time code")?;
    let (password, password_confirm) = match password {
        Some(pw) => (pw.clone(), pw),
        None => prompt::confirm_password("Password")?,
    };
    if password != password_confirm {
        eprintln!("❌ Passwords do not match");
        std::process::exit(1);
    }

    match app
        .client
        .verify_otp_and_signup(email, &otp, &password, role)
        .await
    {
        Ok(session) => {
            let next = Route::profile_create_for(session.role);
            println!("✅ Account created!");
            println!("  User ID: {}", session.user_id);
            println!("  Role: {}", session.role);
            println!("  Next: {} (fundbridge profile create)", next);
            Ok(())
        }
        Err(err) => fail(SIGNUP_FAILED, err.display_message(SIGNUP_FAILED)),
    }
}

pub async fn login(app: &App, email: &str, password: Option<String>) -> anyhow::Result<()> {
    redirect_if_signed_in(app, Route::Login);

    let password = match password {
        Some(pw) => pw,
        None => prompt::get_password("Password")?,
    };

    match app.client.login(email, &password).await {
        Ok(session) => {
            println!("✅ Logged in as {} ({})", email, session.role);
            println!("  Dashboard: {}", Route::dashboard_for(session.role));
            Ok(())
        }
        Err(err) => fail(LOGIN_FAILED, err.display_message(LOGIN_FAILED)),
    }
}

pub fn logout(app: &App) -> anyhow::Result<()> {
    match app.client.logout() {
        Ok(()) => {
            println!("✅ Logged out");
            Ok(())
        }
        Err(err) => fail("Logout failed", err.display_message("Logout failed")),
    }
}

pub async fn whoami(app: &App) -> anyhow::Result<()> {
    let Some(session) = app.session.current()? else {
        println!("Not logged in.");
        return Ok(());
    };

    if !app.guard.require_auth(None).is_granted() {
        println!("Session expired. Run `fundbridge login` again.");
        return Ok(());
    }

    println!("  User ID: {}", session.user_id);
    println!("  Role: {}", session.role);
    match app.client.me().await {
        Ok(account) => {
            println!("  Email: {}", account.email);
            println!(
                "  Member since: {}",
                account.created_at.as_deref().unwrap_or("N/A")
            );
        }
        Err(err) => {
            let message = err.display_message(NETWORK_ERROR_MESSAGE);
            eprintln!("⚠️  Could not reach the server: {}", message);
        }
    }
    Ok(())
}
