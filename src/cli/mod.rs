pub mod account;
pub mod listings;
pub mod profile;
pub mod prompt;

use clap::{Parser, Subcommand};
use fundbridge::auth::{Admission, SharedNavigator, LOGIN_PATH};
use fundbridge::models::Role;
use fundbridge::routes::Route;
use fundbridge::App;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fundbridge")]
#[command(about = "Connect startups with investors from the command line", long_about = None)]
pub struct Cli {
    /// API base URL (overrides FUNDBRIDGE_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file (overrides FUNDBRIDGE_SESSION_FILE)
    #[arg(long, global = true)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account with an emailed one-time code
    Signup {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Account role: startup or investor
        #[arg(short, long)]
        role: Role,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Sign in to an existing account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Investor dashboard: browse startups
    Startups {
        #[command(subcommand)]
        command: StartupCommands,
    },

    /// Startup dashboard: browse investors and send pitch decks
    Investors {
        #[command(subcommand)]
        command: InvestorCommands,
    },

    /// Create, show or edit your own profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
pub enum StartupCommands {
    /// List startups you have not responded to yet
    List {
        /// Search company name, industry and funding stage
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only this industry
        #[arg(long)]
        industry: Option<String>,

        /// Only this funding stage
        #[arg(long)]
        stage: Option<String>,
    },

    /// Record interest in a startup (by its account id)
    Interest {
        startup_id: i64,

        /// Mark as not interested instead
        #[arg(long)]
        not_interested: bool,
    },

    /// Pitch decks you have received
    Decks,

    /// Startups you have marked as interested
    Interested,

    /// Save a received pitch deck to disk
    View {
        application_id: i64,

        /// Directory to write the file to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum InvestorCommands {
    /// List investors that have not received your deck yet
    List {
        /// Search name, firm and investor type
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only investors funding this stage
        #[arg(long)]
        stage: Option<String>,

        /// Only investors focused on this industry
        #[arg(long)]
        industry: Option<String>,

        /// Only this check size range
        #[arg(long)]
        check_size: Option<String>,
    },

    /// Send your pitch deck to one or more investors (by account id)
    Send {
        #[arg(required = true)]
        investor_ids: Vec<i64>,
    },

    /// Pitch decks you have sent
    Sent,

    /// Investors who signalled interest
    Interest,

    /// Save a sent pitch deck to disk
    View {
        application_id: i64,

        /// Directory to write the file to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Replace the pitch deck attached to your profile
    ReplaceDeck {
        path: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Walk through the profile wizard for your role
    Create {
        /// Pitch deck to attach (startups only)
        #[arg(long)]
        pitch_deck: Option<PathBuf>,
    },

    /// Print your profile
    Show,

    /// Edit your profile
    Edit {
        /// field=value pairs; prompts for every field when omitted
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
}

impl Commands {
    /// Route this command stands in for, if it needs a session.
    pub fn route(&self, role: Option<Role>) -> Option<Route> {
        match self {
            Commands::Signup { .. } => Some(Route::Signup),
            Commands::Login { .. } => Some(Route::Login),
            Commands::Logout | Commands::Whoami => None,
            Commands::Startups { .. } => Some(Route::InvestorDashboard),
            Commands::Investors { .. } => Some(Route::StartupDashboard),
            Commands::Profile { command } => {
                let role = role?;
                Some(match command {
                    ProfileCommands::Create { .. } => Route::profile_create_for(role),
                    ProfileCommands::Show | ProfileCommands::Edit { .. } => {
                        Route::profile_edit_for(role)
                    }
                })
            }
        }
    }
}

/// Prints a failure and exits non-zero.
pub fn fail(context: &str, err: impl Display) -> ! {
    eprintln!("❌ {}: {}", context, err);
    std::process::exit(1);
}

/// Admits the caller to `route` or exits with a hint to sign in.
pub fn admit(app: &App, route: Route) -> (i64, Role) {
    match app.guard.require_auth(route.required_role()) {
        Admission::Granted(grant) => match (grant.user_id, grant.role) {
            (Some(user_id), Some(role)) => (user_id, role),
            _ => {
                eprintln!("❌ Stored session is incomplete. Run `fundbridge login` again.");
                std::process::exit(1);
            }
        },
        Admission::Redirect(_) => {
            match route.required_role() {
                Some(role) => eprintln!(
                    "❌ Please log in with a {} account first (fundbridge login)",
                    role
                ),
                None => eprintln!("❌ Please log in first (fundbridge login)"),
            }
            std::process::exit(1);
        }
    }
}

/// Exits if the expiry watcher has sent the session back to the login page.
pub fn ensure_session(navigator: &SharedNavigator) {
    use fundbridge::auth::Navigator;
    if navigator.current_path() == LOGIN_PATH {
        eprintln!("❌ Your session has expired. Please log in again.");
        std::process::exit(1);
    }
}

pub async fn run(app: App, command: Commands, navigator: &SharedNavigator) -> anyhow::Result<()> {
    match command {
        Commands::Signup {
            email,
            role,
            password,
        } => account::signup(&app, &email, role, password).await,
        Commands::Login { email, password } => account::login(&app, &email, password).await,
        Commands::Logout => account::logout(&app),
        Commands::Whoami => account::whoami(&app).await,
        Commands::Startups { command } => listings::startups(&app, command).await,
        Commands::Investors { command } => listings::investors(&app, command).await,
        Commands::Profile { command } => profile::run(&app, command, navigator).await,
    }
}
