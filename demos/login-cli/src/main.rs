use clap::{Parser, Subcommand};
use usergate::prelude::*;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// Drive a usergate session store from the terminal.
///
/// Configuration comes from `USERGATE_MODE`, `USERGATE_API_URL`, and the
/// timeout variables; `--mode` and `--api-url` override them.
#[derive(Parser)]
#[command(name = "login-cli", version)]
struct Cli {
    /// `development` or `production`.
    #[arg(long)]
    mode: Option<Mode>,

    /// Identity API base URL.
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the identity API who is signed in.
    Whoami,
    /// Sign in with an account and password.
    Login { account: String, password: String },
    /// Sign out.
    Logout,
    /// Sign in, refresh, then sign out, printing the session after each.
    Session { account: String, password: String },
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), UsergateError> {
    usergate::init_tracing();
    let cli = Cli::parse();

    let mut builder = SessionStoreBuilder::new().config(Config::from_env()?);
    if let Some(mode) = cli.mode {
        builder = builder.mode(mode);
    }
    if let Some(url) = &cli.api_url {
        builder = builder.api_url(url);
    }
    let store = builder.build(TracingNotifier)?;

    match cli.command {
        Command::Whoami => {
            let outcome = store.refresh_current_user().await;
            println!("refresh: {outcome:?}");
        }
        Command::Login { account, password } => {
            log_in(&store, Credentials::new(account, password)).await;
        }
        Command::Logout => {
            let outcome = store.log_out().await;
            println!("logout: {outcome:?}");
        }
        Command::Session { account, password } => {
            log_in(&store, Credentials::new(account, password)).await;
            print_session(&store);
            let outcome = store.refresh_current_user().await;
            println!("refresh: {outcome:?}");
            print_session(&store);
            let outcome = store.log_out().await;
            println!("logout: {outcome:?}");
        }
    }

    print_session(&store);
    Ok(())
}

async fn log_in(
    store: &HttpSessionStore<TracingNotifier>,
    credentials: Credentials,
) {
    match store.log_in(&credentials).await {
        LoginOutcome::Authenticated(user) => println!("login: signed in as {user}"),
        LoginOutcome::Failed => println!("login: failed"),
    }
}

fn print_session(store: &HttpSessionStore<TracingNotifier>) {
    match store.current_user() {
        Some(user) => println!("session [{}]: {user}", store.mode()),
        None => println!("session [{}]: no user", store.mode()),
    }
}
