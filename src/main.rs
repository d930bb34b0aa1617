//! Account Sentry - interactive account compromise self-check
//!
//! Renders the indicator checklist once, then answers commands:
//! check/uncheck indicators, score, reset and public username lookup.
//!
//! Environment:
//!   ACCOUNT_SENTRY_LOOKUP_URL - lookup endpoint override (e.g. the proxy API)
//!   RUST_LOG                  - Log level (default: warn)

use account_sentry::ui::{self, Command};
use account_sentry::{AppConfig, Checklist, LookupResult, RobloxUsersClient, Session};

use eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// One thread: the session is only touched from the select loop below
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Quiet by default so logs don't interleave with the checklist
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = AppConfig::from_env()?;
    let client = RobloxUsersClient::with_endpoint(config.lookup_url.clone())?;
    info!(endpoint = %client.endpoint(), "Lookup client ready");

    let mut session = Session::new(Checklist::builtin()?);

    println!("🛡️  Account Sentry - is my account compromised?");
    println!("{}", ui::render_checklist(session.form.controls()));
    println!("Type 'help' for commands.");

    // Lookups run as independent tasks and report back here
    let (tx, mut rx) = mpsc::unbounded_channel::<LookupResult>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // Input closed: let outstanding lookups report first
                    drop(tx);
                    finish_pending(&mut session, &mut rx).await;
                    break;
                };
                if !handle_command(&mut session, &client, &tx, Command::parse(&line)) {
                    break;
                }
            }
            Some(result) = rx.recv() => apply_lookup(&mut session, result),
        }
    }

    println!("Bye. Stay safe.");
    Ok(())
}

fn apply_lookup(session: &mut Session, result: LookupResult) {
    debug!(success = result.is_success(), "Lookup resolved");
    session.finish_lookup(result);
    print!("{}", ui::render_lookup(session));
}

/// Wait for every lookup still in flight and show each result as it lands
async fn finish_pending(session: &mut Session, rx: &mut mpsc::UnboundedReceiver<LookupResult>) {
    while session.in_flight() > 0 {
        let Some(result) = rx.recv().await else { break };
        apply_lookup(session, result);
    }
}

/// Apply one command. Returns false when the user wants to leave.
fn handle_command(
    session: &mut Session,
    client: &RobloxUsersClient,
    tx: &mpsc::UnboundedSender<LookupResult>,
    command: Command,
) -> bool {
    match command {
        Command::Empty => {}
        Command::List => println!("{}", ui::render_checklist(session.form.controls())),
        Command::Mark { target, checked } => {
            let controls = session.form.controls();
            let Some(id) = ui::resolve_target(controls, &target).map(str::to_string) else {
                println!(
                    "No indicator '{}'. Use a number 1-{} or an id.",
                    target,
                    controls.len()
                );
                return true;
            };
            let applied = match checked {
                Some(value) => session.form.set_checked(&id, value).map(|_| value),
                None => session.form.toggle(&id),
            };
            match applied {
                Ok(value) => println!("{} {}", if value { "[x]" } else { "[ ]" }, id),
                Err(e) => println!("{}", e.message),
            }
        }
        Command::Score => {
            let score = session.score();
            print!("{}", ui::render_score(score));
        }
        Command::Reset => {
            session.reset();
            println!("Cleared. All indicators unchecked.");
        }
        Command::Lookup { username } => {
            session.username = username;
            if let Some(name) = session.begin_lookup() {
                let client = client.clone();
                let tx = tx.clone();
                // No cancellation: a newer lookup does not stop this one
                tokio::spawn(async move {
                    let result = client.lookup(&name).await;
                    let _ = tx.send(result);
                });
            }
            print!("{}", ui::render_lookup(session));
        }
        Command::Help => println!("{}", ui::help_text()),
        Command::Quit => return false,
        Command::Unknown(input) => println!("Unknown command: {} (try 'help')", input),
    }
    true
}
