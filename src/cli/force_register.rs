use clap::Parser;
use error_stack::{Report, Result, ResultExt};
use warden::commands::{CommandSource, ForceRegister};
use warden::store::{MemoryStore, PlayerStore};
use warden::util::Sensitive;
use warden::App;

use super::CliError;

/// Register a player as the console
#[derive(Debug, Parser)]
pub struct ForceRegisterCommand {
    pub nickname: String,
    pub password: Sensitive<String>,
    pub email: String,
    /// Run every check against an empty in-memory store instead of
    /// the database. Nothing is saved.
    #[clap(long)]
    pub dry_run: bool,
}

/// The server console. It holds every permission and has no address.
struct ConsoleSource;

impl CommandSource for ConsoleSource {
    fn has_permission(&self, _node: &str) -> bool {
        true
    }

    fn send_message(&self, message: &str) {
        println!("{message}");
    }
}

pub fn run(args: ForceRegisterCommand) -> Result<(), CliError> {
    let app = App::load().change_context(CliError)?;
    warden::logging::init(&app.config.logging).change_context(CliError)?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .change_context(CliError)
        .attach_printable("could not build tokio runtime")?
        .block_on(async move {
            if args.dry_run {
                let cmd = app.force_register(MemoryStore::new()).change_context(CliError)?;
                execute(&cmd, &args).await
            } else {
                let store = app.player_store().await.change_context(CliError)?;
                let cmd = app.force_register(store).change_context(CliError)?;
                execute(&cmd, &args).await
            }
        })
}

async fn execute<S: PlayerStore>(
    cmd: &ForceRegister<S>,
    args: &ForceRegisterCommand,
) -> Result<(), CliError> {
    let input = [
        args.nickname.as_str(),
        args.password.as_str(),
        args.email.as_str(),
    ];

    let outcome = cmd
        .execute(&ConsoleSource, &input)
        .await
        .change_context(CliError)?;

    if outcome.is_success() {
        Ok(())
    } else {
        Err(Report::new(CliError).attach_printable(format!("player was not registered: {outcome:?}")))
    }
}
