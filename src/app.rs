use error_stack::{Report, Result, ResultExt};
use std::sync::Arc;
use thiserror::Error;

use crate::commands::ForceRegister;
use crate::config::Config;
use crate::store::{PgPlayerStore, PlayerStore};

/// Loaded configuration and the services built from it.
#[derive(Debug, Clone)]
pub struct App {
    pub config: Arc<Config>,
}

#[derive(Debug, Error)]
#[error("Failed to initialize App struct")]
pub struct AppError;

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn load() -> Result<Self, AppError> {
        Config::load().map(Self::new).change_context(AppError)
    }

    /// Connects to the configured database and runs pending migrations.
    #[tracing::instrument(skip_all)]
    pub async fn player_store(&self) -> Result<PgPlayerStore, AppError> {
        let Some(cfg) = self.config.database.as_ref() else {
            return Err(Report::new(AppError).attach_printable("`database.url` is not configured"));
        };

        PgPlayerStore::connect(cfg).await.change_context(AppError)
    }

    pub fn force_register<S: PlayerStore>(&self, store: S) -> Result<ForceRegister<S>, AppError> {
        ForceRegister::from_config(&self.config, store).change_context(AppError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{CommandSource, Outcome};
    use crate::store::MemoryStore;
    use figment::Jail;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Console(Mutex<Vec<String>>);

    impl CommandSource for Console {
        fn has_permission(&self, _node: &str) -> bool {
            true
        }

        fn send_message(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn builds_commands_from_config() {
        Jail::expect_with(|jail| {
            jail.create_file("warden.toml", "[messages]\nusage = \"nope\"")?;

            let app = App::new(Config::figment().extract()?);
            let cmd = app.force_register(MemoryStore::new()).unwrap();

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            let console = Console::default();
            let outcome = rt.block_on(cmd.execute(&console, &["Steve"])).unwrap();
            assert_eq!(outcome, Outcome::Usage);
            assert_eq!(*console.0.lock().unwrap(), vec!["nope"]);
            Ok(())
        });
    }

    #[test]
    fn player_store_needs_database() {
        Jail::expect_with(|_| {
            let mut config: Config = Config::figment().extract()?;
            config.database = None;

            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();

            let app = App::new(config);
            let error = rt.block_on(app.player_store()).unwrap_err();
            assert!(format!("{error:?}").contains("database.url"));
            Ok(())
        });
    }
}
