use clap::Parser;
use error_stack::Result;
use thiserror::Error;

mod check_email;
mod force_register;

#[derive(Debug, Error)]
#[error("Command failed")]
pub struct CliError;

/// Command line options for warden.
#[derive(Debug, Parser)]
#[command(
    about = "Administrative tools for warden",
    version,
    author,
    long_about
)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

impl Cli {
    pub fn run(self) -> Result<(), CliError> {
        match self.subcommand {
            Subcommand::ForceRegister(args) => self::force_register::run(args),
            Subcommand::CheckEmail(args) => {
                self::check_email::run(&args);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    ForceRegister(self::force_register::ForceRegisterCommand),
    CheckEmail(self::check_email::CheckEmailCommand),
}
