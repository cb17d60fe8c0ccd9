use clap::Parser;
use warden::email::{looks_random, EmailAddress};

/// Tell whether an email address looks randomly generated
#[derive(Debug, Parser)]
pub struct CheckEmailCommand {
    /// A full email address or only its local part.
    pub email: String,
    /// Do not ignore dots in Gmail addresses.
    #[clap(long)]
    pub no_normalize: bool,
}

pub fn run(args: &CheckEmailCommand) {
    let local_part = match EmailAddress::parse(&args.email, !args.no_normalize) {
        Some(address) => address.normalized_local_part.into_owned(),
        None => args.email.clone(),
    };

    if looks_random(&local_part) {
        println!("{local_part:?} looks randomly generated");
    } else {
        println!("{local_part:?} looks fine");
    }
}
