#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;

pub use error::*;
pub mod extras;

/// Types that can check their own contents after being loaded
/// from an untrusted source (config files, environment variables).
pub trait Validate {
    fn validate(&self) -> Result<(), ValidateError>;
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> Result<(), ValidateError> {
        match self {
            Some(value) => value.validate(),
            None => Ok(()),
        }
    }
}
