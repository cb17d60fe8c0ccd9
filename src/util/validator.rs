use std::borrow::Cow;

use error_stack::Report;
use thiserror::Error;
use validator::ValidateError;

#[derive(Debug, Error)]
#[error("Invalid given data occurred")]
pub struct Wrapper;

/// Flattens a [`ValidateError`] into a report where every failed
/// field is attached as `path.to.field: message`.
pub trait IntoValidatorReport<T> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper>;
}

impl<T> IntoValidatorReport<T> for Result<T, ValidateError> {
    fn into_validator_report(self) -> error_stack::Result<T, Wrapper> {
        fn read_errors<'a>(
            err: &'a ValidateError,
            path: &mut Vec<Cow<'a, str>>,
            mut report: Report<Wrapper>,
        ) -> Report<Wrapper> {
            match err {
                ValidateError::Fields(fields) => {
                    for (field, data) in fields {
                        path.push(Cow::Borrowed(field));
                        report = read_errors(data, path, report);
                        path.pop();
                    }
                    report
                }
                ValidateError::Messages(messages) => {
                    let field = path.join(".");
                    for message in messages {
                        report = report.attach_printable(format!("{field}: {message}"));
                    }
                    report
                }
            }
        }

        self.map_err(|error| read_errors(&error, &mut Vec::new(), Report::new(Wrapper)))
    }
}
