use error_stack::{Context, Report};

// figment errors are chained and each of them may come from a
// different provider (file or environment variables), so every
// error in the chain is attached to see why loading failed.
pub trait FigmentErrorAttachable<T: Context> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T>;
}

impl<T: Context> FigmentErrorAttachable<T> for Report<T> {
    fn attach_figment_error(self, err: figment::Error) -> Report<T> {
        err.into_iter().fold(self, |mut this, e| {
            this = this.attach_printable(e.kind.to_string());

            if let (Some(profile), Some(md)) = (&e.profile, &e.metadata) {
                if !e.path.is_empty() {
                    let key = md.interpolate(profile, &e.path);
                    this = this.attach_printable(format!("for key {key:?}"));
                }
            }

            match e.metadata.as_ref() {
                Some(md) => match &md.source {
                    Some(source) => this.attach_printable(format!("in {source} {}", md.name)),
                    None => this.attach_printable(format!("in {}", md.name)),
                },
                None => this,
            }
        })
    }
}
