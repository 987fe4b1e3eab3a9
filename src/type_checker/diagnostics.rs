use tracing::debug;

use crate::errors::errors::Error;

/// Collects non-fatal errors. Recording never interrupts the caller.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn error(&mut self, error: Error) {
        debug!(
            kind = error.get_error_name(),
            offset = error.get_position().0,
            file = %error.get_position().1,
            "{}",
            error
        );
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded errors of the given kind, e.g. `"TypeMismatch"`.
    pub fn count_of(&self, kind: &str) -> usize {
        self.errors
            .iter()
            .filter(|error| error.get_error_name() == kind)
            .count()
    }
}
