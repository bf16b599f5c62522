use super::BuildError;
use std::sync::Mutex;
use tracing::warn;

/// Delivers a build result to a callback at most once.
pub struct Completion<F> {
    callback: Mutex<Option<F>>,
}

impl<F> Completion<F>
where
    F: FnOnce(Result<(), BuildError>),
{
    pub fn new(callback: F) -> Self {
        Self {
            callback: Mutex::new(Some(callback)),
        }
    }

    /// Fires the callback. Returns `false`, dropping `result`, if it already fired.
    pub fn complete(&self, result: Result<(), BuildError>) -> bool {
        let callback = match self.callback.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match callback {
            Some(callback) => {
                callback(result);
                true
            }
            None => {
                warn!(result = ?result, "Build already completed, ignoring result");
                false
            }
        }
    }
}
