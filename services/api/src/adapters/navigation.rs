//! services/api/src/adapters/navigation.rs
//!
//! Over HTTP a redirect is not performed by the server; the requested path is
//! captured and handed back to the client in the response body.

use learnhub_core::ports::Navigator;
use std::sync::Mutex;

/// Remembers the last path the core asked to navigate to.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    target: Mutex<Option<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Option<String> {
        self.target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, path: &str) {
        *self
            .target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_the_last_redirect() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.take(), None);
        navigator.redirect("/login");
        navigator.redirect("/learner/courses");
        assert_eq!(navigator.take().as_deref(), Some("/learner/courses"));
        assert_eq!(navigator.take(), None);
    }
}
