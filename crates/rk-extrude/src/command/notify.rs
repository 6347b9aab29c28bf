//! Failure notification sinks

/// Receives the message of a failed command
///
/// The host shows it modally; headless hosts log it.
pub trait Notifier {
    /// Report a failure with a title and a human-readable message
    fn notify_failure(&mut self, title: &str, message: &str);
}

/// Notifier that writes failures to the tracing log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify_failure(&mut self, title: &str, message: &str) {
        tracing::error!("{}: {}", title, message);
    }
}

/// Notifier that keeps every failure it receives
#[derive(Debug, Default, Clone)]
pub struct CollectingNotifier {
    failures: Vec<(String, String)>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Received (title, message) pairs, oldest first
    pub fn failures(&self) -> &[(String, String)] {
        &self.failures
    }
}

impl Notifier for CollectingNotifier {
    fn notify_failure(&mut self, title: &str, message: &str) {
        self.failures.push((title.to_string(), message.to_string()));
    }
}
