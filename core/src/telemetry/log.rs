use log::{debug, info, warn};

/// Thin wrapper over the `log` facade that tags every record with a run name.
pub struct LogManager {
    scope: String,
}

impl LogManager {
    pub fn new() -> Self {
        Self::scoped("cw")
    }

    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
        }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    pub fn detail(&self, message: &str) {
        debug!("[{}] {}", self.scope, message);
    }

    pub fn warning(&self, message: &str) {
        warn!("[{}] {}", self.scope, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
