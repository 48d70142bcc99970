//! Construction options for `Validator`.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::transport::Transport;

pub const DEFAULT_BASE_URL: &str = "https://api.countriesdb.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Optional overrides applied by `Validator::with_config`.
///
/// Every field is independent. An empty `base_url` counts as unset. `timeout`
/// configures the default reqwest transport and is ignored when `transport`
/// is supplied, since a custom transport owns its own timeouts.
#[derive(Clone, Default)]
pub struct ValidatorConfig {
    pub base_url: Option<String>,
    pub timeout: Option<Duration>,
    pub transport: Option<Arc<dyn Transport>>,
}

impl ValidatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub(crate) fn resolved_base_url(&self) -> &str {
        match self.base_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => DEFAULT_BASE_URL,
        }
    }
}

impl fmt::Debug for ValidatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("transport", &self.transport.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_base_url_falls_back_to_default() {
        let config = ValidatorConfig::new().base_url("");
        assert_eq!(config.resolved_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_override_is_used_verbatim() {
        let config = ValidatorConfig::new().base_url("not even a url");
        assert_eq!(config.resolved_base_url(), "not even a url");
    }
}
