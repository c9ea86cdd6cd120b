//! The total `get_advice` operation.

use efarmer_core::AppConfig;

use crate::client::{GeminiClient, GenerativeTextService};
use crate::error::AdvisorError;
use crate::prompt::{compose_prompt, system_instruction, GenerationRequest};

/// Returned when no service credential is configured.
pub const STANDBY_REPLY: &str = "I am currently disconnected from the village network. \
Please check back later or use our E-Library guides.";

/// Returned when the service answers without usable text.
pub const REPHRASE_REPLY: &str =
    "I processed your request but couldn't generate a clear answer. Try rephrasing.";

/// Returned when the service call fails for any reason.
pub const FALLBACK_REPLY: &str = "I am resting my ears. Please try again soon, \
or check the E-Library for written guides.";

/// Model selection and sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorSettings {
    pub model: String,
    pub temperature: f32,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            model: "gemini-3-flash-preview".to_string(),
            temperature: 0.6,
        }
    }
}

impl AdvisorSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            model: config.advisor_model.clone(),
            temperature: config.advisor_temperature,
        }
    }
}

/// Advisory proxy over a [`GenerativeTextService`].
///
/// Holds no service at all in standby mode, so a missing credential can never
/// reach the network.
pub struct Advisor<S> {
    service: Option<S>,
    settings: AdvisorSettings,
    system_instruction: String,
}

impl<S> Advisor<S> {
    #[must_use]
    pub fn new(service: Option<S>, settings: AdvisorSettings) -> Self {
        Self {
            service,
            settings,
            system_instruction: system_instruction(),
        }
    }

    /// Build the service only when a non-blank credential is present.
    ///
    /// # Errors
    ///
    /// Propagates whatever `build` returns when it is called.
    pub fn connect<F>(
        credential: Option<&str>,
        settings: AdvisorSettings,
        build: F,
    ) -> Result<Self, AdvisorError>
    where
        F: FnOnce(&str) -> Result<S, AdvisorError>,
    {
        let service = match credential.map(str::trim).filter(|k| !k.is_empty()) {
            Some(key) => Some(build(key)?),
            None => {
                tracing::warn!("advisor credential missing; advisor will run in standby mode");
                None
            }
        };
        Ok(Self::new(service, settings))
    }

    #[must_use]
    pub fn is_standby(&self) -> bool {
        self.service.is_none()
    }

    #[cfg(test)]
    pub(crate) fn service(&self) -> Option<&S> {
        self.service.as_ref()
    }
}

impl Advisor<GeminiClient> {
    /// Build a Gemini-backed advisor from application config.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisorError::Http`] if the HTTP client cannot be constructed.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, AdvisorError> {
        let timeout_secs = config.advisor_timeout_secs;
        let base_url = config.advisor_base_url.clone();
        Self::connect(
            config.advisor_api_key.as_deref(),
            AdvisorSettings::from_app_config(config),
            |key| GeminiClient::with_base_url(key, timeout_secs, &base_url),
        )
    }
}

impl<S> Advisor<S>
where
    S: GenerativeTextService + Sync,
{
    /// Ask the advisor one question. Always returns a displayable reply.
    ///
    /// Makes at most one outbound call and never retries. Callers are
    /// expected to skip blank questions before calling.
    pub async fn get_advice(&self, question: &str, language: &str) -> String {
        let Some(service) = &self.service else {
            tracing::warn!("advisor in standby mode; returning standby reply");
            return STANDBY_REPLY.to_string();
        };

        let request = GenerationRequest {
            model: self.settings.model.clone(),
            prompt: compose_prompt(question, language),
            system_instruction: self.system_instruction.clone(),
            temperature: self.settings.temperature,
        };

        match service.generate(&request).await {
            Ok(Some(text)) => {
                tracing::debug!(language, chars = text.len(), "advisor reply generated");
                text
            }
            Ok(None) => {
                tracing::info!(language, "advisor service returned no usable text");
                REPHRASE_REPLY.to_string()
            }
            Err(e) => {
                tracing::error!(error = %e, model = %self.settings.model, "advisor service call failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
