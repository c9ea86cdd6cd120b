//! Advisory chat proxy for E-Farmer.
//!
//! Forwards a farmer's question to a hosted generative-text service with a
//! fixed advisor persona and always hands back one displayable reply, even
//! when the service is unconfigured or failing.

pub mod advisor;
pub mod client;
pub mod error;
pub mod prompt;
pub mod session;

pub use advisor::{Advisor, AdvisorSettings, FALLBACK_REPLY, REPHRASE_REPLY, STANDBY_REPLY};
pub use client::{GeminiClient, GenerativeTextService};
pub use error::AdvisorError;
pub use prompt::{compose_prompt, system_instruction, GenerationRequest};
pub use session::{AdvisoryMessage, ChatSession, Role, GREETING};
