//! Session-scoped chat transcript.
//!
//! The transcript is owned by the session, never by the advisor: the advisor
//! only returns strings and the session appends them.

use efarmer_core::Language;
use serde::Serialize;

use crate::advisor::Advisor;
use crate::client::GenerativeTextService;

/// The advisor's opening message in every new session.
pub const GREETING: &str = "Hello! I am Aki, your E-Farmer AI Advisor. \
How can I help you today with your crops or environmental questions?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Inquirer,
    Advisor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisoryMessage {
    pub role: Role,
    pub text: String,
}

impl AdvisoryMessage {
    fn inquirer(text: impl Into<String>) -> Self {
        Self {
            role: Role::Inquirer,
            text: text.into(),
        }
    }

    fn advisor(text: impl Into<String>) -> Self {
        Self {
            role: Role::Advisor,
            text: text.into(),
        }
    }
}

/// One user's chat session: selected language, append-only transcript, and
/// the pending flag a view uses for its typing indicator.
#[derive(Debug, Clone)]
pub struct ChatSession {
    language: Language,
    messages: Vec<AdvisoryMessage>,
    pending: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(Language::default())
    }
}

impl ChatSession {
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            language,
            messages: vec![AdvisoryMessage::advisor(GREETING)],
            pending: false,
        }
    }

    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    #[must_use]
    pub fn messages(&self) -> &[AdvisoryMessage] {
        &self.messages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true: a session always holds at least the greeting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Start a round: append the inquirer's message and mark the session pending.
    ///
    /// Returns the trimmed question to send, or `None` (and changes nothing)
    /// when the input is blank.
    pub fn begin_round(&mut self, input: &str) -> Option<String> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }
        self.messages.push(AdvisoryMessage::inquirer(question));
        self.pending = true;
        Some(question.to_string())
    }

    /// Finish a round: append the advisor's reply and clear the pending flag.
    pub fn complete_round(&mut self, reply: impl Into<String>) -> &AdvisoryMessage {
        self.pending = false;
        self.messages.push(AdvisoryMessage::advisor(reply));
        &self.messages[self.messages.len() - 1]
    }

    /// Run one full round against `advisor` in the session's language.
    ///
    /// Blank input is ignored and returns `None`. Otherwise the transcript
    /// grows by exactly two messages and the advisor's message is returned.
    pub async fn ask<S>(&mut self, advisor: &Advisor<S>, input: &str) -> Option<&AdvisoryMessage>
    where
        S: GenerativeTextService + Sync,
    {
        let question = self.begin_round(input)?;
        let reply = advisor
            .get_advice(&question, self.language.code())
            .await;
        Some(self.complete_round(reply))
    }
}
