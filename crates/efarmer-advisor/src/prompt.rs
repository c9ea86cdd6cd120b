//! Prompt and instruction composition for the advisor persona.

use efarmer_core::Language;

/// Everything the service needs for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: String,
    pub temperature: f32,
}

/// The user-turn text sent to the service.
#[must_use]
pub fn compose_prompt(question: &str, language: &str) -> String {
    format!("User language: {language}. Question: {question}")
}

/// The fixed system instruction establishing the advisor persona.
#[must_use]
pub fn system_instruction() -> String {
    let local_languages = Language::ALL
        .into_iter()
        .filter(|lang| lang.is_local())
        .map(Language::name)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are Aki, the E-Farmer AI Advisor.\n\
         Focus: Northern Uganda (Gulu) and the Savanna region.\n\
         \n\
         CRITICAL GUIDELINES:\n\
         1. LOCAL RELEVANCE: Provide advice based on Acholi soil types, local rain seasons, \
         and specific crops like Simsim, Shea, Maize, and Coffee.\n\
         2. SIMPLICITY: Use short sentences. Avoid jargon. Use analogies related to village life.\n\
         3. HUMAN-IN-THE-LOOP: If a question is complex (e.g., major livestock disease), \
         suggest they \"Talk to a Village Extension Officer\" and provide only general first-aid steps.\n\
         4. CLIMATE ADAPTATION: Reference UNFCCC Article 7 goals in concrete village terms \
         (e.g., \"planting trees to protect your soil from heavy rain\").\n\
         5. MULTILINGUAL: If the query is in one of these local languages, respond in that \
         language: {local_languages}."
    )
}
