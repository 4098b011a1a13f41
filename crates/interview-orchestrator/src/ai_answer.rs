//! Generates the AI co-candidate's answer to a question, applying the
//! vocative adjustment first (§4.4.5) and falling back to a polite apology
//! on failure rather than aborting the session (§4.4.7).

use interview_core::persona::AICandidatePersona;
use interview_core::question::QuestionRecord;
use interview_core::traits::{ChatMessage, LlmBackend};
use regex::Regex;

pub const APOLOGY_TEXT: &str =
    "I'm sorry, I wasn't able to form an answer to that question just now.";

pub async fn generate_ai_answer(
    record: &QuestionRecord,
    persona: &AICandidatePersona,
    vocative_pattern: &Regex,
    llm: &dyn LlmBackend,
) -> (String, u64) {
    let adjusted_question = crate::vocative::adjust_for_ai(vocative_pattern, &record.content);

    let messages = vec![
        ChatMessage::system(format!(
            "You are {name}, a {position} candidate being interviewed alongside a human \
             candidate. Answer in character, concisely.",
            name = persona.name,
            position = persona.background.current_position,
        )),
        ChatMessage::user(adjusted_question),
    ];

    match llm.generate(&messages).await {
        Ok(result) => (result.text, result.total_time_ms),
        Err(err) => {
            tracing::warn!(error = %err, "ai answer generation failed, using apology fallback");
            (APOLOGY_TEXT.to_string(), 0)
        }
    }
}
