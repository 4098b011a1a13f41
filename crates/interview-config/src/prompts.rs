//! Prompt template constants shared by `interview-planner`'s generator and
//! `interview-persona`'s factory (§4.2, §4.3.3).

use interview_core::company::CompanyProfile;
use interview_core::persona::AICandidatePersona;
use interview_core::role::Role;

/// Fixed text for the first turn, per §4.3.1 rule 1.
pub const INTRO_QUESTION_TEXT: &str = "Self-introduction, please.";

/// Welcome banner `InterviewService::start_ai_competition` returns alongside
/// the first question (§6.1's `intro_message` field), distinct from the
/// self-introduction prompt itself.
pub fn intro_message_text(company_display_name: &str) -> String {
    format!("Welcome! You're about to begin a mock interview with {company_display_name}.")
}

/// Delimiter the generator splits a raw LLM completion on to separate the
/// question body from its stated intent (§4.3.3).
pub const INTENT_DELIMITER: &str = "intent:";

/// Fixed text for the second turn, keyed on the company's display name
/// (§4.3.1 rule 2).
pub fn motivation_question_text(company_display_name: &str) -> String {
    format!("Why do you want to work at {company_display_name}?")
}

/// System-role prompt for a main or common-follow-up question (§4.3.3).
pub fn interviewer_system_prompt(company: &CompanyProfile, role: Role) -> String {
    format!(
        "You are a {role} interviewer at {company}; ask one concise, polite \
         question with an '{delim}' line.",
        role = role,
        company = company.display_name,
        delim = INTENT_DELIMITER,
    )
}

/// User-role prompt assembling recent Q/A context, company highlights,
/// persona highlights, and the main-vs-follow-up directive.
pub fn interviewer_user_prompt(
    company: &CompanyProfile,
    persona: &AICandidatePersona,
    recent_context: &str,
    directive: &str,
) -> String {
    format!(
        "Company focus: {tech_focus}\n\
         Core competencies: {competencies}\n\
         AI candidate: {persona_name}, {position}\n\
         Recent context:\n{recent_context}\n\
         {directive}",
        tech_focus = company.tech_focus.join(", "),
        competencies = company.core_competencies.join(", "),
        persona_name = persona.name,
        position = persona.background.current_position,
        recent_context = recent_context,
        directive = directive,
    )
}

/// Directive text for a `RoleMain` generation call.
pub fn main_question_directive(role: Role) -> String {
    format!("Ask a new main {role} question, not a follow-up.")
}

/// Directive text for a `RoleFollowUpCommon` generation call.
pub fn common_follow_up_directive(role: Role) -> String {
    format!("Ask one common follow-up {role} question for both candidates.")
}

/// Directive text for a `RoleFollowUpIndividual` generation call: the
/// generator asks for two distinct follow-ups in a single completion
/// (§4.3.2), separated by this marker.
pub const INDIVIDUAL_SPLIT_MARKER: &str = "---AI---";

pub fn individual_follow_up_directive(role: Role) -> String {
    format!(
        "Ask two distinct {role} follow-up questions in this exact format: \
         a question for the human candidate's previous answer, then the \
         literal line '{marker}', then a question for the AI candidate's \
         previous answer.",
        role = role,
        marker = INDIVIDUAL_SPLIT_MARKER,
    )
}

/// System-role prompt for PersonaFactory's LLM-generation step (§4.2 step 2).
pub fn persona_system_prompt(company: &CompanyProfile, position: &str) -> String {
    format!(
        "You are generating a realistic AI candidate persona for a {position} \
         interview at {company}. Respond with a single JSON object matching \
         the requested schema exactly, with no surrounding prose.",
        position = position,
        company = company.display_name,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motivation_question_includes_company_name() {
        assert!(motivation_question_text("네이버").contains("네이버"));
    }

    #[test]
    fn directives_mention_role() {
        assert!(main_question_directive(Role::Hr).to_lowercase().contains("hr"));
    }
}
