//! PersonaFactory (§4.2): builds the AI co-candidate persona for a session.
//!
//! Three-step behavior, exactly as specified: a company-specific AI résumé
//! lookup, then an LLM-generated persona, then a deterministic default.
//! `create_persona` never returns an error — PersonaFactory's one job is to
//! always hand the orchestrator a well-formed persona.

use interview_core::persona::{AICandidatePersona, Background};
use interview_core::traits::{AiResumeRecord, ChatMessage, LlmBackend, ResumeRepository};
use interview_config::prompts;
use interview_core::company::CompanyProfile;

/// Builds personas. Holds no state of its own; takes its collaborators by
/// reference so callers can swap in mocks freely.
pub struct PersonaFactory;

impl PersonaFactory {
    /// `create_persona(company_id, position) -> AICandidatePersona` (§4.2).
    ///
    /// `resumes` is optional because not every deployment wires a résumé
    /// store; a missing repository is treated the same as a present
    /// repository returning `None` for this company/position.
    pub async fn create_persona(
        company: &CompanyProfile,
        position: &str,
        resumes: Option<&dyn ResumeRepository>,
        llm: &dyn LlmBackend,
    ) -> AICandidatePersona {
        if let Some(resumes) = resumes {
            match resumes.find_ai_resume(&company.company_id, position).await {
                Ok(Some(resume)) => {
                    return persona_from_resume(&company.company_id, position, &resume);
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(error = %err, "ai resume lookup failed, falling back to LLM generation");
                }
            }
        }

        match generate_via_llm(company, position, llm).await {
            Some(persona) => persona,
            None => {
                tracing::warn!(
                    company_id = %company.company_id,
                    position,
                    "persona generation failed, using deterministic default persona"
                );
                AICandidatePersona::default_for(&company.company_id, position)
            }
        }
    }
}

fn persona_from_resume(company_id: &str, position: &str, resume: &AiResumeRecord) -> AICandidatePersona {
    AICandidatePersona {
        name: "춘식이".to_string(),
        summary: resume.title.clone(),
        background: Background {
            career_years: 3,
            current_position: position.to_string(),
            education: vec![],
        },
        technical_skills: extract_lines(&resume.content, "skills:"),
        projects: extract_lines(&resume.content, "projects:"),
        experiences: extract_lines(&resume.content, "experience:"),
        strengths: vec![],
        weaknesses: vec![],
        motivation: format!("Wants to grow as a {position} at {company_id}."),
        career_goal: "Become a senior engineer in this field.".to_string(),
        personality_traits: vec![],
        interview_style: "measured, example-driven answers".to_string(),
        resume_id: Some(resume.ai_resume_id.clone()),
    }
}

/// Pulls a `key:` section's comma-separated values out of free-text résumé
/// content; returns an empty list if the section is absent, which is fine —
/// the persona's other fields still carry useful signal.
fn extract_lines(content: &str, key: &str) -> Vec<String> {
    content
        .lines()
        .find(|line| line.to_lowercase().starts_with(key))
        .map(|line| {
            line.splitn(2, ':')
                .nth(1)
                .unwrap_or("")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(serde::Deserialize)]
struct PersonaSchema {
    summary: String,
    #[serde(default)]
    technical_skills: Vec<String>,
    #[serde(default)]
    projects: Vec<String>,
    #[serde(default)]
    experiences: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    motivation: String,
    career_goal: String,
    #[serde(default)]
    personality_traits: Vec<String>,
    interview_style: String,
}

async fn generate_via_llm(
    company: &CompanyProfile,
    position: &str,
    llm: &dyn LlmBackend,
) -> Option<AICandidatePersona> {
    let messages = vec![
        ChatMessage::system(prompts::persona_system_prompt(company, position)),
        ChatMessage::user(format!(
            "Schema: {{summary, technical_skills[], projects[], experiences[], \
             strengths[], weaknesses[], motivation, career_goal, \
             personality_traits[], interview_style}}"
        )),
    ];

    let result = llm.generate(&messages).await.ok()?;
    let parsed: PersonaSchema = serde_json::from_str(result.text.trim()).ok()?;

    Some(AICandidatePersona {
        name: "춘식이".to_string(),
        summary: parsed.summary,
        background: Background {
            career_years: 3,
            current_position: position.to_string(),
            education: vec![],
        },
        technical_skills: parsed.technical_skills,
        projects: parsed.projects,
        experiences: parsed.experiences,
        strengths: parsed.strengths,
        weaknesses: parsed.weaknesses,
        motivation: parsed.motivation,
        career_goal: parsed.career_goal,
        personality_traits: parsed.personality_traits,
        interview_style: parsed.interview_style,
        resume_id: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use interview_llm::MockLlmBackend;

    #[tokio::test]
    async fn falls_back_to_default_persona_on_malformed_llm_output() {
        let llm = MockLlmBackend::new();
        llm.push_response("not json");
        let company = CompanyProfile::generic_fallback("naver");

        let persona = PersonaFactory::create_persona(&company, "backend", None, &llm).await;

        assert_eq!(persona, AICandidatePersona::default_for("naver", "backend"));
    }

    #[tokio::test]
    async fn falls_back_to_default_persona_on_llm_error() {
        let llm = MockLlmBackend::new();
        llm.push_failure(interview_core::traits::LlmError::Timeout);
        let company = CompanyProfile::generic_fallback("kakao");

        let persona = PersonaFactory::create_persona(&company, "frontend", None, &llm).await;

        assert_eq!(persona.name, "춘식이");
        assert_eq!(persona.background.career_years, 3);
    }

    #[tokio::test]
    async fn parses_well_formed_llm_json() {
        let llm = MockLlmBackend::new();
        llm.push_response(
            r#"{"summary":"a concise backend engineer","technical_skills":["Rust"],
                "projects":[],"experiences":[],"strengths":[],"weaknesses":[],
                "motivation":"grow","career_goal":"lead","personality_traits":[],
                "interview_style":"direct"}"#,
        );
        let company = CompanyProfile::generic_fallback("naver");

        let persona = PersonaFactory::create_persona(&company, "backend", None, &llm).await;

        assert_eq!(persona.summary, "a concise backend engineer");
        assert_eq!(persona.technical_skills, vec!["Rust".to_string()]);
    }
}
