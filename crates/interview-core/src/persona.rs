//! AI co-candidate persona types (§3.1).

use serde::{Deserialize, Serialize};

/// The AI co-candidate's background, constructed once per session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Background {
    pub career_years: u32,
    pub current_position: String,
    #[serde(default)]
    pub education: Vec<String>,
}

/// AI co-candidate persona, stable for the duration of the session
/// (invariant 3.2.6: assigned once, never rewritten).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AICandidatePersona {
    pub name: String,
    pub summary: String,
    pub background: Background,
    #[serde(default)]
    pub technical_skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub experiences: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    pub motivation: String,
    pub career_goal: String,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    pub interview_style: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<String>,
}

impl AICandidatePersona {
    /// The deterministic default persona PersonaFactory falls back to when
    /// the résumé lookup misses and the LLM call fails/parses incorrectly
    /// (§4.2). Deterministic for a given `(company_id, position)` pair, named
    /// "춘식이" per spec.md.
    pub fn default_for(company_id: &str, position: &str) -> Self {
        Self {
            name: "춘식이".to_string(),
            summary: format!(
                "A steady backend engineer applying for {position} at {company_id}, three years into their career."
            ),
            background: Background {
                career_years: 3,
                current_position: "Backend Engineer".to_string(),
                education: vec!["B.S. Computer Science".to_string()],
            },
            technical_skills: vec![
                "Java".to_string(),
                "Spring".to_string(),
                "SQL".to_string(),
            ],
            projects: vec!["Internal order-management service rewrite".to_string()],
            experiences: vec!["3 years as a backend engineer at a mid-size company".to_string()],
            strengths: vec!["reliability".to_string(), "steady communication".to_string()],
            weaknesses: vec!["tends to over-prepare for ambiguous questions".to_string()],
            motivation: format!("Wants to grow as a backend engineer at {company_id}."),
            career_goal: "Become a technical lead within five years.".to_string(),
            personality_traits: vec!["calm".to_string(), "methodical".to_string()],
            interview_style: "concise, example-driven answers".to_string(),
            resume_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_persona_is_deterministic() {
        let a = AICandidatePersona::default_for("naver", "backend");
        let b = AICandidatePersona::default_for("naver", "backend");
        assert_eq!(a, b);
        assert_eq!(a.name, "춘식이");
    }
}
