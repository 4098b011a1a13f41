//! Company profile types (§3.1).

use serde::{Deserialize, Serialize};

/// Immutable-for-a-session company profile, resolved by `CompanyCatalog`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyProfile {
    pub company_id: String,
    pub display_name: String,
    pub talent_profile: String,
    #[serde(default)]
    pub core_competencies: Vec<String>,
    #[serde(default)]
    pub tech_focus: Vec<String>,
    #[serde(default)]
    pub interview_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_culture: Option<String>,
    #[serde(default)]
    pub technical_challenges: Vec<String>,
}

impl CompanyProfile {
    /// The generic fallback profile PersonaFactory/QuestionPlanner must use
    /// when `CompanyCatalog::get_profile` returns `NotFound` (§4.1).
    pub fn generic_fallback(company_id: impl Into<String>) -> Self {
        let company_id = company_id.into();
        Self {
            display_name: company_id.clone(),
            company_id,
            talent_profile: "A growing technology company seeking well-rounded engineers."
                .to_string(),
            core_competencies: vec!["problem solving".to_string(), "communication".to_string()],
            tech_focus: vec!["general software engineering".to_string()],
            interview_keywords: vec![],
            company_culture: None,
            technical_challenges: vec![],
        }
    }
}
