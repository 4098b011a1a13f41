//! Bundled, read-only company catalog (§4.1).
//!
//! This is the default `CompanyProfile` source; `interview-persistence`'s
//! `CompanyRepository` implementations model the alternative "persisted
//! tables" data source named in spec.md, but this catalog is what actually
//! gets wired up absent an external store.

use interview_core::company::CompanyProfile;
use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("unknown company: {0}")]
    NotFound(String),
}

/// Canonicalizes a display name (Korean names from `original_source`,
/// case-insensitive English codes) to a stable `company_id`. Names not in
/// the table fall back to the lowercased input, per spec.md §4.1.
pub fn resolve(name: &str) -> String {
    let trimmed = name.trim();
    for (display, id) in CANONICAL_NAMES {
        if *display == trimmed {
            return id.to_string();
        }
    }
    trimmed.to_lowercase()
}

/// Looks up a bundled profile by its canonical `company_id`.
pub fn get_profile(company_id: &str) -> Result<CompanyProfile, CatalogError> {
    PROFILES
        .iter()
        .find(|p| p.company_id == company_id)
        .cloned()
        .ok_or_else(|| CatalogError::NotFound(company_id.to_string()))
}

/// Thin struct wrapper so callers can depend on a type rather than free
/// functions, mirroring how the rest of the workspace exposes its services.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompanyCatalog;

impl CompanyCatalog {
    pub fn resolve(&self, name: &str) -> String {
        resolve(name)
    }

    pub fn get_profile(&self, company_id: &str) -> Result<CompanyProfile, CatalogError> {
        get_profile(company_id)
    }
}

const CANONICAL_NAMES: &[(&str, &str)] = &[
    ("네이버", "naver"),
    ("카카오", "kakao"),
    ("라인", "line"),
    ("쿠팡", "coupang"),
    ("토스", "toss"),
    ("배달의민족", "baemin"),
];

static PROFILES: Lazy<Vec<CompanyProfile>> = Lazy::new(|| {
    vec![
        CompanyProfile {
            company_id: "naver".to_string(),
            display_name: "네이버".to_string(),
            talent_profile: "대용량 트래픽을 다루는 검색/플랫폼 엔지니어".to_string(),
            core_competencies: vec![
                "대용량 처리".to_string(),
                "시스템 최적화".to_string(),
                "문제 해결".to_string(),
            ],
            tech_focus: vec![
                "Java".to_string(),
                "Spring Boot".to_string(),
                "MySQL".to_string(),
                "Redis".to_string(),
            ],
            interview_keywords: vec![
                "검색 엔진".to_string(),
                "성능 최적화".to_string(),
                "대규모 시스템".to_string(),
            ],
            company_culture: Some("기술적 깊이와 데이터 중심 의사결정을 중시".to_string()),
            technical_challenges: vec!["검색 응답시간 개선".to_string(), "시스템 안정성 확보".to_string()],
        },
        CompanyProfile {
            company_id: "kakao".to_string(),
            display_name: "카카오".to_string(),
            talent_profile: "플랫폼과 메시징 서비스를 만드는 풀스택 엔지니어".to_string(),
            core_competencies: vec![
                "플랫폼 설계".to_string(),
                "MSA 아키텍처".to_string(),
                "협업".to_string(),
            ],
            tech_focus: vec![
                "Node.js".to_string(),
                "React".to_string(),
                "MongoDB".to_string(),
                "Kubernetes".to_string(),
            ],
            interview_keywords: vec![
                "마이크로서비스".to_string(),
                "사회적 가치".to_string(),
                "플랫폼 확장성".to_string(),
            ],
            company_culture: Some("개방적이고 사회적 가치를 중시하는 협업 문화".to_string()),
            technical_challenges: vec!["모놀리식 분해".to_string(), "메시징 확장성".to_string()],
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_korean_names() {
        assert_eq!(resolve("네이버"), "naver");
        assert_eq!(resolve("카카오"), "kakao");
    }

    #[test]
    fn unknown_name_falls_back_to_lowercase() {
        assert_eq!(resolve("Acme Corp"), "acme corp");
    }

    #[test]
    fn known_profile_round_trips() {
        let profile = get_profile("naver").expect("naver is bundled");
        assert_eq!(profile.display_name, "네이버");
    }

    #[test]
    fn unknown_profile_errors() {
        assert!(get_profile("nonexistent").is_err());
    }
}
