//! AI-question textual adjustment (§4.4.5): before the AI persona answers a
//! question, any vocative addressed to the human candidate by name is
//! rewritten so the AI isn't asked a question literally addressed to
//! someone else.

use regex::Regex;

/// Compiles the per-session vocative pattern for `user_name`. `user_name` is
/// fixed for the lifetime of a session (never rewritten), so this is built
/// once at `Orchestrator` construction rather than per call.
pub fn compile_vocative_pattern(user_name: &str) -> Regex {
    let escaped = regex::escape(user_name);
    Regex::new(&format!("{escaped}님,")).expect("escaped literal pattern always compiles")
}

/// Replaces `"{user_name}님,"`-shaped vocatives with `"AI 지원자님,"`.
/// Idempotent: the replacement text never again matches `pattern`, since
/// doing so would require `user_name` itself to equal `"AI 지원자"`.
pub fn adjust_for_ai(pattern: &Regex, question_text: &str) -> String {
    pattern.replace_all(question_text, "AI 지원자님,").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_named_vocative() {
        let pattern = compile_vocative_pattern("Alice");
        let adjusted = adjust_for_ai(&pattern, "Alice님, 자기소개를 해주세요.");
        assert_eq!(adjusted, "AI 지원자님, 자기소개를 해주세요.");
    }

    #[test]
    fn leaves_text_without_vocative_untouched() {
        let pattern = compile_vocative_pattern("Alice");
        let text = "자기소개를 해주세요.";
        assert_eq!(adjust_for_ai(&pattern, text), text);
    }

    #[test]
    fn is_idempotent_under_repeated_application() {
        let pattern = compile_vocative_pattern("Alice");
        let once = adjust_for_ai(&pattern, "Alice님, 질문입니다.");
        let twice = adjust_for_ai(&pattern, &once);
        assert_eq!(once, twice);
    }
}
