//! Configuration validation with unknown field detection.
//!
//! Serde ignores fields it does not know, so a typo like `max_iteration`
//! silently falls back to the default. This module walks the raw JSON and
//! reports such fields, with a suggestion when one is close.

use std::collections::HashSet;

use serde_json::Value;

use super::Config;

/// Known top-level config field names.
const KNOWN_TOP_LEVEL: &[&str] = &["llm", "agent", "logging"];

/// Known fields for each section.
const KNOWN_LLM: &[&str] = &[
    "provider",
    "model",
    "api_key",
    "base_url",
    "timeout_secs",
    "max_tokens",
    "temperature",
];
const KNOWN_AGENT: &[&str] = &["max_iterations", "verbose", "workspace", "system_prompt"];
const KNOWN_LOGGING: &[&str] = &["format", "level", "file"];

/// A validation diagnostic.
#[derive(Debug)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub path: String,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum DiagnosticLevel {
    Ok,
    Warn,
    Error,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, path: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = match self.level {
            DiagnosticLevel::Ok => "[OK]",
            DiagnosticLevel::Warn => "[WARN]",
            DiagnosticLevel::Error => "[ERROR]",
        };
        if self.path.is_empty() {
            write!(f, "{} {}", prefix, self.message)
        } else {
            write!(f, "{} {}: {}", prefix, self.path, self.message)
        }
    }
}

/// Levenshtein distance over chars, for "did you mean?" suggestions.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (prev[j + 1] + 1).min(current[j] + 1).min(prev[j] + cost);
        }
        prev = current;
    }
    prev[b.len()]
}

/// Suggest the closest known field name (if distance <= 3).
pub fn suggest_field(unknown: &str, known: &[&str]) -> Option<String> {
    known
        .iter()
        .map(|k| (k, levenshtein(unknown, k)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(k, _)| format!("did you mean '{}'?", k))
}

fn check_keys(
    obj: &serde_json::Map<String, Value>,
    known: &[&str],
    prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> bool {
    let known_set: HashSet<&str> = known.iter().copied().collect();
    let mut has_unknown = false;

    for key in obj.keys() {
        if known_set.contains(key.as_str()) {
            continue;
        }
        has_unknown = true;
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        let message = match suggest_field(key, known) {
            Some(suggestion) => format!("Unknown field '{}' ({})", key, suggestion),
            None => format!("Unknown field '{}'", key),
        };
        diagnostics.push(Diagnostic::new(DiagnosticLevel::Error, &path, message));
    }

    has_unknown
}

/// Validate a raw JSON config value against known field names.
pub fn validate_config(raw: &Value) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    let obj = match raw.as_object() {
        Some(o) => o,
        None => {
            diagnostics.push(Diagnostic::new(
                DiagnosticLevel::Error,
                "",
                "Config must be a JSON object",
            ));
            return diagnostics;
        }
    };

    diagnostics.push(Diagnostic::new(DiagnosticLevel::Ok, "", "Valid JSON"));

    let mut has_unknown = check_keys(obj, KNOWN_TOP_LEVEL, "", &mut diagnostics);
    for (section, known) in [("llm", KNOWN_LLM), ("agent", KNOWN_AGENT), ("logging", KNOWN_LOGGING)] {
        if let Some(inner) = obj.get(section).and_then(|v| v.as_object()) {
            has_unknown |= check_keys(inner, known, section, &mut diagnostics);
        }
    }

    if !has_unknown {
        diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Ok,
            "",
            "All fields recognized",
        ));
    }

    if obj
        .get("llm")
        .and_then(|llm| llm.get("api_key"))
        .and_then(|v| v.as_str())
        .is_some_and(|k| !k.is_empty())
    {
        diagnostics.push(Diagnostic::new(
            DiagnosticLevel::Warn,
            "llm.api_key",
            "Stored in plain text; prefer OPENAI_API_KEY in the environment or .env",
        ));
    }

    diagnostics
}

/// Semantic checks on the effective configuration, as diagnostics.
pub fn validate_effective(config: &Config) -> Vec<Diagnostic> {
    let errors = config.validate();
    if errors.is_empty() {
        return vec![Diagnostic::new(
            DiagnosticLevel::Ok,
            "",
            "Effective configuration is usable",
        )];
    }
    errors
        .into_iter()
        .map(|e| Diagnostic::new(DiagnosticLevel::Error, "", e))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("hello", "hello"), 0);
        assert_eq!(levenshtein("hello", "helo"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
    }

    #[test]
    fn test_levenshtein_multibyte() {
        assert_eq!(levenshtein("café", "cafe"), 1);
    }

    #[test]
    fn test_suggest_field() {
        assert_eq!(
            suggest_field("max_iteration", KNOWN_AGENT),
            Some("did you mean 'max_iterations'?".to_string())
        );
        assert_eq!(suggest_field("completely_unrelated", KNOWN_AGENT), None);
    }

    #[test]
    fn test_validate_clean_config() {
        let raw = json!({"llm": {"provider": "ollama"}, "agent": {"verbose": false}});
        let diagnostics = validate_config(&raw);
        assert!(diagnostics.iter().all(|d| !d.is_error()));
        assert!(diagnostics
            .iter()
            .any(|d| d.message == "All fields recognized"));
    }

    #[test]
    fn test_validate_unknown_nested_field() {
        let raw = json!({"agent": {"max_iteration": 5}});
        let diagnostics = validate_config(&raw);
        let error = diagnostics.iter().find(|d| d.is_error()).unwrap();
        assert_eq!(error.path, "agent.max_iteration");
        assert!(error.message.contains("did you mean 'max_iterations'?"));
    }

    #[test]
    fn test_validate_unknown_top_level() {
        let raw = json!({"llms": {}});
        let diagnostics = validate_config(&raw);
        assert!(diagnostics
            .iter()
            .any(|d| d.is_error() && d.path == "llms"));
    }

    #[test]
    fn test_validate_not_object() {
        let diagnostics = validate_config(&json!([1, 2]));
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].is_error());
    }

    #[test]
    fn test_validate_plaintext_key_warning() {
        let raw = json!({"llm": {"api_key": "sk-123"}});
        let diagnostics = validate_config(&raw);
        assert!(diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Warn && d.path == "llm.api_key"));
    }

    #[test]
    fn test_validate_effective() {
        let mut config = Config::default();
        config.llm.provider = "ollama".into();
        let ok = validate_effective(&config);
        assert!(ok.iter().all(|d| !d.is_error()));

        config.llm.provider = "cohere".into();
        let bad = validate_effective(&config);
        assert!(bad[0].is_error());
        assert!(bad[0].to_string().contains("Unsupported LLM provider"));
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::new(DiagnosticLevel::Warn, "llm.model", "odd");
        assert_eq!(d.to_string(), "[WARN] llm.model: odd");
        let d = Diagnostic::new(DiagnosticLevel::Ok, "", "fine");
        assert_eq!(d.to_string(), "[OK] fine");
    }
}
