//! Language detection from `class` attributes, plus badge styling.
//!
//! The class list is matched against three patterns in a fixed precedence
//! order: `language-<tag>` wins over `lang-<tag>` wins over a bare
//! `hljs <tag>`. The first pattern that matches anywhere in the class
//! list decides the language; nothing matching means `plaintext`.

use std::sync::LazyLock;

use regex::Regex;

pub const PLAINTEXT: &str = "plaintext";

static LANGUAGE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"(?i)language-(\w+)").unwrap(),
        Regex::new(r"(?i)\blang-(\w+)").unwrap(),
        Regex::new(r"(?i)\bhljs\s+(\w+)").unwrap(),
    ]
});

/// Resolves the language tag for a code element's class attribute.
pub fn detect_language(class_attr: Option<&str>) -> String {
    let Some(classes) = class_attr else {
        return PLAINTEXT.to_string();
    };
    for pattern in LANGUAGE_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(classes) {
            return captures[1].to_lowercase();
        }
    }
    PLAINTEXT.to_string()
}

/// Badge palette for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeColors {
    pub bg: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

const NEUTRAL: BadgeColors = BadgeColors {
    bg: "#f9fafb",
    text: "#6b7280",
    border: "#e5e7eb",
};

/// Fixed per-language badge palette, neutral for anything unlisted.
pub fn badge_colors(language: &str) -> BadgeColors {
    match language {
        "javascript" => BadgeColors { bg: "#fef3c7", text: "#d97706", border: "#fbbf24" },
        "typescript" | "dart" => BadgeColors { bg: "#dbeafe", text: "#2563eb", border: "#60a5fa" },
        "python" => BadgeColors { bg: "#dcfce7", text: "#16a34a", border: "#4ade80" },
        "java" | "ruby" => BadgeColors { bg: "#fee2e2", text: "#dc2626", border: "#f87171" },
        "cpp" | "c" | "kotlin" => BadgeColors { bg: "#f3e8ff", text: "#9333ea", border: "#c084fc" },
        "html" | "rust" | "swift" => BadgeColors { bg: "#fed7aa", text: "#ea580c", border: "#fb923c" },
        "css" => BadgeColors { bg: "#fce7f3", text: "#db2777", border: "#f472b6" },
        "json" => BadgeColors { bg: "#d1fae5", text: "#059669", border: "#34d399" },
        "bash" | "shell" | "yaml" => BadgeColors { bg: "#f3f4f6", text: "#4b5563", border: "#d1d5db" },
        "sql" | "go" => BadgeColors { bg: "#cffafe", text: "#0891b2", border: "#22d3ee" },
        "php" => BadgeColors { bg: "#e0e7ff", text: "#4f46e5", border: "#818cf8" },
        _ => NEUTRAL,
    }
}

/// Counts lines that still have content after trimming whitespace.
pub fn non_blank_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}
