// src/keywords.rs
//! Derives at most three display keywords for a repository.
//!
//! Source topics are normalized onto a small set of general categories. When
//! topics alone do not yield three, words from the description and README are
//! scanned as well.

const MAX_KEYWORDS: usize = 3;
const FALLBACK_KEYWORD: &str = "Tool";

const TOPIC_MAP: &[(&str, &[&str])] = &[
    (
        "web",
        &[
            "web", "website", "webapp", "frontend", "backend", "fullstack", "http", "server",
            "nextjs", "react", "vue",
        ],
    ),
    (
        "ai",
        &[
            "ai",
            "ml",
            "artificial-intelligence",
            "machine-learning",
            "deep-learning",
            "nlp",
            "computer-vision",
            "llm",
            "agent",
        ],
    ),
    ("database", &["database", "sql", "nosql", "storage"]),
    (
        "mobile",
        &["mobile", "android", "ios", "flutter", "react-native"],
    ),
    ("game", &["game", "gamedev", "gaming", "unity", "unreal"]),
    ("cli", &["cli", "command-line", "terminal", "shell"]),
    (
        "data-science",
        &[
            "data-science",
            "data-analysis",
            "data-visualization",
            "pandas",
            "numpy",
            "jupyter",
        ],
    ),
    (
        "devops",
        &[
            "devops",
            "docker",
            "kubernetes",
            "ci-cd",
            "automation",
            "terraform",
        ],
    ),
    (
        "security",
        &["security", "cybersecurity", "vulnerability", "pentesting"],
    ),
    ("blockchain", &["blockchain", "crypto", "web3"]),
    ("framework", &["framework", "library"]),
    ("testing", &["testing", "test", "tdd", "bdd"]),
    ("tool", &["tool", "utility", "plugin"]),
];

const ACRONYMS: &[&str] = &["AI", "ML", "NLP", "API", "CLI", "CI-CD", "SQL"];

/// Builds the keyword list for one repository.
#[must_use]
pub fn derive_keywords(
    topics: &[String],
    description: Option<&str>,
    readme: &str,
    language: Option<&str>,
) -> Vec<String> {
    let mut categories: Vec<&'static str> = Vec::new();

    for topic in topics {
        let topic = topic.to_lowercase();
        for (category, members) in TOPIC_MAP {
            if members.contains(&topic.as_str()) && !categories.contains(category) {
                categories.push(*category);
            }
        }
    }

    if categories.len() < MAX_KEYWORDS {
        let text = format!("{} {}", description.unwrap_or(""), readme).to_lowercase();
        scan_words(&text, &mut categories);
    }

    categories.truncate(MAX_KEYWORDS);
    let keywords: Vec<String> = categories.into_iter().map(display_form).collect();

    if !keywords.is_empty() {
        return keywords;
    }
    match language {
        Some(lang) if !lang.is_empty() && lang != "N/A" => vec![lang.to_string()],
        _ => vec![FALLBACK_KEYWORD.to_string()],
    }
}

fn scan_words(text: &str, categories: &mut Vec<&'static str>) {
    let words = text.split(|c: char| c.is_whitespace() || c == ',' || c == '.');
    for word in words.filter(|w| !w.is_empty()) {
        let hit = TOPIC_MAP
            .iter()
            .find(|(category, members)| members.contains(&word) && !categories.contains(category))
            .map(|(category, _)| *category);
        if let Some(category) = hit {
            categories.push(category);
            if categories.len() >= MAX_KEYWORDS {
                return;
            }
        }
    }
}

fn display_form(category: &str) -> String {
    let upper = category.to_uppercase();
    if ACRONYMS.contains(&upper.as_str()) {
        return upper;
    }
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
