// src/viewer/filter.rs
use crate::types::ProjectRecord;

/// Fixed business rule: projects below this many stars are never listed.
pub const MIN_STARS: u64 = 100;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    pub language: String,
    pub keyword: String,
}

impl FilterQuery {
    #[must_use]
    pub fn new(language: &str, keyword: &str) -> Self {
        Self {
            language: language.to_string(),
            keyword: keyword.to_string(),
        }
    }

    #[must_use]
    pub fn matches(&self, record: &ProjectRecord) -> bool {
        record.stars >= MIN_STARS
            && language_matches(&self.language, record)
            && keyword_matches(&self.keyword, record)
    }
}

/// Keeps the records `query` matches, in their original relative order.
pub fn filter<'a, I>(collection: I, query: &FilterQuery) -> Vec<&'a ProjectRecord>
where
    I: IntoIterator<Item = &'a ProjectRecord>,
{
    collection.into_iter().filter(|r| query.matches(r)).collect()
}

fn language_matches(query: &str, record: &ProjectRecord) -> bool {
    if query.is_empty() {
        return true;
    }
    record
        .language
        .as_deref()
        .is_some_and(|lang| contains_ignore_case(lang, query))
}

fn keyword_matches(query: &str, record: &ProjectRecord) -> bool {
    query.is_empty() || record.keywords.iter().any(|k| contains_ignore_case(k, query))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
