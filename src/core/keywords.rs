use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

/// A skill, interest or tag in canonical form: trimmed, lowercase, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Canonicalize a raw string, returning `None` when nothing is left after trimming
    pub fn parse(raw: &str) -> Option<Self> {
        let canonical = raw.trim().to_lowercase();
        if canonical.is_empty() {
            None
        } else {
            Some(Self(canonical))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Keyword {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Keyword {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Keyword {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Deduplicated set of keywords
///
/// Keeps first-seen order so that query binding and test output are
/// deterministic. Membership goes through a hash index, so building a set
/// stays linear in the input length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
    #[serde(skip)]
    index: HashSet<Keyword>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyword, returning `false` if it was already present
    pub fn insert(&mut self, keyword: Keyword) -> bool {
        if !self.index.insert(keyword.clone()) {
            return false;
        }
        self.keywords.push(keyword);
        true
    }

    pub fn contains(&self, keyword: &Keyword) -> bool {
        self.index.contains(keyword)
    }

    /// Exact lookup of an already-canonical string
    pub fn contains_str(&self, keyword: &str) -> bool {
        self.index.contains(keyword)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    /// Number of distinct keywords present in both sets
    pub fn intersection_count(&self, other: &KeywordSet) -> usize {
        self.keywords.iter().filter(|k| other.contains(k)).count()
    }

    /// Keywords as plain strings, in first-seen order
    pub fn to_strings(&self) -> Vec<String> {
        self.keywords.iter().map(|k| k.as_str().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

impl IntoIterator for KeywordSet {
    type Item = Keyword;
    type IntoIter = std::vec::IntoIter<Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.into_iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        normalize(iter)
    }
}

/// Canonicalize free-form strings into a keyword set
///
/// Each entry is trimmed and lowercased; entries that end up empty are
/// dropped and duplicates collapse onto their first occurrence.
pub fn normalize<I, S>(strings: I) -> KeywordSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = KeywordSet::new();
    for raw in strings {
        if let Some(keyword) = Keyword::parse(raw.as_ref()) {
            set.insert(keyword);
        }
    }
    set
}

/// Normalize a list and hand it back as plain strings, for storing on a record
pub fn normalize_list<I, S>(strings: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    normalize(strings)
        .into_iter()
        .map(Keyword::into_string)
        .collect()
}

/// Deserialize a list of strings, tolerating sloppy documents
///
/// A missing or `null` field becomes an empty list and non-string entries
/// (numbers, nulls, objects) are skipped.
pub fn deserialize_lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(s) => Some(s),
            _ => None,
        })
        .collect())
}
