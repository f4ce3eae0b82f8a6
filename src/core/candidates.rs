use crate::core::keywords::KeywordSet;
use crate::models::Opportunity;

/// Parameters of the candidate fetch
///
/// Selects every opportunity whose required skills or tags share at least
/// one keyword with the user. There is no overlap threshold; relevance is
/// decided by scoring, not by exclusion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateQuery {
    keywords: KeywordSet,
}

impl CandidateQuery {
    /// Build a query, or `None` when there are no keywords to match on
    pub fn new(keywords: KeywordSet) -> Option<Self> {
        if keywords.is_empty() {
            None
        } else {
            Some(Self { keywords })
        }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Keywords as bind parameters for an array-overlap query
    pub fn bind_keywords(&self) -> Vec<String> {
        self.keywords.to_strings()
    }

    /// Reference predicate for stores that filter in memory
    ///
    /// Compares stored values exactly, like the array-overlap query does;
    /// stores keep skill and tag lists in normalized form.
    #[inline]
    pub fn matches(&self, opportunity: &Opportunity) -> bool {
        field_intersects(&opportunity.required_skills, &self.keywords)
            || field_intersects(&opportunity.tags, &self.keywords)
    }
}

#[inline]
fn field_intersects(values: &[String], keywords: &KeywordSet) -> bool {
    values.iter().any(|v| keywords.contains_str(v))
}
