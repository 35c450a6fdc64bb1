/// Terms that mark a query as asking for something other than recitation.
pub const BLOCKED_TERMS: [&str; 11] = [
    "موسيقى",
    "اغاني",
    "أغنية",
    "طرب",
    "رقص",
    "فيديو كليب",
    "music",
    "song",
    "dance",
    "movie",
    "مسلسل",
];

/// Pre-filter applied before a smart search is sent.
///
/// Matching is a case-insensitive substring test against the built-in terms
/// plus any configured extras.
#[derive(Debug, Clone, Default)]
pub struct QueryGate {
    extra_terms: Vec<String>,
}

impl QueryGate {
    pub fn new(extra_terms: &[String]) -> Self {
        let extra_terms = extra_terms
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { extra_terms }
    }

    /// Return true when `query` may be sent to the search service.
    pub fn allows(&self, query: &str) -> bool {
        let lower = query.to_lowercase();
        !BLOCKED_TERMS
            .iter()
            .map(|t| t.to_lowercase())
            .chain(self.extra_terms.iter().cloned())
            .any(|term| lower.contains(&term))
    }
}
