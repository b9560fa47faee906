use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Axis a keyword contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Productivity,
    Social,
}

impl Category {
    pub const fn ordered() -> [Self; 2] {
        [Self::Productivity, Self::Social]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Productivity => "productivity",
            Self::Social => "social",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "productivity" => Ok(Self::Productivity),
            "social" => Ok(Self::Social),
            other => Err(other.to_string()),
        }
    }
}

/// Configuration shape of a single lexicon row. The category stays a string
/// until [`Lexicon::from_entries`] validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconEntry {
    pub keyword: String,
    pub category: String,
    pub weight: f64,
}

impl LexiconEntry {
    pub fn new(keyword: impl Into<String>, category: Category, weight: f64) -> Self {
        Self {
            keyword: keyword.into(),
            category: category.as_str().to_string(),
            weight,
        }
    }
}

/// Upper bound on a single keyword weight. Keeps review and venue totals
/// finite for any realistic token count.
pub const MAX_WEIGHT: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct KeywordWeights {
    productivity: Option<f64>,
    social: Option<f64>,
}

impl KeywordWeights {
    fn slot(&mut self, category: Category) -> &mut Option<f64> {
        match category {
            Category::Productivity => &mut self.productivity,
            Category::Social => &mut self.social,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexiconError {
    #[error("lexicon keyword must not be empty")]
    EmptyKeyword,
    #[error("lexicon keyword '{keyword}' contains whitespace and can never match a token")]
    KeywordContainsWhitespace { keyword: String },
    #[error("lexicon keyword '{keyword}' has unknown category '{category}'")]
    UnknownCategory { keyword: String, category: String },
    #[error(
        "lexicon keyword '{keyword}' has invalid weight {weight}; weights must lie within (0, {}]",
        MAX_WEIGHT
    )]
    InvalidWeight { keyword: String, weight: f64 },
    #[error("lexicon keyword '{keyword}' is listed twice under {category}")]
    DuplicateKeyword { keyword: String, category: Category },
}

/// Immutable keyword table mapping each keyword to its per-category weight.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<LexiconEntry>", into = "Vec<LexiconEntry>")]
pub struct Lexicon {
    keywords: BTreeMap<String, KeywordWeights>,
}

const STANDARD_PRODUCTIVITY: &[(&str, f64)] = &[
    ("tugas", 3.0),
    ("kerja", 3.0),
    ("wifi", 3.0),
    ("colok", 3.0),
    ("laptop", 2.0),
    ("produktif", 2.0),
    ("konsen", 2.0),
    ("belajar", 2.0),
    ("tenang", 1.0),
    ("nyaman", 1.0),
    ("sendiri", 1.0),
    ("buku", 1.0),
];

const STANDARD_SOCIAL: &[(&str, f64)] = &[
    ("nongkrong", 3.0),
    ("kumpul", 3.0),
    ("teman", 3.0),
    ("bareng", 3.0),
    ("asyik", 2.0),
    ("suasana", 2.0),
    ("instagram", 2.0),
    ("estetik", 2.0),
    ("seru", 2.0),
    ("obrol", 2.0),
    ("betah", 1.0),
    ("ramai", 1.0),
    ("santai", 1.0),
];

impl Lexicon {
    /// Keyword weights used by the Yogyakarta review study (stemmed Indonesian).
    pub fn standard() -> Self {
        let mut keywords: BTreeMap<String, KeywordWeights> = BTreeMap::new();
        for (category, table) in [
            (Category::Productivity, STANDARD_PRODUCTIVITY),
            (Category::Social, STANDARD_SOCIAL),
        ] {
            for &(keyword, weight) in table {
                *keywords.entry(keyword.to_string()).or_default().slot(category) = Some(weight);
            }
        }
        Self { keywords }
    }

    pub fn from_entries<I>(entries: I) -> Result<Self, LexiconError>
    where
        I: IntoIterator<Item = LexiconEntry>,
    {
        let mut keywords: BTreeMap<String, KeywordWeights> = BTreeMap::new();

        for entry in entries {
            let keyword = entry.keyword.trim().to_string();
            if keyword.is_empty() {
                return Err(LexiconError::EmptyKeyword);
            }
            if keyword.chars().any(char::is_whitespace) {
                return Err(LexiconError::KeywordContainsWhitespace { keyword });
            }
            let category =
                entry
                    .category
                    .parse::<Category>()
                    .map_err(|category| LexiconError::UnknownCategory {
                        keyword: keyword.clone(),
                        category,
                    })?;
            if !entry.weight.is_finite() || entry.weight <= 0.0 || entry.weight > MAX_WEIGHT {
                return Err(LexiconError::InvalidWeight {
                    keyword,
                    weight: entry.weight,
                });
            }

            let slot = keywords.entry(keyword.clone()).or_default().slot(category);
            if slot.is_some() {
                return Err(LexiconError::DuplicateKeyword { keyword, category });
            }
            *slot = Some(entry.weight);
        }

        Ok(Self { keywords })
    }

    /// Weight contributed by `token` to each category, if it is a keyword at all.
    pub fn lookup(&self, token: &str) -> Option<(Option<f64>, Option<f64>)> {
        self.keywords
            .get(token)
            .map(|weights| (weights.productivity, weights.social))
    }

    pub fn weight(&self, keyword: &str, category: Category) -> Option<f64> {
        let weights = self.keywords.get(keyword)?;
        match category {
            Category::Productivity => weights.productivity,
            Category::Social => weights.social,
        }
    }

    /// Number of (keyword, category) pairs.
    pub fn len(&self) -> usize {
        self.keywords
            .values()
            .map(|weights| {
                usize::from(weights.productivity.is_some()) + usize::from(weights.social.is_some())
            })
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Entries grouped by category, keywords alphabetical within each.
    pub fn entries(&self) -> Vec<LexiconEntry> {
        Category::ordered()
            .into_iter()
            .flat_map(|category| {
                self.keywords.iter().filter_map(move |(keyword, _)| {
                    self.weight(keyword, category)
                        .map(|weight| LexiconEntry::new(keyword.clone(), category, weight))
                })
            })
            .collect()
    }
}

impl TryFrom<Vec<LexiconEntry>> for Lexicon {
    type Error = LexiconError;

    fn try_from(entries: Vec<LexiconEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<Lexicon> for Vec<LexiconEntry> {
    fn from(lexicon: Lexicon) -> Self {
        lexicon.entries()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(keyword: &str, category: &str, weight: f64) -> LexiconEntry {
        LexiconEntry {
            keyword: keyword.to_string(),
            category: category.to_string(),
            weight,
        }
    }

    #[test]
    fn same_keyword_may_carry_independent_weights_per_category() {
        let lexicon = Lexicon::from_entries(vec![
            entry("santai", "productivity", 0.5),
            entry("santai", "social", 1.0),
        ])
        .expect("lexicon loads");

        assert_eq!(lexicon.weight("santai", Category::Productivity), Some(0.5));
        assert_eq!(lexicon.weight("santai", Category::Social), Some(1.0));
        assert_eq!(lexicon.len(), 2);
    }

    #[test]
    fn unknown_category_is_rejected_at_load() {
        let error = Lexicon::from_entries(vec![entry("wifi", "ambience", 1.0)])
            .expect_err("category rejected");
        assert_eq!(
            error,
            LexiconError::UnknownCategory {
                keyword: "wifi".to_string(),
                category: "ambience".to_string(),
            }
        );
    }

    #[test]
    fn non_positive_and_duplicate_entries_are_rejected() {
        assert!(matches!(
            Lexicon::from_entries(vec![entry("wifi", "productivity", 0.0)]),
            Err(LexiconError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Lexicon::from_entries(vec![entry("wifi", "productivity", f64::INFINITY)]),
            Err(LexiconError::InvalidWeight { .. })
        ));
        assert!(matches!(
            Lexicon::from_entries(vec![
                entry("wifi", "productivity", 1.0),
                entry("wifi", "Productivity", 2.0),
            ]),
            Err(LexiconError::DuplicateKeyword { .. })
        ));
        assert!(matches!(
            Lexicon::from_entries(vec![entry("  ", "social", 1.0)]),
            Err(LexiconError::EmptyKeyword)
        ));
        assert!(matches!(
            Lexicon::from_entries(vec![entry("free wifi", "social", 1.0)]),
            Err(LexiconError::KeywordContainsWhitespace { .. })
        ));
    }

    #[test]
    fn deserialization_goes_through_validation() {
        let json = r#"[{"keyword":"wifi","category":"lounge","weight":2.0}]"#;
        let error = serde_json::from_str::<Lexicon>(json).expect_err("invalid category");
        assert!(error.to_string().contains("unknown category"));

        let json = r#"[{"keyword":"wifi","category":"productivity","weight":2.0}]"#;
        let lexicon: Lexicon = serde_json::from_str(json).expect("valid lexicon");
        assert_eq!(lexicon.lookup("wifi"), Some((Some(2.0), None)));
    }

    #[test]
    fn oversized_weight_is_rejected_at_load() {
        assert!(matches!(
            Lexicon::from_entries(vec![entry("wifi", "productivity", 1e308)]),
            Err(LexiconError::InvalidWeight { .. })
        ));
        let lexicon = Lexicon::from_entries(vec![entry("wifi", "productivity", MAX_WEIGHT)])
            .expect("bound is inclusive");
        assert_eq!(lexicon.weight("wifi", Category::Productivity), Some(MAX_WEIGHT));

        let json = r#"[{"keyword": "wifi", "category": "productivity", "weight": 1e308}]"#;
        assert!(serde_json::from_str::<Lexicon>(json).is_err());
    }

    #[test]
    fn standard_lexicon_matches_study_weights() {
        let lexicon = Lexicon::standard();
        assert_eq!(lexicon.weight("wifi", Category::Productivity), Some(3.0));
        assert_eq!(lexicon.weight("nongkrong", Category::Social), Some(3.0));
        assert_eq!(lexicon.weight("santai", Category::Social), Some(1.0));
        assert_eq!(lexicon.weight("wifi", Category::Social), None);
        assert_eq!(lexicon.len(), 25);

        let entries = lexicon.entries();
        let reloaded = Lexicon::from_entries(entries).expect("round trip valid");
        assert_eq!(reloaded, lexicon);
    }
}
