use super::normalize::NormalizedProvider;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredProvider {
    #[serde(flatten)]
    pub provider: NormalizedProvider,
    pub score: u32,
}

struct ScoreRule {
    description_term: &'static str,
    /// When set, the focus text must also mention this term.
    focus_term: Option<&'static str>,
    points: u32,
}

// The "mental health" rule fires for any non-empty focus.
const SCORE_RULES: [ScoreRule; 3] = [
    ScoreRule {
        description_term: "addiction",
        focus_term: Some("addiction"),
        points: 2,
    },
    ScoreRule {
        description_term: "family",
        focus_term: Some("marriage"),
        points: 2,
    },
    ScoreRule {
        description_term: "mental health",
        focus_term: None,
        points: 1,
    },
];

/// Relevance of `provider` for a free-text focus. Always 0 without a focus.
pub fn relevance_score(provider: &NormalizedProvider, focus: Option<&str>) -> u32 {
    let focus = match focus.filter(|focus| !focus.is_empty()) {
        Some(focus) => focus.to_lowercase(),
        None => return 0,
    };

    let descriptions = provider
        .taxonomies
        .iter()
        .map(|taxonomy| taxonomy.description.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    SCORE_RULES
        .iter()
        .filter(|rule| descriptions.contains(rule.description_term))
        .filter(|rule| rule.focus_term.map_or(true, |term| focus.contains(term)))
        .map(|rule| rule.points)
        .sum()
}

/// Scores every provider and orders them by descending score. Ties keep their
/// incoming order.
pub fn rank(providers: Vec<NormalizedProvider>, focus: Option<&str>) -> Vec<ScoredProvider> {
    let mut scored = providers
        .into_iter()
        .map(|provider| {
            let score = relevance_score(&provider, focus);
            ScoredProvider { provider, score }
        })
        .collect::<Vec<_>>();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}
