//! Field-name similarity and mapping suggestions.
//!
//! Scores are on a 0-100 scale. Identical normalized names score 100, names
//! sharing neither a token nor a token-aligned fragment score 0, and
//! everything in between blends token containment, token Jaccard and
//! Jaro-Winkler similarity.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use fireems_model::{FieldMapping, TargetField};
use rapidfuzz::distance::jaro_winkler;
use serde::Serialize;

use crate::types::MappingOptions;

/// Score for names equal once separators are removed ("IncidentID" vs "Incident ID").
const COMPACT_MATCH_SCORE: f64 = 95.0;

/// Shortest fragment that may match the start of a longer token ("Lat" in "Latitude").
const MIN_FRAGMENT_LEN: usize = 3;

/// Ceiling for anything short of an exact normalized match.
const PARTIAL_MATCH_CAP: f64 = 99.0;

const CONTAINMENT_WEIGHT: f64 = 0.5;
const JACCARD_WEIGHT: f64 = 0.3;
const JARO_WINKLER_WEIGHT: f64 = 0.2;

/// Normalize a field name for comparison.
///
/// Lowercases, turns every run of whitespace or punctuation (`_ . - @ # /`
/// and friends) into a single space, and trims.
pub fn normalize_field_name(name: &str) -> String {
    name.to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Similarity between two field names, from 0 to 100.
pub fn calculate_field_similarity(a: &str, b: &str) -> f64 {
    let left = normalize_field_name(a);
    let right = normalize_field_name(b);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    if left == right {
        return 100.0;
    }

    let left_compact = left.replace(' ', "");
    let right_compact = right.replace(' ', "");
    if left_compact == right_compact {
        return COMPACT_MATCH_SCORE;
    }

    let left_tokens: BTreeSet<&str> = left.split(' ').collect();
    let right_tokens: BTreeSet<&str> = right.split(' ').collect();
    let overlap = left_tokens.intersection(&right_tokens).count();
    let substring = if left_compact.len() <= right_compact.len() {
        token_aligned(&left_compact, &right)
    } else {
        token_aligned(&right_compact, &left)
    };
    if overlap == 0 && !substring {
        return 0.0;
    }

    let containment = if substring {
        1.0
    } else {
        overlap as f64 / left_tokens.len().min(right_tokens.len()) as f64
    };
    let union = left_tokens.union(&right_tokens).count();
    let jaccard = overlap as f64 / union as f64;
    let jaro = jaro_winkler::similarity(left.chars(), right.chars());

    let blended =
        CONTAINMENT_WEIGHT * containment + JACCARD_WEIGHT * jaccard + JARO_WINKLER_WEIGHT * jaro;
    (blended * 100.0).round().min(PARTIAL_MATCH_CAP)
}

/// Whether `fragment` sits inside `name` starting on a token boundary.
///
/// Fragments shorter than [`MIN_FRAGMENT_LEN`] must also end on one, so "ID"
/// does not match the "id" inside "incident".
fn token_aligned(fragment: &str, name: &str) -> bool {
    let mut compact = String::with_capacity(name.len());
    let mut starts = Vec::new();
    let mut ends = Vec::new();
    for token in name.split(' ') {
        starts.push(compact.len());
        compact.push_str(token);
        ends.push(compact.len());
    }
    let short = fragment.chars().count() < MIN_FRAGMENT_LEN;
    starts.iter().any(|&start| {
        compact[start..].starts_with(fragment)
            && (!short || ends.contains(&(start + fragment.len())))
    })
}

/// Best similarity of a source name against a target field's name and aliases.
pub fn score_target(source: &str, target: &TargetField) -> f64 {
    target
        .aliases
        .iter()
        .map(|alias| calculate_field_similarity(source, alias))
        .fold(calculate_field_similarity(source, &target.name), f64::max)
}

/// Suggested target for one source field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSuggestion {
    pub source_field: String,
    /// `None` when nothing cleared the confidence threshold.
    pub target_field: Option<String>,
    /// 0-100; zero when `target_field` is `None`.
    pub confidence: f64,
    pub is_required: bool,
}

impl FieldSuggestion {
    fn unmatched(source_field: &str) -> Self {
        Self {
            source_field: source_field.to_string(),
            target_field: None,
            confidence: 0.0,
            is_required: false,
        }
    }

    fn matched(source_field: &str, target: &TargetField, confidence: f64) -> Self {
        Self {
            source_field: source_field.to_string(),
            target_field: Some(target.name.clone()),
            confidence,
            is_required: target.is_required,
        }
    }
}

/// Suggest the best target for every source field independently.
///
/// Returns one suggestion per source, in source order. Ties between targets
/// go to required fields, then to the earlier target. Several sources may be
/// suggested for the same target; use [`ScoringEngine::suggest_all`] for a
/// one-to-one draft.
pub fn suggest_field_mapping(
    source_fields: &[String],
    target_fields: &[TargetField],
    min_confidence: f64,
) -> Vec<FieldSuggestion> {
    source_fields
        .iter()
        .map(|source| {
            let mut best: Option<(&TargetField, f64)> = None;
            for target in target_fields {
                let score = score_target(source, target);
                let better = match best {
                    None => true,
                    Some((current, current_score)) => {
                        score > current_score
                            || (score == current_score && target.is_required && !current.is_required)
                    }
                };
                if better {
                    best = Some((target, score));
                }
            }
            match best {
                Some((target, score)) if score > 0.0 && score >= min_confidence => {
                    FieldSuggestion::matched(source, target, score)
                }
                _ => FieldSuggestion::unmatched(source),
            }
        })
        .collect()
}

/// Scores source fields against a destination schema and drafts one-to-one mappings.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    fields: Vec<TargetField>,
    options: MappingOptions,
}

impl ScoringEngine {
    pub fn new(fields: Vec<TargetField>) -> Self {
        Self {
            fields,
            options: MappingOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MappingOptions) -> Self {
        self.options = options;
        self
    }

    pub fn fields(&self) -> &[TargetField] {
        &self.fields
    }

    /// Score a source field against a named target.
    ///
    /// Returns `None` if the target is not in the schema.
    pub fn score(&self, source: &str, target_name: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|field| field.name == target_name)
            .map(|field| score_target(source, field))
    }

    /// Greedy one-to-one assignment by descending score.
    ///
    /// Every source gets a suggestion, in source order; sources that lost
    /// their best target to a higher-scoring source fall back to their next
    /// best free target, or to no target at all.
    pub fn suggest_all(&self, sources: &[String]) -> Vec<FieldSuggestion> {
        let min_confidence = self.options.min_confidence;
        let mut candidates: Vec<(usize, usize, f64)> = Vec::new();
        for (source_idx, source) in sources.iter().enumerate() {
            for (target_idx, target) in self.fields.iter().enumerate() {
                let score = score_target(source, target);
                if score > 0.0 && score >= min_confidence {
                    candidates.push((source_idx, target_idx, score));
                }
            }
        }

        candidates.sort_by(|a, b| {
            b.2.partial_cmp(&a.2)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    self.fields[b.1]
                        .is_required
                        .cmp(&self.fields[a.1].is_required)
                })
                .then_with(|| a.0.cmp(&b.0))
                .then_with(|| a.1.cmp(&b.1))
        });

        let mut assigned: Vec<Option<(usize, f64)>> = vec![None; sources.len()];
        let mut taken_targets = BTreeSet::new();
        for (source_idx, target_idx, score) in candidates {
            if assigned[source_idx].is_some() || taken_targets.contains(&target_idx) {
                continue;
            }
            taken_targets.insert(target_idx);
            assigned[source_idx] = Some((target_idx, score));
        }

        let suggestions: Vec<FieldSuggestion> = sources
            .iter()
            .zip(assigned)
            .map(|(source, slot)| match slot {
                Some((target_idx, score)) => {
                    FieldSuggestion::matched(source, &self.fields[target_idx], score)
                }
                None => FieldSuggestion::unmatched(source),
            })
            .collect();

        tracing::debug!(
            sources = sources.len(),
            targets = self.fields.len(),
            matched = taken_targets.len(),
            "Scored source fields"
        );
        suggestions
    }

    /// Draft mappings (without transformations) from [`suggest_all`](Self::suggest_all).
    pub fn draft_mappings(&self, sources: &[String]) -> Vec<FieldMapping> {
        self.suggest_all(sources)
            .into_iter()
            .filter_map(|suggestion| {
                suggestion
                    .target_field
                    .map(|target| FieldMapping::new(suggestion.source_field, target))
            })
            .collect()
    }
}
