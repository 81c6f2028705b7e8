//! Maps the backend's loosely-typed result payload onto [`VerificationResult`].
//!
//! Three payload shapes have been served over time and all are accepted:
//!
//! * flat triad: `trust_score` is a number, with `source_credibility`,
//!   `content_quality` and `cross_reference` sub-scores and an `evidence`
//!   object keyed by `source` / `content` / `cross_reference`;
//! * nested: `trust_score` is an object carrying `score`, `label`,
//!   `scoring_factors` and friends, with `evidence` as a provider list;
//! * flat simple: `score` / `label` at the top level, which is also the
//!   serialized canonical form.
//!
//! The payload may be wrapped once under a `result` key. Normalization never
//! fails: unusable fields fall back to defaults or are left out.

pub(crate) mod fields;

use serde_json::Value;
use tracing::debug;

use crate::models::verdict::{confidence_for_score, label_for_score, recommendation_for_score};
use crate::models::{EvidenceItem, ScoringFactor, SourceInfo, VerificationResult, WarningLevel};
use fields::{array, clamp_score, first, number, object, strings, text, text_or_scalar, weight};

const UNKNOWN_DOMAIN: &str = "Unknown";
const UNKNOWN_SOURCE: &str = "Unknown";

/// One weighted sub-score of the flat triad shape.
struct TriadFactor {
    score_key: &'static str,
    name: &'static str,
    weight_key: &'static str,
    evidence_key: &'static str,
    default_weight: &'static str,
    default_reasoning: &'static str,
}

const TRIAD: [TriadFactor; 3] = [
    TriadFactor {
        score_key: "source_credibility",
        name: "Source Credibility",
        weight_key: "source",
        evidence_key: "source",
        default_weight: "40%",
        default_reasoning: "Source analysis completed",
    },
    TriadFactor {
        score_key: "content_quality",
        name: "Content Quality",
        weight_key: "content",
        evidence_key: "content",
        default_weight: "35%",
        default_reasoning: "Content analysis completed",
    },
    TriadFactor {
        score_key: "cross_reference",
        name: "Cross-Reference",
        weight_key: "cross_ref",
        evidence_key: "cross_reference",
        default_weight: "25%",
        default_reasoning: "Cross-reference check completed",
    },
];

/// Normalize a raw result payload. Never panics and never fails.
pub fn normalize(raw: &Value) -> VerificationResult {
    let payload = unwrap_result(raw);
    let nested = object(payload, "trust_score");

    let score = nested
        .and_then(|t| number(t.get("score")))
        .or_else(|| number(payload.get("trust_score")))
        .or_else(|| number(payload.get("score")))
        .map(clamp_score)
        .unwrap_or(0.0);

    let label = nested
        .and_then(|t| text(t.get("label")))
        .or_else(|| text(payload.get("label")))
        .unwrap_or_else(|| label_for_score(score).to_string());

    let explanation = nested
        .and_then(|t| text(t.get("explanation")))
        .or_else(|| first(payload, &["explanation", "verdict"], text));

    let confidence = nested
        .and_then(|t| text(t.get("confidence")))
        .or_else(|| text(payload.get("confidence")))
        .unwrap_or_else(|| confidence_for_score(score).to_string());

    let recommendation = nested
        .and_then(|t| text(t.get("recommended_action")))
        .or_else(|| first(payload, &["recommended_action", "recommendation"], text))
        .unwrap_or_else(|| recommendation_for_score(score).to_string());

    let methodology = nested
        .and_then(|t| text(t.get("methodology")))
        .or_else(|| text(payload.get("methodology")))
        .or_else(|| {
            text(payload.get("story_type")).map(|story| {
                format!("Story type: {}. Weighted analysis across multiple factors.", story)
            })
        });

    let warning_level = nested
        .and_then(|t| text(t.get("warning_level")))
        .or_else(|| text(payload.get("warning_level")))
        .and_then(|s| WarningLevel::parse(&s));

    let result = VerificationResult {
        score,
        label,
        explanation,
        confidence: Some(confidence),
        factors: factors(payload, nested),
        evidence_items: evidence_items(payload),
        red_flags: red_flags(payload),
        source_info: source_info(payload),
        warning_level,
        recommendation: Some(recommendation),
        methodology,
    };

    debug!(
        score = result.score,
        label = %result.label,
        factors = result.factors.as_ref().map_or(0, Vec::len),
        evidence = result.evidence_items.as_ref().map_or(0, Vec::len),
        "Normalized verification result"
    );
    result
}

/// Unwrap one level of `{ "result": { ... } }`. Deeper nesting is left alone.
fn unwrap_result(raw: &Value) -> &Value {
    object(raw, "result").unwrap_or(raw)
}

fn factors(payload: &Value, nested: Option<&Value>) -> Option<Vec<ScoringFactor>> {
    let listed = nested
        .and_then(|t| array(t, "scoring_factors"))
        .or_else(|| array(payload, "scoring_factors"))
        .or_else(|| array(payload, "factors"));
    if let Some(items) = listed {
        return Some(items.iter().filter(|v| v.is_object()).map(listed_factor).collect());
    }

    let has_triad = TRIAD.iter().any(|f| number(payload.get(f.score_key)).is_some());
    if !has_triad {
        return None;
    }

    let weights = object(payload, "weights_used");
    let evidence = object(payload, "evidence");
    let triad = TRIAD
        .iter()
        .map(|f| ScoringFactor {
            name: f.name.to_string(),
            score: number(payload.get(f.score_key)).map(clamp_score).unwrap_or(0.0),
            weight: weights
                .and_then(|w| weight(w.get(f.weight_key)))
                .unwrap_or_else(|| f.default_weight.to_string()),
            reasoning: Some(
                evidence
                    .and_then(|e| object(e, f.evidence_key))
                    .and_then(|section| text(section.get("verdict")))
                    .unwrap_or_else(|| f.default_reasoning.to_string()),
            ),
        })
        .collect();
    Some(triad)
}

fn listed_factor(item: &Value) -> ScoringFactor {
    ScoringFactor {
        name: first(item, &["name", "factor"], text).unwrap_or_else(|| "Factor".to_string()),
        score: number(item.get("score")).map(clamp_score).unwrap_or(0.0),
        weight: weight(item.get("weight")).unwrap_or_default(),
        reasoning: text(item.get("reasoning")),
    }
}

fn evidence_items(payload: &Value) -> Option<Vec<EvidenceItem>> {
    let items = array(payload, "evidence_items").or_else(|| array(payload, "evidence"))?;
    Some(
        items
            .iter()
            .filter(|v| v.is_object())
            .map(|item| EvidenceItem {
                source: first(item, &["source", "provider", "name"], text)
                    .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                confidence: unit_confidence(number(item.get("confidence"))),
                note: first(item, &["note", "finding", "verdict"], text),
            })
            .collect(),
    )
}

/// Confidence on a 0-1 scale. Values above 1 are read as percentages.
fn unit_confidence(raw: Option<f64>) -> f64 {
    match raw {
        Some(n) if n > 1.0 => (n / 100.0).clamp(0.0, 1.0),
        Some(n) => n.clamp(0.0, 1.0),
        None => 0.0,
    }
}

fn red_flags(payload: &Value) -> Option<Vec<String>> {
    let items = array(payload, "red_flags")
        .or_else(|| object(payload, "content_analysis").and_then(|c| array(c, "red_flags")))
        .or_else(|| {
            object(payload, "evidence")
                .and_then(|e| object(e, "content"))
                .and_then(|c| array(c, "red_flags"))
        })?;
    Some(strings(items))
}

fn source_info(payload: &Value) -> Option<SourceInfo> {
    let section = object(payload, "source_info")
        .or_else(|| object(payload, "evidence").and_then(|e| object(e, "source")))
        .or_else(|| object(payload, "source_credibility"))?;

    let domain = text(section.get("domain"))
        .or_else(|| object(payload, "article").and_then(|a| text(a.get("domain"))))
        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string());

    Some(SourceInfo {
        domain,
        tier: text_or_scalar(section.get("tier")),
        bias: text(section.get("bias")),
        source_type: text(section.get("type")),
        verdict: text(section.get("verdict")),
    })
}
