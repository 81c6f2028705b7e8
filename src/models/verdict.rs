//! Score banding shared by the normalizer and the renderer.
//!
//! Both bandings partition `[0, 100]` with no gaps: every finite score maps to
//! exactly one band, and a higher score never maps to a lower band.

pub const LABEL_LIKELY_REAL: &str = "Likely Real";
pub const LABEL_UNCERTAIN: &str = "Uncertain";
pub const LABEL_LIKELY_AI: &str = "Likely AI-Generated";

/// Lower bound of the "Likely Real" band.
pub const REAL_THRESHOLD: f64 = 70.0;
/// Lower bound of the "Uncertain" band.
pub const UNCERTAIN_THRESHOLD: f64 = 40.0;

pub const CONFIDENCE_HIGH: &str = "High";
pub const CONFIDENCE_MEDIUM: &str = "Medium";
pub const CONFIDENCE_LOW: &str = "Low";

/// Human label for a trust score.
pub fn label_for_score(score: f64) -> &'static str {
    if score >= REAL_THRESHOLD {
        LABEL_LIKELY_REAL
    } else if score >= UNCERTAIN_THRESHOLD {
        LABEL_UNCERTAIN
    } else {
        LABEL_LIKELY_AI
    }
}

/// Confidence derived from a trust score when the backend omits one.
pub fn confidence_for_score(score: f64) -> &'static str {
    if score >= 80.0 {
        CONFIDENCE_HIGH
    } else if score >= 50.0 {
        CONFIDENCE_MEDIUM
    } else {
        CONFIDENCE_LOW
    }
}

/// Advice shown alongside a score when the backend gives none.
pub fn recommendation_for_score(score: f64) -> &'static str {
    if score >= REAL_THRESHOLD {
        "This content appears credible based on our analysis."
    } else if score >= UNCERTAIN_THRESHOLD {
        "Exercise caution - verify with additional sources."
    } else {
        "This content has low credibility - verify carefully before trusting."
    }
}
