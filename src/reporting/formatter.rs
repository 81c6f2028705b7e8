use console::style;

use crate::models::verdict::{REAL_THRESHOLD, UNCERTAIN_THRESHOLD};
use crate::models::{VerificationResult, WarningLevel};

/// Render a result for the terminal. Sections the backend did not provide
/// are left out.
pub fn format_result(result: &VerificationResult) -> String {
    let mut out = String::new();

    let score = format!("{}/100", result.display_score());
    let score = if result.score >= REAL_THRESHOLD {
        style(score).green().bold()
    } else if result.score >= UNCERTAIN_THRESHOLD {
        style(score).yellow().bold()
    } else {
        style(score).red().bold()
    };
    out.push_str(&format!("\n  Trust score: {}  {}\n", score, style(&result.label).bold()));

    if let Some(confidence) = &result.confidence {
        out.push_str(&format!("  Confidence:  {}\n", confidence));
    }
    if let Some(level) = result.warning_level {
        out.push_str(&format!("  Warning:     {}\n", format_warning(level)));
    }
    if let Some(explanation) = &result.explanation {
        out.push_str(&format!("\n  {}\n", explanation));
    }
    out.push_str(&format!("\n  {} {}\n", style("→").cyan(), result.recommendation_text()));

    if let Some(factors) = result.factors.as_ref().filter(|f| !f.is_empty()) {
        out.push_str(&section("Scoring factors"));
        for factor in factors {
            let weight = if factor.weight.is_empty() {
                String::new()
            } else {
                format!(" ({})", factor.weight)
            };
            out.push_str(&format!("  {:<22} {:>5.0}{}\n", factor.name, factor.score, weight));
            if let Some(reasoning) = &factor.reasoning {
                out.push_str(&format!("    {}\n", style(reasoning).dim()));
            }
        }
    }

    if let Some(items) = result.evidence_items.as_ref().filter(|e| !e.is_empty()) {
        out.push_str(&section("Evidence"));
        for item in items {
            let mark = if item.confidence > 0.7 { style("✓").green() } else { style("⚠").yellow() };
            out.push_str(&format!(
                "  {} {} ({:.0}% confidence)\n",
                mark,
                item.source,
                item.confidence * 100.0
            ));
            if let Some(note) = &item.note {
                out.push_str(&format!("    {}\n", style(note).dim()));
            }
        }
    }

    if let Some(flags) = result.red_flags.as_ref().filter(|f| !f.is_empty()) {
        out.push_str(&section("Red flags"));
        for flag in flags {
            out.push_str(&format!("  {} {}\n", style("!").red().bold(), flag));
        }
    }

    if let Some(source) = &result.source_info {
        out.push_str(&section("Source"));
        out.push_str(&format!("  Domain:  {}\n", source.domain));
        let fields = [
            ("Tier", &source.tier),
            ("Bias", &source.bias),
            ("Type", &source.source_type),
            ("Verdict", &source.verdict),
        ];
        for (name, value) in fields {
            if let Some(value) = value {
                out.push_str(&format!("  {:<8} {}\n", format!("{}:", name), value));
            }
        }
    }

    if let Some(methodology) = &result.methodology {
        out.push_str(&format!("\n  {}\n", style(methodology).dim()));
    }

    out
}

fn section(title: &str) -> String {
    format!("\n  {}\n", style(title).cyan().bold())
}

fn format_warning(level: WarningLevel) -> String {
    let text = level.as_str().to_uppercase();
    match level {
        WarningLevel::Critical | WarningLevel::High => style(text).red().bold().to_string(),
        WarningLevel::Medium => style(text).yellow().to_string(),
        WarningLevel::Low => style(text).dim().to_string(),
    }
}
