//! DIRS scoring engine
//!
//! Pure functions that turn raw Likert answers into pillar scores, an overall
//! score, a readiness tier, priority gaps, a pathway and a list of
//! recommended modules. Nothing here reads a clock or touches storage: the
//! caller supplies the timestamp.
//!
//! Answer values are not range-checked. Out-of-scale values flow through the
//! arithmetic unchanged and may produce scores below 0 or above 100; input
//! validation belongs to [`AnswerSet::set_answer`].

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{AnswerSet, Pillar, PillarScores, ReadinessLevel, ResultsRecord};

use super::questions::{LIKERT_MAX, QUESTIONS_PER_PILLAR};

// ─────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────

/// Highest raw sum a pillar can reach (25).
pub const MAX_SCORE_PER_PILLAR: i64 = LIKERT_MAX as i64 * QUESTIONS_PER_PILLAR as i64;

/// Overall score at or above which a user is "Ready".
pub const READY_THRESHOLD: i32 = 70;

/// Overall score at or above which a user is "Developing".
pub const DEVELOPING_THRESHOLD: i32 = 40;

/// Priority gaps kept in a results record.
pub const PRIORITY_GAP_COUNT: usize = 2;

/// Modules recommended in a results record.
pub const RECOMMENDED_MODULE_COUNT: usize = 5;

// ─────────────────────────────────────────────────────────────────
// Static catalogs
// ─────────────────────────────────────────────────────────────────

/// Learning modules suggested for each pillar, most foundational first.
pub fn module_suggestions(pillar: Pillar) -> &'static [&'static str; 3] {
    match pillar {
        Pillar::CyberSafety => &[
            "Staying Safe Online: Passwords & Phishing",
            "Social Media Safety & Boundaries",
            "Cyberbullying: Recognize & Respond",
        ],
        Pillar::AiLiteracy => &[
            "What is AI? Introduction for Youth",
            "Using AI Tools Responsibly",
            "AI and Your Future Career",
        ],
        Pillar::DigitalCitizenship => &[
            "Digital Footprint & Reputation",
            "Ethical Sharing and Citing",
            "Community Guidelines & Respect",
        ],
        Pillar::PrivacySecurity => &[
            "Privacy Settings Deep Dive",
            "Data and Who Has Access",
            "Secure Browsing & Devices",
        ],
        Pillar::CriticalThinking => &[
            "Spotting Misinformation",
            "Evaluating Sources",
            "Bias and Algorithms",
        ],
    }
}

/// Learning pathway recommended for a readiness tier.
pub fn pathway_for_tier(tier: ReadinessLevel) -> &'static str {
    match tier {
        ReadinessLevel::Foundational => "Cyber Safety Stabilization + Privacy Basics",
        ReadinessLevel::Developing => "AI Literacy Foundations + Critical Thinking Online",
        ReadinessLevel::Ready => "Advanced AI Readiness + Digital Leadership",
    }
}

// ─────────────────────────────────────────────────────────────────
// Scoring
// ─────────────────────────────────────────────────────────────────

/// `numerator / denominator` rounded to the nearest integer, halves upward.
///
/// `denominator` must be positive.
fn round_ratio(numerator: i64, denominator: i64) -> i64 {
    (2 * numerator + denominator).div_euclid(2 * denominator)
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Normalized 0-100 score for one pillar: `round(sum / 25 * 100)`.
///
/// An empty answer list scores 0.
pub fn pillar_score(answers: &[i32]) -> i32 {
    if answers.is_empty() {
        return 0;
    }
    let sum: i64 = answers.iter().map(|a| *a as i64).sum();
    saturate(round_ratio(sum * 100, MAX_SCORE_PER_PILLAR))
}

/// Score every pillar from an answer set. Unanswered slots are skipped, so a
/// pillar with no answers scores 0.
pub fn compute_pillar_scores(answers: &AnswerSet) -> PillarScores {
    PillarScores::from_fn(|pillar| pillar_score(&answers.answered_values(pillar)))
}

/// Rounded mean of the five pillar scores.
pub fn overall_score(scores: &PillarScores) -> i32 {
    let sum: i64 = scores.iter().map(|(_, s)| s as i64).sum();
    saturate(round_ratio(sum, Pillar::COUNT as i64))
}

/// Readiness tier for an overall score. Lower bounds are inclusive.
pub fn readiness_tier(overall: i32) -> ReadinessLevel {
    if overall >= READY_THRESHOLD {
        ReadinessLevel::Ready
    } else if overall >= DEVELOPING_THRESHOLD {
        ReadinessLevel::Developing
    } else {
        ReadinessLevel::Foundational
    }
}

/// The `count` lowest-scoring pillars, worst first.
///
/// Ties keep canonical pillar order. At most five pillars are returned.
pub fn priority_gaps(scores: &PillarScores, count: usize) -> Vec<Pillar> {
    let mut ranked = Pillar::all().to_vec();
    ranked.sort_by_key(|p| scores.get(*p));
    ranked.truncate(count);
    ranked
}

/// Up to `count` distinct modules drawn from each gap pillar's suggestions,
/// in pillar priority order then catalog order.
pub fn recommended_modules(gaps: &[Pillar], count: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(count);
    for pillar in gaps {
        for module in module_suggestions(*pillar) {
            if out.len() >= count {
                return out;
            }
            if !out.iter().any(|m| m == module) {
                out.push((*module).to_string());
            }
        }
    }
    out
}

/// Assemble a results record from pillar scores.
pub fn build_results(scores: PillarScores, timestamp: DateTime<Utc>) -> ResultsRecord {
    let overall = overall_score(&scores);
    let tier = readiness_tier(overall);
    let gaps = priority_gaps(&scores, PRIORITY_GAP_COUNT);
    let pathway = pathway_for_tier(tier);
    let modules = recommended_modules(&gaps, RECOMMENDED_MODULE_COUNT);

    debug!(
        overall_score = overall,
        readiness = %tier,
        gaps = ?gaps,
        "Built assessment results"
    );

    ResultsRecord {
        timestamp,
        overall_score: overall,
        readiness_level: tier,
        pillar_scores: scores,
        priority_gaps: gaps,
        pathway: pathway.to_string(),
        recommended_modules: modules,
    }
}

/// Score a finished answer set.
///
/// Fails with [`Error::AssessmentIncomplete`] naming the first pillar that
/// still has unanswered questions.
pub fn score_answers(answers: &AnswerSet, timestamp: DateTime<Utc>) -> Result<ResultsRecord> {
    if let Some(pillar) = answers.first_incomplete() {
        return Err(Error::AssessmentIncomplete {
            pillar,
            answered: answers.answered_count(pillar),
            expected: QUESTIONS_PER_PILLAR,
        });
    }
    Ok(build_results(compute_pillar_scores(answers), timestamp))
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
