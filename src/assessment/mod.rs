//! The DIRS assessment: question bank, scoring engine and onboarding options.

pub mod onboarding;
pub mod questions;
pub mod scoring;

pub use onboarding::{build_onboarding, ChatQuestion, CHAT_QUESTIONS};
pub use questions::{
    likert_label, questions_for, AGE_RANGES, LIKERT_LABELS, LIKERT_MAX, LIKERT_MIN,
    QUESTIONS_PER_PILLAR,
};
pub use scoring::{
    build_results, compute_pillar_scores, module_suggestions, overall_score, pathway_for_tier,
    pillar_score, priority_gaps, readiness_tier, recommended_modules, score_answers,
    PRIORITY_GAP_COUNT, RECOMMENDED_MODULE_COUNT,
};
