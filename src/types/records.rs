//! Records persisted by the store: answer sets, results, progress and
//! onboarding choices.
//!
//! Field names serialize in camelCase so stored documents keep the same shape
//! across versions of the engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::assessment::{LIKERT_MAX, LIKERT_MIN, QUESTIONS_PER_PILLAR};
use crate::error::{Error, Result};

use super::pillar::{Pillar, PillarScores, ReadinessLevel};

// ─────────────────────────────────────────────────────────────────
// Answer Set
// ─────────────────────────────────────────────────────────────────

/// Optional free-form details collected on the first wizard step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// In-progress assessment answers.
///
/// Each pillar holds one slot per question. A slot is `None` until answered,
/// so a set must be checked with [`AnswerSet::is_complete`] before scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSet {
    #[serde(default)]
    pub basic_info: BasicInfo,
    #[serde(default)]
    pub cyber_safety: Vec<Option<i32>>,
    #[serde(default)]
    pub ai_literacy: Vec<Option<i32>>,
    #[serde(default)]
    pub digital_citizenship: Vec<Option<i32>>,
    #[serde(default)]
    pub privacy_security: Vec<Option<i32>>,
    #[serde(default)]
    pub critical_thinking: Vec<Option<i32>>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer slots recorded for a pillar.
    pub fn answers(&self, pillar: Pillar) -> &[Option<i32>] {
        match pillar {
            Pillar::CyberSafety => &self.cyber_safety,
            Pillar::AiLiteracy => &self.ai_literacy,
            Pillar::DigitalCitizenship => &self.digital_citizenship,
            Pillar::PrivacySecurity => &self.privacy_security,
            Pillar::CriticalThinking => &self.critical_thinking,
        }
    }

    fn answers_mut(&mut self, pillar: Pillar) -> &mut Vec<Option<i32>> {
        match pillar {
            Pillar::CyberSafety => &mut self.cyber_safety,
            Pillar::AiLiteracy => &mut self.ai_literacy,
            Pillar::DigitalCitizenship => &mut self.digital_citizenship,
            Pillar::PrivacySecurity => &mut self.privacy_security,
            Pillar::CriticalThinking => &mut self.critical_thinking,
        }
    }

    /// Record the answer to question `index` (zero-based) of a pillar.
    ///
    /// Unanswered earlier slots are padded with `None`.
    pub fn set_answer(&mut self, pillar: Pillar, index: usize, value: i32) -> Result<()> {
        if index >= QUESTIONS_PER_PILLAR {
            return Err(Error::invalid_answer(format!(
                "{} has {} questions, got question {}",
                pillar,
                QUESTIONS_PER_PILLAR,
                index + 1
            )));
        }
        if !(LIKERT_MIN..=LIKERT_MAX).contains(&value) {
            return Err(Error::invalid_answer(format!(
                "value {} is outside {}-{}",
                value, LIKERT_MIN, LIKERT_MAX
            )));
        }

        let slots = self.answers_mut(pillar);
        if slots.len() <= index {
            slots.resize(index + 1, None);
        }
        slots[index] = Some(value);
        Ok(())
    }

    /// Values actually answered for a pillar, in question order.
    pub fn answered_values(&self, pillar: Pillar) -> Vec<i32> {
        self.answers(pillar).iter().flatten().copied().collect()
    }

    /// Number of answered questions for a pillar.
    pub fn answered_count(&self, pillar: Pillar) -> usize {
        self.answers(pillar).iter().filter(|a| a.is_some()).count()
    }

    /// Whether every question of a pillar holds a value on the Likert scale.
    pub fn is_pillar_complete(&self, pillar: Pillar) -> bool {
        let slots = self.answers(pillar);
        slots.len() == QUESTIONS_PER_PILLAR
            && slots
                .iter()
                .all(|a| matches!(a, Some(v) if (LIKERT_MIN..=LIKERT_MAX).contains(v)))
    }

    /// First pillar, in canonical order, that still needs answers.
    pub fn first_incomplete(&self) -> Option<Pillar> {
        Pillar::all()
            .iter()
            .copied()
            .find(|p| !self.is_pillar_complete(*p))
    }

    pub fn is_complete(&self) -> bool {
        self.first_incomplete().is_none()
    }
}

// ─────────────────────────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────────────────────────

/// Outcome of one completed assessment. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsRecord {
    pub timestamp: DateTime<Utc>,
    pub overall_score: i32,
    pub readiness_level: ReadinessLevel,
    pub pillar_scores: PillarScores,
    /// Weakest pillars, worst first.
    pub priority_gaps: Vec<Pillar>,
    pub pathway: String,
    pub recommended_modules: Vec<String>,
}

// ─────────────────────────────────────────────────────────────────
// Progress
// ─────────────────────────────────────────────────────────────────

/// A re-measurement recorded against the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressCheckpoint {
    pub label: String,
    pub timestamp: DateTime<Utc>,
    pub overall_score: i32,
    pub pillar_scores: PillarScores,
}

/// Baseline results plus every checkpoint recorded since, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub baseline: ResultsRecord,
    #[serde(default)]
    pub checkpoints: Vec<ProgressCheckpoint>,
}

// ─────────────────────────────────────────────────────────────────
// Onboarding
// ─────────────────────────────────────────────────────────────────

/// Choices made in the "help me choose" onboarding flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRecord {
    pub focus_area: String,
    pub role: String,
    pub commitment: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_answers: Option<BTreeMap<String, String>>,

    /// Set by the store when the record is saved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_set(value: i32) -> AnswerSet {
        let mut set = AnswerSet::new();
        for pillar in Pillar::all() {
            for i in 0..QUESTIONS_PER_PILLAR {
                set.set_answer(*pillar, i, value).unwrap();
            }
        }
        set
    }

    #[test]
    fn test_set_answer_pads_unanswered_slots() {
        let mut set = AnswerSet::new();
        set.set_answer(Pillar::AiLiteracy, 3, 4).unwrap();
        assert_eq!(set.answers(Pillar::AiLiteracy), &[None, None, None, Some(4)]);
        assert_eq!(set.answered_count(Pillar::AiLiteracy), 1);
        assert_eq!(set.answered_values(Pillar::AiLiteracy), vec![4]);
    }

    #[test]
    fn test_set_answer_overwrites() {
        let mut set = AnswerSet::new();
        set.set_answer(Pillar::CyberSafety, 0, 2).unwrap();
        set.set_answer(Pillar::CyberSafety, 0, 5).unwrap();
        assert_eq!(set.answers(Pillar::CyberSafety), &[Some(5)]);
    }

    #[test]
    fn test_set_answer_rejects_out_of_range() {
        let mut set = AnswerSet::new();
        assert!(set.set_answer(Pillar::CyberSafety, 0, 0).is_err());
        assert!(set.set_answer(Pillar::CyberSafety, 0, 6).is_err());
        assert!(set.set_answer(Pillar::CyberSafety, 5, 3).is_err());
        assert!(set.answers(Pillar::CyberSafety).is_empty());
    }

    #[test]
    fn test_completeness() {
        let mut set = complete_set(3);
        assert!(set.is_complete());

        set.critical_thinking[2] = None;
        assert_eq!(set.first_incomplete(), Some(Pillar::CriticalThinking));

        let empty = AnswerSet::new();
        assert_eq!(empty.first_incomplete(), Some(Pillar::CyberSafety));
    }

    #[test]
    fn test_completeness_rejects_stored_out_of_range() {
        let mut set = complete_set(4);
        set.ai_literacy[0] = Some(0);
        assert!(!set.is_pillar_complete(Pillar::AiLiteracy));
    }

    #[test]
    fn test_answer_set_json_shape() {
        let mut set = AnswerSet::new();
        set.basic_info.first_name = Some("Sam".into());
        set.set_answer(Pillar::PrivacySecurity, 1, 5).unwrap();

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["basicInfo"]["firstName"], "Sam");
        assert!(json["basicInfo"].get("location").is_none());
        assert_eq!(json["privacySecurity"], serde_json::json!([null, 5]));
    }

    #[test]
    fn test_answer_set_missing_pillars_default_empty() {
        let set: AnswerSet =
            serde_json::from_str(r#"{"basicInfo":{},"cyberSafety":[1,2]}"#).unwrap();
        assert_eq!(set.answered_values(Pillar::CyberSafety), vec![1, 2]);
        assert!(set.answers(Pillar::CriticalThinking).is_empty());
    }

    #[test]
    fn test_results_accepts_millisecond_timestamps() {
        let json = r#"{
            "timestamp": "2026-03-01T09:30:00.000Z",
            "overallScore": 52,
            "readinessLevel": "Developing",
            "pillarScores": {"cyberSafety": 40, "aiLiteracy": 60, "digitalCitizenship": 52,
                             "privacySecurity": 48, "criticalThinking": 60},
            "priorityGaps": ["cyberSafety", "privacySecurity"],
            "pathway": "AI Literacy Foundations + Critical Thinking Online",
            "recommendedModules": []
        }"#;
        let record: ResultsRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.overall_score, 52);
        assert_eq!(record.priority_gaps[1], Pillar::PrivacySecurity);
    }
}
