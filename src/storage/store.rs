//! Typed accessors over the five DIRS storage slots.
//!
//! Reads never fail: a slot that is missing, unreadable or holds a document
//! of the wrong shape comes back as [`Absent`], and callers treat that as
//! "not started yet". Writes return [`Result`] because the backend may be a
//! file system.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::types::{
    AnswerSet, OnboardingRecord, PillarScores, ProgressCheckpoint, ProgressRecord, ResultsRecord,
};

use super::backend::KeyValueStore;

/// Most recent results kept in the history slot.
pub const RESULTS_HISTORY_LIMIT: usize = 10;

// ─────────────────────────────────────────────────────────────────
// Slots
// ─────────────────────────────────────────────────────────────────

/// Named storage slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Onboarding,
    Assessment,
    Results,
    ResultsHistory,
    Progress,
}

impl Slot {
    /// Backend key for this slot.
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Onboarding => "dirs_onboarding",
            Slot::Assessment => "dirs_assessment",
            Slot::Results => "dirs_results",
            Slot::ResultsHistory => "dirs_results_history",
            Slot::Progress => "dirs_progress",
        }
    }

    pub fn all() -> &'static [Slot] {
        &[
            Slot::Onboarding,
            Slot::Assessment,
            Slot::Results,
            Slot::ResultsHistory,
            Slot::Progress,
        ]
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ─────────────────────────────────────────────────────────────────
// Absent
// ─────────────────────────────────────────────────────────────────

/// Why a slot read produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Absent {
    /// Nothing stored under the slot.
    Missing,
    /// The backend could not be read.
    Unreadable { reason: String },
    /// A document is stored but does not parse as the expected record.
    Malformed { reason: String },
}

impl fmt::Display for Absent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Absent::Missing => write!(f, "not stored"),
            Absent::Unreadable { reason } => write!(f, "unreadable: {}", reason),
            Absent::Malformed { reason } => write!(f, "malformed: {}", reason),
        }
    }
}

/// Outcome of reading a slot.
pub type Lookup<T> = std::result::Result<T, Absent>;

// ─────────────────────────────────────────────────────────────────
// Clock
// ─────────────────────────────────────────────────────────────────

/// Source of "now" for timestamps the store stamps itself.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

// ─────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────

/// DIRS record store over an injected key-value backend.
pub struct DirsStore<S, C = SystemClock> {
    backend: S,
    clock: C,
}

impl<S: KeyValueStore> DirsStore<S, SystemClock> {
    /// Store using wall-clock time for its own timestamps.
    pub fn new(backend: S) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> DirsStore<S, C> {
    pub fn with_clock(backend: S, clock: C) -> Self {
        Self { backend, clock }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn read<T: DeserializeOwned>(&self, slot: Slot) -> Lookup<T> {
        let raw = match self.backend.get(slot.key()) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => return Err(Absent::Missing),
            Err(e) => {
                warn!(slot = %slot, error = %e, "Storage slot unreadable, treating as absent");
                return Err(Absent::Unreadable {
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            warn!(slot = %slot, error = %e, "Storage slot malformed, treating as absent");
            Absent::Malformed {
                reason: e.to_string(),
            }
        })
    }

    fn write<T: Serialize>(&self, slot: Slot, record: &T) -> Result<()> {
        let json = serde_json::to_string(record).map_err(|e| Error::StorageSerialize {
            key: slot.key().to_string(),
            source: e,
        })?;
        self.backend.set(slot.key(), &json)?;
        debug!(slot = %slot, bytes = json.len(), "Storage slot written");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Onboarding
    // ─────────────────────────────────────────────────────────────

    pub fn onboarding(&self) -> Lookup<OnboardingRecord> {
        self.read(Slot::Onboarding)
    }

    /// Save onboarding choices, stamping `completed_at` with the current time.
    /// Returns the record as stored.
    pub fn set_onboarding(&self, mut record: OnboardingRecord) -> Result<OnboardingRecord> {
        record.completed_at = Some(self.clock.now());
        self.write(Slot::Onboarding, &record)?;
        info!(focus_area = %record.focus_area, role = %record.role, "Onboarding saved");
        Ok(record)
    }

    // ─────────────────────────────────────────────────────────────
    // Assessment answers
    // ─────────────────────────────────────────────────────────────

    pub fn assessment(&self) -> Lookup<AnswerSet> {
        self.read(Slot::Assessment)
    }

    /// Replace the in-progress answer set.
    pub fn set_assessment(&self, answers: &AnswerSet) -> Result<()> {
        self.write(Slot::Assessment, answers)
    }

    /// Forget the in-progress answer set.
    pub fn clear_assessment(&self) -> Result<()> {
        self.backend.delete(Slot::Assessment.key())?;
        info!("Assessment answers cleared");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Results
    // ─────────────────────────────────────────────────────────────

    /// Latest results.
    pub fn results(&self) -> Lookup<ResultsRecord> {
        self.read(Slot::Results)
    }

    /// Store `results` as the latest record and push it onto the front of
    /// the history, keeping at most [`RESULTS_HISTORY_LIMIT`] entries.
    pub fn set_results(&self, results: &ResultsRecord) -> Result<()> {
        self.write(Slot::Results, results)?;

        let mut history = self.results_history();
        history.insert(0, results.clone());
        history.truncate(RESULTS_HISTORY_LIMIT);
        self.write(Slot::ResultsHistory, &history)?;

        info!(
            overall_score = results.overall_score,
            readiness = %results.readiness_level,
            history_len = history.len(),
            "Results stored"
        );
        Ok(())
    }

    /// Stored results, newest first. Empty when nothing valid is stored.
    pub fn results_history(&self) -> Vec<ResultsRecord> {
        self.read(Slot::ResultsHistory).unwrap_or_default()
    }

    // ─────────────────────────────────────────────────────────────
    // Progress
    // ─────────────────────────────────────────────────────────────

    pub fn progress(&self) -> Lookup<ProgressRecord> {
        self.read(Slot::Progress)
    }

    pub fn set_progress(&self, progress: &ProgressRecord) -> Result<()> {
        self.write(Slot::Progress, progress)
    }

    /// Append a checkpoint to the progress record.
    ///
    /// Requires baseline results: without them nothing is written and
    /// `Ok(None)` is returned. The first checkpoint creates the progress
    /// record with the latest results as its baseline; later ones keep that
    /// baseline and append.
    pub fn record_checkpoint(
        &self,
        label: &str,
        overall_score: i32,
        pillar_scores: PillarScores,
    ) -> Result<Option<ProgressRecord>> {
        let baseline = match self.results() {
            Ok(results) => results,
            Err(reason) => {
                debug!(label, reason = %reason, "No baseline results, checkpoint skipped");
                return Ok(None);
            }
        };

        let checkpoint = ProgressCheckpoint {
            label: label.to_string(),
            timestamp: self.clock.now(),
            overall_score,
            pillar_scores,
        };

        let progress = match self.progress() {
            Ok(mut existing) => {
                existing.checkpoints.push(checkpoint);
                existing
            }
            Err(_) => ProgressRecord {
                baseline,
                checkpoints: vec![checkpoint],
            },
        };

        self.set_progress(&progress)?;
        info!(
            label,
            overall_score,
            checkpoints = progress.checkpoints.len(),
            "Checkpoint recorded"
        );
        Ok(Some(progress))
    }

    // ─────────────────────────────────────────────────────────────
    // Maintenance
    // ─────────────────────────────────────────────────────────────

    /// Delete every slot.
    pub fn reset_all(&self) -> Result<()> {
        for slot in Slot::all() {
            self.backend.delete(slot.key())?;
        }
        info!("All DIRS data cleared");
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::build_results;
    use crate::storage::MemoryStore;
    use crate::types::Pillar;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn store() -> DirsStore<MemoryStore, FixedClock> {
        DirsStore::with_clock(MemoryStore::new(), FixedClock(t0()))
    }

    fn results_with(score: i32, minutes: i64) -> ResultsRecord {
        build_results(PillarScores::uniform(score), t0() + Duration::minutes(minutes))
    }

    #[test]
    fn test_empty_store_reads_absent() {
        let s = store();
        assert_eq!(s.onboarding(), Err(Absent::Missing));
        assert_eq!(s.assessment(), Err(Absent::Missing));
        assert_eq!(s.results(), Err(Absent::Missing));
        assert_eq!(s.progress(), Err(Absent::Missing));
        assert!(s.results_history().is_empty());
    }

    #[test]
    fn test_malformed_slot_reads_absent() {
        let s = store();
        s.backend().set(Slot::Results.key(), "{not json").unwrap();
        s.backend().set(Slot::Assessment.key(), r#"{"cyberSafety":"three"}"#).unwrap();
        s.backend().set(Slot::ResultsHistory.key(), r#"{"a":1}"#).unwrap();

        assert!(matches!(s.results(), Err(Absent::Malformed { .. })));
        assert!(matches!(s.assessment(), Err(Absent::Malformed { .. })));
        assert!(s.results_history().is_empty());
    }

    #[test]
    fn test_blank_slot_reads_missing() {
        let s = store();
        s.backend().set(Slot::Progress.key(), "   ").unwrap();
        assert_eq!(s.progress(), Err(Absent::Missing));
    }

    #[test]
    fn test_onboarding_is_stamped_and_overwritten() {
        let s = store();
        let first = OnboardingRecord {
            focus_area: "AI Literacy".into(),
            role: "Student (13–18)".into(),
            commitment: "10 minutes/day".into(),
            ..Default::default()
        };
        let saved = s.set_onboarding(first).unwrap();
        assert_eq!(saved.completed_at, Some(t0()));
        assert_eq!(s.onboarding().unwrap(), saved);

        let second = OnboardingRecord {
            focus_area: "Critical Thinking".into(),
            role: "Young Adult (18–25)".into(),
            commitment: "Weekend only".into(),
            ..Default::default()
        };
        s.set_onboarding(second).unwrap();
        let stored = s.onboarding().unwrap();
        assert_eq!(stored.focus_area, "Critical Thinking");
        assert!(stored.chat_answers.is_none());
    }

    #[test]
    fn test_assessment_roundtrip_and_clear() {
        let s = store();
        let mut answers = AnswerSet::new();
        answers.set_answer(Pillar::CriticalThinking, 2, 4).unwrap();
        answers.basic_info.location = Some("Leeds".into());

        s.set_assessment(&answers).unwrap();
        assert_eq!(s.assessment().unwrap(), answers);

        s.clear_assessment().unwrap();
        assert_eq!(s.assessment(), Err(Absent::Missing));
    }

    #[test]
    fn test_set_results_updates_latest_and_history() {
        let s = store();
        let first = results_with(20, 0);
        let second = results_with(60, 1);

        s.set_results(&first).unwrap();
        s.set_results(&second).unwrap();

        assert_eq!(s.results().unwrap(), second);
        assert_eq!(s.results_history(), vec![second, first]);
    }

    #[test]
    fn test_history_is_bounded_newest_first() {
        let s = store();
        for i in 0..15 {
            s.set_results(&results_with(20 + i, i as i64)).unwrap();
        }

        let history = s.results_history();
        assert_eq!(history.len(), RESULTS_HISTORY_LIMIT);
        assert_eq!(history[0].overall_score, 34);
        assert_eq!(history[9].overall_score, 25);
        for pair in history.windows(2) {
            assert!(pair[0].timestamp > pair[1].timestamp);
        }
    }

    #[test]
    fn test_history_recovers_from_malformed() {
        let s = store();
        s.backend().set(Slot::ResultsHistory.key(), "[oops").unwrap();
        let record = results_with(40, 0);
        s.set_results(&record).unwrap();
        assert_eq!(s.results_history(), vec![record]);
    }

    #[test]
    fn test_checkpoint_without_baseline_is_noop() {
        let s = store();
        let before = s.backend().snapshot();

        let outcome = s
            .record_checkpoint("After Module 1", 70, PillarScores::uniform(70))
            .unwrap();

        assert!(outcome.is_none());
        assert_eq!(s.backend().snapshot(), before);
        assert_eq!(s.progress(), Err(Absent::Missing));
    }

    #[test]
    fn test_checkpoint_creates_then_appends() {
        let s = store();
        let baseline = results_with(40, 0);
        s.set_results(&baseline).unwrap();

        let progress = s
            .record_checkpoint("After Module 1", 52, PillarScores::uniform(52))
            .unwrap()
            .unwrap();
        assert_eq!(progress.baseline, baseline);
        assert_eq!(progress.checkpoints.len(), 1);
        assert_eq!(progress.checkpoints[0].timestamp, t0());

        // A newer latest result must not replace the first baseline
        s.set_results(&results_with(80, 5)).unwrap();
        s.record_checkpoint("After Module 2", 64, PillarScores::uniform(64))
            .unwrap();

        let stored = s.progress().unwrap();
        assert_eq!(stored.baseline, baseline);
        let labels: Vec<_> = stored.checkpoints.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["After Module 1", "After Module 2"]);
        assert_eq!(stored.checkpoints[1].overall_score, 64);
    }

    #[test]
    fn test_progress_roundtrip() {
        let s = store();
        let progress = ProgressRecord {
            baseline: results_with(48, 0),
            checkpoints: vec![],
        };
        s.set_progress(&progress).unwrap();
        assert_eq!(s.progress().unwrap(), progress);
    }

    #[test]
    fn test_reset_all() {
        let s = store();
        s.set_results(&results_with(60, 0)).unwrap();
        s.set_assessment(&AnswerSet::new()).unwrap();
        assert!(!s.backend().is_empty());

        s.reset_all().unwrap();
        assert!(s.backend().is_empty());
    }
}
