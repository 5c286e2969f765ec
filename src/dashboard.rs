//! Progress dashboard: baseline vs latest scores and suggested next actions.
//!
//! The view is derived from stored results and progress only. Simulated
//! checkpoints are placeholder demo data, produced solely when asked for and
//! flagged as such in the view.

use serde::Serialize;

use crate::assessment::overall_score;
use crate::types::{Pillar, PillarScores, ProgressRecord, ResultsRecord};

/// Shown when the latest results carry no priority gaps.
pub const DEFAULT_NEXT_ACTIONS: [Pillar; 2] = [Pillar::CyberSafety, Pillar::AiLiteracy];

/// Pillars reaching this score are left unchanged by demo checkpoints.
const DEMO_IMPROVEMENT_CEILING: i32 = 70;

/// One point on the progress line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckpointView {
    pub label: String,
    pub overall_score: i32,
    pub pillar_scores: PillarScores,
    /// True for demo data that was never measured.
    pub simulated: bool,
}

/// Per-pillar change from baseline to the latest point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarDelta {
    pub pillar: Pillar,
    pub baseline: i32,
    pub latest: i32,
    pub delta: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub baseline_score: i32,
    pub baseline_pillars: PillarScores,
    pub checkpoints: Vec<CheckpointView>,
    pub latest_score: i32,
    pub latest_pillars: PillarScores,
    pub pillar_deltas: Vec<PillarDelta>,
    pub next_actions: Vec<Pillar>,
}

impl DashboardView {
    /// Build the view from the latest results and optional progress record.
    ///
    /// The baseline is the progress record's baseline when one exists,
    /// otherwise the latest results. Demo checkpoints are only generated when
    /// `demo` is set and no real checkpoint has been recorded.
    pub fn build(results: &ResultsRecord, progress: Option<&ProgressRecord>, demo: bool) -> Self {
        let baseline = progress.map(|p| &p.baseline).unwrap_or(results);

        let mut checkpoints: Vec<CheckpointView> = progress
            .map(|p| {
                p.checkpoints
                    .iter()
                    .map(|c| CheckpointView {
                        label: c.label.clone(),
                        overall_score: c.overall_score,
                        pillar_scores: c.pillar_scores,
                        simulated: false,
                    })
                    .collect()
            })
            .unwrap_or_default();

        if checkpoints.is_empty() && demo {
            checkpoints = demo_checkpoints(&baseline.pillar_scores);
        }

        let (latest_score, latest_pillars) = match checkpoints.last() {
            Some(last) => (last.overall_score, last.pillar_scores),
            None => (baseline.overall_score, baseline.pillar_scores),
        };

        Self {
            baseline_score: baseline.overall_score,
            baseline_pillars: baseline.pillar_scores,
            pillar_deltas: pillar_deltas(&baseline.pillar_scores, &latest_pillars),
            checkpoints,
            latest_score,
            latest_pillars,
            next_actions: next_actions(results),
        }
    }

    /// Whether any point on the line is demo data.
    pub fn has_simulated(&self) -> bool {
        self.checkpoints.iter().any(|c| c.simulated)
    }
}

/// Priority gaps of the latest results, or [`DEFAULT_NEXT_ACTIONS`] if none.
pub fn next_actions(results: &ResultsRecord) -> Vec<Pillar> {
    if results.priority_gaps.is_empty() {
        DEFAULT_NEXT_ACTIONS.to_vec()
    } else {
        results.priority_gaps.clone()
    }
}

pub fn pillar_deltas(baseline: &PillarScores, latest: &PillarScores) -> Vec<PillarDelta> {
    Pillar::all()
        .iter()
        .map(|&pillar| {
            let before = baseline.get(pillar);
            let after = latest.get(pillar);
            PillarDelta {
                pillar,
                baseline: before,
                latest: after,
                delta: after - before,
            }
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────
// Demo data
// ─────────────────────────────────────────────────────────────────

/// Placeholder improvement applied at `step` (0-based): +7, then +11, ...
/// Pillars already at 70 or above stay put; results are capped at 100.
fn simulate_step(scores: &PillarScores, step: i32) -> PillarScores {
    let delta = 7 + step * 4;
    PillarScores::from_fn(|pillar| {
        let score = scores.get(pillar);
        if score < DEMO_IMPROVEMENT_CEILING {
            (score + delta).min(100)
        } else {
            score
        }
    })
}

/// Two made-up checkpoints ("After Module 1", "After Module 2") for
/// previewing the dashboard before any real checkpoint exists.
///
/// This is demo data. It is never persisted and every entry is marked
/// `simulated`.
pub fn demo_checkpoints(baseline: &PillarScores) -> Vec<CheckpointView> {
    let first = simulate_step(baseline, 0);
    let second = simulate_step(&first, 1);

    [("After Module 1", first), ("After Module 2", second)]
        .into_iter()
        .map(|(label, scores)| CheckpointView {
            label: label.to_string(),
            overall_score: overall_score(&scores),
            pillar_scores: scores,
            simulated: true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::build_results;
    use crate::types::ProgressCheckpoint;
    use chrono::{TimeZone, Utc};

    fn results(scores: PillarScores) -> ResultsRecord {
        build_results(scores, Utc.with_ymd_and_hms(2026, 1, 5, 10, 0, 0).unwrap())
    }

    #[test]
    fn test_no_checkpoints_latest_is_baseline() {
        let latest = results(PillarScores::uniform(60));
        let view = DashboardView::build(&latest, None, false);

        assert_eq!(view.baseline_score, 60);
        assert_eq!(view.latest_score, 60);
        assert!(view.checkpoints.is_empty());
        assert!(view.pillar_deltas.iter().all(|d| d.delta == 0));
        assert_eq!(view.next_actions, vec![Pillar::CyberSafety, Pillar::AiLiteracy]);
    }

    #[test]
    fn test_real_checkpoints_drive_latest() {
        let baseline = results(PillarScores::uniform(40));
        let progress = ProgressRecord {
            baseline: baseline.clone(),
            checkpoints: vec![ProgressCheckpoint {
                label: "After Module 1".into(),
                timestamp: baseline.timestamp,
                overall_score: 52,
                pillar_scores: PillarScores::uniform(52),
            }],
        };
        let newer = results(PillarScores::uniform(80));

        let view = DashboardView::build(&newer, Some(&progress), true);
        assert_eq!(view.baseline_score, 40);
        assert_eq!(view.latest_score, 52);
        assert_eq!(view.checkpoints.len(), 1);
        assert!(!view.has_simulated());
        assert!(view.pillar_deltas.iter().all(|d| d.delta == 12));
    }

    #[test]
    fn test_demo_checkpoints_only_on_request() {
        let latest = results(PillarScores::uniform(60));
        assert!(!DashboardView::build(&latest, None, false).has_simulated());

        let view = DashboardView::build(&latest, None, true);
        assert!(view.has_simulated());
        assert_eq!(view.checkpoints.len(), 2);
    }

    #[test]
    fn test_demo_checkpoint_arithmetic() {
        let mut base = PillarScores::uniform(60);
        base.set(Pillar::PrivacySecurity, 80);
        base.set(Pillar::CriticalThinking, 96);

        let demo = demo_checkpoints(&base);
        let first = demo[0].pillar_scores;
        let second = demo[1].pillar_scores;

        assert_eq!(first.get(Pillar::CyberSafety), 67);
        assert_eq!(first.get(Pillar::PrivacySecurity), 80);
        assert_eq!(first.get(Pillar::CriticalThinking), 96);
        // 67 is still below 70, so the second step applies +11
        assert_eq!(second.get(Pillar::CyberSafety), 78);
        assert_eq!(demo[0].label, "After Module 1");
        assert_eq!(demo[1].label, "After Module 2");
        assert_eq!(demo[1].overall_score, overall_score(&second));
    }

    #[test]
    fn test_demo_step_caps_at_100() {
        let capped = simulate_step(&PillarScores::uniform(65), 10);
        assert_eq!(capped, PillarScores::uniform(100));
    }

    #[test]
    fn test_next_actions_follow_gaps() {
        let mut scores = PillarScores::uniform(80);
        scores.set(Pillar::CriticalThinking, 20);
        scores.set(Pillar::DigitalCitizenship, 40);
        let r = results(scores);
        assert_eq!(
            next_actions(&r),
            vec![Pillar::CriticalThinking, Pillar::DigitalCitizenship]
        );
    }
}
