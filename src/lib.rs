//! Digital Intelligence Readiness System (DIRS)
//!
//! Scores a 25-question self-assessment across five pillars into pillar
//! scores, an overall score, a readiness tier, priority gaps, a learning
//! pathway and recommended modules, and persists answers, results, history,
//! progress checkpoints and onboarding choices in a local key-value store.
//!
//! ```
//! use chrono::Utc;
//! use dirs_engine::assessment::score_answers;
//! use dirs_engine::types::{AnswerSet, Pillar, ReadinessLevel};
//!
//! let mut answers = AnswerSet::new();
//! for pillar in Pillar::all() {
//!     for i in 0..5 {
//!         answers.set_answer(*pillar, i, 3).unwrap();
//!     }
//! }
//! let results = score_answers(&answers, Utc::now()).unwrap();
//! assert_eq!(results.overall_score, 60);
//! assert_eq!(results.readiness_level, ReadinessLevel::Developing);
//! ```

pub mod assessment;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod logging;
pub mod storage;
pub mod types;
pub mod version;

pub use error::{Error, ErrorCode, Result};
