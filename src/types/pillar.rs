//! Pillar taxonomy, per-pillar score map and readiness tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ─────────────────────────────────────────────────────────────────
// Pillar
// ─────────────────────────────────────────────────────────────────

/// One of the five digital-literacy topic areas scored by DIRS.
///
/// Declaration order is the canonical order. It drives iteration, breaks ties
/// when ranking priority gaps, and fixes the order in which recommended
/// modules are collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pillar {
    CyberSafety,
    AiLiteracy,
    DigitalCitizenship,
    PrivacySecurity,
    CriticalThinking,
}

impl Pillar {
    /// Number of pillars.
    pub const COUNT: usize = 5;

    /// All pillars in canonical order.
    pub fn all() -> &'static [Pillar; Pillar::COUNT] {
        &[
            Pillar::CyberSafety,
            Pillar::AiLiteracy,
            Pillar::DigitalCitizenship,
            Pillar::PrivacySecurity,
            Pillar::CriticalThinking,
        ]
    }

    /// Stable identifier, as used in stored records.
    pub fn id(&self) -> &'static str {
        match self {
            Pillar::CyberSafety => "cyberSafety",
            Pillar::AiLiteracy => "aiLiteracy",
            Pillar::DigitalCitizenship => "digitalCitizenship",
            Pillar::PrivacySecurity => "privacySecurity",
            Pillar::CriticalThinking => "criticalThinking",
        }
    }

    /// Slug used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Pillar::CyberSafety => "cyber-safety",
            Pillar::AiLiteracy => "ai-literacy",
            Pillar::DigitalCitizenship => "digital-citizenship",
            Pillar::PrivacySecurity => "privacy-security",
            Pillar::CriticalThinking => "critical-thinking",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Pillar::CyberSafety => "Cyber Safety",
            Pillar::AiLiteracy => "AI Literacy",
            Pillar::DigitalCitizenship => "Digital Citizenship",
            Pillar::PrivacySecurity => "Privacy & Security",
            Pillar::CriticalThinking => "Critical Thinking",
        }
    }

    /// Position in canonical order.
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Pillar {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "cybersafety" => Ok(Pillar::CyberSafety),
            "ailiteracy" => Ok(Pillar::AiLiteracy),
            "digitalcitizenship" => Ok(Pillar::DigitalCitizenship),
            "privacysecurity" | "privacyandsecurity" => Ok(Pillar::PrivacySecurity),
            "criticalthinking" => Ok(Pillar::CriticalThinking),
            _ => Err(Error::UnknownPillar { name: s.to_string() }),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Pillar Scores
// ─────────────────────────────────────────────────────────────────

/// Score per pillar, normally in 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarScores {
    pub cyber_safety: i32,
    pub ai_literacy: i32,
    pub digital_citizenship: i32,
    pub privacy_security: i32,
    pub critical_thinking: i32,
}

impl PillarScores {
    /// Build a score map by evaluating `f` once per pillar, in canonical order.
    pub fn from_fn(mut f: impl FnMut(Pillar) -> i32) -> Self {
        Self {
            cyber_safety: f(Pillar::CyberSafety),
            ai_literacy: f(Pillar::AiLiteracy),
            digital_citizenship: f(Pillar::DigitalCitizenship),
            privacy_security: f(Pillar::PrivacySecurity),
            critical_thinking: f(Pillar::CriticalThinking),
        }
    }

    /// Same score for every pillar.
    pub fn uniform(score: i32) -> Self {
        Self::from_fn(|_| score)
    }

    pub fn get(&self, pillar: Pillar) -> i32 {
        match pillar {
            Pillar::CyberSafety => self.cyber_safety,
            Pillar::AiLiteracy => self.ai_literacy,
            Pillar::DigitalCitizenship => self.digital_citizenship,
            Pillar::PrivacySecurity => self.privacy_security,
            Pillar::CriticalThinking => self.critical_thinking,
        }
    }

    pub fn set(&mut self, pillar: Pillar, score: i32) {
        let slot = match pillar {
            Pillar::CyberSafety => &mut self.cyber_safety,
            Pillar::AiLiteracy => &mut self.ai_literacy,
            Pillar::DigitalCitizenship => &mut self.digital_citizenship,
            Pillar::PrivacySecurity => &mut self.privacy_security,
            Pillar::CriticalThinking => &mut self.critical_thinking,
        };
        *slot = score;
    }

    /// `(pillar, score)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Pillar, i32)> + '_ {
        Pillar::all().iter().map(move |p| (*p, self.get(*p)))
    }
}

// ─────────────────────────────────────────────────────────────────
// Readiness Level
// ─────────────────────────────────────────────────────────────────

/// Readiness tier derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ReadinessLevel {
    Foundational,
    Developing,
    Ready,
}

impl ReadinessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadinessLevel::Foundational => "Foundational",
            ReadinessLevel::Developing => "Developing",
            ReadinessLevel::Ready => "Ready",
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
