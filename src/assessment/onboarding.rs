//! Onboarding choices: the fixed options offered by the "help me choose" flow
//! and the short follow-up chat.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::OnboardingRecord;

/// Areas a user can say they want to improve.
pub const FOCUS_OPTIONS: [&str; 6] = [
    "Cyber Safety",
    "AI Literacy",
    "Digital Citizenship",
    "Privacy & Security",
    "Critical Thinking",
    "I'm not sure",
];

pub const ROLE_OPTIONS: [&str; 3] = [
    "Student (13–18)",
    "Young Adult (18–25)",
    "Parent exploring for my child",
];

pub const COMMITMENT_OPTIONS: [&str; 4] = [
    "10 minutes/day",
    "30 minutes/day",
    "2 hours/week",
    "Weekend only",
];

/// One multiple-choice question of the onboarding chat.
#[derive(Debug, Clone, Copy)]
pub struct ChatQuestion {
    pub id: &'static str,
    pub text: &'static str,
    pub options: &'static [&'static str],
}

pub const CHAT_QUESTIONS: [ChatQuestion; 4] = [
    ChatQuestion {
        id: "aiUsage",
        text: "How often do you use AI tools (e.g., ChatGPT, Copilot)?",
        options: &["Rarely", "Sometimes", "Often", "Daily"],
    },
    ChatQuestion {
        id: "cyberRisk",
        text: "How would you rate your exposure to cyber risks (phishing, scams, privacy)?",
        options: &["Low", "Medium", "High", "Not sure"],
    },
    ChatQuestion {
        id: "confidence",
        text: "How confident do you feel about your digital skills overall?",
        options: &["Not confident", "Somewhat", "Confident", "Very confident"],
    },
    ChatQuestion {
        id: "goals",
        text: "What's your main goal?",
        options: &[
            "Stay safe online",
            "Learn AI basics",
            "Improve critical thinking",
            "All of the above",
        ],
    },
];

/// Match `value` against `options` ignoring case and surrounding whitespace,
/// returning the canonical spelling.
fn match_option(field: &str, value: &str, options: &[&'static str]) -> Result<&'static str> {
    let wanted = value.trim();
    options
        .iter()
        .find(|opt| opt.eq_ignore_ascii_case(wanted))
        .copied()
        .ok_or_else(|| Error::invalid_onboarding(field, value))
}

/// Build an onboarding record from user input, normalizing every choice to
/// its canonical option text.
///
/// An empty chat map is stored as no chat answers at all.
pub fn build_onboarding(
    focus_area: &str,
    role: &str,
    commitment: &str,
    chat: &[(String, String)],
) -> Result<OnboardingRecord> {
    let focus_area = match_option("focus area", focus_area, &FOCUS_OPTIONS)?;
    let role = match_option("role", role, &ROLE_OPTIONS)?;
    let commitment = match_option("commitment", commitment, &COMMITMENT_OPTIONS)?;

    let mut answers = BTreeMap::new();
    for (id, value) in chat {
        let question = CHAT_QUESTIONS
            .iter()
            .find(|q| q.id.eq_ignore_ascii_case(id.trim()))
            .ok_or_else(|| Error::invalid_onboarding("chat question", id.as_str()))?;
        let answer = match_option(question.id, value, question.options)?;
        answers.insert(question.id.to_string(), answer.to_string());
    }

    Ok(OnboardingRecord {
        focus_area: focus_area.to_string(),
        role: role.to_string(),
        commitment: commitment.to_string(),
        chat_answers: if answers.is_empty() { None } else { Some(answers) },
        completed_at: None,
    })
}
