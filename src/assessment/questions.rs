//! DIRS question bank: five Likert statements per pillar.

use crate::types::Pillar;

/// Questions asked for every pillar.
pub const QUESTIONS_PER_PILLAR: usize = 5;

/// Lowest Likert response.
pub const LIKERT_MIN: i32 = 1;

/// Highest Likert response.
pub const LIKERT_MAX: i32 = 5;

/// Likert response labels, lowest first.
pub const LIKERT_LABELS: [(i32, &str); 5] = [
    (1, "Strongly disagree"),
    (2, "Disagree"),
    (3, "Neutral"),
    (4, "Agree"),
    (5, "Strongly agree"),
];

/// Age ranges offered on the basic-info step.
pub const AGE_RANGES: [&str; 4] = ["Under 13", "13–18", "18–25", "25+"];

const CYBER_SAFETY: [&str; QUESTIONS_PER_PILLAR] = [
    "I know how to create strong passwords and keep them safe.",
    "I can recognize phishing attempts or suspicious links.",
    "I understand how to stay safe on social media and gaming platforms.",
    "I know what to do if I experience cyberbullying.",
    "I keep my devices and apps updated for security.",
];

const AI_LITERACY: [&str; QUESTIONS_PER_PILLAR] = [
    "I understand what AI is and how it is used in everyday tools.",
    "I can identify when I am interacting with AI (e.g., chatbots, recommendations).",
    "I think about whether AI-generated content might be biased or wrong.",
    "I know how to use AI tools in a way that supports my learning.",
    "I am curious about how AI might affect my future work and life.",
];

const DIGITAL_CITIZENSHIP: [&str; QUESTIONS_PER_PILLAR] = [
    "I think about how my online actions affect others.",
    "I respect others' privacy and don't share their information without permission.",
    "I try to verify information before sharing it online.",
    "I follow community guidelines and report harmful content when needed.",
    "I balance screen time with other activities.",
];

const PRIVACY_SECURITY: [&str; QUESTIONS_PER_PILLAR] = [
    "I review and adjust privacy settings on apps and accounts.",
    "I know what personal information I should not share online.",
    "I understand that companies may collect and use my data.",
    "I use secure connections (e.g., HTTPS) when possible.",
    "I know how to report if my account or data has been compromised.",
];

const CRITICAL_THINKING: [&str; QUESTIONS_PER_PILLAR] = [
    "I question whether online information is accurate before trusting it.",
    "I consider who created content and why they might have shared it.",
    "I notice when algorithms might be shaping what I see (e.g., recommendations).",
    "I can compare different sources to form my own view.",
    "I reflect on how digital media affects my mood and choices.",
];

/// Question prompts for a pillar, in the order they are asked.
pub fn questions_for(pillar: Pillar) -> &'static [&'static str; QUESTIONS_PER_PILLAR] {
    match pillar {
        Pillar::CyberSafety => &CYBER_SAFETY,
        Pillar::AiLiteracy => &AI_LITERACY,
        Pillar::DigitalCitizenship => &DIGITAL_CITIZENSHIP,
        Pillar::PrivacySecurity => &PRIVACY_SECURITY,
        Pillar::CriticalThinking => &CRITICAL_THINKING,
    }
}

/// Label for a Likert value, if it is on the scale.
pub fn likert_label(value: i32) -> Option<&'static str> {
    LIKERT_LABELS
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
}
