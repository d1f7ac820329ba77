//! Static advice shown with each label

use crate::predict::level::StressLevel;

/// Fixed text block for one stress level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Advice {
    pub headline: &'static str,
    pub summary: &'static str,
    pub tips: &'static [&'static str],
}

const LOW: Advice = Advice {
    headline: "Your stress level looks low.",
    summary: "Your sleep and activity habits are working for you. Keep them steady.",
    tips: &[
        "Keep a consistent bedtime and wake-up time, weekends included.",
        "Stay active; short walks during the day count.",
        "Make time for hobbies and people you enjoy.",
        "Check in with yourself regularly so changes don't sneak up on you.",
    ],
};

const MEDIUM: Advice = Advice {
    headline: "Your stress level is moderate.",
    summary: "Some pressure is building. Small, regular adjustments help most at this stage.",
    tips: &[
        "Aim for 7-9 hours of sleep and wind down without screens for the last hour.",
        "Add 20-30 minutes of moderate exercise most days.",
        "Try a few minutes of slow breathing or mindfulness when tension rises.",
        "Break large tasks into smaller steps and schedule short breaks.",
        "Cut back on caffeine after midday.",
    ],
};

const HIGH: Advice = Advice {
    headline: "Your stress level appears high.",
    summary: "Your answers point to significant strain. Please take it seriously and get support.",
    tips: &[
        "Talk to a doctor or mental health professional about how you are feeling.",
        "Protect your sleep: fixed schedule, dark quiet room, no late heavy meals.",
        "Reach out to friends or family; you don't have to handle this alone.",
        "Reduce commitments where you can and say no to non-essential tasks.",
        "Use relaxation techniques daily: breathing exercises, stretching, or a short walk.",
        "If you ever feel unsafe, contact local emergency services immediately.",
    ],
};

/// Advice block for a label
pub fn for_level(level: StressLevel) -> &'static Advice {
    match level {
        StressLevel::Low => &LOW,
        StressLevel::Medium => &MEDIUM,
        StressLevel::High => &HIGH,
    }
}
