//! Fixed question list and per-question validation

use crate::data::dataset::{normalize_bmi, normalize_disorder};
use crate::data::record::{BloodPressure, OTHER_OCCUPATION};
use crate::errors::{Result, StressError};

/// Identifies each question, in asking order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionId {
    Gender,
    Age,
    Occupation,
    SleepDuration,
    SleepQuality,
    PhysicalActivity,
    BmiCategory,
    BloodPressure,
    HeartRate,
    DailySteps,
    SleepDisorder,
}

/// A validated answer
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Text(String),
    Count(u32),
    Hours(f64),
    Pressure(BloodPressure),
    Disorder(Option<String>),
}

/// One question with its validator
pub struct Question {
    pub id: QuestionId,
    /// Short field name used in error messages and flags
    pub field: &'static str,
    pub prompt: &'static str,
    /// Built-in answers; empty means free-form
    pub choices: &'static [&'static str],
    validate: fn(&Question, &[&str], &str) -> Result<Answer>,
}

impl std::fmt::Debug for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Question")
            .field("id", &self.id)
            .field("field", &self.field)
            .finish()
    }
}

impl Question {
    /// Validate against the built-in choices
    pub fn validate(&self, input: &str) -> Result<Answer> {
        self.validate_among(self.choices, input)
    }

    /// Validate with `choices` standing in for the built-in list
    pub fn validate_among(&self, choices: &[&str], input: &str) -> Result<Answer> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(StressError::invalid_input(self.field, "an answer is required"));
        }
        (self.validate)(self, choices, trimmed)
    }

    fn reject(&self, reason: impl Into<String>) -> StressError {
        StressError::invalid_input(self.field, reason)
    }

    fn count_in(&self, input: &str, min: u32, max: u32) -> Result<u32> {
        let value: u32 = input
            .parse()
            .map_err(|_| self.reject(format!("'{}' is not a whole number", input)))?;
        if value < min || value > max {
            return Err(self.reject(format!("must be between {} and {}", min, max)));
        }
        Ok(value)
    }
}

pub const GENDERS: &[&str] = &["Male", "Female"];

pub const OCCUPATIONS: &[&str] = &[
    "Accountant",
    "Doctor",
    "Engineer",
    "Lawyer",
    "Manager",
    "Nurse",
    "Sales Representative",
    "Salesperson",
    "Scientist",
    "Software Engineer",
    "Teacher",
    OTHER_OCCUPATION,
];

pub const BMI_CATEGORIES: &[&str] = &["Normal", "Overweight", "Obese"];

pub const SLEEP_DISORDERS: &[&str] = &["None", "Insomnia", "Sleep Apnea"];

/// Match a choice by name (case-insensitive) or by 1-based number
fn resolve_choice<'a>(choices: &[&'a str], input: &str) -> Option<&'a str> {
    if let Ok(n) = input.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| choices.get(i)).copied();
    }
    choices.iter().copied().find(|c| c.eq_ignore_ascii_case(input))
}

fn gender(q: &Question, choices: &[&str], input: &str) -> Result<Answer> {
    let resolved = match input.to_lowercase().as_str() {
        "m" => Some("Male"),
        "f" => Some("Female"),
        _ => resolve_choice(choices, input),
    };
    resolved
        .map(|g| Answer::Text(g.to_string()))
        .ok_or_else(|| q.reject("choose Male or Female"))
}

fn age(q: &Question, _: &[&str], input: &str) -> Result<Answer> {
    q.count_in(input, 1, 120).map(Answer::Count)
}

/// Unknown occupations fall back to "Others" rather than being rejected
fn occupation(_: &Question, choices: &[&str], input: &str) -> Result<Answer> {
    let resolved = resolve_choice(choices, input).unwrap_or(OTHER_OCCUPATION);
    Ok(Answer::Text(resolved.to_string()))
}

fn sleep_duration(q: &Question, _: &[&str], input: &str) -> Result<Answer> {
    let hours: f64 = input
        .parse()
        .map_err(|_| q.reject(format!("'{}' is not a number of hours", input)))?;
    if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
        return Err(q.reject("must be more than 0 and at most 24 hours"));
    }
    Ok(Answer::Hours(hours))
}

fn sleep_quality(q: &Question, _: &[&str], input: &str) -> Result<Answer> {
    q.count_in(input, 1, 10).map(Answer::Count)
}

fn physical_activity(q: &Question, _: &[&str], input: &str) -> Result<Answer> {
    q.count_in(input, 0, 1440).map(Answer::Count)
}

fn bmi_category(q: &Question, choices: &[&str], input: &str) -> Result<Answer> {
    let normalized = normalize_bmi(input);
    resolve_choice(choices, &normalized)
        .map(|b| Answer::Text(b.to_string()))
        .ok_or_else(|| q.reject(format!("choose one of {}", choices.join(", "))))
}

fn blood_pressure(q: &Question, _: &[&str], input: &str) -> Result<Answer> {
    let bp = BloodPressure::parse(input).map_err(|_| q.reject("use the form 120/80"))?;
    if !(50..=250).contains(&bp.systolic) || !(30..=150).contains(&bp.diastolic) {
        return Err(q.reject(format!("{} is outside the plausible range", bp)));
    }
    Ok(Answer::Pressure(bp))
}

fn heart_rate(q: &Question, _: &[&str], input: &str) -> Result<Answer> {
    q.count_in(input, 30, 220).map(Answer::Count)
}

fn daily_steps(q: &Question, _: &[&str], input: &str) -> Result<Answer> {
    q.count_in(input, 0, 100_000).map(Answer::Count)
}

fn sleep_disorder(q: &Question, choices: &[&str], input: &str) -> Result<Answer> {
    let resolved = resolve_choice(choices, input)
        .ok_or_else(|| q.reject("choose None, Insomnia or Sleep Apnea"))?;
    Ok(Answer::Disorder(normalize_disorder(resolved)))
}

/// All questions in asking order
pub static QUESTIONS: [Question; 11] = [
    Question {
        id: QuestionId::Gender,
        field: "gender",
        prompt: "What is your gender?",
        choices: GENDERS,
        validate: gender,
    },
    Question {
        id: QuestionId::Age,
        field: "age",
        prompt: "How old are you?",
        choices: &[],
        validate: age,
    },
    Question {
        id: QuestionId::Occupation,
        field: "occupation",
        prompt: "What is your occupation?",
        choices: OCCUPATIONS,
        validate: occupation,
    },
    Question {
        id: QuestionId::SleepDuration,
        field: "sleep duration",
        prompt: "How many hours do you sleep per night?",
        choices: &[],
        validate: sleep_duration,
    },
    Question {
        id: QuestionId::SleepQuality,
        field: "sleep quality",
        prompt: "Rate your sleep quality from 1 (poor) to 10 (excellent).",
        choices: &[],
        validate: sleep_quality,
    },
    Question {
        id: QuestionId::PhysicalActivity,
        field: "physical activity",
        prompt: "How many minutes of physical activity do you get per day?",
        choices: &[],
        validate: physical_activity,
    },
    Question {
        id: QuestionId::BmiCategory,
        field: "BMI category",
        prompt: "What is your BMI category?",
        choices: BMI_CATEGORIES,
        validate: bmi_category,
    },
    Question {
        id: QuestionId::BloodPressure,
        field: "blood pressure",
        prompt: "What is your blood pressure (e.g. 120/80)?",
        choices: &[],
        validate: blood_pressure,
    },
    Question {
        id: QuestionId::HeartRate,
        field: "heart rate",
        prompt: "What is your resting heart rate (bpm)?",
        choices: &[],
        validate: heart_rate,
    },
    Question {
        id: QuestionId::DailySteps,
        field: "daily steps",
        prompt: "How many steps do you walk per day?",
        choices: &[],
        validate: daily_steps,
    },
    Question {
        id: QuestionId::SleepDisorder,
        field: "sleep disorder",
        prompt: "Do you have a sleep disorder?",
        choices: SLEEP_DISORDERS,
        validate: sleep_disorder,
    },
];
