//! Linear questionnaire driver
//!
//! Advances one question per valid answer. An invalid answer leaves the
//! position untouched so the same question is asked again.

use crate::data::record::{BloodPressure, Record};
use crate::errors::{Result, StressError};
use crate::questionnaire::choices::Choices;
use crate::questionnaire::questions::{Answer, Question, QuestionId, QUESTIONS};

/// Result of feeding one answer
#[derive(Debug)]
pub enum Step {
    /// Answer accepted; ask this next
    Next(&'static Question),
    /// All questions answered
    Complete(Record),
}

/// Answers collected so far
#[derive(Debug, Clone, Default, PartialEq)]
struct Draft {
    gender: Option<String>,
    age: Option<u32>,
    occupation: Option<String>,
    sleep_duration: Option<f64>,
    sleep_quality: Option<u32>,
    physical_activity: Option<u32>,
    bmi_category: Option<String>,
    blood_pressure: Option<BloodPressure>,
    heart_rate: Option<u32>,
    daily_steps: Option<u32>,
    sleep_disorder: Option<Option<String>>,
}

impl Draft {
    fn apply(&mut self, id: QuestionId, answer: Answer) {
        match (id, answer) {
            (QuestionId::Gender, Answer::Text(v)) => self.gender = Some(v),
            (QuestionId::Age, Answer::Count(v)) => self.age = Some(v),
            (QuestionId::Occupation, Answer::Text(v)) => self.occupation = Some(v),
            (QuestionId::SleepDuration, Answer::Hours(v)) => self.sleep_duration = Some(v),
            (QuestionId::SleepQuality, Answer::Count(v)) => self.sleep_quality = Some(v),
            (QuestionId::PhysicalActivity, Answer::Count(v)) => self.physical_activity = Some(v),
            (QuestionId::BmiCategory, Answer::Text(v)) => self.bmi_category = Some(v),
            (QuestionId::BloodPressure, Answer::Pressure(v)) => self.blood_pressure = Some(v),
            (QuestionId::HeartRate, Answer::Count(v)) => self.heart_rate = Some(v),
            (QuestionId::DailySteps, Answer::Count(v)) => self.daily_steps = Some(v),
            (QuestionId::SleepDisorder, Answer::Disorder(v)) => self.sleep_disorder = Some(v),
            (id, answer) => tracing::warn!(?id, ?answer, "answer type does not fit question"),
        }
    }

    fn finish(self) -> Result<Record> {
        fn missing(field: &str) -> StressError {
            StressError::invalid_input(field, "not answered")
        }

        Ok(Record {
            gender: self.gender.ok_or_else(|| missing("gender"))?,
            age: self.age.ok_or_else(|| missing("age"))?,
            occupation: self.occupation.ok_or_else(|| missing("occupation"))?,
            sleep_duration: self.sleep_duration.ok_or_else(|| missing("sleep duration"))?,
            sleep_quality: self.sleep_quality.ok_or_else(|| missing("sleep quality"))?,
            physical_activity: self.physical_activity.ok_or_else(|| missing("physical activity"))?,
            bmi_category: self.bmi_category.ok_or_else(|| missing("BMI category"))?,
            blood_pressure: self.blood_pressure.ok_or_else(|| missing("blood pressure"))?,
            heart_rate: self.heart_rate.ok_or_else(|| missing("heart rate"))?,
            daily_steps: self.daily_steps.ok_or_else(|| missing("daily steps"))?,
            sleep_disorder: self.sleep_disorder.ok_or_else(|| missing("sleep disorder"))?,
        })
    }
}

/// Sequential questionnaire state
#[derive(Debug, Clone, Default)]
pub struct Questionnaire {
    position: usize,
    draft: Draft,
    choices: Choices,
}

impl Questionnaire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Questionnaire that accepts `choices` for the categorical questions
    pub fn with_choices(choices: Choices) -> Self {
        Self {
            choices,
            ..Self::default()
        }
    }

    pub fn choices(&self) -> &Choices {
        &self.choices
    }

    /// Answer every question in order with the built-in choices
    pub fn run_all<S: AsRef<str>>(answers: &[S]) -> Result<Record> {
        Self::run_all_with(answers, Choices::default())
    }

    /// Answer every question in order; fails on the first invalid answer
    pub fn run_all_with<S: AsRef<str>>(answers: &[S], choices: Choices) -> Result<Record> {
        if answers.len() != QUESTIONS.len() {
            return Err(StressError::invalid_input(
                "answers",
                format!("expected {} answers, got {}", QUESTIONS.len(), answers.len()),
            ));
        }

        let mut questionnaire = Self::with_choices(choices);
        for answer in answers {
            if let Step::Complete(record) = questionnaire.answer(answer.as_ref())? {
                return Ok(record);
            }
        }
        Err(StressError::Generic("questionnaire ended early".to_string()))
    }

    /// Question awaiting an answer, `None` once complete
    pub fn current(&self) -> Option<&'static Question> {
        QUESTIONS.get(self.position)
    }

    /// Zero-based index of the current question
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        QUESTIONS.len()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= QUESTIONS.len()
    }

    /// Validate and record an answer to the current question
    pub fn answer(&mut self, input: &str) -> Result<Step> {
        let question = self
            .current()
            .ok_or_else(|| StressError::Generic("questionnaire already complete".to_string()))?;

        let answer = {
            let choices = self.choices.for_question(question);
            question.validate_among(&choices, input)?
        };
        tracing::debug!(question = question.field, "answer accepted");
        self.draft.apply(question.id, answer);
        self.position += 1;

        match self.current() {
            Some(next) => Ok(Step::Next(next)),
            None => {
                let draft = std::mem::take(&mut self.draft);
                Ok(Step::Complete(draft.finish()?))
            }
        }
    }

    /// Start over from the first question
    pub fn restart(&mut self) {
        self.position = 0;
        self.draft = Draft::default();
    }
}
