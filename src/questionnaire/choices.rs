//! Answer choices for the categorical questions
//!
//! Occupation and BMI choices follow the levels the model was trained on, so
//! a dataset with its own vocabulary can be answered in full. Gender and sleep
//! disorder keep their fixed lists.

use crate::data::record::{CategoricalField, OTHER_OCCUPATION};
use crate::encoding::FeatureSchema;
use crate::questionnaire::questions::{Question, QuestionId, BMI_CATEGORIES, OCCUPATIONS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choices {
    occupations: Vec<String>,
    bmi_categories: Vec<String>,
}

impl Default for Choices {
    fn default() -> Self {
        Self {
            occupations: OCCUPATIONS.iter().map(|s| s.to_string()).collect(),
            bmi_categories: BMI_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Choices {
    /// Levels seen in training. A field with no levels keeps the built-in list.
    pub fn from_schema(schema: &FeatureSchema) -> Self {
        let mut choices = Self::default();

        let occupations = schema.levels(CategoricalField::Occupation);
        if !occupations.is_empty() {
            choices.occupations = occupations.to_vec();
            if !occupations.iter().any(|o| o == OTHER_OCCUPATION) {
                choices.occupations.push(OTHER_OCCUPATION.to_string());
            }
        }

        let bmi = schema.levels(CategoricalField::BmiCategory);
        if !bmi.is_empty() {
            choices.bmi_categories = bmi.to_vec();
        }

        tracing::debug!(
            occupations = choices.occupations.len(),
            bmi_categories = choices.bmi_categories.len(),
            "answer choices from training levels"
        );
        choices
    }

    /// Effective choice list for `question`; empty for free-form questions
    pub fn for_question<'a>(&'a self, question: &'a Question) -> Vec<&'a str> {
        match question.id {
            QuestionId::Occupation => self.occupations.iter().map(String::as_str).collect(),
            QuestionId::BmiCategory => self.bmi_categories.iter().map(String::as_str).collect(),
            _ => question.choices.to_vec(),
        }
    }
}
