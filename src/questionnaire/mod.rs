//! Scripted questionnaire that collects one `Record`

pub mod choices;
pub mod flow;
pub mod questions;

pub use choices::Choices;
pub use flow::{Questionnaire, Step};
pub use questions::{Answer, Question, QuestionId, QUESTIONS};
