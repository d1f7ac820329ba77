//! Chat session tests - questionnaire flow, commands and history
//!
//! Drives `ChatSession::handle_input` directly; no terminal is attached.

use std::io::Write;

use stressbuddy::cli::Config;
use stressbuddy::errors::MSG_VALID_INPUT;
use stressbuddy::model::ForestParams;
use stressbuddy::questionnaire::QUESTIONS;
use stressbuddy::repl::commands::{is_command, parse, Command};
use stressbuddy::repl::{ChatSession, Outcome, SessionHistory};
use stressbuddy::{Dataset, Predictor, ThresholdPolicy, Trainer, TrainingOptions};
use tempfile::NamedTempFile;

const HIGH_STRESS_ANSWERS: [&str; 11] = [
    "Male", "28", "Sales Representative", "5.9", "4", "30", "Obese", "140/90", "85", "3000", "Sleep Apnea",
];

fn chat(history_limit: usize) -> ChatSession {
    let dataset = Dataset::embedded().unwrap();
    let options = TrainingOptions {
        forest: ForestParams {
            n_estimators: 8,
            ..ForestParams::default()
        },
        ..TrainingOptions::default()
    };
    let model = Trainer::new(options).train(&dataset).unwrap();
    ChatSession::new(Predictor::new(model, ThresholdPolicy::Standard), history_limit)
}

fn complete(session: &mut ChatSession, answers: &[&str]) -> Outcome {
    let mut last = Outcome::Continue;
    for answer in answers {
        last = session.handle_input(answer);
    }
    last
}

#[test]
fn test_questions_asked_in_order() {
    let mut session = chat(10);
    for (i, answer) in HIGH_STRESS_ANSWERS.iter().enumerate().take(QUESTIONS.len() - 1) {
        assert_eq!(session.questionnaire().current().map(|q| q.id), Some(QUESTIONS[i].id));
        assert_eq!(session.handle_input(answer), Outcome::Continue);
    }
}

#[test]
fn test_choice_numbers_accepted() {
    let mut session = chat(10);
    // "2" selects the second gender choice
    assert_eq!(session.handle_input("2"), Outcome::Continue);
    assert_eq!(session.questionnaire().position(), 1);
}

#[test]
fn test_rejected_answers_do_not_advance() {
    let mut session = chat(10);
    session.handle_input("Female");

    for bad in ["abc", "-3", "500"] {
        assert_eq!(session.handle_input(bad), Outcome::Rejected(MSG_VALID_INPUT));
        assert_eq!(session.questionnaire().position(), 1);
    }
}

#[test]
fn test_bad_blood_pressure_rejected() {
    let mut session = chat(10);
    complete(&mut session, &HIGH_STRESS_ANSWERS[..7]);
    assert_eq!(session.questionnaire().position(), 7);

    for bad in ["120", "120/", "abc/80", "0/80"] {
        assert_eq!(session.handle_input(bad), Outcome::Rejected(MSG_VALID_INPUT));
    }
    assert_eq!(session.handle_input("120/80"), Outcome::Continue);
}

#[test]
fn test_commands_mid_questionnaire_keep_position() {
    let mut session = chat(10);
    complete(&mut session, &HIGH_STRESS_ANSWERS[..3]);

    for command in ["/help", "/status", "/history", "/bogus"] {
        assert_eq!(session.handle_input(command), Outcome::Continue);
        assert_eq!(session.questionnaire().position(), 3);
    }
}

#[test]
fn test_repeated_checks_recorded_in_history() {
    let mut session = chat(2);
    for _ in 0..3 {
        match complete(&mut session, &HIGH_STRESS_ANSWERS) {
            Outcome::Predicted(_) => {}
            other => panic!("expected prediction, got {:?}", other),
        }
    }

    assert_eq!(session.history().len(), 2);
    assert_eq!(session.history().total(), 3);

    // Identical answers, identical model
    let recent = session.history().recent(2);
    assert_eq!(recent[0].score, recent[1].score);
    assert_eq!(recent[0].record.occupation, "Sales Representative");
}

#[test]
fn test_exit_mid_questionnaire() {
    let mut session = chat(10);
    complete(&mut session, &HIGH_STRESS_ANSWERS[..5]);
    assert_eq!(session.handle_input("/quit"), Outcome::Exit);
}

#[test]
fn test_command_parsing_does_not_catch_answers() {
    assert!(!is_command("140/90"));
    assert_eq!(parse("/history 3"), Command::History { limit: Some(3) });
}

#[test]
fn test_default_config_drives_session() {
    let config = Config::default();
    assert_eq!(config.prediction.threshold_policy, ThresholdPolicy::Standard);

    let history = SessionHistory::new(config.display.history_limit);
    assert!(history.is_empty());
    assert_eq!(config.model.training_options().forest.seed, 42);
}

#[test]
fn test_uploaded_levels_are_offered_and_accepted() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "Gender,Age,Occupation,Sleep Duration,Quality of Sleep,Physical Activity Level,\
         Stress Level,BMI Category,Blood Pressure,Heart Rate,Daily Steps,Sleep Disorder"
    )
    .unwrap();
    writeln!(file, "Male,31,Pilot,5.5,4,30,8,Underweight,135/88,82,3500,Insomnia").unwrap();
    writeln!(file, "Female,44,Chef,7.8,8,70,3,Normal,118/76,64,9000,None").unwrap();
    writeln!(file, "Male,52,Pilot,6.1,5,45,7,Overweight,140/90,78,4200,Sleep Apnea").unwrap();
    writeln!(file, "Female,29,Chef,7.2,7,60,4,Underweight,120/80,68,7000,None").unwrap();
    writeln!(file, "Male,38,Chef,6.8,6,50,5,Normal,125/82,72,6000,None").unwrap();

    let dataset = Dataset::from_path(file.path()).unwrap();
    let model = Trainer::new(TrainingOptions::default()).train(&dataset).unwrap();
    let mut session = ChatSession::new(Predictor::new(model, ThresholdPolicy::Standard), 5);

    let answers = [
        "Male", "33", "pilot", "5.8", "4", "30", "underweight", "138/89", "80", "3600", "Insomnia",
    ];
    match complete(&mut session, &answers) {
        Outcome::Predicted(_) => {}
        other => panic!("expected prediction, got {:?}", other),
    }

    let entry = session.history().recent(1)[0];
    assert_eq!(entry.record.occupation, "Pilot");
    assert_eq!(entry.record.bmi_category, "Underweight");
}
