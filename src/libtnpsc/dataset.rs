use log::{debug, warn};
use rand::rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::io;
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

const BUNDLED_QUESTIONS: &str = include_str!("../../data/questions.json");

const FOCUS_AREAS: [&str; 5] = [
    "General Studies",
    "Tamil Language",
    "Indian History",
    "Indian Polity",
    "Geography",
];

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot read question file")]
    Read(#[from] io::Error),
    #[error("malformed question file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("the question list is empty")]
    Empty,
    #[error("question {0} has no options")]
    NoOptions(usize),
}

/// Question and option ids. The dataset may write them as strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(value: &str) -> Self {
        Identifier(value.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Identifier(text),
            RawId::Number(num) => Identifier(num.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: Identifier,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: Identifier,
    pub question: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, id: &Identifier) -> Option<&AnswerOption> {
        self.options.iter().find(|opt| &opt.id == id)
    }

    /// The dataset marks the correct option by giving it the question's own id.
    pub fn is_correct(&self, selected: &Identifier) -> bool {
        &self.id == selected
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub questions: Vec<Question>,
}

impl Dataset {
    pub fn bundled() -> Result<Dataset, DatasetError> {
        debug!("[Setup] Using bundled question list.");
        Self::from_json(BUNDLED_QUESTIONS)
    }

    pub fn from_file(path: &Path) -> Result<Dataset, DatasetError> {
        debug!("[Setup] Reading questions from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Dataset, DatasetError> {
        let now = Instant::now();
        let dataset: Dataset = serde_json::from_str(json)?;
        if dataset.questions.is_empty() {
            return Err(DatasetError::Empty);
        }
        for (idx, question) in dataset.questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(DatasetError::NoOptions(idx + 1));
            }
            if question.option(&question.id).is_none() {
                warn!(
                    "[Setup] Question {} ({:?}) has no option with id {:?}; it can never be scored.",
                    idx + 1,
                    question.question,
                    question.id.as_str()
                );
            }
        }
        debug!(
            "[Setup] Loaded {} questions in {} ms.",
            dataset.questions.len(),
            now.elapsed().as_millis()
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Display order of every question's options. Ids stay attached to their
    /// options, so shuffling never changes how answers are scored.
    pub fn option_orders(&self, shuffle: bool) -> Vec<Vec<usize>> {
        self.questions
            .iter()
            .map(|question| {
                let mut order: Vec<usize> = (0..question.options.len()).collect();
                if shuffle {
                    order.shuffle(&mut rng());
                }
                order
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    pub year: String,
    pub question_count: u32,
    pub focus_areas: Vec<String>,
}

impl Bank {
    pub fn new(year: &str) -> Self {
        Self {
            year: year.to_string(),
            question_count: 50,
            focus_areas: FOCUS_AREAS.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn title(&self) -> String {
        format!("TNPSC Question Bank - {}", self.year)
    }
}

pub fn default_banks() -> Vec<Bank> {
    ["2021", "2022", "2023"].into_iter().map(Bank::new).collect()
}

pub fn find_bank(banks: &[Bank], year: &str) -> Option<usize> {
    banks.iter().position(|bank| bank.year == year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_questions_load() {
        let dataset = Dataset::bundled().unwrap();
        assert!(dataset.len() > 0);
        for question in &dataset.questions {
            assert!(question.option(&question.id).is_some());
        }
    }

    #[test]
    fn integer_and_string_ids_compare_equal() {
        let dataset = Dataset::from_json(
            r#"{"questions":[{"id":2,"question":"q","options":[{"id":"1","label":"x"},{"id":2,"label":"y"}]}]}"#,
        )
        .unwrap();
        let question = &dataset.questions[0];
        assert_eq!(question.id, Identifier::from("2"));
        assert!(question.is_correct(&question.options[1].id));
        assert!(!question.is_correct(&question.options[0].id));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert!(matches!(
            Dataset::from_json(r#"{"questions":[]}"#),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn question_without_options_is_rejected() {
        let json = r#"{"questions":[
            {"id":"a","question":"one","options":[{"id":"a","label":"x"}]},
            {"id":"a","question":"two","options":[]}
        ]}"#;
        assert!(matches!(
            Dataset::from_json(json),
            Err(DatasetError::NoOptions(2))
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            Dataset::from_json("{\"questions\": ["),
            Err(DatasetError::Malformed(_))
        ));
    }

    #[test]
    fn option_orders_are_permutations() {
        let dataset = Dataset::bundled().unwrap();
        let plain = dataset.option_orders(false);
        assert_eq!(plain[0], vec![0, 1, 2, 3]);

        for (question, mut order) in dataset.questions.iter().zip(dataset.option_orders(true)) {
            order.sort_unstable();
            assert_eq!(order, (0..question.options.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn banks_are_listed_by_year() {
        let banks = default_banks();
        let years: Vec<&str> = banks.iter().map(|b| b.year.as_str()).collect();
        assert_eq!(years, vec!["2021", "2022", "2023"]);
        assert_eq!(banks[1].title(), "TNPSC Question Bank - 2022");
        assert_eq!(find_bank(&banks, "2023"), Some(2));
        assert_eq!(find_bank(&banks, "1999"), None);
    }
}
