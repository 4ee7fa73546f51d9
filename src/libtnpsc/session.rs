use crate::libtnpsc::dataset::{Dataset, DatasetError, Identifier, Question};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    ConfirmingSubmit,
    Completed,
}

/// Snapshot handed from the runner to the results screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub total_questions: u32,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SelectAnswer(Identifier),
    Next,
    Previous,
    JumpTo(usize),
    RequestSubmit,
    CancelSubmit,
    ConfirmSubmit,
}

/// One quiz attempt over a fixed question list.
#[derive(Debug, Clone)]
pub struct Session {
    questions: Vec<Question>,
    current: usize,
    answers: HashMap<usize, Identifier>,
    credited: HashSet<usize>,
    score: u32,
    phase: Phase,
}

impl Session {
    pub fn new(dataset: Dataset) -> Result<Self, DatasetError> {
        if dataset.questions.is_empty() {
            return Err(DatasetError::Empty);
        }
        debug!("[Session] Started with {} questions.", dataset.len());
        Ok(Self {
            questions: dataset.questions,
            current: 0,
            answers: HashMap::new(),
            credited: HashSet::new(),
            score: 0,
            phase: Phase::Active,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    /// The answer recorded for the current question, if any.
    pub fn selected(&self) -> Option<&Identifier> {
        self.answers.get(&self.current)
    }

    pub fn answer_for(&self, index: usize) -> Option<&Identifier> {
        self.answers.get(&index)
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn result(&self) -> ExamResult {
        ExamResult {
            total_questions: self.questions.len() as u32,
            score: self.score,
        }
    }

    pub fn select_answer(&mut self, option: Identifier) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let question = self.current_question();
        if question.option(&option).is_none() {
            debug!(
                "[Session] Option {:?} is not part of question {}.",
                option.as_str(),
                self.current + 1
            );
            return false;
        }
        debug!(
            "[Session] Q{}: picked {:?} ({})",
            self.current + 1,
            option.as_str(),
            if question.is_correct(&option) {
                "correct"
            } else {
                "incorrect"
            }
        );
        self.answers.insert(self.current, option);
        true
    }

    /// Credits the current question if its recorded answer is correct, then
    /// moves forward. At the last question only the crediting happens.
    pub fn next(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let idx = self.current;
        let correct = self
            .answers
            .get(&idx)
            .is_some_and(|answer| self.questions[idx].is_correct(answer));
        if correct && self.credited.insert(idx) {
            self.score += 1;
            debug!("[Session] Q{} credited, score {}", idx + 1, self.score);
        }

        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.phase != Phase::Active || self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Moves to the 1-based question `number` without scoring the one left.
    pub fn jump_to(&mut self, number: usize) -> bool {
        if self.phase != Phase::Active || number == 0 || number > self.questions.len() {
            debug!("[Session] Rejected jump to {}", number);
            return false;
        }
        self.current = number - 1;
        true
    }

    pub fn request_submit(&mut self) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        self.phase = Phase::ConfirmingSubmit;
        true
    }

    pub fn cancel_submit(&mut self) -> bool {
        if self.phase != Phase::ConfirmingSubmit {
            return false;
        }
        self.phase = Phase::Active;
        true
    }

    pub fn confirm_submit(&mut self) -> Option<ExamResult> {
        if self.phase != Phase::ConfirmingSubmit {
            return None;
        }
        self.phase = Phase::Completed;
        let result = self.result();
        debug!("[Session] Completed: {:?}", result);
        Some(result)
    }

    pub fn dispatch(&mut self, action: Action) -> Option<ExamResult> {
        match action {
            Action::SelectAnswer(option) => {
                self.select_answer(option);
            }
            Action::Next => {
                self.next();
            }
            Action::Previous => {
                self.previous();
            }
            Action::JumpTo(number) => {
                self.jump_to(number);
            }
            Action::RequestSubmit => {
                self.request_submit();
            }
            Action::CancelSubmit => {
                self.cancel_submit();
            }
            Action::ConfirmSubmit => return self.confirm_submit(),
        }
        None
    }
}
