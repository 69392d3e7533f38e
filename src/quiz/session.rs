use crate::error::QuizError;
use crate::quiz::{classifier, ClassificationResult, Question, QuestionBank};

/// Progress of one respondent through a [`QuestionBank`].
///
/// The session holds no reference to the bank; every operation that needs
/// bounds takes it as an argument.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    current_index: usize,
    collected_weights: Vec<u8>,
    completed: bool,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the weight of `option_index` for the current question and moves on.
    pub fn submit_answer(
        &mut self,
        bank: &QuestionBank,
        option_index: usize,
    ) -> Result<(), QuizError> {
        if self.completed {
            return Err(QuizError::InvalidState {
                operation: "submit an answer",
            });
        }

        let question = bank.get(self.current_index)?;
        let option = question
            .options
            .get(option_index)
            .ok_or(QuizError::InvalidSelection {
                option: option_index,
                available: question.options.len(),
            })?;

        self.collected_weights.push(option.weight);
        self.current_index += 1;
        if self.current_index == bank.size() {
            self.completed = true;
        }

        log::debug!(
            "Answered question {} with option {} (weight {})",
            self.current_index,
            option_index,
            option.weight
        );
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Resets a session that cannot belong to `bank`, e.g. one restored from
    /// storage after the bank file changed. Returns whether it was reset.
    pub fn reconcile(&mut self, bank: &QuestionBank) -> bool {
        let fits = self.collected_weights.len() == self.current_index
            && self.completed == (self.current_index == bank.size())
            && self.current_index <= bank.size()
            && self.collected_weights.iter().all(|w| *w <= bank.scale_max());
        if !fits {
            log::warn!(
                "Session at question {} does not fit a bank of {} questions, resetting",
                self.current_index,
                bank.size()
            );
            self.reset();
        }
        !fits
    }

    pub fn current_question<'b>(&self, bank: &'b QuestionBank) -> Result<&'b Question, QuizError> {
        if self.completed {
            return Err(QuizError::InvalidState {
                operation: "show the current question",
            });
        }
        bank.get(self.current_index)
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn collected_weights(&self) -> &[u8] {
        &self.collected_weights
    }

    pub fn result(&self, bank: &QuestionBank) -> Result<ClassificationResult, QuizError> {
        classifier::classify(bank, &self.collected_weights)
    }
}
