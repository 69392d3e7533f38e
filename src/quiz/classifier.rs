use std::fmt;

use crate::error::QuizError;
use crate::quiz::QuestionBank;

/// Percentages at or below this are introverted.
pub const INTROVERT_MAX_PERCENT: u32 = 33;
/// Percentages at or above this are extroverted.
pub const EXTROVERT_MIN_PERCENT: u32 = 66;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Introvert,
    Ambivert,
    Extrovert,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Introvert => "Introvert",
            Category::Ambivert => "Ambivert",
            Category::Extrovert => "Extrovert",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Introvert => {
                "As an introvert, you tend to:\n\
                 - Recharge by spending time alone\n\
                 - Think deeply before speaking\n\
                 - Prefer meaningful one-on-one conversations\n\
                 - Work well independently"
            }
            Category::Extrovert => {
                "As an extrovert, you tend to:\n\
                 - Gain energy from social interactions\n\
                 - Think out loud and process externally\n\
                 - Enjoy group activities and meeting new people\n\
                 - Thrive in collaborative environments"
            }
            Category::Ambivert => {
                "As an ambivert, you tend to:\n\
                 - Have a balanced approach to social interaction\n\
                 - Adapt well to different social situations\n\
                 - Enjoy both alone time and social activities\n\
                 - Switch between independent and collaborative work"
            }
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub percentage: f64,
}

impl ClassificationResult {
    pub fn headline(&self) -> String {
        format!("You are an {}!", self.category)
    }

    pub fn score_line(&self) -> String {
        format!("Score: {:.1}%", self.percentage)
    }
}

/// Classifies a full set of answer weights.
///
/// Category boundaries are compared on integers (`100 * sum` against
/// `threshold * max`) so a score of exactly 33% or 66% always lands on the
/// inclusive side. The floating-point percentage is only carried for display.
///
/// Every weight must be on the bank's scale, which keeps the percentage
/// within `0..=100`.
pub fn classify(bank: &QuestionBank, weights: &[u8]) -> Result<ClassificationResult, QuizError> {
    if weights.len() != bank.size() {
        return Err(QuizError::IncompleteSession {
            answered: weights.len(),
            required: bank.size(),
        });
    }
    if let Some(weight) = weights.iter().copied().find(|w| *w > bank.scale_max()) {
        return Err(QuizError::WeightOutOfScale {
            weight,
            scale_max: bank.scale_max(),
        });
    }

    let total: u32 = weights.iter().map(|w| u32::from(*w)).sum();
    let max = bank.max_score();
    Ok(categorize(total, max))
}

fn categorize(total: u32, max: u32) -> ClassificationResult {
    let scaled = u64::from(total) * 100;
    let category = if scaled <= u64::from(INTROVERT_MAX_PERCENT) * u64::from(max) {
        Category::Introvert
    } else if scaled >= u64::from(EXTROVERT_MIN_PERCENT) * u64::from(max) {
        Category::Extrovert
    } else {
        Category::Ambivert
    };

    ClassificationResult {
        category,
        percentage: f64::from(total) * 100.0 / f64::from(max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{Question, QuizOption};
    use pretty_assertions::assert_eq;

    fn classify_default(weights: &[u8]) -> ClassificationResult {
        classify(&QuestionBank::default(), weights).unwrap()
    }

    /// A bank of `n` yes/no questions worth one point each, so `max_score() == n`.
    fn binary_bank(n: usize) -> QuestionBank {
        let questions = (0..n)
            .map(|i| {
                Question::new(
                    format!("Question {}", i + 1),
                    vec![
                        QuizOption::new("No".to_string(), 0),
                        QuizOption::new("Yes".to_string(), 1),
                    ],
                )
            })
            .collect();
        QuestionBank::new(questions, 1).unwrap()
    }

    #[test]
    fn all_zero_answers_are_introvert() {
        let result = classify_default(&[0, 0, 0, 0, 0]);
        assert_eq!(result.category, Category::Introvert);
        assert_eq!(result.percentage, 0.0);
    }

    #[test]
    fn all_top_answers_are_extrovert() {
        let result = classify_default(&[2, 2, 2, 2, 2]);
        assert_eq!(result.category, Category::Extrovert);
        assert_eq!(result.percentage, 100.0);
    }

    #[test]
    fn forty_percent_is_ambivert() {
        let result = classify_default(&[0, 1, 1, 1, 1]);
        assert_eq!(result.category, Category::Ambivert);
        assert_eq!(result.percentage, 40.0);
    }

    #[test]
    fn sixty_percent_is_still_ambivert() {
        let result = classify_default(&[2, 2, 0, 1, 1]);
        assert_eq!(result.category, Category::Ambivert);
        assert_eq!(result.percentage, 60.0);
    }

    #[test]
    fn seventy_percent_is_extrovert() {
        let result = classify_default(&[2, 2, 2, 1, 0]);
        assert_eq!(result.category, Category::Extrovert);
        assert_eq!(result.percentage, 70.0);
    }

    #[test]
    fn thirty_percent_is_introvert() {
        let result = classify_default(&[1, 1, 1, 0, 0]);
        assert_eq!(result.category, Category::Introvert);
        assert_eq!(result.percentage, 30.0);
    }

    #[test]
    fn exactly_thirty_three_percent_is_introvert() {
        let bank = binary_bank(100);
        let mut weights = vec![0u8; 100];
        weights[..33].fill(1);

        let result = classify(&bank, &weights).unwrap();
        assert_eq!(result.category, Category::Introvert);
        assert_eq!(result.percentage, 33.0);

        weights[33] = 1;
        assert_eq!(classify(&bank, &weights).unwrap().category, Category::Ambivert);
    }

    #[test]
    fn exactly_sixty_six_percent_is_extrovert() {
        let bank = binary_bank(50);
        let mut weights = vec![0u8; 50];
        weights[..33].fill(1);

        let result = classify(&bank, &weights).unwrap();
        assert_eq!(result.category, Category::Extrovert);
        assert_eq!(result.percentage, 66.0);

        weights[32] = 0;
        assert_eq!(classify(&bank, &weights).unwrap().category, Category::Ambivert);
    }

    #[test]
    fn integer_boundaries_do_not_drift() {
        // 66/100 is not representable exactly in binary floating point
        assert_eq!(categorize(66, 100).category, Category::Extrovert);
        assert_eq!(categorize(33, 100).category, Category::Introvert);
        assert_eq!(categorize(2, 3).category, Category::Extrovert);
        assert_eq!(categorize(1, 3).category, Category::Ambivert);
    }

    #[test]
    fn partial_weights_are_rejected() {
        let bank = QuestionBank::default();
        assert_eq!(
            classify(&bank, &[2, 2]).unwrap_err(),
            QuizError::IncompleteSession {
                answered: 2,
                required: 5
            }
        );
        assert!(classify(&bank, &[1; 6]).is_err());
    }

    #[test]
    fn weights_above_the_scale_are_rejected() {
        let bank = QuestionBank::default();
        assert_eq!(
            classify(&bank, &[200; 5]).unwrap_err(),
            QuizError::WeightOutOfScale {
                weight: 200,
                scale_max: 2
            }
        );
        assert_eq!(
            classify(&bank, &[2, 2, 2, 2, 3]).unwrap_err(),
            QuizError::WeightOutOfScale {
                weight: 3,
                scale_max: 2
            }
        );
        assert_eq!(classify_default(&[2; 5]).percentage, 100.0);
    }

    #[test]
    fn classification_is_deterministic() {
        let weights = [2, 0, 1, 2, 1];
        assert_eq!(classify_default(&weights), classify_default(&weights));
    }

    #[test]
    fn headline_and_score_line() {
        let result = classify_default(&[2, 2, 0, 1, 1]);
        assert_eq!(result.headline(), "You are an Ambivert!");
        assert_eq!(result.score_line(), "Score: 60.0%");
    }

    #[test]
    fn descriptions_name_their_category() {
        assert!(Category::Introvert
            .description()
            .starts_with("As an introvert, you tend to:\n- Recharge"));
        assert!(Category::Ambivert.description().contains("Adapt well"));
        assert_eq!(Category::Extrovert.description().lines().count(), 5);
    }
}
