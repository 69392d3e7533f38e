pub mod classifier;
pub mod session;

use std::path::Path;

use crate::error::{ConfigError, QuizError};

pub use classifier::{classify, Category, ClassificationResult};
pub use session::QuizSession;

/// Highest weight an option can carry on the default scale.
pub const DEFAULT_SCALE_MAX: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionBank {
    #[serde(default = "default_scale_max")]
    scale_max: u8,
    questions: Vec<Question>,
}

fn default_scale_max() -> u8 {
    DEFAULT_SCALE_MAX
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>, scale_max: u8) -> Result<Self, ConfigError> {
        let bank = Self {
            scale_max,
            questions,
        };
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let bank: QuestionBank = toml::from_str(contents)?;
        bank.validate()?;
        Ok(bank)
    }

    /// Reads a bank from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bank = Self::from_toml_str(&contents)?;
        log::debug!("Loaded {} questions from {}", bank.size(), path.display());
        Ok(bank)
    }

    pub fn get(&self, index: usize) -> Result<&Question, QuizError> {
        self.questions.get(index).ok_or(QuizError::OutOfRange {
            index,
            size: self.questions.len(),
        })
    }

    pub fn size(&self) -> usize {
        self.questions.len()
    }

    pub fn scale_max(&self) -> u8 {
        self.scale_max
    }

    /// Denominator for the percentage: every question answered at the top of the scale.
    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * u32::from(self.scale_max)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.scale_max == 0 {
            return Err(ConfigError::InvalidBank(
                "scale_max must be greater than zero".to_string(),
            ));
        }
        if self.questions.is_empty() {
            return Err(ConfigError::InvalidBank(
                "the bank has no questions".to_string(),
            ));
        }
        for (i, question) in self.questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(ConfigError::InvalidBank(format!(
                    "question {} has no options",
                    i + 1
                )));
            }
            if let Some(option) = question
                .options
                .iter()
                .find(|o| o.weight > self.scale_max)
            {
                return Err(ConfigError::InvalidBank(format!(
                    "option \"{}\" of question {} weighs {}, above the scale maximum {}",
                    option.label,
                    i + 1,
                    option.weight,
                    self.scale_max
                )));
            }
        }
        Ok(())
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        let question = |prompt: &str, options: [(&str, u8); 3]| {
            Question::new(
                prompt.to_string(),
                options
                    .iter()
                    .map(|(label, weight)| QuizOption::new(label.to_string(), *weight))
                    .collect(),
            )
        };

        Self {
            scale_max: DEFAULT_SCALE_MAX,
            questions: vec![
                question(
                    "How do you typically recharge after a long day?",
                    [
                        ("Spending time alone reading or relaxing", 0),
                        ("Meeting friends or engaging in social activities", 2),
                        ("A mix of both, depending on my mood", 1),
                    ],
                ),
                question(
                    "In group settings, you usually:",
                    [
                        ("Prefer to listen and observe", 0),
                        ("Lead conversations and share stories", 2),
                        ("Participate when the topic interests you", 1),
                    ],
                ),
                question(
                    "Your ideal weekend would be:",
                    [
                        ("Staying home with a good book or movie", 0),
                        ("Going out to parties or social events", 2),
                        ("A balance of social time and alone time", 1),
                    ],
                ),
                question(
                    "When solving problems, you prefer to:",
                    [
                        ("Think it through on your own", 0),
                        ("Discuss it with others", 2),
                        ("Research first, then maybe consult others", 1),
                    ],
                ),
                question(
                    "In social situations, you tend to:",
                    [
                        ("Feel drained after extended interaction", 0),
                        ("Feel energized by meeting new people", 2),
                        ("Enjoy it but need breaks occasionally", 1),
                    ],
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<QuizOption>,
}
impl Question {
    pub fn new(prompt: String, options: Vec<QuizOption>) -> Self {
        Self { prompt, options }
    }

    /// Position of the option whose label matches exactly.
    pub fn option_index(&self, label: &str) -> Option<usize> {
        self.options.iter().position(|o| o.label == label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuizOption {
    pub label: String,
    pub weight: u8,
}
impl QuizOption {
    pub fn new(label: String, weight: u8) -> Self {
        Self { label, weight }
    }
}
