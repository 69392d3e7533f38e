//! Introvert / extrovert personality quiz.
//!
//! [`quiz`] holds the question bank, the per-respondent [`QuizSession`] state
//! machine and the score classifier. [`render`] turns a classification into a
//! gauge descriptor and a shareable PNG. Frontends own the session and call in.

pub mod config;
pub mod error;
pub mod quiz;
pub mod render;

pub use error::{ConfigError, FontError, QuizError, RenderError};
pub use quiz::{
    classify, Category, ClassificationResult, Question, QuestionBank, QuizOption, QuizSession,
};
pub use render::{GaugeSpec, RenderedImage, ResultRenderer};
