use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("expected answer {expected} is not a choice of question {question}")]
    UnknownExpectedChoice { question: String, expected: String },
}

/// A selectable answer for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizChoice {
    pub value: String,
    pub label: String,
}

impl QuizChoice {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    id: String,
    prompt: String,
    choices: Vec<QuizChoice>,
    expected: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        prompt: impl Into<String>,
        choices: Vec<QuizChoice>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            choices,
            expected: expected.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[QuizChoice] {
        &self.choices
    }

    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }
}

/// Selected answers keyed by question id. Unanswered questions are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAnswers(HashMap<String, String>);

impl QuizAnswers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, question: impl Into<String>, choice: impl Into<String>) {
        self.0.insert(question.into(), choice.into());
    }

    #[must_use]
    pub fn with(mut self, question: impl Into<String>, choice: impl Into<String>) -> Self {
        self.select(question, choice);
        self
    }

    #[must_use]
    pub fn get(&self, question: &str) -> Option<&str> {
        self.0.get(question).map(String::as_str)
    }
}

/// Outcome of grading a quiz attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizGrade {
    pub score: usize,
    pub total: usize,
    pub passed: bool,
}

impl QuizGrade {
    /// Feedback line shown under the quiz.
    #[must_use]
    pub fn summary(&self) -> String {
        let verdict = if self.passed {
            "Great job!"
        } else {
            "Keep practicing."
        };
        format!("Score: {} / {} • {verdict}", self.score, self.total)
    }
}

/// An ordered quiz with its answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Creates a quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError` if there are no questions, ids repeat, or an
    /// expected answer is not one of the question's choices.
    pub fn new(questions: Vec<QuizQuestion>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        for (idx, question) in questions.iter().enumerate() {
            if questions[..idx].iter().any(|q| q.id == question.id) {
                return Err(QuizError::DuplicateQuestion(question.id.clone()));
            }
            if !question.choices.iter().any(|c| c.value == question.expected) {
                return Err(QuizError::UnknownExpectedChoice {
                    question: question.id.clone(),
                    expected: question.expected.clone(),
                });
            }
        }
        Ok(Self { questions })
    }

    /// The three-question CyberSafe knowledge check (`b`, `c`, `a`).
    #[must_use]
    pub fn cybersafe() -> Self {
        Self {
            questions: vec![
                QuizQuestion::new(
                    "q1",
                    "An email says your account will be suspended unless you log in within an hour. What should you do?",
                    vec![
                        QuizChoice::new("a", "Click the link and log in quickly"),
                        QuizChoice::new("b", "Go to the site yourself or call the company using a known number"),
                        QuizChoice::new("c", "Reply with your password so they can verify you"),
                    ],
                    "b",
                ),
                QuizQuestion::new(
                    "q2",
                    "Which password is the strongest?",
                    vec![
                        QuizChoice::new("a", "Password123!"),
                        QuizChoice::new("b", "Your pet's name and birth year"),
                        QuizChoice::new("c", "A long, unique passphrase stored in a password manager"),
                    ],
                    "c",
                ),
                QuizQuestion::new(
                    "q3",
                    "A caller claiming to be a relative urgently asks for gift cards. What is the safest response?",
                    vec![
                        QuizChoice::new("a", "Hang up and verify through a number you already trust"),
                        QuizChoice::new("b", "Buy the gift cards to help quickly"),
                        QuizChoice::new("c", "Share your bank details instead"),
                    ],
                    "a",
                ),
            ],
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Scores an attempt. Passing requires every answer to match exactly.
    #[must_use]
    pub fn grade(&self, answers: &QuizAnswers) -> QuizGrade {
        let score = self
            .questions
            .iter()
            .filter(|q| answers.get(&q.id) == Some(q.expected.as_str()))
            .count();
        let total = self.questions.len();
        QuizGrade {
            score,
            total,
            passed: score == total,
        }
    }
}

impl Default for Quiz {
    fn default() -> Self {
        Self::cybersafe()
    }
}
