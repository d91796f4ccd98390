//! Company quiz played on the office computer

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::info;

const BUILTIN_QUIZ: &str = include_str!("../data/quiz.toml");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub answer: usize,
}

#[derive(Debug, Deserialize)]
struct RawQuizFile {
    #[serde(rename = "question", default)]
    questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, Default)]
pub struct QuizData {
    questions: Vec<QuizQuestion>,
}

impl QuizData {
    pub fn builtin() -> Result<Self, String> {
        Self::from_toml_str(BUILTIN_QUIZ)
            .map_err(|e| format!("Failed to load built-in quiz: {}", e))
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        let raw: RawQuizFile = toml::from_str(content)
            .map_err(|e| format!("Failed to parse quiz table: {}", e))?;

        for (i, q) in raw.questions.iter().enumerate() {
            if q.options.len() < 2 {
                return Err(format!("Question {} needs at least two options", i + 1));
            }
            if q.answer >= q.options.len() {
                return Err(format!("Question {} answer {} is out of range", i + 1, q.answer));
            }
        }

        info!("Loaded {} quiz questions", raw.questions.len());
        Ok(Self { questions: raw.questions })
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResult {
    pub correct: bool,
    pub finished: bool,
}

/// One sitting at the computer
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    index: usize,
    correct: usize,
    pass_mark: usize,
}

impl QuizSession {
    /// Draw `count` distinct questions at random
    pub fn new<R: Rng + ?Sized>(data: &QuizData, count: usize, pass_mark: usize, rng: &mut R) -> Self {
        let questions: Vec<QuizQuestion> = data.questions
            .choose_multiple(rng, count)
            .cloned()
            .collect();
        let pass_mark = pass_mark.min(questions.len());
        Self {
            questions,
            index: 0,
            correct: 0,
            pass_mark,
        }
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.index)
    }

    /// Answer the current question. Choices past the listed options and
    /// answers after the last question are ignored.
    pub fn answer(&mut self, choice: usize) -> Option<AnswerResult> {
        let question = self.current()?;
        if choice >= question.options.len() {
            return None;
        }
        let correct = question.answer == choice;
        if correct {
            self.correct += 1;
        }
        self.index += 1;
        Some(AnswerResult {
            correct,
            finished: self.is_finished(),
        })
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.questions.len()
    }

    pub fn passed(&self) -> bool {
        self.is_finished() && self.correct >= self.pass_mark
    }

    pub fn score(&self) -> usize {
        self.correct
    }

    pub fn pass_mark(&self) -> usize {
        self.pass_mark
    }

    /// (question number starting at 1, total)
    pub fn position(&self) -> (usize, usize) {
        ((self.index + 1).min(self.questions.len()), self.questions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builtin_quiz_loads() {
        let quiz = QuizData::builtin().unwrap();
        assert_eq!(quiz.len(), 10);
    }

    #[test]
    fn test_bad_answer_index_rejected() {
        let table = r#"
            [[question]]
            question = "?"
            options = ["a", "b"]
            answer = 2
        "#;
        assert!(QuizData::from_toml_str(table).is_err());
    }

    #[test]
    fn test_session_draws_distinct_questions() {
        let quiz = QuizData::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let session = QuizSession::new(&quiz, 3, 2, &mut rng);
        assert_eq!(session.position(), (1, 3));
        let mut texts: Vec<&str> = session.questions.iter().map(|q| q.question.as_str()).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 3);
    }

    #[test]
    fn test_passing_and_failing() {
        let quiz = QuizData::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let mut session = QuizSession::new(&quiz, 3, 2, &mut rng);
        while let Some(q) = session.current() {
            let right = q.answer;
            session.answer(right);
        }
        assert!(session.passed());
        assert_eq!(session.score(), 3);
        assert_eq!(session.answer(0), None);

        let mut session = QuizSession::new(&quiz, 3, 2, &mut rng);
        while let Some(q) = session.current() {
            let wrong = (q.answer + 1) % q.options.len();
            session.answer(wrong);
        }
        assert!(session.is_finished());
        assert!(!session.passed());
    }

    #[test]
    fn test_missing_option_does_not_spend_question() {
        let quiz = QuizData::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = QuizSession::new(&quiz, 3, 2, &mut rng);

        let options = session.current().unwrap().options.len();
        assert_eq!(session.answer(options), None);
        assert_eq!(session.answer(8), None);
        assert_eq!(session.position(), (1, 3));
        assert_eq!(session.score(), 0);
    }
}
