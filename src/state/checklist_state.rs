// ============================================================================
// CHECKLIST STATE - Respuestas y comentarios del formulario
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::error::ApiError;
use crate::models::{Answer, ResponseEntry, DEFAULT_QUESTIONS};

/// Estado del formulario de checklist (compartido entre listeners)
#[derive(Clone)]
pub struct ChecklistFormState {
    pub questions: Rc<Vec<String>>,
    pub answers: Rc<RefCell<Vec<Option<Answer>>>>,
    pub comments: Rc<RefCell<Vec<String>>>,
}

impl ChecklistFormState {
    pub fn new(questions: Vec<String>) -> Self {
        let count = questions.len();
        Self {
            questions: Rc::new(questions),
            answers: Rc::new(RefCell::new(vec![None; count])),
            comments: Rc::new(RefCell::new(vec![String::new(); count])),
        }
    }

    pub fn with_default_questions() -> Self {
        Self::new(DEFAULT_QUESTIONS.iter().map(|q| q.to_string()).collect())
    }

    /// Índices fuera de rango se ignoran
    pub fn set_answer(&self, index: usize, answer: Answer) {
        if let Some(slot) = self.answers.borrow_mut().get_mut(index) {
            *slot = Some(answer);
        }
    }

    pub fn set_comment(&self, index: usize, comment: &str) {
        if let Some(slot) = self.comments.borrow_mut().get_mut(index) {
            *slot = comment.to_string();
        }
    }

    /// Índices (base 0) de preguntas sin respuesta
    pub fn unanswered(&self) -> Vec<usize> {
        self.answers
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// Respuestas en orden; falla si falta alguna
    pub fn responses(&self) -> Result<Vec<ResponseEntry>, ApiError> {
        let missing = self.unanswered();
        if !missing.is_empty() {
            let numbers: Vec<String> = missing.iter().map(|i| (i + 1).to_string()).collect();
            return Err(ApiError::ValidationFailure(format!(
                "Por favor, responda todas as perguntas (faltando: {}).",
                numbers.join(", ")
            )));
        }

        let answers = self.answers.borrow();
        let comments = self.comments.borrow();
        Ok(self
            .questions
            .iter()
            .zip(answers.iter())
            .zip(comments.iter())
            .filter_map(|((question, answer), comment)| {
                let comment = comment.trim();
                answer.map(|answer| ResponseEntry {
                    question: question.clone(),
                    answer,
                    comment: (!comment.is_empty()).then(|| comment.to_string()),
                })
            })
            .collect())
    }
}

impl Default for ChecklistFormState {
    fn default() -> Self {
        Self::with_default_questions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_has_six_questions() {
        let form = ChecklistFormState::default();
        assert_eq!(form.questions.len(), 6);
        assert_eq!(form.unanswered(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_missing_answers_are_reported() {
        let form = ChecklistFormState::default();
        for i in [0, 1, 3, 5] {
            form.set_answer(i, Answer::Sim);
        }
        let err = form.responses().unwrap_err();
        assert_eq!(
            err,
            ApiError::ValidationFailure(
                "Por favor, responda todas as perguntas (faltando: 3, 5).".to_string()
            )
        );
    }

    #[test]
    fn test_responses_keep_order_and_trim_comments() {
        let form = ChecklistFormState::new(vec!["A".to_string(), "B".to_string()]);
        form.set_answer(1, Answer::Parcial);
        form.set_answer(0, Answer::Nao);
        form.set_comment(0, "  vazamento na válvula  ");
        form.set_comment(1, "   ");

        let responses = form.responses().unwrap();

        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0].question, "A");
        assert_eq!(responses[0].answer, Answer::Nao);
        assert_eq!(responses[0].comment.as_deref(), Some("vazamento na válvula"));
        assert_eq!(responses[1].answer, Answer::Parcial);
        assert_eq!(responses[1].comment, None);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let form = ChecklistFormState::new(vec!["A".to_string()]);
        form.set_answer(4, Answer::Sim);
        form.set_comment(4, "x");
        assert_eq!(*form.answers.borrow(), vec![None]);
        assert_eq!(form.unanswered(), vec![0]);
    }
}
