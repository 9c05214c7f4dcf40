use slang_core::{Grade, QuizError, RandomSource, Session};
use slang_types::AppEvent;

pub fn handle_quiz_start<R: RandomSource>(session: &mut Session<R>) -> AppEvent {
    match session.start_quiz() {
        Ok(question) => AppEvent::ShowQuiz(question.to_view()),
        Err(e @ QuizError::InsufficientData { .. }) => AppEvent::Message(e.to_string()),
        Err(e) => AppEvent::Error(e.to_string()),
    }
}

pub fn handle_quiz_answer<R: RandomSource>(session: &mut Session<R>, index: usize) -> AppEvent {
    match session.answer_quiz(index) {
        Ok(Grade::Correct) => AppEvent::QuizGraded {
            correct: true,
            answer: String::new(),
        },
        Ok(Grade::Incorrect { answer }) => AppEvent::QuizGraded {
            correct: false,
            answer,
        },
        Err(e) => AppEvent::Error(e.to_string()),
    }
}
