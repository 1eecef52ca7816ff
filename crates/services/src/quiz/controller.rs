use std::fmt;

use rand::Rng;
use tracing::{debug, info, warn};

use trivia_core::model::Question;

use crate::error::{QuizError, TriviaError};
use super::session::{QuizSession, SelectOutcome};

/// Coarse state of the quiz screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    Loading,
    Ready,
    Completed,
    Error,
}

enum QuizState {
    Loading,
    Ready(QuizSession),
    Completed(QuizSession),
    Error(QuizError),
}

/// Loading → Ready → Completed, with Error reachable from Loading.
///
/// The controller never awaits anything itself: callers pair
/// [`QuizController::begin_fetch`] with [`QuizController::complete_fetch`]
/// around the actual network call. `begin_fetch` refuses while a fetch is
/// outstanding, which keeps re-entrant triggers from issuing duplicates.
pub struct QuizController {
    state: QuizState,
    fetch_in_flight: bool,
}

impl QuizController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: QuizState::Loading,
            fetch_in_flight: false,
        }
    }

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        match self.state {
            QuizState::Loading => QuizStatus::Loading,
            QuizState::Ready(_) => QuizStatus::Ready,
            QuizState::Completed(_) => QuizStatus::Completed,
            QuizState::Error(_) => QuizStatus::Error,
        }
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    /// Session for Ready and Completed states.
    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        match &self.state {
            QuizState::Ready(session) | QuizState::Completed(session) => Some(session),
            QuizState::Loading | QuizState::Error(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&QuizError> {
        match &self.state {
            QuizState::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Claim the single fetch slot. Returns `false` unless Loading and idle.
    pub fn begin_fetch(&mut self) -> bool {
        if !matches!(self.state, QuizState::Loading) || self.fetch_in_flight {
            debug!(status = ?self.status(), in_flight = self.fetch_in_flight, "fetch not started");
            return false;
        }
        self.fetch_in_flight = true;
        true
    }

    /// Finish the outstanding fetch using the thread RNG for answer order.
    pub fn complete_fetch(&mut self, result: Result<Vec<Question>, TriviaError>) {
        self.complete_fetch_with(result, &mut rand::rng());
    }

    /// Finish the outstanding fetch, entering Ready or Error.
    pub fn complete_fetch_with<R: Rng + ?Sized>(
        &mut self,
        result: Result<Vec<Question>, TriviaError>,
        rng: &mut R,
    ) {
        self.fetch_in_flight = false;
        if !matches!(self.state, QuizState::Loading) {
            warn!(status = ?self.status(), "dropping fetch result outside Loading");
            return;
        }

        let prepared = result
            .map_err(QuizError::from)
            .and_then(|questions| QuizSession::prepare(&questions, rng));
        self.state = match prepared {
            Ok(session) => {
                info!(questions = session.total(), "quiz ready");
                QuizState::Ready(session)
            }
            Err(err) => {
                warn!(error = %err, "quiz failed to load");
                QuizState::Error(err)
            }
        };
    }

    /// Error → Loading. Returns `false` from any other state.
    pub fn retry(&mut self) -> bool {
        if !matches!(self.state, QuizState::Error(_)) {
            return false;
        }
        self.state = QuizState::Loading;
        true
    }

    /// Completed → Loading, discarding the finished session.
    pub fn play_again(&mut self) -> bool {
        if !matches!(self.state, QuizState::Completed(_)) {
            return false;
        }
        self.state = QuizState::Loading;
        true
    }

    /// Select an answer for the active question.
    ///
    /// Entering Completed happens here, when the last question is answered.
    /// Once Completed every selection is ignored.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotReady` while Loading or in Error, and
    /// `QuizError::InvalidAnswer` for an out-of-range index.
    pub fn select_answer(&mut self, index: usize) -> Result<SelectOutcome, QuizError> {
        let outcome = match &mut self.state {
            QuizState::Ready(session) => session.select_answer(index)?,
            QuizState::Completed(_) => return Ok(SelectOutcome::Ignored),
            QuizState::Loading | QuizState::Error(_) => return Err(QuizError::NotReady),
        };

        let finished = matches!(&self.state, QuizState::Ready(session) if session.is_complete());
        if finished {
            let state = std::mem::replace(&mut self.state, QuizState::Loading);
            if let QuizState::Ready(session) = state {
                info!(score = session.score(), total = session.total(), "quiz completed");
                self.state = QuizState::Completed(session);
            }
        }
        Ok(outcome)
    }

    /// Move to the next question. Returns `false` when not Ready or on the last one.
    pub fn advance(&mut self) -> bool {
        match &mut self.state {
            QuizState::Ready(session) => session.advance(),
            _ => false,
        }
    }
}

impl Default for QuizController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QuizController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizController")
            .field("status", &self.status())
            .field("fetch_in_flight", &self.fetch_in_flight)
            .field("session", &self.session())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::trivia::fixture_questions;

    fn ready_controller() -> QuizController {
        let mut controller = QuizController::new();
        assert!(controller.begin_fetch());
        controller.complete_fetch_with(Ok(fixture_questions()), &mut StdRng::seed_from_u64(4));
        assert_eq!(controller.status(), QuizStatus::Ready);
        controller
    }

    fn answer_all(controller: &mut QuizController, pick_correct: bool) {
        loop {
            let session = controller.session().unwrap();
            let question = session.current_question();
            let correct = question.correct_index().unwrap();
            let index = if pick_correct {
                correct
            } else {
                (correct + 1) % question.answers().len()
            };
            controller.select_answer(index).unwrap();
            if !controller.advance() {
                break;
            }
        }
    }

    #[test]
    fn begin_fetch_guards_against_duplicates() {
        let mut controller = QuizController::new();
        assert!(controller.begin_fetch());
        assert!(!controller.begin_fetch());
        assert!(controller.is_fetching());
    }

    #[test]
    fn failed_fetch_enters_error_and_retry_returns_to_loading() {
        let mut controller = QuizController::new();
        controller.begin_fetch();
        controller.complete_fetch(Err(TriviaError::EmptyResult));
        assert_eq!(controller.status(), QuizStatus::Error);
        assert!(matches!(
            controller.error(),
            Some(QuizError::Source(TriviaError::EmptyResult))
        ));
        assert!(!controller.begin_fetch());

        assert!(controller.retry());
        assert_eq!(controller.status(), QuizStatus::Loading);
        assert!(controller.begin_fetch());
    }

    #[test]
    fn empty_question_list_is_an_error() {
        let mut controller = QuizController::new();
        controller.begin_fetch();
        controller.complete_fetch(Ok(Vec::new()));
        assert!(matches!(controller.error(), Some(QuizError::Empty)));
    }

    #[test]
    fn selecting_while_loading_is_rejected() {
        let mut controller = QuizController::new();
        assert!(matches!(controller.select_answer(0), Err(QuizError::NotReady)));
        assert!(!controller.advance());
    }

    #[test]
    fn all_correct_scores_total() {
        let mut controller = ready_controller();
        answer_all(&mut controller, true);
        assert_eq!(controller.status(), QuizStatus::Completed);
        let session = controller.session().unwrap();
        assert_eq!(session.score() as usize, fixture_questions().len());
    }

    #[test]
    fn all_wrong_scores_zero() {
        let mut controller = ready_controller();
        answer_all(&mut controller, false);
        assert_eq!(controller.status(), QuizStatus::Completed);
        assert_eq!(controller.session().unwrap().score(), 0);
    }

    #[test]
    fn completed_ignores_further_selection() {
        let mut controller = ready_controller();
        answer_all(&mut controller, false);
        let outcome = controller.select_answer(0).unwrap();
        assert_eq!(outcome, SelectOutcome::Ignored);
        assert_eq!(controller.session().unwrap().score(), 0);
        assert!(!controller.advance());
    }

    #[test]
    fn play_again_restarts_loading() {
        let mut controller = ready_controller();
        assert!(!controller.play_again());
        answer_all(&mut controller, true);
        assert!(controller.play_again());
        assert_eq!(controller.status(), QuizStatus::Loading);
        assert!(controller.session().is_none());
    }
}
