use services::{QuestionReview, QuizSession};
use trivia_core::model::{Difficulty, QuestionKind, QuestionQuery};

/// Route value that clears a filter instead of inheriting the default.
pub const ANY_FILTER: &str = "any";

/// Keys 1-4 pick answers in display order.
const SHORTCUT_KEYS: [&str; 4] = ["1", "2", "3", "4"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(usize),
    Next,
    Retry,
    PlayAgain,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerState {
    /// Nothing chosen yet.
    Open,
    Correct,
    /// The chosen answer, when wrong.
    Wrong,
    /// Neither chosen nor correct, after a choice was made.
    Muted,
}

impl AnswerState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            AnswerState::Open => "answer",
            AnswerState::Correct => "answer answer--correct",
            AnswerState::Wrong => "answer answer--wrong",
            AnswerState::Muted => "answer answer--muted",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerButtonVm {
    pub index: usize,
    pub label: String,
    pub shortcut: Option<&'static str>,
    pub state: AnswerState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub score_label: String,
    pub meta_label: String,
    pub text: String,
    pub answers: Vec<AnswerButtonVm>,
    pub feedback: Option<&'static str>,
    pub can_advance: bool,
}

#[must_use]
pub fn question_vm(session: &QuizSession) -> QuestionVm {
    let question = session.current_question();
    let selected = session.selected();
    let answers = question
        .answers()
        .iter()
        .enumerate()
        .map(|(index, label)| AnswerButtonVm {
            index,
            label: label.clone(),
            shortcut: SHORTCUT_KEYS.get(index).copied(),
            state: answer_state(selected, index, question.is_correct(index)),
        })
        .collect();
    let feedback = selected.map(|index| {
        if question.is_correct(index) {
            "Correct!"
        } else {
            "Not quite."
        }
    });

    QuestionVm {
        progress_label: format!(
            "Question {} of {}",
            session.current_index() + 1,
            session.total()
        ),
        score_label: format!("Score: {}", session.score()),
        meta_label: format!(
            "{} · {}",
            question.category(),
            capitalize(question.difficulty().as_str())
        ),
        text: question.text().to_string(),
        answers,
        feedback,
        can_advance: selected.is_some() && !session.is_last(),
    }
}

fn answer_state(selected: Option<usize>, index: usize, correct: bool) -> AnswerState {
    match selected {
        None => AnswerState::Open,
        Some(_) if correct => AnswerState::Correct,
        Some(chosen) if chosen == index => AnswerState::Wrong,
        Some(_) => AnswerState::Muted,
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRowVm {
    pub question: String,
    pub answer_label: String,
    /// Present only when the pick was wrong.
    pub chosen_label: Option<String>,
    pub class: &'static str,
}

impl From<QuestionReview> for ReviewRowVm {
    fn from(entry: QuestionReview) -> Self {
        let chosen_label = (!entry.correct).then(|| {
            format!(
                "Your answer: {}",
                entry.chosen.as_deref().unwrap_or("none")
            )
        });
        Self {
            question: entry.question,
            answer_label: format!("Answer: {}", entry.correct_answer),
            chosen_label,
            class: if entry.correct {
                "quiz-review__item quiz-review__item--correct"
            } else {
                "quiz-review__item quiz-review__item--wrong"
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionVm {
    pub score_label: String,
    pub verdict: &'static str,
    pub review: Vec<ReviewRowVm>,
}

#[must_use]
pub fn completion_vm(session: &QuizSession) -> CompletionVm {
    let score = session.score() as usize;
    let total = session.total();
    let verdict = if score == total {
        "Perfect round!"
    } else if score * 2 >= total {
        "Nicely done."
    } else {
        "Better luck next round."
    };
    CompletionVm {
        score_label: format!("You scored {score} / {total}"),
        verdict,
        review: session.review().into_iter().map(ReviewRowVm::from).collect(),
    }
}

/// Map a pressed key to the answer it selects, if any.
#[must_use]
pub fn shortcut_index(key: &str, answer_count: usize) -> Option<usize> {
    SHORTCUT_KEYS
        .iter()
        .position(|shortcut| *shortcut == key)
        .filter(|index| *index < answer_count)
}

/// Build the fetch query from route values layered over `defaults`.
///
/// Empty values inherit the default, [`ANY_FILTER`] clears the filter and
/// unparseable values fall back to the default.
#[must_use]
pub fn resolve_query(
    defaults: QuestionQuery,
    category: &str,
    difficulty: &str,
    kind: &str,
) -> QuestionQuery {
    defaults
        .with_category(resolve_filter(category, defaults.category()))
        .with_difficulty(resolve_filter(difficulty, defaults.difficulty()))
        .with_kind(resolve_filter(kind, defaults.kind()))
}

fn resolve_filter<T: std::str::FromStr>(value: &str, default: Option<T>) -> Option<T> {
    match value.trim() {
        "" => default,
        ANY_FILTER => None,
        other => other.parse().ok().or(default),
    }
}

/// Route value for an optional filter.
#[must_use]
pub fn filter_value<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| ANY_FILTER.to_string(), |v| v.to_string())
}

/// Choices offered by the setup form, as (route value, label).
#[must_use]
pub fn difficulty_options() -> Vec<(String, String)> {
    std::iter::once((ANY_FILTER.to_string(), "Any difficulty".to_string()))
        .chain(
            Difficulty::ALL
                .iter()
                .map(|d| (d.as_str().to_string(), capitalize(d.as_str()))),
        )
        .collect()
}

#[must_use]
pub fn kind_options() -> Vec<(String, String)> {
    std::iter::once((ANY_FILTER.to_string(), "Any type".to_string()))
        .chain(QuestionKind::ALL.iter().map(|k| {
            let label = match k {
                QuestionKind::Multiple => "Multiple choice",
                QuestionKind::Boolean => "True / False",
            };
            (k.as_str().to_string(), label.to_string())
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use trivia_core::model::{CategoryId, Question};

    fn session_with_answers() -> QuizSession {
        let questions = vec![
            Question::new(
                "Geography",
                QuestionKind::Multiple,
                Difficulty::Hard,
                "Capital%20of%20Peru%3F",
                "Lima",
                vec!["Quito".into(), "Bogota".into()],
            ),
            Question::new(
                "Science",
                QuestionKind::Boolean,
                Difficulty::Easy,
                "Water%20is%20wet.",
                "True",
                vec!["False".into()],
            ),
        ];
        QuizSession::prepare(&questions, &mut StdRng::seed_from_u64(3)).unwrap()
    }

    #[test]
    fn question_vm_before_selection_is_open() {
        let session = session_with_answers();
        let vm = question_vm(&session);
        assert_eq!(vm.progress_label, "Question 1 of 2");
        assert_eq!(vm.score_label, "Score: 0");
        assert_eq!(vm.meta_label, "Geography · Hard");
        assert_eq!(vm.text, "Capital of Peru?");
        assert!(vm.answers.iter().all(|a| a.state == AnswerState::Open));
        assert_eq!(vm.answers[0].shortcut, Some("1"));
        assert!(vm.feedback.is_none());
        assert!(!vm.can_advance);
    }

    #[test]
    fn wrong_selection_marks_choice_and_correct_answer() {
        let mut session = session_with_answers();
        let correct = session.current_question().correct_index().unwrap();
        let wrong = (correct + 1) % session.current_question().answers().len();
        session.select_answer(wrong).unwrap();

        let vm = question_vm(&session);
        assert_eq!(vm.answers[wrong].state, AnswerState::Wrong);
        assert_eq!(vm.answers[correct].state, AnswerState::Correct);
        let muted = vm
            .answers
            .iter()
            .filter(|a| a.state == AnswerState::Muted)
            .count();
        assert_eq!(muted, 1);
        assert_eq!(vm.feedback, Some("Not quite."));
        assert!(vm.can_advance);
    }

    #[test]
    fn completion_reports_score() {
        let mut session = session_with_answers();
        let correct = session.current_question().correct_index().unwrap();
        session.select_answer(correct).unwrap();
        session.advance();
        let correct = session.current_question().correct_index().unwrap();
        session.select_answer(correct).unwrap();

        let vm = completion_vm(&session);
        assert_eq!(vm.score_label, "You scored 2 / 2");
        assert_eq!(vm.verdict, "Perfect round!");
        assert_eq!(vm.review.len(), 2);
        assert!(vm.review.iter().all(|row| row.chosen_label.is_none()));
    }

    #[test]
    fn review_row_shows_wrong_pick() {
        let row = ReviewRowVm::from(QuestionReview {
            question: "Capital of Peru?".into(),
            correct_answer: "Lima".into(),
            chosen: Some("Quito".into()),
            correct: false,
        });
        assert_eq!(row.chosen_label.as_deref(), Some("Your answer: Quito"));
        assert_eq!(row.answer_label, "Answer: Lima");
        assert!(row.class.ends_with("--wrong"));
    }

    #[test]
    fn shortcuts_respect_answer_count() {
        assert_eq!(shortcut_index("1", 4), Some(0));
        assert_eq!(shortcut_index("4", 4), Some(3));
        assert_eq!(shortcut_index("3", 2), None);
        assert_eq!(shortcut_index("x", 4), None);
    }

    #[test]
    fn resolve_query_layers_route_over_defaults() {
        let defaults = QuestionQuery::new(5)
            .unwrap()
            .with_difficulty(Some(Difficulty::Medium));

        let inherited = resolve_query(defaults, "", "", "");
        assert_eq!(inherited, defaults);

        let cleared = resolve_query(defaults, "any", "any", "any");
        assert_eq!(cleared.difficulty(), None);
        assert_eq!(cleared.amount(), 5);

        let explicit = resolve_query(defaults, "18", "hard", "boolean");
        assert_eq!(explicit.category(), Some(CategoryId::new(18)));
        assert_eq!(explicit.difficulty(), Some(Difficulty::Hard));
        assert_eq!(explicit.kind(), Some(QuestionKind::Boolean));

        let garbage = resolve_query(defaults, "abc", "brutal", "");
        assert_eq!(garbage, defaults);
    }

    #[test]
    fn option_lists_start_with_any() {
        let difficulties = difficulty_options();
        assert_eq!(difficulties[0].0, ANY_FILTER);
        assert_eq!(difficulties.len(), 4);
        assert_eq!(kind_options()[2].1, "True / False");
    }
}
