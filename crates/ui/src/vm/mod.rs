mod quiz_vm;

pub use quiz_vm::{
    ANY_FILTER, AnswerButtonVm, AnswerState, CompletionVm, QuestionVm, QuizIntent, ReviewRowVm, completion_vm,
    difficulty_options, filter_value, kind_options, question_vm, resolve_query, shortcut_index,
};
