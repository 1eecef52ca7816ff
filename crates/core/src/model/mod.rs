mod category;
mod ids;
mod query;
mod question;
mod response_code;

pub use category::Category;
pub use ids::CategoryId;
pub use query::{QueryError, QuestionQuery};
pub use question::{Difficulty, Question, QuestionKind};
pub use response_code::ResponseCode;
