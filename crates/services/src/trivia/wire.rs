use serde::Deserialize;

use trivia_core::model::{Category, Question};

#[derive(Debug, Deserialize)]
pub(crate) struct QuestionsResponse {
    pub response_code: i64,
    #[serde(default)]
    pub results: Vec<Question>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub response_code: i64,
    #[serde(default)]
    pub response_message: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CategoriesResponse {
    pub trivia_categories: Vec<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_tolerates_missing_token() {
        let body = r#"{"response_code":3,"response_message":"Token Not Found"}"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.response_code, 3);
        assert!(parsed.token.is_none());
    }

    #[test]
    fn questions_response_defaults_to_no_results() {
        let parsed: QuestionsResponse = serde_json::from_str(r#"{"response_code":5}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn categories_response_parses_ids() {
        let body = r#"{"trivia_categories":[{"id":9,"name":"General Knowledge"}]}"#;
        let parsed: CategoriesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.trivia_categories[0], Category::new(9, "General Knowledge"));
    }
}
