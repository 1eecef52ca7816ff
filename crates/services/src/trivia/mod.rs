mod client;
mod config;
mod fixture;
mod source;
mod throttle;
mod transport;
mod wire;

pub use client::TriviaClient;
pub use config::{DEFAULT_API_URL, DEFAULT_CATEGORY_URL, DEFAULT_TOKEN_URL, TriviaConfig};
pub use fixture::{FixtureSource, fixture_categories, fixture_questions};
pub use source::{QuestionSource, QuestionSourceKind};
pub use throttle::backoff_delay;
pub use transport::{ReqwestTransport, TransportResponse, TriviaTransport};
