#![forbid(unsafe_code)]

pub mod model;
pub mod shuffle;
pub mod text;
pub mod time;

pub use time::Clock;
