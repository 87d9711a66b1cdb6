pub mod models;
pub mod prompt;
pub mod state;
pub mod storage;
pub mod tokens;
pub mod validation;
