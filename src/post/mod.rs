pub mod image;
pub mod outcome;
pub mod pipeline;
pub mod preferences;
pub mod presenter;
pub mod prompt;
