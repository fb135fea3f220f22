pub mod issue;
pub mod story;
