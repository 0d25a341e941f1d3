pub mod moodmodel;
pub mod usermodel;
