pub mod mooddtos;
pub mod userdtos;

pub use mooddtos::*;
pub use userdtos::*;
