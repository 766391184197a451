pub mod rubric;
pub mod run;
