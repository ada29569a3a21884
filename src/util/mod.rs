pub mod similarity;
pub mod title;
