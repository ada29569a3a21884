pub mod duplicates;
pub mod posts;
