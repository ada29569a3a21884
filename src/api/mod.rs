pub mod duplicates;
pub mod extract;
pub mod health;
pub mod posts;
