pub mod documents;
pub mod repositories;
