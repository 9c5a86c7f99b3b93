pub mod document;
pub mod identity;
