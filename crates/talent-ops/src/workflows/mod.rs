pub mod documents;
pub mod evaluations;
pub mod hierarchy;
pub mod lifecycle;
pub mod people;
