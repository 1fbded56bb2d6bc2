pub mod agenda;
pub mod parsing;
pub mod search;
