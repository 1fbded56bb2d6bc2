#[macro_use]
extern crate nom;
#[macro_use]
extern crate serde_derive;

pub mod errors;
pub mod cfg;
pub mod finite_automaton;
pub mod push_down_automaton;
pub mod recognisable;
pub mod turing_machine;
pub mod util;

#[cfg(test)]
mod tests;
