use std::fmt::{self, Debug, Display};

use crate::recognisable::{Configuration, Instruction};

/// Transition of an automaton: reads the sequence `word` (empty for an
/// ε-transition) and applies `instruction` to the storage.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Transition<I, T> {
    pub word: Vec<T>,
    pub instruction: I,
}

impl<I, T> Transition<I, T>
where
    I: Instruction,
    I::Storage: Clone,
    T: Clone + PartialEq,
{
    pub fn apply(&self, c: &Configuration<I::Storage, T>) -> Vec<Configuration<I::Storage, T>> {
        if !c.word.starts_with(&self.word[..]) {
            return Vec::new();
        }

        let mut confs = Vec::new();
        for storage1 in self.instruction.apply(c.storage.clone()) {
            confs.push(Configuration {
                word: c.word.clone().split_off(self.word.len()),
                storage: storage1,
            })
        }

        confs
    }
}

impl<I, T> Display for Transition<I, T>
where
    I: Display,
    T: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Transition {:?} {}", self.word, self.instruction)
    }
}
