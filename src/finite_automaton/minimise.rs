use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use integeriser::{HashIntegeriser, Integeriser};

use crate::errors::StructuralError;
use crate::finite_automaton::FiniteAutomaton;

impl<Q, T> FiniteAutomaton<Q, T>
where
    Q: Ord + Clone + Debug + Hash,
    T: Ord + Clone + Debug + Hash,
{
    /// Minimises a deterministic automaton by partition refinement.
    /// Unreachable states are discarded first; the initial partition
    /// separates final from non-final states and is refined until no
    /// two states of a block disagree on the block a symbol leads to.
    /// Block numbering follows breadth-first order from the initial
    /// block, so equivalent inputs minimise to equal automata.
    pub fn minimise(&self) -> Result<FiniteAutomaton<usize, T>, StructuralError> {
        if !self.is_deterministic() {
            return Err(StructuralError::NotDeterministic);
        }

        let reachable: BTreeSet<Q> = {
            let mut visited = BTreeSet::new();
            let mut agenda = VecDeque::new();
            visited.insert(self.initial.clone());
            agenda.push_back(self.initial.clone());
            while let Some(q) = agenda.pop_front() {
                for symbol in &self.alphabet {
                    if let Some(target) = self.step(&q, symbol) {
                        if visited.insert(target.clone()) {
                            agenda.push_back(target.clone());
                        }
                    }
                }
            }
            visited
        };

        // block index per state; 0 = non-final, 1 = final
        let mut block_of: BTreeMap<Q, usize> = reachable
            .iter()
            .map(|q| {
                let block = if self.finals.contains(q) { 1 } else { 0 };
                (q.clone(), block)
            })
            .collect();
        let mut block_count = block_of.values().collect::<BTreeSet<_>>().len();

        loop {
            let mut groups: BTreeMap<(usize, Vec<Option<usize>>), BTreeSet<Q>> = BTreeMap::new();
            for q in &reachable {
                let signature: Vec<Option<usize>> = self
                    .alphabet
                    .iter()
                    .map(|symbol| self.step(q, symbol).map(|target| block_of[target]))
                    .collect();
                groups
                    .entry((block_of[q], signature))
                    .or_insert_with(BTreeSet::new)
                    .insert(q.clone());
            }

            if groups.len() == block_count {
                break;
            }
            block_count = groups.len();

            for (new_block, (_, members)) in groups.into_iter().enumerate() {
                for q in members {
                    block_of.insert(q, new_block);
                }
            }
        }

        // renumber the blocks breadth-first from the initial block
        let mut block_ids: HashIntegeriser<usize> = HashIntegeriser::new();
        let mut transitions: Vec<(usize, Option<T>, usize)> = Vec::new();
        let mut finals: BTreeSet<usize> = BTreeSet::new();

        let representatives: BTreeMap<usize, Q> = {
            let mut representatives = BTreeMap::new();
            for q in &reachable {
                representatives.entry(block_of[q]).or_insert_with(|| q.clone());
            }
            representatives
        };

        let mut agenda: VecDeque<usize> = VecDeque::new();
        agenda.push_back(block_ids.integerise(block_of[&self.initial]));

        while let Some(block_id) = agenda.pop_front() {
            let block = match block_ids.find_value(block_id) {
                Some(block) => *block,
                None => continue,
            };
            let representative = &representatives[&block];

            if self.finals.contains(representative) {
                finals.insert(block_id);
            }

            for symbol in &self.alphabet {
                if let Some(target) = self.step(representative, symbol) {
                    let target_block = block_of[target];
                    let known = block_ids.find_key(&target_block).is_some();
                    let target_id = block_ids.integerise(target_block);
                    if !known {
                        agenda.push_back(target_id);
                    }
                    transitions.push((block_id, Some(symbol.clone()), target_id));
                }
            }
        }

        Ok(FiniteAutomaton::from_parts(
            (0..block_ids.size()).collect(),
            self.alphabet.clone(),
            transitions,
            0,
            finals,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::StructuralError;
    use crate::finite_automaton::FiniteAutomaton;

    #[test]
    fn merges_equivalent_states() {
        // four states, but b* (even or odd count tracked twice) only
        // needs two
        let dfa: FiniteAutomaton<String, String> = "initial: q0\n\
             final: [q0, q2]\n\
             q0, b → [q1]\n\
             q1, b → [q2]\n\
             q2, b → [q3]\n\
             q3, b → [q0]\n"
            .parse()
            .unwrap();

        let minimal = dfa.minimise().unwrap();
        assert_eq!(minimal.states().len(), 2);

        for n in 0..6 {
            let word: Vec<String> = (0..n).map(|_| String::from("b")).collect();
            assert_eq!(dfa.recognise(&word), minimal.recognise(&word), "word: {:?}", word);
        }
    }

    #[test]
    fn already_minimal_automata_keep_their_size() {
        let dfa: FiniteAutomaton<String, String> = "initial: q0\n\
             final: [q1]\n\
             q0, a → [q1]\n\
             q1, b → [q1]\n"
            .parse()
            .unwrap();

        let minimal = dfa.minimise().unwrap();
        assert_eq!(minimal.states().len(), dfa.states().len());
    }

    #[test]
    fn unreachable_states_are_discarded() {
        let dfa: FiniteAutomaton<String, String> = "states: [q0, q1, q2]\n\
             initial: q0\n\
             final: [q1]\n\
             q0, a → [q1]\n\
             q2, a → [q1]\n"
            .parse()
            .unwrap();

        let minimal = dfa.minimise().unwrap();
        assert_eq!(minimal.states().len(), 2);
    }

    #[test]
    fn rejects_nondeterministic_input() {
        let nfa: FiniteAutomaton<String, String> = "initial: q0\n\
             final: [q1]\n\
             q0, a → [q0, q1]\n"
            .parse()
            .unwrap();

        assert_eq!(nfa.minimise().err(), Some(StructuralError::NotDeterministic));
    }
}
