use std::collections::{BTreeSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use integeriser::{HashIntegeriser, Integeriser};

use crate::finite_automaton::FiniteAutomaton;

impl<Q, T> FiniteAutomaton<Q, T>
where
    Q: Ord + Clone + Debug + Hash,
    T: Ord + Clone + Debug + Hash,
{
    /// The subset construction.  States of the result are `usize`
    /// identifiers for the ε-closed subsets of `self.states` that are
    /// reachable from the initial closure; they are numbered in
    /// breadth-first discovery order, so the initial state is always
    /// `0`.  Subsets with no successor under a symbol produce no
    /// transition, hence the result is a partial dfa.
    pub fn determinise(&self) -> FiniteAutomaton<usize, T> {
        let mut subsets: HashIntegeriser<BTreeSet<Q>> = HashIntegeriser::new();
        let mut transitions: Vec<(usize, Option<T>, usize)> = Vec::new();
        let mut finals: BTreeSet<usize> = BTreeSet::new();

        let initial_subset = {
            let mut singleton = BTreeSet::new();
            singleton.insert(self.initial.clone());
            self.closure(&singleton)
        };

        let mut agenda: VecDeque<usize> = VecDeque::new();
        agenda.push_back(subsets.integerise(initial_subset));

        while let Some(subset_id) = agenda.pop_front() {
            let subset = match subsets.find_value(subset_id) {
                Some(subset) => subset.clone(),
                None => continue,
            };

            if subset.iter().any(|q| self.finals.contains(q)) {
                finals.insert(subset_id);
            }

            for symbol in &self.alphabet {
                let mut reached = BTreeSet::new();
                for q in &subset {
                    if let Some(targets) =
                        self.transitions.get(&(q.clone(), Some(symbol.clone())))
                    {
                        reached.extend(targets.iter().cloned());
                    }
                }
                if reached.is_empty() {
                    continue;
                }
                let reached = self.closure(&reached);

                let known = subsets.find_key(&reached).is_some();
                let target_id = subsets.integerise(reached);
                if !known {
                    agenda.push_back(target_id);
                }
                transitions.push((subset_id, Some(symbol.clone()), target_id));
            }
        }

        FiniteAutomaton::from_parts(
            (0..subsets.size()).collect(),
            self.alphabet.clone(),
            transitions,
            0,
            finals,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::finite_automaton::FiniteAutomaton;

    #[test]
    fn subset_construction_preserves_the_language() {
        // (a|b)* a: nondeterministic on the final a
        let nfa: FiniteAutomaton<String, String> = "initial: q0\n\
             final: [q1]\n\
             q0, a → [q0, q1]\n\
             q0, b → [q0]\n"
            .parse()
            .unwrap();

        let dfa = nfa.determinise();
        assert!(dfa.is_deterministic());

        for word in vec![
            vec![],
            vec!["a"],
            vec!["b"],
            vec!["a", "a"],
            vec!["a", "b"],
            vec!["b", "a"],
            vec!["b", "b"],
            vec!["a", "b", "a"],
            vec!["b", "a", "b"],
        ] {
            let word: Vec<String> = word.into_iter().map(String::from).collect();
            assert_eq!(nfa.recognise(&word), dfa.recognise(&word), "word: {:?}", word);
        }
    }

    #[test]
    fn epsilon_transitions_are_resolved() {
        let nfa: FiniteAutomaton<String, String> = "initial: q0\n\
             final: [q2]\n\
             q0, ε → [q1]\n\
             q1, a → [q2]\n"
            .parse()
            .unwrap();

        let dfa = nfa.determinise();
        assert!(dfa.is_deterministic());
        assert_eq!(dfa.initial(), &0);
        assert!(dfa.recognise(&[String::from("a")]));
        assert!(!dfa.recognise(&[]));
    }

    #[test]
    fn numbering_is_reproducible() {
        let nfa: FiniteAutomaton<String, String> = "initial: q0\n\
             final: [q1]\n\
             q0, a → [q0, q1]\n\
             q0, b → [q0]\n"
            .parse()
            .unwrap();

        assert_eq!(nfa.determinise(), nfa.determinise());
    }
}
