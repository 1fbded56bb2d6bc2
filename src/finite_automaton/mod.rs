use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Display};

use crate::errors::StructuralError;
use crate::util::search::Search;

mod determinise;
mod from_str;
mod minimise;

/// A finite automaton over states `Q` and terminal symbols `T`.
/// Nondeterminism and ε-transitions (`None` in the transition key) are
/// both permitted; `is_deterministic` tells the two flavours apart.
///
/// All containers are ordered so that iteration, and hence every
/// automaton derived by `determinise` or `minimise`, is reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiniteAutomaton<Q, T>
where
    Q: Ord,
    T: Ord,
{
    states: BTreeSet<Q>,
    alphabet: BTreeSet<T>,
    transitions: BTreeMap<(Q, Option<T>), BTreeSet<Q>>,
    initial: Q,
    finals: BTreeSet<Q>,
}

impl<Q, T> FiniteAutomaton<Q, T>
where
    Q: Ord + Clone + Debug,
    T: Ord + Clone + Debug,
{
    /// Validates referential integrity and builds the automaton.  Every
    /// state mentioned by a transition, the initial state, and all
    /// final states must be declared in `states`; every symbol read by
    /// a transition must be declared in `alphabet`.
    pub fn new(
        states: BTreeSet<Q>,
        alphabet: BTreeSet<T>,
        transitions: Vec<(Q, Option<T>, Q)>,
        initial: Q,
        finals: BTreeSet<Q>,
    ) -> Result<Self, StructuralError> {
        if !states.contains(&initial) {
            return Err(StructuralError::UndeclaredInitial(format!("{:?}", initial)));
        }
        for q in &finals {
            if !states.contains(q) {
                return Err(StructuralError::UndeclaredFinal(format!("{:?}", q)));
            }
        }
        for (source, symbol, target) in &transitions {
            if !states.contains(source) {
                return Err(StructuralError::DanglingState(format!("{:?}", source)));
            }
            if !states.contains(target) {
                return Err(StructuralError::DanglingState(format!("{:?}", target)));
            }
            if let Some(t) = symbol {
                if !alphabet.contains(t) {
                    return Err(StructuralError::UndeclaredSymbol(format!("{:?}", t)));
                }
            }
        }

        Ok(FiniteAutomaton::from_parts(
            states,
            alphabet,
            transitions,
            initial,
            finals,
        ))
    }

    /// Builds an automaton whose parts are consistent by construction.
    pub(crate) fn from_parts(
        states: BTreeSet<Q>,
        alphabet: BTreeSet<T>,
        transitions: Vec<(Q, Option<T>, Q)>,
        initial: Q,
        finals: BTreeSet<Q>,
    ) -> Self {
        let mut transition_map: BTreeMap<(Q, Option<T>), BTreeSet<Q>> = BTreeMap::new();
        for (source, symbol, target) in transitions {
            transition_map
                .entry((source, symbol))
                .or_insert_with(BTreeSet::new)
                .insert(target);
        }

        FiniteAutomaton {
            states,
            alphabet,
            transitions: transition_map,
            initial,
            finals,
        }
    }

    pub fn states(&self) -> &BTreeSet<Q> {
        &self.states
    }

    pub fn alphabet(&self) -> &BTreeSet<T> {
        &self.alphabet
    }

    pub fn initial(&self) -> &Q {
        &self.initial
    }

    pub fn finals(&self) -> &BTreeSet<Q> {
        &self.finals
    }

    /// Lists all transitions as (source, read symbol, target) triples
    /// in a fixed order.
    pub fn transitions(&self) -> impl Iterator<Item = (&Q, Option<&T>, &Q)> + '_ {
        self.transitions
            .iter()
            .flat_map(|((source, symbol), targets)| {
                targets
                    .iter()
                    .map(move |target| (source, symbol.as_ref(), target))
            })
    }

    /// True iff the automaton has no ε-transitions and no state/symbol
    /// pair with more than one target.
    pub fn is_deterministic(&self) -> bool {
        self.transitions
            .iter()
            .all(|((_, symbol), targets)| symbol.is_some() && targets.len() <= 1)
    }

    /// The ε-closure of `states`: the smallest superset closed under
    /// ε-transitions.  Idempotent; terminates on cyclic ε-graphs thanks
    /// to the visited set inside `Search::uniques`.
    pub fn closure(&self, states: &BTreeSet<Q>) -> BTreeSet<Q> {
        Search::depth_first(states.iter().cloned(), |q: &Q| {
            match self.transitions.get(&(q.clone(), None)) {
                Some(targets) => targets.iter().cloned().collect(),
                None => Vec::new(),
            }
        })
        .uniques()
        .collect()
    }

    /// The unique successor of `q` under `symbol`, if any.  Only
    /// meaningful on deterministic automata.
    pub(crate) fn step(&self, q: &Q, symbol: &T) -> Option<&Q> {
        self.transitions
            .get(&(q.clone(), Some(symbol.clone())))
            .and_then(|targets| targets.iter().next())
    }

    /// Decides whether the automaton accepts `word` by simulating the
    /// set of reachable states.  A missing transition rejects; it is
    /// not an error.
    pub fn recognise(&self, word: &[T]) -> bool {
        let mut current = {
            let mut initial_set = BTreeSet::new();
            initial_set.insert(self.initial.clone());
            self.closure(&initial_set)
        };

        for symbol in word {
            let mut reached = BTreeSet::new();
            for q in &current {
                if let Some(targets) = self.transitions.get(&(q.clone(), Some(symbol.clone()))) {
                    reached.extend(targets.iter().cloned());
                }
            }
            if reached.is_empty() {
                return false;
            }
            current = self.closure(&reached);
        }

        current.iter().any(|q| self.finals.contains(q))
    }
}

impl<Q, T> Display for FiniteAutomaton<Q, T>
where
    Q: Ord + Display,
    T: Ord + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut state_iter = self.states.iter().peekable();
        write!(f, "states: [")?;
        while let Some(q) = state_iter.next() {
            write!(f, "{}", q)?;
            if state_iter.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        writeln!(f, "]")?;

        writeln!(f, "initial: {}", self.initial)?;

        let mut final_iter = self.finals.iter().peekable();
        write!(f, "final: [")?;
        while let Some(q) = final_iter.next() {
            write!(f, "{}", q)?;
            if final_iter.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        writeln!(f, "]")?;

        for ((source, symbol), targets) in &self.transitions {
            match symbol {
                Some(t) => write!(f, "{}, {} → [", source, t)?,
                None => write!(f, "{}, ε → [", source)?,
            }
            let mut target_iter = targets.iter().peekable();
            while let Some(q) = target_iter.next() {
                write!(f, "{}", q)?;
                if target_iter.peek().is_some() {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, "]")?;
        }

        Ok(())
    }
}
