use log::debug;
use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};

use crate::errors::StructuralError;
use crate::recognisable::{Configuration, Instruction, Transition};
use crate::util::search::Search;

mod from_str;

/// Storage of a push-down automaton: the current state and the stack,
/// topmost symbol last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PushDownStorage<Q, S> {
    pub state: Q,
    pub stack: Vec<S>,
}

/// Pops `pop` off the stack while moving from `source` to `target`,
/// then pushes the symbols of `push`; the first element of `push`
/// becomes the new topmost symbol.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PushDownInstruction<Q, S> {
    pub source: Q,
    pub target: Q,
    pub pop: S,
    pub push: Vec<S>,
}

/// Verdict of a bounded push-down recognition run.  `Inconclusive`
/// means the configuration budget ran out before the search space was
/// exhausted, so nothing is known about the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecognitionOutcome {
    Accept,
    Reject,
    Inconclusive,
}

/// A push-down automaton that accepts by final state.  The stack
/// contents are ignored at acceptance; only the input must be consumed
/// entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushDownAutomaton<Q, T, S>
where
    Q: Ord,
    T: Ord,
    S: Ord,
{
    states: BTreeSet<Q>,
    input_alphabet: BTreeSet<T>,
    stack_alphabet: BTreeSet<S>,
    transitions: Vec<Transition<PushDownInstruction<Q, S>, T>>,
    initial: Q,
    initial_stack_symbol: S,
    finals: BTreeSet<Q>,
}

impl<Q, S> Instruction for PushDownInstruction<Q, S>
where
    Q: Ord + Clone,
    S: Ord + Clone,
{
    type Storage = PushDownStorage<Q, S>;

    fn apply(&self, storage: PushDownStorage<Q, S>) -> Vec<PushDownStorage<Q, S>> {
        if storage.state != self.source {
            return Vec::new();
        }
        match storage.stack.last() {
            Some(top) if *top == self.pop => {
                let mut stack = storage.stack;
                stack.pop();
                for symbol in self.push.iter().rev() {
                    stack.push(symbol.clone());
                }
                vec![PushDownStorage {
                    state: self.target.clone(),
                    stack,
                }]
            }
            _ => Vec::new(),
        }
    }
}

impl<Q, T, S> PushDownAutomaton<Q, T, S>
where
    Q: Ord + Clone + Debug,
    T: Ord + Clone + Debug,
    S: Ord + Clone + Debug,
{
    /// Validates referential integrity and builds the automaton, cf.
    /// `FiniteAutomaton::new`.  Stack symbols that transitions pop or
    /// push must be declared in `stack_alphabet`, as must the initial
    /// stack symbol.
    pub fn new(
        states: BTreeSet<Q>,
        input_alphabet: BTreeSet<T>,
        stack_alphabet: BTreeSet<S>,
        transitions: Vec<Transition<PushDownInstruction<Q, S>, T>>,
        initial: Q,
        initial_stack_symbol: S,
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
        if !stack_alphabet.contains(&initial_stack_symbol) {
            return Err(StructuralError::UndeclaredStackSymbol(format!(
                "{:?}",
                initial_stack_symbol
            )));
        }
        for transition in &transitions {
            let instruction = &transition.instruction;
            if !states.contains(&instruction.source) {
                return Err(StructuralError::DanglingState(format!(
                    "{:?}",
                    instruction.source
                )));
            }
            if !states.contains(&instruction.target) {
                return Err(StructuralError::DanglingState(format!(
                    "{:?}",
                    instruction.target
                )));
            }
            for t in &transition.word {
                if !input_alphabet.contains(t) {
                    return Err(StructuralError::UndeclaredSymbol(format!("{:?}", t)));
                }
            }
            if !stack_alphabet.contains(&instruction.pop) {
                return Err(StructuralError::UndeclaredStackSymbol(format!(
                    "{:?}",
                    instruction.pop
                )));
            }
            for s in &instruction.push {
                if !stack_alphabet.contains(s) {
                    return Err(StructuralError::UndeclaredStackSymbol(format!("{:?}", s)));
                }
            }
        }

        Ok(PushDownAutomaton::from_parts(
            states,
            input_alphabet,
            stack_alphabet,
            transitions,
            initial,
            initial_stack_symbol,
            finals,
        ))
    }

    pub(crate) fn from_parts(
        states: BTreeSet<Q>,
        input_alphabet: BTreeSet<T>,
        stack_alphabet: BTreeSet<S>,
        mut transitions: Vec<Transition<PushDownInstruction<Q, S>, T>>,
        initial: Q,
        initial_stack_symbol: S,
        finals: BTreeSet<Q>,
    ) -> Self {
        // fixed transition order keeps the exploration reproducible
        transitions.sort();
        transitions.dedup();

        PushDownAutomaton {
            states,
            input_alphabet,
            stack_alphabet,
            transitions,
            initial,
            initial_stack_symbol,
            finals,
        }
    }

    pub fn states(&self) -> &BTreeSet<Q> {
        &self.states
    }

    pub fn input_alphabet(&self) -> &BTreeSet<T> {
        &self.input_alphabet
    }

    pub fn stack_alphabet(&self) -> &BTreeSet<S> {
        &self.stack_alphabet
    }

    pub fn initial(&self) -> &Q {
        &self.initial
    }

    pub fn initial_stack_symbol(&self) -> &S {
        &self.initial_stack_symbol
    }

    pub fn finals(&self) -> &BTreeSet<Q> {
        &self.finals
    }

    pub fn transitions(&self) -> &[Transition<PushDownInstruction<Q, S>, T>] {
        &self.transitions
    }

    /// The configuration the automaton starts in on `word`.
    pub fn initial_configuration(&self, word: &[T]) -> Configuration<PushDownStorage<Q, S>, T> {
        Configuration {
            word: word.to_vec(),
            storage: PushDownStorage {
                state: self.initial.clone(),
                stack: vec![self.initial_stack_symbol.clone()],
            },
        }
    }

    /// Breadth-first exploration of the configuration graph, visiting
    /// every configuration at most once.  The verdict falls as soon as
    /// an accepting configuration is dequeued, as `Reject` when the
    /// graph is exhausted, and as `Inconclusive` when more than
    /// `step_budget` configurations have been inspected.  ε-cycles that
    /// grow the stack make the graph infinite, which is what the budget
    /// guards against.
    pub fn recognise(&self, word: &[T], step_budget: usize) -> RecognitionOutcome {
        let transitions = &self.transitions;
        let mut inspected = 0;

        let search = Search::breadth_first(
            vec![self.initial_configuration(word)],
            move |c: &Configuration<PushDownStorage<Q, S>, T>| {
                transitions.iter().flat_map(|t| t.apply(c)).collect()
            },
        )
        .uniques();

        for configuration in search {
            inspected += 1;
            if inspected > step_budget {
                debug!("budget of {} configurations exhausted", step_budget);
                return RecognitionOutcome::Inconclusive;
            }
            if configuration.is_final() && self.finals.contains(&configuration.storage.state) {
                return RecognitionOutcome::Accept;
            }
        }

        RecognitionOutcome::Reject
    }
}

impl Display for RecognitionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RecognitionOutcome::Accept => write!(f, "accept"),
            RecognitionOutcome::Reject => write!(f, "reject"),
            RecognitionOutcome::Inconclusive => write!(f, "inconclusive"),
        }
    }
}

impl<Q, S> Display for PushDownStorage<Q, S>
where
    Q: Display,
    S: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "state: {}, stack: [", self.state)?;
        let mut stack_iter = self.stack.iter().rev().peekable();
        while let Some(s) = stack_iter.next() {
            write!(f, "{}", s)?;
            if stack_iter.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

impl<Q, T, S> Display for PushDownAutomaton<Q, T, S>
where
    Q: Ord + Display,
    T: Ord + Display,
    S: Ord + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "initial: {}", self.initial)?;
        writeln!(f, "stack: {}", self.initial_stack_symbol)?;

        let mut final_iter = self.finals.iter().peekable();
        write!(f, "final: [")?;
        while let Some(q) = final_iter.next() {
            write!(f, "{}", q)?;
            if final_iter.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        writeln!(f, "]")?;

        for transition in &self.transitions {
            let instruction = &transition.instruction;
            match transition.word.first() {
                Some(t) => write!(f, "{}, {}, {} → {}, [", instruction.source, t, instruction.pop, instruction.target)?,
                None => write!(f, "{}, ε, {} → {}, [", instruction.source, instruction.pop, instruction.target)?,
            }
            let mut push_iter = instruction.push.iter().peekable();
            while let Some(s) = push_iter.next() {
                write!(f, "{}", s)?;
                if push_iter.peek().is_some() {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, "]")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced_parens() -> PushDownAutomaton<String, String, String> {
        // well-bracketed words over ( and )
        "initial: q0\n\
         stack: Z\n\
         final: [q1]\n\
         q0, (, Z → q0, [A, Z]\n\
         q0, (, A → q0, [A, A]\n\
         q0, ), A → q0, []\n\
         q0, ε, Z → q1, [Z]\n"
            .parse()
            .unwrap()
    }

    fn word(s: &str) -> Vec<String> {
        s.chars().map(|c| c.to_string()).collect()
    }

    #[test]
    fn accepts_balanced_words() {
        let pda = balanced_parens();

        assert_eq!(pda.recognise(&word(""), 1000), RecognitionOutcome::Accept);
        assert_eq!(pda.recognise(&word("()"), 1000), RecognitionOutcome::Accept);
        assert_eq!(pda.recognise(&word("(())"), 1000), RecognitionOutcome::Accept);
        assert_eq!(pda.recognise(&word("()()"), 1000), RecognitionOutcome::Accept);
    }

    #[test]
    fn rejects_unbalanced_words() {
        let pda = balanced_parens();

        assert_eq!(pda.recognise(&word("(()"), 1000), RecognitionOutcome::Reject);
        assert_eq!(pda.recognise(&word(")("), 1000), RecognitionOutcome::Reject);
        assert_eq!(pda.recognise(&word(")"), 1000), RecognitionOutcome::Reject);
    }

    #[test]
    fn tiny_budgets_are_inconclusive() {
        let pda = balanced_parens();

        assert_eq!(
            pda.recognise(&word("(())"), 2),
            RecognitionOutcome::Inconclusive
        );
    }

    #[test]
    fn budget_counts_unique_configurations() {
        // an ε-loop on the start state does not burn the budget twice
        let pda: PushDownAutomaton<String, String, String> = "initial: q0\n\
             stack: Z\n\
             final: [q0]\n\
             q0, ε, Z → q0, [Z]\n"
            .parse()
            .unwrap();

        assert_eq!(pda.recognise(&word(""), 10), RecognitionOutcome::Accept);
        assert_eq!(pda.recognise(&word("x"), 10), RecognitionOutcome::Reject);
    }

    #[test]
    fn validation_rejects_undeclared_stack_symbols() {
        let result: Result<PushDownAutomaton<&str, &str, &str>, _> = PushDownAutomaton::new(
            vec!["q0"].into_iter().collect(),
            BTreeSet::new(),
            vec!["Z"].into_iter().collect(),
            vec![Transition {
                word: Vec::new(),
                instruction: PushDownInstruction {
                    source: "q0",
                    target: "q0",
                    pop: "A",
                    push: Vec::new(),
                },
            }],
            "q0",
            "Z",
            BTreeSet::new(),
        );

        assert_eq!(
            result.err(),
            Some(StructuralError::UndeclaredStackSymbol(String::from("\"A\"")))
        );
    }
}
