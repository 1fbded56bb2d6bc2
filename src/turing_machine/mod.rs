use log::debug;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Display};

use crate::errors::StructuralError;

mod from_str;
mod tape;

pub use self::tape::Tape;

/// Direction the head moves after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Move {
    Left,
    Right,
}

/// Verdict of a bounded machine run.  `Exceeded` means the step budget
/// ran out before the machine halted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    Accepted,
    Rejected,
    Exceeded,
}

/// Like `RunOutcome`, but an accepting run additionally carries the
/// tape contents between the outermost non-blank cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputeOutcome<T> {
    Output(Vec<T>),
    Rejected,
    Exceeded,
}

/// A deterministic Turing machine over a single two-way infinite tape.
/// The transition function is partial; an undefined lookup halts and
/// rejects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TuringMachine<Q, T>
where
    Q: Ord,
    T: Ord,
{
    states: BTreeSet<Q>,
    tape_alphabet: BTreeSet<T>,
    blank: T,
    transitions: BTreeMap<(Q, T), (Q, T, Move)>,
    initial: Q,
    accept: Q,
    reject: Q,
}

impl<Q, T> TuringMachine<Q, T>
where
    Q: Ord + Clone + Debug,
    T: Ord + Clone + Debug,
{
    /// Validates referential integrity and builds the machine.  Two
    /// transitions for the same state/symbol pair make the machine
    /// nondeterministic, which is a structural error here.
    pub fn new(
        states: BTreeSet<Q>,
        tape_alphabet: BTreeSet<T>,
        blank: T,
        transitions: Vec<(Q, T, Q, T, Move)>,
        initial: Q,
        accept: Q,
        reject: Q,
    ) -> Result<Self, StructuralError> {
        if !tape_alphabet.contains(&blank) {
            return Err(StructuralError::UndeclaredSymbol(format!("{:?}", blank)));
        }
        if !states.contains(&initial) {
            return Err(StructuralError::UndeclaredInitial(format!("{:?}", initial)));
        }
        for q in &[&accept, &reject] {
            if !states.contains(*q) {
                return Err(StructuralError::UndeclaredFinal(format!("{:?}", q)));
            }
        }

        let mut transition_map = BTreeMap::new();
        for (source, read, target, write, direction) in transitions {
            if !states.contains(&source) {
                return Err(StructuralError::DanglingState(format!("{:?}", source)));
            }
            if !states.contains(&target) {
                return Err(StructuralError::DanglingState(format!("{:?}", target)));
            }
            if !tape_alphabet.contains(&read) {
                return Err(StructuralError::UndeclaredSymbol(format!("{:?}", read)));
            }
            if !tape_alphabet.contains(&write) {
                return Err(StructuralError::UndeclaredSymbol(format!("{:?}", write)));
            }
            if transition_map
                .insert((source, read), (target, write, direction))
                .is_some()
            {
                return Err(StructuralError::NotDeterministic);
            }
        }

        Ok(TuringMachine {
            states,
            tape_alphabet,
            blank,
            transitions: transition_map,
            initial,
            accept,
            reject,
        })
    }

    pub fn states(&self) -> &BTreeSet<Q> {
        &self.states
    }

    pub fn tape_alphabet(&self) -> &BTreeSet<T> {
        &self.tape_alphabet
    }

    pub fn blank(&self) -> &T {
        &self.blank
    }

    pub fn initial(&self) -> &Q {
        &self.initial
    }

    pub fn accept(&self) -> &Q {
        &self.accept
    }

    pub fn reject(&self) -> &Q {
        &self.reject
    }

    pub fn transitions(
        &self,
    ) -> impl Iterator<Item = (&Q, &T, &Q, &T, Move)> + '_ {
        self.transitions
            .iter()
            .map(|((source, read), (target, write, direction))| {
                (source, read, target, write, *direction)
            })
    }

    fn execute(&self, input: &[T], step_budget: usize) -> (RunOutcome, Tape<T>) {
        let mut tape = Tape::new(input, self.blank.clone());
        let mut head: isize = 0;
        let mut state = self.initial.clone();

        for _ in 0..step_budget {
            if state == self.accept {
                return (RunOutcome::Accepted, tape);
            }
            if state == self.reject {
                return (RunOutcome::Rejected, tape);
            }

            let read = tape.read(head).clone();
            match self.transitions.get(&(state, read)) {
                Some((target, write, direction)) => {
                    tape.write(head, write.clone());
                    head += match direction {
                        Move::Left => -1,
                        Move::Right => 1,
                    };
                    state = target.clone();
                }
                None => return (RunOutcome::Rejected, tape),
            }
        }

        if state == self.accept {
            (RunOutcome::Accepted, tape)
        } else if state == self.reject {
            (RunOutcome::Rejected, tape)
        } else {
            debug!("budget of {} steps exhausted", step_budget);
            (RunOutcome::Exceeded, tape)
        }
    }

    /// Runs the machine on `input` for at most `step_budget` steps and
    /// reports whether it halted accepting, halted rejecting, or did
    /// not halt in time.
    pub fn run(&self, input: &[T], step_budget: usize) -> RunOutcome {
        self.execute(input, step_budget).0
    }

    /// Runs the machine and, if it accepts, returns the tape contents
    /// with leading and trailing blanks stripped.
    pub fn compute(&self, input: &[T], step_budget: usize) -> ComputeOutcome<T> {
        match self.execute(input, step_budget) {
            (RunOutcome::Accepted, tape) => ComputeOutcome::Output(tape.trimmed()),
            (RunOutcome::Rejected, _) => ComputeOutcome::Rejected,
            (RunOutcome::Exceeded, _) => ComputeOutcome::Exceeded,
        }
    }
}

impl Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RunOutcome::Accepted => write!(f, "accepted"),
            RunOutcome::Rejected => write!(f, "rejected"),
            RunOutcome::Exceeded => write!(f, "exceeded"),
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Move::Left => write!(f, "L"),
            Move::Right => write!(f, "R"),
        }
    }
}

impl<Q, T> Display for TuringMachine<Q, T>
where
    Q: Ord + Display,
    T: Ord + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "initial: {}", self.initial)?;
        writeln!(f, "blank: {}", self.blank)?;
        writeln!(f, "accept: {}", self.accept)?;
        writeln!(f, "reject: {}", self.reject)?;

        for ((source, read), (target, write, direction)) in &self.transitions {
            writeln!(
                f,
                "{}, {} → {}, {}, {}",
                source, read, target, write, direction
            )?;
        }

        Ok(())
    }
}
