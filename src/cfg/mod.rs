use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};

use crate::errors::StructuralError;

mod analysis;
mod cyk;
mod from_str;
mod ll1;

pub use self::analysis::{FirstItem, Lookahead};
pub use self::ll1::{Conflict, Ll1Table, ParseNode, ParseTree, SyntaxError};

/// Variable or terminal occurrence on the right-hand side of a rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Letter<N, T> {
    Nt(N),
    T(T),
}

/// Right-hand side of a rule; empty for an ε-rule.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Composition<N, T> {
    pub composition: Vec<Letter<N, T>>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CfgRule<N, T> {
    pub head: N,
    pub composition: Composition<N, T>,
}

/// A context-free grammar.  Nonterminals are exactly the rule heads;
/// terminals are collected from the rule bodies.  Rules keep their
/// given order, and analyses refer to them by index into `rules()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cfg<N, T>
where
    N: Ord,
    T: Ord,
{
    initial: N,
    rules: Vec<CfgRule<N, T>>,
    nonterminals: BTreeSet<N>,
    terminals: BTreeSet<T>,
}

impl<N, T> Cfg<N, T>
where
    N: Ord + Clone + Debug,
    T: Ord + Clone + Debug,
{
    /// Validates and builds the grammar.  The initial nonterminal must
    /// head at least one rule, and every nonterminal occurring in a
    /// rule body must head one as well.
    pub fn new(initial: N, rules: Vec<CfgRule<N, T>>) -> Result<Self, StructuralError> {
        let nonterminals: BTreeSet<N> = rules.iter().map(|rule| rule.head.clone()).collect();

        if !nonterminals.contains(&initial) {
            return Err(StructuralError::UndeclaredInitial(format!("{:?}", initial)));
        }

        let mut terminals = BTreeSet::new();
        for rule in &rules {
            for letter in &rule.composition.composition {
                match letter {
                    Letter::Nt(n) => {
                        if !nonterminals.contains(n) {
                            return Err(StructuralError::UndeclaredNonterminal(format!(
                                "{:?}",
                                n
                            )));
                        }
                    }
                    Letter::T(t) => {
                        terminals.insert(t.clone());
                    }
                }
            }
        }

        Ok(Cfg {
            initial,
            rules,
            nonterminals,
            terminals,
        })
    }

    pub fn initial(&self) -> &N {
        &self.initial
    }

    pub fn rules(&self) -> &[CfgRule<N, T>] {
        &self.rules
    }

    pub fn nonterminals(&self) -> &BTreeSet<N> {
        &self.nonterminals
    }

    pub fn terminals(&self) -> &BTreeSet<T> {
        &self.terminals
    }
}

impl<N, T> Display for Letter<N, T>
where
    N: Display,
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Letter::Nt(n) => write!(f, "Nt {}", n),
            Letter::T(t) => write!(f, "T {}", t),
        }
    }
}

impl<N, T> Display for CfgRule<N, T>
where
    N: Display,
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} → [", self.head)?;
        let mut letter_iter = self.composition.composition.iter().peekable();
        while let Some(letter) = letter_iter.next() {
            write!(f, "{}", letter)?;
            if letter_iter.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}

impl<N, T> Display for Cfg<N, T>
where
    N: Ord + Display,
    T: Ord + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "initial: {}", self.initial)?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_nonterminals_and_terminals() {
        let grammar: Cfg<String, String> = "initial: S\n\
             S → [Nt A, T b]\n\
             A → [T a]\n\
             A → []\n"
            .parse()
            .unwrap();

        assert_eq!(grammar.nonterminals().len(), 2);
        assert_eq!(grammar.terminals().len(), 2);
        assert_eq!(grammar.rules().len(), 3);
    }

    #[test]
    fn initial_must_head_a_rule() {
        let grammar: Result<Cfg<String, String>, _> = "initial: S\n\
             A → [T a]\n"
            .parse();
        assert!(grammar.is_err());
    }

    #[test]
    fn body_nonterminals_must_head_rules() {
        let result = Cfg::new(
            "S",
            vec![CfgRule {
                head: "S",
                composition: Composition {
                    composition: vec![Letter::<&str, &str>::Nt("A")],
                },
            }],
        );

        assert_eq!(
            result.err(),
            Some(StructuralError::UndeclaredNonterminal(String::from("\"A\"")))
        );
    }
}
