use thiserror::Error;

/// Violations of referential integrity in an automaton or grammar
/// description.  These are detected while a description is being
/// constructed; no analysis ever runs on a description that failed
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StructuralError {
    #[error("transition mentions `{0}`, which is not a declared state")]
    DanglingState(String),
    #[error("initial state `{0}` is not a declared state")]
    UndeclaredInitial(String),
    #[error("final state `{0}` is not a declared state")]
    UndeclaredFinal(String),
    #[error("transition reads `{0}`, which is not in the alphabet")]
    UndeclaredSymbol(String),
    #[error("transition uses `{0}`, which is not in the stack alphabet")]
    UndeclaredStackSymbol(String),
    #[error("nonterminal `{0}` occurs in a rule but has no rule of its own")]
    UndeclaredNonterminal(String),
    #[error("the automaton is not deterministic")]
    NotDeterministic,
    #[error("rule `{0}` is not in Chomsky normal form")]
    NotChomskyNormalForm(String),
}
