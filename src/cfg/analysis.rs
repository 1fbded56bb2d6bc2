use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Display};

use crate::cfg::{Cfg, Letter};

/// Element of a FIRST set: a terminal that can begin a derivation, or
/// ε when the derived word can be empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FirstItem<T> {
    Epsilon,
    Terminal(T),
}

/// Element of a FOLLOW set or a parser lookahead: a terminal, or the
/// end of the input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Lookahead<T> {
    Terminal(T),
    End,
}

impl<N, T> Cfg<N, T>
where
    N: Ord + Clone + Debug,
    T: Ord + Clone + Debug,
{
    /// The nonterminals that derive the empty word.  Computed as the
    /// least fixpoint of "all letters of some rule body are nullable".
    pub fn nullable(&self) -> BTreeSet<N> {
        let mut nullable = BTreeSet::new();

        let mut changed = true;
        while changed {
            changed = false;
            for rule in self.rules() {
                if nullable.contains(&rule.head) {
                    continue;
                }
                let body_nullable = rule.composition.composition.iter().all(|letter| match letter {
                    Letter::Nt(n) => nullable.contains(n),
                    Letter::T(_) => false,
                });
                if body_nullable {
                    nullable.insert(rule.head.clone());
                    changed = true;
                }
            }
        }

        nullable
    }

    /// The FIRST set of every nonterminal: the terminals that can begin
    /// a word derived from it, plus ε when the nonterminal is nullable.
    pub fn first_sets(&self) -> BTreeMap<N, BTreeSet<FirstItem<T>>> {
        let mut first: BTreeMap<N, BTreeSet<FirstItem<T>>> = self
            .nonterminals()
            .iter()
            .map(|n| (n.clone(), BTreeSet::new()))
            .collect();

        let mut changed = true;
        while changed {
            changed = false;
            for rule in self.rules() {
                let body_first = first_of_word(&rule.composition.composition, &first);
                let entry = first
                    .get_mut(&rule.head)
                    .map(|entry| {
                        let before = entry.len();
                        entry.extend(body_first);
                        entry.len() > before
                    })
                    .unwrap_or(false);
                changed |= entry;
            }
        }

        first
    }

    /// The FOLLOW set of every nonterminal: the lookaheads that can
    /// occur immediately after it in a sentential form derived from
    /// the initial nonterminal, with `End` standing for the input end.
    pub fn follow_sets(&self) -> BTreeMap<N, BTreeSet<Lookahead<T>>> {
        let first = self.first_sets();
        let mut follow: BTreeMap<N, BTreeSet<Lookahead<T>>> = self
            .nonterminals()
            .iter()
            .map(|n| (n.clone(), BTreeSet::new()))
            .collect();
        if let Some(entry) = follow.get_mut(self.initial()) {
            entry.insert(Lookahead::End);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for rule in self.rules() {
                let body = &rule.composition.composition;
                for (position, letter) in body.iter().enumerate() {
                    let n = match letter {
                        Letter::Nt(n) => n,
                        Letter::T(_) => continue,
                    };

                    let rest_first = first_of_word(&body[position + 1..], &first);
                    let mut additions: BTreeSet<Lookahead<T>> = rest_first
                        .iter()
                        .filter_map(|item| match item {
                            FirstItem::Terminal(t) => Some(Lookahead::Terminal(t.clone())),
                            FirstItem::Epsilon => None,
                        })
                        .collect();
                    if rest_first.contains(&FirstItem::Epsilon) {
                        additions.extend(follow[&rule.head].iter().cloned());
                    }

                    if let Some(entry) = follow.get_mut(n) {
                        let before = entry.len();
                        entry.extend(additions);
                        changed |= entry.len() > before;
                    }
                }
            }
        }

        follow
    }
}

/// The FIRST set of a sentential form, given FIRST sets for the
/// nonterminals.  Contains ε iff every letter of the form is nullable.
pub(crate) fn first_of_word<N, T>(
    word: &[Letter<N, T>],
    first: &BTreeMap<N, BTreeSet<FirstItem<T>>>,
) -> BTreeSet<FirstItem<T>>
where
    N: Ord + Clone,
    T: Ord + Clone,
{
    let mut result = BTreeSet::new();

    for letter in word {
        match letter {
            Letter::T(t) => {
                result.insert(FirstItem::Terminal(t.clone()));
                return result;
            }
            Letter::Nt(n) => {
                let mut epsilon = false;
                if let Some(entry) = first.get(n) {
                    for item in entry {
                        match item {
                            FirstItem::Epsilon => epsilon = true,
                            FirstItem::Terminal(t) => {
                                result.insert(FirstItem::Terminal(t.clone()));
                            }
                        }
                    }
                }
                if !epsilon {
                    return result;
                }
            }
        }
    }

    result.insert(FirstItem::Epsilon);
    result
}

impl<T> Display for FirstItem<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FirstItem::Epsilon => write!(f, "ε"),
            FirstItem::Terminal(t) => write!(f, "{}", t),
        }
    }
}

impl<T> Display for Lookahead<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Lookahead::Terminal(t) => write!(f, "{}", t),
            Lookahead::End => write!(f, "$"),
        }
    }
}
