use std::collections::BTreeSet;
use std::fmt::{Debug, Display};

use crate::errors::StructuralError;
use crate::cfg::{Cfg, CfgRule, Letter};

impl<N, T> Cfg<N, T>
where
    N: Ord + Clone + Debug + Display,
    T: Ord + Clone + Debug + Display,
{
    /// True iff every rule has one of the Chomsky normal forms
    /// `A → B C`, `A → a`, or `S → ε` for the initial nonterminal `S`.
    /// With an ε-rule for `S` present, `S` must not occur on any
    /// right-hand side.
    pub fn is_chomsky_normal_form(&self) -> bool {
        self.chomsky_normal_form_offender().is_none()
    }

    /// The first rule violating Chomsky normal form, if any.
    fn chomsky_normal_form_offender(&self) -> Option<&CfgRule<N, T>> {
        let initial_epsilon = self
            .rules()
            .iter()
            .any(|rule| rule.head == *self.initial() && rule.composition.composition.is_empty());

        self.rules().iter().find(|rule| {
            let normal_form = match rule.composition.composition.as_slice() {
                [Letter::Nt(left), Letter::Nt(right)] => {
                    !initial_epsilon || (left != self.initial() && right != self.initial())
                }
                [Letter::T(_)] => true,
                [] => rule.head == *self.initial(),
                _ => false,
            };
            !normal_form
        })
    }

    /// CYK membership test for grammars in Chomsky normal form.  The
    /// table entry for a span holds all nonterminals deriving that
    /// span; spans are filled shortest first.
    pub fn cyk_recognise(&self, word: &[T]) -> Result<bool, StructuralError> {
        if let Some(rule) = self.chomsky_normal_form_offender() {
            return Err(StructuralError::NotChomskyNormalForm(rule.to_string()));
        }

        if word.is_empty() {
            return Ok(self.nullable().contains(self.initial()));
        }

        let n = word.len();
        // table[length - 1][start]: nonterminals deriving word[start..start + length]
        let mut table: Vec<Vec<BTreeSet<N>>> = (0..n)
            .map(|length| vec![BTreeSet::new(); n - length])
            .collect();

        for (start, t) in word.iter().enumerate() {
            for rule in self.rules() {
                if let [Letter::T(symbol)] = rule.composition.composition.as_slice() {
                    if symbol == t {
                        table[0][start].insert(rule.head.clone());
                    }
                }
            }
        }

        for length in 2..=n {
            for start in 0..=n - length {
                for split in 1..length {
                    for rule in self.rules() {
                        if let [Letter::Nt(left), Letter::Nt(right)] =
                            rule.composition.composition.as_slice()
                        {
                            if table[split - 1][start].contains(left)
                                && table[length - split - 1][start + split].contains(right)
                            {
                                table[length - 1][start].insert(rule.head.clone());
                            }
                        }
                    }
                }
            }
        }

        Ok(table[n - 1][0].contains(self.initial()))
    }
}
