use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Debug, Display};

use thiserror::Error;

use crate::cfg::analysis::{first_of_word, FirstItem, Lookahead};
use crate::cfg::{Cfg, Letter};

/// Predictive parsing table.  Each entry names the rule (by index into
/// `Cfg::rules`) to expand a nonterminal with under a lookahead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ll1Table<N, T>
where
    N: Ord,
    T: Ord,
{
    entries: BTreeMap<(N, Lookahead<T>), usize>,
}

/// Two rules competing for the same table entry.  The rule indices are
/// ordered, so a conflict is reported once regardless of the order the
/// rules were visited in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Conflict<N, T> {
    pub nonterminal: N,
    pub lookahead: Lookahead<T>,
    pub rules: (usize, usize),
}

/// Failure of a predictive parse.  The word is not in the language of
/// the grammar, or the table had no prediction for it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SyntaxError<N, T>
where
    N: Debug,
    T: Debug,
{
    #[error("expected {expected:?} but found {found:?}")]
    UnexpectedSymbol { expected: T, found: Lookahead<T> },
    #[error("no prediction for nonterminal {nonterminal:?} under lookahead {lookahead:?}")]
    MissingEntry {
        nonterminal: N,
        lookahead: Lookahead<T>,
    },
    #[error("input continues with {found:?} after the parse finished")]
    TrailingInput { found: T },
}

/// Node of a parse tree; children are indices into the owning
/// `ParseTree`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseNode<N, T> {
    Nonterminal {
        label: N,
        rule: usize,
        children: Vec<usize>,
    },
    Terminal(T),
}

/// Parse tree in arena form.  The root is node `0` and is labelled
/// with the initial nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseTree<N, T> {
    nodes: Vec<ParseNode<N, T>>,
}

impl<N, T> Ll1Table<N, T>
where
    N: Ord,
    T: Ord,
{
    pub fn lookup(&self, nonterminal: &N, lookahead: &Lookahead<T>) -> Option<usize>
    where
        N: Clone,
        T: Clone,
    {
        self.entries
            .get(&(nonterminal.clone(), lookahead.clone()))
            .copied()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&N, &Lookahead<T>, usize)> + '_ {
        self.entries
            .iter()
            .map(|((nonterminal, lookahead), rule)| (nonterminal, lookahead, *rule))
    }
}

impl<N, T> ParseTree<N, T> {
    pub fn root(&self) -> &ParseNode<N, T> {
        &self.nodes[0]
    }

    pub fn node(&self, index: usize) -> &ParseNode<N, T> {
        &self.nodes[index]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The terminal leaves in left-to-right order; equals the parsed
    /// word.
    pub fn leaves(&self) -> Vec<&T> {
        let mut leaves = Vec::new();
        self.collect_leaves(0, &mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, index: usize, leaves: &mut Vec<&'a T>) {
        match &self.nodes[index] {
            ParseNode::Terminal(t) => leaves.push(t),
            ParseNode::Nonterminal { children, .. } => {
                for &child in children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }
}

impl<N, T> Cfg<N, T>
where
    N: Ord + Clone + Debug,
    T: Ord + Clone + Debug,
{
    /// Builds the LL(1) table, or reports every conflicting entry.  A
    /// rule claims the entry `(head, t)` for each terminal `t` in the
    /// FIRST set of its body; a rule with a nullable body additionally
    /// claims `(head, l)` for each lookahead `l` in FOLLOW(head).
    pub fn ll1_table(&self) -> Result<Ll1Table<N, T>, BTreeSet<Conflict<N, T>>> {
        let first = self.first_sets();
        let follow = self.follow_sets();

        let mut entries: BTreeMap<(N, Lookahead<T>), usize> = BTreeMap::new();
        let mut conflicts: BTreeSet<Conflict<N, T>> = BTreeSet::new();

        for (index, rule) in self.rules().iter().enumerate() {
            let body_first = first_of_word(&rule.composition.composition, &first);

            let mut claims: BTreeSet<Lookahead<T>> = body_first
                .iter()
                .filter_map(|item| match item {
                    FirstItem::Terminal(t) => Some(Lookahead::Terminal(t.clone())),
                    FirstItem::Epsilon => None,
                })
                .collect();
            if body_first.contains(&FirstItem::Epsilon) {
                claims.extend(follow[&rule.head].iter().cloned());
            }

            for lookahead in claims {
                let key = (rule.head.clone(), lookahead.clone());
                if let Some(&previous) = entries.get(&key) {
                    conflicts.insert(Conflict {
                        nonterminal: rule.head.clone(),
                        lookahead,
                        rules: (previous.min(index), previous.max(index)),
                    });
                } else {
                    entries.insert(key, index);
                }
            }
        }

        if conflicts.is_empty() {
            Ok(Ll1Table { entries })
        } else {
            Err(conflicts)
        }
    }

    /// Predictive parse of `word` with `table`, producing the parse
    /// tree.  The stack holds pairs of a letter still to match and the
    /// tree node reserved for it.
    pub fn parse(
        &self,
        table: &Ll1Table<N, T>,
        word: &[T],
    ) -> Result<ParseTree<N, T>, SyntaxError<N, T>> {
        let mut nodes: Vec<ParseNode<N, T>> = vec![ParseNode::Nonterminal {
            label: self.initial().clone(),
            rule: 0,
            children: Vec::new(),
        }];
        let mut stack: Vec<(Letter<N, T>, usize)> =
            vec![(Letter::Nt(self.initial().clone()), 0)];
        let mut position = 0;

        while let Some((letter, node)) = stack.pop() {
            match letter {
                Letter::T(expected) => {
                    match word.get(position) {
                        Some(t) if *t == expected => {
                            position += 1;
                        }
                        Some(t) => {
                            return Err(SyntaxError::UnexpectedSymbol {
                                expected,
                                found: Lookahead::Terminal(t.clone()),
                            })
                        }
                        None => {
                            return Err(SyntaxError::UnexpectedSymbol {
                                expected,
                                found: Lookahead::End,
                            })
                        }
                    }
                }
                Letter::Nt(nonterminal) => {
                    let lookahead = match word.get(position) {
                        Some(t) => Lookahead::Terminal(t.clone()),
                        None => Lookahead::End,
                    };
                    let rule_index = table.lookup(&nonterminal, &lookahead).ok_or_else(|| {
                        SyntaxError::MissingEntry {
                            nonterminal: nonterminal.clone(),
                            lookahead,
                        }
                    })?;

                    let body = &self.rules()[rule_index].composition.composition;
                    let mut children = Vec::with_capacity(body.len());
                    for letter in body {
                        let child = nodes.len();
                        children.push(child);
                        nodes.push(match letter {
                            Letter::T(t) => ParseNode::Terminal(t.clone()),
                            Letter::Nt(n) => ParseNode::Nonterminal {
                                label: n.clone(),
                                rule: 0,
                                children: Vec::new(),
                            },
                        });
                    }

                    nodes[node] = ParseNode::Nonterminal {
                        label: nonterminal,
                        rule: rule_index,
                        children: children.clone(),
                    };

                    for (letter, child) in body.iter().cloned().zip(children).rev() {
                        stack.push((letter, child));
                    }
                }
            }
        }

        match word.get(position) {
            Some(t) => Err(SyntaxError::TrailingInput { found: t.clone() }),
            None => Ok(ParseTree { nodes }),
        }
    }
}

impl<N, T> Display for Conflict<N, T>
where
    N: Display,
    T: Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "rules {} and {} both claim ({}, {})",
            self.rules.0, self.rules.1, self.nonterminal, self.lookahead
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expression_grammar() -> Cfg<String, String> {
        "initial: E\n\
         E → [Nt T, Nt E1]\n\
         E1 → [T +, Nt T, Nt E1]\n\
         E1 → []\n\
         T → [T id]\n"
            .parse()
            .unwrap()
    }

    fn word(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn builds_a_conflict_free_table() {
        let grammar = expression_grammar();
        let table = grammar.ll1_table().unwrap();

        assert_eq!(
            table.lookup(
                &String::from("E1"),
                &Lookahead::Terminal(String::from("+"))
            ),
            Some(1)
        );
        assert_eq!(table.lookup(&String::from("E1"), &Lookahead::End), Some(2));
        assert_eq!(
            table.lookup(
                &String::from("E"),
                &Lookahead::Terminal(String::from("id"))
            ),
            Some(0)
        );
    }

    #[test]
    fn parses_an_expression() {
        let grammar = expression_grammar();
        let table = grammar.ll1_table().unwrap();

        let tree = grammar.parse(&table, &word(&["id", "+", "id"])).unwrap();
        assert_eq!(tree.leaves(), vec!["id", "+", "id"]);

        match tree.root() {
            ParseNode::Nonterminal { label, rule, children } => {
                assert_eq!(label, "E");
                assert_eq!(*rule, 0);
                assert_eq!(children.len(), 2);
            }
            ParseNode::Terminal(_) => panic!("root must be a nonterminal"),
        }
    }

    #[test]
    fn reports_missing_predictions() {
        let grammar = expression_grammar();
        let table = grammar.ll1_table().unwrap();

        assert_eq!(
            grammar.parse(&table, &word(&["+"])).err(),
            Some(SyntaxError::MissingEntry {
                nonterminal: String::from("E"),
                lookahead: Lookahead::Terminal(String::from("+")),
            })
        );
    }

    #[test]
    fn reports_truncated_input() {
        let grammar = expression_grammar();
        let table = grammar.ll1_table().unwrap();

        assert_eq!(
            grammar.parse(&table, &word(&["id", "+"])).err(),
            Some(SyntaxError::MissingEntry {
                nonterminal: String::from("T"),
                lookahead: Lookahead::End,
            })
        );
    }

    #[test]
    fn reports_unexpected_symbols() {
        let grammar: Cfg<String, String> = "initial: S\n\
             S → [T a, T b]\n"
            .parse()
            .unwrap();
        let table = grammar.ll1_table().unwrap();

        assert_eq!(
            grammar.parse(&table, &word(&["a", "a"])).err(),
            Some(SyntaxError::UnexpectedSymbol {
                expected: String::from("b"),
                found: Lookahead::Terminal(String::from("a")),
            })
        );
    }

    #[test]
    fn reports_trailing_input() {
        let grammar: Cfg<String, String> = "initial: S\n\
             S → [T a]\n"
            .parse()
            .unwrap();
        let table = grammar.ll1_table().unwrap();

        assert_eq!(
            grammar.parse(&table, &word(&["a", "a"])).err(),
            Some(SyntaxError::TrailingInput {
                found: String::from("a"),
            })
        );
    }

    #[test]
    fn ambiguous_choices_conflict() {
        let grammar: Cfg<String, String> = "initial: S\n\
             S → [Nt A]\n\
             S → [Nt B]\n\
             A → [T a]\n\
             B → [T a]\n"
            .parse()
            .unwrap();

        let conflicts = grammar.ll1_table().unwrap_err();
        assert_eq!(conflicts.len(), 1);

        let conflict = conflicts.iter().next().unwrap();
        assert_eq!(conflict.nonterminal, "S");
        assert_eq!(conflict.lookahead, Lookahead::Terminal(String::from("a")));
        assert_eq!(conflict.rules, (0, 1));
    }

    #[test]
    fn left_recursive_grammars_conflict() {
        let grammar: Cfg<String, String> = "initial: E\n\
             E → [Nt E, T +, Nt T]\n\
             E → [Nt T]\n\
             T → [T id]\n"
            .parse()
            .unwrap();

        assert!(grammar.ll1_table().is_err());
    }
}
