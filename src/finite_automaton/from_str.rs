use nom::{is_space, IResult};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::str::FromStr;

use crate::finite_automaton::FiniteAutomaton;
use crate::util::parsing::*;

/// Reads a finite automaton from its textual form, e.g.
///
/// ```text
/// states: [q0, q1]     % optional, inferred when absent
/// initial: q0
/// final: [q1]
/// q0, a → [q1]
/// q1, ε → [q0]
/// ```
impl<Q, T> FromStr for FiniteAutomaton<Q, T>
where
    Q: Ord + Clone + Debug + FromStr,
    Q::Err: Debug,
    T: Ord + Clone + Debug + FromStr,
    T::Err: Debug,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut declared_states: Option<BTreeSet<Q>> = None;
        let mut initial: Option<Q> = None;
        let mut finals: Option<BTreeSet<Q>> = None;
        let mut transitions: Vec<(Q, Option<T>, Q)> = Vec::new();

        for line in s.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            let bytes = trimmed.as_bytes();

            if let IResult::Done(_, states) =
                parse_field(bytes, "states", |i| parse_vec(i, parse_token, "[", "]", ","))
            {
                declared_states = Some(states.into_iter().collect());
            } else if let IResult::Done(_, q) = parse_field(bytes, "initial", parse_token) {
                initial = Some(q);
            } else if let IResult::Done(_, qs) =
                parse_field(bytes, "final", |i| parse_vec(i, parse_token, "[", "]", ","))
            {
                finals = Some(qs.into_iter().collect());
            } else if let IResult::Done(_, triples) = parse_fa_transition(bytes) {
                transitions.extend(triples);
            } else {
                return Err(format!("Could not parse \'{}\'", trimmed));
            }
        }

        let initial = initial.ok_or_else(|| String::from("Missing \'initial:\' declaration"))?;
        let finals = finals.ok_or_else(|| String::from("Missing \'final:\' declaration"))?;

        let states = match declared_states {
            Some(states) => states,
            None => {
                let mut states = BTreeSet::new();
                states.insert(initial.clone());
                states.extend(finals.iter().cloned());
                for (source, _, target) in &transitions {
                    states.insert(source.clone());
                    states.insert(target.clone());
                }
                states
            }
        };

        let alphabet: BTreeSet<T> = transitions
            .iter()
            .filter_map(|(_, symbol, _)| symbol.clone())
            .collect();

        FiniteAutomaton::new(states, alphabet, transitions, initial, finals)
            .map_err(|e| e.to_string())
    }
}

/// Parses `q, a → [p1, p2]` into one triple per target state; the
/// symbol position also accepts `ε`.
fn parse_fa_transition<Q, T>(input: &[u8]) -> IResult<&[u8], Vec<(Q, Option<T>, Q)>>
where
    Q: Clone + FromStr,
    Q::Err: Debug,
    T: Clone + FromStr,
    T::Err: Debug,
{
    do_parse!(
        input,
        source: parse_token
            >> take_while!(is_space)
            >> tag!(",")
            >> take_while!(is_space)
            >> symbol: parse_symbol_or_epsilon
            >> take_while!(is_space)
            >> call!(parse_arrow)
            >> take_while!(is_space)
            >> targets: call!(|i| parse_vec(i, parse_token, "[", "]", ","))
            >> take_while!(is_space)
            >> opt!(complete!(parse_comment))
            >> ({
                let source: Q = source;
                let symbol: Option<T> = symbol;
                targets
                    .into_iter()
                    .map(|target: Q| (source.clone(), symbol.clone(), target))
                    .collect()
            })
    )
}
