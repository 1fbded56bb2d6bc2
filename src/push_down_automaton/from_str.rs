use nom::{is_space, IResult};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::str::FromStr;

use crate::push_down_automaton::{PushDownAutomaton, PushDownInstruction};
use crate::recognisable::Transition;
use crate::util::parsing::*;

/// Reads a push-down automaton from its textual form, e.g.
///
/// ```text
/// initial: q0
/// stack: Z
/// final: [q1]
/// q0, (, Z → q0, [A, Z]
/// q0, ε, Z → q1, [Z]
/// ```
///
/// The pushed symbols are listed topmost first.  As for finite
/// automata, `states:`, `symbols:`, and `stack-symbols:` headers are
/// accepted but inferred from the transitions when absent.
impl<Q, T, S> FromStr for PushDownAutomaton<Q, T, S>
where
    Q: Ord + Clone + Debug + FromStr,
    Q::Err: Debug,
    T: Ord + Clone + Debug + FromStr,
    T::Err: Debug,
    S: Ord + Clone + Debug + FromStr,
    S::Err: Debug,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut declared_states: Option<BTreeSet<Q>> = None;
        let mut declared_symbols: Option<BTreeSet<T>> = None;
        let mut declared_stack_symbols: Option<BTreeSet<S>> = None;
        let mut initial: Option<Q> = None;
        let mut initial_stack_symbol: Option<S> = None;
        let mut finals: Option<BTreeSet<Q>> = None;
        let mut transitions: Vec<Transition<PushDownInstruction<Q, S>, T>> = Vec::new();

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
            } else if let IResult::Done(_, symbols) =
                parse_field(bytes, "symbols", |i| parse_vec(i, parse_token, "[", "]", ","))
            {
                declared_symbols = Some(symbols.into_iter().collect());
            } else if let IResult::Done(_, symbols) = parse_field(bytes, "stack-symbols", |i| {
                parse_vec(i, parse_token, "[", "]", ",")
            }) {
                declared_stack_symbols = Some(symbols.into_iter().collect());
            } else if let IResult::Done(_, q) = parse_field(bytes, "initial", parse_token) {
                initial = Some(q);
            } else if let IResult::Done(_, z) = parse_field(bytes, "stack", parse_token) {
                initial_stack_symbol = Some(z);
            } else if let IResult::Done(_, qs) =
                parse_field(bytes, "final", |i| parse_vec(i, parse_token, "[", "]", ","))
            {
                finals = Some(qs.into_iter().collect());
            } else if let IResult::Done(_, transition) = parse_pda_transition(bytes) {
                transitions.push(transition);
            } else {
                return Err(format!("Could not parse \'{}\'", trimmed));
            }
        }

        let initial = initial.ok_or_else(|| String::from("Missing \'initial:\' declaration"))?;
        let initial_stack_symbol =
            initial_stack_symbol.ok_or_else(|| String::from("Missing \'stack:\' declaration"))?;
        let finals = finals.ok_or_else(|| String::from("Missing \'final:\' declaration"))?;

        let states = declared_states.unwrap_or_else(|| {
            let mut states = BTreeSet::new();
            states.insert(initial.clone());
            states.extend(finals.iter().cloned());
            for transition in &transitions {
                states.insert(transition.instruction.source.clone());
                states.insert(transition.instruction.target.clone());
            }
            states
        });

        let input_alphabet = declared_symbols.unwrap_or_else(|| {
            transitions
                .iter()
                .flat_map(|transition| transition.word.iter().cloned())
                .collect()
        });

        let stack_alphabet = declared_stack_symbols.unwrap_or_else(|| {
            let mut symbols = BTreeSet::new();
            symbols.insert(initial_stack_symbol.clone());
            for transition in &transitions {
                symbols.insert(transition.instruction.pop.clone());
                symbols.extend(transition.instruction.push.iter().cloned());
            }
            symbols
        });

        PushDownAutomaton::new(
            states,
            input_alphabet,
            stack_alphabet,
            transitions,
            initial,
            initial_stack_symbol,
            finals,
        )
        .map_err(|e| e.to_string())
    }
}

/// Parses `q, a, Z → p, [A, Z]`; the read symbol may be `ε`.
fn parse_pda_transition<Q, T, S>(
    input: &[u8],
) -> IResult<&[u8], Transition<PushDownInstruction<Q, S>, T>>
where
    Q: Clone + FromStr,
    Q::Err: Debug,
    T: Clone + FromStr,
    T::Err: Debug,
    S: Clone + FromStr,
    S::Err: Debug,
{
    do_parse!(
        input,
        source: parse_token
            >> take_while!(is_space)
            >> tag!(",")
            >> take_while!(is_space)
            >> symbol: parse_symbol_or_epsilon
            >> take_while!(is_space)
            >> tag!(",")
            >> take_while!(is_space)
            >> pop: parse_token
            >> take_while!(is_space)
            >> call!(parse_arrow)
            >> take_while!(is_space)
            >> target: parse_token
            >> take_while!(is_space)
            >> tag!(",")
            >> take_while!(is_space)
            >> push: call!(|i| parse_vec(i, parse_token, "[", "]", ","))
            >> take_while!(is_space)
            >> opt!(complete!(parse_comment))
            >> (Transition {
                word: symbol.into_iter().collect(),
                instruction: PushDownInstruction {
                    source,
                    target,
                    pop,
                    push,
                },
            })
    )
}
