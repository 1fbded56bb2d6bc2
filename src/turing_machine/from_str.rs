use nom::{is_space, IResult};
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::str::FromStr;

use crate::turing_machine::{Move, TuringMachine};
use crate::util::parsing::*;

/// Reads a Turing machine from its textual form, e.g.
///
/// ```text
/// initial: q0
/// blank: _
/// accept: qa
/// reject: qr
/// q0, 1 → q0, 1, R
/// ```
impl<Q, T> FromStr for TuringMachine<Q, T>
where
    Q: Ord + Clone + Debug + FromStr,
    Q::Err: Debug,
    T: Ord + Clone + Debug + FromStr,
    T::Err: Debug,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut declared_states: Option<BTreeSet<Q>> = None;
        let mut declared_symbols: Option<BTreeSet<T>> = None;
        let mut initial: Option<Q> = None;
        let mut blank: Option<T> = None;
        let mut accept: Option<Q> = None;
        let mut reject: Option<Q> = None;
        let mut transitions: Vec<(Q, T, Q, T, Move)> = Vec::new();

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
            } else if let IResult::Done(_, q) = parse_field(bytes, "initial", parse_token) {
                initial = Some(q);
            } else if let IResult::Done(_, t) = parse_field(bytes, "blank", parse_token) {
                blank = Some(t);
            } else if let IResult::Done(_, q) = parse_field(bytes, "accept", parse_token) {
                accept = Some(q);
            } else if let IResult::Done(_, q) = parse_field(bytes, "reject", parse_token) {
                reject = Some(q);
            } else if let IResult::Done(_, transition) = parse_tm_transition(bytes) {
                transitions.push(transition);
            } else {
                return Err(format!("Could not parse \'{}\'", trimmed));
            }
        }

        let initial = initial.ok_or_else(|| String::from("Missing \'initial:\' declaration"))?;
        let blank = blank.ok_or_else(|| String::from("Missing \'blank:\' declaration"))?;
        let accept = accept.ok_or_else(|| String::from("Missing \'accept:\' declaration"))?;
        let reject = reject.ok_or_else(|| String::from("Missing \'reject:\' declaration"))?;

        let states = declared_states.unwrap_or_else(|| {
            let mut states = BTreeSet::new();
            states.insert(initial.clone());
            states.insert(accept.clone());
            states.insert(reject.clone());
            for (source, _, target, _, _) in &transitions {
                states.insert(source.clone());
                states.insert(target.clone());
            }
            states
        });

        let tape_alphabet = declared_symbols.unwrap_or_else(|| {
            let mut symbols = BTreeSet::new();
            symbols.insert(blank.clone());
            for (_, read, _, write, _) in &transitions {
                symbols.insert(read.clone());
                symbols.insert(write.clone());
            }
            symbols
        });

        TuringMachine::new(
            states,
            tape_alphabet,
            blank,
            transitions,
            initial,
            accept,
            reject,
        )
        .map_err(|e| e.to_string())
    }
}

fn parse_move(input: &[u8]) -> IResult<&[u8], Move> {
    alt!(
        input,
        tag!("L") => { |_| Move::Left } |
        tag!("R") => { |_| Move::Right }
    )
}

/// Parses `q, a → p, b, R`.
fn parse_tm_transition<Q, T>(input: &[u8]) -> IResult<&[u8], (Q, T, Q, T, Move)>
where
    Q: FromStr,
    Q::Err: Debug,
    T: FromStr,
    T::Err: Debug,
{
    do_parse!(
        input,
        source: parse_token
            >> take_while!(is_space)
            >> tag!(",")
            >> take_while!(is_space)
            >> read: parse_token
            >> take_while!(is_space)
            >> call!(parse_arrow)
            >> take_while!(is_space)
            >> target: parse_token
            >> take_while!(is_space)
            >> tag!(",")
            >> take_while!(is_space)
            >> write: parse_token
            >> take_while!(is_space)
            >> tag!(",")
            >> take_while!(is_space)
            >> direction: parse_move
            >> take_while!(is_space)
            >> opt!(complete!(parse_comment))
            >> ((source, read, target, write, direction))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_redisplays() {
        let machine: TuringMachine<String, String> = "initial: q0\n\
             blank: _\n\
             accept: qa\n\
             reject: qr\n\
             q0, 1 → q0, 1, R\n\
             q0, _ → qa, _, L\n"
            .parse()
            .unwrap();

        let reparsed: TuringMachine<String, String> = machine.to_string().parse().unwrap();
        assert_eq!(machine, reparsed);
    }

    #[test]
    fn rejects_unknown_directions() {
        let machine: Result<TuringMachine<String, String>, _> = "initial: q0\n\
             blank: _\n\
             accept: qa\n\
             reject: qr\n\
             q0, 1 → q0, 1, X\n"
            .parse();
        assert!(machine.is_err());
    }

    #[test]
    fn duplicate_rules_fail_to_parse() {
        let machine: Result<TuringMachine<String, String>, _> = "initial: q0\n\
             blank: _\n\
             accept: qa\n\
             reject: qr\n\
             q0, 1 → qa, 1, R\n\
             q0, 1 → qr, 1, L\n"
            .parse();
        assert!(machine.is_err());
    }
}
