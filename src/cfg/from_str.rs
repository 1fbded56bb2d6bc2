use nom::{is_space, IResult};
use std::fmt::Debug;
use std::str::FromStr;

use crate::cfg::{Cfg, CfgRule, Composition, Letter};
use crate::util::parsing::*;

/// Reads a grammar from its textual form, e.g.
///
/// ```text
/// initial: S
/// S → [Nt A, T b]
/// A → [T a]
/// A → []
/// ```
impl<N, T> FromStr for Cfg<N, T>
where
    N: Ord + Clone + Debug + FromStr,
    N::Err: Debug,
    T: Ord + Clone + Debug + FromStr,
    T::Err: Debug,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut initial: Option<N> = None;
        let mut rules: Vec<CfgRule<N, T>> = Vec::new();

        for line in s.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') {
                continue;
            }
            let bytes = trimmed.as_bytes();

            if let IResult::Done(_, n) = parse_field(bytes, "initial", parse_token) {
                initial = Some(n);
            } else {
                rules.push(trimmed.parse()?);
            }
        }

        let initial = initial.ok_or_else(|| String::from("Missing \'initial:\' declaration"))?;

        Cfg::new(initial, rules).map_err(|e| e.to_string())
    }
}

impl<N, T> FromStr for CfgRule<N, T>
where
    N: FromStr,
    N::Err: Debug,
    T: Clone + FromStr,
    T::Err: Debug,
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cfg_rule(s.as_bytes()) {
            IResult::Done(_, result) => Ok(result),
            _ => Err(format!("Could not parse \'{}\'", s)),
        }
    }
}

fn parse_cfg_rule<N, T>(input: &[u8]) -> IResult<&[u8], CfgRule<N, T>>
where
    N: FromStr,
    N::Err: Debug,
    T: FromStr,
    T::Err: Debug,
{
    do_parse!(
        input,
        head: parse_token
            >> take_while!(is_space)
            >> call!(parse_arrow)
            >> take_while!(is_space)
            >> composition: parse_composition
            >> take_while!(is_space)
            >> opt!(complete!(parse_comment))
            >> (CfgRule {
                head,
                composition: Composition { composition },
            })
    )
}

fn parse_letter<N, T>(input: &[u8]) -> IResult<&[u8], Letter<N, T>>
where
    N: FromStr,
    N::Err: Debug,
    T: FromStr,
    T::Err: Debug,
{
    do_parse!(
        input,
        result:
            alt!(
                do_parse!(
                    tag!("Nt")
                        >> take_while!(is_space)
                        >> token: parse_token
                        >> (Letter::Nt(token))
                ) | do_parse!(
                    tag!("T")
                        >> take_while!(is_space)
                        >> token: parse_token
                        >> (Letter::T(token))
                )
            )
            >> (result)
    )
}

fn parse_composition<N, T>(input: &[u8]) -> IResult<&[u8], Vec<Letter<N, T>>>
where
    N: FromStr,
    N::Err: Debug,
    T: FromStr,
    T::Err: Debug,
{
    parse_vec(input, parse_letter, "[", "]", ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rules() {
        let rule: CfgRule<String, String> = "S → [Nt A, T b] % a comment".parse().unwrap();

        assert_eq!(rule.head, "S");
        assert_eq!(
            rule.composition.composition,
            vec![
                Letter::Nt(String::from("A")),
                Letter::T(String::from("b")),
            ]
        );
    }

    #[test]
    fn parses_epsilon_rules() {
        let rule: CfgRule<String, String> = "A → []".parse().unwrap();
        assert!(rule.composition.composition.is_empty());
    }

    #[test]
    fn parses_and_redisplays() {
        let grammar: Cfg<String, String> = "initial: S\n\
             % a toy grammar\n\
             S → [Nt A, T b]\n\
             A → [T a]\n\
             A → []\n"
            .parse()
            .unwrap();

        let reparsed: Cfg<String, String> = grammar.to_string().parse().unwrap();
        assert_eq!(grammar, reparsed);
    }

    #[test]
    fn rejects_malformed_rules() {
        let rule: Result<CfgRule<String, String>, _> = "S → Nt A".parse();
        assert!(rule.is_err());
    }
}
