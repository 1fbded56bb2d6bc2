use nom::{anychar, is_space, IResult};
use std::fmt::Debug;
use std::str::{from_utf8, FromStr};

/// Parses a token (a state, a terminal symbol, a stack symbol, or a
/// nonterminal).  A *token* can be of one of the following two forms:
///
/// * It is a string containing neither of the symbols `'"'`, `' '`, `'-'`, `'→'`, `','`, `';'`, `']'`.
/// * It is delimited by the symbol `'"'` on both sides and each occurrence of `'\\'` or `'"'` inside the delimiters is escaped.
pub fn parse_token<A>(input: &[u8]) -> IResult<&[u8], A>
where
    A: FromStr,
    A::Err: Debug,
{
    named!(
        parse_token_s<&str>,
        map_res!(
            alt!(
                delimited!(
                    char!('\"'),
                    escaped!(is_not!("\\\""), '\\', anychar),
                    char!('\"')
                ) |
                is_not!(" \"-→,;]")
            ),
            from_utf8
        )
    );

    parse_token_s(input).map(|x| x.parse().unwrap())
}

/// Parses the `input` into a `Vec<A>` given an `inner_parser` for type `A`, an `opening` delimiter, a `closing` delimiter, and a `separator`.
/// The `inner_parser` must not consume the `separator`s or the `closing` delimiter of the given `input`.
pub fn parse_vec<'a, A, P>(
    input: &'a [u8],
    inner_parser: P,
    opening: &str,
    closing: &str,
    separator: &str,
) -> IResult<&'a [u8], Vec<A>>
where
    P: Fn(&'a [u8]) -> IResult<&'a [u8], A>,
{
    do_parse!(
        input,
        tag!(opening) >>
            take_while!(is_space) >>
            result: many0!(
                do_parse!(
                    opt!(tag!(separator)) >>
                        take_while!(is_space) >>
                        the_token: inner_parser >>
                        take_while!(is_space) >>
                        (the_token)
                )
            ) >>
            tag!(closing) >>
            (result)
    )
}

/// Parses a `'%'`-comment, i.e. the rest of the line.
pub fn parse_comment(input: &[u8]) -> IResult<&[u8], ()> {
    do_parse!(input, tag!("%") >> take_while!(|_| true) >> (()))
}

/// Parses the rule arrow, in both its unicode and its ASCII spelling.
pub fn parse_arrow(input: &[u8]) -> IResult<&[u8], ()> {
    do_parse!(input, alt!(tag!("→") | tag!("->")) >> (()))
}

/// Parses either a token or the symbol `'ε'`; the latter is returned as
/// `None` and stands for a transition that does not read input.
pub fn parse_symbol_or_epsilon<A>(input: &[u8]) -> IResult<&[u8], Option<A>>
where
    A: FromStr,
    A::Err: Debug,
{
    alt!(
        input,
        tag!("ε") => { |_| None } |
        call!(parse_token) => { |t| Some(t) }
    )
}

/// Parses a header line of the form `<name>: <value>`, where the value
/// is read by `inner_parser`.
pub fn parse_field<'a, A, P>(input: &'a [u8], name: &str, inner_parser: P) -> IResult<&'a [u8], A>
where
    P: Fn(&'a [u8]) -> IResult<&'a [u8], A>,
{
    do_parse!(
        input,
        tag!(name) >>
            tag!(":") >>
            take_while!(is_space) >>
            value: inner_parser >>
            take_while!(is_space) >>
            opt!(complete!(parse_comment)) >>
            (value)
    )
}
