use nom::{
    branch::alt,
    character::complete::{char, digit1},
    combinator::{all_consuming, map, map_res, value},
    sequence::separated_pair,
    IResult,
};
use obl_protocol::{RowId, TokenId};

fn number(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>())(input)
}

/// `n`, `n-m` or `n.m`. Ranges and empty nodes are tried first since they
/// share the leading number with plain words.
fn row_id(input: &str) -> IResult<&str, RowId> {
    alt((
        map(separated_pair(number, char('-'), number), |(s, e)| {
            RowId::Range(s, e)
        }),
        map(separated_pair(number, char('.'), number), |(w, n)| {
            RowId::Empty(w, n)
        }),
        map(number, |n| RowId::Word(TokenId(n))),
    ))(input)
}

fn head(input: &str) -> IResult<&str, Option<TokenId>> {
    alt((
        value(None, char('_')),
        map(number, |n| Some(TokenId(n))),
    ))(input)
}

pub fn parse_row_id(field: &str) -> Option<RowId> {
    all_consuming(row_id)(field).ok().map(|(_, id)| id)
}

pub fn parse_head(field: &str) -> Option<Option<TokenId>> {
    all_consuming(head)(field).ok().map(|(_, h)| h)
}
