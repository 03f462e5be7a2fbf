use nom::{
    bytes::complete::take_till,
    character::complete::char,
    multi::separated_list0,
    IResult,
};

/// Word boundary: a single ASCII space, nothing else.
const SEPARATOR: char = ' ';

fn words(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list0(char(SEPARATOR), take_till(|c| c == SEPARATOR))(input)
}

/// Splits `input` at every space. Runs of spaces produce empty words and
/// leading/trailing spaces produce empty words at the ends.
pub fn split_words(input: &str) -> Vec<&str> {
    match words(input) {
        Ok((rest, parts)) if rest.is_empty() => parts,
        // The word parser accepts the empty string, so every input is consumed.
        _ => input.split(SEPARATOR).collect(),
    }
}
