// Plain-text melody notation: scale steps as signed integers separated by
// whitespace. `|` marks bar lines and is ignored, `#` comments run to the end
// of the line.
//
//     0 1 0 0 | 1 2 3 4   # first phrase
//     4 3 2 1 | -1 0 0 0

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace1, not_line_ending},
    combinator::{map_res, opt, recognize, value},
    multi::many0,
    sequence::{pair, preceded, terminated},
};

use crate::{Error, Result};

fn parse_step(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i32>).parse(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    recognize(preceded(char('#'), not_line_ending)).parse(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    value((), many0(alt((multispace1, tag("|"), comment)))).parse(input)
}

fn parse_steps(input: &str) -> IResult<&str, Vec<i32>> {
    preceded(separator, many0(terminated(parse_step, separator))).parse(input)
}

pub fn parse_melody(text: &str) -> Result<Vec<i32>> {
    let (rest, steps) = parse_steps(text).map_err(|e| Error::Notation {
        position: 0,
        message: e.to_string(),
    })?;

    if !rest.is_empty() {
        let position = text.len() - rest.len();
        let token: String = rest.chars().take_while(|c| !c.is_whitespace()).collect();
        return Err(Error::Notation {
            position,
            message: format!("expected a scale step, found {token:?}"),
        });
    }
    Ok(steps)
}

/// Inverse of [`parse_melody`], `per_bar` steps to a bar.
pub fn format_melody(steps: &[i32], per_bar: usize) -> String {
    steps
        .chunks(per_bar.max(1))
        .map(|bar| {
            bar.iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::HANDWRITTEN_SOLO;

    #[test]
    fn test_parse_simple() {
        assert_eq!(parse_melody("0 1 2 3").unwrap(), vec![0, 1, 2, 3]);
        assert_eq!(parse_melody("  -1   10\n-12 ").unwrap(), vec![-1, 10, -12]);
    }

    #[test]
    fn test_parse_bars_and_comments() {
        let text = "# intro\n0 1 0 0 | 1 2 3 4 # rising\n|4 3 2 1|";
        assert_eq!(
            parse_melody(text).unwrap(),
            vec![0, 1, 0, 0, 1, 2, 3, 4, 4, 3, 2, 1]
        );
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_melody("").unwrap().is_empty());
        assert!(parse_melody(" | # nothing here").unwrap().is_empty());
    }

    #[test]
    fn test_parse_error_position() {
        match parse_melody("0 1 x 3") {
            Err(Error::Notation { position, message }) => {
                assert_eq!(position, 4);
                assert!(message.contains("\"x\""));
            }
            other => panic!("Expected notation error, got {other:?}"),
        }
        assert!(parse_melody("99999999999").is_err());
    }

    #[test]
    fn test_format_parses_back() {
        let text = format_melody(&HANDWRITTEN_SOLO, 4);
        assert!(text.starts_with("0 1 0 0 | 1 2 3 4"));
        assert_eq!(parse_melody(&text).unwrap(), HANDWRITTEN_SOLO.to_vec());
    }
}
