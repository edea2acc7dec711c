//! A `nom`-based parser for JSON-path expressions.
use super::ast::{CompiledPath, Step};
use crate::error::CompileError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1},
    combinator::{map, map_res, opt, recognize, value},
    error::{Error, ErrorKind},
    sequence::{delimited, pair, preceded},
};
use std::str::FromStr;

// --- Main Public Parser ---

/// Compiles a JSON-path expression such as `$.VCAP_APPLICATION.uris[0]`.
pub fn parse_path(input: &str) -> Result<CompiledPath, CompileError> {
    let expr = input.trim();
    if expr.is_empty() {
        return Err(CompileError::Empty);
    }
    let Some(mut rest) = expr.strip_prefix('$') else {
        return Err(CompileError::MissingRoot);
    };

    let mut steps = Vec::new();
    while !rest.is_empty() {
        match step(rest) {
            Ok((remaining, parsed)) => {
                steps.push(parsed);
                rest = remaining;
            }
            Err(_) => return Err(diagnose(expr, rest)),
        }
    }
    Ok(CompiledPath::new(steps))
}

impl FromStr for CompiledPath {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_path(s)
    }
}

// --- Combinators ---

fn step(input: &str) -> IResult<&str, Step> {
    alt((dot_step, bracket_step)).parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-').parse(input)
}

fn dot_step(input: &str) -> IResult<&str, Step> {
    preceded(
        char('.'),
        alt((
            value(Step::Wildcard, char('*')),
            map(identifier, |s: &str| Step::Field(s.to_string())),
        )),
    )
    .parse(input)
}

fn index(input: &str) -> IResult<&str, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), str::parse::<i64>).parse(input)
}

/// Reads a quoted key's text up to the closing `quote`, which is left unconsumed.
/// A backslash escapes `\\`, `'` or `"`.
fn quoted_body(input: &str, quote: char) -> IResult<&str, String> {
    let mut key = String::new();
    let mut chars = input.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped @ ('\\' | '\'' | '"'))) => key.push(escaped),
                _ => return Err(nom::Err::Error(Error::new(&input[i..], ErrorKind::Escaped))),
            },
            c if c == quote => return Ok((&input[i..], key)),
            c => key.push(c),
        }
    }
    Ok(("", key))
}

fn single_quoted_body(input: &str) -> IResult<&str, String> {
    quoted_body(input, '\'')
}

fn double_quoted_body(input: &str) -> IResult<&str, String> {
    quoted_body(input, '"')
}

fn quoted_key(input: &str) -> IResult<&str, String> {
    alt((
        delimited(char('\''), single_quoted_body, char('\'')),
        delimited(char('"'), double_quoted_body, char('"')),
    ))
    .parse(input)
}

fn bracket_step(input: &str) -> IResult<&str, Step> {
    delimited(
        char('['),
        alt((
            value(Step::Wildcard, char('*')),
            map(index, Step::Index),
            map(quoted_key, Step::Field),
        )),
        char(']'),
    )
    .parse(input)
}

// --- Error Reporting ---

/// Explains why no step could be parsed at the start of `rest`.
fn diagnose(expr: &str, rest: &str) -> CompileError {
    let position = expr.len() - rest.len();
    let mut chars = rest.chars();
    match chars.next() {
        Some('.') => match chars.next() {
            None | Some('.') | Some('[') => CompileError::EmptySegment { position },
            Some(found) => CompileError::InvalidCharacter {
                position: position + 1,
                found,
            },
        },
        Some('[') => diagnose_bracket(position, &rest[1..]),
        Some(found) => CompileError::InvalidCharacter { position, found },
        None => CompileError::EmptySegment { position },
    }
}

fn diagnose_bracket(position: usize, inner: &str) -> CompileError {
    if let Some(quote @ ('\'' | '"')) = inner.chars().next() {
        let Some(close) = closing_quote(&inner[1..], quote) else {
            return CompileError::UnterminatedBracket { position };
        };
        let after = 1 + close + 1;
        return match inner[after..].chars().next() {
            None => CompileError::UnterminatedBracket { position },
            Some(']') => CompileError::InvalidBracket {
                position: position + 1,
                content: inner[..after].to_string(),
            },
            Some(found) => CompileError::InvalidCharacter {
                position: position + 1 + after,
                found,
            },
        };
    }

    let Some(end) = inner.find([']', '[']) else {
        return CompileError::UnterminatedBracket { position };
    };
    if inner[end..].starts_with('[') {
        return CompileError::UnterminatedBracket { position };
    }

    let content = &inner[..end];
    let digits = content.strip_prefix('-').unwrap_or(content);
    if content.is_empty() {
        CompileError::EmptyBracket { position }
    } else if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        CompileError::InvalidIndex {
            position: position + 1,
            content: content.to_string(),
        }
    } else {
        CompileError::InvalidBracket {
            position: position + 1,
            content: content.to_string(),
        }
    }
}

/// Byte offset of the first unescaped `quote` in `body`.
fn closing_quote(body: &str, quote: char) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            c if c == quote => return Some(i),
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> Step {
        Step::Field(name.to_string())
    }

    #[test]
    fn test_parse_root() {
        assert_eq!(parse_path("$").unwrap(), CompiledPath::root());
        assert_eq!(parse_path("  $ ").unwrap(), CompiledPath::root());
    }

    #[test]
    fn test_parse_dotted_fields() {
        let path = parse_path("$.VCAP_APPLICATION.application-name").unwrap();
        assert_eq!(
            path.steps(),
            &[field("VCAP_APPLICATION"), field("application-name")]
        );
    }

    #[test]
    fn test_parse_brackets() {
        let path = parse_path("$.foo[2]['bar baz'][\"it's\"][-1]").unwrap();
        assert_eq!(
            path.steps(),
            &[
                field("foo"),
                Step::Index(2),
                field("bar baz"),
                field("it's"),
                Step::Index(-1),
            ]
        );
    }

    #[test]
    fn test_parse_wildcards() {
        let path = parse_path("$.services.*[*].name").unwrap();
        assert_eq!(
            path.steps(),
            &[field("services"), Step::Wildcard, Step::Wildcard, field("name")]
        );
        assert!(!path.is_singular());
    }

    #[test]
    fn test_rejects_empty_and_rootless() {
        assert_eq!(parse_path(""), Err(CompileError::Empty));
        assert_eq!(parse_path("   "), Err(CompileError::Empty));
        assert_eq!(parse_path("a.b"), Err(CompileError::MissingRoot));
    }

    #[test]
    fn test_rejects_empty_segments() {
        assert_eq!(
            parse_path("$..a"),
            Err(CompileError::EmptySegment { position: 1 })
        );
        assert_eq!(
            parse_path("$.a."),
            Err(CompileError::EmptySegment { position: 3 })
        );
        assert_eq!(
            parse_path("$.[0]"),
            Err(CompileError::EmptySegment { position: 1 })
        );
    }

    #[test]
    fn test_rejects_bad_brackets() {
        assert_eq!(
            parse_path("$.a[1"),
            Err(CompileError::UnterminatedBracket { position: 3 })
        );
        assert_eq!(
            parse_path("$.a[1[2]"),
            Err(CompileError::UnterminatedBracket { position: 3 })
        );
        assert_eq!(
            parse_path("$.a['x"),
            Err(CompileError::UnterminatedBracket { position: 3 })
        );
        assert_eq!(
            parse_path("$.a[]"),
            Err(CompileError::EmptyBracket { position: 3 })
        );
        assert_eq!(
            parse_path("$.a[b]"),
            Err(CompileError::InvalidBracket {
                position: 4,
                content: "b".to_string()
            })
        );
        assert_eq!(
            parse_path("$.a['x'y]"),
            Err(CompileError::InvalidCharacter {
                position: 7,
                found: 'y'
            })
        );
        assert_eq!(
            parse_path("$.a[99999999999999999999]"),
            Err(CompileError::InvalidIndex {
                position: 4,
                content: "99999999999999999999".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_stray_characters() {
        assert_eq!(
            parse_path("$.a]"),
            Err(CompileError::InvalidCharacter {
                position: 3,
                found: ']'
            })
        );
        assert_eq!(
            parse_path("$.a.$b"),
            Err(CompileError::InvalidCharacter {
                position: 4,
                found: '$'
            })
        );
        assert_eq!(
            parse_path("$foo"),
            Err(CompileError::InvalidCharacter {
                position: 1,
                found: 'f'
            })
        );
    }

    #[test]
    fn test_parse_escaped_quoted_keys() {
        let path = parse_path(r#"$['a\'b"c\\']["say \"hi\""]"#).unwrap();
        assert_eq!(path.steps(), &[field("a'b\"c\\"), field("say \"hi\"")]);
    }

    #[test]
    fn test_rejects_unknown_escape() {
        assert_eq!(
            parse_path(r"$['a\x']"),
            Err(CompileError::InvalidBracket {
                position: 2,
                content: r"'a\x'".to_string()
            })
        );
        assert_eq!(
            parse_path(r"$['a\']"),
            Err(CompileError::UnterminatedBracket { position: 1 })
        );
    }

    #[test]
    fn test_display_round_trips_any_key() {
        for key in ["a'b\"c\\", "", "x y", "it's", "back\\slash", "dot.ted"] {
            let path = CompiledPath::new(vec![field(key), Step::Index(0)]);
            assert_eq!(parse_path(&path.to_string()).unwrap(), path, "key {:?}", key);
        }
        assert_eq!(
            CompiledPath::new(vec![field("a'b\"c\\")]).to_string(),
            r#"$['a\'b"c\\']"#
        );
    }

    #[test]
    fn test_display_is_canonical() {
        let path = parse_path("$['a'].b[0][*]['x y']").unwrap();
        assert_eq!(path.to_string(), "$.a.b[0].*['x y']");
        assert_eq!(parse_path(&path.to_string()).unwrap(), path);
    }
}
