use crate::error::{Error, Kind, Position};
use crate::input::Input;
use crate::value::{Array, Object, Slot, Value};
use memchr::memchr2;
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_till},
    character::complete::{anychar, char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, map_res, opt, recognize, verify},
    sequence::{pair, tuple},
    Err, IResult, InputTake, Slice,
};

pub type Span<'a> = Input<'a>;

pub type Result<'a, R> = IResult<Span<'a>, R, Error>;
pub type ParseResult = std::result::Result<Value, Error>;

fn failure<T>(start: Position, end: Span<'_>, kind: Kind) -> Result<'_, T> {
    Err(Err::Failure(Error::new(start, Position::from(end), kind)))
}

fn take_until_delimiter(i: Span, is_key: bool) -> Result<Span> {
    let chars = if is_key { " \t\r\n,]}:" } else { " \t\r\n,]}" };

    take_till(move |c| chars.contains(c))(i)
}

/// Parses a keyword and reports the whole bad token when it does not match.
fn literal<'a>(word: &'static str, value: Value) -> impl FnMut(Span<'a>) -> Result<'a, Value> {
    move |i: Span<'a>| match tag::<_, _, Error>(word)(i) {
        Ok((i, _)) => Ok((i, value.clone())),
        Err(_) => {
            let start = Position::from(i);
            let (rest, token) = take_until_delimiter(i, false)?;

            failure(start, rest, Kind::InvalidValue(token.fragment().to_owned()))
        }
    }
}

fn u16_hex(i: Span) -> Result<u16> {
    map_res(
        verify(take(4usize), |s: &Span| {
            s.fragment().bytes().all(|b| b.is_ascii_hexdigit())
        }),
        |s: Span| u16::from_str_radix(s.fragment(), 16),
    )(i)
    .or_else(|_: Err<Error>| {
        let digits: String = i.fragment().chars().take(4).collect();
        let rest = i.slice(digits.len()..);

        failure(Position::from(i), rest, Kind::InvalidHex(digits))
    })
}

/// Decodes one `\uXXXX` escape. Surrogate halves are not paired up, and since
/// a lone surrogate has no UTF-8 form it decodes to U+FFFD.
fn unicode_escape(i: Span) -> Result<char> {
    let (i, code_unit) = u16_hex(i)?;

    let c = std::char::from_u32(u32::from(code_unit)).unwrap_or('\u{FFFD}');

    Ok((i, c))
}

fn escape(i: Span) -> Result<char> {
    let start = Position::from(i);
    let (rest, c) = anychar(i)?;

    let decoded = match c {
        '"' | '\\' | '/' => c,
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => return unicode_escape(rest),
        c => return failure(start, rest, Kind::InvalidEscape(c)),
    };

    Ok((rest, decoded))
}

/// Parses the body of a string, `i` starting right after the opening quote.
fn string(i: Span) -> Result<String> {
    let start = Position::from(i);
    let mut out = String::new();
    let mut i = i;

    loop {
        let Some(n) = memchr2(b'"', b'\\', i.fragment().as_bytes()) else {
            return failure(start, i.end(), Kind::MissingQuote);
        };

        let (rest, chunk) = i.take_split(n);
        out.push_str(chunk.fragment());

        let (rest, c) = anychar(rest)?;

        if c == '"' {
            return Ok((rest, out));
        }

        if rest.is_empty() {
            return failure(start, rest, Kind::MissingQuote);
        }

        let (rest, decoded) = escape(rest)?;
        out.push(decoded);
        i = rest;
    }
}

fn number_grammar(i: Span) -> Result<Span> {
    recognize(tuple((
        opt(char('-')),
        alt((tag("0"), recognize(pair(one_of("123456789"), digit0)))),
        opt(pair(char('.'), digit1)),
        opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
    )))(i)
}

fn number(i: Span) -> Result<Value> {
    let start = Position::from(i);
    let (rest, token) = take_until_delimiter(i, false)?;
    let text = token.fragment();

    if all_consuming(number_grammar)(token).is_err() {
        return failure(start, rest, Kind::InvalidNumber(text.to_owned()));
    }

    let value = if text.contains(&['.', 'e', 'E'][..]) {
        text.parse().ok().filter(|n: &f64| n.is_finite()).map(Value::Float)
    } else {
        text.parse().ok().map(Value::Integer)
    };

    match value {
        Some(value) => Ok((rest, value)),
        None => failure(start, rest, Kind::InvalidNumber(text.to_owned())),
    }
}

/// Parses array elements, `i` starting right after `[`.
fn array(i: Span, start: Position) -> Result<Array> {
    let (mut i, _) = multispace0(i)?;
    let mut elements = Array::new();

    if i.starts_with(']') {
        return Ok((i.slice(1..), elements));
    }

    loop {
        if i.is_empty() {
            return failure(start, i, Kind::MissingArrayBracket);
        }

        let (rest, value) = json_value(i)?;
        elements.push(Slot::new(value));

        let (rest, _) = multispace0(rest)?;

        match rest.first() {
            Some(']') => return Ok((rest.slice(1..), elements)),
            Some(',') => {
                let (rest, _) = multispace0(rest.slice(1..))?;

                if rest.starts_with(']') {
                    return failure(Position::from(rest), rest.slice(1..), Kind::TrailingComma);
                }

                i = rest;
            }
            Some(_) => {
                return failure(Position::from(rest), rest, Kind::MissingComma);
            }
            None => return failure(start, rest, Kind::MissingArrayBracket),
        }
    }
}

fn key(i: Span, start: Position) -> Result<String> {
    let key_start = Position::from(i);

    match i.first() {
        Some('"') => string(i.slice(1..)),
        Some(_) => {
            let (rest, token) = take_until_delimiter(i, true)?;
            let token = if token.is_empty() {
                // Delimiter in key position, e.g. `{,}` or `{:1}`
                i.fragment().chars().take(1).collect()
            } else {
                token.fragment().to_owned()
            };

            failure(key_start, rest, Kind::InvalidKey(token))
        }
        None => failure(start, i, Kind::MissingObjectBracket),
    }
}

fn key_value(i: Span, start: Position) -> Result<(String, Value)> {
    let (i, key) = key(i, start)?;

    let (i, _) = multispace0(i)?;

    if !i.starts_with(':') {
        return failure(Position::from(i), i, Kind::MissingColon);
    }

    let (i, value) = json_value(i.slice(1..))?;

    Ok((i, (key, value)))
}

/// Parses object members, `i` starting right after `{`.
fn object(i: Span, start: Position) -> Result<Object> {
    let (mut i, _) = multispace0(i)?;
    let mut members = Object::new();

    if i.starts_with('}') {
        return Ok((i.slice(1..), members));
    }

    loop {
        let (rest, (key, value)) = key_value(i, start)?;
        // Duplicate keys: the last one wins
        members.insert(key, Slot::new(value));

        let (rest, _) = multispace0(rest)?;

        match rest.first() {
            Some('}') => return Ok((rest.slice(1..), members)),
            Some(',') => {
                let (rest, _) = multispace0(rest.slice(1..))?;

                if rest.starts_with('}') {
                    return failure(Position::from(rest), rest.slice(1..), Kind::TrailingComma);
                }

                i = rest;
            }
            Some(_) => {
                return failure(Position::from(rest), rest, Kind::MissingComma);
            }
            None => return failure(start, rest, Kind::MissingObjectBracket),
        }
    }
}

fn json_value(i: Span) -> Result<Value> {
    let (i, _) = multispace0(i)?;

    let start = Position::from(i);

    let Some(first_char) = i.first() else {
        return failure(start, i, Kind::UnexpectedEnd);
    };

    match first_char {
        '{' => object(i.slice(1..), start).map(|(i, o)| (i, Value::Object(o))),
        '[' => array(i.slice(1..), start).map(|(i, a)| (i, Value::Array(a))),
        '"' => string(i.slice(1..)).map(|(i, s)| (i, Value::String(s))),
        '-' | '0'..='9' => number(i),
        't' => literal("true", Value::Bool(true))(i),
        'f' => literal("false", Value::Bool(false))(i),
        'n' => literal("null", Value::Null)(i),
        c => failure(start, i.slice(c.len_utf8()..), Kind::UnexpectedChar(c)),
    }
}

fn end_chars(i: Span) -> Result<()> {
    let (rest, _) = multispace0(i)?;

    if rest.is_empty() {
        return Ok((rest, ()));
    }

    failure(
        Position::from(rest),
        rest.end(),
        Kind::CharsAfterRoot(rest.fragment().to_owned()),
    )
}

fn root(i: Span) -> Result<Value> {
    let (i, value) = json_value(i)?;
    let (i, _) = end_chars(i)?;

    Ok((i, value))
}

fn unwrap_nom_error<T>(value: Result<T>, input: Span) -> std::result::Result<T, Error> {
    match value {
        Ok((_, v)) => Ok(v),
        Err(Err::Error(e)) | Err(Err::Failure(e)) => Err(e),
        Err(Err::Incomplete(_)) => Err(Error::at(Position::from(input.end()), Kind::UnexpectedEnd)),
    }
}

/// Parses a complete JSON document.
///
/// Only whitespace may follow the root value. Parsing is all or nothing: the
/// first grammar violation is returned and no partial tree is built.
pub fn parse(s: &str) -> ParseResult {
    let span = Span::new(s);

    unwrap_nom_error(root(span), span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_positions_point_at_the_offender() {
        let err = parse("{\n  \"a\": tru\n}").unwrap_err();

        assert_eq!(err.kind, Kind::InvalidValue("tru".into()));
        assert_eq!(err.start.line, 2);
        assert_eq!(err.start.col, 8);
        assert_eq!(err.end.col, 11);
    }

    #[test]
    fn number_token_must_be_fully_consumed() {
        assert_eq!(
            parse("[1.]").unwrap_err().kind,
            Kind::InvalidNumber("1.".into())
        );
        assert_eq!(
            parse("-").unwrap_err().kind,
            Kind::InvalidNumber("-".into())
        );
        assert_eq!(
            parse("012").unwrap_err().kind,
            Kind::InvalidNumber("012".into())
        );
    }

    #[test]
    fn keywords_are_exact() {
        assert_eq!(parse("nul").unwrap_err().kind, Kind::InvalidValue("nul".into()));
        assert_eq!(
            parse("falsey").unwrap_err().kind,
            Kind::CharsAfterRoot("y".into())
        );
    }
}
