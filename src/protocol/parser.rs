//! Line protocol parser using nom.
//!
//! Grammar, one point per line:
//!
//! ```text
//! measurement[,tag=value...] field=value[,field=value...] [timestamp]
//! ```

use super::precision::Precision;
use super::types::{FieldValue, Point, RawValue, Tag};
use crate::core::{InfluxConvError, Result};
use chrono::{DateTime, Utc};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit0, digit1, one_of, space1},
    combinator::{all_consuming, map, opt, recognize},
    error::{Error, ErrorKind},
    multi::{many0, separated_list1},
    sequence::{pair, preceded, separated_pair, terminated, tuple},
    IResult,
};
use std::collections::HashSet;

const MEASUREMENT_STOPS: &[char] = &[',', ' '];
const KEY_STOPS: &[char] = &[',', '=', ' '];

type Line = (String, Vec<Tag>, Vec<(String, RawValue)>, Option<i64>);

/// Parse a buffer of line protocol into points.
///
/// Points without a timestamp get `default_time`. Every malformed line is
/// reported in the returned error, one per line.
pub fn parse_points_with_precision(
    buf: &[u8],
    default_time: DateTime<Utc>,
    precision: Precision,
) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut failures = Vec::new();

    for raw in split_lines(buf) {
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line.trim(),
            Err(e) => {
                failures.push(format!("unable to parse '{}': {}", String::from_utf8_lossy(raw).trim(), e));
                continue;
            },
        };

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line, default_time, precision) {
            Ok(point) => points.push(point),
            Err(message) => failures.push(format!("unable to parse '{}': {}", line, message)),
        }
    }

    if failures.is_empty() {
        Ok(points)
    } else {
        Err(InfluxConvError::decode(failures.join("\n")))
    }
}

/// Split on newlines that are not inside a quoted string field value.
fn split_lines(buf: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    let mut in_fields = false;
    let mut quoted = false;

    while i < buf.len() {
        match buf[i] {
            b'\\' => {
                i += 2;
                continue;
            },
            b' ' if !quoted => in_fields = true,
            b'"' if in_fields => quoted = !quoted,
            b'\n' if !quoted => {
                lines.push(&buf[start..i]);
                start = i + 1;
                in_fields = false;
            },
            _ => {},
        }
        i += 1;
    }

    if start < buf.len() {
        lines.push(&buf[start..]);
    }
    lines
}

fn parse_line(
    line: &str,
    default_time: DateTime<Utc>,
    precision: Precision,
) -> std::result::Result<Point, String> {
    let (measurement, tags, fields, timestamp) = match all_consuming(point_line)(line) {
        Ok((_, parsed)) => parsed,
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => {
            return Err(describe_failure(line, e.input));
        },
        Err(nom::Err::Incomplete(_)) => return Err("incomplete input".to_string()),
    };

    let mut seen = HashSet::with_capacity(tags.len());
    if let Some(dup) = tags.iter().find(|t| !seen.insert(t.key.as_str())) {
        return Err(format!("duplicate tag key '{}'", dup.key));
    }

    if let Some(e) = fields.iter().find_map(|(key, raw)| FieldValue::from_raw(key, raw).err()) {
        return Err(e.to_string());
    }

    let timestamp = match timestamp {
        Some(raw) => precision
            .to_datetime(raw)
            .ok_or_else(|| format!("timestamp {} out of range for precision {}", raw, precision))?,
        None => default_time,
    };

    Ok(Point::new(measurement, tags, fields, timestamp))
}

fn describe_failure(line: &str, remaining: &str) -> String {
    let offset = line.len() - remaining.len();
    if !line.contains(' ') {
        return "missing fields".to_string();
    }
    match remaining.chars().next() {
        Some(c) => format!("invalid syntax at byte {} near '{}'", offset, c),
        None => format!("unexpected end of line at byte {}", offset),
    }
}

fn point_line(input: &str) -> IResult<&str, Line> {
    tuple((
        measurement,
        many0(preceded(char(','), tag_pair)),
        preceded(space1, separated_list1(char(','), field_pair)),
        opt(preceded(space1, timestamp)),
    ))(input)
}

fn measurement(input: &str) -> IResult<&str, String> {
    escaped_token(input, MEASUREMENT_STOPS)
}

fn key(input: &str) -> IResult<&str, String> {
    escaped_token(input, KEY_STOPS)
}

fn tag_pair(input: &str) -> IResult<&str, Tag> {
    map(separated_pair(key, char('='), key), |(k, v)| Tag::new(k, v))(input)
}

fn field_pair(input: &str) -> IResult<&str, (String, RawValue)> {
    separated_pair(key, char('='), field_value)(input)
}

fn field_value(input: &str) -> IResult<&str, RawValue> {
    alt((map(quoted_string, RawValue::Str), boolean, number))(input)
}

/// Scan up to the first unescaped stop character.
///
/// A backslash before a stop character is dropped; any other backslash pair
/// is kept verbatim. Fails on an empty token.
fn escaped_token<'a>(input: &'a str, stops: &[char]) -> IResult<&'a str, String> {
    let mut out = String::new();
    let mut end = input.len();
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some((_, next)) if stops.contains(&next) => out.push(next),
                Some((_, next)) => {
                    out.push('\\');
                    out.push(next);
                },
                None => out.push('\\'),
            }
            continue;
        }
        if stops.contains(&c) {
            end = i;
            break;
        }
        out.push(c);
    }

    if out.is_empty() {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::TakeWhile1)));
    }
    Ok((&input[end..], out))
}

/// `"..."` with `\"` and `\\` escapes.
fn quoted_string(input: &str) -> IResult<&str, String> {
    let (body, _) = char('"')(input)?;
    let mut out = String::new();
    let mut chars = body.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&body[i + 1..], out)),
            '\\' => match chars.next() {
                Some((_, next @ ('"' | '\\'))) => out.push(next),
                Some((_, next)) => {
                    out.push('\\');
                    out.push(next);
                },
                None => out.push('\\'),
            },
            _ => out.push(c),
        }
    }

    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}

fn boolean(input: &str) -> IResult<&str, RawValue> {
    terminated(
        alt((
            map(alt((tag("true"), tag("True"), tag("TRUE"), tag("t"), tag("T"))), |_| {
                RawValue::Bool(true)
            }),
            map(alt((tag("false"), tag("False"), tag("FALSE"), tag("f"), tag("F"))), |_| {
                RawValue::Bool(false)
            }),
        )),
        value_end,
    )(input)
}

/// Float, `i`-suffixed integer or `u`-suffixed unsigned literal.
fn number(input: &str) -> IResult<&str, RawValue> {
    let (rest, negative) = opt(char('-'))(input)?;
    let (rest, mantissa) = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ))(rest)?;
    let (rest, exponent) = opt(recognize(tuple((one_of("eE"), opt(one_of("+-")), digit1))))(rest)?;
    let (rest, suffix) = terminated(opt(one_of("iu")), value_end)(rest)?;

    let text = &input[..input.len() - rest.len() - usize::from(suffix.is_some())];
    let integral = !mantissa.contains('.') && exponent.is_none();

    let value = match suffix {
        None => RawValue::Float(text.to_string()),
        Some('i') if integral => RawValue::Integer(text.to_string()),
        Some('u') if integral && negative.is_none() => RawValue::Unsigned(text.to_string()),
        Some(_) => return Err(nom::Err::Error(Error::new(input, ErrorKind::Digit))),
    };
    Ok((rest, value))
}

/// A field value must be followed by `,`, a space or the end of the line.
fn value_end(input: &str) -> IResult<&str, ()> {
    match input.chars().next() {
        None | Some(',' | ' ') => Ok((input, ())),
        Some(_) => Err(nom::Err::Error(Error::new(input, ErrorKind::Verify))),
    }
}

fn timestamp(input: &str) -> IResult<&str, i64> {
    let (rest, digits) = recognize(pair(opt(char('-')), digit1))(input)?;
    match digits.parse() {
        Ok(ts) => Ok((rest, ts)),
        Err(_) => Err(nom::Err::Failure(Error::new(input, ErrorKind::Digit))),
    }
}
