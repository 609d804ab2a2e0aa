//! Parser for plain-text task documents.
//!
//! A document is a sequence of sections; each section is a title followed by `key: values`
//! pairs, where values are comma separated:
//!
//! ```text
//! group closure_limit: 5000
//! simplifier max_iterations: 32 tags: expand, fraction
//! logging level: debug console: true
//! ```
//!
//! Lines starting with `//`, `#`, `%` or `;` are comments. Values are typed on the fly:
//! integer, then float, then boolean, otherwise string. The result is a
//! [`DocumentMap`]: section title -> key -> values, with `None` for keys that a template
//! expects but the document does not set.
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{alpha1, alphanumeric1, multispace0, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list0},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::collections::HashMap;
use std::fmt::Display;

pub type SectionMap = HashMap<String, Option<Vec<Value>>>;
pub type DocumentMap = HashMap<String, SectionMap>;

/// A single typed value of a `key: values` pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_string(&self) -> Option<&String> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    /// Integers are accepted as floats too.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s),
            Value::Float(val) => write!(f, "{}", val),
            Value::Integer(val) => write!(f, "{}", val),
            Value::Boolean(val) => write!(f, "{}", val),
        }
    }
}

/// identifier: letter or underscore, then letters, digits, underscores
fn identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    map(parser, String::from).parse(input)
}

/// Section title; trailing whitespace is dropped.
pub(crate) fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, title) = identifier(input)?;
    Ok((input.trim_start(), title))
}

pub(crate) fn parse_key(input: &str) -> IResult<&str, String> {
    identifier(input)
}

pub(crate) fn parse_value(input: &str) -> IResult<&str, Value> {
    let (input, raw) =
        take_while1(|c: char| !matches!(c, ',' | ' ' | '\t' | '\n' | '\r' | ';')).parse(input)?;
    let value = if let Ok(val) = raw.parse::<i64>() {
        Value::Integer(val)
    } else if let Ok(val) = raw.parse::<f64>() {
        Value::Float(val)
    } else if let Ok(val) = raw.parse::<bool>() {
        Value::Boolean(val)
    } else {
        Value::String(raw.to_string())
    };
    Ok((input, value))
}

pub(crate) fn parse_value_list(input: &str) -> IResult<&str, Vec<Value>> {
    let (input, _) = space0(input)?;
    let separator = delimited(space0, tag(","), space0);
    separated_list0(separator, parse_value).parse(input)
}

pub(crate) fn parse_key_value_pair(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon = delimited(space0, tag(":"), space0);
    let (input, pair) = separated_pair(parse_key, colon, parse_value_list).parse(input)?;
    Ok((input.trim_start(), pair))
}

pub(crate) fn parse_section(input: &str) -> IResult<&str, (String, SectionMap)> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_title(input)?;
    let (input, _) = multispace0(input)?;
    let (input, pairs) = many1(terminated(parse_key_value_pair, space0)).parse(input)?;
    let section = pairs
        .into_iter()
        .map(|(key, values)| (key, Some(values)))
        .collect();
    Ok((input, (title, section)))
}

/// Drops comment and blank lines.
pub(crate) fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty()
                && !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses all sections of an uncommented document; a repeated title merges into the first.
pub fn parse_document(input: &str) -> IResult<&str, DocumentMap> {
    let (input, _) = multispace0(input)?;
    let (input, sections) = many1(delimited(space0, parse_section, multispace0)).parse(input)?;
    let mut document: DocumentMap = HashMap::new();
    for (title, section) in sections {
        document.entry(title).or_default().extend(section);
    }
    Ok((input, document))
}

/// Parses a whole document, comments allowed. With a template every title and key of the
/// template is present in the result, unset keys mapped to `None`.
pub fn parse_document_as(input: &str, template: Option<&DocumentMap>) -> Result<DocumentMap, String> {
    let filtered = filter_comments(input);
    if filtered.trim().is_empty() {
        return Ok(fill_template(HashMap::new(), template));
    }
    let (remaining, parsed) =
        parse_document(&filtered).map_err(|e| format!("Parsing error: {:?}", e))?;
    if !remaining.trim().is_empty() {
        return Err(format!(
            "Failed to parse entire document. Remaining: '{}'",
            remaining
        ));
    }
    Ok(fill_template(parsed, template))
}

fn fill_template(mut document: DocumentMap, template: Option<&DocumentMap>) -> DocumentMap {
    if let Some(template) = template {
        for (title, keys) in template {
            let section = document.entry(title.clone()).or_default();
            for key in keys.keys() {
                section.entry(key.clone()).or_insert(None);
            }
        }
    }
    document
}

/// Keeps only the sections named in `titles`.
pub fn parse_this_sections(input: &str, titles: &[&str]) -> Result<DocumentMap, String> {
    let mut document = parse_document_as(input, None)?;
    document.retain(|title, _| titles.contains(&title.as_str()));
    Ok(document)
}

/// Template with the given titles and keys, all unset.
pub fn template_of(sections: &[(&str, &[&str])]) -> DocumentMap {
    sections
        .iter()
        .map(|(title, keys)| {
            let keys = keys.iter().map(|k| (k.to_string(), None)).collect();
            (title.to_string(), keys)
        })
        .collect()
}
