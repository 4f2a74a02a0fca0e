use std::str::FromStr;

use anyhow::{Context, Error, Result};

use crate::occurrences::TypeOfLineNo;
use crate::session::AnalysisSession;
use crate::tables::{NO_TYPE_CHECK, TypeCode};

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum ActualType {
    Code(TypeCode),
    LastResolved,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Event {
    Token { tag: char, line: TypeOfLineNo, lexeme: String },
    Constant { line: TypeOfLineNo, literal: String },
    DeclaredType(char),
    EndDeclaredType,
    Declare { line: TypeOfLineNo, name: String },
    Record { line: TypeOfLineNo, name: String },
    Use { line: TypeOfLineNo, name: String },
    ExpectedType(TypeCode),
    CheckType { actual: ActualType, expected: TypeCode, line: TypeOfLineNo },
    ArrayIndex { value: i64, line: TypeOfLineNo },
    EnterScope,
    ExitScope,
    EnterFunction,
}

fn split_field(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], s[end..].trim_start())),
        None => Some((s, "")),
    }
}

struct Fields<'a> {
    rest: &'a str,
}

impl<'a> Fields<'a> {
    fn next_str(&mut self, what: &str) -> Result<&'a str> {
        let (field, rest) = split_field(self.rest)
            .ok_or_else(|| Error::msg(format!("missing {}", what)))?;
        self.rest = rest;
        Ok(field)
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let field = self.next_str(what)?;
        field.parse::<T>()
            .map_err(|_| Error::msg(format!("invalid {}: {}", what, field)))
    }

    fn next_tag(&mut self, what: &str) -> Result<char> {
        let field = self.next_str(what)?;
        let mut chars = field.chars();
        match (chars.next(), chars.next()) {
            (Some(tag), None) => Ok(tag),
            _ => Err(Error::msg(format!("{} must be a single character, found {}", what, field))),
        }
    }

    fn text(self, what: &str) -> Result<String> {
        let text = self.rest.trim_end();
        if text.is_empty() {
            return Err(Error::msg(format!("missing {}", what)));
        }
        Ok(text.to_string())
    }

    fn finish(self) -> Result<()> {
        if self.rest.trim().is_empty() {
            Ok(())
        } else {
            Err(Error::msg(format!("unexpected trailing input: {}", self.rest.trim())))
        }
    }
}

impl FromStr for Event {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (keyword, rest) = split_field(s)
            .ok_or_else(|| Error::msg("empty event"))?;
        let mut fields = Fields { rest };

        let event = match keyword {
            "token" => {
                let tag = fields.next_tag("token kind tag")?;
                let line = fields.next("line number")?;
                let lexeme = fields.text("lexeme")?;
                return Ok(Event::Token { tag, line, lexeme });
            }
            "constant" => {
                let line = fields.next("line number")?;
                let literal = fields.text("literal")?;
                return Ok(Event::Constant { line, literal });
            }
            "declare" | "record" | "use" => {
                let line = fields.next("line number")?;
                let name = fields.next_str("name")?.to_string();
                fields.finish()?;
                return Ok(match keyword {
                    "declare" => Event::Declare { line, name },
                    "record" => Event::Record { line, name },
                    _ => Event::Use { line, name },
                });
            }
            "type" => Event::DeclaredType(fields.next_tag("declared type tag")?),
            "endtype" => Event::EndDeclaredType,
            "expect" => Event::ExpectedType(fields.next("type code")?),
            "check" => {
                let actual = match fields.next_str("actual type code")? {
                    "_" => ActualType::LastResolved,
                    code => ActualType::Code(code.parse()
                        .map_err(|_| Error::msg(format!("invalid actual type code: {}", code)))?),
                };
                let expected = fields.next("expected type code")?;
                let line = fields.next("line number")?;
                Event::CheckType { actual, expected, line }
            }
            "index" => {
                let value = fields.next("index value")?;
                let line = fields.next("line number")?;
                Event::ArrayIndex { value, line }
            }
            "scope" => match fields.next_str("scope direction")? {
                "enter" => Event::EnterScope,
                "exit" => Event::ExitScope,
                direction => Err(Error::msg(format!("unknown scope direction: {}", direction)))?,
            },
            "function" => Event::EnterFunction,
            _ => Err(Error::msg(format!("unknown event: {}", keyword)))?,
        };
        fields.finish()?;
        Ok(event)
    }
}

pub(crate) struct TraceReplayer {
    last_resolved: TypeCode,
}

impl Default for TraceReplayer {
    fn default() -> Self {
        TraceReplayer { last_resolved: NO_TYPE_CHECK }
    }
}

impl TraceReplayer {
    pub(crate) fn apply(&mut self, session: &mut AnalysisSession, event: Event) -> Result<()> {
        match event {
            Event::Token { tag, line, lexeme } => {
                session.classify(&lexeme, tag, line)?;
            }
            Event::Constant { line, literal } => session.add_constant(&literal, line),
            Event::DeclaredType(tag) => session.set_declared_type_tag(tag)?,
            Event::EndDeclaredType => session.clear_declared_type(),
            Event::Declare { line, name } => {
                let scope_id = session.scope_id();
                session.check_declaration(&name, line, scope_id)?;
            }
            Event::Record { line, name } => {
                let scope_id = session.scope_id();
                session.declare_or_record(&name, line, scope_id)?;
            }
            Event::Use { line, name } => {
                self.last_resolved = session.resolve_and_use(&name, line);
            }
            Event::ExpectedType(type_code) => session.set_expected_type(type_code),
            Event::CheckType { actual, expected, line } => {
                let actual = match actual {
                    ActualType::Code(code) => code,
                    ActualType::LastResolved => self.last_resolved,
                };
                session.check_type(actual, expected, line);
            }
            Event::ArrayIndex { value, line } => session.check_array_index(value, line),
            Event::EnterScope => session.enter_scope(),
            Event::ExitScope => session.exit_scope()?,
            Event::EnterFunction => session.enter_function(),
        }
        Ok(())
    }

    pub(crate) fn run(&mut self, session: &mut AnalysisSession, trace: &str) -> Result<()> {
        let mut events = 0usize;
        for (i, line) in trace.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let event = line.parse::<Event>()
                .with_context(|| format!("trace line {}", i + 1))?;
            self.apply(session, event)
                .with_context(|| format!("trace line {}", i + 1))?;
            events += 1;
        }
        log::info!("replayed {} events for {}", events, session.source_name());
        Ok(())
    }
}
