use std::*;
use fmt::{Display, Formatter};

use crate::occurrences::TypeOfLineNo;

mod validator;

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum PrecheckViolation {
    MissingDeclaredType { name: String, line: TypeOfLineNo },
    ScopeUnderflow,
    UnknownTypeTag(char),
    UnknownTokenTag(char),
}

impl Display for PrecheckViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PrecheckViolation::MissingDeclaredType { name, line } =>
                write!(f, "{}: {} declared with no pending declared type", line, name),
            PrecheckViolation::ScopeUnderflow =>
                write!(f, "block closed while already in global scope"),
            PrecheckViolation::UnknownTypeTag(tag) =>
                write!(f, "unknown declared type tag '{}'", tag),
            PrecheckViolation::UnknownTokenTag(tag) =>
                write!(f, "unknown token kind tag '{}'", tag),
        }
    }
}

impl error::Error for PrecheckViolation {}
