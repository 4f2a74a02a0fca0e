use std::*;
use fmt::{Display, Formatter};

use crate::occurrences::TypeOfLineNo;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum DiagnosticKind {
    UndeclaredVariable,
    TypeMismatch,
    MultipleDeclaration { same_type: bool },
    ArrayIndexError,
}

impl DiagnosticKind {
    pub(crate) fn reported_line(self, line: TypeOfLineNo) -> TypeOfLineNo {
        match self {
            DiagnosticKind::MultipleDeclaration { .. } => line,
            DiagnosticKind::UndeclaredVariable
            | DiagnosticKind::TypeMismatch
            | DiagnosticKind::ArrayIndexError => line.saturating_sub(1),
        }
    }
}

impl Display for DiagnosticKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DiagnosticKind::UndeclaredVariable => "Undeclared variable",
                DiagnosticKind::TypeMismatch => "Type Mismatch error",
                DiagnosticKind::MultipleDeclaration { same_type: true } => "Multiple Declaration",
                DiagnosticKind::MultipleDeclaration { same_type: false } =>
                    "Multiple Declaration with Different Type",
                DiagnosticKind::ArrayIndexError => "Array Index error",
            }
        )
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) struct Diagnostic {
    pub(crate) source_name: String,
    pub(crate) line: TypeOfLineNo,
    pub(crate) kind: DiagnosticKind,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} :{}", self.source_name, self.line, self.kind)
    }
}
