use crate::diagnostic::DiagnosticKind;
use crate::occurrences::{Recorded, TypeOfLineNo};
use crate::session::AnalysisSession;
use crate::tables::{NO_TYPE_CHECK, ScopeId, SymbolKey, TypeCode};

use super::PrecheckViolation;

pub(crate) const BUILTIN_CALL_NAMES: [&str; 2] = ["printf", "scanf"];

impl AnalysisSession {
    pub(crate) fn declare_or_record(
        &mut self,
        name: &str,
        line: TypeOfLineNo,
        scope_id: ScopeId,
    ) -> Result<Recorded, PrecheckViolation> {
        let declared_type = self.pending_declared_type()
            .ok_or_else(|| PrecheckViolation::MissingDeclaredType {
                name: name.to_string(),
                line,
            })?;
        let key = SymbolKey::new(name, scope_id, self.function_id());
        Ok(self.symbols_mut().record(key, declared_type, line))
    }

    pub(crate) fn check_declaration(
        &mut self,
        name: &str,
        line: TypeOfLineNo,
        scope_id: ScopeId,
    ) -> Result<(), PrecheckViolation> {
        let declared_type = self.pending_declared_type()
            .ok_or_else(|| PrecheckViolation::MissingDeclaredType {
                name: name.to_string(),
                line,
            })?;
        let key = SymbolKey::new(name, scope_id, self.function_id());

        if let Some(previous) = self.symbols().declared_type(&key) {
            self.report(
                DiagnosticKind::MultipleDeclaration { same_type: previous == declared_type },
                line,
            );
            return Ok(());
        }

        self.declare_or_record(name, line, scope_id)?;
        Ok(())
    }

    /// Use site: returns the type code of the oldest declaration of `name`
    /// in any scope, or `NO_TYPE_CHECK` for builtins and unknown names.
    pub(crate) fn resolve_and_use(&mut self, name: &str, line: TypeOfLineNo) -> TypeCode {
        if BUILTIN_CALL_NAMES.contains(&name) {
            return NO_TYPE_CHECK;
        }

        let resolved = match self.symbols().first_named(name) {
            Some(entry) => entry.declared_type,
            None => {
                self.report(DiagnosticKind::UndeclaredVariable, line);
                return NO_TYPE_CHECK;
            }
        };

        let key = SymbolKey::new(name, self.scope_id(), self.function_id());
        self.symbols_mut().record(key, resolved, line);
        resolved.type_code()
    }

    pub(crate) fn check_type(&mut self, actual: TypeCode, expected: TypeCode, line: TypeOfLineNo) {
        let pending = self.take_expected_type();
        let expected =
            if expected == NO_TYPE_CHECK {
                pending
            } else {
                expected
            };

        if actual != expected {
            self.report(DiagnosticKind::TypeMismatch, line);
        }
    }

    pub(crate) fn check_array_index(&mut self, value: i64, line: TypeOfLineNo) {
        if value < 0 {
            self.report(DiagnosticKind::ArrayIndexError, line);
        }
    }
}
