use std::mem;

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::occurrences::TypeOfLineNo;
use crate::semantic::PrecheckViolation;
use crate::tables::*;

pub(crate) const DEFAULT_EXPECTED_TYPE: TypeCode = 3;

#[derive(Debug)]
pub(crate) struct AnalysisSession {
    source_name: String,
    scope_id: ScopeId,
    function_id: FunctionId,
    pending_declared_type: Option<DeclaredType>,
    pending_expected_type: TypeCode,
    has_error: bool,
    diagnostics: Vec<Diagnostic>,
    symbols: SymbolTable,
    constants: ConstantTable,
    tokens: TokenTable,
}

impl AnalysisSession {
    pub(crate) fn new<S: Into<String>>(source_name: S) -> Self {
        AnalysisSession {
            source_name: source_name.into(),
            scope_id: 0,
            function_id: 0,
            pending_declared_type: None,
            pending_expected_type: DEFAULT_EXPECTED_TYPE,
            has_error: false,
            diagnostics: vec![],
            symbols: SymbolTable::new(),
            constants: ConstantTable::new(),
            tokens: TokenTable::new(),
        }
    }

    pub(crate) fn source_name(&self) -> &str {
        &self.source_name
    }

    pub(crate) fn scope_id(&self) -> ScopeId {
        self.scope_id
    }

    pub(crate) fn function_id(&self) -> FunctionId {
        self.function_id
    }

    pub(crate) fn enter_scope(&mut self) {
        self.scope_id += 1;
    }

    pub(crate) fn exit_scope(&mut self) -> Result<(), PrecheckViolation> {
        if self.scope_id == 0 {
            return Err(PrecheckViolation::ScopeUnderflow);
        }
        self.scope_id -= 1;
        Ok(())
    }

    pub(crate) fn enter_function(&mut self) {
        self.function_id += 1;
        log::debug!("entering function {}", self.function_id);
    }

    pub(crate) fn set_declared_type(&mut self, declared_type: DeclaredType) {
        self.pending_declared_type = Some(declared_type);
    }

    pub(crate) fn set_declared_type_tag(&mut self, tag: char) -> Result<(), PrecheckViolation> {
        let declared_type = DeclaredType::from_tag(tag)
            .ok_or(PrecheckViolation::UnknownTypeTag(tag))?;
        self.set_declared_type(declared_type);
        Ok(())
    }

    pub(crate) fn clear_declared_type(&mut self) {
        self.pending_declared_type = None;
    }

    pub(crate) fn pending_declared_type(&self) -> Option<DeclaredType> {
        self.pending_declared_type
    }

    pub(crate) fn set_expected_type(&mut self, type_code: TypeCode) {
        self.pending_expected_type = type_code;
    }

    #[cfg(test)]
    pub(crate) fn pending_expected_type(&self) -> TypeCode {
        self.pending_expected_type
    }

    pub(crate) fn take_expected_type(&mut self) -> TypeCode {
        mem::replace(&mut self.pending_expected_type, DEFAULT_EXPECTED_TYPE)
    }

    pub(crate) fn has_error(&self) -> bool {
        self.has_error
    }

    pub(crate) fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn report(&mut self, kind: DiagnosticKind, line: TypeOfLineNo) {
        let diagnostic = Diagnostic {
            source_name: self.source_name.clone(),
            line: kind.reported_line(line),
            kind,
        };
        log::warn!("{}", diagnostic);
        self.has_error = true;
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub(crate) fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub(crate) fn tokens(&self) -> &TokenTable {
        &self.tokens
    }

    pub(crate) fn add_constant(&mut self, literal: &str, line: TypeOfLineNo) {
        self.constants.add(literal, line);
    }

    pub(crate) fn classify(
        &mut self,
        lexeme: &str,
        tag: char,
        line: TypeOfLineNo,
    ) -> Result<TokenCategory, PrecheckViolation> {
        let category = TokenCategory::from_tag(tag)
            .ok_or(PrecheckViolation::UnknownTokenTag(tag))?;
        self.tokens.classify(lexeme, category, line);
        Ok(category)
    }
}
