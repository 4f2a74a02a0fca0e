use std::*;
use collections::HashMap;
use fmt::{Display, Formatter};

use crate::occurrences::{LineOccurrences, Recorded, TypeOfLineNo};

pub(crate) type ScopeId = u32;
pub(crate) type FunctionId = u32;

pub(crate) type TypeCode = u8;

pub(crate) const NO_TYPE_CHECK: TypeCode = 0;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub(crate) enum DeclaredType {
    Int,
    Float,
    Void,
    Char,
}

impl DeclaredType {
    pub(crate) fn from_tag(tag: char) -> Option<DeclaredType> {
        use DeclaredType::*;

        match tag {
            'i' => Some(Int),
            'f' => Some(Float),
            'v' => Some(Void),
            'c' => Some(Char),
            _ => None,
        }
    }

    pub(crate) fn type_code(self) -> TypeCode {
        match self {
            DeclaredType::Void => 1,
            DeclaredType::Char => 2,
            DeclaredType::Int => 3,
            DeclaredType::Float => 4,
        }
    }
}

impl Display for DeclaredType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DeclaredType::Int => "INT",
                DeclaredType::Float => "FLOAT",
                DeclaredType::Void => "VOID",
                DeclaredType::Char => "CHAR",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum ScopeKind {
    Global,
    Nested,
}

impl From<ScopeId> for ScopeKind {
    fn from(scope_id: ScopeId) -> Self {
        if scope_id == 0 {
            ScopeKind::Global
        } else {
            ScopeKind::Nested
        }
    }
}

impl Display for ScopeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ScopeKind::Global => "GLOBAL",
                ScopeKind::Nested => "NESTED",
            }
        )
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub(crate) struct SymbolKey {
    pub(crate) name: String,
    pub(crate) scope_id: ScopeId,
    pub(crate) function_id: FunctionId,
}

impl SymbolKey {
    pub(crate) fn new<S: Into<String>>(name: S, scope_id: ScopeId, function_id: FunctionId) -> Self {
        SymbolKey {
            name: name.into(),
            scope_id,
            function_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) struct SymbolEntry<'a> {
    pub(crate) name: &'a str,
    pub(crate) declared_type: DeclaredType,
    pub(crate) scope_kind: ScopeKind,
    pub(crate) scope_id: ScopeId,
    pub(crate) function_id: FunctionId,
    pub(crate) lines: &'a [TypeOfLineNo],
}

#[derive(Debug, Default)]
pub(crate) struct SymbolTable {
    occurrences: LineOccurrences<SymbolKey>,
    declared_types: HashMap<SymbolKey, DeclaredType>,
    first_by_name: HashMap<String, SymbolKey>,
}

impl SymbolTable {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub(crate) fn declared_type(&self, key: &SymbolKey) -> Option<DeclaredType> {
        self.declared_types.get(key).copied()
    }

    pub(crate) fn record(
        &mut self,
        key: SymbolKey,
        declared_type: DeclaredType,
        line: TypeOfLineNo,
    ) -> Recorded {
        if !self.declared_types.contains_key(&key) {
            log::debug!("symbol table: {} {} (scope {}, function {}) at line {}",
                        declared_type, key.name, key.scope_id, key.function_id, line);
            self.declared_types.insert(key.clone(), declared_type);
            self.first_by_name.entry(key.name.clone())
                .or_insert_with(|| key.clone());
        }
        self.occurrences.record(key, line)
    }

    pub(crate) fn get(&self, key: &SymbolKey) -> Option<SymbolEntry<'_>> {
        let (key, declared_type) = self.declared_types.get_key_value(key)?;
        let lines = self.occurrences.lines(key)?;
        Some(SymbolEntry {
            name: &key.name,
            declared_type: *declared_type,
            scope_kind: ScopeKind::from(key.scope_id),
            scope_id: key.scope_id,
            function_id: key.function_id,
            lines,
        })
    }

    /// The oldest entry called `name`, whatever its scope or function.
    pub(crate) fn first_named(&self, name: &str) -> Option<SymbolEntry<'_>> {
        self.get(self.first_by_name.get(name)?)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item=SymbolEntry<'_>> + '_ {
        self.occurrences.iter()
            .filter_map(move |(key, _)| self.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_codes() {
        assert_eq!(DeclaredType::Void.type_code(), 1);
        assert_eq!(DeclaredType::Char.type_code(), 2);
        assert_eq!(DeclaredType::Int.type_code(), 3);
        assert_eq!(DeclaredType::Float.type_code(), 4);
        assert_eq!(DeclaredType::from_tag('f'), Some(DeclaredType::Float));
        assert_eq!(DeclaredType::from_tag('x'), None);
    }

    #[test]
    fn test_same_name_in_different_scopes_coexists() {
        let mut table = SymbolTable::new();
        table.record(SymbolKey::new("x", 0, 0), DeclaredType::Int, 2);
        table.record(SymbolKey::new("x", 1, 1), DeclaredType::Float, 6);
        table.record(SymbolKey::new("x", 1, 1), DeclaredType::Float, 8);
        table.record(SymbolKey::new("x", 1, 2), DeclaredType::Char, 12);

        assert_eq!(table.len(), 3);
        let rows: Vec<_> = table.entries()
            .map(|e| (e.declared_type, e.scope_kind, e.function_id, e.lines.to_vec()))
            .collect();
        assert_eq!(rows, vec![
            (DeclaredType::Int, ScopeKind::Global, 0, vec![2]),
            (DeclaredType::Float, ScopeKind::Nested, 1, vec![6, 8]),
            (DeclaredType::Char, ScopeKind::Nested, 2, vec![12]),
        ]);
    }

    #[test]
    fn test_existing_type_is_kept() {
        let mut table = SymbolTable::new();
        let key = SymbolKey::new("count", 0, 0);
        assert_eq!(table.record(key.clone(), DeclaredType::Int, 1), Recorded::Created);
        assert_eq!(table.record(key.clone(), DeclaredType::Float, 4), Recorded::Appended);
        assert_eq!(table.declared_type(&key), Some(DeclaredType::Int));
    }

    #[test]
    fn test_first_named_returns_oldest_entry() {
        let mut table = SymbolTable::new();
        table.record(SymbolKey::new("v", 2, 1), DeclaredType::Char, 3);
        table.record(SymbolKey::new("v", 0, 0), DeclaredType::Float, 9);

        let first = table.first_named("v").unwrap();
        assert_eq!(first.declared_type, DeclaredType::Char);
        assert_eq!(first.scope_id, 2);
        assert!(table.first_named("w").is_none());
    }
}
