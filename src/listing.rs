use std::*;
use path::Path;

use anyhow::{Context, Result};
use itertools::Itertools;

use crate::occurrences::TypeOfLineNo;
use crate::session::AnalysisSession;
use crate::tables::{ConstantTable, SymbolTable, TokenTable};

pub(crate) const SYMBOL_TABLE_FILE: &str = "symbolTable";
pub(crate) const CONSTANT_TABLE_FILE: &str = "constantTable";
pub(crate) const TOKEN_TABLE_FILE: &str = "parseTable";

fn join_lines(lines: &[TypeOfLineNo]) -> String {
    lines.iter().join(" ")
}

pub(crate) fn symbol_table_listing(symbols: &SymbolTable) -> String {
    if symbols.is_empty() {
        return "No symbol table entries\n".to_string();
    }

    let mut res = String::from("Lexeme | Type | Line No | Scope | Func No\n");
    for entry in symbols.entries() {
        res += &format!("{} | {} | {} | {} | {}\n",
                        entry.name,
                        entry.declared_type,
                        join_lines(entry.lines),
                        entry.scope_kind,
                        entry.function_id);
    }
    res
}

pub(crate) fn constant_table_listing(constants: &ConstantTable) -> String {
    if constants.is_empty() {
        return "No constant table entries\n".to_string();
    }

    iter::once("Value | Line No".to_string())
        .chain(constants.entries()
            .map(|(literal, lines)| format!("{} | {}", literal, join_lines(lines))))
        .map(|row| row + "\n")
        .collect()
}

pub(crate) fn token_table_listing(tokens: &TokenTable) -> String {
    if tokens.is_empty() {
        return "No token table entries\n".to_string();
    }

    iter::once("Lexeme | Token Type | Line No".to_string())
        .chain(tokens.entries()
            .map(|(lexeme, category, lines)| {
                format!("{} | {} | {}", lexeme, category, join_lines(lines))
            }))
        .map(|row| row + "\n")
        .collect()
}

pub(crate) fn write_listings(session: &AnalysisSession, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;

    for (file_name, listing) in [
        (SYMBOL_TABLE_FILE, symbol_table_listing(session.symbols())),
        (CONSTANT_TABLE_FILE, constant_table_listing(session.constants())),
        (TOKEN_TABLE_FILE, token_table_listing(session.tokens())),
    ] {
        let path = dir.join(file_name);
        fs::write(&path, listing)
            .with_context(|| format!("cannot write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::tables::DeclaredType;

    use super::*;

    #[test]
    fn test_empty_listings() {
        let session = AnalysisSession::new("input.c");
        assert_eq!(symbol_table_listing(session.symbols()), "No symbol table entries\n");
        assert_eq!(constant_table_listing(session.constants()), "No constant table entries\n");
        assert_eq!(token_table_listing(session.tokens()), "No token table entries\n");
    }

    #[test]
    fn test_symbol_table_listing() -> Result<()> {
        let mut session = AnalysisSession::new("input.c");
        session.set_declared_type(DeclaredType::Int);
        session.check_declaration("main", 1, 0)?;
        session.enter_function();
        session.enter_scope();
        session.set_declared_type(DeclaredType::Float);
        session.check_declaration("ratio", 3, session.scope_id())?;
        session.resolve_and_use("ratio", 4);
        session.resolve_and_use("ratio", 6);

        assert_eq!(symbol_table_listing(session.symbols()), "\
Lexeme | Type | Line No | Scope | Func No
main | INT | 1 | GLOBAL | 0
ratio | FLOAT | 3 4 6 | NESTED | 1
");
        Ok(())
    }

    #[test]
    fn test_constant_and_token_listings() -> Result<()> {
        let mut session = AnalysisSession::new("input.c");
        session.add_constant("10", 2);
        session.add_constant("10", 5);
        session.classify("\"%d\\n\"", 's', 3)?;
        session.classify("#include", 'd', 1)?;

        assert_eq!(constant_table_listing(session.constants()), "\
Value | Line No
10 | 2 5
");
        assert_eq!(token_table_listing(session.tokens()), "\
Lexeme | Token Type | Line No
\"%d\\n\" | String Literal | 3
#include | Preprocessor Statement | 1
");
        Ok(())
    }

    #[test]
    fn test_write_listings() -> Result<()> {
        let mut session = AnalysisSession::new("input.c");
        session.set_declared_type(DeclaredType::Int);
        session.declare_or_record("n", 1, 0)?;
        session.add_constant("10", 1);
        session.classify("n", 'v', 1)?;

        let dir = env::temp_dir()
            .join(format!("c-sema-listing-{}", process::id()))
            .join("tables");
        write_listings(&session, &dir)?;

        assert_eq!(fs::read_to_string(dir.join(SYMBOL_TABLE_FILE))?,
                   symbol_table_listing(session.symbols()));
        assert_eq!(fs::read_to_string(dir.join(CONSTANT_TABLE_FILE))?,
                   constant_table_listing(session.constants()));
        assert_eq!(fs::read_to_string(dir.join(TOKEN_TABLE_FILE))?,
                   token_table_listing(session.tokens()));
        assert!(fs::read_to_string(dir.join(SYMBOL_TABLE_FILE))?.contains("n | INT | 1 | GLOBAL | 0"));

        fs::remove_dir_all(dir.parent().unwrap())?;
        Ok(())
    }
}
