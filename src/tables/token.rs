use std::*;
use collections::HashMap;
use fmt::{Display, Formatter};

use crate::occurrences::{LineOccurrences, Recorded, TypeOfLineNo};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub(crate) enum TokenCategory {
    Constant,
    Identifier,
    Punctuator,
    Operator,
    Keyword,
    StringLiteral,
    Preprocessor,
}

impl TokenCategory {
    pub(crate) fn from_tag(tag: char) -> Option<TokenCategory> {
        use TokenCategory::*;

        match tag {
            'c' => Some(Constant),
            'v' => Some(Identifier),
            'p' => Some(Punctuator),
            'o' => Some(Operator),
            'k' => Some(Keyword),
            's' => Some(StringLiteral),
            'd' => Some(Preprocessor),
            _ => None,
        }
    }
}

impl Display for TokenCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TokenCategory::Constant => "Constant",
                TokenCategory::Identifier => "Identifier",
                TokenCategory::Punctuator => "Punctuator",
                TokenCategory::Operator => "Operator",
                TokenCategory::Keyword => "Keyword",
                TokenCategory::StringLiteral => "String Literal",
                TokenCategory::Preprocessor => "Preprocessor Statement",
            }
        )
    }
}

#[derive(Debug, Default)]
pub(crate) struct TokenTable {
    occurrences: LineOccurrences<String>,
    categories: HashMap<String, TokenCategory>,
}

impl TokenTable {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    /// The first classification of a lexeme wins; later sightings only add
    /// their line.
    pub(crate) fn classify(
        &mut self,
        lexeme: &str,
        category: TokenCategory,
        line: TypeOfLineNo,
    ) -> Recorded {
        let recorded = self.occurrences.record(lexeme.to_string(), line);
        if recorded == Recorded::Created {
            log::debug!("token table: {} as {} at line {}", lexeme, category, line);
            self.categories.insert(lexeme.to_string(), category);
        }
        recorded
    }

    pub(crate) fn category(&self, lexeme: &str) -> Option<TokenCategory> {
        self.categories.get(lexeme).copied()
    }

    #[cfg(test)]
    pub(crate) fn lines(&self, lexeme: &str) -> Option<&[TypeOfLineNo]> {
        self.occurrences.lines(lexeme)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item=(&str, TokenCategory, &[TypeOfLineNo])> + '_ {
        self.occurrences.iter()
            .filter_map(move |(lexeme, lines)| {
                Some((lexeme.as_str(), self.category(lexeme)?, lines))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags() {
        let tags: String = "cvpoksd".to_string();
        let categories: Vec<String> = tags.chars()
            .map(|tag| TokenCategory::from_tag(tag).unwrap().to_string())
            .collect();
        assert_eq!(categories, vec![
            "Constant", "Identifier", "Punctuator", "Operator", "Keyword",
            "String Literal", "Preprocessor Statement",
        ]);
        assert_eq!(TokenCategory::from_tag('x'), None);
    }

    #[test]
    fn test_first_classification_wins() {
        let mut tokens = TokenTable::new();
        assert_eq!(tokens.classify("++", TokenCategory::Operator, 4), Recorded::Created);
        assert_eq!(tokens.classify("++", TokenCategory::Punctuator, 9), Recorded::Appended);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.category("++"), Some(TokenCategory::Operator));
        assert_eq!(tokens.lines("++"), Some(&[4, 9][..]));
    }
}
