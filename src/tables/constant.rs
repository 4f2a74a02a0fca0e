use crate::occurrences::{LineOccurrences, Recorded, TypeOfLineNo};

#[derive(Debug, Default)]
pub(crate) struct ConstantTable {
    occurrences: LineOccurrences<String>,
}

impl ConstantTable {
    pub(crate) fn new() -> Self {
        Default::default()
    }

    pub(crate) fn add(&mut self, literal: &str, line: TypeOfLineNo) -> Recorded {
        let recorded = self.occurrences.record(literal.to_string(), line);
        if recorded == Recorded::Created {
            log::debug!("constant table: {} at line {}", literal, line);
        }
        recorded
    }

    #[cfg(test)]
    pub(crate) fn lines(&self, literal: &str) -> Option<&[TypeOfLineNo]> {
        self.occurrences.lines(literal)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item=(&str, &[TypeOfLineNo])> + '_ {
        self.occurrences.iter()
            .map(|(literal, lines)| (literal.as_str(), lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_not_scoped() {
        let mut constants = ConstantTable::new();
        assert_eq!(constants.add("10", 2), Recorded::Created);
        assert_eq!(constants.add("3.5", 2), Recorded::Created);
        assert_eq!(constants.add("10", 7), Recorded::Appended);

        assert_eq!(constants.lines("10"), Some(&[2, 7][..]));
        let listed: Vec<&str> = constants.entries().map(|(text, _)| text).collect();
        assert_eq!(listed, vec!["10", "3.5"]);
    }
}
