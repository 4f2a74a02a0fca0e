use std::*;
use borrow::Borrow;
use hash::Hash;

use multimap::MultiMap;

pub(crate) type TypeOfLineNo = usize;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum Recorded {
    Created,
    Appended,
}

#[derive(Debug, Clone)]
pub(crate) struct LineOccurrences<K: Eq + Hash + Clone> {
    order: Vec<K>,
    lines: MultiMap<K, TypeOfLineNo>,
}

impl<K: Eq + Hash + Clone> LineOccurrences<K> {
    pub(crate) fn new() -> Self {
        LineOccurrences {
            order: vec![],
            lines: MultiMap::new(),
        }
    }

    pub(crate) fn record(&mut self, key: K, line: TypeOfLineNo) -> Recorded {
        let recorded =
            if self.lines.contains_key(&key) {
                Recorded::Appended
            } else {
                self.order.push(key.clone());
                Recorded::Created
            };
        self.lines.insert(key, line);
        recorded
    }

    pub(crate) fn lines<Q: ?Sized>(&self, key: &Q) -> Option<&[TypeOfLineNo]>
        where K: Borrow<Q>, Q: Hash + Eq {
        self.lines.get_vec(key).map(Vec::as_slice)
    }

    #[cfg(test)]
    pub(crate) fn contains_key<Q: ?Sized>(&self, key: &Q) -> bool
        where K: Borrow<Q>, Q: Hash + Eq {
        self.lines.contains_key(key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item=(&K, &[TypeOfLineNo])> + '_ {
        self.order.iter()
            .map(move |key| (key, self.lines(key).unwrap_or_default()))
    }
}

impl<K: Eq + Hash + Clone> Default for LineOccurrences<K> {
    fn default() -> Self {
        LineOccurrences::new()
    }
}
