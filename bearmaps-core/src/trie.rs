//! Prefix index over cleaned location names.
//!
//! Names are cleaned by [`clean_name`] before they touch the trie: anything
//! other than ASCII letters and spaces is dropped and letters are lowercased.
//! Each trie node branches 27 ways, one [`CharSlot`] per letter plus a shared
//! [`CharSlot::Other`] slot. Only the space survives cleaning, so in practice
//! `Other` means "space".

/// Strip everything but ASCII letters and spaces, then lowercase.
///
/// # Examples
/// ```
/// use bearmaps_core::clean_name;
///
/// assert_eq!(clean_name("Peet's Coffee & Tea!"), "peets coffee  tea");
/// ```
#[must_use]
pub fn clean_name(name: &str) -> String {
    name.chars()
        .filter(|ch| ch.is_ascii_alphabetic() || *ch == ' ')
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Branch slot of a trie node.
///
/// The 26 lowercase letters get their own slot; every other character shares
/// [`CharSlot::Other`]. Space and any stray symbol therefore collide, which
/// keeps lookups compatible with existing autocomplete data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharSlot {
    /// A lowercase ASCII letter, stored as its offset from `a`.
    Letter(u8),
    /// Any character that is not a lowercase ASCII letter.
    Other,
}

impl CharSlot {
    /// Number of distinct slots.
    pub const COUNT: usize = 27;

    /// Slot for a cleaned character.
    #[must_use]
    pub fn of(ch: char) -> Self {
        u8::try_from(ch)
            .ok()
            .filter(u8::is_ascii_lowercase)
            .map_or(Self::Other, |byte| Self::Letter(byte - b'a'))
    }

    /// Position of this slot in a node's child array.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Letter(offset) => usize::from(offset),
            Self::Other => Self::COUNT - 1,
        }
    }
}

#[derive(Debug, Default)]
struct Node {
    children: [Option<Box<Node>>; CharSlot::COUNT],
    entry: Option<Entry>,
}

#[derive(Debug)]
struct Entry {
    display: String,
    ids: Vec<u64>,
}

impl Node {
    fn child(&self, slot: CharSlot) -> Option<&Self> {
        self.children.get(slot.index()).and_then(Option::as_deref)
    }

    #[expect(
        clippy::indexing_slicing,
        reason = "CharSlot::index is always below CharSlot::COUNT"
    )]
    fn child_or_insert(&mut self, slot: CharSlot) -> &mut Self {
        self.children[slot.index()].get_or_insert_with(Box::default)
    }

    fn collect_names(&self, names: &mut Vec<String>) {
        if let Some(entry) = &self.entry {
            names.push(entry.display.clone());
        }
        for child in self.children.iter().flatten() {
            child.collect_names(names);
        }
    }
}

/// Autocomplete index mapping cleaned names to location identifiers.
///
/// Insertion is monotonic; there is no removal.
///
/// # Examples
/// ```
/// use bearmaps_core::PrefixIndex;
///
/// let mut index = PrefixIndex::default();
/// index.insert("San Francisco", 1);
/// index.insert("San Pablo Ave", 2);
///
/// assert_eq!(index.search_prefix("SAN F"), vec!["San Francisco"]);
/// assert_eq!(index.lookup_exact("san francisco"), &[1]);
/// ```
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: Node,
    len: usize,
}

impl PrefixIndex {
    /// Record that location `id` is called `name`.
    ///
    /// Several identifiers may share one cleaned name; they are kept in
    /// insertion order. The stored display name is the latest original
    /// spelling inserted for that cleaned name.
    pub fn insert(&mut self, name: &str, id: u64) {
        let mut node = &mut self.root;
        for ch in clean_name(name).chars() {
            node = node.child_or_insert(CharSlot::of(ch));
        }
        match &mut node.entry {
            Some(entry) => {
                name.clone_into(&mut entry.display);
                entry.ids.push(id);
            }
            None => {
                node.entry = Some(Entry {
                    display: name.to_owned(),
                    ids: vec![id],
                });
                self.len += 1;
            }
        }
    }

    /// Display names whose cleaned form starts with the cleaned `prefix`.
    ///
    /// Results follow the trie's slot order (letters `a..z`, then space)
    /// depth-first, with a name preceding any longer name it prefixes.
    #[must_use]
    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        let mut names = Vec::new();
        if let Some(node) = self.find(&clean_name(prefix)) {
            node.collect_names(&mut names);
        }
        names
    }

    /// Identifiers whose cleaned name equals the cleaned `name`.
    #[must_use]
    pub fn lookup_exact(&self, name: &str) -> &[u64] {
        self.find(&clean_name(name))
            .and_then(|node| node.entry.as_ref())
            .map_or(&[], |entry| entry.ids.as_slice())
    }

    /// Number of distinct cleaned names.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn find(&self, cleaned: &str) -> Option<&Node> {
        cleaned
            .chars()
            .try_fold(&self.root, |node, ch| node.child(CharSlot::of(ch)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn index() -> PrefixIndex {
        let mut index = PrefixIndex::default();
        index.insert("San Francisco", 1);
        index.insert("San Pablo Ave", 2);
        index.insert("Sather Gate", 3);
        index.insert("Top Dog", 4);
        index
    }

    #[rstest]
    #[case('a', CharSlot::Letter(0))]
    #[case('z', CharSlot::Letter(25))]
    #[case(' ', CharSlot::Other)]
    #[case('A', CharSlot::Other)]
    #[case('é', CharSlot::Other)]
    fn maps_characters_to_slots(#[case] ch: char, #[case] expected: CharSlot) {
        assert_eq!(CharSlot::of(ch), expected);
    }

    #[rstest]
    fn slot_indices_are_distinct_and_bounded() {
        let mut seen: Vec<usize> = ('a'..='z').map(|ch| CharSlot::of(ch).index()).collect();
        seen.push(CharSlot::Other.index());
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), CharSlot::COUNT);
        assert!(seen.iter().all(|index| *index < CharSlot::COUNT));
    }

    #[rstest]
    fn cleaning_drops_digits_and_punctuation() {
        assert_eq!(clean_name("1st St. (North)"), "st st north");
    }

    #[rstest]
    #[case("san", vec!["San Francisco", "San Pablo Ave"])]
    #[case("sa", vec!["San Francisco", "San Pablo Ave", "Sather Gate"])]
    #[case("San P", vec!["San Pablo Ave"])]
    #[case("t", vec!["Top Dog"])]
    #[case("xyz", vec![])]
    #[case("sanx", vec![])]
    fn searches_by_prefix(index: PrefixIndex, #[case] prefix: &str, #[case] expected: Vec<&str>) {
        assert_eq!(index.search_prefix(prefix), expected);
    }

    #[rstest]
    fn empty_prefix_lists_every_name(index: PrefixIndex) {
        assert_eq!(index.search_prefix("").len(), 4);
    }

    #[rstest]
    fn shorter_name_precedes_its_extensions() {
        let mut index = PrefixIndex::default();
        index.insert("Oak Street", 1);
        index.insert("Oak", 2);
        assert_eq!(index.search_prefix("oa"), vec!["Oak", "Oak Street"]);
    }

    #[rstest]
    fn exact_lookup_ignores_case_and_punctuation(index: PrefixIndex) {
        assert_eq!(index.lookup_exact("San Francisco"), &[1]);
        assert_eq!(index.lookup_exact("SAN FRANCISCO"), &[1]);
        assert_eq!(index.lookup_exact("san-francisco!"), &[] as &[u64]);
        assert_eq!(index.lookup_exact("Top Dog."), &[4]);
    }

    #[rstest]
    fn exact_lookup_requires_terminal_node(index: PrefixIndex) {
        assert!(index.lookup_exact("San").is_empty());
        assert!(index.lookup_exact("Sather Gates").is_empty());
    }

    #[rstest]
    fn shared_names_accumulate_ids() {
        let mut index = PrefixIndex::default();
        index.insert("Safeway", 10);
        index.insert("SAFEWAY", 11);
        assert_eq!(index.lookup_exact("safeway"), &[10, 11]);
        assert_eq!(index.search_prefix("safe"), vec!["SAFEWAY"]);
        assert_eq!(index.len(), 1);
    }
}
