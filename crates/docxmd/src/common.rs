//! Common types for the conversion system.

/// The kind of a markdown list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Numbered list (`1.`, `2)`).
    Ordered,
    /// Bullet list (`-`, `*`, `+`).
    Unordered,
}

impl ListKind {
    /// Returns the kind for the `ordered` flag of a list node.
    pub fn from_ordered(ordered: bool) -> Self {
        if ordered {
            ListKind::Ordered
        } else {
            ListKind::Unordered
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ListKind::Ordered => 0,
            ListKind::Unordered => 1,
        }
    }
}

/// Horizontal alignment of a paragraph or table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Left aligned.
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
}
