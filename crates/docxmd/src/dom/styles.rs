//! Document style catalog

use ecow::EcoString;

/// The kind of content a style applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    /// Paragraph style.
    Paragraph,
    /// Character (run) style.
    Character,
    /// Table style.
    Table,
    /// Numbering style.
    Numbering,
}

/// A style definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// The style id referenced by paragraphs, runs and tables.
    pub id: EcoString,
    /// The display name.
    pub name: EcoString,
    /// What the style applies to.
    pub kind: StyleKind,
    /// Whether the style is the default of its kind.
    pub is_default: bool,
    /// Suppress spacing between paragraphs of the same style.
    pub contextual_spacing: bool,
    /// The parent style id.
    pub based_on: Option<EcoString>,
}

impl Style {
    /// Creates a style.
    pub fn new(id: impl Into<EcoString>, kind: StyleKind) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            kind,
            is_default: false,
            contextual_spacing: false,
            based_on: None,
        }
    }

    /// Sets the display name.
    pub fn name(mut self, name: impl Into<EcoString>) -> Self {
        self.name = name.into();
        self
    }

    /// Flags the style as the default of its kind.
    pub fn default_style(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Enables contextual spacing.
    pub fn contextual_spacing(mut self) -> Self {
        self.contextual_spacing = true;
        self
    }

    /// Sets the parent style.
    pub fn based_on(mut self, parent: impl Into<EcoString>) -> Self {
        self.based_on = Some(parent.into());
        self
    }
}

/// The style catalog of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleCatalog {
    /// Styles in catalog order.
    pub styles: Vec<Style>,
}

impl StyleCatalog {
    /// Adds a style.
    pub fn add(&mut self, style: Style) -> &Style {
        self.styles.push(style);
        &self.styles[self.styles.len() - 1]
    }

    /// Finds a style by id.
    pub fn by_id(&self, id: &str) -> Option<&Style> {
        self.styles.iter().find(|style| style.id == id)
    }

    /// Finds a style by display name, case-insensitively as word processors
    /// do.
    pub fn by_name(&self, name: &str) -> Option<&Style> {
        self.styles
            .iter()
            .find(|style| style.name.eq_ignore_ascii_case(name))
    }

    /// Resolves a user supplied style reference, which may be a display name
    /// or an id.
    pub fn resolve(&self, name_or_id: &str) -> Option<&Style> {
        self.by_name(name_or_id).or_else(|| self.by_id(name_or_id))
    }

    /// The last style of the given kind.
    pub fn last_of_kind(&self, kind: StyleKind) -> Option<&Style> {
        self.styles.iter().rev().find(|style| style.kind == kind)
    }

    /// The first style flagged as default, of any kind.
    pub fn first_default(&self) -> Option<&Style> {
        self.styles.iter().find(|style| style.is_default)
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

/// Derives a style id from a display name, e.g. `List Bullet` → `ListBullet`.
pub(crate) fn style_id_from_name(name: &str) -> EcoString {
    name.chars().filter(|c| c.is_alphanumeric()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_name() {
        let mut catalog = StyleCatalog::default();
        catalog.add(Style::new("Grid", StyleKind::Table).name("Plain"));
        catalog.add(Style::new("Plain", StyleKind::Table).name("Grid"));

        assert_eq!(catalog.resolve("grid").map(|s| s.id.as_str()), Some("Plain"));
        assert_eq!(catalog.resolve("Missing"), None);
    }

    #[test]
    fn style_id_strips_spaces() {
        assert_eq!(style_id_from_name("List Bullet 2"), "ListBullet2");
    }
}
