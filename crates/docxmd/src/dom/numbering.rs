//! Document numbering catalog

use ecow::EcoString;
use serde::Deserialize;

/// The numbering format of a list level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    /// 1, 2, 3
    #[default]
    Decimal,
    /// a, b, c
    LowerLetter,
    /// A, B, C
    UpperLetter,
    /// i, ii, iii
    LowerRoman,
    /// I, II, III
    UpperRoman,
    /// A glyph instead of a number.
    Bullet,
}

impl NumberFormat {
    /// The WordprocessingML name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            NumberFormat::Decimal => "decimal",
            NumberFormat::LowerLetter => "lowerLetter",
            NumberFormat::UpperLetter => "upperLetter",
            NumberFormat::LowerRoman => "lowerRoman",
            NumberFormat::UpperRoman => "upperRoman",
            NumberFormat::Bullet => "bullet",
        }
    }
}

/// One level of an abstract numbering definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    /// The level index, starting at 0.
    pub level: usize,
    /// The first number.
    pub start: u32,
    /// The number format.
    pub format: NumberFormat,
    /// The level text, e.g. `%1.` or `•`.
    pub text: EcoString,
    /// Left indentation in twips.
    pub indent_left: i32,
    /// Hanging indentation in twips.
    pub hanging: i32,
    /// Font of the number or glyph.
    pub font: Option<EcoString>,
    /// Restart numbering after this level, if any.
    pub restart_after: Option<usize>,
}

/// An abstract numbering definition shared by numbering instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbstractNumbering {
    /// The abstract numbering id.
    pub id: usize,
    /// The id of the paragraph style this definition belongs to.
    pub style_link: Option<EcoString>,
    /// Level definitions, ordered by level.
    pub levels: Vec<Level>,
}

impl AbstractNumbering {
    /// Creates an empty definition.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            style_link: None,
            levels: Vec::new(),
        }
    }

    /// Returns the definition of `level`.
    pub fn level(&self, level: usize) -> Option<&Level> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// Inserts a level definition, keeping the levels ordered.
    pub fn insert_level(&mut self, level: Level) {
        let pos = self.levels.partition_point(|l| l.level < level.level);
        self.levels.insert(pos, level);
    }
}

/// A numbering instance, referenced by paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberingInstance {
    /// The numbering id referenced by paragraphs.
    pub id: usize,
    /// The abstract definition of the instance.
    pub abstract_id: usize,
}

/// The numbering catalog of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberingCatalog {
    /// Abstract definitions.
    pub abstracts: Vec<AbstractNumbering>,
    /// Instances.
    pub instances: Vec<NumberingInstance>,
}

impl NumberingCatalog {
    /// Returns an abstract definition by id.
    pub fn abstract_by_id(&self, id: usize) -> Option<&AbstractNumbering> {
        self.abstracts.iter().find(|abs| abs.id == id)
    }

    /// Returns an abstract definition by id, mutably.
    pub fn abstract_by_id_mut(&mut self, id: usize) -> Option<&mut AbstractNumbering> {
        self.abstracts.iter_mut().find(|abs| abs.id == id)
    }

    /// Returns the first instance of an abstract definition.
    pub fn instance_of(&self, abstract_id: usize) -> Option<&NumberingInstance> {
        self.instances
            .iter()
            .find(|num| num.abstract_id == abstract_id)
    }

    /// Returns an instance by id.
    pub fn instance(&self, id: usize) -> Option<&NumberingInstance> {
        self.instances.iter().find(|num| num.id == id)
    }

    /// Adds an empty abstract definition with a fresh id.
    pub fn add_abstract(&mut self) -> &mut AbstractNumbering {
        let id = self.abstracts.iter().map(|abs| abs.id + 1).max().unwrap_or(0);
        self.abstracts.push(AbstractNumbering::new(id));
        let last = self.abstracts.len() - 1;
        &mut self.abstracts[last]
    }

    /// Adds an instance of `abstract_id` with a fresh id.
    ///
    /// Numbering ids start at 1, since 0 means "no numbering".
    pub fn add_instance(&mut self, abstract_id: usize) -> NumberingInstance {
        let id = self.instances.iter().map(|num| num.id + 1).max().unwrap_or(1);
        let instance = NumberingInstance { id, abstract_id };
        self.instances.push(instance);
        instance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(level: usize) -> Level {
        Level {
            level,
            start: 1,
            format: NumberFormat::Decimal,
            text: "%1.".into(),
            indent_left: 720,
            hanging: 360,
            font: None,
            restart_after: None,
        }
    }

    #[test]
    fn fresh_ids() {
        let mut catalog = NumberingCatalog::default();
        let first = catalog.add_abstract().id;
        let second = catalog.add_abstract().id;
        assert_eq!((first, second), (0, 1));

        let num = catalog.add_instance(second);
        assert_eq!(num.id, 1);
        assert_eq!(catalog.add_instance(first).id, 2);
        assert_eq!(catalog.instance_of(second).map(|n| n.id), Some(1));
    }

    #[test]
    fn levels_stay_ordered() {
        let mut abs = AbstractNumbering::new(0);
        abs.insert_level(level(2));
        abs.insert_level(level(0));
        abs.insert_level(level(1));
        let order: Vec<_> = abs.levels.iter().map(|l| l.level).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
