//! Render options and inline arguments.

use ecow::EcoString;
use log::warn;
use serde::Deserialize;

use crate::Result;
use crate::common::ListKind;
use crate::dom::NumberFormat;
use crate::error::Error;

/// Options of a [`crate::MarkdownConverter`].
///
/// The options can be loaded from TOML, with kebab-case keys:
///
/// ```toml
/// table-style = "Grid Table 4"
/// max-image-width = 5486400
///
/// [ordered]
/// style-name = "List Number"
/// levels = [
///     { format = "decimal", text = "{}." },
///     { format = "lowerLetter", text = "{})" },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderOptions {
    /// The table style name used when no `table-style` argument is given.
    pub table_style: EcoString,
    /// Bullet list configuration.
    pub unordered: ListOptions,
    /// Numbered list configuration.
    pub ordered: ListOptions,
    /// The character that opens a template tag. Rendered output without it
    /// skips the substitution pass.
    pub tag_open: char,
    /// The maximum width of an image in EMU.
    pub max_image_width: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_style: "Table Grid".into(),
            unordered: ListOptions::unordered(),
            ordered: ListOptions::ordered(),
            tag_open: '{',
            // 6 inches, the text width of a Letter page with 1.25" margins
            max_image_width: 5_486_400,
        }
    }
}

impl RenderOptions {
    /// Parses options from a TOML document. Missing keys keep their defaults.
    pub fn from_toml(src: &str) -> Result<Self> {
        let options: Self = toml::from_str(src)
            .map_err(|e| Error::configuration(format!("cannot parse options: {e}")))?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options can be used to render.
    pub fn validate(&self) -> Result<()> {
        for (kind, list) in [
            (ListKind::Ordered, &self.ordered),
            (ListKind::Unordered, &self.unordered),
        ] {
            if list.levels.is_empty() {
                return Err(Error::configuration(format!(
                    "no list levels configured for {kind:?} lists"
                )));
            }
        }
        if self.max_image_width == 0 {
            return Err(Error::configuration("max-image-width must be positive"));
        }
        Ok(())
    }

    /// The list configuration of `kind`.
    pub fn list(&self, kind: ListKind) -> &ListOptions {
        match kind {
            ListKind::Ordered => &self.ordered,
            ListKind::Unordered => &self.unordered,
        }
    }
}

/// Configuration of one list kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ListOptions {
    /// The paragraph style of list items, by display name.
    pub style_name: EcoString,
    /// Level configurations. Deeper levels cycle through them.
    pub levels: Vec<LevelOptions>,
}

impl ListOptions {
    /// The default numbered list configuration.
    pub fn ordered() -> Self {
        Self {
            style_name: "List Number".into(),
            levels: vec![
                LevelOptions::new(NumberFormat::Decimal, "{}."),
                LevelOptions::new(NumberFormat::LowerLetter, "{}."),
                LevelOptions::new(NumberFormat::LowerRoman, "{}."),
            ],
        }
    }

    /// The default bullet list configuration.
    pub fn unordered() -> Self {
        Self {
            style_name: "List Bullet".into(),
            levels: vec![
                LevelOptions::new(NumberFormat::Bullet, "•"),
                LevelOptions::new(NumberFormat::Bullet, "o").font("Courier New"),
                LevelOptions::new(NumberFormat::Bullet, "▪"),
            ],
        }
    }
}

/// Configuration of one list level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LevelOptions {
    /// The number format.
    #[serde(default)]
    pub format: NumberFormat,
    /// The level text. `{}` stands for the number of the level.
    pub text: EcoString,
    /// The font of the number or glyph.
    #[serde(default)]
    pub font: Option<EcoString>,
}

impl LevelOptions {
    /// Creates a level configuration.
    pub fn new(format: NumberFormat, text: impl Into<EcoString>) -> Self {
        Self {
            format,
            text: text.into(),
            font: None,
        }
    }

    /// Sets the glyph font.
    pub fn font(mut self, font: impl Into<EcoString>) -> Self {
        self.font = Some(font.into());
        self
    }
}

/// Inline arguments of a markdown tag, e.g. `table-style=Light Grid`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownArgs {
    /// Overrides the table style name.
    pub table_style: Option<EcoString>,
    /// Overrides the bullet list style name.
    pub list_style: Option<EcoString>,
    /// Overrides the numbered list style name.
    pub ordered_list_style: Option<EcoString>,
}

impl MarkdownArgs {
    /// Parses a comma separated argument string, e.g.
    /// `table-style=Plain Table 1, list-style=Bullets`.
    pub fn parse(args: &str) -> Self {
        Self::from_items(args.split(','))
    }

    /// Collects arguments from `key=value` items. Unknown keys and items
    /// without a value are ignored.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a str>) -> Self {
        let mut args = Self::default();
        for item in items {
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            let Some((key, value)) = item.split_once('=') else {
                warn!("markdown argument `{item}` has no value, ignoring");
                continue;
            };

            let value = value.trim();
            let slot = match key.trim() {
                "table-style" => &mut args.table_style,
                "list-style" => &mut args.list_style,
                "ordered-list-style" => &mut args.ordered_list_style,
                key => {
                    warn!("unknown markdown argument `{key}`, ignoring");
                    continue;
                }
            };
            *slot = (!value.is_empty()).then(|| value.into());
        }
        args
    }

    /// The list style override of `kind`.
    pub fn list_style(&self, kind: ListKind) -> Option<&EcoString> {
        match kind {
            ListKind::Ordered => self.ordered_list_style.as_ref(),
            ListKind::Unordered => self.list_style.as_ref(),
        }
    }
}
