//! List styles and numbering definitions in the destination document

use ecow::{EcoString, eco_format};
use log::debug;

use crate::Result;
use crate::common::ListKind;
use crate::dom::{Document, Level, Style, StyleKind, style_id_from_name};
use crate::error::Error;
use crate::options::ListOptions;

/// Twips of left indentation per list level.
const INDENT_STEP: i32 = 720;

/// The paragraph style and numbering instance of one list kind.
///
/// Both live in the document catalogs, so converting many fragments into one
/// document shares a single style and a single abstract numbering definition
/// per kind.
#[derive(Debug, Clone)]
pub(crate) struct ListStyleFactory {
    pub kind: ListKind,
    /// The paragraph style id of list items.
    pub style_id: EcoString,
    /// The numbering instance referenced by list items.
    pub num_id: usize,
    pub abstract_id: usize,
}

impl ListStyleFactory {
    /// Resolves or creates the list style named `style_name` and its
    /// numbering.
    pub fn ensure_exists(doc: &mut Document, kind: ListKind, style_name: &str) -> Self {
        let style_id = match doc.styles.resolve(style_name) {
            Some(style) => style.id.clone(),
            None => {
                let mut id = style_id_from_name(style_name);
                if id.is_empty() {
                    id = eco_format!("{kind:?}List");
                }
                debug!("creating list style {id} ({style_name})");
                doc.styles.add(
                    Style::new(id.clone(), StyleKind::Paragraph)
                        .name(style_name)
                        .contextual_spacing(),
                );
                id
            }
        };

        // several definitions may point at the style, the most complete wins
        let linked = doc
            .numbering
            .abstracts
            .iter()
            .filter(|abs| abs.style_link.as_deref() == Some(style_id.as_str()))
            .max_by_key(|abs| abs.levels.len())
            .map(|abs| abs.id);

        let (abstract_id, num_id) = match linked {
            Some(abstract_id) => {
                let num_id = match doc.numbering.instance_of(abstract_id) {
                    Some(num) => num.id,
                    None => doc.numbering.add_instance(abstract_id).id,
                };
                (abstract_id, num_id)
            }
            None => {
                let abs = doc.numbering.add_abstract();
                abs.style_link = Some(style_id.clone());
                let abstract_id = abs.id;
                debug!("creating numbering definition {abstract_id} for {style_id}");
                (abstract_id, doc.numbering.add_instance(abstract_id).id)
            }
        };

        Self {
            kind,
            style_id,
            num_id,
            abstract_id,
        }
    }

    /// Makes sure the numbering definition has `level`, synthesizing it from
    /// the configured levels, which repeat for deep nesting.
    pub fn ensure_level(&self, doc: &mut Document, level: usize, list: &ListOptions) -> Result<()> {
        let abs = doc
            .numbering
            .abstract_by_id_mut(self.abstract_id)
            .ok_or_else(|| format!("numbering definition {} is missing", self.abstract_id))?;
        if abs.level(level).is_some() {
            return Ok(());
        }

        let Some(cfg) = list.levels.get(level % list.levels.len().max(1)) else {
            return Err(Error::configuration(format!(
                "no list levels configured for {:?} lists",
                self.kind
            )));
        };

        let indent = INDENT_STEP * (level as i32 + 1);
        abs.insert_level(Level {
            level,
            start: 1,
            format: cfg.format,
            text: cfg.text.replace("{}", &format!("%{}", level + 1)).into(),
            indent_left: indent,
            hanging: if level % 2 == 0 { 360 } else { 420 },
            font: cfg.font.clone(),
            restart_after: match self.kind {
                ListKind::Ordered if level > 0 => Some(level - 1),
                _ => None,
            },
        });
        Ok(())
    }
}
