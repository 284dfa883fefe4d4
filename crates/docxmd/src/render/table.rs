//! Table rendering

use ecow::EcoString;
use log::debug;

use super::RenderContext;
use crate::Result;
use crate::ast::{self, TableColumn};
use crate::common::Alignment;
use crate::dom::{
    Block, GridColumn, Paragraph, StyleKind, Table, TableCell, TableProps, TableRow, Width,
};

/// A full-width table, in fiftieths of a percent.
const FULL_WIDTH: u32 = 5000;

pub(super) fn render_table(ctx: &mut RenderContext, table: &ast::Table) -> Result<()> {
    let style = ctx.table_style();

    let grid = table
        .columns
        .iter()
        .map(|column| GridColumn {
            width: column_width(column),
        })
        .collect();

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let mut cells = Vec::with_capacity(row.cells.len());
        for (i, content) in row.cells.iter().enumerate() {
            let column = table.columns.get(i).copied().unwrap_or_default();
            let para = Paragraph::new().align(cell_alignment(column.alignment));
            let mut children = vec![Block::from(para)];
            ctx.with_container(&mut children, |ctx| ctx.write_leaf_inline(content))?;
            cells.push(TableCell {
                width: column_width(&column),
                children,
            });
        }
        rows.push(TableRow {
            header: row.header,
            cells,
        });
    }

    ctx.insert_table(Table {
        props: TableProps {
            style,
            width: Width::Pct(FULL_WIDTH),
        },
        grid,
        rows,
    });
    Ok(())
}

fn column_width(column: &TableColumn) -> Width {
    match column.width {
        Some(width) if width > 0. => Width::Pct((width * 50.).round() as u32),
        _ => Width::Auto,
    }
}

/// Columns without an alignment marker are right aligned.
fn cell_alignment(alignment: Option<Alignment>) -> Alignment {
    alignment.unwrap_or(Alignment::Right)
}

impl RenderContext<'_> {
    /// The style of rendered tables, resolved once per conversion.
    ///
    /// The lookup order is: the configured style, the style of the first
    /// table in the document, the last table style of the catalog and finally
    /// the first default style.
    fn table_style(&mut self) -> Option<EcoString> {
        if let Some(style) = &self.table_style {
            return style.clone();
        }

        let name = match &self.args.table_style {
            Some(name) => name,
            None => &self.options.table_style,
        };
        let styles = &self.doc.styles;
        let style = (!name.is_empty())
            .then(|| styles.resolve(name))
            .flatten()
            .map(|style| style.id.clone())
            .or_else(|| {
                self.doc
                    .first_table()
                    .and_then(|table| table.props.style.clone())
            })
            .or_else(|| {
                styles
                    .last_of_kind(StyleKind::Table)
                    .map(|style| style.id.clone())
            })
            .or_else(|| styles.first_default().map(|style| style.id.clone()));

        debug!("table style {name:?} resolved to {style:?}");
        self.table_style = Some(style.clone());
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmarked_columns_align_right() {
        assert_eq!(cell_alignment(None), Alignment::Right);
        assert_eq!(cell_alignment(Some(Alignment::Left)), Alignment::Left);
        assert_eq!(cell_alignment(Some(Alignment::Center)), Alignment::Center);
    }

    #[test]
    fn column_widths_in_fiftieths() {
        let column = |width| TableColumn {
            alignment: None,
            width,
        };
        assert_eq!(column_width(&column(Some(25.))), Width::Pct(1250));
        assert_eq!(column_width(&column(None)), Width::Auto);
    }
}
