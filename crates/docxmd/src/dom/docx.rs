//! Packing the document model into a DOCX archive with docx-rs

use std::io::Cursor;

use docx_rs as dx;
use log::warn;

use super::{
    Block, Document, Level, Paragraph, Run, RunChild, StyleKind, Table, TableCell, Width,
};
use crate::Result;
use crate::common::Alignment;

impl Document {
    /// Packs the document into the bytes of a `.docx` file.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.build_docx()
            .build()
            .pack(&mut Cursor::new(&mut buffer))
            .map_err(|e| format!("Failed to pack DOCX: {e}"))?;

        Ok(buffer)
    }

    fn build_docx(&self) -> dx::Docx {
        let mut docx = dx::Docx::new();

        for style in &self.styles.styles {
            let kind = match style.kind {
                StyleKind::Paragraph => dx::StyleType::Paragraph,
                StyleKind::Character => dx::StyleType::Character,
                StyleKind::Table => dx::StyleType::Table,
                StyleKind::Numbering => dx::StyleType::Numbering,
            };
            let mut out = dx::Style::new(style.id.as_str(), kind).name(style.name.as_str());
            if let Some(parent) = &style.based_on {
                out = out.based_on(parent.as_str());
            }
            if style.contextual_spacing {
                // no space between items, the visible effect of contextualSpacing
                out = out.line_spacing(dx::LineSpacing::new().before(0).after(0));
            }
            docx = docx.add_style(out);
        }

        for abs in &self.numbering.abstracts {
            let mut out = dx::AbstractNumbering::new(abs.id);
            for level in &abs.levels {
                out = out.add_level(convert_level(level));
            }
            docx = docx.add_abstract_numbering(out);
        }
        for num in &self.numbering.instances {
            docx = docx.add_numbering(dx::Numbering::new(num.id, num.abstract_id));
        }

        for block in &self.body {
            docx = match block {
                Block::Paragraph(para) => docx.add_paragraph(self.convert_paragraph(para)),
                Block::Table(table) => docx.add_table(self.convert_table(table)),
            };
        }
        docx
    }

    fn convert_paragraph(&self, para: &Paragraph) -> dx::Paragraph {
        let mut out = dx::Paragraph::new();
        let props = &para.props;
        if let Some(style) = &props.style {
            out = out.style(style.as_str());
        }
        if let Some(num) = &props.numbering {
            out = out.numbering(
                dx::NumberingId::new(num.num_id),
                dx::IndentLevel::new(num.level),
            );
        }
        if let Some(align) = props.align {
            out = out.align(match align {
                Alignment::Left => dx::AlignmentType::Left,
                Alignment::Center => dx::AlignmentType::Center,
                Alignment::Right => dx::AlignmentType::Right,
            });
        }
        if let Some(border) = &props.bottom_border {
            out = out.set_border(
                dx::ParagraphBorder::new(dx::ParagraphBorderPosition::Bottom)
                    .val(dx::BorderType::Single)
                    .size(border.size as usize)
                    .space(border.space as usize)
                    .color("auto"),
            );
        }

        for run in &para.children {
            out = out.add_run(self.convert_run(run));
        }
        out
    }

    fn convert_run(&self, run: &Run) -> dx::Run {
        let mut out = dx::Run::new();
        let props = &run.props;
        if let Some(style) = &props.style {
            out = out.style(style.as_str());
        }
        if props.bold == Some(true) {
            out = out.bold();
        }
        if props.italic == Some(true) {
            out = out.italic();
        }
        if props.strike == Some(true) {
            out = out.strike();
        }
        if let Some(size) = props.size {
            out = out.size(size);
        }
        if let Some(color) = &props.color {
            out = out.color(color.as_str());
        }
        if let Some(font) = &props.font {
            out = out.fonts(run_fonts(font));
        }

        for child in &run.children {
            out = match child {
                RunChild::Text(text) => out.add_text(text.value.as_str()),
                RunChild::Break => out.add_break(dx::BreakType::TextWrapping),
                RunChild::Drawing(drawing) => match self.media(&drawing.image_id) {
                    Some(part) => {
                        out.add_image(dx::Pic::new(&part.data).size(drawing.width, drawing.height))
                    }
                    None => {
                        warn!("drawing refers to missing media part {}", drawing.image_id);
                        out
                    }
                },
            };
        }
        out
    }

    fn convert_table(&self, table: &Table) -> dx::Table {
        let rows = table
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .cells
                    .iter()
                    .map(|cell| self.convert_cell(cell))
                    .collect();
                dx::TableRow::new(cells)
            })
            .collect();

        let grid = table
            .grid
            .iter()
            .map(|col| match col.width {
                // grid columns are in twips, spread a full text width of 9638
                Width::Pct(pct) => pct as usize * 9638 / 5000,
                Width::Auto => 9638 / table.grid.len().max(1),
            })
            .collect();

        let mut out = dx::Table::new(rows).set_grid(grid);
        if let Width::Pct(pct) = table.props.width {
            out = out.width(pct as usize, dx::WidthType::Pct);
        }
        if let Some(style) = &table.props.style {
            out = out.style(style.as_str());
        }
        out
    }

    fn convert_cell(&self, cell: &TableCell) -> dx::TableCell {
        let mut out = dx::TableCell::new();
        if let Width::Pct(pct) = cell.width {
            out = out.width(pct as usize, dx::WidthType::Pct);
        }
        if cell.children.is_empty() {
            return out.add_paragraph(dx::Paragraph::new());
        }
        for child in &cell.children {
            out = match child {
                Block::Paragraph(para) => out.add_paragraph(self.convert_paragraph(para)),
                Block::Table(table) => out.add_table(self.convert_table(table)),
            };
        }
        out
    }
}

fn convert_level(level: &Level) -> dx::Level {
    let out = dx::Level::new(
        level.level,
        dx::Start::new(level.start as usize),
        dx::NumberFormat::new(level.format.as_str()),
        dx::LevelText::new(level.text.as_str()),
        dx::LevelJc::new("left"),
    )
    .indent(
        Some(level.indent_left),
        Some(dx::SpecialIndentType::Hanging(level.hanging)),
        None,
        None,
    );

    let out = match &level.font {
        Some(font) => out.fonts(run_fonts(font)),
        None => out,
    };

    // lvlRestart counts levels from 1
    match level.restart_after {
        Some(parent) => out.level_restart(parent as u32 + 1),
        None => out,
    }
}

fn run_fonts(font: &str) -> dx::RunFonts {
    dx::RunFonts::new()
        .ascii(font)
        .hi_ansi(font)
        .east_asia(font)
        .cs(font)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_a_zip_archive() {
        let doc = Document::with_body(vec![Block::Paragraph(
            Paragraph::new().add_run(Run::text("hello")),
        )]);
        let bytes = doc.to_docx().unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn exports_rules_and_glyph_fonts() {
        let mut doc = crate::tests::host_doc();
        crate::tests::convert_with(
            &mut doc,
            crate::RenderOptions::default(),
            "",
            "Above\n\n---\n\n- a\n  - b",
        )
        .unwrap();

        let xml = doc.build_docx().build();
        let document = String::from_utf8_lossy(&xml.document);
        let numberings = String::from_utf8_lossy(&xml.numberings);
        let styles = String::from_utf8_lossy(&xml.styles);

        assert!(document.contains("<w:pBdr"));
        assert!(document.contains("<w:bottom "));
        assert!(numberings.contains("w:ascii=\"Courier New\""));
        assert!(styles.contains("w:styleId=\"ListBullet\""));
    }
}
