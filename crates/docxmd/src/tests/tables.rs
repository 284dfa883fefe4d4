use super::*;
use crate::dom::{Style, StyleKind, Table, TableProps};

const TABLE: &str = "| a | b | c |\n|---|:-:|--:|\n| 1 | 2 | 3 |";

#[test]
fn test_table_without_style() {
    insta::assert_snapshot!(conv(TABLE), @r#"
    p
    table[width=pct:5000 cols=3]
      row[header]
        cell[width=auto]
          p[align=right]: "a"
        cell[width=auto]
          p[align=center]: "b"
        cell[width=auto]
          p[align=right]: "c"
      row
        cell[width=auto]
          p[align=right]: "1"
        cell[width=auto]
          p[align=center]: "2"
        cell[width=auto]
          p[align=right]: "3"
    p
    "#);
}

#[test]
fn test_table_reclaims_paragraph() {
    insta::assert_snapshot!(conv("# Data\n\n| *x* |\n|:--|\n| y |\n\nDone."), @r#"
    p[style=Heading1]: "Data"
    table[width=pct:5000 cols=1]
      row[header]
        cell[width=auto]
          p[align=left]: i"x"
      row
        cell[width=auto]
          p[align=left]: "y"
    p: "Done."
    "#);
}

fn styled_doc() -> Document {
    let mut doc = Document::with_body(vec![
        Table {
            props: TableProps {
                style: Some("Existing".into()),
                ..TableProps::default()
            },
            ..Table::default()
        }
        .into(),
        Paragraph::new().add_run(Run::text("{md}")).into(),
    ]);
    doc.styles.add(Style::new("Normal", StyleKind::Paragraph).default_style());
    doc.styles.add(Style::new("PlainTable", StyleKind::Table).name("Plain Table"));
    doc.styles.add(Style::new("LastTable", StyleKind::Table));
    doc
}

/// The style of the last table, which is the rendered one.
fn rendered_style(doc: &Document) -> Option<&str> {
    doc.body
        .iter()
        .rev()
        .find_map(|block| match block {
            Block::Table(table) => table.props.style.as_deref(),
            Block::Paragraph(..) => None,
        })
}

#[test]
fn test_table_style_lookup() {
    let mut doc = styled_doc();
    convert_with(&mut doc, RenderOptions::default(), "table-style=plain table", TABLE).unwrap();
    assert_eq!(rendered_style(&doc), Some("PlainTable"));

    let mut doc = styled_doc();
    convert_with(&mut doc, RenderOptions::default(), "", TABLE).unwrap();
    assert_eq!(rendered_style(&doc), Some("Existing"));

    let mut doc = styled_doc();
    doc.body.remove(0);
    convert_with(&mut doc, RenderOptions::default(), "", TABLE).unwrap();
    assert_eq!(rendered_style(&doc), Some("LastTable"));

    let mut doc = styled_doc();
    doc.body.remove(0);
    doc.styles.styles.retain(|style| style.kind != StyleKind::Table);
    convert_with(&mut doc, RenderOptions::default(), "", TABLE).unwrap();
    assert_eq!(rendered_style(&doc), Some("Normal"));
}

#[test]
fn test_table_style_is_cached() {
    let mut doc = styled_doc();
    doc.body.remove(0);
    convert_with(&mut doc, RenderOptions::default(), "", &format!("{TABLE}\n\ntext\n\n{TABLE}"))
        .unwrap();

    let styles: Vec<_> = doc
        .body
        .iter()
        .filter_map(|block| match block {
            Block::Table(table) => Some(table.props.style.as_deref()),
            Block::Paragraph(..) => None,
        })
        .collect();
    assert_eq!(styles, vec![Some("LastTable"), Some("LastTable")]);
}
