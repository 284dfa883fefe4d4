use super::*;
use crate::dom::RunProps;
use crate::render::{Position, RenderContext};

#[test]
fn test_heading_and_emphasis() {
    insta::assert_snapshot!(conv("# Title\n\nSome **bold** and *italic* text."), @r#"
    p[style=Heading1]: "Title"
    p: "Some " b"bold" " and " i"italic" " text."
    "#);
}

#[test]
fn test_nested_emphasis() {
    insta::assert_snapshot!(conv("**bold *both* ~~gone~~**"), @r#"p: b"bold " bi"both" b" " bs"gone""#);
}

#[test]
fn test_line_breaks() {
    insta::assert_snapshot!(conv("one\ntwo"), @r#"p: "one" "⏎" "two""#);
    insta::assert_snapshot!(conv("one\r\ntwo\r\n\r\nthree"), @r#"
    p: "one" "⏎" "two"
    p: "three"
    "#);
}

#[test]
fn test_thematic_break() {
    insta::assert_snapshot!(conv("a\n\n---\n\nb"), @r#"
    p: "a"
    p[border]
    p: "b"
    "#);
}

#[test]
fn test_code_block() {
    insta::assert_snapshot!(conv("```\nlet a = 1;\n\nlet b = 2;\n```"), @r#"p: "let a = 1;" "⏎" "⏎" "let b = 2;""#);
    // the closing fence ends the last line, a blank line before it stays
    insta::assert_snapshot!(conv("```\na\n\n```"), @r#"p: "a" "⏎""#);
}

#[test]
fn test_block_quote() {
    insta::assert_snapshot!(conv("> quoted *text*"), @r#"p: "quoted " i"text""#);
}

#[test]
fn test_links_are_skipped() {
    insta::assert_snapshot!(conv("see [the site](https://example.com) now"), @r#"p: "see " " now""#);
    insta::assert_snapshot!(conv("![remote](https://example.com/a.png)"), @"p");
}

#[test]
fn test_sibling_runs_are_kept() {
    let mut doc = Document::with_body(vec![
        Paragraph::new()
            .style("Letter")
            .add_run(Run::text("Dear "))
            .add_run(Run::text("{md}").props(RunProps {
                bold: Some(false),
                ..RunProps::default()
            }))
            .add_run(Run::text(", thanks."))
            .into(),
    ]);
    let count = convert_with(&mut doc, RenderOptions::default(), "", "**strong** plain").unwrap();

    assert_eq!(count, 1);
    insta::assert_snapshot!(outline(&doc.body), @r#"p[style=Letter]: "Dear " !b"strong" !b" plain" ", thanks.""#);
}

#[test]
fn test_split_host_paragraph() {
    let mut doc = Document::with_body(vec![
        Paragraph::new().add_run(Run::text("before")).into(),
        Paragraph::new()
            .style("Body")
            .add_run(Run::text("Intro: "))
            .add_run(Run::text("{md}"))
            .add_run(Run::text(" (end)"))
            .into(),
        Paragraph::new().add_run(Run::text("after")).into(),
    ]);
    let count = convert_with(
        &mut doc,
        RenderOptions::default(),
        "",
        "first\n\n## Second\n\nthird",
    )
    .unwrap();

    assert_eq!(count, 3);
    insta::assert_snapshot!(outline(&doc.body), @r#"
    p: "before"
    p[style=Body]: "Intro: " "first"
    p[style=Heading2]: "Second"
    p[style=Body]: "third" " (end)"
    p: "after"
    "#);
}

#[test]
fn test_substitution_skip_is_invisible() {
    struct Counting(usize);

    impl Substitutor for Counting {
        fn substitute(&mut self, _: &mut Document, _: &mut Vec<Block>, _: Reentry<'_>) -> Result<()> {
            self.0 += 1;
            Ok(())
        }
    }

    let text = "# Annual report\n\n- item one\n- item two\n\n| a b |\n|---|\n| 1 |";
    let mut outlines = Vec::new();
    // the rendered heading has a space, so the second run always substitutes
    for tag_open in ['{', ' '] {
        let mut doc = Document::with_body(vec![
            Paragraph::new().add_run(Run::text("@")).into(),
        ]);
        let converter = MarkdownConverter::new(RenderOptions {
            tag_open,
            ..RenderOptions::default()
        })
        .unwrap();
        let mut counting = Counting(0);
        converter
            .convert(
                &mut doc,
                InsertionPoint::new(0, 0),
                text,
                &MarkdownArgs::default(),
                &mut counting,
                &mut MediaImages,
            )
            .unwrap();
        outlines.push((counting.0, outline(&doc.body)));
    }

    assert_eq!(outlines[0].0, 0);
    assert_eq!(outlines[1].0, 1);
    assert_eq!(outlines[0].1, outlines[1].1);
}

#[test]
fn test_missing_anchor() {
    let mut doc = Document::new();
    let options = RenderOptions::default();
    let args = MarkdownArgs::default();
    let mut images = MediaImages;
    let mut ctx = RenderContext::new(&mut doc, &options, &args, &mut images, RunProps::default());

    let err = ctx
        .with_container(&mut Vec::new(), |ctx| ctx.write("lost"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingAnchor);

    // the cursor is restored afterwards
    ctx.render(
        &crate::ast::Node::Paragraph(vec![crate::ast::Inline::Literal("kept".into())]),
        Position::default(),
    )
    .unwrap();
    insta::assert_snapshot!(outline(&ctx.into_body()), @r#"p: "kept""#);
}
