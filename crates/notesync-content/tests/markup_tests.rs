//! Tests for NoteMarkup encoding and decoding

use notesync_content::{Error, Format, NoteMarkup, Transcoder, strip_control_chars};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn encoded_note_has_enml_envelope() {
    let markup = NoteMarkup.encode("hello", Format::Plain).unwrap();

    assert!(markup.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(markup.contains("<!DOCTYPE en-note"));
    assert!(markup.contains("<en-note><div>hello</div></en-note>"));
}

#[test]
fn markdown_renders_to_html() {
    let markup = NoteMarkup
        .encode("# Title\n\nSome *text* and **bold**.\n", Format::Markdown)
        .unwrap();

    assert!(markup.contains("<h1>Title</h1>"));
    assert!(markup.contains("<em>text</em>"));
    assert!(markup.contains("<strong>bold</strong>"));
}

#[test]
fn markdown_decode_keeps_structure_markers() {
    let source = "# Title\n\nSome *text* and **bold**.\n\n- one\n- two\n";
    let markup = NoteMarkup.encode(source, Format::Markdown).unwrap();

    let decoded = NoteMarkup.decode(&markup);

    assert!(decoded.starts_with("# Title\n"), "got: {:?}", decoded);
    assert!(decoded.contains("Some *text* and **bold**."), "got: {:?}", decoded);
    assert!(decoded.contains("- one\n- two"), "got: {:?}", decoded);
    assert!(decoded.ends_with('\n'));
}

#[test]
fn decode_handles_foreign_markup() {
    let markup = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">
<en-note style="word-wrap: break-word;"><div><en-todo checked="true"/>buy milk</div><div><en-todo/>call bob</div><p>A &lt;tag&gt; &amp; more</p></en-note>"#;

    assert_eq!(
        NoteMarkup.decode(markup),
        "[x] buy milk\n[ ] call bob\nA <tag> & more\n"
    );
}

#[rstest]
#[case("\u{0}")]
#[case("text\u{1b}[31m")]
#[case("line\u{b}tab")]
fn encode_rejects_unstripped_control_characters(#[case] text: &str) {
    let result = NoteMarkup.encode(text, Format::Plain);
    assert!(matches!(result, Err(Error::InvalidEncoding { .. })));
}

#[test]
fn stripped_text_always_encodes() {
    let dirty = "title\u{0}\n\u{7}body\u{1b}";
    let clean = strip_control_chars(dirty);

    let markup = NoteMarkup.encode(&clean, Format::Plain).unwrap();

    assert_eq!(NoteMarkup.decode(&markup), "title\nbody\n");
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn plain_text_survives_encode_decode(
            lines in proptest::collection::vec("[a-zA-Z0-9&<>;.,!? ]{0,20}", 1..6)
        ) {
            prop_assume!(!lines[0].is_empty());
            prop_assume!(!lines[lines.len() - 1].is_empty());

            let text = lines.join("\n");
            let markup = NoteMarkup.encode(&text, Format::Plain).unwrap();

            prop_assert_eq!(NoteMarkup.decode(&markup), format!("{}\n", text));
        }
    }
}
