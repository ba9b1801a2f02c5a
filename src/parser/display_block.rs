//! Locating the display block that owns the drawing lambda.

use crate::constants::DISPLAY_ID;

use super::document::Node;
use super::ImportError;

/// Whether a display block has the expected `id` and a `lambda` key.
fn is_drawing_display(block: &Node) -> bool {
    block.get("id").and_then(Node::as_str) == Some(DISPLAY_ID) && block.contains_key("lambda")
}

/// Finds the first qualifying block under the top-level `display` key.
///
/// `display` may be a single mapping or a sequence of mappings.
#[must_use]
pub fn find_display_block(document: &Node) -> Option<&Node> {
    match document.get("display")? {
        Node::Sequence(blocks) => blocks.iter().find(|block| is_drawing_display(block)),
        block @ Node::Mapping(_) if is_drawing_display(block) => Some(block),
        _ => None,
    }
}

/// Returns the lambda source of the drawing display block.
///
/// A missing block and a non-string `lambda` both mean the document does not
/// have the structure the importer understands.
pub fn lambda_source(document: &Node) -> Result<&str, ImportError> {
    find_display_block(document)
        .and_then(|block| block.get("lambda"))
        .and_then(Node::as_str)
        .ok_or(ImportError::UnrecognizedDisplayStructure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::document::load_document;

    #[test]
    fn test_finds_block_in_sequence() {
        let doc = load_document(
            r"
display:
  - platform: ssd1306_i2c
    id: oled
    lambda: |-
      it.print(0, 0, id(font), 'x');
  - platform: waveshare_epaper
    id: epaper_display
    lambda: |-
      int page = id(display_page);
",
        )
        .unwrap();

        assert_eq!(lambda_source(&doc).unwrap(), "int page = id(display_page);");
    }

    #[test]
    fn test_finds_single_mapping_block() {
        let doc = load_document(
            "display:\n  platform: waveshare_epaper\n  id: epaper_display\n  lambda: 'it.fill(COLOR_OFF);'\n",
        )
        .unwrap();

        assert_eq!(lambda_source(&doc).unwrap(), "it.fill(COLOR_OFF);");
    }

    #[test]
    fn test_first_qualifying_block_wins() {
        let doc = load_document(
            "display:\n  - id: epaper_display\n    lambda: first\n  - id: epaper_display\n    lambda: second\n",
        )
        .unwrap();

        assert_eq!(lambda_source(&doc).unwrap(), "first");
    }

    #[test]
    fn test_wrong_id_is_unrecognized() {
        let doc = load_document("display:\n  - id: my_display\n    lambda: x\n").unwrap();
        assert!(find_display_block(&doc).is_none());
        assert_eq!(
            lambda_source(&doc).unwrap_err(),
            ImportError::UnrecognizedDisplayStructure
        );
    }

    #[test]
    fn test_block_without_lambda_is_skipped() {
        let doc = load_document(
            "display:\n  - id: epaper_display\n    pages: []\n  - id: epaper_display\n    lambda: used\n",
        )
        .unwrap();

        assert_eq!(lambda_source(&doc).unwrap(), "used");
    }

    #[test]
    fn test_non_string_lambda_is_unrecognized() {
        let doc = load_document("display:\n  id: epaper_display\n  lambda: [1, 2]\n").unwrap();
        assert!(find_display_block(&doc).is_some());
        assert_eq!(
            lambda_source(&doc).unwrap_err(),
            ImportError::UnrecognizedDisplayStructure
        );
    }

    #[test]
    fn test_non_mapping_document_is_unrecognized() {
        for text in ["", "- display\n", "display: 3\n", "sensor: []\n"] {
            let doc = load_document(text).unwrap();
            assert!(find_display_block(&doc).is_none(), "{text:?}");
        }
    }
}
