//! Canonical serialisation of parsed stylesheets.

use crate::models::{AssetRef, DeclarationValue, Stylesheet};

/// Serialise a stylesheet back to text.
///
/// Plain text values are emitted as-is; asset references are replaced by
/// whatever `render_ref` returns for them. Output uses the canonical block
/// layout with blocks and declarations in their original order, so it is
/// semantically equivalent to the parsed input but not byte-identical —
/// the live rewrite path exists for the format-preserving case.
pub fn render_stylesheet<F>(sheet: &Stylesheet, mut render_ref: F) -> String
where
  F: FnMut(&AssetRef) -> String,
{
  let mut output = String::new();

  for (index, block) in sheet.blocks.iter().enumerate() {
    if index > 0 {
      output.push('\n');
    }
    output.push_str(&block.selector);
    output.push_str(" {\n");

    for declaration in &block.declarations {
      output.push_str("  ");
      output.push_str(&declaration.name);
      output.push_str(": ");
      match &declaration.value {
        DeclarationValue::Text(text) => output.push_str(text),
        DeclarationValue::Asset(reference) => output.push_str(&render_ref(reference)),
      }
      output.push_str(";\n");
    }

    output.push_str("}\n");
  }

  output
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::classify::AttributeMode;
  use crate::stylesheet::parse_stylesheet;

  #[test]
  fn round_trips_to_an_equivalent_document() {
    let input = ".a {\n\n  color :red;\n  background-image: url('img/x.png') ;\n}\n.a { color: blue }";
    let sheet = parse_stylesheet("test.css", input, AttributeMode::ImagesOnly).unwrap();

    let rendered = render_stylesheet(&sheet, |reference| format!("url('{reference}')"));
    let reparsed = parse_stylesheet("test.css", &rendered, AttributeMode::ImagesOnly).unwrap();

    assert_eq!(reparsed, sheet);
  }

  #[test]
  fn replaces_references_through_the_callback() {
    let sheet = parse_stylesheet(
      "test.css",
      ".a { background-image: url('img/x.png'); color: red }",
      AttributeMode::ImagesOnly,
    )
    .unwrap();

    let rendered = render_stylesheet(&sheet, |reference| format!("url('cdn/{}')", reference.path()));

    assert_eq!(
      rendered,
      ".a {\n  background-image: url('cdn/img/x.png');\n  color: red;\n}\n"
    );
  }

  #[test]
  fn renders_an_empty_document_as_empty_text() {
    let rendered = render_stylesheet(&Stylesheet::default(), |_| unreachable!());
    assert!(rendered.is_empty());
  }
}
