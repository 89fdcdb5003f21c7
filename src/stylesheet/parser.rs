//! Cursor-based parser for the block-structured stylesheet grammar.

use std::fmt;

use crate::classify::{AttributeMode, classify};
use crate::models::{Declaration, RuleBlock, Stylesheet};

/// Error raised when the block grammar cannot tokenise a stylesheet.
///
/// Classification never produces this error: malformed URL literals are
/// valid values and pass through as text. The grammar failing to tokenise
/// the input at all is fatal, and no partial document is produced.
#[derive(Debug)]
pub struct ParseError {
  /// Label identifying the input, usually the source file name.
  pub source_name: String,
  /// Byte offset at which parsing failed.
  pub offset: usize,
  /// Description of the grammar failure.
  pub message: String,
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "failed to parse {} at byte {}: {}",
      self.source_name, self.offset, self.message
    )
  }
}

impl std::error::Error for ParseError {}

/// Parse a stylesheet into ordered rule blocks, classifying every value.
///
/// The grammar is block-shaped only: `selector { name: value; ... }` with
/// whitespace and `/* ... */` comments between tokens. Block and declaration
/// order are preserved exactly as written.
pub fn parse_stylesheet(
  source_name: &str,
  input: &str,
  mode: AttributeMode,
) -> Result<Stylesheet, ParseError> {
  Parser {
    source_name,
    input,
    bytes: input.as_bytes(),
    pos: 0,
    mode,
  }
  .parse_document()
}

/// Stateful cursor over the input text.
///
/// All structural delimiters are single ASCII bytes, so scanning byte-wise
/// and slicing the original `&str` between delimiter positions is always
/// char-boundary safe.
struct Parser<'a> {
  source_name: &'a str,
  input: &'a str,
  bytes: &'a [u8],
  pos: usize,
  mode: AttributeMode,
}

impl Parser<'_> {
  fn parse_document(mut self) -> Result<Stylesheet, ParseError> {
    let mut blocks = Vec::new();

    loop {
      self.skip_trivia()?;
      if self.pos >= self.bytes.len() {
        break;
      }
      blocks.push(self.parse_block()?);
    }

    Ok(Stylesheet { blocks })
  }

  fn parse_block(&mut self) -> Result<RuleBlock, ParseError> {
    let selector_start = self.pos;
    let Some((open, _)) = self.find_byte(selector_start, &[b'{']) else {
      return Err(self.error(selector_start, "expected '{' after selector"));
    };

    let selector = self.input[selector_start..open].trim();
    if selector.is_empty() {
      return Err(self.error(selector_start, "empty selector before '{'"));
    }

    self.pos = open + 1;
    let declarations = self.parse_declarations()?;

    Ok(RuleBlock {
      selector: selector.to_string(),
      declarations,
    })
  }

  fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
    let mut declarations = Vec::new();

    loop {
      self.skip_trivia()?;
      match self.peek() {
        Some(b'}') => {
          self.pos += 1;
          return Ok(declarations);
        }
        // Stray separators between declarations are tolerated.
        Some(b';') => self.pos += 1,
        Some(_) => declarations.push(self.parse_declaration()?),
        None => {
          return Err(self.error(self.pos, "unterminated block: expected '}'"));
        }
      }
    }
  }

  fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
    let name_start = self.pos;
    let colon = match self.find_byte(name_start, &[b':', b';', b'{', b'}']) {
      Some((offset, b':')) => offset,
      _ => return Err(self.error(name_start, "declaration is missing ':'")),
    };

    let name = self.input[name_start..colon].trim();
    if name.is_empty() {
      return Err(self.error(name_start, "declaration has an empty name"));
    }

    let value_start = colon + 1;
    let Some((value_end, terminator)) = self.find_byte(value_start, &[b';', b'}']) else {
      return Err(self.error(value_start, "unterminated declaration value"));
    };

    let value = self.input[value_start..value_end].trim();
    self.pos = if terminator == b';' { value_end + 1 } else { value_end };

    Ok(Declaration {
      name: name.to_string(),
      value: classify(self.mode, name, value),
    })
  }

  /// Skip whitespace and `/* ... */` comments.
  fn skip_trivia(&mut self) -> Result<(), ParseError> {
    loop {
      while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
        self.pos += 1;
      }

      if !self.bytes[self.pos..].starts_with(b"/*") {
        return Ok(());
      }

      let comment_start = self.pos;
      let Some(close) = find_subslice(&self.bytes[comment_start + 2..], b"*/") else {
        return Err(self.error(comment_start, "unterminated comment"));
      };
      self.pos = comment_start + 2 + close + 2;
    }
  }

  fn peek(&self) -> Option<u8> {
    self.bytes.get(self.pos).copied()
  }

  /// Next occurrence of any stop byte at or after `from`.
  fn find_byte(&self, from: usize, stops: &[u8]) -> Option<(usize, u8)> {
    self.bytes[from..]
      .iter()
      .enumerate()
      .find(|&(_, byte)| stops.contains(byte))
      .map(|(offset, byte)| (from + offset, *byte))
  }

  fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
    ParseError {
      source_name: self.source_name.to_string(),
      offset,
      message: message.into(),
    }
  }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
  haystack
    .windows(needle.len())
    .position(|window| window == needle)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{AssetRef, DeclarationValue};

  fn parse(input: &str) -> Stylesheet {
    parse_stylesheet("test.css", input, AttributeMode::ImagesOnly).unwrap()
  }

  #[test]
  fn parses_blocks_and_declarations_in_order() {
    let sheet = parse(".a { color: red; background-image: url('img/x.png'); }\n.b { margin: 0 }");

    assert_eq!(sheet.blocks.len(), 2);
    let first = &sheet.blocks[0];
    assert_eq!(first.selector, ".a");
    assert_eq!(first.declarations[0].name, "color");
    assert_eq!(
      first.declarations[0].value,
      DeclarationValue::Text("red".into())
    );
    assert_eq!(
      first.declarations[1].value,
      DeclarationValue::Asset(AssetRef::new("img/x.png"))
    );
    assert_eq!(sheet.blocks[1].selector, ".b");
    assert_eq!(sheet.blocks[1].declarations[0].name, "margin");
  }

  #[test]
  fn repeated_selectors_stay_separate_blocks() {
    let sheet = parse(".a { color: red }\n.a { color: blue }");
    assert_eq!(sheet.blocks.len(), 2);
    assert_eq!(sheet.blocks[0].selector, ".a");
    assert_eq!(sheet.blocks[1].selector, ".a");
  }

  #[test]
  fn skips_comments_between_blocks_and_declarations() {
    let sheet = parse("/* heading */\n.a {\n  /* note */\n  color: red;\n}");
    assert_eq!(sheet.blocks.len(), 1);
    assert_eq!(sheet.blocks[0].declarations.len(), 1);
    assert_eq!(sheet.blocks[0].declarations[0].name, "color");
  }

  #[test]
  fn tolerates_stray_separators_and_missing_trailing_semicolon() {
    let sheet = parse(".a { color: red;; margin: 0 }");
    assert_eq!(sheet.blocks[0].declarations.len(), 2);
  }

  #[test]
  fn classification_mode_selects_the_carrier_set() {
    let input = ".a { src: url('fonts/body.woff2') }";

    let images_only = parse_stylesheet("test.css", input, AttributeMode::ImagesOnly).unwrap();
    assert_eq!(
      images_only.blocks[0].declarations[0].value,
      DeclarationValue::Text("url('fonts/body.woff2')".into())
    );

    let all_urls = parse_stylesheet("test.css", input, AttributeMode::AllUrls).unwrap();
    assert_eq!(
      all_urls.blocks[0].declarations[0].value,
      DeclarationValue::Asset(AssetRef::new("fonts/body.woff2"))
    );
  }

  #[test]
  fn unterminated_block_is_a_parse_error() {
    let error =
      parse_stylesheet("broken.css", ".a { color: red;", AttributeMode::ImagesOnly).unwrap_err();
    assert_eq!(error.source_name, "broken.css");
    assert!(error.message.contains("unterminated block"));
  }

  #[test]
  fn missing_colon_is_a_parse_error() {
    let error = parse_stylesheet("broken.css", ".a { color }", AttributeMode::ImagesOnly)
      .unwrap_err();
    assert!(error.message.contains("missing ':'"));
  }

  #[test]
  fn missing_open_brace_is_a_parse_error() {
    let error =
      parse_stylesheet("broken.css", ".a color: red;", AttributeMode::ImagesOnly).unwrap_err();
    assert!(error.message.contains("expected '{'"));
  }

  #[test]
  fn unterminated_comment_is_a_parse_error() {
    let error =
      parse_stylesheet("broken.css", ".a { color: red } /* oops", AttributeMode::ImagesOnly)
        .unwrap_err();
    assert!(error.message.contains("unterminated comment"));
  }

  #[test]
  fn empty_input_yields_an_empty_document() {
    assert!(parse("").blocks.is_empty());
    assert!(parse("  \n/* only a comment */\n").blocks.is_empty());
  }
}
