//! Single-pass rewrite of `background-image` declarations in raw bytes.

use std::fmt;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose};

const DECLARATION_NAME: &[u8] = b"background-image";
const URL_OPEN: &[u8] = b"url('";

/// Error raised when a matched `background-image` declaration cannot be
/// completed.
///
/// Once the scanner has committed to the declaration name, the rest of the
/// pattern must follow. A failure is fatal for the whole file: no partial
/// output is produced.
#[derive(Debug)]
pub enum RewriteError {
  /// No colon followed the declaration name.
  MissingColon {
    /// Byte offset where the colon was expected.
    offset: usize,
  },
  /// The declaration value did not start with a `url('` literal.
  MissingUrlLiteral {
    /// Byte offset where the literal was expected.
    offset: usize,
  },
  /// The URL literal was not closed with `')`.
  UnterminatedLiteral {
    /// Byte offset where the literal payload started.
    offset: usize,
  },
}

impl fmt::Display for RewriteError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingColon { offset } => {
        write!(f, "expected ':' after background-image at byte {offset}")
      }
      Self::MissingUrlLiteral { offset } => {
        write!(f, "expected url('...') value at byte {offset}")
      }
      Self::UnterminatedLiteral { offset } => {
        write!(f, "url literal starting at byte {offset} is not closed with ')")
      }
    }
  }
}

impl std::error::Error for RewriteError {}

/// Rewrite every `background-image: url('...')` declaration in `input`,
/// re-encoding the referenced path for live serving under `location`.
///
/// Every byte outside the matched declarations passes through unchanged —
/// indentation, line breaks and comments survive exactly. The space/tab runs
/// around the colon are re-emitted as found. Input containing no
/// `background-image` declaration comes back byte-identical.
pub fn rewrite_stylesheet(
  location: &str,
  source_file: &Path,
  input: &[u8],
) -> Result<Vec<u8>, RewriteError> {
  let mut output = Vec::with_capacity(input.len());
  let mut pos = 0;

  while pos < input.len() {
    if !input[pos..].starts_with(DECLARATION_NAME) {
      output.push(input[pos]);
      pos += 1;
      continue;
    }

    let mut cursor = pos + DECLARATION_NAME.len();
    let gap_before = space_run(input, cursor);
    cursor += gap_before.len();

    if input.get(cursor) != Some(&b':') {
      return Err(RewriteError::MissingColon { offset: cursor });
    }
    cursor += 1;

    let gap_after = space_run(input, cursor);
    cursor += gap_after.len();

    if !input[cursor..].starts_with(URL_OPEN) {
      return Err(RewriteError::MissingUrlLiteral { offset: cursor });
    }
    cursor += URL_OPEN.len();

    let payload_start = cursor;
    let Some(quote) = input[payload_start..].iter().position(|&byte| byte == b'\'') else {
      return Err(RewriteError::UnterminatedLiteral {
        offset: payload_start,
      });
    };
    let payload_end = payload_start + quote;
    if input.get(payload_end + 1) != Some(&b')') {
      return Err(RewriteError::UnterminatedLiteral {
        offset: payload_start,
      });
    }

    output.extend_from_slice(DECLARATION_NAME);
    output.extend_from_slice(gap_before);
    output.push(b':');
    output.extend_from_slice(gap_after);
    output.extend_from_slice(URL_OPEN);
    output.extend_from_slice(
      encoded_url_body(location, source_file, &input[payload_start..payload_end]).as_bytes(),
    );
    output.extend_from_slice(b"')");

    pos = payload_end + 2;
  }

  Ok(output)
}

/// Build the synthetic URL body: the final segment of `location`, a slash,
/// then base64 of the source directory text concatenated directly with the
/// payload bytes. The resolver reverses this encoding bit-for-bit.
fn encoded_url_body(location: &str, source_file: &Path, payload: &[u8]) -> String {
  let directory = match source_file.parent() {
    Some(parent) => parent.to_string_lossy().into_owned(),
    None => String::new(),
  };

  let mut plain = directory.into_bytes();
  plain.extend_from_slice(payload);
  let encoded = general_purpose::STANDARD.encode(plain);

  let mount_name = match location.rsplit_once('/') {
    Some((_, name)) => name,
    None => location,
  };
  format!("{mount_name}/{encoded}")
}

/// Space and tab run starting at `from`.
fn space_run(input: &[u8], from: usize) -> &[u8] {
  let len = input[from..]
    .iter()
    .take_while(|&&byte| byte == b' ' || byte == b'\t')
    .count();
  &input[from..from + len]
}
