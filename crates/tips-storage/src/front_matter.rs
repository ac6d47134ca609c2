//! Front matter delimiter handling.
//!
//! A document starts with a line containing only `---`, followed by the
//! metadata lines, followed by a closing line containing only `---` (or the
//! YAML end-of-document marker `...`). Everything after the closing line is
//! the body and is returned verbatim.

/// Why a document's metadata block could not be located.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    /// The first line is not a `---` delimiter.
    #[error("metadata block is missing its opening `---` delimiter")]
    MissingOpening,
    /// No closing `---` or `...` line follows the opening delimiter.
    #[error("metadata block is missing its closing `---` delimiter")]
    MissingClosing,
}

/// Split a document into `(front_matter, body)`.
///
/// A leading UTF-8 byte order mark is ignored. Delimiter lines may carry
/// trailing whitespace and CRLF line endings.
pub(crate) fn split_front_matter(content: &str) -> Result<(&str, &str), MalformedReason> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    let first = lines.next().ok_or(MalformedReason::MissingOpening)?;
    if first.trim_end() != "---" {
        return Err(MalformedReason::MissingOpening);
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        let end = offset + line.len();
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            return Ok((&content[start..offset], &content[end..]));
        }
        offset = end;
    }

    Err(MalformedReason::MissingClosing)
}
