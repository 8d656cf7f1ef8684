//! Copying the current article to the system clipboard.
//!
//! Uses the OSC 52 escape sequence, which the terminal emulator turns into a
//! clipboard write. This also works over SSH; terminals that do not support
//! it ignore the sequence.

use std::io::Write;

use crossterm::{clipboard::CopyToClipboard, execute};

use crate::app::Result;
use crate::domain::ArticleResult;

/// Write the article's pretty JSON to the clipboard through `out`.
pub fn copy_json<W: Write>(out: &mut W, result: &ArticleResult) -> Result<()> {
    let json = result.to_pretty_json()?;
    execute!(out, CopyToClipboard::to_clipboard_from(json))?;
    Ok(())
}
