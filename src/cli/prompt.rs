//! Interactive input.

use console::style;
use std::io::{self, BufRead, Write};

/// Ask the operator for a video URL or ID and read one line.
///
/// Returns the trimmed line; end of input yields an empty string.
pub fn read_input<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<String> {
    write!(writer, "{} ", style("YouTube URL or video ID:").bold())?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
