//! Output sink with a bounded formatted-line buffer.
//!
//! Two write paths: the formatted path renders through a fixed-size buffer
//! and silently truncates overflow (emission sites keep their lines well
//! under the limit), while the raw path writes strings of any length.
//! The destination is either a caller-owned writer or process stdout.

use std::fmt::{self, Write as _};
use std::io::{self, Write as _};

use crate::error::SolidifyError;

/// Capacity of the formatted-line buffer.
pub const LINE_BUF: usize = 768;

/// Append-only text destination.
pub struct Sink<'w> {
    target: Target<'w>,
}

enum Target<'w> {
    Stdout(io::Stdout),
    Writer(&'w mut dyn io::Write),
}

impl<'w> Sink<'w> {
    /// Sink writing to process stdout.
    pub fn stdout() -> Self {
        Sink {
            target: Target::Stdout(io::stdout()),
        }
    }

    /// Sink writing through a caller-owned writer.
    pub fn writer(writer: &'w mut dyn io::Write) -> Self {
        Sink {
            target: Target::Writer(writer),
        }
    }

    /// Formatted write through the fixed-size line buffer.
    pub fn line(&mut self, args: fmt::Arguments<'_>) -> Result<(), SolidifyError> {
        let mut buf = LineBuf::new();
        // formatting into LineBuf cannot fail; overflow is dropped
        let _ = buf.write_fmt(args);
        self.write_all(buf.as_bytes())
    }

    /// Unformatted write, not subject to the line-buffer limit.
    pub fn raw(&mut self, s: &str) -> Result<(), SolidifyError> {
        self.write_all(s.as_bytes())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SolidifyError> {
        match &mut self.target {
            Target::Stdout(out) => out.write_all(bytes)?,
            Target::Writer(writer) => writer.write_all(bytes)?,
        }
        Ok(())
    }
}

struct LineBuf {
    buf: [u8; LINE_BUF],
    len: usize,
}

impl LineBuf {
    fn new() -> Self {
        LineBuf {
            buf: [0; LINE_BUF],
            len: 0,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl fmt::Write for LineBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = LINE_BUF - self.len;
        let take = room.min(s.len());
        self.buf[self.len..self.len + take].copy_from_slice(&s.as_bytes()[..take]);
        self.len += take;
        Ok(())
    }
}

/// Formatted write to a [`Sink`], through the line buffer.
macro_rules! outf {
    ($sink:expr, $($arg:tt)*) => {
        $sink.line(format_args!($($arg)*))
    };
}
pub(crate) use outf;
