//! Newline-delimited input read as raw bytes and decoded one record at a time.
//!
//! A stream is only as good as its worst line if it is decoded as a whole. Reading bytes up to
//! each `\n` lets a stage report one undecodable record and carry on with the next.

use std::io::BufRead;

use crate::error::JigError;

/// One line of input, without its terminator, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the input stream
    pub line: usize,
    bytes: Vec<u8>,
}

impl Record {
    pub fn new(line: usize, mut bytes: Vec<u8>) -> Self {
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        Record { line, bytes }
    }

    /// The record as text, or `None` if it is not valid UTF-8.
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// The record as text with invalid sequences replaced, for diagnostics.
    pub fn lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

/// Iterator over the [Record]s of a reader. I/O errors end the stream; bad encoding does not.
pub struct Records<R> {
    reader: R,
    line: usize,
    done: bool,
}

impl<R: BufRead> Iterator for Records<R> {
    type Item = Result<Record, JigError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut bytes = Vec::new();
        match self.reader.read_until(b'\n', &mut bytes) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                self.line += 1;
                Some(Ok(Record::new(self.line, bytes)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}

pub fn records<R: BufRead>(reader: R) -> Records<R> {
    Records {
        reader,
        line: 0,
        done: false,
    }
}
