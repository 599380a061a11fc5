use crate::{
    error::Error,
    parser,
    value::Value,
    writer::{self, Options},
};
use std::{fs, io, path::Path};

/// Renders `value` as JSON text, see [`writer::to_text`].
pub fn to_text(value: &Value, pretty: bool) -> String {
    writer::to_text(value, pretty)
}

/// Parses JSON text into a [`Value`].
pub fn from_text(text: &str) -> Result<Value, Error> {
    parser::parse(text)
}

/// Reads and parses a whole file.
///
/// A missing or unreadable file and malformed content all give `None`. Read
/// the file yourself and call [`from_text`] to tell them apart.
pub fn from_file<P: AsRef<Path>>(path: P) -> Option<Value> {
    let path = path.as_ref();

    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            log::debug!("cannot read {}: {}", path.display(), e);
            return None;
        }
    };

    match parser::parse(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("cannot parse {}: {}", path.display(), e);
            None
        }
    }
}

/// Writes `value` to `path`, replacing any existing file.
pub fn to_file<P: AsRef<Path>>(path: P, value: &Value, pretty: bool) -> io::Result<()> {
    let file = fs::File::create(path)?;
    let mut sink = io::BufWriter::new(file);

    writer::write_to(&mut sink, value, Options::from(pretty))?;
    io::Write::flush(&mut sink)
}
