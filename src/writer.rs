use crate::value::{Slot, Value};
use std::fmt::Write as _;
use std::io;

/// Rendering configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// One element per line, nested levels indented by `indent` spaces.
    pub pretty: bool,
    pub indent: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pretty: false,
            indent: 2,
        }
    }
}

impl Options {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

impl From<bool> for Options {
    fn from(pretty: bool) -> Self {
        if pretty {
            Self::pretty()
        } else {
            Self::compact()
        }
    }
}

const BB: u8 = b'b'; // \x08
const TT: u8 = b't'; // \x09
const NN: u8 = b'n'; // \x0A
const FF: u8 = b'f'; // \x0C
const RR: u8 = b'r'; // \x0D
const QU: u8 = b'"';
const BS: u8 = b'\\';
const UU: u8 = b'u'; // \u00XX

/// For each byte, 0 when it is written as is, otherwise the character that
/// follows the backslash in its escaped form.
static ESCAPE: [u8; 256] = {
    let mut table = [0u8; 256];
    let mut byte = 0;

    while byte < 0x20 {
        table[byte] = UU;
        byte += 1;
    }

    table[0x08] = BB;
    table[0x09] = TT;
    table[0x0A] = NN;
    table[0x0C] = FF;
    table[0x0D] = RR;
    table[b'"' as usize] = QU;
    table[b'\\' as usize] = BS;

    table
};

const HEX: &[u8; 16] = b"0123456789ABCDEF";

fn write_escaped(out: &mut String, s: &str) {
    out.push('"');

    let bytes = s.as_bytes();
    let mut start = 0;

    for (i, &byte) in bytes.iter().enumerate() {
        let escape = ESCAPE[byte as usize];
        if escape == 0 {
            continue;
        }

        // Escaped bytes are ASCII, so `i` is always a char boundary
        out.push_str(&s[start..i]);

        out.push('\\');
        out.push(char::from(escape));

        if escape == UU {
            out.push_str("00");
            out.push(char::from(HEX[(byte >> 4) as usize]));
            out.push(char::from(HEX[(byte & 0xF) as usize]));
        }

        start = i + 1;
    }

    out.push_str(&s[start..]);
    out.push('"');
}

fn write_integer(out: &mut String, n: i64) {
    let mut buffer = itoa::Buffer::new();
    out.push_str(buffer.format(n));
}

/// Shortest text that parses back to the same double. The result always
/// carries a `.` or an exponent so it is read back as a float.
fn write_float(out: &mut String, n: f64) {
    if !n.is_finite() {
        out.push_str("null");
        return;
    }

    let start = out.len();
    // Writing into a String cannot fail
    let _ = write!(out, "{n:?}");

    let rendered = &out[start..];
    if rendered.contains('.') && !rendered.contains('e') {
        let trimmed = rendered.trim_end_matches('0').len();
        out.truncate(start + trimmed);

        if out.ends_with('.') {
            out.push('0');
        }
    } else if !rendered.contains(['.', 'e'].as_slice()) {
        out.push_str(".0");
    }
}

struct Writer {
    out: String,
    options: Options,
}

impl Writer {
    fn new(options: Options) -> Self {
        Self {
            out: String::new(),
            options,
        }
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        self.out
            .extend(std::iter::repeat(' ').take(depth * self.options.indent));
    }

    fn write_value(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Null => self.out.push_str("null"),
            Value::Bool(true) => self.out.push_str("true"),
            Value::Bool(false) => self.out.push_str("false"),
            Value::Integer(n) => write_integer(&mut self.out, *n),
            Value::Float(n) => write_float(&mut self.out, *n),
            Value::String(s) => write_escaped(&mut self.out, s),
            Value::Array(array) => {
                self.write_container(('[', ']'), array.iter(), depth, |w, slot: &Slot, depth| {
                    w.write_value(slot.value(), depth)
                })
            }
            Value::Object(object) => {
                self.write_container(('{', '}'), object.iter(), depth, |w, (key, slot), depth| {
                    write_escaped(&mut w.out, key);
                    w.out.push_str(if w.options.pretty { ": " } else { ":" });
                    w.write_value(slot.value(), depth)
                })
            }
        }
    }

    fn write_container<T, I, F>(&mut self, brackets: (char, char), items: I, depth: usize, mut f: F)
    where
        I: ExactSizeIterator<Item = T>,
        F: FnMut(&mut Self, T, usize),
    {
        let (open, close) = brackets;
        self.out.push(open);

        if items.len() == 0 {
            self.out.push(close);
            return;
        }

        for (i, item) in items.enumerate() {
            if i > 0 {
                self.out.push(',');
            }

            if self.options.pretty {
                self.newline(depth + 1);
            }

            f(self, item, depth + 1);
        }

        if self.options.pretty {
            self.newline(depth);
        }

        self.out.push(close);
    }
}

/// Renders `value` as JSON text.
pub fn to_text_with(value: &Value, options: Options) -> String {
    let mut writer = Writer::new(options);
    writer.write_value(value, 0);
    writer.out
}

/// Renders `value` compactly, or with 2 space indentation when `pretty`.
pub fn to_text(value: &Value, pretty: bool) -> String {
    to_text_with(value, Options::from(pretty))
}

/// Renders `value` into `sink`.
pub fn write_to<W: io::Write>(mut sink: W, value: &Value, options: Options) -> io::Result<()> {
    sink.write_all(to_text_with(value, options).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float(n: f64) -> String {
        let mut out = String::new();
        write_float(&mut out, n);
        out
    }

    #[test]
    fn floats_keep_a_fraction_or_exponent() {
        assert_eq!(float(2.5), "2.5");
        assert_eq!(float(3.0), "3.0");
        assert_eq!(float(-0.0), "-0.0");
        assert_eq!(float(2.71828), "2.71828");
        assert_eq!(float(1e300), "1e300");
        assert_eq!(float(1.5e-7), "1.5e-7");
        assert_eq!(float(f64::NAN), "null");
        assert_eq!(float(f64::INFINITY), "null");
    }

    #[test]
    fn floats_append_to_the_buffer() {
        let mut out = String::from("[10,");
        write_float(&mut out, 1.50);
        out.push(',');
        write_float(&mut out, 100.0);

        assert_eq!(out, "[10,1.5,100.0");
    }

    #[test]
    fn escape_table() {
        let mut out = String::new();
        write_escaped(&mut out, "a\u{1}\u{8}\u{b}\"\\é/");

        assert_eq!(out, r#""a\u0001\b\u000B\"\\é/""#);
    }

    #[test]
    fn empty_containers_stay_on_one_line() {
        let value: Value = vec![Value::array(), Value::object()].into();

        assert_eq!(to_text(&value, true), "[\n  [],\n  {}\n]");
    }
}
