use core::fmt::{self, Formatter, Write};

enum IndentationFormat<'a> {
    Spaced(usize),
    Str(&'a str),
}

/// Writer that prefixes every line written through it with an indentation
pub struct Indenter<'a, 'b> {
    inner: &'a mut Formatter<'b>,
    format: IndentationFormat<'a>,
    needs_indent: bool,
}

impl<'a, 'b> Indenter<'a, 'b> {
    pub fn new(f: &'a mut Formatter<'b>) -> Self {
        Self::with_spaced(f, 4)
    }

    pub fn with_spaced(f: &'a mut Formatter<'b>, spaces: usize) -> Self {
        Self {
            inner: f,
            format: IndentationFormat::Spaced(spaces),
            needs_indent: true,
        }
    }

    pub fn set_spaces(&mut self, spaces: usize) {
        self.format = IndentationFormat::Spaced(spaces)
    }

    pub fn set_str(&mut self, s: &'a str) {
        self.format = IndentationFormat::Str(s)
    }

    fn write_indent(&mut self) -> fmt::Result {
        match self.format {
            IndentationFormat::Spaced(size) => write!(self.inner, "{: >size$}", ""),
            IndentationFormat::Str(s) => self.inner.write_str(s),
        }
    }
}

impl Write for Indenter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for (idx, line) in s.split('\n').enumerate() {
            if idx > 0 {
                self.inner.write_char('\n')?;
                self.needs_indent = true;
            }
            // Empty lines stay empty
            if line.is_empty() {
                continue;
            }

            if self.needs_indent {
                self.write_indent()?;
                self.needs_indent = false;
            }
            self.inner.write_str(line)?;
        }
        Ok(())
    }
}
