use std::io::{self, Write};

use crate::value::Value;

/// Shortest decimal that round-trips, without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    format!("{}", n)
}

pub fn format_value(value: &Value) -> String {
    match value {
        Value::Nil => "nil".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => s.to_string(),
        Value::List(list) => {
            let mut out = format!("({}", list.head);
            for item in &list.tail {
                out.push(' ');
                out.push_str(&item.to_string());
            }
            out.push(')');
            out
        }
        Value::Function(function) => format!("<fn {}>", function.name()),
    }
}

/// Writes one value per line. The first write error is logged and turns every
/// later `print` into a no-op, so a closed pipe does not abort evaluation.
pub struct ValuePrinter<W: Write> {
    out: W,
    failed: bool,
}

impl<W: Write> ValuePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    pub fn print(&mut self, value: &Value) {
        if self.failed {
            return;
        }
        if let Err(error) = writeln!(self.out, "{}", value).and_then(|()| self.out.flush()) {
            self.fail(error);
        }
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn fail(&mut self, error: io::Error) {
        tracing::debug!(%error, "stopped printing values");
        self.failed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-0.125), "-0.125");
    }

    #[test]
    fn test_format_scalars() {
        assert_eq!(format_value(&Value::String(Rc::from("abcd"))), "abcd");
        assert_eq!(format_value(&Value::Bool(true)), "true");
        assert_eq!(format_value(&Value::Nil), "nil");
    }

    struct BrokenPipe {
        attempts: usize,
    }

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_printer_writes_one_value_per_line() {
        let mut printer = ValuePrinter::new(Vec::new());
        printer.print(&Value::Number(16.0));
        printer.print(&Value::String(Rc::from("abcd")));
        assert!(!printer.failed());
        assert_eq!(String::from_utf8(printer.into_inner()).unwrap(), "16\nabcd\n");
    }

    #[test]
    fn test_printer_stops_after_first_write_error() {
        let mut printer = ValuePrinter::new(BrokenPipe { attempts: 0 });
        printer.print(&Value::Number(1.0));
        printer.print(&Value::Number(2.0));
        assert!(printer.failed());
        assert_eq!(printer.into_inner().attempts, 1);
    }
}
