use std::io::{self, Write};

/// Channel receiving the values produced by `print` instructions, once per
/// execution and in program order.
pub trait OutputSink {
    fn emit(&mut self, value: i32);
}

// Collects the values, used by tests and by hosts that render the output
// themselves
impl OutputSink for Vec<i32> {
    fn emit(&mut self, value: i32) {
        self.push(value);
    }
}

impl<S: OutputSink + ?Sized> OutputSink for &mut S {
    fn emit(&mut self, value: i32) {
        (**self).emit(value);
    }
}

// Display the values, one per line
#[derive(Debug, Default)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, value: i32) {
        let mut stdout = io::stdout().lock();
        // A closed stdout must not abort the program being interpreted
        let _ = writeln!(stdout, "{value}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_all(sink: &mut impl OutputSink, values: &[i32]) {
        for v in values {
            sink.emit(*v);
        }
    }

    #[test]
    fn vec_collects_in_order() {
        let mut out: Vec<i32> = vec![];
        emit_all(&mut out, &[3, -1, 0]);

        assert_eq!(out, vec![3, -1, 0]);
    }

    #[test]
    fn borrowed_sink_forwards() {
        let mut out: Vec<i32> = vec![];
        {
            let mut borrowed = &mut out;
            emit_all(&mut borrowed, &[7]);
        }

        assert_eq!(out, vec![7]);
    }
}
