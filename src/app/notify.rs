use std::io::Write;

/// Where user-facing messages go. The terminal prints them; tests collect them.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

impl Notifier for Vec<String> {
    fn notify(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// Writes each notification as one line and flushes before returning.
/// The first write failure is kept and handed back by `finish`.
pub struct TerminalNotifier<W: Write> {
    out: W,
    failure: Option<std::io::Error>,
}

impl<W: Write> TerminalNotifier<W> {
    pub fn new(out: W) -> Self {
        Self { out, failure: None }
    }

    pub fn finish(self) -> std::io::Result<()> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl TerminalNotifier<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Notifier for TerminalNotifier<W> {
    fn notify(&mut self, message: &str) {
        let written = writeln!(self.out, "{message}").and_then(|()| self.out.flush());
        if let Err(err) = written {
            if self.failure.is_none() {
                self.failure = Some(err);
            }
        }
    }
}
