use std::io::{BufRead, Write};

use package_express_core::errors::SessionError;
use package_express_core::{ShippingQuote, ShippingRejection};

use crate::collector::{read_line, InputCollector};

pub const WELCOME_MESSAGE: &str =
    "Welcome to Package Express. Please follow the instructions below.";
pub const THANK_YOU_MESSAGE: &str = "Thank you!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    Quoted(ShippingQuote),
    Rejected(ShippingRejection),
    MalformedInput,
    Failed(String),
}

impl SessionOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quoted(_) => "quoted",
            Self::Rejected(_) => "rejected",
            Self::MalformedInput => "malformed_input",
            Self::Failed(_) => "failed",
        }
    }
}

/// One interactive quote: welcome, collect, validate, price, then wait for a final line.
pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Runs the whole transcript. Every failure is reported to the user; none escapes.
    pub fn run(&mut self) -> SessionOutcome {
        let outcome = match self.quote_package() {
            Ok(outcome) => outcome,
            Err(error) => self.report_failure(error),
        };

        self.wait_for_exit();
        outcome
    }

    fn quote_package(&mut self) -> Result<SessionOutcome, SessionError> {
        self.say(WELCOME_MESSAGE)?;

        let collection = InputCollector::new(&mut self.input, &mut self.output).collect()?;
        tracing::debug!(
            event_name = "session.collection.finished",
            complete = collection.is_complete(),
            "measurement collection finished"
        );
        let package = collection.into_package();

        if let Some(rejection) = package.validate().rejection() {
            tracing::info!(
                event_name = "session.package.rejected",
                reason = rejection.code(),
                weight = %package.weight,
                dimensions_sum = %package.dimensions_sum(),
                "package rejected for shipping"
            );
            self.say(rejection.message())?;
            return Ok(SessionOutcome::Rejected(rejection));
        }

        let quote = package.calculate_shipping_quote()?;
        tracing::info!(
            event_name = "session.quote.calculated",
            total = %quote.total,
            "shipping quote calculated"
        );
        self.say(&format!("Your estimated total for shipping this package is: {quote}"))?;
        self.say(THANK_YOU_MESSAGE)?;

        Ok(SessionOutcome::Quoted(quote))
    }

    fn report_failure(&mut self, error: SessionError) -> SessionOutcome {
        tracing::warn!(event_name = "session.failed", error = %error, "session ended early");

        if let Err(write_error) = self.say(&error.user_message()) {
            tracing::error!(
                event_name = "session.report.write_failed",
                error = %write_error,
                "could not report failure to the console"
            );
        }

        if error.is_malformed_input() {
            SessionOutcome::MalformedInput
        } else {
            SessionOutcome::Failed(error.to_string())
        }
    }

    fn wait_for_exit(&mut self) {
        match read_line(&mut self.input) {
            Ok(Some(_)) => {}
            Ok(None) => tracing::debug!(event_name = "session.exit.eof", "input closed"),
            Err(error) => tracing::debug!(
                event_name = "session.exit.read_failed",
                error = %error,
                "closing read failed"
            ),
        }
    }

    fn say(&mut self, line: &str) -> Result<(), SessionError> {
        writeln!(self.output, "{line}").map_err(SessionError::Output)?;
        self.output.flush().map_err(SessionError::Output)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Write};

    use package_express_core::ShippingRejection;

    use super::{Session, SessionOutcome};

    struct BrokenOutput;

    impl Write for BrokenOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "console detached"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn rejected_outcome_carries_the_reason() {
        let mut session = Session::new(Cursor::new(b"5\n20\n20\n20\n\n".to_vec()), Vec::new());
        assert_eq!(session.run(), SessionOutcome::Rejected(ShippingRejection::TooBig));
    }

    #[test]
    fn write_failures_end_the_session_without_panicking() {
        let mut session = Session::new(Cursor::new(b"10\n".to_vec()), BrokenOutput);
        let outcome = session.run();

        assert_eq!(outcome.label(), "failed");
        assert_eq!(
            outcome,
            SessionOutcome::Failed("could not write to the console: console detached".to_string())
        );
    }

    #[test]
    fn closing_wait_consumes_exactly_one_line() {
        let mut session = Session::new(Cursor::new(b"60\nfirst\nsecond\n".to_vec()), Vec::new());
        session.run();

        let (input, _) = session.into_parts();
        let position = input.position() as usize;
        assert_eq!(position, "60\nfirst\n".len());
    }
}
