use embedded_time::{clock, ConversionError};

/// Errors from the time sources the controller depends on.
///
/// Nothing on the command path can fail; malformed input is dropped instead.
#[derive(Debug)]
pub enum Error {
    /// The clock could not be read.
    Clock(clock::Error),
    /// A duration or rate could not be converted.
    Time(ConversionError),
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}
