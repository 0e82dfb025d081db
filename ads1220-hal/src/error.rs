use crate::registers::Field;

/// Wrapper for problems when communicating with the ADS1220.
///
/// `E` is the error type of the underlying SPI device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A setter was given a value outside the legal range of its field.
    ///
    /// This is checked before anything is sent to the ADS1220, so the device is
    /// left unchanged.
    InvalidArgument {
        /// Field that was being set.
        field: Field,
        /// Value that was rejected.
        value: u8,
    },
    /// A raw register access was given an index outside `0..=3`.
    InvalidRegister(u8),
    /// START/SYNC was refused because the current configuration breaks a
    /// datasheet restriction.
    ///
    /// Nothing is sent to the ADS1220 when this occurs.
    Precondition(PreconditionViolation),
    /// A configuration register was not zero after the reset issued while
    /// constructing the driver.
    ///
    /// This usually means the device is not connected or the bus is misconfigured.
    /// The driver is not constructed.
    RegisterNotCleared {
        /// Index of the first register found non-zero.
        register: u8,
        /// Value read from that register.
        value: u8,
    },
    /// A configuration write was not reflected when the registers were read back.
    ///
    /// Causes include bit errors on the bus, contention, or an unresponsive device.
    /// The write is not retried.
    VerificationFailed {
        /// Field that was being set.
        field: Field,
        /// Value written to the field.
        expected: u8,
        /// Value decoded from the register after the write.
        actual: u8,
    },
    /// The SPI device reported an error.
    Spi(E),
}

/// Datasheet restrictions checked before a START/SYNC command is sent.
///
/// When the negative input of the multiplexer is AVSS (mux settings 8 to 11) the
/// PGA must be bypassed and only gains 1, 2 and 4 may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionViolation {
    /// AINN = AVSS but the PGA is enabled.
    PgaNotBypassed {
        /// Raw multiplexer setting.
        mux: u8,
    },
    /// AINN = AVSS with the PGA bypassed, but the gain is above 4.
    GainTooHigh {
        /// Raw multiplexer setting.
        mux: u8,
        /// Raw gain setting (gain = 2^value).
        gain: u8,
    },
}

#[doc(hidden)]
impl<E> From<E> for Error<E> {
    fn from(value: E) -> Self {
        Self::Spi(value)
    }
}

impl std::fmt::Display for PreconditionViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PgaNotBypassed { mux } => write!(
                f,
                "mux {mux} uses AINN = AVSS, which requires the PGA to be bypassed"
            ),
            Self::GainTooHigh { mux, gain } => write!(
                f,
                "mux {mux} uses AINN = AVSS, which only allows gains 1, 2 and 4 (got {})",
                1u16 << gain
            ),
        }
    }
}

impl<E: std::fmt::Debug> std::fmt::Display for Error<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument { field, value } => write!(
                f,
                "invalid value {value} for {field} (must be 0..={})",
                field.max()
            ),
            Self::InvalidRegister(register) => {
                write!(f, "invalid register index {register} (must be 0..=3)")
            }
            Self::Precondition(violation) => write!(f, "cannot start conversion: {violation}"),
            Self::RegisterNotCleared { register, value } => write!(
                f,
                "register {register} is not cleared after reset (read {value:#04x})"
            ),
            Self::VerificationFailed {
                field,
                expected,
                actual,
            } => write!(
                f,
                "failed to set {field}: wrote {expected}, read back {actual}"
            ),
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
        }
    }
}

impl<E: std::fmt::Debug> std::error::Error for Error<E> {}

impl<E: embedded_hal::spi::Error> embedded_hal::spi::Error for Error<E> {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        match self {
            Error::Spi(e) => e.kind(),
            _ => embedded_hal::spi::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use embedded_hal::spi::{Error as _, ErrorKind};

    use super::*;

    #[test]
    fn display_names_the_field() {
        let error: Error<Infallible> = Error::VerificationFailed {
            field: Field::Idac2Mux,
            expected: 3,
            actual: 0,
        };
        assert_eq!(error.to_string(), "failed to set idac2_mux: wrote 3, read back 0");
    }

    #[test]
    fn gain_too_high_reports_the_gain_factor() {
        let violation = PreconditionViolation::GainTooHigh { mux: 9, gain: 3 };
        assert!(violation.to_string().ends_with("(got 8)"));
    }

    #[test]
    fn driver_errors_map_to_other_kind() {
        let error: Error<ErrorKind> = Error::InvalidRegister(4);
        assert_eq!(error.kind(), ErrorKind::Other);
        let error: Error<ErrorKind> = Error::Spi(ErrorKind::ModeFault);
        assert_eq!(error.kind(), ErrorKind::ModeFault);
    }
}
