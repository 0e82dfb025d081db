//! Typed values for the multi-bit configuration fields.
//!
//! The driver's setters take the raw field encoding so that every value the
//! register can hold is reachable. These enums name the encodings from the
//! datasheet; convert them with `u8::from(setting)` or `setting.into()`, and back
//! from a raw value with `TryFrom<u8>`.
//!
//! ```
//! use ads1220_hal::settings::{Gain, InputMux};
//!
//! assert_eq!(u8::from(InputMux::AvddMonitor), 13);
//! assert_eq!(Gain::try_from(4), Ok(Gain::X16));
//! ```

/// Error message for raw values that do not name a setting.
const INVALID: &str = "Invalid bit pattern for this setting.";

/// Input multiplexer configuration (register 0 bits 7..=4).
///
/// Variants are named positive input first, then negative input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InputMux {
    /// AINP = AIN0, AINN = AIN1 (default).
    #[default]
    Ain0Ain1 = 0,
    /// AINP = AIN0, AINN = AIN2.
    Ain0Ain2 = 1,
    /// AINP = AIN0, AINN = AIN3.
    Ain0Ain3 = 2,
    /// AINP = AIN1, AINN = AIN2.
    Ain1Ain2 = 3,
    /// AINP = AIN1, AINN = AIN3.
    Ain1Ain3 = 4,
    /// AINP = AIN2, AINN = AIN3.
    Ain2Ain3 = 5,
    /// AINP = AIN1, AINN = AIN0.
    Ain1Ain0 = 6,
    /// AINP = AIN3, AINN = AIN2.
    Ain3Ain2 = 7,
    /// AINP = AIN0, AINN = AVSS.
    Ain0Avss = 8,
    /// AINP = AIN1, AINN = AVSS.
    Ain1Avss = 9,
    /// AINP = AIN2, AINN = AVSS.
    Ain2Avss = 10,
    /// AINP = AIN3, AINN = AVSS.
    Ain3Avss = 11,
    /// (V(REFPx) – V(REFNx)) / 4 monitor. The PGA is bypassed.
    ReferenceMonitor = 12,
    /// (AVDD – AVSS) / 4 monitor. The PGA is bypassed.
    AvddMonitor = 13,
    /// AINP and AINN shorted to (AVDD + AVSS) / 2.
    Shorted = 14,
}

impl InputMux {
    /// True if the negative input is AVSS.
    ///
    /// These settings require the PGA to be bypassed and a gain of at most 4.
    pub fn is_avss_referenced(self) -> bool {
        matches!(
            self,
            Self::Ain0Avss | Self::Ain1Avss | Self::Ain2Avss | Self::Ain3Avss
        )
    }
}

impl TryFrom<u8> for InputMux {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use InputMux::*;
        let mux = match value {
            0 => Ain0Ain1,
            1 => Ain0Ain2,
            2 => Ain0Ain3,
            3 => Ain1Ain2,
            4 => Ain1Ain3,
            5 => Ain2Ain3,
            6 => Ain1Ain0,
            7 => Ain3Ain2,
            8 => Ain0Avss,
            9 => Ain1Avss,
            10 => Ain2Avss,
            11 => Ain3Avss,
            12 => ReferenceMonitor,
            13 => AvddMonitor,
            14 => Shorted,
            _ => return Err(INVALID),
        };
        Ok(mux)
    }
}

impl From<InputMux> for u8 {
    fn from(value: InputMux) -> Self {
        value as u8
    }
}

/// PGA gain (register 0 bits 3..=1).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Gain {
    /// Gain 1 (default).
    #[default]
    X1 = 0,
    /// Gain 2.
    X2 = 1,
    /// Gain 4.
    X4 = 2,
    /// Gain 8.
    X8 = 3,
    /// Gain 16.
    X16 = 4,
    /// Gain 32.
    X32 = 5,
    /// Gain 64.
    X64 = 6,
    /// Gain 128.
    X128 = 7,
}

impl Gain {
    /// Multiplication factor applied to the input.
    pub fn factor(self) -> u8 {
        1 << (self as u8)
    }
}

impl TryFrom<u8> for Gain {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use Gain::*;
        let gain = match value {
            0 => X1,
            1 => X2,
            2 => X4,
            3 => X8,
            4 => X16,
            5 => X32,
            6 => X64,
            7 => X128,
            _ => return Err(INVALID),
        };
        Ok(gain)
    }
}

impl From<Gain> for u8 {
    fn from(value: Gain) -> Self {
        value as u8
    }
}

/// Data rate (register 1 bits 7..=5).
///
/// The rate in samples per second depends on the operating mode; see table 18 of
/// the datasheet. Encoding 7 is reserved.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DataRate {
    /// 20 SPS normal, 5 duty-cycle, 40 turbo (default).
    #[default]
    Dr0 = 0,
    /// 45 SPS normal, 11.25 duty-cycle, 90 turbo.
    Dr1 = 1,
    /// 90 SPS normal, 22.5 duty-cycle, 180 turbo.
    Dr2 = 2,
    /// 175 SPS normal, 44 duty-cycle, 350 turbo.
    Dr3 = 3,
    /// 330 SPS normal, 82.5 duty-cycle, 660 turbo.
    Dr4 = 4,
    /// 600 SPS normal, 150 duty-cycle, 1200 turbo.
    Dr5 = 5,
    /// 1000 SPS normal, 250 duty-cycle, 2000 turbo.
    Dr6 = 6,
}

impl DataRate {
    /// Samples per second in the given operating mode.
    pub fn samples_per_second(self, mode: OperatingMode) -> f32 {
        let normal = match self {
            DataRate::Dr0 => 20.0,
            DataRate::Dr1 => 45.0,
            DataRate::Dr2 => 90.0,
            DataRate::Dr3 => 175.0,
            DataRate::Dr4 => 330.0,
            DataRate::Dr5 => 600.0,
            DataRate::Dr6 => 1000.0,
        };
        match mode {
            OperatingMode::Normal => normal,
            OperatingMode::DutyCycle => normal / 4.0,
            OperatingMode::Turbo => normal * 2.0,
        }
    }
}

impl TryFrom<u8> for DataRate {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use DataRate::*;
        let rate = match value {
            0 => Dr0,
            1 => Dr1,
            2 => Dr2,
            3 => Dr3,
            4 => Dr4,
            5 => Dr5,
            6 => Dr6,
            _ => return Err(INVALID),
        };
        Ok(rate)
    }
}

impl From<DataRate> for u8 {
    fn from(value: DataRate) -> Self {
        value as u8
    }
}

/// Operating mode (register 1 bits 4..=3).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OperatingMode {
    /// Normal mode, 256-kHz modulator clock (default).
    #[default]
    Normal = 0,
    /// Duty-cycle mode, internal duty cycle of 1:4.
    DutyCycle = 1,
    /// Turbo mode, 512-kHz modulator clock.
    Turbo = 2,
}

impl TryFrom<u8> for OperatingMode {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Normal),
            1 => Ok(Self::DutyCycle),
            2 => Ok(Self::Turbo),
            _ => Err(INVALID),
        }
    }
}

impl From<OperatingMode> for u8 {
    fn from(value: OperatingMode) -> Self {
        value as u8
    }
}

/// Voltage reference selection (register 2 bits 7..=6).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VoltageReference {
    /// Internal 2.048 V reference (default).
    #[default]
    Internal = 0,
    /// External reference on the dedicated REFP0 and REFN0 inputs.
    ExternalRef0 = 1,
    /// External reference on the AIN0/REFP1 and AIN3/REFN1 inputs.
    ExternalRef1 = 2,
    /// Analog supply (AVDD – AVSS).
    AnalogSupply = 3,
}

impl TryFrom<u8> for VoltageReference {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Internal),
            1 => Ok(Self::ExternalRef0),
            2 => Ok(Self::ExternalRef1),
            3 => Ok(Self::AnalogSupply),
            _ => Err(INVALID),
        }
    }
}

impl From<VoltageReference> for u8 {
    fn from(value: VoltageReference) -> Self {
        value as u8
    }
}

/// FIR filter configuration (register 2 bits 5..=4).
///
/// Only affects the 20-SPS setting in normal mode and 5-SPS in duty-cycle mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FirFilter {
    /// No 50-Hz or 60-Hz rejection (default).
    #[default]
    None = 0,
    /// Simultaneous 50-Hz and 60-Hz rejection.
    Reject50And60Hz = 1,
    /// 50-Hz rejection only.
    Reject50Hz = 2,
    /// 60-Hz rejection only.
    Reject60Hz = 3,
}

impl TryFrom<u8> for FirFilter {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Reject50And60Hz),
            2 => Ok(Self::Reject50Hz),
            3 => Ok(Self::Reject60Hz),
            _ => Err(INVALID),
        }
    }
}

impl From<FirFilter> for u8 {
    fn from(value: FirFilter) -> Self {
        value as u8
    }
}

/// Excitation current for both IDACs (register 2 bits 2..=0).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IdacCurrent {
    /// Off (default).
    #[default]
    Off = 0,
    /// 10 µA.
    UA10 = 1,
    /// 50 µA.
    UA50 = 2,
    /// 100 µA.
    UA100 = 3,
    /// 250 µA.
    UA250 = 4,
    /// 500 µA.
    UA500 = 5,
    /// 1000 µA.
    UA1000 = 6,
    /// 1500 µA.
    UA1500 = 7,
}

impl IdacCurrent {
    /// Output current in microamps.
    pub fn microamps(self) -> u16 {
        match self {
            Self::Off => 0,
            Self::UA10 => 10,
            Self::UA50 => 50,
            Self::UA100 => 100,
            Self::UA250 => 250,
            Self::UA500 => 500,
            Self::UA1000 => 1000,
            Self::UA1500 => 1500,
        }
    }
}

impl TryFrom<u8> for IdacCurrent {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use IdacCurrent::*;
        let current = match value {
            0 => Off,
            1 => UA10,
            2 => UA50,
            3 => UA100,
            4 => UA250,
            5 => UA500,
            6 => UA1000,
            7 => UA1500,
            _ => return Err(INVALID),
        };
        Ok(current)
    }
}

impl From<IdacCurrent> for u8 {
    fn from(value: IdacCurrent) -> Self {
        value as u8
    }
}

/// Pin an IDAC is routed to (register 3 bits 7..=5 for IDAC1, 4..=2 for IDAC2).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum IdacRouting {
    /// IDAC disabled (default).
    #[default]
    Disabled = 0,
    /// Connected to AIN0/REFP1.
    Ain0 = 1,
    /// Connected to AIN1.
    Ain1 = 2,
    /// Connected to AIN2.
    Ain2 = 3,
    /// Connected to AIN3/REFN1.
    Ain3 = 4,
    /// Connected to REFP0.
    RefP0 = 5,
    /// Connected to REFN0.
    RefN0 = 6,
}

impl TryFrom<u8> for IdacRouting {
    type Error = &'static str;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        use IdacRouting::*;
        let routing = match value {
            0 => Disabled,
            1 => Ain0,
            2 => Ain1,
            3 => Ain2,
            4 => Ain3,
            5 => RefP0,
            6 => RefN0,
            _ => return Err(INVALID),
        };
        Ok(routing)
    }
}

impl From<IdacRouting> for u8 {
    fn from(value: IdacRouting) -> Self {
        value as u8
    }
}
