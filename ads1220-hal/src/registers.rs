//! Configuration register layout and the decoded register shadow.
//!
//! The ADS1220 has four 8-bit configuration registers. Each is split into
//! fixed-width fields, listed here as [`Field`]. The layout follows section 8.6 of
//! the datasheet (registers 0 to 3, figures 44 to 47):
//!
//! | Register | 7 | 6 | 5 | 4 | 3 | 2 | 1 | 0 |
//! |---|---|---|---|---|---|---|---|---|
//! | 0 | MUX | MUX | MUX | MUX | GAIN | GAIN | GAIN | PGA_BYPASS |
//! | 1 | DR | DR | DR | MODE | MODE | CM | TS | BCS |
//! | 2 | VREF | VREF | 50/60 | 50/60 | PSW | IDAC | IDAC | IDAC |
//! | 3 | I1MUX | I1MUX | I1MUX | I2MUX | I2MUX | I2MUX | DRDYM | 0 |

use std::ops::RangeInclusive;

use bit_field::BitField;

use crate::error::PreconditionViolation;

/// Number of configuration registers.
pub const REGISTER_COUNT: u8 = 4;

/// Multiplexer settings where the negative input is AVSS.
const AVSS_REFERENCED_MUX: RangeInclusive<u8> = 8..=11;

/// Highest gain setting (×4) allowed when the negative input is AVSS.
const MAX_AVSS_GAIN: u8 = 2;

/// A named group of bits within one of the configuration registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Input multiplexer configuration. Register 0 bits 7..=4.
    Mux,
    /// Gain configuration, gain = 2^value. Register 0 bits 3..=1.
    Gain,
    /// Disables and bypasses the internal low-noise PGA. Register 0 bit 0.
    PgaBypass,
    /// Data rate. Register 1 bits 7..=5.
    DataRate,
    /// Operating mode. Register 1 bits 4..=3.
    Mode,
    /// Single-shot (0) or continuous (1) conversion. Register 1 bit 2.
    ConversionMode,
    /// Internal temperature sensor mode. Register 1 bit 1.
    TempSensorMode,
    /// 10 µA burn-out current sources. Register 1 bit 0.
    BurnoutCurrent,
    /// Voltage reference selection. Register 2 bits 7..=6.
    Vref,
    /// FIR filter (50/60 Hz rejection) configuration. Register 2 bits 5..=4.
    Fir,
    /// Low-side power switch configuration. Register 2 bit 3.
    PowerSwitch,
    /// IDAC current setting. Register 2 bits 2..=0.
    IdacCurrent,
    /// IDAC1 routing. Register 3 bits 7..=5.
    Idac1Mux,
    /// IDAC2 routing. Register 3 bits 4..=2.
    Idac2Mux,
    /// DRDY mode. Register 3 bit 1.
    DrdyMode,
}

impl Field {
    /// Every field, in register and bit order.
    pub const ALL: [Field; 15] = [
        Field::Mux,
        Field::Gain,
        Field::PgaBypass,
        Field::DataRate,
        Field::Mode,
        Field::ConversionMode,
        Field::TempSensorMode,
        Field::BurnoutCurrent,
        Field::Vref,
        Field::Fir,
        Field::PowerSwitch,
        Field::IdacCurrent,
        Field::Idac1Mux,
        Field::Idac2Mux,
        Field::DrdyMode,
    ];

    /// Index of the configuration register holding this field.
    pub fn register(self) -> u8 {
        match self {
            Field::Mux | Field::Gain | Field::PgaBypass => 0,
            Field::DataRate
            | Field::Mode
            | Field::ConversionMode
            | Field::TempSensorMode
            | Field::BurnoutCurrent => 1,
            Field::Vref | Field::Fir | Field::PowerSwitch | Field::IdacCurrent => 2,
            Field::Idac1Mux | Field::Idac2Mux | Field::DrdyMode => 3,
        }
    }

    /// Bit positions of this field within its register.
    pub fn bits(self) -> RangeInclusive<usize> {
        match self {
            Field::Mux => 4..=7,
            Field::Gain => 1..=3,
            Field::PgaBypass => 0..=0,
            Field::DataRate => 5..=7,
            Field::Mode => 3..=4,
            Field::ConversionMode => 2..=2,
            Field::TempSensorMode => 1..=1,
            Field::BurnoutCurrent => 0..=0,
            Field::Vref => 6..=7,
            Field::Fir => 4..=5,
            Field::PowerSwitch => 3..=3,
            Field::IdacCurrent => 0..=2,
            Field::Idac1Mux => 5..=7,
            Field::Idac2Mux => 2..=4,
            Field::DrdyMode => 1..=1,
        }
    }

    /// Largest value accepted by the setter for this field.
    ///
    /// This is narrower than the bit width for the fields with reserved
    /// encodings: mux 15, operating mode 3, and IDAC routing 7.
    pub fn max(self) -> u8 {
        match self {
            Field::Mux => 14,
            Field::Mode => 2,
            Field::Idac1Mux | Field::Idac2Mux => 6,
            field => {
                let bits = field.bits();
                (1u8 << (bits.end() - bits.start() + 1)) - 1
            }
        }
    }

    /// Mask of the bits occupied by this field within its register.
    pub fn mask(self) -> u8 {
        let mut mask = 0u8;
        let bits = self.bits();
        let width = bits.end() - bits.start() + 1;
        mask.set_bits(bits, ((1u16 << width) - 1) as u8);
        mask
    }

    /// Field name as written in log and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Field::Mux => "mux",
            Field::Gain => "gain",
            Field::PgaBypass => "pga_bypass",
            Field::DataRate => "data_rate",
            Field::Mode => "mode",
            Field::ConversionMode => "conversion_mode",
            Field::TempSensorMode => "temp_sensor_mode",
            Field::BurnoutCurrent => "burnout_current",
            Field::Vref => "vref",
            Field::Fir => "fir",
            Field::PowerSwitch => "power_switch",
            Field::IdacCurrent => "idac_current",
            Field::Idac1Mux => "idac1_mux",
            Field::Idac2Mux => "idac2_mux",
            Field::DrdyMode => "drdy_mode",
        }
    }

    /// Decode this field from a raw register byte.
    pub fn extract(self, register_value: u8) -> u8 {
        register_value.get_bits(self.bits())
    }

    /// Replace this field in a raw register byte, leaving the other bits alone.
    ///
    /// # Panics
    ///
    /// Panics if `value` does not fit in the field's bit width. The driver checks
    /// [`Field::max`] before calling this.
    pub fn insert(self, mut register_value: u8, value: u8) -> u8 {
        register_value.set_bits(self.bits(), value);
        register_value
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded copy of the four configuration registers.
///
/// This is a plain value: the driver keeps one as its shadow of the device and
/// replaces it with a fresh read after every write. See [`Ads1220::registers`].
///
/// [`Ads1220::registers`]: crate::Ads1220::registers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers([u8; 4]);

impl Registers {
    /// Wrap the raw values of registers 0 to 3.
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// Raw values of registers 0 to 3.
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// Raw value of one register, or `None` if `index` is above 3.
    pub fn register(&self, index: u8) -> Option<u8> {
        self.0.get(usize::from(index)).copied()
    }

    /// Value of any field.
    pub fn field(&self, field: Field) -> u8 {
        field.extract(self.0[usize::from(field.register())])
    }

    /// Input multiplexer setting (`0..=14`).
    pub fn mux(&self) -> u8 {
        self.field(Field::Mux)
    }

    /// Gain setting, gain = 2^value.
    pub fn gain(&self) -> u8 {
        self.field(Field::Gain)
    }

    /// True if the PGA is disabled and bypassed.
    pub fn pga_bypass(&self) -> bool {
        self.field(Field::PgaBypass) == 1
    }

    /// Data rate setting.
    pub fn data_rate(&self) -> u8 {
        self.field(Field::DataRate)
    }

    /// Operating mode: 0 normal, 1 duty-cycle, 2 turbo.
    pub fn mode(&self) -> u8 {
        self.field(Field::Mode)
    }

    /// True if in continuous conversion mode, false if single-shot.
    pub fn continuous_conversion(&self) -> bool {
        self.field(Field::ConversionMode) == 1
    }

    /// True if the internal temperature sensor is enabled.
    pub fn temp_sensor_mode(&self) -> bool {
        self.field(Field::TempSensorMode) == 1
    }

    /// True if the burn-out current sources are on.
    pub fn burnout_current(&self) -> bool {
        self.field(Field::BurnoutCurrent) == 1
    }

    /// Voltage reference selection.
    pub fn vref(&self) -> u8 {
        self.field(Field::Vref)
    }

    /// FIR filter configuration.
    pub fn fir(&self) -> u8 {
        self.field(Field::Fir)
    }

    /// True if the low-side power switch closes automatically on START/SYNC.
    pub fn power_switch(&self) -> bool {
        self.field(Field::PowerSwitch) == 1
    }

    /// IDAC current setting.
    pub fn idac_current(&self) -> u8 {
        self.field(Field::IdacCurrent)
    }

    /// IDAC1 routing.
    pub fn idac1_mux(&self) -> u8 {
        self.field(Field::Idac1Mux)
    }

    /// IDAC2 routing.
    pub fn idac2_mux(&self) -> u8 {
        self.field(Field::Idac2Mux)
    }

    /// True if data ready is signalled on both DOUT/DRDY and DRDY.
    pub fn drdy_mode(&self) -> bool {
        self.field(Field::DrdyMode) == 1
    }
}

impl std::fmt::Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r0, r1, r2, r3] = self.0;
        writeln!(f, "Registers: {r0:#04x} {r1:#04x} {r2:#04x} {r3:#04x}")?;
        for field in Field::ALL {
            writeln!(f, "  {:<17}{}", field.name(), self.field(field))?;
        }
        Ok(())
    }
}

/// Check the configuration is allowed to start converting.
///
/// For mux settings 8 to 11 (AINN = AVSS) the PGA must be bypassed and the gain
/// must be 1, 2 or 4 (section 8.3.2 of the datasheet). The registers accept these
/// combinations, so the check happens when START/SYNC is sent rather than when the
/// fields are written.
pub fn check_start_preconditions(registers: &Registers) -> Result<(), PreconditionViolation> {
    let mux = registers.mux();
    if !AVSS_REFERENCED_MUX.contains(&mux) {
        return Ok(());
    }
    if !registers.pga_bypass() {
        return Err(PreconditionViolation::PgaNotBypassed { mux });
    }
    let gain = registers.gain();
    if gain > MAX_AVSS_GAIN {
        return Err(PreconditionViolation::GainTooHigh { mux, gain });
    }
    Ok(())
}
