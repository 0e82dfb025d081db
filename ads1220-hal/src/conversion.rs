//! Conversion of raw ADS1220 results into physical units.
//!
//! [`Ads1220::read_conversion_data`] returns the three bytes of a result MSB first.
//! What they mean depends on how the device was configured when the conversion
//! ran: a temperature when the temperature sensor mode is on, otherwise a 24-bit
//! two's complement code proportional to the input voltage.
//!
//! [`Ads1220::read_conversion_data`]: crate::Ads1220::read_conversion_data

use crate::settings::Gain;

/// Degrees Celsius per LSB of the 14-bit temperature result.
pub const TEMPERATURE_RESOLUTION: f32 = 0.03125;

/// Internal reference voltage.
pub const INTERNAL_REFERENCE_VOLTS: f32 = 2.048;

/// Full-scale code, 2^23.
const FULL_SCALE: f32 = 8_388_608.0;

/// Sign bit of the 14-bit temperature result.
const TEMPERATURE_SIGN: u16 = 0x2000;

/// Mask of the 14-bit temperature result.
const TEMPERATURE_MASK: u16 = 0x3FFF;

/// Decode a result read in temperature sensor mode.
///
/// The temperature is a 14-bit left-justified two's complement value in the first
/// two bytes, 0.03125 °C per LSB (section 8.3.10 of the datasheet). The third byte
/// is ignored.
pub fn temperature_celsius(data: [u8; 3]) -> f32 {
    let raw = (u16::from(data[0]) << 6 | u16::from(data[1]) >> 2) & TEMPERATURE_MASK;
    if raw & TEMPERATURE_SIGN == 0 {
        f32::from(raw) * TEMPERATURE_RESOLUTION
    } else {
        let magnitude = !(raw - 1) & TEMPERATURE_MASK;
        f32::from(magnitude) * -TEMPERATURE_RESOLUTION
    }
}

/// Decode a result read with the (AVDD – AVSS) / 4 monitor selected.
///
/// The monitor is measured against the internal 2.048 V reference, so the analog
/// supply is four times the converted voltage. The code is treated as unsigned as
/// the monitored voltage is never negative.
pub fn supply_voltage(data: [u8; 3]) -> f32 {
    let [b0, b1, b2] = data;
    let code = u32::from(b0) << 16 | u32::from(b1) << 8 | u32::from(b2);
    4.0 * code as f32 * (INTERNAL_REFERENCE_VOLTS / FULL_SCALE)
}

/// Sign-extend a 24-bit two's complement result to `i32`.
pub fn sign_extend_24(data: [u8; 3]) -> i32 {
    let [b0, b1, b2] = data;
    // Place the 24 bits at the top of an i32 and shift back down arithmetically.
    i32::from_be_bytes([b0, b1, b2, 0]) >> 8
}

/// Convert a signed conversion code to the differential input voltage.
///
/// `vref_volts` is the voltage of the selected reference; use
/// [`INTERNAL_REFERENCE_VOLTS`] for the internal one.
pub fn code_to_volts(code: i32, vref_volts: f32, gain: Gain) -> f32 {
    code as f32 * vref_volts / (f32::from(gain.factor()) * FULL_SCALE)
}
