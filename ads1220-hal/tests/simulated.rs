//! Driver behaviour against a simulated ADS1220.

mod common;

use ads1220_hal::settings::{Gain, IdacRouting, InputMux};
use ads1220_hal::{Ads1220, Error, Field, PreconditionViolation};
use common::SimulatedAds1220;

fn driver() -> (Ads1220<SimulatedAds1220>, SimulatedAds1220) {
    let device = SimulatedAds1220::new();
    let adc = Ads1220::new(device.clone()).expect("construction failed");
    device.clear_exchanges();
    (adc, device)
}

#[test]
fn construction_resets_and_reads_all_registers() {
    let device = SimulatedAds1220::new();
    device.poke(0, 0x3E);
    let adc = Ads1220::new(device.clone()).expect("construction failed");
    assert_eq!(device.registers(), [0; 4]);
    assert_eq!(adc.registers().to_bytes(), [0; 4]);
    assert_eq!(
        device.exchanges(),
        [vec![0x06u8], vec![0x20], vec![0x24], vec![0x28], vec![0x2C]]
    );
}

#[test]
fn construction_fails_if_registers_not_cleared() {
    let device = SimulatedAds1220::with_reset_values([0, 0, 0x40, 0]);
    let error = Ads1220::new(device).unwrap_err();
    assert_eq!(
        error,
        Error::RegisterNotCleared {
            register: 2,
            value: 0x40
        }
    );
}

#[test]
fn every_legal_value_round_trips() {
    let (mut adc, device) = driver();
    for field in Field::ALL {
        for value in 0..=field.max() {
            adc.set_field(field, value).unwrap();
            assert_eq!(adc.registers().field(field), value, "{field} = {value}");
            assert_eq!(
                field.extract(device.registers()[usize::from(field.register())]),
                value
            );
        }
    }
}

#[test]
fn setters_leave_neighbouring_fields_alone() {
    let (mut adc, device) = driver();
    adc.set_idac1_mux(IdacRouting::Ain3.into()).unwrap();
    adc.set_drdy_mode(true).unwrap();
    adc.set_idac2_mux(IdacRouting::RefP0.into()).unwrap();

    let registers = adc.registers();
    assert_eq!(registers.idac1_mux(), 4);
    assert_eq!(registers.idac2_mux(), 5);
    assert!(registers.drdy_mode());
    assert_eq!(device.registers()[3], 0b1001_0110);

    adc.set_mux(InputMux::Ain1Ain2.into()).unwrap();
    adc.set_gain(Gain::X16.into()).unwrap();
    adc.set_pga_bypass(true).unwrap();
    adc.set_gain(Gain::X2.into()).unwrap();
    assert_eq!(adc.registers().mux(), 3);
    assert_eq!(adc.registers().gain(), 1);
    assert!(adc.registers().pga_bypass());
}

#[test]
fn setters_modify_the_device_register_not_the_shadow() {
    let (mut adc, device) = driver();
    // Changed behind the driver's back; the shadow still says 0.
    device.poke(2, 0xC0);
    adc.set_idac_current(5).unwrap();
    assert_eq!(device.registers()[2], 0xC5);
    assert_eq!(adc.registers().vref(), 3);
}

#[test]
fn setter_exchange_sequence() {
    let (mut adc, device) = driver();
    adc.set_data_rate(6).unwrap();
    assert_eq!(
        device.exchanges(),
        [
            vec![0x24u8],
            vec![0x44, 0xC0],
            vec![0x20],
            vec![0x24],
            vec![0x28],
            vec![0x2C],
        ]
    );
}

#[test]
fn out_of_range_values_touch_nothing() {
    let (mut adc, device) = driver();
    for field in Field::ALL {
        for value in field.max() + 1..=u8::MAX {
            assert_eq!(
                adc.set_field(field, value),
                Err(Error::InvalidArgument { field, value })
            );
        }
    }
    assert_eq!(adc.set_mux(15), Err(Error::InvalidArgument { field: Field::Mux, value: 15 }));
    assert_eq!(adc.set_mode(3), Err(Error::InvalidArgument { field: Field::Mode, value: 3 }));
    assert_eq!(
        adc.set_idac2_mux(7),
        Err(Error::InvalidArgument { field: Field::Idac2Mux, value: 7 })
    );
    assert_eq!(device.exchange_count(), 0);
    assert_eq!(adc.registers().to_bytes(), [0; 4]);
}

#[test]
fn stuck_bits_fail_verification() {
    let (mut adc, device) = driver();
    device.stick_bits(3, 0x1C, 0x00);
    assert_eq!(
        adc.set_idac2_mux(3),
        Err(Error::VerificationFailed {
            field: Field::Idac2Mux,
            expected: 3,
            actual: 0
        })
    );
    // The shadow reflects what the device reported.
    assert_eq!(adc.registers().idac2_mux(), 0);
    // Other fields in the register still work.
    adc.set_idac1_mux(2).unwrap();
}

#[test]
fn start_refused_for_avss_input_with_pga() {
    let (mut adc, device) = driver();
    adc.set_mux(InputMux::Ain1Avss.into()).unwrap();
    device.clear_exchanges();

    assert_eq!(
        adc.start_or_sync(),
        Err(Error::Precondition(PreconditionViolation::PgaNotBypassed { mux: 9 }))
    );
    assert_eq!(device.exchange_count(), 0);
    assert_eq!(device.starts(), 0);
}

#[test]
fn start_refused_for_avss_input_with_high_gain() {
    let (mut adc, device) = driver();
    adc.set_mux(InputMux::Ain3Avss.into()).unwrap();
    adc.set_pga_bypass(true).unwrap();
    adc.set_gain(Gain::X8.into()).unwrap();
    device.clear_exchanges();

    assert_eq!(
        adc.start_or_sync(),
        Err(Error::Precondition(PreconditionViolation::GainTooHigh { mux: 11, gain: 3 }))
    );
    assert_eq!(device.exchange_count(), 0);

    adc.set_gain(Gain::X4.into()).unwrap();
    device.clear_exchanges();
    adc.start_or_sync().unwrap();
    assert_eq!(device.exchanges(), [vec![0x08u8]]);
    assert_eq!(device.starts(), 1);
}

#[test]
fn start_allowed_for_differential_input_at_any_gain() {
    let (mut adc, device) = driver();
    adc.set_gain(Gain::X128.into()).unwrap();
    adc.start_or_sync().unwrap();
    assert_eq!(device.starts(), 1);
}

#[test]
fn temperature_measurement() {
    let (mut adc, device) = driver();
    adc.set_temp_sensor_mode(true).unwrap();
    assert_eq!(device.registers()[1], 0x02);

    adc.start_or_sync().unwrap();
    device.set_conversion_data([0x19, 0x00, 0x00]);
    let data = adc.read_conversion_data().unwrap();
    assert_eq!(ads1220_hal::conversion::temperature_celsius(data), 50.0);
}

#[test]
fn supply_measurement() {
    let (mut adc, device) = driver();
    adc.set_mux(InputMux::AvddMonitor.into()).unwrap();
    assert_eq!(device.registers()[0], 0xD0);

    adc.start_or_sync().unwrap();
    device.set_conversion_data([0x4C, 0x00, 0x00]);
    let volts = ads1220_hal::conversion::supply_voltage(adc.read_conversion_data().unwrap());
    assert!((volts - 4.864).abs() < 1e-3);
}

#[test]
fn signed_conversion_result() {
    let (mut adc, device) = driver();
    device.set_conversion_data([0xFF, 0xFF, 0xFE]);
    assert_eq!(adc.read_conversion().unwrap(), -2);
}

#[test]
fn power_down_is_sent() {
    let (mut adc, device) = driver();
    adc.power_down().unwrap();
    assert!(device.powered_down());
    assert_eq!(device.exchanges(), [vec![0x02u8]]);
}

#[test]
fn raw_register_access() {
    let (mut adc, device) = driver();
    adc.write_register(1, 0xA4).unwrap();
    assert_eq!(adc.read_register(1).unwrap(), 0xA4);
    // Raw writes leave the shadow until refreshed.
    assert_eq!(adc.registers().data_rate(), 0);
    let registers = adc.refresh().unwrap();
    assert_eq!(registers.data_rate(), 5);
    assert!(registers.continuous_conversion());
    assert_eq!(adc.registers(), registers);

    device.clear_exchanges();
    assert_eq!(adc.read_register(4), Err(Error::InvalidRegister(4)));
    assert_eq!(adc.write_register(7, 0), Err(Error::InvalidRegister(7)));
    assert_eq!(device.exchange_count(), 0);
}

#[test]
fn reset_restores_defaults() {
    let (mut adc, device) = driver();
    adc.set_fir(2).unwrap();
    adc.reset().unwrap();
    assert_eq!(device.registers(), [0; 4]);
    // The shadow is refreshed on request.
    assert_eq!(adc.registers().fir(), 2);
    assert_eq!(adc.refresh().unwrap().fir(), 0);
}

#[test]
fn release_returns_the_device() {
    let (mut adc, device) = driver();
    adc.set_vref(1).unwrap();
    let released = adc.release();
    assert_eq!(released.registers(), device.registers());
}

#[test]
fn driver_works_with_a_borrowed_device() {
    let mut device = SimulatedAds1220::new();
    let handle = device.clone();
    {
        let mut adc = Ads1220::new(&mut device).unwrap();
        adc.set_burnout_current(true).unwrap();
    }
    assert_eq!(handle.registers()[1], 0x01);
}
