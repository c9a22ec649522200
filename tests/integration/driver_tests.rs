//! Driver against the simulated chip: shadow state must track hardware.

use tlc59116::config::DriverConfig;
use tlc59116::drivers::tlc59116::registers::{
    ERRFLAG1, GRPFREQ, GRPPWM, MODE1, MODE2, MODE2_DMBLNK,
};
use tlc59116::drivers::tlc59116::{ErrorFlags, GroupMode, OutputMode, Tlc59116};
use tlc59116::{Error, TransportError};

use crate::sim_chip::{SimBus, SimChip, SimDelay, SimResetPin};

type SimDriver = Tlc59116<SimBus, SimResetPin, SimDelay>;

fn setup() -> (SimChip, SimDriver) {
    let config = DriverConfig::default();
    let chip = SimChip::new(config.address);
    let mut drv = Tlc59116::new(chip.bus(), chip.reset_pin(), chip.delay(), &config).unwrap();
    drv.init().unwrap();
    (chip, drv)
}

#[test]
fn init_wakes_chip() {
    let (chip, drv) = setup();
    assert!(drv.is_initialized());
    assert_eq!(chip.register(MODE1), 0x80);
    assert_eq!(chip.changed_registers(), vec![MODE1]);
}

#[test]
fn enable_pwm_channel_3_scenario() {
    let (chip, mut drv) = setup();
    drv.enable_pwm(3).unwrap();

    assert_eq!(drv.output_state().bytes(), [0x02 << 6, 0, 0, 0]);
    assert_eq!(chip.ledout(), drv.output_state().bytes());
    assert_eq!(chip.register(0x05), 0xFF, "PWM3 loaded before the mode switch");

    // Duty load must precede the LEDOUT write.
    chip.with_state(|s| {
        let pwm = s.writes.iter().position(|&w| w == (0x05, 0xFF)).unwrap();
        let mode = s.writes.iter().position(|&w| w == (0x14, 0x80)).unwrap();
        assert!(pwm < mode);
    });
}

#[test]
fn every_mode_on_every_channel_matches_hardware() {
    let (chip, mut drv) = setup();
    let modes = [OutputMode::On, OutputMode::Pwm, OutputMode::Group, OutputMode::Off];
    for (i, ch) in (0u8..16).enumerate() {
        let mode = modes[i % modes.len()];
        drv.set_channel_mode(ch, mode).unwrap();
        assert_eq!(chip.ledout(), drv.output_state().bytes(), "after channel {ch}");
    }
    for (i, ch) in (0u8..16).enumerate() {
        assert_eq!(drv.channel_mode(ch).unwrap(), modes[i % modes.len()]);
    }
}

#[test]
fn turn_off_twice_is_idempotent_on_hardware() {
    let (chip, mut drv) = setup();
    drv.turn_on(6).unwrap();
    drv.turn_on(7).unwrap();
    drv.turn_off(6).unwrap();
    let once = (drv.output_state().bytes(), chip.ledout());
    drv.turn_off(6).unwrap();
    assert_eq!((drv.output_state().bytes(), chip.ledout()), once);
    assert_eq!(drv.channel_mode(7).unwrap(), OutputMode::On);
}

#[test]
fn turn_off_all_channels_clears_bank() {
    let (chip, mut drv) = setup();
    for ch in [0, 5, 10, 15] {
        drv.turn_on(ch).unwrap();
    }
    drv.turn_off_all_channels().unwrap();
    assert!(drv.output_state().is_all_off());
    assert_eq!(chip.ledout(), [0; 4]);
}

#[test]
fn group_duty_blink_duty_round_trip() {
    let (chip, mut drv) = setup();

    drv.set_group_duty(0x40).unwrap();
    assert_eq!(drv.group_mode(), GroupMode::Dimming);
    assert_eq!(chip.register(GRPPWM), 0x40);

    drv.set_group_blink(23, 0x80).unwrap();
    assert_eq!(drv.group_mode(), GroupMode::Blinking);
    assert_eq!(chip.register(MODE2) & MODE2_DMBLNK, MODE2_DMBLNK);
    assert_eq!(chip.register(GRPPWM), 0x80);
    assert_eq!(chip.register(GRPFREQ), 23);

    drv.set_group_duty(0x10).unwrap();
    assert_eq!(drv.group_mode(), GroupMode::Dimming);
    assert_eq!(chip.register(MODE2) & MODE2_DMBLNK, 0);
}

#[test]
fn enable_group_uses_group_registers() {
    let (chip, mut drv) = setup();
    drv.enable_group(12).unwrap();
    drv.set_group_blink(47, 0x7F).unwrap();
    assert_eq!(drv.channel_mode(12).unwrap(), OutputMode::Group);
    assert_eq!(chip.ledout()[3], 0b0000_0011);
    assert_eq!(chip.register(0x0E), 0xFF);
}

#[test]
fn fault_on_channel_0_is_reported_and_cleared() {
    let (chip, mut drv) = setup();
    chip.inject_fault(0);

    assert_eq!(drv.check_errors(), Ok(true));
    assert_eq!(drv.error_flags().bits(), 0xFFFE);

    let flags = drv.report_errors().unwrap();
    let channels: Vec<u8> = flags.faulted_channels().iter().map(|c| c.index()).collect();
    assert_eq!(channels, vec![0]);

    // The clear re-arms detection: the chip flags read all-clear again.
    assert_eq!(drv.check_errors(), Ok(false));
}

#[test]
fn all_clear_reports_nothing() {
    let (chip, mut drv) = setup();
    assert_eq!(drv.check_errors(), Ok(false));
    let flags = drv.report_errors().unwrap();
    assert_eq!(flags, ErrorFlags::ALL_CLEAR);
    assert!(flags.faulted_channels().is_empty());
    // Clear sequence still ran: EFCLR set, then released.
    chip.with_state(|s| {
        let tail: Vec<_> = s.writes.iter().rev().take(2).rev().copied().collect();
        assert_eq!(tail, vec![(MODE2, 0x80), (MODE2, 0x00)]);
    });
}

#[test]
fn faults_on_both_flag_registers() {
    let (chip, mut drv) = setup();
    chip.inject_fault(3);
    chip.inject_fault(14);
    assert_eq!(drv.check_errors(), Ok(true));
    let channels: Vec<u8> = drv
        .error_flags()
        .faulted_channels()
        .iter()
        .map(|c| c.index())
        .collect();
    assert_eq!(channels, vec![3, 14]);
}

#[test]
fn clear_errors_while_blinking_keeps_hardware_blinking() {
    let (chip, mut drv) = setup();
    drv.set_group_blink(10, 0x80).unwrap();
    chip.inject_fault(9);
    drv.check_errors().unwrap();
    drv.report_errors().unwrap();
    assert_eq!(drv.group_mode(), GroupMode::Blinking);
    assert_eq!(chip.register(MODE2) & MODE2_DMBLNK, MODE2_DMBLNK);
    assert_eq!(drv.check_errors(), Ok(false));
}

#[test]
fn reset_driver_returns_everything_to_power_up() {
    let (chip, mut drv) = setup();
    drv.turn_on(1).unwrap();
    drv.enable_pwm(8).unwrap();
    drv.set_group_blink(100, 0x20).unwrap();

    drv.reset_driver().unwrap();

    assert_eq!(drv.output_state().bytes(), [0, 0, 0, 0]);
    assert_eq!(drv.group_mode(), GroupMode::Dimming);
    assert_eq!(chip.ledout(), [0, 0, 0, 0]);
    // Only the re-enable differs from a freshly powered chip.
    assert_eq!(chip.changed_registers(), vec![MODE1]);
    chip.with_state(|s| {
        assert_eq!(s.hardware_resets, 1);
        assert_eq!(s.delay_ns, 1_000_000);
    });
}

#[test]
fn stuck_reset_line_leaves_shadow_and_marks_out_of_sync() {
    let (chip, mut drv) = setup();
    drv.turn_on(15).unwrap();
    drv.set_group_blink(10, 0x80).unwrap();
    chip.stick_reset_line(true);

    assert_eq!(
        drv.reset_driver(),
        Err(Error::ResetLine(embedded_hal::digital::ErrorKind::Other))
    );

    // The chip was never pulsed, so the shadow still describes it.
    assert_eq!(drv.output_state().bytes(), chip.ledout());
    assert_eq!(chip.ledout(), [0, 0, 0, 0b0100_0000]);
    assert_eq!(drv.group_mode(), GroupMode::Blinking);
    assert_eq!(chip.register(MODE2) & MODE2_DMBLNK, MODE2_DMBLNK);
    assert!(!drv.is_in_sync());

    // Group duty still drops the chip out of blinking.
    drv.set_group_duty(0x10).unwrap();
    assert_eq!(drv.group_mode(), GroupMode::Dimming);
    assert_eq!(chip.register(MODE2), 0);

    chip.stick_reset_line(false);
    drv.reset_driver().unwrap();
    assert!(drv.is_in_sync());
    assert_eq!(chip.ledout(), drv.output_state().bytes());
}

#[test]
fn new_fails_when_reset_line_is_stuck() {
    let config = DriverConfig::default();
    let chip = SimChip::new(config.address);
    chip.stick_reset_line(true);
    let result = Tlc59116::new(chip.bus(), chip.reset_pin(), chip.delay(), &config);
    assert!(matches!(
        result,
        Err(Error::ResetLine(embedded_hal::digital::ErrorKind::Other))
    ));
    assert!(chip.is_power_up_default());
}

#[test]
fn reset_all_devices_uses_broadcast() {
    let (chip, mut drv) = setup();
    drv.turn_on(2).unwrap();
    drv.set_group_blink(5, 5).unwrap();

    drv.reset_all_devices().unwrap();

    assert!(drv.output_state().is_all_off());
    assert_eq!(drv.group_mode(), GroupMode::Dimming);
    assert_eq!(chip.changed_registers(), vec![MODE1]);
    chip.with_state(|s| {
        assert_eq!(s.software_resets, 1);
        assert_eq!(s.hardware_resets, 0);
    });
}

#[test]
fn transport_failure_keeps_last_good_shadow() {
    let (chip, mut drv) = setup();
    drv.turn_on(0).unwrap();
    chip.fail_next_writes(1);

    let err = drv.turn_on(1).unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Write { register: 0x14, .. })
    ));
    assert_eq!(drv.output_state().bytes(), [0x01, 0, 0, 0]);
    assert_eq!(chip.ledout(), drv.output_state().bytes());
    assert!(!drv.is_in_sync());

    drv.reset_driver().unwrap();
    assert!(drv.is_in_sync());
    assert_eq!(chip.ledout(), drv.output_state().bytes());
}

#[test]
fn failed_mode_select_does_not_flip_group_mode() {
    let (chip, mut drv) = setup();
    drv.set_group_blink(5, 1).unwrap();

    // The MODE2 write back to dimming is the first write of set_group_duty.
    chip.fail_next_writes(1);
    assert!(drv.set_group_duty(3).is_err());
    assert_eq!(drv.group_mode(), GroupMode::Blinking);
    assert_eq!(chip.register(MODE2) & MODE2_DMBLNK, MODE2_DMBLNK);
    assert_eq!(chip.register(GRPPWM), 1);
}

#[test]
fn wrong_address_surfaces_nack() {
    let config = DriverConfig {
        address: 0x61,
        ..DriverConfig::default()
    };
    let chip = SimChip::new(0x60);
    let mut drv = Tlc59116::new(chip.bus(), chip.reset_pin(), chip.delay(), &config).unwrap();
    let err = drv.init().unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Write { register: MODE1, .. })));
    assert!(!drv.is_initialized());
}

#[test]
fn init_retry_after_bus_error_is_in_sync() {
    let config = DriverConfig::default();
    let chip = SimChip::new(config.address);
    let mut drv = Tlc59116::new(chip.bus(), chip.reset_pin(), chip.delay(), &config).unwrap();
    chip.fail_next_writes(1);
    assert!(drv.init().is_err());
    assert!(!drv.is_in_sync());

    drv.init().unwrap();
    assert!(drv.is_initialized());
    assert!(drv.is_in_sync());
    assert_eq!(chip.ledout(), drv.output_state().bytes());
}

#[test]
fn raw_register_access() {
    let (chip, mut drv) = setup();
    drv.write_register(0x1C, 0x40).unwrap();
    assert_eq!(chip.register(0x1C), 0x40);
    assert_eq!(drv.read_register(0x1C), Ok(0x40));
    assert_eq!(drv.write_register(0x16, 0xFF), Err(Error::ShadowedRegister(0x16)));
    assert_eq!(chip.register(0x16), 0);
    chip.inject_fault(2);
    assert_eq!(drv.write_register(ERRFLAG1, 0xFF), Err(Error::ReadOnlyRegister(ERRFLAG1)));
    assert_eq!(drv.read_register(ERRFLAG1), Ok(0xFB));
}
