use gate_driver::mock_hal::{BusEvent, MockBus, MockChipSelect, MockSpi};
use gate_driver::raw::{
    DriveControl, HsGateControl, IcFault, IcOperation, LsGateControl, Overcurrent,
    ShuntAmplifier, VdsSense, VgsFault, VoltageRegulator, WarningWatchdog,
};
use gate_driver::{DriverError, Drv8305Config, Drv8305Driver, RegisterAddress, RegisterValue};

fn setup() -> (MockBus, Drv8305Driver<MockSpi, MockChipSelect>) {
    let bus = MockBus::new();
    let config = Drv8305Config { exchange_timeout_ms: 1000, ..Default::default() };
    let driver =
        Drv8305Driver::new(bus.spi(), bus.chip_select(), &config).expect("config is valid");
    (bus, driver)
}

#[test]
fn test_read_warning_watchdog_sends_read_command() {
    let (bus, mut driver) = setup();
    bus.set_register(RegisterAddress::WarningWatchdog, 1 << 10 | 1);

    let flags = driver.read_warning_watchdog().unwrap();
    assert!(flags.fault);
    assert!(flags.overtemp);
    assert!(!flags.pvdd_ov);
    assert_eq!(bus.sent_words(), vec![[0x88, 0x00]]);
}

#[test]
fn test_each_reader_addresses_its_register() {
    let (bus, mut driver) = setup();

    driver.read_warning_watchdog().unwrap();
    driver.read_overcurrent().unwrap();
    driver.read_ic_fault().unwrap();
    driver.read_vgs_fault().unwrap();
    driver.read_hs_gate_control().unwrap();
    driver.read_ls_gate_control().unwrap();
    driver.read_drive_control().unwrap();
    driver.read_reserved().unwrap();
    driver.read_ic_operation().unwrap();
    driver.read_shunt_amplifier().unwrap();
    driver.read_voltage_regulator().unwrap();
    driver.read_voltage_sense().unwrap();

    let expected: Vec<[u8; 2]> = RegisterAddress::ALL
        .iter()
        .map(|a| (0x8000u16 | (a.value() as u16) << 11).to_be_bytes())
        .collect();
    assert_eq!(bus.sent_words(), expected);
}

#[test]
fn test_reads_ignore_dont_care_bits() {
    let (bus, mut driver) = setup();
    bus.set_register(RegisterAddress::OvVdsFault, 0x07FF);

    bus.set_dont_care_bits(0x00);
    let clean = driver.read_overcurrent().unwrap();
    bus.set_dont_care_bits(0x1F);
    let noisy = driver.read_overcurrent().unwrap();

    assert_eq!(clean, noisy);
    assert!(noisy.high_a && noisy.sense_a && noisy.low_c);
}

#[test]
fn test_drive_control_pwm_mode() {
    let (bus, mut driver) = setup();
    bus.set_register(RegisterAddress::GateDriveControl, 1 << 8 | 1 << 7 | 0b101 << 4);

    let drive = driver.read_drive_control().unwrap();
    assert_eq!(drive.pwm_mode(), 3);
    assert_eq!(drive.dead_time, 0b101);
}

#[test]
fn test_snapshot_reads_every_named_register() {
    let (bus, mut driver) = setup();
    bus.set_register(RegisterAddress::HsGateDriveControl, 0x344);
    bus.set_register(RegisterAddress::VdsSenseControl, 0x2C8);

    let snapshot = driver.snapshot().unwrap();
    assert_eq!(snapshot.hs_gate_control.drive_time, 0b11);
    assert_eq!(snapshot.voltage_sense.vds_level, 0b11001);
    assert_eq!(bus.transfer_count(), 11);
    assert!(!bus
        .sent_words()
        .contains(&(0x8000u16 | (RegisterAddress::Reserved.value() as u16) << 11).to_be_bytes()));
}

#[test]
fn test_snapshot_stops_at_transport_fault() {
    let (bus, mut driver) = setup();
    bus.fail_next_transfer();

    let result = driver.snapshot();
    assert!(matches!(result, Err(DriverError::SpiError(_))));
    assert_eq!(bus.transfer_count(), 1);
    assert!(bus.chip_select_is_high());
}

#[test]
fn test_read_value_reserved_register_is_zero() {
    let (_bus, mut driver) = setup();
    let value = driver.read_value(RegisterAddress::Reserved).unwrap();
    assert_eq!(value.address(), RegisterAddress::Reserved);
    assert_eq!(value.to_bits(), 0);
}

#[test]
fn test_read_value_matches_typed_reader() {
    let (bus, mut driver) = setup();
    bus.set_register(RegisterAddress::IcOperation, 0b10 << 5 | 1 << 3);

    let typed = driver.read_ic_operation().unwrap();
    let value = driver.read_value(RegisterAddress::IcOperation).unwrap();
    assert_eq!(value, RegisterValue::IcOperation(typed));
    assert_eq!(typed.wd_dly, 2);
}

#[test]
fn test_writes_are_unsupported_and_never_touch_the_bus() {
    let (bus, mut driver) = setup();

    let results = vec![
        driver.write_warning_watchdog(WarningWatchdog::default()),
        driver.write_overcurrent(Overcurrent::default()),
        driver.write_ic_fault(IcFault::default()),
        driver.write_vgs_fault(VgsFault::default()),
        driver.write_hs_gate_control(HsGateControl::default()),
        driver.write_ls_gate_control(LsGateControl::default()),
        driver.write_drive_control(DriveControl::default()),
        driver.write_ic_operation(IcOperation::default()),
        driver.write_shunt_amplifier(ShuntAmplifier::default()),
        driver.write_voltage_regulator(VoltageRegulator::default()),
        driver.write_voltage_sense(VdsSense::default()),
    ];

    assert_eq!(results.len(), 11);
    for result in results {
        assert!(matches!(result, Err(DriverError::Unsupported(_))));
    }
    assert!(bus.events().is_empty());
}

#[test]
fn test_every_exchange_is_framed() {
    let (bus, mut driver) = setup();
    driver.read_ic_fault().unwrap();
    driver.read_vgs_fault().unwrap();

    let events = bus.events();
    assert_eq!(events.len(), 6);
    for frame in events.chunks(3) {
        assert_eq!(frame[0], BusEvent::ChipSelectLow);
        assert!(matches!(frame[1], BusEvent::Transfer(_)));
        assert_eq!(frame[2], BusEvent::ChipSelectHigh);
    }
}

#[test]
fn test_short_transfer_surfaces_to_caller() {
    let (bus, mut driver) = setup();
    bus.set_register(RegisterAddress::IcFault, 0x100);
    bus.short_next_transfer(0);

    let result = driver.read_ic_fault();
    assert!(matches!(result, Err(DriverError::ShortTransfer { expected: 2, actual: 0 })));

    // The next exchange is unaffected
    assert!(driver.read_ic_fault().unwrap().otsd);
}
