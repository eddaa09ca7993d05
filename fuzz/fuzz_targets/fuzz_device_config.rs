//! Fuzzes device configuration parsing.
//!
//! Any configuration that loads must validate and open a device.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_device_config
#![no_main]
use libfuzzer_sys::fuzz_target;
use rumble_ffb::{DeviceConfig, ForceFeedbackDevice};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for parsed in [DeviceConfig::from_yaml_str(text), DeviceConfig::from_json_str(text)] {
        if let Ok(config) = parsed {
            assert!(config.validate().is_ok());
            assert!(ForceFeedbackDevice::from_config("fuzz", &config).is_ok());
        }
    }
});
