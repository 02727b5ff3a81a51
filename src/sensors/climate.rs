//! DHT11 temperature/humidity source.
//!
//! Wraps the raw single-wire frame reader and converts frames into
//! calibrated readings.  A dropped or corrupted frame surfaces as a
//! transient [`SensorError`] — the caller skips that tick's report rather
//! than publishing stale or sentinel values.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the wire via `drivers::dht`.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicI16, AtomicU16, Ordering};

use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_DECI_C: AtomicI16 = AtomicI16::new(213);
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_DECI_PCT: AtomicU16 = AtomicU16::new(557);
#[cfg(not(target_os = "espidf"))]
static SIM_FAULT: AtomicBool = AtomicBool::new(false);

/// Inject a simulated reading, in tenths (21.3 C -> 213).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temp_deci_c: i16, hum_deci_pct: u16) {
    SIM_TEMP_DECI_C.store(temp_deci_c, Ordering::Relaxed);
    SIM_HUM_DECI_PCT.store(hum_deci_pct, Ordering::Relaxed);
}

/// Make subsequent simulated reads fail with a checksum error.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fault(faulty: bool) {
    SIM_FAULT.store(faulty, Ordering::Relaxed);
}

/// A calibrated temperature/humidity pair.
#[derive(Debug, Clone, Copy)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// DHT11 sensor source.
pub struct ClimateSensor {
    gpio: i32,
}

impl ClimateSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Sample the sensor.  `Err` means transiently unavailable this tick.
    pub fn sample(&mut self) -> Result<ClimateReading, SensorError> {
        let frame = self.read_frame()?;

        // DHT11 layout: [hum_int, hum_dec, temp_int, temp_dec, checksum].
        let humidity_pct = f32::from(frame[0]) + f32::from(frame[1]) / 10.0;
        let temperature_c = f32::from(frame[2]) + f32::from(frame[3]) / 10.0;

        if !(0.0..=100.0).contains(&humidity_pct) || !(-40.0..=85.0).contains(&temperature_c) {
            return Err(SensorError::OutOfRange);
        }

        Ok(ClimateReading {
            temperature_c,
            humidity_pct,
        })
    }

    #[cfg(target_os = "espidf")]
    fn read_frame(&self) -> Result<crate::drivers::dht::DhtFrame, SensorError> {
        crate::drivers::dht::read_frame(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_frame(&self) -> Result<crate::drivers::dht::DhtFrame, SensorError> {
        let _ = self.gpio;
        if SIM_FAULT.load(Ordering::Relaxed) {
            return Err(SensorError::ChecksumMismatch);
        }
        let t = SIM_TEMP_DECI_C.load(Ordering::Relaxed);
        let h = SIM_HUM_DECI_PCT.load(Ordering::Relaxed);
        let frame = [
            (h / 10) as u8,
            (h % 10) as u8,
            (t / 10) as u8,
            (t.rem_euclid(10)) as u8,
            0,
        ];
        let sum = frame[0]
            .wrapping_add(frame[1])
            .wrapping_add(frame[2])
            .wrapping_add(frame[3]);
        Ok([frame[0], frame[1], frame[2], frame[3], sum])
    }
}
