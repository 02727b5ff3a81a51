//! DHT11 single-wire frame reader.
//!
//! Implements the raw wire protocol: the host pulls the line low for
//! ≥18 ms, the sensor answers with an 80 µs low / 80 µs high preamble and
//! then 40 bits, each a 50 µs low followed by a high whose width encodes
//! the bit (~27 µs = 0, ~70 µs = 1).  Bits are classified by comparing the
//! high-pulse width against a 50 µs threshold.
//!
//! Only the ESP-IDF target carries a real implementation; host tests inject
//! readings at the sensor layer instead (`sensors::climate::sim_set_*`),
//! so there is no simulation here.
//!
//! The whole transaction takes < 25 ms and runs from the main loop — no
//! ISR, no second core.  Interrupts stay enabled; the per-bit timeouts
//! below absorb normal scheduling jitter, and a frame corrupted by a long
//! preemption fails the checksum and surfaces as a transient error.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

/// A raw 5-byte DHT frame: `[hum_int, hum_dec, temp_int, temp_dec, sum]`.
pub type DhtFrame = [u8; 5];

/// Verify the additive checksum of a frame.
pub fn checksum_ok(frame: &DhtFrame) -> bool {
    let sum = frame[0]
        .wrapping_add(frame[1])
        .wrapping_add(frame[2])
        .wrapping_add(frame[3]);
    sum == frame[4]
}

#[cfg(target_os = "espidf")]
const START_LOW_MS: u32 = 20;
#[cfg(target_os = "espidf")]
const PULSE_TIMEOUT_US: u64 = 150;
#[cfg(target_os = "espidf")]
const BIT_THRESHOLD_US: u64 = 50;

/// Read one frame from the sensor on `pin`.
///
/// Returns [`SensorError::ReadTimeout`] when the sensor does not answer or
/// a pulse overruns its window, [`SensorError::ChecksumMismatch`] when the
/// frame arrives corrupted.  Both are transient; the caller skips this
/// tick's publish.
#[cfg(target_os = "espidf")]
pub fn read_frame(pin: i32) -> Result<DhtFrame, SensorError> {
    use esp_idf_svc::sys::esp_timer_get_time;

    let now_us = || (unsafe { esp_timer_get_time() }) as u64;

    // Wait (bounded) for the line to reach `level`; returns pulse width.
    let wait_for = |level: bool| -> Result<u64, SensorError> {
        let start = now_us();
        while hw_init::gpio_read(pin) != level {
            if now_us() - start > PULSE_TIMEOUT_US {
                return Err(SensorError::ReadTimeout);
            }
        }
        Ok(now_us() - start)
    };

    // Host start signal: hold the line low, then release.
    hw_init::gpio_write(pin, false);
    std::thread::sleep(std::time::Duration::from_millis(START_LOW_MS as u64));
    hw_init::gpio_write(pin, true);

    // Sensor preamble: low then high, ~80 µs each.
    wait_for(false)?;
    wait_for(true)?;
    wait_for(false)?;

    // 40 data bits.
    let mut frame: DhtFrame = [0; 5];
    for bit in 0..40 {
        wait_for(true)?; // end of the 50 µs bit gap
        let high_us = wait_for(false)?; // width of the data pulse
        if high_us > BIT_THRESHOLD_US {
            frame[bit / 8] |= 1 << (7 - (bit % 8));
        }
    }

    if !checksum_ok(&frame) {
        return Err(SensorError::ChecksumMismatch);
    }
    Ok(frame)
}
