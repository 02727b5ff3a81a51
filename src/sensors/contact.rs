//! Reed contact source (door/window).
//!
//! The switch shorts the pin to GND while the magnet is present, against an
//! internal pull-up: GPIO LOW = closed, HIGH = open.  The polarity mapping
//! lives here — the rest of the firmware only sees [`SignalLevel`], where
//! `Active` means "door open".
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the real GPIO level via hw_init helpers.
//! On host/test: reads a per-door static for injection (defaults closed).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::signal::SignalLevel;

#[cfg(not(target_os = "espidf"))]
static SIM_DOOR_OPEN: [AtomicBool; 2] = [AtomicBool::new(false), AtomicBool::new(false)];

/// Inject a simulated door level.  `index` is 0 or 1 (door 1 / door 2).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_door_open(index: usize, open: bool) {
    SIM_DOOR_OPEN[index].store(open, Ordering::Relaxed);
}

/// A single reed contact.
pub struct ContactSensor {
    gpio: i32,
    /// Simulation slot on host targets (0 or 1).
    sim_index: usize,
}

impl ContactSensor {
    pub fn new(gpio: i32, sim_index: usize) -> Self {
        Self { gpio, sim_index }
    }

    /// Raw, undebounced level.  `Active` = open.
    pub fn sample(&mut self) -> SignalLevel {
        if self.read_gpio() {
            SignalLevel::Active
        } else {
            SignalLevel::Inactive
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_gpio(&self) -> bool {
        let _ = self.sim_index;
        hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_gpio(&self) -> bool {
        let _ = self.gpio;
        SIM_DOOR_OPEN[self.sim_index].load(Ordering::Relaxed)
    }
}
