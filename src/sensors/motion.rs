//! PIR motion source (HC-SR501 class module).
//!
//! The module drives its output HIGH while motion is detected; the mapping
//! to [`SignalLevel`] is direct (`Active` = motion).  The module's own
//! retrigger hold time is much longer than our debounce window, so the edge
//! detector sees clean transitions.
//!
//! Dual-target like every source: real GPIO on ESP-IDF, injectable static
//! on the host.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::signal::SignalLevel;

#[cfg(not(target_os = "espidf"))]
static SIM_MOTION: AtomicBool = AtomicBool::new(false);

/// Inject a simulated PIR level.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(present: bool) {
    SIM_MOTION.store(present, Ordering::Relaxed);
}

pub struct MotionSensor {
    gpio: i32,
}

impl MotionSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Raw, undebounced level.  `Active` = motion.
    pub fn sample(&mut self) -> SignalLevel {
        if self.read_gpio() {
            SignalLevel::Active
        } else {
            SignalLevel::Inactive
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_gpio(&self) -> bool {
        hw_init::gpio_read(self.gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_gpio(&self) -> bool {
        let _ = self.gpio;
        SIM_MOTION.load(Ordering::Relaxed)
    }
}
