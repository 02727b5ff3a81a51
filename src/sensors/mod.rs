//! Sensor subsystem — individual sources and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor source and implements
//! [`SensorPort`](crate::app::ports::SensorPort), the read-side boundary the
//! telemetry loop consumes.  Each source applies its own polarity mapping,
//! so the loop only ever sees [`SignalLevel`](crate::signal::SignalLevel)s
//! and calibrated readings.

pub mod climate;
pub mod contact;
pub mod motion;

use crate::app::ports::{Door, SensorPort};
use crate::error::SensorError;
use crate::signal::SignalLevel;
use climate::{ClimateReading, ClimateSensor};
use contact::ContactSensor;
use motion::MotionSensor;

/// Aggregates all sensor sources behind the [`SensorPort`] boundary.
pub struct SensorHub {
    climate: ClimateSensor,
    door1: ContactSensor,
    door2: ContactSensor,
    motion: MotionSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built sources (built in main where
    /// pin ownership is established).
    pub fn new(
        climate: ClimateSensor,
        door1: ContactSensor,
        door2: ContactSensor,
        motion: MotionSensor,
    ) -> Self {
        Self {
            climate,
            door1,
            door2,
            motion,
        }
    }
}

impl SensorPort for SensorHub {
    fn read_climate(&mut self) -> Result<ClimateReading, SensorError> {
        self.climate.sample()
    }

    fn read_door(&mut self, door: Door) -> SignalLevel {
        match door {
            Door::One => self.door1.sample(),
            Door::Two => self.door2.sample(),
        }
    }

    fn read_motion(&mut self) -> SignalLevel {
        self.motion.sample()
    }
}
