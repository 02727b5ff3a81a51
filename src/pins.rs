//! GPIO pin assignments for the HomeSentry node board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// DHT11 temperature/humidity sensor — single-wire data line with external
/// pull-up.  Bidirectional: driven low to start a read, then sampled.
pub const DHT_GPIO: i32 = 23;

/// HC-SR501 PIR motion sensor — digital output.  HIGH = motion detected.
pub const PIR_GPIO: i32 = 22;

/// Reed contact, door 1 — input-only pin with internal pull-up; the switch
/// shorts to GND when the magnet is present.  LOW = closed, HIGH = open.
pub const REED1_GPIO: i32 = 32;

/// Reed contact, door 2 — same wiring as door 1.
pub const REED2_GPIO: i32 = 33;

// ---------------------------------------------------------------------------
// UART debug
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 1;
pub const UART_RX_GPIO: i32 = 3;
