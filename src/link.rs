//! Broker-connection supervisor.
//!
//! Keeps the messaging client connected without ever blocking the loop.
//! Reconnection is a state machine polled once per tick rather than an
//! inline sleep-and-retry, so sensor sampling cadence is never stalled by
//! network unavailability.
//!
//! ## Retry policy
//!
//! On a failed connect the supervisor waits a capped-exponential backoff
//! (1 s → 2 s → 4 s … capped at 30 s) before the next attempt, and resets
//! to 1 s on success.  A lost connection detected by the per-tick health
//! check becomes retry-eligible immediately, then backs off as usual.

use log::{info, warn};

use crate::app::ports::MessagingPort;

const INITIAL_BACKOFF_MS: u32 = 1_000;
const MAX_BACKOFF_MS: u32 = 30_000;

/// Broker link state, owned by the telemetry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Disconnected,
    Connecting,
    Connected,
}

/// Non-blocking connect/health-check state machine over a [`MessagingPort`].
pub struct ConnectionSupervisor {
    state: LinkState,
    client_id: heapless::String<32>,
    /// Backoff to schedule after the *next* failure (doubles, capped).
    backoff_ms: u32,
    /// Delay currently in force before another attempt is allowed.
    retry_delay_ms: u32,
    /// Timestamp of the most recent connect attempt; the next one is not
    /// scheduled before `last_attempt_ms + retry_delay_ms`.
    last_attempt_ms: u32,
    /// Forces an immediate first attempt after boot or a detected drop.
    retry_now: bool,
    attempt: u32,
}

impl ConnectionSupervisor {
    pub fn new(client_id: &str) -> Self {
        Self {
            state: LinkState::Disconnected,
            client_id: heapless::String::try_from(client_id).unwrap_or_default(),
            backoff_ms: INITIAL_BACKOFF_MS,
            retry_delay_ms: INITIAL_BACKOFF_MS,
            last_attempt_ms: 0,
            retry_now: true,
            attempt: 0,
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    /// Drive the state machine for one tick.  Returns `true` when the link
    /// is usable for publishing this tick.
    ///
    /// Never blocks: when the backoff window has not elapsed the call
    /// returns immediately without touching the transport.
    pub fn maintain(&mut self, link: &mut impl MessagingPort, now_ms: u32) -> bool {
        match self.state {
            LinkState::Connected => {
                if link.is_connected() {
                    link.poll();
                    return true;
                }
                warn!("link: connection lost, entering reconnect");
                self.state = LinkState::Disconnected;
                self.retry_now = true;
                self.try_connect(link, now_ms)
            }
            LinkState::Disconnected => {
                let due = self.retry_now
                    || now_ms.wrapping_sub(self.last_attempt_ms) >= self.retry_delay_ms;
                if !due {
                    return false;
                }
                self.try_connect(link, now_ms)
            }
            // Transient within a tick; treated as not yet usable.
            LinkState::Connecting => false,
        }
    }

    fn try_connect(&mut self, link: &mut impl MessagingPort, now_ms: u32) -> bool {
        self.state = LinkState::Connecting;
        self.retry_now = false;
        self.last_attempt_ms = now_ms;
        self.attempt += 1;

        match link.connect(self.client_id.as_str()) {
            Ok(()) => {
                info!("link: connected as '{}' (attempt {})", self.client_id, self.attempt);
                self.state = LinkState::Connected;
                self.backoff_ms = INITIAL_BACKOFF_MS;
                self.attempt = 0;
                link.poll();
                true
            }
            Err(e) => {
                warn!(
                    "link: connect failed ({}), retry in {}s",
                    e,
                    self.backoff_ms / 1_000
                );
                self.state = LinkState::Disconnected;
                self.retry_delay_ms = self.backoff_ms;
                self.backoff_ms = (self.backoff_ms * 2).min(MAX_BACKOFF_MS);
                false
            }
        }
    }
}
