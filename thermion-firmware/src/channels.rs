//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use thermion_core::link::LinkStatus;
use thermion_core::outbox::Outbox;
use thermion_protocol::{Frame, Key, Value};

/// Channel capacity for value change notifications
const VALUE_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outgoing command frames
const TX_CHANNEL_SIZE: usize = 4;

/// Value changes applied by the synchronizer, consumed by the display task
pub static VALUE_CHANGES: Channel<CriticalSectionRawMutex, (Key, Value), VALUE_CHANNEL_SIZE> =
    Channel::new();

/// Signal that a PONG was received from the gateway
pub static PONG_RECEIVED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Link status transitions (updated by the TX task's link monitor)
pub static LINK_STATUS: Signal<CriticalSectionRawMutex, LinkStatus> = Signal::new();

/// Command frames queued for transmission to the gateway
pub static TX_FRAMES: Channel<CriticalSectionRawMutex, Frame, TX_CHANNEL_SIZE> = Channel::new();

/// Single-slot outbound command buffer shared by the button and TX tasks
pub static OUTBOX: Mutex<CriticalSectionRawMutex, Outbox> = Mutex::new(Outbox::new());
