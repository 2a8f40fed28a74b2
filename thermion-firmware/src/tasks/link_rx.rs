//! Gateway UART receive task
//!
//! Parses frames from the gateway and routes state updates into the
//! synchronizer.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use thermion_core::cache::ValueCache;
use thermion_core::sync::Synchronizer;
use thermion_protocol::{FrameParser, GatewayMessage, ValueRef};

use crate::channels::PONG_RECEIVED;
use crate::keys;
use crate::ui::PanelObserver;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Link RX task - receives and parses frames from the gateway
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    // Seed the mirror with the keys the gateway publishes. The first
    // state message replaces these zeros and fires the change callbacks.
    let cache = match ValueCache::from_entries(&[
        (keys::CURRENT_TEMP, ValueRef::Int(0)),
        (keys::COOL_SETPOINT, ValueRef::Int(0)),
        (keys::HEAT_SETPOINT, ValueRef::Int(0)),
    ]) {
        Ok(cache) => cache,
        Err(e) => {
            error!("Key schema rejected: {:?}", e);
            return;
        }
    };
    let mut sync = Synchronizer::new(cache, PanelObserver);

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) => match GatewayMessage::from_frame(&frame) {
                            Ok(GatewayMessage::State(records)) => {
                                // Bad messages already reached the observer
                                if let Ok(applied) = sync.apply_inbound(records) {
                                    trace!("Applied {} records", applied);
                                }
                            }
                            Ok(GatewayMessage::Pong) => {
                                trace!("PONG received");
                                PONG_RECEIVED.signal(());
                            }
                            Err(e) => {
                                warn!("Failed to parse gateway message: {:?}", e);
                            }
                        },
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            sync.transport_error(e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
