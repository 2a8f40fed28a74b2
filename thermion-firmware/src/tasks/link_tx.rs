//! Gateway UART transmit task
//!
//! Sends the periodic ping, forwards queued command frames, and watches
//! link health through the pong replies.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Duration, Ticker};
use embedded_io_async::Write;

use thermion_core::link::{LinkMonitor, PING_INTERVAL_MS};
use thermion_protocol::{Frame, PanelMessage, MAX_FRAME_SIZE};

use crate::channels::{LINK_STATUS, OUTBOX, PONG_RECEIVED, TX_FRAMES};

/// Link TX task - sends frames to the gateway and tracks link status
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut monitor = LinkMonitor::new();
    let mut ticker = Ticker::every(Duration::from_millis(PING_INTERVAL_MS as u64));

    loop {
        match select(ticker.next(), TX_FRAMES.receive()).await {
            Either::First(()) => {
                // Credit any pong before advancing the timeout window
                if PONG_RECEIVED.signaled() {
                    PONG_RECEIVED.reset();
                    monitor.pong_received();
                }

                let before = monitor.status();
                monitor.update_time(PING_INTERVAL_MS);
                let after = monitor.status();
                if before != after {
                    info!("Link status: {:?}", after);
                    LINK_STATUS.signal(after);
                }

                send_ping(&mut tx).await;
            }
            Either::Second(frame) => {
                send_frame(&mut tx, &frame).await;
                // Free the slot even on write failure so a later press
                // can retry the command
                OUTBOX.lock().await.complete();
            }
        }
    }
}

/// Send a PING frame to the gateway
async fn send_ping(tx: &mut BufferedUartTx) {
    if let Ok(frame) = PanelMessage::Ping.to_frame() {
        trace!("PING");
        send_frame(tx, &frame).await;
    }
}

/// Encode and write one frame
async fn send_frame(tx: &mut BufferedUartTx, frame: &Frame) {
    let mut buf = [0u8; MAX_FRAME_SIZE];
    if let Ok(len) = frame.encode(&mut buf) {
        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("UART write error: {:?}", e);
        }
    }
}
