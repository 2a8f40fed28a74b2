//! User button task
//!
//! Debounces the panel button and queues a refresh command on click.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{with_timeout, Duration, Instant, Timer};

use thermion_protocol::{PanelMessage, ValueRef};

use crate::channels::{OUTBOX, TX_FRAMES};
use crate::keys;

/// Button task - asks the gateway for a full refresh on click
#[embassy_executor::task]
pub async fn button_task(mut btn: Input<'static>) {
    info!("Button task started");

    loop {
        btn.wait_for_falling_edge().await;
        let press_start = Instant::now();

        // Debounce
        Timer::after(Duration::from_millis(20)).await;

        if btn.is_low() {
            // Wait for release or long press timeout
            let released =
                with_timeout(Duration::from_millis(500), btn.wait_for_rising_edge()).await;

            match released {
                Ok(()) => {
                    let duration = press_start.elapsed();
                    if duration.as_millis() > 50 {
                        debug!("Button: Click");
                        request_refresh().await;
                    }
                }
                Err(_) => {
                    // Held past the click window, ignore and wait for release
                    btn.wait_for_rising_edge().await;
                }
            }

            // Debounce after release
            Timer::after(Duration::from_millis(50)).await;
        }
    }
}

/// Queue a refresh command unless one is already in flight
async fn request_refresh() {
    let mut outbox = OUTBOX.lock().await;

    let payload = match outbox.send(keys::ACTION, ValueRef::Text(keys::REFRESH_COMMAND)) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Refresh not queued: {:?}", e);
            return;
        }
    };

    match PanelMessage::Command(payload).to_frame() {
        Ok(frame) => {
            if TX_FRAMES.try_send(frame).is_err() {
                warn!("TX queue full, dropping refresh");
                outbox.complete();
            }
        }
        Err(_) => {
            // A single record always fits a frame
            outbox.complete();
        }
    }
}
