//! Display update task
//!
//! Owns the OLED and redraws the dashboard as values and link status
//! change.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C1;

use thermion_core::link::LinkStatus;
use thermion_display::{present, Renderer};

use crate::channels::{LINK_STATUS, VALUE_CHANGES};
use crate::sh1106::Sh1106;
use crate::ui::Dashboard;

/// Display task - renders cached state to the OLED
#[embassy_executor::task]
pub async fn display_task(mut display: Sh1106<I2c<'static, I2C1, Async>>) {
    info!("Display task started");

    let mut renderer = Renderer::new();
    let mut dashboard = Dashboard::new();
    let mut link_up = true;

    // Boot splash until the first value or a link transition arrives
    renderer.render_boot();
    if present(renderer.screen_mut(), &mut display).await.is_err() {
        warn!("Display write failed");
    }

    loop {
        match select(VALUE_CHANGES.receive(), LINK_STATUS.wait()).await {
            Either::First((key, value)) => {
                if dashboard.apply(key, &value) && link_up {
                    renderer.render_dashboard(dashboard.current, dashboard.heat, dashboard.cool);
                }
            }
            Either::Second(status) => {
                link_up = status == LinkStatus::Up;
                if link_up {
                    renderer.render_dashboard(dashboard.current, dashboard.heat, dashboard.cool);
                } else {
                    renderer.render_link_lost();
                }
            }
        }

        if present(renderer.screen_mut(), &mut display).await.is_err() {
            warn!("Display write failed");
        }
    }
}
