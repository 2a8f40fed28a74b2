//! Dashboard rendering
//!
//! Builds the panel screens from cached thermostat state.
//!
//! The layout follows the wall panel design: current temperature centered
//! under its caption, heat setpoint in the lower left, cool setpoint in
//! the lower right. Temperatures render as `<n>°`, with a placeholder
//! until the gateway has reported a value.

use heapless::String;

use crate::screen::{Screen, LINE_LEN};

/// Shown in place of a temperature the gateway has not reported yet
const NO_READING: &str = "--°";

/// Screen renderer for the panel UI states
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    /// Create a new renderer with an empty screen
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Get the current screen buffer mutably
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// Render the boot/connecting screen
    pub fn render_boot(&mut self) {
        self.screen.clear();
        self.screen.set_line_centered(2, "THERMION");
        self.screen.set_line_centered(4, "Wall Panel");
        self.screen.set_line_centered(6, "Connecting...");
    }

    /// Render the thermostat dashboard
    ///
    /// `None` readings render as the placeholder.
    pub fn render_dashboard(
        &mut self,
        current: Option<i32>,
        heat: Option<i32>,
        cool: Option<i32>,
    ) {
        self.screen.clear();
        self.screen.set_line_centered(0, "Current Temperature");
        self.screen.set_line_centered(2, format_temp(current).as_str());

        // Heat in the left half, cool in the right, labels above values
        let mut labels: String<LINE_LEN> = String::new();
        let _ = write_to_string(&mut labels, format_args!("{:^10}{:^11}", "Heat", "Cool"));
        self.screen.set_line(5, &labels);

        let mut values: String<LINE_LEN> = String::new();
        let _ = write_to_string(
            &mut values,
            format_args!("{:^10}{:^11}", format_temp(heat), format_temp(cool)),
        );
        self.screen.set_line(6, &values);
    }

    /// Render the link-lost screen
    ///
    /// Shown when the gateway stops answering pings.
    pub fn render_link_lost(&mut self) {
        self.screen.clear();
        self.screen.set_line_centered(3, "Link lost");
        self.screen.set_line_centered(5, "Reconnecting...");
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a temperature reading as degrees
fn format_temp(reading: Option<i32>) -> String<16> {
    let mut s: String<16> = String::new();
    match reading {
        Some(value) => {
            let _ = write_to_string(&mut s, format_args!("{}°", value));
        }
        None => {
            let _ = s.push_str(NO_READING);
        }
    }
    s
}

/// Helper to write formatted output to a heapless String
fn write_to_string<const N: usize>(
    s: &mut String<N>,
    args: core::fmt::Arguments<'_>,
) -> core::fmt::Result {
    use core::fmt::Write;
    s.write_fmt(args)
}
