//! Display backend trait
//!
//! Defines the interface the hardware display driver implements.

use crate::screen::Screen;

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering a [`Screen`] to a
/// character display. Implementations handle the specifics of the attached
/// hardware (OLED over I2C on the reference panel).
///
/// All methods are async since the display usually sits behind a shared
/// bus.
#[allow(async_fn_in_trait)]
pub trait DisplayBackend {
    /// Bus or driver error
    type Error;

    /// Initialize the display hardware
    async fn init(&mut self) -> Result<(), Self::Error>;

    /// Clear the entire display
    async fn clear(&mut self) -> Result<(), Self::Error>;

    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: Text to display
    async fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), Self::Error>;

    /// Flush buffered content to the display
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Push a screen to a display backend
///
/// Does nothing when the screen is clean. Otherwise clears the display,
/// draws every non-empty row, flushes, and marks the screen clean.
pub async fn present<B: DisplayBackend>(
    screen: &mut Screen,
    backend: &mut B,
) -> Result<(), B::Error> {
    if !screen.is_dirty() {
        return Ok(());
    }

    backend.clear().await?;
    for (row, line) in screen.lines().enumerate() {
        if !line.is_empty() {
            backend.draw_text(row as u8, 0, line).await?;
        }
    }
    backend.flush().await?;

    screen.mark_clean();
    Ok(())
}
