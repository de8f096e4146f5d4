pub mod events;
pub mod text_renderer;

pub use events::GameEvent;
pub use text_renderer::TextRenderer;

use crate::game::GameState;

/// Core trait for presenting a session
pub trait Renderer {
    type Error;

    /// Initialize the renderer for a board of `size`x`size`
    fn initialize(&mut self, size: usize) -> Result<(), Self::Error>;

    /// Handle a session event
    fn handle_event(&mut self, event: &GameEvent) -> Result<(), Self::Error>;

    /// Draw the current state
    fn update(&mut self, state: &GameState) -> Result<(), Self::Error>;

    /// Final output once the session ends
    fn finalize(&mut self, state: &GameState) -> Result<(), Self::Error> {
        let _ = state;
        Ok(())
    }
}
