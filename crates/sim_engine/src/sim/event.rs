//! Discrete input events delivered to entity behaviors
//!
//! The windowing layer is an external collaborator; these are the events it
//! forwards into the simulation via `Simulation::process_event`.

/// Keyboard key identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Letter key A
    A,
    /// Letter key D
    D,
    /// Letter key S
    S,
    /// Letter key W
    W,
    /// Space bar
    Space,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse button identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Input or window event forwarded to entity behaviors
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimEvent {
    /// Key was pressed
    KeyPressed(KeyCode),

    /// Key was released
    KeyReleased(KeyCode),

    /// Mouse button was clicked at the given cursor position
    MouseClicked {
        /// Which button
        button: MouseButton,
        /// Cursor X coordinate
        x: f64,
        /// Cursor Y coordinate
        y: f64,
    },

    /// Mouse cursor moved
    MouseMoved {
        /// New X coordinate
        x: f64,
        /// New Y coordinate
        y: f64,
    },

    /// Window or viewport was resized
    Resized {
        /// New width in pixels
        width: u32,
        /// New height in pixels
        height: u32,
    },
}
