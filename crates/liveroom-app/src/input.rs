//! Key vocabulary shared by every front end.

/// A keystroke, already stripped of any terminal-library detail.
///
/// Drivers translate their native key events into this enum, so the app
/// and the input line can be exercised in tests without a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Backspace, removing the character before the cursor.
    Backspace,
    /// Delete, removing the character under the cursor.
    Delete,
    /// Escape key (leave the room).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key (scroll the feed back).
    Up,
    /// Down arrow key (scroll the feed forward).
    Down,
    /// Page Up, scrolling the feed back a screenful.
    PageUp,
    /// Page Down, scrolling the feed forward a screenful.
    PageDown,
    /// Home, jumping the cursor to the start of the line.
    Home,
    /// End, jumping the cursor to the end of the line.
    End,
}
