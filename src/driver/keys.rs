#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
/// Logical keys of the keyboard accessory, in wire-code order.
#[allow(missing_docs)]
pub enum Key {
    Light,
    M1,
    M2,
    M3,
    Mr,
    G1,
    G2,
    G3,
    G4,
    G5,
    G6,
    G7,
    G8,
    G9,
    G10,
    G11,
    G12,
    Back,
    Down,
    Left,
    Menu,
    Ok,
    Right,
    Settings,
    Up,
    WinkeySwitch,
    Next,
    Prev,
    Stop,
    Play,
    Mute,
    VolUp,
    VolDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Direction of a key transition.
pub enum KeyState {
    /// Key pressed.
    Down,
    /// Key released.
    Up,
}

/// Fixed wire-code table, indices 0..=32.
const KEY_TABLE: [Key; 33] = [
    Key::Light,
    Key::M1,
    Key::M2,
    Key::M3,
    Key::Mr,
    Key::G1,
    Key::G2,
    Key::G3,
    Key::G4,
    Key::G5,
    Key::G6,
    Key::G7,
    Key::G8,
    Key::G9,
    Key::G10,
    Key::G11,
    Key::G12,
    Key::Back,
    Key::Down,
    Key::Left,
    Key::Menu,
    Key::Ok,
    Key::Right,
    Key::Settings,
    Key::Up,
    Key::WinkeySwitch,
    Key::Next,
    Key::Prev,
    Key::Stop,
    Key::Play,
    Key::Mute,
    Key::VolUp,
    Key::VolDown,
];

/// Map a wire key code onto a [`Key`]. Codes outside the table are unknown.
pub fn key_for_code(code: u32) -> Option<Key> {
    KEY_TABLE.get(code as usize).copied()
}

#[cfg(test)]
#[path = "../../tests/unit/driver/keys.rs"]
mod tests;
