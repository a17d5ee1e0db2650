use softgui_render::Color;

/// Colors used by the built-in widget painters.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub window: Color,
    pub face: Color,
    pub face_pressed: Color,
    pub field: Color,
    pub border: Color,
    pub highlight: Color,
    pub shadow: Color,
    pub text: Color,
    pub accent: Color,
    pub selection: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            window: Color::from_hex(0xF0F0F0),
            face: Color::from_hex(0xE1E1E1),
            face_pressed: Color::from_hex(0xCCCCCC),
            field: Color::WHITE,
            border: Color::from_hex(0x7A7A7A),
            highlight: Color::WHITE,
            shadow: Color::from_hex(0xA0A0A0),
            text: Color::BLACK,
            accent: Color::from_hex(0x0078D7),
            selection: Color::from_hex(0xCCE8FF),
        }
    }
}
