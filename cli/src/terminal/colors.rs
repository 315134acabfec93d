use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 0x8a, g: 0xe2, b: 0x34 };
pub const ACCENT: Color = Color::TrueColor { r: 0xfc, g: 0xe9, b: 0x4f };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;
pub const IPV4_ADDR: Color = Color::TrueColor { r: 0x72, g: 0x9f, b: 0xcf };
pub const MAC_ADDR: Color = Color::TrueColor { r: 0xad, g: 0x7f, b: 0xa8 };
pub const VENDOR: Color = Color::TrueColor { r: 0xe9, g: 0xb9, b: 0x6e };
