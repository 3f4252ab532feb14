use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x00ff8504);
pub const SECONDARY: Color = Color::from_u32(0x00990287);
pub const NEUTRAL: Color = Color::from_u32(0x00404040);
pub const MUTED: Color = Color::from_u32(0x00808080);
pub const BACKGROUND: Color = Color::from_u32(0x000a0c0d);
