use ratatui::style::Color;

pub const BG_DARK: Color = Color::Rgb(22, 24, 33);
pub const CARD_BG: Color = Color::Rgb(34, 37, 51);
pub const TEXT_PRIMARY: Color = Color::Rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color = Color::Rgb(140, 145, 165);
/// NO / destructive
pub const ACCENT_PRIMARY: Color = Color::Rgb(239, 83, 80);
/// YES / positive
pub const ACCENT_SECONDARY: Color = Color::Rgb(102, 187, 106);
pub const ACCENT_HIGHLIGHT: Color = Color::Rgb(100, 181, 246);
pub const ACCENT_SKIP: Color = Color::Rgb(255, 202, 40);
