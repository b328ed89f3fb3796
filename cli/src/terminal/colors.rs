use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 110, g: 200, b: 150 };
pub const ACCENT: Color = Color::TrueColor { r: 240, g: 190, b: 90 };
pub const RISK: Color = Color::TrueColor { r: 235, g: 95, b: 95 };
