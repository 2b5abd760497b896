//! Glyphs standing in for the product's icon set.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Compass,
    Zap,
    Map,
    Cpu,
    Navigation,
    Github,
    ArrowRight,
    Menu,
    Close,
    Image,
}

impl Icon {
    pub fn glyph(self) -> &'static str {
        match self {
            Icon::Compass => "◎",
            Icon::Zap => "ϟ",
            Icon::Map => "▦",
            Icon::Cpu => "▣",
            Icon::Navigation => "➤",
            Icon::Github => "⌂",
            Icon::ArrowRight => "→",
            Icon::Menu => "☰",
            Icon::Close => "✕",
            Icon::Image => "▨",
        }
    }
}
