use crate::{foundation::core::Rgb8, roster::dancer::DancerColors};

const fn entry(color: u32, border: u32, text: u32) -> DancerColors {
    DancerColors {
        color: Rgb8::from_u32(color),
        border_color: Rgb8::from_u32(border),
        text_color: Rgb8::from_u32(text),
    }
}

/// Marker colors handed out round-robin as dancers join.
pub const PALETTE: [DancerColors; 10] = [
    entry(0x93C5FD, 0x3B82F6, 0x1E40AF), // blue
    entry(0xFDE047, 0xEAB308, 0x713F12), // yellow
    entry(0xFCA5A5, 0xEF4444, 0x991B1B), // red
    entry(0xFDBA74, 0xF97316, 0x9A3412), // orange
    entry(0x86EFAC, 0x22C55E, 0x14532D), // green
    entry(0xC4B5FD, 0x8B5CF6, 0x5B21B6), // violet
    entry(0xF9A8D4, 0xEC4899, 0x9F1239), // pink
    entry(0x7DD3FC, 0x0EA5E9, 0x0C4A6E), // sky
    entry(0xFCD34D, 0xF59E0B, 0x78350F), // amber
    entry(0xA7F3D0, 0x10B981, 0x064E3B), // emerald
];

pub fn palette_entry(index: usize) -> DancerColors {
    PALETTE[index % PALETTE.len()]
}
