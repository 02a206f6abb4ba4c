use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccentPalette {
    #[default]
    Purple,
    Violet,
}

/// The one theming knob of the presentation adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub accent_palette: AccentPalette,
    pub dark_mode: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            accent_palette: AccentPalette::Purple,
            dark_mode: true,
        }
    }
}

/// Resolved colours per display role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub user_message: Rgb,
    pub system_message: Rgb,
}

impl ThemeConfig {
    pub fn palette(&self) -> Palette {
        let (accent, highlight) = match self.accent_palette {
            AccentPalette::Purple => (Rgb(0x93, 0x33, 0xea), Rgb(0xec, 0x48, 0x99)),
            AccentPalette::Violet => (Rgb(0x7c, 0x3a, 0xed), Rgb(0xd9, 0x46, 0xef)),
        };
        if self.dark_mode {
            Palette {
                background: Rgb(0x11, 0x18, 0x27),
                text: Rgb(0xf3, 0xf4, 0xf6),
                muted: Rgb(0x9c, 0xa3, 0xaf),
                accent,
                user_message: highlight,
                system_message: Rgb(0xe5, 0xe7, 0xeb),
            }
        } else {
            Palette {
                background: Rgb(0xee, 0xf2, 0xff),
                text: Rgb(0x1f, 0x29, 0x37),
                muted: Rgb(0x4b, 0x55, 0x63),
                accent,
                user_message: accent,
                system_message: Rgb(0x37, 0x41, 0x51),
            }
        }
    }
}
