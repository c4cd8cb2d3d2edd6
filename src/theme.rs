use std::str::FromStr;

use tuirealm::ratatui::style::Color;

use crate::types::Status;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum ThemePreset {
    #[default]
    Dark,
    Light,
}

impl ThemePreset {
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl FromStr for ThemePreset {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dark" | "default" | "night" => Ok(Self::Dark),
            "light" | "day" => Ok(Self::Light),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub base: BasePalette,
    pub interactive: InteractivePalette,
    pub column: ColumnPalette,
    pub dialog: DialogPalette,
}

#[derive(Debug, Clone, Copy)]
pub struct BasePalette {
    pub canvas: Color,
    pub text: Color,
    pub text_muted: Color,
    pub header: Color,
    pub accent: Color,
    pub danger: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct InteractivePalette {
    pub focus: Color,
    pub selected_bg: Color,
    pub selected_border: Color,
    pub border: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct ColumnPalette {
    pub todo: Color,
    pub doing: Color,
    pub done: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct DialogPalette {
    pub surface: Color,
    pub input_bg: Color,
    pub button_bg: Color,
}

impl Theme {
    pub fn from_preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Dark => Self {
                base: BasePalette {
                    canvas: Color::Rgb(36, 40, 56),
                    text: Color::White,
                    text_muted: Color::DarkGray,
                    header: Color::Cyan,
                    accent: Color::Magenta,
                    danger: Color::Red,
                },
                interactive: InteractivePalette {
                    focus: Color::Cyan,
                    selected_bg: Color::Rgb(54, 48, 72),
                    selected_border: Color::Rgb(255, 187, 120),
                    border: Color::DarkGray,
                },
                column: ColumnPalette {
                    todo: Color::Cyan,
                    doing: Color::Magenta,
                    done: Color::Green,
                },
                dialog: DialogPalette {
                    surface: Color::Rgb(36, 40, 56),
                    input_bg: Color::Rgb(54, 48, 72),
                    button_bg: Color::Black,
                },
            },
            ThemePreset::Light => Self {
                base: BasePalette {
                    canvas: Color::Rgb(246, 248, 252),
                    text: Color::Rgb(32, 38, 51),
                    text_muted: Color::Rgb(95, 105, 122),
                    header: Color::Rgb(37, 99, 235),
                    accent: Color::Rgb(2, 132, 199),
                    danger: Color::Rgb(185, 28, 28),
                },
                interactive: InteractivePalette {
                    focus: Color::Rgb(37, 99, 235),
                    selected_bg: Color::Rgb(227, 237, 255),
                    selected_border: Color::Rgb(59, 130, 246),
                    border: Color::Rgb(196, 208, 224),
                },
                column: ColumnPalette {
                    todo: Color::Rgb(14, 116, 144),
                    doing: Color::Rgb(124, 58, 237),
                    done: Color::Rgb(22, 163, 74),
                },
                dialog: DialogPalette {
                    surface: Color::Rgb(255, 255, 255),
                    input_bg: Color::Rgb(241, 245, 249),
                    button_bg: Color::Rgb(226, 232, 240),
                },
            },
        }
    }

    pub fn status_accent(&self, status: Status) -> Color {
        match status {
            Status::Todo => self.column.todo,
            Status::Doing => self.column.doing,
            Status::Done => self.column.done,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_preset(ThemePreset::Dark)
    }
}
