use api_types::settings::Theme as ThemeMode;
use engine::CategoryColor;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub panel: Color,
    pub surface_bright: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub error: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub border: Color,
    pub border_focused: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            panel: Color::Rgb(20, 26, 32),
            surface_bright: Color::Rgb(26, 33, 40),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(170, 170, 170),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(80, 160, 160),
            error: Color::Rgb(200, 80, 80),
            positive: Color::Rgb(90, 180, 110),
            negative: Color::Rgb(220, 110, 90),
            warning: Color::Rgb(220, 180, 80),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(80, 160, 160),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::Rgb(248, 248, 245),
            panel: Color::Rgb(236, 238, 240),
            surface_bright: Color::Rgb(255, 255, 255),
            text: Color::Rgb(30, 34, 40),
            text_muted: Color::Rgb(90, 96, 104),
            dim: Color::Rgb(130, 136, 144),
            accent: Color::Rgb(30, 120, 130),
            error: Color::Rgb(180, 40, 40),
            positive: Color::Rgb(40, 130, 60),
            negative: Color::Rgb(190, 70, 50),
            warning: Color::Rgb(170, 120, 20),
            border: Color::Rgb(200, 204, 210),
            border_focused: Color::Rgb(30, 120, 130),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn category_color(&self, color: CategoryColor) -> Color {
        match color {
            CategoryColor::Orange => Color::Rgb(230, 140, 50),
            CategoryColor::Purple => Color::Rgb(160, 110, 210),
            CategoryColor::Green => Color::Rgb(80, 170, 100),
            CategoryColor::Blue => Color::Rgb(80, 140, 220),
            CategoryColor::Yellow => Color::Rgb(210, 180, 60),
            CategoryColor::Pink => Color::Rgb(220, 110, 160),
            CategoryColor::Gray => self.dim,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
