//! UI Theme Module - color palette and style helpers
//!
//! Provides a small theme system for the dockview TUI with:
//! - Palette tokens (not hard-coded colors)
//! - StyleKit helpers for pane borders, selection and tags

use ratatui::style::{Color, Modifier, Style};

use dockview_core::model::ContainerState;

/// Color palette tokens for the theme
#[derive(Clone, Debug)]
pub struct Palette {
    /// Panel border color
    pub panel_border: Color,
    /// Primary text color
    pub text: Color,
    /// Dimmed text (secondary info)
    pub text_dim: Color,
    /// Muted text (tertiary info, disabled)
    pub text_muted: Color,
    /// Accent color (highlights, focus)
    pub accent: Color,
    /// Success state (running)
    pub success: Color,
    /// Warning state (paused, restarting)
    pub warn: Color,
    /// Error state (dead, failed dispatch)
    pub error: Color,
    /// Selection background
    pub selection_bg: Color,
    /// Selection foreground
    pub selection_fg: Color,
    /// Menu cursor background
    pub menu_bg: Color,
    /// Menu cursor foreground
    pub menu_fg: Color,
    /// Key hint text
    pub key_hint: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self::dark()
    }
}

impl Palette {
    pub fn dark() -> Self {
        Self {
            panel_border: Color::Rgb(60, 60, 60),
            text: Color::Rgb(212, 212, 212),
            text_dim: Color::Rgb(150, 150, 150),
            text_muted: Color::Rgb(100, 100, 100),
            accent: Color::Rgb(79, 193, 255),
            success: Color::Rgb(78, 201, 176),
            warn: Color::Rgb(220, 180, 100),
            error: Color::Rgb(244, 135, 113),
            selection_bg: Color::Rgb(38, 79, 120),
            selection_fg: Color::White,
            menu_bg: Color::Green,
            menu_fg: Color::Black,
            key_hint: Color::Rgb(206, 145, 120),
        }
    }
}

/// Theme configuration
#[derive(Clone, Debug, Default)]
pub struct Theme {
    pub palette: Palette,
}

impl Theme {
    // ========== StyleKit Helper Functions ==========

    /// Style for the `<tag>` at the start of a listing line: container
    /// states get status colors, anything else (volume drivers) the accent.
    pub fn tag_style(&self, tag: &str) -> Style {
        let color = match ContainerState::parse(tag) {
            ContainerState::Running => self.palette.success,
            ContainerState::Created | ContainerState::Paused | ContainerState::Restarting => {
                self.palette.warn
            }
            ContainerState::Removing | ContainerState::Dead => self.palette.error,
            ContainerState::Exited => self.palette.text_muted,
            ContainerState::Other(_) => self.palette.accent,
        };
        Style::default().fg(color)
    }

    pub fn key_hint_style(&self) -> Style {
        Style::default().fg(self.palette.key_hint)
    }

    pub fn subtle_border_style(&self) -> Style {
        Style::default().fg(self.palette.panel_border)
    }

    pub fn focused_border_style(&self) -> Style {
        Style::default().fg(self.palette.accent)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .bg(self.palette.selection_bg)
            .fg(self.palette.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn menu_selection_style(&self) -> Style {
        Style::default()
            .bg(self.palette.menu_bg)
            .fg(self.palette.menu_fg)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.palette.text)
    }

    pub fn text_dim_style(&self) -> Style {
        Style::default().fg(self.palette.text_dim)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.palette.error)
    }

    pub fn warn_style(&self) -> Style {
        Style::default().fg(self.palette.warn)
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.palette.text)
            .add_modifier(Modifier::BOLD)
    }
}

/// Global theme instance
static DEFAULT_THEME: std::sync::OnceLock<Theme> = std::sync::OnceLock::new();

pub fn theme() -> &'static Theme {
    DEFAULT_THEME.get_or_init(Theme::default)
}

/// Convenience re-exports for common use cases
pub mod styles {
    use super::*;

    pub fn tag(tag: &str) -> Style {
        theme().tag_style(tag)
    }

    pub fn key_hint() -> Style {
        theme().key_hint_style()
    }

    pub fn border_subtle() -> Style {
        theme().subtle_border_style()
    }

    pub fn border_focused() -> Style {
        theme().focused_border_style()
    }

    pub fn selection() -> Style {
        theme().selection_style()
    }

    pub fn menu_selection() -> Style {
        theme().menu_selection_style()
    }

    pub fn text() -> Style {
        theme().text_style()
    }

    pub fn text_dim() -> Style {
        theme().text_dim_style()
    }

    pub fn error() -> Style {
        theme().error_style()
    }

    pub fn warn() -> Style {
        theme().warn_style()
    }

    pub fn title() -> Style {
        theme().title_style()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_style_by_state() {
        let theme = Theme::default();
        assert_eq!(theme.tag_style("running").fg, Some(theme.palette.success));
        assert_eq!(theme.tag_style("paused").fg, Some(theme.palette.warn));
        assert_eq!(theme.tag_style("exited").fg, Some(theme.palette.text_muted));
        assert_eq!(theme.tag_style("local").fg, Some(theme.palette.accent));
    }
}
