use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Les cinq thèmes de la page promo. Catalogue fermé — pas de comparaison
/// de chaînes dans le code de rendu.
///
/// # Example
/// ```
/// use bk_core::theme::Theme;
/// let theme = Theme::parse("cyber").unwrap();
/// assert_eq!(theme, Theme::Cyber);
/// assert_eq!(theme.style().gallery_title, "DATA_STREAM.gallery");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Theme {
    /// Nébuleuses violettes, champ d'étoiles.
    #[default]
    Cosmic,
    /// Terminal vert sur noir, pluie de glyphes.
    Cyber,
    /// Cyan/magenta irisés, scanlines.
    Holo,
    /// Fond clair, accents orange/rose discrets.
    Minimal,
    /// Grille synthwave, néon rose/cyan.
    Retro,
}

/// Decorative background field drawn behind the page content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackdropKind {
    /// Twinkling star field (cosmic).
    Starfield,
    /// Falling glyph columns (cyber).
    MatrixRain,
    /// Horizontal scanlines with drifting orbs (holo).
    HoloGrid,
    /// Sparse slow-drifting dots (minimal).
    SoftDots,
    /// Perspective horizon grid (retro-wave).
    RetroGrid,
}

/// Static per-theme configuration record: identity strings, gallery
/// tuning, and palette. One instance per [`Theme`] variant, resolved via
/// [`Theme::style`].
pub struct ThemeStyle {
    /// CLI/config slug ("cosmic", "cyber", ...).
    pub slug: &'static str,
    /// Browser-tab style page title shown in the header line.
    pub page_title: &'static str,
    /// Hero headline.
    pub hero_title: &'static str,
    /// Gallery section heading.
    pub gallery_title: &'static str,
    /// Footer tagline.
    pub tagline: &'static str,
    /// Per-tick gallery scroll decrement, in virtual pixels. Distinct per
    /// theme to vary the perceived speed.
    pub step_px: f32,
    /// Viewport width threshold separating narrow/wide tile widths.
    pub breakpoint_px: f32,
    /// Tile width below the breakpoint.
    pub item_width_narrow: f32,
    /// Tile width at/above the breakpoint.
    pub item_width_wide: f32,
    /// Primary accent color.
    pub accent: (u8, u8, u8),
    /// Secondary accent color.
    pub accent_alt: (u8, u8, u8),
    /// Glow color used while music plays and around the mascot.
    pub glow: (u8, u8, u8),
    /// Body text color.
    pub text: (u8, u8, u8),
    /// Page background color.
    pub background: (u8, u8, u8),
    /// Decorative field drawn behind the content.
    pub backdrop: BackdropKind,
}

static COSMIC: ThemeStyle = ThemeStyle {
    slug: "cosmic",
    page_title: "BOBA - Cosmic Theme",
    hero_title: "BOBA CAT",
    gallery_title: "COSMIC GALLERY",
    tagline: "© 2024 BOBA CAT. Journey through the cosmos.",
    step_px: 0.5,
    breakpoint_px: 768.0,
    item_width_narrow: 200.0,
    item_width_wide: 250.0,
    accent: (147, 51, 234),
    accent_alt: (59, 130, 246),
    glow: (236, 72, 153),
    text: (237, 233, 254),
    background: (15, 23, 42),
    backdrop: BackdropKind::Starfield,
};

static CYBER: ThemeStyle = ThemeStyle {
    slug: "cyber",
    page_title: "BOBA - Neon Cyber Theme",
    hero_title: "BOBA CAT",
    gallery_title: "DATA_STREAM.gallery",
    tagline: "© 2024 BOBA CAT. All systems operational.",
    step_px: 0.8,
    breakpoint_px: 768.0,
    item_width_narrow: 200.0,
    item_width_wide: 250.0,
    accent: (0, 255, 65),
    accent_alt: (239, 68, 68),
    glow: (0, 255, 65),
    text: (74, 222, 128),
    background: (0, 0, 0),
    backdrop: BackdropKind::MatrixRain,
};

static HOLO: ThemeStyle = ThemeStyle {
    slug: "holo",
    page_title: "BOBA - Holographic Theme",
    hero_title: "BOBA CAT",
    gallery_title: "DIMENSIONAL GALLERY",
    tagline: "© 2024 BOBA CAT. Phasing between dimensions.",
    step_px: 0.6,
    breakpoint_px: 768.0,
    item_width_narrow: 200.0,
    item_width_wide: 250.0,
    accent: (0, 255, 255),
    accent_alt: (168, 85, 247),
    glow: (255, 0, 255),
    text: (165, 243, 252),
    background: (2, 6, 23),
    backdrop: BackdropKind::HoloGrid,
};

static MINIMAL: ThemeStyle = ThemeStyle {
    slug: "minimal",
    page_title: "BOBA - Minimalist Theme",
    hero_title: "BOBA",
    gallery_title: "Gallery",
    tagline: "© 2024 BOBA. Less noise, more cat.",
    step_px: 0.4,
    breakpoint_px: 768.0,
    item_width_narrow: 200.0,
    item_width_wide: 250.0,
    accent: (251, 146, 60),
    accent_alt: (244, 114, 182),
    glow: (251, 146, 60),
    text: (31, 41, 55),
    background: (250, 250, 249),
    backdrop: BackdropKind::SoftDots,
};

static RETRO: ThemeStyle = ThemeStyle {
    slug: "retro",
    page_title: "BOBA - Retro Wave Theme",
    hero_title: "BOBA",
    gallery_title: "NEON GALLERY",
    tagline: "© 2024 BOBA. Surfing the retro waves since forever.",
    step_px: 0.7,
    breakpoint_px: 768.0,
    item_width_narrow: 200.0,
    item_width_wide: 250.0,
    accent: (236, 72, 153),
    accent_alt: (34, 211, 238),
    glow: (236, 72, 153),
    text: (103, 232, 249),
    background: (24, 8, 41),
    backdrop: BackdropKind::RetroGrid,
};

impl Theme {
    /// All variants, in page order. Index matches the `1`–`5` hotkeys.
    pub const ALL: [Theme; 5] = [
        Theme::Cosmic,
        Theme::Cyber,
        Theme::Holo,
        Theme::Minimal,
        Theme::Retro,
    ];

    /// Resolve the static style record for this theme.
    #[must_use]
    pub fn style(self) -> &'static ThemeStyle {
        match self {
            Theme::Cosmic => &COSMIC,
            Theme::Cyber => &CYBER,
            Theme::Holo => &HOLO,
            Theme::Minimal => &MINIMAL,
            Theme::Retro => &RETRO,
        }
    }

    /// Parse a slug into a theme. Unknown slugs are an error at the CLI
    /// boundary — no silent fallback.
    ///
    /// # Errors
    /// Returns [`CoreError::UnknownTheme`] for anything outside the catalogue.
    pub fn parse(slug: &str) -> Result<Self, CoreError> {
        match slug {
            "cosmic" => Ok(Theme::Cosmic),
            "cyber" => Ok(Theme::Cyber),
            "holo" => Ok(Theme::Holo),
            "minimal" => Ok(Theme::Minimal),
            "retro" => Ok(Theme::Retro),
            _ => Err(CoreError::UnknownTheme {
                slug: slug.to_string(),
            }),
        }
    }

    /// Next theme in catalogue order, wrapping after the last.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Theme::Cosmic => Theme::Cyber,
            Theme::Cyber => Theme::Holo,
            Theme::Holo => Theme::Minimal,
            Theme::Minimal => Theme::Retro,
            Theme::Retro => Theme::Cosmic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_slugs() {
        for theme in Theme::ALL {
            let parsed = Theme::parse(theme.style().slug);
            assert!(matches!(parsed, Ok(t) if t == theme));
        }
    }

    #[test]
    fn parse_unknown_slug_errors() {
        assert!(Theme::parse("vaporwave").is_err());
        assert!(Theme::parse("").is_err());
    }

    #[test]
    fn next_cycles_through_all_five() {
        let mut theme = Theme::Cosmic;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(theme);
            theme = theme.next();
        }
        assert_eq!(theme, Theme::Cosmic);
        assert_eq!(seen.len(), 5);
        for t in Theme::ALL {
            assert!(seen.contains(&t));
        }
    }

    #[test]
    fn per_theme_scroll_speeds() {
        assert!((Theme::Cosmic.style().step_px - 0.5).abs() < f32::EPSILON);
        assert!((Theme::Cyber.style().step_px - 0.8).abs() < f32::EPSILON);
        assert!((Theme::Holo.style().step_px - 0.6).abs() < f32::EPSILON);
        assert!((Theme::Minimal.style().step_px - 0.4).abs() < f32::EPSILON);
        assert!((Theme::Retro.style().step_px - 0.7).abs() < f32::EPSILON);
    }
}
