use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Configuration du kiosque, hot-rechargeable.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use bk_core::config::KioskConfig;
/// let config = KioskConfig::default();
/// assert_eq!(config.target_fps, 60);
/// assert_eq!(config.gallery_count, 25);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct KioskConfig {
    /// Thème affiché au démarrage.
    pub theme: Theme,
    /// FPS cible de la boucle de rendu.
    pub target_fps: u32,
    /// Largeur virtuelle d'une cellule terminal, en pixels. Sert à
    /// résoudre le breakpoint 768 px de la galerie.
    pub px_per_cell: f32,
    /// Adresse du contrat, copiée par la touche `c`.
    pub contract_address: String,
    /// Piste audio en boucle. None = pas de musique.
    pub music_path: Option<PathBuf>,
    /// Image de la mascotte pour le héros. None = ASCII intégré.
    pub mascot_path: Option<PathBuf>,
    /// Nombre d'images de la galerie (`slider/1.png`..`slider/N.png`).
    pub gallery_count: usize,
    /// Répertoire de l'état persistant (musicPlayerState.json).
    pub state_dir: PathBuf,
    /// Afficher FPS / frame time dans le pied de page.
    pub show_stats: bool,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Cosmic,
            target_fps: 60,
            px_per_cell: 8.0,
            contract_address: "BoBA7cAtq3kYkXmZn4vPzW2uJ9fGdR5sLxT8eHw6QmCp".to_string(),
            music_path: Some(PathBuf::from("assets/music.mp3")),
            mascot_path: Some(PathBuf::from("assets/home.png")),
            gallery_count: 25,
            state_dir: PathBuf::from("state"),
            show_stats: false,
        }
    }
}

impl KioskConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.target_fps = self.target_fps.clamp(15, 120);
        self.px_per_cell = self.px_per_cell.clamp(2.0, 32.0);
        self.gallery_count = self.gallery_count.clamp(1, 100);
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    kiosk: Option<KioskSection>,
    gallery: Option<GallerySection>,
}

/// Kiosk section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct KioskSection {
    theme: Option<String>,
    target_fps: Option<u32>,
    contract_address: Option<String>,
    music_path: Option<PathBuf>,
    mascot_path: Option<PathBuf>,
    state_dir: Option<PathBuf>,
    show_stats: Option<bool>,
}

/// Gallery section of the TOML config, all fields optional.
#[derive(Deserialize)]
struct GallerySection {
    count: Option<usize>,
    px_per_cell: Option<f32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or if the theme
/// slug is unknown.
///
/// # Example
/// ```no_run
/// use bk_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/kiosk.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<KioskConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    let file: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))?;

    let mut config = KioskConfig::default();

    if let Some(k) = file.kiosk {
        if let Some(ref slug) = k.theme {
            config.theme = Theme::parse(slug)?;
        }
        if let Some(v) = k.target_fps {
            config.target_fps = v;
        }
        if let Some(v) = k.contract_address {
            config.contract_address = v;
        }
        if let Some(v) = k.music_path {
            config.music_path = Some(v);
        }
        if let Some(v) = k.mascot_path {
            config.mascot_path = Some(v);
        }
        if let Some(v) = k.state_dir {
            config.state_dir = v;
        }
        if let Some(v) = k.show_stats {
            config.show_stats = v;
        }
    }

    if let Some(g) = file.gallery {
        if let Some(v) = g.count {
            config.gallery_count = v;
        }
        if let Some(v) = g.px_per_cell {
            config.px_per_cell = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let file = write_config("[kiosk]\ntheme = \"retro\"\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.theme, Theme::Retro);
        assert_eq!(config.target_fps, 60);
        assert_eq!(config.gallery_count, 25);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let file = write_config("[kiosk]\ntarget_fps = 500\n\n[gallery]\ncount = 4000\npx_per_cell = 0.5\n");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.target_fps, 120);
        assert_eq!(config.gallery_count, 100);
        assert!((config.px_per_cell - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn unknown_theme_slug_is_an_error() {
        let file = write_config("[kiosk]\ntheme = \"plasma\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/kiosk.toml")).is_err());
    }
}
