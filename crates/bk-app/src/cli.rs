use std::path::PathBuf;

use clap::Parser;

/// boba-kiosk — Borne promo BOBA CAT pour terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Thème de départ : cosmic, cyber, holo, minimal, retro.
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Fichier de configuration TOML. Défaut : config/kiosk.toml.
    #[arg(short, long, default_value = "config/kiosk.toml")]
    pub config: PathBuf,

    /// Piste musicale (MP3, FLAC, OGG, WAV). Remplace la config.
    #[arg(long)]
    pub music: Option<PathBuf>,

    /// Démarrer sans backend audio, même si une piste est configurée.
    #[arg(long, default_value_t = false)]
    pub no_music: bool,

    /// Répertoire d'état persistant (flag lecture musique).
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// FPS cible (15 à 120).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Pixels virtuels par cellule terminal (échelle du carrousel).
    #[arg(long)]
    pub px_per_cell: Option<f32>,

    /// Afficher la ligne de stats (fps, temps de frame).
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
