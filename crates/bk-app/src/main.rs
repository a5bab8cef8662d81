use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use bk_audio::{MusicToggle, Player, RefusingSink};
use bk_core::Theme;
use bk_core::config::KioskConfig;
use bk_core::playback::JsonFileStore;
use bk_render::Mascot;
use clap::Parser;

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod hotreload;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config
    let mut config = resolve_config(&cli)?;

    // 3b. Appliquer les overrides CLI
    if let Some(ref slug) = cli.theme {
        match Theme::parse(slug) {
            Ok(theme) => config.theme = theme,
            Err(e) => log::warn!("{e}, utilisation du défaut."),
        }
    }
    if let Some(fps) = cli.fps {
        config.target_fps = fps;
    }
    if let Some(px) = cli.px_per_cell {
        config.px_per_cell = px;
    }
    if let Some(ref path) = cli.music {
        config.music_path = Some(path.clone());
    }
    if cli.no_music {
        config.music_path = None;
    }
    if let Some(ref dir) = cli.state_dir {
        config.state_dir = dir.clone();
    }
    if cli.stats {
        config.show_stats = true;
    }
    config.clamp_all();

    let music_path = config.music_path.clone();
    let mascot_path = config.mascot_path.clone();
    let state_dir = config.state_dir.clone();
    let config = Arc::new(ArcSwap::from_pointee(config));

    // 4. Lancer le hot-reload config (thread interne notify)
    let watcher = if cli.config.exists() {
        Some(hotreload::spawn_config_watcher(&cli.config, &config)?)
    } else {
        None
    };

    // 5. Monter la chaîne musique : backend cpal, ou sink refusant
    //    si pas de piste / pas de périphérique.
    let store = JsonFileStore::new(&state_dir);
    let mut music = MusicToggle::new(store, build_sink(music_path.as_deref()));
    music.initialize();

    // 6. Charger la mascotte (repli ASCII intégré si absente)
    let mascot = Mascot::load(mascot_path.as_deref(), 36, 14);

    // 7. Initialiser le terminal ratatui et lancer la boucle
    let terminal = ratatui::init();
    let result = app::App::new(config, music, mascot).run(terminal);

    // 8. Restaurer le terminal (TOUJOURS, même en cas d'erreur)
    ratatui::restore();

    drop(watcher);
    result
}

/// Build the playback sink: a real cpal-backed player when a track is
/// configured and the device chain comes up, otherwise a sink that
/// refuses every play so the toggle takes its degraded path.
fn build_sink(music_path: Option<&std::path::Path>) -> Box<dyn bk_audio::AudioSink> {
    match music_path {
        Some(path) => match Player::spawn(path) {
            Ok(player) => Box::new(player),
            Err(e) => {
                log::warn!("Musique non disponible : {e}");
                Box::new(RefusingSink::new(e.to_string()))
            }
        },
        None => Box::new(RefusingSink::new("aucune piste configurée")),
    }
}

/// Resolve config from --config, falling back to defaults when absent.
fn resolve_config(cli: &cli::Cli) -> Result<KioskConfig> {
    if cli.config.exists() {
        bk_core::config::load_config(&cli.config)
    } else {
        if cli.config != PathBuf::from("config/kiosk.toml") {
            anyhow::bail!("Config introuvable : {}", cli.config.display());
        }
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(KioskConfig::default())
    }
}
