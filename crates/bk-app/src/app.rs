use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use arc_swap::ArcSwap;
use bk_audio::MusicToggle;
use bk_core::config::KioskConfig;
use bk_core::playback::JsonFileStore;
use bk_core::{Carousel, Theme};
use bk_render::backdrop::{Backdrop, Particles};
use bk_render::frame_stats::FrameStats;
use bk_render::mascot::Mascot;
use bk_render::page::{self, PageCtx};
use bk_render::toast::Toast;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::clipboard;

/// Application state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppState {
    /// La borne tourne normalement.
    Running,
    /// Overlay d'aide affiché (touche ?).
    Help,
    /// Fermeture. Doit se terminer au prochain tour de boucle.
    Quitting,
}

/// Main application struct holding all state.
pub struct App {
    pub state: AppState,
    /// Config courante (mise à jour par le watcher via arc-swap).
    pub config: Arc<ArcSwap<KioskConfig>>,
    pub theme: Theme,
    pub carousel: Carousel,
    pub backdrop: Backdrop,
    pub particles: Particles,
    pub mascot: Mascot,
    pub music: MusicToggle<JsonFileStore>,
    pub toast: Option<Toast>,
    pub stats: FrameStats,
    /// Phase d'animation en secondes (balancement mascotte, pulsation titre).
    pub phase: f32,
    terminal_size: (u16, u16),
    backdrop_seed: u64,
}

impl App {
    #[must_use]
    pub fn new(
        config: Arc<ArcSwap<KioskConfig>>,
        music: MusicToggle<JsonFileStore>,
        mascot: Mascot,
    ) -> Self {
        let cfg = config.load();
        let theme = cfg.theme;
        let carousel = Carousel::gallery(cfg.gallery_count, theme.style().into());
        let backdrop_seed = 0xB0BA_CA70;
        let backdrop = Backdrop::for_theme(theme, backdrop_seed);
        let particles = Particles::new(backdrop_seed);
        drop(cfg);

        Self {
            state: AppState::Running,
            config,
            theme,
            carousel,
            backdrop,
            particles,
            mascot,
            music,
            toast: None,
            stats: FrameStats::new(),
            phase: 0.0,
            terminal_size: (0, 0),
            backdrop_seed,
        }
    }

    /// Boucle principale : pacing frame, événements, tick, rendu.
    ///
    /// # Errors
    /// Returns an error if the terminal backend fails.
    pub fn run(&mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut last_frame = Instant::now();

        loop {
            if self.state == AppState::Quitting {
                break;
            }

            let config = self.config.load();
            let frame_duration = Duration::from_secs_f64(1.0 / f64::from(config.target_fps));
            let px_per_cell = config.px_per_cell;
            let show_stats = config.show_stats;
            drop(config);

            let now = Instant::now();
            let elapsed = now - last_frame;

            if elapsed < frame_duration {
                // Dormir le temps restant, mais rester réactif aux événements.
                let remaining = frame_duration.saturating_sub(elapsed);
                if event::poll(remaining)? {
                    self.handle_event(&event::read()?);
                }
                continue;
            }
            last_frame = now;

            while event::poll(Duration::ZERO)? {
                self.handle_event(&event::read()?);
            }

            let size = terminal.size()?;
            self.terminal_size = (size.width, size.height);

            // Un pas de carrousel par frame, dans le viewport virtuel.
            let dt = elapsed.as_secs_f32().min(0.25);
            let viewport_px = f32::from(size.width) * px_per_cell;
            self.carousel.tick(viewport_px);
            self.backdrop.tick(dt, self.terminal_size);
            self.particles.tick(dt);
            self.phase += dt;

            if let Some(toast) = &self.toast
                && !toast.active()
            {
                self.toast = None;
            }

            let contract_address = self.config.load().contract_address.clone();
            let ctx = PageCtx {
                theme: self.theme,
                carousel: &self.carousel,
                backdrop: &self.backdrop,
                particles: &self.particles,
                mascot: &self.mascot,
                phase: self.phase,
                music_playing: self.music.is_playing(),
                contract_address: &contract_address,
                px_per_cell,
                stats: show_stats.then_some(&self.stats),
                toast: self.toast.as_ref(),
                show_help: self.state == AppState::Help,
            };
            terminal.draw(|frame| page::draw(frame, &ctx))?;
            self.stats.tick();
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state = AppState::Quitting;
            return;
        }

        if self.state == AppState::Help {
            // N'importe quelle touche ferme l'aide.
            self.state = AppState::Running;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state = AppState::Quitting,
            KeyCode::Char('?') => self.state = AppState::Help,
            KeyCode::Char(c @ '1'..='5') => {
                let idx = (c as usize) - ('1' as usize);
                self.set_theme(Theme::ALL[idx]);
            }
            KeyCode::Tab => self.set_theme(self.theme.next()),
            KeyCode::Char('m' | ' ') => self.music.toggle(),
            KeyCode::Char('c') => self.copy_contract(),
            _ => {}
        }
    }

    /// Change de page : reconfigure le carrousel (offset remis à zéro,
    /// comme un remontage) et reconstruit le backdrop.
    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        self.carousel.retune(theme.style().into());
        self.backdrop = Backdrop::for_theme(theme, self.backdrop_seed);
        log::info!("Thème : {}", theme.style().slug);
    }

    fn copy_contract(&mut self) {
        let address = self.config.load().contract_address.clone();
        match clipboard::copy_to_clipboard(&address) {
            Ok(()) => {
                self.toast = Some(Toast::new("Contract Address Copied!"));
            }
            Err(e) => {
                log::warn!("Copie presse-papiers impossible : {e}");
                self.toast = Some(Toast::new("Copy failed"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bk_audio::RefusingSink;
    use tempfile::TempDir;

    fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let music = MusicToggle::new(store, Box::new(RefusingSink::new("test")));
        let config = Arc::new(ArcSwap::from_pointee(KioskConfig::default()));
        let mascot = Mascot::load(None, 24, 12);
        (App::new(config, music, mascot), dir)
    }

    #[test]
    fn theme_keys_switch_pages() {
        let (mut app, _dir) = test_app();
        app.handle_key(&KeyEvent::from(KeyCode::Char('2')));
        assert_eq!(app.theme, Theme::Cyber);
        app.handle_key(&KeyEvent::from(KeyCode::Char('5')));
        assert_eq!(app.theme, Theme::Retro);
    }

    #[test]
    fn tab_cycles_through_all_themes() {
        let (mut app, _dir) = test_app();
        let start = app.theme;
        for _ in 0..5 {
            app.handle_key(&KeyEvent::from(KeyCode::Tab));
        }
        assert_eq!(app.theme, start);
    }

    #[test]
    fn switching_theme_resets_carousel_offset() {
        let (mut app, _dir) = test_app();
        for _ in 0..100 {
            app.carousel.tick(800.0);
        }
        assert!(app.carousel.offset_px() < 0.0);
        app.set_theme(Theme::Holo);
        assert!(app.carousel.offset_px().abs() < f32::EPSILON);
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let (mut app, _dir) = test_app();
        app.handle_key(&KeyEvent::from(KeyCode::Esc));
        assert_eq!(app.state, AppState::Quitting);
    }

    #[test]
    fn help_closes_on_any_key() {
        let (mut app, _dir) = test_app();
        app.handle_key(&KeyEvent::from(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Help);
        app.handle_key(&KeyEvent::from(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Running);
    }

    #[test]
    fn music_key_flips_playing_flag() {
        let (mut app, _dir) = test_app();
        assert!(!app.music.is_playing());
        app.handle_key(&KeyEvent::from(KeyCode::Char('m')));
        assert!(app.music.is_playing());
        app.handle_key(&KeyEvent::from(KeyCode::Char(' ')));
        assert!(!app.music.is_playing());
    }
}
