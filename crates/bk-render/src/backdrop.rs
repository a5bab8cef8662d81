use bk_core::theme::{BackdropKind, Theme, ThemeStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::paint::{lcg, put, rgb_dim, rgb_mix};

/// Star count of the cosmic field.
const STAR_COUNT: usize = 150;
/// Floating particle count of the foreground layer.
const PARTICLE_COUNT: usize = 30;
/// Glyph pool for the cyber rain columns.
const RAIN_GLYPHS: &[u8] = b"BOBACATMEMECOIN01";

/// Champ décoratif animé derrière le contenu de la page. Une variante
/// par thème, reconstruite au changement de thème — pas de moteur
/// d'animation générique.
pub enum Backdrop {
    Stars(StarField),
    Rain(MatrixRain),
    Holo(HoloField),
    Dots(DotField),
    Retro(RetroGrid),
}

impl Backdrop {
    /// Build the field matching the theme's backdrop kind.
    #[must_use]
    pub fn for_theme(theme: Theme, seed: u64) -> Self {
        match theme.style().backdrop {
            BackdropKind::Starfield => Self::Stars(StarField::new(seed)),
            BackdropKind::MatrixRain => Self::Rain(MatrixRain::new(seed)),
            BackdropKind::HoloGrid => Self::Holo(HoloField::new(seed)),
            BackdropKind::SoftDots => Self::Dots(DotField::new(seed)),
            BackdropKind::RetroGrid => Self::Retro(RetroGrid::new()),
        }
    }

    /// Advance the animation by `dt` seconds for the given terminal size.
    pub fn tick(&mut self, dt: f32, size: (u16, u16)) {
        match self {
            Self::Stars(f) => f.t += dt,
            Self::Rain(f) => f.tick(dt, size),
            Self::Holo(f) => f.t += dt,
            Self::Dots(f) => f.tick(dt),
            Self::Retro(f) => f.t += dt,
        }
    }

    /// Paint the field over the whole page area.
    pub fn render(&self, buf: &mut Buffer, area: Rect, style: &ThemeStyle) {
        match self {
            Self::Stars(f) => f.render(buf, area),
            Self::Rain(f) => f.render(buf, area, style),
            Self::Holo(f) => f.render(buf, area, style),
            Self::Dots(f) => f.render(buf, area),
            Self::Retro(f) => f.render(buf, area, style),
        }
    }
}

struct Star {
    x: f32,
    y: f32,
    size: u8,
    period: f32,
    phase: f32,
}

/// 150 twinkling stars, each with its own period and phase.
pub struct StarField {
    stars: Vec<Star>,
    t: f32,
}

impl StarField {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                size: rng.random_range(0..3),
                period: rng.random_range(2.0..6.0),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        Self { stars, t: 0.0 }
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        for star in &self.stars {
            let twinkle =
                (self.t / star.period * std::f32::consts::TAU + star.phase).sin() * 0.5 + 0.5;
            let brightness = 0.2 + 0.8 * twinkle;
            let ch = match star.size {
                0 => '·',
                1 => '+',
                _ => '✦',
            };
            put(
                buf,
                area,
                (star.x * f32::from(area.width)) as i32,
                (star.y * f32::from(area.height)) as i32,
                ch,
                rgb_dim((255, 255, 255), brightness),
            );
        }
    }
}

struct RainColumn {
    head: f32,
    speed: f32,
    trail: i32,
    seed: u32,
}

/// Falling glyph columns spelling out the BOBACATMEMECOIN01 pool.
pub struct MatrixRain {
    columns: Vec<RainColumn>,
    base_seed: u64,
    t: f32,
}

impl MatrixRain {
    fn new(seed: u64) -> Self {
        Self {
            columns: Vec::new(),
            base_seed: seed,
            t: 0.0,
        }
    }

    fn tick(&mut self, dt: f32, size: (u16, u16)) {
        let (width, height) = (usize::from(size.0), f32::from(size.1));
        if self.columns.len() != width {
            let mut rng = StdRng::seed_from_u64(self.base_seed);
            self.columns = (0..width)
                .map(|_| RainColumn {
                    head: rng.random_range(-40.0..0.0),
                    speed: rng.random_range(5.0..14.0),
                    trail: rng.random_range(4..14),
                    seed: rng.random(),
                })
                .collect();
        }
        self.t += dt;
        for col in &mut self.columns {
            col.head += col.speed * dt;
            if col.head - col.trail as f32 > height {
                col.head = -(f32::from((col.seed % 20) as u16));
            }
        }
    }

    fn render(&self, buf: &mut Buffer, area: Rect, style: &ThemeStyle) {
        // Glyph churn is time-quantized so characters mutate a few times
        // per second instead of every frame.
        let churn = (self.t * 3.0) as u32;
        for (x, col) in self.columns.iter().enumerate() {
            let head_row = col.head as i32;
            for k in 0..col.trail {
                let y = head_row - k;
                let g = lcg(col.seed ^ (y as u32).wrapping_mul(2_654_435_761) ^ churn);
                let ch = RAIN_GLYPHS[g as usize % RAIN_GLYPHS.len()] as char;
                let color = if k == 0 {
                    rgb_mix(style.accent, (230, 255, 230), 0.7)
                } else {
                    rgb_dim(style.accent, 1.0 - k as f32 / col.trail as f32)
                };
                put(buf, area, x as i32, y, ch, color);
            }
        }
    }
}

struct Orb {
    x: f32,
    y: f32,
    radius: f32,
    speed: f32,
    phase: f32,
}

/// Drifting scanlines and orbiting glow spots.
pub struct HoloField {
    orbs: Vec<Orb>,
    t: f32,
}

impl HoloField {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let orbs = (0..4)
            .map(|_| Orb {
                x: rng.random_range(0.1..0.9),
                y: rng.random_range(0.1..0.9),
                radius: rng.random_range(0.03..0.08),
                speed: rng.random_range(0.2..0.6),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
            })
            .collect();
        Self { orbs, t: 0.0 }
    }

    fn render(&self, buf: &mut Buffer, area: Rect, style: &ThemeStyle) {
        // Scanlines scroll downward slowly.
        let scroll = (self.t * 2.0) as i32;
        for y in 0..i32::from(area.height) {
            if (y + scroll) % 4 == 0 {
                for x in 0..i32::from(area.width) {
                    put(buf, area, x, y, '─', rgb_dim(style.accent, 0.15));
                }
            }
        }
        for orb in &self.orbs {
            let angle = self.t * orb.speed + orb.phase;
            let ox = orb.x + angle.cos() * orb.radius * 2.0;
            let oy = orb.y + angle.sin() * orb.radius;
            let x = (ox * f32::from(area.width)) as i32;
            let y = (oy * f32::from(area.height)) as i32;
            // Hue drifts through the cyan→magenta band like the holo ring.
            let hue = (angle.sin() * 0.5 + 0.5).clamp(0.0, 1.0);
            let color = rgb_mix(style.accent, style.glow, hue);
            put(buf, area, x, y, '◉', color);
            for (dx, dy) in [(-2, 0), (2, 0), (0, -1), (0, 1)] {
                put(buf, area, x + dx, y + dy, '○', rgb_dim(style.accent, 0.3));
            }
        }
    }
}

struct Dot {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
}

/// Sparse slow-drifting dots for the minimalist page.
pub struct DotField {
    dots: Vec<Dot>,
}

impl DotField {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let dots = (0..40)
            .map(|_| Dot {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                vx: rng.random_range(-0.01..0.01),
                vy: rng.random_range(-0.008..0.008),
            })
            .collect();
        Self { dots }
    }

    fn tick(&mut self, dt: f32) {
        for dot in &mut self.dots {
            dot.x = (dot.x + dot.vx * dt).rem_euclid(1.0);
            dot.y = (dot.y + dot.vy * dt).rem_euclid(1.0);
        }
    }

    fn render(&self, buf: &mut Buffer, area: Rect) {
        for dot in &self.dots {
            put(
                buf,
                area,
                (dot.x * f32::from(area.width)) as i32,
                (dot.y * f32::from(area.height)) as i32,
                '·',
                ratatui::style::Color::Rgb(209, 213, 219),
            );
        }
    }
}

/// Synthwave horizon: perspective grid rushing toward the viewer.
pub struct RetroGrid {
    t: f32,
}

impl RetroGrid {
    fn new() -> Self {
        Self { t: 0.0 }
    }

    fn render(&self, buf: &mut Buffer, area: Rect, style: &ThemeStyle) {
        let w = i32::from(area.width);
        let h = i32::from(area.height);
        let horizon = h * 45 / 100;
        let below = (h - horizon).max(1);

        // Horizontal lines accelerate as they approach the bottom edge.
        for i in 0..8 {
            let p = (self.t * 0.15 + i as f32 / 8.0).fract();
            let y = horizon + (p * p * below as f32) as i32;
            let fade = 0.15 + 0.45 * p;
            for x in 0..w {
                put(buf, area, x, y, '─', rgb_dim(style.accent, fade));
            }
        }

        // Converging rays from the vanishing point.
        for k in -6i32..=6 {
            if k == 0 {
                continue;
            }
            for dy in 1..below {
                let x = w / 2 + k * dy * 2;
                put(
                    buf,
                    area,
                    x,
                    horizon + dy,
                    '·',
                    rgb_dim(style.accent_alt, 0.35),
                );
            }
        }

        // Setting sun above the horizon.
        let sun_x = w / 2;
        for dy in 0..4i32 {
            let half = 7 - dy * 2;
            for dx in -half..=half {
                put(
                    buf,
                    area,
                    sun_x + dx,
                    horizon - 1 - dy,
                    '▀',
                    rgb_mix(style.accent, (251, 191, 36), dy as f32 / 4.0),
                );
            }
        }
    }
}

struct Particle {
    x: f32,
    y: f32,
    rise: f32,
    sway: f32,
    phase: f32,
    size: u8,
    color: u8,
}

/// Foreground layer of 30 floating particles, rising like cosmic dust.
/// Shared by all themes, tinted per palette.
pub struct Particles {
    parts: Vec<Particle>,
    t: f32,
}

impl Particles {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let parts = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                rise: rng.random_range(0.02..0.08),
                sway: rng.random_range(0.005..0.02),
                phase: rng.random_range(0.0..std::f32::consts::TAU),
                size: rng.random_range(0..3),
                color: rng.random_range(0..3),
            })
            .collect();
        Self { parts, t: 0.0 }
    }

    pub fn tick(&mut self, dt: f32) {
        self.t += dt;
        for p in &mut self.parts {
            p.y -= p.rise * dt;
            if p.y < 0.0 {
                p.y += 1.0;
            }
        }
    }

    pub fn render(&self, buf: &mut Buffer, area: Rect, style: &ThemeStyle) {
        let palette = [style.accent, style.accent_alt, style.glow];
        for p in &self.parts {
            let sway = (self.t + p.phase).sin() * p.sway;
            let x = ((p.x + sway) * f32::from(area.width)) as i32;
            let y = (p.y * f32::from(area.height)) as i32;
            // Fade in near the bottom, out near the top.
            let fade = (p.y * (1.0 - p.y) * 4.0).clamp(0.0, 1.0);
            let ch = match p.size {
                0 => '·',
                1 => '∘',
                _ => '•',
            };
            put(
                buf,
                area,
                x,
                y,
                ch,
                rgb_dim(palette[usize::from(p.color)], fade),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backdrop_matches_theme_kind() {
        assert!(matches!(
            Backdrop::for_theme(Theme::Cosmic, 7),
            Backdrop::Stars(_)
        ));
        assert!(matches!(
            Backdrop::for_theme(Theme::Cyber, 7),
            Backdrop::Rain(_)
        ));
        assert!(matches!(
            Backdrop::for_theme(Theme::Holo, 7),
            Backdrop::Holo(_)
        ));
        assert!(matches!(
            Backdrop::for_theme(Theme::Minimal, 7),
            Backdrop::Dots(_)
        ));
        assert!(matches!(
            Backdrop::for_theme(Theme::Retro, 7),
            Backdrop::Retro(_)
        ));
    }

    #[test]
    fn all_backdrops_tick_and_render_without_panic() {
        let area = Rect::new(0, 0, 60, 20);
        for theme in Theme::ALL {
            let mut backdrop = Backdrop::for_theme(theme, 42);
            let mut buf = Buffer::empty(area);
            for _ in 0..30 {
                backdrop.tick(1.0 / 60.0, (60, 20));
            }
            backdrop.render(&mut buf, area, theme.style());
        }
    }

    #[test]
    fn particles_stay_in_unit_square() {
        let mut particles = Particles::new(1);
        for _ in 0..10_000 {
            particles.tick(0.016);
        }
        for p in &particles.parts {
            assert!(p.y >= 0.0 && p.y <= 1.0);
        }
    }
}
