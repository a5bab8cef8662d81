use bk_core::Carousel;
use bk_core::theme::{Theme, ThemeStyle};
use chrono::Local;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::backdrop::{Backdrop, Particles};
use crate::frame_stats::FrameStats;
use crate::gallery::draw_strip;
use crate::mascot::Mascot;
use crate::paint::{fill_background, put, put_str, rgb, rgb_dim, rgb_mix};
use crate::toast::{Toast, draw_toast};

/// Tout ce dont une frame de page a besoin, emprunté à l'application.
pub struct PageCtx<'a> {
    pub theme: Theme,
    pub carousel: &'a Carousel,
    pub backdrop: &'a Backdrop,
    pub particles: &'a Particles,
    pub mascot: &'a Mascot,
    /// Animation phase in seconds, drives the mascot bob and title pulse.
    pub phase: f32,
    pub music_playing: bool,
    pub contract_address: &'a str,
    pub px_per_cell: f32,
    pub stats: Option<&'a FrameStats>,
    pub toast: Option<&'a Toast>,
    pub show_help: bool,
}

/// Draw one full page frame: backdrop, hero, contract bar, gallery,
/// footer, then the floating overlays.
pub fn draw(frame: &mut Frame<'_>, ctx: &PageCtx<'_>) {
    let area = frame.area();
    let style = ctx.theme.style();

    {
        let buf = frame.buffer_mut();
        fill_background(buf, area, style.background);
        ctx.backdrop.render(buf, area, style);
        ctx.particles.render(buf, area, style);
    }

    let [header, hero, contract, gallery, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(8),
        Constraint::Length(3),
        Constraint::Length(10),
        Constraint::Length(2),
    ])
    .areas(area);

    draw_header(frame.buffer_mut(), header, ctx.theme, style);
    draw_hero(frame.buffer_mut(), hero, ctx, style);
    draw_contract_bar(frame, contract, ctx, style);
    draw_gallery(frame.buffer_mut(), gallery, ctx, style);
    draw_footer(frame.buffer_mut(), footer, ctx, style);

    if let Some(toast) = ctx.toast {
        draw_toast(frame, area, toast, style);
    }
    if ctx.show_help {
        draw_help(frame, area, style);
    }
}

fn draw_header(buf: &mut Buffer, area: Rect, theme: Theme, style: &ThemeStyle) {
    let title = style.page_title;
    put_str(buf, area, 1, 0, title, rgb(style.accent));

    // The cyber page runs a system clock in its chrome.
    let right = if theme == Theme::Cyber {
        format!("SYS_TIME {}", Local::now().format("%H:%M:%S"))
    } else {
        Local::now().format("%H:%M").to_string()
    };
    let x = i32::from(area.width) - right.len() as i32 - 1;
    put_str(buf, area, x, 0, &right, rgb_dim(style.text, 0.6));

    for x in 0..i32::from(area.width) {
        put(buf, area, x, 1, '─', rgb_dim(style.accent, 0.4));
    }
}

fn draw_hero(buf: &mut Buffer, area: Rect, ctx: &PageCtx<'_>, style: &ThemeStyle) {
    let (mw, mh) = ctx.mascot.size();
    let cx = i32::from(area.width) / 2;

    // Mascot sits centered with the orbital rings behind it.
    let mascot_area = Rect {
        x: area.x + (area.width.saturating_sub(mw)) / 2,
        y: area.y + 1,
        width: mw.min(area.width),
        height: mh.min(area.height.saturating_sub(4)),
    };
    ctx.mascot.render(buf, mascot_area, style, ctx.phase);

    // Gradient hero title, pulsing with the animation phase.
    let title = style.hero_title;
    let ty = i32::from(mascot_area.height) + 2;
    let tx = cx - title.chars().count() as i32 / 2;
    let pulse = (ctx.phase * 2.0).sin() * 0.15 + 0.85;
    let len = title.chars().count().max(1) as f32;
    for (i, ch) in title.chars().enumerate() {
        let g = i as f32 / len;
        let color = rgb_dim_mix(style.accent, style.glow, g, pulse);
        put(buf, area, tx + i as i32, ty, ch, color);
    }

    let tagline = style.tagline;
    let gx = cx - tagline.chars().count() as i32 / 2;
    put_str(buf, area, gx, ty + 1, tagline, rgb_dim(style.text, 0.7));
}

fn rgb_dim_mix(a: (u8, u8, u8), b: (u8, u8, u8), t: f32, dim: f32) -> Color {
    let Color::Rgb(r, g, bl) = rgb_mix(a, b, t) else {
        return rgb(a);
    };
    rgb_dim((r, g, bl), dim)
}

fn draw_contract_bar(frame: &mut Frame<'_>, area: Rect, ctx: &PageCtx<'_>, style: &ThemeStyle) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(rgb(style.accent)))
        .title(" CA ");
    let text = format!("{}   [c] copier", ctx.contract_address);
    let para = Paragraph::new(Line::from(text))
        .style(Style::default().fg(rgb(style.text)))
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(para, area);
}

fn draw_gallery(buf: &mut Buffer, area: Rect, ctx: &PageCtx<'_>, style: &ThemeStyle) {
    put_str(buf, area, 1, 0, style.gallery_title, rgb(style.accent_alt));
    let strip = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    draw_strip(buf, strip, ctx.carousel, style, ctx.px_per_cell);
}

fn draw_footer(buf: &mut Buffer, area: Rect, ctx: &PageCtx<'_>, style: &ThemeStyle) {
    let keys = "[1-5] thème  [Tab] suivant  [m] musique  [c] copier  [?] aide  [q] quitter";
    put_str(buf, area, 1, 0, keys, rgb_dim(style.text, 0.5));

    // Music indicator bottom-right, glowing while playing.
    let label = if ctx.music_playing { "♪ ON " } else { "♪ off" };
    let color = if ctx.music_playing {
        rgb(style.glow)
    } else {
        rgb_dim(style.text, 0.4)
    };
    let x = i32::from(area.width) - label.chars().count() as i32 - 1;
    put_str(buf, area, x, 1, label, color);

    if let Some(stats) = ctx.stats {
        let line = format!("{:.0} fps  {:.1} ms", stats.fps(), stats.frame_time_ms);
        put_str(buf, area, 1, 1, &line, rgb_dim(style.text, 0.5));
    }
}

fn draw_help(frame: &mut Frame<'_>, area: Rect, style: &ThemeStyle) {
    let lines = [
        "1-5      choisir un thème",
        "Tab      thème suivant",
        "m / Espace  musique on/off",
        "c        copier l'adresse du contrat",
        "?        afficher/masquer cette aide",
        "q / Échap   quitter",
    ];
    let w = 44u16.min(area.width);
    let h = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(w)) / 2,
        y: area.y + (area.height.saturating_sub(h)) / 2,
        width: w,
        height: h,
    };
    frame.render_widget(Clear, popup);
    let body: Vec<Line<'_>> = lines.iter().map(|l| Line::from(*l)).collect();
    let para = Paragraph::new(body)
        .style(Style::default().fg(rgb(style.text)))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(rgb(style.accent)))
                .title(" Aide "),
        );
    frame.render_widget(para, popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn ctx_for<'a>(
        theme: Theme,
        carousel: &'a Carousel,
        backdrop: &'a Backdrop,
        particles: &'a Particles,
        mascot: &'a Mascot,
    ) -> PageCtx<'a> {
        PageCtx {
            theme,
            carousel,
            backdrop,
            particles,
            mascot,
            phase: 0.5,
            music_playing: true,
            contract_address: "BoBA7cAtq3kYkXmZn4vPzW2uJ9fGdR5sLxT8eHw6QmCp",
            px_per_cell: 8.0,
            stats: None,
            toast: None,
            show_help: false,
        }
    }

    #[test]
    fn every_theme_page_draws_without_panic() {
        for theme in Theme::ALL {
            let carousel = Carousel::gallery(25, theme.style().into());
            let backdrop = Backdrop::for_theme(theme, 3);
            let particles = Particles::new(3);
            let mascot = Mascot::load(None, 24, 12);
            let ctx = ctx_for(theme, &carousel, &backdrop, &particles, &mascot);

            let backend = TestBackend::new(100, 32);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal.draw(|frame| draw(frame, &ctx)).unwrap();
        }
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let theme = Theme::Cosmic;
        let carousel = Carousel::gallery(25, theme.style().into());
        let backdrop = Backdrop::for_theme(theme, 3);
        let particles = Particles::new(3);
        let mascot = Mascot::load(None, 24, 12);
        let mut ctx = ctx_for(theme, &carousel, &backdrop, &particles, &mascot);
        ctx.show_help = true;

        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| draw(frame, &ctx)).unwrap();
    }
}
