use std::time::{Duration, Instant};

use bk_core::theme::ThemeStyle;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::paint::rgb;

/// Default lifetime of a toast notification.
const TOAST_TTL: Duration = Duration::from_secs(2);

/// Short-lived notification banner ("Contract Address Copied!").
///
/// # Example
/// ```
/// use bk_render::toast::Toast;
/// let toast = Toast::new("Contract Address Copied!");
/// assert!(toast.active());
/// ```
pub struct Toast {
    message: String,
    raised: Instant,
    ttl: Duration,
}

impl Toast {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raised: Instant::now(),
            ttl: TOAST_TTL,
        }
    }

    /// Override the default lifetime.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// `false` once the lifetime has elapsed; the owner drops it then.
    #[must_use]
    pub fn active(&self) -> bool {
        self.raised.elapsed() < self.ttl
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Draw the toast centered near the top of the page.
pub fn draw_toast(frame: &mut Frame, area: Rect, toast: &Toast, style: &ThemeStyle) {
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + 1;
    if y + 3 > area.bottom() {
        return;
    }
    let toast_area = Rect::new(x, y, width, 3);

    frame.render_widget(Clear, toast_area);
    let banner = Paragraph::new(format!(" {} ", toast.message)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(rgb(style.accent)))
            .style(Style::default().fg(rgb(style.text)).bg(rgb(style.background))),
    );
    frame.render_widget(banner, toast_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn toast_expires_after_ttl() {
        let toast = Toast::new("copied").with_ttl(Duration::from_millis(20));
        assert!(toast.active());
        thread::sleep(Duration::from_millis(30));
        assert!(!toast.active());
    }

    #[test]
    fn message_is_preserved() {
        let toast = Toast::new("Contract Address Copied!");
        assert_eq!(toast.message(), "Contract Address Copied!");
    }
}
