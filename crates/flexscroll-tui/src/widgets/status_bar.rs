use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use flexscroll_core::Axis;

use crate::app::App;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        frame.render_widget(Paragraph::new(Self::line(app, area.width)), area);
    }

    fn status_text(app: &App) -> String {
        if let Some(msg) = &app.status_message {
            return format!(" {}", msg);
        }
        let axis = match app.axis() {
            Axis::Vertical => "vertical",
            Axis::Horizontal => "horizontal",
        };
        format!(
            " {} | items: {} | offset: {:.0} | anchor: {:.0}",
            axis,
            app.loader.len(),
            app.scroll.offset(),
            app.scroll.addition_offset(),
        )
    }

    pub fn line(app: &App, width: u16) -> Line<'static> {
        let theme = &app.theme;
        let status_text = Self::status_text(app);
        let loading = if app.scroll.is_loading() { " LOADING " } else { "" };
        let help_hint = " drag:scroll m:middle a:append q:quit ";
        let padding_len = width.saturating_sub(
            (status_text.len() + loading.len() + help_hint.len()) as u16,
        ) as usize;

        let fg = if app.status_message.is_some() {
            theme.accent
        } else {
            theme.fg0
        };

        Line::from(vec![
            Span::styled(status_text, Style::default().fg(fg).bg(theme.bg2)),
            Span::styled(loading, Style::default().fg(theme.bg0).bg(theme.loading)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use flexscroll_core::AppConfig;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[tokio::test]
    async fn test_line_shows_state() {
        let mut app = App::new(AppConfig::default(), Theme::default()).unwrap();
        app.resize(40, 30);

        let line = StatusBarWidget::line(&app, 120);
        let rendered = text(&line);
        assert!(rendered.starts_with(" vertical | items: 15 | offset: 450 | anchor: 450"));
        assert!(rendered.ends_with("q:quit "));
        assert_eq!(rendered.len(), 120);
    }

    #[tokio::test]
    async fn test_status_message_replaces_state() {
        let mut app = App::new(AppConfig::default(), Theme::default()).unwrap();
        app.status_message = Some("Loading end".to_string());
        let rendered = text(&StatusBarWidget::line(&app, 20));
        assert!(rendered.starts_with(" Loading end"));
    }
}
