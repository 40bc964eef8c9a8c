use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tracing::info;

use flexscroll_core::AppConfig;
use flexscroll_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{StatusBarWidget, StripWidget},
    App, Theme,
};

/// Strip area and status line
fn split(area: Rect) -> (Rect, Rect) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (layout[0], layout[1])
}

pub async fn run(config: AppConfig) -> Result<()> {
    // Build the app before touching the terminal so errors print normally
    let mut app = App::new(config.clone(), Theme::default())?;
    info!(axis = ?app.axis(), "Starting demo");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("FlexScroll"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = main_loop(&mut terminal, &mut app, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &AppConfig,
) -> Result<()> {
    let event_handler =
        EventHandler::with_animation_fps(config.demo.tick_rate_ms, config.animation.animation_fps);

    loop {
        // The strip is measured before the frame so the first draw is placed
        let size = terminal.size()?;
        let (strip, _) = split(Rect::new(0, 0, size.width, size.height));
        app.resize(strip.width, strip.height);
        app.tick(Instant::now());

        terminal.draw(|frame| {
            let (strip, status) = split(frame.area());
            StripWidget::render(frame, strip, app);
            StatusBarWidget::render(frame, status, app);
        })?;

        // Poll faster while the offset is moving
        let event = if app.needs_fast_update() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            let now = Instant::now();
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key), now),
                AppEvent::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse, app.axis());
                    app.handle_action(action, now);
                }
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }

        // Let spawned loads and cooldowns make progress between frames
        tokio::task::yield_now().await;
    }

    info!(items = app.loader.len(), "Demo finished");
    Ok(())
}
