use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Flex, Layout},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use logoloop_core::{marquee::probe_dimensions, AnimationHandle, AppConfig, FrameTick};
use logoloop_tui::{
    app::{App, Mode, SPEED_STEP},
    event::{AppEvent, EventHandler, MediaLoadResult},
    input::{handle_key_event, Action},
    keymap::Keymap,
    widgets::{MarqueeWidget, PopupWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Create keymap from config
    let keymap = Keymap::from_config(&config.keymap);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle(&config.marquee.aria_label)
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config, &keymap).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: Arc<AppConfig>,
    keymap: &Keymap,
) -> Result<()> {
    let mut app = App::new(config.clone());
    let event_handler = EventHandler::new(config.ui.tick_rate_ms);

    // Probe media sizes in the background; the track measures once they settle
    let (media_tx, mut media_rx) = mpsc::unbounded_channel::<MediaLoadResult>();
    let round = app.begin_settle_round();
    for index in round.pending {
        if let Some(src) = app.media_src(index) {
            spawn_media_load(round.generation, index, src.to_string(), media_tx.clone());
        }
    }

    // Frame loop feeding a single-slot channel
    let (frame_tx, mut frame_rx) = mpsc::channel::<FrameTick>(1);
    let mut animation = AnimationHandle::new(
        AnimationHandle::interval_for_fps(config.ui.animation_fps),
        frame_tx,
    );
    app.engine.begin();
    if app.engine.is_animating() {
        animation.start();
    }
    let mut governing = app.engine.governing_inputs();

    // Main loop
    loop {
        // Process any completed media probes (non-blocking)
        while let Ok(result) = media_rx.try_recv() {
            app.handle_media_result(result);
        }
        app.sync_theme();

        terminal.draw(|frame| draw(frame, &mut app))?;

        // While animating the frame loop paces us, so only take queued events
        let events = if animation.is_running() {
            event_handler.drain()?
        } else {
            event_handler.next()?.into_iter().collect()
        };
        for event in events {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, &app, keymap);
                    handle_action(&mut app, action);
                }
                AppEvent::Pointer(pointer) => app.handle_pointer(pointer),
                AppEvent::Resize(_, _) => app.window_resized(),
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }

        // Any change of speed, direction, width, hover or motion preference
        // tears the loop down and schedules a fresh one
        let inputs = app.engine.governing_inputs();
        if inputs != governing {
            debug!(?inputs, "Governing inputs changed, restarting frame loop");
            governing = inputs;
            reschedule(&mut app, &mut animation);
        }

        if animation.is_running() {
            if let Some(tick) = frame_rx.recv().await {
                // Ticks of a cancelled loop may still be queued
                if animation.is_current(&tick) {
                    app.engine.frame(tick.at);
                }
            }
        }
    }

    Ok(())
}

/// Replace the frame loop after the engine's governing inputs changed
fn reschedule(app: &mut App, animation: &mut AnimationHandle) {
    app.engine.teardown();
    app.engine.begin();
    if app.engine.is_animating() {
        animation.restart();
    } else {
        animation.cancel();
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Main layout: marquee + status bar
    let [body, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(size);

    // Item rows, tooltip row and borders, centred vertically
    let panel_height = app.item_rows().saturating_add(3).min(body.height);
    let [panel] = Layout::vertical([Constraint::Length(panel_height)])
        .flex(Flex::Center)
        .areas(body);

    app.layout(panel);
    MarqueeWidget::render(frame, app.panel, app);
    StatusBarWidget::render(frame, status, app);

    if app.mode == Mode::Help {
        PopupWidget::render_help(frame, app);
    }
}

fn handle_action(app: &mut App, action: Action) {
    if action != Action::None {
        app.clear_status();
    }

    match action {
        Action::Quit => app.should_quit = true,
        Action::ToggleTheme => app.toggle_theme(),
        Action::TogglePause => app.toggle_pause(),
        Action::ToggleReducedMotion => app.toggle_reduced_motion(),
        Action::ReverseDirection => app.reverse_direction(),
        Action::SetDirection(direction) => app.set_direction(direction),
        Action::SpeedUp => app.adjust_speed(SPEED_STEP),
        Action::SpeedDown => app.adjust_speed(-SPEED_STEP),
        Action::OpenLink => open_hovered_link(app),
        Action::ShowHelp => app.mode = Mode::Help,
        Action::ExitMode => app.mode = Mode::Normal,
        Action::None => {}
    }
}

fn open_hovered_link(app: &mut App) {
    let Some((href, label)) = app.hovered_link() else {
        app.set_status("No link under the pointer");
        return;
    };
    let (href, label) = (href.to_string(), label.to_string());

    match open::that(&href) {
        Ok(()) => {
            info!(%href, "Opened link");
            app.set_status(format!("Opened {}: {}", label, href));
        }
        Err(e) => {
            warn!(%href, error = %e, "Failed to open link");
            app.set_status(format!("Failed to open {}: {}", href, e));
        }
    }
}

/// Probe one media item's size on the blocking pool
fn spawn_media_load(
    generation: u64,
    index: usize,
    src: String,
    tx: mpsc::UnboundedSender<MediaLoadResult>,
) {
    tokio::spawn(async move {
        let probe = tokio::task::spawn_blocking(move || probe_dimensions(&src)).await;
        let result = match probe {
            Ok(Ok(size)) => MediaLoadResult::Success {
                generation,
                index,
                size,
            },
            Ok(Err(e)) => MediaLoadResult::Failure {
                generation,
                index,
                error: e.to_string(),
            },
            Err(e) => MediaLoadResult::Failure {
                generation,
                index,
                error: e.to_string(),
            },
        };
        let _ = tx.send(result);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use logoloop_core::MarqueeConfig;
    use ratatui::backend::TestBackend;
    use std::time::Duration;

    fn draw_once(config: AppConfig) -> App {
        let mut app = App::new(Arc::new(config));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_reschedule_follows_reduced_motion() {
        let mut app = App::new(Arc::new(AppConfig::default()));
        let (tx, mut rx) = mpsc::channel(1);
        let mut animation = AnimationHandle::spawn(Duration::from_millis(16), tx);
        let first = animation.generation();

        app.toggle_reduced_motion();
        reschedule(&mut app, &mut animation);
        assert!(!animation.is_running());

        app.toggle_reduced_motion();
        reschedule(&mut app, &mut animation);
        assert!(animation.is_running());
        assert!(animation.generation() > first);

        let tick = rx.recv().await.unwrap();
        let tick = if animation.is_current(&tick) {
            tick
        } else {
            rx.recv().await.unwrap()
        };
        assert!(animation.is_current(&tick));
    }

    #[test]
    fn test_tall_items_fit_the_body() {
        let app = draw_once(AppConfig {
            marquee: MarqueeConfig {
                item_height: u16::MAX,
                ..Default::default()
            },
            ..Default::default()
        });
        // body is everything above the status line
        assert_eq!(app.panel.height, 23);
    }

    #[test]
    fn test_panel_is_centred_in_body() {
        let app = draw_once(AppConfig::default());
        assert_eq!(app.panel.height, 4);
        assert!((9..=10).contains(&app.panel.y), "panel at {}", app.panel.y);
    }
}
