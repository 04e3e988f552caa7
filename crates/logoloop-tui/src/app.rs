use std::collections::HashMap;
use std::sync::Arc;

use logoloop_core::config::{Direction, ThemeMode};
use logoloop_core::marquee::{
    accessible_labels, media_columns, ImageSettleTracker, ItemKey, MarqueeEngine, MarqueeItem,
    MeasureTrigger, ObservedTarget, PlacedItem, ResizeWatch, SettleOutcome, SettleRound,
    TrackPlan,
};
use logoloop_core::{AppConfig, ThemeSignal, ThemeSubscription};
use ratatui::layout::{Margin, Rect};
use tracing::{debug, warn};
use unicode_width::UnicodeWidthStr;

use crate::event::MediaLoadResult;
use crate::input::PointerEvent;
use crate::theme::Theme;
use crate::themes::{is_known_theme, load_theme, pinned_mode};

/// Speed change per key press, in columns per second
pub const SPEED_STEP: f64 = 20.0;
/// Upper bound for keyboard speed changes
pub const MAX_SPEED: f64 = 2000.0;

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Marquee running
    Normal,
    /// Help overlay
    Help,
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Items of one sequence
    pub items: Vec<MarqueeItem>,
    /// Layout and motion state
    pub engine: MarqueeEngine,
    /// Current application mode
    pub mode: Mode,
    /// Colors for the current theme mode
    pub theme: Theme,
    /// Ambient light/dark signal
    pub theme_signal: ThemeSignal,
    theme_sub: ThemeSubscription,
    resize_watch: ResizeWatch,
    settle: ImageSettleTracker,
    /// Intrinsic sizes read from local images
    media_sizes: HashMap<usize, (u32, u32)>,
    plan: TrackPlan,
    pending_measure: Option<MeasureTrigger>,
    /// Bordered panel holding the track
    pub panel: Rect,
    /// Track area inside the panel
    pub track: Rect,
    /// Items visible in the track after the last layout
    pub placed: Vec<PlacedItem>,
    /// Item under the pointer
    pub hovered_item: Option<ItemKey>,
    pointer: Option<(u16, u16)>,
    /// Track held from the keyboard
    pub held: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: Arc<AppConfig>) -> Self {
        let theme_config = &config.ui.theme;
        if !is_known_theme(theme_config) {
            warn!("Unknown theme '{}', using gruvbox", theme_config.name);
        }

        // A pinned variant also drives the fade colour
        let theme_signal = ThemeSignal::new(pinned_mode(theme_config).unwrap_or(theme_config.mode));
        let theme_sub = theme_signal.subscribe();
        let theme = load_theme(theme_config, theme_signal.mode());

        let mut resize_watch = ResizeWatch::new(config.ui.observe_resize);
        let pending_measure = resize_watch.mount();

        let mut app = Self {
            items: config.items.clone(),
            engine: MarqueeEngine::new(&config.marquee),
            mode: Mode::Normal,
            theme,
            theme_signal,
            theme_sub,
            resize_watch,
            settle: ImageSettleTracker::new(),
            media_sizes: HashMap::new(),
            plan: TrackPlan::default(),
            pending_measure,
            panel: Rect::default(),
            track: Rect::default(),
            placed: Vec::new(),
            hovered_item: None,
            pointer: None,
            held: false,
            should_quit: false,
            status_message: None,
            config,
        };
        app.rebuild_plan();
        app
    }

    /// Rows each item occupies on the track
    pub fn item_rows(&self) -> u16 {
        self.config.marquee.item_height.max(1)
    }

    /// Current light/dark mode
    pub fn theme_mode(&self) -> ThemeMode {
        self.theme_signal.mode()
    }

    #[inline]
    pub fn plan(&self) -> &TrackPlan {
        &self.plan
    }

    /// Column width of item `index` on the track
    pub fn item_columns(&self, index: usize) -> u16 {
        let Some(item) = self.items.get(index) else {
            return 0;
        };
        let label = item.display_text().width().min(u16::MAX as usize) as u16;

        if item.is_media() {
            let size = self.media_sizes.get(&index).copied().or(item.intrinsic_size());
            match size {
                Some(size) => media_columns(size, self.item_rows()),
                None => label.saturating_add(2),
            }
        } else {
            label.max(1)
        }
    }

    fn rebuild_plan(&mut self) {
        let widths = (0..self.items.len()).map(|i| self.item_columns(i)).collect();
        self.plan = TrackPlan::new(widths, self.config.marquee.gap);
    }

    fn request_measure(&mut self, trigger: MeasureTrigger) {
        self.pending_measure.get_or_insert(trigger);
    }

    /// Start waiting for the media of the first copy
    ///
    /// The returned round lists the items whose size still has to be probed.
    pub fn begin_settle_round(&mut self) -> SettleRound {
        let images: Vec<(usize, bool)> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_media())
            .map(|(index, item)| (index, item.intrinsic_size().is_some()))
            .collect();

        let round = self.settle.begin(images);
        if round.settled {
            self.request_measure(MeasureTrigger::ImagesSettled);
        }
        round
    }

    /// Source path or URL of media item `index`
    pub fn media_src(&self, index: usize) -> Option<&str> {
        match self.items.get(index)? {
            MarqueeItem::Media(media) => Some(&media.src),
            MarqueeItem::Inline(_) => None,
        }
    }

    /// Apply a finished size probe
    pub fn handle_media_result(&mut self, result: MediaLoadResult) {
        let generation = result.generation();
        let index = result.index();
        let outcome = match result {
            MediaLoadResult::Success { size, .. } => {
                if generation == self.settle.generation() {
                    self.media_sizes.insert(index, size);
                    self.rebuild_plan();
                }
                SettleOutcome::Loaded
            }
            MediaLoadResult::Failure { error, .. } => {
                debug!(index, %error, "Media size unavailable, using label width");
                SettleOutcome::Failed
            }
        };

        if self.settle.settle(generation, index, outcome) {
            self.request_measure(MeasureTrigger::ImagesSettled);
        }
    }

    /// Terminal was resized
    pub fn window_resized(&mut self) {
        if let Some(trigger) = self.resize_watch.window_resized() {
            self.request_measure(trigger);
        }
    }

    /// Lay the marquee out inside `available` and place the visible items
    ///
    /// Runs before every draw; a measurement happens only when one was
    /// requested or an observed width changed.
    pub fn layout(&mut self, available: Rect) {
        let width = self.config.marquee.width.resolve(available.width);
        self.panel = Rect {
            x: available.x + (available.width - width) / 2,
            y: available.y,
            width,
            height: available.height,
        };
        self.track = self.panel.inner(Margin {
            horizontal: 1,
            vertical: 1,
        });

        let container = self.track.width as f64;
        let sequence = self.plan.sequence_width() as f64;
        if let Some(trigger) = self.resize_watch.observe(ObservedTarget::Container, container) {
            self.request_measure(trigger);
        }
        if let Some(trigger) = self.resize_watch.observe(ObservedTarget::Sequence, sequence) {
            self.request_measure(trigger);
        }
        if let Some(trigger) = self.pending_measure.take() {
            self.engine.measure(container, sequence, trigger);
        }

        self.placed = self.plan.place(
            self.engine.layout().copy_count,
            self.engine.transform(),
            self.track.width,
        );
        self.update_hover();
    }

    /// Track the pointer for hover and tooltips
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        self.pointer = match event {
            PointerEvent::Moved { column, row } => Some((column, row)),
            PointerEvent::Left => None,
        };
        self.update_hover();
    }

    fn pointer_in_track(&self) -> bool {
        self.pointer
            .is_some_and(|(column, row)| self.track.contains((column, row).into()))
    }

    fn update_hover(&mut self) {
        let inside = self.pointer_in_track();
        self.engine.set_hovered(inside || self.held);

        self.hovered_item = match self.pointer {
            Some((column, row))
                if inside && row < self.track.y + self.item_rows().min(self.track.height) =>
            {
                let col = (column - self.track.x) as i32;
                self.placed.iter().find(|p| p.contains(col)).map(|p| p.key)
            }
            _ => None,
        };
    }

    /// Item under the pointer
    pub fn hovered(&self) -> Option<&MarqueeItem> {
        self.hovered_item.and_then(|key| self.items.get(key.item))
    }

    /// Link of the hovered item with its announced label
    pub fn hovered_link(&self) -> Option<(&str, &str)> {
        let item = self.hovered()?;
        Some((item.href()?, item.link_label()?))
    }

    /// Pick up theme mode changes from the signal
    pub fn sync_theme(&mut self) -> bool {
        match self.theme_sub.poll_change() {
            Some(mode) => {
                self.theme = load_theme(&self.config.ui.theme, mode);
                true
            }
            None => false,
        }
    }

    pub fn toggle_theme(&mut self) {
        if pinned_mode(&self.config.ui.theme).is_some() {
            self.set_status(format!("Theme is pinned: {}", self.config.ui.theme.name));
            return;
        }
        let mode = self.theme_signal.toggle();
        self.set_status(format!("Theme: {:?}", mode).to_lowercase());
    }

    /// Hold or release the track from the keyboard
    pub fn toggle_pause(&mut self) {
        if !self.engine.pause_on_hover() {
            self.set_status("Pause on hover is disabled");
            return;
        }
        self.held = !self.held;
        self.update_hover();
        self.set_status(if self.held { "Paused" } else { "Resumed" });
    }

    pub fn toggle_reduced_motion(&mut self) {
        let reduced = !self.engine.reduced_motion();
        self.engine.set_reduced_motion(reduced);
        self.set_status(if reduced {
            "Reduced motion: on"
        } else {
            "Reduced motion: off"
        });
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.engine.set_direction(direction);
        self.set_status(format!("Direction: {:?}", direction).to_lowercase());
    }

    pub fn reverse_direction(&mut self) {
        self.set_direction(self.engine.direction().reversed());
    }

    /// Change speed by `delta`, clamped to `[0, MAX_SPEED]` in magnitude
    pub fn adjust_speed(&mut self, delta: f64) {
        let speed = self.engine.speed();
        let magnitude = (speed.abs() + delta).clamp(0.0, MAX_SPEED);
        let next = if speed < 0.0 { -magnitude } else { magnitude };
        self.engine.set_speed(next);
        self.set_status(format!("Speed: {:.0}", next));
    }

    /// Labels announced for the marquee, taken from the first copy only
    pub fn accessible_labels(&self) -> Vec<&str> {
        accessible_labels(&self.items)
    }

    /// Set a status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logoloop_core::config::{ContainerWidth, MarqueeConfig};

    fn config_with(items: Vec<MarqueeItem>, marquee: MarqueeConfig) -> Arc<AppConfig> {
        Arc::new(AppConfig {
            items,
            marquee,
            ..Default::default()
        })
    }

    fn inline_app() -> App {
        let items = vec![
            MarqueeItem::inline("alpha").with_title("Alpha"),
            MarqueeItem::inline("beta").with_href("https://example.com/beta"),
        ];
        App::new(config_with(
            items,
            MarqueeConfig {
                gap: 2,
                ..Default::default()
            },
        ))
    }

    fn area(width: u16) -> Rect {
        Rect::new(0, 0, width, 4)
    }

    #[test]
    fn test_item_columns() {
        let items = vec![
            MarqueeItem::inline("héllo"),
            MarqueeItem::media("logo.png").with_alt("Logo"),
            MarqueeItem::media("wide.png").with_size(300, 100),
        ];
        let app = App::new(config_with(items, MarqueeConfig::default()));
        assert_eq!(app.item_columns(0), 5);
        // label width plus two until the size is known
        assert_eq!(app.item_columns(1), 6);
        assert_eq!(app.item_columns(2), 6);
        assert_eq!(app.item_columns(9), 0);
    }

    #[test]
    fn test_mount_measures_on_first_layout() {
        let mut app = inline_app();
        // alpha(5)+2 + beta(4)+2
        assert_eq!(app.plan().sequence_width(), 13);

        app.layout(area(42));
        assert_eq!(app.track.width, 40);
        let layout = app.engine.layout();
        assert_eq!(layout.sequence_width, 13.0);
        // ceil(40 / 13) + 2
        assert_eq!(layout.copy_count, 6);
        assert!(app.placed.iter().any(|p| p.key.copy == 3));
        assert!(app.placed.iter().all(|p| p.aria_hidden == (p.key.copy > 0)));
    }

    #[test]
    fn test_resize_triggers_measurement() {
        let mut app = inline_app();
        app.layout(area(42));
        app.layout(area(102));
        // ceil(100 / 13) + 2
        assert_eq!(app.engine.layout().copy_count, 10);
    }

    #[test]
    fn test_window_resize_fallback() {
        let items = vec![MarqueeItem::inline("abc")];
        let mut config = AppConfig {
            items,
            ..Default::default()
        };
        config.ui.observe_resize = false;
        let mut app = App::new(Arc::new(config));

        app.layout(area(22));
        let mounted = app.engine.layout().copy_count;

        // width changes alone do not re-measure without observation
        app.layout(area(82));
        assert_eq!(app.engine.layout().copy_count, mounted);

        app.window_resized();
        app.layout(area(82));
        assert!(app.engine.layout().copy_count > mounted);
    }

    #[test]
    fn test_container_width_percent() {
        let mut app = App::new(config_with(
            vec![MarqueeItem::inline("abc")],
            MarqueeConfig {
                width: ContainerWidth::Percent(50.0),
                ..Default::default()
            },
        ));
        app.layout(area(80));
        assert_eq!(app.panel.width, 40);
        assert_eq!(app.panel.x, 20);
    }

    #[test]
    fn test_settle_round_without_media_requests_measurement() {
        let mut app = inline_app();
        let round = app.begin_settle_round();
        assert!(round.settled);
        assert!(round.pending.is_empty());
    }

    #[test]
    fn test_media_results_settle_round() {
        let items = vec![
            MarqueeItem::media("a.png").with_alt("A"),
            MarqueeItem::media("b.png").with_alt("B"),
            MarqueeItem::media("c.png").with_size(10, 10),
        ];
        let mut app = App::new(config_with(items, MarqueeConfig::default()));
        app.layout(area(40));

        let round = app.begin_settle_round();
        assert_eq!(round.pending, vec![0, 1]);
        assert_eq!(app.media_src(1), Some("b.png"));

        app.handle_media_result(MediaLoadResult::Success {
            generation: round.generation,
            index: 0,
            size: (64, 32),
        });
        assert_eq!(app.item_columns(0), 4);

        // stale round is ignored
        app.handle_media_result(MediaLoadResult::Success {
            generation: round.generation + 7,
            index: 1,
            size: (64, 64),
        });
        assert_eq!(app.item_columns(1), 3);

        app.handle_media_result(MediaLoadResult::Failure {
            generation: round.generation,
            index: 1,
            error: "missing".into(),
        });
        app.layout(area(40));
        assert_eq!(
            app.engine.layout().sequence_width,
            app.plan().sequence_width() as f64
        );
    }

    #[test]
    fn test_pointer_hover_and_tooltip_target() {
        let mut app = inline_app();
        app.layout(area(42));
        assert!(!app.engine.is_hovered());

        // track starts at column 1, row 1; "alpha" spans columns 1..6
        app.handle_pointer(PointerEvent::Moved { column: 3, row: 1 });
        assert!(app.engine.is_hovered());
        assert_eq!(app.hovered_item, Some(ItemKey { copy: 0, item: 0 }));
        assert_eq!(app.hovered().and_then(|i| i.tooltip()), Some("Alpha"));

        // in the gap: hovering the container but no item
        app.handle_pointer(PointerEvent::Moved { column: 7, row: 1 });
        assert!(app.engine.is_hovered());
        assert_eq!(app.hovered_item, None);

        app.handle_pointer(PointerEvent::Left);
        assert!(!app.engine.is_hovered());
    }

    #[test]
    fn test_hovered_link_uses_fallback_label() {
        let mut app = inline_app();
        app.layout(area(42));
        // "beta" starts at track column 7
        app.handle_pointer(PointerEvent::Moved { column: 9, row: 1 });
        assert_eq!(
            app.hovered_link(),
            Some(("https://example.com/beta", "logo link"))
        );
    }

    #[test]
    fn test_keyboard_pause_holds_track() {
        let mut app = inline_app();
        app.toggle_pause();
        assert!(app.held);
        assert!(app.engine.is_hovered());
        app.toggle_pause();
        assert!(!app.engine.is_hovered());
    }

    #[test]
    fn test_pause_requires_pause_on_hover() {
        let mut app = App::new(config_with(
            vec![],
            MarqueeConfig {
                pause_on_hover: false,
                ..Default::default()
            },
        ));
        app.toggle_pause();
        assert!(!app.held);
        assert!(!app.engine.is_hovered());
    }

    #[test]
    fn test_speed_and_direction() {
        let mut app = inline_app();
        app.adjust_speed(SPEED_STEP);
        assert_eq!(app.engine.speed(), 140.0);
        app.adjust_speed(-1000.0);
        assert_eq!(app.engine.speed(), 0.0);

        app.reverse_direction();
        assert_eq!(app.engine.direction(), Direction::Right);
    }

    #[test]
    fn test_theme_toggle_reaches_subscriber() {
        let mut app = inline_app();
        let before = app.theme.bg0;
        app.toggle_theme();
        assert!(app.sync_theme());
        assert_ne!(app.theme.bg0, before);
        assert!(!app.sync_theme());
    }

    #[test]
    fn test_pinned_theme_ignores_toggle() {
        let mut config = AppConfig::default();
        config.ui.theme.name = "nord-dark".into();
        config.ui.theme.mode = ThemeMode::Light;
        let mut app = App::new(Arc::new(config));
        assert_eq!(app.theme_mode(), ThemeMode::Dark);

        let before = app.theme.bg0;
        app.toggle_theme();
        assert!(!app.sync_theme());
        assert_eq!(app.theme_mode(), ThemeMode::Dark);
        assert_eq!(app.theme.bg0, before);
        assert_eq!(app.status_message.as_deref(), Some("Theme is pinned: nord-dark"));
    }

    #[test]
    fn test_accessible_labels_come_from_items() {
        let app = inline_app();
        assert_eq!(app.accessible_labels(), vec!["Alpha", "logo link"]);
    }
}
