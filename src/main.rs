pub mod ui;

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use glimmer::{
    app_dirs::AppDirs,
    config::{ConfigStore, FileConfigStore, PlaygroundConfig},
    logging,
    position::{Align, Placement, Positioner, Rect as ElementRect, Side},
    runtime::{self, PlaygroundEvent, Runner},
    typewriter::{Typewriter, TypewriterConfig},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    Terminal,
};
use std::{
    error::Error,
    io,
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

/// Longest wait between redraws when no timer is due sooner.
const FRAME_MS: u64 = 250;

/// Index of the example driven by the start/pause/reset keys.
pub const MANUAL_EXAMPLE: usize = 3;

pub const ANCHOR_WIDTH: f64 = 14.0;
pub const ANCHOR_HEIGHT: f64 = 3.0;
pub const PAGE_HEIGHT: f64 = 60.0;
const MAX_OFFSET: f64 = 8.0;

/// terminal playground for the typewriter and anchored placement primitives
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// screen to open on
    #[clap(short = 'd', long, value_enum, default_value_t = Screen::Typewriter)]
    demo: Screen,

    /// text for the custom typewriter example
    #[clap(short = 't', long)]
    text: Option<String>,

    /// milliseconds per character (must be above zero)
    #[clap(long)]
    speed_ms: Option<u64>,

    /// milliseconds to wait before the first character
    #[clap(long)]
    delay_ms: Option<u64>,

    /// restart typing after completion
    #[clap(long = "loop")]
    looping: bool,

    /// milliseconds to wait before restarting a loop
    #[clap(long)]
    loop_delay_ms: Option<u64>,

    /// character(s) drawn as the blinking cursor
    #[clap(long)]
    cursor_char: Option<String>,

    /// hide the blinking cursor
    #[clap(long)]
    no_cursor: bool,

    /// wait for a start key instead of typing immediately
    #[clap(long)]
    no_auto_start: bool,

    /// side of the target the floating label sits on
    #[clap(long, value_enum)]
    side: Option<Side>,

    /// alignment of the floating label along the target
    #[clap(long, value_enum)]
    align: Option<Align>,

    /// gap between target and floating label, in cells
    #[clap(long)]
    offset: Option<f64>,

    /// config file to read (and write with --save-config)
    #[clap(long)]
    config: Option<PathBuf>,

    /// persist the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum, strum_macros::Display)]
pub enum Screen {
    #[default]
    Typewriter,
    Placement,
}

impl Cli {
    fn store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Overlay the flags that were given on top of loaded settings
    fn apply(&self, mut cfg: PlaygroundConfig) -> PlaygroundConfig {
        if let Some(text) = &self.text {
            cfg.text = text.clone();
        }
        let tw = &mut cfg.typewriter;
        if let Some(speed_ms) = self.speed_ms {
            tw.speed_ms = speed_ms;
        }
        if let Some(delay_ms) = self.delay_ms {
            tw.delay_ms = delay_ms;
        }
        if self.looping {
            tw.r#loop = true;
        }
        if let Some(loop_delay_ms) = self.loop_delay_ms {
            tw.loop_delay_ms = loop_delay_ms;
        }
        if let Some(cursor_char) = &self.cursor_char {
            tw.show_cursor = true;
            tw.cursor_char = cursor_char.clone();
        }
        if self.no_cursor {
            tw.show_cursor = false;
        }
        if self.no_auto_start {
            tw.auto_start = false;
        }
        if let Some(side) = self.side {
            cfg.placement.side = side;
        }
        if let Some(align) = self.align {
            cfg.placement.align = align;
        }
        if let Some(offset) = self.offset {
            cfg.placement.offset = offset;
        }
        cfg
    }
}

/// One entry of the typewriter gallery
#[derive(Debug)]
pub struct Example {
    pub title: &'static str,
    pub caption: String,
    pub typewriter: Typewriter,
}

impl Example {
    fn new(title: &'static str, text: &str, config: TypewriterConfig) -> glimmer::Result<Self> {
        let caption = describe(&config);
        Ok(Self {
            title,
            caption,
            typewriter: Typewriter::new(text, config)?,
        })
    }
}

fn describe(config: &TypewriterConfig) -> String {
    let mut parts = vec![format!("speed {}ms", config.speed_ms)];
    if config.delay_ms > 0 {
        parts.push(format!("delay {}ms", config.delay_ms));
    }
    if config.r#loop {
        parts.push(format!("loop every {}ms", config.loop_delay_ms));
    }
    if config.show_cursor {
        parts.push(format!("cursor '{}'", config.cursor_char));
    }
    if !config.auto_start {
        parts.push("manual start".to_string());
    }
    parts.join(", ")
}

/// Host side of the placement screen: owns the page geometry and re-measures
/// whenever something that moves either element happens.
#[derive(Debug)]
pub struct PlacementDemo {
    pub positioner: Positioner,
    /// anchor position in page (scrollable) coordinates
    pub anchor_top: f64,
    pub anchor_left: f64,
    pub scroll: f64,
    /// stage area of the last layout; None until the first measurement
    pub stage: Option<Rect>,
}

impl PlacementDemo {
    pub fn new(placement: Placement) -> Self {
        Self {
            positioner: Positioner::new(placement),
            anchor_top: 8.0,
            anchor_left: 20.0,
            scroll: 0.0,
            stage: None,
        }
    }

    pub fn label(&self) -> String {
        let p = self.positioner.placement();
        format!("{}-{} +{}", p.side, p.align, p.offset)
    }

    /// Viewport-relative geometry of the anchor, if laid out.
    pub fn anchor_rect(&self) -> Option<ElementRect> {
        let stage = self.stage?;
        Some(ElementRect::new(
            stage.y as f64 + 1.0 + self.anchor_top - self.scroll,
            stage.x as f64 + 1.0 + self.anchor_left,
            ANCHOR_WIDTH,
            ANCHOR_HEIGHT,
        ))
    }

    /// Size of the floating label box: its text plus borders.
    pub fn label_rect(&self) -> Option<ElementRect> {
        self.stage?;
        Some(ElementRect::sized(self.label().width() as f64 + 2.0, 3.0))
    }

    pub fn remeasure(&mut self) {
        let (anchor, label) = (self.anchor_rect(), self.label_rect());
        self.positioner.update(anchor, label);
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.stage = Some(ui::stage_area(area));
        self.remeasure();
    }

    pub fn set_side(&mut self, side: Side) {
        let placement = Placement {
            side,
            ..self.positioner.placement()
        };
        self.positioner.set_placement(placement);
        self.remeasure();
    }

    pub fn cycle_align(&mut self) {
        let mut placement = self.positioner.placement();
        placement.align = placement.align.cycle();
        self.positioner.set_placement(placement);
        self.remeasure();
    }

    pub fn nudge_offset(&mut self, delta: f64) {
        let mut placement = self.positioner.placement();
        placement.offset = (placement.offset + delta).clamp(0.0, MAX_OFFSET);
        self.positioner.set_placement(placement);
        self.remeasure();
    }

    pub fn move_anchor(&mut self, d_top: f64, d_left: f64) {
        self.anchor_top = (self.anchor_top + d_top).clamp(0.0, PAGE_HEIGHT - ANCHOR_HEIGHT);
        self.anchor_left = (self.anchor_left + d_left).max(0.0);
        self.remeasure();
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll = (self.scroll + delta).clamp(0.0, PAGE_HEIGHT);
        self.remeasure();
    }
}

#[derive(Debug)]
pub struct App {
    pub screen: Screen,
    pub examples: Vec<Example>,
    pub completions: Arc<AtomicUsize>,
    pub placement: PlacementDemo,
}

impl App {
    pub fn new(screen: Screen, cfg: PlaygroundConfig) -> glimmer::Result<Self> {
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        let custom = cfg.typewriter.clone().with_on_complete(move || {
            counter.fetch_add(1, Ordering::Relaxed);
        });

        let examples = vec![
            Example::new(
                "Basic",
                "Hello, World! This is a typewriter effect.",
                TypewriterConfig::default()
                    .with_speed_ms(80)
                    .with_delay_ms(500)
                    .with_cursor("|"),
            )?,
            Example::new(
                "Fast",
                "This types much faster and has no cursor!",
                TypewriterConfig::default()
                    .with_speed_ms(30)
                    .with_delay_ms(1000),
            )?,
            Example::new(
                "Looping",
                "This message loops forever...",
                TypewriterConfig::default()
                    .with_speed_ms(60)
                    .with_loop(2000)
                    .with_cursor("|"),
            )?,
            Example::new(
                "Manual",
                "Press s to start, p to pause and r to reset this line.",
                TypewriterConfig::default()
                    .with_speed_ms(70)
                    .with_cursor("_")
                    .with_auto_start(false),
            )?,
            Example::new("Custom", &cfg.text, custom)?,
        ];

        Ok(Self {
            screen,
            examples,
            completions,
            placement: PlacementDemo::new(cfg.placement),
        })
    }

    pub fn on_tick(&mut self, dt: Duration) {
        for example in &mut self.examples {
            example.typewriter.advance(dt);
        }
    }

    /// Time until the earliest armed timer across all examples.
    pub fn time_until_next_timer(&self) -> Option<Duration> {
        self.examples
            .iter()
            .filter_map(|e| e.typewriter.time_until_next())
            .min()
    }

    pub fn on_resize(&mut self, area: Rect) {
        self.placement.set_viewport(area);
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Typewriter => Screen::Placement,
            Screen::Placement => Screen::Typewriter,
        };
        debug!(screen = %self.screen, "switched screen");
    }

    fn manual(&mut self) -> &mut Typewriter {
        &mut self.examples[MANUAL_EXAMPLE].typewriter
    }

    /// Returns false when the key asks to quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return false;
        }
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Tab => self.toggle_screen(),
            _ => match self.screen {
                Screen::Typewriter => self.on_typewriter_key(key.code),
                Screen::Placement => self.on_placement_key(key.code),
            },
        }
        true
    }

    fn on_typewriter_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('s') => self.manual().start(),
            KeyCode::Char('p') => self.manual().pause(),
            KeyCode::Char('r') => self.manual().reset(),
            KeyCode::Char('R') => {
                for example in &mut self.examples {
                    example.typewriter.reset();
                }
            }
            _ => {}
        }
    }

    fn on_placement_key(&mut self, code: KeyCode) {
        let demo = &mut self.placement;
        match code {
            KeyCode::Char('1') => demo.set_side(Side::Top),
            KeyCode::Char('2') => demo.set_side(Side::Bottom),
            KeyCode::Char('3') => demo.set_side(Side::Left),
            KeyCode::Char('4') => demo.set_side(Side::Right),
            KeyCode::Char('a') => demo.cycle_align(),
            KeyCode::Char('+') | KeyCode::Char('=') => demo.nudge_offset(1.0),
            KeyCode::Char('-') => demo.nudge_offset(-1.0),
            KeyCode::Up => demo.move_anchor(-1.0, 0.0),
            KeyCode::Down => demo.move_anchor(1.0, 0.0),
            KeyCode::Left => demo.move_anchor(0.0, -2.0),
            KeyCode::Right => demo.move_anchor(0.0, 2.0),
            KeyCode::PageUp => demo.scroll_by(-5.0),
            KeyCode::PageDown => demo.scroll_by(5.0),
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_path) = AppDirs::log_path() {
        logging::init(&log_path)?;
    }

    let store = cli.store();
    let cfg = cli.apply(store.load());
    cfg.typewriter.validate()?;
    if cli.save_config {
        store.save(&cfg)?;
        info!(path = %store.path().display(), "saved config");
    }

    let mut app = App::new(cli.demo, cfg)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        runtime::terminal_events(),
        Duration::from_millis(FRAME_MS),
    );
    let result = run(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.on_resize(Rect::new(0, 0, size.width, size.height));
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::ui(app, f))?;

        match runner.step(app.time_until_next_timer()) {
            PlaygroundEvent::Tick => {
                let now = Instant::now();
                app.on_tick(now - last_tick);
                last_tick = now;
            }
            PlaygroundEvent::Resize => {
                let size = terminal.size()?;
                app.on_resize(Rect::new(0, 0, size.width, size.height));
            }
            PlaygroundEvent::Key(key) => {
                if !app.on_key(key) {
                    break;
                }
            }
        }
    }

    Ok(())
}
