use clap::Parser;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wave_refresh::canvas::{Canvas, Fill};
use wave_refresh::wave::{Outline, OverlayFrame};
use wave_refresh::{PollableState, RefreshConfig, RefreshController, RefreshState, ScrollSample};

/// Plays a scripted pull-to-refresh gesture and renders the wave
#[derive(Parser, Debug)]
#[command(name = "wave-demo")]
#[command(version, about, long_about = None)]
struct Args {
    /// YAML config file
    #[arg(short, long, env = "WAVE_REFRESH_CONFIG")]
    config: Option<PathBuf>,

    /// Width of the simulated scroll surface, in points
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// How far the gesture pulls the surface, in points
    #[arg(long, default_value_t = 80.0)]
    pull: f64,

    /// Frames spent holding the pull before releasing
    #[arg(long, default_value_t = 45)]
    hold: u32,

    /// Print one JSON object per frame instead of drawing
    #[arg(long)]
    dump: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug)
    #[arg(short = 'd', long)]
    debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace)
    #[arg(short = 'v', long)]
    verbose: bool,
}

/// The host side of the gesture: the samples a scroll view would report frame after frame.
struct Gesture {
    pull: f64,
    hold: u32,
    frame: u32,
}

impl Gesture {
    const DRAG_FRAMES: u32 = 15;
    const RELEASE_FRAMES: u32 = 6;

    fn new(pull: f64, hold: u32) -> Self {
        Self { pull: pull.max(0.0), hold, frame: 0 }
    }
}

impl Iterator for Gesture {
    type Item = ScrollSample;

    fn next(&mut self) -> Option<ScrollSample> {
        let frame = self.frame;
        self.frame += 1;
        let release_start = Self::DRAG_FRAMES + self.hold;
        let sample = if frame < Self::DRAG_FRAMES {
            let progress = f64::from(frame + 1) / f64::from(Self::DRAG_FRAMES);
            ScrollSample::new(self.pull * progress, false, true)
        } else if frame < release_start {
            ScrollSample::new(self.pull, false, true)
        } else if frame < release_start + Self::RELEASE_FRAMES {
            let progress = f64::from(frame - release_start + 1) / f64::from(Self::RELEASE_FRAMES);
            ScrollSample::new(self.pull * (1.0 - progress), true, false)
        } else {
            return None;
        };
        Some(sample)
    }
}

/// Hides the cursor while drawing and shows it again however the demo exits.
struct HiddenCursor<W: Write> {
    out: W,
}

impl<W: Write> HiddenCursor<W> {
    fn new(mut out: W) -> io::Result<Self> {
        execute!(out, Hide)?;
        Ok(Self { out })
    }
}

impl<W: Write> Drop for HiddenCursor<W> {
    fn drop(&mut self) {
        let _ = execute!(self.out, ResetColor, Show, Print("\n"));
    }
}

#[derive(Serialize)]
struct FrameDump<'a> {
    frame: usize,
    state: &'static str,
    overlay: Option<OverlayFrame>,
    top: &'a Outline,
    bottom: &'a Outline,
}

fn init_logging(args: &Args) {
    let default_filter = if args.verbose {
        "trace"
    } else if args.debug {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).with_writer(io::stderr))
        .init();
}

fn draw(stdout: &mut io::Stdout, canvas: &Canvas, controller: &RefreshController) -> io::Result<()> {
    let theme = controller.theme();
    queue!(stdout, MoveTo(0, 0), Clear(ClearType::All))?;
    for row in 0..canvas.rows() {
        queue!(stdout, MoveTo(0, row as u16))?;
        for column in 0..canvas.columns() {
            let fill = canvas.cell(column, row);
            match fill.color(theme) {
                Some(color) => {
                    let color = crossterm::style::Color::Rgb { r: color.r, g: color.g, b: color.b };
                    queue!(stdout, SetForegroundColor(color), Print(fill.glyph()))?;
                }
                None => queue!(stdout, ResetColor, Print(Fill::Empty.glyph()))?,
            }
        }
    }
    queue!(stdout, ResetColor, MoveTo(0, canvas.rows() as u16), Print(format!("state: {}", controller.state())))?;
    stdout.flush()
}

fn run(args: &Args, config: &RefreshConfig) -> anyhow::Result<()> {
    let mut controller = RefreshController::new(config);
    if !controller.attach(args.width) {
        anyhow::bail!("surface width must be a positive number, got {}", args.width);
    }
    controller.on_refresh(|| tracing::info!("refresh triggered"));

    let inbox = controller.inbox();
    let mut gesture = Gesture::new(args.pull, args.hold);
    let (columns, rows) = terminal::size().map(|(c, r)| (c as usize, r.saturating_sub(2) as usize)).unwrap_or((80, 20));
    let mut canvas = Canvas::new(columns, rows);
    let mut stdout = io::stdout();
    let interval = controller.ticker().interval();
    let mut frame = 0;
    let mut next_sample = Instant::now();

    let _cursor = if args.dump { None } else { Some(HiddenCursor::new(io::stdout())?) };
    loop {
        let now = Instant::now();
        // The host reports one scroll sample per frame interval.
        if now >= next_sample {
            match gesture.next() {
                Some(sample) => inbox.push(sample),
                None if controller.state() == RefreshState::Idle => break,
                None => (),
            }
            next_sample = now + interval;
        }

        match controller.poll(now) {
            PollableState::Unmodified => (),
            state => {
                frame += 1;
                if args.dump {
                    let dump = FrameDump {
                        frame,
                        state: controller.state().into(),
                        overlay: controller.overlay_frame(),
                        top: controller.top_outline(),
                        bottom: controller.bottom_outline(),
                    };
                    println!("{}", serde_json::to_string(&dump)?);
                } else {
                    match controller.overlay_frame() {
                        Some(overlay) if state == PollableState::Modified => {
                            canvas.paint(&overlay, controller.top_outline(), controller.bottom_outline())
                        }
                        _ => canvas.clear(),
                    }
                    draw(&mut stdout, &canvas, &controller)?;
                }
            }
        }
        thread::sleep(interval / 4);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args);

    let config = match &args.config {
        Some(path) => RefreshConfig::load(path)?,
        None => RefreshConfig::default(),
    };
    run(&args, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_ends_with_release() {
        let samples: Vec<_> = Gesture::new(50.0, 3).collect();
        assert_eq!(samples.len(), 15 + 3 + 6);
        assert!(samples[..18].iter().all(|s| s.is_tracking && !s.is_decelerating));
        assert_eq!(samples[17].pull_distance, 50.0);
        let last = samples.last().unwrap();
        assert_eq!(last.pull_distance, 0.0);
        assert!(last.is_decelerating);
    }

    #[test]
    fn cursor_restored_on_early_exit() {
        fn fails_midway(out: &mut Vec<u8>) -> io::Result<()> {
            let _cursor = HiddenCursor::new(out)?;
            Err(io::Error::other("draw failed"))
        }

        let mut out = Vec::new();
        assert!(fails_midway(&mut out).is_err());
        let written = String::from_utf8(out).expect("escape codes are utf8");
        let hidden = written.find("\x1b[?25l").expect("cursor never hidden");
        let shown = written.rfind("\x1b[?25h").expect("cursor never shown");
        assert!(shown > hidden);
    }

    #[test]
    fn gesture_triggers_refresh() {
        let mut controller = RefreshController::default();
        controller.attach(320.0);
        let fired = std::rc::Rc::new(std::cell::Cell::new(false));
        let flag = fired.clone();
        controller.on_refresh(move || flag.set(true));
        for sample in Gesture::new(50.0, 3) {
            controller.on_scroll_sample(sample);
            controller.tick();
        }
        assert!(fired.get());
        assert_eq!(controller.state(), RefreshState::AnimatingToStop);
    }
}
