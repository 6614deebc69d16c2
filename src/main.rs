//! actionbar: headless host for the adaptive action bar layout engine.
//!
//! Loads a bar description, replays width changes and signals against it and
//! prints what a renderer would draw.
//!
//! Run with:  `RUST_LOG=debug actionbar --sweep 100:900:50`

use actionbar_config::{default_path, load as load_config, BarConfig, ConfigWatcher};
use actionbar_core::{Event, ItemId, Signal};
use actionbar_layout::{ActionBar, ActionView, Arrangement, BarState, Slot};
use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(version, about = "Replay width changes and signals against an action bar")]
struct Args {
    /// Bar description (default: $ACTIONBAR_CONFIG, else $XDG_CONFIG_HOME/actionbar/actionbar.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lay out every width START:END:STEP before running the steps.
    #[arg(long, value_parser = parse_sweep)]
    sweep: Option<Sweep>,

    /// Steps to replay in order: `width=N`, `push=N`, `back`, `done`,
    /// `activate=ID`.
    #[arg(short, long = "step")]
    steps: Vec<Step>,

    /// Print one JSON object per step instead of text.
    #[arg(long)]
    json: bool,

    /// Replay again whenever the bar description changes.
    #[arg(long)]
    watch: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Width(f32),
    Push(usize),
    Back,
    Done,
    Activate(ItemId),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = match s.split_once('=') {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (s.trim(), None),
        };

        match (name, value) {
            ("width", Some(v)) => v
                .parse()
                .map(Step::Width)
                .map_err(|e| format!("bad width '{v}': {e}")),
            ("push", Some(v)) => v
                .parse()
                .map(Step::Push)
                .map_err(|e| format!("bad view index '{v}': {e}")),
            ("activate", Some(v)) if !v.is_empty() => Ok(Step::Activate(ItemId::new(v))),
            ("back", None) => Ok(Step::Back),
            ("done", None) => Ok(Step::Done),
            _ => Err(format!("unknown step '{s}'")),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Width(w) => write!(f, "width={w}"),
            Step::Push(i) => write!(f, "push={i}"),
            Step::Back => f.write_str("back"),
            Step::Done => f.write_str("done"),
            Step::Activate(id) => write!(f, "activate={id}"),
        }
    }
}

/// Widths expanded from a `START:END:STEP` sweep, end inclusive.
#[derive(Debug, Clone, PartialEq)]
struct Sweep(Vec<f32>);

/// Upper bound on the widths one sweep may expand to.
const MAX_SWEEP_STEPS: usize = 10_000;

fn parse_sweep(s: &str) -> Result<Sweep, String> {
    let parts: Vec<f32> = s
        .split(':')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("bad sweep '{s}': {e}")))
        .collect::<Result<_, _>>()?;

    let &[start, end, step] = parts.as_slice() else {
        return Err(format!("sweep must be START:END:STEP, got '{s}'"));
    };
    if parts.iter().any(|v| !v.is_finite()) {
        return Err(format!("sweep bounds must be finite, got '{s}'"));
    }
    if !(step > 0.0) {
        return Err("sweep step must be positive".to_string());
    }

    let span = ((end - start) / step).floor();
    if span < 0.0 {
        return Ok(Sweep(Vec::new()));
    }
    if !(span < MAX_SWEEP_STEPS as f32) {
        return Err(format!("sweep '{s}' exceeds {MAX_SWEEP_STEPS} widths"));
    }

    let count = span as usize + 1;
    Ok(Sweep((0..count).map(|i| start + step * i as f32).collect()))
}

/// What one replayed step produced.
#[derive(Debug, Serialize)]
struct Frame<'a> {
    step: String,
    state: BarState,
    event: Option<Event>,
    arrangement: Option<&'a Arrangement>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("actionbar v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let path = args.config.clone().unwrap_or_else(default_path);

    if !args.watch {
        return replay(&args, &load_config(&path)?);
    }

    let (watcher, mut changes) = ConfigWatcher::spawn(&path)?;
    loop {
        match load_config(watcher.path()) {
            Ok(config) => {
                if let Err(e) = replay(&args, &config) {
                    error!("Replay failed: {e:#}");
                }
            }
            Err(e) => error!(
                "Cannot load bar description '{}': {e}",
                watcher.path().display()
            ),
        }
        if changes.recv().await.is_none() {
            return Ok(());
        }
        info!("Bar description changed; replaying");
    }
}

fn replay(args: &Args, config: &BarConfig) -> Result<()> {
    let base = config.view.to_toolbar().context("building base view")?;
    let contextual = config
        .contextual
        .iter()
        .enumerate()
        .map(|(i, view)| {
            view.to_toolbar()
                .map(ActionView::new)
                .with_context(|| format!("building contextual view #{i}"))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut steps: Vec<Step> = args
        .sweep
        .iter()
        .flat_map(|sweep| sweep.0.iter())
        .map(|&w| Step::Width(w))
        .collect();
    steps.extend(args.steps.iter().cloned());
    if steps.is_empty() {
        steps.push(Step::Width(config.bar.width));
    }

    let mut bar = ActionBar::new(ActionView::new(base));
    for step in &steps {
        let event = apply(&mut bar, &contextual, step)?;
        let frame = Frame {
            step: step.to_string(),
            state: bar.state(),
            event,
            arrangement: bar.arrangement(),
        };
        if args.json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!("{}", describe(&frame));
        }
    }
    Ok(())
}

fn apply(bar: &mut ActionBar, contextual: &[ActionView], step: &Step) -> Result<Option<Event>> {
    let signal = match step {
        Step::Width(width) => {
            bar.on_width_changed(*width);
            return Ok(None);
        }
        Step::Push(index) => {
            let view = contextual
                .get(*index)
                .cloned()
                .ok_or_else(|| anyhow!("no contextual view #{index}"))?;
            return Ok(Some(bar.push_contextual_view(view)));
        }
        Step::Back | Step::Done if bar.depth() == 0 => {
            warn!("'{step}' ignored: no contextual view is showing");
            return Ok(None);
        }
        Step::Back => Signal::Back,
        Step::Done => Signal::Done,
        Step::Activate(id) => {
            if !bar.current().toolbar().contains(id) {
                bail!("'{id}' is not on the current view");
            }
            Signal::Activated(id.clone())
        }
    };
    Ok(bar.handle(signal)?)
}

fn describe(frame: &Frame<'_>) -> String {
    let depth = match frame.state {
        BarState::Base => "base".to_string(),
        BarState::Contextual(depth) => format!("ctx{depth}"),
    };
    let event = frame
        .event
        .map(|e| format!(" ({e:?})"))
        .unwrap_or_default();

    let Some(arrangement) = frame.arrangement else {
        return format!("{:<12} {depth:<5} <no width yet>{event}", frame.step);
    };

    fn join(ids: &[ItemId]) -> String {
        ids.iter()
            .map(ItemId::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
    let slots: Vec<String> = arrangement
        .slots
        .iter()
        .map(|slot| match slot {
            Slot::Inline { item } => item.to_string(),
            Slot::Separator { .. } => "|".to_string(),
            Slot::CollapsedGroup { item, children } => format!("{item}[{}]", join(children)),
            Slot::Overflow { item, children } => format!("{item}<{}>", join(children)),
        })
        .collect();

    format!(
        "{:<12} {depth:<5} {:<8} {}{event}",
        frame.step,
        format!("{:?}", arrangement.tier),
        slots.join(" ")
    )
}
