//! Headless frame loop.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use anyhow::Result;
use carousel_core::{
    CarouselEngine, CarouselEvent, Command, CommandQueue, EventKind, Item, Pose,
};

use crate::script::{parse_script, ScriptStep};
use crate::{DemoConfig, OutputFormat};

/// Outcome of a demo run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames ticked.
    pub frames: u64,
    /// Notifications raised by the engine.
    pub notifications: usize,
    /// Scripted commands the engine rejected.
    pub rejected: usize,
    /// Slot selected at the end of the run.
    pub final_slot: usize,
    /// Whether auto-rotation was running at the end.
    pub rotating: bool,
}

/// Headless carousel host.
///
/// Plays the part of a rendering host: builds the item set, ticks the engine
/// once per frame, applies scripted commands and writes the poses out.
pub struct DemoApp {
    config: DemoConfig,
    engine: CarouselEngine,
    script: Vec<ScriptStep>,
    next_step: usize,
    queued: CommandQueue,
    notifications: Rc<RefCell<Vec<CarouselEvent>>>,
}

impl DemoApp {
    /// Create the app: resolve the configuration, register items and parse
    /// the script.
    ///
    /// # Errors
    ///
    /// Returns an error for an unreadable or invalid configuration, an
    /// invalid container size or a malformed script.
    pub fn new(config: DemoConfig) -> Result<Self> {
        let carousel = config.carousel_config()?;
        let mut engine = CarouselEngine::with_config(config.width, config.height, carousel)?;
        engine.register_items(
            (0..config.items).map(|_| Item::new(config.item_width, config.item_height)),
        );
        tracing::debug!("Registered {} items", engine.len());

        let notifications = Rc::new(RefCell::new(Vec::new()));
        for kind in [EventKind::Selecting, EventKind::Deselected, EventKind::Selected] {
            let sink = Rc::clone(&notifications);
            engine.subscribe(kind, move |event| sink.borrow_mut().push(*event));
        }

        // Follow-up commands from callbacks wait for the frame loop.
        let queued = CommandQueue::new();
        if config.reverse_on_select {
            let sink = queued.clone();
            engine.subscribe(EventKind::Selecting, move |_| {
                sink.push(Command::ReverseRotation);
            });
        }

        if config.rotate {
            engine.enable_rotation(true)?;
        }

        let script = parse_script(&config.script)?;
        tracing::debug!("Parsed {} scripted steps", script.len());

        Ok(Self {
            config,
            engine,
            script,
            next_step: 0,
            queued,
            notifications,
        })
    }

    /// The engine being driven.
    #[must_use]
    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    /// Run every frame, writing output to `out`.
    ///
    /// Rejected commands are logged and counted, not fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary> {
        let every = self.config.every.max(1);
        let mut rejected = 0;
        let mut notifications = 0;

        if self.config.format == OutputFormat::Table {
            writeln!(
                out,
                "{:>6} {:>4} {:>9} {:>9} {:>6} {:>7} {:>5}",
                "frame", "slot", "x", "y", "scale", "opacity", "z"
            )?;
        }

        for frame in 0..self.config.frames {
            while let Some(step) = self.script.get(self.next_step) {
                if step.frame > frame {
                    break;
                }
                let command = step.command.clone();
                self.next_step += 1;
                rejected += self.apply(frame, &command);
            }
            rejected += self.drain_queue(frame);

            self.engine.tick();
            rejected += self.drain_queue(frame);

            let events: Vec<_> = self.notifications.borrow_mut().drain(..).collect();
            notifications += events.len();
            for event in &events {
                tracing::info!(frame, "{:?} {}", event.kind(), event.item());
                self.write_event(out, frame, event)?;
            }

            if frame % every == 0 || frame + 1 == self.config.frames {
                self.write_frame(out, frame)?;
            }
        }

        let skipped = self.script.len() - self.next_step;
        if skipped > 0 {
            tracing::warn!("{skipped} scripted steps fall after the last frame");
        }

        Ok(RunSummary {
            frames: self.config.frames,
            notifications,
            rejected,
            final_slot: self.engine.current_slot(),
            rotating: self.engine.is_rotating(),
        })
    }

    /// Apply one command; returns 1 if the engine rejected it.
    fn apply(&mut self, frame: u64, command: &Command) -> usize {
        tracing::debug!(frame, ?command, "Applying command");
        match self.engine.apply(command) {
            Ok(()) => 0,
            Err(e) => {
                tracing::warn!(frame, ?command, "Command rejected: {e}");
                1
            }
        }
    }

    fn drain_queue(&mut self, frame: u64) -> usize {
        if self.queued.is_empty() {
            return 0;
        }
        tracing::debug!(frame, queued = self.queued.len(), "Applying queued commands");
        self.engine.apply_queued(&self.queued).len()
    }

    fn write_event<W: Write>(&self, out: &mut W, frame: u64, event: &CarouselEvent) -> Result<()> {
        match self.config.format {
            OutputFormat::Json => {
                let line = serde_json::json!({ "frame": frame, "notification": event });
                writeln!(out, "{line}")?;
            }
            OutputFormat::Table => {
                writeln!(out, "# frame {frame}: {:?} {}", event.kind(), event.item())?;
            }
        }
        Ok(())
    }

    fn write_frame<W: Write>(&self, out: &mut W, frame: u64) -> Result<()> {
        let poses = self.engine.poses();
        match self.config.format {
            OutputFormat::Json => {
                let line = serde_json::json!({
                    "frame": frame,
                    "currentSlot": self.engine.current_slot(),
                    "rotating": self.engine.is_rotating(),
                    "drawOrder": self.engine.draw_order(),
                    "poses": poses,
                });
                writeln!(out, "{line}")?;
            }
            OutputFormat::Table => {
                let current = self.engine.current_slot();
                for pose in poses {
                    write_row(out, frame, pose, pose.slot == current)?;
                }
            }
        }
        Ok(())
    }
}

fn write_row<W: Write>(out: &mut W, frame: u64, pose: &Pose, current: bool) -> Result<()> {
    let marker = if current { "*" } else { " " };
    writeln!(
        out,
        "{frame:>6} {:>3}{marker} {:>9.2} {:>9.2} {:>6.3} {:>7.3} {:>5}",
        pose.slot, pose.x, pose.y, pose.scale, pose.opacity, pose.z_order
    )?;
    Ok(())
}
