//! The fixed-rate instrument loop
//!
//! One tick: drain note events, render the held notes, run the frame
//! through the effect chain, composite, present. Everything happens on the
//! calling thread in that order; a slow tick simply lowers the frame rate.

use crate::config::Config;
use crate::display::Display;
use crate::effect_chain::SignalEffectChain;
use crate::frame::FrameBuffer;
use crate::images::ImageLibrary;
use crate::midi_input::{EventSource, MidiEvent};
use crate::notes::ActiveNoteSet;
use crate::pipeline::process_image_array;
use crate::render::FrameRenderer;
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default tick rate
pub const DEFAULT_FPS: u32 = 30;

/// Sleeps away whatever is left of each tick period
#[derive(Debug)]
pub struct TickClock {
    period: Duration,
    last: Option<Instant>,
}

impl TickClock {
    pub fn new(fps: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            last: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time left in the current period, measured at `now`
    pub fn remaining(&self, now: Instant) -> Duration {
        match self.last {
            Some(last) => self.period.saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Block until the next tick is due
    pub fn wait(&mut self) {
        let remaining = self.remaining(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
        self.last = Some(Instant::now());
    }
}

/// All state owned by the loop
pub struct App {
    notes: ActiveNoteSet,
    library: ImageLibrary,
    renderer: FrameRenderer,
    chain: SignalEffectChain,
    frame_no: u64,
    total_frames: u64,
}

impl App {
    pub fn new(renderer: FrameRenderer, library: ImageLibrary, chain: SignalEffectChain) -> Self {
        Self {
            notes: ActiveNoteSet::new(),
            library,
            renderer,
            chain,
            frame_no: 0,
            total_frames: 0,
        }
    }

    /// Default chain, canvas and grid taken from `config`
    pub fn from_config(config: &Config, library: ImageLibrary) -> Self {
        Self::new(
            FrameRenderer::from_config(config),
            library,
            SignalEffectChain::default_chain(),
        )
    }

    /// Stop after `frames` ticks (0 = run until asked to stop)
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.total_frames = frames;
        self
    }

    pub fn notes(&self) -> &ActiveNoteSet {
        &self.notes
    }

    pub fn frame_no(&self) -> u64 {
        self.frame_no
    }

    /// Update the held-note set from a batch of events
    pub fn apply_events(&mut self, events: &[MidiEvent]) {
        let now = Instant::now();
        let library = &self.library;
        for event in events {
            self.notes.apply(event, now, |note| library.get(note));
        }
    }

    /// Render, process and composite one frame from the current note set
    pub fn tick(&mut self) -> FrameBuffer {
        let snapshot = self.notes.snapshot();
        let frame = self.renderer.render(&snapshot);
        let out = process_image_array(&mut self.chain, &frame, self.frame_no, self.total_frames);
        self.frame_no += 1;
        out
    }

    fn finished(&self) -> bool {
        self.total_frames > 0 && self.frame_no >= self.total_frames
    }

    /// Run ticks until the display asks to stop or the frame limit is hit
    pub fn run<E, D>(&mut self, events: &mut E, display: &mut D, fps: u32) -> io::Result<()>
    where
        E: EventSource,
        D: Display,
    {
        let mut clock = TickClock::new(fps);
        info!("Running at {} ticks per second", fps);
        info!("Effect chain: {}", self.chain.unit_names().join(" -> "));

        while !self.finished() {
            if display.stop_requested()? {
                info!("Stop requested");
                break;
            }

            let pending = events.drain();
            if !pending.is_empty() {
                debug!("{} MIDI events this tick", pending.len());
            }
            self.apply_events(&pending);

            let frame = self.tick();
            display.present(&frame)?;
            clock.wait();
        }

        info!("Stopped after {} frames", self.frame_no);
        Ok(())
    }
}
