//! Draws the held notes' images into a fresh frame each tick

use crate::config::{Config, GridConfig};
use crate::frame::FrameBuffer;
use crate::layout::{compute_layout, fit_within, GridLayout};
use crate::notes::ActiveNote;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::collections::HashMap;

/// Renders an ascending snapshot of active notes onto a fixed-size canvas
pub struct FrameRenderer {
    width: u32,
    height: u32,
    background: [u8; 3],
    grid: GridConfig,
    layout: GridLayout,
    // Scaled copies keyed by (note, width, height); dropped when the layout changes
    scaled: HashMap<(u8, u32, u32), RgbaImage>,
}

impl FrameRenderer {
    pub fn new(width: u32, height: u32, background: [u8; 3], grid: GridConfig) -> Self {
        Self {
            width,
            height,
            background,
            grid,
            layout: GridLayout::default(),
            scaled: HashMap::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.window.width,
            config.window.height,
            config.window.bg_color,
            config.grid.clone(),
        )
    }

    /// Layout used for the most recent frame
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Draw `notes` (already in ascending note order) into a new frame
    pub fn render(&mut self, notes: &[(u8, ActiveNote)]) -> FrameBuffer {
        let mut frame = FrameBuffer::new(self.width as usize, self.height as usize, self.background);

        let layout = compute_layout(
            notes.len(),
            self.width,
            self.height,
            self.grid.padding,
            self.grid.min_cell_size,
        );
        if layout != self.layout {
            self.scaled.clear();
            self.layout = layout;
        }
        if layout.is_empty() {
            return frame;
        }

        let margin = 2 * self.grid.cell_margin as i64;
        let avail_w = (layout.cell_width as i64 - margin).max(1) as u32;
        let avail_h = (layout.cell_height as i64 - margin).max(1) as u32;

        for (index, (note, record)) in notes.iter().enumerate() {
            let (cell_x, cell_y) = layout.cell_origin(index, self.grid.padding);
            let (src_w, src_h) = record.image.dimensions();
            let (w, h) = fit_within(src_w, src_h, avail_w, avail_h);
            if w == 0 || h == 0 {
                continue;
            }

            let scaled = self
                .scaled
                .entry((*note, w, h))
                .or_insert_with(|| imageops::resize(record.image.as_ref(), w, h, FilterType::Triangle));

            let left = cell_x + (layout.cell_width as i64 - w as i64).div_euclid(2);
            let top = cell_y + (layout.cell_height as i64 - h as i64).div_euclid(2);
            frame.blit(scaled, left, top);
        }

        frame
    }
}
