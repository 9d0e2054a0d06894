//! Adaptive grid packing for the active images
//!
//! The grid starts as close to square as possible and gives up columns
//! (gaining rows) until every cell is at least `min_cell_size` on both axes.
//! It never adds columns beyond the initial `ceil(sqrt(n))`.

/// Column/row counts and cell geometry for one item count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Left edge of the grid footprint on the canvas
    pub origin_x: u32,
    /// Top edge of the grid footprint on the canvas
    pub origin_y: u32,
}

impl GridLayout {
    /// True for the all-zero layout used when nothing is active
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Top-left corner of the `index`-th cell, filling rows left to right
    pub fn cell_origin(&self, index: usize, padding: u32) -> (i64, i64) {
        if self.is_empty() {
            return (0, 0);
        }
        let col = (index % self.columns as usize) as i64;
        let row = (index / self.columns as usize) as i64;
        let pad = padding as i64;
        let x = self.origin_x as i64 + pad + col * (self.cell_width as i64 + pad);
        let y = self.origin_y as i64 + pad + row * (self.cell_height as i64 + pad);
        (x, y)
    }
}

/// Compute the grid for `item_count` items on a `canvas_w` x `canvas_h` canvas
///
/// Best effort: if no column count satisfies `min_cell_size`, the search
/// stops at one column and returns whatever cell size that yields (at least
/// one pixel). Pure and deterministic.
pub fn compute_layout(
    item_count: usize,
    canvas_w: u32,
    canvas_h: u32,
    padding: u32,
    min_cell_size: u32,
) -> GridLayout {
    if item_count == 0 {
        return GridLayout::default();
    }

    let n = item_count as u64;
    let mut columns = ceil_sqrt(n);
    let mut rows = n.div_ceil(columns);

    while columns > 1 {
        let cell_w = candidate_extent(canvas_w, columns, padding);
        let cell_h = candidate_extent(canvas_h, rows, padding);
        if cell_w >= min_cell_size as f64 && cell_h >= min_cell_size as f64 {
            break;
        }
        columns -= 1;
        rows = n.div_ceil(columns);
    }

    let cell_width = floor_to_pixels(candidate_extent(canvas_w, columns, padding));
    let cell_height = floor_to_pixels(candidate_extent(canvas_h, rows, padding));

    let grid_w = footprint(columns, cell_width, padding);
    let grid_h = footprint(rows, cell_height, padding);

    GridLayout {
        columns: columns as u32,
        rows: rows as u32,
        cell_width,
        cell_height,
        origin_x: centre_offset(canvas_w, grid_w),
        origin_y: centre_offset(canvas_h, grid_h),
    }
}

/// Scale `src_w` x `src_h` to fit inside `max_w` x `max_h`, keeping aspect ratio
///
/// Images smaller than the box are scaled up. A zero-sized source is
/// returned unchanged.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }
    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale) as u32).max(1);
    let h = ((src_h as f64 * scale) as u32).max(1);
    (w, h)
}

/// Smallest c with c * c >= n
fn ceil_sqrt(n: u64) -> u64 {
    let mut c = (n as f64).sqrt().ceil() as u64;
    // Float sqrt can be off by one for large n
    while c > 1 && (c - 1) * (c - 1) >= n {
        c -= 1;
    }
    while c * c < n {
        c += 1;
    }
    c
}

/// Cell extent along one axis before flooring; negative when padding eats the canvas
fn candidate_extent(canvas: u32, count: u64, padding: u32) -> f64 {
    let gaps = (count + 1) as f64 * padding as f64;
    (canvas as f64 - gaps) / count as f64
}

fn floor_to_pixels(extent: f64) -> u32 {
    if extent < 1.0 {
        1
    } else {
        extent.floor().min(u32::MAX as f64) as u32
    }
}

fn footprint(count: u64, cell: u32, padding: u32) -> i64 {
    count as i64 * cell as i64 + (count as i64 + 1) * padding as i64
}

fn centre_offset(canvas: u32, grid: i64) -> u32 {
    let spare = canvas as i64 - grid;
    if spare <= 0 {
        0
    } else {
        (spare / 2) as u32
    }
}
