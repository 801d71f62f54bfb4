//! Tile lattice for the dome and image assignment onto it.
//!
//! The lattice is a ring of `segments` longitude columns, two angular units
//! apart and symmetric around zero, each holding five latitude rows. Even and
//! odd columns use row sets offset by one unit so tiles stagger.

use crate::constants::{EVEN_COLUMN_ROWS, LATTICE_COLUMN_STEP, ODD_COLUMN_ROWS, TILE_SPAN};
use crate::image::{DomeImage, ImageDescriptor};
use fnv::FnvHashSet;

/// One lattice position (angular grid units) plus its assigned image.
#[derive(Clone, Debug, PartialEq)]
pub struct TileSlot {
    pub offset_x: i32,
    pub offset_y: i32,
    pub size_x: i32,
    pub size_y: i32,
    pub image: ImageDescriptor,
}

impl TileSlot {
    #[inline]
    pub fn base_rotation(&self, segments: usize) -> BaseRotation {
        item_base_rotation(
            self.offset_x,
            self.offset_y,
            self.size_x,
            self.size_y,
            segments,
        )
    }
}

/// A slot's resting orientation on the sphere, in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BaseRotation {
    pub rotate_x: f32,
    pub rotate_y: f32,
}

pub fn item_base_rotation(
    offset_x: i32,
    offset_y: i32,
    size_x: i32,
    size_y: i32,
    segments: usize,
) -> BaseRotation {
    let unit = 360.0 / segments.max(1) as f32 / 2.0;
    BaseRotation {
        rotate_y: unit * (offset_x as f32 + (size_x - 1) as f32 / 2.0),
        rotate_x: unit * (offset_y as f32 - (size_y - 1) as f32 / 2.0),
    }
}

/// Lattice coordinates in generation order: column by column, rows top to bottom.
pub fn lattice(segments: usize) -> Vec<(i32, i32)> {
    let first = -(segments as i32 - 1);
    (0..segments)
        .flat_map(|c| {
            let x = first + c as i32 * LATTICE_COLUMN_STEP;
            let ys = if c % 2 == 0 {
                EVEN_COLUMN_ROWS
            } else {
                ODD_COLUMN_ROWS
            };
            ys.into_iter().map(move |y| (x, y))
        })
        .collect()
}

/// Assign `pool` onto the lattice cyclically, then break up adjacent repeats.
///
/// Deterministic for a given `(pool, segments)`; slot index doubles as the
/// render key. An empty pool yields placeholder slots.
pub fn build_slots(pool: &[DomeImage], segments: usize) -> Vec<TileSlot> {
    let coords = lattice(segments);
    let normalized: Vec<ImageDescriptor> = pool.iter().map(ImageDescriptor::from).collect();

    let distinct: FnvHashSet<&str> = normalized.iter().map(|d| d.src.as_str()).collect();
    let mut used: Vec<ImageDescriptor> = if normalized.is_empty() {
        vec![ImageDescriptor::default(); coords.len()]
    } else {
        (0..coords.len())
            .map(|i| normalized[i % normalized.len()].clone())
            .collect()
    };
    // A single distinct source has nothing to trade with.
    if distinct.len() > 1 {
        separate_adjacent(&mut used);
    }

    log::debug!(
        "[layout] {} slots from {} images ({} distinct), segments={}",
        coords.len(),
        pool.len(),
        distinct.len(),
        segments
    );

    coords
        .into_iter()
        .zip(used)
        .map(|((x, y), image)| TileSlot {
            offset_x: x,
            offset_y: y,
            size_x: TILE_SPAN,
            size_y: TILE_SPAN,
            image,
        })
        .collect()
}

/// One forward pass: a slot repeating its predecessor trades places with the
/// nearest later slot holding a different image. The slot it trades into is
/// not re-checked against its own neighbours.
fn separate_adjacent(used: &mut [ImageDescriptor]) {
    for i in 1..used.len() {
        if used[i].src != used[i - 1].src {
            continue;
        }
        if let Some(j) = (i + 1..used.len()).find(|&j| used[j].src != used[i].src) {
            used.swap(i, j);
        }
    }
}
