//! Point-to-key resolution.
//!
//! The tracking engine only needs [`SpatialIndex::key_at`]. [`FaceGeometry`]
//! is the reference implementation: it lays a face out inside a bounding
//! rectangle, row heights split evenly and key widths proportional to their
//! relative length.

use crate::models::{Face, Point, Position, Rect};

/// Resolves a point to the key under it.
pub trait SpatialIndex {
    /// Returns the key at `point`, or `None` when the point is between or
    /// outside keys.
    fn key_at(&self, point: Point) -> Option<Position>;
}

/// Frames of one laid-out row.
#[derive(Debug, Clone, PartialEq)]
struct RowFrame {
    frame: Rect,
    keys: Vec<Rect>,
}

/// On-screen frames of every key of a face.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FaceGeometry {
    bounds: Rect,
    rows: Vec<RowFrame>,
}

impl FaceGeometry {
    /// Lays out `face` inside `bounds`.
    ///
    /// One key unit is the bounds width divided by the longest row. Rows
    /// shorter than the face are centered, except that leading and trailing
    /// `Alternate` keys stay pinned to the row edges.
    #[must_use]
    pub fn layout(face: &Face, bounds: Rect) -> Self {
        let row_count = face.rows.len();
        let longest = face
            .rows
            .iter()
            .map(crate::models::Row::total_length)
            .fold(0.0_f64, f64::max);

        if row_count == 0 || longest <= 0.0 {
            return Self {
                bounds,
                rows: Vec::new(),
            };
        }

        let row_height = bounds.size.height / row_count as f64;
        let unit = bounds.size.width / longest;

        let rows = face
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let frame = Rect::new(
                    bounds.origin.x,
                    bounds.origin.y + row_height * index as f64,
                    bounds.size.width,
                    row_height,
                );
                let widths: Vec<f64> = row.keys.iter().map(|k| k.length * unit).collect();

                let leading = row
                    .keys
                    .iter()
                    .take_while(|k| k.style == crate::models::KeyStyle::Alternate)
                    .count();
                let trailing = row
                    .keys
                    .iter()
                    .skip(leading)
                    .rev()
                    .take_while(|k| k.style == crate::models::KeyStyle::Alternate)
                    .count();

                RowFrame {
                    keys: Self::place_keys(frame, &widths, leading, trailing),
                    frame,
                }
            })
            .collect();

        Self { bounds, rows }
    }

    /// Computes key frames for one row.
    fn place_keys(frame: Rect, widths: &[f64], leading: usize, trailing: usize) -> Vec<Rect> {
        let mut xs = vec![0.0; widths.len()];
        let middle_end = widths.len() - trailing;

        // Leading edge keys, flush left
        let mut x = frame.origin.x;
        for (i, width) in widths.iter().enumerate().take(leading) {
            xs[i] = x;
            x += width;
        }
        let span_start = x;

        // Trailing edge keys, flush right
        let mut x = frame.max_x();
        for i in (middle_end..widths.len()).rev() {
            x -= widths[i];
            xs[i] = x;
        }
        let span_end = x;

        // Everything else centered in the remaining span
        let middle: f64 = widths[leading..middle_end].iter().sum();
        let mut x = span_start + ((span_end - span_start) - middle).max(0.0) / 2.0;
        for i in leading..middle_end {
            xs[i] = x;
            x += widths[i];
        }

        xs.iter()
            .zip(widths)
            .map(|(x, width)| Rect::new(*x, frame.origin.y, *width, frame.size.height))
            .collect()
    }

    /// The rectangle the face was laid out in.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Gets the frame of a key.
    #[must_use]
    pub fn key_frame(&self, position: Position) -> Option<Rect> {
        self.rows
            .get(usize::from(position.row))?
            .keys
            .get(usize::from(position.col))
            .copied()
    }
}

impl SpatialIndex for FaceGeometry {
    fn key_at(&self, point: Point) -> Option<Position> {
        for (r, row) in self.rows.iter().enumerate() {
            if !row.frame.contains(point) {
                continue;
            }
            for (c, key) in row.keys.iter().enumerate() {
                if key.contains(point) {
                    // Keys past index 255 have no position to report
                    return Some(Position::new(u8::try_from(r).ok()?, u8::try_from(c).ok()?));
                }
            }
        }
        None
    }
}
