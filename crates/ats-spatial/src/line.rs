//! Length-indexed polyline parameterization.
//!
//! A [`LengthIndexedLine`] maps an arc-length index `s ∈ [0, length]` onto a
//! point along a polyline.  The movement engine advances agents by adding
//! signed distances to such an index, so the mapping must be *exact* at the
//! endpoints: `point_at(0)` is the first vertex and `point_at(length)` the
//! last vertex, bit for bit.  Downstream arrival detection compares
//! coordinates for equality, not proximity.

use ats_core::Point;

/// A polyline with a precomputed cumulative arc-length table.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LengthIndexedLine {
    points: Vec<Point>,
    /// `cum[i]` = arc length from the first vertex to `points[i]`.
    /// `cum[0] == 0`, `cum.last() == total length`.
    cum: Vec<f64>,
}

impl LengthIndexedLine {
    /// Build from at least two vertices.
    ///
    /// # Panics
    /// Panics in debug mode if fewer than two vertices are given.
    pub fn new(points: Vec<Point>) -> Self {
        debug_assert!(points.len() >= 2, "a line needs at least two vertices");
        let mut cum = Vec::with_capacity(points.len());
        let mut total = 0.0;
        cum.push(0.0);
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cum.push(total);
        }
        Self { points, cum }
    }

    /// Total arc length.
    #[inline]
    pub fn length(&self) -> f64 {
        *self.cum.last().unwrap_or(&0.0)
    }

    /// First vertex — returned exactly by `point_at(s <= 0)`.
    #[inline]
    pub fn start_point(&self) -> Point {
        self.points[0]
    }

    /// Last vertex — returned exactly by `point_at(s >= length)`.
    #[inline]
    pub fn end_point(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// The point at arc-length index `s`.
    ///
    /// Indices outside `[0, length]` clamp to the exact endpoint vertices;
    /// interior indices interpolate linearly within the containing segment.
    pub fn point_at(&self, s: f64) -> Point {
        if s <= 0.0 {
            return self.start_point();
        }
        if s >= self.length() {
            return self.end_point();
        }
        // First vertex index with cum > s; the containing segment is [i-1, i].
        let i = self.cum.partition_point(|&c| c <= s);
        let seg_start = self.cum[i - 1];
        let seg_len = self.cum[i] - seg_start;
        if seg_len <= 0.0 {
            // Zero-length segment (duplicate vertex) — skip to its end.
            return self.points[i];
        }
        let t = (s - seg_start) / seg_len;
        self.points[i - 1].lerp(self.points[i], t)
    }
}
