// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grace area: the safe region between a trigger and its floating content.
//!
//! ## Overview
//!
//! When the pointer leaves the trigger of a hover-opened popover it is often
//! on its way to the content. Closing on the raw leave would make diagonal
//! travel impossible. [`GraceArea`] watches pointer positions and reports
//! [`GraceAreaEvent::Exit`] only when the pointer has left the region in which
//! travel between the two rectangles is plausible.
//!
//! ## Region
//!
//! The exit point is where the pointer's path crossed the boundary of the
//! rectangle it left, found from the last position seen inside it. Heading for
//! the other rectangle (the target), the pointer is considered safe while it
//! is inside any of:
//!
//! - the trigger or the content rectangle,
//! - the straight [`corridor`] between them over their shared span, if any,
//! - the [`safe_polygon`]: the convex hull of the buffered exit point and the
//!   four corners of the target rectangle.
//!
//! Re-entering either rectangle ends the session without an exit. An exit
//! also ends the session, so it is reported once per genuine exit.
//!
//! The rectangles may be disjoint, overlapping, or nested, and in any
//! relative position.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_popover::grace::{GraceArea, GraceAreaEvent, Side};
//!
//! let trigger = Rect::new(0.0, 0.0, 100.0, 40.0);
//! let content = Rect::new(150.0, 0.0, 300.0, 200.0);
//!
//! let mut grace = GraceArea::new();
//! grace.set_enabled(true);
//!
//! let mv = |g: &mut GraceArea, x, y| g.pointer_move(Point::new(x, y), trigger, content);
//! assert_eq!(mv(&mut grace, 50.0, 20.0), GraceAreaEvent::Inside(Side::Trigger));
//! // Crossing the gap toward the content is safe.
//! assert_eq!(mv(&mut grace, 120.0, 25.0), GraceAreaEvent::InTransit);
//! assert_eq!(mv(&mut grace, 160.0, 30.0), GraceAreaEvent::Inside(Side::Content));
//!
//! // Leaving the content downward, away from the trigger, exits once.
//! assert_eq!(mv(&mut grace, 200.0, 201.0), GraceAreaEvent::InTransit);
//! assert_eq!(mv(&mut grace, 200.0, 400.0), GraceAreaEvent::Exit);
//! assert_eq!(mv(&mut grace, 200.0, 420.0), GraceAreaEvent::Idle);
//! ```

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

/// Half-size of the square placed around the exit point, in pointer units.
pub const DEFAULT_BUFFER: f64 = 1.0;

/// One of the two rectangles a grace area connects.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Side {
    /// The trigger rectangle.
    Trigger,
    /// The floating content rectangle.
    Content,
}

impl Side {
    /// The opposite rectangle.
    pub const fn other(self) -> Self {
        match self {
            Self::Trigger => Self::Content,
            Self::Content => Self::Trigger,
        }
    }
}

/// Result of feeding a pointer position to a [`GraceArea`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GraceAreaEvent {
    /// No session: the area is disabled, or the pointer never left a rectangle.
    Idle,
    /// The pointer is inside the given rectangle.
    Inside(Side),
    /// The pointer left a rectangle and is still within the safe region.
    InTransit,
    /// The pointer left the safe region. The session is over.
    Exit,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct ExitSession {
    point: Point,
    toward: Side,
}

/// Tracks one pointer's travel between a trigger and its content.
///
/// Rectangles are passed on every move so that live layout changes are picked
/// up without extra bookkeeping.
#[derive(Clone, Debug, PartialEq)]
pub struct GraceArea {
    buffer: f64,
    enabled: bool,
    last_inside: Option<(Side, Point)>,
    session: Option<ExitSession>,
}

impl Default for GraceArea {
    fn default() -> Self {
        Self::new()
    }
}

impl GraceArea {
    /// Create a disabled grace area with [`DEFAULT_BUFFER`].
    pub const fn new() -> Self {
        Self::with_buffer(DEFAULT_BUFFER)
    }

    /// Create a disabled grace area with a custom exit-point buffer.
    ///
    /// The buffer also widens the corridor between the rectangles.
    pub const fn with_buffer(buffer: f64) -> Self {
        Self {
            buffer,
            enabled: false,
            last_inside: None,
            session: None,
        }
    }

    /// The exit-point buffer.
    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    /// Whether exits are currently being determined.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable exit tracking. Disabling drops any open session.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.session = None;
        }
        self.enabled = enabled;
    }

    /// Whether an exit point has been recorded and travel is being judged.
    pub fn is_tracking(&self) -> bool {
        self.session.is_some()
    }

    /// Forget the pointer history and any open session.
    pub fn reset(&mut self) {
        self.last_inside = None;
        self.session = None;
    }

    /// Feed a pointer position.
    ///
    /// The content rectangle wins when the point is inside both.
    pub fn pointer_move(&mut self, point: Point, trigger: Rect, content: Rect) -> GraceAreaEvent {
        let region = if contains_inclusive(content, point) {
            Some(Side::Content)
        } else if contains_inclusive(trigger, point) {
            Some(Side::Trigger)
        } else {
            None
        };

        if let Some(side) = region {
            self.last_inside = Some((side, point));
            self.session = None;
            return if self.enabled {
                GraceAreaEvent::Inside(side)
            } else {
                GraceAreaEvent::Idle
            };
        }

        if !self.enabled {
            self.last_inside = None;
            return GraceAreaEvent::Idle;
        }

        let session = match self.session {
            Some(session) => session,
            None => {
                let Some((from, inside)) = self.last_inside.take() else {
                    return GraceAreaEvent::Idle;
                };
                let session = ExitSession {
                    point: exit_point(side_rect(from, trigger, content), inside, point),
                    toward: from.other(),
                };
                self.session = Some(session);
                session
            }
        };

        let target = side_rect(session.toward, trigger, content);
        let in_corridor = corridor(trigger, content)
            .is_some_and(|c| contains_inclusive(c.inflate(self.buffer, self.buffer), point));
        if in_corridor
            || point_in_convex_polygon(point, &safe_polygon(session.point, target, self.buffer))
        {
            return GraceAreaEvent::InTransit;
        }

        self.session = None;
        trace_event!(
            debug,
            x = point.x,
            y = point.y,
            toward = ?session.toward,
            "pointer left grace area"
        );
        GraceAreaEvent::Exit
    }
}

fn side_rect(side: Side, trigger: Rect, content: Rect) -> Rect {
    match side {
        Side::Trigger => trigger,
        Side::Content => content,
    }
}

/// Where the segment from `inside` to `outside` crosses the boundary of `rect`.
///
/// The result is clamped to `rect`, so a stale `inside` position (for example
/// after the rectangle moved) still yields a point on the rectangle.
pub fn exit_point(rect: Rect, inside: Point, outside: Point) -> Point {
    let r = rect.abs();
    let d = outside - inside;
    let reach = |from: f64, delta: f64, lo: f64, hi: f64| {
        if delta > 0.0 {
            (hi - from) / delta
        } else if delta < 0.0 {
            (lo - from) / delta
        } else {
            f64::INFINITY
        }
    };
    let t = reach(inside.x, d.x, r.x0, r.x1)
        .min(reach(inside.y, d.y, r.y0, r.y1))
        .clamp(0.0, 1.0);
    let p = inside + d * t;
    Point::new(p.x.clamp(r.x0, r.x1), p.y.clamp(r.y0, r.y1))
}

/// Point-in-rectangle test with inclusive edges.
///
/// Works for rectangles with negative width or height.
pub fn contains_inclusive(rect: Rect, point: Point) -> bool {
    let r = rect.abs();
    point.x >= r.x0 && point.x <= r.x1 && point.y >= r.y0 && point.y <= r.y1
}

/// The rectangle between two disjoint rectangles over their shared span.
///
/// Returns `None` when the rectangles overlap, or when they are diagonally
/// offset so that they share no span on either axis.
pub fn corridor(a: Rect, b: Rect) -> Option<Rect> {
    let (a, b) = (a.abs(), b.abs());

    let y0 = a.y0.max(b.y0);
    let y1 = a.y1.min(b.y1);
    if y0 <= y1 {
        if a.x1 < b.x0 {
            return Some(Rect::new(a.x1, y0, b.x0, y1));
        }
        if b.x1 < a.x0 {
            return Some(Rect::new(b.x1, y0, a.x0, y1));
        }
    }

    let x0 = a.x0.max(b.x0);
    let x1 = a.x1.min(b.x1);
    if x0 <= x1 {
        if a.y1 < b.y0 {
            return Some(Rect::new(x0, a.y1, x1, b.y0));
        }
        if b.y1 < a.y0 {
            return Some(Rect::new(x0, b.y1, x1, a.y0));
        }
    }

    None
}

/// The safe polygon from an exit point to a target rectangle.
///
/// This is the convex hull of the square of half-size `buffer` around `exit`
/// and the corners of `target`, in counter-clockwise order (in a y-up frame).
pub fn safe_polygon(exit: Point, target: Rect, buffer: f64) -> Vec<Point> {
    let t = target.abs();
    let points = [
        Point::new(exit.x - buffer, exit.y - buffer),
        Point::new(exit.x + buffer, exit.y - buffer),
        Point::new(exit.x + buffer, exit.y + buffer),
        Point::new(exit.x - buffer, exit.y + buffer),
        Point::new(t.x0, t.y0),
        Point::new(t.x1, t.y0),
        Point::new(t.x1, t.y1),
        Point::new(t.x0, t.y1),
    ];
    convex_hull(&points)
}

/// Convex hull by the monotone chain algorithm.
///
/// Collinear points are dropped. Fewer than three distinct input points are
/// returned as-is (sorted).
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let mut pts: Vec<Point> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let turn = |o: Point, a: Point, b: Point| (a - o).cross(b - o);
    let mut hull: Vec<Point> = Vec::with_capacity(pts.len() * 2);
    for &p in &pts {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    let lower_len = hull.len() + 1;
    for &p in pts.iter().rev().skip(1) {
        while hull.len() >= lower_len && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0
        {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Whether `point` lies in (or on the boundary of) a convex polygon given in
/// counter-clockwise order, as produced by [`convex_hull`].
///
/// Degenerate polygons (fewer than three vertices) contain nothing.
pub fn point_in_convex_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    polygon.iter().enumerate().all(|(i, &a)| {
        let b = polygon[(i + 1) % polygon.len()];
        let edge: Vec2 = b - a;
        edge.cross(point - a) >= 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> GraceArea {
        let mut g = GraceArea::new();
        g.set_enabled(true);
        g
    }

    fn mv(g: &mut GraceArea, x: f64, y: f64, trigger: Rect, content: Rect) -> GraceAreaEvent {
        g.pointer_move(Point::new(x, y), trigger, content)
    }

    // Content to the right of the trigger; crossing the gap stays safe.
    #[test]
    fn side_by_side_gap_is_safe() {
        let t = Rect::new(0.0, 0.0, 100.0, 40.0);
        let c = Rect::new(150.0, 0.0, 300.0, 200.0);
        let mut g = area();
        assert_eq!(mv(&mut g, 50.0, 20.0, t, c), GraceAreaEvent::Inside(Side::Trigger));
        assert_eq!(mv(&mut g, 101.0, 20.0, t, c), GraceAreaEvent::InTransit);
        assert!(g.is_tracking());
        assert_eq!(mv(&mut g, 125.0, 38.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 160.0, 20.0, t, c), GraceAreaEvent::Inside(Side::Content));
        assert!(!g.is_tracking());
    }

    // Moving away from the content fires exactly one exit.
    #[test]
    fn exit_fires_once() {
        let t = Rect::new(0.0, 0.0, 100.0, 40.0);
        let c = Rect::new(150.0, 0.0, 300.0, 200.0);
        let mut g = area();
        mv(&mut g, 50.0, 20.0, t, c);
        assert_eq!(mv(&mut g, 101.0, 20.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 101.0, 300.0, t, c), GraceAreaEvent::Exit);
        assert_eq!(mv(&mut g, 101.0, 310.0, t, c), GraceAreaEvent::Idle);
        assert_eq!(mv(&mut g, 500.0, 500.0, t, c), GraceAreaEvent::Idle);
    }

    // Content above the trigger; the vertical corridor is safe.
    #[test]
    fn content_above_trigger() {
        let t = Rect::new(100.0, 300.0, 200.0, 340.0);
        let c = Rect::new(50.0, 0.0, 350.0, 200.0);
        let mut g = area();
        mv(&mut g, 150.0, 320.0, t, c);
        assert_eq!(mv(&mut g, 150.0, 299.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 110.0, 250.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 150.0, 199.0, t, c), GraceAreaEvent::Inside(Side::Content));
    }

    // Diagonal offset: no corridor, the hull carries the travel.
    #[test]
    fn diagonal_offset_uses_hull() {
        let t = Rect::new(0.0, 0.0, 50.0, 50.0);
        let c = Rect::new(200.0, 200.0, 400.0, 400.0);
        assert_eq!(corridor(t, c), None);

        let mut g = area();
        mv(&mut g, 25.0, 25.0, t, c);
        assert_eq!(mv(&mut g, 51.0, 51.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 120.0, 120.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 120.0, 20.0, t, c), GraceAreaEvent::Exit);
    }

    // Re-entering the trigger cancels the session; the next leave starts fresh.
    #[test]
    fn reentry_cancels_session() {
        let t = Rect::new(0.0, 0.0, 100.0, 40.0);
        let c = Rect::new(150.0, 0.0, 300.0, 200.0);
        let mut g = area();
        mv(&mut g, 50.0, 20.0, t, c);
        mv(&mut g, 50.0, 41.0, t, c);
        assert!(g.is_tracking());
        assert_eq!(mv(&mut g, 50.0, 39.0, t, c), GraceAreaEvent::Inside(Side::Trigger));
        assert!(!g.is_tracking());
        assert_eq!(mv(&mut g, 101.0, 10.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 140.0, 10.0, t, c), GraceAreaEvent::InTransit);
    }

    // Overlapping rectangles: leaving the content away from the trigger exits.
    #[test]
    fn overlapping_rects() {
        let t = Rect::new(0.0, 0.0, 100.0, 100.0);
        let c = Rect::new(50.0, 50.0, 200.0, 200.0);
        assert_eq!(corridor(t, c), None);
        let mut g = area();
        assert_eq!(mv(&mut g, 10.0, 10.0, t, c), GraceAreaEvent::Inside(Side::Trigger));
        assert_eq!(mv(&mut g, 60.0, 60.0, t, c), GraceAreaEvent::Inside(Side::Content));
        assert_eq!(mv(&mut g, 201.0, 150.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 300.0, 100.0, t, c), GraceAreaEvent::Exit);
    }

    // Content containing the trigger: travel never leaves a rectangle.
    #[test]
    fn nested_rects() {
        let t = Rect::new(50.0, 50.0, 100.0, 100.0);
        let c = Rect::new(0.0, 0.0, 300.0, 300.0);
        let mut g = area();
        assert_eq!(mv(&mut g, 75.0, 75.0, t, c), GraceAreaEvent::Inside(Side::Content));
        assert_eq!(mv(&mut g, 200.0, 200.0, t, c), GraceAreaEvent::Inside(Side::Content));
        assert_eq!(mv(&mut g, 301.0, 200.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 600.0, 200.0, t, c), GraceAreaEvent::Exit);
    }

    // Returning from the content toward the trigger is also covered.
    #[test]
    fn content_back_to_trigger() {
        let t = Rect::new(0.0, 0.0, 100.0, 40.0);
        let c = Rect::new(300.0, 200.0, 500.0, 400.0);
        let mut g = area();
        mv(&mut g, 400.0, 300.0, t, c);
        assert_eq!(mv(&mut g, 299.0, 201.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 200.0, 120.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 90.0, 30.0, t, c), GraceAreaEvent::Inside(Side::Trigger));
    }

    // A single coalesced move straight away from the content is already outside.
    #[test]
    fn first_sample_can_exit() {
        let t = Rect::new(0.0, 0.0, 100.0, 40.0);
        let c = Rect::new(0.0, 60.0, 200.0, 260.0);
        let mut g = area();
        mv(&mut g, 50.0, 20.0, t, c);
        assert_eq!(mv(&mut g, 50.0, -300.0, t, c), GraceAreaEvent::Exit);
        assert!(!g.is_tracking());
        assert_eq!(mv(&mut g, 50.0, -310.0, t, c), GraceAreaEvent::Idle);

        // Same from the content side, jumping far below it.
        mv(&mut g, 100.0, 200.0, t, c);
        assert_eq!(mv(&mut g, 100.0, 600.0, t, c), GraceAreaEvent::Exit);
    }

    // A fast diagonal jump lands in the gap, then in the content.
    #[test]
    fn fast_diagonal_jump_to_content() {
        let t = Rect::new(100.0, 100.0, 200.0, 140.0);
        let c = Rect::new(80.0, 160.0, 320.0, 400.0);
        let mut g = area();
        mv(&mut g, 150.0, 120.0, t, c);
        assert_eq!(mv(&mut g, 250.0, 150.0, t, c), GraceAreaEvent::InTransit);
        assert_eq!(mv(&mut g, 300.0, 380.0, t, c), GraceAreaEvent::Inside(Side::Content));

        // Straight from inside the trigger to inside the content.
        mv(&mut g, 150.0, 120.0, t, c);
        assert_eq!(mv(&mut g, 310.0, 390.0, t, c), GraceAreaEvent::Inside(Side::Content));
        assert!(!g.is_tracking());
    }

    #[test]
    fn exit_point_on_boundary() {
        let r = Rect::new(0.0, 0.0, 100.0, 40.0);
        let p = exit_point(r, Point::new(50.0, 20.0), Point::new(50.0, -300.0));
        assert_eq!(p, Point::new(50.0, 0.0));
        let p = exit_point(r, Point::new(50.0, 20.0), Point::new(150.0, 30.0));
        assert_eq!(p, Point::new(100.0, 25.0));
        // A stale inside position is clamped onto the rectangle.
        let p = exit_point(r, Point::new(150.0, 20.0), Point::new(200.0, 20.0));
        assert_eq!(p, Point::new(100.0, 20.0));
    }

    #[test]
    fn disabled_area_never_exits() {
        let t = Rect::new(0.0, 0.0, 100.0, 40.0);
        let c = Rect::new(150.0, 0.0, 300.0, 200.0);
        let mut g = GraceArea::new();
        assert_eq!(mv(&mut g, 50.0, 20.0, t, c), GraceAreaEvent::Idle);
        assert_eq!(mv(&mut g, 50.0, 500.0, t, c), GraceAreaEvent::Idle);
        // Enabling while outside does not invent an exit point.
        g.set_enabled(true);
        assert_eq!(mv(&mut g, 50.0, 900.0, t, c), GraceAreaEvent::Idle);
    }

    #[test]
    fn disabling_drops_session() {
        let t = Rect::new(0.0, 0.0, 100.0, 40.0);
        let c = Rect::new(150.0, 0.0, 300.0, 200.0);
        let mut g = area();
        mv(&mut g, 50.0, 20.0, t, c);
        mv(&mut g, 101.0, 20.0, t, c);
        g.set_enabled(false);
        assert!(!g.is_tracking());
        assert_eq!(mv(&mut g, 101.0, 900.0, t, c), GraceAreaEvent::Idle);
    }

    #[test]
    fn hull_of_square_and_rect() {
        let hull = safe_polygon(Point::new(0.0, 0.0), Rect::new(10.0, -5.0, 20.0, 5.0), 1.0);
        // Inner square corners facing the rect are not on the hull.
        assert_eq!(hull.len(), 6);
        assert!(point_in_convex_polygon(Point::new(5.0, 0.0), &hull));
        assert!(point_in_convex_polygon(Point::new(20.0, 5.0), &hull));
        assert!(!point_in_convex_polygon(Point::new(5.0, 4.0), &hull));
        assert!(!point_in_convex_polygon(Point::new(-2.0, 0.0), &hull));
    }

    #[test]
    fn degenerate_polygon_contains_nothing() {
        assert!(!point_in_convex_polygon(Point::ZERO, &[]));
        let line = convex_hull(&[Point::ZERO, Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
        assert!(!point_in_convex_polygon(Point::new(1.0, 1.0), &line));
    }
}
