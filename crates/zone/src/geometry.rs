//! Segment classification, self-intersection and hit testing.
//!
//! All predicates are exact comparisons on the input coordinates. There is no
//! epsilon: a vertex lying exactly on another edge is reported as touching,
//! which is what an editor user expects when two vertices are snapped
//! together by hand.

use crate::coords::CanvasSize;
use glam::Vec2;
use std::cmp::Ordering;
use strum_macros::Display;

/// How a segment sits relative to an infinite line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum LineRelation {
    /// Both endpoints strictly on the same side.
    Disjoint,
    /// Endpoints strictly on opposite sides.
    Crossing,
    /// Both endpoints on the line.
    Collinear,
    /// Exactly one endpoint on the line.
    Touching,
}

/// How two segments relate to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SegmentRelation {
    Disjoint,
    /// Proper intersection through both interiors.
    Crossing,
    /// Collinear with a shared stretch of positive length.
    Overlapping,
    /// Meet in exactly one point without passing through each other.
    Touching,
}

/// Classify segment `q1`–`q2` against the infinite line through `p1` and `p2`.
pub fn classify_line_vs_segment(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> LineRelation {
    let direction = p2 - p1;
    let c1 = direction.perp_dot(q1 - p1);
    let c2 = direction.perp_dot(q2 - p1);

    if (c1 < 0.0 && c2 > 0.0) || (c1 > 0.0 && c2 < 0.0) {
        LineRelation::Crossing
    } else if c1 == 0.0 && c2 == 0.0 {
        LineRelation::Collinear
    } else if c1 == 0.0 || c2 == 0.0 {
        LineRelation::Touching
    } else {
        LineRelation::Disjoint
    }
}

/// Classify segment `p1`–`p2` against segment `q1`–`q2`.
pub fn classify_segment_vs_segment(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> SegmentRelation {
    let forward = classify_line_vs_segment(p1, p2, q1, q2);
    let backward = classify_line_vs_segment(q1, q2, p1, p2);

    match (forward, backward) {
        (LineRelation::Disjoint, _) | (_, LineRelation::Disjoint) => SegmentRelation::Disjoint,
        (LineRelation::Crossing, LineRelation::Crossing) => SegmentRelation::Crossing,
        (LineRelation::Touching, _) | (_, LineRelation::Touching) => SegmentRelation::Touching,
        _ => classify_collinear(p1, p2, q1, q2),
    }
}

/// Both segments lie on one line: compare the span of all four points with
/// the summed segment lengths, measured along x unless the line is vertical.
fn classify_collinear(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> SegmentRelation {
    let mut points = [p1, p2, q1, q2];
    points.sort_by(|a, b| match a.x.total_cmp(&b.x) {
        Ordering::Equal => a.y.total_cmp(&b.y),
        ordering => ordering,
    });

    let span = axis_extent(points[0], points[3]);
    let lengths = axis_extent(p1, p2).abs() + axis_extent(q1, q2).abs();

    if span > lengths {
        SegmentRelation::Disjoint
    } else if span < lengths {
        SegmentRelation::Overlapping
    } else {
        SegmentRelation::Touching
    }
}

fn axis_extent(from: Vec2, to: Vec2) -> f32 {
    let dx = to.x - from.x;
    if dx != 0.0 {
        dx
    } else {
        to.y - from.y
    }
}

/// Whether the chain through `points` crosses or folds onto itself.
///
/// Closed chains include the wrap edge from the last point back to the first.
/// Edges sharing a vertex are only allowed to touch at it; any other pair of
/// edges must not cross.
pub fn is_self_intersecting(points: &[Vec2], closed: bool) -> bool {
    let n = points.len();
    if n < 2 {
        return false;
    }
    let edge_count = if closed { n } else { n - 1 };
    let edge = |i: usize| (points[i], points[(i + 1) % n]);

    for i in 0..edge_count {
        let (p1, p2) = edge(i);
        for j in (i + 1)..edge_count {
            let (q1, q2) = edge(j);
            let adjacent = j == i + 1 || (closed && i == 0 && j == n - 1);
            let relation = classify_segment_vs_segment(p1, p2, q1, q2);
            let invalid = if adjacent {
                relation == SegmentRelation::Overlapping
            } else {
                relation == SegmentRelation::Crossing
            };
            if invalid {
                return true;
            }
        }
    }

    false
}

/// Whether `point` lies outside `[0, width] x [0, height]`.
pub fn is_out_of_bounds(point: impl Into<Vec2>, size: CanvasSize) -> bool {
    let p = point.into();
    !(0.0 <= p.x && p.x <= size.width() && 0.0 <= p.y && p.y <= size.height())
}

/// Whether `(x, y)` is within `radius` of `point`.
pub fn point_hit_test(point: impl Into<Vec2>, x: f32, y: f32, radius: f32) -> bool {
    point.into().distance_squared(Vec2::new(x, y)) <= radius * radius
}

/// Even-odd containment in the polygon traced by `points`, implicitly closed.
pub fn polygon_contains(points: &[Vec2], point: Vec2) -> bool {
    if points.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let vi = points[i];
        let vj = points[j];
        if (vi.y > point.y) != (vj.y > point.y)
            && point.x < (vj.x - vi.x) * (point.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Whether `(x, y)` selects the zone traced by `points`: inside its area or
/// on one of its vertices.
pub fn polygon_hit_test(points: &[Vec2], x: f32, y: f32, radius: f32) -> bool {
    points.iter().any(|p| point_hit_test(*p, x, y, radius))
        || polygon_contains(points, Vec2::new(x, y))
}

/// Whether `(x, y)` falls inside a butt-capped stroke of width `tolerance`
/// along `p1`–`p2`.
///
/// `tolerance` is a stroke width, not a distance: a hit lies within
/// `tolerance / 2` of the segment.
pub fn edge_hit_test(p1: impl Into<Vec2>, p2: impl Into<Vec2>, x: f32, y: f32, tolerance: f32) -> bool {
    let (p1, p2) = (p1.into(), p2.into());
    let point = Vec2::new(x, y);
    let segment = p2 - p1;
    let length_sq = segment.length_squared();
    if length_sq == 0.0 {
        return false;
    }

    let t = (point - p1).dot(segment) / length_sq;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }

    let half_width = tolerance / 2.0;
    (p1 + segment * t).distance_squared(point) <= half_width * half_width
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn line_vs_segment_cases() {
        let (p1, p2) = (v(0.0, 0.0), v(10.0, 0.0));
        assert_eq!(
            classify_line_vs_segment(p1, p2, v(5.0, -5.0), v(5.0, 5.0)),
            LineRelation::Crossing
        );
        assert_eq!(
            classify_line_vs_segment(p1, p2, v(20.0, 0.0), v(30.0, 0.0)),
            LineRelation::Collinear
        );
        assert_eq!(
            classify_line_vs_segment(p1, p2, v(5.0, 0.0), v(5.0, 5.0)),
            LineRelation::Touching
        );
        assert_eq!(
            classify_line_vs_segment(p1, p2, v(5.0, 1.0), v(5.0, 5.0)),
            LineRelation::Disjoint
        );
    }

    #[test]
    fn segments_sharing_an_endpoint_touch() {
        let relation =
            classify_segment_vs_segment(v(0.0, 0.0), v(10.0, 0.0), v(10.0, 0.0), v(10.0, 10.0));
        assert_eq!(relation, SegmentRelation::Touching);
    }

    #[test]
    fn separated_collinear_segments_are_disjoint() {
        let relation =
            classify_segment_vs_segment(v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0), v(30.0, 0.0));
        assert_eq!(relation, SegmentRelation::Disjoint);
    }

    #[test]
    fn parallel_offset_segments_are_disjoint() {
        let relation =
            classify_segment_vs_segment(v(0.0, 0.0), v(10.0, 0.0), v(0.0, 5.0), v(10.0, 5.0));
        assert_eq!(relation, SegmentRelation::Disjoint);
    }

    #[test]
    fn collinear_overlap_is_detected() {
        let relation =
            classify_segment_vs_segment(v(0.0, 0.0), v(10.0, 0.0), v(5.0, 0.0), v(15.0, 0.0));
        assert_eq!(relation, SegmentRelation::Overlapping);
    }

    #[test]
    fn collinear_end_to_end_touches() {
        // Reversed direction on the second segment still measures by length.
        let relation =
            classify_segment_vs_segment(v(0.0, 0.0), v(10.0, 0.0), v(20.0, 0.0), v(10.0, 0.0));
        assert_eq!(relation, SegmentRelation::Touching);
    }

    #[test]
    fn vertical_collinear_overlap_uses_y_axis() {
        let relation =
            classify_segment_vs_segment(v(0.0, 0.0), v(0.0, 10.0), v(0.0, 5.0), v(0.0, 20.0));
        assert_eq!(relation, SegmentRelation::Overlapping);
    }

    #[test]
    fn proper_crossing() {
        let relation =
            classify_segment_vs_segment(v(0.0, 0.0), v(10.0, 10.0), v(0.0, 10.0), v(10.0, 0.0));
        assert_eq!(relation, SegmentRelation::Crossing);
    }

    #[test]
    fn relations_display_in_snake_case() {
        assert_eq!(SegmentRelation::Overlapping.to_string(), "overlapping");
        assert_eq!(LineRelation::Collinear.to_string(), "collinear");
    }

    #[test]
    fn convex_polygons_are_simple() {
        let square = [v(10.0, 10.0), v(110.0, 10.0), v(110.0, 110.0), v(10.0, 110.0)];
        assert!(!is_self_intersecting(&square, true));

        let triangle = [v(0.0, 0.0), v(50.0, 0.0), v(25.0, 40.0)];
        assert!(!is_self_intersecting(&triangle, true));

        let hexagon: Vec<Vec2> = (0..6)
            .map(|i| {
                let angle = i as f32 * std::f32::consts::TAU / 6.0;
                v(100.0 + 50.0 * angle.cos(), 100.0 + 50.0 * angle.sin())
            })
            .collect();
        assert!(!is_self_intersecting(&hexagon, true));
    }

    #[test]
    fn collinear_vertex_on_convex_edge_is_allowed() {
        let square = [v(0.0, 0.0), v(50.0, 0.0), v(100.0, 0.0), v(100.0, 100.0), v(0.0, 100.0)];
        assert!(!is_self_intersecting(&square, true));
    }

    #[test]
    fn bowtie_is_self_intersecting() {
        let bowtie = [v(0.0, 0.0), v(10.0, 10.0), v(10.0, 0.0), v(0.0, 10.0)];
        assert!(is_self_intersecting(&bowtie, true));
    }

    #[test]
    fn folded_back_edge_overlaps() {
        // The third vertex doubles back along the second edge.
        let folded = [v(0.0, 0.0), v(10.0, 0.0), v(10.0, 10.0), v(10.0, 5.0)];
        assert!(is_self_intersecting(&folded, true));
    }

    #[test]
    fn two_point_closed_zone_overlaps_itself() {
        assert!(is_self_intersecting(&[v(0.0, 0.0), v(10.0, 0.0)], true));
        assert!(!is_self_intersecting(&[v(0.0, 0.0), v(10.0, 0.0)], false));
        assert!(!is_self_intersecting(&[v(0.0, 0.0)], true));
    }

    #[test]
    fn open_chain_ignores_wrap_edge() {
        // Closing this chain would cross its second edge.
        let zigzag = [v(0.0, 0.0), v(10.0, 0.0), v(0.0, 10.0), v(10.0, 10.0)];
        assert!(is_self_intersecting(&zigzag, true));
        assert!(!is_self_intersecting(&zigzag, false));
    }

    #[test]
    fn bounds_are_inclusive() {
        let size = CanvasSize::new(100.0, 100.0);
        assert!(!is_out_of_bounds(v(0.0, 100.0), size));
        assert!(is_out_of_bounds(v(-0.5, 50.0), size));
        assert!(is_out_of_bounds(v(50.0, 100.5), size));
    }

    #[test]
    fn point_hit_radius() {
        let p = v(20.0, 20.0);
        assert!(point_hit_test(p, 20.0, 20.0, 5.0));
        assert!(point_hit_test(p, 25.0, 20.0, 5.0));
        assert!(!point_hit_test(p, 26.0, 20.0, 5.0));
    }

    #[test]
    fn polygon_hit_inside_and_on_vertex() {
        let square = [v(10.0, 10.0), v(110.0, 10.0), v(110.0, 110.0), v(10.0, 110.0)];
        assert!(polygon_hit_test(&square, 60.0, 60.0, 5.0));
        assert!(polygon_hit_test(&square, 7.0, 7.0, 5.0));
        assert!(!polygon_hit_test(&square, 200.0, 60.0, 5.0));
    }

    #[test]
    fn polygon_hit_is_even_odd() {
        // Pentagram: the central pentagon is covered twice, so even-odd leaves it empty.
        let star: Vec<Vec2> = (0..5)
            .map(|i| {
                let angle = (i * 2) as f32 * std::f32::consts::TAU / 5.0;
                v(100.0 + 80.0 * angle.sin(), 100.0 - 80.0 * angle.cos())
            })
            .collect();
        assert!(!polygon_contains(&star, v(100.0, 100.0)));
        assert!(polygon_contains(&star, v(100.0, 35.0)));
    }

    #[test]
    fn degenerate_polygons_have_no_area() {
        assert!(!polygon_contains(&[v(0.0, 0.0), v(10.0, 10.0)], v(5.0, 5.0)));
        assert!(polygon_hit_test(&[v(0.0, 0.0), v(10.0, 10.0)], 10.0, 12.0, 5.0));
    }

    #[test]
    fn edge_hit_within_half_stroke() {
        let (a, b) = (v(10.0, 10.0), v(110.0, 10.0));
        assert!(edge_hit_test(a, b, 60.0, 10.0, 5.0));
        assert!(edge_hit_test(a, b, 60.0, 12.5, 5.0));
        assert!(!edge_hit_test(a, b, 60.0, 13.0, 5.0));
        // A full tolerance away is outside the stroke.
        assert!(!edge_hit_test(a, b, 60.0, 15.0, 5.0));
        // Butt caps: nothing past the endpoints.
        assert!(!edge_hit_test(a, b, 111.0, 10.0, 5.0));
        assert!(!edge_hit_test(a, a, 10.0, 10.0, 5.0));
    }
}
