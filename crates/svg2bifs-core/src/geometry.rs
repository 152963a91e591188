//! Translation of tagged outlines into `XCurve2D` point/type arrays.

use crate::geom::Vec2;
use crate::path::{PathData, PointTag};

/// `XCurve2D.type` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CurveType {
    MoveTo = 0,
    LineTo = 1,
    CubicTo = 2,
    Close = 6,
    QuadraticTo = 7,
}

impl CurveType {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
    pub points: Vec<Vec2>,
    pub types: Vec<i32>,
}

/// Remaps a tagged outline into `XCurve2D` coordinates and segment types.
///
/// Every contour start yields `MoveTo`, and the first point always counts as one. Other on-curve
/// points yield `LineTo`. A cubic control yields `CubicTo` and takes its two followers as the rest
/// of the segment; a conic control yields `QuadraticTo` and takes one follower. A closing point
/// yields `Close`, also when it ends a curve segment. Closing points carry no coordinate unless
/// they are the final point of the outline.
pub fn translate_path(path: &PathData) -> Curve {
    let n = path.points.len().min(path.tags.len());
    let is_start = |i: usize| i == 0 || path.contours.binary_search(&i).is_ok();

    let mut points = Vec::with_capacity(n);
    let mut types = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if is_start(i) {
            points.push(path.points[i]);
            types.push(CurveType::MoveTo.code());
            i += 1;
            continue;
        }
        let (code, len) = match path.tags[i] {
            PointTag::OnCurve => (CurveType::LineTo, 1),
            PointTag::CubicControl => (CurveType::CubicTo, 3),
            PointTag::ConicControl => (CurveType::QuadraticTo, 2),
            PointTag::Close => {
                if i + 1 == n {
                    points.push(path.points[i]);
                }
                types.push(CurveType::Close.code());
                i += 1;
                continue;
            }
        };
        let end = (i + len).min(n);
        points.extend_from_slice(&path.points[i..end]);
        types.push(code.code());
        if len > 1 && path.tags[end - 1] == PointTag::Close {
            types.push(CurveType::Close.code());
        }
        i = end;
    }

    Curve { points, types }
}

/// Polyline points map 1:1 onto `IndexedFaceSet2D` coordinates.
pub fn translate_polyline(points: &[Vec2]) -> Vec<Vec2> {
    points.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::vec2;
    use crate::path::parse_path_data;

    #[test]
    fn empty_outline_gives_empty_curve() {
        let curve = translate_path(&PathData::new());
        assert!(curve.points.is_empty());
        assert!(curve.types.is_empty());
    }

    #[test]
    fn single_point_is_a_move() {
        let mut path = PathData::new();
        path.move_to(vec2(1.0, 2.0));
        let curve = translate_path(&path);
        assert_eq!(curve.points, vec![vec2(1.0, 2.0)]);
        assert_eq!(curve.types, vec![0]);
    }

    #[test]
    fn closed_polygon_keeps_final_close_point() {
        // Three on-curve points plus the closing point back at the start. The closing point is
        // the last one, so it keeps its coordinate.
        let (path, _) = parse_path_data("M0 0 L10 0 L10 10 Z");
        let curve = translate_path(&path);
        assert_eq!(
            curve.points,
            vec![
                vec2(0.0, 0.0),
                vec2(10.0, 0.0),
                vec2(10.0, 10.0),
                vec2(0.0, 0.0)
            ]
        );
        assert_eq!(curve.types, vec![0, 1, 1, 6]);
        assert_eq!(curve.types.iter().filter(|t| **t == 0).count(), 1);
    }

    #[test]
    fn every_contour_start_is_a_move() {
        let (path, _) = parse_path_data("M0 0 L10 0 L10 10 Z M20 20 L30 20");
        assert_eq!(path.len(), 6);
        let curve = translate_path(&path);
        assert_eq!(
            curve.points,
            vec![
                vec2(0.0, 0.0),
                vec2(10.0, 0.0),
                vec2(10.0, 10.0),
                vec2(20.0, 20.0),
                vec2(30.0, 20.0)
            ]
        );
        assert_eq!(curve.types, vec![0, 1, 1, 6, 0, 1]);
    }

    #[test]
    fn curve_first_path_starts_with_a_move() {
        let (path, _) = parse_path_data("M0 0 C1 1 2 1 3 0 L5 5");
        let curve = translate_path(&path);
        assert_eq!(curve.points.len(), path.len());
        assert_eq!(curve.types, vec![0, 2, 1]);
    }

    #[test]
    fn controls_consume_their_followers() {
        let (path, _) = parse_path_data("M0 0 C1 1 2 1 3 0 Q4 4 5 0 L6 0");
        let curve = translate_path(&path);
        assert_eq!(curve.points.len(), path.len());
        assert_eq!(curve.types, vec![0, 2, 7, 1]);
    }

    #[test]
    fn close_ending_a_curve_keeps_the_curve_end_point() {
        let (path, _) = parse_path_data("M0 0 C1 1 2 1 0 0 Z M5 5 L6 6");
        assert_eq!(path.tags[3], PointTag::Close);
        let curve = translate_path(&path);
        assert_eq!(curve.points.len(), path.len());
        assert_eq!(curve.points[3], vec2(0.0, 0.0));
        assert_eq!(curve.types, vec![0, 2, 6, 0, 1]);
    }

    #[test]
    fn polyline_is_copied() {
        let pts = vec![vec2(0.0, 0.0), vec2(5.0, 5.0), vec2(10.0, 0.0)];
        assert_eq!(translate_polyline(&pts), pts);
        assert!(translate_polyline(&[]).is_empty());
    }
}
