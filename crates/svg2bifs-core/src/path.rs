//! Tagged outline representation of SVG path data.
//!
//! A [`PathData`] is a flat point list where every point carries a [`PointTag`], plus the index
//! of the first point of each contour. Quadratic control points are kept as conic controls;
//! elliptical arcs are approximated by cubic segments.

use crate::geom::{Vec2, distance_squared, vec2};

/// Squared distance under which a contour's last point counts as its start point.
const CLOSE_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointTag {
    OnCurve,
    CubicControl,
    ConicControl,
    /// On-curve point that closes its contour.
    Close,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub points: Vec<Vec2>,
    pub tags: Vec<PointTag>,
    /// Index of the first point of every contour, ascending.
    pub contours: Vec<usize>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn push(&mut self, p: Vec2, tag: PointTag) {
        self.points.push(p);
        self.tags.push(tag);
    }

    pub fn move_to(&mut self, p: Vec2) {
        self.contours.push(self.points.len());
        self.push(p, PointTag::OnCurve);
    }

    pub fn line_to(&mut self, p: Vec2) {
        self.push(p, PointTag::OnCurve);
    }

    pub fn cubic_to(&mut self, c1: Vec2, c2: Vec2, p: Vec2) {
        self.push(c1, PointTag::CubicControl);
        self.push(c2, PointTag::CubicControl);
        self.push(p, PointTag::OnCurve);
    }

    pub fn conic_to(&mut self, c: Vec2, p: Vec2) {
        self.push(c, PointTag::ConicControl);
        self.push(p, PointTag::OnCurve);
    }

    /// Closes the last contour: appends its start point unless the outline already ends there,
    /// then tags the final point as [`PointTag::Close`].
    pub fn close(&mut self) {
        let Some(&start) = self.contours.last() else {
            return;
        };
        let (Some(&first), Some(&last)) = (self.points.get(start), self.points.last()) else {
            return;
        };
        if distance_squared(first, last) > CLOSE_TOLERANCE {
            self.push(first, PointTag::OnCurve);
        }
        if let Some(tag) = self.tags.last_mut() {
            *tag = PointTag::Close;
        }
    }
}

/// Parses an SVG `d` attribute.
///
/// On a syntax error the segments parsed so far are kept and the error is returned alongside
/// them, matching how SVG renderers draw a path up to its first bad command.
pub fn parse_path_data(d: &str) -> (PathData, Option<svgtypes::Error>) {
    let mut builder = PathBuilder::default();
    for segment in svgtypes::PathParser::from(d) {
        match segment {
            Ok(segment) => builder.segment(segment),
            Err(err) => return (builder.data, Some(err)),
        }
    }
    (builder.data, None)
}

type P = (f64, f64);

fn to_vec2(p: P) -> Vec2 {
    vec2(p.0 as f32, p.1 as f32)
}

fn reflect(ctrl: Option<P>, around: P) -> P {
    match ctrl {
        Some((cx, cy)) => (2.0 * around.0 - cx, 2.0 * around.1 - cy),
        None => around,
    }
}

#[derive(Default)]
struct PathBuilder {
    data: PathData,
    current: P,
    start: P,
    open: bool,
    prev_cubic: Option<P>,
    prev_conic: Option<P>,
}

impl PathBuilder {
    fn abs(&self, abs: bool, x: f64, y: f64) -> P {
        if abs {
            (x, y)
        } else {
            (self.current.0 + x, self.current.1 + y)
        }
    }

    /// A drawing command after `Z` (or at the very start) begins a new contour at the current
    /// point.
    fn ensure_open(&mut self) {
        if !self.open {
            self.data.move_to(to_vec2(self.current));
            self.start = self.current;
            self.open = true;
        }
    }

    fn segment(&mut self, segment: svgtypes::PathSegment) {
        use svgtypes::PathSegment as S;

        let mut cubic_ctrl = None;
        let mut conic_ctrl = None;
        match segment {
            S::MoveTo { abs, x, y } => {
                let p = self.abs(abs, x, y);
                self.data.move_to(to_vec2(p));
                self.current = p;
                self.start = p;
                self.open = true;
            }
            S::LineTo { abs, x, y } => {
                let p = self.abs(abs, x, y);
                self.line(p);
            }
            S::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.current.0 + x };
                self.line((x, self.current.1));
            }
            S::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.current.1 + y };
                self.line((self.current.0, y));
            }
            S::CurveTo {
                abs,
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let c1 = self.abs(abs, x1, y1);
                let c2 = self.abs(abs, x2, y2);
                let p = self.abs(abs, x, y);
                self.cubic(c1, c2, p);
                cubic_ctrl = Some(c2);
            }
            S::SmoothCurveTo { abs, x2, y2, x, y } => {
                let c1 = reflect(self.prev_cubic, self.current);
                let c2 = self.abs(abs, x2, y2);
                let p = self.abs(abs, x, y);
                self.cubic(c1, c2, p);
                cubic_ctrl = Some(c2);
            }
            S::Quadratic { abs, x1, y1, x, y } => {
                let c = self.abs(abs, x1, y1);
                let p = self.abs(abs, x, y);
                self.conic(c, p);
                conic_ctrl = Some(c);
            }
            S::SmoothQuadratic { abs, x, y } => {
                let c = reflect(self.prev_conic, self.current);
                let p = self.abs(abs, x, y);
                self.conic(c, p);
                conic_ctrl = Some(c);
            }
            S::EllipticalArc {
                abs,
                rx,
                ry,
                x_axis_rotation,
                large_arc,
                sweep,
                x,
                y,
            } => {
                let p = self.abs(abs, x, y);
                let from = self.current;
                if from != p {
                    if rx == 0.0 || ry == 0.0 {
                        self.line(p);
                    } else {
                        for (c1, c2, end) in
                            arc_to_cubics(from, rx, ry, x_axis_rotation, large_arc, sweep, p)
                        {
                            self.cubic(c1, c2, end);
                        }
                    }
                }
            }
            S::ClosePath { .. } => {
                if self.open {
                    self.data.close();
                    self.open = false;
                }
                self.current = self.start;
            }
        }
        self.prev_cubic = cubic_ctrl;
        self.prev_conic = conic_ctrl;
    }

    fn line(&mut self, p: P) {
        self.ensure_open();
        self.data.line_to(to_vec2(p));
        self.current = p;
    }

    fn cubic(&mut self, c1: P, c2: P, p: P) {
        self.ensure_open();
        self.data.cubic_to(to_vec2(c1), to_vec2(c2), to_vec2(p));
        self.current = p;
    }

    fn conic(&mut self, c: P, p: P) {
        self.ensure_open();
        self.data.conic_to(to_vec2(c), to_vec2(p));
        self.current = p;
    }
}

/// Endpoint-parameterized elliptical arc to cubic segments of at most 90 degrees each.
fn arc_to_cubics(
    from: P,
    rx: f64,
    ry: f64,
    x_axis_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    to: P,
) -> Vec<(P, P, P)> {
    use std::f64::consts::{FRAC_PI_2, TAU};

    let (x0, y0) = from;
    let (x1, y1) = to;
    let mut rx = rx.abs();
    let mut ry = ry.abs();

    let phi = x_axis_rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let dx2 = (x0 - x1) / 2.0;
    let dy2 = (y0 - y1) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let x1p2 = x1p * x1p;
    let y1p2 = y1p * y1p;
    let lambda = x1p2 / (rx * rx) + y1p2 / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p2 - ry2 * x1p2;
    let den = rx2 * y1p2 + ry2 * x1p2;
    let coef = if den != 0.0 {
        let sign = if large_arc == sweep { -1.0 } else { 1.0 };
        sign * (num / den).max(0.0).sqrt()
    } else {
        0.0
    };
    let cxp = coef * (rx * y1p / ry);
    let cyp = coef * (-ry * x1p / rx);

    let cx = cos_phi * cxp - sin_phi * cyp + (x0 + x1) / 2.0;
    let cy = sin_phi * cxp + cos_phi * cyp + (y0 + y1) / 2.0;

    fn angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
        (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
    }

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;

    let mut theta = angle(1.0, 0.0, ux, uy);
    let mut dtheta = angle(ux, uy, vx, vy);
    if !sweep && dtheta > 0.0 {
        dtheta -= TAU;
    } else if sweep && dtheta < 0.0 {
        dtheta += TAU;
    }

    let count = (dtheta.abs() / FRAC_PI_2).ceil().max(1.0) as usize;
    let delta = dtheta / count as f64;

    let map = |x: f64, y: f64| -> P {
        let x = x * rx;
        let y = y * ry;
        (cos_phi * x - sin_phi * y + cx, sin_phi * x + cos_phi * y + cy)
    };

    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let t1 = theta;
        let t2 = theta + delta;
        let k = (4.0 / 3.0) * (delta / 4.0).tan();
        let (s1, c1) = t1.sin_cos();
        let (s2, c2) = t2.sin_cos();
        let ctrl1 = map(c1 - k * s1, s1 + k * c1);
        let ctrl2 = map(c2 + k * s2, s2 - k * c2);
        let end = if i + 1 == count { to } else { map(c2, s2) };
        out.push((ctrl1, ctrl2, end));
        theta = t2;
    }
    out
}
