pub type Unit = euclid::UnknownUnit;

/// BIFS `SFVec2f` value.
pub type Vec2 = euclid::Point2D<f32, Unit>;
pub type Transform = euclid::Transform2D<f64, Unit, Unit>;

pub fn vec2(x: f32, y: f32) -> Vec2 {
    euclid::point2(x, y)
}

pub fn transform_from_svg(t: svgtypes::Transform) -> Transform {
    Transform::new(t.a, t.b, t.c, t.d, t.e, t.f)
}

/// Squared distance, as used by the contour-closing tolerance.
pub fn distance_squared(a: Vec2, b: Vec2) -> f32 {
    (b - a).square_length()
}
