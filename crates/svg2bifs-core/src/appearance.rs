//! Builds `Appearance`/`Material2D`/`XLineProperties` from an active property set.

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::props::{LineCap, LineJoin, Paint, PropertySet, Rgb};
use crate::scene::{Appearance, Material2D, XLineProperties, line_cap, line_join};

pub fn build_appearance(props: &PropertySet, diagnostics: &mut Diagnostics) -> Appearance {
    let filled = !props.fill.is_none();
    let emissive_color = if filled {
        paint_color(&props.fill, props, "fill", diagnostics)
    } else {
        Rgb::BLACK
    };

    let line_props = (!props.stroke.is_none() && props.stroke_width != 0.0).then(|| {
        XLineProperties {
            line_color: paint_color(&props.stroke, props, "stroke", diagnostics),
            width: props.stroke_width,
            transparency: 1.0 - props.stroke_opacity,
            line_cap: match props.stroke_linecap {
                LineCap::Butt => line_cap::BUTT,
                LineCap::Round => line_cap::ROUND,
                LineCap::Square => line_cap::SQUARE,
            },
            line_join: match props.stroke_linejoin {
                LineJoin::Miter => line_join::MITER,
                LineJoin::Round => line_join::ROUND,
                LineJoin::Bevel => line_join::BEVEL,
            },
            miter_limit: props.stroke_miterlimit,
        }
    });

    Appearance {
        material: Some(Material2D {
            emissive_color,
            filled,
            transparency: 1.0 - props.fill_opacity,
            line_props,
        }),
    }
}

fn paint_color(
    paint: &Paint,
    props: &PropertySet,
    property: &str,
    diagnostics: &mut Diagnostics,
) -> Rgb {
    match paint {
        Paint::Color(rgb) => *rgb,
        Paint::CurrentColor => props.color,
        Paint::Url(link) => {
            diagnostics.push(
                DiagnosticKind::UnsupportedPaint,
                format!("{property} references url(#{link}); painted black"),
            );
            Rgb::BLACK
        }
        Paint::Unsupported(raw) => {
            diagnostics.push(
                DiagnosticKind::UnsupportedPaint,
                format!("{property} value `{raw}` is not supported; painted black"),
            );
            Rgb::BLACK
        }
        Paint::None => Rgb::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material(props: &PropertySet) -> (Material2D, Diagnostics) {
        let mut diags = Diagnostics::default();
        let app = build_appearance(props, &mut diags);
        (app.material.unwrap(), diags)
    }

    #[test]
    fn defaults_fill_black_without_stroke() {
        let (mat, diags) = material(&PropertySet::default());
        assert!(mat.filled);
        assert_eq!(mat.emissive_color, Rgb::BLACK);
        assert_eq!(mat.transparency, 0.0);
        assert!(mat.line_props.is_none());
        assert!(diags.is_empty());
    }

    #[test]
    fn stroke_builds_line_properties() {
        let props = PropertySet {
            fill: Paint::None,
            stroke: Paint::Color(Rgb::new(0.0, 0.0, 1.0)),
            stroke_width: 2.0,
            stroke_opacity: 0.25,
            stroke_linecap: LineCap::Round,
            stroke_linejoin: LineJoin::Bevel,
            stroke_miterlimit: 8.0,
            ..PropertySet::default()
        };
        let (mat, _) = material(&props);
        assert!(!mat.filled);
        let lp = mat.line_props.unwrap();
        assert_eq!(lp.line_color, Rgb::new(0.0, 0.0, 1.0));
        assert_eq!(lp.width, 2.0);
        assert_eq!(lp.transparency, 0.75);
        assert_eq!(lp.line_cap, line_cap::ROUND);
        assert_eq!(lp.line_join, line_join::BEVEL);
        assert_eq!(lp.miter_limit, 8.0);
    }

    #[test]
    fn zero_stroke_width_has_no_line_properties() {
        let props = PropertySet {
            stroke: Paint::Color(Rgb::WHITE),
            stroke_width: 0.0,
            ..PropertySet::default()
        };
        assert!(material(&props).0.line_props.is_none());
    }

    #[test]
    fn current_color_uses_active_color() {
        let props = PropertySet {
            color: Rgb::new(0.0, 1.0, 0.0),
            fill: Paint::CurrentColor,
            stroke: Paint::CurrentColor,
            ..PropertySet::default()
        };
        let (mat, _) = material(&props);
        assert_eq!(mat.emissive_color, Rgb::new(0.0, 1.0, 0.0));
        assert_eq!(mat.line_props.unwrap().line_color, Rgb::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn url_paint_falls_back_to_black_with_diagnostic() {
        let props = PropertySet {
            fill: Paint::Url("g1".to_string()),
            fill_opacity: 0.5,
            ..PropertySet::default()
        };
        let (mat, diags) = material(&props);
        assert!(mat.filled);
        assert_eq!(mat.emissive_color, Rgb::BLACK);
        assert_eq!(mat.transparency, 0.5);
        assert_eq!(diags.count(DiagnosticKind::UnsupportedPaint), 1);
    }
}
