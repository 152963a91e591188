//! Attribute value parsing.
//!
//! Presentation properties go through [`LocalProperties::assign`]; geometry attributes are kept
//! on [`LocalAttributes`]. Values that fail to parse are reported and treated as unspecified.

use svgtypes::{Length, LengthUnit};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::geom::{Transform, Vec2, transform_from_svg, vec2};
use crate::markup::ElementKind;
use crate::path::{PathData, parse_path_data};
use crate::props::{DashArray, LineIncrement, LocalProperties, Paint, PropertyAssignment, Rgb};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Everything one element specifies locally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalAttributes {
    pub properties: LocalProperties,
    pub id: Option<String>,
    pub x: Option<Length>,
    pub y: Option<Length>,
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub cx: Option<Length>,
    pub cy: Option<Length>,
    pub r: Option<Length>,
    pub rx: Option<Length>,
    pub ry: Option<Length>,
    /// Per-glyph `x` positions of a text element.
    pub text_x: Vec<f32>,
    /// Per-glyph `y` positions of a text element.
    pub text_y: Vec<f32>,
    pub transform: Option<Transform>,
    pub view_box: Option<ViewBox>,
    pub path: Option<PathData>,
    pub points: Option<Vec<Vec2>>,
}

/// Converts a length to user units (px). Relative units keep their number unchanged.
pub fn user_units(len: Length) -> f32 {
    let n = len.number;
    let v = match len.unit {
        LengthUnit::None | LengthUnit::Px => n,
        LengthUnit::In => n * 96.0,
        LengthUnit::Cm => n * 96.0 / 2.54,
        LengthUnit::Mm => n * 96.0 / 25.4,
        LengthUnit::Pt => n * 4.0 / 3.0,
        LengthUnit::Pc => n * 16.0,
        LengthUnit::Em | LengthUnit::Ex | LengthUnit::Percent => n,
    };
    v as f32
}

pub fn is_absolute(unit: LengthUnit) -> bool {
    !matches!(unit, LengthUnit::Em | LengthUnit::Ex | LengthUnit::Percent)
}

/// Splits a `font-family` value into family names, dropping quotes.
pub fn font_family_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|f| f.trim().trim_matches(|c| c == '"' || c == '\'').trim())
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Applies one attribute of an element.
pub fn apply_attribute(
    attrs: &mut LocalAttributes,
    kind: &ElementKind,
    name: &str,
    raw: &str,
    diagnostics: &mut Diagnostics,
) {
    if raw.trim().is_empty() {
        return;
    }

    match attrs.properties.assign(name, raw) {
        PropertyAssignment::Assigned => return,
        PropertyAssignment::Malformed => {
            malformed(diagnostics, name, raw);
            return;
        }
        PropertyAssignment::NotAProperty => {}
    }

    let ok = match name {
        "id" | "xml:id" => {
            attrs.id = Some(raw.trim().to_string());
            true
        }
        "x" | "y" if *kind == ElementKind::Text => {
            match parse_length_list(raw, name, diagnostics) {
                Some(list) => {
                    if name == "x" {
                        attrs.text_x = list;
                    } else {
                        attrs.text_y = list;
                    }
                    true
                }
                None => false,
            }
        }
        "x" => set_length(&mut attrs.x, raw, name, diagnostics),
        "y" => set_length(&mut attrs.y, raw, name, diagnostics),
        "width" => set_length(&mut attrs.width, raw, name, diagnostics),
        "height" => set_length(&mut attrs.height, raw, name, diagnostics),
        "cx" => set_length(&mut attrs.cx, raw, name, diagnostics),
        "cy" => set_length(&mut attrs.cy, raw, name, diagnostics),
        "r" => set_length(&mut attrs.r, raw, name, diagnostics),
        "rx" => set_length(&mut attrs.rx, raw, name, diagnostics),
        "ry" => set_length(&mut attrs.ry, raw, name, diagnostics),
        "transform" => match raw.trim().parse::<svgtypes::Transform>() {
            Ok(t) => {
                attrs.transform = Some(transform_from_svg(t));
                true
            }
            Err(_) => false,
        },
        "viewBox" => match raw.trim().parse::<svgtypes::ViewBox>() {
            Ok(vb) => {
                attrs.view_box = Some(ViewBox {
                    x: vb.x as f32,
                    y: vb.y as f32,
                    width: vb.w as f32,
                    height: vb.h as f32,
                });
                true
            }
            Err(_) => false,
        },
        "d" => {
            let (data, err) = parse_path_data(raw);
            attrs.path = Some(data);
            if let Some(err) = err {
                diagnostics.push(
                    DiagnosticKind::MalformedAttribute,
                    format!("path data truncated at error: {err}"),
                );
            }
            true
        }
        "points" => {
            let points = svgtypes::PointsParser::from(raw)
                .map(|(x, y)| vec2(x as f32, y as f32))
                .collect();
            attrs.points = Some(points);
            true
        }
        "style" => {
            apply_style(&mut attrs.properties, raw, diagnostics);
            true
        }
        _ => {
            tracing::debug!(attribute = name, element = kind.name(), "attribute ignored");
            true
        }
    };

    if !ok {
        malformed(diagnostics, name, raw);
    }
}

/// Applies the declarations of a `style` attribute.
pub fn apply_style(properties: &mut LocalProperties, style: &str, diagnostics: &mut Diagnostics) {
    for decl in style.split(';') {
        let Some((name, value)) = decl.split_once(':') else {
            continue;
        };
        let name = name.trim();
        let value = value.trim();
        if name.is_empty() || value.is_empty() {
            continue;
        }
        match properties.assign(name, value) {
            PropertyAssignment::Assigned => {}
            PropertyAssignment::Malformed => malformed(diagnostics, name, value),
            PropertyAssignment::NotAProperty => {
                tracing::debug!(property = name, "style declaration ignored");
            }
        }
    }
}

fn malformed(diagnostics: &mut Diagnostics, name: &str, raw: &str) {
    diagnostics.push(
        DiagnosticKind::MalformedAttribute,
        format!("cannot parse {name}=\"{raw}\""),
    );
}

fn check_unit(len: Length, name: &str, diagnostics: &mut Diagnostics) {
    if !is_absolute(len.unit) {
        diagnostics.push(
            DiagnosticKind::UnsupportedUnit,
            format!("relative unit on `{name}` is taken as user units"),
        );
    }
}

fn set_length(
    slot: &mut Option<Length>,
    raw: &str,
    name: &str,
    diagnostics: &mut Diagnostics,
) -> bool {
    match raw.trim().parse::<Length>() {
        Ok(len) => {
            check_unit(len, name, diagnostics);
            *slot = Some(len);
            true
        }
        Err(_) => false,
    }
}

fn parse_length_list(raw: &str, name: &str, diagnostics: &mut Diagnostics) -> Option<Vec<f32>> {
    let mut out = Vec::new();
    for len in svgtypes::LengthListParser::from(raw) {
        let len = len.ok()?;
        check_unit(len, name, diagnostics);
        out.push(user_units(len));
    }
    Some(out)
}

pub(crate) fn parse_opacity(raw: &str) -> Option<f32> {
    let len = raw.trim().parse::<Length>().ok()?;
    let v = match len.unit {
        LengthUnit::None => len.number,
        LengthUnit::Percent => len.number / 100.0,
        _ => return None,
    };
    Some(v.clamp(0.0, 1.0) as f32)
}

pub(crate) fn parse_color(raw: &str) -> Option<Rgb> {
    raw.trim().parse::<svgtypes::Color>().ok().map(Rgb::from)
}

pub(crate) fn parse_paint(raw: &str) -> Option<Paint> {
    let raw = raw.trim();
    match svgtypes::Paint::from_str(raw).ok()? {
        svgtypes::Paint::None => Some(Paint::None),
        svgtypes::Paint::Inherit => None,
        svgtypes::Paint::CurrentColor => Some(Paint::CurrentColor),
        svgtypes::Paint::Color(c) => Some(Paint::Color(Rgb::from(c))),
        svgtypes::Paint::FuncIRI(link, _) => Some(Paint::Url(link.to_string())),
        #[allow(unreachable_patterns)]
        _ => Some(Paint::Unsupported(raw.to_string())),
    }
}

pub(crate) fn parse_font_family(raw: &str) -> Option<String> {
    let families = font_family_list(raw);
    (!families.is_empty()).then(|| families.join(", "))
}

pub(crate) fn parse_absolute_length(raw: &str) -> Option<f32> {
    let len = raw.trim().parse::<Length>().ok()?;
    is_absolute(len.unit).then(|| user_units(len))
}

pub(crate) fn parse_font_size(raw: &str) -> Option<f32> {
    parse_absolute_length(raw).filter(|v| *v >= 0.0)
}

pub(crate) fn parse_length_value(raw: &str) -> Option<f32> {
    parse_absolute_length(raw)
}

pub(crate) fn parse_miter_limit(raw: &str) -> Option<f32> {
    let len = raw.trim().parse::<Length>().ok()?;
    (len.unit == LengthUnit::None && len.number >= 1.0).then_some(len.number as f32)
}

pub(crate) fn parse_line_increment(raw: &str) -> Option<LineIncrement> {
    if raw.trim() == "auto" {
        return Some(LineIncrement::Auto);
    }
    let len = raw.trim().parse::<Length>().ok()?;
    (len.unit == LengthUnit::None).then_some(LineIncrement::Value(len.number as f32))
}

pub(crate) fn parse_dash_array(raw: &str) -> Option<DashArray> {
    if raw.trim() == "none" {
        return Some(DashArray::None);
    }
    let mut out = Vec::new();
    for len in svgtypes::LengthListParser::from(raw) {
        let len = len.ok()?;
        if !is_absolute(len.unit) || len.number < 0.0 {
            return None;
        }
        out.push(user_units(len));
    }
    if out.is_empty() {
        return Some(DashArray::None);
    }
    Some(DashArray::Lengths(out))
}
