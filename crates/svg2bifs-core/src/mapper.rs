//! Element-to-node mapping: decides which target nodes an opened element produces.

use svgtypes::{Length, LengthUnit};

use crate::ConvertOptions;
use crate::appearance::build_appearance;
use crate::attr::{LocalAttributes, font_family_list, user_units};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::geom::{Transform, vec2};
use crate::geometry::{translate_path, translate_polyline};
use crate::markup::ElementKind;
use crate::props::PropertySet;
use crate::scene::{
    Background2D, Circle, Coordinate2D, Ellipse, Geometry, IndexedFaceSet2D, NodeId, NodeKind,
    Rectangle, SceneGraph, Shape, Switch, Text, Transform2D, TransformMatrix2D, Viewport,
    XCurve2D, XFontStyle,
};

/// Result of mapping one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Mapped {
    /// First node attached under the cursor; becomes the new cursor.
    pub entry: NodeId,
    /// Shape whose `Text` geometry receives the element's character data.
    pub text: Option<NodeId>,
}

pub(crate) fn matrix_from(t: &Transform) -> TransformMatrix2D {
    TransformMatrix2D {
        mxx: t.m11 as f32,
        mxy: t.m21 as f32,
        tx: t.m31 as f32,
        myx: t.m12 as f32,
        myy: t.m22 as f32,
        ty: t.m32 as f32,
    }
}

fn plain_dimension(len: Option<Length>) -> Option<u32> {
    let len = len?;
    let plain = matches!(len.unit, LengthUnit::None | LengthUnit::Px);
    (plain && len.number >= 0.0).then_some(len.number as u32)
}

/// Builds the fixed scene prologue for the root `svg` element and returns the flip transform
/// that becomes the cursor.
pub(crate) fn map_root(
    scene: &mut SceneGraph,
    attrs: &LocalAttributes,
    options: &ConvertOptions,
) -> NodeId {
    scene.use_pixel_metrics = true;
    scene.width = plain_dimension(attrs.width).unwrap_or(options.default_width);
    scene.height = plain_dimension(attrs.height).unwrap_or(options.default_height);

    let root = scene.create_root(NodeKind::OrderedGroup);

    let viewport = match attrs.view_box {
        Some(vb) => Viewport {
            position: vec2(vb.x + vb.width / 2.0, -(vb.y + vb.height / 2.0)),
            size: vec2(vb.width, vb.height),
        },
        None => {
            let (w, h) = (scene.width as f32, scene.height as f32);
            Viewport {
                position: vec2(w / 2.0, -h / 2.0),
                size: vec2(w, h),
            }
        }
    };
    scene.append_child(root, NodeKind::Viewport(viewport));
    scene.append_child(
        root,
        NodeKind::Background2D(Background2D {
            back_color: options.background,
        }),
    );
    scene.append_child(
        root,
        NodeKind::Transform2D(Transform2D {
            scale: vec2(1.0, -1.0),
            ..Transform2D::default()
        }),
    )
}

pub(crate) struct Mapper<'a> {
    pub scene: &'a mut SceneGraph,
    pub props: &'a PropertySet,
    pub attrs: &'a LocalAttributes,
    pub diagnostics: &'a mut Diagnostics,
    parent: NodeId,
    entry: Option<NodeId>,
}

impl<'a> Mapper<'a> {
    pub fn new(
        scene: &'a mut SceneGraph,
        props: &'a PropertySet,
        attrs: &'a LocalAttributes,
        diagnostics: &'a mut Diagnostics,
        cursor: NodeId,
    ) -> Self {
        Self {
            scene,
            props,
            attrs,
            diagnostics,
            parent: cursor,
            entry: None,
        }
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = self.scene.append_child(self.parent, kind);
        self.entry.get_or_insert(id);
        self.parent = id;
        id
    }

    fn transform_prelude(&mut self) {
        if let Some(t) = &self.attrs.transform {
            let matrix = matrix_from(t);
            self.push(NodeKind::TransformMatrix2D(matrix));
        }
    }

    fn offset(&mut self, x: Option<f32>, y: Option<f32>) {
        if x.is_none() && y.is_none() {
            return;
        }
        let mut tr = Transform2D::default();
        if let Some(x) = x {
            tr.translation.x = x;
        }
        if let Some(y) = y {
            tr.translation.y = y;
        }
        self.push(NodeKind::Transform2D(tr));
    }

    fn shape(&mut self, geometry: Geometry) -> NodeId {
        let appearance = build_appearance(self.props, self.diagnostics);
        self.push(NodeKind::Shape(Shape {
            geometry: Some(geometry),
            appearance: Some(appearance),
        }))
    }

    fn required(&mut self, element: &str, name: &str, len: Option<Length>) -> f32 {
        match len {
            Some(len) => user_units(len),
            None => {
                self.diagnostics.push(
                    DiagnosticKind::MissingGeometry,
                    format!("<{element}> has no `{name}`; using 0"),
                );
                0.0
            }
        }
    }

    pub fn map(mut self, kind: &ElementKind) -> Mapped {
        let attrs = self.attrs;
        let mut text = None;
        match kind {
            ElementKind::Group => match &attrs.transform {
                Some(t) => {
                    self.push(NodeKind::TransformMatrix2D(matrix_from(t)));
                }
                None => {
                    self.push(NodeKind::Group);
                }
            },
            ElementKind::Rect => {
                self.transform_prelude();
                let width = attrs.width.map(user_units);
                let height = attrs.height.map(user_units);
                let x = attrs
                    .x
                    .map(|x| user_units(x) + width.unwrap_or(0.0) / 2.0);
                let y = attrs
                    .y
                    .map(|y| user_units(y) + height.unwrap_or(0.0) / 2.0);
                self.offset(x, y);
                let w = self.required("rect", "width", attrs.width);
                let h = self.required("rect", "height", attrs.height);
                self.shape(Geometry::Rectangle(Rectangle { size: vec2(w, h) }));
            }
            ElementKind::Path => {
                self.transform_prelude();
                self.offset(attrs.x.map(user_units), attrs.y.map(user_units));
                let curve = match &attrs.path {
                    Some(path) => {
                        let curve = translate_path(path);
                        XCurve2D {
                            point: Some(Coordinate2D {
                                point: curve.points,
                            }),
                            types: curve.types,
                        }
                    }
                    None => {
                        self.diagnostics.push(
                            DiagnosticKind::MissingGeometry,
                            "<path> has no `d`; empty curve",
                        );
                        XCurve2D::default()
                    }
                };
                self.shape(Geometry::XCurve2D(curve));
            }
            ElementKind::Polyline => {
                self.transform_prelude();
                let coord = match &attrs.points {
                    Some(points) => Some(Coordinate2D {
                        point: translate_polyline(points),
                    }),
                    None => {
                        self.diagnostics.push(
                            DiagnosticKind::MissingGeometry,
                            "<polyline> has no `points`; empty point set",
                        );
                        None
                    }
                };
                self.shape(Geometry::IndexedFaceSet2D(IndexedFaceSet2D { coord }));
            }
            ElementKind::Text => {
                self.transform_prelude();
                self.push(NodeKind::Transform2D(Transform2D {
                    translation: vec2(
                        attrs.text_x.first().copied().unwrap_or(0.0),
                        attrs.text_y.first().copied().unwrap_or(0.0),
                    ),
                    scale: vec2(1.0, -1.0),
                }));
                let font_style = XFontStyle {
                    family: font_family_list(&self.props.font_family),
                    size: self.props.font_size,
                };
                text = Some(self.shape(Geometry::Text(Text {
                    string: Vec::new(),
                    font_style: Some(font_style),
                })));
            }
            ElementKind::Ellipse => {
                self.transform_prelude();
                self.offset(attrs.cx.map(user_units), attrs.cy.map(user_units));
                let rx = self.required("ellipse", "rx", attrs.rx);
                let ry = self.required("ellipse", "ry", attrs.ry);
                self.shape(Geometry::Ellipse(Ellipse {
                    radius: vec2(rx, ry),
                }));
            }
            ElementKind::Circle => {
                self.transform_prelude();
                self.offset(attrs.cx.map(user_units), attrs.cy.map(user_units));
                let radius = self.required("circle", "r", attrs.r);
                self.shape(Geometry::Circle(Circle { radius }));
            }
            ElementKind::Defs => {
                self.push(NodeKind::Switch(Switch::default()));
            }
            ElementKind::SolidColor => {
                self.push(NodeKind::Shape(Shape::default()));
            }
            ElementKind::Svg | ElementKind::Unsupported(_) => {
                self.diagnostics.push(
                    DiagnosticKind::UnsupportedElement,
                    format!("<{}> is not supported; placeholder Transform2D", kind.name()),
                );
                self.push(NodeKind::Transform2D(Transform2D::default()));
            }
        }

        // Every branch above attaches at least one node.
        let entry = self.entry.unwrap_or(self.parent);
        Mapped { entry, text }
    }
}
