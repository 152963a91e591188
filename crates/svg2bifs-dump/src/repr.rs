//! Neutral node/field tree shared by the serializers.

use serde::Serialize;
use serde::ser::SerializeMap;
use svg2bifs_core::geom::Vec2;
use svg2bifs_core::props::Rgb;
use svg2bifs_core::scene::{
    Appearance, Circle, Coordinate2D, Ellipse, Geometry, Material2D, NodeId, NodeKind, Rectangle,
    SceneGraph, Shape, Text, Transform2D, TransformMatrix2D, Viewport, XFontStyle,
    XLineProperties,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Color([f32; 3]),
    Ints(Vec<i32>),
    Vec2s(Vec<[f32; 2]>),
    Strings(Vec<String>),
    Node(Box<NodeRepr>),
    Nodes(Vec<NodeRepr>),
}

impl FieldValue {
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_) | Self::Nodes(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRepr {
    pub name: &'static str,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefRepr {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeRepr {
    pub node: &'static str,
    pub def: Option<DefRepr>,
    /// Non-default fields in declaration order.
    pub fields: Vec<FieldRepr>,
}

impl NodeRepr {
    fn new(node: &'static str, fields: Fields) -> Self {
        Self {
            node,
            def: None,
            fields: fields.0,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }
}

impl Serialize for NodeRepr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("node", self.node)?;
        if let Some(def) = &self.def {
            map.serialize_entry("def", def)?;
        }
        for field in &self.fields {
            map.serialize_entry(field.name, &field.value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneRepr {
    pub pixel_metric: bool,
    pub width: u32,
    pub height: u32,
    pub scene: Option<NodeRepr>,
    /// Nodes attached under non-grouping nodes; they have no field to live in.
    #[serde(skip)]
    pub dropped: usize,
}

#[derive(Default)]
struct Fields(Vec<FieldRepr>);

impl Fields {
    fn push(&mut self, name: &'static str, value: FieldValue) {
        self.0.push(FieldRepr { name, value });
    }

    fn boolean(&mut self, name: &'static str, v: bool, default: bool) {
        if v != default {
            self.push(name, FieldValue::Bool(v));
        }
    }

    fn int(&mut self, name: &'static str, v: i32, default: i32) {
        if v != default {
            self.push(name, FieldValue::Int(v));
        }
    }

    fn float(&mut self, name: &'static str, v: f32, default: f32) {
        if v != default {
            self.push(name, FieldValue::Float(v));
        }
    }

    fn vec2(&mut self, name: &'static str, v: Vec2, default: Vec2) {
        if v != default {
            self.push(name, FieldValue::Vec2([v.x, v.y]));
        }
    }

    fn color(&mut self, name: &'static str, v: Rgb, default: Rgb) {
        if v != default {
            self.push(name, FieldValue::Color([v.red, v.green, v.blue]));
        }
    }

    fn ints(&mut self, name: &'static str, v: &[i32]) {
        if !v.is_empty() {
            self.push(name, FieldValue::Ints(v.to_vec()));
        }
    }

    fn vec2s(&mut self, name: &'static str, v: &[Vec2]) {
        if !v.is_empty() {
            self.push(
                name,
                FieldValue::Vec2s(v.iter().map(|p| [p.x, p.y]).collect()),
            );
        }
    }

    fn strings(&mut self, name: &'static str, v: &[String], default: &[String]) {
        if v != default {
            self.push(name, FieldValue::Strings(v.to_vec()));
        }
    }

    fn node(&mut self, name: &'static str, v: Option<NodeRepr>) {
        if let Some(v) = v {
            self.push(name, FieldValue::Node(Box::new(v)));
        }
    }

    fn nodes(&mut self, name: &'static str, v: Vec<NodeRepr>) {
        if !v.is_empty() {
            self.push(name, FieldValue::Nodes(v));
        }
    }
}

pub fn lower(scene: &SceneGraph) -> SceneRepr {
    let mut lowering = Lowering { scene, dropped: 0 };
    let root = scene.root().map(|root| lowering.node(root));
    SceneRepr {
        pixel_metric: scene.use_pixel_metrics,
        width: scene.width,
        height: scene.height,
        scene: root,
        dropped: lowering.dropped,
    }
}

struct Lowering<'a> {
    scene: &'a SceneGraph,
    dropped: usize,
}

fn subtree_len(scene: &SceneGraph, id: NodeId) -> usize {
    1 + scene
        .children(id)
        .iter()
        .map(|c| subtree_len(scene, *c))
        .sum::<usize>()
}

impl Lowering<'_> {
    fn children(&mut self, id: NodeId) -> Vec<NodeRepr> {
        let scene = self.scene;
        scene.children(id).iter().map(|c| self.node(*c)).collect()
    }

    fn node(&mut self, id: NodeId) -> NodeRepr {
        let scene = self.scene;
        let Some(node) = scene.node(id) else {
            return NodeRepr::new("Group", Fields::default());
        };
        let mut f = Fields::default();
        match &node.kind {
            NodeKind::OrderedGroup | NodeKind::Group => {
                f.nodes("children", self.children(id));
            }
            NodeKind::Transform2D(t) => {
                let d = Transform2D::default();
                f.vec2("translation", t.translation, d.translation);
                f.vec2("scale", t.scale, d.scale);
                f.nodes("children", self.children(id));
            }
            NodeKind::TransformMatrix2D(m) => {
                let d = TransformMatrix2D::default();
                f.float("mxx", m.mxx, d.mxx);
                f.float("mxy", m.mxy, d.mxy);
                f.float("tx", m.tx, d.tx);
                f.float("myx", m.myx, d.myx);
                f.float("myy", m.myy, d.myy);
                f.float("ty", m.ty, d.ty);
                f.nodes("children", self.children(id));
            }
            NodeKind::Switch(s) => {
                f.int("whichChoice", s.which_choice, -1);
                f.nodes("choice", self.children(id));
            }
            NodeKind::Viewport(v) => {
                let d = Viewport::default();
                f.vec2("position", v.position, d.position);
                f.vec2("size", v.size, d.size);
            }
            NodeKind::Background2D(b) => {
                f.color("backColor", b.back_color, Rgb::BLACK);
            }
            NodeKind::Shape(shape) => lower_shape(&mut f, shape),
        }
        if !node.kind.is_grouping() {
            let lost: usize = scene
                .children(id)
                .iter()
                .map(|c| subtree_len(scene, *c))
                .sum();
            self.dropped += lost;
        }
        let mut repr = NodeRepr::new(node.kind.name(), f);
        repr.def = node.def.as_ref().map(|d| DefRepr {
            id: d.id,
            name: d.name.clone(),
        });
        repr
    }
}

fn lower_shape(f: &mut Fields, shape: &Shape) {
    f.node("appearance", shape.appearance.as_ref().map(lower_appearance));
    f.node("geometry", shape.geometry.as_ref().map(lower_geometry));
}

fn lower_appearance(app: &Appearance) -> NodeRepr {
    let mut f = Fields::default();
    f.node("material", app.material.as_ref().map(lower_material));
    NodeRepr::new("Appearance", f)
}

fn lower_material(m: &Material2D) -> NodeRepr {
    let d = Material2D::default();
    let mut f = Fields::default();
    f.color("emissiveColor", m.emissive_color, d.emissive_color);
    f.boolean("filled", m.filled, d.filled);
    f.node("lineProps", m.line_props.as_ref().map(lower_line_props));
    f.float("transparency", m.transparency, d.transparency);
    NodeRepr::new("Material2D", f)
}

fn lower_line_props(lp: &XLineProperties) -> NodeRepr {
    let d = XLineProperties::default();
    let mut f = Fields::default();
    f.color("lineColor", lp.line_color, d.line_color);
    f.int("lineCap", lp.line_cap, d.line_cap);
    f.int("lineJoin", lp.line_join, d.line_join);
    f.float("miterLimit", lp.miter_limit, d.miter_limit);
    f.float("transparency", lp.transparency, d.transparency);
    f.float("width", lp.width, d.width);
    NodeRepr::new("XLineProperties", f)
}

fn lower_coordinates(c: &Coordinate2D) -> NodeRepr {
    let mut f = Fields::default();
    f.vec2s("point", &c.point);
    NodeRepr::new("Coordinate2D", f)
}

fn lower_font_style(fs: &XFontStyle) -> NodeRepr {
    let d = XFontStyle::default();
    let mut f = Fields::default();
    f.strings("family", &fs.family, &d.family);
    f.float("size", fs.size, d.size);
    NodeRepr::new("XFontStyle", f)
}

fn lower_text(t: &Text) -> NodeRepr {
    let mut f = Fields::default();
    f.strings("string", &t.string, &[]);
    f.node("fontStyle", t.font_style.as_ref().map(lower_font_style));
    NodeRepr::new("Text", f)
}

fn lower_geometry(g: &Geometry) -> NodeRepr {
    let mut f = Fields::default();
    match g {
        Geometry::Rectangle(r) => {
            f.vec2("size", r.size, Rectangle::default().size);
        }
        Geometry::Circle(c) => {
            f.float("radius", c.radius, Circle::default().radius);
        }
        Geometry::Ellipse(e) => {
            f.vec2("radius", e.radius, Ellipse::default().radius);
        }
        Geometry::XCurve2D(curve) => {
            f.node("point", curve.point.as_ref().map(lower_coordinates));
            f.ints("type", &curve.types);
        }
        Geometry::IndexedFaceSet2D(ifs) => {
            f.node("coord", ifs.coord.as_ref().map(lower_coordinates));
        }
        Geometry::Text(t) => return lower_text(t),
    }
    NodeRepr::new(g.name(), f)
}
