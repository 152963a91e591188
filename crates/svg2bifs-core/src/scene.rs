//! Target-side (BIFS) scene graph.
//!
//! Nodes live in an append-only arena addressed by [`NodeId`]; the tree shape is kept as parent
//! links plus ordered child lists. Field defaults follow the MPEG-4 node tables so that
//! serializers can omit fields left at their default.

use rustc_hash::FxHashMap;

use crate::geom::{Vec2, vec2};
use crate::props::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A `DEF` binding: numeric node identifier plus the original markup identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeDef {
    pub id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transform2D {
    pub translation: Vec2,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translation: vec2(0.0, 0.0),
            scale: vec2(1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransformMatrix2D {
    pub mxx: f32,
    pub mxy: f32,
    pub tx: f32,
    pub myx: f32,
    pub myy: f32,
    pub ty: f32,
}

impl Default for TransformMatrix2D {
    fn default() -> Self {
        Self {
            mxx: 1.0,
            mxy: 0.0,
            tx: 0.0,
            myx: 0.0,
            myy: 1.0,
            ty: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Switch {
    pub which_choice: i32,
}

impl Default for Switch {
    fn default() -> Self {
        Self { which_choice: -1 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub position: Vec2,
    pub size: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            position: vec2(0.0, 0.0),
            size: vec2(-1.0, -1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Background2D {
    pub back_color: Rgb,
}

impl Default for Background2D {
    fn default() -> Self {
        Self {
            back_color: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rectangle {
    pub size: Vec2,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            size: vec2(2.0, 2.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub radius: f32,
}

impl Default for Circle {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub radius: Vec2,
}

impl Default for Ellipse {
    fn default() -> Self {
        Self {
            radius: vec2(1.0, 1.0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordinate2D {
    pub point: Vec<Vec2>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct XCurve2D {
    pub point: Option<Coordinate2D>,
    pub types: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedFaceSet2D {
    pub coord: Option<Coordinate2D>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XFontStyle {
    pub family: Vec<String>,
    pub size: f32,
}

impl Default for XFontStyle {
    fn default() -> Self {
        Self {
            family: vec!["SERIF".to_string()],
            size: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub string: Vec<String>,
    pub font_style: Option<XFontStyle>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rectangle(Rectangle),
    Circle(Circle),
    Ellipse(Ellipse),
    XCurve2D(XCurve2D),
    IndexedFaceSet2D(IndexedFaceSet2D),
    Text(Text),
}

impl Geometry {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle(_) => "Rectangle",
            Self::Circle(_) => "Circle",
            Self::Ellipse(_) => "Ellipse",
            Self::XCurve2D(_) => "XCurve2D",
            Self::IndexedFaceSet2D(_) => "IndexedFaceSet2D",
            Self::Text(_) => "Text",
        }
    }
}

/// `lineCap` codes.
pub mod line_cap {
    pub const BUTT: i32 = 0;
    pub const ROUND: i32 = 1;
    pub const SQUARE: i32 = 2;
}

/// `lineJoin` codes.
pub mod line_join {
    pub const MITER: i32 = 0;
    pub const ROUND: i32 = 1;
    pub const BEVEL: i32 = 2;
}

#[derive(Debug, Clone, PartialEq)]
pub struct XLineProperties {
    pub line_color: Rgb,
    pub width: f32,
    pub transparency: f32,
    pub line_cap: i32,
    pub line_join: i32,
    pub miter_limit: f32,
}

impl Default for XLineProperties {
    fn default() -> Self {
        Self {
            line_color: Rgb::BLACK,
            width: 1.0,
            transparency: 0.0,
            line_cap: line_cap::BUTT,
            line_join: line_join::MITER,
            miter_limit: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material2D {
    pub emissive_color: Rgb,
    pub filled: bool,
    pub transparency: f32,
    pub line_props: Option<XLineProperties>,
}

impl Default for Material2D {
    fn default() -> Self {
        Self {
            emissive_color: Rgb::new(0.8, 0.8, 0.8),
            filled: false,
            transparency: 0.0,
            line_props: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Appearance {
    pub material: Option<Material2D>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Shape {
    pub geometry: Option<Geometry>,
    pub appearance: Option<Appearance>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    OrderedGroup,
    Group,
    Transform2D(Transform2D),
    TransformMatrix2D(TransformMatrix2D),
    Shape(Shape),
    Switch(Switch),
    Viewport(Viewport),
    Background2D(Background2D),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::OrderedGroup => "OrderedGroup",
            Self::Group => "Group",
            Self::Transform2D(_) => "Transform2D",
            Self::TransformMatrix2D(_) => "TransformMatrix2D",
            Self::Shape(_) => "Shape",
            Self::Switch(_) => "Switch",
            Self::Viewport(_) => "Viewport",
            Self::Background2D(_) => "Background2D",
        }
    }

    /// Whether the node type has a children field.
    pub fn is_grouping(&self) -> bool {
        matches!(
            self,
            Self::OrderedGroup
                | Self::Group
                | Self::Transform2D(_)
                | Self::TransformMatrix2D(_)
                | Self::Switch(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub kind: NodeKind,
    pub def: Option<NodeDef>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: Option<NodeId>,
    names: FxHashMap<String, NodeId>,
    /// Coordinates are pixels rather than normalized units.
    pub use_pixel_metrics: bool,
    pub width: u32,
    pub height: u32,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Creates a parentless node and installs it as the scene root.
    pub fn create_root(&mut self, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, None);
        self.root = Some(id);
        id
    }

    /// Creates a node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind, Some(parent));
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    fn alloc(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        self.nodes.push(SceneNode {
            kind,
            def: None,
            parent,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node(id).map(|n| &n.kind)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn shape_mut(&mut self, id: NodeId) -> Option<&mut Shape> {
        match self.node_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Shape(shape)) => Some(shape),
            _ => None,
        }
    }

    /// Binds `def` to the node. The first node bound to a name wins name lookups.
    pub fn set_def(&mut self, id: NodeId, def: NodeDef) {
        self.names.entry(def.name.clone()).or_insert(id);
        if let Some(node) = self.node_mut(id) {
            node.def = Some(def);
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    /// Pre-order traversal from the root.
    pub fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// Node counts by type name (geometry counted by geometry type), over nodes reachable from
    /// the root.
    pub fn kind_counts(&self) -> std::collections::BTreeMap<&'static str, usize> {
        let mut counts = std::collections::BTreeMap::new();
        for id in self.descendants() {
            let Some(node) = self.node(id) else {
                continue;
            };
            *counts.entry(node.kind.name()).or_insert(0) += 1;
            if let NodeKind::Shape(Shape {
                geometry: Some(geometry),
                ..
            }) = &node.kind
            {
                *counts.entry(geometry.name()).or_insert(0) += 1;
            }
        }
        counts
    }
}
