//! Source-side (markup) tree: the elements that are currently open, in an arena keyed by
//! [`ElementId`], plus the identifier table shared with the scene graph.

use indexmap::IndexMap;

use crate::attr::LocalAttributes;
use crate::cascade::DirtyMask;
use crate::props::PropertySet;
use crate::scene::NodeDef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Svg,
    Group,
    Rect,
    Path,
    Polyline,
    Text,
    Ellipse,
    Circle,
    Defs,
    SolidColor,
    Unsupported(String),
}

impl ElementKind {
    /// Classifies an element by its local (unprefixed) name.
    pub fn from_name(name: &str) -> Self {
        let local = name.rsplit(':').next().unwrap_or(name);
        match local {
            "svg" => Self::Svg,
            "g" => Self::Group,
            "rect" => Self::Rect,
            "path" => Self::Path,
            "polyline" => Self::Polyline,
            "text" => Self::Text,
            "ellipse" => Self::Ellipse,
            "circle" => Self::Circle,
            "defs" => Self::Defs,
            "solidColor" => Self::SolidColor,
            other => Self::Unsupported(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Svg => "svg",
            Self::Group => "g",
            Self::Rect => "rect",
            Self::Path => "path",
            Self::Polyline => "polyline",
            Self::Text => "text",
            Self::Ellipse => "ellipse",
            Self::Circle => "circle",
            Self::Defs => "defs",
            Self::SolidColor => "solidColor",
            Self::Unsupported(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone)]
pub struct SourceElement {
    pub kind: ElementKind,
    pub attributes: LocalAttributes,
    pub def: Option<NodeDef>,
    /// Active property set of the parent, restored when this element closes.
    pub saved: PropertySet,
    pub dirty: DirtyMask,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl SourceElement {
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

#[derive(Debug, Clone, Default)]
pub struct MarkupTree {
    slots: Vec<Option<SourceElement>>,
    free: Vec<usize>,
    root: Option<ElementId>,
    current: Option<ElementId>,
    depth: usize,
    identifiers: IndexMap<String, u32>,
}

impl MarkupTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an element as the last child of the current element.
    pub fn open(&mut self, kind: ElementKind, attributes: LocalAttributes) -> ElementId {
        let element = SourceElement {
            kind,
            attributes,
            def: None,
            saved: PropertySet::default(),
            dirty: DirtyMask::EMPTY,
            parent: self.current,
            children: Vec::new(),
        };
        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(element);
                ElementId(slot)
            }
            None => {
                self.slots.push(Some(element));
                ElementId(self.slots.len() - 1)
            }
        };
        match self.current {
            Some(parent) => {
                if let Some(parent) = self.get_mut(parent) {
                    parent.children.push(id);
                }
            }
            None => self.root = Some(id),
        }
        self.current = Some(id);
        self.depth += 1;
        id
    }

    /// Closes and unregisters the current element, returning it.
    pub fn close(&mut self) -> Option<SourceElement> {
        let id = self.current?;
        let element = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        self.depth -= 1;
        self.current = element.parent;
        match element.parent {
            Some(parent) => {
                if let Some(parent) = self.get_mut(parent) {
                    parent.children.retain(|c| *c != id);
                }
            }
            None => self.root = None,
        }
        Some(element)
    }

    pub fn get(&self, id: ElementId) -> Option<&SourceElement> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut SourceElement> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    /// Number of open elements.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Allocates the next numeric identifier (starting at 1) for `name`. A name that is already
    /// registered keeps its first identifier and yields `None`.
    pub fn register_identifier(&mut self, name: &str) -> Option<NodeDef> {
        if self.identifiers.contains_key(name) {
            return None;
        }
        let id = self.identifiers.len() as u32 + 1;
        self.identifiers.insert(name.to_string(), id);
        Some(NodeDef {
            id,
            name: name.to_string(),
        })
    }

    pub fn identifier(&self, name: &str) -> Option<u32> {
        self.identifiers.get(name).copied()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.identifiers.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
