//! Dual-tree conversion session.
//!
//! The session consumes markup events and keeps the source tree, the target scene graph, the
//! active property set and the target-side cursor in step with each other.

use crate::ConvertOptions;
use crate::attr::{LocalAttributes, apply_attribute};
use crate::cascade::{self, DirtyMask};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::error::{Error, Result};
use crate::events::{MarkupHandler, XmlAttribute};
use crate::mapper::{Mapper, map_root};
use crate::markup::{ElementKind, MarkupTree};
use crate::props::PropertySet;
use crate::scene::{Geometry, NodeId, NodeKind, SceneGraph};

/// Output of a finished session.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub scene: SceneGraph,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct Session {
    options: ConvertOptions,
    markup: MarkupTree,
    scene: SceneGraph,
    active: PropertySet,
    cursor: Option<NodeId>,
    text_target: Option<NodeId>,
    diagnostics: Diagnostics,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ConvertOptions::default())
    }
}

impl Session {
    pub fn new(options: ConvertOptions) -> Self {
        Self {
            options,
            markup: MarkupTree::new(),
            scene: SceneGraph::new(),
            active: PropertySet::default(),
            cursor: None,
            text_target: None,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn markup(&self) -> &MarkupTree {
        &self.markup
    }

    /// Active property set of the innermost open element (defaults outside any element).
    pub fn active_properties(&self) -> &PropertySet {
        &self.active
    }

    /// Dirty mask computed for the innermost open element.
    pub fn dirty_mask(&self) -> Option<DirtyMask> {
        let current = self.markup.current()?;
        self.markup.get(current).map(|el| el.dirty)
    }

    /// Target node new nodes are attached under.
    pub fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    pub fn cursor_kind(&self) -> Option<&NodeKind> {
        self.cursor.and_then(|c| self.scene.kind(c))
    }

    /// Shape whose text geometry receives character data, if any.
    pub fn text_target(&self) -> Option<NodeId> {
        self.text_target
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    /// Completes the session. Fails if elements are still open, or in strict mode if any
    /// diagnostic was recorded.
    pub fn finish(self) -> Result<Conversion> {
        if self.markup.depth() > 0 {
            return Err(Error::Unclosed {
                depth: self.markup.depth(),
            });
        }
        if self.options.strict {
            if let Some(first) = self.diagnostics.as_slice().first() {
                return Err(Error::Strict {
                    count: self.diagnostics.len(),
                    first: first.to_string(),
                });
            }
        }
        Ok(Conversion {
            scene: self.scene,
            diagnostics: self.diagnostics.into_vec(),
        })
    }

    fn parse_attributes(
        &mut self,
        kind: &ElementKind,
        attributes: &[XmlAttribute<'_>],
    ) -> LocalAttributes {
        let mut attrs = LocalAttributes::default();
        // `style` declarations first so that presentation attributes override them.
        let (style, rest): (Vec<_>, Vec<_>) =
            attributes.iter().partition(|a| a.name == "style");
        for attr in style.into_iter().chain(rest) {
            apply_attribute(&mut attrs, kind, &attr.name, attr.value, &mut self.diagnostics);
        }
        attrs
    }
}

impl MarkupHandler for Session {
    fn element_start(
        &mut self,
        name: &str,
        _namespace: Option<&str>,
        attributes: &[XmlAttribute<'_>],
    ) -> Result<()> {
        let kind = ElementKind::from_name(name);
        let attrs = self.parse_attributes(&kind, attributes);

        let (next, dirty) = cascade::resolve(&attrs.properties, &self.active);
        let saved = std::mem::replace(&mut self.active, next);

        let def = match attrs.id.as_deref() {
            Some(ident) => {
                let def = self.markup.register_identifier(ident);
                if def.is_none() {
                    self.diagnostics.push(
                        DiagnosticKind::MalformedAttribute,
                        format!("duplicate id `{ident}` on <{}> is not bound", kind.name()),
                    );
                }
                def
            }
            None => None,
        };
        let el = self.markup.open(kind.clone(), attrs);
        let Some(element) = self.markup.get_mut(el) else {
            return Ok(());
        };
        element.saved = saved;
        element.dirty = dirty;
        element.def = def.clone();
        let attrs = &element.attributes;

        if self.scene.root().is_none() {
            if kind == ElementKind::Svg {
                self.cursor = Some(map_root(&mut self.scene, attrs, &self.options));
                tracing::debug!(
                    width = self.scene.width,
                    height = self.scene.height,
                    "scene root created"
                );
            } else {
                self.diagnostics.push(
                    DiagnosticKind::ContentBeforeRoot,
                    format!("<{}> before the root <svg> produces no nodes", kind.name()),
                );
            }
            return Ok(());
        }

        let Some(cursor) = self.cursor else {
            return Ok(());
        };
        if let Some(parent) = self.scene.kind(cursor) {
            if !parent.is_grouping() {
                self.diagnostics.push(
                    DiagnosticKind::NestedInShape,
                    format!(
                        "<{}> is nested in a {} and will not be serialized",
                        kind.name(),
                        parent.name()
                    ),
                );
            }
        }

        let mapped = Mapper::new(
            &mut self.scene,
            &self.active,
            attrs,
            &mut self.diagnostics,
            cursor,
        )
        .map(&kind);
        self.cursor = Some(mapped.entry);
        if mapped.text.is_some() {
            self.text_target = mapped.text;
        }
        if let Some(def) = def {
            self.scene.set_def(mapped.entry, def);
        }
        Ok(())
    }

    fn element_end(&mut self, name: &str, _namespace: Option<&str>) -> Result<()> {
        let found = ElementKind::from_name(name);
        let Some(current) = self.markup.current() else {
            return Err(Error::UnbalancedEnd {
                name: name.to_string(),
            });
        };
        if let Some(open) = self.markup.get(current) {
            if open.kind != found {
                return Err(Error::MismatchedEnd {
                    expected: open.kind.name().to_string(),
                    found: found.name().to_string(),
                });
            }
        }
        let Some(element) = self.markup.close() else {
            return Err(Error::UnbalancedEnd {
                name: name.to_string(),
            });
        };

        self.active = element.saved;
        self.cursor = self
            .cursor
            .map(|c| self.scene.parent(c).unwrap_or(c));
        self.text_target = None;
        Ok(())
    }

    fn text_content(&mut self, text: &str, _is_cdata: bool) -> Result<()> {
        let Some(target) = self.text_target else {
            return Ok(());
        };
        if let Some(shape) = self.scene.shape_mut(target) {
            if let Some(Geometry::Text(t)) = shape.geometry.as_mut() {
                t.string = vec![text.to_string()];
            }
        }
        Ok(())
    }
}
