mod conversion;

use crate::scene::{Geometry, NodeId, NodeKind, SceneGraph, Shape};
use crate::*;

fn convert(svg: &str) -> Conversion {
    convert_str(svg, &ConvertOptions::default()).unwrap()
}

/// The `Transform2D` that flips the y axis, under which all document content hangs.
fn content_root(scene: &SceneGraph) -> NodeId {
    let root = scene.root().unwrap();
    let children = scene.children(root);
    assert_eq!(children.len(), 3, "root prologue");
    children[2]
}

fn child(scene: &SceneGraph, id: NodeId, index: usize) -> NodeId {
    scene.children(id)[index]
}

fn kind(scene: &SceneGraph, id: NodeId) -> &NodeKind {
    scene.kind(id).unwrap()
}

fn shape(scene: &SceneGraph, id: NodeId) -> &Shape {
    match kind(scene, id) {
        NodeKind::Shape(shape) => shape,
        other => panic!("expected Shape, got {}", other.name()),
    }
}

fn geometry(scene: &SceneGraph, id: NodeId) -> &Geometry {
    shape(scene, id).geometry.as_ref().unwrap()
}
