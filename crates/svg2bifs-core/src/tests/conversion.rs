use super::*;
use crate::geom::vec2;
use crate::props::Rgb;
use crate::scene::{Transform2D, TransformMatrix2D, Viewport};

#[test]
fn root_svg_builds_fixed_prologue() {
    let out = convert(r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300"/>"#);
    let scene = &out.scene;
    assert!(scene.use_pixel_metrics);
    assert_eq!((scene.width, scene.height), (400, 300));

    let root = scene.root().unwrap();
    assert_eq!(kind(scene, root), &NodeKind::OrderedGroup);
    let names: Vec<_> = scene
        .children(root)
        .iter()
        .map(|c| kind(scene, *c).name())
        .collect();
    assert_eq!(names, vec!["Viewport", "Background2D", "Transform2D"]);

    assert_eq!(
        kind(scene, child(scene, root, 0)),
        &NodeKind::Viewport(Viewport {
            position: vec2(200.0, -150.0),
            size: vec2(400.0, 300.0),
        })
    );
    match kind(scene, child(scene, root, 1)) {
        NodeKind::Background2D(bg) => assert_eq!(bg.back_color, Rgb::WHITE),
        other => panic!("unexpected {}", other.name()),
    }
    match kind(scene, content_root(scene)) {
        NodeKind::Transform2D(t) => assert_eq!(t.scale, vec2(1.0, -1.0)),
        other => panic!("unexpected {}", other.name()),
    }
    assert!(out.diagnostics.is_empty());
}

#[test]
fn relative_root_size_falls_back_to_defaults() {
    let out = convert(r#"<svg width="100%" height="50em"/>"#);
    assert_eq!((out.scene.width, out.scene.height), (320, 200));

    let options = ConvertOptions::default().with_default_size(640, 480);
    let out = convert_str("<svg/>", &options).unwrap();
    assert_eq!((out.scene.width, out.scene.height), (640, 480));
}

#[test]
fn bare_root_declares_default_canvas() {
    let out = convert("<svg/>");
    let scene = &out.scene;
    assert_eq!((scene.width, scene.height), (320, 200));
    let root = scene.root().unwrap();
    assert_eq!(
        kind(scene, child(scene, root, 0)),
        &NodeKind::Viewport(Viewport {
            position: vec2(160.0, -100.0),
            size: vec2(320.0, 200.0),
        })
    );
}

#[test]
fn view_box_drives_viewport() {
    let out = convert(r#"<svg width="200" height="100" viewBox="10 20 100 50"/>"#);
    let root = out.scene.root().unwrap();
    assert_eq!(
        kind(&out.scene, child(&out.scene, root, 0)),
        &NodeKind::Viewport(Viewport {
            position: vec2(60.0, -45.0),
            size: vec2(100.0, 50.0),
        })
    );
}

#[test]
fn content_before_root_produces_no_nodes() {
    let out = convert(r#"<html><rect width="1" height="1"/><svg><g/></svg></html>"#);
    let kinds: Vec<_> = out
        .diagnostics
        .iter()
        .map(|d| d.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::ContentBeforeRoot,
            DiagnosticKind::ContentBeforeRoot
        ]
    );
    let content = content_root(&out.scene);
    assert_eq!(out.scene.children(content).len(), 1);
    assert!(out.scene.kind_counts().get("Rectangle").is_none());
}

#[test]
fn positioned_rect_is_offset_by_half_size() {
    let out = convert(r##"<svg><rect x="10" y="20" width="30" height="40" fill="#f00"/></svg>"##);
    let scene = &out.scene;
    let offset = child(scene, content_root(scene), 0);
    assert_eq!(
        kind(scene, offset),
        &NodeKind::Transform2D(Transform2D {
            translation: vec2(25.0, 40.0),
            scale: vec2(1.0, 1.0),
        })
    );
    let shape_id = child(scene, offset, 0);
    match geometry(scene, shape_id) {
        Geometry::Rectangle(r) => assert_eq!(r.size, vec2(30.0, 40.0)),
        other => panic!("unexpected {}", other.name()),
    }
    let material = shape(scene, shape_id)
        .appearance
        .as_ref()
        .unwrap()
        .material
        .as_ref()
        .unwrap();
    assert_eq!(material.emissive_color, Rgb::new(1.0, 0.0, 0.0));
    assert!(material.filled);
}

#[test]
fn unpositioned_rect_is_a_bare_shape() {
    let out = convert(r#"<svg><rect width="5" height="6"/></svg>"#);
    let scene = &out.scene;
    let shape_id = child(scene, content_root(scene), 0);
    assert!(matches!(kind(scene, shape_id), NodeKind::Shape(_)));
}

#[test]
fn transform_wraps_geometry_in_matrix() {
    let out = convert(
        r#"<svg><rect transform="matrix(1 2 3 4 5 6)" x="0" width="2" height="2"/></svg>"#,
    );
    let scene = &out.scene;
    let matrix = child(scene, content_root(scene), 0);
    assert_eq!(
        kind(scene, matrix),
        &NodeKind::TransformMatrix2D(TransformMatrix2D {
            mxx: 1.0,
            mxy: 3.0,
            tx: 5.0,
            myx: 2.0,
            myy: 4.0,
            ty: 6.0,
        })
    );
    let offset = child(scene, matrix, 0);
    match kind(scene, offset) {
        NodeKind::Transform2D(t) => assert_eq!(t.translation, vec2(1.0, 0.0)),
        other => panic!("unexpected {}", other.name()),
    }
    assert!(matches!(
        kind(scene, child(scene, offset, 0)),
        NodeKind::Shape(_)
    ));
}

#[test]
fn groups_map_to_group_or_matrix() {
    let out = convert(r#"<svg><g><g transform="translate(3 4)"/></g></svg>"#);
    let scene = &out.scene;
    let outer = child(scene, content_root(scene), 0);
    assert_eq!(kind(scene, outer), &NodeKind::Group);
    match kind(scene, child(scene, outer, 0)) {
        NodeKind::TransformMatrix2D(m) => assert_eq!((m.tx, m.ty), (3.0, 4.0)),
        other => panic!("unexpected {}", other.name()),
    }
}

#[test]
fn closed_path_becomes_xcurve() {
    let out = convert(r#"<svg><path d="M0 0 L10 0 L10 10 Z"/></svg>"#);
    let scene = &out.scene;
    match geometry(scene, child(scene, content_root(scene), 0)) {
        Geometry::XCurve2D(curve) => {
            assert_eq!(curve.point.as_ref().unwrap().point.len(), 4);
            assert_eq!(curve.types, vec![0, 1, 1, 6]);
        }
        other => panic!("unexpected {}", other.name()),
    }
}

#[test]
fn polyline_points_are_copied() {
    let out = convert(r#"<svg><polyline points="0,0 10,10 20,0" stroke="black"/></svg>"#);
    let scene = &out.scene;
    match geometry(scene, child(scene, content_root(scene), 0)) {
        Geometry::IndexedFaceSet2D(ifs) => assert_eq!(
            ifs.coord.as_ref().unwrap().point,
            vec![vec2(0.0, 0.0), vec2(10.0, 10.0), vec2(20.0, 0.0)]
        ),
        other => panic!("unexpected {}", other.name()),
    }
}

#[test]
fn text_gets_flip_transform_font_and_content() {
    let out = convert(
        r#"<svg><text x="5 9" y="6" font-family="'Courier New', monospace" font-size="20">Hello</text></svg>"#,
    );
    let scene = &out.scene;
    let tr = child(scene, content_root(scene), 0);
    assert_eq!(
        kind(scene, tr),
        &NodeKind::Transform2D(Transform2D {
            translation: vec2(5.0, 6.0),
            scale: vec2(1.0, -1.0),
        })
    );
    match geometry(scene, child(scene, tr, 0)) {
        Geometry::Text(text) => {
            assert_eq!(text.string, vec!["Hello".to_string()]);
            let fs = text.font_style.as_ref().unwrap();
            assert_eq!(fs.family, vec!["Courier New", "monospace"]);
            assert_eq!(fs.size, 20.0);
        }
        other => panic!("unexpected {}", other.name()),
    }
}

#[test]
fn inherited_font_reaches_text() {
    let out = convert(r#"<svg><g font-size="30"><text>A</text></g><text>B</text></svg>"#);
    let scene = &out.scene;
    let sizes: Vec<f32> = scene
        .descendants()
        .into_iter()
        .filter_map(|id| match scene.kind(id) {
            Some(NodeKind::Shape(Shape {
                geometry: Some(Geometry::Text(t)),
                ..
            })) => t.font_style.as_ref().map(|f| f.size),
            _ => None,
        })
        .collect();
    assert_eq!(sizes, vec![30.0, 12.0]);
}

#[test]
fn circle_and_ellipse_are_centered() {
    let out = convert(r#"<svg><circle cx="4" cy="5" r="3"/><ellipse rx="2" ry="1"/></svg>"#);
    let scene = &out.scene;
    let content = content_root(scene);
    let centered = child(scene, content, 0);
    match kind(scene, centered) {
        NodeKind::Transform2D(t) => assert_eq!(t.translation, vec2(4.0, 5.0)),
        other => panic!("unexpected {}", other.name()),
    }
    match geometry(scene, child(scene, centered, 0)) {
        Geometry::Circle(c) => assert_eq!(c.radius, 3.0),
        other => panic!("unexpected {}", other.name()),
    }
    match geometry(scene, child(scene, content, 1)) {
        Geometry::Ellipse(e) => assert_eq!(e.radius, vec2(2.0, 1.0)),
        other => panic!("unexpected {}", other.name()),
    }
}

#[test]
fn missing_radius_is_reported() {
    let out = convert(r#"<svg><circle/></svg>"#);
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].kind, DiagnosticKind::MissingGeometry);
    let scene = &out.scene;
    match geometry(scene, child(scene, content_root(scene), 0)) {
        Geometry::Circle(c) => assert_eq!(c.radius, 0.0),
        other => panic!("unexpected {}", other.name()),
    }
}

#[test]
fn defs_become_inactive_switch() {
    let out = convert(r#"<svg><defs><rect width="1" height="1"/></defs></svg>"#);
    let scene = &out.scene;
    let switch = child(scene, content_root(scene), 0);
    match kind(scene, switch) {
        NodeKind::Switch(s) => assert_eq!(s.which_choice, -1),
        other => panic!("unexpected {}", other.name()),
    }
    assert_eq!(scene.children(switch).len(), 1);
}

#[test]
fn solid_color_is_a_bare_shape() {
    let out = convert(r#"<svg><solidColor id="sc" solid-color="red"/></svg>"#);
    let scene = &out.scene;
    let id = child(scene, content_root(scene), 0);
    assert_eq!(shape(scene, id), &Shape::default());
    assert_eq!(scene.find_by_name("sc"), Some(id));
}

#[test]
fn unsupported_elements_get_placeholders() {
    let out = convert(r#"<svg><image width="5" height="5"/><svg/></svg>"#);
    assert_eq!(out.diagnostics.len(), 2);
    assert!(
        out.diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::UnsupportedElement)
    );
    let scene = &out.scene;
    for id in scene.children(content_root(scene)) {
        assert_eq!(
            kind(scene, *id),
            &NodeKind::Transform2D(Transform2D::default())
        );
    }
}

#[test]
fn strict_mode_rejects_diagnostics() {
    let err = convert_str("<svg><image/></svg>", &ConvertOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::Strict { count: 1, .. }));
    assert!(convert_str("<svg><g/></svg>", &ConvertOptions::strict()).is_ok());
}

#[test]
fn identifiers_bind_defs_on_entry_nodes() {
    let out = convert(
        r#"<svg><rect id="box" x="1" width="2" height="2"/><g id="grp"/><circle xml:id="dot" r="1"/></svg>"#,
    );
    let scene = &out.scene;
    let content = content_root(scene);
    let boxed = scene.find_by_name("box").unwrap();
    assert_eq!(boxed, child(scene, content, 0));
    assert!(matches!(kind(scene, boxed), NodeKind::Transform2D(_)));
    let def = scene.node(boxed).unwrap().def.as_ref().unwrap();
    assert_eq!((def.id, def.name.as_str()), (1, "box"));
    assert_eq!(
        scene.node(scene.find_by_name("grp").unwrap()).unwrap().def.as_ref().unwrap().id,
        2
    );
    assert_eq!(scene.find_by_name("dot"), Some(child(scene, content, 2)));
}

#[test]
fn current_color_and_style_precedence() {
    let out = convert(
        r##"<svg><g color="#00ff00"><rect width="1" height="1" fill="currentColor" style="fill:blue" stroke="currentColor"/></g></svg>"##,
    );
    let scene = &out.scene;
    let g = child(scene, content_root(scene), 0);
    let material = shape(scene, child(scene, g, 0))
        .appearance
        .as_ref()
        .unwrap()
        .material
        .clone()
        .unwrap();
    assert_eq!(material.emissive_color, Rgb::new(0.0, 1.0, 0.0));
    assert_eq!(
        material.line_props.unwrap().line_color,
        Rgb::new(0.0, 1.0, 0.0)
    );
}

#[test]
fn malformed_document_is_an_error() {
    assert!(matches!(
        convert_str("<svg><g></svg>", &ConvertOptions::default()),
        Err(Error::Xml(_))
    ));
}

#[test]
fn fill_none_wins_over_other_paint() {
    let out = convert(
        r##"<svg><g fill="#00f" color="red"><rect width="2" height="2" fill="none" style="fill:red" fill-opacity="0.5" stroke="currentColor"/><circle r="1" style="fill:none" stroke="green"/></g></svg>"##,
    );
    let scene = &out.scene;
    let g = child(scene, content_root(scene), 0);
    for index in 0..2 {
        let material = shape(scene, child(scene, g, index))
            .appearance
            .as_ref()
            .unwrap()
            .material
            .as_ref()
            .unwrap();
        assert!(!material.filled, "shape {index}");
        assert!(material.line_props.is_some(), "shape {index}");
    }
}

#[test]
fn repeated_identifier_is_bound_once() {
    let out = convert(r#"<svg><g id="dup"/><rect id="dup" width="1" height="1"/></svg>"#);
    let scene = &out.scene;
    let content = content_root(scene);
    let first = child(scene, content, 0);
    assert_eq!(scene.find_by_name("dup"), Some(first));
    assert_eq!(scene.node(first).unwrap().def.as_ref().unwrap().id, 1);
    assert!(scene.node(child(scene, content, 1)).unwrap().def.is_none());
    assert_eq!(out.diagnostics.len(), 1);
    assert_eq!(out.diagnostics[0].kind, DiagnosticKind::MalformedAttribute);
}
