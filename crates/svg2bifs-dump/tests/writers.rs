use serde_json::Value;
use svg2bifs_core::{ConvertOptions, SceneGraph, convert_str};
use svg2bifs_dump::{DumpFormat, FieldValue, dump, lower};

fn scene(svg: &str) -> SceneGraph {
    convert_str(svg, &ConvertOptions::default())
        .expect("convert")
        .scene
}

const RECT: &str =
    r#"<svg width="100" height="50"><rect x="10" y="10" width="20" height="10" fill="red"/></svg>"#;

#[test]
fn xmt_has_header_and_scene_body() {
    let out = dump(&scene(RECT), DumpFormat::Xmt).expect("dump");
    assert!(out.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<XMT-A"));
    assert!(out.contains("<commandStream pixelMetric=\"true\">"));
    assert!(out.contains("<size pixelWidth=\"100\" pixelHeight=\"50\"/>"));
    assert!(out.contains("<Replace>"));
    assert!(out.contains("<Viewport position=\"50 -25\" size=\"100 50\"/>"));
    assert!(out.contains("<Background2D backColor=\"1 1 1\"/>"));
    assert!(out.contains("<Transform2D scale=\"1 -1\">"));
    assert!(out.contains("<Transform2D translation=\"20 15\">"));
    assert!(out.contains("<Material2D emissiveColor=\"1 0 0\" filled=\"true\"/>"));
    assert!(out.contains("<Rectangle size=\"20 10\"/>"));
    assert!(out.trim_end().ends_with("</XMT-A>"));
}

#[test]
fn xmt_nests_node_fields_as_elements() {
    let out = dump(&scene(RECT), DumpFormat::Xmt).expect("dump");
    let shape = out.find("<Shape>").expect("shape");
    let appearance = out.find("<appearance>").expect("appearance");
    let geometry = out.find("<geometry>").expect("geometry");
    assert!(shape < appearance && appearance < geometry);
    assert_eq!(out.matches("<children>").count(), out.matches("</children>").count());
}

#[test]
fn bt_writes_nested_nodes() {
    let out = dump(&scene(RECT), DumpFormat::Bt).expect("dump");
    assert!(out.starts_with("InitialObjectDescriptor {"));
    assert!(out.contains("pixelWidth 100\n"));
    assert!(out.contains("pixelHeight 50\n"));
    assert!(out.contains("\nOrderedGroup {\n"));
    assert!(out.contains("position 50 -25\n"));
    assert!(out.contains("geometry Rectangle {\n"));
    assert!(out.contains("filled TRUE\n"));
    assert_eq!(out.matches('{').count(), out.matches('}').count());
    assert_eq!(out.matches('[').count(), out.matches(']').count());
}

#[test]
fn definitions_are_written_by_name() {
    let svg = r#"<svg><g id="grp"><rect width="1" height="1"/></g></svg>"#;
    let s = scene(svg);
    let xmt = dump(&s, DumpFormat::Xmt).expect("xmt");
    assert!(xmt.contains("<Group DEF=\"grp\">"));
    let bt = dump(&s, DumpFormat::Bt).expect("bt");
    assert!(bt.contains("DEF grp Group {"));
}

#[test]
fn repeated_identifiers_are_defined_once() {
    let s = scene(r#"<svg><g id="dup"/><rect id="dup" width="1" height="1"/></svg>"#);
    let xmt = dump(&s, DumpFormat::Xmt).expect("xmt");
    assert_eq!(xmt.matches("DEF=\"dup\"").count(), 1);
    let bt = dump(&s, DumpFormat::Bt).expect("bt");
    assert_eq!(bt.matches("DEF dup ").count(), 1);
}

#[test]
fn text_strings_are_quoted() {
    let svg = r#"<svg><text x="5" y="6" font-family="Verdana" font-size="10">Hi</text></svg>"#;
    let s = scene(svg);
    let xmt = dump(&s, DumpFormat::Xmt).expect("xmt");
    assert!(xmt.contains("<Text string=\"&quot;Hi&quot;\">"));
    assert!(xmt.contains("<XFontStyle family=\"&quot;Verdana&quot;\" size=\"10\"/>"));
    let bt = dump(&s, DumpFormat::Bt).expect("bt");
    assert!(bt.contains("string [\"Hi\"]\n"));
    assert!(bt.contains("family [\"Verdana\"]\n"));
}

#[test]
fn json_form_mirrors_the_tree() {
    let out = dump(&scene(RECT), DumpFormat::Json).expect("dump");
    let v: Value = serde_json::from_str(&out).expect("json");
    assert_eq!(v["pixelMetric"], Value::Bool(true));
    assert_eq!(v["width"], 100);
    assert_eq!(v["height"], 50);
    assert_eq!(v["scene"]["node"], "OrderedGroup");
    assert_eq!(v["scene"]["children"][0]["node"], "Viewport");
    assert_eq!(v["scene"]["children"][1]["node"], "Background2D");
    assert_eq!(v["scene"]["children"][2]["scale"][1], -1.0);
}

#[test]
fn default_fields_are_omitted() {
    let repr = lower(&scene(r#"<svg><circle r="3"/></svg>"#));
    let root = repr.scene.expect("root");
    let Some(FieldValue::Nodes(children)) = root.field("children") else {
        panic!("root has no children");
    };
    let flip = &children[2];
    assert!(flip.field("translation").is_none());
    assert_eq!(flip.field("scale"), Some(&FieldValue::Vec2([1.0, -1.0])));
}

#[test]
fn nodes_under_shapes_are_dropped() {
    let svg = r#"<svg><rect width="1" height="1"><rect width="2" height="2"/></rect></svg>"#;
    let s = scene(svg);
    assert_eq!(lower(&s).dropped, 1);
    let out = dump(&s, DumpFormat::Xmt).expect("dump");
    assert!(out.contains("<Rectangle size=\"1 1\"/>"));
    assert!(!out.contains("size=\"2 2\""));
}

#[test]
fn formats_resolve_by_name() {
    assert_eq!(DumpFormat::from_name("XMT-A"), Some(DumpFormat::Xmt));
    assert_eq!(DumpFormat::from_name("bt"), Some(DumpFormat::Bt));
    assert_eq!(DumpFormat::from_name("mp4"), None);
    assert_eq!(DumpFormat::Json.extension(), "json");
}
