//! BT (BIFS text) writer.

use std::fmt::Write;

use crate::Result;
use crate::number::{fmt_color, fmt_number, fmt_vec2};
use crate::repr::{FieldValue, NodeRepr, SceneRepr};

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn scalar(value: &FieldValue) -> String {
    match value {
        FieldValue::Bool(true) => "TRUE".to_string(),
        FieldValue::Bool(false) => "FALSE".to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => fmt_number(*v),
        FieldValue::Vec2(v) => fmt_vec2(*v),
        FieldValue::Color(c) => fmt_color(*c),
        FieldValue::Ints(v) => format!(
            "[{}]",
            v.iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        ),
        FieldValue::Vec2s(v) => format!(
            "[{}]",
            v.iter()
                .map(|p| fmt_vec2(*p))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        FieldValue::Strings(v) => format!(
            "[{}]",
            v.iter().map(|s| quote(s)).collect::<Vec<_>>().join(", ")
        ),
        FieldValue::Node(_) | FieldValue::Nodes(_) => String::new(),
    }
}

/// Writes `node` starting at the current line position; the caller has already indented.
fn write_node(out: &mut String, node: &NodeRepr, depth: usize) -> Result<()> {
    if let Some(def) = &node.def {
        write!(out, "DEF {} ", def.name)?;
    }
    writeln!(out, "{} {{", node.node)?;
    for field in &node.fields {
        indent(out, depth + 1);
        match &field.value {
            FieldValue::Node(child) => {
                write!(out, "{} ", field.name)?;
                write_node(out, child, depth + 1)?;
            }
            FieldValue::Nodes(children) => {
                writeln!(out, "{} [", field.name)?;
                for child in children {
                    indent(out, depth + 2);
                    write_node(out, child, depth + 2)?;
                }
                indent(out, depth + 1);
                out.push_str("]\n");
            }
            value => writeln!(out, "{} {}", field.name, scalar(value))?,
        }
    }
    indent(out, depth);
    out.push_str("}\n");
    Ok(())
}

pub(crate) fn write_scene(scene: &SceneRepr) -> Result<String> {
    let mut out = String::new();
    out.push_str("InitialObjectDescriptor {\n");
    out.push_str("  objectDescriptorID 1\n");
    out.push_str("  esDescr [\n");
    out.push_str("    ES_Descriptor {\n");
    out.push_str("      ES_ID 1\n");
    out.push_str("      decConfigDescr DecoderConfigDescriptor {\n");
    out.push_str("        streamType 3\n");
    out.push_str("        decSpecificInfo BIFSConfig {\n");
    out.push_str("          isCommandStream true\n");
    writeln!(out, "          pixelMetric {}", scene.pixel_metric)?;
    writeln!(out, "          pixelWidth {}", scene.width)?;
    writeln!(out, "          pixelHeight {}", scene.height)?;
    out.push_str("        }\n");
    out.push_str("      }\n");
    out.push_str("    }\n");
    out.push_str("  ]\n");
    out.push_str("}\n");
    if let Some(root) = &scene.scene {
        out.push('\n');
        write_node(&mut out, root, 0)?;
    }
    Ok(out)
}
