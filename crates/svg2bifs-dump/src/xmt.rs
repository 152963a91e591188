//! XMT-A writer.

use std::fmt::Write;

use crate::Result;
use crate::number::{fmt_color, fmt_number, fmt_vec2};
use crate::repr::{FieldValue, NodeRepr, SceneRepr};

fn escape_xml_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        if start < i {
            out.push_str(&text[start..i]);
        }
        out.push_str(esc);
        start = i + 1;
    }
    if start < text.len() {
        out.push_str(&text[start..]);
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn attr_value(value: &FieldValue) -> String {
    match value {
        FieldValue::Bool(v) => v.to_string(),
        FieldValue::Int(v) => v.to_string(),
        FieldValue::Float(v) => fmt_number(*v),
        FieldValue::Vec2(v) => fmt_vec2(*v),
        FieldValue::Color(c) => fmt_color(*c),
        FieldValue::Ints(v) => v
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" "),
        FieldValue::Vec2s(v) => v
            .iter()
            .map(|p| fmt_vec2(*p))
            .collect::<Vec<_>>()
            .join(" "),
        FieldValue::Strings(v) => {
            let quoted = v
                .iter()
                .map(|s| format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")))
                .collect::<Vec<_>>()
                .join(" ");
            escape_xml(&quoted)
        }
        FieldValue::Node(_) | FieldValue::Nodes(_) => String::new(),
    }
}

fn write_node(out: &mut String, node: &NodeRepr, depth: usize) -> Result<()> {
    indent(out, depth);
    write!(out, "<{}", node.node)?;
    if let Some(def) = &node.def {
        write!(out, " DEF=\"{}\"", escape_xml(&def.name))?;
    }
    for field in node.fields.iter().filter(|f| !f.value.is_node()) {
        write!(out, " {}=\"{}\"", field.name, attr_value(&field.value))?;
    }

    let node_fields: Vec<_> = node.fields.iter().filter(|f| f.value.is_node()).collect();
    if node_fields.is_empty() {
        out.push_str("/>\n");
        return Ok(());
    }
    out.push_str(">\n");
    for field in node_fields {
        indent(out, depth + 1);
        writeln!(out, "<{}>", field.name)?;
        match &field.value {
            FieldValue::Node(child) => write_node(out, child, depth + 2)?,
            FieldValue::Nodes(children) => {
                for child in children {
                    write_node(out, child, depth + 2)?;
                }
            }
            _ => {}
        }
        indent(out, depth + 1);
        writeln!(out, "</{}>", field.name)?;
    }
    indent(out, depth);
    writeln!(out, "</{}>", node.node)?;
    Ok(())
}

pub(crate) fn write_scene(scene: &SceneRepr) -> Result<String> {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<XMT-A xmlns=\"urn:mpeg:mpeg4:xmta:schema:2002\">\n");
    out.push_str("  <Header>\n");
    out.push_str("    <InitialObjectDescriptor objectDescriptorID=\"1\" binaryID=\"1\">\n");
    out.push_str("      <Descr>\n");
    out.push_str("        <esDescr>\n");
    out.push_str("          <ES_Descriptor ES_ID=\"1\" binaryID=\"1\">\n");
    out.push_str("            <decConfigDescr>\n");
    out.push_str("              <DecoderConfigDescriptor streamType=\"3\">\n");
    out.push_str("                <decSpecificInfo>\n");
    out.push_str("                  <BIFSConfig>\n");
    writeln!(
        out,
        "                    <commandStream pixelMetric=\"{}\">",
        scene.pixel_metric
    )?;
    writeln!(
        out,
        "                      <size pixelWidth=\"{}\" pixelHeight=\"{}\"/>",
        scene.width, scene.height
    )?;
    out.push_str("                    </commandStream>\n");
    out.push_str("                  </BIFSConfig>\n");
    out.push_str("                </decSpecificInfo>\n");
    out.push_str("              </DecoderConfigDescriptor>\n");
    out.push_str("            </decConfigDescr>\n");
    out.push_str("          </ES_Descriptor>\n");
    out.push_str("        </esDescr>\n");
    out.push_str("      </Descr>\n");
    out.push_str("    </InitialObjectDescriptor>\n");
    out.push_str("  </Header>\n");
    out.push_str("  <Body>\n");
    out.push_str("    <Replace>\n");
    out.push_str("      <Scene>\n");
    if let Some(root) = &scene.scene {
        write_node(&mut out, root, 4)?;
    }
    out.push_str("      </Scene>\n");
    out.push_str("    </Replace>\n");
    out.push_str("  </Body>\n");
    out.push_str("</XMT-A>\n");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_are_quoted_then_escaped() {
        let v = FieldValue::Strings(vec!["a\"b".to_string(), "<c>".to_string()]);
        assert_eq!(
            attr_value(&v),
            "&quot;a\\&quot;b&quot; &quot;&lt;c&gt;&quot;"
        );
    }
}
