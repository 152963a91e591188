use crate::Result;
use crate::repr::SceneRepr;

pub(crate) fn write_scene(scene: &SceneRepr) -> Result<String> {
    let mut out = serde_json::to_string_pretty(scene)?;
    out.push('\n');
    Ok(out)
}
