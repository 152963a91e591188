/// Shortest round-trip decimal form (`1`, `0.5`, `-12.25`).
pub(crate) fn fmt_number(v: f32) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    let mut b = ryu_js::Buffer::new();
    b.format_finite(v).to_string()
}

pub(crate) fn fmt_vec2(v: [f32; 2]) -> String {
    format!("{} {}", fmt_number(v[0]), fmt_number(v[1]))
}

pub(crate) fn fmt_color(c: [f32; 3]) -> String {
    format!(
        "{} {} {}",
        fmt_number(c[0]),
        fmt_number(c[1]),
        fmt_number(c[2])
    )
}
