//! Property cascade: computes the active property set of an element from its parent's set and
//! the element's locally specified properties.

use crate::props::{LocalProperties, Paint, PropertySet, apply_overrides};

/// One bit per presentation property plus the node/child markers.
///
/// A set bit means the property was *not* resolved locally and still follows inheritance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirtyMask(u64);

impl DirtyMask {
    pub const EMPTY: Self = Self(0);

    pub const AUDIO_LEVEL: Self = Self(1 << 0);
    pub const COLOR: Self = Self(1 << 1);
    pub const COLOR_RENDERING: Self = Self(1 << 2);
    pub const DISPLAY: Self = Self(1 << 3);
    pub const DISPLAY_ALIGN: Self = Self(1 << 4);
    pub const FILL: Self = Self(1 << 5);
    pub const FILL_OPACITY: Self = Self(1 << 6);
    pub const FILL_RULE: Self = Self(1 << 7);
    pub const FONT_FAMILY: Self = Self(1 << 8);
    pub const FONT_SIZE: Self = Self(1 << 9);
    pub const FONT_STYLE: Self = Self(1 << 10);
    pub const FONT_VARIANT: Self = Self(1 << 11);
    pub const FONT_WEIGHT: Self = Self(1 << 12);
    pub const IMAGE_RENDERING: Self = Self(1 << 13);
    pub const LINE_INCREMENT: Self = Self(1 << 14);
    pub const OPACITY: Self = Self(1 << 15);
    pub const POINTER_EVENTS: Self = Self(1 << 16);
    pub const SHAPE_RENDERING: Self = Self(1 << 17);
    pub const SOLID_COLOR: Self = Self(1 << 18);
    pub const SOLID_OPACITY: Self = Self(1 << 19);
    pub const STOP_COLOR: Self = Self(1 << 20);
    pub const STOP_OPACITY: Self = Self(1 << 21);
    pub const STROKE: Self = Self(1 << 22);
    pub const STROKE_DASHARRAY: Self = Self(1 << 23);
    pub const STROKE_DASHOFFSET: Self = Self(1 << 24);
    pub const STROKE_LINECAP: Self = Self(1 << 25);
    pub const STROKE_LINEJOIN: Self = Self(1 << 26);
    pub const STROKE_MITERLIMIT: Self = Self(1 << 27);
    pub const STROKE_OPACITY: Self = Self(1 << 28);
    pub const STROKE_WIDTH: Self = Self(1 << 29);
    pub const TEXT_ALIGN: Self = Self(1 << 30);
    pub const TEXT_ANCHOR: Self = Self(1 << 31);
    pub const TEXT_RENDERING: Self = Self(1 << 32);
    pub const VECTOR_EFFECT: Self = Self(1 << 33);
    pub const VIEWPORT_FILL: Self = Self(1 << 34);
    pub const VIEWPORT_FILL_OPACITY: Self = Self(1 << 35);
    pub const VISIBILITY: Self = Self(1 << 36);

    /// The element's own node needs re-evaluation.
    pub const NODE: Self = Self(1 << 62);
    /// Descendants of the element need re-evaluation.
    pub const CHILDREN: Self = Self(1 << 63);

    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for DirtyMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for DirtyMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Resolves one element's properties against the inherited set.
///
/// Explicit values replace the inherited ones; unspecified and `inherit` values keep the
/// inherited value and mark the property dirty. A paint that resolves to `currentColor` is also
/// dirty whenever `color` itself was inherited, since its effective color still depends on an
/// ancestor.
pub fn resolve(local: &LocalProperties, inherited: &PropertySet) -> (PropertySet, DirtyMask) {
    let mut active = inherited.clone();
    let mut mask = DirtyMask::NODE | DirtyMask::CHILDREN;
    apply_overrides(local, &mut active, &mut mask);

    if mask.contains(DirtyMask::COLOR) {
        let paints = [
            (&active.fill, DirtyMask::FILL),
            (&active.stroke, DirtyMask::STROKE),
            (&active.stop_color, DirtyMask::STOP_COLOR),
            (&active.solid_color, DirtyMask::SOLID_COLOR),
        ];
        for (paint, flag) in paints {
            if *paint == Paint::CurrentColor {
                mask.insert(flag);
            }
        }
    }

    (active, mask)
}
