//! Presentation property values and the two property records the cascade works on.
//!
//! [`PropertySet`] is the fully resolved state ("active set"); [`LocalProperties`] holds what a
//! single element specifies. Both are generated from one table so that every property has a
//! default, a dirty bit, a markup name and a value parser.

use crate::attr;
use crate::cascade::DirtyMask;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

impl From<svgtypes::Color> for Rgb {
    fn from(c: svgtypes::Color) -> Self {
        Self::new(
            f32::from(c.red) / 255.0,
            f32::from(c.green) / 255.0,
            f32::from(c.blue) / 255.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    None,
    CurrentColor,
    Color(Rgb),
    /// `url(#id)` reference; gradients and patterns are not translated.
    Url(String),
    /// A paint form the converter does not model (e.g. `context-fill`).
    Unsupported(String),
}

impl Paint {
    pub fn is_none(&self) -> bool {
        matches!(self, Paint::None)
    }
}

/// A locally specified value: either explicit or an explicit request to inherit.
#[derive(Debug, Clone, PartialEq)]
pub enum Specified<T> {
    Inherit,
    Value(T),
}

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $kw:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub fn from_keyword(raw: &str) -> Option<Self> {
                match raw.trim() {
                    $( $kw => Some(Self::$variant), )+
                    _ => None,
                }
            }

            pub fn keyword(self) -> &'static str {
                match self {
                    $( Self::$variant => $kw ),+
                }
            }
        }
    };
}

keyword_enum! {
    /// Shared by `color-rendering`, `image-rendering`, `shape-rendering` and `text-rendering`.
    pub enum RenderingHint {
        #[default]
        Auto = "auto",
        OptimizeSpeed = "optimizeSpeed",
        OptimizeQuality = "optimizeQuality",
        CrispEdges = "crispEdges",
        GeometricPrecision = "geometricPrecision",
        OptimizeLegibility = "optimizeLegibility",
    }
}

keyword_enum! {
    pub enum Display {
        #[default]
        Inline = "inline",
        Block = "block",
        ListItem = "list-item",
        RunIn = "run-in",
        Compact = "compact",
        Marker = "marker",
        Table = "table",
        InlineTable = "inline-table",
        TableRowGroup = "table-row-group",
        TableHeaderGroup = "table-header-group",
        TableFooterGroup = "table-footer-group",
        TableRow = "table-row",
        TableColumnGroup = "table-column-group",
        TableColumn = "table-column",
        TableCell = "table-cell",
        TableCaption = "table-caption",
        None = "none",
    }
}

keyword_enum! {
    pub enum DisplayAlign {
        #[default]
        Auto = "auto",
        Before = "before",
        Center = "center",
        After = "after",
    }
}

keyword_enum! {
    pub enum FillRule {
        #[default]
        NonZero = "nonzero",
        EvenOdd = "evenodd",
    }
}

keyword_enum! {
    pub enum FontStyle {
        #[default]
        Normal = "normal",
        Italic = "italic",
        Oblique = "oblique",
    }
}

keyword_enum! {
    pub enum FontVariant {
        #[default]
        Normal = "normal",
        SmallCaps = "small-caps",
    }
}

keyword_enum! {
    pub enum FontWeight {
        #[default]
        Normal = "normal",
        Bold = "bold",
        Bolder = "bolder",
        Lighter = "lighter",
        W100 = "100",
        W200 = "200",
        W300 = "300",
        W400 = "400",
        W500 = "500",
        W600 = "600",
        W700 = "700",
        W800 = "800",
        W900 = "900",
    }
}

keyword_enum! {
    pub enum PointerEvents {
        #[default]
        VisiblePainted = "visiblePainted",
        VisibleFill = "visibleFill",
        VisibleStroke = "visibleStroke",
        Visible = "visible",
        Painted = "painted",
        Fill = "fill",
        Stroke = "stroke",
        All = "all",
        None = "none",
        BoundingBox = "boundingBox",
    }
}

keyword_enum! {
    pub enum LineCap {
        #[default]
        Butt = "butt",
        Round = "round",
        Square = "square",
    }
}

keyword_enum! {
    pub enum LineJoin {
        #[default]
        Miter = "miter",
        Round = "round",
        Bevel = "bevel",
    }
}

keyword_enum! {
    pub enum TextAlign {
        #[default]
        Start = "start",
        Center = "center",
        End = "end",
    }
}

keyword_enum! {
    pub enum TextAnchor {
        #[default]
        Start = "start",
        Middle = "middle",
        End = "end",
    }
}

keyword_enum! {
    pub enum VectorEffect {
        #[default]
        None = "none",
        NonScalingStroke = "non-scaling-stroke",
    }
}

keyword_enum! {
    pub enum Visibility {
        #[default]
        Visible = "visible",
        Hidden = "hidden",
        Collapse = "collapse",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LineIncrement {
    #[default]
    Auto,
    Value(f32),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashArray {
    #[default]
    None,
    Lengths(Vec<f32>),
}

/// Outcome of [`LocalProperties::assign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyAssignment {
    Assigned,
    Malformed,
    NotAProperty,
}

macro_rules! property_table {
    ($( $field:ident : $ty:ty = $default:expr, $flag:ident, $name:literal, $parse:expr; )+) => {
        /// Fully resolved presentation state at one point of the document.
        #[derive(Debug, Clone, PartialEq)]
        pub struct PropertySet {
            $( pub $field: $ty, )+
        }

        impl Default for PropertySet {
            fn default() -> Self {
                Self {
                    $( $field: $default, )+
                }
            }
        }

        /// Properties specified on one element. `None` means the element says nothing.
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct LocalProperties {
            $( pub $field: Option<Specified<$ty>>, )+
        }

        impl LocalProperties {
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )+
            }

            /// Parses `raw` into the property called `name` (markup spelling, e.g. `stroke-width`).
            /// A later assignment to the same property replaces the earlier one.
            pub fn assign(&mut self, name: &str, raw: &str) -> PropertyAssignment {
                match name {
                    $(
                        $name => {
                            if raw.trim() == "inherit" {
                                self.$field = Some(Specified::Inherit);
                                return PropertyAssignment::Assigned;
                            }
                            match ($parse)(raw) {
                                Some(v) => {
                                    self.$field = Some(Specified::Value(v));
                                    PropertyAssignment::Assigned
                                }
                                None => PropertyAssignment::Malformed,
                            }
                        }
                    )+
                    _ => PropertyAssignment::NotAProperty,
                }
            }
        }

        /// Markup names of every recognized presentation property.
        pub const PROPERTY_NAMES: &[&str] = &[ $( $name, )+ ];

        pub fn is_property_name(name: &str) -> bool {
            PROPERTY_NAMES.contains(&name)
        }

        impl DirtyMask {
            pub fn for_property(name: &str) -> Option<DirtyMask> {
                match name {
                    $( $name => Some(DirtyMask::$flag), )+
                    _ => None,
                }
            }
        }

        pub(crate) fn apply_overrides(
            local: &LocalProperties,
            active: &mut PropertySet,
            mask: &mut DirtyMask,
        ) {
            $(
                match &local.$field {
                    Some(Specified::Value(v)) => active.$field = v.clone(),
                    Some(Specified::Inherit) | None => mask.insert(DirtyMask::$flag),
                }
            )+
        }
    };
}

property_table! {
    audio_level: f32 = 1.0, AUDIO_LEVEL, "audio-level", attr::parse_opacity;
    color: Rgb = Rgb::BLACK, COLOR, "color", attr::parse_color;
    color_rendering: RenderingHint = RenderingHint::Auto, COLOR_RENDERING, "color-rendering", RenderingHint::from_keyword;
    display: Display = Display::Inline, DISPLAY, "display", Display::from_keyword;
    display_align: DisplayAlign = DisplayAlign::Auto, DISPLAY_ALIGN, "display-align", DisplayAlign::from_keyword;
    fill: Paint = Paint::Color(Rgb::BLACK), FILL, "fill", attr::parse_paint;
    fill_opacity: f32 = 1.0, FILL_OPACITY, "fill-opacity", attr::parse_opacity;
    fill_rule: FillRule = FillRule::NonZero, FILL_RULE, "fill-rule", FillRule::from_keyword;
    font_family: String = String::from("Arial"), FONT_FAMILY, "font-family", attr::parse_font_family;
    font_size: f32 = 12.0, FONT_SIZE, "font-size", attr::parse_font_size;
    font_style: FontStyle = FontStyle::Normal, FONT_STYLE, "font-style", FontStyle::from_keyword;
    font_variant: FontVariant = FontVariant::Normal, FONT_VARIANT, "font-variant", FontVariant::from_keyword;
    font_weight: FontWeight = FontWeight::Normal, FONT_WEIGHT, "font-weight", FontWeight::from_keyword;
    image_rendering: RenderingHint = RenderingHint::Auto, IMAGE_RENDERING, "image-rendering", RenderingHint::from_keyword;
    line_increment: LineIncrement = LineIncrement::Auto, LINE_INCREMENT, "line-increment", attr::parse_line_increment;
    opacity: f32 = 1.0, OPACITY, "opacity", attr::parse_opacity;
    pointer_events: PointerEvents = PointerEvents::VisiblePainted, POINTER_EVENTS, "pointer-events", PointerEvents::from_keyword;
    shape_rendering: RenderingHint = RenderingHint::Auto, SHAPE_RENDERING, "shape-rendering", RenderingHint::from_keyword;
    solid_color: Paint = Paint::Color(Rgb::BLACK), SOLID_COLOR, "solid-color", attr::parse_paint;
    solid_opacity: f32 = 1.0, SOLID_OPACITY, "solid-opacity", attr::parse_opacity;
    stop_color: Paint = Paint::Color(Rgb::BLACK), STOP_COLOR, "stop-color", attr::parse_paint;
    stop_opacity: f32 = 1.0, STOP_OPACITY, "stop-opacity", attr::parse_opacity;
    stroke: Paint = Paint::None, STROKE, "stroke", attr::parse_paint;
    stroke_dasharray: DashArray = DashArray::None, STROKE_DASHARRAY, "stroke-dasharray", attr::parse_dash_array;
    stroke_dashoffset: f32 = 0.0, STROKE_DASHOFFSET, "stroke-dashoffset", attr::parse_length_value;
    stroke_linecap: LineCap = LineCap::Butt, STROKE_LINECAP, "stroke-linecap", LineCap::from_keyword;
    stroke_linejoin: LineJoin = LineJoin::Miter, STROKE_LINEJOIN, "stroke-linejoin", LineJoin::from_keyword;
    stroke_miterlimit: f32 = 4.0, STROKE_MITERLIMIT, "stroke-miterlimit", attr::parse_miter_limit;
    stroke_opacity: f32 = 1.0, STROKE_OPACITY, "stroke-opacity", attr::parse_opacity;
    stroke_width: f32 = 1.0, STROKE_WIDTH, "stroke-width", attr::parse_length_value;
    text_align: TextAlign = TextAlign::Start, TEXT_ALIGN, "text-align", TextAlign::from_keyword;
    text_anchor: TextAnchor = TextAnchor::Start, TEXT_ANCHOR, "text-anchor", TextAnchor::from_keyword;
    text_rendering: RenderingHint = RenderingHint::Auto, TEXT_RENDERING, "text-rendering", RenderingHint::from_keyword;
    vector_effect: VectorEffect = VectorEffect::None, VECTOR_EFFECT, "vector-effect", VectorEffect::from_keyword;
    viewport_fill: Paint = Paint::None, VIEWPORT_FILL, "viewport-fill", attr::parse_paint;
    viewport_fill_opacity: f32 = 1.0, VIEWPORT_FILL_OPACITY, "viewport-fill-opacity", attr::parse_opacity;
    visibility: Visibility = Visibility::Visible, VISIBILITY, "visibility", Visibility::from_keyword;
}
