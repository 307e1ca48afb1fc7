use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Declares the closed drawing-primitive vocabulary together with its wire names.
macro_rules! shape_types {
    ($($variant:ident => $name:literal,)+) => {
        /// A drawing primitive a shape element may use.
        ///
        /// The wire name of each variant is the camelCase primitive name used by presentation
        /// writers (e.g. `roundRect`, `flowChartDecision`, `star5`).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ShapeType {
            $($variant,)+
        }

        impl ShapeType {
            /// Every primitive in the vocabulary, in wire-name order.
            pub const ALL: &'static [ShapeType] = &[$(ShapeType::$variant,)+];

            /// The wire name of this primitive.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ShapeType::$variant => $name,)+
                }
            }

            /// Exact (case-sensitive) lookup of a wire name. Aliases are not resolved here;
            /// see [`ShapeType::resolve`].
            pub fn from_name(name: &str) -> Option<ShapeType> {
                match name {
                    $($name => Some(ShapeType::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

shape_types! {
    AccentBorderCallout1 => "accentBorderCallout1",
    AccentBorderCallout2 => "accentBorderCallout2",
    AccentBorderCallout3 => "accentBorderCallout3",
    AccentCallout1 => "accentCallout1",
    AccentCallout2 => "accentCallout2",
    AccentCallout3 => "accentCallout3",
    ActionButtonBackPrevious => "actionButtonBackPrevious",
    ActionButtonBeginning => "actionButtonBeginning",
    ActionButtonBlank => "actionButtonBlank",
    ActionButtonDocument => "actionButtonDocument",
    ActionButtonEnd => "actionButtonEnd",
    ActionButtonForwardNext => "actionButtonForwardNext",
    ActionButtonHelp => "actionButtonHelp",
    ActionButtonHome => "actionButtonHome",
    ActionButtonInformation => "actionButtonInformation",
    ActionButtonMovie => "actionButtonMovie",
    ActionButtonReturn => "actionButtonReturn",
    ActionButtonSound => "actionButtonSound",
    Arc => "arc",
    BentArrow => "bentArrow",
    BentUpArrow => "bentUpArrow",
    Bevel => "bevel",
    BlockArc => "blockArc",
    BorderCallout1 => "borderCallout1",
    BorderCallout2 => "borderCallout2",
    BorderCallout3 => "borderCallout3",
    BracePair => "bracePair",
    BracketPair => "bracketPair",
    Callout1 => "callout1",
    Callout2 => "callout2",
    Callout3 => "callout3",
    Can => "can",
    ChartPlus => "chartPlus",
    ChartStar => "chartStar",
    ChartX => "chartX",
    Chevron => "chevron",
    Chord => "chord",
    CircularArrow => "circularArrow",
    Cloud => "cloud",
    CloudCallout => "cloudCallout",
    Corner => "corner",
    CornerTabs => "cornerTabs",
    Cube => "cube",
    CurvedDownArrow => "curvedDownArrow",
    CurvedLeftArrow => "curvedLeftArrow",
    CurvedRightArrow => "curvedRightArrow",
    CurvedUpArrow => "curvedUpArrow",
    Decagon => "decagon",
    DiagStripe => "diagStripe",
    Diamond => "diamond",
    Dodecagon => "dodecagon",
    Donut => "donut",
    DoubleWave => "doubleWave",
    DownArrow => "downArrow",
    DownArrowCallout => "downArrowCallout",
    Ellipse => "ellipse",
    EllipseRibbon => "ellipseRibbon",
    EllipseRibbon2 => "ellipseRibbon2",
    FlowChartAlternateProcess => "flowChartAlternateProcess",
    FlowChartCollate => "flowChartCollate",
    FlowChartConnector => "flowChartConnector",
    FlowChartDecision => "flowChartDecision",
    FlowChartDelay => "flowChartDelay",
    FlowChartDisplay => "flowChartDisplay",
    FlowChartDocument => "flowChartDocument",
    FlowChartExtract => "flowChartExtract",
    FlowChartInputOutput => "flowChartInputOutput",
    FlowChartInternalStorage => "flowChartInternalStorage",
    FlowChartMagneticDisk => "flowChartMagneticDisk",
    FlowChartMagneticDrum => "flowChartMagneticDrum",
    FlowChartMagneticTape => "flowChartMagneticTape",
    FlowChartManualInput => "flowChartManualInput",
    FlowChartManualOperation => "flowChartManualOperation",
    FlowChartMerge => "flowChartMerge",
    FlowChartMultidocument => "flowChartMultidocument",
    FlowChartOfflineStorage => "flowChartOfflineStorage",
    FlowChartOffpageConnector => "flowChartOffpageConnector",
    FlowChartOnlineStorage => "flowChartOnlineStorage",
    FlowChartOr => "flowChartOr",
    FlowChartPredefinedProcess => "flowChartPredefinedProcess",
    FlowChartPreparation => "flowChartPreparation",
    FlowChartProcess => "flowChartProcess",
    FlowChartPunchedCard => "flowChartPunchedCard",
    FlowChartPunchedTape => "flowChartPunchedTape",
    FlowChartSort => "flowChartSort",
    FlowChartSummingJunction => "flowChartSummingJunction",
    FlowChartTerminator => "flowChartTerminator",
    FolderCorner => "folderCorner",
    Frame => "frame",
    Funnel => "funnel",
    Gear6 => "gear6",
    Gear9 => "gear9",
    HalfFrame => "halfFrame",
    Heart => "heart",
    Heptagon => "heptagon",
    Hexagon => "hexagon",
    HomePlate => "homePlate",
    HorizontalScroll => "horizontalScroll",
    IrregularSeal1 => "irregularSeal1",
    IrregularSeal2 => "irregularSeal2",
    LeftArrow => "leftArrow",
    LeftArrowCallout => "leftArrowCallout",
    LeftBrace => "leftBrace",
    LeftBracket => "leftBracket",
    LeftCircularArrow => "leftCircularArrow",
    LeftRightArrow => "leftRightArrow",
    LeftRightArrowCallout => "leftRightArrowCallout",
    LeftRightCircularArrow => "leftRightCircularArrow",
    LeftRightRibbon => "leftRightRibbon",
    LeftRightUpArrow => "leftRightUpArrow",
    LeftUpArrow => "leftUpArrow",
    LightningBolt => "lightningBolt",
    Line => "line",
    LineInv => "lineInv",
    MathDivide => "mathDivide",
    MathEqual => "mathEqual",
    MathMinus => "mathMinus",
    MathMultiply => "mathMultiply",
    MathNotEqual => "mathNotEqual",
    MathPlus => "mathPlus",
    Moon => "moon",
    NonIsoscelesTrapezoid => "nonIsoscelesTrapezoid",
    NoSmoking => "noSmoking",
    NotchedRightArrow => "notchedRightArrow",
    Octagon => "octagon",
    Parallelogram => "parallelogram",
    Pentagon => "pentagon",
    Pie => "pie",
    PieWedge => "pieWedge",
    Plaque => "plaque",
    PlaqueTabs => "plaqueTabs",
    Plus => "plus",
    QuadArrow => "quadArrow",
    QuadArrowCallout => "quadArrowCallout",
    Rect => "rect",
    Ribbon => "ribbon",
    Ribbon2 => "ribbon2",
    RightArrow => "rightArrow",
    RightArrowCallout => "rightArrowCallout",
    RightBrace => "rightBrace",
    RightBracket => "rightBracket",
    Round1Rect => "round1Rect",
    Round2DiagRect => "round2DiagRect",
    Round2SameRect => "round2SameRect",
    RoundRect => "roundRect",
    RtTriangle => "rtTriangle",
    SmileyFace => "smileyFace",
    Snip1Rect => "snip1Rect",
    Snip2DiagRect => "snip2DiagRect",
    Snip2SameRect => "snip2SameRect",
    SnipRoundRect => "snipRoundRect",
    SquareTabs => "squareTabs",
    Star10 => "star10",
    Star12 => "star12",
    Star16 => "star16",
    Star24 => "star24",
    Star32 => "star32",
    Star4 => "star4",
    Star5 => "star5",
    Star6 => "star6",
    Star7 => "star7",
    Star8 => "star8",
    StripedRightArrow => "stripedRightArrow",
    Sun => "sun",
    SwooshArrow => "swooshArrow",
    Teardrop => "teardrop",
    Trapezoid => "trapezoid",
    Triangle => "triangle",
    UpArrow => "upArrow",
    UpArrowCallout => "upArrowCallout",
    UpDownArrow => "upDownArrow",
    UpDownArrowCallout => "upDownArrowCallout",
    UturnArrow => "uturnArrow",
    VerticalScroll => "verticalScroll",
    Wave => "wave",
    WedgeEllipseCallout => "wedgeEllipseCallout",
    WedgeRectCallout => "wedgeRectCallout",
    WedgeRoundRectCallout => "wedgeRoundRectCallout",
}

/// Names content authors use that are not in the vocabulary but map onto a primitive.
const SHAPE_ALIASES: &[(&str, &str)] = &[("doughnut", "donut"), ("oval", "ellipse")];

/// Maps an alias onto its canonical wire name; any other name is returned unchanged.
pub fn resolve_shape_alias(name: &str) -> &str {
    SHAPE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(name)
}

impl ShapeType {
    /// Resolves an authored shape name: alias remapping first, then vocabulary lookup.
    pub fn resolve(name: &str) -> Option<ShapeType> {
        ShapeType::from_name(resolve_shape_alias(name))
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ShapeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ShapeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        ShapeType::resolve(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown shape type: {name}")))
    }
}
