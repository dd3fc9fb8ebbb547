//! Closed set of component kinds.

use std::fmt;

use serde_json::{Map, Value};

/// Every component kind the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    // Layout
    Column,
    Row,
    Card,
    List,
    // Text & content
    Text,
    Icon,
    Image,
    Divider,
    Markdown,
    Quote,
    Figure,
    // Interactive
    Button,
    TextField,
    CheckBox,
    Slider,
    Tabs,
    Modal,
    Conditional,
    // Media
    Video,
    Audio,
    // Data display
    Chart,
    Table,
    Progress,
    Rating,
    Stat,
    MetricCard,
    // Feedback & status
    Badge,
    Avatar,
    Alert,
    TagList,
    // Process & timeline
    Steps,
    Timeline,
    Accordion,
    // E-commerce
    Price,
}

impl ComponentKind {
    /// Look up a kind by its wire name. Names are case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Column" => Self::Column,
            "Row" => Self::Row,
            "Card" => Self::Card,
            "List" => Self::List,
            "Text" => Self::Text,
            "Icon" => Self::Icon,
            "Image" => Self::Image,
            "Divider" => Self::Divider,
            "Markdown" => Self::Markdown,
            "Quote" => Self::Quote,
            "Figure" => Self::Figure,
            "Button" => Self::Button,
            "TextField" => Self::TextField,
            "CheckBox" => Self::CheckBox,
            "Slider" => Self::Slider,
            "Tabs" => Self::Tabs,
            "Modal" => Self::Modal,
            "Conditional" => Self::Conditional,
            "Video" => Self::Video,
            "Audio" => Self::Audio,
            "Chart" => Self::Chart,
            "Table" => Self::Table,
            "Progress" => Self::Progress,
            "Rating" => Self::Rating,
            "Stat" => Self::Stat,
            "MetricCard" => Self::MetricCard,
            "Badge" => Self::Badge,
            "Avatar" => Self::Avatar,
            "Alert" => Self::Alert,
            "TagList" => Self::TagList,
            "Steps" => Self::Steps,
            "Timeline" => Self::Timeline,
            "Accordion" => Self::Accordion,
            "Price" => Self::Price,
            _ => return None,
        };
        Some(kind)
    }

    /// Wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Column => "Column",
            Self::Row => "Row",
            Self::Card => "Card",
            Self::List => "List",
            Self::Text => "Text",
            Self::Icon => "Icon",
            Self::Image => "Image",
            Self::Divider => "Divider",
            Self::Markdown => "Markdown",
            Self::Quote => "Quote",
            Self::Figure => "Figure",
            Self::Button => "Button",
            Self::TextField => "TextField",
            Self::CheckBox => "CheckBox",
            Self::Slider => "Slider",
            Self::Tabs => "Tabs",
            Self::Modal => "Modal",
            Self::Conditional => "Conditional",
            Self::Video => "Video",
            Self::Audio => "Audio",
            Self::Chart => "Chart",
            Self::Table => "Table",
            Self::Progress => "Progress",
            Self::Rating => "Rating",
            Self::Stat => "Stat",
            Self::MetricCard => "MetricCard",
            Self::Badge => "Badge",
            Self::Avatar => "Avatar",
            Self::Alert => "Alert",
            Self::TagList => "TagList",
            Self::Steps => "Steps",
            Self::Timeline => "Timeline",
            Self::Accordion => "Accordion",
            Self::Price => "Price",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of a validated node.
///
/// Unrecognised kinds are kept as an explicit variant so the original
/// payload stays inspectable while the node renders as a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Known(ComponentKind),
    Unknown {
        kind: String,
        raw_properties: Map<String, Value>,
    },
}

impl NodeKind {
    /// The kind the renderer should draw. Unknown kinds render as `Text`.
    pub fn rendered_as(&self) -> ComponentKind {
        match self {
            NodeKind::Known(kind) => *kind,
            NodeKind::Unknown { .. } => ComponentKind::Text,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, NodeKind::Unknown { .. })
    }
}
