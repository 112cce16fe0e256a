//! Serializable configuration for the manager and for node creation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    anchor::Anchor,
    error::Result,
    geom::{Edges, Size},
    layout::{LayoutConfig, LayoutItem},
    render::MonospaceMeasure,
    style::Style,
    widget::NodeKind,
};

/// Manager-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Canvas size used as the content area of parentless nodes.
    pub viewport: Size,
    /// Stacking order assigned to the first open modal; each further modal
    /// sits one above the previous top.
    pub modal_z_base: i32,
    /// Pixels scrolled per unit of wheel delta.
    pub wheel_step: f32,
    /// Default font size for text-bearing nodes.
    pub font_size: f32,
    /// Monospace character advance as a fraction of the font size.
    pub char_advance: f32,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        let m = MonospaceMeasure::default();
        Self {
            viewport: Size::new(800.0, 600.0),
            modal_z_base: 1000,
            wheel_step: 20.0,
            font_size: 14.0,
            char_advance: m.advance,
            line_height: m.line_height,
        }
    }
}

impl UiConfig {
    /// Load settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the viewport size.
    pub fn viewport(mut self, w: f32, h: f32) -> Self {
        self.viewport = Size::new(w, h);
        self
    }

    /// The default text measurer for these settings.
    pub fn measure(&self) -> MonospaceMeasure {
        MonospaceMeasure {
            advance: self.char_advance,
            line_height: self.line_height,
        }
    }
}

/// Everything needed to create a node.
///
/// String identifiers (kind, anchor, layout strategy) are validated when the
/// configuration is deserialized or converted, failing with
/// [`Error::Configuration`](crate::Error::Configuration).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Node type.
    pub kind: NodeKind,
    /// Name; normalised to snake case. Defaults to the kind name.
    pub name: Option<String>,
    /// Local x.
    pub x: f32,
    /// Local y.
    pub y: f32,
    /// Declared width.
    pub width: f32,
    /// Declared height.
    pub height: f32,
    /// Stacking order.
    pub z: i32,
    /// Anchor preset.
    pub anchor: Anchor,
    /// Outer insets.
    pub margin: Edges,
    /// Inner insets.
    pub padding: Edges,
    /// Initial visibility.
    pub visible: bool,
    /// Initially enabled.
    pub enabled: bool,
    /// Candidate for hit testing.
    pub interactive: bool,
    /// Focusable; defaults per kind.
    pub focusable: Option<bool>,
    /// Draggable.
    pub draggable: bool,
    /// Initially selected.
    pub selected: bool,
    /// Text for labels and buttons.
    pub text: Option<String>,
    /// Font size override.
    pub font_size: Option<f32>,
    /// Size text-bearing nodes from their measured text.
    pub auto_size: bool,
    /// Layout strategy for containers.
    pub layout: Option<LayoutConfig>,
    /// Parameters for the parent's layout strategy.
    pub item: LayoutItem,
    /// Named numeric properties.
    pub props: HashMap<String, f32>,
    /// Paint opacity.
    pub opacity: f32,
    /// Paint style.
    pub style: Style,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            kind: NodeKind::Panel,
            name: None,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            z: 0,
            anchor: Anchor::TopLeft,
            margin: Edges::zero(),
            padding: Edges::zero(),
            visible: true,
            enabled: true,
            interactive: true,
            focusable: None,
            draggable: false,
            selected: false,
            text: None,
            font_size: None,
            auto_size: false,
            layout: None,
            item: LayoutItem::default(),
            props: HashMap::new(),
            opacity: 1.0,
            style: Style::default(),
        }
    }
}

impl NodeConfig {
    /// A default configuration for `kind`.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    /// Load a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the local position.
    pub fn pos(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the declared size.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set position and size together.
    pub fn rect(self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.pos(x, y).size(width, height)
    }

    /// Set the stacking order.
    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    /// Set the anchor.
    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the margin.
    pub fn margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set initial visibility.
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the enabled flag.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the interactive flag.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Set the focusable flag.
    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = Some(focusable);
        self
    }

    /// Set the draggable flag.
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    /// Set the text.
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Size from measured text.
    pub fn auto_size(mut self, auto_size: bool) -> Self {
        self.auto_size = auto_size;
        self
    }

    /// Set the layout strategy.
    pub fn layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Set the per-child layout parameters.
    pub fn item(mut self, item: LayoutItem) -> Self {
        self.item = item;
        self
    }

    /// Set a named numeric property.
    pub fn prop(mut self, name: &str, value: f32) -> Self {
        self.props.insert(name.to_string(), value);
        self
    }

    /// Set the paint style.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }
}
