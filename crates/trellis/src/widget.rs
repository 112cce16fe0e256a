//! Node kinds and the capabilities they carry.

use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    event::{InputEvent, Key, KeyAction, PointerAction},
    geom::{Point, Rect, Size},
    layout::Layout,
    node::Node,
    render::{Surface, TextMeasure},
    style::Color,
};

/// The result of offering raw input to a node's widget behaviour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// The widget did nothing with the input.
    Ignore,
    /// The widget was activated from the keyboard; dispatch synthesizes a
    /// click.
    Activate,
    /// The widget asks to scroll by a delta.
    Scroll(Point),
}

/// Per-kind behaviour: sizing, painting, and input handling.
pub trait Widget {
    /// Size used for anchor resolution and layout.
    fn intrinsic_size(&self, node: &Node, measure: &dyn TextMeasure) -> Size;

    /// Paint the node's own content (never its children) at `bounds`.
    fn paint(&self, node: &Node, bounds: Rect, opacity: f32, surface: &mut dyn Surface);

    /// React to raw input delivered to this node.
    fn handle_input(&self, node: &Node, input: &InputEvent) -> InputOutcome;
}

/// The closed set of node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NodeKind {
    /// A plain rectangle that may hold children.
    #[default]
    Panel,
    /// Static text.
    Label,
    /// A focusable, clickable text button.
    Button,
    /// A layout container.
    Container,
    /// An overlay opened through the modal stack.
    Modal,
    /// A clipping container with a scroll offset.
    ScrollView,
    /// An image placeholder; pixels come from the host.
    Image,
}

impl NodeKind {
    /// All node kinds.
    pub const ALL: [Self; 7] = [
        Self::Panel,
        Self::Label,
        Self::Button,
        Self::Container,
        Self::Modal,
        Self::ScrollView,
        Self::Image,
    ];

    /// Canonical kind name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Panel => "panel",
            Self::Label => "label",
            Self::Button => "button",
            Self::Container => "container",
            Self::Modal => "modal",
            Self::ScrollView => "scroll-view",
            Self::Image => "image",
        }
    }

    /// The capabilities a freshly created node of this kind carries.
    pub fn capabilities(self, font_size: f32) -> Capabilities {
        let text = || {
            Some(TextCapability {
                text: String::new(),
                font_size,
                auto_size: false,
            })
        };
        let container = |clip_children| {
            Some(ContainerCapability {
                layout: Layout::None,
                clip_children,
            })
        };
        match self {
            Self::Label | Self::Button => Capabilities {
                text: text(),
                ..Default::default()
            },
            Self::Panel | Self::Container | Self::Modal => Capabilities {
                container: container(false),
                ..Default::default()
            },
            Self::ScrollView => Capabilities {
                container: container(true),
                scroll: Some(ScrollCapability::default()),
                ..Default::default()
            },
            Self::Image => Capabilities::default(),
        }
    }

    /// Whether nodes of this kind accept focus by default.
    pub fn focusable(self) -> bool {
        matches!(self, Self::Button)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_case(Case::Kebab);
        Self::ALL
            .into_iter()
            .find(|k| k.name() == key)
            .ok_or_else(|| Error::Configuration(format!("unknown node kind: {s:?}")))
    }
}

impl TryFrom<String> for NodeKind {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<NodeKind> for String {
    fn from(k: NodeKind) -> Self {
        k.name().to_string()
    }
}

/// Text content.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCapability {
    /// The text.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Derive the intrinsic size from the measured text.
    pub auto_size: bool,
}

/// The ability to own a layout strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerCapability {
    /// Active strategy.
    pub layout: Layout,
    /// Clip painting and hit testing of children to the content area.
    pub clip_children: bool,
}

/// A scroll offset applied to the content area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollCapability {
    /// Content offset; positive values scroll content up and left.
    pub offset: Point,
}

/// Optional behaviour attached to a node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Capabilities {
    /// Text content.
    pub text: Option<TextCapability>,
    /// Layout container.
    pub container: Option<ContainerCapability>,
    /// Scrolling.
    pub scroll: Option<ScrollCapability>,
}

impl Widget for NodeKind {
    fn intrinsic_size(&self, node: &Node, measure: &dyn TextMeasure) -> Size {
        let declared = Size::new(node.width, node.height).sanitized();
        match &node.caps.text {
            Some(t) if t.auto_size => {
                let m = measure.measure(&t.text, t.font_size);
                let p = node.padding;
                Size::new(m.w + p.horizontal(), m.h + p.vertical()).sanitized()
            }
            _ => declared,
        }
    }

    fn paint(&self, node: &Node, bounds: Rect, opacity: f32, surface: &mut dyn Surface) {
        let style = &node.style;
        if let Some(bg) = style.background {
            surface.fill_rect(bounds, bg.with_opacity(opacity));
        }
        if let Some(border) = style.border
            && style.border_width > 0.0
        {
            surface.stroke_rect(bounds, border.with_opacity(opacity), style.border_width);
        }
        if let Some(t) = &node.caps.text
            && !t.text.is_empty()
        {
            let fg = style.foreground.unwrap_or(Color::BLACK);
            let content = bounds.inset(node.padding);
            surface.draw_text(content.origin(), &t.text, t.font_size, fg.with_opacity(opacity));
        }
    }

    fn handle_input(&self, node: &Node, input: &InputEvent) -> InputOutcome {
        match (self, input) {
            (Self::Button, InputEvent::Key(k))
                if k.action == KeyAction::Down && matches!(k.key, Key::Enter | Key::Space) =>
            {
                InputOutcome::Activate
            }
            (_, InputEvent::Pointer(p)) if node.caps.scroll.is_some() => match p.action {
                PointerAction::Wheel { dx, dy } => InputOutcome::Scroll(Point::new(dx, dy)),
                _ => InputOutcome::Ignore,
            },
            _ => InputOutcome::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() -> Result<()> {
        for k in NodeKind::ALL {
            assert_eq!(k.name().parse::<NodeKind>()?, k);
        }
        assert_eq!("ScrollView".parse::<NodeKind>()?, NodeKind::ScrollView);
        assert!("slider".parse::<NodeKind>().is_err());
        Ok(())
    }

    #[test]
    fn default_capabilities() {
        let caps = NodeKind::Button.capabilities(14.0);
        assert!(caps.text.is_some());
        assert!(caps.container.is_none());
        let caps = NodeKind::ScrollView.capabilities(14.0);
        assert!(caps.scroll.is_some());
        assert_eq!(caps.container.map(|c| c.clip_children), Some(true));
        assert!(NodeKind::Image.capabilities(14.0).container.is_none());
    }
}
