//! The nine anchor presets that position a node inside its parent's content
//! area.

use std::{fmt, str::FromStr};

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    geom::{Point, Rect, Size},
};

/// A named rule resolving a child's origin within a content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Anchor {
    /// Top-left corner, offset by the node's local position.
    #[default]
    TopLeft,
    /// Centered horizontally along the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Centered vertically along the left edge.
    CenterLeft,
    /// Centered on both axes.
    Center,
    /// Centered vertically along the right edge.
    CenterRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Centered horizontally along the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

/// Position along one axis.
#[derive(Clone, Copy)]
enum Edge {
    /// Leading edge.
    Start,
    /// Middle.
    Middle,
    /// Trailing edge.
    End,
}

impl Edge {
    /// Offset of an extent `len` inside `[origin, origin + avail)`.
    fn place(self, origin: f32, avail: f32, len: f32) -> f32 {
        match self {
            Self::Start => origin,
            Self::Middle => origin + (avail - len) / 2.0,
            Self::End => origin + avail - len,
        }
    }
}

impl Anchor {
    /// All presets, row-major from top-left.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Canonical kebab-case identifier.
    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Horizontal and vertical placement rules.
    fn edges(self) -> (Edge, Edge) {
        match self {
            Self::TopLeft => (Edge::Start, Edge::Start),
            Self::TopCenter => (Edge::Middle, Edge::Start),
            Self::TopRight => (Edge::End, Edge::Start),
            Self::CenterLeft => (Edge::Start, Edge::Middle),
            Self::Center => (Edge::Middle, Edge::Middle),
            Self::CenterRight => (Edge::End, Edge::Middle),
            Self::BottomLeft => (Edge::Start, Edge::End),
            Self::BottomCenter => (Edge::Middle, Edge::End),
            Self::BottomRight => (Edge::End, Edge::End),
        }
    }

    /// Resolve the origin of a node of `size` inside `content`.
    ///
    /// Only [`Anchor::TopLeft`] honours the local offset; every other preset
    /// is a closed-form function of the content area and node size.
    pub fn resolve(self, content: Rect, size: Size, local: Point) -> Point {
        match self {
            Self::TopLeft => Point::new(content.x + local.x, content.y + local.y),
            _ => {
                let (h, v) = self.edges();
                Point::new(
                    h.place(content.x, content.w, size.w),
                    v.place(content.y, content.h, size.h),
                )
            }
        }
    }

    /// Resolve to a full rectangle of `size` inside `content`.
    pub fn place(self, content: Rect, size: Size, local: Point) -> Rect {
        Rect::from_origin_size(self.resolve(content, size, local), size)
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = Error;

    /// Accepts any casing of the preset names: `bottom-right`,
    /// `bottom_right`, and `BottomRight` are all equivalent.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_case(Case::Kebab);
        Self::ALL
            .into_iter()
            .find(|a| a.name() == key)
            .ok_or_else(|| Error::Configuration(format!("invalid anchor: {s:?}")))
    }
}

impl TryFrom<String> for Anchor {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Anchor> for String {
    fn from(a: Anchor) -> Self {
        a.name().to_string()
    }
}
