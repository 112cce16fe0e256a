use std::{fmt, str::FromStr};

use crate::{
    error::{Error, Result},
    geom::{extent, finite_or_zero},
    node::Node,
};

/// A numeric node property that can be animated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Property {
    /// Local x.
    X,
    /// Local y.
    Y,
    /// Declared width.
    Width,
    /// Declared height.
    Height,
    /// Stacking order, rounded to the nearest integer on write.
    Z,
    /// Paint opacity, clamped to `[0, 1]` on write.
    Opacity,
    /// Horizontal scroll offset of a scroll-capable node.
    ScrollX,
    /// Vertical scroll offset of a scroll-capable node.
    ScrollY,
    /// A named custom property.
    Custom(String),
}

/// What a property write invalidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Effect {
    /// Nothing geometric.
    Paint,
    /// The node's own bounds.
    Geometry,
    /// The node's content area, and so its descendants.
    Content,
}

impl Property {
    /// Parse a property name. Names other than the built-ins are custom
    /// properties and must exist on the target node when animated.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "x" => Self::X,
            "y" => Self::Y,
            "width" => Self::Width,
            "height" => Self::Height,
            "z" => Self::Z,
            "opacity" => Self::Opacity,
            "scroll-x" => Self::ScrollX,
            "scroll-y" => Self::ScrollY,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Property name.
    pub fn name(&self) -> &str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Width => "width",
            Self::Height => "height",
            Self::Z => "z",
            Self::Opacity => "opacity",
            Self::ScrollX => "scroll-x",
            Self::ScrollY => "scroll-y",
            Self::Custom(name) => name,
        }
    }

    /// True if writing this property changes bounds.
    pub fn affects_geometry(&self) -> bool {
        matches!(
            self,
            Self::X | Self::Y | Self::Width | Self::Height | Self::ScrollX | Self::ScrollY
        )
    }

    /// Current value on `node`, or [`Error::Configuration`] if the node does
    /// not carry this property.
    pub(crate) fn read(&self, node: &Node) -> Result<f32> {
        let missing = || {
            Error::Configuration(format!(
                "{} nodes have no animatable property {:?}",
                node.kind,
                self.name()
            ))
        };
        Ok(match self {
            Self::X => node.x,
            Self::Y => node.y,
            Self::Width => node.width,
            Self::Height => node.height,
            Self::Z => node.z as f32,
            Self::Opacity => node.opacity,
            Self::ScrollX => node.caps.scroll.ok_or_else(missing)?.offset.x,
            Self::ScrollY => node.caps.scroll.ok_or_else(missing)?.offset.y,
            Self::Custom(name) => node.prop(name).ok_or_else(missing)?,
        })
    }

    /// Write `value` to `node`, sanitizing it, and report what it
    /// invalidates.
    pub(crate) fn write(&self, node: &mut Node, value: f32) -> Effect {
        let value = finite_or_zero(value);
        match self {
            Self::X => {
                node.x = value;
                Effect::Geometry
            }
            Self::Y => {
                node.y = value;
                Effect::Geometry
            }
            Self::Width => {
                node.width = extent(value);
                Effect::Geometry
            }
            Self::Height => {
                node.height = extent(value);
                Effect::Geometry
            }
            Self::Z => {
                node.z = value.round() as i32;
                Effect::Paint
            }
            Self::Opacity => {
                node.opacity = value.clamp(0.0, 1.0);
                Effect::Paint
            }
            Self::ScrollX | Self::ScrollY => {
                if let Some(scroll) = &mut node.caps.scroll {
                    if *self == Self::ScrollX {
                        scroll.offset.x = value;
                    } else {
                        scroll.offset.y = value;
                    }
                }
                Effect::Content
            }
            Self::Custom(name) => {
                node.props.insert(name.clone(), value);
                Effect::Paint
            }
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Err(Error::Configuration("empty property name".into()));
        }
        Ok(Self::from_name(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() -> Result<()> {
        for name in ["x", "y", "width", "height", "z", "opacity", "scroll-x", "scroll-y"] {
            let p: Property = name.parse()?;
            assert_eq!(p.name(), name);
            assert!(!matches!(p, Property::Custom(_)));
        }
        assert_eq!("glow".parse::<Property>()?, Property::Custom("glow".into()));
        assert!("  ".parse::<Property>().is_err());
        assert!(Property::Width.affects_geometry());
        assert!(!Property::Opacity.affects_geometry());
        Ok(())
    }
}
