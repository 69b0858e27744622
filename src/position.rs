//! Anchored placement of a floating element next to a target element.
//!
//! [`compute_placement`] is a pure function of two viewport-relative
//! rectangles and a [`Placement`]. [`Positioner`] is the host-side holder of
//! the last result: the host calls [`Positioner::update`] with freshly
//! measured geometry on first mount and after every resize, scroll, or
//! layout change. Subscribing to those events is the host's job.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn from_edges(top: f64, left: f64, right: f64, bottom: f64) -> Self {
        Self::new(top, left, right - left, bottom - top)
    }

    /// A rect with only a size, for elements whose position is irrelevant.
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Finite everywhere with a non-negative size.
    pub fn is_measurable(&self) -> bool {
        [self.top, self.left, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl Side {
    fn is_vertical(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    pub fn cycle(self) -> Self {
        match self {
            Align::Start => Align::Center,
            Align::Center => Align::End,
            Align::End => Align::Start,
        }
    }
}

/// Where the floating element sits relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub side: Side,
    pub align: Align,
    /// gap between target and element, away from the target
    pub offset: f64,
}

impl Placement {
    pub fn new(side: Side, align: Align, offset: f64) -> Self {
        Self {
            side,
            align,
            offset,
        }
    }
}

/// Viewport-relative top/left of the floating element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub top: f64,
    pub left: f64,
}

impl Coordinate {
    pub fn to_style(self) -> PositionStyle {
        PositionStyle {
            position: "fixed",
            top: format!("{}px", self.top),
            left: format!("{}px", self.left),
        }
    }
}

/// Style object ready to hand to a view layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionStyle {
    pub position: &'static str,
    pub top: String,
    pub left: String,
}

pub fn compute_placement(target: &Rect, element: &Rect, placement: &Placement) -> Coordinate {
    let offset = placement.offset;
    let mut coord = Coordinate::default();

    match placement.side {
        Side::Top => coord.top = target.top - element.height - offset,
        Side::Bottom => coord.top = target.bottom() + offset,
        Side::Left => coord.left = target.left - element.width - offset,
        Side::Right => coord.left = target.right() + offset,
    }

    if placement.side.is_vertical() {
        coord.left = match placement.align {
            Align::Start => target.left,
            Align::Center => target.left + (target.width - element.width) / 2.0,
            Align::End => target.right() - element.width,
        };
    } else {
        coord.top = match placement.align {
            Align::Start => target.top,
            Align::Center => target.top + (target.height - element.height) / 2.0,
            Align::End => target.bottom() - element.height,
        };
    }

    coord
}

/// Keeps the last placement result for a host.
#[derive(Debug, Clone, Default)]
pub struct Positioner {
    placement: Placement,
    coordinate: Option<Coordinate>,
}

impl Positioner {
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            coordinate: None,
        }
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Takes effect on the next `update`; the host re-measures and calls it.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Recompute from fresh geometry. If either element is not mounted yet
    /// (or measured garbage) the previous coordinate is kept.
    pub fn update(&mut self, target: Option<Rect>, element: Option<Rect>) -> Option<Coordinate> {
        match (target, element) {
            (Some(target), Some(element)) if target.is_measurable() && element.is_measurable() => {
                let coord = compute_placement(&target, &element, &self.placement);
                if self.coordinate != Some(coord) {
                    debug!(
                        side = %self.placement.side,
                        align = %self.placement.align,
                        top = coord.top,
                        left = coord.left,
                        "placement updated"
                    );
                }
                self.coordinate = Some(coord);
            }
            _ => trace!("geometry unavailable, keeping previous placement"),
        }
        self.coordinate
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    /// Style for the current coordinate, the origin before the first
    /// successful measurement.
    pub fn style(&self) -> PositionStyle {
        self.coordinate.unwrap_or_default().to_style()
    }
}
