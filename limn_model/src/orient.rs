// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional orientation and logical side mapping.
//!
//! Components carry box-model values (border, margin, padding) keyed by
//! *logical* sides relative to their flow orientation. Markup output names
//! *physical* sides, so a logical side must be resolved through the
//! component's current [`Flow`] before it can be named in CSS.

/// The flow orientation of a component's content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Line axis runs left-to-right, page axis top-to-bottom.
    #[default]
    LeftToRight,
    /// Line axis runs right-to-left, page axis top-to-bottom.
    RightToLeft,
    /// Line axis runs top-to-bottom, page axis left-to-right.
    TopToBottom,
}

/// A side relative to the flow orientation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicalSide {
    /// The near side of the line axis (e.g. left in left-to-right flow).
    LineNear,
    /// The far side of the line axis.
    LineFar,
    /// The near side of the page axis (e.g. top in horizontal flows).
    PageNear,
    /// The far side of the page axis.
    PageFar,
}

impl LogicalSide {
    /// All logical sides, in line-near, line-far, page-near, page-far order.
    pub const ALL: [Self; 4] = [Self::LineNear, Self::LineFar, Self::PageNear, Self::PageFar];

    /// Resolves this logical side to a physical side under `flow`.
    ///
    /// # Example
    ///
    /// ```
    /// use limn_model::{Flow, LogicalSide, PhysicalSide};
    ///
    /// assert_eq!(
    ///     LogicalSide::LineNear.physical(Flow::LeftToRight),
    ///     PhysicalSide::Left
    /// );
    /// assert_eq!(
    ///     LogicalSide::LineNear.physical(Flow::RightToLeft),
    ///     PhysicalSide::Right
    /// );
    /// ```
    #[must_use]
    pub fn physical(self, flow: Flow) -> PhysicalSide {
        match (flow, self) {
            (Flow::LeftToRight, Self::LineNear) => PhysicalSide::Left,
            (Flow::LeftToRight, Self::LineFar) => PhysicalSide::Right,
            (Flow::RightToLeft, Self::LineNear) => PhysicalSide::Right,
            (Flow::RightToLeft, Self::LineFar) => PhysicalSide::Left,
            (Flow::LeftToRight | Flow::RightToLeft, Self::PageNear) => PhysicalSide::Top,
            (Flow::LeftToRight | Flow::RightToLeft, Self::PageFar) => PhysicalSide::Bottom,
            (Flow::TopToBottom, Self::LineNear) => PhysicalSide::Top,
            (Flow::TopToBottom, Self::LineFar) => PhysicalSide::Bottom,
            (Flow::TopToBottom, Self::PageNear) => PhysicalSide::Left,
            (Flow::TopToBottom, Self::PageFar) => PhysicalSide::Right,
        }
    }
}

/// A physical side, as named in markup output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PhysicalSide {
    /// The top edge.
    Top,
    /// The right edge.
    Right,
    /// The bottom edge.
    Bottom,
    /// The left edge.
    Left,
}

impl PhysicalSide {
    /// The CSS name of this side.
    #[must_use]
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}
