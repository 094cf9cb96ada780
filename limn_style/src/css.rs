// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inline CSS derivation for outer and body elements.
//!
//! The outer element carries presentation state (display, color, opacity);
//! the body element carries box model, cursor, font, and extent. Border,
//! margin, and padding are stored per logical side and resolved to physical
//! sides through the component's flow orientation; zero widths are omitted
//! because the stylesheet default is zero.

use limn_model::{Component, Flow, LogicalSide, LogicalSides};

fn push_decl(out: &mut String, name: &str, value: &str) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(name);
    out.push_str(": ");
    out.push_str(value);
    out.push(';');
}

fn push_px_decl(out: &mut String, name: &str, px: u32) {
    push_decl(out, name, &format!("{px}px"));
}

/// Derives the inline style string for the outer presentation element.
///
/// Covers display, foreground color, and opacity. Returns an empty string
/// when every property is at its stylesheet default.
#[must_use]
pub fn outer_style(component: &Component) -> String {
    let mut out = String::new();
    if !component.visible {
        push_decl(&mut out, "display", "none");
    }
    if let Some(color) = &component.color {
        push_decl(&mut out, "color", color);
    }
    if let Some(opacity) = component.opacity {
        push_decl(&mut out, "opacity", &format!("{opacity}"));
    }
    out
}

fn push_sides(out: &mut String, sides: &LogicalSides, flow: Flow, fmt: impl Fn(&str) -> String) {
    for side in LogicalSide::ALL {
        let width = sides.get(side);
        if width != 0 {
            let physical = side.physical(flow);
            push_px_decl(out, &fmt(physical.css_name()), u32::from(width));
        }
    }
}

/// Derives the inline style string for the body content element.
///
/// Covers background, per-physical-side border/margin/padding (written only
/// when non-zero), cursor, font, and the extent resolved through the flow
/// axis (line extent becomes width in horizontal flows and height in
/// vertical flow).
#[must_use]
pub fn body_style(component: &Component) -> String {
    let mut out = String::new();
    if let Some(background) = &component.background {
        push_decl(&mut out, "background-color", background);
    }
    let flow = component.flow;
    push_sides(&mut out, &component.border, flow, |side| {
        format!("border-{side}-width")
    });
    push_sides(&mut out, &component.margin, flow, |side| {
        format!("margin-{side}")
    });
    push_sides(&mut out, &component.padding, flow, |side| {
        format!("padding-{side}")
    });
    if let Some(cursor) = &component.cursor {
        push_decl(&mut out, "cursor", cursor);
    }
    if let Some(family) = &component.font.family {
        push_decl(&mut out, "font-family", family);
    }
    if let Some(size) = component.font.size {
        push_px_decl(&mut out, "font-size", u32::from(size));
    }
    if component.font.italic {
        push_decl(&mut out, "font-style", "italic");
    }
    if component.font.bold {
        push_decl(&mut out, "font-weight", "bold");
    }
    let (width, height) = match flow {
        Flow::LeftToRight | Flow::RightToLeft => (component.extent.line, component.extent.page),
        Flow::TopToBottom => (component.extent.page, component.extent.line),
    };
    if let Some(width) = width {
        push_px_decl(&mut out, "width", width);
    }
    if let Some(height) = height {
        push_px_decl(&mut out, "height", height);
    }
    out
}
