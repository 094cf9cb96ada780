// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Control events decoded from client requests.

use limn_model::DepictId;

/// A single event posted by the client.
///
/// Events arrive batched in one request document; [`crate::decode_events`]
/// yields them in document order, which is the order the session must
/// dispatch them in.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlEvent {
    /// Form parameter values, provisional or committed.
    Form(FormEvent),
    /// An action fired on a component.
    Action(ActionEvent),
    /// A drag source dropped onto a drop target.
    Drop(DropEvent),
    /// The pointer entered or left a mouse listener.
    Mouse(MouseEvent),
    /// A fresh page load announcing the client environment.
    Init(InitEvent),
}

/// How a form parameter value travels on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A committed text value.
    Text(String),
    /// An in-progress value that must not round-trip back to the client.
    Provisional(String),
    /// An uploaded resource from a multipart submission.
    Resource(ResourceImport),
}

impl ParamValue {
    /// The textual payload, if this value is textual.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Provisional(s) => Some(s),
            Self::Resource(_) => None,
        }
    }

    /// Whether this value is provisional.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }
}

/// An uploaded file from a multipart submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceImport {
    /// The client-side file name.
    pub filename: String,
    /// The declared media type, if the client sent one.
    pub content_type: Option<String>,
    /// The raw uploaded bytes.
    pub bytes: Vec<u8>,
}

/// An insertion-ordered multimap of form parameters.
///
/// Repeated names accumulate values instead of overwriting, and iteration
/// replays names in first-seen order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterMap {
    entries: Vec<(String, Vec<ParamValue>)>,
}

impl ParameterMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value under `name`, preserving earlier values.
    pub fn append(&mut self, name: &str, value: ParamValue) {
        if let Some((_, values)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            values.push(value);
        } else {
            self.entries.push((name.to_owned(), vec![value]));
        }
    }

    /// The values recorded under `name`, in arrival order.
    #[must_use]
    pub fn get(&self, name: &str) -> &[ParamValue] {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// The first value recorded under `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&ParamValue> {
        self.get(name).first()
    }

    /// Whether any value was recorded under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Iterates names in first-seen order with their accumulated values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParamValue])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// The number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Form parameter values posted by the client.
#[derive(Clone, Debug, PartialEq)]
pub struct FormEvent {
    /// Whether the submission names every bound control.
    ///
    /// An exhaustive submission clears controls it omits; a partial one
    /// only touches the controls it names. Plain page submissions are
    /// always exhaustive.
    pub exhaustive: bool,
    /// The posted parameters, in document order.
    pub parameters: ParameterMap,
}

/// An action fired on a component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionEvent {
    /// The component the event is addressed to.
    pub component: DepictId,
    /// A distinct component to act on, when the client designates one.
    pub target: Option<DepictId>,
    /// Which of the component's actions fired, if the client names one.
    pub action: Option<String>,
}

/// A completed drag and drop gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropEvent {
    /// The component the drag started on.
    pub source: DepictId,
    /// The component the drag ended on.
    pub target: DepictId,
}

/// Whether the pointer entered or left the listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseKind {
    /// The pointer moved onto the listener.
    Enter,
    /// The pointer moved off the listener.
    Exit,
}

/// An integer point in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

/// An integer rectangle in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

/// A component identifier with its on-screen geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdRect {
    /// The component the geometry belongs to.
    pub id: DepictId,
    /// Where the component sits in the viewport.
    pub rect: Rect,
}

/// A pointer crossing reported by a mouse listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// Enter or exit.
    pub kind: MouseKind,
    /// The listener the event is addressed to.
    pub component: IdRect,
    /// The innermost component under the pointer.
    pub target: IdRect,
    /// The visible viewport.
    pub viewport: Rect,
    /// The pointer position.
    pub position: Point,
}

/// Client environment details posted once per fresh page load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitEvent {
    /// The client locale tag.
    pub language: String,
    /// Minutes offset from UTC, positive east of Greenwich.
    pub timezone_offset_minutes: i32,
    /// Screen width in pixels.
    pub screen_width: u32,
    /// Screen height in pixels.
    pub screen_height: u32,
    /// Browser window width in pixels.
    pub browser_width: u32,
    /// Browser window height in pixels.
    pub browser_height: u32,
    /// Bits per pixel.
    pub color_depth: u32,
    /// The scripting level the client reports, if any.
    pub javascript_version: Option<String>,
    /// Whether the client runs applets.
    pub java_enabled: bool,
    /// The referring page, if any.
    pub referrer: Option<String>,
}
