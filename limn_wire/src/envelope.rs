// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Encoding of asynchronous response documents.

use limn_model::DepictId;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::WireError;

/// One instruction to the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Load a different page, optionally into a named viewport.
    Navigate {
        /// The destination URI.
        uri: String,
        /// The viewport to load into, when not the whole window.
        viewport: Option<String>,
    },
    /// Replace one component's markup with a self-describing fragment.
    Patch {
        /// The replacement markup.
        markup: String,
        /// Whether the client must leave focused input values untouched
        /// while applying this patch.
        no_value: bool,
    },
    /// Delete one component's markup.
    Remove {
        /// The component to delete.
        id: DepictId,
    },
    /// Reload the whole page instead of patching.
    Reload,
}

/// The ordered directives of one asynchronous response.
///
/// Directives serialize in insertion order; callers are responsible for the
/// protocol-level ordering rules, such as a reload standing alone.
///
/// ```
/// use limn_wire::ResponseEnvelope;
///
/// let mut envelope = ResponseEnvelope::new();
/// envelope.remove(limn_model::DepictId::from_raw(9));
/// let doc = envelope.encode().unwrap();
/// assert!(doc.contains("<remove id=\"9\"/>"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseEnvelope {
    directives: Vec<Directive>,
}

impl ResponseEnvelope {
    /// Creates an empty envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a navigation directive.
    pub fn navigate(&mut self, uri: impl Into<String>, viewport: Option<String>) {
        self.directives.push(Directive::Navigate {
            uri: uri.into(),
            viewport,
        });
    }

    /// Appends a patch directive carrying a self-describing fragment.
    pub fn patch(&mut self, markup: impl Into<String>, no_value: bool) {
        self.directives.push(Directive::Patch {
            markup: markup.into(),
            no_value,
        });
    }

    /// Appends a remove directive.
    pub fn remove(&mut self, id: DepictId) {
        self.directives.push(Directive::Remove { id });
    }

    /// Appends a whole-page reload directive.
    pub fn reload(&mut self) {
        self.directives.push(Directive::Reload);
    }

    /// The directives appended so far, in order.
    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Whether no directive has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Serializes the envelope as the response document.
    pub fn encode(&self) -> Result<String, WireError> {
        let mut writer = Writer::new(Vec::new());
        emit(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
        )?;
        emit(&mut writer, Event::Start(BytesStart::new("response")))?;
        for directive in &self.directives {
            match directive {
                Directive::Navigate { uri, viewport } => {
                    let mut start = BytesStart::new("navigate");
                    if let Some(viewport) = viewport {
                        start.push_attribute(("viewport", viewport.as_str()));
                    }
                    emit(&mut writer, Event::Start(start))?;
                    emit(&mut writer, Event::Text(BytesText::new(uri)))?;
                    emit(&mut writer, Event::End(BytesEnd::new("navigate")))?;
                }
                Directive::Patch { markup, no_value } => {
                    let mut start = BytesStart::new("patch");
                    if *no_value {
                        start.push_attribute(("noValue", "true"));
                    }
                    emit(&mut writer, Event::Start(start))?;
                    // Patch content is already markup; write it verbatim.
                    emit(&mut writer, Event::Text(BytesText::from_escaped(markup)))?;
                    emit(&mut writer, Event::End(BytesEnd::new("patch")))?;
                }
                Directive::Remove { id } => {
                    let mut start = BytesStart::new("remove");
                    start.push_attribute(("id", id.to_string().as_str()));
                    emit(&mut writer, Event::Empty(start))?;
                }
                Directive::Reload => {
                    emit(&mut writer, Event::Empty(BytesStart::new("reload")))?;
                }
            }
        }
        emit(&mut writer, Event::End(BytesEnd::new("response")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), WireError> {
    writer
        .write_event(event)
        .map_err(|error| WireError::Write(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_serialize_in_insertion_order() {
        let mut envelope = ResponseEnvelope::new();
        envelope.navigate("/next", Some("main".into()));
        envelope.patch("<div xmlns=\"http://www.w3.org/1999/xhtml\"/>", true);
        envelope.remove(DepictId::from_raw(12));

        let doc = envelope.encode().unwrap();
        assert!(doc.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        let navigate = doc.find("<navigate viewport=\"main\">/next</navigate>").unwrap();
        let patch = doc.find("<patch noValue=\"true\">").unwrap();
        let remove = doc.find("<remove id=\"12\"/>").unwrap();
        assert!(navigate < patch && patch < remove, "ordering in {doc}");
    }

    #[test]
    fn patch_markup_is_embedded_verbatim() {
        let mut envelope = ResponseEnvelope::new();
        envelope.patch("<span id=\"c4\">a &amp; b</span>", false);
        let doc = envelope.encode().unwrap();
        assert!(doc.contains("<patch><span id=\"c4\">a &amp; b</span></patch>"));
    }

    #[test]
    fn reload_serializes_alone() {
        let mut envelope = ResponseEnvelope::new();
        envelope.reload();
        let doc = envelope.encode().unwrap();
        assert!(doc.contains("<response><reload/></response>"));
    }

    #[test]
    fn empty_envelope_is_a_bare_response() {
        let doc = ResponseEnvelope::new().encode().unwrap();
        assert!(doc.ends_with("<response></response>"));
    }
}
