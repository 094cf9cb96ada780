// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding of asynchronous request documents.

use limn_model::DepictId;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::debug;

use crate::error::WireError;
use crate::event::{
    ActionEvent, ControlEvent, DropEvent, FormEvent, IdRect, InitEvent, MouseEvent, MouseKind,
    ParamValue, ParameterMap, Point, Rect,
};

/// Decodes the event batch an asynchronous request posts.
///
/// The document root wraps one event element per posted event; events come
/// back in document order. A malformed event (an action without a component
/// identifier, a mouse crossing with unparseable geometry, an element this
/// protocol does not know) is dropped with a debug log and the remaining
/// events still decode. Only a document that is not well-formed XML fails
/// the batch.
pub fn decode_events(document: &str) -> Result<Vec<ControlEvent>, WireError> {
    let mut reader = Reader::from_str(document);
    reader.config_mut().trim_text(true);

    let mut events = Vec::new();
    let mut saw_root = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if !saw_root {
                    saw_root = true;
                    continue;
                }
                match e.local_name().as_ref() {
                    b"form" => {
                        events.push(ControlEvent::Form(decode_form(&mut reader, &e, false)?));
                    }
                    b"mouseEnter" => {
                        if let Some(mouse) = decode_mouse(&mut reader, &e, MouseKind::Enter)? {
                            events.push(ControlEvent::Mouse(mouse));
                        }
                    }
                    b"mouseExit" => {
                        if let Some(mouse) = decode_mouse(&mut reader, &e, MouseKind::Exit)? {
                            events.push(ControlEvent::Mouse(mouse));
                        }
                    }
                    name => {
                        // Flat events may still be written with separate
                        // open and close tags; skip their (empty) content.
                        let event = decode_flat(name, &attrs(&e)?);
                        reader.read_to_end(e.name())?;
                        events.extend(event);
                    }
                }
            }
            Event::Empty(e) => {
                if !saw_root {
                    // An empty root carries no events.
                    break;
                }
                match e.local_name().as_ref() {
                    b"form" => {
                        events.push(ControlEvent::Form(decode_form(&mut reader, &e, true)?));
                    }
                    name @ (b"mouseEnter" | b"mouseExit") => {
                        debug!(
                            element = %String::from_utf8_lossy(name),
                            "dropping mouse event without geometry"
                        );
                    }
                    name => events.extend(decode_flat(name, &attrs(&e)?)),
                }
            }
            Event::End(_) | Event::Eof => break,
            _ => {}
        }
    }
    Ok(events)
}

/// Decodes an event element that carries everything in its attributes.
fn decode_flat(name: &[u8], attrs: &[(String, String)]) -> Option<ControlEvent> {
    match name {
        b"action" => {
            let Some(component) = id_attr(attrs, "componentID") else {
                debug!("dropping action event without a component identifier");
                return None;
            };
            Some(ControlEvent::Action(ActionEvent {
                component,
                target: id_attr(attrs, "targetID"),
                action: find(attrs, "actionID").map(str::to_owned),
            }))
        }
        b"drop" => {
            let (Some(source), Some(target)) =
                (id_attr(attrs, "sourceID"), id_attr(attrs, "targetID"))
            else {
                debug!("dropping drop event without source and target");
                return None;
            };
            Some(ControlEvent::Drop(DropEvent { source, target }))
        }
        b"init" => {
            let Some(language) = find(attrs, "language") else {
                debug!("dropping init event without a language tag");
                return None;
            };
            Some(ControlEvent::Init(InitEvent {
                language: language.to_owned(),
                timezone_offset_minutes: int_attr(attrs, "timezone").unwrap_or(0),
                screen_width: uint_attr(attrs, "screenWidth").unwrap_or(0),
                screen_height: uint_attr(attrs, "screenHeight").unwrap_or(0),
                browser_width: uint_attr(attrs, "browserWidth").unwrap_or(0),
                browser_height: uint_attr(attrs, "browserHeight").unwrap_or(0),
                color_depth: uint_attr(attrs, "colorDepth").unwrap_or(0),
                javascript_version: find(attrs, "javascriptVersion").map(str::to_owned),
                java_enabled: find(attrs, "javaEnabled") == Some("true"),
                referrer: find(attrs, "referrer").map(str::to_owned),
            }))
        }
        other => {
            debug!(
                element = %String::from_utf8_lossy(other),
                "dropping unrecognized event element"
            );
            None
        }
    }
}

/// Decodes a form event, reading `control` children until the close tag.
fn decode_form(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    empty: bool,
) -> Result<FormEvent, WireError> {
    let form_attrs = attrs(start)?;
    let exhaustive = find(&form_attrs, "exhaustive") == Some("true");
    let all_provisional = find(&form_attrs, "provisional") == Some("true");

    let mut parameters = ParameterMap::new();
    if !empty {
        loop {
            match reader.read_event()? {
                Event::Empty(e) if e.local_name().as_ref() == b"control" => {
                    record_control(&mut parameters, &attrs(&e)?, all_provisional);
                }
                Event::Start(e) => {
                    if e.local_name().as_ref() == b"control" {
                        record_control(&mut parameters, &attrs(&e)?, all_provisional);
                    }
                    reader.read_to_end(e.name())?;
                }
                Event::End(e) if e.local_name().as_ref() == b"form" => break,
                Event::Eof => break,
                _ => {}
            }
        }
    }
    Ok(FormEvent {
        exhaustive,
        parameters,
    })
}

fn record_control(parameters: &mut ParameterMap, control: &[(String, String)], provisional: bool) {
    let Some(name) = find(control, "name") else {
        debug!("dropping form control without a name");
        return;
    };
    if let Some(value) = find(control, "provisionalValue") {
        parameters.append(name, ParamValue::Provisional(value.to_owned()));
    } else if let Some(value) = find(control, "value") {
        let value = value.to_owned();
        parameters.append(
            name,
            if provisional {
                ParamValue::Provisional(value)
            } else {
                ParamValue::Text(value)
            },
        );
    } else {
        parameters.append(name, ParamValue::Text(String::new()));
    }
}

/// Decodes a mouse crossing, reading the geometry children until the close
/// tag. Returns `None` when any required geometry is missing or fails to
/// parse; the surrounding batch still decodes.
fn decode_mouse(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart<'_>,
    kind: MouseKind,
) -> Result<Option<MouseEvent>, WireError> {
    let close = start.local_name().as_ref().to_vec();
    let mut component = None;
    let mut target = None;
    let mut viewport = None;
    let mut position = None;
    let mut bad = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => {
                let geometry = attrs(&e)?;
                match e.local_name().as_ref() {
                    b"component" => match id_rect(&geometry) {
                        Some(v) => component = Some(v),
                        None => bad = true,
                    },
                    b"target" => match id_rect(&geometry) {
                        Some(v) => target = Some(v),
                        None => bad = true,
                    },
                    b"viewport" => match rect(&geometry) {
                        Some(v) => viewport = Some(v),
                        None => bad = true,
                    },
                    b"mouse" => match point(&geometry) {
                        Some(v) => position = Some(v),
                        None => bad = true,
                    },
                    _ => {}
                }
            }
            Event::End(e) if e.local_name().as_ref() == close.as_slice() => break,
            Event::Eof => break,
            _ => {}
        }
    }

    match (component, target, viewport, position) {
        (Some(component), Some(target), Some(viewport), Some(position)) if !bad => {
            Ok(Some(MouseEvent {
                kind,
                component,
                target,
                viewport,
                position,
            }))
        }
        _ => {
            debug!("dropping mouse event with missing or unparseable geometry");
            Ok(None)
        }
    }
}

fn id_rect(attrs: &[(String, String)]) -> Option<IdRect> {
    Some(IdRect {
        id: id_attr(attrs, "id")?,
        rect: rect(attrs)?,
    })
}

fn rect(attrs: &[(String, String)]) -> Option<Rect> {
    Some(Rect {
        x: int_attr(attrs, "x")?,
        y: int_attr(attrs, "y")?,
        width: int_attr(attrs, "width")?,
        height: int_attr(attrs, "height")?,
    })
}

fn point(attrs: &[(String, String)]) -> Option<Point> {
    Some(Point {
        x: int_attr(attrs, "x")?,
        y: int_attr(attrs, "y")?,
    })
}

/// Reads an element's attributes into owned pairs.
fn attrs(e: &BytesStart<'_>) -> Result<Vec<(String, String)>, WireError> {
    let mut out = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|_| WireError::BadAttribute)?;
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|_| WireError::BadAttribute)?
            .into_owned();
        out.push((key, value));
    }
    Ok(out)
}

fn find<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn id_attr(attrs: &[(String, String)], name: &str) -> Option<DepictId> {
    find(attrs, name)?.parse().ok().map(DepictId::from_raw)
}

fn int_attr(attrs: &[(String, String)], name: &str) -> Option<i32> {
    find(attrs, name)?.parse().ok()
}

fn uint_attr(attrs: &[(String, String)], name: &str) -> Option<u32> {
    find(attrs, name)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_back_in_document_order() {
        let doc = r#"<events>
            <form exhaustive="false">
                <control name="amount" value="42"/>
            </form>
            <action componentID="7" actionID="save"/>
        </events>"#;
        let events = decode_events(doc).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ControlEvent::Form(_)));
        let ControlEvent::Action(action) = &events[1] else {
            panic!("expected action, got {:?}", events[1]);
        };
        assert_eq!(action.component, DepictId::from_raw(7));
        assert_eq!(action.action.as_deref(), Some("save"));
        assert_eq!(action.target, None);
    }

    #[test]
    fn action_without_component_is_skipped() {
        let doc = r#"<events>
            <action actionID="save"/>
            <drop sourceID="3" targetID="4"/>
        </events>"#;
        let events = decode_events(doc).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ControlEvent::Drop(_)));
    }

    #[test]
    fn provisional_control_values_are_marked() {
        let doc = r#"<events>
            <form exhaustive="false">
                <control name="amount" provisionalValue="abc"/>
            </form>
        </events>"#;
        let events = decode_events(doc).unwrap();
        let ControlEvent::Form(form) = &events[0] else {
            panic!("expected form");
        };
        assert!(!form.exhaustive);
        assert_eq!(
            form.parameters.first("amount"),
            Some(&ParamValue::Provisional("abc".into()))
        );
    }

    #[test]
    fn duplicate_form_names_accumulate() {
        let doc = r#"<events>
            <form exhaustive="true">
                <control name="choice" value="a"/>
                <control name="choice" value="b"/>
            </form>
        </events>"#;
        let events = decode_events(doc).unwrap();
        let ControlEvent::Form(form) = &events[0] else {
            panic!("expected form");
        };
        assert_eq!(form.parameters.get("choice").len(), 2);
    }

    #[test]
    fn mouse_event_decodes_geometry() {
        let doc = r#"<events>
            <mouseEnter>
                <viewport x="0" y="0" width="800" height="600"/>
                <component id="5" x="10" y="20" width="100" height="30"/>
                <target id="6" x="12" y="22" width="40" height="10"/>
                <mouse x="15" y="25"/>
            </mouseEnter>
        </events>"#;
        let events = decode_events(doc).unwrap();
        let ControlEvent::Mouse(mouse) = &events[0] else {
            panic!("expected mouse");
        };
        assert_eq!(mouse.kind, MouseKind::Enter);
        assert_eq!(mouse.component.id, DepictId::from_raw(5));
        assert_eq!(mouse.target.rect.width, 40);
        assert_eq!(mouse.position, Point { x: 15, y: 25 });
    }

    #[test]
    fn bad_mouse_geometry_drops_only_that_event() {
        let doc = r#"<events>
            <mouseExit>
                <viewport x="0" y="0" width="800" height="600"/>
                <component id="5" x="ten" y="20" width="100" height="30"/>
                <target id="6" x="12" y="22" width="40" height="10"/>
                <mouse x="15" y="25"/>
            </mouseExit>
            <action componentID="9"/>
        </events>"#;
        let events = decode_events(doc).unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], ControlEvent::Action(_)));
    }

    #[test]
    fn unknown_mouse_subtype_is_skipped() {
        let doc = r#"<events>
            <mouseWiggle>
                <mouse x="1" y="2"/>
            </mouseWiggle>
            <action componentID="9"/>
        </events>"#;
        let events = decode_events(doc).unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn init_event_exposes_environment() {
        let doc = r#"<events>
            <init language="en-US" timezone="-300" screenWidth="1920"
                  screenHeight="1080" colorDepth="24" javaEnabled="false"/>
        </events>"#;
        let events = decode_events(doc).unwrap();
        let ControlEvent::Init(init) = &events[0] else {
            panic!("expected init");
        };
        assert_eq!(init.language, "en-US");
        assert_eq!(init.timezone_offset_minutes, -300);
        assert_eq!(init.screen_width, 1920);
        assert_eq!(init.javascript_version, None);
        assert!(!init.java_enabled);
    }

    #[test]
    fn empty_root_decodes_to_no_events() {
        assert!(decode_events("<events/>").unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_an_error() {
        assert!(decode_events("<events><form></events>").is_err());
    }
}
