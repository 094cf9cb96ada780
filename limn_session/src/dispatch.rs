// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event dispatch: resolving decoded events to live components.

use tracing::debug;

use limn_model::{Capabilities, DepictId};
use limn_wire::{ActionEvent, ControlEvent, DropEvent, FormEvent, InitEvent, MouseEvent, ParamValue};

use crate::session::Session;

/// The reserved form parameter that resolves an action target instead of a
/// control value.
const ACTION_PARAM: &str = "action";

impl Session {
    /// Dispatches one decoded event to its resolved components.
    ///
    /// Events that resolve to nothing are absorbed: a stale component id is
    /// an ordinary race with the client, not an error.
    pub(crate) fn dispatch(&mut self, event: &ControlEvent) {
        match event {
            ControlEvent::Form(form) => self.dispatch_form(form),
            ControlEvent::Action(action) => self.dispatch_action(action),
            ControlEvent::Drop(drop) => self.dispatch_drop(drop),
            ControlEvent::Mouse(mouse) => self.dispatch_mouse(mouse),
            ControlEvent::Init(init) => self.dispatch_init(init),
        }
    }

    fn dispatch_form(&mut self, form: &FormEvent) {
        let mut touched = Vec::new();
        for (name, values) in form.parameters.iter() {
            if name == ACTION_PARAM {
                self.dispatch_form_actions(values);
                continue;
            }
            let controls = self.tree.find_controls(name);
            if controls.is_empty() {
                debug!(field = %name, "no control bound to form field");
                continue;
            }
            for id in controls {
                touched.push(id);
                for value in values {
                    self.apply_value(id, value);
                }
            }
        }
        if form.exhaustive {
            self.clear_omitted_controls(&touched);
        }
    }

    /// The reserved `action` parameter carries the id of the component whose
    /// action fired.
    fn dispatch_form_actions(&mut self, values: &[ParamValue]) {
        for value in values {
            let Some(raw) = value.as_text().and_then(|text| text.parse::<u64>().ok()) else {
                debug!("ignoring unparseable action parameter");
                continue;
            };
            let event = ActionEvent {
                component: DepictId::from_raw(raw),
                target: None,
                action: None,
            };
            self.dispatch_action(&event);
        }
    }

    /// An exhaustive submission names every bound control; clear the
    /// editable ones it omitted (an unchecked checkbox submits nothing).
    fn clear_omitted_controls(&mut self, touched: &[DepictId]) {
        let omitted: Vec<DepictId> = self
            .tree
            .descendants(self.tree.root())
            .into_iter()
            .filter(|id| {
                !touched.contains(id)
                    && self.tree.get(*id).is_some_and(|c| {
                        c.name.is_some() && c.enabled && c.editable
                    })
            })
            .collect();
        for id in omitted {
            if let Some(component) = self.tree.get_mut(id) {
                if component.commit_value(None) {
                    self.log.mark(id);
                }
            }
        }
    }

    fn apply_value(&mut self, id: DepictId, value: &ParamValue) {
        match value {
            ParamValue::Provisional(text) => {
                let Some(component) = self.tree.get_mut(id) else {
                    return;
                };
                if component.set_provisional(Some(text.clone())) {
                    self.log.mark(id);
                }
            }
            ParamValue::Text(text) => self.apply_text(id, text),
            ParamValue::Resource(import) => {
                let Some(component) = self.tree.get_mut(id) else {
                    return;
                };
                if !component.capabilities.contains(Capabilities::VALUE_IMPORT) {
                    debug!(component = %id, "dropping resource for a control that cannot import");
                    return;
                }
                if component.commit_value(Some(import.filename.clone())) {
                    self.log.mark(id);
                }
            }
        }
    }

    /// Applies a committed text value, converting it for the control kind.
    ///
    /// A conversion failure attaches a user-visible notification instead of
    /// aborting the request; it renders as an inline error on the next
    /// patch.
    fn apply_text(&mut self, id: DepictId, text: &str) {
        let Some(component) = self.tree.get_mut(id) else {
            return;
        };
        match convert_value(component.kind().has_ancestor("checkbox"), text) {
            Ok(converted) => {
                let had_notifications = !component.notifications().is_empty();
                component.clear_notifications();
                if component.commit_value(converted) || had_notifications {
                    self.log.mark(id);
                }
            }
            Err(message) => {
                debug!(component = %id, %message, "value conversion failed");
                component.push_notification(message);
                self.log.mark(id);
            }
        }
    }

    fn dispatch_action(&mut self, event: &ActionEvent) {
        if !self.tree.contains(event.component) {
            debug!(component = %event.component, "action on unresolvable component");
            return;
        }
        if let Some(delegate) = self.delegate.as_deref_mut() {
            if let Some(navigation) = delegate.on_action(&mut self.tree, &mut self.log, event) {
                self.pending = Some(navigation);
            }
        }
    }

    fn dispatch_drop(&mut self, event: &DropEvent) {
        let source_ok = self.tree.get(event.source).is_some_and(|c| {
            c.capabilities.contains(Capabilities::DRAG_SOURCE)
        });
        let target_ok = self.tree.get(event.target).is_some_and(|c| {
            c.capabilities.contains(Capabilities::DROP_TARGET)
        });
        if !source_ok || !target_ok {
            debug!(source = %event.source, target = %event.target, "drop on unresolvable or incapable components");
            return;
        }
        if let Some(delegate) = self.delegate.as_deref_mut() {
            delegate.on_drop(&mut self.tree, &mut self.log, event);
        }
    }

    fn dispatch_mouse(&mut self, event: &MouseEvent) {
        let listener = self.tree.get(event.component.id).is_some_and(|c| {
            c.capabilities.contains(Capabilities::MOUSE_LISTENER)
        });
        if !listener {
            debug!(component = %event.component.id, "mouse event on unresolvable component");
            return;
        }
        if let Some(delegate) = self.delegate.as_deref_mut() {
            delegate.on_mouse(&mut self.tree, &mut self.log, event);
        }
    }

    fn dispatch_init(&mut self, init: &InitEvent) {
        debug!(language = %init.language, timezone = init.timezone_offset_minutes, "client init");
        self.client = Some(init.clone());
    }
}

/// Converts posted text for the target control kind.
///
/// Toggle controls accept the boolean spellings browsers send; everything
/// else passes through, with the empty string clearing the value.
fn convert_value(toggle: bool, text: &str) -> Result<Option<String>, String> {
    if toggle {
        return match text {
            "true" | "on" => Ok(Some(String::from("true"))),
            "" | "false" | "off" => Ok(Some(String::from("false"))),
            other => Err(format!("{other:?} is not a toggle value")),
        };
    }
    if text.is_empty() {
        Ok(None)
    } else {
        Ok(Some(String::from(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_conversion() {
        assert_eq!(convert_value(true, "on"), Ok(Some("true".into())));
        assert_eq!(convert_value(true, ""), Ok(Some("false".into())));
        assert!(convert_value(true, "maybe").is_err());
    }

    #[test]
    fn text_conversion_clears_on_empty() {
        assert_eq!(convert_value(false, ""), Ok(None));
        assert_eq!(convert_value(false, "42"), Ok(Some("42".into())));
    }
}
