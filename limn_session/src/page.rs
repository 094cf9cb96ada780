// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Full-page request handling.

use tracing::trace;

use limn_depict::{DepictContext, XHTML_NS};
use limn_model::Capabilities;
use limn_wire::{ControlEvent, decode_form_urlencoded, decode_multipart, multipart_boundary};

use crate::cookies::{SetCookie, reconcile_cookies};
use crate::error::SessionError;
use crate::session::Session;

const DOCTYPE: &str = "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\" \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">";

const URLENCODED: &str = "application/x-www-form-urlencoded";
const MULTIPART: &str = "multipart/form-data";

/// Client script wiring control events back to the session endpoint.
const BOOTSTRAP: &str = "window.limn = { endpoint: window.location.pathname };";

/// One plain (non-AJAX) HTTP request.
#[derive(Clone, Copy, Debug)]
pub struct PageRequest<'a> {
    /// The request path.
    pub path: &'a str,
    /// The cookies the request carried.
    pub cookies: &'a [(String, String)],
    /// The POST body, if this is a submission.
    pub post: Option<PostBody<'a>>,
}

/// A POST body with its declared content type.
#[derive(Clone, Copy, Debug)]
pub struct PostBody<'a> {
    /// The `Content-Type` header value.
    pub content_type: &'a str,
    /// The raw body bytes.
    pub body: &'a [u8],
}

/// The response to a plain HTTP request.
#[derive(Clone, Debug)]
pub struct PageResponse {
    /// Cookie headers, computed strictly before the markup.
    pub cookies: Vec<SetCookie>,
    /// Redirect target instead of content, when navigation was requested.
    pub redirect: Option<String>,
    /// The full-page markup; empty when redirecting.
    pub markup: String,
}

impl Session {
    /// Handles one plain GET or POST under the session lock.
    ///
    /// Cookie reconciliation happens before any markup is produced. A POST
    /// body decodes as one exhaustive form event; a navigation requested
    /// during dispatch turns into a redirect instead of content.
    pub fn handle_full_page(&mut self, request: &PageRequest<'_>) -> Result<PageResponse, SessionError> {
        if let Some(modal) = &self.modal {
            if request.path != modal.uri {
                return Ok(PageResponse {
                    cookies: Vec::new(),
                    redirect: Some(modal.uri.clone()),
                    markup: String::new(),
                });
            }
            self.modal = None;
        }

        let cookies = reconcile_cookies(&self.environment, request.cookies);

        if let Some(post) = &request.post {
            let event = decode_post(post)?;
            self.dispatch(&event);
        }

        if let Some(nav) = self.pending.take() {
            if nav.modal {
                self.modal = Some(nav.clone());
            }
            return Ok(PageResponse {
                cookies,
                redirect: Some(nav.uri),
                markup: String::new(),
            });
        }

        let markup = self.render_page(request.path)?;
        let drain = self.log.begin_drain();
        drain.commit();
        let root = self.tree.root();
        for member in self.tree.descendants(root) {
            if let Some(component) = self.tree.get_mut(member) {
                component.clear_value_patch_suppressed();
            }
        }
        Ok(PageResponse {
            cookies,
            redirect: None,
            markup,
        })
    }

    fn render_page(&mut self, path: &str) -> Result<String, SessionError> {
        trace!("rendering full page");
        self.ensure_installed(self.tree.root())?;
        let multipart = self.any_resource_importing_control();
        let title = self
            .tree
            .get(self.tree.root())
            .and_then(|c| c.label.clone())
            .unwrap_or_else(|| String::from("Limn"));

        let mut cx = DepictContext::new();
        cx.start_element(XHTML_NS, "html")?;
        cx.indented(|cx| -> Result<(), SessionError> {
            cx.start_element(XHTML_NS, "head")?;
            cx.indented(|cx| -> Result<(), SessionError> {
                cx.start_element(XHTML_NS, "meta")?;
                cx.attribute("http-equiv", "Content-Type")?;
                cx.attribute("content", "application/xhtml+xml; charset=UTF-8")?;
                cx.end_element()?;
                cx.start_element(XHTML_NS, "title")?;
                cx.text(&title);
                cx.end_element()?;
                for href in &self.stylesheets {
                    cx.start_element(XHTML_NS, "link")?;
                    cx.attribute("rel", "stylesheet")?;
                    cx.attribute("type", "text/css")?;
                    cx.attribute("href", href)?;
                    cx.end_element()?;
                }
                cx.start_element(XHTML_NS, "script")?;
                cx.attribute("type", "text/javascript")?;
                cx.text(BOOTSTRAP);
                cx.end_element()?;
                Ok(())
            })?;
            cx.end_element()?;

            cx.start_element(XHTML_NS, "body")?;
            cx.indented(|cx| -> Result<(), SessionError> {
                cx.start_element(XHTML_NS, "form")?;
                cx.attribute("method", "post")?;
                cx.attribute("action", path)?;
                cx.attribute(
                    "enctype",
                    if multipart { MULTIPART } else { URLENCODED },
                )?;
                cx.indented(|cx| {
                    let root = self.tree.root();
                    self.depictors.depict(cx, &self.tree, root)
                })?;
                cx.end_element()?;
                Ok(())
            })?;
            cx.end_element()?;
            Ok(())
        })?;
        cx.end_element()?;

        let body = cx.finish()?;
        Ok(format!("{DOCTYPE}\n{body}"))
    }

    /// Whether any bound control can import a resource; selects the
    /// multipart enctype.
    fn any_resource_importing_control(&self) -> bool {
        self.tree
            .descendants(self.tree.root())
            .iter()
            .any(|id| {
                self.tree.get(*id).is_some_and(|c| {
                    c.name.is_some() && c.capabilities.contains(Capabilities::VALUE_IMPORT)
                })
            })
    }
}

fn decode_post(post: &PostBody<'_>) -> Result<ControlEvent, SessionError> {
    let media_type = post
        .content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    match media_type.as_str() {
        URLENCODED => {
            let body = String::from_utf8_lossy(post.body);
            Ok(ControlEvent::Form(decode_form_urlencoded(&body)))
        }
        MULTIPART => {
            let boundary = multipart_boundary(post.content_type)
                .ok_or(limn_wire::WireError::MissingBoundary)?;
            Ok(ControlEvent::Form(decode_multipart(post.body, &boundary)?))
        }
        other => Err(SessionError::UnsupportedContentType(String::from(other))),
    }
}
