// Copyright 2026 the Limn Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end AJAX cycle behavior.

use limn_dirty::ChangeLog;
use limn_model::{
    CHECKBOX, ComponentTree, DepictId, FLYOVER_FRAME, FRAME, PANEL, TEXT_CONTROL,
};
use limn_session::{AjaxRequest, Delegate, Navigation, SESSION_COOKIE, Session};
use limn_wire::ActionEvent;

const PATH: &str = "/app";

fn ajax_at(session: &mut Session, path: &str, document: &str) -> String {
    session
        .handle_ajax(&AjaxRequest {
            path,
            cookies: &[],
            document,
        })
        .unwrap()
        .body
}

fn ajax(session: &mut Session, document: &str) -> String {
    ajax_at(session, PATH, document)
}

fn flush(session: &mut Session) {
    ajax(session, "<events/>");
}

/// An aux frame with one named text control, with initial dirtiness flushed.
fn session_with_field(name: &str) -> (Session, DepictId, DepictId) {
    let mut session = Session::new();
    let frame = session.insert_frame(&FRAME).unwrap();
    let field = session.insert(frame, &TEXT_CONTROL).unwrap();
    session
        .modify(field, |c| {
            c.name = Some(name.into());
            true
        })
        .unwrap();
    flush(&mut session);
    (session, frame, field)
}

fn patches(response: &str) -> usize {
    response.matches("<patch").count()
}

#[test]
fn provisional_change_yields_no_value_patch() {
    let (mut session, _, field) = session_with_field("amount");
    session
        .modify(field, |c| c.commit_value(Some("ab".into())))
        .unwrap();
    flush(&mut session);

    let doc = r#"<events>
        <form exhaustive="false">
            <control name="amount" provisionalValue="abc"/>
        </form>
    </events>"#;
    let response = ajax(&mut session, doc);

    let control = session.tree().get(field).unwrap();
    assert_eq!(control.provisional(), Some("abc"));
    assert_eq!(control.value(), Some("ab"));
    assert_eq!(patches(&response), 1, "in {response}");
    assert!(response.contains("<patch noValue=\"true\">"), "in {response}");
}

#[test]
fn committed_value_supersedes_provisional() {
    let (mut session, _, field) = session_with_field("amount");
    session
        .modify(field, |c| c.set_provisional(Some("abc".into())))
        .unwrap();
    flush(&mut session);

    let doc = r#"<events>
        <form exhaustive="false">
            <control name="amount" value="42"/>
        </form>
    </events>"#;
    let response = ajax(&mut session, doc);

    let control = session.tree().get(field).unwrap();
    assert_eq!(control.value(), Some("42"));
    assert_eq!(control.provisional(), None);
    assert_eq!(patches(&response), 1, "in {response}");
    assert!(!response.contains("noValue"), "in {response}");
}

#[test]
fn unmodified_components_never_reappear() {
    let (mut session, _, field) = session_with_field("amount");
    session
        .modify(field, |c| c.commit_value(Some("x".into())))
        .unwrap();
    let first = ajax(&mut session, "<events/>");
    assert_eq!(patches(&first), 1);

    let second = ajax(&mut session, "<events/>");
    assert_eq!(patches(&second), 0, "in {second}");
}

#[test]
fn dirty_root_reloads_without_patches() {
    let mut session = Session::new();
    let root = session.root();
    session.insert(root, &PANEL).unwrap();

    let response = ajax(&mut session, "<events/>");
    assert_eq!(response.matches("<reload/>").count(), 1, "in {response}");
    assert_eq!(patches(&response), 0, "in {response}");

    // The reload consumed the dirtiness.
    let next = ajax(&mut session, "<events/>");
    assert_eq!(next.matches("<reload/>").count(), 0, "in {next}");
}

#[test]
fn dirty_ancestor_subsumes_descendants() {
    let (mut session, frame, field) = session_with_field("amount");
    session.mark(frame);
    session
        .modify(field, |c| c.commit_value(Some("x".into())))
        .unwrap();

    // One patch for the frame; the field rides along inside it.
    let response = ajax(&mut session, "<events/>");
    assert_eq!(patches(&response), 1, "in {response}");
    assert!(response.contains("name=\"amount\""), "in {response}");
}

#[test]
fn init_resends_open_frames_and_closes_flyovers() {
    let mut session = Session::new();
    let aux = session.insert_frame(&FRAME).unwrap();
    let flyover = session.insert_frame(&FLYOVER_FRAME).unwrap();
    flush(&mut session);

    let doc = r#"<events>
        <init language="en-US" timezone="-300" screenWidth="1920"/>
    </events>"#;
    let response = ajax(&mut session, doc);

    // The surviving aux frame is re-sent in full; the stale flyover is
    // removed rather than patched.
    assert_eq!(patches(&response), 1, "in {response}");
    assert!(
        response.contains(&format!("<remove id=\"{flyover}\"/>")),
        "in {response}"
    );
    assert!(!session.tree().get(flyover).unwrap().frame_open);
    assert!(session.tree().get(aux).unwrap().frame_open);
    assert_eq!(session.client().unwrap().language, "en-US");
    assert_eq!(session.client().unwrap().timezone_offset_minutes, -300);
    assert_eq!(session.client().unwrap().screen_width, 1920);
}

#[test]
fn unresolvable_mouse_target_is_a_noop() {
    let (mut session, _, _) = session_with_field("amount");
    let doc = r#"<events>
        <mouseEnter>
            <viewport x="0" y="0" width="800" height="600"/>
            <component id="999" x="1" y="1" width="10" height="10"/>
            <target id="999" x="1" y="1" width="10" height="10"/>
            <mouse x="2" y="2"/>
        </mouseEnter>
    </events>"#;
    let response = ajax(&mut session, doc);
    assert_eq!(patches(&response), 0, "in {response}");
    assert!(!response.contains("<remove"), "in {response}");
}

#[test]
fn exhaustive_submission_clears_omitted_controls() {
    let (mut session, frame, kept) = session_with_field("amount");
    let omitted = session.insert(frame, &TEXT_CONTROL).unwrap();
    session
        .modify(omitted, |c| {
            c.name = Some("note".into());
            c.commit_value(Some("old".into()))
        })
        .unwrap();
    flush(&mut session);

    let doc = r#"<events>
        <form exhaustive="true">
            <control name="amount" value="9"/>
        </form>
    </events>"#;
    ajax(&mut session, doc);

    assert_eq!(session.tree().get(kept).unwrap().value(), Some("9"));
    assert_eq!(session.tree().get(omitted).unwrap().value(), None);
}

#[test]
fn conversion_failure_renders_inline_error() {
    let mut session = Session::new();
    let frame = session.insert_frame(&FRAME).unwrap();
    let toggle = session.insert(frame, &CHECKBOX).unwrap();
    session
        .modify(toggle, |c| {
            c.name = Some("agree".into());
            true
        })
        .unwrap();
    flush(&mut session);

    let doc = r#"<events>
        <form exhaustive="false">
            <control name="agree" value="maybe"/>
        </form>
    </events>"#;
    let response = ajax(&mut session, doc);

    let control = session.tree().get(toggle).unwrap();
    assert!(!control.valid);
    assert_eq!(control.value(), None);
    assert!(response.contains("is not a toggle value"), "in {response}");
    assert!(response.contains("class=\"error\""), "in {response}");
}

struct Wizard;

impl Delegate for Wizard {
    fn on_action(
        &mut self,
        _tree: &mut ComponentTree,
        log: &mut ChangeLog<DepictId>,
        event: &ActionEvent,
    ) -> Option<Navigation> {
        log.mark(event.component);
        Some(Navigation {
            uri: String::from("/wizard"),
            viewport: Some(String::from("main")),
            modal: true,
        })
    }
}

#[test]
fn navigation_short_circuits_and_modal_redirects() {
    let (mut session, _, field) = session_with_field("amount");
    session.set_delegate(Box::new(Wizard));

    let doc = format!(r#"<events><action componentID="{}"/></events>"#, field.as_u64());
    let response = ajax(&mut session, &doc);
    assert!(
        response.contains("<navigate viewport=\"main\">/wizard</navigate>"),
        "in {response}"
    );
    assert_eq!(patches(&response), 0, "in {response}");

    // A request for any other path is redirected to the modal location.
    let stale = ajax_at(&mut session, "/elsewhere", "<events/>");
    assert!(stale.contains(">/wizard</navigate>"), "in {stale}");

    // Arriving at the modal location resumes normal processing; the
    // dirtiness recorded during the action is still pending.
    let resumed = ajax_at(&mut session, "/wizard", "<events/>");
    assert_eq!(patches(&resumed), 1, "in {resumed}");
}

#[test]
fn patch_fragments_are_self_describing() {
    let (mut session, _, field) = session_with_field("amount");
    session
        .modify(field, |c| c.commit_value(Some("x".into())))
        .unwrap();
    let response = ajax(&mut session, "<events/>");
    assert!(
        response.contains("xmlns=\"http://www.w3.org/1999/xhtml\""),
        "in {response}"
    );
}

#[test]
fn closed_frame_is_removed_not_patched() {
    let mut session = Session::new();
    let aux = session.insert_frame(&FRAME).unwrap();
    flush(&mut session);

    session.close_frame(aux).unwrap();
    let response = ajax(&mut session, "<events/>");
    assert!(
        response.contains(&format!("<remove id=\"{aux}\"/>")),
        "in {response}"
    );
    assert_eq!(patches(&response), 0, "in {response}");
}

#[test]
fn ajax_reconciles_cookies_before_the_envelope() {
    let (mut session, _, _) = session_with_field("amount");
    session.environment_mut().set("theme", "dark");

    let jar = vec![
        (String::from("stale"), String::from("1")),
        (String::from(SESSION_COOKIE), String::from("abc123")),
    ];
    let response = session
        .handle_ajax(&AjaxRequest {
            path: PATH,
            cookies: &jar,
            document: "<events/>",
        })
        .unwrap();

    // The unmatched cookie is expired, the session cookie is left alone,
    // and the environment entry becomes a persistent cookie.
    let expired = response
        .cookies
        .iter()
        .find(|c| c.name == "stale")
        .expect("expiring cookie");
    assert_eq!(expired.max_age, 0);
    assert!(response.cookies.iter().all(|c| c.name != SESSION_COOKIE));
    let added = response
        .cookies
        .iter()
        .find(|c| c.name == "theme")
        .expect("persistent cookie");
    assert_eq!(added.value, "dark");
    assert!(added.max_age > 0);
}
