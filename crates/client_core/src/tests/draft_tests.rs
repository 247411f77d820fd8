use super::*;
use shared::{domain::FileKey, protocol::ServerData};

fn descriptor() -> FileDescriptor {
    FileDescriptor {
        url: "https://cdn.example/cover.png".into(),
        mime_type: "image/png".into(),
        key: FileKey::new("cover-key"),
        name: None,
        size: None,
        server_data: ServerData {
            id: 1,
            user: "87".into(),
        },
    }
}

#[test]
fn starts_empty() {
    let store = DraftStore::new();
    assert!(store.snapshot().is_empty());
}

#[test]
fn clones_share_one_draft() {
    let form = DraftStore::new();
    let preview = form.clone();

    form.set_headline("Breaking");
    form.set_lead("Something happened today");
    preview.set_body("<p>Body</p>");

    let seen = preview.snapshot();
    assert_eq!(seen.headline, "Breaking");
    assert_eq!(seen.lead, "Something happened today");
    assert_eq!(form.read(|draft| draft.body.clone()), "<p>Body</p>");
}

#[test]
fn last_write_wins_per_field() {
    let store = DraftStore::new();
    store.set_tag("Sport");
    store.set_headline("first");
    store.set_headline("second");

    let draft = store.snapshot();
    assert_eq!(draft.headline, "second");
    assert_eq!(draft.tag, "Sport");
}

#[test]
fn toggling_selected_tag_clears_it() {
    let store = DraftStore::new();
    store.toggle_tag("Sport");
    assert_eq!(store.snapshot().tag, "Sport");
    store.toggle_tag("Politik");
    assert_eq!(store.snapshot().tag, "Politik");
    store.toggle_tag("Politik");
    assert_eq!(store.snapshot().tag, "");
}

#[test]
fn clear_upload_returns_previous_descriptor() {
    let store = DraftStore::new();
    store.set_headline("keep me");
    store.set_uploaded_file(descriptor());

    assert_eq!(store.clear_upload(), Some(descriptor()));
    assert_eq!(store.uploaded_file(), None);
    assert_eq!(store.snapshot().headline, "keep me");
    assert_eq!(store.clear_upload(), None);
}

#[test]
fn reset_restores_defaults() {
    let store = DraftStore::new();
    store.set_headline("Headline");
    store.set_tag("Sport");
    store.set_uploaded_file(descriptor());

    store.reset();
    assert!(store.snapshot().is_empty());
}

#[test]
fn subscribers_are_notified_only_on_change() {
    let store = DraftStore::new();
    let mut rx = store.subscribe();
    assert!(!rx.has_changed().expect("sender alive"));

    store.set_headline("Headline");
    assert!(rx.has_changed().expect("sender alive"));
    assert_eq!(rx.borrow_and_update().headline, "Headline");

    store.set_headline("Headline");
    assert!(!rx.has_changed().expect("sender alive"));
}
