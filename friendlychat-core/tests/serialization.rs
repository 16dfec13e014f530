use friendlychat_core::*;
use serde_json::{self as json, Value};

fn parse(json_str: &str) -> Value {
    json::from_str(json_str).expect("valid json")
}

/*
    A freshly composed text message serializes with camelCase keys
    and leaves out every absent field, id included.
*/
#[test]
fn text_message_omits_absent_fields() {
    let m = Message::new(Some("hello".to_string()), "Alice", None, None);

    let s = json::to_string(&m).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["text"], "hello");
    assert_eq!(v["name"], "Alice");
    let obj = v.as_object().expect("object");
    assert!(!obj.contains_key("id"));
    assert!(!obj.contains_key("photoUrl"));
    assert!(!obj.contains_key("imageUrl"));
}

/*
    All five fields map 1:1 onto id, text, name, photoUrl, imageUrl
    and read back unchanged.
*/
#[test]
fn all_fields_map_one_to_one() {
    let m = Message::new(
        None,
        "Bob",
        Some("https://example.com/bob.png".to_string()),
        Some("gs://friendlychat/bob/k1/cat.jpg".to_string()),
    )
    .with_id("-NqAbCdEfGhIjKlMnOpQ");

    let s = json::to_string(&m).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["id"], "-NqAbCdEfGhIjKlMnOpQ");
    assert_eq!(v["name"], "Bob");
    assert_eq!(v["photoUrl"], "https://example.com/bob.png");
    assert_eq!(v["imageUrl"], "gs://friendlychat/bob/k1/cat.jpg");
    assert!(v["text"].is_null());

    let back: Message = json::from_str(&s).expect("deserialize");
    assert_eq!(back.id(), m.id());
    assert_eq!(back.text(), None);
    assert_eq!(back.name(), "Bob");
    assert_eq!(back.photo_url(), m.photo_url());
    assert_eq!(back.image_url(), m.image_url());
}

/*
    A stored value without a name still yields a message whose name is "",
    never an absent one.
*/
#[test]
fn missing_name_defaults_to_empty() {
    let m: Message = json::from_str(r#"{"text":"anon"}"#).expect("deserialize");
    assert_eq!(m.name(), "");
    assert_eq!(m.text(), Some("anon"));
    assert!(m.id().is_none());
}

/*
    The snapshot parser attaches the key the value was stored under as the id,
    overriding whatever id the value may carry.
*/
#[test]
fn snapshot_key_becomes_id() {
    let value = json::json!({ "text": "hi", "name": "Carol", "id": "stale" });
    let m = Message::from_snapshot("-Nq0000000000000000a", value).expect("parse snapshot");
    assert_eq!(m.id(), Some("-Nq0000000000000000a"));
    assert_eq!(m.text(), Some("hi"));
    assert_eq!(m.name(), "Carol");
}

#[test]
fn snapshot_with_wrong_shape_is_an_error() {
    let value = json::json!({ "text": 42 });
    assert!(Message::from_snapshot("k", value).is_err());
}

/*
    Feed events use the { type, payload } envelope.
*/
#[test]
fn feed_child_added_envelope() {
    let m = Sender::new("Dana", None).compose_text("there").with_id("-Nq0000000000000000b");
    let ev = FeedEvent::ChildAdded(m);

    let s = json::to_string(&ev).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["type"], "childAdded");
    assert_eq!(v["payload"]["id"], "-Nq0000000000000000b");
    assert_eq!(v["payload"]["text"], "there");

    let back: FeedEvent = json::from_str(&s).expect("deserialize");
    match back {
        FeedEvent::ChildAdded(m_back) => {
            assert_eq!(m_back.id(), Some("-Nq0000000000000000b"));
            assert_eq!(m_back.name(), "Dana");
        }
        _ => panic!("expected ChildAdded"),
    }
}

#[test]
fn feed_child_changed_envelope() {
    let m = Sender::anonymous()
        .compose_image("https://example.com/final.jpg")
        .with_id("-Nq0000000000000000c");
    let s = json::to_string(&FeedEvent::ChildChanged(m)).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["type"], "childChanged");
    assert_eq!(v["payload"]["imageUrl"], "https://example.com/final.jpg");
    assert_eq!(v["payload"]["name"], ANONYMOUS);
}

#[test]
fn feed_error_envelope() {
    let err = Error::new("internal_error", "db unavailable")
        .with_details(json::json!({ "retry": true }));
    let s = json::to_string(&FeedEvent::Error(err.clone())).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["type"], "error");
    assert_eq!(v["payload"]["code"], "internal_error");
    assert_eq!(v["payload"]["details"]["retry"], true);

    let back: FeedEvent = json::from_str(&s).expect("deserialize");
    assert!(back.message().is_none());
    match back {
        FeedEvent::Error(e) => assert_eq!(e, err),
        _ => panic!("expected Error envelope"),
    }
}

/*
    The listing keeps the order it was given and each entry keeps its id.
*/
#[test]
fn list_messages_response_keeps_order() {
    let m1 = Message::new(Some("first".to_string()), "Eve", None, None).with_id("-Nq0000000000000000d");
    let m2 = Message::new(None, "Frank", None, Some(LOADING_IMAGE_URL.to_string())).with_id("-Nq0000000000000000e");
    let resp = ListMessagesResponse { messages: vec![m1, m2] };

    let s = json::to_string(&resp).expect("serialize");
    let v = parse(&s);

    assert_eq!(v["messages"][0]["id"], "-Nq0000000000000000d");
    assert_eq!(v["messages"][1]["imageUrl"], LOADING_IMAGE_URL);

    let back: ListMessagesResponse = json::from_str(&s).expect("deserialize");
    let ids: Vec<_> = back.messages.iter().map(|m| m.id()).collect();
    assert_eq!(ids, vec![Some("-Nq0000000000000000d"), Some("-Nq0000000000000000e")]);
    assert!(back.messages[1].is_loading_placeholder());
}

#[test]
fn push_response_wraps_message() {
    let m = Sender::anonymous().compose_text("yo").with_id("-Nq0000000000000000f");
    let v = parse(&json::to_string(&PushMessageResponse { message: m }).expect("serialize"));
    assert_eq!(v["message"]["id"], "-Nq0000000000000000f");
    assert_eq!(v["message"]["name"], "anonymous");
}

#[test]
fn list_query_limit_is_optional() {
    let q: ListMessagesQuery = json::from_str("{}").expect("deserialize");
    assert_eq!(q.limit, None);
    let q: ListMessagesQuery = json::from_str(r#"{"limit":5}"#).expect("deserialize");
    assert_eq!(q.limit, Some(5));
}
