use super::*;

// =============================================================================
// WidgetKind
// =============================================================================

#[test]
fn kind_as_str_from_str_round_trip() {
    for kind in [
        WidgetKind::Profile,
        WidgetKind::Social,
        WidgetKind::Link,
        WidgetKind::Image,
        WidgetKind::Text,
        WidgetKind::Map,
    ] {
        assert_eq!(WidgetKind::from_str(kind.as_str()), Some(kind));
    }
}

#[test]
fn kind_from_str_rejects_unknown() {
    assert_eq!(WidgetKind::from_str("sticker"), None);
    assert_eq!(WidgetKind::from_str(""), None);
    assert_eq!(WidgetKind::from_str("Link"), None);
}

#[test]
fn default_span_image_is_2x2() {
    assert_eq!(WidgetKind::Image.default_span(), (2, 2));
}

#[test]
fn default_span_profile_is_2x2() {
    assert_eq!(WidgetKind::Profile.default_span(), (2, 2));
}

#[test]
fn default_span_text_is_2x1() {
    assert_eq!(WidgetKind::Text.default_span(), (2, 1));
}

#[test]
fn default_span_social_and_link_are_1x1() {
    assert_eq!(WidgetKind::Social.default_span(), (1, 1));
    assert_eq!(WidgetKind::Link.default_span(), (1, 1));
}

// =============================================================================
// WidgetContent
// =============================================================================

#[test]
fn default_content_kind_matches() {
    for kind in [
        WidgetKind::Profile,
        WidgetKind::Social,
        WidgetKind::Link,
        WidgetKind::Image,
        WidgetKind::Text,
        WidgetKind::Map,
    ] {
        assert_eq!(WidgetContent::default_for(kind).kind(), kind);
    }
}

#[test]
fn default_content_title_is_type_derived() {
    let content = WidgetContent::default_for(WidgetKind::Link);
    let WidgetContent::Link { title, .. } = content else {
        panic!("expected link content");
    };
    assert_eq!(title, "New Link");
}

#[test]
fn default_profile_content_has_placeholder_description() {
    let WidgetContent::Profile { description, .. } = WidgetContent::default_for(WidgetKind::Profile) else {
        panic!("expected profile content");
    };
    assert_eq!(description, "Tell the world who you are.");
}

#[test]
fn content_serializes_with_kind_tag() {
    let content = WidgetContent::Link {
        title: "My Site".into(),
        url: "https://example.com".into(),
        icon_url: None,
    };
    let json = serde_json::to_value(&content).unwrap();
    assert_eq!(json["kind"], "link");
    assert_eq!(json["title"], "My Site");
    assert_eq!(json["url"], "https://example.com");
}

#[test]
fn content_fields_are_camel_case() {
    let content = WidgetContent::Image {
        title: "Pic".into(),
        image_url: Some("https://cdn.example/img.png".into()),
        focal_x: Some(0.25),
        focal_y: None,
    };
    let json = serde_json::to_value(&content).unwrap();
    assert_eq!(json["imageUrl"], "https://cdn.example/img.png");
    assert_eq!(json["focalX"], 0.25);
    assert!(json["focalY"].is_null());
}

#[test]
fn content_deserializes_missing_optionals() {
    let content: WidgetContent = serde_json::from_str(r#"{"kind":"text","title":"Note"}"#).unwrap();
    let WidgetContent::Text { title, description } = content else {
        panic!("expected text content");
    };
    assert_eq!(title, "Note");
    assert_eq!(description, "");
}

#[test]
fn content_deserialize_rejects_unknown_kind() {
    let result = serde_json::from_str::<WidgetContent>(r#"{"kind":"gif","title":"x"}"#);
    assert!(result.is_err());
}

#[test]
fn image_url_only_set_for_image_content() {
    let image = WidgetContent::Image {
        title: "Pic".into(),
        image_url: Some("https://cdn.example/a.png".into()),
        focal_x: None,
        focal_y: None,
    };
    assert_eq!(image.image_url(), Some("https://cdn.example/a.png"));

    let link = WidgetContent::Link { title: "x".into(), url: String::new(), icon_url: None };
    assert_eq!(link.image_url(), None);
}

// =============================================================================
// Widget
// =============================================================================

#[test]
fn widget_serde_round_trip() {
    let widget = Widget {
        id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        kind: WidgetKind::Social,
        x: 0,
        y: 0,
        w: 1,
        h: 1,
        content: WidgetContent::default_for(WidgetKind::Social),
        order_key: 1_700_000_000_000,
    };
    let json = serde_json::to_string(&widget).unwrap();
    let restored: Widget = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.id, widget.id);
    assert_eq!(restored.kind, WidgetKind::Social);
    assert_eq!(restored.content, widget.content);
    assert_eq!(restored.order_key, widget.order_key);
}
