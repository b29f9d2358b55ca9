#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Date, Function, Object, RegExp, Reflect};
use sherby_metadata::{IdentityAttribute, MetadataRecord, SherbyMetadata};
use sherby_metadata_web::{convert, SherbyMetadataElement, WebHead, WindowChannel};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::wasm_bindgen_test;
use web_sys::{CustomEvent, CustomEventInit, Document, Element};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

/// Remove every `<meta>` element so each test starts from an empty head.
fn reset_head() -> Document {
    let _ = tracing_wasm::try_set_as_global_default();

    let document = document();
    let metas = document.query_selector_all("meta").unwrap();
    for index in 0..metas.length() {
        metas
            .item(index)
            .unwrap()
            .unchecked_into::<Element>()
            .remove();
    }
    assert_eq!(document.query_selector_all("meta").unwrap().length(), 0);
    document
}

fn create_meta(document: &Document, attribute: &str, value: &str, content: &str) -> Element {
    let meta = document.create_element("meta").unwrap();
    meta.set_attribute(attribute, value).unwrap();
    meta.set_attribute("content", content).unwrap();
    document.head().unwrap().append_child(&meta).unwrap();
    meta
}

fn query(document: &Document, selector: &str) -> Vec<Element> {
    let nodes = document.query_selector_all(selector).unwrap();
    (0..nodes.length())
        .map(|index| nodes.item(index).unwrap().unchecked_into::<Element>())
        .collect()
}

fn dispatch(detail: &JsValue) {
    let init = CustomEventInit::new();
    init.set_bubbles(true);
    init.set_detail(detail);
    let event = CustomEvent::new_with_event_init_dict("sherby-metadata", &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();
}

fn plain_object(entries: &[(&str, JsValue)]) -> JsValue {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value).unwrap();
    }
    object.into()
}

#[wasm_bindgen_test]
fn sets_the_document_title() {
    let document = reset_head();
    document.set_title("Old title");

    let element = SherbyMetadataElement::new().unwrap();
    element.set_data(plain_object(&[("title", "Title".into())]));
    assert_eq!(document.title(), "Title");

    element.set_data(plain_object(&[("title", JsValue::UNDEFINED)]));
    assert_eq!(document.title(), "");
}

#[wasm_bindgen_test]
fn creates_named_and_open_graph_tags() {
    let document = reset_head();

    let element = SherbyMetadataElement::new().unwrap();
    element.set_data(plain_object(&[
        ("description", "Description".into()),
        ("og:title", "Title".into()),
    ]));

    assert_eq!(query(&document, "meta").len(), 2);

    let description = query(&document, r#"meta[name="description"]"#);
    assert_eq!(description.len(), 1);
    assert_eq!(
        description[0].get_attribute("content").as_deref(),
        Some("Description")
    );

    let og_title = query(&document, r#"meta[property="og:title"]"#);
    assert_eq!(og_title.len(), 1);
    assert_eq!(og_title[0].get_attribute("content").as_deref(), Some("Title"));
}

#[wasm_bindgen_test]
fn ignores_inherited_keys() {
    let document = reset_head();

    let prototype = Object::new();
    Reflect::set(
        &prototype,
        &"description".into(),
        &"Description from data".into(),
    )
    .unwrap();
    let data = Object::create(&prototype);
    Reflect::set(
        &data,
        &"superdata".into(),
        &"Description from superdata".into(),
    )
    .unwrap();

    let element = SherbyMetadataElement::new().unwrap();
    element.set_data(data.into());

    assert_eq!(query(&document, "meta").len(), 1);
    assert_eq!(query(&document, r#"meta[name="superdata"]"#).len(), 1);
    assert!(query(&document, r#"meta[name="description"]"#).is_empty());
}

#[wasm_bindgen_test]
fn falsy_values_create_nothing() {
    let document = reset_head();

    let element = SherbyMetadataElement::new().unwrap();
    element.set_data(plain_object(&[
        ("description", JsValue::UNDEFINED),
        ("fragment", JsValue::from_f64(0.0)),
        ("keywords", JsValue::NULL),
        ("viewport", JsValue::FALSE),
        ("og:title", "".into()),
    ]));

    assert!(query(&document, "meta").is_empty());
}

#[wasm_bindgen_test]
fn cyclic_values_are_stringified_once() {
    let document = reset_head();

    let cyclic_object = Object::new();
    Reflect::set(&cyclic_object, &"self".into(), &cyclic_object).unwrap();
    let cyclic_array = Array::of1(&"a".into());
    cyclic_array.push(&cyclic_array);
    let bare = Object::create(&JsValue::NULL.unchecked_into());

    let element = SherbyMetadataElement::new().unwrap();
    element.set_data(plain_object(&[
        ("description", cyclic_object.into()),
        ("keywords", cyclic_array.into()),
        ("author", plain_object(&[("nested", bare.into())])),
    ]));

    let content = |selector: &str| {
        query(&document, selector)
            .iter()
            .map(|meta| meta.get_attribute("content").unwrap_or_default())
            .collect::<Vec<_>>()
    };
    assert_eq!(content(r#"meta[name="description"]"#), ["[object Object]"]);
    assert_eq!(content(r#"meta[name="keywords"]"#), ["a,"]);
    assert_eq!(content(r#"meta[name="author"]"#), ["[object Object]"]);
}

#[wasm_bindgen_test]
fn objects_with_an_empty_string_form_are_truthy() {
    let document = reset_head();

    let silent = Object::new();
    Reflect::set(
        &silent,
        &"toString".into(),
        &Function::new_no_args("return ''"),
    )
    .unwrap();

    let element = SherbyMetadataElement::new().unwrap();
    element.set_data(plain_object(&[("description", "Description".into())]));
    element.set_data(plain_object(&[("description", silent.into())]));

    let description = query(&document, r#"meta[name="description"]"#);
    assert_eq!(description.len(), 1);
    assert_eq!(description[0].get_attribute("content").as_deref(), Some(""));
}

#[wasm_bindgen_test]
fn reuses_and_removes_existing_tags() {
    let document = reset_head();
    create_meta(&document, "property", "og:description", "Old Open Graph description");
    let description = create_meta(&document, "name", "description", "Old description");
    create_meta(&document, "attributeName", "description", "Old description");

    let metadata = SherbyMetadata::new(WebHead::from_window().unwrap()).unwrap();

    metadata
        .set_data(MetadataRecord::new().with("description", "Description"))
        .unwrap();
    assert_eq!(query(&document, "meta").len(), 3);
    assert_eq!(
        query(&document, r#"meta[name="description"]"#),
        vec![description.clone()]
    );
    assert_eq!(
        description.get_attribute("content").as_deref(),
        Some("Description")
    );

    metadata
        .set_data(MetadataRecord::new().with("og:description", ""))
        .unwrap();
    assert!(query(&document, r#"meta[property="og:description"]"#).is_empty());
    assert_eq!(query(&document, "meta").len(), 2);

    metadata
        .set_data(MetadataRecord::new().with("description", ""))
        .unwrap();
    assert!(query(&document, r#"meta[name="description"]"#).is_empty());
    assert_eq!(query(&document, "meta").len(), 1);
    assert_eq!(
        query(&document, r#"meta[attributeName="description"]"#).len(),
        1
    );
}

#[wasm_bindgen_test]
fn custom_events_with_plain_objects_replace_the_data() {
    reset_head();

    let mut element = SherbyMetadataElement::new().unwrap();
    element.connected_callback().unwrap();

    dispatch(&Object::new().into());
    assert_eq!(convert::admit(&element.data()), Some(MetadataRecord::new()));

    dispatch(&plain_object(&[
        ("description", "Description".into()),
        ("title", "Title".into()),
    ]));
    assert_eq!(
        convert::admit(&element.data()),
        Some(
            MetadataRecord::new()
                .with("description", "Description")
                .with("title", "Title")
        )
    );

    element.disconnected_callback();
}

#[wasm_bindgen_test]
fn custom_events_with_anything_else_are_ignored() {
    reset_head();

    let mut element = SherbyMetadataElement::new().unwrap();
    element.connected_callback().unwrap();

    let invalid: Vec<JsValue> = vec![
        "description".into(),
        JsValue::from_f64(1.0),
        JsValue::from_f64(f64::INFINITY),
        JsValue::from_f64(f64::NAN),
        Array::of1(&"description".into()).into(),
        js_sys::global().into(),
        Date::new_0().into(),
        RegExp::new("", "").into(),
        JsValue::NULL,
        JsValue::UNDEFINED,
    ];

    for detail in invalid {
        dispatch(&detail);
        assert_eq!(
            convert::admit(&element.data()),
            Some(MetadataRecord::new()),
            "{detail:?} was admitted"
        );
    }

    element.disconnected_callback();
}

#[wasm_bindgen_test]
fn disconnected_elements_stop_listening() {
    let document = reset_head();
    document.set_title("");

    let mut element = SherbyMetadataElement::new().unwrap();
    element.connected_callback().unwrap();
    assert!(element.is_connected());

    element.disconnected_callback();
    assert!(!element.is_connected());

    dispatch(&plain_object(&[("title", "Title".into())]));
    assert_eq!(document.title(), "");
}

#[wasm_bindgen_test]
fn window_channel_stops_propagation() {
    reset_head();

    let metadata = SherbyMetadata::new(WebHead::from_window().unwrap()).unwrap();
    let _mounted = metadata
        .mount(&WindowChannel::from_window().unwrap())
        .unwrap();

    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_f64(1.0));
    let event = CustomEvent::new_with_event_init_dict("sherby-metadata", &init).unwrap();
    web_sys::window().unwrap().dispatch_event(&event).unwrap();

    assert!(event.cancel_bubble());
}

#[wasm_bindgen_test]
fn converts_values_without_coercion() {
    assert_eq!(
        convert::meta_value(&JsValue::from_f64(5.0)).to_content(),
        "5"
    );
    assert_eq!(
        convert::meta_value(&Array::of2(&"a".into(), &"b".into()).into()).to_content(),
        "a,b"
    );
    assert!(convert::meta_value(&Date::new_0().into()).is_truthy());
    assert_eq!(
        convert::meta_value(&Object::create(&JsValue::NULL.unchecked_into()).into()).to_content(),
        "[object Object]"
    );
    assert!(!convert::meta_value(&JsValue::from_f64(f64::NAN)).is_truthy());
    assert_eq!(
        convert::meta_value(&IdentityAttribute::Name.as_str().into()).as_str(),
        Some("name")
    );
}
