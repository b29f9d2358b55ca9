//! Drive the metadata component without a browser.
//!
//! The page shell dispatches metadata for each route it renders and the component keeps the head in sync.
//!
//! ```sh
//! cargo run --example headless
//! ```

use std::rc::Rc;

use serde_json::json;
use sherby_metadata::{
    HeadStore, IdentityAttribute, MemoryChannel, MemoryHead, SherbyMetadata, DEFAULT_EVENT_NAME,
};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    // the server-rendered shell already ships a description
    let head = Rc::new(
        MemoryHead::new()
            .with_title("Sherby")
            .with_raw_meta("charset", "utf-8", "")
            .with_meta(IdentityAttribute::Name, "description", "A Sherby app"),
    );

    let metadata = SherbyMetadata::new(head.clone()).expect("the memory head has no failure modes");
    let channel = MemoryChannel::<serde_json::Value>::new();
    let _mounted = metadata.mount(&channel).expect("the memory channel has no failure modes");

    let routes = [
        json!({
            "title": "Home | Sherby",
            "description": "Welcome to Sherby",
            "og:title": "Home",
            "og:type": "website",
        }),
        json!({
            "title": "Blog | Sherby",
            "description": "Articles about Sherby",
            "og:title": "Blog",
            "keywords": "sherby,blog",
        }),
        json!({
            "title": "Contact | Sherby",
            "keywords": null,
            "og:type": "",
        }),
        // not a record, ignored
        json!(["Contact"]),
    ];

    for detail in routes {
        channel.dispatch(DEFAULT_EVENT_NAME, detail);
        print_head(&head);
    }
}

fn print_head(head: &MemoryHead) {
    println!("<title>{}</title>", head.title());
    for element in head.meta_elements().unwrap_or_default() {
        let identity = [IdentityAttribute::Name, IdentityAttribute::Property]
            .into_iter()
            .find_map(|attribute| {
                head.attribute(&element, attribute.as_str())
                    .map(|value| format!("{attribute}=\"{value}\""))
            })
            .or_else(|| {
                head.attribute(&element, "charset")
                    .map(|charset| format!("charset=\"{charset}\""))
            })
            .unwrap_or_default();
        let content = head.content(&element).unwrap_or_default();
        println!("<meta {identity} content=\"{content}\">");
    }
    println!();
}
