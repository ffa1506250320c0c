//! Resource hub tests.

use carehub_core::{Error, Resource, ResourceHub, ResourceKind};

fn resource(title: &str, link: &str) -> Resource {
    Resource {
        title: title.into(),
        description: "desc".into(),
        kind: ResourceKind::Website,
        link: link.into(),
        posted_by: "Dr. Lee".into(),
        image: None,
    }
}

#[test]
fn seeded_resources() {
    let hub = ResourceHub::seeded();
    let titles: Vec<_> = hub.list().iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        [
            "Understanding Hypertension",
            "Diabetes & Nutrition",
            "Asthma Action Plan"
        ]
    );
    assert_eq!(hub.list()[2].kind, ResourceKind::Pdf);
}

#[test]
fn submit_appends() {
    let mut hub = ResourceHub::seeded();
    hub.submit(resource("Sleep hygiene", "https://example.org/sleep"))
        .unwrap();
    assert_eq!(hub.list().len(), 4);
    assert_eq!(hub.list()[3].title, "Sleep hygiene");
}

#[test]
fn submit_requires_title_and_link() {
    let mut hub = ResourceHub::new();
    assert_eq!(
        hub.submit(resource(" ", "https://example.org")).unwrap_err(),
        Error::Validation { field: "title" }
    );
    assert_eq!(
        hub.submit(resource("Title", "")).unwrap_err(),
        Error::Validation { field: "link" }
    );
    assert!(hub.list().is_empty());
}

#[test]
fn kind_serializes_snake_case() {
    assert_eq!(serde_json::to_value(ResourceKind::Pdf).unwrap(), "pdf");
}
