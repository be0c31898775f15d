// ── Untyped document ↔ typed domain conversion ──
//
// The store keeps locale-paired twin fields (`title` / `titleUk`); the
// domain model uses `LocalizedText`. Conversion is deliberately permissive
// on the way in: legacy records may lack `order` (treated as 0) or
// `createdAt` (treated as now), matching the public site's behavior.

use chrono::Utc;
use serde_json::{Map, Value, json};

use skydeck_api::Document;

use crate::model::{
    ContentItem, ContentKind, ContentPatch, DroneModel, DronePatch, Locale, LocalizedText,
    NewContentItem, NewDroneModel,
};

// ── Field helpers ────────────────────────────────────────────────────

fn str_field(fields: &Map<String, Value>, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

fn i64_field(fields: &Map<String, Value>, key: &str) -> i64 {
    fields.get(key).and_then(Value::as_i64).unwrap_or_default()
}

/// Assemble a `LocalizedText` from twin wire fields.
fn localized(fields: &Map<String, Value>, en_key: &str, uk_key: &str) -> LocalizedText {
    LocalizedText::default()
        .with(Locale::En, str_field(fields, en_key))
        .with(Locale::Uk, str_field(fields, uk_key))
}

/// Twin wire fields from a `LocalizedText`. The Ukrainian twin falls back
/// to the English value, preserving the store's titleUk-defaults-to-title
/// convention.
fn twins(text: &LocalizedText, en_key: &str, uk_key: &str, out: &mut Map<String, Value>) {
    out.insert(en_key.to_owned(), json!(text.resolve(Locale::En)));
    out.insert(uk_key.to_owned(), json!(text.resolve(Locale::Uk)));
}

// ── Content ──────────────────────────────────────────────────────────

/// Translate a raw store document into a [`ContentItem`].
pub fn content_from_document(doc: Document) -> ContentItem {
    let fields = &doc.fields;

    let kind: ContentKind = str_field(fields, "type").parse().unwrap_or_default();
    let description = localized(fields, "description", "descriptionUk");

    ContentItem {
        id: doc.id,
        drone_id: str_field(fields, "droneId"),
        kind,
        title: localized(fields, "title", "titleUk"),
        description: (!description.is_empty()).then_some(description),
        file_url: str_field(fields, "fileUrl"),
        thumbnail_url: fields
            .get("thumbnailUrl")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned),
        order: i64_field(fields, "order"),
        created_at: doc.created_at.unwrap_or_else(Utc::now),
    }
}

/// Wire fields for a document create.
pub fn content_fields(item: &NewContentItem) -> Value {
    let mut out = Map::new();
    out.insert("droneId".to_owned(), json!(item.drone_id));
    out.insert("type".to_owned(), json!(item.kind));
    twins(&item.title, "title", "titleUk", &mut out);
    if let Some(ref description) = item.description {
        twins(description, "description", "descriptionUk", &mut out);
    }
    out.insert("fileUrl".to_owned(), json!(item.file_url));
    if let Some(ref thumb) = item.thumbnail_url {
        out.insert("thumbnailUrl".to_owned(), json!(thumb));
    }
    out.insert("order".to_owned(), json!(item.order));
    Value::Object(out)
}

/// Wire fields for a partial update; only supplied fields are present.
pub fn content_patch_fields(patch: &ContentPatch) -> Value {
    let mut out = Map::new();
    if let Some(ref title) = patch.title {
        twins(title, "title", "titleUk", &mut out);
    }
    if let Some(ref description) = patch.description {
        twins(description, "description", "descriptionUk", &mut out);
    }
    if let Some(ref file_url) = patch.file_url {
        out.insert("fileUrl".to_owned(), json!(file_url));
    }
    if let Some(ref thumb) = patch.thumbnail_url {
        out.insert("thumbnailUrl".to_owned(), json!(thumb));
    }
    if let Some(order) = patch.order {
        out.insert("order".to_owned(), json!(order));
    }
    Value::Object(out)
}

// ── Drone catalog ────────────────────────────────────────────────────

/// Translate a raw store document into a [`DroneModel`].
pub fn drone_from_document(doc: Document) -> DroneModel {
    let fields = &doc.fields;
    DroneModel {
        id: doc.id,
        name: localized(fields, "name", "nameUk"),
        slug: str_field(fields, "slug"),
        order: i64_field(fields, "order"),
    }
}

/// Wire fields for a catalog create.
pub fn drone_fields(model: &NewDroneModel) -> Value {
    let mut out = Map::new();
    twins(&model.name, "name", "nameUk", &mut out);
    out.insert("slug".to_owned(), json!(model.slug));
    out.insert("order".to_owned(), json!(model.order));
    Value::Object(out)
}

/// Wire fields for a partial catalog update.
pub fn drone_patch_fields(patch: &DronePatch) -> Value {
    let mut out = Map::new();
    if let Some(ref name) = patch.name {
        twins(name, "name", "nameUk", &mut out);
    }
    if let Some(ref slug) = patch.slug {
        out.insert("slug".to_owned(), json!(slug));
    }
    if let Some(order) = patch.order {
        out.insert("order".to_owned(), json!(order));
    }
    Value::Object(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn document(id: &str, fields: Value) -> Document {
        let body = json!({ "id": id }).as_object().cloned().unwrap();
        let mut merged = body;
        if let Value::Object(map) = fields {
            merged.extend(map);
        }
        serde_json::from_value(Value::Object(merged)).unwrap()
    }

    #[test]
    fn content_round_trip_keeps_twin_fields() {
        let item = NewContentItem {
            drone_id: "krok".into(),
            kind: ContentKind::Photo,
            title: LocalizedText::new("Flight test").with(Locale::Uk, "Льотні випробування"),
            description: Some(LocalizedText::new("Over the range")),
            file_url: "https://blobs.example/krok/photos/1.jpg".into(),
            thumbnail_url: None,
            order: 3,
        };

        let fields = content_fields(&item);
        assert_eq!(fields["title"], "Flight test");
        assert_eq!(fields["titleUk"], "Льотні випробування");
        // descriptionUk falls back to the English text.
        assert_eq!(fields["descriptionUk"], "Over the range");
        assert_eq!(fields["type"], "photo");
        assert_eq!(fields["order"], 3);

        let back = content_from_document(document("c1", fields));
        assert_eq!(back.drone_id, "krok");
        assert_eq!(back.kind, ContentKind::Photo);
        assert_eq!(back.title.resolve(Locale::Uk), "Льотні випробування");
        assert_eq!(back.order, 3);
    }

    #[test]
    fn missing_order_and_timestamp_get_defaults() {
        let doc = document(
            "c2",
            json!({ "droneId": "krok", "type": "video", "title": "Demo", "fileUrl": "" }),
        );
        let item = content_from_document(doc);
        assert_eq!(item.order, 0);
        assert!(item.description.is_none());
        // createdAt absent → stamped at conversion time, never panics.
        assert!(item.created_at <= Utc::now());
    }

    #[test]
    fn unknown_kind_defaults_to_photo() {
        let doc = document(
            "c3",
            json!({ "droneId": "krok", "type": "hologram", "title": "x" }),
        );
        assert_eq!(content_from_document(doc).kind, ContentKind::Photo);
    }

    #[test]
    fn patch_emits_only_supplied_fields() {
        let patch = ContentPatch {
            file_url: Some("https://blobs.example/new.jpg".into()),
            ..ContentPatch::default()
        };
        let fields = content_patch_fields(&patch);
        let obj = fields.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["fileUrl"], "https://blobs.example/new.jpg");
    }

    #[test]
    fn drone_round_trip() {
        let model = NewDroneModel {
            name: LocalizedText::new("KROK").with(Locale::Uk, "КРОК"),
            slug: "krok".into(),
            order: 1,
        };
        let back = drone_from_document(document("d1", drone_fields(&model)));
        assert_eq!(back.name.resolve(Locale::Uk), "КРОК");
        assert_eq!(back.slug, "krok");
        assert_eq!(back.order, 1);
    }
}
