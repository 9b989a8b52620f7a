//! Schema-agnostic capture of the whole document.
//!
//! Every element becomes a JSON object: attributes under [`ATTRIBUTES_KEY`],
//! leaf text under [`TEXT_KEY`], and children under their tag name. Repeated
//! sibling tags collapse into an array in document order.

use serde_json::{Map, Value};

use crate::Element;

/// Key holding an element's attributes.
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Key holding the trimmed text of an element without children.
pub const TEXT_KEY: &str = "@text";

/// Convert the document to `{root_tag: {...}}` and prune empty values.
pub fn extract_generic(root: &Element) -> Value {
    prune(to_tree(root))
}

/// Convert an element to `{tag: body}` without pruning.
pub fn to_tree(element: &Element) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(element.tag.clone(), Value::Object(element_body(element)));
    Value::Object(wrapper)
}

fn element_body(element: &Element) -> Map<String, Value> {
    let mut body = Map::new();

    if !element.attributes.is_empty() {
        let attributes = element
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        body.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attributes));
    }

    if element.children.is_empty() {
        if let Some(text) = element.text.as_deref().map(str::trim) {
            if !text.is_empty() {
                body.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
            }
        }
        return body;
    }

    for child in &element.children {
        let child_body = Value::Object(element_body(child));
        match body.get_mut(&child.tag) {
            Some(Value::Array(siblings)) => siblings.push(child_body),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, child_body]);
            }
            None => {
                body.insert(child.tag.clone(), child_body);
            }
        }
    }

    body
}

/// Drop null, `[]` and `{}` values from objects and arrays.
///
/// A value is tested before its own contents are pruned, so a container
/// that only empties out after pruning is kept.
pub fn prune(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !is_empty_value(v))
                .map(|(k, v)| (k, prune(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !is_empty_value(v))
                .map(prune)
                .collect(),
        ),
        other => other,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;
    use serde_json::json;

    #[test]
    fn test_attributes_text_and_children() {
        let root = parse_document(
            r#"<PathOfBuilding2><Build level="90"><PlayerStat stat="Life" value="1"/></Build><Notes> hi </Notes></PathOfBuilding2>"#,
        )
        .unwrap();

        assert_eq!(
            extract_generic(&root),
            json!({
                "PathOfBuilding2": {
                    "Build": {
                        "@attributes": {"level": "90"},
                        "PlayerStat": {"@attributes": {"stat": "Life", "value": "1"}}
                    },
                    "Notes": {"@text": "hi"}
                }
            })
        );
    }

    #[test]
    fn test_repeated_siblings_collapse_to_list() {
        let root = parse_document(r#"<Skills><Skill id="1"/><Skill id="2"/><Skill id="3"/></Skills>"#).unwrap();
        assert_eq!(
            extract_generic(&root),
            json!({
                "Skills": {
                    "Skill": [
                        {"@attributes": {"id": "1"}},
                        {"@attributes": {"id": "2"}},
                        {"@attributes": {"id": "3"}}
                    ]
                }
            })
        );
    }

    #[test]
    fn test_text_dropped_when_element_has_children() {
        let root = parse_document("<Item>body text<ModRange id=\"1\"/></Item>").unwrap();
        assert_eq!(
            extract_generic(&root),
            json!({"Item": {"ModRange": {"@attributes": {"id": "1"}}}})
        );
    }

    #[test]
    fn test_empty_elements_are_pruned() {
        let root = parse_document("<A><Empty/><Keep x=\"1\"/></A>").unwrap();
        assert_eq!(
            to_tree(&root),
            json!({"A": {"Empty": {}, "Keep": {"@attributes": {"x": "1"}}}})
        );
        assert_eq!(
            extract_generic(&root),
            json!({"A": {"Keep": {"@attributes": {"x": "1"}}}})
        );
    }

    #[test]
    fn test_prune_is_single_level() {
        let pruned = prune(json!({"a": {"b": {}}, "c": null, "d": [[], "x", null]}));
        assert_eq!(pruned, json!({"a": {}, "d": ["x"]}));
    }

    #[test]
    fn test_document_order_is_kept() {
        let root = parse_document("<R><Z/><A t=\"1\"/><M t=\"2\"/></R>").unwrap();
        let tree = extract_generic(&root);
        let keys: Vec<_> = tree["R"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["A", "M"]);
    }
}
