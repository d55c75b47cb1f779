//! List reconciliation.
//!
//! Aligns a target ordered array against existing item nodes keyed by
//! `data-item-id` (preferred) or `data-item-index`. Creates missing nodes,
//! patches existing ones in place, removes surplus. Nodes for unaffected
//! items are never recreated, so focus, scroll position and running
//! animations survive a keystroke.

use crate::dom::{self, ITEM_ID_ATTR, ITEM_INDEX_ATTR};
use serde_json::Value;
use web_sys::{Document, Element};

/// The key material of one existing item node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ItemKey {
    pub id: Option<String>,
    pub index: Option<usize>,
}

/// Pick the existing node for a target entry.
///
/// Id match wins. When the target carries an id that no node has, only an
/// id-less node at the same index may be reused (a node with a *different*
/// id belongs to another item and must not be stolen).
pub(crate) fn match_existing(
    keys: &[ItemKey],
    used: &[bool],
    target_id: Option<&str>,
    index: usize,
) -> Option<usize> {
    if let Some(tid) = target_id {
        if let Some(j) = keys
            .iter()
            .enumerate()
            .find(|(j, k)| !used[*j] && k.id.as_deref() == Some(tid))
            .map(|(j, _)| j)
        {
            return Some(j);
        }
        return keys
            .iter()
            .enumerate()
            .find(|(j, k)| !used[*j] && k.id.is_none() && k.index == Some(index))
            .map(|(j, _)| j);
    }

    keys.iter()
        .enumerate()
        .find(|(j, k)| !used[*j] && k.index == Some(index))
        .map(|(j, _)| j)
}

fn item_id_of(entry: &Value, id_key: Option<&str>) -> Option<String> {
    let key = id_key?;
    entry
        .as_object()
        .and_then(|m| m.get(key))
        .and_then(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

fn prev_item_sibling(el: &Element) -> Option<Element> {
    let mut cur = el.previous_element_sibling();
    while let Some(c) = cur {
        if c.has_attribute(ITEM_INDEX_ATTR) {
            return Some(c);
        }
        cur = c.previous_element_sibling();
    }
    None
}

/// Reconcile `items` into `container`.
///
/// `build` synthesizes a fresh node (markers included) for a missing item;
/// `patch` applies one sparse entry to a node. `patch` runs on new nodes
/// too, so builders only produce the default sub-structure.
pub(crate) fn reconcile(
    doc: &Document,
    container: &Element,
    items: &[Value],
    id_key: Option<&str>,
    build: &dyn Fn(&Document, usize) -> Option<Element>,
    patch: &dyn Fn(&Element, &Value),
) {
    let existing = dom::item_nodes(container);
    let keys: Vec<ItemKey> = existing
        .iter()
        .map(|el| ItemKey {
            id: el.get_attribute(ITEM_ID_ATTR),
            index: el
                .get_attribute(ITEM_INDEX_ATTR)
                .and_then(|v| v.parse().ok()),
        })
        .collect();
    let mut used = vec![false; existing.len()];

    let mut desired: Vec<Element> = Vec::with_capacity(items.len());

    for (i, entry) in items.iter().enumerate() {
        let target_id = item_id_of(entry, id_key);

        let el = match match_existing(&keys, &used, target_id.as_deref(), i) {
            Some(j) => {
                used[j] = true;
                existing[j].clone()
            }
            None => {
                let Some(el) = build(doc, i) else { continue };
                let _ = container.append_child(&el);
                el
            }
        };

        let _ = el.set_attribute(ITEM_INDEX_ATTR, &i.to_string());
        if let Some(id) = &target_id {
            let _ = el.set_attribute(ITEM_ID_ATTR, id);
        }

        patch(&el, entry);
        desired.push(el);
    }

    // Surplus nodes: anything not claimed by the first N targets.
    for (j, el) in existing.iter().enumerate() {
        if !used[j] {
            el.remove();
        }
    }

    // Order repair: re-link only out-of-place nodes.
    let mut prev: Option<Element> = None;
    for el in &desired {
        let in_place = prev_item_sibling(el) == prev;
        if !in_place {
            let anchor = match &prev {
                Some(p) => p.next_sibling(),
                None => dom::item_nodes(container).first().map(|e| e.clone().into()),
            };
            let _ = container.insert_before(el, anchor.as_ref());
        }
        prev = Some(el.clone());
    }
}


// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn container_with(html: &str) -> (Document, Element) {
        let doc = web_sys::window().unwrap().document().unwrap();
        let host = doc.create_element("div").unwrap();
        host.set_inner_html(html);
        doc.body().unwrap().append_child(&host).unwrap();
        (doc, host)
    }

    fn text_build(doc: &Document, _i: usize) -> Option<Element> {
        doc.create_element("div").ok()
    }

    fn text_patch(el: &Element, entry: &Value) {
        if let Some(t) = entry.get("text").and_then(|v| v.as_str()) {
            el.set_text_content(Some(t));
        }
    }

    #[wasm_bindgen_test]
    fn test_grows_to_target_length_in_order() {
        let (doc, host) = container_with(r#"<div data-item-index="0">a</div>"#);
        let items = vec![json!({"text": "a"}), json!({"text": "b"}), json!({"text": "c"})];

        reconcile(&doc, &host, &items, None, &text_build, &text_patch);

        let nodes = crate::dom::item_nodes(&host);
        assert_eq!(nodes.len(), 3);
        let texts: Vec<_> = nodes.iter().map(|n| n.text_content().unwrap()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_shrinks_and_removes_surplus() {
        let (doc, host) = container_with(
            r#"<div data-item-index="0">a</div><div data-item-index="1">b</div><div data-item-index="2">c</div>"#,
        );
        let items = vec![json!({"text": "a"})];

        reconcile(&doc, &host, &items, None, &text_build, &text_patch);
        assert_eq!(crate::dom::item_nodes(&host).len(), 1);

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_existing_nodes_patched_in_place_not_recreated() {
        let (doc, host) = container_with(
            r#"<div data-item-index="0">a</div><div data-item-index="1">b</div>"#,
        );
        let before = crate::dom::item_nodes(&host);
        // Mark node identity through a property the reconciler never touches.
        before[0].set_attribute("data-witness", "w0").unwrap();

        let items = vec![json!({"text": "a2"}), json!({"text": "b"}), json!({"text": "c"})];
        reconcile(&doc, &host, &items, None, &text_build, &text_patch);

        let after = crate::dom::item_nodes(&host);
        assert_eq!(after.len(), 3);
        assert_eq!(after[0].get_attribute("data-witness").as_deref(), Some("w0"));
        assert_eq!(after[0].text_content().as_deref(), Some("a2"));

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_id_keyed_reorder_moves_nodes() {
        let (doc, host) = container_with(
            r#"<div data-item-index="0" data-item-id="x">x</div><div data-item-index="1" data-item-id="y">y</div>"#,
        );
        let items = vec![json!({"id": "y"}), json!({"id": "x"})];

        reconcile(&doc, &host, &items, Some("id"), &text_build, &text_patch);

        let nodes = crate::dom::item_nodes(&host);
        let texts: Vec<_> = nodes.iter().map(|n| n.text_content().unwrap()).collect();
        assert_eq!(texts, vec!["y", "x"]);
        assert_eq!(nodes[0].get_attribute("data-item-index").as_deref(), Some("0"));
        assert_eq!(nodes[1].get_attribute("data-item-index").as_deref(), Some("1"));

        host.remove();
    }
}
