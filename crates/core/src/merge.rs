//! Merge of `extend` overlays into a single element.
//!
//! Overlays apply left to right and the last writer wins per slot: the
//! semantic name, each meta and attribute key, each literal-keyed object
//! property, and the content of every other kind as a whole. Merging an
//! already merged element yields the same element again.

use log::warn;

use crate::element::{Body, Element};

/// Merge `overlays` in order. Nested extends are merged first. Returns
/// `None` when there is nothing to merge.
pub fn merge(overlays: &[Element]) -> Option<Element> {
    let mut merged: Option<Element> = None;
    for overlay in overlays {
        let Some(overlay) = flatten(overlay) else {
            continue;
        };
        merged = Some(match merged {
            None => overlay,
            Some(acc) => merge_pair(acc, overlay),
        });
    }
    if merged.is_none() {
        warn!(overlays = overlays.len(); "extend element has nothing to merge");
    }
    merged
}

/// Merge the overlays of an extend element; any other element is returned
/// as a copy.
pub fn merge_element(e: &Element) -> Option<Element> {
    flatten(e)
}

fn flatten(e: &Element) -> Option<Element> {
    match &e.body {
        Body::Extend(overlays) => merge(overlays.as_deref().unwrap_or_default()),
        _ => Some(e.clone()),
    }
}

fn merge_pair(mut acc: Element, overlay: Element) -> Element {
    if acc.kind() != overlay.kind() {
        return overlay;
    }

    let Element {
        element,
        meta,
        attributes,
        compact,
        body,
    } = overlay;

    if element.is_some() {
        acc.element = element;
    }
    acc.meta.extend(meta);
    acc.attributes.extend(attributes);
    acc.compact |= compact;

    match (&mut acc.body, body) {
        (Body::Object(slot), Body::Object(Some(items))) => {
            merge_properties(slot.get_or_insert_with(Vec::new), items);
        }
        (slot, body) => {
            if !body.is_empty() {
                *slot = body;
            }
        }
    }
    acc
}

fn merge_properties(items: &mut Vec<Element>, overlay: Vec<Element>) {
    for child in overlay {
        match literal_key(&child).map(str::to_owned) {
            Some(key) => {
                match items
                    .iter()
                    .position(|existing| literal_key(existing) == Some(key.as_str()))
                {
                    Some(pos) => items[pos] = child,
                    None => items.push(child),
                }
            }
            None => {
                if !items.contains(&child) {
                    items.push(child);
                }
            }
        }
    }
}

/// Literal property key of an object child: the string key of a member, or
/// the `name` of a named element. Variable keys have no literal key.
pub(crate) fn literal_key(e: &Element) -> Option<&str> {
    if e.is_variable() {
        return None;
    }
    match &e.body {
        Body::Member(key, _) if !key.is_variable() => key.as_str(),
        Body::Member(..) => None,
        _ => e.name(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementKind;

    fn prop(key: &str, value: Element) -> Element {
        Element::member(Element::string(key), Some(value))
    }

    #[test]
    fn empty_extend_merges_to_nothing() {
        assert_eq!(merge(&[]), None);
        assert_eq!(merge_element(&Element::empty(ElementKind::Extend)), None);
    }

    #[test]
    fn single_overlay_is_returned_as_is() {
        let a = Element::string("a").with_meta("title", Element::string("A"));
        assert_eq!(merge(&[a.clone()]), Some(a));
    }

    #[test]
    fn last_writer_wins_for_scalars() {
        let merged = merge(&[
            Element::string("a").with_element("Base"),
            Element::empty(ElementKind::String),
            Element::string("b"),
        ])
        .unwrap();
        assert_eq!(merged.as_str(), Some("b"));
        assert!(merged.is_element("Base"));
    }

    #[test]
    fn different_kinds_replace() {
        let merged = merge(&[Element::string("a"), Element::number(1.0)]).unwrap();
        assert_eq!(merged, Element::number(1.0));
    }

    #[test]
    fn object_properties_merge_per_key() {
        let base = Element::object(vec![
            prop("id", Element::number(1.0)),
            prop("name", Element::string("x")),
        ]);
        let overlay = Element::object(vec![
            prop("name", Element::string("y")),
            prop("extra", Element::boolean(true)),
        ]);
        let merged = merge(&[base, overlay]).unwrap();
        let items = merged.children().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0], prop("id", Element::number(1.0)));
        assert_eq!(items[1], prop("name", Element::string("y")));
        assert_eq!(items[2], prop("extra", Element::boolean(true)));
    }

    #[test]
    fn meta_and_attributes_overlay_per_key() {
        let base = Element::object(vec![])
            .with_meta("title", Element::string("A"))
            .with_meta("description", Element::string("base"));
        let overlay = Element::object(vec![]).with_meta("title", Element::string("B"));
        let merged = merge(&[base, overlay]).unwrap();
        assert_eq!(merged.meta("title").and_then(Element::as_str), Some("B"));
        assert_eq!(
            merged.meta("description").and_then(Element::as_str),
            Some("base")
        );
    }

    #[test]
    fn merging_is_idempotent() {
        let a = Element::object(vec![
            prop("id", Element::number(1.0)),
            Element::select(vec![Element::option(vec![prop("x", Element::null())])]),
        ]);
        let b = Element::object(vec![
            prop("id", Element::number(2.0)),
            Element::select(vec![Element::option(vec![prop("x", Element::null())])]),
        ]);
        let once = merge(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(once.children().unwrap().len(), 2);

        assert_eq!(merge(&[once.clone()]), Some(once.clone()));
        assert_eq!(merge(&[once.clone(), b]), Some(once.clone()));

        let nested = Element::extend(vec![Element::extend(vec![a]), once.clone()]);
        assert_eq!(merge_element(&nested), Some(once));
    }

    #[test]
    fn variable_members_have_no_literal_key() {
        let variable = Element::member(
            Element::string("k").with_attribute("variable", Element::boolean(true)),
            Some(Element::null()),
        );
        assert_eq!(literal_key(&variable), None);
        assert_eq!(literal_key(&prop("k", Element::null())), Some("k"));
        assert_eq!(
            literal_key(&Element::string("v").with_meta("name", Element::string("n"))),
            Some("n")
        );
    }
}
