//! Pre-render checks.
//!
//! Rendering assumes that reference resolution already ran. The check walks
//! the whole tree up front so that a missing `resolved` attribute fails the
//! call before any output is built.

use crate::element::{Body, Element};
use crate::error::RenderError;

/// Fail on the first `ref` element without a `resolved` attribute.
pub fn check_resolved(e: &Element) -> Result<(), RenderError> {
    if let Body::Ref(_) = e.body {
        match e.attribute("resolved") {
            Some(resolved) => check_resolved(resolved)?,
            None => return Err(unresolved(e)),
        }
    }

    if let Some(enumerations) = e.attribute("enumerations") {
        check_resolved(enumerations)?;
    }

    match &e.body {
        Body::Enum(Some(value)) => check_resolved(value),
        Body::Member(key, value) => {
            check_resolved(key)?;
            match value {
                Some(value) => check_resolved(value),
                None => Ok(()),
            }
        }
        // a ref's own content is the link, not data to render
        Body::Ref(_) => Ok(()),
        _ => e
            .children()
            .unwrap_or_default()
            .iter()
            .try_for_each(check_resolved),
    }
}

pub(crate) fn unresolved(e: &Element) -> RenderError {
    RenderError::UnresolvedRef {
        href: href(e).unwrap_or_default().to_owned(),
    }
}

/// Target of a reference: the string child named `href`.
pub fn href(e: &Element) -> Option<&str> {
    e.children()?
        .iter()
        .find(|c| c.name() == Some("href"))
        .and_then(Element::as_str)
}
