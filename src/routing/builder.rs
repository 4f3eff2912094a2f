//! Route table compilation.
//!
//! # Responsibilities
//! - Turn endpoint descriptors into a flat list of route entries
//! - Apply the annotation precedence policy
//! - Resolve conflicting annotations per the configured ambiguity policy
//! - De-duplicate entries by full-tuple equality
//!
//! # Precedence
//! ```text
//! controller:  localized(culture) > plain > canonical
//! action:      localized(culture) > plain > canonical
//! ```
//! Controller and action are layered independently and keyed per culture.
//! A controller with localized annotations only produces culture entries;
//! otherwise plain overrides produce a culture-agnostic entry and localized
//! actions produce culture entries under the plain (or canonical) controller.
//!
//! # Design Decisions
//! - Pure function, no I/O, no shared state
//! - Per endpoint, override entries are emitted before the identity entry so
//!   a first-match lookup in the culture-agnostic scope prefers the override

use std::collections::HashSet;

use crate::config::AmbiguityPolicy;
use crate::descriptor::{EndpointDescriptor, LocalizedRouteAnnotation, PlainRouteAnnotation};
use crate::routing::error::{AnnotationTarget, BuildError};
use crate::routing::types::{RouteEntry, RouteName};

/// Compile descriptors into de-duplicated route entries.
pub fn build_entries(
    descriptors: &[EndpointDescriptor],
    policy: AmbiguityPolicy,
) -> Result<Vec<RouteEntry>, BuildError> {
    let mut entries = Vec::with_capacity(descriptors.len() * 2);
    for descriptor in descriptors {
        build_endpoint(descriptor, policy, &mut entries)?;
    }
    Ok(dedup(entries))
}

fn build_endpoint(
    d: &EndpointDescriptor,
    policy: AmbiguityPolicy,
    out: &mut Vec<RouteEntry>,
) -> Result<(), BuildError> {
    let original = d.canonical();
    let controller_localized =
        select_localized(d, AnnotationTarget::Controller, &d.controller_localized, policy)?;
    let action_localized =
        select_localized(d, AnnotationTarget::Action, &d.action_localized, policy)?;
    let controller_plain = select_plain(d, AnnotationTarget::Controller, &d.controller_plain, policy)?;
    let action_plain = select_plain(d, AnnotationTarget::Action, &d.action_plain, policy)?;

    let entry = |culture: Option<&str>, controller: &str, action: &str| RouteEntry {
        culture: culture.map(str::to_string),
        original: original.clone(),
        translated: RouteName::new(controller, action),
    };

    if controller_localized.is_empty() {
        let controller = controller_plain.unwrap_or(&d.controller);
        let action = action_plain.unwrap_or(&d.action);

        // Covers both "plain controller + plain action" and single-sided overrides.
        if controller != d.controller || action != d.action {
            out.push(entry(None, controller, action));
        }

        for localized in &action_localized {
            out.push(entry(Some(localized.culture.as_str()), controller, &localized.template));
        }
    } else {
        for localized in &controller_localized {
            let action = action_localized
                .iter()
                .find(|a| a.culture == localized.culture)
                .map(|a| a.template.as_str())
                .or(action_plain)
                .unwrap_or(&d.action);
            out.push(entry(Some(localized.culture.as_str()), &localized.template, action));
        }

        for orphan in action_localized
            .iter()
            .filter(|a| !controller_localized.iter().any(|c| c.culture == a.culture))
        {
            tracing::debug!(
                endpoint = %original,
                culture = %orphan.culture,
                "Action localized for a culture its controller does not declare; ignored"
            );
        }
    }

    out.push(RouteEntry::identity(original));
    Ok(())
}

/// One annotation per culture, in declaration order.
fn select_localized<'a>(
    d: &EndpointDescriptor,
    target: AnnotationTarget,
    annotations: &'a [LocalizedRouteAnnotation],
    policy: AmbiguityPolicy,
) -> Result<Vec<&'a LocalizedRouteAnnotation>, BuildError> {
    let mut selected: Vec<&LocalizedRouteAnnotation> = Vec::with_capacity(annotations.len());
    for annotation in annotations {
        match selected.iter().find(|s| s.culture == annotation.culture) {
            None => selected.push(annotation),
            Some(kept) if kept.template == annotation.template => {}
            Some(kept) => {
                on_ambiguity(d, target, Some(annotation.culture.as_str()), policy)?;
                tracing::warn!(
                    endpoint = %d.canonical(),
                    annotated = %target,
                    culture = %annotation.culture,
                    kept = %kept.template,
                    ignored = %annotation.template,
                    "Conflicting localized annotations, first one wins"
                );
            }
        }
    }
    Ok(selected)
}

/// The single plain template of a target, if any.
fn select_plain<'a>(
    d: &EndpointDescriptor,
    target: AnnotationTarget,
    annotations: &'a [PlainRouteAnnotation],
    policy: AmbiguityPolicy,
) -> Result<Option<&'a str>, BuildError> {
    let Some(first) = annotations.first() else {
        return Ok(None);
    };

    if let Some(other) = annotations.iter().find(|a| a.template != first.template) {
        on_ambiguity(d, target, None, policy)?;
        tracing::warn!(
            endpoint = %d.canonical(),
            annotated = %target,
            kept = %first.template,
            ignored = %other.template,
            "Multiple plain annotations, first one wins"
        );
    }
    Ok(Some(first.template.as_str()))
}

fn on_ambiguity(
    d: &EndpointDescriptor,
    target: AnnotationTarget,
    culture: Option<&str>,
    policy: AmbiguityPolicy,
) -> Result<(), BuildError> {
    match policy {
        AmbiguityPolicy::FirstWins => Ok(()),
        AmbiguityPolicy::Reject => Err(BuildError::AmbiguousAnnotation {
            controller: d.controller.clone(),
            action: d.action.clone(),
            target,
            culture: culture.map(str::to_string),
        }),
    }
}

/// Drop repeated entries, keeping the first occurrence.
fn dedup(entries: Vec<RouteEntry>) -> Vec<RouteEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|e| seen.insert(e.clone()))
        .collect()
}
