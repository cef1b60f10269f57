//! Reduces marker groups and a filter to the ordered visible rows.

use tracing::trace;

use super::MarkerRow;
use crate::filter::{FilterOptions, MatchSpan};
use crate::label::LabelFormatter;
use crate::model::ResourceMarkers;

fn non_empty(spans: Option<Vec<MatchSpan>>) -> Option<Vec<MatchSpan>> {
    spans.filter(|s| !s.is_empty())
}

/// Projects `groups` through `options` into rows sorted by severity.
///
/// Per marker, first match wins: walkthrough resources are dropped, then
/// excluded resources, included resources are kept unconditionally, then the
/// severity toggle and the text filter (with negation) decide. Ties in
/// severity keep encounter order.
pub fn filter_markers(
    groups: &[ResourceMarkers],
    options: &FilterOptions,
    labels: &dyn LabelFormatter,
) -> Vec<MarkerRow> {
    let text = &options.text_filter;
    let mut rows = Vec::new();

    for group in groups {
        let resource = &group.resource;
        if resource.is_walkthrough() {
            continue;
        }

        let relative = labels.relative_path(resource);
        if options
            .excludes_matcher
            .matches(resource, relative.as_deref())
        {
            trace!(resource = %resource, "resource excluded");
            continue;
        }
        let included = options
            .includes_matcher
            .matches(resource, relative.as_deref());
        let file_label = text.is_active().then(|| labels.label(resource));

        for marker in &group.markers {
            if included {
                rows.push(MarkerRow::new(marker.clone()));
                continue;
            }

            if !options.shows(marker.severity) {
                continue;
            }

            let Some(file_label) = file_label.as_deref() else {
                rows.push(MarkerRow::new(marker.clone()));
                continue;
            };

            let source_matches = non_empty(
                marker
                    .source
                    .as_deref()
                    .and_then(|s| text.match_fuzzy(s)),
            );
            let code_matches = non_empty(
                marker
                    .code
                    .as_ref()
                    .and_then(|c| text.match_fuzzy(c.value())),
            );
            let message_matches = non_empty(text.match_words(&marker.message));
            let file_matches = non_empty(text.match_words(file_label));
            let owner_matches = non_empty(text.match_words(&marker.owner));

            let matched = source_matches.is_some()
                || code_matches.is_some()
                || message_matches.is_some()
                || file_matches.is_some()
                || owner_matches.is_some();

            if matched != text.negate {
                rows.push(MarkerRow {
                    marker: marker.clone(),
                    source_matches,
                    code_matches,
                    message_matches,
                    file_matches,
                    owner_matches,
                });
            }
        }
    }

    rows.sort_by_key(|row| row.severity().rank());
    rows
}
