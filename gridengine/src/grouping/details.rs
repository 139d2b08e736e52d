use gridcanvas::{GroupDetails, GroupHeader, Theme, ThemeOverride};

use super::collapse::CollapseSet;
use super::model::GROUP_DELIMITER;

/// Host resolver from a group label to its presentation details.
pub type GroupDetailsFn = dyn Fn(&str) -> GroupDetails;

/// Whether the header for `header` should be marked collapsed.
///
/// By default a header matches an entry equal to its label or ending in
/// `|label`, which also covers legacy single-level keys. With `strict` only
/// the header's own full key counts.
pub fn is_header_collapsed(header: &GroupHeader<'_>, collapsed: &CollapseSet, strict: bool) -> bool {
    if strict {
        return collapsed.contains(&header.path.join(GROUP_DELIMITER));
    }
    let suffix = format!("{GROUP_DELIMITER}{}", header.name);
    collapsed.contains(header.name)
        || collapsed
            .iter()
            .any(|key| key == header.name || key.ends_with(&suffix))
}

/// Resolve details for a header, tinting it when collapsed.
///
/// The resolver's icon and override are kept; the name is always the label.
pub fn group_details(
    header: &GroupHeader<'_>,
    collapsed: &CollapseSet,
    resolver: Option<&GroupDetailsFn>,
    theme: &Theme,
    strict: bool,
) -> GroupDetails {
    let mut details = resolver.map(|resolve| resolve(header.name)).unwrap_or_default();
    details.name = header.name.to_string();

    if is_header_collapsed(header, collapsed, strict) {
        let focus = ThemeOverride::new().bg_header(theme.bg_header_has_focus);
        details.override_theme = Some(details.override_theme.unwrap_or_default().merge(focus));
    }
    details
}
