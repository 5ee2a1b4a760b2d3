use ::domain::Container as _;
use ::domain::MediaRegistry;
use ::domain::NodeId;
use ::domain::NodeLookup;

use crate::models::settings::MatchPolicy;
use crate::models::settings::MatchSettings;
use crate::traversal::LibraryTraversal as _;

macro_rules! regex {
    ($pattern:expr) => {
        ::once_cell::sync::Lazy::new(|| ::regex::Regex::new($pattern).unwrap())
    };
}

/// Folds punctuation, underscores and whitespace runs into single spaces, then trims.
pub fn normalize_name(name: &str) -> String {
    static NON_WORD: ::once_cell::sync::Lazy<::regex::Regex> = regex!(r"\W+");
    static SEPARATORS: ::once_cell::sync::Lazy<::regex::Regex> = regex!(r"[_\s]+");

    let name = NON_WORD.replace_all(name, " ");
    let name = SEPARATORS.replace_all(&name, " ");

    name.trim().to_owned()
}

/// Compares two already normalized names. Counts are in characters, not bytes.
pub fn names_match(a: &str, b: &str, settings: &MatchSettings) -> bool {
    match settings.policy {
        MatchPolicy::ExactMatch => a == b,
        MatchPolicy::MatchFirst => a.chars().take(settings.first_chars).eq(b.chars().take(settings.first_chars)),
        MatchPolicy::IgnoreLast => {
            let a_len = a.chars().count().saturating_sub(settings.ignore_last);
            let b_len = b.chars().count().saturating_sub(settings.ignore_last);

            a.chars().take(a_len).eq(b.chars().take(b_len))
        },
    }
}

/// First direct video child of `container`, in child order, whose name matches `candidate`.
pub fn find_matching_video(
    registry: &(impl NodeLookup + ?Sized), container: NodeId, candidate: &str, settings: &MatchSettings,
) -> Option<NodeId> {
    let candidate = normalize_name(candidate);

    registry
        .container(container)?
        .children()
        .iter()
        .filter_map(|child| registry.video(*child))
        .find(|video| names_match(&normalize_name(video.name()), &candidate, settings))
        .map(|video| video.id())
}

/// Runs [`find_matching_video`] over every container of the registry, roots first.
pub fn search_library(registry: &MediaRegistry, candidate: &str, settings: &MatchSettings) -> Vec<(NodeId, NodeId)> {
    registry
        .roots()
        .into_iter()
        .flat_map(|root| registry.collect_containers(root))
        .filter_map(|container| Some((container, find_matching_video(registry, container, candidate, settings)?)))
        .collect()
}
