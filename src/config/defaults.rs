//! Built-in names and defaults
//!
//! File names probed during discovery, the identifiers of the ordering
//! plugin, and the settings keys with their fallback values.

use crate::types::{SortingOptions, Strategy};

/// Package manifest that may embed configuration under [`MANIFEST_KEY`]
pub const MANIFEST_FILE: &str = "package.json";

/// Manifest field holding the embedded lint configuration
pub const MANIFEST_KEY: &str = "stylelint";

/// Dotfile configuration holding JSON (or YAML, which is not inspected)
pub const RC_FILE: &str = ".stylelintrc";

/// Candidate names probed in every directory, highest priority first
pub const CONFIG_CANDIDATES: [&str; 7] = [
    RC_FILE,
    ".stylelintrc.json",
    ".stylelintrc.yml",
    ".stylelintrc.yaml",
    ".stylelintrc.js",
    "stylelint.config.js",
    MANIFEST_FILE,
];

/// Substrings identifying the ordering plugin inside a `plugins` entry.
///
/// Substring matching also covers scoped packages (`@acme/stylelint-oldfashioned-order`)
/// and local paths pointing into `node_modules`.
pub const PLUGIN_ALIASES: [&str; 3] = [
    "stylelint-oldfashioned-order",
    "oldfashioned",
    "oldschool-order",
];

/// Key of the ordering rule inside a configuration's `rules` map
pub const RULE_KEY: &str = "oldfashioned/order";

pub const SETTING_STRATEGY: &str = "sorting.strategy";
pub const SETTING_EMPTY_LINES: &str = "sorting.emptyLinesBetweenGroups";
pub const SETTING_SORT_WITHIN_GROUPS: &str = "sorting.sortPropertiesWithinGroups";

pub const DEFAULT_STRATEGY: Strategy = Strategy::Grouped;
pub const DEFAULT_EMPTY_LINES: bool = true;
pub const DEFAULT_SORT_WITHIN_GROUPS: bool = true;

/// Options used when no settings store is available at all
pub fn default_options() -> SortingOptions {
    SortingOptions {
        strategy: DEFAULT_STRATEGY,
        empty_lines_between_groups: DEFAULT_EMPTY_LINES,
        sort_properties_within_groups: DEFAULT_SORT_WITHIN_GROUPS,
    }
}
