//! JavaScript evaluated inside the Storybook probe page.
//!
//! The snapshot expression runs synchronously in one tick: it probes which
//! registry methods exist, reads the v6 `_configuring` flag and reads the data
//! of whichever shape it found. Its return value is a `RegistrySnapshot`.

use storycrawler_core::REGISTRY_GLOBAL;

const SNAPSHOT_TEMPLATE: &str = r#"(() => {
  const api = window["__REGISTRY__"];
  const has = name => !!api && typeof api[name] === "function";
  const capabilities = { raw: has("raw"), store: has("store"), getStorybook: has("getStorybook") };
  const store = capabilities.raw && capabilities.store ? api.store() : null;
  const configuring = !!(store && store._configuring);
  const snapshot = { capabilities, configuring, stories: null, oldStories: null };
  if (capabilities.raw) {
    if (!configuring || __FORCE__) {
      snapshot.stories = api.raw().map(s => ({ id: s.id, kind: s.kind, name: s.name }));
    }
  } else if (capabilities.getStorybook) {
    snapshot.oldStories = api.getStorybook().map(({ kind, stories }) => ({
      kind,
      names: stories.map(s => s.name),
    }));
  }
  return snapshot;
})()"#;

/// Expression returning a registry snapshot.
///
/// With `force` set, the raw list is read even while the registry reports
/// that it is still configuring.
pub fn snapshot_expression(force: bool) -> String {
    SNAPSHOT_TEMPLATE
        .replace("__REGISTRY__", REGISTRY_GLOBAL)
        .replace("__FORCE__", if force { "true" } else { "false" })
}

/// Predicate that holds once the page-global registry is defined.
pub fn registry_defined_predicate() -> String {
    format!("window.{}", REGISTRY_GLOBAL)
}
