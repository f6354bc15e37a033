//! Merging a palette into a settings document and stripping it back out.
//!
//! Ownership is proven by the root marker: a document carrying
//! `"tintsync.ownedTheme": "Monokai"` tells us the managed colors under
//! `"[Monokai]"` are ours. Without a marker nothing in the document is treated
//! as ours; only a merge, which callers reach unforced solely when no
//! unowned colors exist, claims managed keys it did not write.
//!
//! All three operations are pure and never fail. Key order of everything
//! they keep is preserved.

use serde_json::Value;
use tintsync_color::{ManagedKey, Palette};

use crate::document::{find_owner, theme_block_key, Document, Owner};
use crate::keys::{is_managed_key, is_marker_key, OWNER_MARKER_KEY};

/// Writes `palette` into the block for `theme_name` and marks it owned.
///
/// - Every marker key is dropped and the canonical marker is set to
///   `theme_name` at the root.
/// - Managed keys are stripped from the previously owned block (dropping the
///   block if nothing else remains) and from the target block.
/// - Root-level managed color keys are always stripped. Unforced callers
///   never get here while unowned root colors exist, so reaching merge with
///   them means a forced takeover, and the marker written below would claim
///   them on the next pass anyway.
/// - Every other key, including user keys inside the target block, is kept.
pub fn merge(existing: &Document, palette: &Palette, theme_name: &str) -> Document {
    let owner = find_owner(existing);
    if let Some(owner) = owner.as_ref().filter(|o| o.is_legacy()) {
        tracing::debug!(marker = owner.marker_key, "upgrading legacy ownership marker");
    }
    let target_block = theme_block_key(theme_name);

    let mut out = strip_owned(existing, owner.as_ref(), Some(&target_block), true);

    let colors = palette
        .iter()
        .map(|(key, hex)| (key.as_str().to_owned(), Value::String(hex.to_owned())));
    match out.get_mut(&target_block) {
        Some(Value::Object(block)) => block.extend(colors),
        _ => {
            // Absent, or a non-object squatting on the block key.
            out.insert(target_block, Value::Object(colors.collect()));
        }
    }
    out.insert(
        OWNER_MARKER_KEY.to_owned(),
        Value::String(theme_name.to_owned()),
    );
    out
}

/// Strips everything this system owns.
///
/// Returns `None` when nothing remains; callers write an empty object in
/// that case. A document without a marker comes back unchanged.
pub fn remove(existing: &Document) -> Option<Document> {
    let owner = find_owner(existing);
    let out = strip_owned(existing, owner.as_ref(), None, owner.is_some());
    (!out.is_empty()).then_some(out)
}

/// True when managed colors are present that no marker accounts for.
///
/// That is the case when root-level managed color keys exist with no
/// marker, or when the block for `theme_name` holds managed color keys while
/// the marker names a different theme (or is missing). Either way someone
/// other than this system wrote them.
pub fn has_managed_keys_without_marker(existing: &Document, theme_name: Option<&str>) -> bool {
    let owner = find_owner(existing);

    if owner.is_none() && existing.keys().any(|k| ManagedKey::is_managed(k)) {
        return true;
    }

    let Some(theme_name) = theme_name else {
        return false;
    };
    let owns_theme = owner.as_ref().is_some_and(|o| o.theme == theme_name);
    match existing.get(&theme_block_key(theme_name)) {
        Some(Value::Object(block)) => {
            !owns_theme && block.keys().any(|k| ManagedKey::is_managed(k))
        }
        _ => false,
    }
}

/// Copies `existing` minus the markers and managed keys the owner accounts
/// for. `also_strip` names one more block to clear of managed keys; it is
/// kept even when left empty. `root_colors` strips root-level managed keys.
fn strip_owned(
    existing: &Document,
    owner: Option<&Owner>,
    also_strip: Option<&str>,
    root_colors: bool,
) -> Document {
    let owned_block = owner.map(Owner::block_key);
    let mut out = Document::new();

    for (key, value) in existing {
        if is_marker_key(key) {
            continue;
        }
        if root_colors && ManagedKey::is_managed(key) {
            continue;
        }
        let is_owned = owned_block.as_deref() == Some(key.as_str());
        let is_target = also_strip == Some(key.as_str());
        match value {
            Value::Object(block) if is_owned || is_target => {
                let kept: Document = block
                    .iter()
                    .filter(|(k, _)| !is_managed_key(k))
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                if is_target || !kept.is_empty() {
                    out.insert(key.clone(), Value::Object(kept));
                }
            }
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}
