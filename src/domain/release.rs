/// Label used when neither an explicit release nor a tag is given
pub const SNAPSHOT: &str = "SNAPSHOT";

/// Compute the release label embedded into the artifact.
///
/// An explicit label always wins, even when a tag drives the run. Otherwise a
/// tag yields its name with `ignore_tag_prefix` stripped (if present), and
/// anything else yields [SNAPSHOT].
pub fn derive_release_label(explicit: &str, tag: Option<&str>, ignore_tag_prefix: &str) -> String {
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    match tag {
        Some(tag) => tag
            .strip_prefix(ignore_tag_prefix)
            .unwrap_or(tag)
            .to_string(),
        None => SNAPSHOT.to_string(),
    }
}
