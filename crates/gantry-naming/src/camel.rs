//! Word-boundary camelization of component names.

/// Convert a kebab/snake/dotted name to camelCase.
///
/// The transformation is fixed: the name is split on `-`, `_` and `.`, the
/// first word is kept as-is and every following word gets its first letter
/// uppercased. Empty segments are skipped, so repeated separators collapse.
///
/// # Example
///
/// ```
/// use gantry_naming::camelize;
///
/// assert_eq!(camelize("gantry-plugin-metrics"), "gantryPluginMetrics");
/// assert_eq!(camelize("job_queue"), "jobQueue");
/// ```
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, word) in name
        .split(['-', '_', '.'])
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        if i == 0 {
            out.push_str(word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out
}
