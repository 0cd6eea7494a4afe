//! Stable series identity.

const SEPARATOR: &str = ".";

/// Build the identity of a series: the name, then each label key and value
/// in ascending key order, joined by `.`.
///
/// The result does not depend on the order the labels are supplied in.
pub fn series_identity<'a, I>(name: &str, labels: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<(&str, &str)> = labels.into_iter().collect();
    pairs.sort_unstable();

    let mut parts = Vec::with_capacity(pairs.len() * 2 + 1);
    parts.push(name);
    for (key, value) in pairs {
        parts.push(key);
        parts.push(value);
    }
    parts.join(SEPARATOR)
}
