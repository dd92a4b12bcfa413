/// Allocate the next serial number for a prefix, e.g. `PMAYG-0004`.
///
/// The number is one past the highest numeric suffix among `existing`
/// serials carrying `prefix`, so deleting a row never causes a surviving
/// serial to be handed out again. Suffixes too large to increment are
/// ignored. Two sessions allocating at the same time can still pick the
/// same number.
pub fn next_serial<'a, I>(existing: I, prefix: &str, width: usize) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let next = existing
        .into_iter()
        .filter_map(|serial| serial.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .filter_map(|n| n.checked_add(1))
        .max()
        .unwrap_or(1);
    format!("{}{:0width$}", prefix, next, width = width)
}
