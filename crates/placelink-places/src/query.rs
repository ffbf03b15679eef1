//! Search-query construction from a location's name and address.

/// Derives the single search string sent to every tier.
///
/// An absent or blank address yields the name unchanged. When the address
/// already leads with the name (case-insensitive) the address alone is used,
/// avoiding redundant `"Name Name, Street"` queries; otherwise name and
/// address are concatenated. Leading with the name is the test, not mere
/// containment: `"Piazza del Duomo"` contains `"Duomo"` but does not
/// identify it, so that pair still concatenates.
#[must_use]
pub fn build_query(name: &str, address: Option<&str>) -> String {
    let Some(address) = address.map(str::trim).filter(|a| !a.is_empty()) else {
        return name.to_owned();
    };
    if address.to_lowercase().starts_with(&name.to_lowercase()) {
        return address.to_owned();
    }
    format!("{name} {address}")
}
