use itertools::Itertools;
use models::ServiceSelection;

pub const SERVICES_VAR: &str = "SERVICES";

/// Builds the container environment: a single `SERVICES=a,b,c` entry naming
/// the selected services in order, or nothing when the selection is empty so
/// the image falls back to its own default set.
pub fn compose_environment(selections: &[ServiceSelection]) -> Vec<String> {
    if selections.is_empty() {
        return Vec::new();
    }

    let names = selections
        .iter()
        .map(|s| s.service.as_str().to_lowercase())
        .join(",");

    vec![format!("{}={}", SERVICES_VAR, names)]
}
