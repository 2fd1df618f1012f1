//! Map validation command implementation.

use std::path::PathBuf;

use imperium::{ResourceType, Session, TerrainType};

use super::{CliError, read_text};

/// One validation step and its outcome.
#[derive(Debug, PartialEq, Eq)]
struct Check {
    name: &'static str,
    passed: bool,
    /// Required checks abort validation when they fail.
    required: bool,
}

impl Check {
    const fn required(name: &'static str, passed: bool) -> Self {
        Self {
            name,
            passed,
            required: true,
        }
    }

    const fn advisory(name: &'static str, passed: bool) -> Self {
        Self {
            name,
            passed,
            required: false,
        }
    }
}

/// Execute the validate command.
///
/// # Errors
///
/// Returns an error if the map or resource file cannot be read or decoded.
pub(crate) fn execute(map: PathBuf, resources: Option<PathBuf>) -> Result<(), CliError> {
    let map_text = read_text(&map)?;
    let resource_text = resources.as_deref().map(read_text).transpose()?;

    println!("Validating: {}", map.display());
    println!();

    let (checks, outcome) = check_map(&map_text, resource_text.as_deref());
    for check in &checks {
        print_check(check);
    }
    let session = outcome?;

    let terrain = session.terrain();
    let counts = terrain_counts(&session);

    println!();
    println!("Summary:");
    println!("  Size:         {}x{}", terrain.width(), terrain.height());
    println!("  Cells:        {}", terrain.len());
    for terrain_type in TerrainType::ALL {
        let count = counts[terrain_type.index()];
        if count > 0 {
            println!("  {:<13} {count}", format!("{terrain_type:?}:"));
        }
    }

    if resource_text.is_some() {
        let placed = session
            .resources()
            .cells()
            .iter()
            .filter(|&&cell| cell != ResourceType::None)
            .count();
        println!("  Resources:    {placed}");
    }

    println!();
    println!("Validation successful!");

    Ok(())
}

/// Run every check, stopping at the first failed required one.
fn check_map(map_text: &str, resource_text: Option<&str>) -> (Vec<Check>, Result<Session, CliError>) {
    let mut checks = Vec::new();

    let mut session = match Session::new(map_text) {
        Ok(session) => {
            checks.push(Check::required("Map decodes", true));
            session
        }
        Err(e) => {
            checks.push(Check::required("Map decodes", false));
            return (checks, Err(e.into()));
        }
    };

    if let Some(text) = resource_text {
        if let Err(e) = session.load_resources(text) {
            checks.push(Check::required("Resource layer matches map", false));
            return (checks, Err(CliError::new(format!("invalid resources: {e}"))));
        }
        checks.push(Check::required("Resource layer matches map", true));
    }

    let counts = terrain_counts(&session);
    checks.push(Check::advisory(
        "No unknown terrain",
        counts[TerrainType::Unknown.index()] == 0,
    ));
    checks.push(Check::advisory(
        "Has land",
        counts[TerrainType::Water.index()] + counts[TerrainType::Unknown.index()]
            < session.terrain().len(),
    ));

    (checks, Ok(session))
}

fn terrain_counts(session: &Session) -> [usize; TerrainType::COUNT] {
    let mut counts = [0usize; TerrainType::COUNT];
    for cell in session.terrain().cells() {
        counts[cell.index()] += 1;
    }
    counts
}

fn print_check(check: &Check) {
    let (symbol, status) = match (check.passed, check.required) {
        (true, _) => ("✓", "OK"),
        (false, true) => ("✗", "FAILED"),
        (false, false) => ("!", "WARN"),
    };
    println!("  {symbol} {}: {status}", check.name);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(checks: &[Check]) -> Vec<(&'static str, bool)> {
        checks.iter().map(|c| (c.name, c.passed)).collect()
    }

    #[test]
    fn test_ragged_map_fails_decode() {
        let (checks, outcome) = check_map("PP\nP\n", None);
        assert_eq!(outcomes(&checks), vec![("Map decodes", false)]);
        assert!(outcome.is_err());
    }

    #[test]
    fn test_resource_shape_checked() {
        let (checks, outcome) = check_map("PPP\n", Some("gW\n"));
        assert_eq!(
            outcomes(&checks),
            vec![("Map decodes", true), ("Resource layer matches map", false)]
        );
        assert!(outcome.is_err());
    }

    #[test]
    fn test_advisory_checks_do_not_fail() {
        let (checks, outcome) = check_map("W?\nWW\n", Some("WW\nWW\n"));
        assert_eq!(
            outcomes(&checks),
            vec![
                ("Map decodes", true),
                ("Resource layer matches map", true),
                ("No unknown terrain", false),
                ("Has land", false),
            ]
        );
        assert!(outcome.is_ok());

        let (checks, outcome) = check_map("WP\n", None);
        assert!(checks.iter().all(|c| c.passed));
        assert!(outcome.is_ok());
    }
}
