//! Static display metadata for surface codes.
//!
//! Purely presentational. Unknown codes render as the code itself, white,
//! solid.

use odonto_core::constants::{DEFAULT_SURFACE_COLOR, DEFAULT_SURFACE_PATTERN};

/// Human-readable rendering of a code on the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDisplay {
    pub name: String,
    pub color: &'static str,
    pub pattern: &'static str,
}

fn known(code: &str) -> Option<(&'static str, &'static str, &'static str)> {
    let entry = match code {
        "car" => ("Caries", "#ff0000", "solid"),
        "sec" => ("Secondary caries", "#c0392b", "striped"),
        "amf" => ("Amalgam filling", "#7f8c8d", "solid"),
        "cmf" => ("Composite filling", "#3498db", "solid"),
        "gic" => ("Glass ionomer filling", "#1abc9c", "solid"),
        "tmp" => ("Temporary filling", "#bdc3c7", "dotted"),
        "sea" => ("Sealant", "#2ecc71", "striped"),
        "inl" => ("Inlay", "#16a085", "solid"),
        "onl" => ("Onlay", "#27ae60", "solid"),
        "ven" => ("Veneer", "#9b59b6", "solid"),
        "crn" => ("Crown", "#f1c40f", "solid"),
        "frc" => ("Fracture", "#8e44ad", "hatched"),
        "wea" => ("Wear", "#f39c12", "dotted"),
        "abr" => ("Abrasion", "#d35400", "dotted"),
        "ero" => ("Erosion", "#e67e22", "hatched"),
        _ => return None,
    };
    Some(entry)
}

/// Display metadata for `code`.
pub fn lookup_display(code: &str) -> CodeDisplay {
    match known(code) {
        Some((name, color, pattern)) => CodeDisplay {
            name: name.to_string(),
            color,
            pattern,
        },
        None => CodeDisplay {
            name: code.to_string(),
            color: DEFAULT_SURFACE_COLOR,
            pattern: DEFAULT_SURFACE_PATTERN,
        },
    }
}
