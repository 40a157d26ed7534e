//! The fixed set of people (and one bot) that book meetings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A setter: whoever is responsible for booking a meeting.
///
/// The set is closed on purpose. Events that cannot be attributed to one of
/// these four are dropped by the classifier, never funneled into a default
/// bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Setter {
    Daniela,
    Teresa,
    Matias,
    Robot,
}

impl Setter {
    /// All setters, in the order they appear in reports and in the sheet.
    pub const ALL: [Setter; 4] = [Setter::Daniela, Setter::Teresa, Setter::Matias, Setter::Robot];
}

impl fmt::Display for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Setter::Daniela => "Daniela",
            Setter::Teresa => "Teresa",
            Setter::Matias => "Matias",
            Setter::Robot => "Robot",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Setter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Daniela" => Ok(Setter::Daniela),
            "Teresa" => Ok(Setter::Teresa),
            "Matias" => Ok(Setter::Matias),
            "Robot" => Ok(Setter::Robot),
            other => Err(format!("Unknown setter '{}'", other)),
        }
    }
}
