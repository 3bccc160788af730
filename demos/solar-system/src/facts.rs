/// Encyclopedia facts shown in the info panel.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Placeholder for values the encyclopedia does not carry.
pub const MISSING: &str = "—";
/// Discovery text for bodies known since antiquity.
pub const PREHISTORIC: &str = "Prehistoric";

const BUILTIN: &str = include_str!("../assets/encyclopedia.json");

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BodyFacts {
    #[serde(rename = "type")]
    pub kind: String,
    pub temperature: String,
    pub diameter: String,
    pub day: String,
    pub year: String,
    #[serde(default)]
    pub gravity: Option<String>,
    #[serde(default)]
    pub atmosphere: Option<String>,
    #[serde(default)]
    pub escape_velocity: Option<String>,
    #[serde(default)]
    pub discovery: Option<String>,
    #[serde(default)]
    pub moons: Option<u32>,
    pub life: String,
    pub fun_fact: String,
    pub description: String,
}

/// Static name → facts table. Keys match body names exactly.
#[derive(Debug, Clone, Default)]
pub struct Encyclopedia {
    entries: HashMap<String, BodyFacts>,
}

impl Encyclopedia {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// The table compiled into the crate.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(BUILTIN)
    }

    pub fn lookup(&self, name: &str) -> Option<&BodyFacts> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_parses() {
        let facts = Encyclopedia::builtin().unwrap();
        for name in ["SUN", "Mercury", "Earth", "Moon", "Saturn", "Pluto", "Eris"] {
            assert!(facts.lookup(name).is_some(), "missing {name}");
        }
        assert_eq!(facts.lookup("Earth").unwrap().moons, Some(1));
        assert!(!facts.is_empty());
        assert!(facts.len() >= 13);
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let facts = Encyclopedia::builtin().unwrap();
        assert!(facts.lookup("earth").is_none());
        assert!(facts.lookup("Vulcan").is_none());
    }

    #[test]
    fn optional_fields_default_to_none() {
        let json = r#"{ "Rock": {
            "type": "Asteroid", "temperature": "cold", "diameter": "1 km",
            "day": "?", "year": "?", "life": "None",
            "fun_fact": "It is a rock.", "description": "A rock."
        } }"#;
        let facts = Encyclopedia::from_json(json).unwrap();
        let rock = facts.lookup("Rock").unwrap();
        assert_eq!(rock.kind, "Asteroid");
        assert!(rock.gravity.is_none());
        assert!(rock.discovery.is_none());
        assert!(rock.moons.is_none());
    }
}
