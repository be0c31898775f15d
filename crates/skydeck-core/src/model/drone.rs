// ── Drone model catalog types ──

use serde::{Deserialize, Serialize};

use super::locale::{Locale, LocalizedText};

/// A catalog entry for one drone model. Read-heavy, rarely mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneModel {
    pub id: String,
    pub name: LocalizedText,
    pub slug: String,
    pub order: i64,
}

/// A catalog entry about to be created (id is store-assigned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDroneModel {
    pub name: LocalizedText,
    pub slug: String,
    pub order: i64,
}

/// Partial catalog update; only `Some` fields are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DronePatch {
    pub name: Option<LocalizedText>,
    pub slug: Option<String>,
    pub order: Option<i64>,
}

impl DroneModel {
    /// The deployed fleet. The admin surfaces default to these four ids;
    /// the catalog collection remains the source of truth for the public
    /// site and supports full CRUD through the repository.
    pub fn builtin() -> Vec<Self> {
        [
            ("krok", "KROK", "КРОК"),
            ("kortyk", "KORTYK", "КОРТИК"),
            ("garpun", "GARPUN", "ГАРПУН"),
            ("kibec", "KIBEC", "КІБЕЦЬ"),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (id, en, uk))| Self {
            id: id.to_owned(),
            name: LocalizedText::new(en).with(Locale::Uk, uk),
            slug: id.to_owned(),
            order: i64::try_from(i).unwrap_or(0) + 1,
        })
        .collect()
    }
}
