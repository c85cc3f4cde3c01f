//! Snapshot DTOs and the JSON wire format
//!
//! The persisted document is one JSON object:
//!
//! ```json
//! {
//!   "user": "Ann",
//!   "selves": [
//!     {
//!       "id": 3,
//!       "name": "Work Me",
//!       "observations": { "known": [], "knowable_1": [], "knowable_2": [] },
//!       "authority": { "name": "Manager", "pointsToSelf": false }
//!     }
//!   ],
//!   "notes": "",
//!   "nextId": 4,
//!   "theme": "light"
//! }
//! ```
//!
//! Decoding merges each top-level field against its default on its own, so
//! older snapshots (no `theme`, no `notes`) and partly damaged ones still load.

use std::collections::HashSet;

use resolver_domain::{AppState, Authority, Observations, SelfId, SelfModel, Theme, MAX_SELF_ID};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::StoreError;

/// Whole-session snapshot as written to the slot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDto {
    /// User display name
    pub user: Option<String>,
    /// Modeled selves
    pub selves: Vec<SelfDto>,
    /// Free-text notes
    pub notes: String,
    /// Next id to allocate
    pub next_id: u64,
    /// Theme selection
    pub theme: ThemeDto,
}

/// One self as written to the slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfDto {
    /// Self id
    pub id: u64,
    /// Self name
    pub name: String,
    /// Observations per category
    #[serde(default)]
    pub observations: ObservationsDto,
    /// Authority
    #[serde(default)]
    pub authority: AuthorityDto,
}

/// Observation lists as written to the slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationsDto {
    /// Known entries
    #[serde(default)]
    pub known: Vec<String>,
    /// Knowable A entries
    #[serde(default)]
    pub knowable_1: Vec<String>,
    /// Knowable B entries
    #[serde(default)]
    pub knowable_2: Vec<String>,
}

/// Authority as written to the slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityDto {
    /// Authority name
    #[serde(default)]
    pub name: String,
    /// Whether the self answers to itself
    #[serde(default)]
    pub points_to_self: bool,
}

/// Theme as written to the slot
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeDto {
    /// "light"
    #[default]
    Light,
    /// "dark"
    Dark,
    /// "colorblind"
    Colorblind,
}

impl From<Theme> for ThemeDto {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemeDto::Light,
            Theme::Dark => ThemeDto::Dark,
            Theme::Colorblind => ThemeDto::Colorblind,
        }
    }
}

impl From<ThemeDto> for Theme {
    fn from(dto: ThemeDto) -> Self {
        match dto {
            ThemeDto::Light => Theme::Light,
            ThemeDto::Dark => Theme::Dark,
            ThemeDto::Colorblind => Theme::Colorblind,
        }
    }
}

impl From<&SelfModel> for SelfDto {
    fn from(model: &SelfModel) -> Self {
        Self {
            id: model.id.value(),
            name: model.name.clone(),
            observations: ObservationsDto {
                known: model.observations.known.clone(),
                knowable_1: model.observations.knowable_1.clone(),
                knowable_2: model.observations.knowable_2.clone(),
            },
            authority: AuthorityDto {
                name: model.authority.name.clone(),
                points_to_self: model.authority.points_to_self,
            },
        }
    }
}

impl From<SelfDto> for SelfModel {
    fn from(dto: SelfDto) -> Self {
        Self {
            id: SelfId::from_value(dto.id),
            name: dto.name,
            observations: Observations {
                known: dto.observations.known,
                knowable_1: dto.observations.knowable_1,
                knowable_2: dto.observations.knowable_2,
            },
            authority: Authority {
                name: dto.authority.name,
                points_to_self: dto.authority.points_to_self,
            },
        }
    }
}

impl From<&AppState> for SnapshotDto {
    fn from(state: &AppState) -> Self {
        Self {
            user: state.user.clone(),
            selves: state.selves.iter().map(SelfDto::from).collect(),
            notes: state.notes.clone(),
            next_id: state.next_id,
            theme: state.theme.into(),
        }
    }
}

/// Serialize the full session
pub fn encode_snapshot(state: &AppState) -> Result<String, StoreError> {
    let raw = serde_json::to_string(&SnapshotDto::from(state))?;
    Ok(raw)
}

/// Decode a stored snapshot, never failing
///
/// Unparseable text or a non-object document yields the default state.
/// Otherwise every field is decoded on its own and replaced by its default
/// when absent or of the wrong shape. Unknown fields are ignored.
pub fn decode_snapshot(raw: &str) -> AppState {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Malformed snapshot, starting from defaults");
            return AppState::default();
        }
    };

    let Value::Object(mut fields) = value else {
        warn!("Snapshot is not a JSON object, starting from defaults");
        return AppState::default();
    };

    let defaults = AppState::default();
    let mut state = AppState {
        user: take_field::<Option<String>>(&mut fields, "user").unwrap_or(defaults.user),
        selves: take_field::<Vec<SelfDto>>(&mut fields, "selves")
            .map(into_unique_selves)
            .unwrap_or(defaults.selves),
        notes: take_field::<String>(&mut fields, "notes").unwrap_or(defaults.notes),
        theme: take_field::<ThemeDto>(&mut fields, "theme")
            .map(Theme::from)
            .unwrap_or(defaults.theme),
        next_id: take_field::<u64>(&mut fields, "nextId")
            .filter(|&next_id| {
                let in_range = next_id <= MAX_SELF_ID;
                if !in_range {
                    warn!(next_id, "Ignoring out-of-range snapshot id counter");
                }
                in_range
            })
            .unwrap_or(defaults.next_id),
    };

    if state.repair_next_id() {
        warn!(next_id = state.next_id, "Snapshot id counter was behind stored ids, raised it");
    }

    debug!(selves = state.selves.len(), "Decoded snapshot");
    state
}

/// Decode one field, `None` when absent or unreadable
fn take_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.remove(key)?;
    match serde_json::from_value(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            warn!(field = key, error = %e, "Ignoring unreadable snapshot field");
            None
        }
    }
}

/// Convert stored selves, keeping the first of any duplicated id
///
/// Selves whose id lies above [`MAX_SELF_ID`] are dropped.
fn into_unique_selves(dtos: Vec<SelfDto>) -> Vec<SelfModel> {
    let mut seen = HashSet::new();
    dtos.into_iter()
        .filter(|dto| {
            if dto.id > MAX_SELF_ID {
                warn!(id = dto.id, "Dropping self with out-of-range id from snapshot");
                return false;
            }
            let fresh = seen.insert(dto.id);
            if !fresh {
                warn!(id = dto.id, "Dropping self with duplicate id from snapshot");
            }
            fresh
        })
        .map(SelfModel::from)
        .collect()
}
