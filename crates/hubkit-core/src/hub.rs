// ── Hub serial assignment ──
//
// Hubs are ordered by the trailing digit of their id and handed serial
// numbers counting down from a fixed start. One sentinel hub keeps its
// serial and does not consume a number.
//
// Ownership boundary: `reassign` takes the collection by value, clones it
// into `original` before touching anything, then sorts and rewrites the
// owned value into `updated`. The two halves never share storage.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::validate::{FieldKind, HUB_SCHEMA, validate_fields, validate_schema};

/// Top-level key holding the hub array.
pub const HUBS_KEY: &str = "Internet_hubs";

// ── Model ────────────────────────────────────────────────────────────

/// One addressable network hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: String,
    pub serial_number: String,
    /// Any other fields on the hub, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Hub {
    pub fn new(id: impl Into<String>, serial_number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            serial_number: serial_number.into(),
            extra: Map::new(),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey::of(&self.id)
    }
}

/// The `Internet_hubs` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HubCollection {
    #[serde(rename = "Internet_hubs")]
    pub hubs: Vec<Hub>,
    /// Other top-level keys of the payload.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HubCollection {
    pub fn new(hubs: Vec<Hub>) -> Self {
        Self {
            hubs,
            extra: Map::new(),
        }
    }
}

/// Ordering key derived from the last character of a hub id.
///
/// A trailing character that is not an ASCII digit (or an empty id) yields
/// `NotANumber`, which sorts before every digit. Variant order drives `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortKey {
    NotANumber,
    Digit(u8),
}

impl SortKey {
    pub fn of(id: &str) -> Self {
        id.chars()
            .next_back()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| u8::try_from(d).ok())
            .map_or(Self::NotANumber, Self::Digit)
    }
}

/// How serial numbers are produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialPlan {
    /// Fixed prefix of every serial.
    pub prefix: String,
    /// First (highest) suffix handed out.
    pub start: i64,
    /// Hub id that is never renumbered.
    pub sentinel: String,
    /// Reject ids without a trailing digit instead of sorting them first.
    pub strict: bool,
}

impl Default for SerialPlan {
    fn default() -> Self {
        Self {
            prefix: "C25CTW0000000000".into(),
            start: 1478,
            sentinel: "men1".into(),
            strict: false,
        }
    }
}

impl SerialPlan {
    /// Serial number for a given counter value.
    pub fn serial(&self, suffix: i64) -> String {
        format!("{}{suffix}", self.prefix)
    }

    pub fn is_sentinel(&self, hub: &Hub) -> bool {
        hub.id == self.sentinel
    }
}

/// Result of a reassignment: the input as it was, and the rewritten copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reassignment {
    pub original: HubCollection,
    pub updated: HubCollection,
}

impl Reassignment {
    /// Serialize both halves as compact JSON text.
    pub fn to_text(&self) -> Result<ReassignmentText, CoreError> {
        Ok(ReassignmentText {
            original: serde_json::to_string(&self.original)?,
            updated: serde_json::to_string(&self.updated)?,
        })
    }
}

/// Text form of a [`Reassignment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignmentText {
    pub original: String,
    pub updated: String,
}

// ── Entry points ─────────────────────────────────────────────────────

/// Sort hubs by [`SortKey`] and assign serials according to `plan`.
///
/// Typed input already satisfies the hub field contract. The only failure
/// is a non-digit id under a `strict` plan, reported before any change.
pub fn reassign(mut collection: HubCollection, plan: &SerialPlan) -> Result<Reassignment, CoreError> {
    if plan.strict {
        if let Some(hub) = collection
            .hubs
            .iter()
            .find(|hub| hub.sort_key() == SortKey::NotANumber)
        {
            return Err(CoreError::MalformedKey { id: hub.id.clone() });
        }
    }

    let original = collection.clone();

    // `sort_by_key` is stable: equal keys keep their input order.
    collection.hubs.sort_by_key(Hub::sort_key);
    let next = assign_serials(&mut collection.hubs, plan);

    let assigned = plan.start.saturating_sub(next);
    debug!(hubs = collection.hubs.len(), assigned, "serials assigned");
    if next < -1 {
        warn!(
            assigned,
            start = plan.start,
            "more hubs than serial numbers; suffixes went negative"
        );
    }

    Ok(Reassignment {
        original,
        updated: collection,
    })
}

/// Validate a parsed JSON payload, then [`reassign`] it.
///
/// Every hub is checked before the payload is converted, so a single
/// incomplete hub leaves nothing transformed.
pub fn reassign_value(payload: &Value, plan: &SerialPlan) -> Result<Reassignment, CoreError> {
    validate_fields(payload, &[HUBS_KEY])?;

    let hubs = &payload[HUBS_KEY];
    let Some(entries) = hubs.as_array() else {
        return Err(CoreError::TypeMismatch {
            field: HUBS_KEY.into(),
            expected: FieldKind::Array,
            found: FieldKind::of(hubs),
        });
    };
    for hub in entries {
        validate_schema(hub, HUB_SCHEMA)?;
    }

    let collection = HubCollection::deserialize(payload)?;
    reassign(collection, plan)
}

/// Text-in / text-out form of [`reassign_value`].
pub fn reassign_json(text: &str, plan: &SerialPlan) -> Result<ReassignmentText, CoreError> {
    let payload: Value = serde_json::from_str(text)?;
    reassign_value(&payload, plan)?.to_text()
}

/// Write serials in order, threading the counter through a fold.
/// Returns the counter value that would be handed out next.
fn assign_serials(hubs: &mut [Hub], plan: &SerialPlan) -> i64 {
    hubs.iter_mut().fold(plan.start, |counter, hub| {
        if plan.is_sentinel(hub) {
            counter
        } else {
            hub.serial_number = plan.serial(counter);
            counter.saturating_sub(1)
        }
    })
}
