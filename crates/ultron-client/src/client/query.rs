use serde::{Deserialize, Serialize};

/// Requests understood by the GameQuery mod
///
/// Each query is written as a single JSON line with a `type` tag, e.g.
/// `{"type":"send_chat","message":"hi"}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Query {
    Position,
    SendChat {
        message: String,
    },
    Rotate {
        #[serde(skip_serializing_if = "Option::is_none")]
        yaw: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pitch: Option<f64>,
    },
    PointToXyz {
        x: f64,
        y: f64,
        z: f64,
    },
    UseBed {
        #[serde(skip_serializing_if = "Option::is_none")]
        x: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        y: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        z: Option<f64>,
    },
    DropItem {
        #[serde(skip_serializing_if = "Option::is_none")]
        slot: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    GetBlock {
        x: f64,
        y: f64,
        z: f64,
    },
    Blocks {
        range: u32,
    },
    Players,
    RightClick,
    LeftClick,
    Attack,
    OpenContainer,
}

/// Player position and status snapshot
///
/// The mod may omit fields depending on version; missing numeric fields
/// decode as zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlayerStatus {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw: f64,
    pub pitch: f64,
    pub health: f64,
    #[serde(rename = "maxHealth")]
    pub max_health: f64,
    pub food: u32,
    pub level: u32,
    pub experience: u32,
}

impl PlayerStatus {
    pub fn coords(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

/// Success/failure payload carried in a `result` field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ActionResult {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
}

/// An entry in the `players` response. Older mod versions return bare
/// name strings without coordinates.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlayerEntry {
    Detailed { name: String, x: f64, y: f64, z: f64 },
    NameOnly(String),
}

impl PlayerEntry {
    pub fn name(&self) -> &str {
        match self {
            PlayerEntry::Detailed { name, .. } => name,
            PlayerEntry::NameOnly(name) => name,
        }
    }

    pub fn coords(&self) -> Option<(f64, f64, f64)> {
        match self {
            PlayerEntry::Detailed { x, y, z, .. } => Some((*x, *y, *z)),
            PlayerEntry::NameOnly(_) => None,
        }
    }
}

/// A block reported by the `blocks` scan
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlockInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// The doubly-nested payload of a `blocks` response:
/// `{"blocks": {"blocks": [...]}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlockListPayload {
    pub blocks: Vec<BlockInfo>,
}

/// Response envelope. The mod mixes several shapes: a top-level `error`,
/// a `result` object for actions, and payload fields named after the
/// query. Fields not relevant to the query are absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Response {
    pub error: Option<String>,
    pub result: Option<ActionResult>,
    pub position: Option<PlayerStatus>,
    pub players: Option<Vec<PlayerEntry>>,
    pub blocks: Option<BlockListPayload>,
}
