use crate::game_state::State;
use crate::schedule::TOTAL_ROUNDS;
use crate::scoring::Scoring;
use crate::{roster_order, Game};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::io::{Read, Write};
use uuid::Uuid;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug)]
pub enum SnapshotError {
    Serialization(String),
    Encoding(String),
    UnsupportedVersion(u32),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            SnapshotError::Serialization(msg) => {
                write!(f, "Error: Snapshot serialization failed: {}", msg)
            }
            SnapshotError::Encoding(msg) => {
                write!(f, "Error: Snapshot encoding failed: {}", msg)
            }
            SnapshotError::UnsupportedVersion(version) => {
                write!(f, "Error: Unsupported snapshot version {}.", version)
            }
        }
    }
}

impl Error for SnapshotError {}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> Self {
        SnapshotError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::Encoding(err.to_string())
    }
}

impl From<base64::DecodeError> for SnapshotError {
    fn from(err: base64::DecodeError) -> Self {
        SnapshotError::Encoding(err.to_string())
    }
}

/// A player's line in one persisted round. Tricks are not stored separately:
/// a made bid scores 10 plus the tricks, a missed bid scores the tricks
/// alone, so they are recoverable from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRoundEntry {
    pub guess: u8,
    pub score: i32,
}

impl SnapshotRoundEntry {
    pub fn tricks(&self) -> u8 {
        let tricks = if self.score >= 10 { self.score - 10 } else { self.score };
        tricks.clamp(0, 7) as u8
    }
}

/// The durable projection of a game. Every field defaults when absent so
/// that a truncated or older snapshot still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Snapshot {
    #[serde(default)]
    pub game_started: bool,
    #[serde(default)]
    pub game_start_time: Option<u64>,
    #[serde(default)]
    pub round_num: usize,
    #[serde(default)]
    pub player_order: Vec<String>,
    #[serde(default)]
    pub scores: BTreeMap<String, i32>,
    #[serde(default)]
    pub scores_by_round: Vec<BTreeMap<String, SnapshotRoundEntry>>,
    #[serde(default)]
    pub guesses: Option<BTreeMap<String, u8>>,
    #[serde(default)]
    pub awaiting_results: bool,
    #[serde(default)]
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SnapshotEncoding {
    RawJson,
    CompressedBase64,
}

#[derive(Serialize, Deserialize)]
struct Envelope {
    version: u32,
    encoding: SnapshotEncoding,
    payload: String,
}

fn compress(text: &str) -> Result<String, SnapshotError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes())?;
    Ok(BASE64.encode(encoder.finish()?))
}

fn decompress(payload: &str) -> Result<String, SnapshotError> {
    let bytes = BASE64.decode(payload.trim())?;
    let mut text = String::new();
    ZlibDecoder::new(bytes.as_slice()).read_to_string(&mut text)?;
    Ok(text)
}

impl Snapshot {
    /// Serialize into the versioned envelope with the chosen payload encoding.
    pub fn encode(&self, encoding: SnapshotEncoding) -> Result<String, SnapshotError> {
        let json = serde_json::to_string(self)?;
        let payload = match encoding {
            SnapshotEncoding::RawJson => json,
            SnapshotEncoding::CompressedBase64 => compress(&json)?,
        };
        Ok(serde_json::to_string(&Envelope {
            version: SNAPSHOT_VERSION,
            encoding,
            payload,
        })?)
    }

    /// Parse a persisted snapshot. Accepts the versioned envelope, plus the
    /// two legacy forms written before the envelope existed: bare snapshot
    /// JSON, and a zlib-compressed base64 string of that JSON.
    pub fn decode(text: &str) -> Result<Snapshot, SnapshotError> {
        if let Ok(envelope) = serde_json::from_str::<Envelope>(text) {
            if envelope.version > SNAPSHOT_VERSION {
                return Err(SnapshotError::UnsupportedVersion(envelope.version));
            }
            let json = match envelope.encoding {
                SnapshotEncoding::RawJson => envelope.payload,
                SnapshotEncoding::CompressedBase64 => decompress(&envelope.payload)?,
            };
            return Ok(serde_json::from_str(&json)?);
        }
        if let Ok(snapshot) = serde_json::from_str::<Snapshot>(text) {
            return Ok(snapshot);
        }
        Ok(serde_json::from_str(&decompress(text)?)?)
    }
}

impl Game {
    /// The durable projection of this game's state.
    pub fn snapshot(&self) -> Snapshot {
        let mut scores = BTreeMap::new();
        for (seat, name) in self.player_order.iter().enumerate() {
            scores.insert(name.clone(), self.scoring.cumulative[seat]);
        }

        let scores_by_round = self
            .scoring
            .rounds
            .iter()
            .map(|result| {
                self.player_order
                    .iter()
                    .enumerate()
                    .map(|(seat, name)| {
                        (
                            name.clone(),
                            SnapshotRoundEntry {
                                guess: result.bids[seat],
                                score: result.scores[seat],
                            },
                        )
                    })
                    .collect()
            })
            .collect();

        let guesses = match self.state {
            State::Results(bids) => Some(
                self.player_order
                    .iter()
                    .enumerate()
                    .map(|(seat, name)| (name.clone(), bids[seat]))
                    .collect(),
            ),
            _ => None,
        };

        Snapshot {
            game_started: self.state != State::NotStarted,
            game_start_time: self.started_at,
            round_num: self.round(),
            player_order: self.player_order.to_vec(),
            scores,
            scores_by_round,
            guesses,
            awaiting_results: matches!(self.state, State::Results(_)),
            game_over: self.state == State::Completed,
        }
    }

    /// Rebuild a game from a snapshot. Missing fields fall back to defaults;
    /// cumulative scores and the round index are recomputed from the recorded
    /// rounds rather than trusted from the snapshot, so the restored game
    /// satisfies the same invariants as a live one.
    pub fn restore(id: Uuid, snapshot: &Snapshot) -> Game {
        let mut player_order = roster_order();
        for (seat, name) in snapshot.player_order.iter().take(4).enumerate() {
            player_order[seat] = name.clone();
        }

        let mut scoring = Scoring::new();
        for round in snapshot.scores_by_round.iter().take(TOTAL_ROUNDS) {
            let mut bids = [0u8; 4];
            let mut tricks = [0u8; 4];
            for (seat, name) in player_order.iter().enumerate() {
                if let Some(entry) = round.get(name) {
                    bids[seat] = entry.guess;
                    tricks[seat] = entry.tricks();
                }
            }
            scoring.record_round(bids, tricks);
        }

        let state = if !snapshot.game_started {
            State::NotStarted
        } else if snapshot.game_over || scoring.rounds_completed() == TOTAL_ROUNDS {
            State::Completed
        } else if snapshot.awaiting_results {
            let mut bids = [0u8; 4];
            if let Some(guesses) = &snapshot.guesses {
                for (seat, name) in player_order.iter().enumerate() {
                    bids[seat] = guesses.get(name).copied().unwrap_or(0);
                }
            }
            State::Results(bids)
        } else {
            State::Bidding
        };

        Game {
            id,
            state,
            player_order,
            started_at: snapshot.game_start_time,
            scoring,
        }
    }
}
