//! RNG stream manager.
//!
//! Combat randomness is split into a fixed set of named streams, each seeded from the
//! master seed, the floor, and a per-stream salt. Consuming one stream never perturbs
//! another, and every stream can be restored from `(seed, counter)` alone.
//!
//! Stream names are a closed enum, so drawing from an unknown stream cannot be
//! expressed; unknown names can only appear when restoring a serialized counter map,
//! which is rejected with [`RngError::UnknownStream`].
mod seed;
mod shuffle;
mod stream;

use std::collections::BTreeMap;

use strum::{EnumCount, IntoEnumIterator};

pub use seed::Seed;
pub use stream::RngStream;

use crate::error::{CombatError, ErrorSeverity};

/// Named RNG streams.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StreamName {
    /// Draw-pile shuffles (one draw per shuffle).
    Shuffle,
    /// Random targets, random cards and random costs chosen by card effects.
    CardRandom,
    /// Enemy move selection.
    Ai,
    /// Enemy HP rolls at combat start.
    MonsterHp,
    /// Relic and other miscellaneous rolls.
    Misc,
    /// Potion effects and potion rolls.
    Potion,
}

impl StreamName {
    /// Every stream, in storage order.
    pub const ALL: [StreamName; StreamName::COUNT] = [
        Self::Shuffle,
        Self::CardRandom,
        Self::Ai,
        Self::MonsterHp,
        Self::Misc,
        Self::Potion,
    ];

    /// Per-stream salt added to `master_seed + floor`.
    pub const fn salt(self) -> u64 {
        match self {
            Self::Shuffle => 0x0000_0000_0000_0000,
            Self::CardRandom => 0x9E37_79B9_7F4A_7C15,
            Self::Ai => 0x3C6E_F372_FE94_F82A,
            Self::MonsterHp => 0xDAA6_6D2C_7DDF_743F,
            Self::Misc => 0x78DD_E6E5_FD29_F054,
            Self::Potion => 0x1715_609F_7C74_6C69,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Errors raised when parsing seeds or restoring serialized counters.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RngError {
    #[error("unknown rng stream `{0}`")]
    UnknownStream(String),

    #[error("invalid seed `{0}`")]
    InvalidSeed(String),

    #[error("stream {stream} counter {counter} exceeds the restorable limit {limit}")]
    CounterOutOfRange {
        stream: StreamName,
        counter: u64,
        limit: u64,
    },
}

impl CombatError for RngError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidSeed(_) => ErrorSeverity::Validation,
            Self::UnknownStream(_) | Self::CounterOutOfRange { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStream(_) => "RNG_UNKNOWN_STREAM",
            Self::InvalidSeed(_) => "RNG_INVALID_SEED",
            Self::CounterOutOfRange { .. } => "RNG_COUNTER_OUT_OF_RANGE",
        }
    }
}

/// The full set of combat RNG streams.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "RngSnapshot", try_from = "RngSnapshot")
)]
pub struct RngStreams {
    master: Seed,
    floor: u32,
    streams: [RngStream; StreamName::COUNT],
}

impl RngStreams {
    /// Largest counter a stream can be restored to.
    pub const MAX_RESTORE_COUNTER: u64 = 1 << 24;

    /// Seeds every stream from `master + floor + salt(stream)`.
    pub fn new(master: Seed, floor: u32) -> Self {
        let streams = core::array::from_fn(|i| {
            RngStream::new(Self::stream_seed(master, floor, StreamName::ALL[i]))
        });
        Self {
            master,
            floor,
            streams,
        }
    }

    fn stream_seed(master: Seed, floor: u32, name: StreamName) -> u64 {
        master
            .value()
            .wrapping_add(u64::from(floor))
            .wrapping_add(name.salt())
    }

    pub fn master_seed(&self) -> Seed {
        self.master
    }

    pub fn floor(&self) -> u32 {
        self.floor
    }

    /// Uniform integer in `[0, bound)` from `name`.
    pub fn draw(&mut self, name: StreamName, bound: u32) -> u32 {
        self.streams[name.index()].below(u64::from(bound)) as u32
    }

    /// Uniform integer in `[low, high]` from `name`.
    pub fn range(&mut self, name: StreamName, low: i32, high: i32) -> i32 {
        self.streams[name.index()].range_inclusive(low, high)
    }

    /// Uniform float in `[0, 1)` from `name`.
    pub fn unit(&mut self, name: StreamName) -> f32 {
        self.streams[name.index()].unit_f32()
    }

    /// Shuffles `items` with a single draw from the shuffle stream.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        let seed = self.streams[StreamName::Shuffle.index()].next_u64();
        shuffle::permute(items, seed);
    }

    pub fn counter(&self, name: StreamName) -> u64 {
        self.streams[name.index()].counter()
    }

    /// Repositions one stream at `counter`, leaving every other stream untouched.
    ///
    /// Restoring replays the stream step by step, so counters above
    /// [`Self::MAX_RESTORE_COUNTER`] are rejected.
    pub fn restore(&mut self, name: StreamName, counter: u64) -> Result<(), RngError> {
        if counter > Self::MAX_RESTORE_COUNTER {
            return Err(RngError::CounterOutOfRange {
                stream: name,
                counter,
                limit: Self::MAX_RESTORE_COUNTER,
            });
        }
        let seed = Self::stream_seed(self.master, self.floor, name);
        self.streams[name.index()] = RngStream::restored(seed, counter);
        Ok(())
    }

    /// Counters of every stream, keyed by stream.
    pub fn counters(&self) -> BTreeMap<StreamName, u64> {
        StreamName::iter().map(|n| (n, self.counter(n))).collect()
    }

    /// Counters as a flat `name -> counter` map.
    pub fn counter_map(&self) -> BTreeMap<String, u64> {
        StreamName::iter()
            .map(|n| (n.to_string(), self.counter(n)))
            .collect()
    }

    /// Rebuilds streams from a flat counter map. Streams missing from the map start at 0.
    pub fn from_counter_map(
        master: Seed,
        floor: u32,
        counters: &BTreeMap<String, u64>,
    ) -> Result<Self, RngError> {
        let mut streams = Self::new(master, floor);
        for (name, &counter) in counters {
            let stream: StreamName = name
                .parse()
                .map_err(|_| RngError::UnknownStream(name.clone()))?;
            streams.restore(stream, counter)?;
        }
        Ok(streams)
    }
}

/// Serialized form of [`RngStreams`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngSnapshot {
    pub master_seed: u64,
    pub floor: u32,
    pub counters: BTreeMap<String, u64>,
}

impl From<RngStreams> for RngSnapshot {
    fn from(streams: RngStreams) -> Self {
        Self {
            master_seed: streams.master.value(),
            floor: streams.floor,
            counters: streams.counter_map(),
        }
    }
}

impl TryFrom<RngSnapshot> for RngStreams {
    type Error = RngError;

    fn try_from(snapshot: RngSnapshot) -> Result<Self, Self::Error> {
        RngStreams::from_counter_map(
            Seed(snapshot.master_seed),
            snapshot.floor,
            &snapshot.counters,
        )
    }
}
