/*!
 * Process Types
 * Common types for process management
 */

use crate::core::limits::DEFAULT_PROCESS_CATEGORY;
use crate::core::serde::{is_none, is_zero_u64};
use crate::core::Pid;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as SmartString;
use std::fmt;

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Placeholder while `initialize` runs; never observable afterwards
    Uninitialized,
    /// Blocked until the wait target is dead or gone
    Waiting,
    /// Eligible to run on its cadence's next execution pass
    Active,
    /// Skipping time slices until the pause counter drains
    Paused,
    /// Terminal; erased from the registry by the next sweep
    Dead,
}

impl ProcessState {
    #[inline(always)]
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }

    #[inline(always)]
    #[must_use]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Waiting => "waiting",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Dead => "dead",
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which dispatch pass a process belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Runs once per rendered frame (draw submission)
    PerFrame,
    /// Runs once per simulation tick (game logic)
    PerTick,
}

impl Cadence {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PerFrame => "per_frame",
            Self::PerTick => "per_tick",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Informational process metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessMeta {
    pub name: SmartString,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub category: SmartString,
}

impl ProcessMeta {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            category: DEFAULT_PROCESS_CATEGORY.into(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.into();
        self
    }
}

/// Run only every `period`-th slice the process would otherwise run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicSleep {
    pub period: u32,
    /// Eligible slices seen since the flag was set
    #[serde(skip)]
    pub(crate) phase: u32,
}

impl PeriodicSleep {
    #[inline]
    pub(crate) fn new(period: u32) -> Self {
        Self { period, phase: 0 }
    }

    /// Advance one eligible slice; true when this slice must be skipped
    #[inline]
    pub(crate) fn skip_slice(&mut self) -> bool {
        self.phase = (self.phase + 1) % self.period;
        self.phase != 0
    }
}

/// Independently settable behaviors
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessFlags {
    #[serde(skip_serializing_if = "is_none")]
    pub periodic_sleep: Option<PeriodicSleep>,
    /// Remaining allotted runs
    #[serde(skip_serializing_if = "is_none")]
    pub kill_after: Option<u32>,
}

/// Point-in-time view of a process, as returned by `get_process_info`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub pid: Pid,
    #[serde(flatten)]
    pub meta: ProcessMeta,
    pub cadence: Cadence,
    pub state: ProcessState,
    #[serde(skip_serializing_if = "is_none")]
    pub parent: Option<Pid>,
    #[serde(skip_serializing_if = "is_none")]
    pub wait_target: Option<Pid>,
    #[serde(skip_serializing_if = "is_none")]
    pub pause_remaining: Option<u32>,
    #[serde(default)]
    pub flags: ProcessFlags,
    /// Completed update calls
    #[serde(default, skip_serializing_if = "is_zero_u64")]
    pub runs: u64,
}
