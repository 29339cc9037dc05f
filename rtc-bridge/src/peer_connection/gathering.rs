//! Gathering completion policy.
//!
//! The engine's own gathering state is not what the controller waits for.
//! A connection reports "gathering complete" once per negotiation round,
//! when its [`RTCGatheringPolicy`] is satisfied:
//!
//! - [`RTCGatheringPolicy::Open`]: on the first relay candidate, on
//!   end-of-candidates or when the engine reaches `complete`.
//! - [`RTCGatheringPolicy::RelayRequired`]: only when every media line that
//!   produced a candidate has produced a relay candidate. End-of-candidates
//!   and the engine's `complete` still force completion so a call never
//!   waits forever on a relay that will not come.

use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::peer_connection::transport::RTCIceCandidate;

#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTCGatheringPolicy {
    #[default]
    Open,
    RelayRequired,
}

const GATHERING_POLICY_OPEN_STR: &str = "open";
const GATHERING_POLICY_RELAY_REQUIRED_STR: &str = "relay-required";

impl fmt::Display for RTCGatheringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            RTCGatheringPolicy::Open => GATHERING_POLICY_OPEN_STR,
            RTCGatheringPolicy::RelayRequired => GATHERING_POLICY_RELAY_REQUIRED_STR,
        };
        write!(f, "{s}")
    }
}

/// GatheringTracker follows one negotiation round. Its methods return
/// `true` when the caller should report completion; the caller confirms
/// with [`GatheringTracker::complete`] once it actually did, so a trigger
/// that could not be reported does not use up the round.
#[derive(Default, Debug, Clone)]
pub(crate) struct GatheringTracker {
    completed: bool,
    /// media line index -> relay candidate seen
    lines: BTreeMap<u16, bool>,
}

impl GatheringTracker {
    /// Starts a new round.
    pub(crate) fn reset(&mut self) {
        self.completed = false;
        self.lines.clear();
    }

    pub(crate) fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn complete(&mut self) {
        self.completed = true;
    }

    /// on_candidate handles a candidate event; `None` is end-of-candidates.
    pub(crate) fn on_candidate(
        &mut self,
        policy: RTCGatheringPolicy,
        candidate: Option<&RTCIceCandidate>,
    ) -> bool {
        let Some(candidate) = candidate else {
            return !self.completed;
        };

        let relay = candidate.is_relay();
        if policy == RTCGatheringPolicy::RelayRequired {
            if let Some(index) = candidate.sdp_mline_index {
                let has_relay = self.lines.entry(index).or_insert(false);
                if relay {
                    *has_relay = true;
                }
            }
        }

        if !relay || self.completed {
            return false;
        }

        match policy {
            RTCGatheringPolicy::Open => true,
            RTCGatheringPolicy::RelayRequired => {
                if let Some((index, _)) = self.lines.iter().find(|(_, has_relay)| !**has_relay) {
                    debug!("media line {index} still missing a relay candidate");
                    false
                } else {
                    true
                }
            }
        }
    }

    /// on_engine_complete handles the engine reaching `complete`.
    pub(crate) fn on_engine_complete(&mut self) -> bool {
        !self.completed
    }

    /// Media lines seen so far and whether each has a relay candidate.
    pub(crate) fn lines(&self) -> impl Iterator<Item = (u16, bool)> + '_ {
        self.lines.iter().map(|(index, has_relay)| (*index, *has_relay))
    }
}
