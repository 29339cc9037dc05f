
use std::fmt;

use crate::LINE_DELIMITER;

/// Port of a media line that has not been allocated a transport yet.
pub const PLACEHOLDER_PORT: &str = "9";
/// Port of a media line riding on the bundled transport.
pub const BUNDLED_PORT: &str = "0";

pub(crate) const SCTPMAP_PREFIX: &str = "a=sctpmap:";
pub(crate) const SCTP_PORT_LINE: &str = "a=sctp-port:5000";

const MEDIA_KINDS_WITH_PLACEHOLDER: [&str; 2] = ["application", "video"];

/// SdpDirection tells [`normalize`] whether the text was produced by the
/// local transport engine or received from the remote peer.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SdpDirection {
    #[default]
    Local,
    Remote,
}

const SDP_DIRECTION_LOCAL_STR: &str = "local";
const SDP_DIRECTION_REMOTE_STR: &str = "remote";

impl fmt::Display for SdpDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            SdpDirection::Local => SDP_DIRECTION_LOCAL_STR,
            SdpDirection::Remote => SDP_DIRECTION_REMOTE_STR,
        };
        write!(f, "{s}")
    }
}

/// normalize rewrites session-description text line by line.
///
/// For [`SdpDirection::Local`] text, `m=application` and `m=video` lines are
/// moved from port `0` to the placeholder port `9` when `bundle` is false,
/// and back from `9` to `0` when it is true. For [`SdpDirection::Remote`]
/// text, every `a=sctpmap:` line is replaced by `a=sctp-port:5000` and
/// `bundle` is ignored.
///
/// Only the exact port token is matched, so `m=video 9000 ...` is never
/// touched. Normalizing already normalized text returns it unchanged.
pub fn normalize(sdp: &str, direction: SdpDirection, bundle: bool) -> String {
    map_lines(sdp, |line| match direction {
        SdpDirection::Local if bundle => rewrite_port(line, PLACEHOLDER_PORT, BUNDLED_PORT),
        SdpDirection::Local => rewrite_port(line, BUNDLED_PORT, PLACEHOLDER_PORT),
        SdpDirection::Remote => {
            if line.starts_with(SCTPMAP_PREFIX) {
                Some(SCTP_PORT_LINE.to_owned())
            } else {
                None
            }
        }
    })
}

/// map_lines splits `sdp` on CRLF, lets `f` replace individual lines and
/// joins the result back. Lines for which `f` returns `None` are kept
/// byte-identical, including a trailing empty line.
pub(crate) fn map_lines<F>(sdp: &str, mut f: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(sdp.len() + 8);
    for (i, line) in sdp.split(LINE_DELIMITER).enumerate() {
        if i > 0 {
            out.push_str(LINE_DELIMITER);
        }
        match f(line) {
            Some(rewritten) => out.push_str(&rewritten),
            None => out.push_str(line),
        }
    }
    out
}

fn rewrite_port(line: &str, from: &str, to: &str) -> Option<String> {
    let rest = line.strip_prefix("m=")?;
    let (kind, rest) = rest.split_once(' ')?;
    if !MEDIA_KINDS_WITH_PLACEHOLDER.contains(&kind) {
        return None;
    }

    let (port, tail) = match rest.split_once(' ') {
        Some((port, tail)) => (port, Some(tail)),
        None => (rest, None),
    };
    if port != from {
        return None;
    }

    let mut rewritten = format!("m={kind} {to}");
    if let Some(tail) = tail {
        rewritten.push(' ');
        rewritten.push_str(tail);
    }
    Some(rewritten)
}
