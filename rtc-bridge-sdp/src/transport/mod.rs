
use log::trace;

use crate::normalizer::map_lines;

pub(crate) const UDP_DTLS_SCTP: &str = "UDP/DTLS/SCTP";
pub(crate) const DTLS_SCTP: &str = "DTLS/SCTP";
pub(crate) const WEBRTC_DATACHANNEL: &str = "webrtc-datachannel";
pub(crate) const LEGACY_SCTP_FORMAT: &str = "5000";

/// to_udp_dtls_sctp rewrites the legacy data-channel transport spelling of
/// every `m=application` line, `DTLS/SCTP 5000` or
/// `DTLS/SCTP webrtc-datachannel`, into `UDP/DTLS/SCTP webrtc-datachannel`.
///
/// Used on remote descriptions before they reach an engine that only
/// understands the modern spelling.
pub fn to_udp_dtls_sctp(sdp: &str) -> String {
    map_lines(sdp, |line| {
        let (head, proto, format, tail) = split_application_line(line)?;
        if proto != DTLS_SCTP || (format != LEGACY_SCTP_FORMAT && format != WEBRTC_DATACHANNEL) {
            return None;
        }
        trace!("rewriting {proto} {format} to {UDP_DTLS_SCTP} {WEBRTC_DATACHANNEL}");
        Some(join_application_line(
            head,
            UDP_DTLS_SCTP,
            WEBRTC_DATACHANNEL,
            tail,
        ))
    })
}

/// to_dtls_sctp rewrites `UDP/DTLS/SCTP` on every `m=application` line into
/// `DTLS/SCTP`, keeping the format token.
pub fn to_dtls_sctp(sdp: &str) -> String {
    map_lines(sdp, |line| {
        let (head, proto, format, tail) = split_application_line(line)?;
        if proto != UDP_DTLS_SCTP {
            return None;
        }
        Some(join_application_line(head, DTLS_SCTP, format, tail))
    })
}

/// Splits `m=application <port> <proto> <fmt>[ <rest>]` into the
/// `m=application <port>` head, the protocol, the first format and the rest.
fn split_application_line(line: &str) -> Option<(&str, &str, &str, Option<&str>)> {
    let rest = line.strip_prefix("m=application ")?;
    let port_end = rest.find(' ')?;
    let head = &line[.."m=application ".len() + port_end];
    let rest = &rest[port_end + 1..];

    let (proto, rest) = rest.split_once(' ')?;
    let (format, tail) = match rest.split_once(' ') {
        Some((format, tail)) => (format, Some(tail)),
        None => (rest, None),
    };
    Some((head, proto, format, tail))
}

fn join_application_line(head: &str, proto: &str, format: &str, tail: Option<&str>) -> String {
    let mut line = format!("{head} {proto} {format}");
    if let Some(tail) = tail {
        line.push(' ');
        line.push_str(tail);
    }
    line
}
