//! # SDP text rewrites
//!
//! Transport engines disagree on a handful of spellings inside otherwise
//! identical session descriptions. This crate holds the pure, line-based
//! rewrites that translate between the canonical wire form exchanged with
//! the remote peer and the form a given engine accepts:
//!
//! - [`normalize`] rewrites placeholder ports on bundled `m=` lines and the
//!   legacy `a=sctpmap:` attribute.
//! - [`to_udp_dtls_sctp`] and [`to_dtls_sctp`] translate the data-channel
//!   transport protocol spelling.
//! - [`media_lines`] lists the `m=` lines of a description.
//!
//! Every rewrite works on CRLF-delimited lines, keeps untouched lines
//! byte-identical and is idempotent.
//!
//! ```
//! use rtc_bridge_sdp::{normalize, SdpDirection};
//!
//! let sdp = "v=0\r\nm=application 0 UDP/DTLS/SCTP webrtc-datachannel\r\n";
//! let local = normalize(sdp, SdpDirection::Local, false);
//! assert_eq!(local, "v=0\r\nm=application 9 UDP/DTLS/SCTP webrtc-datachannel\r\n");
//! assert_eq!(normalize(&local, SdpDirection::Local, false), local);
//! ```

#![warn(rust_2018_idioms)]
#![allow(dead_code)]

pub mod media;
pub mod normalizer;
pub mod transport;

pub use media::{MediaLine, media_lines};
pub use normalizer::{SdpDirection, normalize};
pub use transport::{to_dtls_sctp, to_udp_dtls_sctp};

/// Line delimiter of session-description text.
pub const LINE_DELIMITER: &str = "\r\n";
