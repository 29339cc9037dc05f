use std::fmt;

use crate::LINE_DELIMITER;

/// MediaLine is a parsed `m=` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLine {
    /// Zero-based position among the `m=` lines, the same index an ICE
    /// candidate carries as its `sdpMLineIndex`.
    pub index: usize,
    pub kind: String,
    pub port: String,
    pub proto: String,
    pub formats: Vec<String>,
}

impl fmt::Display for MediaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m={} {} {}", self.kind, self.port, self.proto)?;
        for format in &self.formats {
            write!(f, " {format}")?;
        }
        Ok(())
    }
}

/// media_lines returns the `m=` lines of `sdp` in order. Malformed media
/// lines are skipped but still consume an index.
pub fn media_lines(sdp: &str) -> Vec<MediaLine> {
    sdp.split(LINE_DELIMITER)
        .filter_map(|line| line.strip_prefix("m="))
        .enumerate()
        .filter_map(|(index, rest)| {
            let mut fields = rest.split(' ');
            let kind = fields.next().filter(|s| !s.is_empty())?;
            let port = fields.next().filter(|s| !s.is_empty())?;
            let proto = fields.next().filter(|s| !s.is_empty())?;
            Some(MediaLine {
                index,
                kind: kind.to_owned(),
                port: port.to_owned(),
                proto: proto.to_owned(),
                formats: fields.map(str::to_owned).collect(),
            })
        })
        .collect()
}
