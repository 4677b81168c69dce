//! A collection of utility functions
use std::path::Path as StdPath;
use std::time::SystemTime;

use chrono::{DateTime, Utc};

use crate::errors::Error;

/// Converts a `SystemTime` into a typed UTC timestamp.
pub fn to_datetime(time: SystemTime) -> DateTime<Utc> {
    time.into()
}

/// Formats a timestamp as an epoch-millisecond string, the wire format the
/// original cloud protocol uses for `creationdate`/`modifieddate`.
pub fn epoch_millis_string(time: &DateTime<Utc>) -> String {
    time.timestamp_millis().to_string()
}

/// Parses an epoch-millisecond string, as sent in `If-modified-since`-style
/// headers, back into a typed timestamp.
pub fn parse_epoch_millis(s: &str) -> Result<DateTime<Utc>, Error> {
    let millis: i64 = s.parse().map_err(|e: std::num::ParseIntError| Error::Parse {
        what: format!("timestamp {s:?}"),
        how: e.to_string(),
    })?;
    DateTime::from_timestamp_millis(millis).ok_or(Error::Parse {
        what: format!("timestamp {s:?}"),
        how: "out of range".to_string(),
    })
}

/// Renders a host path with forward-slash separators, the form client URIs
/// use regardless of host OS convention.
pub fn slash_uri(path: &StdPath) -> String {
    let uri = path.to_string_lossy().replace('\\', "/");
    if uri.len() > 1 {
        uri.trim_end_matches('/').to_string()
    } else {
        uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_millis_round_trip() {
        let t = DateTime::from_timestamp_millis(1_517_077_809_453).unwrap();
        let s = epoch_millis_string(&t);
        assert_eq!(s, "1517077809453");
        assert_eq!(parse_epoch_millis(&s).unwrap(), t);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_epoch_millis("none").is_err());
        assert!(parse_epoch_millis("").is_err());
    }

    #[test]
    fn slash_uri_normalizes_separators() {
        assert_eq!(slash_uri(StdPath::new("/srv/data/x")), "/srv/data/x");
        assert_eq!(slash_uri(StdPath::new("/")), "/");
    }
}
