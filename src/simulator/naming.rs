//! Artifact naming.

use chrono::{DateTime, Local};

/// Names batch artifacts `<prefix>_<YYYYMMDD_HHMMSS>_<NNNN>.json`.
///
/// The timestamp records when the batch was named; the zero-padded monotonic
/// sequence keeps names unique within a run even when batches complete faster
/// than once per second, which a bare timestamp would silently overwrite.
pub struct ArtifactNamer {
    prefix: String,
    seq: u32,
}

impl ArtifactNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            seq: 0,
        }
    }

    pub fn next(&mut self, at: DateTime<Local>) -> String {
        let name = format!(
            "{}_{}_{:04}.json",
            self.prefix,
            at.format("%Y%m%d_%H%M%S"),
            self.seq
        );
        self.seq += 1;
        name
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_names_embed_timestamp_and_sequence() {
        let mut namer = ArtifactNamer::new("raw_matches");
        let at = Local.with_ymd_and_hms(2026, 8, 6, 9, 30, 15).unwrap();

        assert_eq!(namer.next(at), "raw_matches_20260806_093015_0000.json");
        assert_eq!(namer.next(at), "raw_matches_20260806_093015_0001.json");
    }

    #[test]
    fn test_names_stay_unique_within_one_second() {
        let mut namer = ArtifactNamer::new("raw_matches");
        let at = Local.with_ymd_and_hms(2026, 8, 6, 9, 30, 15).unwrap();

        let names: Vec<_> = (0..10).map(|_| namer.next(at)).collect();
        let mut deduped = names.clone();
        deduped.dedup();
        assert_eq!(names, deduped);
        assert!(names.windows(2).all(|w| w[0] < w[1]));
    }
}
