use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Live per-universe receive statistics. Created zeroed when a filter is
/// added, bumped on every accepted DMX packet, removed when filters are
/// cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniverseInfo {
    universe: u16,
    packets: u64,
    last_update: Option<OffsetDateTime>,
}

impl UniverseInfo {
    pub(crate) fn new(universe: u16) -> Self {
        Self {
            universe,
            packets: 0,
            last_update: None,
        }
    }

    pub(crate) fn update(&mut self) {
        self.packets += 1;
        self.last_update = Some(OffsetDateTime::now_utc());
    }

    pub fn universe(&self) -> u16 {
        self.universe
    }

    pub fn packets(&self) -> u64 {
        self.packets
    }

    pub fn last_update(&self) -> Option<OffsetDateTime> {
        self.last_update
    }

    /// Snapshot with the timestamp rendered as RFC3339, for export.
    pub fn snapshot(&self) -> UniverseInfoSnapshot {
        UniverseInfoSnapshot {
            universe: self.universe,
            packets: self.packets,
            last_update: self
                .last_update
                .and_then(|ts| ts.format(&Rfc3339).ok()),
        }
    }
}

/// Serializable view of [`UniverseInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseInfoSnapshot {
    pub universe: u16,
    pub packets: u64,
    /// RFC3339 timestamp of the last accepted packet, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::UniverseInfo;

    #[test]
    fn update_bumps_count_and_timestamp() {
        let mut info = UniverseInfo::new(7);
        assert_eq!(info.packets(), 0);
        assert!(info.last_update().is_none());

        info.update();
        info.update();
        assert_eq!(info.universe(), 7);
        assert_eq!(info.packets(), 2);
        assert!(info.last_update().is_some());
    }

    #[test]
    fn snapshot_omits_missing_timestamp() {
        let info = UniverseInfo::new(1);
        let json = serde_json::to_value(info.snapshot()).expect("snapshot json");
        assert_eq!(json["universe"], 1);
        assert_eq!(json["packets"], 0);
        assert!(json.get("last_update").is_none());
    }

    #[test]
    fn snapshot_formats_rfc3339() {
        let mut info = UniverseInfo::new(1);
        info.update();
        let snapshot = info.snapshot();
        let ts = snapshot.last_update.expect("timestamp");
        assert!(ts.contains('T'));
    }
}
