//! Change classification of a matched pair

use crate::SyncRecord;
use std::cmp::Ordering;
use std::fmt;

/// Which side is newer when there is no history to compare against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    LocalNewer,
    RemoteNewer,
    Same,
}

/// How a matched pair changed since the last sync
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeState {
    Unchanged,
    LocalChangedOnly,
    RemoteChangedOnly,
    BothChanged,
    /// No usable record. Only the current timestamps are compared, so two
    /// independent creations look the same as one stale side.
    NoSnapshot(Freshness),
}

impl fmt::Display for ChangeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unchanged => "unchanged",
            Self::LocalChangedOnly => "local-changed",
            Self::RemoteChangedOnly => "remote-changed",
            Self::BothChanged => "both-changed",
            Self::NoSnapshot(Freshness::LocalNewer) => "no-snapshot(local-newer)",
            Self::NoSnapshot(Freshness::RemoteNewer) => "no-snapshot(remote-newer)",
            Self::NoSnapshot(Freshness::Same) => "no-snapshot(same)",
        };
        f.write_str(label)
    }
}

/// What to do with a matched pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Skip,
    /// Replace the note with the local file
    Push,
    /// Replace the local file with the note
    Pull,
    /// Write a conflict artifact and leave both sides alone
    Conflict,
}

/// Classify a pair from its current modification times and its record.
///
/// Comparisons are exact on millisecond values. A record with a zero
/// component counts as missing.
pub fn classify(local_mod: i64, remote_mod: i64, record: Option<&SyncRecord>) -> ChangeState {
    let Some(record) = record.filter(|r| r.is_complete()) else {
        let freshness = match local_mod.cmp(&remote_mod) {
            Ordering::Greater => Freshness::LocalNewer,
            Ordering::Less => Freshness::RemoteNewer,
            Ordering::Equal => Freshness::Same,
        };
        return ChangeState::NoSnapshot(freshness);
    };

    let local_changed = local_mod != record.file_mod_time;
    let remote_changed = remote_mod != record.note_mod_time;
    match (local_changed, remote_changed) {
        (false, false) => ChangeState::Unchanged,
        (true, false) => ChangeState::LocalChangedOnly,
        (false, true) => ChangeState::RemoteChangedOnly,
        (true, true) => ChangeState::BothChanged,
    }
}

/// Action of the upload phase.
pub fn upload_action(state: ChangeState, merge_authorized: bool) -> Action {
    match state {
        ChangeState::LocalChangedOnly | ChangeState::NoSnapshot(Freshness::LocalNewer) => {
            Action::Push
        }
        ChangeState::BothChanged if merge_authorized => Action::Push,
        ChangeState::BothChanged => Action::Conflict,
        _ => Action::Skip,
    }
}

/// Action of the download phase for a pair the upload phase did not handle.
///
/// A conflict only reaches this phase when uploading is disabled. Merge
/// authorization means local wins, so a download-only pass skips the pair.
pub fn download_action(state: ChangeState, merge_authorized: bool) -> Action {
    match state {
        ChangeState::RemoteChangedOnly | ChangeState::NoSnapshot(Freshness::RemoteNewer) => {
            Action::Pull
        }
        ChangeState::BothChanged if merge_authorized => Action::Skip,
        ChangeState::BothChanged => Action::Conflict,
        _ => Action::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const RECORD: SyncRecord = SyncRecord {
        file_mod_time: 100,
        note_mod_time: 200,
    };

    #[rstest]
    #[case(100, 200, ChangeState::Unchanged)]
    #[case(150, 200, ChangeState::LocalChangedOnly)]
    #[case(100, 250, ChangeState::RemoteChangedOnly)]
    #[case(150, 250, ChangeState::BothChanged)]
    #[case(99, 200, ChangeState::LocalChangedOnly)]
    #[case(101, 200, ChangeState::LocalChangedOnly)]
    fn classify_against_record(#[case] local: i64, #[case] remote: i64, #[case] expected: ChangeState) {
        assert_eq!(classify(local, remote, Some(&RECORD)), expected);
    }

    #[rstest]
    #[case(300, 200, Freshness::LocalNewer)]
    #[case(200, 300, Freshness::RemoteNewer)]
    #[case(200, 200, Freshness::Same)]
    fn classify_without_record(#[case] local: i64, #[case] remote: i64, #[case] expected: Freshness) {
        assert_eq!(classify(local, remote, None), ChangeState::NoSnapshot(expected));
    }

    #[test]
    fn zero_record_is_treated_as_missing() {
        let record = SyncRecord::new(0, 200);
        assert_eq!(
            classify(100, 200, Some(&record)),
            ChangeState::NoSnapshot(Freshness::RemoteNewer)
        );
    }

    #[rstest]
    #[case(ChangeState::Unchanged, false, Action::Skip)]
    #[case(ChangeState::LocalChangedOnly, false, Action::Push)]
    #[case(ChangeState::RemoteChangedOnly, false, Action::Skip)]
    #[case(ChangeState::BothChanged, false, Action::Conflict)]
    #[case(ChangeState::BothChanged, true, Action::Push)]
    #[case(ChangeState::NoSnapshot(Freshness::LocalNewer), false, Action::Push)]
    #[case(ChangeState::NoSnapshot(Freshness::RemoteNewer), false, Action::Skip)]
    #[case(ChangeState::NoSnapshot(Freshness::Same), false, Action::Skip)]
    fn upload_decisions(#[case] state: ChangeState, #[case] merged: bool, #[case] expected: Action) {
        assert_eq!(upload_action(state, merged), expected);
    }

    #[rstest]
    #[case(ChangeState::Unchanged, false, Action::Skip)]
    #[case(ChangeState::LocalChangedOnly, false, Action::Skip)]
    #[case(ChangeState::RemoteChangedOnly, false, Action::Pull)]
    #[case(ChangeState::BothChanged, false, Action::Conflict)]
    #[case(ChangeState::BothChanged, true, Action::Skip)]
    #[case(ChangeState::NoSnapshot(Freshness::LocalNewer), false, Action::Skip)]
    #[case(ChangeState::NoSnapshot(Freshness::RemoteNewer), false, Action::Pull)]
    #[case(ChangeState::NoSnapshot(Freshness::Same), false, Action::Skip)]
    fn download_decisions(#[case] state: ChangeState, #[case] merged: bool, #[case] expected: Action) {
        assert_eq!(download_action(state, merged), expected);
    }
}
