use crate::track::WorkingTrack;

/// Three-way user choice offered each time mute is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteDecision {
    /// Drop the audio permanently, keeping no backup.
    Commit,
    /// Drop the audio but keep a restorable copy; restores when already muted.
    KeepBackup,
    /// Leave the working track untouched.
    Cancel,
}

/// Observable mute state of the working track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MuteState {
    Live,
    MutedCommitted,
    MutedWithBackup,
}

/// One-slot cache of the audio-bearing working track.
///
/// First `KeepBackup` caches the original and mutes in the same action;
/// applying it again restores from the cache. The backup survives a restore,
/// so toggling back to muted reuses the cached copy.
#[derive(Debug, Default)]
pub struct MuteCache {
    backup: Option<WorkingTrack>,
}

impl MuteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one mute decision to the working track.
    ///
    /// Returns the resulting state, or `None` when nothing changed
    /// (`Cancel`, or a decision that does not apply to the current state).
    pub fn apply(&mut self, decision: MuteDecision, working: &mut WorkingTrack) -> Option<MuteState> {
        match decision {
            MuteDecision::Cancel => None,
            MuteDecision::Commit => {
                if !working.audio_enabled && self.backup.is_none() {
                    return None;
                }
                working.audio_enabled = false;
                self.backup = None;
                Some(MuteState::MutedCommitted)
            }
            MuteDecision::KeepBackup => match self.state(working) {
                MuteState::MutedWithBackup => {
                    *working = self.backup.clone()?;
                    Some(MuteState::Live)
                }
                MuteState::Live => {
                    if self.backup.is_none() {
                        self.backup = Some(working.clone());
                    }
                    working.audio_enabled = false;
                    Some(MuteState::MutedWithBackup)
                }
                // A committed mute left nothing to back up or restore.
                MuteState::MutedCommitted => None,
            },
        }
    }

    /// Derives the state from the working track and the cache slot.
    pub fn state(&self, working: &WorkingTrack) -> MuteState {
        if working.audio_enabled {
            MuteState::Live
        } else if self.backup.is_some() {
            MuteState::MutedWithBackup
        } else {
            MuteState::MutedCommitted
        }
    }

    pub fn has_backup(&self) -> bool {
        self.backup.is_some()
    }

    /// Empties the cache slot; called whenever a new track loads.
    pub fn clear(&mut self) {
        self.backup = None;
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{MuteCache, MuteDecision, MuteState};
    use crate::backend::ProbedTrack;
    use crate::track::WorkingTrack;

    fn live_track() -> WorkingTrack {
        WorkingTrack::from_probe(ProbedTrack {
            path: PathBuf::from("demo.mp4"),
            duration_seconds: 60.0,
            has_audio: true,
        })
    }

    #[test]
    fn commit_mutes_permanently_without_backup() {
        let mut cache = MuteCache::new();
        let mut track = live_track();

        let state = cache.apply(MuteDecision::Commit, &mut track);

        assert_eq!(state, Some(MuteState::MutedCommitted));
        assert!(!track.include_audio());
        assert!(!cache.has_backup());
    }

    #[test]
    fn keep_backup_mutes_and_caches_on_first_call() {
        let mut cache = MuteCache::new();
        let mut track = live_track();

        let state = cache.apply(MuteDecision::KeepBackup, &mut track);

        assert_eq!(state, Some(MuteState::MutedWithBackup));
        assert!(!track.include_audio());
        assert!(cache.has_backup());
    }

    #[test]
    fn second_keep_backup_restores_original_audio() {
        let mut cache = MuteCache::new();
        let mut track = live_track();
        let original = track.clone();

        cache.apply(MuteDecision::KeepBackup, &mut track);
        let state = cache.apply(MuteDecision::KeepBackup, &mut track);

        assert_eq!(state, Some(MuteState::Live));
        assert_eq!(track, original);
    }

    #[test]
    fn backup_survives_restore_so_remute_reuses_it() {
        let mut cache = MuteCache::new();
        let mut track = live_track();

        cache.apply(MuteDecision::KeepBackup, &mut track);
        cache.apply(MuteDecision::KeepBackup, &mut track);
        assert!(cache.has_backup());

        let state = cache.apply(MuteDecision::KeepBackup, &mut track);
        assert_eq!(state, Some(MuteState::MutedWithBackup));
        assert!(!track.include_audio());
    }

    #[test]
    fn commit_after_keep_backup_discards_the_backup() {
        let mut cache = MuteCache::new();
        let mut track = live_track();

        cache.apply(MuteDecision::KeepBackup, &mut track);
        let state = cache.apply(MuteDecision::Commit, &mut track);

        assert_eq!(state, Some(MuteState::MutedCommitted));
        assert!(!cache.has_backup());
        assert!(!track.include_audio());
    }

    #[test]
    fn cancel_changes_nothing() {
        let mut cache = MuteCache::new();
        let mut track = live_track();
        let before = track.clone();

        let state = cache.apply(MuteDecision::Cancel, &mut track);

        assert_eq!(state, None);
        assert_eq!(track, before);
        assert!(!cache.has_backup());
    }

    #[test]
    fn keep_backup_after_commit_is_a_no_op() {
        let mut cache = MuteCache::new();
        let mut track = live_track();

        cache.apply(MuteDecision::Commit, &mut track);
        let state = cache.apply(MuteDecision::KeepBackup, &mut track);

        assert_eq!(state, None);
        assert!(!track.include_audio());
        assert!(!cache.has_backup());
    }

    #[test]
    fn clear_empties_the_slot() {
        let mut cache = MuteCache::new();
        let mut track = live_track();

        cache.apply(MuteDecision::KeepBackup, &mut track);
        cache.clear();

        assert!(!cache.has_backup());
        assert_eq!(cache.state(&track), MuteState::MutedCommitted);
    }
}
