use tokio::sync::RwLock;

use crate::tracks::{Track, TrackError};

/// In-memory track list
///
/// Tracks are addressed by zero-based index. Deleting a track shifts every
/// later track down by one.
#[derive(Debug, Default)]
pub struct TrackStore {
    tracks: RwLock<Vec<Track>>,
}

impl TrackStore {
    /// Create an empty TrackStore
    pub fn new() -> Self {
        Self::default()
    }

    /// All tracks in insertion order
    pub async fn list(&self) -> Vec<Track> {
        self.tracks.read().await.clone()
    }

    /// Find a track by index
    pub async fn get(&self, index: i64) -> Result<Track, TrackError> {
        let tracks = self.tracks.read().await;
        let slot = position(index, tracks.len())?;
        Ok(tracks[slot].clone())
    }

    /// Append a track, returning its index
    pub async fn add(&self, track: Track) -> usize {
        let mut tracks = self.tracks.write().await;
        tracks.push(track);
        tracks.len() - 1
    }

    /// Replace the track at `index`, returning the new value
    pub async fn update(&self, index: i64, track: Track) -> Result<Track, TrackError> {
        let mut tracks = self.tracks.write().await;
        let slot = position(index, tracks.len())?;
        tracks[slot] = track.clone();
        Ok(track)
    }

    /// Remove the track at `index`, returning it
    pub async fn delete(&self, index: i64) -> Result<Track, TrackError> {
        let mut tracks = self.tracks.write().await;
        let slot = position(index, tracks.len())?;
        Ok(tracks.remove(slot))
    }
}

fn position(index: i64, len: usize) -> Result<usize, TrackError> {
    usize::try_from(index)
        .ok()
        .filter(|&i| i < len)
        .ok_or(TrackError::NotFound)
}
