use super::track::Track;

/// Ordered tracks plus a cursor.
///
/// The cursor is `None` exactly when the queue is empty, otherwise it is a
/// valid index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QueueState {
    tracks: Vec<Track>,
    current_index: Option<usize>,
}

impl QueueState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|i| self.tracks.get(i))
    }

    pub fn is_at_start(&self) -> bool {
        self.current_index == Some(0)
    }

    pub fn is_at_end(&self) -> bool {
        match self.current_index {
            Some(i) => i + 1 == self.tracks.len(),
            None => false,
        }
    }

    /// Replace the contents and move the cursor to the first track.
    pub fn reset(&mut self, tracks: Vec<Track>) {
        self.current_index = if tracks.is_empty() { None } else { Some(0) };
        self.tracks = tracks;
    }

    /// Move the cursor forward. Returns false (and stays put) at the end.
    pub fn advance(&mut self) -> bool {
        match self.current_index {
            Some(i) if i + 1 < self.tracks.len() => {
                self.current_index = Some(i + 1);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor back. Returns false (and stays put) at the start.
    pub fn retreat(&mut self) -> bool {
        match self.current_index {
            Some(i) if i > 0 => {
                self.current_index = Some(i - 1);
                true
            }
            _ => false,
        }
    }
}
