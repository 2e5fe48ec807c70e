//=========================================================================
// Audio Contract
//=========================================================================
//
// Clip loading and playback as seen by scenes. The output backend is an
// external collaborator; only its interface lives here.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use async_trait::async_trait;

//=== Internal Dependencies ===============================================

use super::cancel::CancellationToken;
use super::content::ContentError;

//=== Clips & Instances ===================================================

/// A loaded audio asset.
pub trait AudioClip {
    /// Clip duration in seconds, when the decoder knows it.
    fn duration_seconds(&self) -> Option<f64>;
}

/// A controllable playback of a clip.
pub trait PlaybackInstance {
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    fn is_looping(&self) -> bool;
    fn set_looping(&mut self, looping: bool);
    fn is_playing(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);

    /// Stops playback and rewinds.
    fn stop(&mut self);
}

//=== PlaybackOptions =====================================================

/// Parameters for [`AudioService::play`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    volume: f32,
    pub looping: bool,
    pub auto_start: bool,
}

impl PlaybackOptions {
    /// Full volume, no looping, auto-start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the volume, clamped to `[0, 1]`.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        self
    }

    /// Sets whether playback restarts at the end of the clip.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Sets whether `play` starts the instance immediately.
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Volume in `[0, 1]`.
    pub fn volume(&self) -> f32 {
        self.volume
    }
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            volume: 1.0,
            looping: false,
            auto_start: true,
        }
    }
}

//=== AudioService ========================================================

/// Clip loading and playback.
#[async_trait(?Send)]
pub trait AudioService {
    async fn load_clip(
        &self,
        path: &str,
        cancel: &CancellationToken,
    ) -> Result<Rc<dyn AudioClip>, ContentError>;

    /// Creates a playback instance; starts it when `options.auto_start` is set.
    fn play(&self, clip: &Rc<dyn AudioClip>, options: PlaybackOptions) -> Box<dyn PlaybackInstance>;
}
