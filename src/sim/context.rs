//! Collaborator boundary
//!
//! The simulation never touches a keyboard, a speaker, or a screen. Input
//! arrives as a per-frame snapshot of held actions, and outgoing effects are
//! narrow sink traits the embedding frontend implements.

/// The set of logical actions held during one frame.
///
/// Sampled once per frame by the frontend; the simulation depends only on
/// current membership, never on the order keys were pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// Sound effect cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A volley left the ship
    Shoot,
    /// An enemy was destroyed by fire
    Explosion,
    /// A power-up was collected
    PowerUp,
    /// The run ended
    GameOver,
}

/// Receives sound cues at the moment they occur. Owns no game state.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Receives score/health display updates as they change.
pub trait UiSink {
    fn score_changed(&mut self, score: u32);
    /// Percentage in [0, 100]; already clamped.
    fn health_changed(&mut self, pct: f32);
}

/// No-op sink for tests and headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: SoundCue) {}
}

impl UiSink for Muted {
    fn score_changed(&mut self, _score: u32) {}
    fn health_changed(&mut self, _pct: f32) {}
}

/// The collaborators a frame needs, bundled so signatures stay short.
pub struct Context<'a> {
    pub audio: &'a mut dyn AudioSink,
    pub ui: &'a mut dyn UiSink,
}
