//! Procedural sound effects.
//!
//! Every cue is synthesized from a fixed recipe (oscillator sweeps, noise
//! bursts, short arpeggios); there are no audio assets. Playback is
//! fire-and-forget and gated by the enabled flag and volume. When built
//! without the `audio` feature, or when no output device can be opened,
//! `play` still honours the gates but produces no sound.

use std::f32::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(not(feature = "audio"))]
use tracing::trace;
#[cfg(feature = "audio")]
use tracing::warn;

pub const SAMPLE_RATE: u32 = 22_050;
pub const DEFAULT_VOLUME: f32 = 0.3;

/// Envelope floor for exponential decays, matching a fade to ~-40 dB.
const FADE_FLOOR: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundKind {
    Shoot,
    Hit,
    Explode,
    PowerUp,
    Damage,
    GameOver,
    Wave,
    Boss,
    Victory,
}

impl SoundKind {
    pub const ALL: [SoundKind; 9] = [
        SoundKind::Shoot,
        SoundKind::Hit,
        SoundKind::Explode,
        SoundKind::PowerUp,
        SoundKind::Damage,
        SoundKind::GameOver,
        SoundKind::Wave,
        SoundKind::Boss,
        SoundKind::Victory,
    ];
}

// ── Recipes ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Wave {
    Sine,
    Square,
    Saw,
    Triangle,
}

impl Wave {
    /// One sample at `phase` in [0, 1).
    fn sample(self, phase: f32) -> f32 {
        match self {
            Wave::Sine => (phase * TAU).sin(),
            Wave::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Wave::Saw => 2.0 * phase - 1.0,
            Wave::Triangle => 1.0 - 4.0 * (phase - 0.5).abs(),
        }
    }
}

/// A single oscillator voice: exponential pitch sweep from `from_hz` to
/// `to_hz`, linear attack to `peak`, exponential decay to the floor.
#[derive(Clone, Copy, Debug)]
struct Tone {
    wave: Wave,
    start: f32,
    duration: f32,
    from_hz: f32,
    to_hz: f32,
    peak: f32,
    attack: f32,
}

impl Tone {
    const fn sweep(wave: Wave, from_hz: f32, to_hz: f32, duration: f32, peak: f32) -> Tone {
        Tone { wave, start: 0.0, duration, from_hz, to_hz, peak, attack: 0.0 }
    }

    const fn note(wave: Wave, hz: f32, start: f32, duration: f32, peak: f32, attack: f32) -> Tone {
        Tone { wave, start, duration, from_hz: hz, to_hz: hz, peak, attack }
    }

    fn end(&self) -> f32 {
        self.start + self.duration
    }

    fn frequency(&self, t: f32) -> f32 {
        let k = (t / self.duration).clamp(0.0, 1.0);
        self.from_hz * (self.to_hz / self.from_hz).powf(k)
    }

    fn envelope(&self, t: f32) -> f32 {
        if self.attack > 0.0 && t < self.attack {
            return self.peak * t / self.attack;
        }
        let decay = (self.duration - self.attack).max(f32::EPSILON);
        let k = ((t - self.attack) / decay).clamp(0.0, 1.0);
        self.peak * (FADE_FLOOR / self.peak.max(FADE_FLOOR)).powf(k)
    }

    fn render(&self, out: &mut [f32]) {
        let first = (self.start * SAMPLE_RATE as f32) as usize;
        let mut phase = 0.0f32;
        for (i, slot) in out.iter_mut().enumerate().skip(first) {
            let t = i as f32 / SAMPLE_RATE as f32 - self.start;
            if t >= self.duration {
                break;
            }
            *slot += self.wave.sample(phase) * self.envelope(t);
            phase = (phase + self.frequency(t) / SAMPLE_RATE as f32).fract();
        }
    }
}

/// Low-passed white noise with a linearly fading amplitude.
#[derive(Clone, Copy, Debug)]
struct NoiseBurst {
    duration: f32,
    peak: f32,
    cutoff_from: f32,
    cutoff_to: f32,
}

impl NoiseBurst {
    fn render(&self, out: &mut [f32]) {
        // Fixed seed: every explosion sounds the same, and synthesis stays
        // a pure function for tests.
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let total = (self.duration * SAMPLE_RATE as f32) as usize;
        let mut filtered = 0.0f32;
        for (i, slot) in out.iter_mut().enumerate().take(total) {
            let k = i as f32 / total as f32;
            let white = rng.gen_range(-1.0f32..1.0) * (1.0 - k);
            let cutoff = self.cutoff_from * (self.cutoff_to / self.cutoff_from).powf(k);
            let alpha = 1.0 - (-TAU * cutoff / SAMPLE_RATE as f32).exp();
            filtered += alpha * (white - filtered);
            let gain = self.peak * (FADE_FLOOR / self.peak).powf(k);
            *slot += filtered * gain;
        }
    }
}

fn arpeggio(wave: Wave, notes: &[f32], step: f32, length: f32, peak: f32, attack: f32) -> Vec<Tone> {
    notes
        .iter()
        .enumerate()
        .map(|(i, &hz)| Tone::note(wave, hz, i as f32 * step, length, peak, attack))
        .collect()
}

fn tones_for(kind: SoundKind) -> Vec<Tone> {
    match kind {
        SoundKind::Shoot => vec![Tone::sweep(Wave::Square, 880.0, 220.0, 0.1, 0.3)],
        SoundKind::Hit => vec![Tone::sweep(Wave::Square, 300.0, 100.0, 0.05, 0.4)],
        SoundKind::Explode => Vec::new(),
        SoundKind::PowerUp => arpeggio(Wave::Sine, &[440.0, 554.0, 659.0, 880.0], 0.05, 0.1, 0.3, 0.02),
        SoundKind::Damage => vec![Tone::sweep(Wave::Saw, 150.0, 50.0, 0.2, 0.6)],
        SoundKind::GameOver => {
            arpeggio(Wave::Triangle, &[440.0, 392.0, 349.0, 262.0], 0.2, 0.3, 0.4, 0.05)
        }
        SoundKind::Wave => arpeggio(Wave::Square, &[523.0, 659.0, 784.0, 1047.0], 0.08, 0.15, 0.25, 0.02),
        // Stepped bass: 80 → 60 → 80 Hz, held then faded.
        SoundKind::Boss => vec![
            Tone::note(Wave::Saw, 80.0, 0.0, 0.2, 0.5, 0.0),
            Tone::note(Wave::Saw, 60.0, 0.2, 0.2, 0.5, 0.0),
            Tone::note(Wave::Saw, 80.0, 0.4, 0.2, 0.5, 0.0),
        ],
        SoundKind::Victory => arpeggio(
            Wave::Square,
            &[523.0, 659.0, 784.0, 1047.0, 1319.0],
            0.12,
            0.25,
            0.3,
            0.03,
        ),
    }
}

fn noise_for(kind: SoundKind) -> Option<NoiseBurst> {
    match kind {
        SoundKind::Explode => Some(NoiseBurst {
            duration: 0.2,
            peak: 0.5,
            cutoff_from: 1000.0,
            cutoff_to: 100.0,
        }),
        _ => None,
    }
}

/// Render the mono sample buffer for `kind` at `volume` (clamped to [0, 1]).
pub fn synthesize(kind: SoundKind, volume: f32) -> Vec<f32> {
    let volume = volume.clamp(0.0, 1.0);
    let tones = tones_for(kind);
    let noise = noise_for(kind);

    let seconds = tones
        .iter()
        .map(Tone::end)
        .chain(noise.map(|n| n.duration))
        .fold(0.0f32, f32::max);
    let mut samples = vec![0.0f32; (seconds * SAMPLE_RATE as f32).ceil() as usize];

    for tone in &tones {
        tone.render(&mut samples);
    }
    if let Some(burst) = noise {
        burst.render(&mut samples);
    }
    for s in &mut samples {
        *s = (*s * volume).clamp(-1.0, 1.0);
    }
    samples
}

// ── Engine ───────────────────────────────────────────────────────────────────

#[cfg(feature = "audio")]
mod backend {
    use rodio::buffer::SamplesBuffer;
    use rodio::{OutputStream, OutputStreamBuilder, Sink};

    use super::SAMPLE_RATE;

    pub struct Output {
        stream: OutputStream,
    }

    impl Output {
        pub fn open() -> Option<Self> {
            let stream = OutputStreamBuilder::open_default_stream().ok()?;
            Some(Output { stream })
        }

        pub fn play(&self, samples: Vec<f32>) {
            let sink = Sink::connect_new(self.stream.mixer());
            sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
            sink.detach();
        }
    }
}

pub struct SoundEngine {
    enabled: bool,
    volume: f32,
    #[cfg(feature = "audio")]
    output: Option<backend::Output>,
    #[cfg(feature = "audio")]
    tried_open: bool,
    played: u64,
}

impl Default for SoundEngine {
    fn default() -> Self {
        SoundEngine::new(true, DEFAULT_VOLUME)
    }
}

impl SoundEngine {
    /// The output device is opened lazily on the first audible cue.
    pub fn new(enabled: bool, volume: f32) -> Self {
        SoundEngine {
            enabled,
            volume: sanitize_volume(volume),
            #[cfg(feature = "audio")]
            output: None,
            #[cfg(feature = "audio")]
            tried_open: false,
            played: 0,
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = sanitize_volume(volume);
    }

    /// Cues that passed the mute/volume gate since creation.
    pub fn played(&self) -> u64 {
        self.played
    }

    /// Fire-and-forget. Never fails; a missing device just means silence.
    pub fn play(&mut self, kind: SoundKind) {
        if !self.enabled || self.volume <= 0.0 {
            return;
        }
        self.played += 1;
        self.emit(kind);
    }

    #[cfg(feature = "audio")]
    fn emit(&mut self, kind: SoundKind) {
        if !self.tried_open {
            self.tried_open = true;
            self.output = backend::Output::open();
            if self.output.is_none() {
                warn!("audio output unavailable; sound effects disabled");
            }
        }
        if let Some(output) = &self.output {
            output.play(synthesize(kind, self.volume));
        }
    }

    #[cfg(not(feature = "audio"))]
    fn emit(&mut self, kind: SoundKind) {
        trace!(?kind, "sound cue (audio feature disabled)");
    }
}

fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, 1.0)
    } else {
        DEFAULT_VOLUME
    }
}
