//! # ACF Pitch
//! *acf_pitch* turns a buffer of microphone samples into the note being sung or
//! played, for games and tuners that are steered by the player's voice. It runs
//! once per rendered frame, synchronously, and keeps no history between frames.
//!
//! # Pipeline
//! Each buffer goes through three stages:
//!
//!   * [preprocess]: an RMS silence gate, then trimming of quiet lead/trail samples.
//!   * [AutocorrelationDetector][detector::autocorrelation]: autocorrelation, a
//!     search for the dominant period and parabolic sub-sample refinement.
//!   * [note]: the nearest equal-tempered note and the offset from it in cents.
//!
//! Any stage can decide there is nothing to report, in which case the whole
//! frame yields `None`. No stage panics on short, flat or silent buffers.
//!
//! # Examples
//! ```
//! use acf_pitch::tuner::Tuner;
//!
//! fn main() {
//!     const SAMPLE_RATE: usize = 44100;
//!     const SIZE: usize = 2048;
//!
//!     // Signal coming from some source (microphone, generated, etc...)
//!     let dt = 1.0 / SAMPLE_RATE as f64;
//!     let freq = 440.0;
//!     let signal: Vec<f32> = (0..SIZE)
//!         .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin() as f32)
//!         .collect();
//!
//!     let mut tuner = Tuner::default();
//!
//!     let reading = tuner.process(&signal, SAMPLE_RATE).unwrap();
//!
//!     println!("Frequency: {}, Note: {}", reading.pitch.frequency(), reading.note);
//!     assert_eq!(reading.note.name(), "A");
//! }
//! ```

pub use config::Config;
pub use detector::internals::Pitch;
pub use error::ConfigError;
pub use note::{Note, Tuning};

pub mod config;
pub mod detector;
pub mod error;
pub mod float;
pub mod frame;
pub mod note;
pub mod preprocess;
pub mod tuner;
pub mod utils;
