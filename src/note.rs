//! Mapping from a detected frequency to the nearest equal-tempered note.
//!
//! Note numbers follow the MIDI convention: 69 is A4 and every step is one
//! semitone. The offset from the nearest note is reported in whole cents,
//! rounded down, and is never clamped.
use std::fmt;

use crate::config::{validate_reference_pitch, DEFAULT_REFERENCE_PITCH};
use crate::detector::internals::Pitch;
use crate::error::ConfigError;
use crate::float::{from_f64, Float};

/// Note number of the reference pitch (A4).
pub const REFERENCE_NOTE_NUMBER: i32 = 69;

/// Pitch-class names, indexed by `note_number mod 12`.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Name of the pitch class of `note_number`. Negative note numbers wrap the
/// same way as positive ones.
pub fn note_name(note_number: i32) -> &'static str {
    NOTE_NAMES[note_number.rem_euclid(12) as usize]
}

/// The nearest note to a detected pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    number: i32,
    cents: i32,
}

impl Note {
    pub fn new(number: i32, cents: i32) -> Self {
        Note { number, cents }
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn name(&self) -> &'static str {
        note_name(self.number)
    }

    /// Scientific pitch octave, so 60 is C4 and 69 is A4.
    pub fn octave(&self) -> i32 {
        self.number.div_euclid(12) - 1
    }

    /// Signed distance in cents from the exact frequency of this note.
    pub fn cents(&self) -> i32 {
        self.cents
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name(), self.cents)
    }
}

/// Equal temperament anchored on a reference pitch for A4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning<T>
where
    T: Float,
{
    reference_pitch: T,
}

impl<T> Default for Tuning<T>
where
    T: Float,
{
    fn default() -> Self {
        Tuning {
            reference_pitch: from_f64(DEFAULT_REFERENCE_PITCH),
        }
    }
}

impl<T> Tuning<T>
where
    T: Float,
{
    pub fn new(reference_pitch: T) -> Result<Self, ConfigError> {
        validate_reference_pitch(reference_pitch)?;
        Ok(Tuning { reference_pitch })
    }

    pub fn reference_pitch(&self) -> T {
        self.reference_pitch
    }

    /// Nearest note number to `frequency`, or `None` if `frequency` is not a
    /// positive finite number.
    pub fn note_from_pitch(&self, frequency: T) -> Option<i32> {
        let semitones = from_f64::<T>(12.0) * self.octaves_from_reference(frequency)?;
        semitones
            .round()
            .to_i32()
            .and_then(|n| n.checked_add(REFERENCE_NOTE_NUMBER))
    }

    /// Exact equal-tempered frequency of `note_number`.
    pub fn frequency_from_note_number(&self, note_number: i32) -> T {
        let semitones = from_f64::<T>(f64::from(note_number) - f64::from(REFERENCE_NOTE_NUMBER));
        self.reference_pitch * from_f64::<T>(2.0).powf(semitones / from_f64(12.0))
    }

    /// Distance from `note_number` to `frequency` in cents, rounded down, or
    /// `None` if `frequency` is not a positive finite number.
    pub fn cents_off_from_pitch(&self, frequency: T, note_number: i32) -> Option<i32> {
        if !is_valid_frequency(frequency) {
            return None;
        }
        let ratio = frequency / self.frequency_from_note_number(note_number);
        (from_f64::<T>(1200.0) * ratio.log2()).floor().to_i32()
    }

    /// Nearest note to a detected pitch. `None` only if the note number does not
    /// fit an `i32`.
    pub fn note(&self, pitch: &Pitch<T>) -> Option<Note> {
        let frequency = pitch.frequency();
        let number = self.note_from_pitch(frequency)?;
        let cents = self.cents_off_from_pitch(frequency, number)?;
        Some(Note::new(number, cents))
    }

    fn octaves_from_reference(&self, frequency: T) -> Option<T> {
        if is_valid_frequency(frequency) {
            Some((frequency / self.reference_pitch).log2())
        } else {
            None
        }
    }
}

fn is_valid_frequency<T: Float>(frequency: T) -> bool {
    frequency.is_finite() && frequency > T::zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_pitch_is_a4() {
        let tuning = Tuning::<f64>::default();
        assert_eq!(tuning.note_from_pitch(440.0), Some(69));
        assert_eq!(tuning.cents_off_from_pitch(440.0, 69), Some(0));
        assert_eq!(tuning.frequency_from_note_number(69), 440.0);
        assert_eq!(note_name(69), "A");
    }

    #[test]
    fn names_wrap_for_negative_notes() {
        assert_eq!(note_name(0), "C");
        assert_eq!(note_name(-1), "B");
        assert_eq!(note_name(-12), "C");
        assert_eq!(note_name(-3), "A");
        assert_eq!(note_name(61), "C#");
    }

    #[test]
    fn octave_numbers() {
        assert_eq!(Note::new(69, 0).octave(), 4);
        assert_eq!(Note::new(60, 0).octave(), 4);
        assert_eq!(Note::new(59, 0).octave(), 3);
        assert_eq!(Note::new(0, 0).octave(), -1);
        assert_eq!(Note::new(-1, 0).octave(), -2);
    }

    #[test]
    fn semitone_frequencies() {
        let tuning = Tuning::<f64>::default();
        assert_eq!(tuning.frequency_from_note_number(81), 880.0);
        assert_eq!(tuning.frequency_from_note_number(57), 220.0);
        assert!((tuning.frequency_from_note_number(60) - 261.625_565).abs() < 1e-6);
        for note in [21, 45, 60, 72, 108] {
            let frequency = tuning.frequency_from_note_number(note);
            assert_eq!(tuning.note_from_pitch(frequency), Some(note));
        }
    }

    #[test]
    fn cents_capture_the_residual() {
        let tuning = Tuning::<f64>::default();

        let quarter_sharp = 440.0 * 2f64.powf(0.25 / 12.0);
        assert_eq!(tuning.note_from_pitch(quarter_sharp), Some(69));
        let cents = tuning.cents_off_from_pitch(quarter_sharp, 69).unwrap();
        assert!((24..=25).contains(&cents), "{}", cents);

        let quarter_flat = 440.0 * 2f64.powf(-0.25 / 12.0);
        let cents = tuning.cents_off_from_pitch(quarter_flat, 69).unwrap();
        assert!((-26..=-25).contains(&cents), "{}", cents);

        // 450 Hz is nearer to A4 than to A#4.
        let note = tuning.note(&Pitch::from_lag(98.0, 44100).unwrap()).unwrap();
        assert_eq!(note.number(), 69);
        let exact = 1200.0 * (44100.0f64 / 98.0 / 440.0).log2();
        assert_eq!(note.cents(), exact.floor() as i32);
    }

    #[test]
    fn invalid_frequencies_have_no_note() {
        let tuning = Tuning::<f32>::default();
        for frequency in [0.0, -440.0, f32::NAN, f32::INFINITY] {
            assert_eq!(tuning.note_from_pitch(frequency), None);
            assert_eq!(tuning.cents_off_from_pitch(frequency, 69), None);
        }
    }

    #[test]
    fn extreme_frequencies_are_still_mapped() {
        let tuning = Tuning::<f64>::default();
        assert_eq!(tuning.note_from_pitch(1.0), Some(-36));
        assert_eq!(tuning.note_from_pitch(20_000.0), Some(135));
    }

    #[test]
    fn custom_reference_pitch() {
        let tuning = Tuning::new(442.0f64).unwrap();
        assert_eq!(tuning.frequency_from_note_number(69), 442.0);
        assert_eq!(tuning.cents_off_from_pitch(442.0, 69), Some(0));
        assert_eq!(Tuning::new(0.0f64), Err(ConfigError::ReferencePitch(0.0)));
    }

    #[test]
    fn label_format() {
        assert_eq!(Note::new(69, -3).to_string(), "A, -3");
        assert_eq!(Note::new(61, 12).to_string(), "C#, 12");
    }
}
