//! Owned audio frames and the single-slot handoff between a capture callback
//! and the per-frame analysis loop.
//!
//! The capture side publishes every buffer it fills; the analysis side takes
//! whatever is newest when a frame is rendered. Frames that were never taken
//! are dropped, so neither side ever waits on the other.
//!
//! ```
//! use acf_pitch::frame::{latest_frame_slot, AudioFrame};
//!
//! let (sender, receiver) = latest_frame_slot::<f32>();
//! sender.publish(AudioFrame::new(vec![0.1; 2048], 44100));
//! sender.publish(AudioFrame::new(vec![0.2; 2048], 44100));
//!
//! let frame = receiver.latest().unwrap();
//! assert_eq!(frame.samples()[0], 0.2);
//! assert!(receiver.latest().is_none());
//! ```
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::float::Float;

/// One buffer of mono samples together with the rate they were captured at.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioFrame<T>
where
    T: Float,
{
    samples: Vec<T>,
    sample_rate: usize,
}

impl<T> AudioFrame<T>
where
    T: Float,
{
    pub fn new(samples: Vec<T>, sample_rate: usize) -> Self {
        AudioFrame {
            samples,
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn sample_rate(&self) -> usize {
        self.sample_rate
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }
}

/// Create a connected sender/receiver pair sharing a slot that holds at most
/// one frame.
pub fn latest_frame_slot<T: Float>() -> (FrameSender<T>, FrameReceiver<T>) {
    let (tx, rx) = bounded(1);
    let sender = FrameSender {
        tx,
        stale: rx.clone(),
    };
    (sender, FrameReceiver { rx })
}

/// Capture side of the slot.
#[derive(Clone)]
pub struct FrameSender<T>
where
    T: Float,
{
    tx: Sender<AudioFrame<T>>,
    // Held so a full slot can be emptied before publishing.
    stale: Receiver<AudioFrame<T>>,
}

impl<T> FrameSender<T>
where
    T: Float,
{
    /// Put `frame` in the slot, replacing a frame that has not been taken yet.
    /// Never blocks.
    pub fn publish(&self, frame: AudioFrame<T>) {
        let mut frame = frame;
        loop {
            match self.tx.try_send(frame) {
                Ok(()) => return,
                Err(TrySendError::Full(rejected)) => {
                    if self.stale.try_recv().is_ok() {
                        log::trace!("dropping an unread audio frame");
                    }
                    frame = rejected;
                }
                // The sender keeps its own receiver, so the channel stays connected.
                Err(TrySendError::Disconnected(_)) => return,
            }
        }
    }
}

/// Analysis side of the slot.
pub struct FrameReceiver<T>
where
    T: Float,
{
    rx: Receiver<AudioFrame<T>>,
}

impl<T> FrameReceiver<T>
where
    T: Float,
{
    /// Take the newest frame, if one arrived since the last call. Never blocks.
    pub fn latest(&self) -> Option<AudioFrame<T>> {
        self.rx.try_iter().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn empty_slot_has_no_frame() {
        let (_sender, receiver) = latest_frame_slot::<f32>();
        assert!(receiver.latest().is_none());
    }

    #[test]
    fn newest_frame_wins() {
        let (sender, receiver) = latest_frame_slot::<f32>();
        for i in 0..10 {
            sender.publish(AudioFrame::new(vec![i as f32; 4], 48000));
        }
        let frame = receiver.latest().unwrap();
        assert_eq!(frame.samples(), &[9.0f32; 4][..]);
        assert_eq!(frame.sample_rate(), 48000);
        assert!(receiver.latest().is_none());
    }

    #[test]
    fn frame_taken_before_next_publish() {
        let (sender, receiver) = latest_frame_slot::<f64>();
        sender.publish(AudioFrame::new(vec![1.0], 44100));
        assert_eq!(receiver.latest().unwrap().into_samples(), vec![1.0]);
        sender.publish(AudioFrame::new(vec![2.0], 44100));
        assert_eq!(receiver.latest().unwrap().into_samples(), vec![2.0]);
    }

    #[test]
    fn publishing_from_another_thread() {
        let (sender, receiver) = latest_frame_slot::<f32>();
        let capture = thread::spawn(move || {
            for i in 0..1000 {
                sender.publish(AudioFrame::new(vec![i as f32], 44100));
            }
        });
        capture.join().unwrap();

        let frame = receiver.latest().unwrap();
        assert_eq!(frame.samples(), &[999.0f32][..]);
    }
}
