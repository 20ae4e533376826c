//! Contracts between categories and whatever draws them.
//!
//! Nothing in the parsers depends on a concrete renderer. A renderer only has
//! to implement [`RenderSink`]; highlight state travels over a typed
//! [`Channel`] owned by the category.

use crossbeam_channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};

use protrack_core::Rgb;

use crate::models::Track;

/// The capabilities a track renderer offers.
pub trait RenderSink {
    /// Replace the data shown for `track`.
    fn set_data(&mut self, track: &Track, sequence_length: u32);

    /// Redraw everything that changed since the last refresh.
    fn refresh(&mut self);

    /// Called after a track's data has been replaced.
    fn on_data_changed(&mut self, _track: &Track) {}
}

/// A residue range to emphasize across all tracks of a category.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub start: u32,
    pub end: u32,
    pub color: Option<Rgb>,
}

///
/// A typed broadcast channel. Every subscriber receives every message
/// published after it subscribed; dropped subscribers are forgotten on the
/// next publish.
///
#[derive(Debug)]
pub struct Channel<T> {
    subscribers: Vec<Sender<T>>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Channel {
            subscribers: Vec::new(),
        }
    }
}

impl<T: Clone> Channel<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<T> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Returns how many live subscribers received the message.
    pub fn publish(&mut self, message: T) -> usize {
        self.subscribers
            .retain(|tx| tx.send(message.clone()).is_ok());
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::models::{Category, TrackData};

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<String>,
    }

    impl RenderSink for RecordingSink {
        fn set_data(&mut self, track: &Track, sequence_length: u32) {
            self.calls.push(format!("set {} {}", track.label, sequence_length));
        }

        fn refresh(&mut self) {
            self.calls.push("refresh".into());
        }

        fn on_data_changed(&mut self, track: &Track) {
            self.calls.push(format!("changed {}", track.label));
        }
    }

    #[rstest]
    fn test_publish_reaches_every_subscriber() {
        let mut channel: Channel<Highlight> = Channel::new();
        let a = channel.subscribe();
        let b = channel.subscribe();

        let highlight = Highlight {
            start: 3,
            end: 9,
            color: None,
        };
        assert_eq!(channel.publish(highlight), 2);
        assert_eq!(a.try_recv(), Ok(highlight));
        assert_eq!(b.try_recv(), Ok(highlight));
    }

    #[rstest]
    fn test_dropped_subscribers_are_forgotten() {
        let mut channel: Channel<u32> = Channel::new();
        let kept = channel.subscribe();
        drop(channel.subscribe());

        assert_eq!(channel.publish(7), 1);
        assert_eq!(channel.subscriber_count(), 1);
        assert_eq!(kept.try_recv(), Ok(7));
    }

    #[rstest]
    fn test_subscriber_on_another_thread() {
        let mut channel: Channel<u32> = Channel::new();
        let rx = channel.subscribe();
        let listener = std::thread::spawn(move || rx.iter().take(2).collect::<Vec<u32>>());

        assert_eq!(channel.publish(1), 1);
        assert_eq!(channel.publish(2), 1);
        assert_eq!(listener.join().unwrap(), vec![1, 2]);
    }

    #[rstest]
    fn test_category_render_order() {
        let mut category = Category::new(
            "DOMAINS",
            "Domains",
            vec![
                Track::new("Domains", TrackData::Rows(vec![])),
                Track::new("Domain", TrackData::Rows(vec![])),
            ],
        );
        let mut sink = RecordingSink::default();
        category.render(&mut sink, 120);
        assert_eq!(
            sink.calls,
            vec![
                "set Domains 120",
                "changed Domains",
                "set Domain 120",
                "changed Domain",
                "refresh"
            ]
        );

        let rx = category.subscribe_highlights();
        let highlight = Highlight {
            start: 1,
            end: 2,
            color: Some(Rgb::WHITE),
        };
        assert_eq!(category.highlight(highlight), 1);
        assert_eq!(rx.try_recv(), Ok(highlight));
    }
}
