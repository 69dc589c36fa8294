//! Stdin source for piped input (live streaming).
//!
//! Stdin reads block, so a dedicated reader thread forwards lines over a
//! channel and `poll` drains the channel without blocking. The thread exits
//! at EOF; the channel disconnecting is how completion is observed.

use crate::model::SourceError;
use std::io::{BufRead, IsTerminal};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Live stdin source with a non-blocking poll.
#[derive(Debug)]
pub struct StdinSource {
    receiver: Receiver<String>,
    complete: bool,
}

impl StdinSource {
    /// Create a stdin source, spawning the reader thread.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::NoInput` if stdin is an interactive terminal:
    /// nothing would ever arrive and the viewer would sit blank forever.
    pub fn new() -> Result<Self, SourceError> {
        if std::io::stdin().is_terminal() {
            return Err(SourceError::NoInput);
        }

        let (sender, receiver) = mpsc::channel();
        thread::Builder::new()
            .name("textvis-stdin".into())
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    if sender.send(line).is_err() {
                        // Receiver dropped: the app is shutting down.
                        break;
                    }
                }
            })?;

        Ok(Self {
            receiver,
            complete: false,
        })
    }

    /// Construct from an existing receiver (for tests).
    #[cfg(test)]
    pub(crate) fn from_receiver(receiver: Receiver<String>) -> Self {
        Self {
            receiver,
            complete: false,
        }
    }

    /// Drain all lines that arrived since the last poll. Non-blocking.
    ///
    /// Marks the source complete once the reader thread has exited and the
    /// channel is empty.
    ///
    /// # Errors
    ///
    /// Infallible today; the `Result` keeps the polling contract uniform
    /// across sources.
    pub fn poll(&mut self) -> Result<Vec<String>, SourceError> {
        let mut lines = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(line) => lines.push(line),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.complete = true;
                    break;
                }
            }
        }
        Ok(lines)
    }

    /// True once EOF has been reached and every line has been drained.
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn poll_drains_available_lines_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut source = StdinSource::from_receiver(rx);

        tx.send("one".to_string()).unwrap();
        tx.send("two".to_string()).unwrap();

        assert_eq!(source.poll().unwrap(), ["one", "two"]);
        assert!(source.poll().unwrap().is_empty());
        assert!(!source.is_complete(), "sender still connected");
    }

    #[test]
    fn poll_marks_complete_after_disconnect() {
        let (tx, rx) = mpsc::channel();
        let mut source = StdinSource::from_receiver(rx);

        tx.send("last".to_string()).unwrap();
        drop(tx);

        assert_eq!(source.poll().unwrap(), ["last"]);
        assert!(source.is_complete());
    }

    #[test]
    fn poll_on_empty_channel_returns_empty_batch() {
        let (_tx, rx) = mpsc::channel::<String>();
        let mut source = StdinSource::from_receiver(rx);
        assert!(source.poll().unwrap().is_empty());
        assert!(!source.is_complete());
    }
}
