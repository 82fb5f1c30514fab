//! Cancellation signal shared by the producer and the workers.
//!
//! The signal is a channel nobody ever sends on: dropping the only sender
//! disconnects it, which every receiver observes at once and which a
//! `select!` can wait on alongside a blocking queue operation.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};

/// Owning side of the signal. Cancels when dropped.
#[derive(Debug)]
pub struct CancellationSource {
    _signal: Sender<()>,
}

impl CancellationSource {
    /// Cancel now. Equivalent to dropping the source.
    pub fn cancel(self) {}
}

/// Observing side of the signal
#[derive(Debug, Clone)]
pub struct CancellationToken {
    receiver: Receiver<()>,
}

impl CancellationToken {
    pub fn is_cancelled(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Becomes ready (with an error) once cancelled; use inside `select!`
    pub fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}

/// Create a linked source/token pair
pub fn cancellation() -> (CancellationSource, CancellationToken) {
    let (sender, receiver) = bounded(0);
    (
        CancellationSource { _signal: sender },
        CancellationToken { receiver },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::select;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn not_cancelled_until_source_goes() {
        let (source, token) = cancellation();
        assert!(!token.is_cancelled());

        source.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn dropping_the_source_cancels_every_clone() {
        let (source, token) = cancellation();
        let other = token.clone();

        drop(source);

        assert!(token.is_cancelled());
        assert!(other.is_cancelled());
    }

    #[test]
    fn releases_a_blocked_select() {
        let (source, token) = cancellation();
        let (_tx, never) = bounded::<u32>(0);

        let waiter = thread::spawn(move || {
            select! {
                recv(never) -> _ => false,
                recv(token.receiver()) -> _ => true,
            }
        });

        thread::sleep(Duration::from_millis(20));
        source.cancel();

        assert!(waiter.join().unwrap());
    }
}
