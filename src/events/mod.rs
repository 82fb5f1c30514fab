//! # Events Module
//!
//! Progress reporting for searches.
//!
//! ## Design
//! The engine emits events through channels, allowing any UI to
//! subscribe and display progress. Worker threads hold their own
//! sender clones, so no progress state is shared between them.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Candidate(CandidateEvent::Checked(p)) = event {
//!             eprintln!("checking {}: {} ({})", p.index, p.path.display(), p.distance);
//!         }
//!     }
//! });
//!
//! engine.search_with_events(&reference, &gallery, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
