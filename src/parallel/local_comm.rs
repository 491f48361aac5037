//! Thread-backed communicator.
//!
//! Each rank owns one multiplexed inbox (`mpsc::Receiver`) and a sender into
//! every other rank's inbox, tagging each message with its own rank. A rank
//! holds no sender to its own inbox, so `recv_any` reports a disconnect once
//! every peer has finished instead of blocking forever.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::debug;

use super::{Comm, Envelope, Message};
use crate::error::FarmError;

pub struct LocalComm {
    rank: usize,
    peers: Vec<Option<Sender<Envelope>>>,
    inbox: Receiver<Envelope>,
}

impl LocalComm {
    /// Build a fully connected set of `size` communicators, index = rank.
    pub fn universe(size: usize) -> Vec<LocalComm> {
        let (senders, inboxes): (Vec<_>, Vec<_>) = (0..size).map(|_| mpsc::channel()).unzip();
        inboxes
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| LocalComm {
                rank,
                peers: senders
                    .iter()
                    .enumerate()
                    .map(|(dest, tx)| (dest != rank).then(|| tx.clone()))
                    .collect(),
                inbox,
            })
            .collect()
    }

    /// Run `f` on `size` ranks, one thread each, and collect the results by rank.
    ///
    /// Each communicator is dropped as soon as its rank returns.
    pub fn launch<F, R>(size: usize, f: F) -> Result<Vec<R>, FarmError>
    where
        F: Fn(&LocalComm) -> R + Sync,
        R: Send,
    {
        if size == 0 {
            return Err(FarmError::InsufficientRanks { size, required: 1 });
        }
        debug!("launching {} local ranks", size);
        let f = &f;
        thread::scope(|s| {
            let handles: Vec<_> = LocalComm::universe(size)
                .into_iter()
                .map(|comm| s.spawn(move || f(&comm)))
                .collect();
            handles
                .into_iter()
                .enumerate()
                .map(|(rank, h)| h.join().map_err(|_| FarmError::RankPanicked { rank }))
                .collect()
        })
    }
}

impl Comm for LocalComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.peers.len()
    }

    fn send(&self, dest: usize, message: Message) -> Result<(), FarmError> {
        let tx = self
            .peers
            .get(dest)
            .and_then(Option::as_ref)
            .ok_or(FarmError::NoSuchRank {
                dest,
                size: self.size(),
            })?;
        tx.send(Envelope {
            source: self.rank,
            message,
        })
        .map_err(|_| FarmError::Disconnected { rank: dest })
    }

    fn recv_any(&self) -> Result<Envelope, FarmError> {
        self.inbox
            .recv()
            .map_err(|_| FarmError::Disconnected { rank: self.rank })
    }
}
