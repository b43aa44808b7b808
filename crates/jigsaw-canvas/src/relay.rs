//! Figure mapping shared between a canvas and the hook it installs in
//! its puzzle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use jigsaw_core::PieceKey;
use jigsaw_puzzle::Signal;

use crate::event::{ConnectEvent, ConnectListener, DisconnectEvent, DisconnectListener};

pub(crate) type SharedRelay<F> = Rc<RefCell<Relay<F>>>;

/// Figures by key plus the canvas listeners that receive them.
pub(crate) struct Relay<F> {
    pub(crate) figures: IndexMap<PieceKey, F>,
    connect: Vec<ConnectListener<F>>,
    disconnect: Vec<DisconnectListener<F>>,
}

impl<F> Default for Relay<F> {
    fn default() -> Self {
        Self {
            figures: IndexMap::new(),
            connect: Vec::new(),
            disconnect: Vec::new(),
        }
    }
}

impl<F> Relay<F> {
    pub(crate) fn on_connect(&mut self, listener: ConnectListener<F>) {
        self.connect.push(listener);
    }

    pub(crate) fn on_disconnect(&mut self, listener: DisconnectListener<F>) {
        self.disconnect.push(listener);
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.connect.len() + self.disconnect.len()
    }

    /// Resolve the figures named by `signal` and notify listeners in
    /// subscription order.
    pub(crate) fn dispatch(&mut self, signal: &Signal) {
        let Self {
            figures,
            connect,
            disconnect,
        } = self;
        match signal {
            Signal::Connect {
                piece,
                piece_key,
                target,
                target_key,
                side,
            } => {
                let event = ConnectEvent {
                    piece: *piece,
                    piece_key,
                    figure: figures.get(piece_key),
                    target: *target,
                    target_key,
                    target_figure: figures.get(target_key),
                    side: *side,
                };
                for listener in connect.iter_mut() {
                    listener(&event);
                }
            }
            Signal::Disconnect {
                piece,
                piece_key,
                neighbor,
                neighbor_key,
                side,
            } => {
                let event = DisconnectEvent {
                    piece: *piece,
                    piece_key,
                    figure: figures.get(piece_key),
                    neighbor: *neighbor,
                    neighbor_key,
                    neighbor_figure: figures.get(neighbor_key),
                    side: *side,
                };
                for listener in disconnect.iter_mut() {
                    listener(&event);
                }
            }
        }
    }
}

impl<F> fmt::Debug for Relay<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relay")
            .field("figures", &self.figures.len())
            .field("connect", &self.connect.len())
            .field("disconnect", &self.disconnect.len())
            .finish()
    }
}
