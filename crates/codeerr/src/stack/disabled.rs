//! Capture disabled (`stack` feature off).
//!
//! Every capture is empty; nothing ever resolves.

use super::Symbol;

pub(super) fn trace(_anchor: usize, _skip: usize, _depth: usize) -> Vec<usize> {
    Vec::new()
}

pub(super) fn resolve(_ip: usize) -> Symbol {
    Symbol::default()
}
