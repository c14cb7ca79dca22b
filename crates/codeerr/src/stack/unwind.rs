//! Unwinding through the `backtrace` crate.
//!
//! Capture only walks frames and records instruction pointers. The anchor
//! (address of `Stack::capture`) marks where caller frames begin; every
//! frame up to and including it belongs to the capture machinery.

use core::ffi::c_void;

use super::Symbol;

/// Upper bound on frames walked while the anchor has not been seen.
const MAX_SCAN: usize = 256;

pub(super) fn trace(anchor: usize, skip: usize, depth: usize) -> Vec<usize> {
    let mut ips: Vec<usize> = Vec::with_capacity(depth + skip + 8);
    let mut start: Option<usize> = None;

    backtrace::trace(|frame| {
        if start.is_none() && frame.symbol_address() as usize == anchor {
            start = Some(ips.len() + 1);
        }
        ips.push(frame.ip() as usize);
        match start {
            Some(s) => ips.len() < s + skip + depth,
            None => ips.len() < MAX_SCAN,
        }
    });

    // Anchor not found (no unwind info): keep everything rather than nothing.
    let first = start.unwrap_or(0) + skip;
    ips.into_iter().skip(first).take(depth).collect()
}

pub(super) fn resolve(ip: usize) -> Symbol {
    let mut out = Symbol::default();
    // Captured ips are return addresses; look up the call instruction.
    let addr = ip.saturating_sub(1);
    backtrace::resolve(addr as *mut c_void, |sym| {
        if out.function.is_none() {
            out.function = sym.name().map(|n| n.to_string());
        }
        if out.file.is_none() {
            out.file = sym.filename().map(|p| p.display().to_string());
        }
        if out.line.is_none() {
            out.line = sym.lineno();
        }
    });
    out
}
