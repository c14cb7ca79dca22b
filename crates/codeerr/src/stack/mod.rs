//! Call-stack capture for error-chain nodes.
//!
//! A [`Stack`] holds raw instruction pointers only. Symbol names, files and
//! lines are resolved when the stack is rendered, so the common path
//! (error created, propagated, dropped) never pays for symbolication.
//!
//! ```text
//! Stack::capture(skip)
//!       │  unwind, keep ip only
//!       ▼
//! [ip, ip, ip, ...]            ≤ config::stack_depth() entries
//!       │  only on `{:#}` / `{:#?}`
//!       ▼
//! "\nfunction\n\tfile:line" per frame
//! ```

use core::fmt;

cfg_if::cfg_if! {
    if #[cfg(feature = "stack")] {
        mod unwind;
        use unwind as imp;
    } else {
        mod disabled;
        use disabled as imp;
    }
}

/// A single captured frame.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Frame(usize);

impl Frame {
    /// Raw instruction pointer.
    #[inline]
    pub const fn ip(&self) -> usize {
        self.0
    }

    /// Demangled function name, resolved on demand.
    pub fn function(&self) -> Option<String> {
        self.symbol().function
    }

    /// Source file, resolved on demand.
    pub fn file(&self) -> Option<String> {
        self.symbol().file
    }

    /// Source line, resolved on demand.
    pub fn line(&self) -> Option<u32> {
        self.symbol().line
    }

    fn symbol(&self) -> Symbol {
        imp::resolve(self.0)
    }
}

/// `function\n\tfile:line`, with `unknown` for anything unresolved.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sym = self.symbol();
        write!(
            f,
            "{}\n\t{}:{}",
            sym.function.as_deref().unwrap_or("unknown"),
            sym.file.as_deref().unwrap_or("unknown"),
            sym.line.unwrap_or(0),
        )
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:#x})", self.0)
    }
}

/// What a frame resolves to. Any part may be missing.
#[derive(Debug, Default, Clone)]
pub(crate) struct Symbol {
    pub function: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

/// Immutable sequence of frames captured at one point.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stack {
    frames: Box<[Frame]>,
}

impl Stack {
    /// Capture the caller's stack.
    ///
    /// Frames belonging to the capture machinery are dropped, then `skip`
    /// more. At most [`crate::config::stack_depth`] frames are kept.
    #[inline(never)]
    pub fn capture(skip: usize) -> Stack {
        let depth = crate::config::stack_depth();
        if depth == 0 {
            return Stack::default();
        }
        let anchor = Stack::capture as fn(usize) -> Stack as usize;
        let ips = imp::trace(anchor, skip, depth);
        Stack {
            frames: ips.into_iter().map(Frame).collect(),
        }
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Detailed form: every frame on its own `\n`-prefixed block.
impl fmt::Display for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for frame in self.frames.iter() {
            write!(f, "\n{}", frame)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.frames.iter()).finish()
    }
}
