use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::code::CodeError;
use crate::stack::Stack;

/// A node of an error chain.
///
/// `Error` is a cheap-to-clone handle. Clones share the node, and equality
/// is identity: two handles are equal only if they point at the same node.
///
/// Five internal representations, one external API:
///
/// - **Fundamental**: message + stack. A root; created by [`crate::new`].
/// - **WithStack**: cause + stack. Text is the cause's text.
/// - **WithMessage**: cause + message. No stack of its own.
/// - **WithCode**: optional cause + message + HTTP/business code.
/// - **Foreign**: any other `std::error::Error`, held so that causes and
///   roots share one type. Not chain-typed.
///
/// Users never see `Node`; they match on [`Kind`].
///
/// # Formatting
///
/// | Format   | Output |
/// |----------|--------|
/// | `{}`     | text of the outermost message |
/// | `{:?}`   | the same text, quoted and escaped |
/// | `{:#}`   | detailed: messages and stacks of the whole chain |
/// | `{:#?}`  | same as `{:#}` |
///
/// `{:?}` shows no causes or stacks, and neither does the panic message of
/// `Result::unwrap` or `expect`. Print the error with `{:#}` (or
/// `{:#?}`) when the chain matters.
#[derive(Clone)]
pub struct Error {
    node: Arc<Node>,
}

enum Node {
    Fundamental { message: String, stack: Stack },
    WithStack { cause: Error, stack: Stack },
    WithMessage { cause: Error, message: String },
    WithCode(CodeError),
    Foreign(Box<dyn StdError + Send + Sync>),
}

/// Discriminant of an [`Error`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Fundamental,
    WithStack,
    WithMessage,
    WithCode,
    Foreign,
}

impl Kind {
    /// `true` for the four variants built by this crate.
    #[inline]
    pub const fn is_chain(self) -> bool {
        !matches!(self, Kind::Foreign)
    }

    /// `true` for variants that wrap a cause.
    #[inline]
    pub const fn is_wrapper(self) -> bool {
        matches!(self, Kind::WithStack | Kind::WithMessage | Kind::WithCode)
    }
}

/// Rendering modes, see [`Error::format`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// `{}`
    Plain,
    /// `{:?}`
    Quoted,
    /// `{:#}`
    Detailed,
}

// ── Constructors ──────────────────────────────────────────────────

impl Error {
    fn from_node(node: Node) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    pub(crate) fn fundamental(message: String, stack: Stack) -> Self {
        Self::from_node(Node::Fundamental { message, stack })
    }

    pub(crate) fn stacked(cause: Error, stack: Stack) -> Self {
        Self::from_node(Node::WithStack { cause, stack })
    }

    pub(crate) fn annotated(cause: Error, message: String) -> Self {
        Self::from_node(Node::WithMessage { cause, message })
    }

    pub(crate) fn coded(code: CodeError) -> Self {
        Self::from_node(Node::WithCode(code))
    }

    /// Hold a non-chain error.
    ///
    /// No stack is captured here; the first `wrap`/`with_code` adds one.
    /// Passing an `Error` returns it unchanged.
    pub fn foreign<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::from_boxed(Box::new(err))
    }

    /// Like [`Error::foreign`] for an already boxed error.
    pub fn from_boxed(err: Box<dyn StdError + Send + Sync>) -> Self {
        match err.downcast::<Error>() {
            Ok(chain) => *chain,
            Err(other) => Self::from_node(Node::Foreign(other)),
        }
    }
}

// ── Accessors ─────────────────────────────────────────────────────

impl Error {
    #[inline]
    pub fn kind(&self) -> Kind {
        match &*self.node {
            Node::Fundamental { .. } => Kind::Fundamental,
            Node::WithStack { .. } => Kind::WithStack,
            Node::WithMessage { .. } => Kind::WithMessage,
            Node::WithCode(_) => Kind::WithCode,
            Node::Foreign(_) => Kind::Foreign,
        }
    }

    #[inline]
    pub fn is_chain(&self) -> bool {
        self.kind().is_chain()
    }

    /// The wrapped error. `None` for roots and for a code attached to nothing.
    pub fn cause(&self) -> Option<&Error> {
        match &*self.node {
            Node::WithStack { cause, .. } | Node::WithMessage { cause, .. } => Some(cause),
            Node::WithCode(code) => code.cause(),
            Node::Fundamental { .. } | Node::Foreign(_) => None,
        }
    }

    /// Iterate from this node towards the root.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// Follow causes through wrapper nodes.
    ///
    /// Returns the first Fundamental or Foreign node, or `None` when the
    /// chain ends in a code with no cause.
    pub fn root_cause(&self) -> Option<&Error> {
        let mut current = self;
        while current.kind().is_wrapper() {
            current = current.cause()?;
        }
        Some(current)
    }

    /// Outermost node of `kind`, this one included.
    pub fn find(&self, kind: Kind) -> Option<&Error> {
        self.chain().find(|e| e.kind() == kind)
    }

    /// The stack captured by this node, if it has one.
    pub fn stack(&self) -> Option<&Stack> {
        match &*self.node {
            Node::Fundamental { stack, .. } | Node::WithStack { stack, .. } => Some(stack),
            _ => None,
        }
    }

    /// Every stack captured along the chain, outermost first.
    pub fn stacks(&self) -> impl Iterator<Item = &Stack> {
        self.chain().filter_map(Error::stack)
    }

    /// The code carried by this node, if it is a WithCode node.
    pub fn code(&self) -> Option<&CodeError> {
        match &*self.node {
            Node::WithCode(code) => Some(code),
            _ => None,
        }
    }

    /// The foreign error held by this node.
    pub fn as_foreign(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        match &*self.node {
            Node::Foreign(err) => Some(err.as_ref()),
            _ => None,
        }
    }

    /// First foreign error of type `E` anywhere in the chain.
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: StdError + 'static,
    {
        self.chain()
            .find_map(|e| e.as_foreign().and_then(|f| f.downcast_ref::<E>()))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Error) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Newest message along the chain: a code or annotation message wins,
    /// stacks are looked through, anything else gives its text.
    pub(crate) fn outer_message(&self) -> String {
        match &*self.node {
            Node::WithCode(code) => code.message.clone(),
            Node::WithMessage { message, .. } => message.clone(),
            Node::WithStack { cause, .. } => cause.outer_message(),
            _ => self.to_string(),
        }
    }

    pub fn format(&self, verb: Verb) -> String {
        match verb {
            Verb::Plain => format!("{}", self),
            Verb::Quoted => format!("{:?}", self),
            Verb::Detailed => format!("{:#}", self),
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────

impl Error {
    fn write_text(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.node {
            Node::Fundamental { message, .. } | Node::WithMessage { message, .. } => {
                f.write_str(message)
            }
            Node::WithStack { cause, .. } => cause.write_text(f),
            Node::WithCode(code) => f.write_str(&code.message),
            Node::Foreign(err) => write!(f, "{}", err),
        }
    }

    fn write_detailed(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.node {
            Node::Fundamental { message, stack } => {
                f.write_str(message)?;
                write!(f, "{}", stack)
            }
            Node::WithStack { cause, stack } => {
                cause.write_detailed(f)?;
                write!(f, "{}", stack)
            }
            Node::WithMessage { cause, message } => {
                writeln!(f, "{}", message)?;
                cause.write_detailed(f)
            }
            Node::WithCode(code) => {
                writeln!(f, "{}", code.message)?;
                match code.cause() {
                    Some(cause) => cause.write_detailed(f),
                    None => Ok(()),
                }
            }
            Node::Foreign(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_detailed(f)
        } else {
            self.write_text(f)
        }
    }
}

/// Quoted outer text; the alternate form is the detailed chain.
impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.write_detailed(f)
        } else {
            write!(f, "{:?}", self.to_string())
        }
    }
}

// ── std::error::Error ─────────────────────────────────────────────

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &*self.node {
            Node::Foreign(err) => err.source(),
            _ => self.cause().map(|c| c as &(dyn StdError + 'static)),
        }
    }
}

impl PartialEq for Error {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Error {}

/// Iterator over a cause chain, see [`Error::chain`].
#[derive(Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<&'a Error> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}
