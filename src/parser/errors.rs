use std::convert::From;
use std::error::Error;
use std::fmt;
use std::io;

pub type OpResult<T> = Result<T, OpError>;

macro_rules! impl_error {
    ( $from:ty, $to:ident ) => {
        impl From<$from> for OpError {
            fn from(err: $from) -> Self {
                OpError::new(OpErrorKind::$to).join_msg(&err.to_string())
            }
        }
    };
}

///
/// Broad category of an `OpError`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpErrorKind {
    IoError,
    /// malformed or truncated block bytes
    DecodeError,
    /// block could not be written out
    EncodeError,
    /// transaction index outside of the block
    OutOfRange,
}

impl fmt::Display for OpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpErrorKind::IoError => "I/O error",
            OpErrorKind::DecodeError => "decode error",
            OpErrorKind::EncodeError => "encode error",
            OpErrorKind::OutOfRange => "out of range",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpError {
    kind: OpErrorKind,
    message: String,
}

impl OpError {
    pub fn new(kind: OpErrorKind) -> Self {
        OpError {
            kind,
            message: String::new(),
        }
    }

    /// append a message, separated from earlier ones
    pub fn join_msg(mut self, msg: &str) -> Self {
        if !self.message.is_empty() {
            self.message.push_str(": ");
        }
        self.message.push_str(msg);
        self
    }

    #[inline]
    pub fn kind(&self) -> OpErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl Error for OpError {}

impl_error!(io::Error, IoError);
impl_error!(bitcoin::consensus::encode::Error, DecodeError);
