//! Message construction errors.  Routing failures are not errors: an
//! unresolvable token degrades to a warning and partial delivery.

#[derive(thiserror::Error, Debug)]
pub enum MessageError {
    #[error("message addressed to an empty recipient list")]
    NoRecipients,

    #[error("message addressed to an empty name token")]
    EmptyToken,
}

pub type MessageResult<T> = Result<T, MessageError>;
