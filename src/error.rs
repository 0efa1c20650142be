/// Faults raised by the runtime core that are not catchable by script code.
///
/// Language-level throws (a `TypeError` object, or any other thrown value) travel through
/// `EvalError::Throw` instead; this type only carries binding contract violations and the final
/// "uncaught" report once a thrown value escapes to the host.
#[derive(thiserror::Error, Debug)]
pub enum JSError {
    #[error("Binding '{name}' is already declared in this environment record")]
    DuplicateBinding { name: String },

    #[error("Binding '{name}' does not exist in this environment record")]
    BindingNotFound { name: String },

    #[error("Immutable binding '{name}' is already initialized")]
    BindingAlreadyInitialized { name: String },

    #[error("{operation} is not supported by {record} environment records")]
    UnsupportedBindingOperation { operation: &'static str, record: &'static str },

    #[error("Uncaught {message}")]
    Uncaught { message: String },
}

impl JSError {
    pub fn message(&self) -> String {
        match self {
            JSError::Uncaught { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Raise a `TypeError` object through the language throw channel.
#[macro_export]
macro_rules! raise_type_error {
    ($cx:expr, $($arg:tt)+) => {
        $cx.throw_error($crate::ErrorKind::TypeError, &format!($($arg)+))
    };
}

/// Raise a `ReferenceError` object through the language throw channel.
#[macro_export]
macro_rules! raise_reference_error {
    ($cx:expr, $($arg:tt)+) => {
        $cx.throw_error($crate::ErrorKind::ReferenceError, &format!($($arg)+))
    };
}

#[macro_export]
macro_rules! raise_range_error {
    ($cx:expr, $($arg:tt)+) => {
        $cx.throw_error($crate::ErrorKind::RangeError, &format!($($arg)+))
    };
}
