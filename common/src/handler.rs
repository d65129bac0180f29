//! [`Handler`] abstraction.

use std::future::Future;

/// Executable handler of `Args`.
///
/// Commands, queries and background tasks of the booking system are all
/// expressed as [`Handler`] implementations, differing only in the alias
/// they are referred by.
pub trait Handler<Args = ()> {
    /// Type of a successful execution result.
    type Ok;

    /// Type of an execution error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
