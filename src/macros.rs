/// Declares a fail point.
///
/// With the `failpoints` feature enabled, this forwards to
/// [`fail::fail_point!`](https://docs.rs/fail), making it possible for tests
/// to inject errors at that location. Without the feature it expands to
/// nothing.
///
/// ```rust,ignore
/// fn seek(&mut self, target: DocId) -> io::Result<CursorPosition> {
///     fail_point!("VecPostings::seek", |msg: Option<String>| {
///         Err(io::Error::new(io::ErrorKind::Other, format!("{:?}", msg)))
///     });
///     // ...
/// }
/// ```
#[cfg(feature = "failpoints")]
macro_rules! fail_point {
    ($($tt:tt)*) => {
        fail::fail_point!($($tt)*)
    };
}

#[cfg(not(feature = "failpoints"))]
macro_rules! fail_point {
    ($($tt:tt)*) => {};
}
