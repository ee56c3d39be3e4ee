use std::panic::Location;

#[macro_export]
macro_rules! check {
    ( $condition:expr, $error:expr ) => {
        if !$condition {
            return Err($error);
        }
    };
}

pub trait ResultExt<E> {
    type Ok;

    /// Log the error (with the caller's location) and turn the result into an option.
    fn log_err(self) -> Option<Self::Ok>;

    fn log_with_level(self, level: log::Level) -> Option<Self::Ok>;
}

impl<T, E> ResultExt<E> for Result<T, E>
where
    E: std::fmt::Debug,
{
    type Ok = T;

    #[track_caller]
    fn log_err(self) -> Option<T> {
        self.log_with_level(log::Level::Error)
    }

    #[track_caller]
    fn log_with_level(self, level: log::Level) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                log_error_with_caller(*Location::caller(), error, level);
                None
            }
        }
    }
}

fn log_error_with_caller<E>(caller: Location<'_>, error: E, level: log::Level)
where
    E: std::fmt::Debug,
{
    // `src/dispatcher.rs` -> `dispatcher`, so records can be filtered per module.
    let target = caller
        .file()
        .rsplit(['/', '\\'])
        .next()
        .and_then(|file| file.strip_suffix(".rs"))
        .unwrap_or(env!("CARGO_PKG_NAME"));

    log::logger().log(
        &log::Record::builder()
            .target(target)
            .module_path(Some(target))
            .args(format_args!("{error:?}"))
            .file(Some(caller.file()))
            .line(Some(caller.line()))
            .level(level)
            .build(),
    );
}
