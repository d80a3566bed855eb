/// Browser console logging for the wasm host; no-ops in native and test builds.
/// Called as `diag::console_warn!("msg: {e}")` from sibling modules.

#[cfg(target_family = "wasm")]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        let message = format!($($arg)*);
        tracing::warn!("{message}");
        web_sys::console::warn_1(&message.into())
    }};
}

#[cfg(not(target_family = "wasm"))]
macro_rules! console_warn {
    ($($arg:tt)*) => {
        if false { let _ = format_args!($($arg)*); }
    };
}

pub(crate) use console_warn;
