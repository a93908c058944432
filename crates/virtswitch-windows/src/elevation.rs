//! Elevation check for the current process.
//!
//! Reads `TokenElevation` from the process token. This is a pure
//! predicate: no side effects, no caching — privilege cannot change
//! within a process lifetime, but re-deriving is harmless.

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::Security::{
    GetTokenInformation, TOKEN_ELEVATION, TOKEN_QUERY, TokenElevation,
};
use windows::Win32::System::Threading::{GetCurrentProcess, OpenProcessToken};

/// Returns `true` if the current process runs with administrative
/// rights. Every failure path returns `false`.
pub fn is_elevated() -> bool {
    let mut token = HANDLE::default();
    // SAFETY: OpenProcessToken opens the access token of our own
    // process. On success the token handle is valid and closed below.
    let opened =
        unsafe { OpenProcessToken(GetCurrentProcess(), TOKEN_QUERY, &mut token) };
    if opened.is_err() {
        return false;
    }

    let mut elevation = TOKEN_ELEVATION::default();
    let mut returned = 0u32;
    // SAFETY: GetTokenInformation fills the TOKEN_ELEVATION struct; we
    // pass its exact size and a valid out-pointer.
    let queried = unsafe {
        GetTokenInformation(
            token,
            TokenElevation,
            Some((&raw mut elevation).cast()),
            std::mem::size_of::<TOKEN_ELEVATION>() as u32,
            &mut returned,
        )
    };

    // SAFETY: the token handle was opened above and is closed exactly once.
    unsafe {
        let _ = CloseHandle(token);
    }

    queried.is_ok() && elevation.TokenIsElevated != 0
}
