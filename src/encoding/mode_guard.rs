//! Save/restore stack for the ambient text interpretation mode.
//!
//! Some hosts overload length and substring counting with a multi-byte-aware
//! interpretation: under UTF-8 a four-byte sequence counts as one unit. Code
//! that needs byte counts brackets its work with [`enter`]/[`exit`] (or the
//! scoped [`with_byte_safe_encoding`]), which forces the byte-transparent
//! ISO-8859-1 mode and restores the previous mode afterwards.
//!
//! When the host never overloads length semantics (see
//! [`NormalizerConfig::length_overload`](crate::config::NormalizerConfig)) every
//! call here is a no-op.
//!
//! The state exists in two forms:
//! - [`TextEnvironment`], a plain value that callers can own and pass around;
//! - a per-thread ambient environment, initialised from [`crate::config::get`],
//!   driven by the free functions of this module.
//!
//! # Examples
//!
//! ```
//! use strnorm::encoding::mode_guard::{self, TextEnvironment};
//!
//! mode_guard::install(TextEnvironment::new(encoding_rs::UTF_8, true));
//!
//! let len = mode_guard::with_byte_safe_encoding(|| mode_guard::str_len("né".as_bytes()));
//! assert_eq!(len, 3);
//! assert_eq!(mode_guard::str_len("né".as_bytes()), 2);
//! assert_eq!(mode_guard::active_mode(), encoding_rs::UTF_8);
//! ```

use std::cell::RefCell;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

use encoding_rs::Encoding;
use log::{trace, warn};

use crate::config::{self, NormalizerConfig};

/// The byte-transparent interpretation mode (label "ISO-8859-1").
///
/// `encoding_rs` follows WHATWG and resolves latin1 labels to windows-1252,
/// which is single-byte: every byte is exactly one unit.
#[inline]
pub fn byte_safe_encoding() -> &'static Encoding {
    encoding_rs::WINDOWS_1252
}

/// An interpretation mode together with the stack of modes saved by `enter`.
#[derive(Debug, Clone)]
pub struct TextEnvironment {
    active: &'static Encoding,
    length_overload: bool,
    saved: Vec<&'static Encoding>,
}

impl Default for TextEnvironment {
    fn default() -> Self {
        Self::new(encoding_rs::UTF_8, false)
    }
}

impl TextEnvironment {
    pub fn new(active: &'static Encoding, length_overload: bool) -> Self {
        Self {
            active,
            length_overload,
            saved: Vec::new(),
        }
    }

    /// Builds the environment described by `config`. An unknown encoding label
    /// falls back to UTF-8.
    pub fn from_config(config: &NormalizerConfig) -> Self {
        let active = match config.ambient_encoding() {
            Ok(encoding) => encoding,
            Err(e) => {
                warn!("{}; using UTF-8", e);
                encoding_rs::UTF_8
            }
        };
        Self::new(active, config.length_overload)
    }

    #[inline]
    pub fn active(&self) -> &'static Encoding {
        self.active
    }

    /// Changes the active mode, as the host would. Saved modes are untouched.
    pub fn set_active(&mut self, encoding: &'static Encoding) {
        self.active = encoding;
    }

    #[inline]
    pub fn length_overload(&self) -> bool {
        self.length_overload
    }

    /// Number of modes currently saved.
    #[inline]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Saves the active mode and switches to the byte-transparent one.
    /// No-op unless length semantics are overloaded.
    pub fn enter(&mut self) {
        if !self.length_overload {
            return;
        }
        trace!("Saving interpretation mode {}", self.active.name());
        self.saved.push(self.active);
        self.active = byte_safe_encoding();
    }

    /// Restores the most recently saved mode. An unmatched call does nothing.
    pub fn exit(&mut self) {
        match self.saved.pop() {
            Some(previous) => {
                trace!("Restoring interpretation mode {}", previous.name());
                self.active = previous;
            }
            None => trace!("No saved interpretation mode to restore"),
        }
    }

    /// Length of `bytes` as the host counts it under the active mode.
    ///
    /// Without overloading, or under a single-byte mode, this is the byte
    /// count. Otherwise it is the number of decoded characters, malformed
    /// sequences counting as one replacement character each.
    pub fn str_len(&self, bytes: &[u8]) -> usize {
        if !self.length_overload || self.active.is_single_byte() {
            return bytes.len();
        }
        let (decoded, _had_errors) = self.active.decode_without_bom_handling(bytes);
        decoded.chars().count()
    }

    /// Enters the byte-transparent mode until the returned guard is dropped.
    pub fn byte_safe(&mut self) -> EnvironmentGuard<'_> {
        self.enter();
        EnvironmentGuard { env: self }
    }
}

/// Scoped byte-transparent region over an owned [`TextEnvironment`].
pub struct EnvironmentGuard<'a> {
    env: &'a mut TextEnvironment,
}

impl Deref for EnvironmentGuard<'_> {
    type Target = TextEnvironment;

    fn deref(&self) -> &TextEnvironment {
        &*self.env
    }
}

impl DerefMut for EnvironmentGuard<'_> {
    fn deref_mut(&mut self) -> &mut TextEnvironment {
        &mut *self.env
    }
}

impl Drop for EnvironmentGuard<'_> {
    fn drop(&mut self) {
        self.env.exit();
    }
}

thread_local! {
    static AMBIENT: RefCell<TextEnvironment> =
        RefCell::new(TextEnvironment::from_config(config::get()));
}

/// Saves the thread's active mode and switches to the byte-transparent one.
pub fn enter() {
    AMBIENT.with(|env| env.borrow_mut().enter());
}

/// Restores the thread's most recently saved mode, if any.
pub fn exit() {
    AMBIENT.with(|env| env.borrow_mut().exit());
}

/// The thread's active interpretation mode.
pub fn active_mode() -> &'static Encoding {
    AMBIENT.with(|env| env.borrow().active())
}

/// Changes the thread's active interpretation mode.
pub fn set_active_mode(encoding: &'static Encoding) {
    AMBIENT.with(|env| env.borrow_mut().set_active(encoding));
}

/// Number of modes saved on the thread's stack.
pub fn depth() -> usize {
    AMBIENT.with(|env| env.borrow().depth())
}

/// Length of `bytes` under the thread's active mode. See [`TextEnvironment::str_len`].
pub fn str_len(bytes: &[u8]) -> usize {
    AMBIENT.with(|env| env.borrow().str_len(bytes))
}

/// Replaces the thread's environment, returning the previous one.
pub fn install(env: TextEnvironment) -> TextEnvironment {
    AMBIENT.with(|ambient| std::mem::replace(&mut *ambient.borrow_mut(), env))
}

/// Holds the thread's byte-transparent mode until dropped.
///
/// Tied to the creating thread, since the state it restores is thread-local.
pub struct ByteSafeGuard {
    _not_send: PhantomData<*const ()>,
}

impl ByteSafeGuard {
    pub fn new() -> Self {
        enter();
        Self { _not_send: PhantomData }
    }
}

impl Default for ByteSafeGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ByteSafeGuard {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = AMBIENT.try_with(|env| env.borrow_mut().exit());
    }
}

/// Runs `f` with byte-transparent length semantics, restoring the previous
/// mode afterwards, including when `f` panics.
pub fn with_byte_safe_encoding<R, F>(f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ByteSafeGuard::new();
    f()
}
