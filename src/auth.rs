//! Optional user confirmation gate in front of destructive actions.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::{BurrowError, Result};

/// Trait for authentication backends
pub trait Authenticator: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &'static str;

    /// Check if this backend can prompt on the current system
    fn is_available(&self) -> bool;

    /// Ask the user to approve an action described by `reason`.
    ///
    /// Returns `Ok(false)` when the user declines.
    fn authenticate(&self, reason: &str) -> Result<bool>;
}

/// Backend for platforms without a native prompt; approves everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuthenticator;

impl Authenticator for NoopAuthenticator {
    fn name(&self) -> &'static str {
        "none"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn authenticate(&self, reason: &str) -> Result<bool> {
        tracing::debug!(reason, "No platform authenticator; approving");
        Ok(true)
    }
}

/// Asks for a typed confirmation on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalAuthenticator;

impl Authenticator for TerminalAuthenticator {
    fn name(&self) -> &'static str {
        "terminal"
    }

    fn is_available(&self) -> bool {
        io::stdin().is_terminal() && io::stderr().is_terminal()
    }

    fn authenticate(&self, reason: &str) -> Result<bool> {
        let mut stderr = io::stderr();
        write!(stderr, "Authorize burrow to {reason}? [y/N] ").map_err(BurrowError::Prompt)?;
        stderr.flush().map_err(BurrowError::Prompt)?;

        let mut answer = String::new();
        io::stdin()
            .lock()
            .read_line(&mut answer)
            .map_err(BurrowError::Prompt)?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// First available backend in `candidates`, or [`NoopAuthenticator`].
pub fn select_authenticator(candidates: Vec<Box<dyn Authenticator>>) -> Box<dyn Authenticator> {
    for candidate in candidates {
        if candidate.is_available() {
            tracing::debug!(backend = candidate.name(), "Selected authenticator");
            return candidate;
        }
        tracing::debug!(backend = candidate.name(), "Authenticator unavailable");
    }
    Box::new(NoopAuthenticator)
}

/// Best authenticator available on this platform.
pub fn platform_authenticator() -> Box<dyn Authenticator> {
    select_authenticator(vec![Box::new(TerminalAuthenticator)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_approves() {
        let auth = NoopAuthenticator;
        assert!(auth.is_available());
        assert!(auth.authenticate("clean caches").unwrap());
    }

    struct Fixed {
        name: &'static str,
        available: bool,
    }

    impl Authenticator for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn authenticate(&self, _reason: &str) -> Result<bool> {
            Ok(false)
        }
    }

    #[test]
    fn test_unavailable_backends_are_skipped() {
        let auth = select_authenticator(vec![
            Box::new(Fixed { name: "absent", available: false }),
            Box::new(Fixed { name: "present", available: true }),
        ]);
        assert_eq!(auth.name(), "present");
    }

    #[test]
    fn test_falls_back_to_noop() {
        let auth = select_authenticator(vec![Box::new(Fixed {
            name: "absent",
            available: false,
        })]);
        assert_eq!(auth.name(), "none");
        assert!(auth.authenticate("clean caches").unwrap());
    }

    #[test]
    fn test_platform_authenticator_is_usable() {
        let auth = platform_authenticator();
        assert!(auth.is_available());
        assert!(!auth.name().is_empty());
    }
}
