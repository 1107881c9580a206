use crate::domain::ports::Navigator;
use crate::utils::error::Result;
use std::io;

type Opener = fn(&str) -> io::Result<()>;

/// Hands a URL to the platform's default handler so the mail client picks up
/// `mailto:` links.
///
/// `open::that` waits for the launcher and reports a non-zero exit, so a
/// missing `xdg-open` surfaces as an error instead of a false "opening" status.
#[derive(Debug, Clone)]
pub struct SystemNavigator {
    opener: Opener,
}

impl SystemNavigator {
    pub fn new() -> Self {
        Self {
            opener: |url| open::that(url),
        }
    }

    #[cfg(test)]
    fn with_opener(opener: Opener) -> Self {
        Self { opener }
    }
}

impl Default for SystemNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for SystemNavigator {
    fn open(&self, url: &str) -> Result<()> {
        tracing::debug!("Opening link with system handler");
        (self.opener)(url)?;
        Ok(())
    }
}

/// Prints the link instead of opening it, for headless environments.
#[derive(Debug, Clone, Default)]
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&self, url: &str) -> Result<()> {
        println!("{}", url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ContactError, ErrorCategory};
    use std::sync::Mutex;

    static OPENED: Mutex<Vec<String>> = Mutex::new(Vec::new());

    #[test]
    fn test_link_reaches_opener_unsplit() {
        let navigator = SystemNavigator::with_opener(|url| {
            OPENED.lock().unwrap().push(url.to_string());
            Ok(())
        });
        let link = "mailto:me@x.dev?subject=Website%20inquiry%20from%20A&body=Hi";

        navigator.open(link).unwrap();

        // 整段連結（含 &body=）必須一次交給 opener
        assert_eq!(OPENED.lock().unwrap().as_slice(), [link.to_string()]);
    }

    #[test]
    fn test_launcher_failure_is_reported() {
        let navigator = SystemNavigator::with_opener(|_| {
            Err(io::Error::new(
                io::ErrorKind::Other,
                "Launcher \"xdg-open\" failed with ExitStatus(1)",
            ))
        });

        let err = navigator.open("mailto:me@x.dev").unwrap_err();

        assert!(matches!(err, ContactError::IoError(_)));
        assert_eq!(err.category(), ErrorCategory::Unexpected);
    }
}
