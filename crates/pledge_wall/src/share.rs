use std::{io::Write, process::Stdio};

use async_trait::async_trait;
use parking_lot::Mutex;
use shared::{
    error::{PledgeError, ShareError},
    view::{ShareMessage, ShareOutcome},
};
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{info, warn};

#[async_trait]
pub trait ShareProvider: Send + Sync {
    fn name(&self) -> &str;
    async fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, ShareError>;
}

/// Hands the message to an external share program. The clipboard text is
/// written to its stdin and the title exported as `PLEDGE_SHARE_TITLE`.
pub struct NativeShare {
    command: Option<Vec<String>>,
}

impl NativeShare {
    pub fn new(command: Option<Vec<String>>) -> Self {
        Self {
            command: command.filter(|argv| !argv.is_empty()),
        }
    }

    fn unavailable(&self) -> ShareError {
        ShareError::Unavailable {
            provider: self.name().to_string(),
        }
    }

    fn rejected(&self, reason: impl Into<String>) -> ShareError {
        ShareError::Rejected {
            provider: self.name().to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ShareProvider for NativeShare {
    fn name(&self) -> &str {
        "native share"
    }

    async fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, ShareError> {
        let Some((program, args)) = self.command.as_ref().and_then(|argv| argv.split_first())
        else {
            return Err(self.unavailable());
        };

        let mut child = Command::new(program)
            .args(args)
            .env("PLEDGE_SHARE_TITLE", &message.title)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|_| self.unavailable())?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(message.clipboard_text().as_bytes())
                .await
                .map_err(|err| self.rejected(err.to_string()))?;
        }

        let status = child
            .wait()
            .await
            .map_err(|err| self.rejected(err.to_string()))?;
        if status.success() {
            Ok(ShareOutcome::Shared)
        } else {
            Err(self.rejected(format!("share command exited with {status}")))
        }
    }
}

/// Copies the message with `arboard`. On Linux the clipboard is only served
/// while its owner lives, so the copy blocks until another application (a
/// clipboard manager, or the next copy) takes the contents over.
#[derive(Debug, Default)]
pub struct ClipboardShare;

const CLIPBOARD: &str = "clipboard";

#[async_trait]
impl ShareProvider for ClipboardShare {
    fn name(&self) -> &str {
        CLIPBOARD
    }

    async fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, ShareError> {
        let text = message.clipboard_text();
        tokio::task::spawn_blocking(move || copy_to_clipboard(text))
            .await
            .map_err(|err| ShareError::Rejected {
                provider: CLIPBOARD.to_string(),
                reason: err.to_string(),
            })??;
        Ok(ShareOutcome::CopiedToClipboard)
    }
}

fn copy_to_clipboard(text: String) -> Result<(), ShareError> {
    let mut clipboard = arboard::Clipboard::new().map_err(|_| ShareError::Unavailable {
        provider: CLIPBOARD.to_string(),
    })?;

    #[cfg(target_os = "linux")]
    let copied = {
        use arboard::SetExtLinux;
        clipboard.set().wait().text(text)
    };
    #[cfg(not(target_os = "linux"))]
    let copied = clipboard.set_text(text);

    copied.map_err(|err| ShareError::Rejected {
        provider: CLIPBOARD.to_string(),
        reason: err.to_string(),
    })
}

/// Last resort: show the text so the user can copy it by hand.
pub struct ManualPrompt<W> {
    out: Mutex<W>,
}

impl<W> ManualPrompt<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

#[async_trait]
impl<W> ShareProvider for ManualPrompt<W>
where
    W: Write + Send,
{
    fn name(&self) -> &str {
        "manual prompt"
    }

    async fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, ShareError> {
        let mut out = self.out.lock();
        writeln!(out, "Copy this message to share: {}", message.clipboard_text())
            .and_then(|()| out.flush())
            .map_err(|err| ShareError::Rejected {
                provider: self.name().to_string(),
                reason: err.to_string(),
            })?;
        Ok(ShareOutcome::ManualCopy)
    }
}

/// Providers tried in rank order until one succeeds.
#[derive(Default)]
pub struct ShareChain {
    providers: Vec<Box<dyn ShareProvider>>,
}

impl ShareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Native share, then clipboard, then a manual copy prompt on `out`.
    pub fn standard<W>(share_command: Option<Vec<String>>, out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::new()
            .with_provider(NativeShare::new(share_command))
            .with_provider(ClipboardShare)
            .with_provider(ManualPrompt::new(out))
    }

    pub fn with_provider(mut self, provider: impl ShareProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn share(&self, message: &ShareMessage) -> Result<ShareOutcome, PledgeError> {
        let mut failures = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            match provider.share(message).await {
                Ok(outcome) => {
                    info!(provider = provider.name(), ?outcome, "pledge shared");
                    return Ok(outcome);
                }
                Err(err) => {
                    warn!("share fallback: {err}");
                    failures.push(err.to_string());
                }
            }
        }

        if failures.is_empty() {
            return Err(PledgeError::SharingUnavailable(
                "no share providers configured".into(),
            ));
        }
        Err(PledgeError::SharingUnavailable(failures.join("; ")))
    }
}

#[cfg(test)]
#[path = "tests/share_tests.rs"]
mod tests;
