//! Interactive terminal permission prompt

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use colored::Colorize;
use tokio::sync::{oneshot, Mutex as AsyncMutex};

use crate::application::ports::{Capability, PermissionFacility};
use crate::domain::error::PermissionError;

/// Routes the next line the user types to a waiting prompt.
///
/// The screen owns stdin; while a prompt is waiting, the screen offers each
/// line here first and only treats it as a command if nobody took it.
#[derive(Clone, Default)]
pub struct AnswerSlot {
    waiting: Arc<Mutex<Option<oneshot::Sender<String>>>>,
}

impl AnswerSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a prompt is waiting for an answer
    pub fn is_waiting(&self) -> bool {
        self.waiting
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Offer a line of input.
    ///
    /// # Returns
    /// None if a waiting prompt consumed the line, otherwise the line itself
    pub fn offer(&self, line: String) -> Option<String> {
        let waiting = self
            .waiting
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        match waiting {
            Some(tx) => match tx.send(line) {
                Ok(()) => None,
                Err(line) => Some(line),
            },
            None => Some(line),
        }
    }

    /// Wait for the next offered line. None if the slot was abandoned.
    async fn next_answer(&self) -> Option<String> {
        let (tx, rx) = oneshot::channel();
        *self.waiting.lock().unwrap_or_else(|e| e.into_inner()) = Some(tx);
        rx.await.ok()
    }
}

/// Permission facility that asks the user on the terminal.
///
/// A grant is remembered for the rest of the process. Only one question is
/// on screen at a time; concurrent requests queue behind it and reuse a
/// grant given meanwhile.
pub struct TerminalPermissionPrompt {
    answers: AnswerSlot,
    granted: AtomicBool,
    asking: AsyncMutex<()>,
}

impl TerminalPermissionPrompt {
    /// Create a prompt reading answers from `answers`
    pub fn new(answers: AnswerSlot) -> Self {
        Self {
            answers,
            granted: AtomicBool::new(false),
            asking: AsyncMutex::new(()),
        }
    }

    fn is_yes(answer: &str) -> bool {
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

#[async_trait]
impl PermissionFacility for TerminalPermissionPrompt {
    async fn check_granted(&self, _capability: Capability) -> Result<bool, PermissionError> {
        Ok(self.granted.load(Ordering::SeqCst))
    }

    async fn request(&self, capability: Capability) -> Result<bool, PermissionError> {
        let _asking = self.asking.lock().await;
        if self.granted.load(Ordering::SeqCst) {
            return Ok(true);
        }

        eprintln!(
            "{} Allow Voice Recorder to {}? [y/N]",
            "?".yellow().bold(),
            capability.description()
        );

        let answer = self.answers.next_answer().await.ok_or_else(|| {
            PermissionError::CheckFailed("input closed before an answer was given".to_string())
        })?;

        let granted = Self::is_yes(&answer);
        if granted {
            self.granted.store(true, Ordering::SeqCst);
        }
        Ok(granted)
    }
}
