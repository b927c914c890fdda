//! Command runners.
//!
//! Every runner writes human-readable output to `out`, failures to `err`, and
//! maps the outcome to a process exit code.

use std::io::{self, Write};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::args::{Command, ContactCommand, MessageCommand, SessionCommand};
use crate::{
    WhatsAppClient,
    domain::{
        ApiResponse, Options,
        validation::{format_to_individual_id, is_valid_whatsapp_number},
    },
    error::ClientError,
};

pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;

const CONTACT_PREVIEW: usize = 10;

#[derive(Debug, Error)]
enum CommandError {
    #[error("✗ Failed to {action}: {message}")]
    Rejected {
        action: &'static str,
        message: String,
    },

    #[error("✗ API is not responding!")]
    Unresponsive,

    #[error("Error: {0}")]
    Client(#[from] ClientError),

    #[error("Error: {0}")]
    Io(#[from] io::Error),
}

/// Run one console command and return its exit code.
pub async fn run<W: Write, E: Write>(
    client: &WhatsAppClient,
    command: &Command,
    verbose: bool,
    out: &mut W,
    err: &mut E,
) -> i32 {
    let mut console = Console {
        client,
        verbose,
        out,
    };
    let result = match command {
        Command::Session { command } => console.session(command).await,
        Command::Message { command } => console.message(command).await,
        Command::Contact { command } => console.contact(command).await,
        Command::Ping => console.ping().await,
    };

    match result {
        Ok(()) => EXIT_OK,
        Err(e) => {
            debug!("Command failed: {:?}", e);
            let _ = writeln!(err, "{e}");
            EXIT_ERROR
        }
    }
}

struct Console<'a, W> {
    client: &'a WhatsAppClient,
    verbose: bool,
    out: &'a mut W,
}

impl<W: Write> Console<'_, W> {
    async fn session(&mut self, command: &SessionCommand) -> Result<(), CommandError> {
        match command {
            SessionCommand::Start { session } => self.session_start(session.as_deref()).await,
            SessionCommand::Status { session } => self.session_status(session.as_deref()).await,
            SessionCommand::Qr { session } => self.session_qr(session.as_deref()).await,
            SessionCommand::Stop { session } => self.session_stop(session.as_deref()).await,
            SessionCommand::List => self.session_list().await,
        }
    }

    async fn session_start(&mut self, session: Option<&str>) -> Result<(), CommandError> {
        let session_id = self.client.resolve_session(session);
        writeln!(self.out, "Starting WhatsApp session: {session_id}")?;

        let response = self.client.start_session(Some(session_id)).await?;
        accepted(&response, "start session")?;
        writeln!(self.out, "✓ Session started successfully!")?;
        writeln!(self.out, "Message: {}", field(&response, "message"))?;

        self.session_qr(Some(session_id)).await
    }

    async fn session_status(&mut self, session: Option<&str>) -> Result<(), CommandError> {
        let session_id = self.client.resolve_session(session);
        let response = self.client.get_session_status(Some(session_id)).await?;
        accepted(&response, "get session status")?;

        write!(self.out, "Session: {session_id}\nState: {}", field(&response, "state"))?;
        if let Some(message) = response.get_str("message").filter(|m| !m.is_empty()) {
            write!(self.out, " ({message})")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    async fn session_qr(&mut self, session: Option<&str>) -> Result<(), CommandError> {
        let session_id = self.client.resolve_session(session);
        let response = self.client.get_session_qr(Some(session_id)).await?;
        accepted(&response, "get QR code")?;

        writeln!(self.out, "\nQR Code for session authentication:")?;
        writeln!(self.out, "Please scan this QR code with your WhatsApp mobile app:\n")?;
        writeln!(self.out, "{}\n", field(&response, "qr"))?;
        writeln!(
            self.out,
            "Or visit: {}",
            self.client.session_qr_image_url(Some(session_id))
        )?;
        Ok(())
    }

    async fn session_stop(&mut self, session: Option<&str>) -> Result<(), CommandError> {
        let session_id = self.client.resolve_session(session);
        writeln!(self.out, "Stopping WhatsApp session: {session_id}")?;

        let response = self.client.stop_session(Some(session_id)).await?;
        accepted(&response, "stop session")?;
        writeln!(self.out, "✓ Session stopped successfully!")?;
        writeln!(self.out, "Message: {}", field(&response, "message"))?;
        Ok(())
    }

    async fn session_list(&mut self) -> Result<(), CommandError> {
        let response = self.client.get_sessions().await?;
        accepted(&response, "get sessions")?;

        writeln!(self.out, "Active WhatsApp sessions:")?;
        let sessions: Vec<String> = response.list("sessions").iter().map(display).collect();
        if sessions.is_empty() {
            writeln!(self.out, "No active sessions found.")?;
            return Ok(());
        }

        for session in sessions {
            write!(self.out, "• {session}")?;
            match self.client.get_session_status(Some(&session)).await {
                Ok(status) if status.is_successful() => {
                    write!(self.out, " ({})", field(&status, "state"))?
                }
                Ok(_) => {}
                Err(e) => debug!(session = %session, "Status lookup failed: {}", e),
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    async fn message(&mut self, command: &MessageCommand) -> Result<(), CommandError> {
        let MessageCommand::Send {
            chat_id,
            text,
            session,
        } = command;
        let session_id = self.client.resolve_session(session.as_deref());

        let chat_id = if is_valid_whatsapp_number(chat_id) {
            format_to_individual_id(chat_id)
        } else {
            chat_id.clone()
        };

        writeln!(self.out, "Sending message to: {chat_id}")?;
        if self.verbose {
            writeln!(self.out, "Message: {text}")?;
            writeln!(self.out, "Session: {session_id}")?;
        }

        let response = self
            .client
            .send_text_message(&chat_id, text, Options::new(), Some(session_id))
            .await?;
        accepted(&response, "send message")?;
        writeln!(self.out, "✓ Message sent successfully!")?;
        if self.verbose {
            writeln!(self.out, "Message ID: {}", field(&response, "id"))?;
        }
        Ok(())
    }

    async fn contact(&mut self, command: &ContactCommand) -> Result<(), CommandError> {
        let ContactCommand::List { session } = command;
        let response = self.client.get_contacts(session.as_deref()).await?;
        accepted(&response, "get contacts")?;

        let contacts = response.list("contacts");
        writeln!(self.out, "Contacts (showing first {CONTACT_PREVIEW}):")?;
        for contact in contacts.iter().take(CONTACT_PREVIEW) {
            let name = contact
                .get("name")
                .or_else(|| contact.get("number"))
                .and_then(Value::as_str)
                .unwrap_or("Unknown");
            let number = contact
                .pointer("/id/user")
                .and_then(Value::as_str)
                .unwrap_or_default();
            writeln!(self.out, "• {name} ({number})")?;
        }
        if contacts.len() > CONTACT_PREVIEW {
            writeln!(
                self.out,
                "... and {} more contacts",
                contacts.len() - CONTACT_PREVIEW
            )?;
        }
        Ok(())
    }

    async fn ping(&mut self) -> Result<(), CommandError> {
        let response = self.client.ping().await?;
        if !response.is_successful() {
            return Err(CommandError::Unresponsive);
        }
        writeln!(self.out, "✓ API is responsive: {}", field(&response, "message"))?;
        Ok(())
    }
}

fn accepted(response: &ApiResponse, action: &'static str) -> Result<(), CommandError> {
    match response.error_message() {
        None => Ok(()),
        Some(message) => Err(CommandError::Rejected { action, message }),
    }
}

fn field(response: &ApiResponse, name: &str) -> String {
    response.get(name).map(display).unwrap_or_default()
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
