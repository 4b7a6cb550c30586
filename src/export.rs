use actix_web::{http::header, HttpResponse};
use chrono::NaiveDate;
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::BillError;
use crate::message::export_filename;

pub trait Clipboard: Send + Sync {
    fn write_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<(), BillError>>;
}

/// The HTTP client owns the real clipboard, it receives the text in the
/// response and writes it itself.
pub struct HostClipboard;

impl Clipboard for HostClipboard {
    fn write_text<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<(), BillError>> {
        async { Ok(()) }.boxed()
    }
}

/// Pipes the text into a local clipboard program such as `wl-copy` or `pbcopy`.
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Splits a command line like `xclip -selection clipboard` on whitespace.
    pub fn from_command_line(command_line: &str) -> Option<Self> {
        let mut words = command_line.split_whitespace().map(String::from);
        let program = words.next()?;
        Some(CommandClipboard {
            program,
            args: words.collect(),
        })
    }

    async fn pipe(&self, text: &str) -> Result<(), BillError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|err| BillError::Clipboard(format!("{}: {}", self.program, err)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(text.as_bytes())
                .await
                .map_err(|err| BillError::Clipboard(err.to_string()))?;
            // Dropping stdin closes the pipe so the program sees EOF
        }

        let status = child
            .wait()
            .await
            .map_err(|err| BillError::Clipboard(err.to_string()))?;
        if status.success() {
            Ok(())
        } else {
            Err(BillError::Clipboard(format!("{} exited with {}", self.program, status)))
        }
    }
}

impl Clipboard for CommandClipboard {
    fn write_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<(), BillError>> {
        self.pipe(text).boxed()
    }
}

#[derive(Debug, PartialEq, Serialize)]
pub struct CopyReceipt {
    pub notice: String,
    pub text: String,
}

pub fn copy_all_notice() -> String {
    "All messages copied to clipboard — now paste into WhatsApp.".to_string()
}

pub fn copy_one_notice(name: &str) -> String {
    format!("Message for {} copied to clipboard.", name)
}

pub async fn copy(
    clipboard: &dyn Clipboard,
    text: String,
    notice: String,
) -> Result<CopyReceipt, BillError> {
    if let Err(err) = clipboard.write_text(&text).await {
        tracing::warn!(%err, "clipboard write failed");
        return Err(err);
    }
    Ok(CopyReceipt { notice, text })
}

/// Offers the payload as a text file download named after `date`.
pub fn download(payload: String, date: NaiveDate) -> HttpResponse {
    let filename = export_filename(date);
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ))
        .body(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_is_split_into_program_and_args() {
        let clipboard = CommandClipboard::from_command_line("xclip -selection clipboard").unwrap();
        assert_eq!(clipboard.program, "xclip");
        assert_eq!(clipboard.args, ["-selection", "clipboard"]);
        assert!(CommandClipboard::from_command_line("   ").is_none());
    }

    #[test]
    fn notices() {
        assert_eq!(copy_one_notice("Naveen"), "Message for Naveen copied to clipboard.");
        assert!(copy_all_notice().starts_with("All messages copied"));
    }

    #[actix_web::test]
    async fn host_clipboard_hands_text_back() {
        let receipt = copy(&HostClipboard, "Hi".to_string(), copy_all_notice())
            .await
            .unwrap();
        assert_eq!(receipt.text, "Hi");
    }

    #[cfg(unix)]
    #[actix_web::test]
    async fn command_clipboard_reports_failures() {
        let working = CommandClipboard::from_command_line("cat").unwrap();
        assert!(working.write_text("Hi Naveen").await.is_ok());

        let failing = CommandClipboard::from_command_line("false").unwrap();
        assert!(matches!(
            failing.write_text("Hi Naveen").await,
            Err(BillError::Clipboard(_))
        ));

        let missing = CommandClipboard::from_command_line("no-such-clipboard-tool").unwrap();
        assert!(missing.write_text("Hi Naveen").await.is_err());
    }

    #[test]
    fn download_sets_attachment_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let response = download("Hi".to_string(), date);
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap();
        assert_eq!(
            disposition,
            "attachment; filename=\"WhatsApp_Messages_2024-03-07.txt\""
        );
    }
}
