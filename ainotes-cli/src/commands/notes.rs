//! Notes CLI commands - talk to a running ainotes server over HTTP
//!
//! ```bash
//! ainotes notes add -t "Groceries" -m "eggs, milk" --tags home
//! ainotes notes list --json | jq '.[0]'
//! echo "longer body" | ainotes notes edit 3 -t "Draft"
//! ```

use std::io::{IsTerminal, Read};

use ainotes_core::{Note, NotePayload, NotesConfig};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

// ============================================================================
// Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct NotesArgs {
    /// API endpoint (default: http://127.0.0.1:8000)
    #[arg(long, env = "AINOTES_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Print JSON instead of human-readable output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: NotesCommands,
}

#[derive(Subcommand, Debug)]
pub enum NotesCommands {
    /// List notes, most recently updated first
    List,
    /// Show one note
    Show(IdArgs),
    /// Create a note
    Add(WriteArgs),
    /// Replace a note's title, content and tags
    Edit(EditArgs),
    /// Delete a note
    Rm(IdArgs),
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Note ID
    pub id: i64,
}

#[derive(Parser, Debug)]
pub struct WriteArgs {
    /// Note title (blank becomes "Untitled")
    #[arg(long, short, default_value = "")]
    pub title: String,

    /// Note content; read from stdin when omitted
    #[arg(long, short = 'm')]
    pub content: Option<String>,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID
    pub id: i64,

    #[command(flatten)]
    pub write: WriteArgs,
}

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    message: Option<String>,
}

// ============================================================================
// Dispatch
// ============================================================================

pub async fn run_notes(args: NotesArgs) -> Result<()> {
    let endpoint = resolve_endpoint(args.endpoint)?;
    let client = Client::new();

    match args.command {
        NotesCommands::List => run_list(&client, &endpoint, args.json).await,
        NotesCommands::Show(id) => run_show(&client, &endpoint, id.id, args.json).await,
        NotesCommands::Add(write) => run_add(&client, &endpoint, write, args.json).await,
        NotesCommands::Edit(edit) => {
            run_edit(&client, &endpoint, edit.id, edit.write, args.json).await
        }
        NotesCommands::Rm(id) => run_rm(&client, &endpoint, id.id).await,
    }
}

fn resolve_endpoint(flag: Option<String>) -> Result<String> {
    let endpoint = match flag {
        Some(endpoint) => endpoint,
        None => NotesConfig::load().context("Failed to load config")?.client.endpoint,
    };
    Ok(endpoint.trim_end_matches('/').to_string())
}

// ============================================================================
// HTTP Client Helpers
// ============================================================================

async fn handle_response<T: for<'de> Deserialize<'de>>(response: reqwest::Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        Err(error_from(response).await)
    }
}

async fn error_from(response: reqwest::Response) -> anyhow::Error {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<ErrorResponse>(&error_text) {
        Ok(resp) => anyhow!("{}: {}", status, resp.message.unwrap_or(resp.error)),
        Err(_) => anyhow!("{}: {}", status, error_text),
    }
}

/// Content from the flag, else from piped stdin
fn read_content(content: Option<String>) -> Result<String> {
    if let Some(content) = content {
        return Ok(content);
    }

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("No content provided. Use -m or pipe content via stdin");
    }

    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read from stdin")?;
    Ok(buf)
}

fn payload(write: WriteArgs) -> Result<NotePayload> {
    Ok(NotePayload {
        title: write.title,
        content: read_content(write.content)?,
        tags: write.tags,
    })
}

// ============================================================================
// Output
// ============================================================================

fn summary_line(note: &Note) -> String {
    let mut line = format!(
        "{:>5}  {}  {}",
        note.id,
        note.updated_at.format("%Y-%m-%d %H:%M"),
        note.title
    );
    if !note.tags.is_empty() {
        line.push_str(&format!("  [{}]", note.tags));
    }
    line
}

fn print_note(note: &Note, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
        return Ok(());
    }

    println!("#{} {}", note.id, note.title);
    if !note.tags.is_empty() {
        println!("tags:    {}", note.tags);
    }
    println!("created: {}", note.created_at.to_rfc3339());
    println!("updated: {}", note.updated_at.to_rfc3339());
    println!();
    println!("{}", note.content);
    Ok(())
}

// ============================================================================
// Commands
// ============================================================================

async fn run_list(client: &Client, endpoint: &str, json: bool) -> Result<()> {
    let response = client
        .get(format!("{}/notes", endpoint))
        .send()
        .await
        .context("Failed to connect to notes API")?;

    let notes: Vec<Note> = handle_response(response).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else if notes.is_empty() {
        println!("No notes");
    } else {
        for note in &notes {
            println!("{}", summary_line(note));
        }
    }
    Ok(())
}

async fn run_show(client: &Client, endpoint: &str, id: i64, json: bool) -> Result<()> {
    let response = client
        .get(format!("{}/notes/{}", endpoint, id))
        .send()
        .await
        .context("Failed to connect to notes API")?;

    let note: Note = handle_response(response).await?;

    // The server answers a missing id with a placeholder rather than 404
    if note.is_placeholder() {
        bail!("Note {} not found", id);
    }

    print_note(&note, json)
}

async fn run_add(client: &Client, endpoint: &str, write: WriteArgs, json: bool) -> Result<()> {
    let response = client
        .post(format!("{}/notes", endpoint))
        .json(&payload(write)?)
        .send()
        .await
        .context("Failed to connect to notes API")?;

    let note: Note = handle_response(response).await?;

    if json {
        print_note(&note, true)
    } else {
        println!("Created note {}: {}", note.id, note.title);
        Ok(())
    }
}

async fn run_edit(
    client: &Client,
    endpoint: &str,
    id: i64,
    write: WriteArgs,
    json: bool,
) -> Result<()> {
    let response = client
        .put(format!("{}/notes/{}", endpoint, id))
        .json(&payload(write)?)
        .send()
        .await
        .context("Failed to connect to notes API")?;

    let note: Note = handle_response(response).await?;

    if json {
        print_note(&note, true)
    } else {
        println!("Updated note {}: {}", note.id, note.title);
        Ok(())
    }
}

async fn run_rm(client: &Client, endpoint: &str, id: i64) -> Result<()> {
    let response = client
        .delete(format!("{}/notes/{}", endpoint, id))
        .send()
        .await
        .context("Failed to connect to notes API")?;

    match response.status() {
        StatusCode::NO_CONTENT => {
            println!("Deleted note {}", id);
            Ok(())
        }
        _ => Err(error_from(response).await),
    }
}
