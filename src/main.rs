//! Command-line wrapper and entry point.
//!
//! This module provides the thin integration layer between the FolioVault
//! library and the command line. It parses one subcommand per invocation,
//! translates it into a [`VaultRequest`], and prints the worker's response.
//! All business logic lives in the library; this file only maps arguments to
//! requests and responses to text.
//!
//! # Subcommands
//!
//! - `submit <file>...`: Replace all stored projects with the given files
//! - `list`: Print all stored project records
//! - `stats`: Print project and blob counts
//! - `delete <id>`: Delete one project and its attached files
//! - `clear`: Empty the store
//! - `export <path>`: Write a snapshot backup to a JSON file
//! - `import <path>`: Restore projects from a snapshot file
//! - `fetch <blob-id> <out>`: Write one stored file's bytes to `out`

#![allow(clippy::multiple_crate_versions)]

use foliovault::contact::{self, ContactMessage};
use foliovault::domain::ProjectSubmission;
use foliovault::infrastructure::expand_tilde;
use foliovault::observability::init_tracing;
use foliovault::worker::{VaultRequest, VaultResponse, VaultWorker};
use foliovault::{Config, Result, VaultError};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: foliovault <command> [args]

commands:
  submit <file>...      replace all stored projects with the given files
  list                  print all stored project records
  stats                 print project and blob counts
  delete <id>           delete one project and its attached files
  clear                 empty the store
  export <path>         write a snapshot backup to a JSON file
  import <path>         restore projects from a snapshot file
  fetch <blob-id> <out> write one stored file's bytes to <out>
  contact <name> <email> <message>
                        validate a message to the configured recipient";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("foliovault: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        eprintln!("{USAGE}");
        return Err(VaultError::Config("no command given".to_string()));
    };

    let config = Config::load()?;
    init_tracing(&config);
    tracing::debug!(command = %command, "starting");

    if command == "contact" {
        return run_contact(&config, &args[1..]);
    }

    let request = parse_request(command, &args[1..])?;
    let fetch_out = match (&request, args.get(2)) {
        (VaultRequest::FetchBlob { .. }, Some(out)) => Some(PathBuf::from(expand_tilde(out))),
        _ => None,
    };

    let handle = VaultWorker::spawn(config.db_path())?;
    let response = handle.request(request)?;
    print_response(&response, fetch_out.as_deref())?;
    handle.shutdown()
}

/// Validates a contact message addressed to the configured recipient.
///
/// No email transport ships with the CLI, so a valid message is acknowledged
/// with the direct alternate-channel notice instead of being sent.
fn run_contact(config: &Config, args: &[String]) -> Result<()> {
    if args.len() < 3 {
        return Err(VaultError::Config(
            "contact needs <name> <email> <message>".to_string(),
        ));
    }

    let message = ContactMessage {
        to: config.contact_recipient()?.to_string(),
        from_name: args[0].clone(),
        from_email: args[1].clone(),
        body: args[2..].join(" "),
    };
    contact::validate(&message)?;

    println!("message looks good, but sending is not set up on this machine");
    println!("{}", contact::fallback_notice(&message));
    Ok(())
}

/// Translates a subcommand and its arguments into one request.
fn parse_request(command: &str, args: &[String]) -> Result<VaultRequest> {
    match command {
        "submit" => {
            if args.is_empty() {
                return Err(VaultError::Config("submit needs at least one file".to_string()));
            }
            let mut submissions = Vec::with_capacity(args.len());
            for arg in args {
                submissions.push(submission_from_file(arg)?);
            }
            Ok(VaultRequest::SubmitProjects { submissions })
        }
        "list" => Ok(VaultRequest::LoadProjects),
        "stats" => Ok(VaultRequest::Stats),
        "delete" => {
            let id = args
                .first()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| VaultError::Config("delete needs a numeric id".to_string()))?;
            Ok(VaultRequest::DeleteProject { id })
        }
        "clear" => Ok(VaultRequest::ClearAll),
        "export" => {
            let path = args
                .first()
                .ok_or_else(|| VaultError::Config("export needs a destination path".to_string()))?;
            Ok(VaultRequest::ExportSnapshot {
                path: PathBuf::from(expand_tilde(path)),
            })
        }
        "import" => {
            let path = args
                .first()
                .ok_or_else(|| VaultError::Config("import needs a snapshot path".to_string()))?;
            Ok(VaultRequest::ImportSnapshot {
                path: PathBuf::from(expand_tilde(path)),
            })
        }
        "fetch" => {
            let id = args
                .first()
                .and_then(|s| s.parse::<u64>().ok())
                .ok_or_else(|| VaultError::Config("fetch needs a numeric blob id".to_string()))?;
            if args.len() < 2 {
                return Err(VaultError::Config("fetch needs an output path".to_string()));
            }
            Ok(VaultRequest::FetchBlob { id })
        }
        other => {
            eprintln!("{USAGE}");
            Err(VaultError::Config(format!("unknown command: {other}")))
        }
    }
}

/// Builds a submission from a file on disk.
///
/// The project name is the file stem, the kind is the uppercased extension
/// (or `File` when there is none), and the file's bytes become the attached
/// blob content.
fn submission_from_file(arg: &str) -> Result<ProjectSubmission> {
    let path = PathBuf::from(expand_tilde(arg));
    let bytes = std::fs::read(&path)?;

    let name = path
        .file_stem()
        .map_or_else(|| arg.to_string(), |s| s.to_string_lossy().into_owned());
    let kind = path
        .extension()
        .map_or_else(|| "File".to_string(), |e| e.to_string_lossy().to_uppercase());

    Ok(ProjectSubmission::with_content(name, kind, bytes))
}

/// Prints one response as plain text.
fn print_response(response: &VaultResponse, fetch_out: Option<&std::path::Path>) -> Result<()> {
    match response {
        VaultResponse::ProjectsSaved { count, projects } => {
            println!("saved {count} project(s)");
            for project in projects {
                println!("  #{} {} ({})", project.id, project.name, project.kind);
            }
        }
        VaultResponse::ProjectsLoaded { projects } => {
            if projects.is_empty() {
                println!("no projects stored");
            }
            for record in projects {
                let project = record.to_project();
                println!(
                    "#{} {} ({}, {}, saved {})",
                    record.id,
                    project.name,
                    project.kind,
                    project.size_display(),
                    project.saved_ago()
                );
            }
        }
        VaultResponse::ProjectDeleted { id } => println!("deleted project {id}"),
        VaultResponse::Cleared => println!("store cleared"),
        VaultResponse::Stats {
            project_count,
            blob_count,
        } => println!("{project_count} project(s), {blob_count} file(s)"),
        VaultResponse::SnapshotExported {
            path,
            project_count,
        } => println!("exported {project_count} project(s) to {}", path.display()),
        VaultResponse::SnapshotImported { project_count } => {
            println!("imported {project_count} project(s)");
        }
        VaultResponse::BlobFetched { metadata, bytes } => {
            let out = fetch_out
                .ok_or_else(|| VaultError::Config("fetch needs an output path".to_string()))?;
            std::fs::write(out, bytes)?;
            println!(
                "wrote {} ({} bytes) to {}",
                metadata.file_name,
                bytes.len(),
                out.display()
            );
        }
        VaultResponse::BlobMissing { id } => println!("no file stored under id {id}"),
        VaultResponse::ShuttingDown => {}
        VaultResponse::Error { message } => {
            return Err(VaultError::Worker(message.clone()));
        }
    }
    Ok(())
}
