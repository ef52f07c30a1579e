use std::path::Path;

use crate::cli::config::{BackendKind, ResolvedSettings};
use crate::editor::parse_assignment;
use crate::generation::backend::{ChatCompletionsBackend, CompletionBackend, HttpProxyBackend, MockCompletionBackend};
use crate::generation::orchestrator::GenerationOrchestrator;
use crate::library::catalog::catalog;
use crate::library::profile::LibraryProfile;
use crate::preview::error_log::RenderErrorLog;
use crate::preview::renderer::PreviewRenderer;
use crate::session::FormSession;

// ============================================================================
// blocks subcommand
// ============================================================================

pub fn cmd_blocks(file: &Path, library: LibraryProfile) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = FormSession::with_code(library, std::fs::read_to_string(file)?);
    let inputs = session.tracked_inputs();

    if inputs.is_empty() {
        println!("No blocks found in {}", file.display());
        return Ok(());
    }

    for (i, input) in inputs.iter().enumerate() {
        println!("{:>3}  {:<4} {:<14} {}", i + 1, input.id, input.widget, input.label);
    }
    Ok(())
}

// ============================================================================
// preview subcommand
// ============================================================================

/// Print the rendered outline. Returns whether the preview was free of errors.
pub fn cmd_preview(file: &Path, settings: &ResolvedSettings) -> Result<bool, Box<dyn std::error::Error>> {
    let markup = std::fs::read_to_string(file)?;
    let mut renderer = PreviewRenderer::new(settings.library, build_error_log(settings));

    let outcome = renderer.render(&markup);
    print!("{}", outcome.outline());

    let errors = outcome.error_count();
    if errors > 0 {
        eprintln!(
            "{} render error(s); {} kept in the error log",
            errors,
            renderer.error_log().len()
        );
    }
    Ok(errors == 0)
}

fn build_error_log(settings: &ResolvedSettings) -> RenderErrorLog {
    match &settings.preview.error_log {
        Some(path) => RenderErrorLog::persistent(path, settings.preview.error_log_capacity),
        None => RenderErrorLog::in_memory(settings.preview.error_log_capacity),
    }
}

// ============================================================================
// edit / fields subcommands
// ============================================================================

/// Resolve a 1-based block position to its tracked id.
fn block_id(session: &mut FormSession, position: usize) -> Result<String, Box<dyn std::error::Error>> {
    let inputs = session.tracked_inputs();
    position
        .checked_sub(1)
        .and_then(|i| inputs.get(i))
        .map(|input| input.id.clone())
        .ok_or_else(|| format!("block {} does not exist (document has {} blocks)", position, inputs.len()).into())
}

pub fn cmd_edit(
    file: &Path,
    block: usize,
    assignments: &[String],
    in_place: bool,
    library: LibraryProfile,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = FormSession::with_code(library, std::fs::read_to_string(file)?);
    let id = block_id(&mut session, block)?;

    let pairs = assignments
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<Result<Vec<_>, _>>()?;
    session.edit_block(&id, &pairs)?;

    if in_place {
        std::fs::write(file, session.local_code())?;
        eprintln!("Updated block {} in {}", block, file.display());
    } else {
        println!("{}", session.local_code());
    }
    Ok(())
}

pub fn cmd_fields(file: &Path, block: usize, library: LibraryProfile) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = FormSession::with_code(library, std::fs::read_to_string(file)?);
    let id = block_id(&mut session, block)?;
    let fields = session.decode_block(&id)?;
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

// ============================================================================
// generate subcommand
// ============================================================================

pub fn cmd_generate(
    prompt: &str,
    input: Option<&Path>,
    output: Option<&Path>,
    settings: &ResolvedSettings,
) -> Result<(), Box<dyn std::error::Error>> {
    let current = match input {
        Some(path) => std::fs::read_to_string(path)?,
        None => String::new(),
    };

    let backend = build_backend(settings)?;
    let orchestrator = GenerationOrchestrator::with_max_tokens(backend, settings.completion.max_tokens);
    let mut session = FormSession::with_code(settings.library, current);

    let version = session.generate(&orchestrator, prompt)?;
    tracing::info!(version, "generation finished");

    match output {
        Some(path) => {
            std::fs::write(path, session.local_code())?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", session.local_code()),
    }
    Ok(())
}

// ============================================================================
// catalog subcommand
// ============================================================================

pub fn cmd_catalog(library: LibraryProfile) {
    let entries = catalog(library);
    println!("{} components available for {}:", entries.len(), library);
    for entry in entries {
        println!("  {:<20} {}", entry.label, entry.code);
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Build the completion backend selected by the resolved settings.
pub fn build_backend(settings: &ResolvedSettings) -> Result<Box<dyn CompletionBackend>, Box<dyn std::error::Error>> {
    let timeout = settings.completion.timeout();
    match settings.backend {
        BackendKind::Proxy => {
            let mut backend = HttpProxyBackend::default();
            backend.timeout = timeout;
            if let Some(endpoint) = &settings.endpoint {
                backend.endpoint = endpoint.clone();
            }
            Ok(Box::new(backend))
        }
        BackendKind::Chat => {
            let token_env = &settings.completion.api_token_env;
            let api_token = std::env::var(token_env)
                .map_err(|_| format!("environment variable {} is not set", token_env))?;

            let mut backend = ChatCompletionsBackend {
                api_token,
                max_tokens: settings.completion.max_tokens,
                temperature: settings.completion.temperature,
                timeout,
                ..ChatCompletionsBackend::default()
            };
            if let Some(endpoint) = &settings.endpoint {
                backend.endpoint = endpoint.clone();
            }
            if let Some(model) = &settings.model {
                backend.model = model.clone();
            }
            Ok(Box::new(backend))
        }
        BackendKind::Mock => Ok(Box::new(MockCompletionBackend::new())),
    }
}
