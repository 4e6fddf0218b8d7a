//! Document Renderer
//!
//! Composes a document from a request JSON and writes the PDF.
//!
//! Usage:
//!   cargo run --example render_document -- [request.json] [output_dir]
//!
//! Examples:
//!   cargo run --example render_document -- demos/input/contrato-laboral.json
//!   RUST_LOG=template=debug cargo run --example render_document -- demos/input/anexo-contrato.json output

use anyhow::Context;
use template::{parse_document_request, FooterStamp, TemplateRenderer};
use tracing_subscriber::EnvFilter;

const DEFAULT_REQUEST: &str = "demos/input/contrato-laboral.json";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let mut args = std::env::args().skip(1);
    let request_path = args.next().unwrap_or_else(|| DEFAULT_REQUEST.to_string());
    let output_dir = args.next().unwrap_or_else(|| "output".to_string());

    let request = std::fs::read_to_string(&request_path)
        .with_context(|| format!("Failed to read request '{}'", request_path))?;
    let (kind, fields) = parse_document_request(&request)?;

    let missing = kind.missing_fields(&fields);
    if !missing.is_empty() {
        tracing::warn!(?missing, "fields left blank");
    }

    let renderer = TemplateRenderer::new(kind, &fields);
    println!("{}\n", renderer.document().title);
    println!("{}\n", renderer.preview());

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create '{}'", output_dir))?;
    let path = renderer.export(&output_dir, &FooterStamp::today())?;

    println!("Generated: {}", path.display());
    Ok(())
}
