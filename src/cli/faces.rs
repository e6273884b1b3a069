//! Face listing command.

use anyhow::{Context, Result};
use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::cli::load_registry;
use crate::models::Face;

/// List available faces and their rows
#[derive(Debug, Clone, Args)]
pub struct FacesArgs {
    /// JSON file with additional faces
    #[arg(long, value_name = "FILE")]
    pub faces: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl FacesArgs {
    /// Execute the faces command
    pub fn execute(&self) -> Result<()> {
        let registry = load_registry(self.faces.as_deref())?;

        if self.json {
            let faces: Vec<&Face> = registry.faces().collect();
            let json = serde_json::to_string_pretty(&faces).context("Failed to serialize faces")?;
            println!("{json}");
            return Ok(());
        }

        for face in registry.faces() {
            print!("{}", describe_face(face));
        }
        Ok(())
    }
}

/// Renders a face as its identifier followed by one line of labels per row.
#[must_use]
pub fn describe_face(face: &Face) -> String {
    let mut out = format!("{} ({} keys)\n", face.identifier, face.key_count());
    for (index, row) in face.rows.iter().enumerate() {
        let labels: Vec<String> = row.keys.iter().map(|key| key.label.to_string()).collect();
        let _ = writeln!(out, "  {index}: {}", labels.join(" "));
    }
    out
}
