use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use miniapp_codegen::{generate, CodegenOptions, GeneratedFile};
use miniapp_core::{Palette, Project};
use tracing::{debug, info, info_span};

use crate::cli::GenerateArgs;

/// Outcome of a `generate` run.
#[derive(Debug)]
pub struct GenerateSummary {
    pub pages: usize,
    pub written: Vec<PathBuf>,
}

pub fn run_generate(args: &GenerateArgs) -> Result<GenerateSummary> {
    let span = info_span!("generate", project = %args.project.display());
    let _guard = span.enter();

    let source = fs::read_to_string(&args.project)
        .with_context(|| format!("read project file {}", args.project.display()))?;
    let project: Project = serde_json::from_str(&source)
        .with_context(|| format!("parse project file {}", args.project.display()))?;

    let mut options = CodegenOptions::default();
    if let Some(page_path) = &args.page_path {
        options.page_path = page_path.clone();
    }

    let bundle = generate(&project);
    let files = bundle.files(&options).context("lay out generated files")?;
    info!(pages = bundle.pages.len(), files = files.len(), "generated bundle");

    let written = if args.dry_run {
        files.iter().map(|file| args.out.join(&file.path)).collect()
    } else {
        write_files(&args.out, &files)?
    };

    Ok(GenerateSummary {
        pages: bundle.pages.len(),
        written,
    })
}

fn write_files(root: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let path = root.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content).with_context(|| format!("write {}", path.display()))?;
        debug!(path = %path.display(), bytes = file.content.len(), "wrote file");
        written.push(path);
    }
    Ok(written)
}

pub fn run_palette() -> Result<()> {
    let palette = Palette::builtin().context("load built-in palette")?;
    for (category, definitions) in palette.by_category() {
        println!("{category}");
        for definition in definitions {
            println!("  {:<10} {}", definition.kind.as_str(), definition.name);
        }
    }
    Ok(())
}
