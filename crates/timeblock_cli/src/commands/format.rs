use clap::Args;
use log::info;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use timeblock_core::{
    format_content_report, DocumentFormatter, DocumentStore, FormatOptions, FormatOutcome,
    FsDocumentStore,
};

#[derive(Args)]
pub struct FormatArgs {
    /// Files to format; `-` or no paths reads stdin
    pub paths: Vec<PathBuf>,
    /// Report files that would change without writing them
    #[arg(long)]
    pub check: bool,
    /// Settings JSON file
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

pub fn run(args: FormatArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let settings = super::load_settings(args.settings.as_deref())?;
    let options = settings.format_options();

    if reads_stdin(&args.paths) {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        let (output, changed) = format_stream(&input, &options);
        if args.check {
            return Ok(exit_code(changed));
        }
        std::io::stdout().write_all(output.as_bytes())?;
        return Ok(ExitCode::SUCCESS);
    }

    let store = FsDocumentStore::new(".");
    let mut would_change = 0usize;
    if args.check {
        let formatter = DocumentFormatter::new(&store, settings, ".");
        for path in &args.paths {
            let content = store.read(path)?;
            if formatter.format_text(&content).is_some() {
                println!("would reformat {}", path.display());
                would_change += 1;
            }
        }
        return Ok(exit_code(would_change > 0));
    }

    let formatter = DocumentFormatter::new(&store, settings, ".");
    for path in &args.paths {
        if let FormatOutcome::Rewritten { changed_lines } = formatter.format_document(path)? {
            println!("formatted {} ({changed_lines} lines)", path.display());
            would_change += 1;
        }
    }
    info!(
        "event=cli_format module=cli status=ok files={} rewritten={}",
        args.paths.len(),
        would_change
    );
    Ok(ExitCode::SUCCESS)
}

/// Formats piped text; returns the output and whether anything changed.
fn format_stream(input: &str, options: &FormatOptions) -> (String, bool) {
    let report = format_content_report(input, options);
    let changed = report.is_changed();
    (report.content, changed)
}

fn reads_stdin(paths: &[PathBuf]) -> bool {
    paths.is_empty() || (paths.len() == 1 && paths[0] == Path::new("-"))
}

fn exit_code(changed: bool) -> ExitCode {
    if changed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
