//! songsheet CLI - song sheet generation tool

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use songsheet::{
    AliasTable, CatalogOptions, PrepOptions, Preprocessor, RenderOptions, SongCatalog,
};

#[derive(Parser)]
#[command(name = "songsheet")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert annotated song lyrics to formatted DOCX song sheets", long_about = None)]
struct Cli {
    /// Input files or glob patterns
    #[arg(value_name = "INPUTS")]
    inputs: Vec<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert annotated lyric files to DOCX song sheets
    Convert {
        /// Input files or glob patterns
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<String>,

        /// Output directory (defaults to each input's directory)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Overwrite existing output files
        #[arg(long)]
        force_overwrite: bool,

        /// Abort the batch on the first failure
        #[arg(long)]
        strict: bool,

        /// Uppercase line starts and stanza labels
        #[arg(long)]
        capitalize: bool,

        /// Stanza label letters recognized by --capitalize
        #[arg(long, value_name = "LETTERS", default_value = "ABCRV")]
        label_letters: String,

        /// Tab stop position in centimetres
        #[arg(long, value_name = "CM", default_value_t = songsheet::render::DEFAULT_TAB_INDENT_CM)]
        tab_indent: f64,
    },

    /// Prepare annotated lyric files from raw exports and a metadata catalog
    Prepare {
        /// Input files or glob patterns
        #[arg(value_name = "INPUTS", required = true)]
        inputs: Vec<String>,

        /// Metadata catalog workbook (.xlsx)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        /// Name-alias file bridging file titles to catalog titles
        #[arg(long, value_name = "FILE")]
        aliases: Option<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "prepared")]
        output: PathBuf,

        /// Overwrite existing output files
        #[arg(long)]
        force_overwrite: bool,

        /// Abort the batch on the first failure
        #[arg(long)]
        strict: bool,

        /// Rows to skip before the catalog header row
        #[arg(long, value_name = "N", default_value_t = songsheet::prep::DEFAULT_HEADER_OFFSET)]
        header_offset: usize,

        /// Catalog column map as JSON (spreadsheet header -> internal name)
        #[arg(long, value_name = "JSON")]
        columns: Option<String>,

        /// Country -> language map as JSON
        #[arg(long, value_name = "JSON")]
        language_map: Option<String>,

        /// Prefix word tried by the catalog lookup fallback
        #[arg(long, value_name = "WORD", default_value = songsheet::prep::DEFAULT_TITLE_PREFIX)]
        title_prefix: String,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            inputs,
            output,
            force_overwrite,
            strict,
            capitalize,
            label_letters,
            tab_indent,
        }) => {
            let options = RenderOptions::new()
                .with_capitalize(capitalize)
                .with_label_letters(label_letters)
                .with_tab_indent(tab_indent)
                .with_overwrite(force_overwrite);
            cmd_convert(&inputs, output.as_deref(), &options, strict)
        }
        Some(Commands::Prepare {
            inputs,
            catalog,
            aliases,
            output,
            force_overwrite,
            strict,
            header_offset,
            columns,
            language_map,
            title_prefix,
        }) => cmd_prepare(
            &inputs,
            &catalog,
            aliases.as_deref(),
            &output,
            force_overwrite,
            strict,
            header_offset,
            columns.as_deref(),
            language_map.as_deref(),
            &title_prefix,
        ),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if inputs are provided
            if !cli.inputs.is_empty() {
                cmd_convert(
                    &cli.inputs,
                    cli.output.as_deref(),
                    &RenderOptions::default(),
                    false,
                )
            } else {
                println!("{}", "Usage: songsheet <FILE> [--output DIR]".yellow());
                println!("       songsheet --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    inputs: &[String],
    output: Option<&Path>,
    options: &RenderOptions,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = expand_inputs(inputs)?;
    if files.is_empty() {
        return Err("no input files matched".into());
    }

    let mut failed = 0usize;
    for file in &files {
        let out_dir = match output {
            Some(dir) => dir.to_path_buf(),
            None => parent_dir(file),
        };
        match songsheet::convert_file(file, &out_dir, options) {
            Ok(path) => println!("{} {}", "Saved to".green(), path.display()),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}: {}", "Error".red().bold(), file.display(), e);
                if strict {
                    return Err("aborted on first failure".into());
                }
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} files failed", files.len()).into());
    }
    println!(
        "\n{} {} songs converted",
        "Done!".green().bold(),
        files.len()
    );
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_prepare(
    inputs: &[String],
    catalog_path: &Path,
    aliases_path: Option<&Path>,
    output: &Path,
    force_overwrite: bool,
    strict: bool,
    header_offset: usize,
    columns: Option<&str>,
    language_map: Option<&str>,
    title_prefix: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let files = expand_prepare_inputs(inputs)?;
    if files.is_empty() {
        return Err("no input files matched".into());
    }

    let mut catalog_options = CatalogOptions::new()
        .with_header_offset(header_offset)
        .with_title_prefix(title_prefix);
    if let Some(json) = columns {
        let map: HashMap<String, String> = serde_json::from_str(json)?;
        catalog_options = catalog_options.with_columns(map);
    }

    println!("{}", "Loading catalog...".cyan());
    let catalog = SongCatalog::open(catalog_path, &catalog_options)?;
    println!("{} {} catalog entries", "Loaded".green(), catalog.len());

    let mut preprocessor = Preprocessor::new(catalog);
    if let Some(path) = aliases_path {
        preprocessor = preprocessor.with_aliases(AliasTable::load(path)?);
    }
    if let Some(json) = language_map {
        let map: HashMap<String, String> = serde_json::from_str(json)?;
        preprocessor = preprocessor.with_options(PrepOptions::new().with_language_map(map));
    }

    let mut prepared = 0usize;
    let mut skipped = 0usize;
    let mut failed = 0usize;
    for (file, rel) in &files {
        let result = preprocessor.preprocess_file(file).and_then(|song| {
            let Some(song) = song else {
                return Ok(None);
            };
            let dir = match rel.parent() {
                Some(p) if !p.as_os_str().is_empty() => output.join(p),
                _ => output.to_path_buf(),
            };
            song.save(&dir, force_overwrite).map(Some)
        });
        match result {
            Ok(Some(path)) => {
                prepared += 1;
                println!("{} {}", "Saved to".green(), path.display());
            }
            Ok(None) => skipped += 1,
            Err(e) => {
                failed += 1;
                eprintln!("{}: {}: {}", "Error".red().bold(), file.display(), e);
                if strict {
                    return Err("aborted on first failure".into());
                }
            }
        }
    }

    if failed > 0 {
        return Err(format!("{failed} of {} files failed", files.len()).into());
    }
    println!(
        "\n{} {} songs prepared, {} skipped",
        "Done!".green().bold(),
        prepared,
        skipped
    );
    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "songsheet".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("Song sheet generation tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/songsheet".dimmed()
    );
    println!("License: MIT");
}

/// Expand file paths and glob patterns, deduplicating while keeping order.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            push_unique(&mut files, path.to_path_buf());
            continue;
        }
        let mut matched = false;
        for entry in glob::glob(input)? {
            let path = entry?;
            if path.is_file() {
                push_unique(&mut files, path);
                matched = true;
            }
        }
        if !matched {
            log::warn!("no files match {input:?}");
        }
    }
    Ok(files)
}

/// Like [`expand_inputs`], but pairs each match with its path relative to
/// the pattern's non-wildcard base, so the output tree can mirror the
/// input tree.
fn expand_prepare_inputs(
    inputs: &[String],
) -> Result<Vec<(PathBuf, PathBuf)>, Box<dyn std::error::Error>> {
    let mut files: Vec<(PathBuf, PathBuf)> = Vec::new();
    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            let rel = PathBuf::from(path.file_name().unwrap_or_default());
            push_unique_pair(&mut files, path.to_path_buf(), rel);
            continue;
        }
        let base = pattern_base(input);
        let mut matched = false;
        for entry in glob::glob(input)? {
            let path = entry?;
            if !path.is_file() {
                continue;
            }
            let rel = match path.strip_prefix(&base) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => PathBuf::from(path.file_name().unwrap_or_default()),
            };
            push_unique_pair(&mut files, path, rel);
            matched = true;
        }
        if !matched {
            log::warn!("no files match {input:?}");
        }
    }
    Ok(files)
}

/// Directory components of a glob pattern before its first wildcard.
fn pattern_base(pattern: &str) -> PathBuf {
    let mut base = PathBuf::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if text.contains(['*', '?', '[']) {
            break;
        }
        base.push(component);
    }
    base
}

fn parent_dir(file: &Path) -> PathBuf {
    match file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn push_unique(files: &mut Vec<PathBuf>, path: PathBuf) {
    if !files.contains(&path) {
        files.push(path);
    }
}

fn push_unique_pair(files: &mut Vec<(PathBuf, PathBuf)>, path: PathBuf, rel: PathBuf) {
    if !files.iter().any(|(p, _)| *p == path) {
        files.push((path, rel));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_base() {
        assert_eq!(pattern_base("exports/2024/*.txt"), Path::new("exports/2024"));
        assert_eq!(pattern_base("exports/**/*.txt"), Path::new("exports"));
        assert_eq!(pattern_base("*.txt"), Path::new(""));
        assert_eq!(pattern_base("a/b?/c.txt"), Path::new("a"));
    }

    #[test]
    fn test_expand_inputs_dedupes_preserving_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        std::fs::write(&a, "x").unwrap();
        std::fs::write(&b, "x").unwrap();

        let pattern = dir.path().join("*.txt").display().to_string();
        let inputs = vec![b.display().to_string(), pattern];
        let files = expand_inputs(&inputs).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files[0], b);
        assert_eq!(files[1], a);
    }

    #[test]
    fn test_expand_prepare_inputs_keeps_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("2024");
        std::fs::create_dir_all(&sub).unwrap();
        let file = sub.join("song_AP_123456.txt");
        std::fs::write(&file, "x").unwrap();

        let pattern = dir.path().join("**/*.txt").display().to_string();
        let files = expand_prepare_inputs(&[pattern]).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, file);
        assert_eq!(files[0].1, Path::new("2024/song_AP_123456.txt"));
    }
}
