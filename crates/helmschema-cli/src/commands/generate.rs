//! Generate command - infer values.schema.json from values.yaml

use clap::Args;
use console::style;
use helmschema_core::{Generator, GeneratorOptions, LintReport, SchemaError, SchemaVersion};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::display;
use crate::error::{CliError, Result};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Input values file
    #[arg(short, long, default_value = "values.yaml")]
    pub file: PathBuf,

    /// Output schema file ("-" for stdout)
    #[arg(short, long, default_value = "values.schema.json")]
    pub output: PathBuf,

    /// JSON Schema version (draft-07, 2019-09, 2020-12 or a $schema URI)
    #[arg(long)]
    pub schema_version: Option<String>,

    /// Schema title
    #[arg(long)]
    pub title: Option<String>,

    /// Schema description (overrides a top-of-file comment)
    #[arg(long)]
    pub description: Option<String>,

    /// Mark every non-null value as required
    #[arg(long)]
    pub require_all: bool,

    /// Don't attach values as examples/defaults
    #[arg(long)]
    pub no_examples: bool,

    /// Don't turn comments into descriptions
    #[arg(long)]
    pub no_descriptions: bool,

    /// Check the generated schema against Helm best practices
    #[arg(long)]
    pub validate: bool,

    /// Fail when the best-practices check reports errors
    #[arg(long)]
    pub strict: bool,

    /// Generator options file (YAML)
    #[arg(long, env = "HELMSCHEMA_CONFIG")]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    fn writes_to_stdout(&self) -> bool {
        self.output.as_os_str() == "-"
    }

    /// Config file values, overridden by explicit flags
    fn resolve_options(&self, debug: bool) -> Result<GeneratorOptions> {
        let mut options = match &self.config {
            Some(path) => load_config(path)?,
            None => GeneratorOptions::default(),
        };

        if let Some(raw) = &self.schema_version {
            options.schema_version = raw.parse::<SchemaVersion>().map_err(|_| CliError::Usage {
                option: "--schema-version",
                message: format!("unknown version '{}'", raw),
                help: Some("use draft-07, 2019-09, 2020-12 or a full $schema URI".to_string()),
            })?;
        }
        if let Some(title) = &self.title {
            options.title = Some(title.clone());
        }
        if let Some(description) = &self.description {
            options.description = Some(description.clone());
        }
        if self.require_all {
            options.require_by_default = true;
        }
        if self.no_examples {
            options.include_examples = false;
        }
        if self.no_descriptions {
            options.extract_descriptions = false;
        }
        if debug {
            options.debug = true;
        }

        Ok(options)
    }
}

fn load_config(path: &Path) -> Result<GeneratorOptions> {
    tracing::info!("loading generator options from {}", path.display());
    GeneratorOptions::load_from(path).map_err(|e| match e {
        SchemaError::Io(err) => CliError::read(path, err),
        other => other.into(),
    })
}

pub fn run(args: &GenerateArgs, debug: bool) -> Result<()> {
    let options = args.resolve_options(debug)?;
    tracing::debug!(?options, "resolved generator options");

    let source = fs::read_to_string(&args.file).map_err(|e| CliError::read(&args.file, e))?;
    tracing::info!(
        "read values file {} ({} bytes)",
        args.file.display(),
        source.len()
    );

    let schema = Generator::new(options).generate_from_yaml(&source)?;
    let mut json = schema.to_json_pretty()?;
    json.push('\n');

    if args.writes_to_stdout() {
        io::stdout()
            .write_all(json.as_bytes())
            .map_err(|e| CliError::write(&args.output, e))?;
    } else {
        write_schema(&args.output, &json)?;
        println!(
            "{} Schema written to {}",
            style("✓").green(),
            style(args.output.display()).bold()
        );
    }

    if !(args.validate || args.strict) {
        return Ok(());
    }

    let report = LintReport::of(&schema);
    // Keep stdout clean for the schema itself
    let written = if args.writes_to_stdout() {
        display::write_report(&mut io::stderr(), &report)
    } else {
        println!();
        println!("{} Helm best practices", style("→").blue());
        display::write_report(&mut io::stdout(), &report)
    };
    written.map_err(|e| CliError::write(Path::new("-"), e))?;

    if args.strict && report.has_errors() {
        let counts = report.counts();
        return Err(CliError::lint_failed(counts.errors, counts.warnings));
    }

    Ok(())
}

fn write_schema(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CliError::write(parent, e))?;
    }
    fs::write(path, json).map_err(|e| CliError::write(path, e))
}
