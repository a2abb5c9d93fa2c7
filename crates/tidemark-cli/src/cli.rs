//! Command-line interface for the tidemark utility
//!
//! Reads interaction statements, lays them out and writes the resulting
//! drawing primitives as JSON.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use tidemark::core::logging::init_logging;
use tidemark::sequence::{SequenceLayoutAlgorithm, SequenceParser};
use tidemark::{Dimensions, LayoutConfig, RatioSizer, Sizer, DEFAULT_WIDTH};

/// Tidemark - lay out interaction diagrams as drawing primitives
#[derive(Parser)]
#[command(name = "tidemark")]
#[command(about = "Lay out interaction (sequence) diagrams as JSON drawing primitives")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out a diagram and write its primitives as JSON
    Layout {
        /// Input file containing statements (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the JSON primitives (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Diagram width in output units
        #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
        width: f64,

        /// Font scale, overriding any textsize statement
        #[arg(long)]
        text_size: Option<f64>,

        /// Write single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Check that statements parse and lay out cleanly
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Show the named sizes used at a given width
    Sizes {
        /// Diagram width in output units
        #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
        width: f64,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Main CLI application
#[derive(Default)]
pub struct TidemarkApp {
    parser: SequenceParser,
}

impl TidemarkApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("TIDEMARK_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("TIDEMARK_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Tidemark v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Layout {
                input,
                output,
                width,
                text_size,
                compact,
            } => {
                let mut config = LayoutConfig::new(width);
                if let Some(scale) = text_size {
                    config = config.with_font_scale(scale);
                }
                self.layout_command(input, output, config, compact, cli.verbose)
            }
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
            Commands::Sizes { width, json } => self.sizes_command(width, json),
        }
    }

    /// Handle the layout command
    fn layout_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        config: LayoutConfig,
        compact: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let json = self.layout_json(&content, config, compact)?;

        if verbose {
            eprintln!("Laid out diagram at width {}", config.width);
        }

        self.write_output(output, &json)
    }

    /// Lay out `content` and serialise the result
    pub fn layout_json(&self, content: &str, config: LayoutConfig, compact: bool) -> Result<String> {
        config.validate()?;
        let model = self.parser.parse(content)?;
        let diagram = SequenceLayoutAlgorithm::with_config(config).layout(&model)?;
        info!(
            height = diagram.height,
            lines = diagram.primitives.lines.len(),
            "Diagram ready"
        );

        let json = if compact {
            serde_json::to_string(&diagram)?
        } else {
            serde_json::to_string_pretty(&diagram)?
        };
        Ok(json)
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.validate(&content) {
            Ok(summary) => {
                println!("✓ Valid diagram: {}", summary);
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid diagram: {}", e);
                Err(e)
            }
        }
    }

    /// Parse and lay out at the default width, returning a short summary
    pub fn validate(&self, content: &str) -> Result<String> {
        let model = self.parser.parse(content)?;
        SequenceLayoutAlgorithm::new().layout(&model)?;
        Ok(format!(
            "{} lifelines, {} interactions",
            model.lifeline_count(),
            model.interaction_count()
        ))
    }

    /// Handle the sizes command
    fn sizes_command(&self, width: f64, json: bool) -> Result<()> {
        let (dims, sizes) = Self::size_table(width)?;

        if json {
            let table: serde_json::Map<String, serde_json::Value> = sizes
                .iter()
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect();
            let out = serde_json::json!({
                "width": dims.width,
                "font_height": dims.font_height,
                "sizes": table,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("Sizes at width {} (font height {}):", dims.width, dims.font_height);
            for (name, value) in &sizes {
                println!("  {:<28} {}", name, value);
            }
        }

        Ok(())
    }

    /// Every named size the production sizer yields at `width`
    pub fn size_table(width: f64) -> Result<(Dimensions, Vec<(&'static str, f64)>)> {
        LayoutConfig::new(width).validate()?;
        let dims = Dimensions::from_width(width, 1.0);
        let sizer = RatioSizer::new(dims.font_height);
        let sizes = RatioSizer::names()
            .map(|name| Ok((name, sizer.get(name)?)))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = sizes.len(), "Resolved size table");
        Ok((dims, sizes))
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", content.trim_end_matches('\n'))?;
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing_layout_command() {
        let args = vec![
            "tidemark",
            "layout",
            "--input",
            "flow.tm",
            "--output",
            "flow.json",
            "--width",
            "1200",
            "--compact",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Layout {
                input,
                output,
                width,
                text_size,
                compact,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "flow.tm");
                assert_eq!(output.unwrap().to_string_lossy(), "flow.json");
                assert_eq!(width, 1200.0);
                assert!(text_size.is_none());
                assert!(compact);
            }
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_cli_parsing_defaults() {
        let cli = Cli::try_parse_from(["tidemark", "layout"]).unwrap();
        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.log_format, LogFormat::Compact);
        match cli.command {
            Commands::Layout { width, .. } => assert_eq!(width, DEFAULT_WIDTH),
            _ => panic!("Expected Layout command"),
        }
    }

    #[test]
    fn test_cli_parsing_sizes_command() {
        let cli = Cli::try_parse_from(["tidemark", "sizes", "--width", "500", "--json"]).unwrap();
        match cli.command {
            Commands::Sizes { width, json } => {
                assert_eq!(width, 500.0);
                assert!(json);
            }
            _ => panic!("Expected Sizes command"),
        }
    }

    #[test]
    fn test_cli_parsing_validate_command() {
        let cli = Cli::try_parse_from(["tidemark", "validate"]).unwrap();
        match cli.command {
            Commands::Validate { input } => assert!(input.is_none()),
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_verbose_flag() {
        let cli = Cli::try_parse_from(["tidemark", "--verbose", "layout"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_read_input_from_file() {
        let app = TidemarkApp::new();
        let input = "life A\nlife B\nfull A B hi";

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("diagram.tm");
        fs::write(&file_path, input).unwrap();

        assert_eq!(app.read_input(Some(file_path)).unwrap(), input);
    }

    #[test]
    fn test_read_missing_file() {
        let app = TidemarkApp::new();
        let dir = tempdir().unwrap();
        let err = app
            .read_input(Some(dir.path().join("missing.tm")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_layout_to_file() {
        let app = TidemarkApp::new();
        let dir = tempdir().unwrap();
        let input_path = dir.path().join("diagram.tm");
        let output_path = dir.path().join("diagram.json");
        fs::write(&input_path, "life A\nlife B\nfull A B hi").unwrap();

        app.layout_command(
            Some(input_path),
            Some(output_path.clone()),
            LayoutConfig::new(1000.0),
            true,
            false,
        )
        .unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["width"], 1000.0);
        assert_eq!(value["primitives"]["polygons"].as_array().unwrap().len(), 1);
        assert!(!written.contains('\n'));
    }

    #[test]
    fn test_layout_json_rejects_bad_width() {
        let app = TidemarkApp::new();
        assert!(app
            .layout_json("life A", LayoutConfig::new(0.0), false)
            .is_err());
    }

    #[test]
    fn test_validate_reports_counts() {
        let app = TidemarkApp::new();
        let summary = app.validate("life A\nlife B\nfull A B x\nself B y").unwrap();
        assert_eq!(summary, "2 lifelines, 2 interactions");
    }

    #[test]
    fn test_validate_unknown_lifeline() {
        let app = TidemarkApp::new();
        let err = app.validate("life A\nfull A Q x").unwrap_err();
        assert!(err.to_string().contains("Unknown lifeline 'Q'"));
    }

    #[test]
    fn test_size_table() {
        let (dims, sizes) = TidemarkApp::size_table(1000.0).unwrap();
        assert_eq!(dims.font_height, 10.0);
        let arrow = sizes.iter().find(|(name, _)| *name == "ArrowLen").unwrap();
        assert_eq!(arrow.1, 10.0);
        assert!(TidemarkApp::size_table(-1.0).is_err());
    }
}
