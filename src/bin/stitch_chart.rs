use anyhow::{bail, Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use stitch_chart::{process_chart_file, write_file_atomic, ChartConfig, ThreadPalette};

/// Turn images into printable cross-stitch charts with a DMC thread legend.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Longest side of the stitch grid, clamped to 16..=600 [default: 150]
    #[arg(short, long)]
    max_size: Option<u32>,

    /// Merge regions smaller than this many stitches [default: 4]
    #[arg(long)]
    min_region: Option<usize>,

    /// JSON thread palette ([{"code", "name", "hex"}]); the built-in DMC table otherwise
    #[arg(long)]
    palette: Option<PathBuf>,

    /// JSON chart configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short = 'd', long)]
    out_dir: Option<PathBuf>,

    /// Output filename prefix (ignored when --out-dir supplied)
    #[arg(short = 'p', long, default_value = "chart_")]
    prefix: String,

    /// Print the chart output as JSON
    #[arg(long)]
    json: bool,

    /// Include the label grid in the JSON output
    #[arg(long)]
    labels: bool,

    /// Reuse results cached in this directory
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

impl Args {
    /// Config file values with the command-line flags applied on top.
    fn chart_config(&self) -> Result<ChartConfig> {
        let mut config = match &self.config {
            Some(path) => ChartConfig::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ChartConfig::default(),
        };
        if let Some(max_size) = self.max_size {
            config.max_size = max_size;
        }
        if let Some(min_region) = self.min_region {
            config.min_region_size = min_region;
        }
        config.include_labels |= self.labels;
        config.validate().context("invalid chart configuration")?;
        Ok(config)
    }

    fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        match &self.out_dir {
            Some(dir) => dir.join(format!("{stem}.png")),
            None => PathBuf::from(format!("{}{stem}.png", self.prefix)),
        }
    }

    /// One output path per input; two inputs may not share a path.
    fn output_paths(&self) -> Result<Vec<PathBuf>> {
        let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
        let mut paths = Vec::with_capacity(self.inputs.len());
        for input in &self.inputs {
            let out_path = self.output_path(input);
            if let Some(previous) = seen.insert(out_path.clone(), input.as_path()) {
                bail!(
                    "{} and {} would both be written to {}",
                    previous.display(),
                    input.display(),
                    out_path.display()
                );
            }
            paths.push(out_path);
        }
        Ok(paths)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = args.chart_config()?;
    let out_paths = args.output_paths()?;

    let custom_palette = args
        .palette
        .as_ref()
        .map(|path| {
            ThreadPalette::from_json_file(path)
                .with_context(|| format!("failed to load palette {}", path.display()))
        })
        .transpose()?;
    let palette = match &custom_palette {
        Some(palette) => palette,
        None => ThreadPalette::dmc(),
    };

    for (input, out_path) in args.inputs.iter().zip(&out_paths) {
        let output = process_chart_file(input, palette, &config, args.cache_dir.as_deref())
            .with_context(|| format!("chart generation failed for {}", input.display()))?;
        let png = output.png_bytes().context("chart image payload is corrupt")?;

        write_file_atomic(out_path, &png)
            .with_context(|| format!("failed to write {}", out_path.display()))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("Saved → {}", out_path.display());
            for item in &output.legend {
                println!(
                    "  {}  {:>6}  {:<24} {:>6}",
                    item.symbol, item.entry.code, item.entry.name, item.entry.count
                );
            }
        }
    }

    Ok(())
}
