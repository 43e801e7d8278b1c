//! imagesc - export a labeled CSV matrix as an interactive d3 heatmap
//!
//! This is the main entry point for the imagesc command-line tool.

use tracing::{error, info, Level};

use imagesc::data_loader::load_matrix_csv;
use imagesc::export::{write_d3, D3Options};
use imagesc::logging::{generate_run_id, init_tracing, log_error, with_verbosity};
use imagesc::matrix::normalize_matrix;
use imagesc::options::{normalize, normalize_strict};
use imagesc::{Config, Result};

fn main() -> Result<()> {
    // Load configuration
    let (config, input) = Config::load()?;

    init_tracing(&config.log_level);

    info!("Starting imagesc v{}", env!("CARGO_PKG_VERSION"));

    // Validate configuration
    config.validate().map_err(|e| {
        log_error(&e, "configuration");
        e
    })?;

    let run_id = generate_run_id();
    info!(run_id = %run_id, input = %input.display(), "Loading matrix");

    let matrix = load_matrix_csv(&input).map_err(|e| {
        error!("Failed to load matrix from {}: {}", input.display(), e);
        e
    })?;

    let (render, layout) = if config.export.strict {
        normalize_strict(&config.options).map_err(|e| {
            log_error(&e, "option validation");
            e
        })?
    } else {
        normalize(&config.options)
    };
    info!(
        run_id = %run_id,
        cmap = %render.cmap,
        normalize = layout.normalize,
        extra_options = render.extra.len(),
        "Options normalized"
    );

    let data = with_verbosity(layout.verbose, Level::INFO, || {
        normalize_matrix(matrix.data(), layout.normalize)
    });
    let matrix = matrix.with_data(data)?;

    let d3_options = D3Options::from_options(&config.options).map_err(|e| {
        log_error(&e, "export options");
        e
    })?;

    let export = write_d3(&matrix, &d3_options, &config.export.output_dir).map_err(|e| {
        log_error(&e, "d3 export");
        e
    })?;

    info!(
        run_id = %run_id,
        html = %export.html.display(),
        csv = %export.csv.display(),
        "Web export written"
    );
    println!("{}", export.html.display());

    Ok(())
}
