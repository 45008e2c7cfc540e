use std::path::Path;

use anyhow::Context;
use chroma_preview_rs::image_pipeline::{
    ExtractionConfig, FilterParameters, Orientation, PreviewPipeline, SharedFilterParameters,
    SourceLayout, load_background,
};
use chroma_preview_rs::logger;

use tracing::{error, info, warn};

fn load_filter_settings(path: &Path) -> anyhow::Result<FilterParameters> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    FilterParameters::from_json_str(&json)
        .with_context(|| format!("parsing {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    logger::init();

    info!("Starting chroma preview...");

    let config = ExtractionConfig::builder()
        .source_size(1280, 720)
        .source_layout(SourceLayout::Nv21)
        .build();
    let pipeline = PreviewPipeline::new(config);

    info!(
        "Source frame: {}x{} {:?}",
        pipeline.config().source_width,
        pipeline.config().source_height,
        pipeline.config().source_layout
    );

    let filter = SharedFilterParameters::new(FilterParameters::default());
    let settings_path = Path::new("filter.json");
    if settings_path.exists() {
        match load_filter_settings(settings_path) {
            Ok(changes) => filter.update_with(&changes),
            Err(e) => warn!("Keeping current filter settings: {:#}", e),
        }
    }

    let uniforms = filter.uniforms();
    info!(
        key_colour = ?uniforms.key_colour,
        sensitivity = uniforms.sensitivity,
        smoothing = uniforms.smoothing,
        "Chroma key parameters"
    );

    if let Some(path) = filter.snapshot().background_image() {
        let config = pipeline.config();
        let background = load_background(
            path,
            config.source_width as u32,
            config.source_height as u32,
            Orientation::Landscape,
        )?;
        info!("Background ready: {}x{}", background.width(), background.height());
    }

    match pipeline.convert_file("frame.nv21", "frame_out.nv21") {
        Ok(timings) => {
            info!("Conversion successful!");
            timings.log_summary();
        }
        Err(e) => error!("Conversion failed, frame dropped: {}", e),
    }

    Ok(())
}
