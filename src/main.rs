//! Command line entry point: build a scene from a workbook and print it.

mod report;

use std::error::Error;
use std::fs;
use std::io;

use framescene::{build_scene, PipelineConfig, Viewport, ViewportSize, Workbook};
use report::{render_report, TextHost};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let workbook_path = args
        .next()
        .ok_or("usage: framescene <workbook.json> [config.json]")?;
    let config: PipelineConfig = match args.next() {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => PipelineConfig::default(),
    };

    // The workbook is the JSON export of the spreadsheet: sheet name to rows.
    let workbook: Workbook = serde_json::from_str(&fs::read_to_string(&workbook_path)?)?;
    let build = build_scene(&workbook, &config);
    if let Ok(built) = &build {
        eprint!("{}", render_report(&built.report));
    }

    // Present through the text host, which prints the scene JSON once per frame.
    let mut viewport = Viewport::new(TextHost::new(io::stdout()), ViewportSize::new(1280, 720));
    viewport.present(build)?;
    viewport.frame()?;
    viewport.discard();

    Ok(())
}
