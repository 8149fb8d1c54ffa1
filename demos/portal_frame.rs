use framescene::{build_scene, row, PipelineConfig, Workbook};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Two columns and a rafter, fixed at both feet.
    let workbook = Workbook::new()
        .with_sheet(
            "A",
            vec![
                row([("Start Node", json!(1)), ("End Node", json!(2))]),
                row([("Start Node", json!(2)), ("End Node", json!(3))]),
                row([("Start Node", json!(3)), ("End Node", json!(4))]),
            ],
        )
        .with_sheet(
            "B",
            vec![
                row([("Node", json!(1)), ("X", json!(0)), ("Y", json!(0)), ("Z", json!(0))]),
                row([("Node", json!(2)), ("X", json!(0)), ("Y", json!(12)), ("Z", json!(0))]),
                row([("Node", json!(3)), ("X", json!(10)), ("Y", json!(12)), ("Z", json!(0))]),
                row([("Node", json!(4)), ("X", json!(10)), ("Y", json!(0)), ("Z", json!(0))]),
            ],
        )
        .with_sheet(
            "C",
            vec![
                row([("NodeID", json!(1)), ("SupportType", json!("FIXED"))]),
                row([("NodeID", json!(4)), ("SupportType", json!("FIXED"))]),
            ],
        );

    let built = build_scene(&workbook, &PipelineConfig::default())?;
    for beam in built.scene.beams() {
        println!(
            "{} -> {}: length {:.2}, centre ({:.1}, {:.1}, {:.1})",
            beam.start_node,
            beam.end_node,
            beam.body.length,
            beam.body.position.x,
            beam.body.position.y,
            beam.body.position.z
        );
    }
    println!(
        "{} primitive(s), {} support marker(s), {} joint marker(s)",
        built.scene.len(),
        built.report.supports,
        built.report.joints
    );

    Ok(())
}
