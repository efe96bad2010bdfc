//! Integration tests against a real headless Chrome

#![cfg(feature = "cdp")]

use mhtml2pdf::async_api::Browser;
use mhtml2pdf::convert::{self, file_url};
use mhtml2pdf::{ConvertJob, Engine, EngineConfig, Viewport};

const TALL_SCROLLER: &str = r#"<!DOCTYPE html>
<html>
<head><title>Scroller</title></head>
<body style="margin:0">
<div style="width:400px;height:300px;overflow:auto">
  <div style="width:1200px;height:30000px">deep</div>
</div>
</body>
</html>"#;

fn write_page(dir: &tempfile::TempDir, html: &str) -> std::path::PathBuf {
    let path = dir.path().join("page.html");
    std::fs::write(&path, html).unwrap();
    path
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_measure_scrollable_content() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(&dir, TALL_SCROLLER);

    let mut engine = mhtml2pdf::new_engine(EngineConfig::default()).expect("Failed to create engine");
    engine
        .load_url(file_url(&input).unwrap().as_str())
        .expect("Failed to load page");

    let extent = engine.measure_content().expect("Failed to measure");
    assert!(extent.width_px >= 1200, "width was {}", extent.width_px);
    assert!(extent.height_px >= 30000, "height was {}", extent.height_px);

    engine.close().unwrap();
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_viewport_resizes_page_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(&dir, "<html><body style=\"margin:0\"><p>tiny</p></body></html>");

    let mut engine = mhtml2pdf::new_engine(EngineConfig::default()).expect("Failed to create engine");
    engine
        .load_url(file_url(&input).unwrap().as_str())
        .expect("Failed to load page");

    // A tiny page measures as the viewport: root clientWidth x window.innerHeight
    engine
        .set_viewport(Viewport { width: 1000, height: 5000 })
        .expect("Failed to set viewport");
    let extent = engine.measure_content().expect("Failed to measure");
    assert_eq!(extent.width_px, 1000);
    assert_eq!(extent.height_px, 5000);

    engine.close().unwrap();
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_convert_writes_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(&dir, TALL_SCROLLER);
    let output = dir.path().join("out.pdf");

    let browser = Browser::new(None).await.expect("Failed to start browser");
    let job = ConvertJob::new(&input, &output, None, None);
    let conversion = convert::run(browser, &job).await.expect("Conversion failed");

    assert_eq!(conversion.resolved.export.height.to_string(), "20000px");
    assert_eq!(conversion.resolved.viewport.height, 20000);

    let pdf = std::fs::read(&output).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_convert_with_letter_size() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_page(&dir, "<html><body><p>Letter</p></body></html>");
    let output = dir.path().join("letter.pdf");

    let browser = Browser::new(None).await.expect("Failed to start browser");
    let job = ConvertJob::new(&input, &output, Some("8.5in"), Some("11in"));
    let conversion = convert::run(browser, &job).await.expect("Conversion failed");

    assert_eq!(conversion.resolved.viewport.width, 816);
    assert_eq!(conversion.resolved.viewport.height, 1056);
    assert!(output.exists());
}
