//! Chrome DevTools Protocol adapter implementation

use crate::measure::{MeasuredExtent, MEASURE_SCRIPT};
use crate::resolve::PageSize;
use crate::{Engine, EngineConfig, Error, Result, Viewport};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Emulation;
use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions};
use log::debug;
use std::sync::Arc;
use std::time::Duration;

/// CDP-based engine implementation (uses the `headless_chrome` crate)
///
/// This adapter launches a headless Chrome instance, manages a single tab,
/// and provides the `Engine` trait implementation over it.
pub struct CdpEngine {
    browser: Browser,
    tab: Arc<Tab>,
    config: EngineConfig,
}

impl Engine for CdpEngine {
    fn new(config: EngineConfig) -> Result<Self>
    where
        Self: Sized,
    {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(config.sandbox)
            .path(config.chrome_path.clone())
            .window_size(Some((config.viewport.width, config.viewport.height)))
            .build()
            .map_err(|e| Error::InitializationError(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| Error::InitializationError(format!("Failed to launch browser: {}", e)))?;

        let tab = browser
            .new_tab()
            .map_err(|e| Error::InitializationError(format!("Failed to create tab: {}", e)))?;

        tab.set_default_timeout(Duration::from_millis(config.timeout_ms));

        Ok(Self { browser, tab, config })
    }

    /// Navigate and wait for the load to finish.
    ///
    /// `wait_until_navigated` returns once navigation completes, not once the
    /// network has gone idle, so late requests can still be in flight. The
    /// configured settle delay covers what is left of that gap.
    fn load_url(&mut self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| Error::LoadError(format!("Navigation failed: {}", e)))?;

        self.tab
            .wait_until_navigated()
            .map_err(|e| Error::LoadError(format!("Wait for navigation failed: {}", e)))?;

        // Let script-driven layout settle
        if self.config.settle_delay_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.settle_delay_ms));
        }

        Ok(())
    }

    fn measure_content(&mut self) -> Result<MeasuredExtent> {
        let result = self
            .tab
            .evaluate(MEASURE_SCRIPT, false)
            .map_err(|e| Error::MeasureError(format!("Evaluation failed: {}", e)))?;

        let value = result
            .value
            .ok_or_else(|| Error::MeasureError("No value returned from evaluation".into()))?;

        let extent = MeasuredExtent::from_json(&value)?;
        debug!("Measured content {}x{}px", extent.width_px, extent.height_px);
        Ok(extent)
    }

    fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        self.tab
            .call_method(Emulation::SetDeviceMetricsOverride {
                width: viewport.width,
                height: viewport.height,
                device_scale_factor: 1.0,
                mobile: false,
                scale: None,
                screen_width: None,
                screen_height: None,
                position_x: None,
                position_y: None,
                dont_set_visible_size: None,
                screen_orientation: None,
                viewport: None,
                display_feature: None,
                device_posture: None,
            })
            .map_err(|e| Error::RenderError(format!("Failed to set viewport: {}", e)))?;
        debug!("Viewport set to {}x{}", viewport.width, viewport.height);
        Ok(())
    }

    fn print_pdf(&mut self, page: &PageSize) -> Result<Vec<u8>> {
        let options = PrintToPdfOptions {
            print_background: Some(self.config.print_background),
            prefer_css_page_size: Some(false),
            paper_width: Some(page.width.to_inches()),
            paper_height: Some(page.height.to_inches()),
            margin_top: Some(0.0),
            margin_bottom: Some(0.0),
            margin_left: Some(0.0),
            margin_right: Some(0.0),
            ..Default::default()
        };

        let pdf = self
            .tab
            .print_to_pdf(Some(options))
            .map_err(|e| Error::RenderError(format!("PDF export failed: {}", e)))?;

        Ok(pdf)
    }

    fn close(self) -> Result<()> {
        // Closing the tab first lets Chrome flush; dropping the browser kills the process.
        self.tab.close(true)?;
        drop(self.browser);
        Ok(())
    }
}

