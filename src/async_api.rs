use crate::measure::MeasuredExtent;
use crate::resolve::PageSize;
use crate::{Engine, EngineConfig, Error, Result, Viewport};
use log::debug;
use std::sync::mpsc::{self, Sender};
use std::thread;
use tokio::sync::oneshot;

enum Command {
    Goto(String, oneshot::Sender<Result<()>>),
    Measure(oneshot::Sender<Result<MeasuredExtent>>),
    SetViewport(Viewport, oneshot::Sender<Result<()>>),
    PrintPdf(PageSize, oneshot::Sender<Result<Vec<u8>>>),
    Close(oneshot::Sender<Result<()>>),
}

/// An async-friendly browser abstraction backed by a dedicated worker thread.
///
/// The worker thread owns a synchronous [`Engine`] and executes commands
/// sent from async tasks. Nothing is shared with the engine: every request
/// and reply is a message, so the engine never has to be `Send`.
///
/// If every handle is dropped without [`Browser::close`], the worker exits
/// and the engine is dropped, which still releases the browser process.
#[derive(Clone)]
pub struct Browser {
    cmd_tx: Sender<Command>,
}

/// A handle representing the page loaded in the browser.
#[derive(Clone)]
pub struct Page {
    cmd_tx: Sender<Command>,
}

impl Browser {
    /// Create a new browser backed by the CDP engine.
    #[cfg(feature = "cdp")]
    pub async fn new(config: Option<EngineConfig>) -> Result<Self> {
        let config = config.unwrap_or_default();
        Self::with_engine(move || crate::cdp::CdpEngine::new(config)).await
    }

    /// Create a browser around any engine.
    ///
    /// `factory` runs on the worker thread; its error is returned here.
    pub async fn with_engine<E, F>(factory: F) -> Result<Self>
    where
        E: Engine + 'static,
        F: FnOnce() -> Result<E> + Send + 'static,
    {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx): (oneshot::Sender<Result<()>>, oneshot::Receiver<Result<()>>) =
            oneshot::channel();

        thread::spawn(move || {
            // Initialize engine on the worker thread
            let mut engine = match factory() {
                Ok(e) => e,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };

            let _ = init_tx.send(Ok(()));

            // Command loop
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Goto(url, resp) => {
                        let _ = resp.send(engine.load_url(&url));
                    }
                    Command::Measure(resp) => {
                        let _ = resp.send(engine.measure_content());
                    }
                    Command::SetViewport(viewport, resp) => {
                        let _ = resp.send(engine.set_viewport(viewport));
                    }
                    Command::PrintPdf(page, resp) => {
                        let _ = resp.send(engine.print_pdf(&page));
                    }
                    Command::Close(resp) => {
                        let _ = resp.send(engine.close());
                        return;
                    }
                }
            }
            debug!("All browser handles dropped; shutting down engine worker");
        });

        // Wait for the worker to report initialization success or failure
        init_rx.await.map_err(|_| Error::WorkerGone)??;

        Ok(Self { cmd_tx })
    }

    /// Open a page handle backed by the same worker thread.
    pub fn page(&self) -> Page {
        Page {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    /// Shutdown the background worker and close the browser.
    pub async fn close(self) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Close(tx))
            .map_err(|_| Error::WorkerGone)?;
        rx.await.map_err(|_| Error::WorkerGone)?
    }
}

impl Page {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<T>>) -> Command,
    ) -> Result<T> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx.send(make(tx)).map_err(|_| Error::WorkerGone)?;
        rx.await.map_err(|_| Error::WorkerGone)?
    }

    /// Navigate to a URL and wait for it to settle
    pub async fn goto(&self, url: &str) -> Result<()> {
        let url = url.to_string();
        self.request(|tx| Command::Goto(url, tx)).await
    }

    /// Measure the rendered content extent in the page
    pub async fn measure(&self) -> Result<MeasuredExtent> {
        self.request(Command::Measure).await
    }

    /// Resize the rendering surface
    pub async fn set_viewport(&self, viewport: Viewport) -> Result<()> {
        self.request(|tx| Command::SetViewport(viewport, tx)).await
    }

    /// Export the page as a single fixed-size PDF page
    pub async fn print_pdf(&self, page: PageSize) -> Result<Vec<u8>> {
        self.request(|tx| Command::PrintPdf(page, tx)).await
    }
}
