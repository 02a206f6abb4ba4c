use std::sync::{mpsc, Arc};
use std::thread;

use docuchat_logging::{dc_debug, dc_error, dc_info};

use crate::{
    BackendGateway, EventSink, FailureKind, GatewayCommand, GatewayError, GatewayEvent,
    GatewaySettings, GatewayStartError, ReqwestGateway,
};

/// Handle to the background gateway worker.
///
/// The worker owns a single-threaded tokio runtime and runs one command at a
/// time, to completion. Every submitted command produces exactly one event on
/// the sink, including when the gateway call panics.
pub struct GatewayHandle {
    cmd_tx: mpsc::Sender<GatewayCommand>,
}

impl GatewayHandle {
    pub fn new(
        settings: GatewaySettings,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, GatewayStartError> {
        let gateway = ReqwestGateway::new(settings)?;
        Self::with_gateway(Arc::new(gateway), sink)
    }

    pub fn with_gateway(
        gateway: Arc<dyn BackendGateway>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, GatewayStartError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<GatewayCommand>();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("docuchat-gateway".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let event = runtime.block_on(execute(gateway.clone(), command));
                    sink.emit(event);
                }
                dc_info!("Gateway worker stopped");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Queues a command. Fails only when the worker is gone, in which case
    /// the caller is responsible for settling the request.
    pub fn submit(&self, command: GatewayCommand) -> Result<(), GatewayError> {
        self.cmd_tx.send(command).map_err(|_| {
            GatewayError::new(FailureKind::Unknown, "gateway worker is not running")
        })
    }
}

async fn execute(gateway: Arc<dyn BackendGateway>, command: GatewayCommand) -> GatewayEvent {
    let request_id = command.request_id();
    let fallback = command.clone();
    let task = tokio::spawn(perform(gateway, command));
    match task.await {
        Ok(event) => event,
        Err(err) => {
            dc_error!("Gateway task for request {} aborted: {}", request_id, err);
            fallback.failed(GatewayError::new(FailureKind::Unknown, err.to_string()))
        }
    }
}

async fn perform(gateway: Arc<dyn BackendGateway>, command: GatewayCommand) -> GatewayEvent {
    let event = match command {
        GatewayCommand::IngestDocuments { request_id, files } => GatewayEvent::DocumentsIngested {
            request_id,
            result: gateway.ingest_documents(&files).await,
        },
        GatewayCommand::IngestUrl { request_id, url } => GatewayEvent::UrlIngested {
            request_id,
            result: gateway.ingest_url(&url).await,
        },
        GatewayCommand::Ask { request_id, query } => GatewayEvent::Answered {
            request_id,
            result: gateway.ask(&query).await,
        },
    };
    dc_debug!("Gateway request {} settled", event.request_id());
    event
}
