use std::sync::{mpsc, Arc};

use docuchat_core::{Effect, FailureKind, FileSource, Msg, PendingFile};
use docuchat_gateway::{
    EventSink, GatewayCommand, GatewayEvent, GatewayHandle, GatewaySettings, GatewayStartError,
    UploadFile, UploadSource,
};
use docuchat_logging::{dc_info, dc_warn};

use super::app::Inbound;

/// Executes core effects on the gateway worker and feeds settle messages
/// back into the dispatch loop.
pub struct EffectRunner {
    gateway: GatewayHandle,
    inbound: mpsc::Sender<Inbound>,
}

impl EffectRunner {
    pub fn new(
        settings: GatewaySettings,
        inbound: mpsc::Sender<Inbound>,
    ) -> Result<Self, GatewayStartError> {
        let sink = Arc::new(SettleSink {
            inbound: inbound.clone(),
        });
        let gateway = GatewayHandle::new(settings, sink)?;
        Ok(Self { gateway, inbound })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let command = to_command(effect);
            dc_info!("Submitting gateway request {}", command.request_id());
            if let Err(err) = self.gateway.submit(command.clone()) {
                // Without a worker nobody else will settle this request.
                dc_warn!("Gateway unavailable for request {}: {}", command.request_id(), err);
                let _ = self
                    .inbound
                    .send(Inbound::Core(settle_msg(command.failed(err))));
            }
        }
    }
}

struct SettleSink {
    inbound: mpsc::Sender<Inbound>,
}

impl EventSink for SettleSink {
    fn emit(&self, event: GatewayEvent) {
        if let Some(err) = event.failure() {
            dc_warn!(
                "Gateway request {} failed ({}): {}",
                event.request_id(),
                err.kind,
                err.message
            );
        }
        let _ = self.inbound.send(Inbound::Core(settle_msg(event)));
    }
}

fn to_command(effect: Effect) -> GatewayCommand {
    match effect {
        Effect::IngestDocuments { request_id, files } => GatewayCommand::IngestDocuments {
            request_id,
            files: files.into_iter().map(to_upload_file).collect(),
        },
        Effect::IngestUrl { request_id, url } => GatewayCommand::IngestUrl { request_id, url },
        Effect::Ask { request_id, query } => GatewayCommand::Ask { request_id, query },
    }
}

fn to_upload_file(file: PendingFile) -> UploadFile {
    let source = match file.source {
        FileSource::Path(path) => UploadSource::Path(path),
        FileSource::Bytes(bytes) => UploadSource::Bytes(bytes),
    };
    UploadFile::new(file.display_name, source)
}

fn settle_msg(event: GatewayEvent) -> Msg {
    match event {
        GatewayEvent::DocumentsIngested { request_id, result } => Msg::UploadSettled {
            request_id,
            result: result.map_err(|err| map_failure(err.kind)),
        },
        GatewayEvent::UrlIngested { request_id, result } => Msg::UrlSettled {
            request_id,
            result: result.map_err(|err| map_failure(err.kind)),
        },
        GatewayEvent::Answered { request_id, result } => Msg::QuerySettled {
            request_id,
            result: result.map_err(|err| map_failure(err.kind)),
        },
    }
}

fn map_failure(kind: docuchat_gateway::FailureKind) -> FailureKind {
    match kind {
        docuchat_gateway::FailureKind::NetworkUnavailable => FailureKind::NetworkUnavailable,
        docuchat_gateway::FailureKind::ServerError { .. } => FailureKind::ServerError,
        docuchat_gateway::FailureKind::Timeout => FailureKind::Timeout,
        docuchat_gateway::FailureKind::Unknown => FailureKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docuchat_gateway::GatewayError;
    use serde_json::json;

    #[test]
    fn pending_files_keep_name_and_source() {
        let command = to_command(Effect::IngestDocuments {
            request_id: 4,
            files: vec![PendingFile::from_path("/data/a.pdf")],
        });
        assert_eq!(
            command,
            GatewayCommand::IngestDocuments {
                request_id: 4,
                files: vec![UploadFile::new(
                    "a.pdf",
                    UploadSource::Path("/data/a.pdf".into())
                )],
            }
        );
    }

    #[test]
    fn events_map_to_settle_messages() {
        let msg = settle_msg(GatewayEvent::UrlIngested {
            request_id: 2,
            result: Err(GatewayError::new(
                docuchat_gateway::FailureKind::ServerError { status: 500 },
                "boom",
            )),
        });
        assert_eq!(
            msg,
            Msg::UrlSettled {
                request_id: 2,
                result: Err(FailureKind::ServerError),
            }
        );

        let msg = settle_msg(GatewayEvent::Answered {
            request_id: 3,
            result: Ok(json!({ "output_text": "hi" })),
        });
        assert_eq!(
            msg,
            Msg::QuerySettled {
                request_id: 3,
                result: Ok(json!({ "output_text": "hi" })),
            }
        );
    }

    #[test]
    fn failed_submission_settles_with_matching_kind() {
        let command = GatewayCommand::Ask {
            request_id: 8,
            query: "q".to_string(),
        };
        let err = GatewayError::new(docuchat_gateway::FailureKind::Unknown, "gone");
        assert_eq!(
            settle_msg(command.failed(err)),
            Msg::QuerySettled {
                request_id: 8,
                result: Err(FailureKind::Unknown),
            }
        );
    }
}
