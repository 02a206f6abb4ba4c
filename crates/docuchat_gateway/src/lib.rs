//! DocuChat gateway: transport to the document/question backend and the
//! background worker that executes gateway commands.
mod gateway;
mod http;
mod types;
mod worker;

pub use gateway::{BackendGateway, ChannelEventSink, EventSink};
pub use http::{GatewaySettings, ReqwestGateway};
pub use types::{
    FailureKind, GatewayCommand, GatewayError, GatewayEvent, GatewayStartError, RequestId,
    UploadFile, UploadSource,
};
pub use worker::GatewayHandle;
