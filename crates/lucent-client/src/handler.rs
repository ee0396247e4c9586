use crate::transmitter::Transmitter;
use lucent_core::config::LucentConfig;
use lucent_core::fault::Fault;
use lucent_core::frames::StackResolver;
use lucent_core::report::{AppContext, FaultReport, RequestContext, WirePayload};
use serde_json::Value;

/// Ambient host data attached to a report when the matching config toggle
/// is on. The pipeline never fetches any of this itself; the host injects
/// whatever it has.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    pub request: Option<RequestContext>,
    pub user: Option<Value>,
    pub app: Option<AppContext>,
}

/// Entry point for one fault: resolve the stack, assemble the report,
/// hand it to the transmitter.
pub struct Handler {
    config: LucentConfig,
    resolver: StackResolver,
    transmitter: Transmitter,
}

impl Handler {
    pub fn new(project_root: impl Into<String>, config: LucentConfig) -> anyhow::Result<Self> {
        let transmitter = Transmitter::new(config.lucent_url.clone(), config.lucent_key.clone())?;
        let resolver = StackResolver::new(project_root, config.line_count);

        Ok(Self {
            config,
            resolver,
            transmitter,
        })
    }

    /// Capture and deliver one fault. Returns the transmitter's verdict; a
    /// report that cannot be delivered is dropped.
    pub async fn report(&self, fault: &Fault, context: &HostContext) -> bool {
        let payload = self.build_payload(fault, context);
        self.transmitter.send(&payload).await
    }

    /// Assemble the wire payload: resolve the stack, then attach whichever
    /// contexts are enabled and present. Each attachment stands on its own.
    pub fn build_payload(&self, fault: &Fault, context: &HostContext) -> WirePayload {
        let selection = self.resolver.resolve(fault);
        let report = FaultReport::new(fault, selection);

        let request = if self.config.with_request_details {
            context.request.as_ref()
        } else {
            None
        };
        let user = if self.config.with_user_details {
            context.user.as_ref()
        } else {
            None
        };
        let app = if self.config.with_app_details {
            context.app.as_ref()
        } else {
            None
        };

        report.to_wire(request, user, app)
    }
}
