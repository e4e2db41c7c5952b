use herald_core::{NewSignal, SignalEvent, SignalId, SignalPayload};
use herald_ports::{HeraldResult, SignalPublisher, SignalRepository};
use std::sync::Arc;
use tracing::info;

/// Validate, persist and announce an incoming signal
///
/// The event only goes out after the store has returned the persisted
/// signal, so subscribers never see an id that readers cannot find.
pub struct IngestSignalUseCase<S, P>
where
    S: SignalRepository,
    P: SignalPublisher,
{
    signals: Arc<S>,
    publisher: Arc<P>,
}

impl<S, P> IngestSignalUseCase<S, P>
where
    S: SignalRepository,
    P: SignalPublisher,
{
    pub fn new(signals: Arc<S>, publisher: Arc<P>) -> Self {
        Self { signals, publisher }
    }

    /// Ingest the raw request body, returning the id the store assigned
    pub async fn execute(&self, raw: &str) -> HeraldResult<SignalId> {
        let payload = SignalPayload::from_json(raw)?;
        let new_signal = NewSignal::from_payload(payload)?;

        let signal = self.signals.create_signal(new_signal).await?;
        let delivered = self.publisher.publish(SignalEvent::from(&signal));

        info!(
            signal_id = signal.id,
            symbol = %signal.symbol,
            delivered,
            "Signal ingested"
        );
        Ok(signal.id)
    }
}
