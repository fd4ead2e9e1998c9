use super::CHECK_IF_BLACK;
use crate::{
    config::ProbeOptions, connection::Connection, report::ProbeSummary, stubs::DemoStub,
};
use demo_proto::pb::demo::CheckIps;

/// Resilience probe: waits `options.interval`, calls `CheckIfBlack`, repeats.
///
/// Failed calls are logged and the loop goes on. Nothing is reconnected explicitly; the
/// transport re-dials on the next call, so the probe picks up again once the server is back.
/// The loop ends when `shutdown` resolves or after `options.max_attempts` attempts.
pub async fn probe<F>(
    connection: Connection,
    request: CheckIps,
    options: ProbeOptions,
    shutdown: F,
) -> ProbeSummary
where
    F: Future<Output = ()>,
{
    let mut stub = DemoStub::from_connection(&connection);
    let mut summary = ProbeSummary::default();

    tokio::pin!(shutdown);

    loop {
        if options
            .max_attempts
            .is_some_and(|max| summary.attempts >= max)
        {
            break;
        }

        tokio::select! {
            _ = &mut shutdown => break,
            _ = tokio::time::sleep(options.interval) => {}
        }

        let result = tokio::select! {
            _ = &mut shutdown => break,
            result = stub.check_if_black(request.clone()) => result,
        };

        summary.attempts += 1;

        match result {
            Ok(reply) => {
                summary.successes += 1;
                summary.last_success = Some(summary.attempts);
                for (ip, is_black) in &reply.results {
                    tracing::info!(attempt = summary.attempts, ip = %ip, is_black = *is_black, "ip checked");
                }
            }
            Err(status) => {
                summary.failures += 1;
                summary.last_failure = Some(summary.attempts);
                tracing::warn!(
                    attempt = summary.attempts,
                    code = ?status.code(),
                    error = %status.message(),
                    "{CHECK_IF_BLACK} failed, retrying after interval"
                );
            }
        }
    }

    tracing::info!(
        attempts = summary.attempts,
        successes = summary.successes,
        failures = summary.failures,
        "probe stopped"
    );

    drop(stub);
    connection.close();
    summary
}
