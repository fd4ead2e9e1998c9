use super::{ScenarioError, TICK_INFO};
use crate::{connection::Connection, report::TickReport, stubs::HelloStub};
use demo_proto::pb::hello::HelloRequest;

/// Unary call: one `TickInfo` request, one reply.
pub async fn tick(
    connection: Connection,
    request: HelloRequest,
) -> Result<TickReport, ScenarioError> {
    let mut stub = HelloStub::from_connection(&connection);

    let reply = stub
        .tick_info(request)
        .await
        .map_err(ScenarioError::call(TICK_INFO))?;

    let report = TickReport {
        info: reply.info,
        receive_time: reply.receive_time,
    };

    tracing::info!(info = %report.info, receive_time = %report.receive_time, "tick reply");

    drop(stub);
    connection.close();
    Ok(report)
}
