use super::{PULL_LOCATION, ScenarioError};
use crate::{connection::Connection, report::DownloadReport, stubs::PositionStub};

/// Server streaming: reads locations until the server ends the stream.
///
/// End of stream finishes the scenario normally; any status received before it aborts it.
pub async fn pull(connection: Connection) -> Result<DownloadReport, ScenarioError> {
    let mut stub = PositionStub::from_connection(&connection);

    let mut download = stub
        .pull_location()
        .await
        .map_err(ScenarioError::call(PULL_LOCATION))?;

    let mut report = DownloadReport::default();

    while let Some(location) = download
        .recv()
        .await
        .map_err(ScenarioError::call(PULL_LOCATION))?
    {
        tracing::info!(lat = location.lat, lon = location.lon, "location received");
        report.locations.push(location);
    }

    tracing::debug!(count = report.locations.len(), "location stream ended");

    drop(download);
    drop(stub);
    connection.close();
    Ok(report)
}
