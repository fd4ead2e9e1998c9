use super::{POST_LOCATION, ScenarioError};
use crate::{
    connection::Connection,
    report::UploadReport,
    stubs::{PositionStub, UploadError},
};
use demo_proto::pb::sample::Location;

/// Client streaming: sends every location in order, then waits for the single summary.
///
/// A failed send returns immediately, carrying the server's status when the call already ended
/// with one. The stream is never closed in that case.
pub async fn upload(
    connection: Connection,
    locations: Vec<Location>,
) -> Result<UploadReport, ScenarioError> {
    let mut stub = PositionStub::from_connection(&connection);
    let mut upload = stub.post_location();

    for (index, location) in locations.into_iter().enumerate() {
        tracing::debug!(index, lat = location.lat, lon = location.lon, "sending location");

        upload
            .send(location)
            .await
            .map_err(|source| ScenarioError::Send {
                method: POST_LOCATION,
                index,
                source,
            })?;
    }

    let sent = upload.sent();

    let summary = upload.close_and_receive().await.map_err(|err| match err {
        UploadError::Status(status) => ScenarioError::Call {
            method: POST_LOCATION,
            status,
        },
        source => ScenarioError::Stream {
            method: POST_LOCATION,
            source,
        },
    })?;

    tracing::info!(sent, received = summary.received, "upload closed");

    drop(stub);
    connection.close();
    Ok(UploadReport {
        sent,
        received: summary.received,
    })
}
